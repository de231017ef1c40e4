//! 공개 인증 endpoint.
//!
//! # 엔드포인트
//!
//! - `POST /admin/register` - 관리자 등록 (토큰 발급)
//! - `POST /user/register` - 사용자 등록 (토큰 미발급)
//! - `POST /login` - 관리자/사용자 로그인

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use crate::auth::flows::{
    self, LoginRequest, LoginResponse, RegisterAdminRequest, RegisterAdminResponse,
    RegisterUserRequest, RegisterUserResponse,
};
use crate::auth::AuthError;
use crate::error::{ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 잘못된 JSON 본문을 400 검증 에러로 변환합니다.
pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AuthError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AuthError::InvalidBody(rejection.body_text()))
}

/// 관리자 등록.
#[utoipa::path(
    post,
    path = "/admin/register",
    tag = "auth",
    request_body = RegisterAdminRequest,
    responses(
        (status = 200, description = "관리자 생성 및 토큰 발급", body = RegisterAdminResponse),
        (status = 400, description = "필수 필드 누락", body = ApiErrorResponse),
        (status = 405, description = "관리자가 이미 존재함", body = ApiErrorResponse)
    )
)]
pub async fn register_admin(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterAdminRequest>, JsonRejection>,
) -> ApiResult<Json<RegisterAdminResponse>> {
    let request = body(payload)?;
    flows::register_admin(state.store.as_ref(), &state.tokens, request)
        .await
        .map(Json)
}

/// 사용자 등록.
#[utoipa::path(
    post,
    path = "/user/register",
    tag = "auth",
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "사용자 생성", body = RegisterUserResponse),
        (status = 400, description = "필수 필드 누락", body = ApiErrorResponse),
        (status = 409, description = "이미 등록된 이메일", body = ApiErrorResponse)
    )
)]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> ApiResult<Json<RegisterUserResponse>> {
    let request = body(payload)?;
    flows::register_user(state.store.as_ref(), request)
        .await
        .map(Json)
}

/// 로그인.
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = LoginResponse),
        (status = 400, description = "필수 필드 누락 또는 잘못된 userType", body = ApiErrorResponse),
        (status = 401, description = "비밀번호 불일치", body = ApiErrorResponse),
        (status = 404, description = "해당 이메일의 주체 없음", body = ApiErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let request = body(payload)?;
    flows::login(state.store.as_ref(), &state.tokens, request)
        .await
        .map(Json)
}

/// 공개 인증 라우터.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/register", post(register_admin))
        .route("/user/register", post(register_user))
        .route("/login", post(login))
}
