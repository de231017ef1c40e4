//! 인증이 필요한 endpoint.
//!
//! - `GET /v1/auth/me` - 유효한 토큰이면 누구나
//! - `POST /v1/admin/user/register-user` - 관리자 전용 사용자 등록

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use taskdesk_core::PrincipalKind;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use super::auth::body;
use crate::auth::flows::{self, RegisterUserRequest, RegisterUserResponse};
use crate::auth::{require_admin, require_auth, AuthContext};
use crate::error::{ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 현재 인증 주체 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub success: bool,
    pub id: Uuid,
    #[serde(rename = "userType")]
    pub user_type: PrincipalKind,
}

/// 토큰의 주체 정보 조회.
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "토큰 주체 정보", body = MeResponse),
        (status = 401, description = "토큰 없음/만료/위조", body = ApiErrorResponse)
    )
)]
pub async fn me(AuthContext(context): AuthContext) -> Json<MeResponse> {
    Json(MeResponse {
        success: true,
        id: context.subject_id,
        user_type: context.kind,
    })
}

/// 관리자가 사용자를 등록합니다.
#[utoipa::path(
    post,
    path = "/v1/admin/user/register-user",
    tag = "admin",
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "사용자 생성", body = RegisterUserResponse),
        (status = 400, description = "필수 필드 누락", body = ApiErrorResponse),
        (status = 401, description = "토큰 없음/만료/위조", body = ApiErrorResponse),
        (status = 403, description = "관리자 토큰 아님", body = ApiErrorResponse),
        (status = 409, description = "이미 등록된 이메일", body = ApiErrorResponse)
    )
)]
pub async fn register_user_by_admin(
    State(state): State<Arc<AppState>>,
    AuthContext(admin): AuthContext,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> ApiResult<Json<RegisterUserResponse>> {
    let request = body(payload)?;
    let response = flows::register_user(state.store.as_ref(), request).await?;

    info!(admin_id = %admin.subject_id, user_id = %response.user.id, "User registered by admin");
    Ok(Json(response))
}

/// 관리자 전용 라우터 (`/v1/admin`에 마운트).
pub fn admin_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/register-user", post(register_user_by_admin))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

/// 세션 라우터 (`/v1/auth`에 마운트).
pub fn session_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
