//! Axum용 접근 제어 미들웨어.
//!
//! 요청 처리 순서:
//! `Bearer 토큰 추출 → 토큰 검증 → 역할 확인 → 컨텍스트 삽입 → 핸들러 실행`
//!
//! 각 단계의 실패는 [`AuthError`]로 즉시 응답됩니다.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use taskdesk_core::{AuthenticatedContext, PrincipalKind};

use super::{AuthError, TokenService};
use crate::metrics::record_auth_event;
use crate::state::AppState;

/// 라우트가 요구하는 접근 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// 유효한 토큰이면 누구나
    Authenticated,
    /// 특정 주체 종류만
    Require(PrincipalKind),
}

/// 헤더에서 Bearer 토큰을 꺼냅니다.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}

/// 헤더를 검증하고 정책에 맞는지 확인합니다.
pub fn authorize(
    tokens: &TokenService,
    headers: &HeaderMap,
    policy: AccessPolicy,
) -> Result<AuthenticatedContext, AuthError> {
    let token = extract_bearer(headers)?;
    let context = tokens.verify(token)?;

    match policy {
        AccessPolicy::Authenticated => Ok(context),
        AccessPolicy::Require(required) if context.kind == required => Ok(context),
        AccessPolicy::Require(required) => Err(AuthError::Forbidden { required }),
    }
}

async fn enforce(
    state: &AppState,
    policy: AccessPolicy,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let context = match authorize(&state.tokens, request.headers(), policy) {
        Ok(context) => context,
        Err(err) => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                code = err.code(),
                "Access denied"
            );
            record_auth_event("access_denied", err.code());
            return Err(err);
        }
    };

    tracing::debug!(
        subject_id = %context.subject_id,
        kind = %context.kind,
        "Request authorized"
    );

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

/// 유효한 토큰을 요구하는 미들웨어.
///
/// ```rust,ignore
/// Router::new()
///     .route("/me", get(me))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    enforce(&state, AccessPolicy::Authenticated, request, next).await
}

/// 관리자 토큰을 요구하는 미들웨어. 사용자 토큰은 403.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    enforce(&state, AccessPolicy::Require(PrincipalKind::Admin), request, next).await
}

/// 미들웨어가 삽입한 인증 컨텍스트 추출기.
///
/// `require_auth`/`require_admin` 뒤에 있는 핸들러에서만 사용합니다.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext(pub AuthenticatedContext);

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedContext>()
            .copied()
            .map(AuthContext)
            .ok_or(AuthError::MissingToken)
    }
}
