//! REST API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health`, `/health/ready` - 헬스 체크
//! - `/admin/register`, `/user/register`, `/login` - 공개 인증 endpoint
//! - `/v1/auth/me` - 토큰 주체 조회 (인증 필요)
//! - `/v1/admin/*` - 관리자 전용

pub mod admin;
pub mod auth;
pub mod health;

use std::sync::Arc;

use axum::Router;

pub use admin::{admin_router, session_router, MeResponse};
pub use auth::auth_router;
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 보호 라우트의 미들웨어가 토큰 서비스에 접근해야 하므로 상태를 받습니다.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health_router())
        .merge(auth_router())
        .nest("/v1/auth", session_router(state.clone()))
        .nest("/v1/admin", admin_router(state.clone()))
        .with_state(state)
}
