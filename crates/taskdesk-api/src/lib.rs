//! # Taskdesk API
//!
//! 태스크 관리 서비스의 인증/권한 REST API 서버.
//!
//! - 관리자 등록 (시스템 전체 단일 관리자)
//! - 사용자 등록 및 로그인
//! - HS256 토큰 발급/검증
//! - 역할 기반 접근 제어 미들웨어

pub mod auth;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

pub use error::{ApiErrorResponse, ApiResult};
pub use routes::create_api_router;
pub use state::AppState;
