//! # Taskdesk Core
//!
//! 태스크 관리 서비스의 핵심 도메인 모델 및 타입을 제공합니다:
//! - 인증 주체(관리자/사용자)와 공개 뷰
//! - 자격증명 저장소 trait
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use logging::*;
