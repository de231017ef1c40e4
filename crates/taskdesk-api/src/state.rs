//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 `Arc`로 래핑되어 여러 요청 간에 공유됩니다.
//! 상태 안의 토큰 서비스와 저장소는 시작 이후 변경되지 않습니다.

use std::sync::Arc;

use taskdesk_core::CredentialStore;

use crate::auth::TokenService;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 자격증명 저장소 (PostgreSQL 또는 인메모리)
    pub store: Arc<dyn CredentialStore>,

    /// 토큰 발급/검증 서비스
    pub tokens: Arc<TokenService>,

    /// 서버 시작 시간 (Unix timestamp)
    pub started_at: i64,

    /// 애플리케이션 버전
    pub version: String,
}

impl AppState {
    pub fn new(store: Arc<dyn CredentialStore>, tokens: TokenService) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
            started_at: chrono::Utc::now().timestamp(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 가동 시간 (초).
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now().timestamp() - self.started_at
    }
}

/// 테스트용 AppState 생성 (인메모리 저장소, 고정 서명 키).
#[cfg(test)]
pub fn create_test_state() -> AppState {
    use secrecy::SecretString;

    use crate::repository::MemoryCredentialStore;

    let tokens = TokenService::new(&SecretString::new("test-signing-secret".into()), 30);
    AppState::new(Arc::new(MemoryCredentialStore::new()), tokens)
}
