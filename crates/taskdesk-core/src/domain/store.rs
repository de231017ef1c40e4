//! 자격증명 저장소 추상화.
//!
//! 관리자/사용자 레코드의 영속화 계층은 이 trait 뒤에 숨겨집니다.
//! PostgreSQL 구현과 인메모리 구현이 API 크레이트에 있습니다.

use async_trait::async_trait;
use thiserror::Error;

use super::{AdminPrincipal, NewAdmin, NewUser, UserPrincipal};

// =============================================================================
// 에러 타입
// =============================================================================

/// CredentialStore 에러.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 저장소 수준 유일성 제약 위반 (제약 조건 이름)
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// 백엔드 에러 (연결 실패, 쿼리 실패 등)
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }
}

// =============================================================================
// CredentialStore Trait
// =============================================================================

/// 관리자/사용자 자격증명 저장소.
///
/// # 불변 조건
///
/// - 관리자는 최대 하나만 존재합니다. 두 번째 `create_admin`은
///   `StoreError::UniqueViolation`을 반환해야 합니다.
/// - 사용자 이메일은 사용자들 사이에서 유일합니다. 중복 `create_user`는
///   `StoreError::UniqueViolation`을 반환해야 합니다.
///
/// 애플리케이션 수준의 존재 확인은 빠른 경로일 뿐이며, 동시 요청 경쟁은
/// 저장소 제약으로 막습니다.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// 이메일로 관리자 조회.
    async fn find_admin_by_email(&self, email: &str)
        -> Result<Option<AdminPrincipal>, StoreError>;

    /// 이메일로 사용자 조회.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserPrincipal>, StoreError>;

    /// 관리자가 하나라도 존재하는지 확인.
    async fn admin_exists(&self) -> Result<bool, StoreError>;

    /// 관리자 생성.
    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminPrincipal, StoreError>;

    /// 사용자 생성.
    async fn create_user(&self, user: NewUser) -> Result<UserPrincipal, StoreError>;

    /// 저장소 연결 상태 확인.
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// 로그/헬스체크에 표시할 백엔드 이름.
    fn backend_name(&self) -> &'static str;
}
