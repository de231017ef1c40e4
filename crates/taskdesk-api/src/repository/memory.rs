//! 인메모리 자격증명 저장소.
//!
//! 데이터베이스 URL이 설정되지 않은 개발 환경과 테스트에서 사용합니다.
//! 쓰기 잠금 안에서 존재 확인과 삽입을 함께 수행하므로 PostgreSQL 제약과
//! 같은 규칙이 동시 요청에서도 지켜집니다.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use taskdesk_core::{
    AdminPrincipal, CredentialStore, NewAdmin, NewUser, StoreError, UserPrincipal,
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    admin: Option<AdminPrincipal>,
    /// email → user
    users: HashMap<String, UserPrincipal>,
}

/// 인메모리 자격증명 저장소.
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Inner>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 사용자 수.
    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_admin_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminPrincipal>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.admin.as_ref().filter(|a| a.email == email).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserPrincipal>, StoreError> {
        Ok(self.inner.read().await.users.get(email).cloned())
    }

    async fn admin_exists(&self) -> Result<bool, StoreError> {
        Ok(self.inner.read().await.admin.is_some())
    }

    async fn create_admin(&self, admin: NewAdmin) -> Result<AdminPrincipal, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.admin.is_some() {
            return Err(StoreError::UniqueViolation("admins_singleton_key".to_string()));
        }

        let created = admin.into_principal(Uuid::new_v4(), Utc::now());
        inner.admin = Some(created.clone());
        Ok(created)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserPrincipal, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(&user.email) {
            return Err(StoreError::UniqueViolation("users_email_key".to_string()));
        }

        let created = user.into_principal(Uuid::new_v4(), Utc::now());
        inner.users.insert(created.email.clone(), created.clone());
        Ok(created)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
