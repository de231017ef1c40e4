//! 인증 주체(principal) 도메인 모델.
//!
//! 시스템에는 두 종류의 주체가 존재합니다:
//! - **Admin**: 시스템 전체에 최대 하나만 존재하는 관리자
//! - **User**: 이메일로 구분되는 일반 사용자
//!
//! 저장용 레코드(`AdminPrincipal`, `UserPrincipal`)는 비밀번호 해시를 포함하므로
//! 직렬화하지 않습니다. 응답에는 항상 공개 뷰(`AdminProfile`, `UserProfile`)만 사용합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 주체 종류.
///
/// 토큰의 `userType` 클레임과 로그인 요청의 `userType` 필드에 사용됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum PrincipalKind {
    /// 관리자
    Admin,
    /// 일반 사용자
    User,
}

impl PrincipalKind {
    /// 직렬화 형식 문자열 (`"admin"`, `"user"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// 사용자에게 보여줄 이름 (`"Admin"`, `"User"`).
    pub fn title(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::User => "User",
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 알 수 없는 주체 종류 문자열.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown principal kind: {0}")]
pub struct UnknownPrincipalKind(pub String);

impl FromStr for PrincipalKind {
    type Err = UnknownPrincipalKind;

    /// 대소문자를 구분합니다. `"admin"`과 `"user"`만 허용합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(UnknownPrincipalKind(other.to_string())),
        }
    }
}

// =============================================================================
// 저장 레코드
// =============================================================================

/// 저장된 관리자 레코드.
#[derive(Clone)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct AdminPrincipal {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub phone_no: String,
    pub role: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

// 비밀번호 해시가 로그에 남지 않도록 Debug를 직접 구현
impl fmt::Debug for AdminPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminPrincipal")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// 저장된 사용자 레코드.
#[derive(Clone)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct UserPrincipal {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub phone_no: String,
    /// 사용자 유형 (원본 필드명 `type`)
    pub user_type: String,
    pub role: Option<String>,
    pub languages: Option<Vec<String>>,
    pub occupation: Option<String>,
    pub dob: Option<String>,
    pub skills: Option<Vec<String>>,
    pub qualification: Option<String>,
    pub permanent_address: Option<String>,
    pub corresponding_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for UserPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPrincipal")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("user_type", &self.user_type)
            .finish_non_exhaustive()
    }
}

/// 새 관리자 생성 입력. 비밀번호는 이미 해시된 상태입니다.
#[derive(Clone)]
pub struct NewAdmin {
    pub email: String,
    pub password_hash: String,
    pub phone_no: String,
    pub role: String,
    pub address: String,
}

/// 새 사용자 생성 입력. 비밀번호는 이미 해시된 상태입니다.
#[derive(Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub phone_no: String,
    pub user_type: String,
    pub role: Option<String>,
    pub languages: Option<Vec<String>>,
    pub occupation: Option<String>,
    pub dob: Option<String>,
    pub skills: Option<Vec<String>>,
    pub qualification: Option<String>,
    pub permanent_address: Option<String>,
    pub corresponding_address: Option<String>,
}

impl NewAdmin {
    /// 주어진 id와 생성 시각으로 저장 레코드를 만듭니다.
    pub fn into_principal(self, id: Uuid, created_at: DateTime<Utc>) -> AdminPrincipal {
        AdminPrincipal {
            id,
            email: self.email,
            password_hash: self.password_hash,
            phone_no: self.phone_no,
            role: self.role,
            address: self.address,
            created_at,
        }
    }
}

impl NewUser {
    /// 주어진 id와 생성 시각으로 저장 레코드를 만듭니다.
    pub fn into_principal(self, id: Uuid, created_at: DateTime<Utc>) -> UserPrincipal {
        UserPrincipal {
            id,
            email: self.email,
            password_hash: self.password_hash,
            phone_no: self.phone_no,
            user_type: self.user_type,
            role: self.role,
            languages: self.languages,
            occupation: self.occupation,
            dob: self.dob,
            skills: self.skills,
            qualification: self.qualification,
            permanent_address: self.permanent_address,
            corresponding_address: self.corresponding_address,
            created_at,
        }
    }
}

// =============================================================================
// 공개 뷰
// =============================================================================

/// 응답용 관리자 정보. 비밀번호 해시를 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct AdminProfile {
    pub id: Uuid,
    pub email: String,
    pub phone_no: String,
    pub role: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl From<&AdminPrincipal> for AdminProfile {
    fn from(admin: &AdminPrincipal) -> Self {
        Self {
            id: admin.id,
            email: admin.email.clone(),
            phone_no: admin.phone_no.clone(),
            role: admin.role.clone(),
            address: admin.address.clone(),
            created_at: admin.created_at,
        }
    }
}

/// 응답용 사용자 정보. 비밀번호 해시를 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub phone_no: String,
    #[serde(rename = "type")]
    pub user_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permanent_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corresponding_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&UserPrincipal> for UserProfile {
    fn from(user: &UserPrincipal) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            phone_no: user.phone_no.clone(),
            user_type: user.user_type.clone(),
            role: user.role.clone(),
            languages: user.languages.clone(),
            occupation: user.occupation.clone(),
            dob: user.dob.clone(),
            skills: user.skills.clone(),
            qualification: user.qualification.clone(),
            permanent_address: user.permanent_address.clone(),
            corresponding_address: user.corresponding_address.clone(),
            created_at: user.created_at,
        }
    }
}

/// 토큰 검증을 통과한 요청의 인증 컨텍스트.
///
/// 접근 제어 미들웨어가 요청 extension에 넣고 핸들러가 꺼내 씁니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedContext {
    pub subject_id: Uuid,
    pub kind: PrincipalKind,
}

impl AuthenticatedContext {
    pub fn new(subject_id: Uuid, kind: PrincipalKind) -> Self {
        Self { subject_id, kind }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.kind, PrincipalKind::Admin)
    }
}
