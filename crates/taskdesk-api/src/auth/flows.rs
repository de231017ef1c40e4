//! 등록 및 로그인 흐름.
//!
//! HTTP와 무관하게 저장소, 비밀번호 해셔, 토큰 서비스를 조합합니다.
//! 라우트 핸들러는 요청 본문을 넘기고 결과를 JSON으로 돌려주기만 합니다.
//!
//! 관리자 등록은 토큰을 발급하지만 사용자 등록은 발급하지 않습니다.
//! 사용자는 등록 후 `/login`으로 토큰을 받습니다.

use serde::{Deserialize, Serialize};
use taskdesk_core::{
    AdminProfile, CredentialStore, NewAdmin, NewUser, PrincipalKind, UserProfile,
};
use tracing::{info, warn};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use super::{
    password::{hash_password_blocking, verify_password_blocking},
    AuthError, TokenService,
};
use crate::metrics::record_auth_event;

const ADMIN_REGISTRATION_ERROR: &str = "Admin Registration Error";
const USER_REGISTRATION_ERROR: &str = "User Registration Error";
const LOGIN_ERROR: &str = "Login Error";

// =============================================================================
// 요청 타입
// =============================================================================

// 검증 메시지에는 JSON 필드명을 넣어 누락 필드 목록을 만듭니다.

/// 관리자 등록 요청.
#[derive(Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAdminRequest {
    #[validate(required(message = "email"), length(min = 1, message = "email"))]
    pub email: Option<String>,
    #[validate(required(message = "password"), length(min = 1, message = "password"))]
    pub password: Option<String>,
    #[validate(required(message = "phoneNo"), length(min = 1, message = "phoneNo"))]
    pub phone_no: Option<String>,
    #[validate(required(message = "role"), length(min = 1, message = "role"))]
    pub role: Option<String>,
    #[validate(required(message = "address"), length(min = 1, message = "address"))]
    pub address: Option<String>,
}

/// 사용자 등록 요청.
#[derive(Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[validate(required(message = "email"), length(min = 1, message = "email"))]
    pub email: Option<String>,
    #[validate(required(message = "password"), length(min = 1, message = "password"))]
    pub password: Option<String>,
    #[validate(required(message = "phoneNo"), length(min = 1, message = "phoneNo"))]
    pub phone_no: Option<String>,
    #[serde(rename = "type")]
    #[validate(required(message = "type"), length(min = 1, message = "type"))]
    pub user_type: Option<String>,
    pub role: Option<String>,
    pub languages: Option<Vec<String>>,
    pub occupation: Option<String>,
    pub dob: Option<String>,
    pub skills: Option<Vec<String>>,
    pub qualification: Option<String>,
    pub permanent_address: Option<String>,
    pub corresponding_address: Option<String>,
}

/// 로그인 요청.
#[derive(Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(required(message = "email"), length(min = 1, message = "email"))]
    pub email: Option<String>,
    #[validate(required(message = "password"), length(min = 1, message = "password"))]
    pub password: Option<String>,
    /// `"admin"` 또는 `"user"`
    #[validate(required(message = "userType"), length(min = 1, message = "userType"))]
    pub user_type: Option<String>,
}

// =============================================================================
// 응답 타입
// =============================================================================

/// 관리자 등록 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterAdminResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub admin: AdminProfile,
}

/// 사용자 등록 응답. 토큰은 포함하지 않습니다.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserResponse {
    pub success: bool,
    pub message: String,
    pub user: UserProfile,
}

/// 로그인한 주체의 공개 정보.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PrincipalProfile {
    Admin(AdminProfile),
    User(UserProfile),
}

/// 로그인 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: PrincipalProfile,
}

/// 검증 에러를 정렬된 누락 필드 목록으로 변환합니다.
fn validation_error(errors: ValidationErrors) -> AuthError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| field.to_string())
            })
        })
        .collect();
    fields.sort();
    fields.dedup();

    AuthError::Validation(fields.join(", "))
}

// =============================================================================
// 흐름
// =============================================================================

/// 관리자 등록.
///
/// 1. 필수 필드 검증
/// 2. 기존 관리자 확인 (빠른 경로)
/// 3. 비밀번호 해싱
/// 4. 저장 (저장소 유일성 제약이 최종 방어선)
/// 5. 토큰 발급
pub async fn register_admin(
    store: &dyn CredentialStore,
    tokens: &TokenService,
    request: RegisterAdminRequest,
) -> Result<RegisterAdminResponse, AuthError> {
    request.validate().map_err(validation_error)?;

    let email = request.email.unwrap_or_default();

    let exists = store
        .admin_exists()
        .await
        .map_err(|e| AuthError::internal(ADMIN_REGISTRATION_ERROR, e))?;
    if exists {
        warn!("Admin registration rejected: admin already exists");
        record_auth_event("admin_register", "conflict");
        return Err(AuthError::AdminAlreadyExists);
    }

    let password_hash = hash_password_blocking(request.password.unwrap_or_default())
        .await
        .map_err(|e| AuthError::internal(ADMIN_REGISTRATION_ERROR, e))?;

    let admin = store
        .create_admin(NewAdmin {
            email,
            password_hash,
            phone_no: request.phone_no.unwrap_or_default(),
            role: request.role.unwrap_or_default(),
            address: request.address.unwrap_or_default(),
        })
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                warn!(error = %e, "Admin registration lost race to another admin");
                record_auth_event("admin_register", "conflict");
                AuthError::AdminAlreadyExists
            } else {
                AuthError::internal(ADMIN_REGISTRATION_ERROR, e)
            }
        })?;

    let token = tokens.issue(admin.id, PrincipalKind::Admin)?;

    info!(admin_id = %admin.id, email = %admin.email, "Admin registered");
    record_auth_event("admin_register", "success");

    Ok(RegisterAdminResponse {
        success: true,
        message: "Admin Created Successfully".to_string(),
        token,
        admin: AdminProfile::from(&admin),
    })
}

/// 사용자 등록.
pub async fn register_user(
    store: &dyn CredentialStore,
    request: RegisterUserRequest,
) -> Result<RegisterUserResponse, AuthError> {
    request.validate().map_err(validation_error)?;

    let email = request.email.unwrap_or_default();

    let existing = store
        .find_user_by_email(&email)
        .await
        .map_err(|e| AuthError::internal(USER_REGISTRATION_ERROR, e))?;
    if existing.is_some() {
        warn!("User registration rejected: email already registered");
        record_auth_event("user_register", "conflict");
        return Err(AuthError::UserAlreadyExists);
    }

    let password_hash = hash_password_blocking(request.password.unwrap_or_default())
        .await
        .map_err(|e| AuthError::internal(USER_REGISTRATION_ERROR, e))?;

    let user = store
        .create_user(NewUser {
            email,
            password_hash,
            phone_no: request.phone_no.unwrap_or_default(),
            user_type: request.user_type.unwrap_or_default(),
            role: request.role,
            languages: request.languages,
            occupation: request.occupation,
            dob: request.dob,
            skills: request.skills,
            qualification: request.qualification,
            permanent_address: request.permanent_address,
            corresponding_address: request.corresponding_address,
        })
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                record_auth_event("user_register", "conflict");
                AuthError::UserAlreadyExists
            } else {
                AuthError::internal(USER_REGISTRATION_ERROR, e)
            }
        })?;

    info!(user_id = %user.id, email = %user.email, "User registered");
    record_auth_event("user_register", "success");

    Ok(RegisterUserResponse {
        success: true,
        message: "User Created Successfully".to_string(),
        user: UserProfile::from(&user),
    })
}

/// 로그인.
///
/// `userType`에 해당하는 저장소에서만 이메일을 조회합니다.
pub async fn login(
    store: &dyn CredentialStore,
    tokens: &TokenService,
    request: LoginRequest,
) -> Result<LoginResponse, AuthError> {
    request.validate().map_err(validation_error)?;

    let kind: PrincipalKind = request
        .user_type
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| AuthError::InvalidUserType)?;
    let email = request.email.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let (id, password_hash, profile) = match kind {
        PrincipalKind::Admin => {
            let admin = store
                .find_admin_by_email(&email)
                .await
                .map_err(|e| AuthError::internal(LOGIN_ERROR, e))?
                .ok_or(AuthError::PrincipalNotFound(kind))?;
            (
                admin.id,
                admin.password_hash.clone(),
                PrincipalProfile::Admin(AdminProfile::from(&admin)),
            )
        }
        PrincipalKind::User => {
            let user = store
                .find_user_by_email(&email)
                .await
                .map_err(|e| AuthError::internal(LOGIN_ERROR, e))?
                .ok_or(AuthError::PrincipalNotFound(kind))?;
            (
                user.id,
                user.password_hash.clone(),
                PrincipalProfile::User(UserProfile::from(&user)),
            )
        }
    };

    let matches = verify_password_blocking(password, password_hash)
        .await
        .map_err(|e| AuthError::internal(LOGIN_ERROR, e))?;
    if !matches {
        warn!(kind = %kind, "Login failed: invalid credentials");
        record_auth_event("login", "invalid_credentials");
        return Err(AuthError::InvalidCredentials);
    }

    let token = tokens.issue(id, kind)?;

    info!(subject_id = %id, kind = %kind, "Login successful");
    record_auth_event("login", "success");

    Ok(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        user: profile,
    })
}
