//! 인증/인가 에러 분류.
//!
//! 모든 인증 흐름과 접근 제어 미들웨어의 실패는 [`AuthError`]로 표현되고,
//! HTTP 경계에서 [`ErrorKind`]에 따라 상태 코드가 결정됩니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use taskdesk_core::PrincipalKind;

use crate::error::ApiErrorResponse;

/// 에러 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 필수 입력 누락/잘못된 입력
    Validation,
    /// 이미 존재하는 주체
    Conflict,
    /// 주체 없음
    NotFound,
    /// 자격증명 불일치
    Unauthorized,
    /// 토큰 없음/Bearer 형식 아님
    Unauthenticated,
    /// 역할 불일치
    Forbidden,
    /// 토큰 만료
    Expired,
    /// 토큰 파싱 불가
    Malformed,
    /// 토큰 서명 불일치
    InvalidSignature,
    /// 저장소/해싱 등 내부 실패
    Internal,
}

/// 인증/인가 에러.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing required fields: {0}")]
    Validation(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid userType")]
    InvalidUserType,

    #[error("Admin already exists")]
    AdminAlreadyExists,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("{} not found", .0.title())]
    PrincipalNotFound(PrincipalKind),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authorization token is required")]
    MissingToken,

    #[error("Authorization header must use the Bearer scheme")]
    InvalidAuthHeader,

    #[error("Token expired")]
    TokenExpired,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Access denied: {required} role required")]
    Forbidden { required: PrincipalKind },

    /// `context`만 응답에 노출되고 `detail`은 로그에만 남습니다.
    #[error("{context}")]
    Internal {
        context: &'static str,
        detail: String,
    },
}

impl AuthError {
    /// 내부 에러 생성.
    pub fn internal(context: &'static str, detail: impl std::fmt::Display) -> Self {
        Self::Internal {
            context,
            detail: detail.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidBody(_) | Self::InvalidUserType => {
                ErrorKind::Validation
            }
            Self::AdminAlreadyExists | Self::UserAlreadyExists => ErrorKind::Conflict,
            Self::PrincipalNotFound(_) => ErrorKind::NotFound,
            Self::InvalidCredentials => ErrorKind::Unauthorized,
            Self::MissingToken | Self::InvalidAuthHeader => ErrorKind::Unauthenticated,
            Self::TokenExpired => ErrorKind::Expired,
            Self::MalformedToken => ErrorKind::Malformed,
            Self::InvalidSignature => ErrorKind::InvalidSignature,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// HTTP 상태 코드.
    ///
    /// 관리자 중복 등록은 기존 클라이언트와의 호환을 위해 405를 유지합니다.
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => match self {
                Self::AdminAlreadyExists => StatusCode::METHOD_NOT_ALLOWED,
                _ => StatusCode::CONFLICT,
            },
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Unauthorized
            | ErrorKind::Unauthenticated
            | ErrorKind::Expired
            | ErrorKind::Malformed
            | ErrorKind::InvalidSignature => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 응답 본문의 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidBody(_) => "INVALID_REQUEST_BODY",
            Self::InvalidUserType => "INVALID_USER_TYPE",
            Self::AdminAlreadyExists => "ADMIN_ALREADY_EXISTS",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::PrincipalNotFound(_) => "NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidAuthHeader => "INVALID_AUTH_HEADER",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::Forbidden { .. } => "INSUFFICIENT_PERMISSION",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let Self::Internal { context, detail } = &self {
            tracing::error!(context = %context, error = %detail, "Internal error while handling auth request");
        }

        let status = self.status_code();
        ApiErrorResponse::new(self.code(), self.to_string()).into_response_with(status)
    }
}
