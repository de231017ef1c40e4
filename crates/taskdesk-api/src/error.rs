//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 통합 API 에러 응답.
///
/// ```json
/// {
///   "success": false,
///   "code": "USER_ALREADY_EXISTS",
///   "message": "User already exists",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 항상 `false`
    pub success: bool,
    /// 에러 코드 (예: "VALIDATION_ERROR", "TOKEN_EXPIRED")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 타임스탬프를 포함한 에러 생성.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code.into(),
            message: message.into(),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상태 코드와 함께 응답으로 변환합니다.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// API 핸들러 결과 타입.
pub type ApiResult<T> = Result<T, crate::auth::AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_includes_timestamp() {
        let error = ApiErrorResponse::new("NOT_FOUND", "User not found");
        assert!(!error.success);
        assert_eq!(error.code, "NOT_FOUND");
        assert!(error.timestamp.is_some());
    }

    #[test]
    fn test_serialization() {
        let error = ApiErrorResponse::new("TOKEN_EXPIRED", "Token expired");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "TOKEN_EXPIRED");
        assert_eq!(json["message"], "Token expired");
        assert!(json["timestamp"].is_i64());
    }
}
