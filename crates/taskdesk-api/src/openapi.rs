//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use taskdesk_core::{AdminProfile, PrincipalKind, UserProfile};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::flows::{
    LoginRequest, LoginResponse, PrincipalProfile, RegisterAdminRequest, RegisterAdminResponse,
    RegisterUserRequest, RegisterUserResponse,
};
use crate::error::ApiErrorResponse;
use crate::routes::{ComponentHealth, ComponentStatus, HealthResponse, MeResponse};

/// Taskdesk API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taskdesk API",
        description = r#"
# Taskdesk 인증 API

태스크 관리 서비스의 관리자/사용자 등록, 로그인, 역할 기반 접근 제어 API입니다.

## 인증

보호된 엔드포인트는 `Authorization: Bearer <token>` 헤더가 필요합니다.
토큰은 `/admin/register` 또는 `/login`에서 발급되며 30일간 유효합니다.

## 에러 형식

모든 에러는 `{ "success": false, "code": "...", "message": "..." }` 형식입니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    servers(
        (url = "http://localhost:3000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "auth", description = "인증 - 등록, 로그인, 토큰 주체 조회"),
        (name = "admin", description = "관리자 - 관리자 전용 작업")
    ),
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Common =====
            ApiErrorResponse,
            PrincipalKind,
            AdminProfile,
            UserProfile,

            // ===== Auth =====
            RegisterAdminRequest,
            RegisterAdminResponse,
            RegisterUserRequest,
            RegisterUserResponse,
            LoginRequest,
            LoginResponse,
            PrincipalProfile,
            MeResponse,
        )
    ),
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Auth =====
        crate::routes::auth::register_admin,
        crate::routes::auth::register_user,
        crate::routes::auth::login,
        crate::routes::admin::me,

        // ===== Admin =====
        crate::routes::admin::register_user_by_admin,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
