//! 인증 및 권한 부여.
//!
//! # 구성 요소
//!
//! - [`hash_password`] / [`verify_password`]: Argon2id 비밀번호 해싱
//! - [`TokenService`]: HS256 토큰 발급/검증
//! - [`require_auth`] / [`require_admin`]: 접근 제어 미들웨어
//! - [`AuthContext`]: 인증 컨텍스트 추출기
//! - [`flows`]: 관리자/사용자 등록 및 로그인
//! - [`AuthError`]: 에러 분류와 HTTP 응답 변환
//!
//! ```rust,ignore
//! async fn protected_handler(AuthContext(ctx): AuthContext) -> impl IntoResponse {
//!     format!("Hello, {}!", ctx.subject_id)
//! }
//! ```

mod error;
pub mod flows;
mod jwt;
mod middleware;
mod password;

pub use error::{AuthError, ErrorKind};
pub use jwt::{TokenClaims, TokenService};
pub use middleware::{
    authorize, extract_bearer, require_admin, require_auth, AccessPolicy, AuthContext,
};
pub use password::{
    hash_password, hash_password_blocking, verify_password, verify_password_blocking,
    PasswordError,
};
