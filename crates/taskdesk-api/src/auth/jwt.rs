//! JWT 토큰 발급 및 검증.
//!
//! HS256 서명 토큰에 주체 id와 주체 종류(`userType`)를 담습니다.
//! 서버에는 토큰을 저장하지 않으며, 만료 외의 무효화 수단은 없습니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind as JwtErrorKind, Algorithm, DecodingKey, EncodingKey,
    Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use taskdesk_core::{AuthConfig, AuthenticatedContext, ConfigError, PrincipalKind};
use uuid::Uuid;

use super::AuthError;

/// JWT 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 주체 ID
    pub id: Uuid,
    /// 주체 종류
    #[serde(rename = "userType")]
    pub user_type: PrincipalKind,
    /// Issued At (Unix timestamp). 발급 시 항상 기록하지만 검증 시에는 선택 항목
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(id: Uuid, user_type: PrincipalKind, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id,
            user_type,
            iat: Some(issued_at.timestamp()),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}

/// 토큰 서비스.
///
/// 시작 시 한 번 생성되어 `AppState`를 통해 공유됩니다.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &"HS256")
            .field("ttl_days", &self.ttl.num_days())
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// 서명 키와 유효 기간(일)으로 생성합니다.
    pub fn new(secret: &SecretString, ttl_days: i64) -> Self {
        let secret = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::days(ttl_days),
        }
    }

    /// 인증 설정에서 생성합니다. 서명 키가 없으면 에러.
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        if config.token_ttl_days <= 0 {
            return Err(ConfigError::InvalidTokenTtl(config.token_ttl_days));
        }
        Ok(Self::new(config.secret()?, config.token_ttl_days))
    }

    /// 토큰 유효 기간.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 현재 시각 기준으로 토큰을 발급합니다.
    pub fn issue(&self, subject_id: Uuid, kind: PrincipalKind) -> Result<String, AuthError> {
        self.issue_at(subject_id, kind, Utc::now())
    }

    /// 지정한 발급 시각으로 토큰을 발급합니다.
    pub fn issue_at(
        &self,
        subject_id: Uuid,
        kind: PrincipalKind,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = TokenClaims::new(subject_id, kind, issued_at, self.ttl);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::internal("Token Issue Error", e))
    }

    /// 토큰을 검증하고 인증 컨텍스트를 반환합니다.
    ///
    /// 서명 검증이 만료 검사보다 먼저 수행되므로, 다른 키로 서명된 만료 토큰은
    /// `InvalidSignature`가 됩니다.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedContext, AuthError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AuthError::TokenExpired,
                JwtErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            },
        )?;

        Ok(AuthenticatedContext::new(
            data.claims.id,
            data.claims.user_type,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    fn service(secret: &str) -> TokenService {
        TokenService::new(&SecretString::new(secret.into()), 30)
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = service(TEST_SECRET);
        let id = Uuid::new_v4();

        let token = tokens.issue(id, PrincipalKind::Admin).unwrap();
        let context = tokens.verify(&token).unwrap();

        assert_eq!(context.subject_id, id);
        assert_eq!(context.kind, PrincipalKind::Admin);
    }

    #[test]
    fn test_payload_shape() {
        let tokens = service(TEST_SECRET);
        let now = Utc::now();
        let token = tokens.issue_at(Uuid::new_v4(), PrincipalKind::User, now).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        let raw = decode::<serde_json::Value>(&token, &DecodingKey::from_secret(b""), &validation)
            .unwrap()
            .claims;

        assert_eq!(raw["userType"], "user");
        assert!(raw["id"].is_string());
        assert_eq!(raw["iat"], now.timestamp());
        assert_eq!(raw["exp"], (now + Duration::days(30)).timestamp());
    }

    #[test]
    fn test_expired_token() {
        let tokens = service(TEST_SECRET);
        let issued_at = Utc::now() - Duration::days(31);
        let token = tokens.issue_at(Uuid::new_v4(), PrincipalKind::User, issued_at).unwrap();

        assert!(matches!(tokens.verify(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret() {
        let token = service(TEST_SECRET)
            .issue(Uuid::new_v4(), PrincipalKind::User)
            .unwrap();

        let other = service("another-secret-key-for-testing-minimum-32-chars");
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_tampered_payload() {
        let tokens = service(TEST_SECRET);
        let user_token = tokens.issue(Uuid::new_v4(), PrincipalKind::User).unwrap();
        let admin_token = tokens.issue(Uuid::new_v4(), PrincipalKind::Admin).unwrap();

        // 관리자 토큰의 페이로드를 사용자 토큰의 서명과 결합
        let user_parts: Vec<&str> = user_token.split('.').collect();
        let admin_parts: Vec<&str> = admin_token.split('.').collect();
        let forged = format!("{}.{}.{}", user_parts[0], admin_parts[1], user_parts[2]);

        assert!(matches!(tokens.verify(&forged), Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_malformed_tokens() {
        let tokens = service(TEST_SECRET);

        for token in ["", "abc", "invalid.token.here", "a.b"] {
            assert!(
                matches!(tokens.verify(token), Err(AuthError::MalformedToken)),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_unknown_user_type_is_malformed() {
        #[derive(Serialize)]
        struct Foreign {
            id: Uuid,
            #[serde(rename = "userType")]
            user_type: &'static str,
            iat: i64,
            exp: i64,
        }

        let now = Utc::now();
        let claims = Foreign {
            id: Uuid::new_v4(),
            user_type: "superuser",
            iat: now.timestamp(),
            exp: (now + Duration::days(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service(TEST_SECRET).verify(&token),
            Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn test_payload_without_iat_accepted() {
        #[derive(Serialize)]
        struct Minimal {
            id: Uuid,
            #[serde(rename = "userType")]
            user_type: &'static str,
            exp: i64,
        }

        let id = Uuid::new_v4();
        let claims = Minimal {
            id,
            user_type: "admin",
            exp: (Utc::now() + Duration::days(30)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        let context = service(TEST_SECRET).verify(&token).unwrap();
        assert_eq!(context.subject_id, id);
        assert_eq!(context.kind, PrincipalKind::Admin);
    }

    #[test]
    fn test_from_config_requires_secret() {
        let config = AuthConfig::default();
        assert!(matches!(
            TokenService::from_config(&config),
            Err(ConfigError::MissingSecret)
        ));
    }
}
