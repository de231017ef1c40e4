//! 설정 관리.
//!
//! 설정은 다음 순서로 병합됩니다 (뒤가 우선):
//! 1. 코드 기본값
//! 2. `AUTH_SECRET_KEY` 환경 변수 (서명 키 호환용)
//! 3. 설정 파일 (선택, 기본 `config/default.toml`)
//! 4. `TASKDESK__` 접두사 환경 변수 (예: `TASKDESK__AUTH__SECRET`, `TASKDESK__SERVER__PORT`)

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::path::Path;
use thiserror::Error;

/// 토큰 서명 키를 직접 지정하는 레거시 환경 변수.
pub const LEGACY_SECRET_ENV: &str = "AUTH_SECRET_KEY";

/// 토큰 기본 유효 기간 (일).
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// 설정 에러.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 설정 소스 로드/역직렬화 실패
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// 토큰 서명 키 미설정
    #[error("token signing secret is not configured (set TASKDESK__AUTH__SECRET or AUTH_SECRET_KEY)")]
    MissingSecret,

    /// 토큰 유효 기간이 0 이하
    #[error("token ttl must be positive, got {0} days")]
    InvalidTokenTtl(i64),
}

/// 애플리케이션 설정.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 인증 설정
    pub auth: AuthConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: 30,
        }
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 연결 URL. 없으면 인메모리 저장소를 사용합니다.
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 타임아웃 (초)
    pub connection_timeout_secs: u64,
    /// 시작 시 마이그레이션 실행 여부
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connection_timeout_secs: 10,
            run_migrations: true,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 인증 설정.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// 토큰 서명 키
    #[serde(deserialize_with = "deserialize_secret")]
    pub secret: Option<SecretString>,
    /// 토큰 유효 기간 (일)
    pub token_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
        }
    }
}

impl AuthConfig {
    /// 서명 키를 반환합니다. 비어 있으면 `MissingSecret`.
    pub fn secret(&self) -> Result<&SecretString, ConfigError> {
        self.secret
            .as_ref()
            .filter(|s| !s.expose_secret().is_empty())
            .ok_or(ConfigError::MissingSecret)
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .map(|s| SecretString::new(s.into())))
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드하고 검증합니다.
    ///
    /// 파일이 없어도 에러가 아닙니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("auth.token_ttl_days", DEFAULT_TOKEN_TTL_DAYS)?;

        if let Ok(secret) = std::env::var(LEGACY_SECRET_ENV) {
            builder = builder.set_default("auth.secret", secret)?;
        }

        let config = builder
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix("TASKDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// 시작 시점에 치명적인 설정 오류를 검사합니다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.secret()?;
        if self.auth.token_ttl_days <= 0 {
            return Err(ConfigError::InvalidTokenTtl(self.auth.token_ttl_days));
        }
        Ok(())
    }

    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
