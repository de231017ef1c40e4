//! 등록 → 로그인 → 보호 라우트 접근 전체 흐름 테스트.
//!
//! 인메모리 저장소 위에 실제 라우터를 올리고 `oneshot`으로 요청을 보냅니다.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{Duration, Utc};
use secrecy::SecretString;
use serde_json::{json, Value};
use taskdesk_api::{
    auth::TokenService, create_api_router, repository::MemoryCredentialStore, AppState,
};
use taskdesk_core::{CredentialStore, PrincipalKind};
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "integration-test-signing-secret";

struct TestApp {
    router: Router,
    store: Arc<MemoryCredentialStore>,
    tokens: TokenService,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(MemoryCredentialStore::new());
        let state = AppState::new(store.clone(), TokenService::new(&secret(), 30));

        Self {
            router: create_api_router(Arc::new(state)),
            store,
            tokens: TokenService::new(&secret(), 30),
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        read(response).await
    }

    async fn post(&self, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn get(&self, uri: &str, authorization: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }
}

fn secret() -> SecretString {
    SecretString::new(SECRET.into())
}

async fn read(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn admin_payload() -> Value {
    json!({
        "email": "a@x.com",
        "password": "pw1",
        "phoneNo": "1",
        "role": "owner",
        "address": "x"
    })
}

fn user_payload(email: &str) -> Value {
    json!({
        "email": email,
        "password": "user-pw",
        "phoneNo": "2",
        "type": "designer",
        "skills": ["figma"]
    })
}

#[tokio::test]
async fn admin_registration_and_login_scenario() {
    let app = TestApp::new();

    // 관리자 등록 → 토큰은 admin으로 검증됨
    let (status, body) = app.post("/admin/register", admin_payload(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Admin Created Successfully");
    let token = body["token"].as_str().unwrap();
    let context = app.tokens.verify(token).unwrap();
    assert_eq!(context.kind, PrincipalKind::Admin);
    assert_eq!(body["admin"]["id"], context.subject_id.to_string());
    assert!(body["admin"].get("password").is_none());
    assert!(body["admin"].get("passwordHash").is_none());

    // 저장된 해시는 평문과 다름
    let stored = app.store.find_admin_by_email("a@x.com").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "pw1");

    // 두 번째 관리자 → 405
    let other = json!({
        "email": "b@y.com",
        "password": "pw2",
        "phoneNo": "2",
        "role": "co-owner",
        "address": "y"
    });
    let (status, body) = app.post("/admin/register", other, None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["code"], "ADMIN_ALREADY_EXISTS");

    // 잘못된 비밀번호 → 401
    let (status, body) = app
        .post(
            "/login",
            json!({"email": "a@x.com", "password": "wrong", "userType": "admin"}),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    // 올바른 비밀번호 → 새 토큰
    let (status, body) = app
        .post(
            "/login",
            json!({"email": "a@x.com", "password": "pw1", "userType": "admin"}),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    let login_token = body["token"].as_str().unwrap();
    let context = app.tokens.verify(login_token).unwrap();
    assert_eq!(context.subject_id, stored.id);
    assert_eq!(context.kind, PrincipalKind::Admin);
    assert_eq!(body["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn login_unknown_email_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/login",
            json!({"email": "ghost@x.com", "password": "pw", "userType": "user"}),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn admin_route_role_enforcement() {
    let app = TestApp::new();

    let (_, body) = app.post("/admin/register", admin_payload(), None).await;
    let admin_token = body["token"].as_str().unwrap().to_string();

    // 토큰 없음 → 401
    let (status, body) = app
        .post("/v1/admin/user/register-user", user_payload("u1@x.com"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "MISSING_TOKEN");

    // 관리자 토큰 → 사용자 생성
    let (status, body) = app
        .post(
            "/v1/admin/user/register-user",
            user_payload("u1@x.com"),
            Some(&admin_token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["type"], "designer");

    // 사용자 로그인 후 사용자 토큰으로 관리자 라우트 → 403
    let (status, body) = app
        .post(
            "/login",
            json!({"email": "u1@x.com", "password": "user-pw", "userType": "user"}),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let user_token = body["token"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/v1/admin/user/register-user",
            user_payload("u2@x.com"),
            Some(&user_token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "INSUFFICIENT_PERMISSION");
    assert!(app.store.find_user_by_email("u2@x.com").await.unwrap().is_none());

    // 중복 이메일 → 409
    let (status, _) = app
        .post(
            "/v1/admin/user/register-user",
            user_payload("u1@x.com"),
            Some(&admin_token),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn me_reports_token_subject() {
    let app = TestApp::new();
    let id = Uuid::new_v4();
    let token = app.tokens.issue(id, PrincipalKind::User).unwrap();

    let (status, body) = app
        .get("/v1/auth/me", Some(&format!("Bearer {}", token)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["userType"], "user");
}

#[tokio::test]
async fn rejected_tokens_map_to_distinct_codes() {
    let app = TestApp::new();
    let id = Uuid::new_v4();

    let expired = app
        .tokens
        .issue_at(id, PrincipalKind::Admin, Utc::now() - Duration::days(31))
        .unwrap();
    let foreign = TokenService::new(&SecretString::new("some-other-secret".into()), 30)
        .issue(id, PrincipalKind::Admin)
        .unwrap();

    let cases = [
        (None, "MISSING_TOKEN"),
        (Some("Token abc".to_string()), "INVALID_AUTH_HEADER"),
        (Some("Bearer garbage".to_string()), "MALFORMED_TOKEN"),
        (Some(format!("Bearer {}", expired)), "TOKEN_EXPIRED"),
        (Some(format!("Bearer {}", foreign)), "INVALID_SIGNATURE"),
    ];

    for (authorization, code) in cases {
        let (status, body) = app.get("/v1/auth/me", authorization.as_deref()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", code);
        assert_eq!(body["code"], code);
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn concurrent_admin_registration_admits_one() {
    let app = Arc::new(TestApp::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let mut payload = admin_payload();
                payload["email"] = json!(format!("admin{}@x.com", i));
                app.post("/admin/register", payload, None).await.0
            })
        })
        .collect();

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::METHOD_NOT_ALLOWED)
            .count(),
        3
    );
}
