#![allow(dead_code)]

use std::sync::Once;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::Fake;
use fitness_coach::api::{create_routes, AppState};
use fitness_coach::config::{AiServiceConfig, AppConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

static INIT: Once = Once::new();

pub const TEST_PASSWORD: &str = "password123";

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .init();
    });
}

pub fn test_config(ai: AiServiceConfig) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        log_level: "debug".to_string(),
        jwt_secret: "test_secret_key_for_testing_only".to_string(),
        jwt_expires_hours: 24,
        bcrypt_cost: 4,
        cors_origins: vec!["http://localhost:3000".to_string()],
        seed_demo_data: false,
        ai,
    }
}

/// Router plus the state behind it, so tests can inspect storage directly.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_ai(AiServiceConfig::default())
    }

    pub fn with_ai(ai: AiServiceConfig) -> Self {
        init_test_logging();
        let config = test_config(ai);
        let state = AppState::in_memory(&config).expect("failed to build app state");
        let router = create_routes(state.clone(), &config);
        Self { router, state }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }

    /// Registers a random user with the given profile and returns (username, token).
    pub async fn register_user(&self, profile: Value) -> (String, String) {
        let username: String = Username().fake();
        let email: String = SafeEmail().fake();

        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/register",
                Some(json!({
                    "username": username,
                    "email": email,
                    "password": TEST_PASSWORD,
                    "profile": profile,
                })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

        let token = body["access_token"].as_str().unwrap().to_string();
        (username, token)
    }
}
