//! Shared helpers for in-process API tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use bookshelf_server::{
    api::create_router,
    config::{AppConfig, AuthConfig, StorageConfig},
    AppState,
};

pub const JWT_SECRET: &str = "test-secret";

/// A router backed by its own temporary data directory
pub struct TestApp {
    pub dir: TempDir,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = AppConfig {
            storage: StorageConfig {
                data_dir: dir.path().to_path_buf(),
            },
            auth: AuthConfig {
                jwt_secret: JWT_SECRET.to_string(),
                jwt_expiration_hours: 1,
            },
            ..AppConfig::default()
        };

        let router = create_router(AppState::new(config));
        Self { dir, router }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .post("/login", None, json!({ "username": username, "password": password }))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().expect("token").to_string()
    }

    /// Run the installer and log in as the default administrator
    pub async fn admin_token(&self) -> String {
        let (status, _) = self.get("/install", None).await;
        assert_eq!(status, StatusCode::CREATED);
        self.login("admin", "admin123").await
    }

    /// Register a regular user and return (id, token)
    pub async fn user_token(&self, username: &str) -> (String, String) {
        let (status, body) = self
            .post(
                "/users",
                None,
                json!({
                    "username": username,
                    "password": "password",
                    "email": format!("{}@example.com", username)
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        let id = body["id"].as_str().unwrap().to_string();
        (id, self.login(username, "password").await)
    }

    pub fn data_file(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }

    pub fn stored(&self, name: &str) -> Vec<Value> {
        match std::fs::read_to_string(self.data_file(name)) {
            Ok(raw) => serde_json::from_str(&raw).unwrap(),
            Err(_) => Vec::new(),
        }
    }
}
