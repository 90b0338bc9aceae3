#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use profile_api::auth::TokenKeys;
use profile_api::database::{DatabaseError, User, UserRepository};
use profile_api::server::{self, AppState};
use profile_api::types::UserId;

pub const SECRET: &str = "integration-test-secret";

/// Users table stand-in that records how often it was queried
#[derive(Default)]
pub struct FakeUsers {
    rows: HashMap<UserId, User>,
    broken: bool,
    calls: AtomicUsize,
}

impl FakeUsers {
    pub fn with(rows: impl IntoIterator<Item = User>) -> Self {
        Self {
            rows: rows.into_iter().map(|u| (u.id, u)).collect(),
            ..Self::default()
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(self.rows.get(&id).cloned())
    }
}

pub struct TestApp {
    pub router: Router,
    pub users: Arc<FakeUsers>,
    pub tokens: Arc<TokenKeys>,
}

impl TestApp {
    pub fn new(users: FakeUsers, expose_error_details: bool) -> Self {
        let users = Arc::new(users);
        let tokens = Arc::new(TokenKeys::from_secret(SECRET).expect("test secret"));
        let state = AppState {
            users: users.clone(),
            tokens: tokens.clone(),
            expose_error_details,
        };

        Self {
            router: server::app(state),
            users,
            tokens,
        }
    }

    pub fn token_for(&self, user_id: UserId) -> String {
        self.tokens
            .issue(user_id, format!("user{}", user_id), "user", 1)
            .expect("issue token")
    }

    /// Send a GET with an optional raw Authorization header value
    pub async fn get(&self, uri: &str, authorization: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = builder.body(Body::empty())?;

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await?;
        let body = serde_json::from_slice(&bytes).context("response body is not JSON")?;
        Ok((status, body))
    }

    pub async fn get_profile_as(&self, user_id: UserId) -> Result<(StatusCode, Value)> {
        let bearer = format!("Bearer {}", self.token_for(user_id));
        self.get("/api/v1/profile", Some(&bearer)).await
    }
}

pub fn user(id: UserId, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        email: format!("{}@example.com", username),
        first_name: "First".to_string(),
        last_name: "Last".to_string(),
        role: "user".to_string(),
        is_active: true,
        created_at: Utc.with_ymd_and_hms(2023, 11, 5, 8, 15, 30).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 3, 1, 17, 45, 0).unwrap(),
    }
}
