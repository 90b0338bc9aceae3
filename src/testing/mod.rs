use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::auth::TokenKeys;
use crate::database::{DatabaseError, User, UserRepository};
use crate::server::AppState;
use crate::types::UserId;

pub const TEST_SECRET: &str = "unit-test-secret";

/// In-memory users table that counts lookups and can simulate an outage
#[derive(Default)]
pub struct MemoryUserRepository {
    users: HashMap<UserId, User>,
    failing: bool,
    calls: AtomicUsize,
}

impl MemoryUserRepository {
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
            ..Self::default()
        }
    }

    /// Every lookup fails as if the pool could not hand out a connection
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(self.users.get(&id).cloned())
    }
}

pub fn sample_user(id: UserId, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        email: format!("{}@example.com", username),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        role: "user".to_string(),
        is_active: true,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
    }
}

pub fn app_state(users: Arc<MemoryUserRepository>, expose_error_details: bool) -> AppState {
    AppState {
        users,
        tokens: Arc::new(TokenKeys::from_secret(TEST_SECRET).unwrap()),
        expose_error_details,
    }
}
