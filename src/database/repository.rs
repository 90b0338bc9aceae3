use async_trait::async_trait;
use sqlx::PgPool;
use std::time::{Duration, Instant};

use crate::config::DatabaseConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::User;
use crate::types::UserId;

const SELECT_USER_BY_ID: &str = r#"
    SELECT
        id, username, email, first_name, last_name,
        role, is_active, created_at, updated_at
    FROM users
    WHERE id = $1
"#;

/// Read access to the `users` table
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch at most one user by primary key. `Ok(None)` means no row matched.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DatabaseError>;
}

pub struct PgUserRepository {
    pool: PgPool,
    slow_query_threshold: Option<Duration>,
}

impl PgUserRepository {
    pub fn from_config(pool: PgPool, config: &DatabaseConfig) -> Self {
        let slow_query_threshold = config
            .enable_slow_query_warning
            .then(|| Duration::from_millis(config.slow_query_threshold_ms));

        Self {
            pool,
            slow_query_threshold,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DatabaseError> {
        let started = Instant::now();

        let user = sqlx::query_as::<_, User>(SELECT_USER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(threshold) = self.slow_query_threshold {
            let elapsed = started.elapsed();
            if elapsed > threshold {
                tracing::warn!(
                    "Slow query: users lookup for id {} took {}ms (threshold {}ms)",
                    id,
                    elapsed.as_millis(),
                    threshold.as_millis()
                );
            }
        }

        Ok(user)
    }
}
