use crate::database::{DatabaseError, User, UserRepository};
use crate::types::UserId;

/// Outcome of a profile lookup. Absence and failure are separate cases so
/// callers handle each one explicitly.
#[derive(Debug)]
pub enum ProfileLookup {
    Found(User),
    NotFound,
    Failed(DatabaseError),
}

pub struct ProfileService<'a> {
    users: &'a dyn UserRepository,
}

impl<'a> ProfileService<'a> {
    pub fn new(users: &'a dyn UserRepository) -> Self {
        Self { users }
    }

    /// Look up the profile row for `user_id`
    pub async fn lookup(&self, user_id: UserId) -> ProfileLookup {
        match self.users.find_by_id(user_id).await {
            Ok(Some(user)) => ProfileLookup::Found(user),
            Ok(None) => ProfileLookup::NotFound,
            // Repositories may surface an absent row as RowNotFound instead of None
            Err(DatabaseError::Sqlx(sqlx::Error::RowNotFound)) => ProfileLookup::NotFound,
            Err(e) => ProfileLookup::Failed(e),
        }
    }
}
