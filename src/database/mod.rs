pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::User;
pub use repository::{PgUserRepository, UserRepository};
