/// Shared types used across the codebase

/// Primary key of a row in the `users` table, and the principal identifier
/// carried by an authenticated request.
pub type UserId = i64;
