// handlers/protected/mod.rs - Handlers that operate on the authenticated principal
//
// Route Prefix: /api/v1/*
// Middleware: jwt_auth_middleware (attaches AuthUser when a valid token is sent)
pub mod profile;

pub use profile::profile_get;
