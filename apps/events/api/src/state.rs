//! Application state management.
//!
//! Shared state handed to route builders and the readiness probe.

/// Shared application state.
///
/// Cloning is cheap: the connection is a pooled handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
