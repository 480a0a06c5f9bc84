use std::sync::Arc;

use hrdesk_core::salary::SalaryService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and everything else sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hrdesk_db::DbPool,
    /// Server configuration (JWT settings, upload limits).
    pub config: Arc<ServerConfig>,
    /// Salary import and filter pipelines.
    pub salaries: Arc<SalaryService>,
}
