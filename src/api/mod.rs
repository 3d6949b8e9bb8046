//! HTTP API module for the Leave Engine.
//!
//! This module provides the REST API endpoints for validating vacation
//! requests, registering and deciding leaves, and reading vacation
//! balances.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BalanceQuery, PendingQuery};
pub use response::{ApiError, LeaveView, PolicyResponse};
pub use state::AppState;
