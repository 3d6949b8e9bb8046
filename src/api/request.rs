//! Request types for the Leave Engine API.
//!
//! Bodies for `POST /vacations/validate` and `POST /leaves` deserialize
//! straight into [`ValidationRequest`](crate::models::ValidationRequest) and
//! [`LeaveApplication`](crate::models::LeaveApplication); this module holds
//! the remaining query types. Approval decisions deserialize into
//! [`LeaveDecision`](crate::models::LeaveDecision).

use serde::{Deserialize, Serialize};

/// Query string for `GET /employees/{id}/vacation-balance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceQuery {
    /// Key of the accrual period (e.g. "2024-01-01").
    pub period: String,
}

fn default_pending_limit() -> usize {
    50
}

/// Query string for `GET /leaves/pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingQuery {
    /// Maximum number of leaves returned.
    #[serde(default = "default_pending_limit")]
    pub limit: usize,
}
