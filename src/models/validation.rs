//! Vacation validation request and result models.

use serde::{Deserialize, Serialize};

use super::LeaveRecord;

/// The rule that rejected a vacation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleViolation {
    /// The accrual period's day cap would be breached.
    CapExceeded,
    /// The requested split is shorter than the minimum split length.
    SplitTooShort,
    /// The allotment is being exhausted without any long split.
    MissingLongSplit,
}

impl RuleViolation {
    /// Returns the stable code for this violation (e.g. `"CAP_EXCEEDED"`).
    pub fn code(&self) -> &'static str {
        match self {
            RuleViolation::CapExceeded => "CAP_EXCEEDED",
            RuleViolation::SplitTooShort => "SPLIT_TOO_SHORT",
            RuleViolation::MissingLongSplit => "MISSING_LONG_SPLIT",
        }
    }
}

/// Input to the vacation rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// Leaves already recorded for the employee. Irrelevant entries are
    /// filtered out by the engine.
    #[serde(default)]
    pub existing_leaves: Vec<LeaveRecord>,
    /// The employee requesting vacation.
    pub employee_id: String,
    /// Length of the new request in calendar days.
    pub requested_days: u32,
    /// Key of the accrual period the request draws from.
    pub acquisitive_period_start: String,
}

/// The decision returned by the vacation rule engine.
///
/// # Example
///
/// ```
/// use leave_engine::models::{RuleViolation, ValidationResult};
///
/// let result = ValidationResult::rejected(RuleViolation::SplitTooShort, "too short");
/// assert!(!result.valid);
/// assert_eq!(result.message.as_deref(), Some("too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the request is permissible.
    pub valid: bool,
    /// Human-readable reason when invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The rule that failed, when invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation: Option<RuleViolation>,
}

impl ValidationResult {
    /// A passing result.
    pub fn accepted() -> Self {
        Self {
            valid: true,
            message: None,
            violation: None,
        }
    }

    /// A failing result carrying the violated rule and its message.
    pub fn rejected(violation: RuleViolation, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            violation: Some(violation),
        }
    }
}
