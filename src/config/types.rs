//! Configuration types for leave policies.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the leave policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyMetadata {
    /// Short code identifying the policy (e.g., "CLT").
    pub code: String,
    /// The human-readable name of the policy.
    pub name: String,
    /// The version or effective date of the policy.
    pub version: String,
    /// URL to the legal text the policy models.
    pub source_url: String,
}

/// Thresholds of the vacation-splitting policy.
///
/// The defaults reproduce Brazilian CLT rules: a 30-day annual cap, no
/// split shorter than 5 days, and at least one split of 14 days or more.
///
/// # Example
///
/// ```
/// use leave_engine::config::VacationPolicy;
///
/// let policy = VacationPolicy::default();
/// assert_eq!(policy.annual_cap_days, 30);
/// assert_eq!(policy.min_split_days, 5);
/// assert_eq!(policy.long_split_days, 14);
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationPolicy {
    /// Maximum vacation days drawn from one acquisitive period.
    pub annual_cap_days: u32,
    /// Minimum length of any single split.
    pub min_split_days: u32,
    /// Length that at least one split must reach once the cap is used up.
    pub long_split_days: u32,
    /// Months after the acquisitive period end within which vacation must start.
    #[serde(default = "default_concessive_months")]
    pub concessive_months: u32,
}

fn default_concessive_months() -> u32 {
    11
}

impl Default for VacationPolicy {
    fn default() -> Self {
        Self {
            annual_cap_days: 30,
            min_split_days: 5,
            long_split_days: 14,
            concessive_months: default_concessive_months(),
        }
    }
}

impl VacationPolicy {
    /// Checks that the thresholds are consistent with each other.
    ///
    /// Every threshold must be non-zero, and the minimum split may not
    /// exceed the long split, which in turn may not exceed the cap.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| Err(EngineError::InvalidPolicy { message });

        if self.annual_cap_days == 0 || self.min_split_days == 0 || self.long_split_days == 0 {
            return invalid("thresholds must be greater than zero".to_string());
        }
        if self.min_split_days > self.long_split_days {
            return invalid(format!(
                "min_split_days ({}) exceeds long_split_days ({})",
                self.min_split_days, self.long_split_days
            ));
        }
        if self.long_split_days > self.annual_cap_days {
            return invalid(format!(
                "long_split_days ({}) exceeds annual_cap_days ({})",
                self.long_split_days, self.annual_cap_days
            ));
        }
        Ok(())
    }
}

/// Layout of `policy.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// Policy metadata.
    pub policy: PolicyMetadata,
    /// Vacation thresholds.
    pub vacation: VacationPolicy,
}
