//! Vacation-splitting rule evaluation.
//!
//! This module decides whether a proposed vacation is permitted given the
//! employee's existing vacation splits in the same acquisitive period.
//! Three rules are applied in a fixed order and the first failure wins:
//!
//! 1. **Cap**: the period's total may not exceed the annual cap.
//! 2. **Minimum split**: no split may be shorter than the minimum.
//! 3. **Long split**: once the cap is reached, at least one split must
//!    reach the long-split length.
//!
//! The cap is checked before the minimum split, so a request that breaks
//! both reports the cap. Callers surface that message as-is.

use tracing::debug;

use crate::config::VacationPolicy;
use crate::models::{LeaveRecord, RuleViolation, ValidationRequest, ValidationResult};

/// Evaluates vacation requests against a [`VacationPolicy`].
///
/// The engine holds nothing but the policy thresholds, so it is `Copy` and
/// can be shared freely between threads.
///
/// # Example
///
/// ```
/// use leave_engine::rules::VacationRuleEngine;
///
/// let engine = VacationRuleEngine::default();
/// let result = engine.validate(&[], "emp1", 30, "2024-01-01");
/// assert!(result.valid);
///
/// let result = engine.validate(&[], "emp1", 4, "2024-01-01");
/// assert!(!result.valid);
/// assert!(result.message.unwrap().contains("inferior a 5 dias"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VacationRuleEngine {
    policy: VacationPolicy,
}

impl VacationRuleEngine {
    /// Creates an engine enforcing `policy`.
    pub fn new(policy: VacationPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy this engine enforces.
    pub fn policy(&self) -> &VacationPolicy {
        &self.policy
    }

    /// Validates a request of `requested_days` for `employee_id` drawn from
    /// the accrual period keyed by `acquisitive_period_start`.
    ///
    /// `existing_leaves` may contain any records; only vacation splits of
    /// the same employee and period are taken into account.
    pub fn validate(
        &self,
        existing_leaves: &[LeaveRecord],
        employee_id: &str,
        requested_days: u32,
        acquisitive_period_start: &str,
    ) -> ValidationResult {
        let prior_splits: Vec<u32> = existing_leaves
            .iter()
            .filter(|leave| leave.is_vacation_split_of(employee_id, acquisitive_period_start))
            .map(|leave| leave.days_off)
            .collect();

        let total_taken: u64 = prior_splits.iter().map(|&d| u64::from(d)).sum();
        let new_total = total_taken + u64::from(requested_days);
        let cap = u64::from(self.policy.annual_cap_days);

        let result = if new_total > cap {
            let remaining = cap.saturating_sub(total_taken);
            ValidationResult::rejected(
                RuleViolation::CapExceeded,
                format!(
                    "Limite de {} dias excedido. Saldo atual: {} dias.",
                    self.policy.annual_cap_days, remaining
                ),
            )
        } else if requested_days < self.policy.min_split_days {
            ValidationResult::rejected(
                RuleViolation::SplitTooShort,
                format!(
                    "Nenhum período de férias pode ser inferior a {} dias corridos (CLT).",
                    self.policy.min_split_days
                ),
            )
        } else if new_total >= cap && !self.has_long_split(&prior_splits, requested_days) {
            ValidationResult::rejected(
                RuleViolation::MissingLongSplit,
                format!(
                    "Pelo menos um dos períodos de férias deve ter {} dias ou mais (CLT).",
                    self.policy.long_split_days
                ),
            )
        } else {
            ValidationResult::accepted()
        };

        debug!(
            employee_id,
            acquisitive_period_start,
            prior_splits = prior_splits.len(),
            total_taken,
            requested_days,
            valid = result.valid,
            violation = result.violation.map(|v| v.code()),
            "Evaluated vacation request"
        );

        result
    }

    /// Validates a [`ValidationRequest`].
    pub fn validate_request(&self, request: &ValidationRequest) -> ValidationResult {
        self.validate(
            &request.existing_leaves,
            &request.employee_id,
            request.requested_days,
            &request.acquisitive_period_start,
        )
    }

    fn has_long_split(&self, prior_splits: &[u32], requested_days: u32) -> bool {
        prior_splits
            .iter()
            .chain(std::iter::once(&requested_days))
            .any(|&days| days >= self.policy.long_split_days)
    }
}

/// Validates a vacation request against the default CLT thresholds.
///
/// Shorthand for `VacationRuleEngine::default().validate(...)`.
pub fn validate_vacation_rule(
    existing_leaves: &[LeaveRecord],
    employee_id: &str,
    requested_days: u32,
    acquisitive_period_start: &str,
) -> ValidationResult {
    VacationRuleEngine::default().validate(
        existing_leaves,
        employee_id,
        requested_days,
        acquisitive_period_start,
    )
}
