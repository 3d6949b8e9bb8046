//! Vacation balance computation.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::VacationPolicy;
use crate::models::{LeaveRecord, VacationBalance};

/// Summarises the vacation days an employee has used in one accrual period.
///
/// Uses the same selection as the rule engine: vacation records of
/// `employee_id` whose period key equals `acquisitive_period_start`.
///
/// # Examples
///
/// ```
/// use leave_engine::config::VacationPolicy;
/// use leave_engine::rules::vacation_balance;
/// use rust_decimal::Decimal;
///
/// let balance = vacation_balance(&[], "emp1", "2024-01-01", &VacationPolicy::default());
/// assert_eq!(balance.remaining_days, 30);
/// assert_eq!(balance.used_percentage, Decimal::ZERO);
/// ```
pub fn vacation_balance(
    leaves: &[LeaveRecord],
    employee_id: &str,
    acquisitive_period_start: &str,
    policy: &VacationPolicy,
) -> VacationBalance {
    let splits: Vec<u32> = leaves
        .iter()
        .filter(|leave| leave.is_vacation_split_of(employee_id, acquisitive_period_start))
        .map(|leave| leave.days_off)
        .collect();

    let taken_days = splits.iter().fold(0u32, |acc, &d| acc.saturating_add(d));
    let remaining_days = policy.annual_cap_days.saturating_sub(taken_days);

    let used_percentage = if policy.annual_cap_days == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(taken_days) * Decimal::ONE_HUNDRED / Decimal::from(policy.annual_cap_days))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    };

    VacationBalance {
        employee_id: employee_id.to_string(),
        acquisitive_period_start: acquisitive_period_start.to_string(),
        taken_days,
        remaining_days,
        used_percentage,
        splits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApprovalStatus, LeaveType};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn leave(employee_id: &str, leave_type: LeaveType, days_off: u32) -> LeaveRecord {
        LeaveRecord {
            id: format!("leave_{}", days_off),
            employee_id: employee_id.to_string(),
            leave_type,
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            acquisitive_period_start: Some("2024-01-01".to_string()),
            acquisitive_period_end: None,
            days_off,
            approval_status: ApprovalStatus::Approved,
            notes: None,
            decided_by: None,
            decided_at: None,
            decision_note: None,
        }
    }

    #[test]
    fn test_balance_sums_matching_splits() {
        let leaves = vec![
            leave("emp1", LeaveType::Vacation, 10),
            leave("emp1", LeaveType::Vacation, 5),
            leave("emp1", LeaveType::MedicalLeave, 7),
            leave("emp2", LeaveType::Vacation, 20),
        ];
        let balance = vacation_balance(&leaves, "emp1", "2024-01-01", &VacationPolicy::default());

        assert_eq!(balance.taken_days, 15);
        assert_eq!(balance.remaining_days, 15);
        assert_eq!(balance.used_percentage, dec("50"));
        assert_eq!(balance.splits, vec![10, 5]);
        assert!(!balance.is_exhausted());
    }

    #[test]
    fn test_balance_rounds_percentage_to_two_places() {
        let leaves = vec![leave("emp1", LeaveType::Vacation, 10)];
        let balance = vacation_balance(&leaves, "emp1", "2024-01-01", &VacationPolicy::default());
        assert_eq!(balance.used_percentage, dec("33.33"));
    }

    #[test]
    fn test_balance_never_goes_negative() {
        let leaves = vec![
            leave("emp1", LeaveType::Vacation, 20),
            leave("emp1", LeaveType::Vacation, 15),
        ];
        let balance = vacation_balance(&leaves, "emp1", "2024-01-01", &VacationPolicy::default());
        assert_eq!(balance.remaining_days, 0);
        assert!(balance.is_exhausted());
    }

    #[test]
    fn test_balance_for_other_period_is_empty() {
        let leaves = vec![leave("emp1", LeaveType::Vacation, 10)];
        let balance = vacation_balance(&leaves, "emp1", "2025-01-01", &VacationPolicy::default());
        assert_eq!(balance.taken_days, 0);
        assert!(balance.splits.is_empty());
    }
}
