//! Vacation balance model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Summary of how much of an accrual period's allotment has been used.
///
/// # Example
///
/// ```
/// use leave_engine::models::VacationBalance;
/// use rust_decimal::Decimal;
///
/// let balance = VacationBalance {
///     employee_id: "emp1".to_string(),
///     acquisitive_period_start: "2024-01-01".to_string(),
///     taken_days: 10,
///     remaining_days: 20,
///     used_percentage: Decimal::new(3333, 2),
///     splits: vec![10],
/// };
/// assert!(!balance.is_exhausted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationBalance {
    /// The employee the balance belongs to.
    pub employee_id: String,
    /// Key of the accrual period.
    pub acquisitive_period_start: String,
    /// Days already recorded against the period.
    pub taken_days: u32,
    /// Days still available before the cap is reached.
    pub remaining_days: u32,
    /// Share of the cap already used, as a percentage rounded to 2dp.
    pub used_percentage: Decimal,
    /// Length of each recorded split, in record order.
    pub splits: Vec<u32>,
}

impl VacationBalance {
    /// Returns true once no days remain in the period.
    pub fn is_exhausted(&self) -> bool {
        self.remaining_days == 0
    }
}
