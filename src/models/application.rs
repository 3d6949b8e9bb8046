//! Leave application model.
//!
//! A [`LeaveApplication`] is what the leave-creation workflow receives before
//! a [`LeaveRecord`](super::LeaveRecord) exists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LeaveType;

/// A request to register a new leave for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// The employee taking the leave.
    pub employee_id: String,
    /// The kind of absence.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// First day of the leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the leave (inclusive).
    pub end_date: NaiveDate,
    /// First day of the accrual period. Required for vacations.
    #[serde(default)]
    pub acquisitive_period_start: Option<NaiveDate>,
    /// Last day of the accrual period. Required for vacations.
    #[serde(default)]
    pub acquisitive_period_end: Option<NaiveDate>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl LeaveApplication {
    /// Returns true if this application is for vacation.
    pub fn is_vacation(&self) -> bool {
        self.leave_type == LeaveType::Vacation
    }

    /// Returns the accrual-period key used to group vacation splits.
    ///
    /// The key is the ISO date of the period start, matching how stored
    /// records carry it.
    pub fn period_key(&self) -> Option<String> {
        self.acquisitive_period_start
            .map(|d| d.format("%Y-%m-%d").to_string())
    }
}
