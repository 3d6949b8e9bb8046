//! Leave record model and related types.
//!
//! This module defines the [`LeaveRecord`] struct along with the
//! [`LeaveType`], [`ApprovalStatus`] and [`LeaveStatus`] enums used to
//! describe an employee's absences.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The kind of absence a leave record represents.
///
/// Only [`LeaveType::Vacation`] is subject to the splitting rules; every
/// other type is ignored by the vacation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    /// Paid annual vacation drawn from an acquisitive period.
    Vacation,
    /// Absence due to illness or accident.
    MedicalLeave,
    /// Maternity leave (120 days, extendable).
    MaternityLeave,
    /// Paternity leave (5 consecutive days).
    PaternityLeave,
    /// Marriage leave (up to 3 consecutive days).
    Marriage,
    /// Bereavement leave (up to 2 consecutive days).
    Bereavement,
    /// Absence for courses or exams.
    Study,
    /// Blood donation (1 day per 12 months).
    BloodDonation,
    /// Court appearance.
    CourtAppearance,
    /// Electoral registration (up to 2 days).
    ElectoralRegistration,
    /// Vacation days sold back to the employer.
    VacationSale,
    /// Absence caused by a work accident.
    WorkAccident,
    /// Absence authorised by management.
    Dismissal,
    /// Additional paid rest day.
    DayOff,
    /// Any other justified absence.
    Other,
}

/// Where a leave record sits in the approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Approved by an administrator.
    Approved,
    /// Rejected by an administrator.
    Rejected,
    /// Withdrawn before it was taken.
    Cancelled,
}

impl ApprovalStatus {
    /// Returns true if a leave in this state still draws on the employee's
    /// allotment. Rejected and cancelled leaves release their days.
    pub fn holds_days(self) -> bool {
        matches!(self, ApprovalStatus::Pending | ApprovalStatus::Approved)
    }

    /// Returns true if the workflow may move a leave from this state to
    /// `next`.
    ///
    /// Pending leaves can be approved, rejected or cancelled. Approved
    /// leaves can still be cancelled. Rejected and cancelled are final.
    pub fn can_transition_to(self, next: ApprovalStatus) -> bool {
        matches!(
            (self, next),
            (ApprovalStatus::Pending, ApprovalStatus::Approved)
                | (ApprovalStatus::Pending, ApprovalStatus::Rejected)
                | (ApprovalStatus::Pending, ApprovalStatus::Cancelled)
                | (ApprovalStatus::Approved, ApprovalStatus::Cancelled)
        )
    }
}

/// The calendar status of a leave relative to a reference day.
///
/// Serialized with the labels shown on the calendar screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveStatus {
    /// The reference day falls inside the leave.
    #[serde(rename = "ATIVO")]
    Active,
    /// The leave starts after the reference day.
    #[serde(rename = "PLANEJADO")]
    Planned,
    /// The leave ended before the reference day.
    #[serde(rename = "ENCERRADO")]
    Ended,
}

impl LeaveStatus {
    /// Classifies a leave spanning `start..=end` as seen on `today`.
    ///
    /// A leave that starts in the future is planned, one whose last day is
    /// already behind us has ended, and anything else is active.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::LeaveStatus;
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    /// let start = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
    /// assert_eq!(LeaveStatus::classify(start, end, today), LeaveStatus::Active);
    /// ```
    pub fn classify(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Self {
        if start > today {
            LeaveStatus::Planned
        } else if end < today {
            LeaveStatus::Ended
        } else {
            LeaveStatus::Active
        }
    }
}

/// A recorded absence for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// Unique identifier for the leave.
    pub id: String,
    /// The employee who owns this leave.
    pub employee_id: String,
    /// The kind of absence.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// First day of the leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the leave (inclusive).
    pub end_date: NaiveDate,
    /// Key of the accrual period a vacation draws from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisitive_period_start: Option<String>,
    /// Last day of the accrual period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisitive_period_end: Option<NaiveDate>,
    /// Number of calendar days consumed.
    pub days_off: u32,
    /// Approval workflow state.
    #[serde(default)]
    pub approval_status: ApprovalStatus,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Who approved, rejected or cancelled the leave.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,
    /// When the last decision was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
    /// Note attached to the last decision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_note: Option<String>,
}

impl LeaveRecord {
    /// Returns true if this record is a vacation split for `employee_id`
    /// drawn from the accrual period keyed by `period_start`.
    ///
    /// The period key is compared as an opaque string. A record without an
    /// acquisitive period never matches.
    pub fn is_vacation_split_of(&self, employee_id: &str, period_start: &str) -> bool {
        self.employee_id == employee_id
            && self.leave_type == LeaveType::Vacation
            && self.acquisitive_period_start.as_deref() == Some(period_start)
    }

    /// Returns the calendar status of this leave on `today`.
    pub fn status_on(&self, today: NaiveDate) -> LeaveStatus {
        LeaveStatus::classify(self.start_date, self.end_date, today)
    }
}
