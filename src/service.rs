//! Leave workflow.
//!
//! [`LeaveService`] validates a [`LeaveApplication`], runs vacation requests
//! through the [`VacationRuleEngine`] against the employee's stored history,
//! persists the accepted leave, and moves it through the approval states.
//!
//! Only pending and approved leaves draw on the vacation allotment. A
//! rejected or cancelled vacation releases its days for later requests.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::VacationPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ApprovalStatus, LeaveApplication, LeaveDecision, LeaveRecord, VacationBalance,
    ValidationResult,
};
use crate::repository::LeaveRepository;
use crate::rules::{VacationRuleEngine, concessive_limit, count_calendar_days, vacation_balance};

/// Service composing the leave repository and the vacation rule engine.
#[derive(Clone)]
pub struct LeaveService {
    repository: Arc<dyn LeaveRepository>,
    engine: VacationRuleEngine,
    // Held from the history read until the write lands, so concurrent
    // requests cannot both be validated against the same history.
    writes: Arc<Mutex<()>>,
}

impl LeaveService {
    /// Creates a service over `repository` enforcing `policy`.
    pub fn new(repository: Arc<dyn LeaveRepository>, policy: VacationPolicy) -> Self {
        Self {
            repository,
            engine: VacationRuleEngine::new(policy),
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the rule engine used by this service.
    pub fn engine(&self) -> &VacationRuleEngine {
        &self.engine
    }

    /// Registers a new leave.
    ///
    /// Vacation applications must name their acquisitive period, start no
    /// later than the concessive limit, and pass the splitting rules. A
    /// rejected application is never persisted; the rule message is
    /// returned verbatim in [`EngineError::VacationRuleViolation`].
    pub fn create_leave(&self, application: LeaveApplication) -> EngineResult<LeaveRecord> {
        if application.employee_id.trim().is_empty() {
            return Err(invalid("employee_id", "employee id must not be empty"));
        }

        let days_off = count_calendar_days(application.start_date, application.end_date)?;

        let _guard = self.lock_writes()?;

        if application.is_vacation() {
            self.check_vacation(&application, days_off)?;
        }

        let period_key = application.period_key();
        let record = LeaveRecord {
            id: Uuid::new_v4().to_string(),
            employee_id: application.employee_id,
            leave_type: application.leave_type,
            start_date: application.start_date,
            end_date: application.end_date,
            acquisitive_period_start: period_key,
            acquisitive_period_end: application.acquisitive_period_end,
            days_off,
            approval_status: ApprovalStatus::Pending,
            notes: application.notes,
            decided_by: None,
            decided_at: None,
            decision_note: None,
        };

        let stored = self.repository.insert(record)?;
        info!(
            leave_id = %stored.id,
            employee_id = %stored.employee_id,
            leave_type = ?stored.leave_type,
            days_off = stored.days_off,
            "Leave created"
        );
        Ok(stored)
    }

    fn check_vacation(&self, application: &LeaveApplication, days_off: u32) -> EngineResult<()> {
        let (Some(period_start), Some(period_end)) = (
            application.acquisitive_period_start,
            application.acquisitive_period_end,
        ) else {
            return Err(invalid(
                "acquisitive_period_start",
                "acquisitive period is required for vacation",
            ));
        };

        if period_end < period_start {
            return Err(invalid(
                "acquisitive_period_end",
                format!(
                    "acquisitive period end {} is before its start {}",
                    period_end, period_start
                ),
            ));
        }

        let months = self.engine.policy().concessive_months;
        match concessive_limit(period_end, months) {
            Some(limit) if application.start_date <= limit => {}
            limit => {
                let limit = limit.map_or_else(|| "out of range".to_string(), |d| d.to_string());
                return Err(invalid(
                    "start_date",
                    format!(
                        "vacation start {} exceeds the concessive limit {}",
                        application.start_date, limit
                    ),
                ));
            }
        }

        let period_key = period_start.format("%Y-%m-%d").to_string();
        let history = self.allotment_history(&application.employee_id)?;
        let result = self
            .engine
            .validate(&history, &application.employee_id, days_off, &period_key);

        if let ValidationResult {
            valid: false,
            violation: Some(violation),
            message,
        } = result
        {
            let message = message.unwrap_or_default();
            warn!(
                employee_id = %application.employee_id,
                acquisitive_period_start = %period_key,
                days_off,
                violation = violation.code(),
                "Vacation request rejected"
            );
            return Err(EngineError::VacationRuleViolation { violation, message });
        }

        Ok(())
    }

    /// Approves a pending leave.
    pub fn approve(&self, id: &str, decision: LeaveDecision) -> EngineResult<LeaveRecord> {
        self.decide(id, ApprovalStatus::Approved, decision)
    }

    /// Rejects a pending leave, releasing its days.
    pub fn reject(&self, id: &str, decision: LeaveDecision) -> EngineResult<LeaveRecord> {
        self.decide(id, ApprovalStatus::Rejected, decision)
    }

    /// Cancels a pending or approved leave, releasing its days.
    pub fn cancel(&self, id: &str, decision: LeaveDecision) -> EngineResult<LeaveRecord> {
        self.decide(id, ApprovalStatus::Cancelled, decision)
    }

    fn decide(
        &self,
        id: &str,
        next: ApprovalStatus,
        decision: LeaveDecision,
    ) -> EngineResult<LeaveRecord> {
        if decision.decided_by.trim().is_empty() {
            return Err(invalid("decided_by", "decision must name who took it"));
        }

        let _guard = self.lock_writes()?;

        let mut record = self
            .repository
            .fetch(id)?
            .ok_or_else(|| EngineError::LeaveNotFound { id: id.to_string() })?;

        if !record.approval_status.can_transition_to(next) {
            warn!(
                leave_id = %id,
                from = ?record.approval_status,
                to = ?next,
                "Approval transition refused"
            );
            return Err(EngineError::InvalidTransition {
                id: id.to_string(),
                from: record.approval_status,
                to: next,
            });
        }

        record.approval_status = next;
        record.decided_by = Some(decision.decided_by);
        record.decided_at = Some(Utc::now());
        record.decision_note = decision.note;
        self.repository.update(record.clone())?;

        info!(
            leave_id = %record.id,
            employee_id = %record.employee_id,
            status = ?record.approval_status,
            "Leave decided"
        );
        Ok(record)
    }

    /// Returns up to `limit` leaves awaiting a decision.
    pub fn pending(&self, limit: usize) -> EngineResult<Vec<LeaveRecord>> {
        self.repository.pending(limit)
    }

    /// Returns every leave stored for `employee_id`.
    pub fn leaves_for_employee(&self, employee_id: &str) -> EngineResult<Vec<LeaveRecord>> {
        self.repository.list_leaves_for_employee(employee_id)
    }

    /// Returns the vacation balance of `employee_id` for one accrual period.
    pub fn balance(
        &self,
        employee_id: &str,
        acquisitive_period_start: &str,
    ) -> EngineResult<VacationBalance> {
        let leaves = self.allotment_history(employee_id)?;
        Ok(vacation_balance(
            &leaves,
            employee_id,
            acquisitive_period_start,
            self.engine.policy(),
        ))
    }

    /// The employee's leaves that still draw on the allotment.
    fn allotment_history(&self, employee_id: &str) -> EngineResult<Vec<LeaveRecord>> {
        let mut leaves = self.repository.list_leaves_for_employee(employee_id)?;
        leaves.retain(|leave| leave.approval_status.holds_days());
        Ok(leaves)
    }

    fn lock_writes(&self) -> EngineResult<MutexGuard<'_, ()>> {
        self.writes.lock().map_err(|_| EngineError::Repository {
            message: "leave write lock poisoned".to_string(),
        })
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidLeave {
        field: field.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeaveType, RuleViolation};
    use crate::repository::InMemoryLeaveRepository;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> LeaveService {
        LeaveService::new(
            Arc::new(InMemoryLeaveRepository::new()),
            VacationPolicy::default(),
        )
    }

    fn vacation(start: NaiveDate, end: NaiveDate) -> LeaveApplication {
        LeaveApplication {
            employee_id: "emp1".to_string(),
            leave_type: LeaveType::Vacation,
            start_date: start,
            end_date: end,
            acquisitive_period_start: Some(date(2023, 1, 1)),
            acquisitive_period_end: Some(date(2023, 12, 31)),
            notes: None,
        }
    }

    #[test]
    fn test_create_vacation_counts_inclusive_days() {
        let service = service();
        let record = service
            .create_leave(vacation(date(2024, 3, 1), date(2024, 3, 14)))
            .unwrap();

        assert_eq!(record.days_off, 14);
        assert_eq!(record.acquisitive_period_start.as_deref(), Some("2023-01-01"));
        assert_eq!(record.approval_status, ApprovalStatus::Pending);
        assert_eq!(service.leaves_for_employee("emp1").unwrap().len(), 1);
    }

    #[test]
    fn test_create_vacation_rejected_by_rules_is_not_stored() {
        let service = service();
        let err = service
            .create_leave(vacation(date(2024, 3, 1), date(2024, 3, 4)))
            .unwrap_err();

        match err {
            EngineError::VacationRuleViolation { violation, message } => {
                assert_eq!(violation, RuleViolation::SplitTooShort);
                assert!(message.contains("inferior a 5 dias"));
            }
            other => panic!("Expected VacationRuleViolation, got {:?}", other),
        }
        assert!(service.leaves_for_employee("emp1").unwrap().is_empty());
    }

    #[test]
    fn test_splits_accumulate_across_requests() {
        let service = service();
        service
            .create_leave(vacation(date(2024, 3, 1), date(2024, 3, 10)))
            .unwrap();
        service
            .create_leave(vacation(date(2024, 5, 1), date(2024, 5, 10)))
            .unwrap();

        let err = service
            .create_leave(vacation(date(2024, 8, 1), date(2024, 8, 10)))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::VacationRuleViolation {
                violation: RuleViolation::MissingLongSplit,
                ..
            }
        ));

        let balance = service.balance("emp1", "2023-01-01").unwrap();
        assert_eq!(balance.taken_days, 20);
        assert_eq!(balance.remaining_days, 10);
    }

    #[test]
    fn test_vacation_requires_acquisitive_period() {
        let mut application = vacation(date(2024, 3, 1), date(2024, 3, 14));
        application.acquisitive_period_end = None;

        match service().create_leave(application) {
            Err(EngineError::InvalidLeave { field, .. }) => {
                assert_eq!(field, "acquisitive_period_start");
            }
            other => panic!("Expected InvalidLeave, got {:?}", other),
        }
    }

    #[test]
    fn test_vacation_after_concessive_limit_is_rejected() {
        // Period ends 2023-12-31, so the limit is 2024-11-30.
        let service = service();
        assert!(
            service
                .create_leave(vacation(date(2024, 11, 30), date(2024, 12, 29)))
                .is_ok()
        );

        let mut late = vacation(date(2024, 12, 1), date(2024, 12, 30));
        late.employee_id = "emp2".to_string();
        match service.create_leave(late) {
            Err(EngineError::InvalidLeave { field, message }) => {
                assert_eq!(field, "start_date");
                assert!(message.contains("2024-11-30"));
            }
            other => panic!("Expected InvalidLeave, got {:?}", other),
        }
    }

    #[test]
    fn test_reversed_dates_are_rejected() {
        let result = service().create_leave(vacation(date(2024, 3, 10), date(2024, 3, 1)));
        assert!(matches!(
            result,
            Err(EngineError::InvalidLeave { ref field, .. }) if field == "end_date"
        ));
    }

    #[test]
    fn test_non_vacation_skips_splitting_rules() {
        let service = service();
        let record = service
            .create_leave(LeaveApplication {
                employee_id: "emp1".to_string(),
                leave_type: LeaveType::BloodDonation,
                start_date: date(2024, 4, 2),
                end_date: date(2024, 4, 2),
                acquisitive_period_start: None,
                acquisitive_period_end: None,
                notes: Some("annual donation".to_string()),
            })
            .unwrap();

        assert_eq!(record.days_off, 1);
        assert!(record.acquisitive_period_start.is_none());
    }

    #[test]
    fn test_blank_employee_id_is_rejected() {
        let mut application = vacation(date(2024, 3, 1), date(2024, 3, 14));
        application.employee_id = "  ".to_string();
        assert!(matches!(
            service().create_leave(application),
            Err(EngineError::InvalidLeave { ref field, .. }) if field == "employee_id"
        ));
    }

    fn decision(note: Option<&str>) -> LeaveDecision {
        LeaveDecision {
            decided_by: "admin".to_string(),
            note: note.map(str::to_string),
        }
    }

    #[test]
    fn test_approve_records_decision_metadata() {
        let service = service();
        let created = service
            .create_leave(vacation(date(2024, 3, 1), date(2024, 3, 14)))
            .unwrap();

        let approved = service
            .approve(&created.id, decision(Some("Aprovado conforme planejado")))
            .unwrap();
        assert_eq!(approved.approval_status, ApprovalStatus::Approved);
        assert_eq!(approved.decided_by.as_deref(), Some("admin"));
        assert!(approved.decided_at.is_some());
        assert_eq!(
            approved.decision_note.as_deref(),
            Some("Aprovado conforme planejado")
        );
        assert!(service.pending(10).unwrap().is_empty());
    }

    #[test]
    fn test_decided_leave_cannot_be_decided_again() {
        let service = service();
        let created = service
            .create_leave(vacation(date(2024, 3, 1), date(2024, 3, 14)))
            .unwrap();
        service.reject(&created.id, decision(None)).unwrap();

        match service.approve(&created.id, decision(None)) {
            Err(EngineError::InvalidTransition { from, to, .. }) => {
                assert_eq!(from, ApprovalStatus::Rejected);
                assert_eq!(to, ApprovalStatus::Approved);
            }
            other => panic!("Expected InvalidTransition, got {:?}", other),
        }
    }

    #[test]
    fn test_approved_leave_can_be_cancelled() {
        let service = service();
        let created = service
            .create_leave(vacation(date(2024, 3, 1), date(2024, 3, 14)))
            .unwrap();
        service.approve(&created.id, decision(None)).unwrap();

        let cancelled = service.cancel(&created.id, decision(Some("plans changed"))).unwrap();
        assert_eq!(cancelled.approval_status, ApprovalStatus::Cancelled);
        assert!(service.reject(&created.id, decision(None)).is_err());
    }

    #[test]
    fn test_deciding_unknown_leave_is_not_found() {
        assert!(matches!(
            service().approve("missing", decision(None)),
            Err(EngineError::LeaveNotFound { ref id }) if id == "missing"
        ));
    }

    #[test]
    fn test_decision_requires_decider() {
        let service = service();
        let created = service
            .create_leave(vacation(date(2024, 3, 1), date(2024, 3, 14)))
            .unwrap();
        let anonymous = LeaveDecision {
            decided_by: " ".to_string(),
            note: None,
        };
        assert!(matches!(
            service.approve(&created.id, anonymous),
            Err(EngineError::InvalidLeave { ref field, .. }) if field == "decided_by"
        ));
    }

    #[test]
    fn test_rejected_vacation_releases_its_days() {
        let service = service();
        let first = service
            .create_leave(vacation(date(2024, 3, 1), date(2024, 3, 20)))
            .unwrap();

        // 20 days held, so another 20 would exceed the cap.
        assert!(
            service
                .create_leave(vacation(date(2024, 6, 1), date(2024, 6, 20)))
                .is_err()
        );

        service.reject(&first.id, decision(None)).unwrap();
        assert_eq!(service.balance("emp1", "2023-01-01").unwrap().taken_days, 0);
        assert!(
            service
                .create_leave(vacation(date(2024, 6, 1), date(2024, 6, 20)))
                .is_ok()
        );
    }

    /// Repository that lingers in the history read, widening the window
    /// between reading and inserting.
    struct SlowReadRepository {
        inner: InMemoryLeaveRepository,
    }

    impl LeaveRepository for SlowReadRepository {
        fn list_leaves_for_employee(&self, employee_id: &str) -> EngineResult<Vec<LeaveRecord>> {
            let leaves = self.inner.list_leaves_for_employee(employee_id)?;
            std::thread::sleep(std::time::Duration::from_millis(50));
            Ok(leaves)
        }

        fn insert(&self, record: LeaveRecord) -> EngineResult<LeaveRecord> {
            self.inner.insert(record)
        }

        fn update(&self, record: LeaveRecord) -> EngineResult<()> {
            self.inner.update(record)
        }

        fn fetch(&self, id: &str) -> EngineResult<Option<LeaveRecord>> {
            self.inner.fetch(id)
        }

        fn pending(&self, limit: usize) -> EngineResult<Vec<LeaveRecord>> {
            self.inner.pending(limit)
        }
    }

    #[test]
    fn test_concurrent_requests_cannot_exceed_cap() {
        use std::sync::Barrier;

        let service = LeaveService::new(
            Arc::new(SlowReadRepository {
                inner: InMemoryLeaveRepository::new(),
            }),
            VacationPolicy::default(),
        );
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = [date(2024, 3, 1), date(2024, 6, 1)]
            .into_iter()
            .map(|start| {
                let service = service.clone();
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    service
                        .create_leave(vacation(start, start + chrono::Days::new(19)))
                        .is_ok()
                })
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|ok| *ok)
            .count();
        let stored: u32 = service
            .leaves_for_employee("emp1")
            .unwrap()
            .iter()
            .map(|leave| leave.days_off)
            .sum();

        assert_eq!(accepted, 1);
        assert_eq!(stored, 20);
    }
}
