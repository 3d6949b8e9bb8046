//! Leave record storage.
//!
//! Durable storage lives outside this crate; the [`LeaveRepository`] trait
//! is the seam it plugs into. [`InMemoryLeaveRepository`] backs the HTTP
//! service and the tests.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{EngineError, EngineResult};
use crate::models::{ApprovalStatus, LeaveRecord};

/// Read/write access to leave records.
pub trait LeaveRepository: Send + Sync {
    /// Returns every leave recorded for `employee_id`, in insertion order.
    fn list_leaves_for_employee(&self, employee_id: &str) -> EngineResult<Vec<LeaveRecord>>;

    /// Stores a new leave record.
    fn insert(&self, record: LeaveRecord) -> EngineResult<LeaveRecord>;

    /// Replaces the stored record carrying `record.id`.
    fn update(&self, record: LeaveRecord) -> EngineResult<()>;

    /// Looks a leave up by id.
    fn fetch(&self, id: &str) -> EngineResult<Option<LeaveRecord>>;

    /// Returns up to `limit` leaves awaiting a decision, earliest start first.
    fn pending(&self, limit: usize) -> EngineResult<Vec<LeaveRecord>>;
}

/// A [`LeaveRepository`] holding records in memory, grouped by employee.
#[derive(Debug, Default)]
pub struct InMemoryLeaveRepository {
    leaves: RwLock<HashMap<String, Vec<LeaveRecord>>>,
}

impl InMemoryLeaveRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `records`.
    pub fn with_records(records: impl IntoIterator<Item = LeaveRecord>) -> Self {
        let mut leaves: HashMap<String, Vec<LeaveRecord>> = HashMap::new();
        for record in records {
            leaves.entry(record.employee_id.clone()).or_default().push(record);
        }
        Self {
            leaves: RwLock::new(leaves),
        }
    }
}

fn poisoned<T>(_: T) -> EngineError {
    EngineError::Repository {
        message: "leave store lock poisoned".to_string(),
    }
}

impl LeaveRepository for InMemoryLeaveRepository {
    fn list_leaves_for_employee(&self, employee_id: &str) -> EngineResult<Vec<LeaveRecord>> {
        let leaves = self.leaves.read().map_err(poisoned)?;
        Ok(leaves.get(employee_id).cloned().unwrap_or_default())
    }

    fn insert(&self, record: LeaveRecord) -> EngineResult<LeaveRecord> {
        let mut leaves = self.leaves.write().map_err(poisoned)?;
        let entry = leaves.entry(record.employee_id.clone()).or_default();
        if entry.iter().any(|existing| existing.id == record.id) {
            return Err(EngineError::Repository {
                message: format!("leave '{}' already exists", record.id),
            });
        }
        entry.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: LeaveRecord) -> EngineResult<()> {
        let mut leaves = self.leaves.write().map_err(poisoned)?;
        let slot = leaves
            .get_mut(&record.employee_id)
            .and_then(|entry| entry.iter_mut().find(|existing| existing.id == record.id))
            .ok_or_else(|| EngineError::LeaveNotFound {
                id: record.id.clone(),
            })?;
        *slot = record;
        Ok(())
    }

    fn fetch(&self, id: &str) -> EngineResult<Option<LeaveRecord>> {
        let leaves = self.leaves.read().map_err(poisoned)?;
        Ok(leaves
            .values()
            .flatten()
            .find(|record| record.id == id)
            .cloned())
    }

    fn pending(&self, limit: usize) -> EngineResult<Vec<LeaveRecord>> {
        let leaves = self.leaves.read().map_err(poisoned)?;
        let mut pending: Vec<LeaveRecord> = leaves
            .values()
            .flatten()
            .filter(|record| record.approval_status == ApprovalStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        pending.truncate(limit);
        Ok(pending)
    }
}
