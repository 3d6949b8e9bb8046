//! Core data models for the Leave Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod application;
mod balance;
mod decision;
mod leave;
mod validation;

pub use application::LeaveApplication;
pub use balance::VacationBalance;
pub use decision::LeaveDecision;
pub use leave::{ApprovalStatus, LeaveRecord, LeaveStatus, LeaveType};
pub use validation::{RuleViolation, ValidationRequest, ValidationResult};
