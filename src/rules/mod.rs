//! Leave rules for the Leave Engine.
//!
//! This module contains the vacation-splitting rule engine, vacation balance
//! computation, and the calendar arithmetic used to turn leave dates into
//! day counts and concessive-period limits.

mod balance;
mod calendar;
mod vacation;

pub use balance::vacation_balance;
pub use calendar::{concessive_limit, count_calendar_days};
pub use vacation::{VacationRuleEngine, validate_vacation_rule};
