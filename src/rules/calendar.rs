//! Calendar arithmetic for leave periods.
//!
//! Leaves are counted in calendar days inclusive of both endpoints, and a
//! vacation must start within the concessive period that follows the end of
//! its acquisitive period.

use chrono::{Months, NaiveDate};

use crate::error::{EngineError, EngineResult};

/// Counts the calendar days in `start..=end`.
///
/// Returns `InvalidLeave` if `end` is before `start`.
///
/// # Examples
///
/// ```
/// use leave_engine::rules::count_calendar_days;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
/// assert_eq!(count_calendar_days(start, end).unwrap(), 10);
/// assert_eq!(count_calendar_days(start, start).unwrap(), 1);
/// ```
pub fn count_calendar_days(start: NaiveDate, end: NaiveDate) -> EngineResult<u32> {
    if end < start {
        return Err(EngineError::InvalidLeave {
            field: "end_date".to_string(),
            message: format!("end date {} is before start date {}", end, start),
        });
    }

    let days = (end - start).num_days() + 1;
    u32::try_from(days).map_err(|_| EngineError::InvalidLeave {
        field: "end_date".to_string(),
        message: format!("leave of {} days is too long", days),
    })
}

/// Returns the last day a vacation may start for an acquisitive period
/// ending on `acquisitive_end`.
///
/// The limit is `months` months after the period end; when the target
/// month is shorter, the date is clamped to its last day. Returns `None`
/// only if the result falls outside the supported date range.
///
/// # Examples
///
/// ```
/// use leave_engine::rules::concessive_limit;
/// use chrono::NaiveDate;
///
/// let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
/// assert_eq!(
///     concessive_limit(end, 11),
///     NaiveDate::from_ymd_opt(2024, 11, 30)
/// );
/// ```
pub fn concessive_limit(acquisitive_end: NaiveDate, months: u32) -> Option<NaiveDate> {
    acquisitive_end.checked_add_months(Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_count_includes_both_endpoints() {
        assert_eq!(count_calendar_days(date(2024, 7, 1), date(2024, 7, 30)).unwrap(), 30);
    }

    #[test]
    fn test_count_spans_month_and_leap_day() {
        assert_eq!(count_calendar_days(date(2024, 2, 20), date(2024, 3, 5)).unwrap(), 15);
    }

    #[test]
    fn test_count_rejects_reversed_range() {
        match count_calendar_days(date(2024, 7, 10), date(2024, 7, 1)) {
            Err(EngineError::InvalidLeave { field, message }) => {
                assert_eq!(field, "end_date");
                assert!(message.contains("2024-07-01"));
            }
            other => panic!("Expected InvalidLeave, got {:?}", other),
        }
    }

    #[test]
    fn test_concessive_limit_adds_months() {
        assert_eq!(concessive_limit(date(2023, 6, 15), 11), Some(date(2024, 5, 15)));
    }

    #[test]
    fn test_concessive_limit_clamps_to_month_end() {
        assert_eq!(concessive_limit(date(2023, 3, 31), 11), Some(date(2024, 2, 29)));
    }
}
