use chrono::{Datelike, NaiveDate};

use crate::leave::domain::{EmployeeId, LeaveRequest};
use crate::leave::policy::{LeaveCategory, ANNUAL_ECONOMIC_ALLOWANCE};

/// Economic days the employee can still request this calendar year.
///
/// Rebuilt from the request log on every call. Requests bucket into a year by
/// their registration timestamp, not their start date, and the year boundary
/// is the calendar year of `today` (never a rolling 365-day window).
///
/// The result can be negative when historical rows overdraw the allowance;
/// callers must surface that state rather than rely on it being clamped here.
pub fn available_balance(
    employee_id: EmployeeId,
    requests: &[LeaveRequest],
    today: NaiveDate,
) -> i64 {
    let used: i64 = requests
        .iter()
        .filter(|request| {
            request.employee_id == employee_id
                && request.category == LeaveCategory::Economic
                && request.registered_at.date().year() == today.year()
        })
        .map(|request| i64::from(request.day_count))
        .sum();

    ANNUAL_ECONOMIC_ALLOWANCE - used
}
