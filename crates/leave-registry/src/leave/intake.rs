use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Employee, EmployeeId, LeaveSubmission, RequestedDates};
use super::policy::LeaveCategory;

/// Hard failures detected before any policy rule runs: the submission is
/// internally inconsistent or references data that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DataInconsistency {
    #[error("employee {0} is not on the roster")]
    UnknownEmployee(EmployeeId),
    #[error("date range starts {start} but ends {end}")]
    ReversedRange { start: NaiveDate, end: NaiveDate },
    #[error("no concrete dates were supplied")]
    EmptyDates,
    #[error("date {0} was supplied more than once")]
    DuplicateDate(NaiveDate),
    #[error("{declared} day(s) declared but {found} concrete date(s) supplied")]
    DayCountMismatch { declared: u32, found: u32 },
}

/// A submission whose concrete dates reconcile with its declared day count
/// and whose employee exists on the roster. Policy validation operates on
/// this, never on the raw submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub employee: Employee,
    pub category: LeaveCategory,
    pub day_count: u32,
    /// Sorted, duplicate-free concrete dates.
    pub dates: Vec<NaiveDate>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub approved_by: String,
    pub recorded_by: String,
}

/// Expands the declared dates, checks their cardinality against the declared
/// day count, and resolves the employee. Runs before, and independently of,
/// the policy checks.
pub fn reconcile(
    submission: &LeaveSubmission,
    roster: &[Employee],
) -> Result<ValidatedRequest, DataInconsistency> {
    let employee = roster
        .iter()
        .find(|employee| employee.id == submission.employee_id)
        .cloned()
        .ok_or(DataInconsistency::UnknownEmployee(submission.employee_id))?;

    let dates = expand_dates(&submission.dates)?;
    let found = dates.len() as u32;
    if found != submission.day_count {
        return Err(DataInconsistency::DayCountMismatch {
            declared: submission.day_count,
            found,
        });
    }

    let start_date = *dates.first().ok_or(DataInconsistency::EmptyDates)?;
    let end_date = *dates.last().ok_or(DataInconsistency::EmptyDates)?;

    Ok(ValidatedRequest {
        employee,
        category: submission.category,
        day_count: submission.day_count,
        dates,
        start_date,
        end_date,
        reason: submission.reason.clone(),
        approved_by: submission.approved_by.clone(),
        recorded_by: submission.recorded_by.clone(),
    })
}

fn expand_dates(dates: &RequestedDates) -> Result<Vec<NaiveDate>, DataInconsistency> {
    match dates {
        RequestedDates::Range { start, end } => {
            if start > end {
                return Err(DataInconsistency::ReversedRange {
                    start: *start,
                    end: *end,
                });
            }
            Ok(start.iter_days().take_while(|day| day <= end).collect())
        }
        RequestedDates::Explicit { dates } => {
            if dates.is_empty() {
                return Err(DataInconsistency::EmptyDates);
            }
            let mut sorted = dates.clone();
            sorted.sort_unstable();
            for window in sorted.windows(2) {
                if window[0] == window[1] {
                    return Err(DataInconsistency::DuplicateDate(window[0]));
                }
            }
            Ok(sorted)
        }
    }
}
