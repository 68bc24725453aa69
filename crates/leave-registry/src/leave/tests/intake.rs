use super::common::*;
use crate::leave::domain::{EmployeeId, RequestedDates};
use crate::leave::intake::{reconcile, DataInconsistency};
use crate::leave::policy::LeaveCategory;

#[test]
fn range_expands_to_inclusive_dates() {
    let submission = economic_submission(1, 3, date(2025, 3, 10));

    let validated = reconcile(&submission, &roster()).expect("range reconciles");

    assert_eq!(
        validated.dates,
        vec![date(2025, 3, 10), date(2025, 3, 11), date(2025, 3, 12)]
    );
    assert_eq!(validated.start_date, date(2025, 3, 10));
    assert_eq!(validated.end_date, date(2025, 3, 12));
    assert_eq!(validated.employee.id, EmployeeId(1));
}

#[test]
fn reversed_range_is_inconsistent() {
    let mut submission = economic_submission(1, 2, date(2025, 3, 10));
    submission.dates = RequestedDates::Range {
        start: date(2025, 3, 10),
        end: date(2025, 3, 9),
    };

    let error = reconcile(&submission, &roster()).expect_err("reversed range rejected");

    assert_eq!(
        error,
        DataInconsistency::ReversedRange {
            start: date(2025, 3, 10),
            end: date(2025, 3, 9),
        }
    );
}

#[test]
fn explicit_dates_are_sorted_before_deriving_bounds() {
    let mut submission = submission_for(LeaveCategory::Economic, 1, 3, date(2025, 1, 5));
    submission.dates = RequestedDates::Explicit {
        dates: vec![date(2025, 1, 20), date(2025, 1, 5), date(2025, 1, 10)],
    };

    let validated = reconcile(&submission, &roster()).expect("explicit dates reconcile");

    assert_eq!(validated.start_date, date(2025, 1, 5));
    assert_eq!(validated.end_date, date(2025, 1, 20));
    assert_eq!(
        validated.dates,
        vec![date(2025, 1, 5), date(2025, 1, 10), date(2025, 1, 20)]
    );
}

#[test]
fn duplicate_explicit_date_is_inconsistent() {
    let mut submission = economic_submission(1, 2, date(2025, 1, 5));
    submission.dates = RequestedDates::Explicit {
        dates: vec![date(2025, 1, 5), date(2025, 1, 5)],
    };

    let error = reconcile(&submission, &roster()).expect_err("duplicate rejected");

    assert_eq!(error, DataInconsistency::DuplicateDate(date(2025, 1, 5)));
}

#[test]
fn empty_explicit_list_is_inconsistent() {
    let mut submission = economic_submission(1, 1, date(2025, 1, 5));
    submission.dates = RequestedDates::Explicit { dates: Vec::new() };

    let error = reconcile(&submission, &roster()).expect_err("empty list rejected");

    assert_eq!(error, DataInconsistency::EmptyDates);
}

#[test]
fn day_count_mismatch_reports_both_numbers() {
    let mut submission = economic_submission(1, 3, date(2025, 1, 5));
    submission.dates = RequestedDates::Explicit {
        dates: vec![date(2025, 1, 5), date(2025, 1, 8)],
    };

    let error = reconcile(&submission, &roster()).expect_err("mismatch rejected");

    assert_eq!(
        error,
        DataInconsistency::DayCountMismatch {
            declared: 3,
            found: 2,
        }
    );
    assert!(error.to_string().contains('3'));
    assert!(error.to_string().contains('2'));
}

#[test]
fn unknown_employee_is_inconsistent() {
    let submission = economic_submission(99, 1, date(2025, 1, 5));

    let error = reconcile(&submission, &roster()).expect_err("unknown employee rejected");

    assert_eq!(error, DataInconsistency::UnknownEmployee(EmployeeId(99)));
}
