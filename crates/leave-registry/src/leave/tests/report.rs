use super::common::*;
use crate::leave::domain::EmployeeId;
use crate::leave::policy::LeaveCategory;
use crate::leave::report::{roster_overview, AlertSeverity};

#[test]
fn overview_derives_balances_and_totals_from_the_log() {
    let history = vec![
        economic_request(1, 1, 3, datetime(2025, 1, 5), date(2025, 1, 6), date(2025, 1, 8)),
        economic_request(2, 1, 3, datetime(2025, 3, 2), date(2025, 3, 3), date(2025, 3, 5)),
        economic_request(3, 1, 2, datetime(2025, 5, 2), date(2025, 5, 5), date(2025, 5, 6)),
        recorded_request(
            LeaveCategory::Marriage,
            4,
            2,
            10,
            datetime(2025, 4, 1),
            date(2025, 4, 7),
            date(2025, 4, 16),
        ),
    ];

    let overview = roster_overview(&roster(), &history, date(2025, 6, 1));

    assert_eq!(overview.totals.employees, 2);
    assert_eq!(overview.employees[0].available_days, 1);
    assert_eq!(overview.employees[0].request_count, 3);
    assert_eq!(overview.employees[1].available_days, 9);
    assert_eq!(overview.employees[1].request_count, 1);
    assert_eq!(overview.totals.available_days, 10);
    assert_eq!(overview.totals.critical, 1);
    // Marriage days count toward the recorded-days aggregate too.
    assert_eq!(overview.totals.days_requested_this_year, 18);
}

#[test]
fn alert_tiers_follow_the_remaining_balance() {
    let history = vec![
        // Employee 1 down to zero.
        economic_request(1, 1, 3, datetime(2025, 1, 5), date(2025, 1, 6), date(2025, 1, 8)),
        economic_request(2, 1, 3, datetime(2025, 3, 2), date(2025, 3, 3), date(2025, 3, 5)),
        economic_request(3, 1, 3, datetime(2025, 5, 2), date(2025, 5, 5), date(2025, 5, 7)),
        // Employee 2 down to one.
        economic_request(4, 2, 3, datetime(2025, 2, 5), date(2025, 2, 6), date(2025, 2, 8)),
        economic_request(5, 2, 3, datetime(2025, 4, 2), date(2025, 4, 3), date(2025, 4, 5)),
        economic_request(6, 2, 2, datetime(2025, 5, 20), date(2025, 5, 21), date(2025, 5, 22)),
    ];

    let overview = roster_overview(&roster(), &history, date(2025, 6, 1));

    assert_eq!(overview.alerts.len(), 2);
    assert_eq!(overview.alerts[0].severity, AlertSeverity::Exhausted);
    assert_eq!(overview.alerts[0].employee_id, EmployeeId(1));
    assert!(overview.alerts[0].message().contains("no economic days"));
    assert_eq!(overview.alerts[1].severity, AlertSeverity::Critical);
    assert!(overview.alerts[1].message().contains("only 1 economic day"));
}

#[test]
fn low_tier_alert_covers_two_and_three_days_remaining() {
    let history = vec![economic_request(
        1,
        1,
        3,
        datetime(2025, 1, 5),
        date(2025, 1, 6),
        date(2025, 1, 8),
    ),
    economic_request(
        2,
        1,
        3,
        datetime(2025, 3, 2),
        date(2025, 3, 3),
        date(2025, 3, 5),
    )];

    let overview = roster_overview(&roster(), &history, date(2025, 6, 1));

    assert_eq!(overview.alerts.len(), 1);
    assert_eq!(overview.alerts[0].severity, AlertSeverity::Low);
    assert!(overview.alerts[0].message().contains("3 economic days"));
}

#[test]
fn negative_balances_are_reported_not_clamped() {
    let history = vec![
        economic_request(1, 1, 3, datetime(2025, 1, 5), date(2025, 1, 6), date(2025, 1, 8)),
        economic_request(2, 1, 3, datetime(2025, 2, 2), date(2025, 2, 3), date(2025, 2, 5)),
        economic_request(3, 1, 3, datetime(2025, 3, 2), date(2025, 3, 3), date(2025, 3, 5)),
        economic_request(4, 1, 3, datetime(2025, 4, 2), date(2025, 4, 3), date(2025, 4, 5)),
    ];

    let overview = roster_overview(&roster(), &history, date(2025, 6, 1));

    assert_eq!(overview.employees[0].available_days, -3);
    assert_eq!(overview.alerts[0].severity, AlertSeverity::Exhausted);
    assert_eq!(overview.totals.available_days, 6);
}

#[test]
fn aggregates_ignore_requests_from_other_years() {
    let history = vec![economic_request(
        1,
        1,
        3,
        datetime(2024, 11, 5),
        date(2024, 11, 6),
        date(2024, 11, 8),
    )];

    let overview = roster_overview(&roster(), &history, date(2025, 6, 1));

    assert_eq!(overview.employees[0].available_days, 9);
    assert_eq!(overview.totals.days_requested_this_year, 0);
    // The historical row still shows in the per-employee request count.
    assert_eq!(overview.employees[0].request_count, 1);
}
