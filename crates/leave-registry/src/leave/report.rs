use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{Employee, EmployeeId, LeaveRequest};
use super::eligibility::available_balance;
use super::policy::ANNUAL_ECONOMIC_ALLOWANCE;

/// Urgency tiers for the low-balance alert feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Exhausted,
    Critical,
    Low,
}

/// One roster entry whose economic balance deserves attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceAlert {
    pub employee_id: EmployeeId,
    pub full_name: String,
    pub balance: i64,
    pub severity: AlertSeverity,
}

impl BalanceAlert {
    pub fn message(&self) -> String {
        match self.severity {
            AlertSeverity::Exhausted => {
                format!("{} has no economic days available", self.full_name)
            }
            AlertSeverity::Critical => {
                format!("{} has only 1 economic day available", self.full_name)
            }
            AlertSeverity::Low => format!(
                "{} has {} economic days available",
                self.full_name, self.balance
            ),
        }
    }
}

/// Per-employee line of the roster overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeBalanceView {
    pub employee_id: EmployeeId,
    pub rfc: String,
    pub full_name: String,
    pub position: String,
    pub available_days: i64,
    pub allowance: i64,
    pub request_count: usize,
}

/// Aggregates for the statistics panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterTotals {
    pub employees: usize,
    /// Employees down to one economic day or fewer.
    pub critical: usize,
    pub available_days: i64,
    /// Leave days of any category recorded in the current calendar year.
    pub days_requested_this_year: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterOverview {
    pub employees: Vec<EmployeeBalanceView>,
    pub totals: RosterTotals,
    pub alerts: Vec<BalanceAlert>,
}

/// Builds the overview purely from the roster and the request log; balances
/// are derived on the spot, never read from a stored column.
pub fn roster_overview(
    employees: &[Employee],
    requests: &[LeaveRequest],
    today: NaiveDate,
) -> RosterOverview {
    let mut views = Vec::with_capacity(employees.len());
    let mut alerts = Vec::new();
    let mut critical = 0;
    let mut available_total = 0;

    for employee in employees {
        let balance = available_balance(employee.id, requests, today);
        let request_count = requests
            .iter()
            .filter(|row| row.employee_id == employee.id)
            .count();

        if balance <= 1 {
            critical += 1;
        }
        available_total += balance;

        if let Some(severity) = severity_for(balance) {
            alerts.push(BalanceAlert {
                employee_id: employee.id,
                full_name: employee.full_name(),
                balance,
                severity,
            });
        }

        views.push(EmployeeBalanceView {
            employee_id: employee.id,
            rfc: employee.rfc.clone(),
            full_name: employee.full_name(),
            position: employee.position.clone(),
            available_days: balance,
            allowance: ANNUAL_ECONOMIC_ALLOWANCE,
            request_count,
        });
    }

    let days_requested_this_year = requests
        .iter()
        .filter(|row| row.registered_at.date().year() == today.year())
        .map(|row| i64::from(row.day_count))
        .sum();

    RosterOverview {
        employees: views,
        totals: RosterTotals {
            employees: employees.len(),
            critical,
            available_days: available_total,
            days_requested_this_year,
        },
        alerts,
    }
}

fn severity_for(balance: i64) -> Option<AlertSeverity> {
    match balance {
        balance if balance <= 0 => Some(AlertSeverity::Exhausted),
        1 => Some(AlertSeverity::Critical),
        2 | 3 => Some(AlertSeverity::Low),
        _ => None,
    }
}
