use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::policy::LeaveCategory;

/// Fallback shown for roster columns the personnel export left blank.
const MISSING_FIELD_LABEL: &str = "N/A";

/// Identifier wrapper for roster entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for recorded leave requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One roster entry from the personnel template.
///
/// Identity fields are written once at import and never mutated. The optional
/// columns are resolved here, at load time; consumers that need display text
/// go through the `*_label` accessors, which fall back to `"N/A"`.
///
/// The template also carries a stored "days available" column. It is treated
/// as a display cache and deliberately not modeled: the balance is always
/// rebuilt from the request log (see `eligibility::available_balance`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    /// Tax identifier (RFC), unique per employee.
    pub rfc: String,
    pub curp: Option<String>,
    pub paternal_surname: String,
    pub maternal_surname: String,
    pub given_names: String,
    pub position: String,
    /// Payroll slot code (PLAZA).
    pub payroll_slot: Option<String>,
    /// Tenure kind, e.g. permanent vs interim.
    pub contract: Option<String>,
    /// Work-center code (C.C.T.).
    pub work_center_code: Option<String>,
    pub work_center: Option<String>,
}

impl Employee {
    /// Surname-first full name, as printed on the personnel template.
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.paternal_surname, self.maternal_surname, self.given_names
        )
    }

    pub fn curp_label(&self) -> &str {
        self.curp.as_deref().unwrap_or(MISSING_FIELD_LABEL)
    }

    pub fn payroll_slot_label(&self) -> &str {
        self.payroll_slot.as_deref().unwrap_or(MISSING_FIELD_LABEL)
    }

    pub fn contract_label(&self) -> &str {
        self.contract.as_deref().unwrap_or(MISSING_FIELD_LABEL)
    }

    pub fn work_center_label(&self) -> &str {
        self.work_center.as_deref().unwrap_or(MISSING_FIELD_LABEL)
    }
}

/// One approved leave occurrence. Appended to the log exactly once, at
/// approval time, and immutable thereafter; there is no edit or cancel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: RequestId,
    pub employee_id: EmployeeId,
    pub category: LeaveCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub day_count: u32,
    pub reason: String,
    /// When the request was recorded, distinct from `start_date`. This is the
    /// timestamp that buckets the request into a calendar year.
    pub registered_at: NaiveDateTime,
    pub approved_by: String,
    pub recorded_by: String,
}

/// How a caller declares the concrete days of a request: a contiguous range
/// (both ends inclusive) or an explicit list of individual dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RequestedDates {
    Range { start: NaiveDate, end: NaiveDate },
    Explicit { dates: Vec<NaiveDate> },
}

/// Inbound request payload, prior to date reconciliation and policy checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSubmission {
    pub employee_id: EmployeeId,
    pub category: LeaveCategory,
    pub day_count: u32,
    pub dates: RequestedDates,
    pub reason: String,
    pub approved_by: String,
    pub recorded_by: String,
}
