use chrono::{NaiveDate, NaiveDateTime};

use super::domain::{Employee, LeaveRequest};

/// Read side of the roster collaborator (a shared spreadsheet in production).
/// The validator needs no write interface to it.
pub trait EmployeeStore: Send + Sync {
    fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;
}

/// Request-log collaborator. Validation only reads; the service performs the
/// single append after a clean outcome.
pub trait RequestStore: Send + Sync {
    fn list_requests(&self) -> Result<Vec<LeaveRequest>, StoreError>;
    fn append_request(&self, request: LeaveRequest) -> Result<(), StoreError>;
}

/// Failure of an external store. Never retried here; the caller decides how
/// to surface it, and no partial state is applied on the way out.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
}

/// Source of "now" for year bucketing, default start dates, and registration
/// stamps. Injected so validation stays deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
