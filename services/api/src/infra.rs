use chrono::{Local, NaiveDate, NaiveDateTime};
use leave_registry::leave::{
    Clock, Employee, EmployeeStore, LeaveRequest, RequestStore, StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEmployeeStore {
    employees: Arc<Mutex<Vec<Employee>>>,
}

impl InMemoryEmployeeStore {
    pub(crate) fn with_roster(employees: Vec<Employee>) -> Self {
        Self {
            employees: Arc::new(Mutex::new(employees)),
        }
    }
}

impl EmployeeStore for InMemoryEmployeeStore {
    fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.employees.lock().expect("roster mutex poisoned").clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRequestStore {
    rows: Arc<Mutex<Vec<LeaveRequest>>>,
}

impl RequestStore for InMemoryRequestStore {
    fn list_requests(&self) -> Result<Vec<LeaveRequest>, StoreError> {
        Ok(self.rows.lock().expect("request-log mutex poisoned").clone())
    }

    fn append_request(&self, request: LeaveRequest) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().expect("request-log mutex poisoned");
        if rows.iter().any(|row| row.id == request.id) {
            return Err(StoreError::Conflict);
        }
        rows.push(request);
        Ok(())
    }
}

/// Wall-clock time in the office's local zone, matching how registration
/// timestamps are stamped in the production spreadsheet.
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
