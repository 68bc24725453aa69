use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::leave::domain::{
    Employee, EmployeeId, LeaveRequest, LeaveSubmission, RequestId, RequestedDates,
};
use crate::leave::eligibility::EligibilityEngine;
use crate::leave::intake::{reconcile, ValidatedRequest};
use crate::leave::policy::{LeaveCategory, PolicyTable};
use crate::leave::repository::{Clock, EmployeeStore, RequestStore, StoreError};
use crate::leave::router::leave_router;
use crate::leave::service::LeaveService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(10, 30, 0)
        .expect("valid time")
}

pub(super) fn employee(id: u64, rfc: &str) -> Employee {
    Employee {
        id: EmployeeId(id),
        rfc: rfc.to_string(),
        curp: Some("GOMC800101HJCNRL09".to_string()),
        paternal_surname: "GOMEZ".to_string(),
        maternal_surname: "CARRILLO".to_string(),
        given_names: "LAURA".to_string(),
        position: "ANALISTA".to_string(),
        payroll_slot: Some("0701".to_string()),
        contract: Some("BASE".to_string()),
        work_center_code: None,
        work_center: Some("DIRECCION DE FORMACION CONTINUA".to_string()),
    }
}

pub(super) fn roster() -> Vec<Employee> {
    vec![employee(1, "GOCL800101QX1"), employee(2, "PEHJ750505AB2")]
}

pub(super) fn recorded_request(
    category: LeaveCategory,
    id: u64,
    employee_id: u64,
    day_count: u32,
    registered_at: NaiveDateTime,
    start: NaiveDate,
    end: NaiveDate,
) -> LeaveRequest {
    LeaveRequest {
        id: RequestId(id),
        employee_id: EmployeeId(employee_id),
        category,
        start_date: start,
        end_date: end,
        day_count,
        reason: "personal errand".to_string(),
        registered_at,
        approved_by: "Department Head".to_string(),
        recorded_by: "front desk".to_string(),
    }
}

pub(super) fn economic_request(
    id: u64,
    employee_id: u64,
    day_count: u32,
    registered_at: NaiveDateTime,
    start: NaiveDate,
    end: NaiveDate,
) -> LeaveRequest {
    recorded_request(
        LeaveCategory::Economic,
        id,
        employee_id,
        day_count,
        registered_at,
        start,
        end,
    )
}

pub(super) fn submission_for(
    category: LeaveCategory,
    employee_id: u64,
    day_count: u32,
    start: NaiveDate,
) -> LeaveSubmission {
    LeaveSubmission {
        employee_id: EmployeeId(employee_id),
        category,
        day_count,
        dates: RequestedDates::Range {
            start,
            end: start + Duration::days(i64::from(day_count) - 1),
        },
        reason: "personal errand".to_string(),
        approved_by: "Department Head".to_string(),
        recorded_by: "front desk".to_string(),
    }
}

pub(super) fn economic_submission(
    employee_id: u64,
    day_count: u32,
    start: NaiveDate,
) -> LeaveSubmission {
    submission_for(LeaveCategory::Economic, employee_id, day_count, start)
}

pub(super) fn validated(submission: &LeaveSubmission) -> ValidatedRequest {
    reconcile(submission, &roster()).expect("submission reconciles")
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(PolicyTable::standard())
}

pub(super) struct FixedClock(pub(super) NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[derive(Clone)]
pub(super) struct MemoryEmployeeStore {
    employees: Vec<Employee>,
}

impl MemoryEmployeeStore {
    pub(super) fn with(employees: Vec<Employee>) -> Self {
        Self { employees }
    }
}

impl EmployeeStore for MemoryEmployeeStore {
    fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.employees.clone())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRequestStore {
    rows: Arc<Mutex<Vec<LeaveRequest>>>,
}

impl MemoryRequestStore {
    pub(super) fn with(rows: Vec<LeaveRequest>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    pub(super) fn rows(&self) -> Vec<LeaveRequest> {
        self.rows.lock().expect("request mutex poisoned").clone()
    }
}

impl RequestStore for MemoryRequestStore {
    fn list_requests(&self) -> Result<Vec<LeaveRequest>, StoreError> {
        Ok(self.rows())
    }

    fn append_request(&self, request: LeaveRequest) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().expect("request mutex poisoned");
        if rows.iter().any(|row| row.id == request.id) {
            return Err(StoreError::Conflict);
        }
        rows.push(request);
        Ok(())
    }
}

pub(super) struct UnavailableRequestStore;

impl RequestStore for UnavailableRequestStore {
    fn list_requests(&self) -> Result<Vec<LeaveRequest>, StoreError> {
        Err(StoreError::Unavailable("spreadsheet offline".to_string()))
    }

    fn append_request(&self, _request: LeaveRequest) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("spreadsheet offline".to_string()))
    }
}

pub(super) type TestService = LeaveService<MemoryEmployeeStore, MemoryRequestStore, FixedClock>;

pub(super) fn build_service(
    employees: Vec<Employee>,
    rows: Vec<LeaveRequest>,
    now: NaiveDateTime,
) -> (Arc<TestService>, MemoryRequestStore) {
    let store = MemoryRequestStore::with(rows);
    let service = LeaveService::new(
        Arc::new(MemoryEmployeeStore::with(employees)),
        Arc::new(store.clone()),
        Arc::new(FixedClock(now)),
        PolicyTable::standard(),
    );
    (Arc::new(service), store)
}

pub(super) fn test_router(service: Arc<TestService>) -> axum::Router {
    leave_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
