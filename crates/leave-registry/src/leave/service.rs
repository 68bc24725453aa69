use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::domain::{Employee, EmployeeId, LeaveRequest, LeaveSubmission, RequestId};
use super::eligibility::{
    available_balance, Advisory, EligibilityEngine, EligibilityOutcome, PolicyViolation,
};
use super::intake::{self, DataInconsistency};
use super::policy::{LeaveCategory, PolicyTable};
use super::report::{self, RosterOverview};
use super::repository::{Clock, EmployeeStore, RequestStore, StoreError};

/// Facade composing the stores, the clock, and the eligibility engine.
///
/// Reads go through a snapshot cache that is explicitly dropped after every
/// append, so the next read rebuilds from the stores. The stores expose no
/// transactions: two recorders racing a submit can still double-book an
/// occurrence slot, and deployments with more than one recorder need a
/// single-writer queue in front of this service.
pub struct LeaveService<E, R, C> {
    employees: Arc<E>,
    requests: Arc<R>,
    clock: Arc<C>,
    engine: EligibilityEngine,
    snapshot: Mutex<Option<Snapshot>>,
}

#[derive(Clone)]
struct Snapshot {
    employees: Vec<Employee>,
    requests: Vec<LeaveRequest>,
}

/// Confirmation returned to the recorder after a successful append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub request: LeaveRequest,
    pub remaining_balance: i64,
    pub advisories: Vec<Advisory>,
}

/// Error raised by the service facade.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Inconsistent(#[from] DataInconsistency),
    #[error("request rejected: {}", .0.iter().map(|violation| violation.to_string()).collect::<Vec<_>>().join("; "))]
    Rejected(Vec<PolicyViolation>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl<E, R, C> LeaveService<E, R, C>
where
    E: EmployeeStore + 'static,
    R: RequestStore + 'static,
    C: Clock + 'static,
{
    pub fn new(employees: Arc<E>, requests: Arc<R>, clock: Arc<C>, table: PolicyTable) -> Self {
        Self {
            employees,
            requests,
            clock,
            engine: EligibilityEngine::new(table),
            snapshot: Mutex::new(None),
        }
    }

    pub fn policy_table(&self) -> &PolicyTable {
        self.engine.table()
    }

    /// Validate and, if admissible, record the request.
    ///
    /// Nothing is written when any check fails, and a store failure aborts
    /// with no partial state. On success the cached snapshot is invalidated
    /// so the next read sees the appended row.
    pub fn submit(
        &self,
        submission: LeaveSubmission,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let snapshot = self.load_snapshot()?;
        let validated = intake::reconcile(&submission, &snapshot.employees)?;
        let today = self.clock.today();
        let outcome = self.engine.validate(&validated, &snapshot.requests, today);
        if !outcome.is_admissible() {
            return Err(SubmissionError::Rejected(outcome.violations));
        }

        let balance_before = available_balance(validated.employee.id, &snapshot.requests, today);
        let record = LeaveRequest {
            id: next_request_id(&snapshot.requests),
            employee_id: validated.employee.id,
            category: validated.category,
            start_date: validated.start_date,
            end_date: validated.end_date,
            day_count: validated.day_count,
            reason: validated.reason,
            registered_at: self.clock.now(),
            approved_by: validated.approved_by,
            recorded_by: validated.recorded_by,
        };

        self.requests.append_request(record.clone())?;
        self.invalidate();

        let remaining_balance = if record.category == LeaveCategory::Economic {
            balance_before - i64::from(record.day_count)
        } else {
            balance_before
        };

        Ok(SubmissionReceipt {
            request: record,
            remaining_balance,
            advisories: outcome.advisories,
        })
    }

    /// Dry run: the full check battery with no persistence.
    pub fn evaluate(
        &self,
        submission: &LeaveSubmission,
    ) -> Result<EligibilityOutcome, SubmissionError> {
        let snapshot = self.load_snapshot()?;
        let validated = intake::reconcile(submission, &snapshot.employees)?;
        Ok(self
            .engine
            .validate(&validated, &snapshot.requests, self.clock.today()))
    }

    /// Derived economic balance for one employee.
    pub fn balance(&self, employee_id: EmployeeId) -> Result<i64, SubmissionError> {
        let snapshot = self.load_snapshot()?;
        if !snapshot
            .employees
            .iter()
            .any(|employee| employee.id == employee_id)
        {
            return Err(SubmissionError::Inconsistent(
                DataInconsistency::UnknownEmployee(employee_id),
            ));
        }
        Ok(available_balance(
            employee_id,
            &snapshot.requests,
            self.clock.today(),
        ))
    }

    /// Roster overview with derived balances, aggregates, and alerts.
    pub fn overview(&self) -> Result<RosterOverview, SubmissionError> {
        let snapshot = self.load_snapshot()?;
        Ok(report::roster_overview(
            &snapshot.employees,
            &snapshot.requests,
            self.clock.today(),
        ))
    }

    /// Drops the cached snapshot; the next read loads both stores again.
    pub fn invalidate(&self) {
        let mut cached = self.snapshot.lock().expect("snapshot mutex poisoned");
        *cached = None;
    }

    fn load_snapshot(&self) -> Result<Snapshot, StoreError> {
        let mut cached = self.snapshot.lock().expect("snapshot mutex poisoned");
        if let Some(snapshot) = cached.as_ref() {
            return Ok(snapshot.clone());
        }

        let snapshot = Snapshot {
            employees: self.employees.list_employees()?,
            requests: self.requests.list_requests()?,
        };
        *cached = Some(snapshot.clone());
        Ok(snapshot)
    }
}

/// Next id in the log: the maximum recorded id plus one, so ids stay unique
/// even if earlier rows were compacted away.
fn next_request_id(requests: &[LeaveRequest]) -> RequestId {
    RequestId(
        requests
            .iter()
            .map(|request| request.id.0)
            .max()
            .unwrap_or(0)
            + 1,
    )
}
