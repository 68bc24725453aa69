mod balance;
mod rules;

pub use balance::available_balance;
pub use rules::{Advisory, PolicyViolation};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::LeaveRequest;
use super::intake::ValidatedRequest;
use super::policy::PolicyTable;

/// Stateless validator applying the regulatory table to one request.
pub struct EligibilityEngine {
    table: PolicyTable,
}

impl EligibilityEngine {
    pub fn new(table: PolicyTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PolicyTable {
        &self.table
    }

    /// Pure function of its inputs: the clock date is passed in, nothing is
    /// read or written anywhere, and all applicable checks run so the outcome
    /// carries the complete list of breaches.
    pub fn validate(
        &self,
        request: &ValidatedRequest,
        history: &[LeaveRequest],
        today: NaiveDate,
    ) -> EligibilityOutcome {
        let (violations, advisories) = rules::run_checks(request, history, &self.table, today);
        EligibilityOutcome {
            violations,
            advisories,
        }
    }
}

/// Everything the rule battery had to say about one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub violations: Vec<PolicyViolation>,
    pub advisories: Vec<Advisory>,
}

impl EligibilityOutcome {
    pub fn is_admissible(&self) -> bool {
        self.violations.is_empty()
    }
}
