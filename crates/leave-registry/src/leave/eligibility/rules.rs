use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::leave::domain::LeaveRequest;
use crate::leave::intake::ValidatedRequest;
use crate::leave::policy::{CategoryPolicy, LeaveCategory, PolicyTable};

use super::balance::available_balance;

/// A hard rule breach. Any single violation blocks persistence; the full list
/// is reported to the recorder verbatim and never auto-retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum PolicyViolation {
    #[error("{} requests are capped at {max} day(s); {requested} requested", .category.label())]
    DayCapExceeded {
        category: LeaveCategory,
        max: u32,
        requested: u32,
    },
    #[error("only {available} economic day(s) available; {requested} requested")]
    InsufficientBalance { available: i64, requested: u32 },
    #[error("the limit of {max} economic occasions this year has been reached")]
    EconomicOccurrenceCap { max: u32 },
    #[error("{deficit} more day(s) must pass: the last economic day used was {last_end} and the minimum interval is {min} days, so the next request may start on {valid_from}")]
    IntervalTooShort {
        min: i64,
        deficit: i64,
        last_end: NaiveDate,
        valid_from: NaiveDate,
    },
    #[error("marriage leave is granted a single time")]
    MarriageAlreadyGranted,
    #[error("retirement-procedure leave is granted a single time")]
    RetirementAlreadyGranted,
    #[error("thesis-defense leave is granted at most {max} times")]
    ThesisDefenseCapReached { max: u32 },
    #[error("relocation leave is granted at most {max} times per year")]
    RelocationCapReached { max: u32 },
}

/// Non-blocking notice shown alongside an otherwise admissible request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advisory {
    LowBalance { remaining: i64 },
}

impl Advisory {
    pub fn summary(&self) -> String {
        match self {
            Advisory::LowBalance { remaining } => {
                format!("after this request {remaining} economic day(s) will remain")
            }
        }
    }
}

/// Runs every applicable check for the request. Checks are independent and
/// none short-circuits: a request can come back with several violations.
pub(crate) fn run_checks(
    request: &ValidatedRequest,
    history: &[LeaveRequest],
    table: &PolicyTable,
    today: NaiveDate,
) -> (Vec<PolicyViolation>, Vec<Advisory>) {
    let mut violations = Vec::new();
    let mut advisories = Vec::new();

    let policy = table.lookup(request.category);
    if request.day_count > policy.max_days_per_request {
        violations.push(PolicyViolation::DayCapExceeded {
            category: request.category,
            max: policy.max_days_per_request,
            requested: request.day_count,
        });
    }

    let prior: Vec<&LeaveRequest> = history
        .iter()
        .filter(|row| row.employee_id == request.employee.id && row.category == request.category)
        .collect();

    match request.category {
        LeaveCategory::Economic => economic_checks(
            request,
            history,
            &prior,
            policy,
            today,
            &mut violations,
            &mut advisories,
        ),
        LeaveCategory::Marriage => {
            if !prior.is_empty() {
                violations.push(PolicyViolation::MarriageAlreadyGranted);
            }
        }
        LeaveCategory::RetirementProcedure => {
            if !prior.is_empty() {
                violations.push(PolicyViolation::RetirementAlreadyGranted);
            }
        }
        LeaveCategory::ThesisDefense => {
            if let Some(max) = policy.max_occurrences {
                if prior.len() as u32 >= max {
                    violations.push(PolicyViolation::ThesisDefenseCapReached { max });
                }
            }
        }
        LeaveCategory::Relocation => {
            if let Some(max) = policy.max_occurrences {
                let this_year = prior
                    .iter()
                    .filter(|row| row.registered_at.date().year() == today.year())
                    .count() as u32;
                if this_year >= max {
                    violations.push(PolicyViolation::RelocationCapReached { max });
                }
            }
        }
        LeaveCategory::Bereavement => {}
    }

    (violations, advisories)
}

fn economic_checks(
    request: &ValidatedRequest,
    history: &[LeaveRequest],
    prior: &[&LeaveRequest],
    policy: &CategoryPolicy,
    today: NaiveDate,
    violations: &mut Vec<PolicyViolation>,
    advisories: &mut Vec<Advisory>,
) {
    let balance = available_balance(request.employee.id, history, today);
    let requested = i64::from(request.day_count);

    if requested > balance {
        violations.push(PolicyViolation::InsufficientBalance {
            available: balance,
            requested: request.day_count,
        });
    } else if balance - requested <= 2 {
        // Advisory only when the request is not already rejected on balance
        // grounds.
        advisories.push(Advisory::LowBalance {
            remaining: balance - requested,
        });
    }

    if let Some(max) = policy.max_occurrences {
        let this_year = prior
            .iter()
            .filter(|row| row.registered_at.date().year() == today.year())
            .count() as u32;
        if this_year >= max {
            violations.push(PolicyViolation::EconomicOccurrenceCap { max });
        }
    }

    // The most recent occurrence is the one with the latest end date, across
    // every year on record, regardless of registration order.
    if let (Some(min), Some(last_end)) = (
        policy.min_interval_days,
        prior.iter().map(|row| row.end_date).max(),
    ) {
        let gap = (request.start_date - last_end).num_days();
        if gap < min {
            violations.push(PolicyViolation::IntervalTooShort {
                min,
                deficit: min - gap,
                last_end,
                valid_from: last_end + Duration::days(min),
            });
        }
    }
}
