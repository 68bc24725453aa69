use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::Args;
use leave_registry::error::AppError;
use leave_registry::leave::{
    roster_overview, Clock, Employee, EmployeeId, LeaveCategory, LeaveService, LeaveSubmission,
    PolicyTable, RequestedDates, RosterImporter, RosterOverview, SubmissionError,
    SubmissionReceipt,
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::infra::{InMemoryEmployeeStore, InMemoryRequestStore};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the evaluation date (YYYY-MM-DD; defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Personnel roster CSV export
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Override the evaluation date (YYYY-MM-DD; defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

struct DemoClock {
    now: NaiveDateTime,
}

impl Clock for DemoClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let employees = RosterImporter::from_path(&args.roster)?;

    // An offline report has no request log to draw on, so every balance shows
    // the full annual allowance.
    let overview = roster_overview(&employees, &[], today);
    render_overview(&overview);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let now = today.and_time(NaiveTime::MIN);

    let roster = demo_roster();
    let service = LeaveService::new(
        Arc::new(InMemoryEmployeeStore::with_roster(roster)),
        Arc::new(InMemoryRequestStore::default()),
        Arc::new(DemoClock { now }),
        PolicyTable::standard(),
    );

    println!("Leave registry walkthrough ({today})");
    println!();

    render_outcome(
        "economic, 3 days",
        service.submit(submission(
            LeaveCategory::Economic,
            1,
            3,
            today + Duration::days(7),
        )),
    );
    render_outcome(
        "economic again, inside the 30-day interval",
        service.submit(submission(
            LeaveCategory::Economic,
            1,
            2,
            today + Duration::days(14),
        )),
    );
    render_outcome(
        "marriage, 12 days (over the per-request cap)",
        service.submit(submission(
            LeaveCategory::Marriage,
            2,
            12,
            today + Duration::days(30),
        )),
    );
    render_outcome(
        "marriage, 10 days",
        service.submit(submission(
            LeaveCategory::Marriage,
            2,
            10,
            today + Duration::days(30),
        )),
    );
    render_outcome(
        "marriage a second time",
        service.submit(submission(
            LeaveCategory::Marriage,
            2,
            10,
            today + Duration::days(400),
        )),
    );

    let mut mismatched = submission(LeaveCategory::Economic, 3, 3, today + Duration::days(7));
    mismatched.dates = RequestedDates::Explicit {
        dates: vec![today + Duration::days(7), today + Duration::days(9)],
    };
    render_outcome("economic with a short date list", service.submit(mismatched));

    println!();
    match service.overview() {
        Ok(overview) => render_overview(&overview),
        Err(err) => println!("overview unavailable: {err}"),
    }

    Ok(())
}

fn submission(
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
        reason: "walkthrough".to_string(),
        approved_by: "Department Head".to_string(),
        recorded_by: "demo".to_string(),
    }
}

fn render_outcome(label: &str, result: Result<SubmissionReceipt, SubmissionError>) {
    match result {
        Ok(receipt) => {
            println!(
                "- {label}: recorded as folio {} ({} day(s), {} economic day(s) remaining)",
                receipt.request.id, receipt.request.day_count, receipt.remaining_balance
            );
            for advisory in &receipt.advisories {
                println!("    note: {}", advisory.summary());
            }
        }
        Err(SubmissionError::Rejected(violations)) => {
            println!("- {label}: rejected");
            for violation in violations {
                println!("    - {violation}");
            }
        }
        Err(err) => println!("- {label}: {err}"),
    }
}

fn render_overview(overview: &RosterOverview) {
    println!("Roster ({} employees)", overview.totals.employees);
    for entry in &overview.employees {
        println!(
            "- {} | {} | {} | {}/{} day(s) available | {} request(s)",
            entry.rfc,
            entry.full_name,
            entry.position,
            entry.available_days,
            entry.allowance,
            entry.request_count
        );
    }

    if overview.alerts.is_empty() {
        println!("No balance alerts.");
    } else {
        println!("Balance alerts:");
        for alert in &overview.alerts {
            println!("- {}", alert.message());
        }
    }

    println!(
        "Totals: {} available day(s) across the roster | {} employee(s) at one day or fewer | {} day(s) recorded this year",
        overview.totals.available_days, overview.totals.critical, overview.totals.days_requested_this_year
    );
}

fn demo_roster() -> Vec<Employee> {
    vec![
        demo_employee(1, "GOCL800101QX1", "GOMEZ", "CARRILLO", "LAURA", "ANALISTA"),
        demo_employee(
            2,
            "PEHJ750505AB2",
            "PEREZ",
            "HERNANDEZ",
            "JORGE",
            "JEFE DE OFICINA",
        ),
        demo_employee(
            3,
            "RAMA900214CD3",
            "RAMIREZ",
            "MACIAS",
            "ANA",
            "AUXILIAR ADMINISTRATIVO",
        ),
    ]
}

fn demo_employee(
    id: u64,
    rfc: &str,
    paternal: &str,
    maternal: &str,
    given: &str,
    position: &str,
) -> Employee {
    Employee {
        id: EmployeeId(id),
        rfc: rfc.to_string(),
        curp: None,
        paternal_surname: paternal.to_string(),
        maternal_surname: maternal.to_string(),
        given_names: given.to_string(),
        position: position.to_string(),
        payroll_slot: None,
        contract: Some("BASE".to_string()),
        work_center_code: None,
        work_center: Some("DIRECCION DE FORMACION CONTINUA".to_string()),
    }
}
