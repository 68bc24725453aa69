use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryEmployeeStore, InMemoryRequestStore, SystemClock};
use crate::routes::with_leave_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use leave_registry::config::AppConfig;
use leave_registry::error::AppError;
use leave_registry::leave::{LeaveService, PolicyTable, RosterImporter};
use leave_registry::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let roster = match args.roster.take() {
        Some(path) => RosterImporter::from_path(&path)?,
        None => Vec::new(),
    };
    if roster.is_empty() {
        info!("starting with an empty roster; pass --roster to load a personnel export");
    } else {
        info!(employees = roster.len(), "roster loaded");
    }

    let employees = Arc::new(InMemoryEmployeeStore::with_roster(roster));
    let requests = Arc::new(InMemoryRequestStore::default());
    let service = Arc::new(LeaveService::new(
        employees,
        requests,
        Arc::new(SystemClock),
        PolicyTable::standard(),
    ));

    let app = with_leave_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "leave registry ready");

    axum::serve(listener, app).await?;
    Ok(())
}
