use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use clinic_ops::config::AppConfig;
use clinic_ops::error::AppError;
use clinic_ops::telemetry;
use clinic_ops::workflows::eligibility::reference::{ReferenceCache, StaticReferenceSource};
use clinic_ops::workflows::priority::ranker::{QueueSortMode, RankedClient};
use clinic_ops::workflows::punchlist::PunchListImporter;
use clinic_ops::workflows::scheduling::domain::FilterState;
use clinic_ops::workflows::scheduling::repository::InMemoryClinicStore;
use clinic_ops::workflows::scheduling::{
    scheduling_router, ScheduleBoard, SchedulingError, SchedulingService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod demo;

type DemoService =
    SchedulingService<InMemoryClinicStore, InMemoryClinicStore, StaticReferenceSource>;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Clinic Operations Service",
    about = "Run the clinic intake queue and scheduling board from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect the intake queue over the demo dataset
    Queue {
        #[command(subcommand)]
        command: QueueCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum QueueCommand {
    /// Print the ranked queue and the scheduling board
    Report(QueueReportArgs),
}

#[derive(Args, Debug)]
struct QueueReportArgs {
    /// Evaluation date for the report (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    now: Option<NaiveDate>,
    /// Queue order: priority, first-name, last-name, or pa-expiration
    #[arg(long, value_parser = parse_sort_mode)]
    sort: Option<QueueSortMode>,
    /// Optional punch-list CSV export to fold into the schedule first
    #[arg(long)]
    punch_list: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Queue {
            command: QueueCommand::Report(args),
        } => run_queue_report(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_sort_mode(raw: &str) -> Result<QueueSortMode, String> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "priority" => Ok(QueueSortMode::Priority),
        "first_name" => Ok(QueueSortMode::FirstName),
        "last_name" => Ok(QueueSortMode::LastName),
        "pa_expiration" => Ok(QueueSortMode::PaExpiration),
        other => Err(format!(
            "unknown sort mode '{other}' (expected priority, first-name, last-name, or pa-expiration)"
        )),
    }
}

fn sort_label(mode: QueueSortMode) -> &'static str {
    match mode {
        QueueSortMode::Priority => "priority",
        QueueSortMode::FirstName => "first name",
        QueueSortMode::LastName => "last name",
        QueueSortMode::PaExpiration => "PA expiration",
    }
}

fn demo_service(store: Arc<InMemoryClinicStore>, ttl: Duration) -> Arc<DemoService> {
    let reference = ReferenceCache::new(
        Arc::new(StaticReferenceSource::new(demo::reference_snapshot())),
        ttl,
    );
    Arc::new(SchedulingService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        reference,
    ))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let store = demo::seed_store(Local::now().date_naive()).map_err(SchedulingError::from)?;
    let service = demo_service(store, config.reference.ttl);

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(scheduling_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "clinic operations service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_queue_report(args: QueueReportArgs) -> Result<(), AppError> {
    let QueueReportArgs {
        now,
        sort,
        punch_list,
    } = args;

    let now = now.unwrap_or_else(|| Local::now().date_naive());
    let sort = sort.unwrap_or_default();

    let store = demo::seed_store(now).map_err(SchedulingError::from)?;

    if let Some(path) = punch_list {
        let summary = PunchListImporter::from_path(path, store.as_ref(), store.as_ref())?;
        println!("Punch list import: {} row(s) applied", summary.applied);
        for name in &summary.unmatched {
            println!("- unmatched: {name}");
        }
        println!();
    }

    let service = demo_service(store, Duration::from_secs(600));
    let queue = service.ranked_queue(now, sort)?;
    let board = service.board(now, &FilterState::default())?;
    render_queue_report(now, sort, &queue, &board);

    Ok(())
}

fn render_queue_report(
    now: NaiveDate,
    sort: QueueSortMode,
    queue: &[RankedClient],
    board: &ScheduleBoard,
) {
    println!(
        "Intake queue ({} order, evaluated {})",
        sort_label(sort),
        now
    );
    for ranked in queue {
        println!(
            "- [tier {}] {}: {}",
            ranked.tier,
            ranked.client.full_name(),
            ranked.sort_reason
        );
    }

    println!("\nScheduling board");
    if board.rows.is_empty() {
        println!("- no active entries");
    }
    for row in &board.rows {
        println!(
            "- #{} {} | {} | {} {} | {} | {} | PA {}",
            row.entry_id,
            row.name,
            row.evaluator,
            row.date,
            row.time,
            row.location,
            row.insurance,
            row.pa_expiration
        );
    }

    println!("\nFilter options");
    for facets in &board.facets {
        let options = facets
            .options
            .iter()
            .map(|option| {
                let label = if option.value.is_empty() {
                    "(blank)"
                } else {
                    option.value.as_str()
                };
                format!("{} ({})", label, option.count)
            })
            .collect::<Vec<_>>()
            .join(", ");
        println!("- {}: {}", facets.column.key(), options);
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_modes_parse_both_spellings() {
        assert_eq!(
            parse_sort_mode("pa-expiration").expect("dashed spelling parses"),
            QueueSortMode::PaExpiration
        );
        assert_eq!(
            parse_sort_mode("first_name").expect("underscore spelling parses"),
            QueueSortMode::FirstName
        );
        assert!(parse_sort_mode("newest").is_err());
    }

    #[test]
    fn demo_report_covers_every_tier() {
        let now = NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date");
        let store = demo::seed_store(now).expect("demo seeds cleanly");
        let service = demo_service(store, Duration::from_secs(600));

        let queue = service
            .ranked_queue(now, QueueSortMode::Priority)
            .expect("queue ranks");
        let tiers: Vec<u8> = queue.iter().map(|ranked| ranked.tier).collect();
        let mut sorted = tiers.clone();
        sorted.sort_unstable();
        assert_eq!(tiers, sorted);
        assert!(tiers.contains(&0));
        assert!(tiers.contains(&3));

        let board = service
            .board(now, &FilterState::default())
            .expect("board derives");
        assert_eq!(board.rows.len(), 2);
    }
}
