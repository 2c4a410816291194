use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{FilterState, ScheduleEntryId, ScheduleUpdate};
use super::repository::{ClientRepository, ScheduleRepository};
use super::service::{SchedulingError, SchedulingService};
use crate::workflows::eligibility::reference::ReferenceSource;
use crate::workflows::priority::domain::ClientId;
use crate::workflows::priority::housekeeping::ClientFlagRepository;
use crate::workflows::priority::ranker::QueueSortMode;

/// Router builder exposing the queue, eligibility, and board endpoints.
pub fn scheduling_router<C, S, R>(service: Arc<SchedulingService<C, S, R>>) -> Router
where
    C: ClientRepository + ClientFlagRepository + 'static,
    S: ScheduleRepository + 'static,
    R: ReferenceSource + 'static,
{
    Router::new()
        .route("/api/v1/queue", post(queue_handler::<C, S, R>))
        .route(
            "/api/v1/clients/:client_id/evaluators",
            get(evaluators_handler::<C, S, R>),
        )
        .route("/api/v1/schedule", post(create_entry_handler::<C, S, R>))
        .route("/api/v1/schedule/board", post(board_handler::<C, S, R>))
        .route(
            "/api/v1/schedule/:entry_id",
            patch(update_entry_handler::<C, S, R>),
        )
        .route(
            "/api/v1/schedule/:entry_id/archive",
            post(archive_handler::<C, S, R>),
        )
        .route(
            "/api/v1/schedule/:entry_id/unarchive",
            post(unarchive_handler::<C, S, R>),
        )
        .route(
            "/api/v1/maintenance/babynet-age-out",
            post(sweep_handler::<C, S, R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QueueRequest {
    #[serde(default)]
    sort: Option<QueueSortMode>,
    #[serde(default)]
    now: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BoardRequest {
    #[serde(default)]
    now: Option<NaiveDate>,
    #[serde(default)]
    filters: Option<FilterState>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateEntryRequest {
    client_id: i64,
    #[serde(flatten)]
    fields: ScheduleUpdate,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SweepRequest {
    #[serde(default)]
    now: Option<NaiveDate>,
}

fn today_or(now: Option<NaiveDate>) -> NaiveDate {
    now.unwrap_or_else(|| Local::now().date_naive())
}

fn error_response(error: SchedulingError) -> Response {
    let status = match &error {
        SchedulingError::ClientNotFound(_) | SchedulingError::EntryNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        SchedulingError::Repository(_)
        | SchedulingError::Reference(_)
        | SchedulingError::Housekeeping(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn queue_handler<C, S, R>(
    State(service): State<Arc<SchedulingService<C, S, R>>>,
    axum::Json(request): axum::Json<QueueRequest>,
) -> Response
where
    C: ClientRepository + ClientFlagRepository + 'static,
    S: ScheduleRepository + 'static,
    R: ReferenceSource + 'static,
{
    let now = today_or(request.now);
    let mode = request.sort.unwrap_or_default();
    match service.ranked_queue(now, mode) {
        Ok(clients) => {
            let payload = json!({ "now": now, "sort": mode, "clients": clients });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluators_handler<C, S, R>(
    State(service): State<Arc<SchedulingService<C, S, R>>>,
    Path(client_id): Path<i64>,
) -> Response
where
    C: ClientRepository + ClientFlagRepository + 'static,
    S: ScheduleRepository + 'static,
    R: ReferenceSource + 'static,
{
    match service.evaluators_for(ClientId(client_id)) {
        Ok(split) => (StatusCode::OK, axum::Json(split)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn board_handler<C, S, R>(
    State(service): State<Arc<SchedulingService<C, S, R>>>,
    axum::Json(request): axum::Json<BoardRequest>,
) -> Response
where
    C: ClientRepository + ClientFlagRepository + 'static,
    S: ScheduleRepository + 'static,
    R: ReferenceSource + 'static,
{
    let now = today_or(request.now);
    let filters = request.filters.unwrap_or_default();
    match service.board(now, &filters) {
        Ok(board) => (StatusCode::OK, axum::Json(board)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_entry_handler<C, S, R>(
    State(service): State<Arc<SchedulingService<C, S, R>>>,
    axum::Json(request): axum::Json<CreateEntryRequest>,
) -> Response
where
    C: ClientRepository + ClientFlagRepository + 'static,
    S: ScheduleRepository + 'static,
    R: ReferenceSource + 'static,
{
    match service.add_entry(ClientId(request.client_id), request.fields) {
        Ok(entry) => (StatusCode::CREATED, axum::Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_entry_handler<C, S, R>(
    State(service): State<Arc<SchedulingService<C, S, R>>>,
    Path(entry_id): Path<u64>,
    axum::Json(update): axum::Json<ScheduleUpdate>,
) -> Response
where
    C: ClientRepository + ClientFlagRepository + 'static,
    S: ScheduleRepository + 'static,
    R: ReferenceSource + 'static,
{
    match service.update_entry(ScheduleEntryId(entry_id), update) {
        Ok(entry) => (StatusCode::OK, axum::Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn archive_handler<C, S, R>(
    State(service): State<Arc<SchedulingService<C, S, R>>>,
    Path(entry_id): Path<u64>,
) -> Response
where
    C: ClientRepository + ClientFlagRepository + 'static,
    S: ScheduleRepository + 'static,
    R: ReferenceSource + 'static,
{
    match service.set_archived(ScheduleEntryId(entry_id), true) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn unarchive_handler<C, S, R>(
    State(service): State<Arc<SchedulingService<C, S, R>>>,
    Path(entry_id): Path<u64>,
) -> Response
where
    C: ClientRepository + ClientFlagRepository + 'static,
    S: ScheduleRepository + 'static,
    R: ReferenceSource + 'static,
{
    match service.set_archived(ScheduleEntryId(entry_id), false) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn sweep_handler<C, S, R>(
    State(service): State<Arc<SchedulingService<C, S, R>>>,
    axum::Json(request): axum::Json<SweepRequest>,
) -> Response
where
    C: ClientRepository + ClientFlagRepository + 'static,
    S: ScheduleRepository + 'static,
    R: ReferenceSource + 'static,
{
    match service.run_babynet_sweep(today_or(request.now)) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}
