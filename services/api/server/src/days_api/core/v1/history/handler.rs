use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use request_history::{HistoryLog, MAX_RECENT, Route};

use crate::AppState;
use crate::days_api::error_recorder::ErrorRecorder;
use crate::shared::extractors::request_id::RequestId;

use super::super::errors::{Error, HandlerResult};
use super::super::record_served;
use super::super::types::RequestContext;
use super::models::{ClearResponse, HistoryEntry, HistoryQuery};

const HANDLER_NAME: &str = "history";
const DEFAULT_NUMBER: &str = "5";

/// Parse the `number` parameter: decimal digits only, between 1 and
/// [`MAX_RECENT`].
fn parse_number(raw: Option<&str>) -> Result<usize, Error> {
    let raw = raw.unwrap_or(DEFAULT_NUMBER);
    let invalid = || Error::InvalidParameter(raw.to_string());

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match raw.parse::<usize>() {
        Ok(number) if (1..=MAX_RECENT).contains(&number) => Ok(number),
        _ => Err(invalid()),
    }
}

/// Record this read, then return the newest `number` records.
pub fn process_read(
    ctx: &RequestContext<'_>,
    query: &HistoryQuery,
) -> Result<Vec<HistoryEntry>, Error> {
    let number = parse_number(query.number.as_deref())?;

    let records = ctx.history.record_then_recent(
        ctx.method.as_str(),
        Route::History,
        ctx.clock.now(),
        number,
    );

    Ok(records.into_iter().map(HistoryEntry::from).collect())
}

/// Drop every record. Clearing is not itself recorded.
pub fn process_clear(history: &HistoryLog) -> ClearResponse {
    history.clear();

    ClearResponse {
        status: "History cleared".to_string(),
    }
}

/// Most recent requests served by the API
///
/// The read itself is recorded first, so it is always the newest entry.
#[utoipa::path(
    get,
    path = "/history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Newest requests first", body = [HistoryEntry]),
        (status = 400, description = "Number out of range or not an integer"),
        (status = 405, description = "Method not allowed"),
    ),
    tag = "history",
)]
#[tracing::instrument(skip_all, name = "history_read")]
pub async fn read_handler(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    method: Method,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> HandlerResult<(StatusCode, Json<Vec<HistoryEntry>>)> {
    let recorder =
        ErrorRecorder::new(&state.telemetry, HANDLER_NAME, &request_id);

    let Query(query) = query.map_err(|rejection| {
        recorder.record(Error::InvalidParameter(rejection.body_text()))
    })?;

    tracing::info!(
        number = ?query.number,
        request_id = %request_id,
        "History read request",
    );

    let ctx = RequestContext::new(&state, &method);
    let entries =
        process_read(&ctx, &query).map_err(|e| recorder.record(e))?;
    record_served(&state, Route::History);

    Ok((StatusCode::OK, Json(entries)))
}

/// Clear the request history
#[utoipa::path(
    delete,
    path = "/history",
    responses(
        (status = 200, description = "History cleared", body = ClearResponse),
    ),
    tag = "history",
)]
#[tracing::instrument(skip_all, name = "history_clear")]
pub async fn clear_handler(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
) -> (StatusCode, Json<ClearResponse>) {
    let discarded = state.history.len();
    let response = process_clear(&state.history);

    tracing::info!(
        discarded,
        request_id = %request_id,
        "History cleared",
    );
    state.telemetry.maybe_use_metrics(|m| m.set_history_records(0));

    (StatusCode::OK, Json(response))
}
