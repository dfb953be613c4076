use axum::Json;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use date_math::{DateValue, days_between};
use request_history::Route;

use crate::AppState;
use crate::days_api::error_recorder::ErrorRecorder;
use crate::shared::extractors::payload::Payload;
use crate::shared::extractors::request_id::RequestId;

use super::super::errors::{Error, HandlerResult};
use super::super::record_served;
use super::super::types::RequestContext;
use super::models::{BetweenRequest, BetweenResponse};

const HANDLER_NAME: &str = "between";

/// Validate both dates, compute the difference and record the request.
pub fn process(
    ctx: &RequestContext<'_>,
    request: &BetweenRequest,
) -> Result<BetweenResponse, Error> {
    let (Some(first), Some(last)) = (&request.first, &request.last) else {
        return Err(Error::MissingData);
    };

    let first = DateValue::try_from(first).map_err(Error::InvalidFormat)?;
    let last = DateValue::try_from(last).map_err(Error::InvalidFormat)?;

    let days = days_between(first, last);
    ctx.record(Route::Between);

    Ok(BetweenResponse { days })
}

/// Number of days between two dates
///
/// Both dates must be given as `DD.MM.YYYY`. The result is negative when
/// `last` precedes `first`.
#[utoipa::path(
    post,
    path = "/between",
    request_body = BetweenRequest,
    responses(
        (status = 200, description = "Days from first to last", body = BetweenResponse),
        (status = 400, description = "Missing or unparseable dates"),
        (status = 405, description = "Method not allowed"),
    ),
    tag = "days",
)]
#[tracing::instrument(skip_all, name = "between")]
pub async fn handler(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    method: Method,
    Payload(payload): Payload<BetweenRequest>,
) -> HandlerResult<(StatusCode, Json<BetweenResponse>)> {
    tracing::info!(
        first = ?payload.first,
        last = ?payload.last,
        request_id = %request_id,
        "Between request",
    );

    let recorder =
        ErrorRecorder::new(&state.telemetry, HANDLER_NAME, &request_id);
    let ctx = RequestContext::new(&state, &method);

    let response = process(&ctx, &payload).map_err(|e| recorder.record(e))?;
    record_served(&state, Route::Between);

    Ok((StatusCode::OK, Json(response)))
}
