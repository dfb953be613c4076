use axum::Json;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use date_math::{DateValue, weekday_of};
use request_history::Route;

use crate::AppState;
use crate::days_api::error_recorder::ErrorRecorder;
use crate::shared::extractors::payload::Payload;
use crate::shared::extractors::request_id::RequestId;

use super::super::errors::{Error, HandlerResult};
use super::super::record_served;
use super::super::types::RequestContext;
use super::models::{WeekdayRequest, WeekdayResponse};

const HANDLER_NAME: &str = "weekday";

pub fn process(
    ctx: &RequestContext<'_>,
    request: &WeekdayRequest,
) -> Result<WeekdayResponse, Error> {
    let date = request.date.as_ref().ok_or(Error::MissingData)?;
    let date = DateValue::try_from(date).map_err(Error::InvalidFormat)?;

    let weekday = weekday_of(date);
    ctx.record(Route::Weekday);

    Ok(WeekdayResponse {
        weekday: weekday.to_string(),
    })
}

/// Day of the week a date falls on
#[utoipa::path(
    post,
    path = "/weekday",
    request_body = WeekdayRequest,
    responses(
        (status = 200, description = "Weekday name", body = WeekdayResponse),
        (status = 400, description = "Missing or unparseable date"),
        (status = 405, description = "Method not allowed"),
    ),
    tag = "days",
)]
#[tracing::instrument(skip_all, name = "weekday")]
pub async fn handler(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    method: Method,
    Payload(payload): Payload<WeekdayRequest>,
) -> HandlerResult<(StatusCode, Json<WeekdayResponse>)> {
    tracing::info!(
        date = ?payload.date,
        request_id = %request_id,
        "Weekday request",
    );

    let recorder =
        ErrorRecorder::new(&state.telemetry, HANDLER_NAME, &request_id);
    let ctx = RequestContext::new(&state, &method);

    let response = process(&ctx, &payload).map_err(|e| recorder.record(e))?;
    record_served(&state, Route::Weekday);

    Ok((StatusCode::OK, Json(response)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use request_history::HistoryLog;
    use serde_json::json;

    use super::*;
    use crate::clock::FixedClock;
    use crate::days_api::core::v1::types::fixed_now;

    fn run(
        history: &HistoryLog,
        body: serde_json::Value,
    ) -> Result<WeekdayResponse, Error> {
        let clock = FixedClock::new(fixed_now());
        let method = Method::POST;
        let ctx = RequestContext {
            history,
            clock: &clock,
            method: &method,
        };
        let request: WeekdayRequest = serde_json::from_value(body).unwrap();
        process(&ctx, &request)
    }

    #[test]
    fn test_requires_date() {
        let bodies = [
            json!({}),
            json!({"first": 1}),
            json!({"dat": 2}),
            json!({"Date": 3}),
            json!({"dates": 4}),
        ];

        for body in bodies {
            let history = HistoryLog::new();
            assert_eq!(run(&history, body), Err(Error::MissingData));
            assert!(history.is_empty());
        }
    }

    #[test]
    fn test_rejects_invalid_dates() {
        let bodies = [
            json!({"date": 1}),
            json!({"date": "1880.12.01"}),
            json!({"date": "red"}),
            json!({"date": "24.5.19"}),
            json!({"date": "24/5/1999"}),
            json!({"date": null}),
        ];

        for body in bodies {
            let history = HistoryLog::new();
            assert!(matches!(
                run(&history, body),
                Err(Error::InvalidFormat(_))
            ));
            assert!(history.is_empty());
        }
    }

    #[test]
    fn test_returns_weekday_and_records_request() {
        let cases = [
            ("09.10.2023", "Monday"),
            ("10.10.2023", "Tuesday"),
            ("11.10.2023", "Wednesday"),
            ("12.10.2023", "Thursday"),
            ("13.10.2023", "Friday"),
            ("14.10.2023", "Saturday"),
            ("15.10.2023", "Sunday"),
        ];

        let history = HistoryLog::new();
        for (date, weekday) in cases {
            let response = run(&history, json!({ "date": date })).unwrap();
            assert_eq!(response.weekday, weekday);
        }

        let recorded = history.recent(20);
        assert_eq!(recorded.len(), cases.len());
        assert!(recorded.iter().all(|r| r.route == Route::Weekday));
    }
}
