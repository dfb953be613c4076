use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use date_math::{DateValue, age_in_years, parse_iso_date};
use request_history::Route;

use crate::AppState;
use crate::days_api::error_recorder::ErrorRecorder;
use crate::shared::extractors::request_id::RequestId;

use super::super::errors::{Error, HandlerResult};
use super::super::record_served;
use super::super::types::RequestContext;
use super::models::{CurrentAgeQuery, CurrentAgeResponse};

const HANDLER_NAME: &str = "current_age";

pub fn process(
    ctx: &RequestContext<'_>,
    query: &CurrentAgeQuery,
) -> Result<CurrentAgeResponse, Error> {
    let raw = query
        .date
        .as_deref()
        .filter(|raw| !raw.is_empty())
        .ok_or(Error::MissingDateParameter)?;

    let birth = parse_iso_date(raw).map_err(Error::InvalidParameterValue)?;
    let today = DateValue::from(ctx.clock.today());

    let current_age = age_in_years(birth, today);
    ctx.record(Route::CurrentAge);

    Ok(CurrentAgeResponse { current_age })
}

/// Current age for a birth date
///
/// Accepts ISO 8601 dates and approximates the age as whole multiples of
/// 365.25 days.
#[utoipa::path(
    get,
    path = "/current_age",
    params(CurrentAgeQuery),
    responses(
        (status = 200, description = "Age in years", body = CurrentAgeResponse),
        (status = 400, description = "Missing or invalid date parameter"),
        (status = 405, description = "Method not allowed"),
    ),
    tag = "days",
)]
#[tracing::instrument(skip_all, name = "current_age")]
pub async fn handler(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    method: Method,
    query: Result<Query<CurrentAgeQuery>, QueryRejection>,
) -> HandlerResult<(StatusCode, Json<CurrentAgeResponse>)> {
    let recorder =
        ErrorRecorder::new(&state.telemetry, HANDLER_NAME, &request_id);

    let Query(query) = query.map_err(|rejection| {
        recorder.record(Error::InvalidParameterValue(
            date_math::DateMathError::InvalidDateFormat(rejection.body_text()),
        ))
    })?;

    tracing::info!(
        date = ?query.date,
        request_id = %request_id,
        "Current age request",
    );

    let ctx = RequestContext::new(&state, &method);
    let response = process(&ctx, &query).map_err(|e| recorder.record(e))?;
    record_served(&state, Route::CurrentAge);

    Ok((StatusCode::OK, Json(response)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use request_history::HistoryLog;

    use super::*;
    use crate::clock::FixedClock;
    use crate::days_api::core::v1::types::fixed_now;

    fn run(
        history: &HistoryLog,
        date: Option<&str>,
    ) -> Result<CurrentAgeResponse, Error> {
        let clock = FixedClock::new(fixed_now());
        let method = Method::GET;
        let ctx = RequestContext {
            history,
            clock: &clock,
            method: &method,
        };
        let query = CurrentAgeQuery {
            date: date.map(str::to_string),
        };
        process(&ctx, &query)
    }

    #[test]
    fn test_requires_date() {
        let history = HistoryLog::new();

        assert_eq!(run(&history, None), Err(Error::MissingDateParameter));
        assert_eq!(run(&history, Some("")), Err(Error::MissingDateParameter));
        assert!(history.is_empty());
    }

    #[test]
    fn test_rejects_invalid_dates() {
        let history = HistoryLog::new();

        for raw in
            ["birthdate", "0", "23/01/2000", "19-02-02", "3rd of March 1827"]
        {
            assert!(matches!(
                run(&history, Some(raw)),
                Err(Error::InvalidParameterValue(_))
            ));
        }
        assert!(history.is_empty());
    }

    #[test]
    fn test_returns_age_and_records_request() {
        let cases = [
            ("2023-10-09", 0),
            ("2020-10-09", 2),
            ("1990-05-15", 33),
            ("1901-12-22", 121),
            ("0001-01-01", 2022),
            ("1097-01-27", 926),
            ("2027-03-03", -4),
        ];

        let history = HistoryLog::new();
        for (raw, current_age) in cases {
            assert_eq!(
                run(&history, Some(raw)),
                Ok(CurrentAgeResponse { current_age }),
                "birth {raw}"
            );
        }

        let recorded = history.recent(20);
        assert_eq!(recorded.len(), cases.len());
        assert!(recorded.iter().all(|r| r.route == Route::CurrentAge));
        assert!(recorded.iter().all(|r| r.method == "GET"));
    }
}
