use axum::http::Method;
use request_history::{HistoryLog, Route};

use crate::AppState;
use crate::clock::Clock;

/// What a v1 operation needs besides its own input: where to record the
/// request, what time it is, and which verb it arrived with.
pub struct RequestContext<'a> {
    pub history: &'a HistoryLog,
    pub clock: &'a dyn Clock,
    pub method: &'a Method,
}

impl<'a> RequestContext<'a> {
    pub fn new(state: &'a AppState, method: &'a Method) -> Self {
        Self {
            history: &state.history,
            clock: state.clock.as_ref(),
            method,
        }
    }

    /// Append this request to the history log.
    pub fn record(&self, route: Route) {
        self.history
            .record_at(self.method.as_str(), route, self.clock.now());
    }
}

/// Deserialize a field so that an explicit `null` still counts as present.
///
/// Use together with `#[serde(default)]`: an absent key stays `None`, while
/// any supplied value, `null` included, becomes `Some`.
pub fn present<'de, D>(
    deserializer: D,
) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    serde_json::Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
pub(crate) fn fixed_now() -> chrono::NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2023, 10, 9)
        .and_then(|d| d.and_hms_opt(12, 30, 15))
        .expect("valid timestamp")
}
