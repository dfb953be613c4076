use chrono::{NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

/// Format used when presenting [`HistoryRecord::at`].
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Logical endpoint a request was served by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Between,
    Weekday,
    History,
    CurrentAge,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Between => "between",
            Route::Weekday => "weekday",
            Route::History => "history",
            Route::CurrentAge => "current_age",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    pub method: String,
    #[serde(serialize_with = "serialize_at")]
    pub at: NaiveDateTime,
    pub route: Route,
}

impl HistoryRecord {
    /// Builds a record, upper-casing the method and dropping anything finer
    /// than a minute from the timestamp.
    pub fn new(method: &str, route: Route, at: NaiveDateTime) -> Self {
        let at = at
            .with_second(0)
            .and_then(|at| at.with_nanosecond(0))
            .unwrap_or(at);

        Self {
            method: method.to_ascii_uppercase(),
            at,
            route,
        }
    }

    pub fn formatted_at(&self) -> String {
        self.at.format(TIMESTAMP_FORMAT).to_string()
    }
}

fn serialize_at<S: Serializer>(
    at: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&at.format(TIMESTAMP_FORMAT))
}
