use request_history::HistoryRecord;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// How many records to return, an integer from 1 to 20 (default 5)
    #[param(example = "5")]
    pub number: Option<String>,
}

/// A single served request
#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct HistoryEntry {
    #[schema(example = "POST")]
    pub method: String,
    /// Local time the request was served, `DD/MM/YYYY HH:MM`
    #[schema(example = "09/10/2023 12:30")]
    pub at: String,
    #[schema(example = "between")]
    pub route: String,
}

impl From<HistoryRecord> for HistoryEntry {
    fn from(record: HistoryRecord) -> Self {
        Self {
            at: record.formatted_at(),
            route: record.route.to_string(),
            method: record.method,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct ClearResponse {
    #[schema(example = "History cleared")]
    pub status: String,
}
