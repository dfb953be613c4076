use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request payload for a weekday lookup
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WeekdayRequest {
    /// Date in `DD.MM.YYYY` form
    #[serde(
        default,
        deserialize_with = "crate::days_api::core::v1::types::present"
    )]
    #[schema(value_type = Option<String>, example = "09.10.2023")]
    pub date: Option<serde_json::Value>,
}

#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct WeekdayResponse {
    /// Full English weekday name
    #[schema(example = "Monday")]
    pub weekday: String,
}
