use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request payload for the number of days between two dates
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BetweenRequest {
    /// Start date in `DD.MM.YYYY` form
    #[serde(
        default,
        deserialize_with = "crate::days_api::core::v1::types::present"
    )]
    #[schema(value_type = Option<String>, example = "12.01.2000")]
    pub first: Option<serde_json::Value>,

    /// End date in `DD.MM.YYYY` form
    #[serde(
        default,
        deserialize_with = "crate::days_api::core::v1::types::present"
    )]
    #[schema(value_type = Option<String>, example = "14.01.2000")]
    pub last: Option<serde_json::Value>,
}

#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct BetweenResponse {
    /// `last - first` in days, negative when `last` comes first
    #[schema(example = 2)]
    pub days: i64,
}
