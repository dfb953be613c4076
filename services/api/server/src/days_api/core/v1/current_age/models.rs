use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CurrentAgeQuery {
    /// Birth date as an ISO 8601 date, e.g. `1990-05-15`
    #[param(example = "1990-05-15")]
    pub date: Option<String>,
}

#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct CurrentAgeResponse {
    /// Whole years elapsed since the birth date, as `days / 365.25`
    #[schema(example = 33)]
    pub current_age: i64,
}
