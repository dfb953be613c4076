use date_math::DateMathError;

use crate::days_api::error_recorder::IntoApiError;
use crate::shared::errors::ApiError;

pub type HandlerResult<T> = Result<T, ApiError>;

/// Validation failures shared by the v1 date routes.
///
/// The display text of each variant is the exact message returned to the
/// client.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Missing required data.")]
    MissingData,

    #[error("Unable to convert value to datetime.")]
    InvalidFormat(#[source] DateMathError),

    #[error("Number must be an integer between 1 and 20.")]
    InvalidParameter(String),

    #[error("Date parameter is required.")]
    MissingDateParameter,

    #[error("Value for data parameter is invalid.")]
    InvalidParameterValue(#[source] DateMathError),
}

impl Error {
    pub fn to_api_error(self) -> ApiError {
        ApiError::bad_request(self.to_string())
    }
}

impl IntoApiError for Error {
    fn code(&self) -> &'static str {
        match self {
            Error::MissingData => "missing_data",
            Error::InvalidFormat(_) => "invalid_format",
            Error::InvalidParameter(_) => "invalid_parameter",
            Error::MissingDateParameter => "missing_date_parameter",
            Error::InvalidParameterValue(_) => "invalid_parameter_value",
        }
    }

    fn into_api_error(self) -> ApiError {
        self.to_api_error()
    }
}
