use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, header};
use axum::response::Response;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use thiserror::Error;

use crate::shared::errors::ApiError;

/// JSON request body, deserialized with path-aware error messages.
#[derive(Debug, Clone, Copy, Default)]
#[must_use]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(
        req: Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        if json_content_type(req.headers()) {
            let bytes = Bytes::from_request(req, state).await?;
            let deserializer =
                &mut serde_json::Deserializer::from_slice(&bytes);
            let value: T = serde_path_to_error::deserialize(deserializer)?;

            Ok(Payload(value))
        } else {
            Err(Error::MissingJsonContentType)
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Bytes(#[from] BytesRejection),

    #[error(transparent)]
    Json(#[from] serde_path_to_error::Error<serde_json::Error>),

    #[error("Expected request with `Content-Type: application/json`")]
    MissingJsonContentType,
}

impl axum::response::IntoResponse for Error {
    fn into_response(self) -> Response {
        let api_error: ApiError = self.into();
        api_error.into_response()
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        match value {
            Error::Json(err) => match err.inner().classify() {
                Category::Data => {
                    let path = err.path().to_string();
                    let inner_err = err.inner().to_string();

                    let message = if path == "." {
                        format!(
                            "Request body must be a JSON object: {inner_err}"
                        )
                    } else {
                        format!("`{path}` is invalid json: {inner_err}")
                    };

                    ApiError::bad_request(message)
                }
                Category::Eof => ApiError::bad_request(
                    "Request body must be a JSON object.",
                ),
                _ => ApiError::bad_request(format!(
                    "Request body is invalid json: {}",
                    err.inner()
                )),
            },
            Error::Bytes(rejection) => {
                ApiError::new(rejection.status(), rejection.body_text())
            }
            Error::MissingJsonContentType => ApiError::bad_request(
                Error::MissingJsonContentType.to_string(),
            ),
        }
    }
}

fn json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(header::CONTENT_TYPE) else {
        return false;
    };

    let Ok(content_type) = content_type.to_str() else {
        return false;
    };

    let Ok(mime) = content_type.parse::<mime::Mime>() else {
        return false;
    };

    mime.type_() == "application"
        && (mime.subtype() == "json"
            || mime.suffix().is_some_and(|name| name == "json"))
}
