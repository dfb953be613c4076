use std::sync::Arc;

use telemetry::metrics::Telemetry;
use uuid::Uuid;

use crate::metrics::ServerMetrics;
use crate::shared::errors::ApiError;

/// Trait for handler error types that can be converted to [`ApiError`].
pub trait IntoApiError {
    /// Stable, low-cardinality label for metrics and logs.
    fn code(&self) -> &'static str;

    fn into_api_error(self) -> ApiError;
}

/// Records error metrics and converts handler errors to [`ApiError`].
pub struct ErrorRecorder<'a> {
    telemetry: &'a Arc<Telemetry<ServerMetrics>>,
    handler_name: &'a str,
    request_id: &'a Uuid,
}

impl<'a> ErrorRecorder<'a> {
    pub fn new(
        telemetry: &'a Arc<Telemetry<ServerMetrics>>,
        handler_name: &'a str,
        request_id: &'a Uuid,
    ) -> Self {
        Self {
            telemetry,
            handler_name,
            request_id,
        }
    }

    pub fn record<E>(&self, e: E) -> ApiError
    where
        E: IntoApiError + std::fmt::Display,
    {
        let code = e.code();
        tracing::warn!(
            handler = self.handler_name,
            error_code = code,
            request_id = %self.request_id,
            "Request rejected: {e}",
        );
        self.telemetry.maybe_use_metrics(|m| {
            m.record_error(self.handler_name, code);
        });
        e.into_api_error()
    }
}
