use prometheus::proto::MetricFamily;
use prometheus::{Encoder, Registry, TextEncoder};

pub trait TelemetryMetrics: Send + Sync + 'static {
    fn registry(&self) -> &Registry;

    fn metrics(&self) -> Option<Self>
    where
        Self: Sized;

    /// Render every collector of [`TelemetryMetrics::registry`] in the
    /// Prometheus text exposition format.
    fn gather_metrics(&self) -> String {
        encode_text(&self.registry().gather())
    }
}

/// Encode gathered metric families in the Prometheus text format.
pub(crate) fn encode_text(families: &[MetricFamily]) -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(families, &mut buffer) {
        tracing::error!("could not encode prometheus metrics: {}", e);
        return String::default();
    }

    match String::from_utf8(buffer) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(
                "prometheus metrics could not be from_utf8'd: {}",
                e
            );
            String::default()
        }
    }
}
