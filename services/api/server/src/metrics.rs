use prometheus::{IntCounterVec, IntGauge, Opts, Registry};
use telemetry::metrics::TelemetryMetrics;

#[derive(Clone, Debug)]
pub struct ServerMetrics {
    pub registry: Registry,

    pub request_errors: IntCounterVec,
    pub requests_served: IntCounterVec,
    pub history_records: IntGauge,
}

impl Default for ServerMetrics {
    fn default() -> Self {
        ServerMetrics::new(None)
            .expect("Failed to create default ServerMetrics")
    }
}

impl TelemetryMetrics for ServerMetrics {
    fn registry(&self) -> &Registry {
        &self.registry
    }

    fn metrics(&self) -> Option<Self> {
        Some(self.clone())
    }
}

impl ServerMetrics {
    pub fn new(prefix: Option<String>) -> anyhow::Result<Self> {
        let request_errors = IntCounterVec::new(
            Opts::new(
                "request_errors",
                "A metric counting request errors by handler and error code",
            ),
            &["handler", "error_code"],
        )?;

        let requests_served = IntCounterVec::new(
            Opts::new(
                "requests_served",
                "A metric counting successfully served requests by route",
            ),
            &["route"],
        )?;

        let history_records = IntGauge::new(
            "history_records",
            "Number of records currently held in the request history",
        )?;

        let registry = Registry::new_custom(prefix, None)?;
        registry.register(Box::new(request_errors.clone()))?;
        registry.register(Box::new(requests_served.clone()))?;
        registry.register(Box::new(history_records.clone()))?;

        Ok(Self {
            registry,
            request_errors,
            requests_served,
            history_records,
        })
    }

    pub fn record_error(&self, handler: &str, error_code: &str) {
        self.request_errors
            .with_label_values(&[handler, error_code])
            .inc();
    }

    pub fn record_served(&self, route: &str, history_len: usize) {
        self.requests_served.with_label_values(&[route]).inc();
        self.set_history_records(history_len);
    }

    pub fn set_history_records(&self, history_len: usize) {
        self.history_records
            .set(i64::try_from(history_len).unwrap_or(i64::MAX));
    }
}
