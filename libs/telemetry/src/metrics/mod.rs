mod traits;

use std::sync::Arc;
use std::time::Instant;

pub use traits::TelemetryMetrics;

#[derive(Clone)]
pub struct Telemetry<M: TelemetryMetrics> {
    started_at: Instant,
    metrics: Option<Arc<M>>,
}

impl<M: TelemetryMetrics> Telemetry<M> {
    pub fn new(metrics: Option<M>) -> Arc<Self> {
        Arc::new(Self {
            started_at: Instant::now(),
            metrics: metrics.map(Arc::new),
        })
    }

    pub fn base_metrics(&self) -> Option<M> {
        self.metrics.clone().and_then(|m| m.metrics())
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn maybe_use_metrics<F>(&self, f: F)
    where
        F: Fn(&M),
    {
        if let Some(metrics) = &self.metrics {
            f(metrics);
        }
    }

    pub fn get_metrics(&self) -> String {
        let mut result = String::new();
        if let Some(metrics) = &self.metrics {
            result.push_str(&metrics.gather_metrics());
        }
        // Default registry, which carries the process collector on Linux
        result.push_str(&traits::encode_text(&prometheus::gather()));
        result.push_str(&format!(
            "# HELP uptime_seconds Seconds since telemetry started\n\
             # TYPE uptime_seconds gauge\n\
             uptime_seconds {}\n",
            self.uptime_seconds()
        ));
        result.push_str("# EOF\n");
        result
    }
}
