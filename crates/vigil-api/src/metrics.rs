//! Prometheus registry for the `/metrics` endpoint.
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub struct ApiMetrics {
    registry: Registry,
    pub cycles_total: IntCounter,
    pub cycle_failures_total: IntCounter,
    pub probes_total: IntCounter,
}

impl ApiMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        let cycles_total =
            IntCounter::new("vigil_cycles_total", "Compliance cycles started").unwrap();
        let cycle_failures_total = IntCounter::new(
            "vigil_cycle_failures_total",
            "Compliance cycles that failed entirely",
        )
        .unwrap();
        let probes_total =
            IntCounter::new("vigil_probes_total", "Single-endpoint probe requests").unwrap();

        registry.register(Box::new(cycles_total.clone())).unwrap();
        registry
            .register(Box::new(cycle_failures_total.clone()))
            .unwrap();
        registry.register(Box::new(probes_total.clone())).unwrap();

        Self {
            registry,
            cycles_total,
            cycle_failures_total,
            probes_total,
        }
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}
