use lazy_static::lazy_static;
use prometheus::{
    register_int_counter_vec_with_registry, Encoder, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

pub struct MetricsRegistry {
    registry: Registry,

    pub http_requests: IntCounterVec,
    pub agent_calls: IntCounterVec,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests = register_int_counter_vec_with_registry!(
            Opts::new("sulvice_http_requests_total", "Requests handled, by handler"),
            &["handler"],
            registry
        ).unwrap();

        let agent_calls = register_int_counter_vec_with_registry!(
            Opts::new("sulvice_agent_calls_total", "Calls to the Consul agent, by operation and outcome"),
            &["operation", "outcome"],
            registry
        ).unwrap();

        // sidecar 自身的 CPU / 内存 / fd
        #[cfg(target_os = "linux")]
        registry
            .register(Box::new(prometheus::process_collector::ProcessCollector::for_self()))
            .unwrap();

        Self {
            registry,
            http_requests,
            agent_calls,
        }
    }

    pub fn observe_request(&self, handler: &str) {
        self.http_requests.with_label_values(&[handler]).inc();
    }

    /// outcome: `ok` / `rejected` / `error`
    pub fn observe_agent_call(&self, operation: &str, outcome: &str) {
        self.agent_calls.with_label_values(&[operation, outcome]).inc();
    }

    pub fn render(&self) -> Result<String, Box<dyn std::error::Error>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

lazy_static! {
    pub static ref METRICS: Arc<MetricsRegistry> = Arc::new(MetricsRegistry::new());
}
