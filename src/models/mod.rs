pub mod config;
pub mod registration;

pub use config::{AgentFailurePolicy, ServiceConfig};
pub use registration::{Registration, ServiceStub};
