pub mod consul;
pub mod hostname;

#[cfg(test)]
pub mod fake_agent;

pub use consul::{AgentReply, ConsulAgent};
pub use hostname::{display_hostname, registration_address};
