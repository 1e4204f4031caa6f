use crate::models::ServiceConfig;
use crate::services::ConsulAgent;
use std::sync::Arc;

pub struct AppStateInner {
    pub config: ServiceConfig,
    pub agent: ConsulAgent,
}

pub type AppState = Arc<AppStateInner>;

pub fn new_state(config: ServiceConfig) -> AppState {
    let agent = ConsulAgent::new(&config.agent_url);

    Arc::new(AppStateInner { config, agent })
}
