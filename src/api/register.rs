use actix_web::{web, HttpResponse};

use crate::metrics::METRICS;
use crate::models::{AgentFailurePolicy, Registration};
use crate::services::{registration_address, AgentReply};
use crate::state::AppState;

/// GET /register：向 Consul agent 注册本实例
pub async fn register_service(data: web::Data<AppState>) -> HttpResponse {
    METRICS.observe_request("register");
    let config = &data.config;

    let address = registration_address(&config.domain);
    let registration = Registration::new(config, address);
    log::info!(
        "Registering '{}' as {} (tags: {:?})",
        registration.name,
        registration.id,
        registration.tags
    );

    match data.agent.register(&registration).await {
        Ok(reply) => agent_replied("register", &reply),
        Err(e) => agent_failed("register", config.on_agent_error, e),
    }
}

/// GET /deregister：按服务名注销
pub async fn deregister_service(data: web::Data<AppState>) -> HttpResponse {
    METRICS.observe_request("deregister");
    let config = &data.config;

    log::info!("Deregistering '{}'", config.name);

    match data.agent.deregister(&config.name).await {
        Ok(reply) => agent_replied("deregister", &reply),
        Err(e) => agent_failed("deregister", config.on_agent_error, e),
    }
}

fn agent_replied(operation: &str, reply: &AgentReply) -> HttpResponse {
    if reply.is_success() {
        METRICS.observe_agent_call(operation, "ok");
        log::info!("✓ {}: agent answered {}", operation, reply.status);
    } else {
        METRICS.observe_agent_call(operation, "rejected");
        log::warn!("{}: agent answered {}: {}", operation, reply.status, reply.body);
    }
    if let Err(e) = reply.echo(operation, &mut std::io::stdout().lock()) {
        log::warn!("{}: failed to echo agent reply: {}", operation, e);
    }

    HttpResponse::Ok().finish()
}

fn agent_failed(operation: &str, policy: AgentFailurePolicy, err: anyhow::Error) -> HttpResponse {
    METRICS.observe_agent_call(operation, "error");
    log::error!("❌ {} failed: {}", operation, err);
    for cause in err.chain().skip(1) {
        log::error!("     - {}", cause);
    }

    match policy {
        AgentFailurePolicy::Exit => {
            log::error!("Consul agent unreachable, exiting");
            std::process::exit(1);
        }
        AgentFailurePolicy::Respond => HttpResponse::BadGateway().json(serde_json::json!({
            "status": "error",
            "message": format!("{} failed: {:#}", operation, err)
        })),
    }
}
