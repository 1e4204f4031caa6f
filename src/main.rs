use actix_web::{web, App, HttpServer};
use clap::Parser;

mod models;
mod services;
mod state;
mod api;
mod cli;
mod metrics;

use cli::{normalize_args, CommandArgs};
use models::ServiceConfig;
use state::new_state;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CommandArgs::parse_from(normalize_args(std::env::args_os()));
    let config = ServiceConfig::from(args);
    let bind_address = config.bind_address();

    let state = new_state(config);

    print_banner(&state.config);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(|cfg| api::routes(cfg, &state.config))
    })
        .bind(&bind_address)?
        .run()
        .await
}

fn print_banner(config: &ServiceConfig) {
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║      sulvice v{:<44}║", env!("CARGO_PKG_VERSION"));
    println!("║      Consul registration sidecar                          ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();
    println!("🚀 Service '{}' starting on http://{}", config.name, config.bind_address());
    println!("   Consul agent: {}", config.agent_url);
    println!();
    println!("📋 Available endpoints:");
    println!("  GET    /                       - Service info");
    println!("  GET    /register               - Register with Consul");
    println!("  GET    /deregister             - Deregister from Consul");
    println!("  GET    /health                 - Health check");
    println!("  GET    /metrics                - Prometheus metrics");
    for prefix in config.stub_prefixes() {
        println!("  GET    {:<24}- Service stub", prefix);
    }
    println!("═══════════════════════════════════════════════════════════");
}
