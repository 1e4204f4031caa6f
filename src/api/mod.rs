pub mod register;
pub mod metrics;
pub mod stub;

pub use register::{register_service, deregister_service};
pub use metrics::get_metrics;
pub use stub::service_stub;

use actix_web::{web, HttpResponse, Responder};

use crate::metrics::METRICS;
use crate::models::ServiceConfig;
use crate::services::display_hostname;
use crate::state::AppState;

/// 路由表，启动时按配置构建一次
pub fn routes(cfg: &mut web::ServiceConfig, config: &ServiceConfig) {
    cfg.route("/", web::route().to(root))
        .route("/health", web::route().to(health))
        .route("/register", web::get().to(register_service))
        .route("/deregister", web::get().to(deregister_service))
        .route("/metrics", web::get().to(get_metrics));

    for prefix in config.stub_prefixes() {
        cfg.route(prefix, web::get().to(service_stub));
    }
}

pub async fn root(data: web::Data<AppState>) -> impl Responder {
    METRICS.observe_request("root");
    log::info!(
        "root: (name: {}; port: {}) {}",
        data.config.name,
        data.config.port,
        display_hostname()
    );

    HttpResponse::Ok().json(serde_json::json!({}))
}

/// Consul 健康检查，不做实际检查
pub async fn health() -> impl Responder {
    METRICS.observe_request("health");
    log::info!("health check");

    HttpResponse::Ok().json(serde_json::json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::test_config;
    use crate::services::fake_agent;
    use crate::state::new_state;
    use actix_web::{http::StatusCode, test, App};

    macro_rules! sidecar {
        ($state:expr) => {{
            let state = $state;
            test::init_service(
                App::new()
                    .app_data(web::Data::new(state.clone()))
                    .configure(|cfg| routes(cfg, &state.config)),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_root_and_health_return_empty_object() {
        let app = sidecar!(new_state(test_config("/", fake_agent::UNREACHABLE_URL)));

        for req in [
            test::TestRequest::get().uri("/").to_request(),
            test::TestRequest::post().uri("/").to_request(),
            test::TestRequest::get().uri("/health").to_request(),
            test::TestRequest::put().uri("/health").to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body = test::read_body(resp).await;
            assert_eq!(body, web::Bytes::from_static(b"{}"));
        }
    }

    #[actix_web::test]
    async fn test_stub_echoes_requested_path() {
        let app = sidecar!(new_state(test_config("/foo", fake_agent::UNREACHABLE_URL)));

        let req = test::TestRequest::get().uri("/foo?debug=1").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["url"], "/foo?debug=1");
        assert_eq!(body["service"], "orders");
        assert_eq!(body["port"], 9101);
        assert_eq!(body["host"], display_hostname());
    }

    #[actix_web::test]
    async fn test_configured_prefixes_are_routed() {
        let app = sidecar!(new_state(test_config("/foo,/bar", fake_agent::UNREACHABLE_URL)));

        for path in ["/foo", "/bar"] {
            let req = test::TestRequest::get().uri(path).to_request();
            let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["url"], path);
        }

        let req = test::TestRequest::get().uri("/baz").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // `/` 仍由 root 处理，不是 stub
        let req = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, web::Bytes::from_static(b"{}"));
    }

    #[actix_web::test]
    async fn test_register_sends_registration_to_agent() {
        let fake = fake_agent::start(200).await;
        let app = sidecar!(new_state(test_config("/foo", &fake.base_url)));

        let req = test::TestRequest::get().uri("/register").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(test::read_body(resp).await.is_empty());

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "/v1/agent/service/register");

        let payload: serde_json::Value = serde_json::from_str(&calls[0].body).unwrap();
        assert_eq!(payload["name"], "orders");
        assert_eq!(payload["tags"], serde_json::json!(["urlprefix-/foo", "api"]));
        assert_eq!(payload["check"]["http"], "http://localhost:9101/health");
    }

    #[actix_web::test]
    async fn test_deregister_hits_agent_by_name() {
        let fake = fake_agent::start(200).await;
        let app = sidecar!(new_state(test_config("/", &fake.base_url)));

        let req = test::TestRequest::get().uri("/deregister").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let calls = fake.calls();
        assert_eq!(calls[0].method, "GET");
        assert_eq!(calls[0].path, "/v1/agent/service/deregister/orders");
    }

    #[actix_web::test]
    async fn test_agent_rejection_still_answers_ok() {
        let fake = fake_agent::start(400).await;
        let app = sidecar!(new_state(test_config("/", &fake.base_url)));

        let req = test::TestRequest::get().uri("/register").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_unreachable_agent_with_respond_policy() {
        let app = sidecar!(new_state(test_config("/", fake_agent::UNREACHABLE_URL)));

        let req = test::TestRequest::get().uri("/register").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body["status"], "error");
    }

    #[actix_web::test]
    async fn test_metrics_endpoint() {
        let app = sidecar!(new_state(test_config("/", fake_agent::UNREACHABLE_URL)));

        let req = test::TestRequest::get().uri("/health").to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(text.contains("sulvice_http_requests_total{handler=\"health\"}"));
    }
}
