use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};

use crate::metrics::METRICS;
use crate::models::ServiceStub;
use crate::services::display_hostname;
use crate::state::AppState;

/// 前缀 stub：返回请求路径和本服务的描述
pub async fn service_stub(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    METRICS.observe_request("stub");

    let url = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| req.path())
        .to_string();

    let stub = ServiceStub {
        url,
        service: data.config.name.clone(),
        host: display_hostname(),
        port: data.config.port,
    };

    match serde_json::to_vec(&stub) {
        Ok(body) => {
            log::info!("stub {}", stub.url);
            HttpResponse::Ok()
                .content_type(ContentType::json())
                .body(body)
        }
        Err(e) => {
            log::error!("stub {}: failed to encode response: {}", stub.url, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
