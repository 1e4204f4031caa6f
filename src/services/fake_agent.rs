//! 测试用的 Consul agent，记录收到的请求

use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use std::sync::{Arc, Mutex};

pub const REPLY_BODY: &str = "agent-ok";

/// 没有进程监听的地址
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub body: String,
}

type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

pub struct FakeAgent {
    pub base_url: String,
    calls: CallLog,
}

impl FakeAgent {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

pub async fn start(status: u16) -> FakeAgent {
    let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
    let sink = calls.clone();
    let status = StatusCode::from_u16(status).unwrap();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(sink.clone()))
            .app_data(web::Data::new(status))
            .default_service(web::to(record))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    FakeAgent {
        base_url: format!("http://{}", addr),
        calls,
    }
}

async fn record(
    req: HttpRequest,
    body: web::Bytes,
    calls: web::Data<CallLog>,
    status: web::Data<StatusCode>,
) -> HttpResponse {
    calls.lock().unwrap().push(RecordedCall {
        method: req.method().to_string(),
        path: req.path().to_string(),
        body: String::from_utf8_lossy(&body).into_owned(),
    });
    HttpResponse::build(*status.get_ref()).body(REPLY_BODY)
}
