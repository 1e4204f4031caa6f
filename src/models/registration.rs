use serde::Serialize;

use crate::models::ServiceConfig;

pub const CHECK_INTERVAL: &str = "15s";
pub const DEREGISTER_CRITICAL_AFTER: &str = "15s";

/// Consul `/v1/agent/service/register` 请求体
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub id: String,
    pub name: String,
    pub address: String,
    pub port: u16,
    pub tags: Vec<String>,
    pub check: Check,
}

#[derive(Debug, Clone, Serialize)]
pub struct Check {
    pub http: String,
    pub interval: String,
    pub deregister_critical_service_after: String,
}

/// 前缀 stub 的响应
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStub {
    pub url: String,
    pub service: String,
    pub host: String,
    pub port: u16,
}

impl Registration {
    /// `address` 为已解析的主机名（含域名后缀）
    pub fn new(config: &ServiceConfig, address: String) -> Self {
        Self {
            id: service_id(&config.name, &address, config.port),
            name: config.name.clone(),
            port: config.port,
            tags: service_tags(&config.stub_prefixes()),
            check: Check {
                http: format!("http://localhost:{}/health", config.port),
                interval: CHECK_INTERVAL.to_string(),
                deregister_critical_service_after: DEREGISTER_CRITICAL_AFTER.to_string(),
            },
            address,
        }
    }
}

pub fn service_id(name: &str, host: &str, port: u16) -> String {
    format!("{}-{}:{}", name, host, port)
}

/// 每个非根前缀一个 `urlprefix-` 标签，最后追加 `api`
pub fn service_tags(prefixes: &[&str]) -> Vec<String> {
    prefixes
        .iter()
        .filter(|p| **p != "/")
        .map(|p| format!("urlprefix-{}", p))
        .chain(std::iter::once("api".to_string()))
        .collect()
}
