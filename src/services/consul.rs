use anyhow::Context;
use reqwest::Client as HttpClient;
use std::io::Write;

use crate::models::Registration;

/// Consul agent 的一次应答
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub status: u16,
    pub body: String,
}

impl AgentReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 输出状态码并把应答内容原样写出（生产环境为 stdout）
    pub fn echo<W: Write>(&self, operation: &str, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}: status code {}", operation, self.status)?;
        if !self.body.is_empty() {
            writeln!(out, "{}", self.body)?;
        }
        out.flush()
    }
}

/// Consul agent HTTP API 客户端，不设超时，不重试
#[derive(Clone)]
pub struct ConsulAgent {
    http_client: HttpClient,
    base_url: String,
}

impl ConsulAgent {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn register_url(&self) -> String {
        format!("{}/v1/agent/service/register", self.base_url)
    }

    pub fn deregister_url(&self, name: &str) -> String {
        format!("{}/v1/agent/service/deregister/{}", self.base_url, name)
    }

    pub async fn register(&self, registration: &Registration) -> anyhow::Result<AgentReply> {
        let url = self.register_url();
        log::debug!("POST {} id={}", url, registration.id);

        let response = self
            .http_client
            .post(&url)
            .json(registration)
            .send()
            .await
            .with_context(|| format!("Failed to reach Consul agent at {}", url))?;

        Self::read_reply(response).await
    }

    /// 按服务名（而非实例 id）注销
    pub async fn deregister(&self, name: &str) -> anyhow::Result<AgentReply> {
        let url = self.deregister_url(name);
        log::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach Consul agent at {}", url))?;

        Self::read_reply(response).await
    }

    async fn read_reply(response: reqwest::Response) -> anyhow::Result<AgentReply> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("Failed to read Consul agent response body")?;
        Ok(AgentReply { status, body })
    }
}
