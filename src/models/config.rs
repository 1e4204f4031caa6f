use clap::ValueEnum;

use crate::cli::CommandArgs;

/// Consul agent 请求失败时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentFailurePolicy {
    /// 记录错误后退出进程
    Exit,
    /// 返回 502 给调用方，进程继续运行
    Respond,
}

/// 启动时解析出的服务配置，之后只读
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// 服务名称
    pub name: String,
    /// 监听端口
    pub port: u16,
    /// 配置的 URL 前缀（保持原始顺序）
    pub prefixes: Vec<String>,
    /// 监听地址
    pub address: String,
    /// Consul agent 基础 URL，不带结尾的 `/`
    pub agent_url: String,
    /// 注册地址的域名后缀
    pub domain: String,
    pub on_agent_error: AgentFailurePolicy,
}

impl ServiceConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    /// 需要挂载 stub 的前缀：去掉 `/`，去重，保持顺序
    pub fn stub_prefixes(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for prefix in &self.prefixes {
            if prefix == "/" || seen.contains(&prefix.as_str()) {
                continue;
            }
            seen.push(prefix);
        }
        seen
    }
}

impl From<CommandArgs> for ServiceConfig {
    fn from(args: CommandArgs) -> Self {
        Self {
            name: args.name,
            port: args.port,
            prefixes: parse_prefixes(&args.prefix),
            address: args.address,
            agent_url: args.agent_url.trim_end_matches('/').to_string(),
            domain: args.domain,
            on_agent_error: args.on_agent_error,
        }
    }
}

/// 解析逗号分隔的前缀列表，忽略空项以及含 `{`/`}` 的项（会被 actix 当作路由模式）
pub fn parse_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter(|p| {
            if p.contains(['{', '}']) {
                log::warn!("Ignoring prefix '{}': braces are not allowed", p);
                false
            } else {
                true
            }
        })
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) fn test_config(prefix: &str, agent_url: &str) -> ServiceConfig {
    ServiceConfig {
        name: "orders".to_string(),
        port: 9101,
        prefixes: parse_prefixes(prefix),
        address: "127.0.0.1".to_string(),
        agent_url: agent_url.to_string(),
        domain: "cisco.com".to_string(),
        on_agent_error: AgentFailurePolicy::Respond,
    }
}
