use clap::Parser;
use std::ffi::OsString;

use crate::models::AgentFailurePolicy;

/// 允许使用单横线书写的长参数（如 `-name foo`、`-port=9000`）
const LONG_FLAGS: &[&str] = &[
    "help",
    "name",
    "port",
    "prefix",
    "address",
    "agent-url",
    "domain",
    "on-agent-error",
];

/// sulvice - Consul 服务注册 sidecar
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// 服务名称
    #[arg(short, long, env = "SERVICE_NAME", default_value = "sulvice")]
    pub name: String,

    /// 监听端口
    #[arg(short, long, env = "PORT", default_value_t = 9357)]
    pub port: u16,

    /// 逗号分隔的 /prefix 列表
    #[arg(long, env = "SERVICE_PREFIX", default_value = "/")]
    pub prefix: String,

    /// 监听地址
    #[arg(short = 'a', long, env = "ADDRESS", default_value = "0.0.0.0")]
    pub address: String,

    /// Consul agent 地址
    #[arg(long, env = "CONSUL_HTTP_ADDR", default_value = "http://localhost:8500")]
    pub agent_url: String,

    /// 注册地址使用的域名后缀
    #[arg(long, env = "SERVICE_DOMAIN", default_value = "cisco.com")]
    pub domain: String,

    /// Consul agent 不可达时的处理方式
    #[arg(long, env = "ON_AGENT_ERROR", value_enum, default_value_t = AgentFailurePolicy::Exit)]
    pub on_agent_error: AgentFailurePolicy,
}

/// 将 `-name`、`-port=9000` 这类单横线长参数改写为 `--name`、`--port=9000`
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let key = rest.split('=').next().unwrap_or(rest);
                    if LONG_FLAGS.contains(&key) {
                        OsString::from(format!("-{}", text))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}
