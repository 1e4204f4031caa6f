use sysinfo::System;

pub const FALLBACK_HOST: &str = "localhost";

/// 本机主机名，获取失败时返回 None
pub fn local_hostname() -> Option<String> {
    System::host_name().filter(|h| !h.is_empty())
}

/// 日志与 stub 响应中使用的主机名
pub fn display_hostname() -> String {
    display_hostname_for(local_hostname())
}

pub fn display_hostname_for(host: Option<String>) -> String {
    host.unwrap_or_else(|| FALLBACK_HOST.to_string())
}

/// 注册到 Consul 的地址：主机名加域名后缀，失败时为 `localhost`
pub fn registration_address(domain: &str) -> String {
    registration_address_for(local_hostname(), domain)
}

pub fn registration_address_for(host: Option<String>, domain: &str) -> String {
    match host {
        Some(host) => qualify(&host, domain),
        None => FALLBACK_HOST.to_string(),
    }
}

pub fn qualify(host: &str, domain: &str) -> String {
    let domain = domain.trim_matches('.');
    if domain.is_empty() {
        host.to_string()
    } else {
        format!("{}.{}", host, domain)
    }
}
