//! Process-level configuration read once at startup. The solve path itself
//! takes no runtime configuration beyond the fixed weights and time budgets
//! defined alongside the objective and solver adapter.

use log::warn;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let bind_addr = match std::env::var("SCHEDULER_BIND_ADDR") {
            Ok(addr) if addr.parse::<std::net::SocketAddr>().is_ok() => addr,
            Ok(addr) => {
                warn!(
                    "SCHEDULER_BIND_ADDR={} is not a valid socket address, falling back to {}",
                    addr, DEFAULT_BIND_ADDR
                );
                DEFAULT_BIND_ADDR.to_string()
            }
            Err(_) => DEFAULT_BIND_ADDR.to_string(),
        };
        ServerConfig { bind_addr }
    }
}
