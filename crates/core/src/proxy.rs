//! Proxy Configuration Types
//!
//! Outbound proxy settings shared by the AI provider and workflow backend
//! HTTP clients. The client factory itself lives in `pitch-writer-llm`.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Proxy protocol type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProxyProtocol {
    Http,
    Https,
    Socks5,
}

impl ProxyProtocol {
    pub fn scheme(&self) -> &'static str {
        match self {
            ProxyProtocol::Http => "http",
            ProxyProtocol::Https => "https",
            ProxyProtocol::Socks5 => "socks5",
        }
    }
}

/// Outbound proxy.
///
/// The password is never read from or written to the config file; it is
/// filled in from the environment at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub protocol: ProxyProtocol,
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip)]
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Proxy URL without credentials
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol.scheme(), self.host, self.port)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.host.trim().is_empty() {
            return Err(CoreError::validation("proxy host must not be empty"));
        }
        if self.port == 0 {
            return Err(CoreError::validation("proxy port must be non-zero"));
        }
        Ok(())
    }
}
