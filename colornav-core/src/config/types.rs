//! Configuration type definitions
//!
//! These types describe how the client reaches the ColorNavigator API server.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default address of the local ColorNavigator API server
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default API port (configurable in ColorNavigator's settings)
pub const DEFAULT_PORT: u16 = 50005;

/// Environment variable overriding [`ClientConfig::host`]
pub const ENV_HOST: &str = "COLORNAV_HOST";

/// Environment variable overriding [`ClientConfig::port`]
pub const ENV_PORT: &str = "COLORNAV_PORT";

/// Connection settings for the ColorNavigator API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// API server host
    #[serde(default = "default_host")]
    pub host: String,

    /// API server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// URL scheme
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Ignore `HTTP_PROXY` and friends when talking to the API server
    #[serde(default = "default_bool_true")]
    pub bypass_proxy: bool,

    /// Request timeout in seconds (None = client default)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_bool_true() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            scheme: default_scheme(),
            bypass_proxy: true,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Base URL every endpoint path is appended to, e.g. `http://127.0.0.1:50005`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
