//! Shared configuration for the DICT client toolchain.
//!
//! Configuration is layered by `ortho_config`: command-line flags win over
//! `DICT_*` environment variables, which win over the configuration file,
//! which wins over the built-in defaults in [`defaults`].

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub mod defaults;
mod endpoint;
mod logging;

pub use defaults::{
    DEFAULT_HOST, DEFAULT_LOG_FILTER, DEFAULT_PORT, default_log_filter,
    default_log_filter_string, default_log_format, default_server,
};
pub use endpoint::{EndpointParseError, ServerEndpoint};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration for the `dict` binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "DICT")]
pub struct Config {
    /// DICT server to connect to (`dict://host:port` or `host[:port]`).
    #[serde(default = "default_server")]
    #[ortho_config(default = default_server())]
    pub server: ServerEndpoint,
    /// Tracing filter expression applied to diagnostic output.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for diagnostic logs.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Config {
    /// Server the client connects to.
    #[must_use]
    pub const fn server(&self) -> &ServerEndpoint {
        &self.server
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Diagnostic log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}
