//! Built-in values used when no configuration layer sets a field.

use crate::endpoint::ServerEndpoint;
use crate::logging::LogFormat;

/// Well-known TCP port for the DICT protocol.
pub const DEFAULT_PORT: u16 = 2628;

/// Public server queried when no server is configured.
pub const DEFAULT_HOST: &str = "dict.org";

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Server queried when neither flags, environment nor file name one.
#[must_use]
pub fn default_server() -> ServerEndpoint {
    ServerEndpoint::new(DEFAULT_HOST, DEFAULT_PORT)
}
