//! Server endpoint parsing and formatting.
//!
//! A DICT server is addressed by a host name and a TCP port. Operators may
//! spell the address either as a `dict://` URL or as the bare `host[:port]`
//! form typed into interactive prompts; both resolve to the same
//! [`ServerEndpoint`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::{Host, Url};

use crate::defaults::DEFAULT_PORT;

const URL_SCHEME: &str = "dict";

/// Address of a DICT server.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ServerEndpoint {
    host: String,
    port: u16,
}

impl ServerEndpoint {
    /// Builds an endpoint from an explicit host and port.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Builds an endpoint on the standard DICT port.
    #[must_use]
    pub fn with_default_port(host: impl Into<String>) -> Self {
        Self::new(host, DEFAULT_PORT)
    }

    /// Host name or address literal.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    fn from_url(input: &str) -> Result<Self, EndpointParseError> {
        let url = Url::parse(input)?;
        if url.scheme() != URL_SCHEME {
            return Err(EndpointParseError::UnsupportedScheme(
                url.scheme().to_owned(),
            ));
        }
        let host = match url.host() {
            Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_owned(),
            Some(Host::Ipv4(address)) => address.to_string(),
            Some(Host::Ipv6(address)) => address.to_string(),
            _ => return Err(EndpointParseError::MissingHost(input.to_owned())),
        };
        Ok(Self::new(host, url.port().unwrap_or(DEFAULT_PORT)))
    }

    fn from_bare(input: &str) -> Result<Self, EndpointParseError> {
        let (host, port) = match input.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| EndpointParseError::InvalidPort(input.to_owned()))?;
                (host, port)
            }
            None => (input, DEFAULT_PORT),
        };
        if host.is_empty() || host.chars().any(char::is_whitespace) {
            return Err(EndpointParseError::MissingHost(input.to_owned()));
        }
        Ok(Self::new(host, port))
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(formatter, "{URL_SCHEME}://[{}]:{}", self.host, self.port)
        } else {
            write!(formatter, "{URL_SCHEME}://{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for ServerEndpoint {
    type Err = EndpointParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.contains("://") {
            Self::from_url(trimmed)
        } else {
            Self::from_bare(trimmed)
        }
    }
}

impl TryFrom<String> for ServerEndpoint {
    type Error = EndpointParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ServerEndpoint> for String {
    fn from(endpoint: ServerEndpoint) -> Self {
        endpoint.to_string()
    }
}

/// Errors encountered while parsing a [`ServerEndpoint`] from text.
#[derive(Debug, Error)]
pub enum EndpointParseError {
    /// Scheme was not `dict`.
    #[error("unsupported server scheme '{0}'")]
    UnsupportedScheme(String),
    /// Host name was missing or blank.
    #[error("missing server host in '{0}'")]
    MissingHost(String),
    /// Port was present but not a valid TCP port.
    #[error("invalid server port in '{0}'")]
    InvalidPort(String),
    /// URL failed to parse.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}
