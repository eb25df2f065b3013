//! Error taxonomy for DICT exchanges.

use std::io;

use thiserror::Error;

use crate::connection::ConnectionState;

/// Failures surfaced by [`crate::DictionaryConnection`].
#[derive(Debug, Error)]
pub enum DictError {
    /// The server could not be resolved or reached.
    #[error("failed to connect to DICT server at {endpoint}: {source}")]
    ConnectionFailed {
        /// Endpoint the client tried to reach.
        endpoint: String,
        /// Underlying resolution or connection failure.
        #[source]
        source: io::Error,
    },
    /// A line expected to be a status line did not parse as one.
    #[error("malformed status line {line:?}")]
    MalformedStatus {
        /// The offending line.
        line: String,
    },
    /// A listing line or definition header lacked its required fields.
    #[error("malformed response line {line:?}")]
    MalformedLine {
        /// The offending line.
        line: String,
    },
    /// The server answered with a status the exchange does not accept.
    #[error("server replied {code} {detail}")]
    Protocol {
        /// Three-digit reply code.
        code: u16,
        /// Text following the code.
        detail: String,
    },
    /// A definition referenced a database missing from the catalogue.
    #[error("definition references unknown database '{name}'")]
    UnknownDatabase {
        /// Database name reported by the server.
        name: String,
    },
    /// A request was issued on a connection that is not ready.
    #[error("connection is {state}; requests need a ready connection")]
    IllegalState {
        /// State the connection was in.
        state: ConnectionState,
    },
    /// The stream ended or failed in the middle of an exchange.
    #[error("connection to the DICT server was closed during an exchange")]
    ConnectionClosed {
        /// I/O failure, when the stream reported one instead of a clean end.
        #[source]
        source: Option<io::Error>,
    },
}

impl DictError {
    /// Reply code carried by a [`DictError::Protocol`] failure.
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        match self {
            Self::Protocol { code, .. } => Some(*code),
            _ => None,
        }
    }
}
