//! Client for the DICT dictionary lookup protocol (RFC 2229).
//!
//! DICT is a line-oriented text protocol over one persistent TCP stream.
//! Every reply starts with a three-digit status line; some replies then
//! carry a body of lines terminated by a lone `.`. This crate speaks that
//! protocol and exposes four lookups on a [`DictionaryConnection`]:
//!
//! - [`DictionaryConnection::database_list`] (`show db`, cached per
//!   connection),
//! - [`DictionaryConnection::strategy_list`] (`show strat`),
//! - [`DictionaryConnection::definitions`] (`define`),
//! - [`DictionaryConnection::match_list`] (`match`).
//!
//! # Example
//!
//! ```rust,no_run
//! use dict_client::{Database, DictionaryConnection};
//! use dict_config::ServerEndpoint;
//!
//! let endpoint = ServerEndpoint::with_default_port("dict.org");
//! let mut connection = DictionaryConnection::connect(&endpoint)?;
//! for definition in connection.definitions("apple", &Database::all())? {
//!     println!("{}: {}", definition.database().name(), definition.body());
//! }
//! connection.close();
//! # Ok::<(), dict_client::DictError>(())
//! ```

mod atoms;
pub mod connection;
mod error;
mod model;
pub mod reply;
mod status;
mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(test)]
mod tests;

pub use self::atoms::{quote_atom, split_atoms};
pub use self::connection::{CONNECTION_TARGET, ConnectionState, DictionaryConnection};
pub use self::error::DictError;
pub use self::model::{ALL_DATABASES, Database, Definition, FIRST_MATCH, MatchingStrategy};
pub use self::reply::{Disposition, Exchange, NO_RESULT_CODES, disposition};
pub use self::status::Status;
pub use self::transport::CONNECTION_TIMEOUT;
pub use dict_config::{DEFAULT_PORT, ServerEndpoint};
