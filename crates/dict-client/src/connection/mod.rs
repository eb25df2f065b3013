//! The DICT protocol connection.
//!
//! A [`DictionaryConnection`] owns one stream to a server and runs every
//! exchange on it synchronously: write one command line, read the opening
//! status, read the body it announces, then read the completion status.
//! Requests take `&mut self`, so the borrow checker serialises access to the
//! stream; share a connection between threads by wrapping it in a `Mutex`.
//!
//! A failure raised before any body line was read (for example a `500`
//! reply) leaves the connection usable. A failure raised while a body was
//! being read may leave unread lines on the stream, and later exchanges on
//! the same connection can then misparse; reconnect after such failures.

mod catalogue;

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;

use dict_config::ServerEndpoint;
use tracing::{debug, trace, warn};

use self::catalogue::Catalogue;
use crate::atoms::{quote_atom, split_atoms};
use crate::error::DictError;
use crate::model::{Database, Definition, DefinitionBuilder, MatchingStrategy};
use crate::reply::{Disposition, Exchange, disposition};
use crate::status::Status;
use crate::transport;

/// Tracing target for protocol traffic.
pub const CONNECTION_TARGET: &str = "dict_client::connection";

const BODY_TERMINATOR: &str = ".";
const LINE_ENDING: &[u8] = b"\r\n";

/// Lifecycle of a [`DictionaryConnection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// The banner has not been accepted yet.
    Connecting,
    /// Requests may be issued.
    Ready,
    /// The connection was closed or the stream ended.
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Connecting => "connecting",
            Self::Ready => "ready",
            Self::Closed => "closed",
        };
        formatter.write_str(label)
    }
}

/// A client connection to a DICT server.
pub struct DictionaryConnection<S: Read + Write> {
    stream: Option<BufReader<S>>,
    state: ConnectionState,
    banner: String,
    catalogue: Catalogue,
}

impl DictionaryConnection<TcpStream> {
    /// Connects to `endpoint` over TCP and completes the banner handshake.
    ///
    /// # Errors
    ///
    /// Returns [`DictError::ConnectionFailed`] when the host cannot be
    /// resolved or reached, and the errors of [`Self::handshake`] when the
    /// server's greeting is unacceptable.
    pub fn connect(endpoint: &ServerEndpoint) -> Result<Self, DictError> {
        debug!(target: CONNECTION_TARGET, %endpoint, "connecting to DICT server");
        let stream = transport::connect(endpoint)?;
        Self::handshake(stream)
    }
}

impl<S: Read + Write> DictionaryConnection<S> {
    /// Reads the server banner from an already-open stream.
    ///
    /// The stream is dropped, and thereby closed, when the banner is not a
    /// success reply.
    ///
    /// # Errors
    ///
    /// Returns [`DictError::Protocol`] for a non-success banner,
    /// [`DictError::MalformedStatus`] for an unparsable one and
    /// [`DictError::ConnectionClosed`] when the stream ends first.
    pub fn handshake(stream: S) -> Result<Self, DictError> {
        let mut connection = Self {
            stream: Some(BufReader::new(stream)),
            state: ConnectionState::Connecting,
            banner: String::new(),
            catalogue: Catalogue::default(),
        };

        let banner = connection.read_status()?;
        if disposition(Exchange::Banner, &banner) != Disposition::Proceed {
            connection.release();
            return Err(protocol_error(banner));
        }

        debug!(target: CONNECTION_TARGET, banner = banner.detail(), "handshake complete");
        connection.banner = banner.into_detail();
        connection.state = ConnectionState::Ready;
        Ok(connection)
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }

    /// Detail text of the server's greeting.
    #[must_use]
    pub fn banner(&self) -> &str {
        &self.banner
    }

    /// Lists the server's databases.
    ///
    /// The first successful call fills the connection's catalogue; later
    /// calls answer from it without contacting the server.
    ///
    /// # Errors
    ///
    /// Fails with [`DictError::IllegalState`] unless the connection is ready,
    /// and with the protocol and stream errors of the exchange otherwise.
    pub fn database_list(&mut self) -> Result<Vec<Database>, DictError> {
        self.ensure_ready()?;
        self.populate_catalogue()?;
        Ok(self.catalogue.databases().to_vec())
    }

    /// Lists the server's matching strategies in the order it sent them.
    ///
    /// # Errors
    ///
    /// Fails with [`DictError::IllegalState`] unless the connection is ready,
    /// and with the protocol and stream errors of the exchange otherwise.
    pub fn strategy_list(&mut self) -> Result<Vec<MatchingStrategy>, DictError> {
        self.ensure_ready()?;
        let rows = self.list("show strat", Exchange::ShowStrategies)?;
        Ok(first_seen(rows.into_iter().map(|(name, description)| {
            MatchingStrategy::new(name, description)
        })))
    }

    /// Finds words in `database` that match `word` under `strategy`.
    ///
    /// Words come back in server order with repeats removed; the database
    /// each match came from is discarded.
    ///
    /// # Errors
    ///
    /// Fails with [`DictError::IllegalState`] unless the connection is ready,
    /// and with the protocol and stream errors of the exchange otherwise.
    pub fn match_list(
        &mut self,
        word: &str,
        strategy: &MatchingStrategy,
        database: &Database,
    ) -> Result<Vec<String>, DictError> {
        self.ensure_ready()?;
        let command = format!(
            "match {} {} {}",
            quote_atom(database.name()),
            quote_atom(strategy.name()),
            quote_atom(word)
        );
        let rows = self.list(&command, Exchange::Match)?;
        Ok(first_seen(rows.into_iter().map(|(_, matched)| matched)))
    }

    /// Retrieves every definition of `word` in `database`.
    ///
    /// The database catalogue is loaded first when it is still empty, since
    /// each definition names its database and is resolved against it.
    ///
    /// # Errors
    ///
    /// Fails with [`DictError::IllegalState`] unless the connection is ready,
    /// with [`DictError::UnknownDatabase`] when a definition names a database
    /// outside the catalogue, and with the protocol and stream errors of the
    /// exchange otherwise. No definitions are returned on failure.
    pub fn definitions(
        &mut self,
        word: &str,
        database: &Database,
    ) -> Result<Vec<Definition>, DictError> {
        self.ensure_ready()?;
        self.populate_catalogue()?;

        let command = format!("define {} {}", quote_atom(database.name()), quote_atom(word));
        self.send(&command)?;
        let opening = self.read_status()?;
        match disposition(Exchange::Define, &opening) {
            Disposition::Proceed => {}
            Disposition::EmptyResult => return Ok(Vec::new()),
            Disposition::Fail => return Err(protocol_error(opening)),
        }

        let count = definition_count(&opening)?;
        let mut definitions = Vec::new();
        for _ in 0..count {
            definitions.push(self.read_definition()?);
        }
        self.read_completion()?;
        Ok(definitions)
    }

    /// Sends `quit` and releases the stream.
    ///
    /// Failures are logged and discarded. Closing an already closed
    /// connection does nothing.
    pub fn close(&mut self) {
        if self.state != ConnectionState::Ready {
            return;
        }
        if let Some(stream) = self.stream.as_mut() {
            let outcome = stream
                .get_mut()
                .write_all(b"quit\r\n")
                .and_then(|()| stream.get_mut().flush());
            match outcome {
                Ok(()) => debug!(target: CONNECTION_TARGET, "sent quit"),
                Err(error) => {
                    warn!(target: CONNECTION_TARGET, %error, "failed to send quit");
                }
            }
        }
        self.release();
    }

    fn populate_catalogue(&mut self) -> Result<(), DictError> {
        if !self.catalogue.is_empty() {
            trace!(target: CONNECTION_TARGET, "database catalogue served from cache");
            return Ok(());
        }
        let rows = self.list("show db", Exchange::ShowDatabases)?;
        for (name, description) in rows {
            self.catalogue.insert(Database::new(name, description));
        }
        Ok(())
    }

    /// Runs a listing exchange and returns the first two atoms of each row.
    fn list(
        &mut self,
        command: &str,
        exchange: Exchange,
    ) -> Result<Vec<(String, String)>, DictError> {
        self.send(command)?;
        let opening = self.read_status()?;
        match disposition(exchange, &opening) {
            Disposition::Proceed => {}
            Disposition::EmptyResult => return Ok(Vec::new()),
            Disposition::Fail => return Err(protocol_error(opening)),
        }

        let mut rows = Vec::new();
        loop {
            let line = self.read_line()?;
            if line == BODY_TERMINATOR {
                break;
            }
            rows.push(leading_pair(line)?);
        }
        self.read_completion()?;
        Ok(rows)
    }

    fn read_definition(&mut self) -> Result<Definition, DictError> {
        let header = self.read_status()?;
        if disposition(Exchange::DefinitionBlock, &header) != Disposition::Proceed {
            return Err(protocol_error(header));
        }

        let (word, database_name) = leading_pair(header.into_detail())?;
        let database = self
            .catalogue
            .get(&database_name)
            .cloned()
            .ok_or(DictError::UnknownDatabase {
                name: database_name,
            })?;

        let mut definition = DefinitionBuilder::new(word, database);
        loop {
            let line = self.read_line()?;
            if line == BODY_TERMINATOR {
                break;
            }
            trace!(target: CONNECTION_TARGET, line = %line, "definition body line");
            definition.push_line(&line);
        }
        Ok(definition.seal())
    }

    fn read_completion(&mut self) -> Result<(), DictError> {
        let completion = self.read_status()?;
        match disposition(Exchange::Completion, &completion) {
            Disposition::Proceed => Ok(()),
            Disposition::EmptyResult | Disposition::Fail => Err(protocol_error(completion)),
        }
    }

    fn ensure_ready(&self) -> Result<(), DictError> {
        match self.state {
            ConnectionState::Ready => Ok(()),
            state => Err(DictError::IllegalState { state }),
        }
    }

    fn send(&mut self, command: &str) -> Result<(), DictError> {
        debug!(target: CONNECTION_TARGET, command, "sending command");
        let stream = self.stream_mut()?.get_mut();
        let outcome = stream
            .write_all(command.as_bytes())
            .and_then(|()| stream.write_all(LINE_ENDING))
            .and_then(|()| stream.flush());
        outcome.map_err(|error| self.stream_lost(Some(error)))
    }

    fn read_status(&mut self) -> Result<Status, DictError> {
        let line = self.read_line()?;
        let status = Status::parse(&line)?;
        debug!(
            target: CONNECTION_TARGET,
            code = status.code(),
            detail = status.detail(),
            "received status"
        );
        Ok(status)
    }

    /// Reads one line without its terminator. Invalid UTF-8 is replaced
    /// rather than rejected so dictionary text always passes through.
    fn read_line(&mut self) -> Result<String, DictError> {
        let mut buffer = Vec::new();
        let read = self
            .stream_mut()?
            .read_until(b'\n', &mut buffer)
            .map_err(Some);
        match read {
            Ok(0) => Err(self.stream_lost(None)),
            Ok(_) => {
                if buffer.last() == Some(&b'\n') {
                    buffer.pop();
                }
                if buffer.last() == Some(&b'\r') {
                    buffer.pop();
                }
                Ok(String::from_utf8_lossy(&buffer).into_owned())
            }
            Err(error) => Err(self.stream_lost(error)),
        }
    }

    fn stream_mut(&mut self) -> Result<&mut BufReader<S>, DictError> {
        let state = self.state;
        self.stream
            .as_mut()
            .ok_or(DictError::IllegalState { state })
    }

    fn stream_lost(&mut self, source: Option<std::io::Error>) -> DictError {
        warn!(
            target: CONNECTION_TARGET,
            error = ?source,
            "stream ended during exchange"
        );
        self.release();
        DictError::ConnectionClosed { source }
    }

    fn release(&mut self) {
        self.stream = None;
        self.state = ConnectionState::Closed;
    }
}

impl<S: Read + Write> Drop for DictionaryConnection<S> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<S: Read + Write> fmt::Debug for DictionaryConnection<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DictionaryConnection")
            .field("state", &self.state)
            .field("banner", &self.banner)
            .field("cached_databases", &self.catalogue.databases().len())
            .finish_non_exhaustive()
    }
}

fn protocol_error(status: Status) -> DictError {
    DictError::Protocol {
        code: status.code(),
        detail: status.into_detail(),
    }
}

fn definition_count(opening: &Status) -> Result<usize, DictError> {
    opening
        .detail()
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<usize>().ok())
        .ok_or_else(|| DictError::MalformedStatus {
            line: opening.to_string(),
        })
}

/// Splits `line` into atoms and keeps the first two.
fn leading_pair(line: String) -> Result<(String, String), DictError> {
    let mut atoms = split_atoms(&line).into_iter();
    match (atoms.next(), atoms.next()) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(DictError::MalformedLine { line }),
    }
}

/// Keeps the first occurrence of each item, preserving order.
fn first_seen<T>(items: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
