//! TCP transport for DICT connections.

use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use dict_config::ServerEndpoint;
use tracing::debug;

use crate::connection::CONNECTION_TARGET;
use crate::error::DictError;

/// Upper bound on establishing the TCP connection. Reads and writes on an
/// established connection are not bounded.
pub const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn connect(endpoint: &ServerEndpoint) -> Result<TcpStream, DictError> {
    let failed = |source| DictError::ConnectionFailed {
        endpoint: endpoint.to_string(),
        source,
    };
    let addresses = resolve_addresses(endpoint.host(), endpoint.port()).map_err(failed)?;

    let mut last_error = None;
    for address in addresses {
        debug!(target: CONNECTION_TARGET, %address, "attempting connection");
        match TcpStream::connect_timeout(&address, CONNECTION_TIMEOUT) {
            Ok(stream) => return Ok(stream),
            Err(error) => last_error = Some(error),
        }
    }
    Err(failed(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "no resolved addresses")
    })))
}

fn resolve_addresses(host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
    let addresses: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
    if addresses.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            "no resolved addresses",
        ));
    }
    Ok(addresses)
}
