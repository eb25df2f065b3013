//! Scripted DICT server for tests.
//!
//! The server accepts a single client on an ephemeral loopback port, sends
//! the banner, then answers each received command line with the next canned
//! reply. `quit` is answered with `221` and ends the session. Every command
//! line is recorded so tests can assert on the exact wire traffic.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use dict_config::ServerEndpoint;

const ACCEPT_DEADLINE: Duration = Duration::from_secs(5);
const ACCEPT_POLL: Duration = Duration::from_millis(10);
const UNEXPECTED_COMMAND: &str = "500 unexpected command";
const FAREWELL: &str = "221 bye";

/// Banner and replies a [`FakeDictServer`] plays back.
#[derive(Debug, Clone)]
pub struct ServerScript {
    banner: String,
    replies: VecDeque<Vec<String>>,
}

impl ServerScript {
    /// Starts a script with the greeting sent on accept.
    #[must_use]
    pub fn new(banner: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
            replies: VecDeque::new(),
        }
    }

    /// Appends the lines sent in answer to the next command.
    #[must_use]
    pub fn reply<I, L>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.replies
            .push_back(lines.into_iter().map(Into::into).collect());
        self
    }
}

impl Default for ServerScript {
    fn default() -> Self {
        Self::new("220 fake.example dictd <auth.mime> <0.0@fake.example>")
    }
}

/// A one-client DICT server running on a background thread.
#[derive(Debug)]
pub struct FakeDictServer {
    port: u16,
    commands: Arc<Mutex<Vec<String>>>,
    handle: Option<thread::JoinHandle<io::Result<()>>>,
}

impl FakeDictServer {
    /// Binds a loopback listener and starts serving `script`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while binding the listener.
    pub fn spawn(script: ServerScript) -> io::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0))?;
        listener.set_nonblocking(true)?;
        let port = listener.local_addr()?.port();
        let commands = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&commands);
        let handle = thread::spawn(move || serve(&listener, script, &recorded));
        Ok(Self {
            port,
            commands,
            handle: Some(handle),
        })
    }

    /// Port the server listens on.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Endpoint a client should connect to.
    #[must_use]
    pub fn endpoint(&self) -> ServerEndpoint {
        ServerEndpoint::new("127.0.0.1", self.port)
    }

    /// Waits for the session to end and returns the received command lines.
    ///
    /// The session ends when the client sends `quit`, closes its stream, or
    /// never connects before the accept deadline.
    ///
    /// # Errors
    ///
    /// Returns the I/O error that stopped the server thread.
    pub fn finish(mut self) -> io::Result<Vec<String>> {
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| io::Error::other("fake DICT server thread panicked"))??;
        }
        Ok(self.recorded())
    }

    fn recorded(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for FakeDictServer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn serve(
    listener: &TcpListener,
    mut script: ServerScript,
    commands: &Mutex<Vec<String>>,
) -> io::Result<()> {
    let Some(stream) = accept(listener)? else {
        return Ok(());
    };
    stream.set_nonblocking(false)?;
    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);

    write_lines(&mut writer, [script.banner.as_str()])?;

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let command = line.trim_end_matches(['\r', '\n']).to_owned();
        let is_quit = command.eq_ignore_ascii_case("quit");
        commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command);

        if is_quit {
            return write_lines(&mut writer, [FAREWELL]).or_else(client_already_gone);
        }
        match script.replies.pop_front() {
            Some(reply) => write_lines(&mut writer, reply.iter().map(String::as_str))?,
            None => write_lines(&mut writer, [UNEXPECTED_COMMAND])?,
        }
    }
}

fn accept(listener: &TcpListener) -> io::Result<Option<TcpStream>> {
    let deadline = Instant::now() + ACCEPT_DEADLINE;
    loop {
        match listener.accept() {
            Ok((stream, _)) => return Ok(Some(stream)),
            Err(ref error)
                if error.kind() == io::ErrorKind::WouldBlock && Instant::now() < deadline =>
            {
                thread::sleep(ACCEPT_POLL);
            }
            // No client arrived; end quietly so tests that never connect
            // do not hang.
            Err(ref error) if error.kind() == io::ErrorKind::WouldBlock => return Ok(None),
            Err(error) => return Err(error),
        }
    }
}

/// Clients may drop the stream straight after `quit` without reading the
/// farewell; that still ends the session cleanly.
fn client_already_gone(error: io::Error) -> io::Result<()> {
    match error.kind() {
        io::ErrorKind::BrokenPipe | io::ErrorKind::ConnectionReset => Ok(()),
        _ => Err(error),
    }
}

fn write_lines<'a>(
    stream: &mut impl Write,
    lines: impl IntoIterator<Item = &'a str>,
) -> io::Result<()> {
    for line in lines {
        stream.write_all(line.as_bytes())?;
        stream.write_all(b"\r\n")?;
    }
    stream.flush()
}
