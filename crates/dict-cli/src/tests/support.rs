//! Harness for CLI tests.
//!
//! Runs the CLI in-process against a scripted DICT server with a fixed
//! configuration and captures its output streams.

use std::ffi::OsString;
use std::net::TcpListener;
use std::process::ExitCode;

use anyhow::{Context, Result, ensure};
use dict_client::test_support::{FakeDictServer, ServerScript};
use dict_config::{Config, ServerEndpoint};

use crate::{AppError, ConfigLoader, IoStreams, run_with_loader};

pub(super) const CATALOGUE_REPLY: [&str; 5] = [
    "110 2 databases present",
    "fd \"Freedict: English-Deutsch\"",
    "web1913 \"Webster's Revised Unabridged Dictionary (1913)\"",
    ".",
    "250 ok",
];

pub(super) const APPLE_REPLY: [&str; 8] = [
    "150 2 definitions retrieved",
    "151 \"apple\" fd \"Freedict: English-Deutsch\"",
    "A fruit.",
    ".",
    "151 \"apple\" web1913 \"Webster's Revised Unabridged Dictionary (1913)\"",
    "A tree.",
    ".",
    "250 ok",
];

pub(super) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(super) const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

#[derive(Default)]
pub(super) struct TestWorld {
    pub config: Config,
    pub script: Option<ServerScript>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: Option<ExitCode>,
    pub commands: Vec<String>,
}

impl TestWorld {
    /// Appends a canned reply, creating the script on first use.
    pub fn script_reply<I, L>(&mut self, lines: I)
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let script = self.script.take().unwrap_or_default();
        self.script = Some(script.reply(lines));
    }

    /// Points the configuration at a loopback port nothing listens on.
    pub fn configure_unreachable_server(&mut self) -> Result<()> {
        self.config.server = unused_loopback_endpoint()?;
        Ok(())
    }

    pub fn run(&mut self, command: &str) -> Result<()> {
        self.stdout.clear();
        self.stderr.clear();
        self.commands.clear();

        let server = match self.script.take() {
            Some(script) => {
                let server = FakeDictServer::spawn(script).context("spawn fake DICT server")?;
                self.config.server = server.endpoint();
                Some(server)
            }
            None => None,
        };

        let args = Self::build_args(command);
        let loader = StaticConfigLoader::new(self.config.clone());
        let mut io = IoStreams::new(&mut self.stdout, &mut self.stderr, false);
        self.exit_code = Some(run_with_loader(args, &mut io, &loader));

        if let Some(server) = server {
            self.commands = server.finish().context("fake DICT server failed")?;
        }
        Ok(())
    }

    fn build_args(command: &str) -> Vec<OsString> {
        std::iter::once(OsString::from("dict"))
            .chain(
                command
                    .split_whitespace()
                    .map(|token| OsString::from(token.trim_matches('"'))),
            )
            .collect()
    }

    pub fn stdout_text(&self) -> Result<String> {
        String::from_utf8(self.stdout.clone()).context("stdout is not UTF-8")
    }

    pub fn stderr_text(&self) -> Result<String> {
        String::from_utf8(self.stderr.clone()).context("stderr is not UTF-8")
    }

    pub fn assert_exit(&self, expected: ExitCode) -> Result<()> {
        let exit = self.exit_code.context("CLI has not run")?;
        ensure!(exit == expected, "expected {expected:?}, got {exit:?}");
        Ok(())
    }
}

/// An endpoint on a port that was free a moment ago.
pub(super) fn unused_loopback_endpoint() -> Result<ServerEndpoint> {
    let listener = TcpListener::bind(("127.0.0.1", 0)).context("bind probe listener")?;
    let port = listener.local_addr().context("probe address")?.port();
    drop(listener);
    Ok(ServerEndpoint::new("127.0.0.1", port))
}
