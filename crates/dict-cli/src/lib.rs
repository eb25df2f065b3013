//! Command-line runtime for the `dict` lookup tool.
//!
//! The runtime parses arguments, loads layered configuration, installs
//! logging, opens one [`dict_client::DictionaryConnection`] to the configured
//! server, runs a single lookup and renders the result. IO streams and the
//! configuration loader are injectable so tests can drive the whole path.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use dict_client::DictionaryConnection;
use dict_config::Config;
use tracing::debug;

mod cli;
mod command;
mod config;
mod errors;
pub mod output;
mod telemetry;

use cli::Cli;
use command::LookupOutcome;
use config::split_config_arguments;
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;
pub use output::{OutputFormat, ResolvedOutputFormat};

/// CLI flags recognised by the configuration loader.
///
/// Keep in step with the fields of [`dict_config::Config`].
const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--server",
    "--log-filter",
    "--log-format",
];

const CLI_TARGET: &str = "dict_cli";

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E, stdout_is_terminal: bool) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }
}

struct CliRunner<'a, 'io, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'io, W, E>,
    loader: &'a L,
}

impl<'a, 'io, W, E, L> CliRunner<'a, 'io, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    const fn new(io: &'a mut IoStreams<'io, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        match self.try_run(&args) {
            Ok(exit_code) => exit_code,
            Err(error) => {
                let _ = writeln!(self.io.stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }

    fn try_run(&mut self, args: &[OsString]) -> Result<ExitCode, AppError> {
        let split = split_config_arguments(args);
        let cli = match Cli::try_parse_from(split.command_arguments.iter().cloned()) {
            Ok(cli) => cli,
            Err(error) if is_informational(&error) => {
                write!(self.io.stdout, "{error}").map_err(AppError::WriteOutput)?;
                return Ok(ExitCode::SUCCESS);
            }
            Err(error) => return Err(AppError::CliUsage(error)),
        };
        let config = self.loader.load(&split.config_arguments)?;
        telemetry::initialise(&config)?;

        let outcome = lookup(&cli, &config)?;
        let format = cli.output.resolve(self.io.stdout_is_terminal);
        output::write_outcome(&outcome, format, self.io.stdout)?;
        Ok(ExitCode::SUCCESS)
    }
}

/// `--help` and `--version` are reported by clap as errors.
fn is_informational(error: &clap::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

/// Connects, runs the lookup and closes the connection whatever the outcome.
fn lookup(cli: &Cli, config: &Config) -> Result<LookupOutcome, AppError> {
    debug!(target: CLI_TARGET, server = %config.server(), command = ?cli.command, "running lookup");
    let mut connection = DictionaryConnection::connect(config.server())?;
    let outcome = cli.command.execute(&mut connection);
    connection.close();
    outcome.map_err(AppError::from)
}

/// Runs the CLI with the given arguments and IO handles.
///
/// `stdout_is_terminal` decides what `--output auto` resolves to.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E, stdout_is_terminal: bool) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr, stdout_is_terminal);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}

#[cfg(test)]
mod tests;
