//! Command-line argument definitions for the `dict` tool.

use clap::{Parser, Subcommand};
use dict_client::ALL_DATABASES;

use crate::output::OutputFormat;

/// Strategy used by `match` when none is given.
pub(crate) const DEFAULT_STRATEGY: &str = "prefix";

/// Command-line interface for the `dict` lookup tool.
#[derive(Parser, Debug)]
#[command(
    name = "dict",
    version,
    about = "Look up words on a DICT (RFC 2229) server",
    disable_help_subcommand = true
)]
pub(crate) struct Cli {
    /// Controls how lookup results are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
    /// The lookup to perform.
    #[command(subcommand)]
    pub(crate) command: LookupCommand,
}

/// Lookups the tool can run against a server.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum LookupCommand {
    /// Lists the databases the server offers.
    Databases,
    /// Lists the matching strategies the server supports.
    Strategies,
    /// Fetches the definitions of a word.
    Define {
        /// Word to define.
        word: String,
        /// Database to search; `*` searches all, `!` stops at the first hit.
        #[arg(long, short = 'd', default_value = ALL_DATABASES)]
        database: String,
    },
    /// Lists words matching a pattern.
    Match {
        /// Word or pattern to match.
        word: String,
        /// Matching strategy, as listed by `dict strategies`.
        #[arg(long, short = 's', default_value = DEFAULT_STRATEGY)]
        strategy: String,
        /// Database to search; `*` searches all, `!` stops at the first hit.
        #[arg(long, short = 'd', default_value = ALL_DATABASES)]
        database: String,
    },
}
