//! Rendering of lookup results.
//!
//! Results are written either as aligned plain text for people or as one
//! pretty-printed JSON document for scripts.

mod human;

use std::io::Write;

use clap::ValueEnum;

use crate::AppError;
use crate::command::LookupOutcome;

use human::render_human;

/// Output format selection for lookup results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render human-readable output.
    Human,
    /// Always emit JSON.
    Json,
}

/// Output format after resolving `auto` against the terminal state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Aligned plain text.
    Human,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto if stdout_is_terminal => ResolvedOutputFormat::Human,
            Self::Auto | Self::Json => ResolvedOutputFormat::Json,
            Self::Human => ResolvedOutputFormat::Human,
        }
    }
}

/// Writes `outcome` to `stdout` in the chosen format.
pub(crate) fn write_outcome<W: Write>(
    outcome: &LookupOutcome,
    format: ResolvedOutputFormat,
    stdout: &mut W,
) -> Result<(), AppError> {
    match format {
        ResolvedOutputFormat::Human => stdout
            .write_all(render_human(outcome).as_bytes())
            .map_err(AppError::WriteOutput)?,
        ResolvedOutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *stdout, outcome)
                .map_err(AppError::SerialiseOutcome)?;
            stdout.write_all(b"\n").map_err(AppError::WriteOutput)?;
        }
    }
    stdout.flush().map_err(AppError::WriteOutput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dict_client::Database;
    use rstest::rstest;

    #[rstest]
    #[case(OutputFormat::Auto, true, ResolvedOutputFormat::Human)]
    #[case(OutputFormat::Auto, false, ResolvedOutputFormat::Json)]
    #[case(OutputFormat::Human, false, ResolvedOutputFormat::Human)]
    #[case(OutputFormat::Json, true, ResolvedOutputFormat::Json)]
    fn resolves_auto_by_terminal(
        #[case] format: OutputFormat,
        #[case] terminal: bool,
        #[case] expected: ResolvedOutputFormat,
    ) {
        assert_eq!(format.resolve(terminal), expected);
    }

    #[test]
    fn json_output_is_tagged_by_kind() {
        let outcome = LookupOutcome::Databases {
            databases: vec![Database::new("fd", "Freedict")],
        };
        let mut stdout = Vec::new();
        write_outcome(&outcome, ResolvedOutputFormat::Json, &mut stdout).expect("render json");

        let value: serde_json::Value = serde_json::from_slice(&stdout).expect("valid json");
        assert_eq!(value["kind"], "databases");
        assert_eq!(value["databases"][0]["name"], "fd");
        assert_eq!(value["databases"][0]["description"], "Freedict");
        assert!(stdout.ends_with(b"}\n"));
    }
}
