//! Output format of the diagnostic log stream.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How log events are formatted on stderr.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One line per event, for terminals.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

/// Errors encountered while parsing a [`LogFormat`] from text.
pub type LogFormatParseError = strum::ParseError;
