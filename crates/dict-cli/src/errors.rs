//! Error type for the CLI runtime.

use std::io;
use std::sync::Arc;

use dict_client::DictError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Lookup(#[from] DictError),
    #[error("failed to serialise lookup result: {0}")]
    SerialiseOutcome(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}
