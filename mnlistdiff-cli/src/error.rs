//! Error types for the mnlistdiff command-line tool.

use std::io;
use std::path::PathBuf;

use dash_mnlistdiff::SmlError;
use dash_mnlistdiff::consensus::encode;
use thiserror::Error;

/// Everything that can stop the tool from printing a diff.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read fixture {path}: {source}")]
    FixtureRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid fixture: {0}")]
    InvalidFixture(String),

    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: String,
        source: encode::Error,
    },

    #[error("The fixture chain has no blocks")]
    EmptyChain,

    #[error("Failed to build mnlistdiff: {0}")]
    Diff(#[from] SmlError),

    #[error("Logging initialization failed: {0}")]
    Logging(String),
}

pub type CliResult<T> = std::result::Result<T, CliError>;
