//! Configuration of one mnlistdiff run.

use std::path::PathBuf;

use dash_mnlistdiff::hashes::Hash;
use dash_mnlistdiff::{BlockHash, Network};
use tracing::level_filters::LevelFilter;

use crate::error::{CliError, CliResult};

/// How the diff is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The `protx diff` JSON rendering.
    #[default]
    Json,
    /// Hex of the `mnlistdiff` wire message.
    Hex,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "hex" => Ok(OutputFormat::Hex),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the chain fixture.
    pub fixture_path: PathBuf,

    /// Network to render addresses for; the fixture's network when `None`.
    pub network: Option<Network>,

    /// Requested base block; `None` asks for the full list.
    pub base_block_hash: Option<BlockHash>,

    /// Requested block; the fixture's tip when `None`.
    pub block_hash: Option<BlockHash>,

    /// Include payout changes and payout addresses.
    pub extended: bool,

    /// Overrides the network's core v20 activation height.
    pub v20_activation_height: Option<u32>,

    pub output: OutputFormat,

    /// Log level; falls back to `RUST_LOG`, then `warn`, when `None`.
    pub log_level: Option<LevelFilter>,
}

impl Config {
    pub fn new(fixture_path: impl Into<PathBuf>) -> Self {
        Config {
            fixture_path: fixture_path.into(),
            network: None,
            base_block_hash: None,
            block_hash: None,
            extended: false,
            v20_activation_height: None,
            output: OutputFormat::default(),
            log_level: None,
        }
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    pub fn with_base_block_hash(mut self, hash: BlockHash) -> Self {
        self.base_block_hash = Some(hash);
        self
    }

    pub fn with_block_hash(mut self, hash: BlockHash) -> Self {
        self.block_hash = Some(hash);
        self
    }

    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    pub fn with_v20_activation_height(mut self, height: u32) -> Self {
        self.v20_activation_height = Some(height);
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Set log level.
    pub fn with_log_level(mut self, level: &str) -> CliResult<Self> {
        let level = level
            .parse::<LevelFilter>()
            .map_err(|_| CliError::Config(format!("invalid log level '{}'", level)))?;
        self.log_level = Some(level);
        Ok(self)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.fixture_path.as_os_str().is_empty() {
            return Err(CliError::Config("fixture path must not be empty".to_string()));
        }
        if self.block_hash.is_some_and(|hash| hash == BlockHash::all_zeros()) {
            return Err(CliError::Config("block hash must not be all zeros".to_string()));
        }
        Ok(())
    }
}
