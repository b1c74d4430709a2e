//! Computes `mnlistdiff` replies from a chain described in a JSON fixture.

pub mod config;
pub mod error;
pub mod fixture;
pub mod logging;

pub use config::{Config, OutputFormat};
pub use error::{CliError, CliResult};

use dash_mnlistdiff::consensus::serialize_hex;
use dash_mnlistdiff::hashes::Hash;
use dash_mnlistdiff::sml::providers::ChainView;
use dash_mnlistdiff::{BlockHash, DiffProviders, build_simplified_mn_list_diff};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Loads the fixture named by `config`, builds the requested diff and renders it.
pub fn run(config: &Config) -> CliResult<String> {
    let fixture = fixture::Fixture::load(&config.fixture_path)?;
    let network = config.network.or(fixture.network).unwrap_or(dash_mnlistdiff::Network::Regtest);
    let mut state = fixture.into_state(network)?;
    if let Some(height) = config.v20_activation_height {
        state.set_v20_activation_height(Some(height));
    }

    let block_hash = match config.block_hash {
        Some(hash) => hash,
        None => state.tip().map(|tip| tip.hash).ok_or(CliError::EmptyChain)?,
    };
    let base_block_hash = config.base_block_hash.unwrap_or(BlockHash::all_zeros());
    tracing::info!(
        "Building mnlistdiff {} -> {} on {} (extended: {})",
        base_block_hash,
        block_hash,
        network,
        config.extended
    );
    tracing::debug!("Chain genesis: {:?}", state.genesis());

    let diff = build_simplified_mn_list_diff(
        base_block_hash,
        block_hash,
        config.extended,
        &DiffProviders::from_state(&state),
    )?;

    Ok(match config.output {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&diff.to_json(network, config.extended))?
        }
        OutputFormat::Hex => serialize_hex(&diff),
    })
}
