//! JSON description of a chain, loaded into an [`InMemoryChainState`].
//!
//! Blocks and commitments are given as hex of their consensus serialization.
//! Block hashes are given explicitly since they are X11 hashes of the header.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use dash_mnlistdiff::blockdata::script::ScriptBuf;
use dash_mnlistdiff::blockdata::transaction::special_transaction::quorum_commitment::QuorumFinalizationCommitment;
use dash_mnlistdiff::consensus::{Decodable, deserialize};
use dash_mnlistdiff::hashes::Hash;
use dash_mnlistdiff::sml::address::ServiceAddress;
use dash_mnlistdiff::sml::deterministic::{
    BASIC_BLS_STATE_VERSION, DeterministicMasternode, DeterministicMasternodeList,
    DeterministicMasternodeState,
};
use dash_mnlistdiff::sml::masternode_list_entry::EntryMasternodeType;
use dash_mnlistdiff::sml::store::InMemoryChainState;
use dash_mnlistdiff::{
    BLSPublicKey, Block, BlockHash, BlockRef, ConfirmedHash, Network, PlatformNodeId, ProTxHash,
    PubkeyHash,
};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// A chain fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub network: Option<Network>,
    /// Overrides the network's core v20 activation height.
    #[serde(default)]
    pub v20_activation_height: Option<u32>,
    /// The active chain, from genesis.
    pub blocks: Vec<FixtureBlock>,
    #[serde(default)]
    pub stale_blocks: Vec<FixtureStaleBlock>,
    /// Masternode lists; each applies from its height until the next one.
    #[serde(default)]
    pub masternode_lists: Vec<FixtureMasternodeList>,
    #[serde(default)]
    pub quorums: Vec<FixtureQuorum>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureBlock {
    pub hash: String,
    pub block: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureStaleBlock {
    pub hash: String,
    pub height: u32,
    pub block: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureMasternodeList {
    pub height: u32,
    pub masternodes: Vec<FixtureMasternode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureMasternode {
    pub pro_tx_hash: String,
    /// Platform endpoint of an evo masternode; regular masternodes have none.
    #[serde(default)]
    pub platform: Option<FixturePlatform>,
    #[serde(default = "default_state_version")]
    pub state_version: u16,
    #[serde(default)]
    pub registered_height: u32,
    #[serde(default)]
    pub pose_ban_height: Option<u32>,
    pub confirmed_hash: String,
    pub service: String,
    pub pub_key_operator: String,
    pub key_id_voting: String,
    #[serde(default)]
    pub payout_script: String,
    #[serde(default)]
    pub operator_payout_script: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturePlatform {
    pub http_port: u16,
    pub node_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureQuorum {
    pub commitment: String,
    pub base_height: u32,
    pub mined_height: u32,
    #[serde(default)]
    pub inactive_from: Option<u32>,
}

fn default_state_version() -> u16 {
    BASIC_BLS_STATE_VERSION
}

fn parse<T>(what: &str, s: &str) -> CliResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    s.parse().map_err(|e| CliError::InvalidFixture(format!("{} '{}': {}", what, s, e)))
}

fn decode_hex<T: Decodable>(what: &str, s: &str) -> CliResult<T> {
    let bytes =
        hex::decode(s).map_err(|e| CliError::InvalidFixture(format!("{}: {}", what, e)))?;
    deserialize(&bytes).map_err(|source| CliError::Decode { what: what.to_string(), source })
}

fn script(what: &str, s: &str) -> CliResult<ScriptBuf> {
    hex::decode(s)
        .map(ScriptBuf::from)
        .map_err(|e| CliError::InvalidFixture(format!("{}: {}", what, e)))
}

impl Fixture {
    pub fn load(path: &Path) -> CliResult<Fixture> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| CliError::FixtureRead { path: path.to_path_buf(), source })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Builds the chain state, taking the v20 activation height from the
    /// fixture or else from `network`.
    pub fn into_state(self, network: Network) -> CliResult<InMemoryChainState> {
        let mut state = InMemoryChainState::for_network(network);
        if let Some(height) = self.v20_activation_height {
            state.set_v20_activation_height(Some(height));
        }

        let mut hashes = Vec::with_capacity(self.blocks.len());
        for (height, block) in self.blocks.iter().enumerate() {
            let hash: BlockHash = parse("block hash", &block.hash)?;
            let decoded: Block = decode_hex(&format!("block {}", height), &block.block)?;
            state.push_block(hash, decoded);
            hashes.push(hash);
        }
        let block_at = |height: u32| -> CliResult<BlockRef> {
            hashes
                .get(height as usize)
                .map(|hash| BlockRef::new(height, *hash))
                .ok_or_else(|| CliError::InvalidFixture(format!("no block at height {}", height)))
        };

        for stale in &self.stale_blocks {
            let hash: BlockHash = parse("stale block hash", &stale.hash)?;
            let block: Block = decode_hex(&format!("stale block {}", hash), &stale.block)?;
            state.add_stale_block(hash, stale.height, block);
        }

        for list in &self.masternode_lists {
            let block = block_at(list.height)?;
            let mut dml = DeterministicMasternodeList::new(block.hash, block.height);
            for masternode in &list.masternodes {
                dml.add_masternode(masternode.to_masternode()?);
            }
            state.set_masternode_list(dml);
        }

        for quorum in &self.quorums {
            let commitment: QuorumFinalizationCommitment =
                decode_hex("quorum commitment", &quorum.commitment)?;
            let base_block = block_at(quorum.base_height)?;
            if commitment.quorum_hash.to_byte_array() != base_block.hash.to_byte_array() {
                return Err(CliError::InvalidFixture(format!(
                    "quorum {} is not based on block {}",
                    commitment.quorum_hash, base_block
                )));
            }
            tracing::debug!(
                "Quorum {} of type {} mined at height {}",
                commitment.quorum_hash,
                commitment.llmq_type,
                quorum.mined_height
            );
            state.add_mined_commitment(
                commitment,
                base_block,
                quorum.mined_height,
                quorum.inactive_from,
            );
        }
        Ok(state)
    }
}

impl FixtureMasternode {
    fn to_masternode(&self) -> CliResult<DeterministicMasternode> {
        let mn_type = match &self.platform {
            None => EntryMasternodeType::Regular,
            Some(platform) => EntryMasternodeType::HighPerformance {
                platform_http_port: platform.http_port,
                platform_node_id: parse::<PlatformNodeId>("platform node id", &platform.node_id)?,
            },
        };
        Ok(DeterministicMasternode {
            pro_tx_hash: parse::<ProTxHash>("pro tx hash", &self.pro_tx_hash)?,
            mn_type,
            state: DeterministicMasternodeState {
                version: self.state_version,
                registered_height: self.registered_height,
                pose_ban_height: self.pose_ban_height,
                confirmed_hash: parse::<ConfirmedHash>("confirmed hash", &self.confirmed_hash)?,
                service: parse::<ServiceAddress>("service", &self.service)?,
                pub_key_operator: parse::<BLSPublicKey>("operator key", &self.pub_key_operator)?,
                key_id_voting: parse::<PubkeyHash>("voting key id", &self.key_id_voting)?,
                script_payout: script("payout script", &self.payout_script)?,
                script_operator_payout: script(
                    "operator payout script",
                    &self.operator_payout_script,
                )?,
            },
        })
    }
}
