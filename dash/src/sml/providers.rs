//! Collaborators the diff engine reads chain state from.
//!
//! Every method is a read. Callers are expected to hold whatever lock keeps
//! these views consistent with each other (Dash Core's `cs_main`) for the
//! duration of one diff; nothing here locks.

use std::collections::BTreeMap;
use std::fmt;

use crate::blockdata::block::Block;
use crate::blockdata::transaction::special_transaction::quorum_commitment::QuorumFinalizationCommitment;
use crate::bls_sig_utils::BLSSignature;
use crate::hash_types::{BlockHash, QuorumHash};
use crate::prelude::CoreBlockHeight;
use crate::sml::deterministic::DeterministicMasternodeList;
use crate::sml::llmq_type::LLMQType;

/// A block's identity in the block index.
///
/// Ordered by height, then by hash, so maps keyed by it iterate in chain order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockRef {
    pub height: CoreBlockHeight,
    pub hash: BlockHash,
}

impl BlockRef {
    pub fn new(height: CoreBlockHeight, hash: BlockHash) -> Self {
        BlockRef { height, hash }
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (height {})", self.hash, self.height)
    }
}

/// The block index and active chain.
pub trait ChainView {
    /// Looks a block up by hash, whether or not it is on the active chain.
    fn block_by_hash(&self, hash: &BlockHash) -> Option<BlockRef>;

    fn genesis(&self) -> Option<BlockRef>;

    /// Whether `block` is part of the active chain.
    fn contains(&self, block: &BlockRef) -> bool;

    /// The ancestor of `block` at `height`, `None` if `height` is above `block`.
    fn ancestor(&self, block: &BlockRef, height: CoreBlockHeight) -> Option<BlockRef>;

    /// Whether the v20 deployment (coinbase chainlocks) is active at `block`.
    fn is_v20_active(&self, block: &BlockRef) -> bool;
}

/// The deterministic masternode list store.
pub trait MasternodeListProvider {
    fn list_for_block(&self, block: &BlockRef) -> DeterministicMasternodeList;
}

/// The quorum commitment store.
pub trait QuorumBlockProcessor {
    /// Quorums whose commitments were mined up to and including `block` and
    /// are still active there, as quorum base blocks per quorum type.
    fn mined_and_active_commitments_until(
        &self,
        block: &BlockRef,
    ) -> BTreeMap<LLMQType, Vec<BlockRef>>;

    fn mined_commitment(
        &self,
        llmq_type: LLMQType,
        quorum_hash: &QuorumHash,
    ) -> Option<QuorumFinalizationCommitment>;
}

/// A quorum as known to the quorum manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quorum {
    pub llmq_type: LLMQType,
    pub quorum_hash: QuorumHash,
    /// The quorum's base block; `None` when the index does not know it.
    pub base_block: Option<BlockRef>,
    /// Index of the quorum within its rotation cycle, 0 for non-rotating types.
    pub quorum_index: i16,
}

/// The quorum manager.
pub trait QuorumManager {
    fn quorum(&self, llmq_type: LLMQType, quorum_hash: &QuorumHash) -> Option<Quorum>;
}

/// Block storage.
pub trait BlockStore {
    fn read_block(&self, block: &BlockRef) -> Option<Block>;

    /// The chainlock signature carried by the coinbase of `block`, with the
    /// height difference it refers to. `None` when the block cannot be read,
    /// has no v3 coinbase payload, or carries an all-zero signature.
    fn non_null_coinbase_chainlock(&self, block: &BlockRef) -> Option<(BLSSignature, u32)> {
        let block = self.read_block(block)?;
        block.coinbase()?.coinbase_payload()?.non_null_chainlock()
    }
}

/// Every collaborator one diff needs.
#[derive(Clone, Copy)]
pub struct DiffProviders<'a> {
    pub chain: &'a dyn ChainView,
    pub masternode_lists: &'a dyn MasternodeListProvider,
    pub quorum_block_processor: &'a dyn QuorumBlockProcessor,
    pub quorum_manager: &'a dyn QuorumManager,
    pub block_store: &'a dyn BlockStore,
}

impl<'a> DiffProviders<'a> {
    /// Uses one object for every collaborator.
    pub fn from_state<S>(state: &'a S) -> Self
    where
        S: ChainView + MasternodeListProvider + QuorumBlockProcessor + QuorumManager + BlockStore,
    {
        DiffProviders {
            chain: state,
            masternode_lists: state,
            quorum_block_processor: state,
            quorum_manager: state,
            block_store: state,
        }
    }
}
