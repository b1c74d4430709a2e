//! Chain state held in plain maps.
//!
//! Enough of a node's state to serve `mnlistdiff` requests without a node:
//! an active chain, optional stale blocks, deterministic masternode lists,
//! mined quorum commitments and the quorums built from them.

use std::collections::BTreeMap;

use dash_network::Network;
use hashes::Hash;

use crate::blockdata::block::Block;
use crate::blockdata::transaction::special_transaction::quorum_commitment::QuorumFinalizationCommitment;
use crate::hash_types::{BlockHash, QuorumHash};
use crate::prelude::CoreBlockHeight;
use crate::sml::deterministic::DeterministicMasternodeList;
use crate::sml::llmq_type::LLMQType;
use crate::sml::providers::{
    BlockRef, BlockStore, ChainView, MasternodeListProvider, Quorum, QuorumBlockProcessor,
    QuorumManager,
};

/// A block together with the hash it is indexed under.
///
/// Dash block hashes are X11 over the header, which this crate does not
/// compute, so the hash is supplied alongside the block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockRecord {
    pub hash: BlockHash,
    pub block: Block,
}

/// A quorum whose commitment was mined, and the window in which it is active.
#[derive(Clone, Debug, PartialEq, Eq)]
struct MinedQuorum {
    base_block: BlockRef,
    mined_height: CoreBlockHeight,
    /// First height at which the quorum is no longer active.
    inactive_from: Option<CoreBlockHeight>,
}

impl MinedQuorum {
    fn is_active_at(&self, height: CoreBlockHeight) -> bool {
        self.mined_height <= height && self.inactive_from.is_none_or(|end| height < end)
    }
}

/// Every chain-state collaborator of the diff engine, in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryChainState {
    /// The active chain, indexed by height.
    active_chain: Vec<BlockRecord>,
    /// Blocks known to the index but not on the active chain.
    stale_blocks: BTreeMap<BlockHash, (CoreBlockHeight, Block)>,
    /// Lists by the height they were recorded at; later blocks reuse the last one.
    masternode_lists: BTreeMap<CoreBlockHeight, DeterministicMasternodeList>,
    mined_quorums: BTreeMap<LLMQType, Vec<MinedQuorum>>,
    commitments: BTreeMap<(LLMQType, QuorumHash), QuorumFinalizationCommitment>,
    quorums: BTreeMap<(LLMQType, QuorumHash), Quorum>,
    v20_activation_height: Option<CoreBlockHeight>,
}

impl InMemoryChainState {
    /// An empty state with core v20 never active.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty state using the v20 activation height of `network`.
    pub fn for_network(network: Network) -> Self {
        InMemoryChainState {
            v20_activation_height: Some(network.core_v20_activation_height()),
            ..Self::default()
        }
    }

    pub fn set_v20_activation_height(&mut self, height: Option<CoreBlockHeight>) {
        self.v20_activation_height = height;
    }

    pub fn tip(&self) -> Option<BlockRef> {
        self.active_chain
            .last()
            .map(|record| BlockRef::new(self.active_chain.len() as CoreBlockHeight - 1, record.hash))
    }

    /// Appends a block to the active chain and returns its reference.
    pub fn push_block(&mut self, hash: BlockHash, block: Block) -> BlockRef {
        let height = self.active_chain.len() as CoreBlockHeight;
        self.active_chain.push(BlockRecord { hash, block });
        BlockRef::new(height, hash)
    }

    /// Indexes a block at `height` that is not part of the active chain.
    pub fn add_stale_block(
        &mut self,
        hash: BlockHash,
        height: CoreBlockHeight,
        block: Block,
    ) -> BlockRef {
        self.stale_blocks.insert(hash, (height, block));
        BlockRef::new(height, hash)
    }

    /// Records the masternode list in effect from `list.height()` onwards.
    pub fn set_masternode_list(&mut self, list: DeterministicMasternodeList) {
        self.masternode_lists.insert(list.height(), list);
    }

    /// Records a commitment mined at `mined_height` for the quorum based on
    /// `base_block`, and registers the quorum with the quorum manager.
    ///
    /// The quorum is active from `mined_height` until `inactive_from`, if given.
    pub fn add_mined_commitment(
        &mut self,
        commitment: QuorumFinalizationCommitment,
        base_block: BlockRef,
        mined_height: CoreBlockHeight,
        inactive_from: Option<CoreBlockHeight>,
    ) {
        let key = (commitment.llmq_type, commitment.quorum_hash);
        self.mined_quorums.entry(commitment.llmq_type).or_default().push(MinedQuorum {
            base_block,
            mined_height,
            inactive_from,
        });
        self.quorums.insert(
            key,
            Quorum {
                llmq_type: commitment.llmq_type,
                quorum_hash: commitment.quorum_hash,
                base_block: Some(base_block),
                quorum_index: commitment.quorum_index_or_zero(),
            },
        );
        self.commitments.insert(key, commitment);
    }

    /// Replaces what the quorum manager knows about a quorum.
    pub fn set_quorum(&mut self, quorum: Quorum) {
        self.quorums.insert((quorum.llmq_type, quorum.quorum_hash), quorum);
    }

    /// Drops the stored commitment of a quorum while it stays in the active set.
    pub fn forget_commitment(&mut self, llmq_type: LLMQType, quorum_hash: &QuorumHash) {
        self.commitments.remove(&(llmq_type, *quorum_hash));
    }

    /// Makes the quorum manager unaware of a quorum.
    pub fn forget_quorum(&mut self, llmq_type: LLMQType, quorum_hash: &QuorumHash) {
        self.quorums.remove(&(llmq_type, *quorum_hash));
    }

    fn active_block(&self, block: &BlockRef) -> Option<&BlockRecord> {
        self.active_chain.get(block.height as usize).filter(|record| record.hash == block.hash)
    }
}

impl ChainView for InMemoryChainState {
    fn block_by_hash(&self, hash: &BlockHash) -> Option<BlockRef> {
        self.active_chain
            .iter()
            .position(|record| &record.hash == hash)
            .map(|height| BlockRef::new(height as CoreBlockHeight, *hash))
            .or_else(|| self.stale_blocks.get(hash).map(|(height, _)| BlockRef::new(*height, *hash)))
    }

    fn genesis(&self) -> Option<BlockRef> {
        self.active_chain.first().map(|record| BlockRef::new(0, record.hash))
    }

    fn contains(&self, block: &BlockRef) -> bool {
        self.active_block(block).is_some()
    }

    fn ancestor(&self, block: &BlockRef, height: CoreBlockHeight) -> Option<BlockRef> {
        if height > block.height {
            return None;
        }
        if height == block.height {
            return Some(*block);
        }
        // Stale blocks carry no parent links.
        self.active_block(block)?;
        self.active_chain.get(height as usize).map(|record| BlockRef::new(height, record.hash))
    }

    fn is_v20_active(&self, block: &BlockRef) -> bool {
        self.v20_activation_height.is_some_and(|activation| block.height >= activation)
    }
}

impl MasternodeListProvider for InMemoryChainState {
    fn list_for_block(&self, block: &BlockRef) -> DeterministicMasternodeList {
        match self.masternode_lists.range(..=block.height).next_back() {
            Some((_, list)) => list.at_block(block.hash, block.height),
            None => DeterministicMasternodeList::new(block.hash, block.height),
        }
    }
}

impl QuorumBlockProcessor for InMemoryChainState {
    fn mined_and_active_commitments_until(
        &self,
        block: &BlockRef,
    ) -> BTreeMap<LLMQType, Vec<BlockRef>> {
        self.mined_quorums
            .iter()
            .filter_map(|(llmq_type, mined)| {
                let active: Vec<BlockRef> = mined
                    .iter()
                    .filter(|quorum| quorum.is_active_at(block.height))
                    .map(|quorum| quorum.base_block)
                    .collect();
                (!active.is_empty()).then_some((*llmq_type, active))
            })
            .collect()
    }

    fn mined_commitment(
        &self,
        llmq_type: LLMQType,
        quorum_hash: &QuorumHash,
    ) -> Option<QuorumFinalizationCommitment> {
        self.commitments.get(&(llmq_type, *quorum_hash)).cloned()
    }
}

impl QuorumManager for InMemoryChainState {
    fn quorum(&self, llmq_type: LLMQType, quorum_hash: &QuorumHash) -> Option<Quorum> {
        self.quorums.get(&(llmq_type, *quorum_hash)).cloned()
    }
}

impl BlockStore for InMemoryChainState {
    fn read_block(&self, block: &BlockRef) -> Option<Block> {
        if let Some(record) = self.active_block(block) {
            return Some(record.block.clone());
        }
        self.stale_blocks
            .get(&block.hash)
            .filter(|(height, _)| *height == block.height)
            .map(|(_, stored)| stored.clone())
    }
}

/// The quorum hash of a quorum based on `block`.
pub fn quorum_hash_of(block: &BlockRef) -> QuorumHash {
    QuorumHash::from_byte_array(block.hash.to_byte_array())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(len: u8) -> (InMemoryChainState, Vec<BlockRef>) {
        let mut state = InMemoryChainState::new();
        let refs = (0..len)
            .map(|i| state.push_block(BlockHash::from_byte_array([i + 1; 32]), Block::dummy(i as u32)))
            .collect();
        (state, refs)
    }

    #[test]
    fn ancestors_follow_the_active_chain() {
        let (mut state, refs) = chain(10);
        assert_eq!(state.genesis(), Some(refs[0]));
        assert_eq!(state.tip(), Some(refs[9]));
        assert_eq!(state.ancestor(&refs[9], 3), Some(refs[3]));
        assert_eq!(state.ancestor(&refs[3], 9), None);

        let stale = state.add_stale_block(BlockHash::from_byte_array([0xee; 32]), 5, Block::dummy(5));
        assert_eq!(state.block_by_hash(&stale.hash), Some(stale));
        assert!(!state.contains(&stale));
        assert_eq!(state.ancestor(&stale, 2), None);
        assert!(state.read_block(&stale).is_some());
    }

    #[test]
    fn masternode_lists_carry_forward() {
        let (mut state, refs) = chain(6);
        state.set_masternode_list(DeterministicMasternodeList::new(refs[2].hash, 2));
        assert_eq!(state.list_for_block(&refs[1]).height(), 1);
        let later = state.list_for_block(&refs[5]);
        assert_eq!(later.height(), 5);
        assert_eq!(later.block_hash(), refs[5].hash);
    }

    #[test]
    fn quorums_are_active_in_their_window() {
        let (mut state, refs) = chain(20);
        let commitment = QuorumFinalizationCommitment::dummy(LLMQType::LlmqtypeTest, quorum_hash_of(&refs[4]), 0);
        state.add_mined_commitment(commitment.clone(), refs[4], 6, Some(12));

        assert!(state.mined_and_active_commitments_until(&refs[5]).is_empty());
        let active = state.mined_and_active_commitments_until(&refs[8]);
        assert_eq!(active.get(&LLMQType::LlmqtypeTest), Some(&vec![refs[4]]));
        assert!(state.mined_and_active_commitments_until(&refs[12]).is_empty());

        assert_eq!(
            state.mined_commitment(LLMQType::LlmqtypeTest, &commitment.quorum_hash),
            Some(commitment.clone())
        );
        let quorum = state.quorum(LLMQType::LlmqtypeTest, &commitment.quorum_hash).unwrap();
        assert_eq!(quorum.base_block, Some(refs[4]));
    }

    #[test]
    fn v20_gate_uses_activation_height() {
        let (mut state, refs) = chain(3);
        assert!(!state.is_v20_active(&refs[2]));
        state.set_v20_activation_height(Some(2));
        assert!(!state.is_v20_active(&refs[1]));
        assert!(state.is_v20_active(&refs[2]));
        assert!(InMemoryChainState::for_network(Network::Regtest).is_v20_active(&refs[1]));
    }
}
