use std::collections::BTreeSet;

use hashes::Hash;

use crate::hash_types::QuorumHash;
use crate::network::message_sml::{DeletedQuorum, MnListDiff};
use crate::sml::error::SmlError;
use crate::sml::llmq_type::LLMQType;
use crate::sml::providers::{BlockRef, QuorumBlockProcessor};

/// Active quorums at `block`, as `(type, quorum hash)` pairs.
fn active_quorums(
    block: &BlockRef,
    quorum_block_processor: &dyn QuorumBlockProcessor,
) -> BTreeSet<(LLMQType, QuorumHash)> {
    quorum_block_processor
        .mined_and_active_commitments_until(block)
        .into_iter()
        .flat_map(|(llmq_type, base_blocks)| {
            base_blocks.into_iter().map(move |base_block| {
                (llmq_type, QuorumHash::from_byte_array(base_block.hash.to_byte_array()))
            })
        })
        .collect()
}

impl MnListDiff {
    /// Fills `deleted_quorums` and `new_quorums` with the change of the active
    /// quorum set between `base_block` and `block`.
    ///
    /// Both lists are ordered by quorum type, then quorum hash. New quorums
    /// carry their full mined commitment; a quorum whose commitment cannot
    /// be found fails the diff.
    pub fn build_quorums_diff(
        &mut self,
        base_block: &BlockRef,
        block: &BlockRef,
        quorum_block_processor: &dyn QuorumBlockProcessor,
    ) -> Result<(), SmlError> {
        let base_quorums = active_quorums(base_block, quorum_block_processor);
        let quorums = active_quorums(block, quorum_block_processor);

        self.deleted_quorums.extend(
            base_quorums
                .difference(&quorums)
                .map(|&(llmq_type, quorum_hash)| DeletedQuorum { llmq_type, quorum_hash }),
        );

        for &(llmq_type, quorum_hash) in quorums.difference(&base_quorums) {
            let commitment = quorum_block_processor
                .mined_commitment(llmq_type, &quorum_hash)
                .ok_or(SmlError::CommitmentResolution { llmq_type, quorum_hash })?;
            self.new_quorums.push(commitment);
        }
        Ok(())
    }
}
