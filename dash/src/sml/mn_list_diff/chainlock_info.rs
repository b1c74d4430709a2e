use std::collections::{BTreeMap, BTreeSet};

use crate::bls_sig_utils::BLSSignature;
use crate::network::message_sml::MnListDiff;
use crate::sml::error::SmlError;
use crate::sml::llmq_type::WORK_DIFF_DEPTH;
use crate::sml::providers::{BlockRef, BlockStore, ChainView, QuorumManager};

impl MnListDiff {
    /// Fills `quorums_chainlock_signatures`: for every new quorum, the
    /// chainlock signature its members worked on.
    ///
    /// That signature sits in the coinbase of the ancestor of `block` at
    /// `base height - quorum index - WORK_DIFF_DEPTH`, so all quorums of one
    /// rotation cycle share it. Each such block is read once. Quorums whose
    /// block carries no chainlock are grouped under the all-zero signature.
    pub fn build_quorum_chainlock_info(
        &mut self,
        block: &BlockRef,
        quorum_manager: &dyn QuorumManager,
        chain: &dyn ChainView,
        block_store: &dyn BlockStore,
    ) -> Result<(), SmlError> {
        let mut indexes_by_work_block: BTreeMap<BlockRef, BTreeSet<u16>> = BTreeMap::new();

        for (index, commitment) in self.new_quorums.iter().enumerate() {
            let llmq_type = commitment.llmq_type;
            let quorum_hash = commitment.quorum_hash;
            let fail = |reason: String| SmlError::CommitteeResolution {
                llmq_type,
                quorum_hash,
                reason,
            };

            let quorum = quorum_manager
                .quorum(llmq_type, &quorum_hash)
                .ok_or_else(|| fail("quorum not found".to_string()))?;
            let base_block = quorum
                .base_block
                .ok_or_else(|| fail("quorum base block not found".to_string()))?;

            let work_height = i64::from(base_block.height)
                - i64::from(quorum.quorum_index)
                - i64::from(WORK_DIFF_DEPTH);
            let work_block = u32::try_from(work_height)
                .ok()
                .and_then(|height| chain.ancestor(block, height))
                .ok_or_else(|| fail(format!("no ancestor of {} at height {}", block, work_height)))?;
            let index = u16::try_from(index)
                .map_err(|_| fail(format!("new quorum index {} does not fit in u16", index)))?;

            indexes_by_work_block.entry(work_block).or_default().insert(index);
        }

        for (work_block, indexes) in indexes_by_work_block {
            let signature = block_store
                .non_null_coinbase_chainlock(&work_block)
                .map(|(signature, _)| signature)
                .unwrap_or(BLSSignature::zeroed());
            // Different blocks can carry the same signature, or none at all.
            self.quorums_chainlock_signatures.entry(signature).or_default().extend(indexes);
        }
        Ok(())
    }
}
