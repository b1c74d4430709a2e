//! Building `mnlistdiff` replies.
//!
//! A diff is built in a fixed order: masternode entries, then quorums, then
//! quorum chainlock signatures (v20 only), then the coinbase proof. Every step
//! either succeeds or discards the whole diff.

mod chainlock_info;
mod quorums_diff;
mod to_json;

use hashes::Hash;
use tracing::{debug, warn};

use crate::blockdata::block::Block;
use crate::hash_types::{BlockHash, MerkleRootMasternodeList, TxMerkleNode};
use crate::merkle_tree::MerkleBlockError;
use crate::network::message_sml::MnListDiff;
use crate::sml::deterministic::DeterministicMasternodeList;
use crate::sml::error::SmlError;
use crate::sml::masternode_list_entry::MasternodeListEntry;
use crate::sml::providers::DiffProviders;

/// Computes the entry-level diff between two deterministic lists.
///
/// Masternodes of `to` that are new, or whose simplified entry changed, are
/// listed with their `to` state, in the iteration order of `to`. With
/// `extended`, a change of either payout script also counts. Masternodes of
/// `from` missing from `to` are listed as deleted, in the iteration order of
/// `from`. Banned masternodes are part of both lists.
pub fn build_simplified_diff(
    from: &DeterministicMasternodeList,
    to: &DeterministicMasternodeList,
    extended: bool,
) -> MnListDiff {
    let mut diff = MnListDiff::empty(from.block_hash(), to.block_hash());

    to.for_each_masternode(false, |to_mn| {
        let to_entry = MasternodeListEntry::from(to_mn);
        match from.masternode(&to_mn.pro_tx_hash) {
            None => diff.new_masternodes.push(to_entry),
            Some(from_mn) => {
                let from_entry = MasternodeListEntry::from(from_mn);
                let changed = if extended {
                    !to_entry.eq_extended(&from_entry)
                } else {
                    to_entry != from_entry
                };
                if changed {
                    diff.new_masternodes.push(to_entry);
                }
            }
        }
    });

    from.for_each_masternode(false, |from_mn| {
        if to.masternode(&from_mn.pro_tx_hash).is_none() {
            diff.deleted_masternodes.push(from_mn.pro_tx_hash);
        }
    });

    diff
}

/// Builds the `mnlistdiff` reply to a `getmnlistd(base_block_hash, block_hash)` request.
///
/// An all-zero `base_block_hash` asks for the full list and resolves to the
/// genesis block. The requested `base_block_hash` is echoed unchanged so the
/// requester can match the reply.
///
/// The caller must keep every view in `providers` consistent for the
/// duration of the call (Dash Core holds `cs_main`); nothing here locks.
pub fn build_simplified_mn_list_diff(
    base_block_hash: BlockHash,
    block_hash: BlockHash,
    extended: bool,
    providers: &DiffProviders<'_>,
) -> Result<MnListDiff, SmlError> {
    let chain = providers.chain;

    let base_block = if base_block_hash == BlockHash::all_zeros() {
        chain.genesis()
    } else {
        chain.block_by_hash(&base_block_hash)
    }
    .ok_or(SmlError::BlockNotFound(base_block_hash))?;
    let block = chain.block_by_hash(&block_hash).ok_or(SmlError::BlockNotFound(block_hash))?;

    if !chain.contains(&base_block) || !chain.contains(&block) {
        warn!("mnlistdiff: {} and {} are not both on the active chain", base_block, block);
        return Err(SmlError::NotInSameChain { base: base_block_hash, block: block_hash });
    }
    if base_block.height > block.height {
        return Err(SmlError::BaseBlockHigherThanBlock { base: base_block_hash, block: block_hash });
    }

    let base_list = providers.masternode_lists.list_for_block(&base_block);
    let list = providers.masternode_lists.list_for_block(&block);
    let mut diff = build_simplified_diff(&base_list, &list, extended);
    diff.base_block_hash = base_block_hash;
    debug!(
        "mnlistdiff {} -> {}: {} new or updated masternodes, {} deleted",
        base_block,
        block,
        diff.new_masternodes.len(),
        diff.deleted_masternodes.len()
    );

    diff.build_quorums_diff(&base_block, &block, providers.quorum_block_processor).inspect_err(
        |e| warn!("mnlistdiff {} -> {}: {}", base_block, block, e),
    )?;
    debug!(
        "mnlistdiff {} -> {}: {} new quorums, {} deleted",
        base_block,
        block,
        diff.new_quorums.len(),
        diff.deleted_quorums.len()
    );

    if chain.is_v20_active(&block) {
        diff.build_quorum_chainlock_info(
            &block,
            providers.quorum_manager,
            chain,
            providers.block_store,
        )
        .inspect_err(|e| warn!("mnlistdiff {} -> {}: {}", base_block, block, e))?;
        debug!(
            "mnlistdiff {} -> {}: {} distinct quorum chainlock signatures",
            base_block,
            block,
            diff.quorums_chainlock_signatures.len()
        );
    }

    let block_data = providers.block_store.read_block(&block).ok_or_else(|| {
        warn!("mnlistdiff: failed to read block {} from disk", block);
        SmlError::BlockReadFailed(block.hash)
    })?;
    diff.attach_coinbase(&block_data, block.hash)?;

    Ok(diff)
}

impl MnListDiff {
    /// Sets the coinbase transaction of `block` and the partial merkle tree proving it.
    fn attach_coinbase(&mut self, block: &Block, block_hash: BlockHash) -> Result<(), SmlError> {
        let coinbase = block.coinbase().ok_or(SmlError::MissingCoinbase(block_hash))?;
        self.coinbase_tx = coinbase.clone();
        self.coinbase_merkle_tree = block.coinbase_merkle_tree();
        Ok(())
    }

    /// The masternode list merkle root committed to by the coinbase payload,
    /// if the coinbase carries one.
    pub fn coinbase_merkle_root_mn_list(&self) -> Option<MerkleRootMasternodeList> {
        self.coinbase_tx.coinbase_payload().map(|payload| payload.merkle_root_masternode_list)
    }

    /// Checks that the coinbase proof commits to `block_merkle_root` and
    /// proves exactly `coinbase_tx` at position 0.
    pub fn verify_coinbase_inclusion(
        &self,
        block_merkle_root: &TxMerkleNode,
    ) -> Result<(), MerkleBlockError> {
        let matches = self.coinbase_merkle_tree.verify(block_merkle_root)?;
        match matches.as_slice() {
            [(0, txid)] if *txid == self.coinbase_tx.txid() => Ok(()),
            _ => Err(MerkleBlockError::CoinbaseNotMatched),
        }
    }
}

#[cfg(test)]
mod tests {
    use hashes::Hash;

    use super::*;
    use crate::blockdata::script::ScriptBuf;
    use crate::hash_types::{ConfirmedHash, ProTxHash, PubkeyHash};
    use crate::sml::deterministic::DeterministicMasternode;

    fn list(id: u32, masternodes: impl IntoIterator<Item = DeterministicMasternode>) -> DeterministicMasternodeList {
        masternodes
            .into_iter()
            .fold(DeterministicMasternodeList::new(BlockHash::dummy(id), id), |list, mn| {
                list.with_masternode(mn)
            })
    }

    #[test]
    fn new_changed_and_deleted_masternodes() {
        let mut changed = DeterministicMasternode::dummy(2);
        changed.state.confirmed_hash = ConfirmedHash::from_byte_array([0xcc; 32]);
        let from = list(10, [1, 2, 3].map(DeterministicMasternode::dummy));
        let to = list(20, [DeterministicMasternode::dummy(1), changed.clone(), DeterministicMasternode::dummy(4)]);

        let diff = build_simplified_diff(&from, &to, false);
        assert_eq!(diff.base_block_hash, BlockHash::dummy(10));
        assert_eq!(diff.block_hash, BlockHash::dummy(20));
        let new_ids: Vec<_> = diff.new_masternodes.iter().map(|e| e.pro_reg_tx_hash).collect();
        assert_eq!(new_ids, vec![ProTxHash::dummy(2), ProTxHash::dummy(4)]);
        assert_eq!(diff.new_masternodes[0], MasternodeListEntry::from(&changed));
        assert_eq!(diff.deleted_masternodes, vec![ProTxHash::dummy(3)]);
    }

    #[test]
    fn identical_lists_have_empty_diff() {
        let from = list(10, [1, 2, 3].map(DeterministicMasternode::dummy));
        let diff = build_simplified_diff(&from, &from.at_block(BlockHash::dummy(11), 11), true);
        assert!(diff.new_masternodes.is_empty());
        assert!(diff.deleted_masternodes.is_empty());
    }

    #[test]
    fn payout_changes_only_show_when_extended() {
        let mut repaid = DeterministicMasternode::dummy(1);
        repaid.state.script_payout = ScriptBuf::new_p2pkh(&PubkeyHash::from_byte_array([0xee; 20]));
        let from = list(10, [DeterministicMasternode::dummy(1)]);
        let to = list(20, [repaid]);

        assert!(build_simplified_diff(&from, &to, false).new_masternodes.is_empty());
        let extended = build_simplified_diff(&from, &to, true);
        assert_eq!(extended.new_masternodes.len(), 1);
        assert_eq!(
            extended.new_masternodes[0].payout_script,
            ScriptBuf::new_p2pkh(&PubkeyHash::from_byte_array([0xee; 20]))
        );
    }

    #[test]
    fn banned_masternodes_are_listed_as_invalid() {
        let mut banned = DeterministicMasternode::dummy(1);
        banned.state.pose_ban_height = Some(15);
        let from = list(10, [DeterministicMasternode::dummy(1)]);
        let to = list(20, [banned]);

        let diff = build_simplified_diff(&from, &to, false);
        assert_eq!(diff.new_masternodes.len(), 1);
        assert!(!diff.new_masternodes[0].is_valid);
        assert!(diff.deleted_masternodes.is_empty());
    }
}
