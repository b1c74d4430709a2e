use hashes::Hash;

use crate::blockdata::transaction::special_transaction::quorum_commitment::QuorumFinalizationCommitment;
use crate::hash_types::{MerkleRootMasternodeList, MerkleRootQuorums};
use crate::merkle_tree::{compute_merkle_root, compute_sorted_merkle_root};
use crate::sml::masternode_list::SimplifiedMasternodeList;

impl SimplifiedMasternodeList {
    /// Entry hashes in list order: the leaves of `merkleRootMNList`.
    pub fn hashes_for_merkle_root(&self) -> Vec<[u8; 32]> {
        self.entries.iter().map(|entry| entry.calculate_entry_hash().to_byte_array()).collect()
    }

    /// Merkle root over the entry hashes, and whether the tree was mutated
    /// (two identical siblings were hashed together).
    pub fn calculate_merkle_root(&self) -> (MerkleRootMasternodeList, bool) {
        let (root, mutated) = compute_merkle_root(self.hashes_for_merkle_root());
        (MerkleRootMasternodeList::from_byte_array(root), mutated)
    }
}

/// Merkle root over the sorted hashes of the given final commitments, the
/// value a coinbase commits to as `merkleRootQuorums` for the active quorums.
pub fn quorum_merkle_root<'a, I>(commitments: I) -> MerkleRootQuorums
where
    I: IntoIterator<Item = &'a QuorumFinalizationCommitment>,
{
    let hashes =
        commitments.into_iter().map(|qc| qc.calculate_entry_hash().to_byte_array()).collect();
    MerkleRootQuorums::from_byte_array(compute_sorted_merkle_root(hashes).0)
}

#[cfg(test)]
mod tests {
    use hashes::Hash;

    use super::*;
    use crate::blockdata::script::ScriptBuf;
    use crate::bls_sig_utils::{BLSPublicKey, BLSSignature};
    use crate::hash_types::{ConfirmedHash, ProTxHash, PubkeyHash, QuorumHash, QuorumVVecHash};
    use crate::sml::llmq_type::LLMQType;
    use crate::sml::masternode_list_entry::{
        EntryMasternodeType, MasternodeListEntry, MasternodeListEntryVersion,
    };

    fn entry(id: u8) -> MasternodeListEntry {
        MasternodeListEntry {
            version: MasternodeListEntryVersion::Basic,
            pro_reg_tx_hash: ProTxHash::from_byte_array([id; 32]),
            confirmed_hash: ConfirmedHash::from_byte_array([id; 32]),
            service_address: format!("10.0.0.{}:9999", id).parse().unwrap(),
            operator_public_key: BLSPublicKey::from([id; 48]),
            key_id_voting: PubkeyHash::from_byte_array([id; 20]),
            is_valid: true,
            mn_type: EntryMasternodeType::Regular,
            payout_script: ScriptBuf::new(),
            operator_payout_script: ScriptBuf::new(),
        }
    }

    fn commitment(id: u8) -> QuorumFinalizationCommitment {
        QuorumFinalizationCommitment {
            version: 1,
            llmq_type: LLMQType::LlmqtypeTest,
            quorum_hash: QuorumHash::from_byte_array([id; 32]),
            quorum_index: None,
            signers: vec![true; 3],
            valid_members: vec![true; 3],
            quorum_public_key: BLSPublicKey::from([id; 48]),
            quorum_vvec_hash: QuorumVVecHash::all_zeros(),
            quorum_sig: BLSSignature::zeroed(),
            sig: BLSSignature::zeroed(),
        }
    }

    #[test]
    fn root_is_independent_of_insertion_order() {
        let a = SimplifiedMasternodeList::from_entries(vec![entry(3), entry(1), entry(2)]);
        let b = SimplifiedMasternodeList::from_entries(vec![entry(1), entry(2), entry(3)]);
        assert_eq!(a, b);
        assert_eq!(a.calculate_merkle_root(), b.calculate_merkle_root());
        assert!(!a.calculate_merkle_root().1);
    }

    #[test]
    fn single_field_change_changes_the_root() {
        let a = SimplifiedMasternodeList::from_entries(vec![entry(1), entry(2)]);
        let mut changed = entry(2);
        changed.is_valid = false;
        let b = SimplifiedMasternodeList::from_entries(vec![entry(1), changed]);
        assert_ne!(a.calculate_merkle_root().0, b.calculate_merkle_root().0);
    }

    #[test]
    fn empty_list_has_zero_root() {
        let (root, mutated) = SimplifiedMasternodeList::default().calculate_merkle_root();
        assert_eq!(root, MerkleRootMasternodeList::all_zeros());
        assert!(!mutated);
    }

    #[test]
    fn quorum_root_sorts_commitment_hashes() {
        let forward = quorum_merkle_root(&[commitment(1), commitment(2), commitment(3)]);
        let backward = quorum_merkle_root(&[commitment(3), commitment(2), commitment(1)]);
        assert_eq!(forward, backward);
        assert_eq!(quorum_merkle_root(&Vec::<QuorumFinalizationCommitment>::new()), MerkleRootQuorums::all_zeros());
    }
}
