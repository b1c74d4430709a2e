mod merkle_roots;

pub use merkle_roots::quorum_merkle_root;

use hashes::Hash;

use crate::hash_types::ProTxHash;
use crate::sml::deterministic::DeterministicMasternodeList;
use crate::sml::masternode_list_entry::MasternodeListEntry;

/// The simplified masternode list at one block (`CSimplifiedMNList`).
///
/// Entries are kept sorted by the raw bytes of their pro reg tx hash; this
/// order defines the leaves of `merkleRootMNList`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SimplifiedMasternodeList {
    entries: Vec<MasternodeListEntry>,
}

impl SimplifiedMasternodeList {
    /// Builds a list from arbitrary entries, sorting them.
    pub fn from_entries(mut entries: Vec<MasternodeListEntry>) -> Self {
        sort_entries(&mut entries);
        SimplifiedMasternodeList { entries }
    }

    /// Projects every masternode of a deterministic list, banned ones included.
    pub fn from_deterministic_list(list: &DeterministicMasternodeList) -> Self {
        let mut entries = Vec::with_capacity(list.all_count());
        list.for_each_masternode(false, |dmn| entries.push(MasternodeListEntry::from(dmn)));
        sort_entries(&mut entries);
        SimplifiedMasternodeList { entries }
    }

    pub fn entries(&self) -> &[MasternodeListEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, pro_reg_tx_hash: &ProTxHash) -> Option<&MasternodeListEntry> {
        self.entries
            .binary_search_by(|e| e.pro_reg_tx_hash.as_byte_array().cmp(pro_reg_tx_hash.as_byte_array()))
            .ok()
            .map(|i| &self.entries[i])
    }
}

fn sort_entries(entries: &mut [MasternodeListEntry]) {
    entries.sort_by(|a, b| a.pro_reg_tx_hash.as_byte_array().cmp(b.pro_reg_tx_hash.as_byte_array()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_types::BlockHash;
    use crate::sml::deterministic::DeterministicMasternode;

    #[test]
    fn deterministic_list_projects_banned_entries_in_raw_byte_order() {
        let mut banned = DeterministicMasternode::dummy(2);
        banned.state.pose_ban_height = Some(7);
        let list = DeterministicMasternodeList::new(BlockHash::dummy(10), 10)
            .with_masternode(DeterministicMasternode::dummy(1))
            .with_masternode(banned)
            .with_masternode(DeterministicMasternode::dummy(256));

        let sml = SimplifiedMasternodeList::from_deterministic_list(&list);
        let ids: Vec<ProTxHash> = sml.entries().iter().map(|e| e.pro_reg_tx_hash).collect();
        // 256 encodes as 00 01 .. and sorts before 1 (01 00 ..).
        assert_eq!(ids, vec![ProTxHash::dummy(256), ProTxHash::dummy(1), ProTxHash::dummy(2)]);
        assert!(!sml.entry(&ProTxHash::dummy(2)).map(|e| e.is_valid).unwrap());
        assert!(sml.entry(&ProTxHash::dummy(3)).is_none());
    }
}
