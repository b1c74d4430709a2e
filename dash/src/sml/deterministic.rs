//! Deterministic masternode list snapshots, as handed out by the list store.
//!
//! Only the state the simplified list projects from is modelled.

use std::collections::BTreeMap;

use crate::blockdata::script::ScriptBuf;
use crate::bls_sig_utils::BLSPublicKey;
use crate::hash_types::{BlockHash, ConfirmedHash, ProTxHash, PubkeyHash};
use crate::prelude::CoreBlockHeight;
use crate::sml::address::ServiceAddress;
use crate::sml::masternode_list_entry::EntryMasternodeType;

/// State version of masternodes whose operator key uses the legacy BLS scheme.
pub const LEGACY_BLS_STATE_VERSION: u16 = 1;
/// State version of masternodes whose operator key uses the basic BLS scheme.
pub const BASIC_BLS_STATE_VERSION: u16 = 2;

/// The mutable state of a registered masternode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeterministicMasternodeState {
    pub version: u16,
    pub registered_height: CoreBlockHeight,
    /// Height at which the masternode was PoSe-banned, `None` while it is not banned.
    pub pose_ban_height: Option<CoreBlockHeight>,
    pub confirmed_hash: ConfirmedHash,
    pub service: ServiceAddress,
    pub pub_key_operator: BLSPublicKey,
    pub key_id_voting: PubkeyHash,
    pub script_payout: ScriptBuf,
    pub script_operator_payout: ScriptBuf,
}

impl DeterministicMasternodeState {
    pub fn is_banned(&self) -> bool {
        self.pose_ban_height.is_some()
    }
}

/// A registered masternode: its identity, type, and current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeterministicMasternode {
    pub pro_tx_hash: ProTxHash,
    pub mn_type: EntryMasternodeType,
    pub state: DeterministicMasternodeState,
}

/// The full masternode list at one block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeterministicMasternodeList {
    block_hash: BlockHash,
    height: CoreBlockHeight,
    masternodes: BTreeMap<ProTxHash, DeterministicMasternode>,
}

impl DeterministicMasternodeList {
    pub fn new(block_hash: BlockHash, height: CoreBlockHeight) -> Self {
        DeterministicMasternodeList { block_hash, height, masternodes: BTreeMap::new() }
    }

    /// Builder-style insert, replacing any masternode with the same pro tx hash.
    pub fn with_masternode(mut self, masternode: DeterministicMasternode) -> Self {
        self.add_masternode(masternode);
        self
    }

    pub fn add_masternode(&mut self, masternode: DeterministicMasternode) {
        self.masternodes.insert(masternode.pro_tx_hash, masternode);
    }

    pub fn remove_masternode(&mut self, pro_tx_hash: &ProTxHash) -> Option<DeterministicMasternode> {
        self.masternodes.remove(pro_tx_hash)
    }

    /// The same masternodes, re-labelled as the list at another block.
    pub fn at_block(&self, block_hash: BlockHash, height: CoreBlockHeight) -> Self {
        DeterministicMasternodeList { block_hash, height, masternodes: self.masternodes.clone() }
    }

    pub fn block_hash(&self) -> BlockHash {
        self.block_hash
    }

    pub fn height(&self) -> CoreBlockHeight {
        self.height
    }

    pub fn masternode(&self, pro_tx_hash: &ProTxHash) -> Option<&DeterministicMasternode> {
        self.masternodes.get(pro_tx_hash)
    }

    pub fn all_count(&self) -> usize {
        self.masternodes.len()
    }

    pub fn valid_count(&self) -> usize {
        self.masternodes.values().filter(|mn| !mn.state.is_banned()).count()
    }

    /// Visits every masternode, or only the non-banned ones when `only_valid`.
    pub fn for_each_masternode<F>(&self, only_valid: bool, mut f: F)
    where
        F: FnMut(&DeterministicMasternode),
    {
        self.masternodes
            .values()
            .filter(|mn| !only_valid || !mn.state.is_banned())
            .for_each(|mn| f(mn));
    }
}
