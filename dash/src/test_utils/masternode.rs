use std::net::{IpAddr, Ipv4Addr};

use hashes::Hash;

use crate::blockdata::script::ScriptBuf;
use crate::bls_sig_utils::BLSPublicKey;
use crate::hash_types::{ConfirmedHash, PlatformNodeId, ProTxHash, PubkeyHash};
use crate::sml::address::ServiceAddress;
use crate::sml::deterministic::{
    BASIC_BLS_STATE_VERSION, DeterministicMasternode, DeterministicMasternodeState,
};
use crate::sml::masternode_list_entry::EntryMasternodeType;

impl DeterministicMasternode {
    /// A regular, valid masternode identified by `ProTxHash::dummy(id)`.
    pub fn dummy(id: u32) -> Self {
        let byte = id as u8;
        DeterministicMasternode {
            pro_tx_hash: ProTxHash::dummy(id),
            mn_type: EntryMasternodeType::Regular,
            state: DeterministicMasternodeState {
                version: BASIC_BLS_STATE_VERSION,
                registered_height: 1,
                pose_ban_height: None,
                confirmed_hash: ConfirmedHash::from_byte_array([byte; 32]),
                service: ServiceAddress::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, byte)), 9999),
                pub_key_operator: BLSPublicKey::from([byte; 48]),
                key_id_voting: PubkeyHash::from_byte_array([byte; 20]),
                script_payout: ScriptBuf::new_p2pkh(&PubkeyHash::from_byte_array([byte; 20])),
                script_operator_payout: ScriptBuf::new(),
            },
        }
    }

    /// An evo (high performance) masternode identified by `ProTxHash::dummy(id)`.
    pub fn dummy_evo(id: u32) -> Self {
        let mut masternode = DeterministicMasternode::dummy(id);
        masternode.mn_type = EntryMasternodeType::HighPerformance {
            platform_http_port: 443,
            platform_node_id: PlatformNodeId::from_byte_array([id as u8; 20]),
        };
        masternode
    }
}
