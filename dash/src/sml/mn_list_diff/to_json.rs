use dash_network::Network;
use serde_json::{Map, Value, json};

use crate::blockdata::transaction::special_transaction::coinbase::COINBASE_VERSION_MERKLE_ROOT_QUORUMS;
use crate::consensus::serialize_hex;
use crate::network::message_sml::MnListDiff;

impl MnListDiff {
    /// Renders the diff as Dash Core's `protx diff` RPC does.
    ///
    /// The coinbase merkle roots are only present when the coinbase carries a
    /// DIP4 payload, and `quorumsCLSigs` only when chainlock information was
    /// built.
    pub fn to_json(&self, network: Network, extended: bool) -> Value {
        let mut obj = Map::new();
        obj.insert("nVersion".into(), json!(self.version));
        obj.insert("baseBlockHash".into(), json!(self.base_block_hash.to_string()));
        obj.insert("blockHash".into(), json!(self.block_hash.to_string()));
        obj.insert("cbTxMerkleTree".into(), json!(serialize_hex(&self.coinbase_merkle_tree)));
        obj.insert("cbTx".into(), json!(serialize_hex(&self.coinbase_tx)));
        obj.insert(
            "deletedMNs".into(),
            self.deleted_masternodes.iter().map(|hash| json!(hash.to_string())).collect(),
        );
        obj.insert(
            "mnList".into(),
            self.new_masternodes.iter().map(|entry| entry.to_json(network, extended)).collect(),
        );
        obj.insert(
            "deletedQuorums".into(),
            self.deleted_quorums
                .iter()
                .map(|deleted| {
                    json!({
                        "llmqType": deleted.llmq_type.index(),
                        "quorumHash": deleted.quorum_hash.to_string(),
                    })
                })
                .collect(),
        );
        obj.insert(
            "newQuorums".into(),
            self.new_quorums.iter().map(|commitment| commitment.to_json()).collect(),
        );

        if let Some(payload) = self.coinbase_tx.coinbase_payload() {
            obj.insert(
                "merkleRootMNList".into(),
                json!(payload.merkle_root_masternode_list.to_string()),
            );
            if payload.version >= COINBASE_VERSION_MERKLE_ROOT_QUORUMS {
                obj.insert(
                    "merkleRootQuorums".into(),
                    json!(payload.merkle_root_quorums.to_string()),
                );
            }
        }

        if !self.quorums_chainlock_signatures.is_empty() {
            obj.insert(
                "quorumsCLSigs".into(),
                self.quorums_chainlock_signatures
                    .iter()
                    .map(|(signature, indexes)| {
                        let mut group = Map::new();
                        group.insert(signature.to_string(), json!(indexes));
                        Value::Object(group)
                    })
                    .collect(),
            );
        }
        Value::Object(obj)
    }
}
