use crate::blockdata::script::ScriptBuf;
use crate::blockdata::transaction::special_transaction::TransactionPayload;
use crate::blockdata::transaction::special_transaction::coinbase::{
    COINBASE_VERSION_CLSIG_AND_BALANCE, CoinbasePayload,
};
use crate::blockdata::transaction::txin::TxIn;
use crate::blockdata::transaction::txout::TxOut;
use crate::blockdata::transaction::{OutPoint, Transaction};
use crate::bls_sig_utils::BLSSignature;
use crate::hash_types::{MerkleRootMasternodeList, MerkleRootQuorums, Txid};
use hashes::Hash;

impl Transaction {
    /// A coinbase for `height`, special (version 3) when a payload is given.
    pub fn dummy_coinbase(height: u32, payload: Option<CoinbasePayload>) -> Transaction {
        Transaction {
            version: if payload.is_some() { 3 } else { 1 },
            lock_time: 0,
            input: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig: ScriptBuf::from(height.to_le_bytes().to_vec()),
                sequence: 0xffffffff,
            }],
            output: vec![TxOut { value: 500_000_000, script_pubkey: ScriptBuf::new() }],
            special_transaction_payload: payload.map(TransactionPayload::CoinbasePayloadType),
        }
    }

    /// A plain transaction spending output 0 of a transaction derived from `id`.
    pub fn dummy(id: u8) -> Transaction {
        let mut txid_bytes = [id; 32];
        txid_bytes[0] = 1; // This ensures that the txid is not all zeros
        Transaction {
            version: 1,
            lock_time: 0,
            input: vec![TxIn {
                previous_output: OutPoint::new(Txid::from_byte_array(txid_bytes), 0),
                script_sig: ScriptBuf::new(),
                sequence: 0xffffffff,
            }],
            output: vec![TxOut { value: 1000 * id as u64, script_pubkey: ScriptBuf::new() }],
            special_transaction_payload: None,
        }
    }
}

impl CoinbasePayload {
    /// A version 3 payload for `height` carrying `best_cl_signature` for the previous block.
    pub fn dummy(height: u32, best_cl_signature: BLSSignature) -> CoinbasePayload {
        CoinbasePayload {
            version: COINBASE_VERSION_CLSIG_AND_BALANCE,
            height,
            merkle_root_masternode_list: MerkleRootMasternodeList::all_zeros(),
            merkle_root_quorums: MerkleRootQuorums::all_zeros(),
            best_cl_height_diff: 0,
            best_cl_signature,
            asset_locked_amount: 0,
        }
    }
}
