// Rust Dash Library
// Originally written in 2014 by
//     Andrew Poelstra <apoelstra@wpsoftware.net>
//     For Bitcoin
// Updated for Dash in 2022 by
//     The Dash Core Developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! Dash transactions.
//!
//! Only what the masternode list diff needs from a transaction: its consensus
//! serialization (which includes the special transaction payload), its txid,
//! and access to the coinbase payload.
//!

pub mod outpoint;
pub mod special_transaction;
pub mod txin;
pub mod txout;

use std::io;

use hashes::Hash;

pub use crate::blockdata::transaction::outpoint::OutPoint;
use crate::blockdata::transaction::special_transaction::coinbase::CoinbasePayload;
pub use crate::blockdata::transaction::special_transaction::{TransactionPayload, TransactionType};
use crate::blockdata::transaction::txin::TxIn;
use crate::blockdata::transaction::txout::TxOut;
use crate::consensus::{Decodable, Encodable, encode, serialize};
use crate::hash_types::Txid;

/// Transactions of this version or later may carry a special transaction payload (DIP2).
pub const SPECIAL_TRANSACTION_MIN_VERSION: u16 = 3;

/// A Dash transaction, which describes an authenticated movement of coins.
///
/// Dash transactions use a format with a 2-byte version followed by a 2-byte
/// transaction type. Standard transactions have type 0, while special transactions
/// (masternode registration, quorum commitments, etc.) have non-zero types and
/// include additional payload data.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Transaction {
    /// The protocol version.
    pub version: u16,
    /// Block number before which this transaction is valid, or 0 for valid immediately.
    pub lock_time: u32,
    /// List of transaction inputs.
    pub input: Vec<TxIn>,
    /// List of transaction outputs.
    pub output: Vec<TxOut>,
    /// Special Transaction Payload
    pub special_transaction_payload: Option<TransactionPayload>,
}

impl Transaction {
    /// Computes the transaction ID (txid) by double-SHA256 hashing the serialized transaction.
    pub fn txid(&self) -> Txid {
        Txid::hash(&serialize(self))
    }

    /// Get the transaction type. If a classical transaction this would be 0.
    /// Otherwise it is gotten by association from the payload type.
    pub fn tx_type(&self) -> TransactionType {
        TransactionType::from_optional_payload(&self.special_transaction_payload)
    }

    /// Is this a coin base transaction?
    pub fn is_coin_base(&self) -> bool {
        self.input.len() == 1 && self.input[0].previous_output.is_null()
    }

    /// The DIP4 coinbase payload, if this transaction carries one.
    pub fn coinbase_payload(&self) -> Option<&CoinbasePayload> {
        self.special_transaction_payload.as_ref().and_then(TransactionPayload::to_coinbase_payload)
    }
}

impl Encodable for Transaction {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += (self.tx_type() as u16).consensus_encode(w)?;
        len += self.input.consensus_encode(w)?;
        len += self.output.consensus_encode(w)?;
        len += self.lock_time.consensus_encode(w)?;
        if let Some(payload) = &self.special_transaction_payload {
            let mut buf = Vec::new();
            payload.consensus_encode(&mut buf)?;
            // this is so we get the size of the payload
            len += buf.consensus_encode(w)?;
        }
        Ok(len)
    }
}

impl Decodable for Transaction {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let special_transaction_type = TransactionType::try_from(u16::consensus_decode(r)?)?;
        let input = Vec::<TxIn>::consensus_decode(r)?;
        let output = Vec::<TxOut>::consensus_decode(r)?;
        let lock_time = u32::consensus_decode(r)?;
        let special_transaction_payload = match special_transaction_type {
            TransactionType::Classic => None,
            _ if version < SPECIAL_TRANSACTION_MIN_VERSION => {
                return Err(encode::Error::ParseFailed(
                    "special transaction type on a transaction older than version 3",
                ));
            }
            tx_type => {
                let payload = Vec::<u8>::consensus_decode(r)?;
                Some(TransactionPayload::from_bytes(tx_type, payload)?)
            }
        };

        Ok(Transaction {
            version,
            input,
            output,
            lock_time,
            special_transaction_payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use hashes::Hash;

    use super::*;
    use crate::consensus::encode::{deserialize, serialize};
    use crate::hash_types::{MerkleRootMasternodeList, MerkleRootQuorums};
    use crate::bls_sig_utils::BLSSignature;

    const CLASSIC_TX: &str = "0100000001a15d57094aa7a21a28cb20b59aab8fc7d1149a3bdbcddba9c622e4f5f6a99ece010000006c493046022100f93bb0e7d8db7bd46e40132d1f8242026e045f03a0efe71bbb8e3f475e970d790221009337cd7f1f929f00cc6ff01f03729b069a7c21b59b1736ddfee5db5946c5da8c0121033b9b137ee87d5a812d6f506efdd37f0affa7ffc310711c06c7f3e097c9447c52ffffffff0100e1f505000000001976a9140389035a9225b3839e2bbf32d826a1e222031fd888ac00000000";

    #[test]
    fn test_transaction_deserialization() {
        let tx_bytes = hex::decode(CLASSIC_TX).unwrap();
        let realtx: Transaction = deserialize(&tx_bytes).unwrap();
        assert_eq!(realtx.version, 1);
        assert_eq!(realtx.input.len(), 1);
        // In particular this one is easy to get backward -- in dash hashes are encoded
        // as little-endian 256-bit numbers rather than as data strings.
        assert_eq!(
            format!("{:x}", realtx.input[0].previous_output.txid),
            "ce9ea9f6f5e422c6a9dbcddb3b9a14d1c78fab9ab520cb281aa2a74a09575da1".to_string()
        );
        assert_eq!(realtx.input[0].previous_output.vout, 1);
        assert_eq!(realtx.output.len(), 1);
        assert_eq!(realtx.lock_time, 0);
        assert!(!realtx.is_coin_base());
        assert_eq!(realtx.tx_type(), TransactionType::Classic);

        assert_eq!(
            format!("{:x}", realtx.txid()),
            "a6eab3c14ab5272a58a5ba91505ba1a4b6d7a3a9fcbd187b6cd99a7b6d548cb7".to_string()
        );
        assert_eq!(serialize(&realtx), tx_bytes);
    }

    #[test]
    fn test_txid() {
        // A standard Dash transaction
        let tx_bytes = hex::decode(
            "01000000010c7196428403d8b0c88fcb3ee8d64f56f55c8973c9ab7dd106bb4f3527f5888d000000006a47\
             30440220503a696f55f2c00eee2ac5e65b17767cd88ed04866b5637d3c1d5d996a70656d02202c9aff698f\
             343abb6d176704beda63fcdec503133ea4f6a5216b7f925fa9910c0121024d89b5a13d6521388969209df2\
             7a8469bd565aff10e8d42cef931fad5121bfb8ffffffff02b825b404000000001976a914ef79e7ee9fff98\
             bcfd08473d2b76b02a48f8c69088ac0000000000000000296a273236303039343836393731373233313237\
             3633313032313332353630353838373931323132373000000000",
        )
        .unwrap();
        let tx: Transaction = deserialize(&tx_bytes).unwrap();

        assert_eq!(
            format!("{:x}", tx.txid()),
            "971ed48a62c143bbd9c87f4bafa2ef213cfa106c6e140f111931d0be307468dd"
        );
    }

    #[test]
    fn coinbase_special_transaction_round_trip() {
        let tx = Transaction {
            version: 3,
            lock_time: 0,
            input: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig: vec![0x02, 0x10, 0x27].into(),
                sequence: u32::MAX,
            }],
            output: vec![],
            special_transaction_payload: Some(TransactionPayload::CoinbasePayloadType(
                CoinbasePayload {
                    version: 2,
                    height: 10000,
                    merkle_root_masternode_list: MerkleRootMasternodeList::all_zeros(),
                    merkle_root_quorums: MerkleRootQuorums::all_zeros(),
                    best_cl_height_diff: 0,
                    best_cl_signature: BLSSignature::zeroed(),
                    asset_locked_amount: 0,
                },
            )),
        };
        let bytes = serialize(&tx);
        // version 3 and type 5 share the first 32-bit word
        assert_eq!(&bytes[..4], &[3, 0, 5, 0]);
        let decoded: Transaction = deserialize(&bytes).unwrap();
        assert_eq!(decoded, tx);
        assert!(decoded.is_coin_base());
        assert_eq!(decoded.coinbase_payload().map(|p| p.height), Some(10000));
        assert_eq!(decoded.txid(), Txid::hash(&bytes));
    }

    #[test]
    fn special_type_before_version_3_is_rejected() {
        let mut tx_bytes = hex::decode(CLASSIC_TX).unwrap();
        tx_bytes[2] = 5;
        assert!(deserialize::<Transaction>(&tx_bytes).is_err());
    }
}
