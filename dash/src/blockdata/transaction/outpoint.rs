//! Transaction outpoints.

use hashes::Hash;

use crate::hash_types::Txid;
use crate::internal_macros::impl_consensus_encoding;

/// A reference to a transaction output.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct OutPoint {
    /// The referenced transaction's txid.
    pub txid: Txid,
    /// The index of the referenced output in its transaction's vout.
    pub vout: u32,
}

impl_consensus_encoding!(OutPoint, txid, vout);

impl OutPoint {
    /// Creates a new [`OutPoint`].
    pub fn new(txid: Txid, vout: u32) -> OutPoint {
        OutPoint { txid, vout }
    }

    /// Creates a "null" `OutPoint`, the previous output of every coinbase input.
    pub fn null() -> OutPoint {
        OutPoint { txid: Txid::all_zeros(), vout: u32::MAX }
    }

    /// Checks if an `OutPoint` is "null".
    pub fn is_null(&self) -> bool {
        *self == OutPoint::null()
    }
}
