//! Transaction outputs.

use crate::blockdata::script::ScriptBuf;
use crate::consensus::encode::impl_vec;
use crate::internal_macros::impl_consensus_encoding;

/// A transaction output, which defines new coins to be created from old ones.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
pub struct TxOut {
    /// The value of the output, in duffs.
    pub value: u64,
    /// The script which must be satisfied for the output to be spent.
    pub script_pubkey: ScriptBuf,
}

impl_consensus_encoding!(TxOut, value, script_pubkey);
impl_vec!(TxOut);
