//! Transaction inputs.

use crate::blockdata::script::ScriptBuf;
use crate::blockdata::transaction::outpoint::OutPoint;
use crate::consensus::encode::impl_vec;
use crate::internal_macros::impl_consensus_encoding;

/// A transaction input, which defines old coins to be consumed.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct TxIn {
    /// The reference to the previous output that is being used as an input.
    pub previous_output: OutPoint,
    /// The script which pushes values on the stack which will cause
    /// the referenced output's script to be accepted.
    pub script_sig: ScriptBuf,
    /// The sequence number, which suggests to miners which of two
    /// conflicting transactions should be preferred.
    pub sequence: u32,
}

impl_consensus_encoding!(TxIn, previous_output, script_sig, sequence);
impl_vec!(TxIn);
