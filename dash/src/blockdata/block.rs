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

//! Dash blocks.
//!
//! A block is a bundle of transactions with a proof-of-work attached, which
//! commits to an earlier block to form the blockchain. Block hashes are X11 and
//! are never recomputed here: a block's identity always comes from the block
//! index that handed it out.

use hashes::Hash;

use crate::blockdata::transaction::Transaction;
use crate::consensus::encode::impl_vec;
use crate::hash_types::{BlockHash, TxMerkleNode};
use crate::internal_macros::impl_consensus_encoding;
use crate::merkle_tree::{PartialMerkleTree, compute_merkle_root};

/// Dash block header.
#[derive(Copy, PartialEq, Eq, Clone, Debug, PartialOrd, Ord, Hash)]
pub struct Header {
    /// Block version, now repurposed for soft fork signalling.
    pub version: i32,
    /// Reference to the previous block in the chain.
    pub prev_blockhash: BlockHash,
    /// The root hash of the merkle tree of transactions in the block.
    pub merkle_root: TxMerkleNode,
    /// The timestamp of the block, as claimed by the miner.
    pub time: u32,
    /// The target value below which the blockhash must lie.
    pub bits: u32,
    /// The nonce, selected to obtain a low enough blockhash.
    pub nonce: u32,
}

impl_consensus_encoding!(Header, version, prev_blockhash, merkle_root, time, bits, nonce);

/// A Dash block, which is a collection of transactions with an attached
/// proof of work.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Block {
    /// The block header
    pub header: Header,
    /// List of transactions contained in the block
    pub txdata: Vec<Transaction>,
}

impl_consensus_encoding!(Block, header, txdata);
impl_vec!(Transaction);

impl Block {
    /// Returns the coinbase transaction, if one is present.
    pub fn coinbase(&self) -> Option<&Transaction> {
        self.txdata.first()
    }

    /// Computes the transaction merkle root.
    pub fn compute_merkle_root(&self) -> TxMerkleNode {
        let hashes = self.txdata.iter().map(|tx| tx.txid().to_byte_array()).collect();
        TxMerkleNode::from_byte_array(compute_merkle_root(hashes).0)
    }

    /// Checks if merkle root of header matches merkle root of the transaction list.
    pub fn check_merkle_root(&self) -> bool {
        self.header.merkle_root == self.compute_merkle_root()
    }

    /// Builds the partial merkle tree proving that the coinbase is the first
    /// transaction of this block.
    pub fn coinbase_merkle_tree(&self) -> PartialMerkleTree {
        let txids: Vec<_> = self.txdata.iter().map(Transaction::txid).collect();
        let mut matches = vec![false; txids.len()];
        if let Some(first) = matches.first_mut() {
            *first = true;
        }
        PartialMerkleTree::from_txids(&txids, &matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockdata::transaction::OutPoint;
    use crate::blockdata::transaction::txin::TxIn;
    use crate::blockdata::transaction::txout::TxOut;
    use crate::consensus::{deserialize, serialize};

    fn tx(tag: u8) -> Transaction {
        Transaction {
            version: 1,
            lock_time: 0,
            input: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig: vec![tag].into(),
                sequence: u32::MAX,
            }],
            output: vec![TxOut::default()],
            special_transaction_payload: None,
        }
    }

    fn block(n: u8) -> Block {
        let mut block = Block {
            header: Header {
                version: 0x2000_0000,
                prev_blockhash: BlockHash::all_zeros(),
                merkle_root: TxMerkleNode::all_zeros(),
                time: 0,
                bits: 0,
                nonce: 0,
            },
            txdata: (0..n).map(tx).collect(),
        };
        block.header.merkle_root = block.compute_merkle_root();
        block
    }

    #[test]
    fn header_is_80_bytes() {
        assert_eq!(serialize(&block(1).header).len(), 80);
    }

    #[test]
    fn block_round_trip() {
        let block = block(3);
        assert!(block.check_merkle_root());
        let decoded: Block = deserialize(&serialize(&block)).unwrap();
        assert_eq!(decoded, block);
    }

    #[test]
    fn coinbase_tree_proves_first_transaction() {
        let block = block(5);
        let matched = block.coinbase_merkle_tree().verify(&block.header.merkle_root).unwrap();
        assert_eq!(matched, vec![(0, block.txdata[0].txid())]);
    }
}
