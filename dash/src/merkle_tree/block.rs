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

//! Partial merkle trees (BIP37).
//!
//! An `mnlistdiff` proves that its coinbase transaction belongs to the target
//! block with a partial merkle tree matching only the first transaction.
//!
//! The tree is serialized as the number of transactions, the hashes used in
//! depth-first order, and the flag bits packed LSB-first. Flag bits mark, for
//! every node visited, whether it is the parent of a matched transaction.

use std::io;

use hashes::Hash;
use thiserror::Error;

use super::parent_hash;
use crate::consensus::encode::{self, Decodable, Encodable};
use crate::hash_types::{TxMerkleNode, Txid};

/// Upper bound on transactions in a block: maximum block size over minimum transaction size.
const MAX_TRANSACTIONS: u32 = 2_000_000 / 60;

/// An error when verifying a partial merkle tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleBlockError {
    /// Merkle root in the header doesn't match the one computed from the tree.
    #[error("merkle header root doesn't match to the root calculated from the partial merkle tree")]
    MerkleRootMismatch,
    /// Partial merkle tree contains no transactions.
    #[error("partial merkle tree contains no transactions")]
    NoTransactions,
    /// There are too many transactions.
    #[error("too many transactions")]
    TooManyTransactions,
    /// General format error.
    #[error("proof contains more hashes than transactions")]
    TooManyHashes,
    #[error("proof contains less bits than hashes")]
    NotEnoughBits,
    #[error("not all bit were consumed")]
    NotAllBitsConsumed,
    #[error("not all hashes were consumed")]
    NotAllHashesConsumed,
    #[error("overflowed the bits array")]
    BitsArrayOverflow,
    #[error("overflowed the hashes array")]
    HashesArrayOverflow,
    /// Two identical siblings were found (CVE-2012-2459).
    #[error("found identical transaction hashes")]
    IdenticalHashesFound,
    /// The tree proves something other than exactly the coinbase transaction.
    #[error("proof does not match exactly the coinbase transaction")]
    CoinbaseNotMatched,
}

/// Data structure that represents a partial merkle tree.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct PartialMerkleTree {
    /// The total number of transactions in the block
    num_transactions: u32,
    /// node-is-parent-of-matched-txid bits
    bits: Vec<bool>,
    /// Transaction ids and internal hashes
    hashes: Vec<TxMerkleNode>,
}

impl PartialMerkleTree {
    /// Returns the total number of transactions in the block.
    pub fn num_transactions(&self) -> u32 {
        self.num_transactions
    }

    /// Returns the node-is-parent-of-matched-txid bits of the partial merkle tree.
    pub fn bits(&self) -> &Vec<bool> {
        &self.bits
    }

    /// Returns the transaction ids and internal hashes of the partial merkle tree.
    pub fn hashes(&self) -> &Vec<TxMerkleNode> {
        &self.hashes
    }

    /// Construct a partial merkle tree
    /// The `txids` are the transaction hashes of the block and the `matches` is the contains flags
    /// wherever a tx hash should be included in the proof. Indexes missing from `matches` count
    /// as not matched.
    pub fn from_txids(txids: &[Txid], matches: &[bool]) -> Self {
        let mut pmt = PartialMerkleTree {
            num_transactions: txids.len() as u32,
            bits: Vec::with_capacity(txids.len()),
            hashes: vec![],
        };
        if txids.is_empty() {
            return pmt;
        }
        let height = pmt.calc_tree_height();

        // traverse the partial tree
        pmt.traverse_and_build(height, 0, txids, matches);
        pmt
    }

    /// Extract the matching txid's represented by this partial merkle tree
    /// and their respective indices within the partial tree.
    /// returns the merkle root, or error in case of failure
    pub fn extract_matches(
        &self,
        matches: &mut Vec<Txid>,
        indexes: &mut Vec<u32>,
    ) -> Result<TxMerkleNode, MerkleBlockError> {
        matches.clear();
        indexes.clear();
        // An empty set will not work
        if self.num_transactions == 0 {
            return Err(MerkleBlockError::NoTransactions);
        };
        // check for excessively high numbers of transactions
        if self.num_transactions > MAX_TRANSACTIONS {
            return Err(MerkleBlockError::TooManyTransactions);
        }
        // there can never be more hashes provided than one for every txid
        if self.hashes.len() as u32 > self.num_transactions {
            return Err(MerkleBlockError::TooManyHashes);
        };
        // there must be at least one bit per node in the partial tree, and at least one node per hash
        if self.bits.len() < self.hashes.len() {
            return Err(MerkleBlockError::NotEnoughBits);
        };

        let height = self.calc_tree_height();

        // traverse the partial tree
        let mut bits_used = 0u32;
        let mut hash_used = 0u32;
        let hash_merkle_root =
            self.traverse_and_extract(height, 0, &mut bits_used, &mut hash_used, matches, indexes)?;
        // Verify that all bits were consumed (except for the padding caused by
        // serializing it as a byte sequence)
        if bits_used.div_ceil(8) != (self.bits.len() as u32).div_ceil(8) {
            return Err(MerkleBlockError::NotAllBitsConsumed);
        }
        // Verify that all hashes were consumed
        if hash_used != self.hashes.len() as u32 {
            return Err(MerkleBlockError::NotAllHashesConsumed);
        }
        Ok(hash_merkle_root)
    }

    /// Checks that the tree commits to `merkle_root` and returns the matched
    /// transactions with their positions in the block.
    pub fn verify(
        &self,
        merkle_root: &TxMerkleNode,
    ) -> Result<Vec<(u32, Txid)>, MerkleBlockError> {
        let mut matches = Vec::new();
        let mut indexes = Vec::new();
        let root = self.extract_matches(&mut matches, &mut indexes)?;
        if &root != merkle_root {
            return Err(MerkleBlockError::MerkleRootMismatch);
        }
        Ok(indexes.into_iter().zip(matches).collect())
    }

    fn calc_tree_height(&self) -> u32 {
        let mut height = 0;
        while self.calc_tree_width(height) > 1 {
            height += 1;
        }
        height
    }

    /// Helper function to efficiently calculate the number of nodes at given height
    /// in the merkle tree
    #[inline]
    fn calc_tree_width(&self, height: u32) -> u32 {
        (self.num_transactions + (1 << height) - 1) >> height
    }

    /// Calculate the hash of a node in the merkle tree (at leaf level: the txid's themselves)
    fn calc_hash(&self, height: u32, pos: u32, txids: &[Txid]) -> TxMerkleNode {
        if height == 0 {
            // Hash at height 0 is the txid itself
            TxMerkleNode::from_byte_array(txids[pos as usize].to_byte_array())
        } else {
            // Calculate left hash
            let left = self.calc_hash(height - 1, pos * 2, txids);
            // Calculate right hash if not beyond the end of the array - copy left hash otherwise
            let right = if pos * 2 + 1 < self.calc_tree_width(height - 1) {
                self.calc_hash(height - 1, pos * 2 + 1, txids)
            } else {
                left
            };
            // Combine subhashes
            PartialMerkleTree::parent_hash(left, right)
        }
    }

    /// Recursive function that traverses tree nodes, storing the data as bits and hashes
    fn traverse_and_build(&mut self, height: u32, pos: u32, txids: &[Txid], matches: &[bool]) {
        // Determine whether this node is the parent of at least one matched txid
        let mut parent_of_match = false;
        let mut p = pos << height;
        while p < (pos + 1) << height && p < self.num_transactions {
            parent_of_match |= matches.get(p as usize).copied().unwrap_or(false);
            p += 1;
        }
        // Store as flag bit
        self.bits.push(parent_of_match);

        if height == 0 || !parent_of_match {
            // If at height 0, or nothing interesting below, store hash and stop
            let hash = self.calc_hash(height, pos, txids);
            self.hashes.push(hash);
        } else {
            // Otherwise, don't store any hash, but descend into the subtrees
            self.traverse_and_build(height - 1, pos * 2, txids, matches);
            if pos * 2 + 1 < self.calc_tree_width(height - 1) {
                self.traverse_and_build(height - 1, pos * 2 + 1, txids, matches);
            }
        }
    }

    /// Recursive function that traverses tree nodes, consuming the bits and hashes produced by
    /// TraverseAndBuild. It returns the hash of the respective node and its respective index.
    fn traverse_and_extract(
        &self,
        height: u32,
        pos: u32,
        bits_used: &mut u32,
        hash_used: &mut u32,
        matches: &mut Vec<Txid>,
        indexes: &mut Vec<u32>,
    ) -> Result<TxMerkleNode, MerkleBlockError> {
        if *bits_used as usize >= self.bits.len() {
            return Err(MerkleBlockError::BitsArrayOverflow);
        }
        let parent_of_match = self.bits[*bits_used as usize];
        *bits_used += 1;
        if height == 0 || !parent_of_match {
            // If at height 0, or nothing interesting below, use stored hash and do not descend
            if *hash_used as usize >= self.hashes.len() {
                return Err(MerkleBlockError::HashesArrayOverflow);
            }
            let hash = self.hashes[*hash_used as usize];
            *hash_used += 1;
            if height == 0 && parent_of_match {
                // in case of height 0, we have a matched txid
                matches.push(Txid::from_byte_array(hash.to_byte_array()));
                indexes.push(pos);
            }
            Ok(hash)
        } else {
            // otherwise, descend into the subtrees to extract matched txids and hashes
            let left = self.traverse_and_extract(
                height - 1,
                pos * 2,
                bits_used,
                hash_used,
                matches,
                indexes,
            )?;
            let right;
            if pos * 2 + 1 < self.calc_tree_width(height - 1) {
                right = self.traverse_and_extract(
                    height - 1,
                    pos * 2 + 1,
                    bits_used,
                    hash_used,
                    matches,
                    indexes,
                )?;
                if right == left {
                    // The left and right branches should never be identical, as the transaction
                    // hashes covered by them must each be unique.
                    return Err(MerkleBlockError::IdenticalHashesFound);
                }
            } else {
                right = left;
            }
            // and combine them before returning
            Ok(PartialMerkleTree::parent_hash(left, right))
        }
    }

    /// Helper method to produce SHA256D(left + right)
    fn parent_hash(left: TxMerkleNode, right: TxMerkleNode) -> TxMerkleNode {
        TxMerkleNode::from_byte_array(parent_hash(left.as_byte_array(), right.as_byte_array()))
    }
}

impl Encodable for PartialMerkleTree {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let ret = self.num_transactions.consensus_encode(w)? + self.hashes.consensus_encode(w)?;
        let mut bytes: Vec<u8> = vec![0; self.bits.len().div_ceil(8)];
        for p in 0..self.bits.len() {
            bytes[p / 8] |= (self.bits[p] as u8) << (p % 8) as u8;
        }
        Ok(ret + bytes.consensus_encode(w)?)
    }
}

impl Decodable for PartialMerkleTree {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let num_transactions: u32 = Decodable::consensus_decode(r)?;
        let hashes: Vec<TxMerkleNode> = Decodable::consensus_decode(r)?;

        let bytes: Vec<u8> = Decodable::consensus_decode(r)?;
        let mut bits: Vec<bool> = vec![false; bytes.len() * 8];

        for (p, bit) in bits.iter_mut().enumerate() {
            *bit = (bytes[p / 8] & (1 << (p % 8) as u8)) != 0;
        }
        Ok(PartialMerkleTree { num_transactions, hashes, bits })
    }
}
