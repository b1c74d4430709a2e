// Rust Dash Library
// Written for Dash in 2022 by
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

//! Dash merkle tree functions.
//!
//! Full merkle roots over 32-byte leaves (transactions, masternode list entry
//! hashes, quorum commitment hashes) and the partial trees sent to light
//! clients, see [`block::PartialMerkleTree`].

mod block;

use hashes::{Hash, sha256d};

pub use self::block::{MerkleBlockError, PartialMerkleTree};

/// Hashes a pair of nodes into their parent.
#[inline]
pub(crate) fn parent_hash(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut buffer = [0u8; 64];
    buffer[..32].copy_from_slice(left);
    buffer[32..].copy_from_slice(right);
    sha256d::Hash::hash(&buffer).to_byte_array()
}

/// Computes the merkle root of `hashes`, duplicating the last node of every
/// odd-sized level.
///
/// The returned flag reports whether two identical siblings were hashed
/// together anywhere in the tree (CVE-2012-2459), in which case a different
/// leaf list commits to the same root. An empty list has the all-zero root.
pub fn compute_merkle_root(hashes: Vec<[u8; 32]>) -> ([u8; 32], bool) {
    if hashes.is_empty() {
        return ([0u8; 32], false);
    }
    let mut mutated = false;
    let mut level = hashes;
    while level.len() > 1 {
        let mut higher_level = Vec::with_capacity(level.len().div_ceil(2));
        for pair in level.chunks(2) {
            match pair {
                [left, right] => {
                    mutated |= left == right;
                    higher_level.push(parent_hash(left, right));
                }
                [single] => higher_level.push(parent_hash(single, single)),
                _ => unreachable!("chunks(2) yields one or two items"),
            }
        }
        level = higher_level;
    }
    (level[0], mutated)
}

/// Merkle root of `hashes` after sorting them, as used for `merkleRootQuorums`.
pub fn compute_sorted_merkle_root(mut hashes: Vec<[u8; 32]>) -> ([u8; 32], bool) {
    hashes.sort_unstable();
    compute_merkle_root(hashes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(n: u8) -> [u8; 32] {
        [n; 32]
    }

    #[test]
    fn empty_root_is_zero() {
        assert_eq!(compute_merkle_root(vec![]), ([0u8; 32], false));
    }

    #[test]
    fn single_leaf_is_its_own_root() {
        assert_eq!(compute_merkle_root(vec![leaf(7)]), (leaf(7), false));
    }

    #[test]
    fn odd_levels_duplicate_the_last_node() {
        let (three, mutated) = compute_merkle_root(vec![leaf(1), leaf(2), leaf(3)]);
        assert!(!mutated);
        let expected = parent_hash(&parent_hash(&leaf(1), &leaf(2)), &parent_hash(&leaf(3), &leaf(3)));
        assert_eq!(three, expected);

        // Appending a copy of the last leaf produces the same root, and is flagged.
        let (four, mutated) = compute_merkle_root(vec![leaf(1), leaf(2), leaf(3), leaf(3)]);
        assert_eq!(four, three);
        assert!(mutated);
    }

    #[test]
    fn sorted_root_ignores_input_order() {
        let a = compute_sorted_merkle_root(vec![leaf(3), leaf(1), leaf(2)]);
        let b = compute_sorted_merkle_root(vec![leaf(1), leaf(2), leaf(3)]);
        assert_eq!(a, b);
    }
}
