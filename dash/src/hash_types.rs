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

//! Dash hash types.
//!
//! This module defines types for hashes used throughout the library. These
//! types are needed in order to avoid mixing data of the same hash format
//! (e.g. `SHA256d`) but of different meaning (such as transaction id, block
//! hash). All double-SHA256 types display byte-reversed, like Dash Core's
//! `uint256::ToString`.

use hashes::{hash_newtype, hash160, sha256d};

hash_newtype! {
    /// A dash block hash.
    pub struct BlockHash(sha256d::Hash);
    /// A dash transaction hash/transaction ID.
    pub struct Txid(sha256d::Hash);
    /// A node of a block's transaction merkle tree.
    pub struct TxMerkleNode(sha256d::Hash);
    /// The hash of a provider registration transaction, identifying a masternode.
    pub struct ProTxHash(sha256d::Hash);
    /// The block hash a masternode's collateral was confirmed in.
    pub struct ConfirmedHash(sha256d::Hash);
    /// The hash of a quorum's base block.
    pub struct QuorumHash(sha256d::Hash);
    /// The hash of a quorum's verification vector.
    pub struct QuorumVVecHash(sha256d::Hash);
    /// The commitment hash of a final quorum commitment.
    pub struct QuorumCommitmentHash(sha256d::Hash);
    /// Merkle root over the simplified masternode list entry hashes.
    pub struct MerkleRootMasternodeList(sha256d::Hash);
    /// Merkle root over the active quorum commitment hashes.
    pub struct MerkleRootQuorums(sha256d::Hash);

    /// A hash of a public key.
    pub struct PubkeyHash(hash160::Hash);
    /// A hash of Dash Script bytecode.
    pub struct ScriptHash(hash160::Hash);
    /// Platform (evonode) node id, displayed byte-reversed like Dash Core's `uint160`.
    #[hash_newtype(backward)]
    pub struct PlatformNodeId(hash160::Hash);
}
