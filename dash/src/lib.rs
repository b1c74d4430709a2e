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

//! # Dash simplified masternode list diffs
//!
//! Builds the `mnlistdiff` reply a Dash node sends light clients: the
//! masternodes and quorums that changed between two blocks, the chainlock
//! signatures new quorums worked on, and a proof that the coinbase of the
//! target block commits to the resulting list.
//!
//! Chain state is read through the traits in [`sml::providers`];
//! [`sml::store::InMemoryChainState`] implements all of them.

#![cfg_attr(docsrs, feature(doc_cfg))]
// Coding conventions
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

pub extern crate dash_network;
pub extern crate hashes;

mod internal_macros;

pub mod address;
pub mod blockdata;
pub mod bls_sig_utils;
pub mod consensus;
pub mod hash_types;
pub mod merkle_tree;
pub mod network;
pub mod sml;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use dash_network::Network;

pub use crate::address::Address;
pub use crate::blockdata::block::{Block, Header};
pub use crate::blockdata::script::ScriptBuf;
pub use crate::blockdata::transaction::Transaction;
pub use crate::bls_sig_utils::{BLSPublicKey, BLSSignature};
pub use crate::hash_types::{
    BlockHash, ConfirmedHash, MerkleRootMasternodeList, MerkleRootQuorums, PlatformNodeId,
    ProTxHash, PubkeyHash, QuorumHash, TxMerkleNode, Txid,
};
pub use crate::merkle_tree::PartialMerkleTree;
pub use crate::network::message_sml::{DeletedQuorum, GetMnListDiff, MnListDiff};
pub use crate::sml::error::SmlError;
pub use crate::sml::mn_list_diff::{build_simplified_diff, build_simplified_mn_list_diff};
pub use crate::sml::providers::{BlockRef, DiffProviders};

pub mod prelude {
    pub type CoreBlockHeight = u32;
}
