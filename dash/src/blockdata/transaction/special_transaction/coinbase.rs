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

//! Dash Coinbase Special Transaction.
//!
//! Each time a block is mined it includes a coinbase special transaction.
//! It is defined in DIP4 [dip-0004](https://github.com/dashpay/dips/blob/master/dip-0004.md).
//! Version 3 (DIP29) adds the best chainlock known to the miner, which is
//! where quorum chainlock signatures of an `mnlistdiff` come from.

use std::io;

use hashes::Hash;

use crate::bls_sig_utils::BLSSignature;
use crate::consensus::encode::VarInt;
use crate::consensus::{Decodable, Encodable, encode};
use crate::hash_types::{MerkleRootMasternodeList, MerkleRootQuorums};

/// Payload version that introduced `merkle_root_quorums`.
pub const COINBASE_VERSION_MERKLE_ROOT_QUORUMS: u16 = 2;
/// Payload version that introduced the best chainlock and the credit pool balance.
pub const COINBASE_VERSION_CLSIG_AND_BALANCE: u16 = 3;

/// A Coinbase payload. This is contained as the payload of a coinbase special transaction.
/// The Coinbase payload is described in DIP4.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct CoinbasePayload {
    pub version: u16,
    pub height: u32,
    pub merkle_root_masternode_list: MerkleRootMasternodeList,
    pub merkle_root_quorums: MerkleRootQuorums,
    /// Distance between `height` and the height of the chainlocked block.
    /// Zero below version 3, as are the signature and the locked amount.
    pub best_cl_height_diff: u32,
    pub best_cl_signature: BLSSignature,
    pub asset_locked_amount: u64,
}

impl CoinbasePayload {
    /// The size of the payload in bytes.
    /// version(2) + height(4) + merkle_root_masternode_list(32)
    /// in addition to the above, if version >= 2: merkle_root_quorums(32)
    /// and if version >= 3: best_cl_height_diff(compact_size) + best_cl_signature(96) +
    /// asset_locked_amount(8)
    pub fn size(&self) -> usize {
        let mut size: usize = 2 + 4 + 32;
        if self.version >= COINBASE_VERSION_MERKLE_ROOT_QUORUMS {
            size += 32;
        }
        if self.version >= COINBASE_VERSION_CLSIG_AND_BALANCE {
            size += VarInt(self.best_cl_height_diff as u64).len() + 96 + 8;
        }
        size
    }

    /// The chainlock signature this coinbase carries, if it carries a real one.
    ///
    /// Returns the signature together with the height difference it refers to.
    pub fn non_null_chainlock(&self) -> Option<(BLSSignature, u32)> {
        if self.version < COINBASE_VERSION_CLSIG_AND_BALANCE {
            return None;
        }
        if self.best_cl_signature.is_zeroed() {
            return None;
        }
        Some((self.best_cl_signature, self.best_cl_height_diff))
    }
}

impl Encodable for CoinbasePayload {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.height.consensus_encode(w)?;
        len += self.merkle_root_masternode_list.consensus_encode(w)?;
        if self.version >= COINBASE_VERSION_MERKLE_ROOT_QUORUMS {
            len += self.merkle_root_quorums.consensus_encode(w)?;
        }
        if self.version >= COINBASE_VERSION_CLSIG_AND_BALANCE {
            len += VarInt(self.best_cl_height_diff as u64).consensus_encode(w)?;
            len += self.best_cl_signature.consensus_encode(w)?;
            len += self.asset_locked_amount.consensus_encode(w)?;
        }
        Ok(len)
    }
}

impl Decodable for CoinbasePayload {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let height = u32::consensus_decode(r)?;
        let merkle_root_masternode_list = MerkleRootMasternodeList::consensus_decode(r)?;
        let merkle_root_quorums = if version >= COINBASE_VERSION_MERKLE_ROOT_QUORUMS {
            MerkleRootQuorums::consensus_decode(r)?
        } else {
            MerkleRootQuorums::all_zeros()
        };
        let (best_cl_height_diff, best_cl_signature, asset_locked_amount) =
            if version >= COINBASE_VERSION_CLSIG_AND_BALANCE {
                let diff = VarInt::consensus_decode(r)?.0;
                let diff = u32::try_from(diff)
                    .map_err(|_| encode::Error::ParseFailed("best_cl_height_diff exceeds u32"))?;
                (diff, BLSSignature::consensus_decode(r)?, u64::consensus_decode(r)?)
            } else {
                (0, BLSSignature::zeroed(), 0)
            };
        Ok(CoinbasePayload {
            version,
            height,
            merkle_root_masternode_list,
            merkle_root_quorums,
            best_cl_height_diff,
            best_cl_signature,
            asset_locked_amount,
        })
    }
}
