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

//! Dash Quorum Commitment Special Transaction.
//!
//! It is defined in DIP6 [dip-0006.md](https://github.com/dashpay/dips/blob/master/dip-0006.md).
//!

use std::io::{self, Read, Write};

use hashes::Hash;
use serde_json::{Value, json};

use crate::bls_sig_utils::{BLSPublicKey, BLSSignature};
use crate::consensus::encode::{self, VarInt, impl_vec, read_vec_len};
use crate::consensus::{Decodable, Encodable, serialize};
use crate::hash_types::{QuorumCommitmentHash, QuorumHash, QuorumVVecHash};
use crate::sml::llmq_type::LLMQType;

/// Commitment version carrying a quorum index (DIP24 rotation).
pub const INDEXED_QUORUM_VERSION: u16 = 2;
/// Basic BLS scheme, with quorum index.
pub const BASIC_BLS_INDEXED_QUORUM_VERSION: u16 = 4;

/// A Quorum Finalization Commitment. It is described in the finalization section of DIP6:
/// [dip-0006.md#6-finalization-phase](https://github.com/dashpay/dips/blob/master/dip-0006.md#6-finalization-phase)
///
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct QuorumFinalizationCommitment {
    pub version: u16,
    pub llmq_type: LLMQType,
    pub quorum_hash: QuorumHash,
    pub quorum_index: Option<i16>,
    pub signers: Vec<bool>,
    pub valid_members: Vec<bool>,
    pub quorum_public_key: BLSPublicKey,
    pub quorum_vvec_hash: QuorumVVecHash,
    pub quorum_sig: BLSSignature,
    pub sig: BLSSignature,
}

impl QuorumFinalizationCommitment {
    fn has_quorum_index(&self) -> bool {
        self.version == INDEXED_QUORUM_VERSION || self.version == BASIC_BLS_INDEXED_QUORUM_VERSION
    }

    /// The size of the payload in bytes.
    pub fn size(&self) -> usize {
        let mut size = 2 + 1 + 32 + 48 + 32 + 96 + 96;
        size += VarInt(self.signers.len() as u64).len() + self.signers.len().div_ceil(8);
        size += VarInt(self.valid_members.len() as u64).len() + self.valid_members.len().div_ceil(8);
        if self.has_quorum_index() {
            size += 2;
        }
        size
    }

    /// Quorum index of a rotating quorum, `0` for every other quorum.
    pub fn quorum_index_or_zero(&self) -> i16 {
        self.quorum_index.unwrap_or_default()
    }

    /// Double-SHA256 of the serialized commitment: the leaf of `merkleRootQuorums`.
    pub fn calculate_entry_hash(&self) -> QuorumCommitmentHash {
        QuorumCommitmentHash::hash(&serialize(self))
    }

    /// Renders the commitment the way Dash Core's `CFinalCommitment::ToJson` does.
    pub fn to_json(&self) -> Value {
        json!({
            "version": self.version,
            "llmqType": self.llmq_type.index(),
            "quorumHash": self.quorum_hash.to_string(),
            "quorumIndex": self.quorum_index_or_zero(),
            "signersCount": count_set_bits(&self.signers),
            "signers": hex::encode(pack_bits(&self.signers)),
            "validMembersCount": count_set_bits(&self.valid_members),
            "validMembers": hex::encode(pack_bits(&self.valid_members)),
            "quorumPublicKey": self.quorum_public_key.to_string(),
            "quorumVvecHash": self.quorum_vvec_hash.to_string(),
            "quorumSig": self.quorum_sig.to_string(),
            "membersSig": self.sig.to_string(),
        })
    }
}

impl Encodable for QuorumFinalizationCommitment {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.llmq_type.consensus_encode(w)?;
        len += self.quorum_hash.consensus_encode(w)?;
        if self.has_quorum_index() {
            len += self.quorum_index_or_zero().consensus_encode(w)?;
        }
        len += write_dyn_bitset(w, &self.signers)?;
        len += write_dyn_bitset(w, &self.valid_members)?;
        len += self.quorum_public_key.consensus_encode(w)?;
        len += self.quorum_vvec_hash.consensus_encode(w)?;
        len += self.quorum_sig.consensus_encode(w)?;
        len += self.sig.consensus_encode(w)?;
        Ok(len)
    }
}

impl Decodable for QuorumFinalizationCommitment {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = u16::consensus_decode(r)?;
        let llmq_type = LLMQType::consensus_decode(r)?;
        let quorum_hash = QuorumHash::consensus_decode(r)?;
        let quorum_index =
            if version == INDEXED_QUORUM_VERSION || version == BASIC_BLS_INDEXED_QUORUM_VERSION {
                Some(i16::consensus_decode(r)?)
            } else {
                None
            };
        let signers = read_dyn_bitset(r)?;
        let valid_members = read_dyn_bitset(r)?;
        let quorum_public_key = BLSPublicKey::consensus_decode(r)?;
        let quorum_vvec_hash = QuorumVVecHash::consensus_decode(r)?;
        let quorum_sig = BLSSignature::consensus_decode(r)?;
        let sig = BLSSignature::consensus_decode(r)?;
        Ok(QuorumFinalizationCommitment {
            version,
            llmq_type,
            quorum_hash,
            quorum_index,
            signers,
            valid_members,
            quorum_public_key,
            quorum_vvec_hash,
            quorum_sig,
            sig,
        })
    }
}

impl_vec!(QuorumFinalizationCommitment);

fn count_set_bits(bits: &[bool]) -> usize {
    bits.iter().filter(|b| **b).count()
}

/// Packs bits LSB-first into bytes.
pub(crate) fn pack_bits(bits: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; bits.len().div_ceil(8)];
    for (p, bit) in bits.iter().enumerate() {
        if *bit {
            bytes[p / 8] |= 1 << (p % 8);
        }
    }
    bytes
}

fn write_dyn_bitset<W: Write + ?Sized>(w: &mut W, bits: &[bool]) -> io::Result<usize> {
    let len = VarInt(bits.len() as u64).consensus_encode(w)?;
    let bytes = pack_bits(bits);
    w.write_all(&bytes)?;
    Ok(len + bytes.len())
}

fn read_dyn_bitset<R: Read + ?Sized>(r: &mut R) -> Result<Vec<bool>, encode::Error> {
    // Bits are counted against the limit as bytes; a 4M member quorum is already absurd.
    let size = read_vec_len(r, 1)?;
    let mut bytes = vec![0u8; size.div_ceil(8)];
    r.read_exact(&mut bytes)?;

    let mut bits = Vec::with_capacity(size);
    for p in 0..size {
        let byte = bytes[p / 8];
        let bit = (byte >> (p % 8)) & 1;
        bits.push(bit != 0);
    }
    // Dash Core rejects bitsets with stray bits set past the last member.
    if size % 8 != 0 {
        if let Some(last) = bytes.last() {
            if last >> (size % 8) != 0 {
                return Err(encode::Error::ParseFailed("out-of-range bits set in dynamic bitset"));
            }
        }
    }

    Ok(bits)
}

#[cfg(test)]
mod tests {
    use hashes::Hash;

    use super::*;
    use crate::consensus::deserialize;

    fn commitment(version: u16) -> QuorumFinalizationCommitment {
        QuorumFinalizationCommitment {
            version,
            llmq_type: LLMQType::LlmqtypeTest,
            quorum_hash: QuorumHash::all_zeros(),
            quorum_index: if version == 2 || version == 4 { Some(1) } else { None },
            signers: vec![true, false, true, true, false],
            valid_members: vec![true, true, true, true, true],
            quorum_public_key: BLSPublicKey::from([0; 48]),
            quorum_vvec_hash: QuorumVVecHash::all_zeros(),
            quorum_sig: BLSSignature::from([0; 96]),
            sig: BLSSignature::from([0; 96]),
        }
    }

    #[test]
    fn size() {
        // 307 fixed bytes + 2 * (1 byte count + 1 byte of packed bits)
        let test_cases: &[(usize, u16)] = &[(311, 1), (313, 2), (311, 3), (313, 4)];
        for (want, version) in test_cases {
            let commitment = commitment(*version);
            assert_eq!(commitment.size(), *want);
            assert_eq!(commitment.consensus_encode(&mut Vec::new()).unwrap(), *want);
        }
    }

    #[test]
    fn bitsets_pack_lsb_first() {
        assert_eq!(pack_bits(&[true, false, true, true, false]), vec![0b0000_1101]);
        assert_eq!(pack_bits(&[false; 9]), vec![0, 0]);
        let mut nine = vec![false; 9];
        nine[8] = true;
        assert_eq!(pack_bits(&nine), vec![0, 1]);
    }

    #[test]
    fn indexed_round_trip() {
        let original = commitment(2);
        let decoded: QuorumFinalizationCommitment = deserialize(&serialize(&original)).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(decoded.quorum_index, Some(1));
    }

    #[test]
    fn stray_bitset_bits_are_rejected() {
        let mut bytes = serialize(&commitment(1));
        // signers: count at offset 35, packed byte at 36; bit 5 is beyond 5 members.
        assert_eq!(bytes[35], 5);
        bytes[36] |= 1 << 5;
        assert!(deserialize::<QuorumFinalizationCommitment>(&bytes).is_err());
    }

    #[test]
    fn json_field_order() {
        let json = commitment(1).to_json();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "version",
                "llmqType",
                "quorumHash",
                "quorumIndex",
                "signersCount",
                "signers",
                "validMembersCount",
                "validMembers",
                "quorumPublicKey",
                "quorumVvecHash",
                "quorumSig",
                "membersSig"
            ]
        );
        assert_eq!(json["signersCount"], 3);
        assert_eq!(json["signers"], "0d");
        assert_eq!(json["validMembers"], "1f");
        assert_eq!(json["quorumIndex"], 0);
        assert_eq!(json["llmqType"], 100);
    }

    #[test]
    fn entry_hash_covers_serialization() {
        let a = commitment(1);
        let mut b = a.clone();
        b.quorum_sig = BLSSignature::from([1; 96]);
        assert_ne!(a.calculate_entry_hash(), b.calculate_entry_hash());
        assert_eq!(a.calculate_entry_hash(), QuorumCommitmentHash::hash(&serialize(&a)));
    }
}
