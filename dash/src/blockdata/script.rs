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

//! Dash scripts.
//!
//! Only what payout scripts need: an owned byte buffer, constructors for the
//! two standard templates, and recognition of the templates that have an
//! address form.

use std::fmt;

use hashes::Hash;

use crate::consensus::encode::{self, Decodable, Encodable};
use crate::hash_types::{PubkeyHash, ScriptHash};

pub mod opcodes {
    //! The handful of opcodes standard output templates are built from.

    pub const OP_DUP: u8 = 0x76;
    pub const OP_HASH160: u8 = 0xa9;
    pub const OP_EQUAL: u8 = 0x87;
    pub const OP_EQUALVERIFY: u8 = 0x88;
    pub const OP_CHECKSIG: u8 = 0xac;
    pub const OP_PUSHBYTES_20: u8 = 0x14;
    pub const OP_PUSHBYTES_33: u8 = 0x21;
    pub const OP_PUSHBYTES_65: u8 = 0x41;
    pub const OP_RETURN: u8 = 0x6a;
}

use opcodes::*;

/// The destination a standard output script pays to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScriptDestination {
    PubkeyHash(PubkeyHash),
    ScriptHash(ScriptHash),
}

/// An owned script.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScriptBuf(Vec<u8>);

impl ScriptBuf {
    /// Creates an empty script.
    pub fn new() -> Self {
        ScriptBuf(Vec::new())
    }

    /// Builds a pay-to-pubkey-hash script.
    pub fn new_p2pkh(pubkey_hash: &PubkeyHash) -> Self {
        let mut bytes = Vec::with_capacity(25);
        bytes.extend_from_slice(&[OP_DUP, OP_HASH160, OP_PUSHBYTES_20]);
        bytes.extend_from_slice(pubkey_hash.as_byte_array());
        bytes.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
        ScriptBuf(bytes)
    }

    /// Builds a pay-to-script-hash script.
    pub fn new_p2sh(script_hash: &ScriptHash) -> Self {
        let mut bytes = Vec::with_capacity(23);
        bytes.extend_from_slice(&[OP_HASH160, OP_PUSHBYTES_20]);
        bytes.extend_from_slice(script_hash.as_byte_array());
        bytes.push(OP_EQUAL);
        ScriptBuf(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_p2pkh(&self) -> bool {
        let b = &self.0;
        b.len() == 25
            && b[0] == OP_DUP
            && b[1] == OP_HASH160
            && b[2] == OP_PUSHBYTES_20
            && b[23] == OP_EQUALVERIFY
            && b[24] == OP_CHECKSIG
    }

    pub fn is_p2sh(&self) -> bool {
        let b = &self.0;
        b.len() == 23 && b[0] == OP_HASH160 && b[1] == OP_PUSHBYTES_20 && b[22] == OP_EQUAL
    }

    /// Pay-to-pubkey with a compressed (33 byte) or uncompressed (65 byte) key.
    pub fn is_p2pk(&self) -> bool {
        let b = &self.0;
        match b.first() {
            Some(&OP_PUSHBYTES_33) => b.len() == 35 && b[34] == OP_CHECKSIG,
            Some(&OP_PUSHBYTES_65) => b.len() == 67 && b[66] == OP_CHECKSIG,
            _ => false,
        }
    }

    /// Extracts the destination of a standard script, mirroring Dash Core's
    /// `ExtractDestination`: P2PKH and P2SH map directly, P2PK maps to the
    /// hash of its public key, anything else has no destination.
    pub fn destination(&self) -> Option<ScriptDestination> {
        if self.is_p2pkh() {
            PubkeyHash::from_slice(&self.0[3..23]).ok().map(ScriptDestination::PubkeyHash)
        } else if self.is_p2sh() {
            ScriptHash::from_slice(&self.0[2..22]).ok().map(ScriptDestination::ScriptHash)
        } else if self.is_p2pk() {
            let key = &self.0[1..self.0.len() - 1];
            Some(ScriptDestination::PubkeyHash(PubkeyHash::hash(key)))
        } else {
            None
        }
    }
}

impl From<Vec<u8>> for ScriptBuf {
    fn from(bytes: Vec<u8>) -> Self {
        ScriptBuf(bytes)
    }
}

impl fmt::Debug for ScriptBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScriptBuf({})", hex::encode(&self.0))
    }
}

impl fmt::Display for ScriptBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl Encodable for ScriptBuf {
    fn consensus_encode<W: std::io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, std::io::Error> {
        self.0.consensus_encode(w)
    }
}

impl Decodable for ScriptBuf {
    fn consensus_decode<R: std::io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        Ok(ScriptBuf(Decodable::consensus_decode(r)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_templates_are_recognised() {
        let pkh = PubkeyHash::from_byte_array([7; 20]);
        let p2pkh = ScriptBuf::new_p2pkh(&pkh);
        assert!(p2pkh.is_p2pkh());
        assert_eq!(p2pkh.destination(), Some(ScriptDestination::PubkeyHash(pkh)));

        let sh = ScriptHash::from_byte_array([9; 20]);
        let p2sh = ScriptBuf::new_p2sh(&sh);
        assert!(p2sh.is_p2sh());
        assert_eq!(p2sh.destination(), Some(ScriptDestination::ScriptHash(sh)));
    }

    #[test]
    fn p2pk_maps_to_key_hash() {
        let key = [2u8; 33];
        let mut bytes = vec![OP_PUSHBYTES_33];
        bytes.extend_from_slice(&key);
        bytes.push(OP_CHECKSIG);
        let script = ScriptBuf::from(bytes);
        assert_eq!(script.destination(), Some(ScriptDestination::PubkeyHash(PubkeyHash::hash(&key))));
    }

    #[test]
    fn non_standard_scripts_have_no_destination() {
        assert_eq!(ScriptBuf::new().destination(), None);
        assert_eq!(ScriptBuf::from(vec![OP_RETURN, 0x01, 0xff]).destination(), None);
    }
}
