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

//! BLS public keys and signatures as opaque, fixed-size byte strings.
//!
//! Nothing in this crate verifies BLS signatures; keys and signatures are
//! carried, compared, encoded and rendered verbatim.

use std::fmt;
use std::str::FromStr;

use crate::consensus::encode::{self, Decodable, Encodable};

macro_rules! impl_bls_bytes {
    ($name:ident, $len:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Length of the serialized form in bytes.
            pub const LEN: usize = $len;

            /// The all-zero value, which Dash Core treats as "not set".
            pub const fn zeroed() -> Self {
                $name([0; $len])
            }

            /// Whether every byte is zero.
            pub fn is_zeroed(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn to_bytes(self) -> [u8; $len] {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zeroed()
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                $name(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = hex::FromHexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut bytes = [0u8; $len];
                hex::decode_to_slice(s, &mut bytes)?;
                Ok($name(bytes))
            }
        }

        impl Encodable for $name {
            fn consensus_encode<W: std::io::Write + ?Sized>(
                &self,
                w: &mut W,
            ) -> Result<usize, std::io::Error> {
                self.0.consensus_encode(w)
            }
        }

        impl Decodable for $name {
            fn consensus_decode<R: std::io::Read + ?Sized>(
                r: &mut R,
            ) -> Result<Self, encode::Error> {
                Ok($name(Decodable::consensus_decode(r)?))
            }
        }
    };
}

impl_bls_bytes!(BLSPublicKey, 48, "A BLS public key (operator key or quorum public key).");
impl_bls_bytes!(BLSSignature, 96, "A BLS signature (chainlock, quorum or members signature).");
