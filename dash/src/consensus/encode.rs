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

//! Dash consensus-encodable types.
//!
//! This is basically a replacement of the `Encodable` trait which does
//! normalization of endianness etc., to ensure that the encoding matches
//! the network consensus encoding.
//!
//! Essentially, anything that must go on the _disk_ or _network_ must be
//! encoded using the `Encodable` trait, since this data must be the same for
//! all systems. Any data going to the _user_ e.g., over JSONRPC, should use
//! the ordinary JSON rendering instead.

use std::io::{self, Cursor, Read, Write};

use hashes::Hash;
use thiserror::Error;

use crate::hash_types::{
    BlockHash, ConfirmedHash, MerkleRootMasternodeList, MerkleRootQuorums, PlatformNodeId,
    ProTxHash, PubkeyHash, QuorumCommitmentHash, QuorumHash, QuorumVVecHash, ScriptHash,
    TxMerkleNode, Txid,
};

/// Maximum size, in bytes, of a vector we are allowed to decode.
pub const MAX_VEC_SIZE: usize = 4_000_000;

/// Encoding error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Tried to allocate an oversized vector.
    #[error("allocation of oversized vector: requested {requested}, maximum {max}")]
    OversizedVectorAllocation {
        /// The capacity requested.
        requested: usize,
        /// The maximum capacity.
        max: usize,
    },
    /// A compact size was not minimally encoded.
    #[error("non-minimal varint")]
    NonMinimalVarInt,
    /// An enum discriminant was not one we know how to decode.
    #[error("invalid {type_name} value {value}")]
    InvalidEnumValue {
        /// The decoded value.
        value: u16,
        /// The type being decoded.
        type_name: &'static str,
    },
    /// Parsing error.
    #[error("parse failed: {0}")]
    ParseFailed(&'static str),
}

/// Encodes an object into a vector.
pub fn serialize<T: Encodable + ?Sized>(data: &T) -> Vec<u8> {
    let mut encoder = Vec::new();
    data.consensus_encode(&mut encoder).expect("in-memory writers don't error");
    encoder
}

/// Encodes an object into a hex-encoded string.
pub fn serialize_hex<T: Encodable + ?Sized>(data: &T) -> String {
    hex::encode(serialize(data))
}

/// Deserializes an object from a vector, will error if said deserialization
/// doesn't consume the entire vector.
pub fn deserialize<T: Decodable>(data: &[u8]) -> Result<T, Error> {
    let (rv, consumed) = deserialize_partial(data)?;

    if consumed == data.len() {
        Ok(rv)
    } else {
        Err(Error::ParseFailed("data not consumed entirely when explicitly deserializing"))
    }
}

/// Deserializes an object from a vector, but will not report an error if said
/// deserialization doesn't consume the entire vector.
pub fn deserialize_partial<T: Decodable>(data: &[u8]) -> Result<(T, usize), Error> {
    let mut decoder = Cursor::new(data);
    let rv = Decodable::consensus_decode(&mut decoder)?;
    let consumed = decoder.position() as usize;

    Ok((rv, consumed))
}

/// Data which can be encoded in a consensus-consistent way.
pub trait Encodable {
    /// Encodes an object with a well-defined format.
    ///
    /// # Returns
    ///
    /// The number of bytes written on success. The only errors returned are errors propagated from
    /// the writer.
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<usize, io::Error>;
}

/// Data which can be decoded in a consensus-consistent way.
pub trait Decodable: Sized {
    /// Decodes an object with a well-defined format.
    fn consensus_decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self, Error>;
}

/// A variable-length unsigned integer (Bitcoin "CompactSize").
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Gets the length of this VarInt when encoded.
    ///
    /// Returns 1 for 0..=0xFC, 3 for 0xFD..=(2^16-1), 5 for 0x10000..=(2^32-1),
    /// and 9 otherwise.
    #[inline]
    pub const fn len(&self) -> usize {
        match self.0 {
            0..=0xFC => 1,
            0xFD..=0xFFFF => 3,
            0x10000..=0xFFFFFFFF => 5,
            _ => 9,
        }
    }
}

impl Encodable for VarInt {
    #[inline]
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        match self.0 {
            0..=0xFC => {
                (self.0 as u8).consensus_encode(w)?;
                Ok(1)
            }
            0xFD..=0xFFFF => {
                w.write_all(&[0xFD])?;
                (self.0 as u16).consensus_encode(w)?;
                Ok(3)
            }
            0x10000..=0xFFFFFFFF => {
                w.write_all(&[0xFE])?;
                (self.0 as u32).consensus_encode(w)?;
                Ok(5)
            }
            _ => {
                w.write_all(&[0xFF])?;
                self.0.consensus_encode(w)?;
                Ok(9)
            }
        }
    }
}

impl Decodable for VarInt {
    #[inline]
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, Error> {
        let n = u8::consensus_decode(r)?;
        match n {
            0xFF => {
                let x = u64::consensus_decode(r)?;
                if x < 0x100000000 { Err(Error::NonMinimalVarInt) } else { Ok(VarInt(x)) }
            }
            0xFE => {
                let x = u32::consensus_decode(r)?;
                if x < 0x10000 { Err(Error::NonMinimalVarInt) } else { Ok(VarInt(x as u64)) }
            }
            0xFD => {
                let x = u16::consensus_decode(r)?;
                if x < 0xFD { Err(Error::NonMinimalVarInt) } else { Ok(VarInt(x as u64)) }
            }
            n => Ok(VarInt(n as u64)),
        }
    }
}

/// Reads a compact size and checks it against [`MAX_VEC_SIZE`] for items of `item_size` bytes.
pub(crate) fn read_vec_len<R: Read + ?Sized>(r: &mut R, item_size: usize) -> Result<usize, Error> {
    let len = VarInt::consensus_decode(r)?.0 as usize;
    let requested = len.saturating_mul(item_size.max(1));
    if requested > MAX_VEC_SIZE {
        return Err(Error::OversizedVectorAllocation { requested, max: MAX_VEC_SIZE });
    }
    Ok(len)
}

macro_rules! impl_int_encodable {
    ($ty:ident) => {
        impl Encodable for $ty {
            #[inline]
            fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
                w.write_all(&self.to_le_bytes())?;
                Ok(std::mem::size_of::<$ty>())
            }
        }

        impl Decodable for $ty {
            #[inline]
            fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, Error> {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                r.read_exact(&mut buf)?;
                Ok($ty::from_le_bytes(buf))
            }
        }
    };
}

impl_int_encodable!(u8);
impl_int_encodable!(u16);
impl_int_encodable!(u32);
impl_int_encodable!(u64);
impl_int_encodable!(i16);
impl_int_encodable!(i32);
impl_int_encodable!(i64);

impl Encodable for bool {
    #[inline]
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        (*self as u8).consensus_encode(w)
    }
}

impl Decodable for bool {
    #[inline]
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<bool, Error> {
        u8::consensus_decode(r).map(|n| n != 0)
    }
}

impl<const N: usize> Encodable for [u8; N] {
    #[inline]
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        w.write_all(&self[..])?;
        Ok(N)
    }
}

impl<const N: usize> Decodable for [u8; N] {
    #[inline]
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, Error> {
        let mut ret = [0u8; N];
        r.read_exact(&mut ret)?;
        Ok(ret)
    }
}

impl Encodable for Vec<u8> {
    #[inline]
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let vi_len = VarInt(self.len() as u64).consensus_encode(w)?;
        w.write_all(self)?;
        Ok(vi_len + self.len())
    }
}

impl Decodable for Vec<u8> {
    #[inline]
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, Error> {
        let len = read_vec_len(r, 1)?;
        let mut ret = vec![0u8; len];
        r.read_exact(&mut ret)?;
        Ok(ret)
    }
}

/// Implements `Encodable`/`Decodable` for `Vec<$type>` as a compact-size prefixed list.
macro_rules! impl_vec {
    ($type:ty) => {
        impl $crate::consensus::Encodable for Vec<$type> {
            #[inline]
            fn consensus_encode<W: std::io::Write + ?Sized>(
                &self,
                w: &mut W,
            ) -> Result<usize, std::io::Error> {
                let mut len = $crate::consensus::Encodable::consensus_encode(
                    &$crate::consensus::encode::VarInt(self.len() as u64),
                    w,
                )?;
                for c in self.iter() {
                    len += $crate::consensus::Encodable::consensus_encode(c, w)?;
                }
                Ok(len)
            }
        }

        impl $crate::consensus::Decodable for Vec<$type> {
            #[inline]
            fn consensus_decode<R: std::io::Read + ?Sized>(
                r: &mut R,
            ) -> Result<Self, $crate::consensus::encode::Error> {
                let len = $crate::consensus::encode::read_vec_len(r, std::mem::size_of::<$type>())?;
                let mut ret = Vec::with_capacity(len);
                for _ in 0..len {
                    ret.push($crate::consensus::Decodable::consensus_decode(r)?);
                }
                Ok(ret)
            }
        }
    };
}
pub(crate) use impl_vec;

macro_rules! impl_hash_encodable {
    ($hashtype:ident) => {
        impl Encodable for $hashtype {
            #[inline]
            fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
                self.as_byte_array().consensus_encode(w)
            }
        }

        impl Decodable for $hashtype {
            #[inline]
            fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, Error> {
                Ok(Self::from_byte_array(Decodable::consensus_decode(r)?))
            }
        }
    };
}

impl_hash_encodable!(BlockHash);
impl_hash_encodable!(Txid);
impl_hash_encodable!(TxMerkleNode);
impl_hash_encodable!(ProTxHash);
impl_hash_encodable!(ConfirmedHash);
impl_hash_encodable!(QuorumHash);
impl_hash_encodable!(QuorumVVecHash);
impl_hash_encodable!(QuorumCommitmentHash);
impl_hash_encodable!(MerkleRootMasternodeList);
impl_hash_encodable!(MerkleRootQuorums);
impl_hash_encodable!(PubkeyHash);
impl_hash_encodable!(ScriptHash);
impl_hash_encodable!(PlatformNodeId);

impl_vec!(ProTxHash);
impl_vec!(TxMerkleNode);
impl_vec!(u16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint_boundaries() {
        let cases: &[(u64, usize)] =
            &[(0, 1), (0xFC, 1), (0xFD, 3), (0xFFFF, 3), (0x10000, 5), (0xFFFFFFFF, 5), (0x100000000, 9)];
        for (value, want) in cases {
            let encoded = serialize(&VarInt(*value));
            assert_eq!(encoded.len(), *want);
            assert_eq!(VarInt(*value).len(), *want);
            assert_eq!(deserialize::<VarInt>(&encoded).unwrap(), VarInt(*value));
        }
    }

    #[test]
    fn non_minimal_varint_is_rejected() {
        assert!(matches!(deserialize::<VarInt>(&[0xFD, 0x10, 0x00]), Err(Error::NonMinimalVarInt)));
        assert!(matches!(
            deserialize::<VarInt>(&[0xFE, 0xFF, 0x00, 0x00, 0x00]),
            Err(Error::NonMinimalVarInt)
        ));
    }

    #[test]
    fn oversized_vector_is_rejected() {
        let mut data = serialize(&VarInt(MAX_VEC_SIZE as u64 + 1));
        data.push(0);
        assert!(matches!(
            deserialize::<Vec<u8>>(&data),
            Err(Error::OversizedVectorAllocation { .. })
        ));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        assert!(matches!(deserialize::<u16>(&[1, 0, 0]), Err(Error::ParseFailed(_))));
        assert_eq!(deserialize_partial::<u16>(&[1, 0, 0]).unwrap(), (1, 2));
    }

    #[test]
    fn integers_are_little_endian() {
        assert_eq!(serialize(&0x0102u16), vec![0x02, 0x01]);
        assert_eq!(serialize(&-1i16), vec![0xFF, 0xFF]);
        assert_eq!(serialize(&true), vec![1]);
    }
}
