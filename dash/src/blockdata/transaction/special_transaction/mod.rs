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

//! Dash Special Transaction.
//!
//! A dash special transaction's purpose is to relay data used by the dash
//! network, as described in DIP2. Only the coinbase payload (DIP4) is parsed
//! here; every other payload is carried as opaque bytes so that transactions
//! re-serialize, and hash, exactly as received.

use std::fmt::{Display, Formatter};
use std::io;

use crate::consensus::{Encodable, encode};

pub mod coinbase;
pub mod quorum_commitment;

use coinbase::CoinbasePayload;

/// The transaction type, stored in the upper 16 bits of a Dash transaction's version field.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum TransactionType {
    Classic = 0,
    ProviderRegistration = 1,
    ProviderUpdateService = 2,
    ProviderUpdateRegistrar = 3,
    ProviderUpdateRevocation = 4,
    Coinbase = 5,
    QuorumCommitment = 6,
    MnhfSignal = 7,
    AssetLock = 8,
    AssetUnlock = 9,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match *self {
            TransactionType::Classic => write!(f, "Classic"),
            TransactionType::ProviderRegistration => write!(f, "Provider Registration"),
            TransactionType::ProviderUpdateService => write!(f, "Provider Update Service"),
            TransactionType::ProviderUpdateRegistrar => write!(f, "Provider Update Registrar"),
            TransactionType::ProviderUpdateRevocation => write!(f, "Provider Update Revocation"),
            TransactionType::Coinbase => write!(f, "Coinbase"),
            TransactionType::QuorumCommitment => write!(f, "Quorum Commitment"),
            TransactionType::MnhfSignal => write!(f, "Masternode Hard Fork Signal"),
            TransactionType::AssetLock => write!(f, "Asset Lock"),
            TransactionType::AssetUnlock => write!(f, "Asset Unlock"),
        }
    }
}

impl TryFrom<u16> for TransactionType {
    type Error = encode::Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TransactionType::Classic),
            1 => Ok(TransactionType::ProviderRegistration),
            2 => Ok(TransactionType::ProviderUpdateService),
            3 => Ok(TransactionType::ProviderUpdateRegistrar),
            4 => Ok(TransactionType::ProviderUpdateRevocation),
            5 => Ok(TransactionType::Coinbase),
            6 => Ok(TransactionType::QuorumCommitment),
            7 => Ok(TransactionType::MnhfSignal),
            8 => Ok(TransactionType::AssetLock),
            9 => Ok(TransactionType::AssetUnlock),
            value => Err(encode::Error::InvalidEnumValue {
                value,
                type_name: "TransactionType",
            }),
        }
    }
}

impl TransactionType {
    /// Get the transaction type from an optional special transaction payload.
    pub fn from_optional_payload(payload: &Option<TransactionPayload>) -> Self {
        match payload {
            None => TransactionType::Classic,
            Some(payload) => payload.get_type(),
        }
    }
}

/// An enum wrapper around the special transaction payloads.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum TransactionPayload {
    /// A wrapper for a Coinbase payload
    CoinbasePayloadType(CoinbasePayload),
    /// Any other payload, kept as its raw bytes.
    Unparsed {
        tx_type: TransactionType,
        payload: Vec<u8>,
    },
}

impl TransactionPayload {
    /// Gets the Transaction Type for the Special Transaction Payload
    pub fn get_type(&self) -> TransactionType {
        match self {
            TransactionPayload::CoinbasePayloadType(_) => TransactionType::Coinbase,
            TransactionPayload::Unparsed { tx_type, .. } => *tx_type,
        }
    }

    /// Convenience method that assumes the payload to be a coinbase payload.
    pub fn to_coinbase_payload(&self) -> Option<&CoinbasePayload> {
        match self {
            TransactionPayload::CoinbasePayloadType(payload) => Some(payload),
            TransactionPayload::Unparsed { .. } => None,
        }
    }

    /// Decodes the payload bytes of a special transaction of type `tx_type`.
    pub(crate) fn from_bytes(
        tx_type: TransactionType,
        payload: Vec<u8>,
    ) -> Result<Self, encode::Error> {
        match tx_type {
            TransactionType::Coinbase => {
                Ok(TransactionPayload::CoinbasePayloadType(encode::deserialize(&payload)?))
            }
            tx_type => Ok(TransactionPayload::Unparsed { tx_type, payload }),
        }
    }
}

impl Encodable for TransactionPayload {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        match self {
            TransactionPayload::CoinbasePayloadType(p) => p.consensus_encode(w),
            TransactionPayload::Unparsed { payload, .. } => {
                w.write_all(payload)?;
                Ok(payload.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_is_rejected() {
        assert!(matches!(
            TransactionType::try_from(42),
            Err(encode::Error::InvalidEnumValue { value: 42, .. })
        ));
        assert_eq!(TransactionType::try_from(5).unwrap(), TransactionType::Coinbase);
    }

    #[test]
    fn opaque_payload_keeps_its_bytes() {
        let payload =
            TransactionPayload::from_bytes(TransactionType::QuorumCommitment, vec![1, 2, 3]).unwrap();
        assert_eq!(payload.get_type(), TransactionType::QuorumCommitment);
        assert_eq!(payload.to_coinbase_payload(), None);
        assert_eq!(encode::serialize(&payload), vec![1, 2, 3]);
    }

    #[test]
    fn truncated_coinbase_payload_is_an_error() {
        assert!(TransactionPayload::from_bytes(TransactionType::Coinbase, vec![1, 0, 0]).is_err());
    }
}
