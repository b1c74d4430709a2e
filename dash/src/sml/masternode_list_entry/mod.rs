pub mod hash;
mod to_json;

use std::io;

use crate::blockdata::script::ScriptBuf;
use crate::bls_sig_utils::BLSPublicKey;
use crate::consensus::encode::impl_vec;
use crate::consensus::{Decodable, Encodable, encode};
use crate::hash_types::{ConfirmedHash, PlatformNodeId, ProTxHash, PubkeyHash};
use crate::sml::address::ServiceAddress;
use crate::sml::deterministic::{DeterministicMasternode, LEGACY_BLS_STATE_VERSION};

/// Serialization version of a simplified masternode list entry.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum MasternodeListEntryVersion {
    /// Operator key in the legacy BLS scheme; no type or platform fields.
    LegacyBls = 1,
    /// Basic BLS scheme; carries the masternode type.
    Basic = 2,
}

impl MasternodeListEntryVersion {
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

impl Encodable for MasternodeListEntryVersion {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        self.as_u16().consensus_encode(w)
    }
}

impl Decodable for MasternodeListEntryVersion {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        match u16::consensus_decode(r)? {
            1 => Ok(MasternodeListEntryVersion::LegacyBls),
            2 => Ok(MasternodeListEntryVersion::Basic),
            value => Err(encode::Error::InvalidEnumValue {
                value,
                type_name: "MasternodeListEntryVersion",
            }),
        }
    }
}

/// Masternode type. Platform fields only exist for high performance (evo) nodes.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default)]
pub enum EntryMasternodeType {
    #[default]
    Regular,
    HighPerformance {
        platform_http_port: u16,
        platform_node_id: PlatformNodeId,
    },
}

impl EntryMasternodeType {
    /// Wire value of the type (`nType`).
    pub fn index(&self) -> u16 {
        match self {
            EntryMasternodeType::Regular => 0,
            EntryMasternodeType::HighPerformance { .. } => 1,
        }
    }

    pub fn is_high_performance(&self) -> bool {
        matches!(self, EntryMasternodeType::HighPerformance { .. })
    }
}

impl Encodable for EntryMasternodeType {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = self.index().consensus_encode(w)?;
        if let EntryMasternodeType::HighPerformance { platform_http_port, platform_node_id } = self
        {
            len += platform_http_port.consensus_encode(w)?;
            len += platform_node_id.consensus_encode(w)?;
        }
        Ok(len)
    }
}

impl Decodable for EntryMasternodeType {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        match u16::consensus_decode(r)? {
            0 => Ok(EntryMasternodeType::Regular),
            1 => Ok(EntryMasternodeType::HighPerformance {
                platform_http_port: u16::consensus_decode(r)?,
                platform_node_id: PlatformNodeId::consensus_decode(r)?,
            }),
            value => Err(encode::Error::InvalidEnumValue {
                value,
                type_name: "EntryMasternodeType",
            }),
        }
    }
}

/// One masternode as seen by light clients (`CSimplifiedMNListEntry`).
///
/// Equality ignores the payout scripts: they are not part of the entry's
/// serialization or hash, so two entries differing only in payout are the
/// same entry on the wire. Use [`MasternodeListEntry::eq_extended`] to compare
/// them as well.
#[derive(Clone, Eq, Debug)]
pub struct MasternodeListEntry {
    pub version: MasternodeListEntryVersion,
    pub pro_reg_tx_hash: ProTxHash,
    pub confirmed_hash: ConfirmedHash,
    pub service_address: ServiceAddress,
    pub operator_public_key: BLSPublicKey,
    pub key_id_voting: PubkeyHash,
    pub is_valid: bool,
    pub mn_type: EntryMasternodeType,
    pub payout_script: ScriptBuf,
    pub operator_payout_script: ScriptBuf,
}

impl PartialEq for MasternodeListEntry {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.pro_reg_tx_hash == other.pro_reg_tx_hash
            && self.confirmed_hash == other.confirmed_hash
            && self.service_address == other.service_address
            && self.operator_public_key == other.operator_public_key
            && self.key_id_voting == other.key_id_voting
            && self.is_valid == other.is_valid
            && self.mn_type == other.mn_type
    }
}

impl MasternodeListEntry {
    /// Equality including both payout scripts.
    pub fn eq_extended(&self, other: &Self) -> bool {
        self == other
            && self.payout_script == other.payout_script
            && self.operator_payout_script == other.operator_payout_script
    }
}

impl From<&DeterministicMasternode> for MasternodeListEntry {
    fn from(dmn: &DeterministicMasternode) -> Self {
        let state = &dmn.state;
        let version = if state.version == LEGACY_BLS_STATE_VERSION {
            MasternodeListEntryVersion::LegacyBls
        } else {
            MasternodeListEntryVersion::Basic
        };
        MasternodeListEntry {
            version,
            pro_reg_tx_hash: dmn.pro_tx_hash,
            confirmed_hash: state.confirmed_hash,
            service_address: state.service,
            operator_public_key: state.pub_key_operator,
            key_id_voting: state.key_id_voting,
            is_valid: !state.is_banned(),
            mn_type: dmn.mn_type,
            payout_script: state.script_payout.clone(),
            operator_payout_script: state.script_operator_payout.clone(),
        }
    }
}

/// Network form: the version followed by the hashed fields.
impl Encodable for MasternodeListEntry {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = self.version.consensus_encode(w)?;
        len += self.consensus_encode_for_hash(w)?;
        Ok(len)
    }
}

impl Decodable for MasternodeListEntry {
    fn consensus_decode<R: io::Read + ?Sized>(r: &mut R) -> Result<Self, encode::Error> {
        let version = MasternodeListEntryVersion::consensus_decode(r)?;
        let pro_reg_tx_hash = ProTxHash::consensus_decode(r)?;
        let confirmed_hash = ConfirmedHash::consensus_decode(r)?;
        let service_address = ServiceAddress::consensus_decode(r)?;
        let operator_public_key = BLSPublicKey::consensus_decode(r)?;
        let key_id_voting = PubkeyHash::consensus_decode(r)?;
        let is_valid = bool::consensus_decode(r)?;
        let mn_type = match version {
            MasternodeListEntryVersion::LegacyBls => EntryMasternodeType::Regular,
            MasternodeListEntryVersion::Basic => EntryMasternodeType::consensus_decode(r)?,
        };
        Ok(MasternodeListEntry {
            version,
            pro_reg_tx_hash,
            confirmed_hash,
            service_address,
            operator_public_key,
            key_id_voting,
            is_valid,
            mn_type,
            payout_script: ScriptBuf::new(),
            operator_payout_script: ScriptBuf::new(),
        })
    }
}

impl_vec!(MasternodeListEntry);

#[cfg(test)]
mod tests {
    use hashes::Hash;

    use super::*;
    use crate::consensus::{deserialize, serialize};

    fn entry(version: MasternodeListEntryVersion, mn_type: EntryMasternodeType) -> MasternodeListEntry {
        MasternodeListEntry {
            version,
            pro_reg_tx_hash: ProTxHash::from_byte_array([1; 32]),
            confirmed_hash: ConfirmedHash::from_byte_array([2; 32]),
            service_address: "10.0.0.1:9999".parse().unwrap(),
            operator_public_key: BLSPublicKey::from([3; 48]),
            key_id_voting: PubkeyHash::from_byte_array([4; 20]),
            is_valid: true,
            mn_type,
            payout_script: ScriptBuf::new_p2pkh(&PubkeyHash::from_byte_array([5; 20])),
            operator_payout_script: ScriptBuf::new(),
        }
    }

    fn evo() -> EntryMasternodeType {
        EntryMasternodeType::HighPerformance {
            platform_http_port: 443,
            platform_node_id: PlatformNodeId::from_byte_array([6; 20]),
        }
    }

    #[test]
    fn network_form_sizes() {
        // version + hash + confirmed + service + key + voting + valid
        let base = 2 + 32 + 32 + 18 + 48 + 20 + 1;
        let legacy = entry(MasternodeListEntryVersion::LegacyBls, EntryMasternodeType::Regular);
        assert_eq!(serialize(&legacy).len(), base);
        let regular = entry(MasternodeListEntryVersion::Basic, EntryMasternodeType::Regular);
        assert_eq!(serialize(&regular).len(), base + 2);
        let hpmn = entry(MasternodeListEntryVersion::Basic, evo());
        assert_eq!(serialize(&hpmn).len(), base + 2 + 2 + 20);
    }

    #[test]
    fn decoding_drops_payout_scripts() {
        let original = entry(MasternodeListEntryVersion::Basic, evo());
        let decoded: MasternodeListEntry = deserialize(&serialize(&original)).unwrap();
        assert_eq!(decoded, original);
        assert!(!decoded.eq_extended(&original));
        assert!(decoded.payout_script.is_empty());
    }

    #[test]
    fn equality_ignores_payout_scripts() {
        let a = entry(MasternodeListEntryVersion::Basic, EntryMasternodeType::Regular);
        let mut b = a.clone();
        b.operator_payout_script = ScriptBuf::new_p2pkh(&PubkeyHash::from_byte_array([9; 20]));
        assert_eq!(a, b);
        assert!(!a.eq_extended(&b));

        b = a.clone();
        b.is_valid = false;
        assert_ne!(a, b);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut bytes = serialize(&entry(MasternodeListEntryVersion::Basic, EntryMasternodeType::Regular));
        bytes[0] = 3;
        assert!(matches!(
            deserialize::<MasternodeListEntry>(&bytes),
            Err(encode::Error::InvalidEnumValue { value: 3, .. })
        ));
    }
}
