use std::io;

use hashes::{Hash, sha256d};

use crate::consensus::Encodable;
use crate::sml::masternode_list_entry::{MasternodeListEntry, MasternodeListEntryVersion};

impl MasternodeListEntry {
    /// Writes the fields committed to by the entry hash: the network form
    /// without its leading version.
    pub fn consensus_encode_for_hash<W: io::Write + ?Sized>(
        &self,
        w: &mut W,
    ) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.pro_reg_tx_hash.consensus_encode(w)?;
        len += self.confirmed_hash.consensus_encode(w)?;
        len += self.service_address.consensus_encode(w)?;
        len += self.operator_public_key.consensus_encode(w)?;
        len += self.key_id_voting.consensus_encode(w)?;
        len += self.is_valid.consensus_encode(w)?;
        if self.version == MasternodeListEntryVersion::Basic {
            len += self.mn_type.consensus_encode(w)?;
        }
        Ok(len)
    }

    /// The merkle leaf of this entry in `merkleRootMNList`.
    pub fn calculate_entry_hash(&self) -> sha256d::Hash {
        let mut writer = Vec::new();
        self.consensus_encode_for_hash(&mut writer).expect("engines don't error");
        sha256d::Hash::hash(&writer)
    }
}

#[cfg(test)]
mod tests {
    use hashes::Hash;

    use super::*;
    use crate::blockdata::script::ScriptBuf;
    use crate::bls_sig_utils::BLSPublicKey;
    use crate::consensus::serialize;
    use crate::hash_types::{ConfirmedHash, PlatformNodeId, ProTxHash, PubkeyHash};
    use crate::sml::masternode_list_entry::EntryMasternodeType;

    fn entry() -> MasternodeListEntry {
        MasternodeListEntry {
            version: MasternodeListEntryVersion::Basic,
            pro_reg_tx_hash: ProTxHash::from_byte_array([1; 32]),
            confirmed_hash: ConfirmedHash::from_byte_array([2; 32]),
            service_address: "10.0.0.1:9999".parse().unwrap(),
            operator_public_key: BLSPublicKey::from([3; 48]),
            key_id_voting: PubkeyHash::from_byte_array([4; 20]),
            is_valid: true,
            mn_type: EntryMasternodeType::HighPerformance {
                platform_http_port: 443,
                platform_node_id: PlatformNodeId::from_byte_array([6; 20]),
            },
            payout_script: ScriptBuf::new(),
            operator_payout_script: ScriptBuf::new(),
        }
    }

    #[test]
    fn hash_covers_network_form_minus_version() {
        let entry = entry();
        let network = serialize(&entry);
        assert_eq!(entry.calculate_entry_hash(), sha256d::Hash::hash(&network[2..]));
    }

    #[test]
    fn payout_scripts_do_not_affect_the_hash() {
        let a = entry();
        let mut b = a.clone();
        b.payout_script = ScriptBuf::new_p2pkh(&PubkeyHash::from_byte_array([7; 20]));
        assert_eq!(a.calculate_entry_hash(), b.calculate_entry_hash());
    }

    #[test]
    fn every_hashed_field_changes_the_hash() {
        let a = entry();
        let mutations: Vec<fn(&mut MasternodeListEntry)> = vec![
            |e: &mut MasternodeListEntry| e.confirmed_hash = ConfirmedHash::from_byte_array([9; 32]),
            |e: &mut MasternodeListEntry| e.service_address = "10.0.0.2:9999".parse().unwrap(),
            |e: &mut MasternodeListEntry| e.operator_public_key = BLSPublicKey::from([9; 48]),
            |e: &mut MasternodeListEntry| e.key_id_voting = PubkeyHash::from_byte_array([9; 20]),
            |e: &mut MasternodeListEntry| e.is_valid = false,
            |e: &mut MasternodeListEntry| e.mn_type = EntryMasternodeType::Regular,
            |e: &mut MasternodeListEntry| e.version = MasternodeListEntryVersion::LegacyBls,
        ];
        for mutate in mutations {
            let mut b = a.clone();
            mutate(&mut b);
            assert_ne!(a.calculate_entry_hash(), b.calculate_entry_hash(), "{:?}", b);
        }
    }
}
