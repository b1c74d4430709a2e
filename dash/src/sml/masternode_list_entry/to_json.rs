use std::fmt;

use dash_network::Network;
use hashes::Hash;
use serde_json::{Map, Value, json};

use crate::address::Address;
use crate::hash_types::PlatformNodeId;
use crate::sml::masternode_list_entry::{EntryMasternodeType, MasternodeListEntry};

impl MasternodeListEntry {
    /// Address of the voting key on `network`.
    pub fn voting_address(&self, network: Network) -> Address {
        Address::p2pkh(self.key_id_voting, network)
    }

    /// Renders the entry as Dash Core's `protx diff` / `mnlistdiff` RPCs do.
    ///
    /// Payout addresses are only rendered when `extended`, and each is left
    /// out when its script has no address form.
    pub fn to_json(&self, network: Network, extended: bool) -> Value {
        let mut obj = Map::new();
        obj.insert("nVersion".into(), json!(self.version.as_u16()));
        obj.insert("nType".into(), json!(self.mn_type.index()));
        obj.insert("proRegTxHash".into(), json!(self.pro_reg_tx_hash.to_string()));
        obj.insert("confirmedHash".into(), json!(self.confirmed_hash.to_string()));
        obj.insert("service".into(), json!(self.service_address.to_string()));
        obj.insert("pubKeyOperator".into(), json!(self.operator_public_key.to_string()));
        obj.insert("votingAddress".into(), json!(self.voting_address(network).to_string()));
        obj.insert("isValid".into(), json!(self.is_valid));
        if let EntryMasternodeType::HighPerformance { platform_http_port, platform_node_id } =
            &self.mn_type
        {
            obj.insert("platformHTTPPort".into(), json!(platform_http_port));
            obj.insert("platformNodeID".into(), json!(platform_node_id.to_string()));
        }

        if extended {
            if let Some(address) = Address::from_script(&self.payout_script, network) {
                obj.insert("payoutAddress".into(), json!(address.to_string()));
            }
            if let Some(address) = Address::from_script(&self.operator_payout_script, network) {
                obj.insert("operatorPayoutAddress".into(), json!(address.to_string()));
            }
        }
        Value::Object(obj)
    }

    /// One-line rendering used in logs, with addresses for `network`.
    pub fn display(&self, network: Network) -> DisplayEntry<'_> {
        DisplayEntry { entry: self, network }
    }
}

/// Helper returned by [`MasternodeListEntry::display`].
pub struct DisplayEntry<'a> {
    entry: &'a MasternodeListEntry,
    network: Network,
}

impl fmt::Display for DisplayEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.entry;
        let payout_address = Address::from_script(&e.payout_script, self.network)
            .map_or_else(|| "unknown".to_string(), |a| a.to_string());
        let operator_payout_address = Address::from_script(&e.operator_payout_script, self.network)
            .map_or_else(|| "none".to_string(), |a| a.to_string());
        let (platform_http_port, platform_node_id) = match e.mn_type {
            EntryMasternodeType::HighPerformance { platform_http_port, platform_node_id } => {
                (platform_http_port, platform_node_id)
            }
            EntryMasternodeType::Regular => (0, PlatformNodeId::all_zeros()),
        };
        write!(
            f,
            "MasternodeListEntry(nVersion={}, nType={}, proRegTxHash={}, confirmedHash={}, \
             service={}, pubKeyOperator={}, votingAddress={}, isValid={}, payoutAddress={}, \
             operatorPayoutAddress={}, platformHTTPPort={}, platformNodeID={})",
            e.version.as_u16(),
            e.mn_type.index(),
            e.pro_reg_tx_hash,
            e.confirmed_hash,
            e.service_address,
            e.operator_public_key,
            e.voting_address(self.network),
            e.is_valid as u8,
            payout_address,
            operator_payout_address,
            platform_http_port,
            platform_node_id,
        )
    }
}

impl fmt::Display for MasternodeListEntry {
    /// Mainnet rendering; use [`MasternodeListEntry::display`] for other networks.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(Network::Dash), f)
    }
}
