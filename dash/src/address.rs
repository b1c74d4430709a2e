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

//! Base58check Dash addresses.
//!
//! Used to render voting key ids and payout scripts the way Dash Core's RPC
//! does (`EncodeDestination`).

use std::fmt;

use dash_network::Network;
use hashes::Hash;

use crate::blockdata::script::{ScriptBuf, ScriptDestination};
use crate::hash_types::{PubkeyHash, ScriptHash};

/// A Dash address: a payload plus the network whose version byte it is rendered with.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Address {
    network: Network,
    payload: ScriptDestination,
}

impl Address {
    /// A pay-to-pubkey-hash address.
    pub fn p2pkh(pubkey_hash: PubkeyHash, network: Network) -> Address {
        Address { network, payload: ScriptDestination::PubkeyHash(pubkey_hash) }
    }

    /// A pay-to-script-hash address.
    pub fn p2sh(script_hash: ScriptHash, network: Network) -> Address {
        Address { network, payload: ScriptDestination::ScriptHash(script_hash) }
    }

    /// The address a standard script pays to, or `None` when the script has no
    /// address form.
    pub fn from_script(script: &ScriptBuf, network: Network) -> Option<Address> {
        script.destination().map(|payload| Address { network, payload })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn payload(&self) -> &ScriptDestination {
        &self.payload
    }

    /// The output script paying to this address.
    pub fn script_pubkey(&self) -> ScriptBuf {
        match &self.payload {
            ScriptDestination::PubkeyHash(hash) => ScriptBuf::new_p2pkh(hash),
            ScriptDestination::ScriptHash(hash) => ScriptBuf::new_p2sh(hash),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prefixed = [0u8; 21];
        match &self.payload {
            ScriptDestination::PubkeyHash(hash) => {
                prefixed[0] = self.network.pubkey_address_prefix();
                prefixed[1..].copy_from_slice(hash.as_byte_array());
            }
            ScriptDestination::ScriptHash(hash) => {
                prefixed[0] = self.network.script_address_prefix();
                prefixed[1..].copy_from_slice(hash.as_byte_array());
            }
        }
        f.write_str(&bs58::encode(prefixed).with_check().into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_p2pkh_starts_with_x() {
        let address = Address::p2pkh(PubkeyHash::from_byte_array([0x11; 20]), Network::Dash);
        assert!(address.to_string().starts_with('X'), "{}", address);
    }

    #[test]
    fn testnet_p2pkh_starts_with_y() {
        let address = Address::p2pkh(PubkeyHash::from_byte_array([0x11; 20]), Network::Testnet);
        assert!(address.to_string().starts_with('y'), "{}", address);
    }

    #[test]
    fn mainnet_p2sh_starts_with_7() {
        let address = Address::p2sh(ScriptHash::from_byte_array([0x22; 20]), Network::Dash);
        assert!(address.to_string().starts_with('7'), "{}", address);
    }

    #[test]
    fn base58check_payload_round_trips() {
        let hash = PubkeyHash::from_byte_array([0xab; 20]);
        let address = Address::p2pkh(hash, Network::Regtest);
        let decoded = bs58::decode(address.to_string()).with_check(None).into_vec().unwrap();
        assert_eq!(decoded[0], 140);
        assert_eq!(&decoded[1..], hash.as_byte_array());
        assert_eq!(Address::from_script(&address.script_pubkey(), Network::Regtest), Some(address));
    }
}
