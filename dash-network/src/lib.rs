//! Dash network identifiers shared across the mnlistdiff crates.
//!
//! Besides naming the chain, a [`Network`] knows the two protocol facts the
//! diff engine needs from it: where core v20 activates and which base58
//! version bytes its addresses use.

use std::fmt;

/// The Dash chain a diff is computed for.
#[derive(Copy, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Network {
    /// Dash mainnet
    Dash,
    /// Dash's testnet network.
    Testnet,
    /// Dash's devnet network.
    Devnet,
    /// Local regression test network.
    Regtest,
}

impl Network {
    /// Creates a `Network` from the p2p magic bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dash_network::Network;
    ///
    /// assert_eq!(Some(Network::Dash), Network::from_magic(0xBD6B0CBF));
    /// assert_eq!(None, Network::from_magic(0xFFFFFFFF));
    /// ```
    pub fn from_magic(magic: u32) -> Option<Network> {
        match magic {
            0xBD6B0CBF => Some(Network::Dash),
            0xFFCAE2CE => Some(Network::Testnet),
            0xCEFFCAE2 => Some(Network::Devnet),
            0xDCB7C1FC => Some(Network::Regtest),
            _ => None,
        }
    }

    /// Return the network magic bytes, which are encoded little-endian
    /// at the start of every p2p message.
    pub fn magic(self) -> u32 {
        match self {
            Network::Dash => 0xBD6B0CBF,
            Network::Testnet => 0xFFCAE2CE,
            Network::Devnet => 0xCEFFCAE2,
            Network::Regtest => 0xDCB7C1FC,
        }
    }

    /// The known activation height of core v20 (DIP-29 chainlocks in the coinbase).
    pub fn core_v20_activation_height(&self) -> u32 {
        match self {
            Network::Dash => 1987776,
            Network::Testnet => 905100,
            Network::Devnet => 1,
            Network::Regtest => 1,
        }
    }

    /// Whether core v20 is active at the given block height.
    pub fn core_v20_is_active_at(&self, core_block_height: u32) -> bool {
        core_block_height >= self.core_v20_activation_height()
    }

    /// Base58 version byte of pay-to-pubkey-hash addresses.
    pub fn pubkey_address_prefix(&self) -> u8 {
        match self {
            Network::Dash => 76,
            Network::Testnet | Network::Devnet | Network::Regtest => 140,
        }
    }

    /// Base58 version byte of pay-to-script-hash addresses.
    pub fn script_address_prefix(&self) -> u8 {
        match self {
            Network::Dash => 16,
            Network::Testnet | Network::Devnet | Network::Regtest => 19,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Network::Dash => write!(f, "dash"),
            Network::Testnet => write!(f, "testnet"),
            Network::Devnet => write!(f, "devnet"),
            Network::Regtest => write!(f, "regtest"),
        }
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dash" | "mainnet" => Ok(Network::Dash),
            "testnet" | "test" => Ok(Network::Testnet),
            "devnet" | "dev" => Ok(Network::Devnet),
            "regtest" => Ok(Network::Regtest),
            _ => Err(format!("Unknown network type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_round_trips_for_every_network() {
        for network in [Network::Dash, Network::Testnet, Network::Devnet, Network::Regtest] {
            assert_eq!(Network::from_magic(network.magic()), Some(network));
        }
        assert_eq!(Network::from_magic(0x12345678), None);
    }

    #[test]
    fn test_v20_activation() {
        assert!(!Network::Dash.core_v20_is_active_at(1987775));
        assert!(Network::Dash.core_v20_is_active_at(1987776));
        assert!(Network::Regtest.core_v20_is_active_at(1));
        assert!(!Network::Regtest.core_v20_is_active_at(0));
    }

    #[test]
    fn test_address_prefixes() {
        assert_eq!(Network::Dash.pubkey_address_prefix(), 76);
        assert_eq!(Network::Dash.script_address_prefix(), 16);
        assert_eq!(Network::Testnet.pubkey_address_prefix(), 140);
        assert_eq!(Network::Regtest.script_address_prefix(), 19);
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Dash);
        assert_eq!("test".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("dev".parse::<Network>().unwrap(), Network::Devnet);
        assert_eq!("regtest".parse::<Network>().unwrap(), Network::Regtest);
        assert!("invalid".parse::<Network>().is_err());
        assert_eq!(Network::Testnet.to_string(), "testnet");
    }
}
