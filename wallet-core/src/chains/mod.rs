// wallet-core/src/chains/mod.rs
//
// Chain Parameters - Bitcoin mainnet / testnet
//
// Mọi hằng số phụ thuộc network (HRP, WIF prefix, coin type, version bytes)
// được gom về đây, các module khác chỉ nhận `Network`.

pub mod bitcoin;

use crate::error::{WalletError, WalletResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target network cho address, WIF và coin_type trong path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Bitcoin mainnet (bc1q..., WIF K/L)
    Bitcoin,
    /// Bitcoin testnet (tb1q..., WIF c)
    Testnet,
}

impl Network {
    /// Static parameters for this network.
    #[inline]
    pub fn params(self) -> &'static NetworkParams {
        match self {
            Network::Bitcoin => &BITCOIN,
            Network::Testnet => &TESTNET,
        }
    }

    #[inline]
    pub fn is_testnet(self) -> bool {
        matches!(self, Network::Testnet)
    }

    /// Resolve a network from its WIF version byte.
    pub fn from_wif_prefix(prefix: u8) -> Option<Self> {
        [Network::Bitcoin, Network::Testnet]
            .into_iter()
            .find(|n| n.params().wif_prefix == prefix)
    }

    /// Resolve a network from its bech32 human-readable part.
    pub fn from_hrp(hrp: &str) -> Option<Self> {
        [Network::Bitcoin, Network::Testnet]
            .into_iter()
            .find(|n| n.params().hrp == hrp)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Bitcoin => f.write_str("bitcoin"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> WalletResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bitcoin" | "main" | "mainnet" => Ok(Network::Bitcoin),
            "testnet" | "test" => Ok(Network::Testnet),
            other => Err(WalletError::InvalidParameter(format!(
                "Unknown network '{}'. Expected 'main' or 'test'.",
                other
            ))),
        }
    }
}

/// Extended key version bytes (BIP-32 serialization)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyVersions {
    pub private: [u8; 4],
    pub public: [u8; 4],
}

/// Network parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkParams {
    pub name: &'static str,
    /// Bech32 human-readable part
    pub hrp: &'static str,
    /// WIF version byte
    pub wif_prefix: u8,
    /// SLIP-44 coin type dùng trong BIP-84 path
    pub coin_type: u32,
    /// xprv/xpub (mainnet) hoặc tprv/tpub (testnet)
    pub legacy_versions: KeyVersions,
    /// zprv/zpub (mainnet) hoặc vprv/vpub (testnet), BIP-84
    pub segwit_versions: KeyVersions,
}

static BITCOIN: NetworkParams = NetworkParams {
    name: "Bitcoin Mainnet",
    hrp: "bc",
    wif_prefix: 0x80,
    coin_type: 0,
    legacy_versions: KeyVersions {
        private: [0x04, 0x88, 0xAD, 0xE4],
        public: [0x04, 0x88, 0xB2, 0x1E],
    },
    segwit_versions: KeyVersions {
        private: [0x04, 0xB2, 0x43, 0x0C],
        public: [0x04, 0xB2, 0x47, 0x46],
    },
};

static TESTNET: NetworkParams = NetworkParams {
    name: "Bitcoin Testnet",
    hrp: "tb",
    wif_prefix: 0xEF,
    coin_type: 1,
    legacy_versions: KeyVersions {
        private: [0x04, 0x35, 0x83, 0x94],
        public: [0x04, 0x35, 0x87, 0xCF],
    },
    segwit_versions: KeyVersions {
        private: [0x04, 0x5F, 0x18, 0xBC],
        public: [0x04, 0x5F, 0x1C, 0xF6],
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params() {
        assert_eq!(Network::Bitcoin.params().hrp, "bc");
        assert_eq!(Network::Testnet.params().hrp, "tb");
        assert_eq!(Network::Bitcoin.params().coin_type, 0);
        assert_eq!(Network::Testnet.params().coin_type, 1);
        assert_eq!(Network::Bitcoin.params().wif_prefix, 0x80);
        assert_eq!(Network::Testnet.params().wif_prefix, 0xEF);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("main".parse::<Network>().unwrap(), Network::Bitcoin);
        assert_eq!("Mainnet".parse::<Network>().unwrap(), Network::Bitcoin);
        assert_eq!("test".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!(" testnet ".parse::<Network>().unwrap(), Network::Testnet);
        assert!(matches!(
            "regtest".parse::<Network>(),
            Err(WalletError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_lookup_by_prefix_and_hrp() {
        assert_eq!(Network::from_wif_prefix(0x80), Some(Network::Bitcoin));
        assert_eq!(Network::from_wif_prefix(0xEF), Some(Network::Testnet));
        assert_eq!(Network::from_wif_prefix(0x00), None);
        assert_eq!(Network::from_hrp("tb"), Some(Network::Testnet));
        assert_eq!(Network::from_hrp("ltc"), None);
    }

    #[test]
    fn test_display_roundtrip() {
        for n in [Network::Bitcoin, Network::Testnet] {
            assert_eq!(n.to_string().parse::<Network>().unwrap(), n);
        }
    }
}
