// wallet-core/src/config.rs
//
// Generation parameters: network, entropy size, optional BIP-39 passphrase

use crate::chains::Network;
use crate::crypto::entropy::validate_bit_length;
use crate::error::WalletResult;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Default entropy: 128 bits → 12 words
pub const DEFAULT_ENTROPY_BITS: usize = 128;

/// Wallet generation config
///
/// `Default` = testnet, 128 bits, không passphrase.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WalletConfig {
    pub network: Network,
    pub entropy_bits: usize,
    /// Zeroized on drop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<Zeroizing<String>>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: Network::Testnet,
            entropy_bits: DEFAULT_ENTROPY_BITS,
            passphrase: None,
        }
    }
}

// Không in passphrase
impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("network", &self.network)
            .field("entropy_bits", &self.entropy_bits)
            .field(
                "passphrase",
                &self.passphrase.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl WalletConfig {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            entropy_bits: DEFAULT_ENTROPY_BITS,
            passphrase: None,
        }
    }

    pub fn with_entropy_bits(mut self, bits: usize) -> Self {
        self.entropy_bits = bits;
        self
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(Zeroizing::new(passphrase.into()));
        self
    }

    /// Passphrase cho seed derivation, `""` nếu không có
    pub fn passphrase(&self) -> &str {
        self.passphrase.as_ref().map(|p| p.as_str()).unwrap_or("")
    }

    /// Kiểm tra config trước khi chạy pipeline
    ///
    /// Lỗi entropy size trả nguyên `InvalidParameter`.
    pub fn validate(&self) -> WalletResult<()> {
        validate_bit_length(self.entropy_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WalletError;

    #[test]
    fn test_default() {
        let config = WalletConfig::default();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.entropy_bits, 128);
        assert_eq!(config.passphrase(), "");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = WalletConfig::new(Network::Bitcoin)
            .with_entropy_bits(256)
            .with_passphrase("TREZOR");
        assert_eq!(config.network, Network::Bitcoin);
        assert_eq!(config.entropy_bits, 256);
        assert_eq!(config.passphrase(), "TREZOR");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_entropy() {
        let config = WalletConfig::default().with_entropy_bits(100);
        assert!(matches!(
            config.validate(),
            Err(WalletError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_serde_camel_case() {
        let json = r#"{"network":"bitcoin","entropyBits":160}"#;
        let config: WalletConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.network, Network::Bitcoin);
        assert_eq!(config.entropy_bits, 160);
        assert!(config.passphrase.is_none());

        let out = serde_json::to_string(&WalletConfig::default()).unwrap();
        assert_eq!(out, r#"{"network":"testnet","entropyBits":128}"#);
    }

    #[test]
    fn test_serde_partial_with_passphrase() {
        // Field thiếu lấy từ Default
        let json = r#"{"passphrase":"TREZOR"}"#;
        let config: WalletConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.entropy_bits, DEFAULT_ENTROPY_BITS);
        assert_eq!(config.passphrase(), "TREZOR");

        let out = serde_json::to_string(&config).unwrap();
        assert_eq!(
            out,
            r#"{"network":"testnet","entropyBits":128,"passphrase":"TREZOR"}"#
        );
    }

    #[test]
    fn test_debug_redacts_passphrase() {
        let config = WalletConfig::default().with_passphrase("hunter2");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("REDACTED"));
    }
}
