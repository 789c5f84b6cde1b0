// wallet-core/src/wallet.rs
//
// Wallet Assembler - single-use BIP-84 wallet
//
// entropy → mnemonic → seed → master → m/84'/coin'/0'/0/0 → pubkey → address + WIF

use crate::chains::bitcoin::{SegwitAddress, Wif};
use crate::chains::Network;
use crate::config::WalletConfig;
use crate::crypto::entropy::{EntropySource, OsEntropy};
use crate::crypto::key_deriver::KeyDeriver;
use crate::crypto::mnemonic::{MnemonicCodec, WalletMnemonic};
use crate::crypto::paths::{DerivationPath, DerivationPaths};
use crate::error::WalletResult;
use serde::Serialize;
use tracing::{debug, info};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// =============================================================================
// WALLET
// =============================================================================

/// Kết quả một lần chạy: immutable, không persist
pub struct Wallet {
    mnemonic: WalletMnemonic,
    address: String,
    private_key_wif: Zeroizing<String>,
    public_key: [u8; 33],
    network: Network,
    path: DerivationPath,
}

// Custom Debug - KHÔNG hiển thị mnemonic / WIF
impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("network", &self.network)
            .field("path", &self.path.to_string())
            .field("mnemonic", &"[REDACTED]")
            .field("private_key_wif", &"[REDACTED]")
            .finish()
    }
}

impl Wallet {
    /// Recovery phrase
    ///
    /// # Warning
    /// Cẩn thận khi hiển thị hoặc log giá trị này!
    #[inline]
    pub fn mnemonic(&self) -> &str {
        self.mnemonic.phrase()
    }

    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Compressed WIF private key
    #[inline]
    pub fn private_key_wif(&self) -> &str {
        &self.private_key_wif
    }

    #[inline]
    pub fn public_key(&self) -> &[u8; 33] {
        &self.public_key
    }

    #[inline]
    pub fn network(&self) -> Network {
        self.network
    }

    #[inline]
    pub fn path(&self) -> &DerivationPath {
        &self.path
    }

    /// Presentation shape {mnemonic, address, privateKeyWif, network}
    pub fn export(&self) -> WalletExport {
        WalletExport {
            mnemonic: self.mnemonic.phrase().to_string(),
            address: self.address.clone(),
            private_key_wif: self.private_key_wif.to_string(),
            network: self.network,
        }
    }
}

/// Serializable wallet view, zeroized on drop
#[derive(Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct WalletExport {
    pub mnemonic: String,
    pub address: String,
    pub private_key_wif: String,
    #[zeroize(skip)]
    pub network: Network,
}

// =============================================================================
// ASSEMBLER
// =============================================================================

/// Wallet Assembler - orchestrates the BIP-39/32/84 pipeline
///
/// Không retry ở tầng này: lỗi nào cũng abort và trả nguyên vẹn cho caller.
pub struct WalletAssembler<E: EntropySource = OsEntropy> {
    entropy: E,
    codec: MnemonicCodec,
}

impl WalletAssembler<OsEntropy> {
    /// Assembler backed by the OS CSPRNG
    pub fn new() -> Self {
        Self::with_entropy_source(OsEntropy)
    }
}

impl Default for WalletAssembler<OsEntropy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntropySource> WalletAssembler<E> {
    pub fn with_entropy_source(entropy: E) -> Self {
        Self {
            entropy,
            codec: MnemonicCodec::english(),
        }
    }

    /// Generate a fresh wallet từ entropy mới
    ///
    /// # Errors
    /// - `InvalidParameter` nếu `config.entropy_bits` không hợp lệ
    /// - `EntropyUnavailable` nếu entropy source lỗi
    /// - Mọi lỗi derivation/encoding bên dưới
    pub fn generate(&self, config: &WalletConfig) -> WalletResult<Wallet> {
        let entropy = self.entropy.generate(config.entropy_bits)?;
        debug!(bits = config.entropy_bits, "Entropy generated");

        let mnemonic = self.codec.encode(&entropy)?;
        debug!(words = mnemonic.word_count(), "Mnemonic encoded");

        self.assemble(mnemonic, config)
    }

    /// Rebuild the wallet từ mnemonic có sẵn (+ passphrase trong config)
    ///
    /// `config.entropy_bits` bị bỏ qua; độ dài lấy từ phrase.
    pub fn restore(&self, phrase: &str, config: &WalletConfig) -> WalletResult<Wallet> {
        let entropy = self.codec.decode(phrase)?;
        let mnemonic = self.codec.encode(&entropy)?;
        debug!(words = mnemonic.word_count(), "Mnemonic restored");

        self.assemble(mnemonic, config)
    }

    fn assemble(&self, mnemonic: WalletMnemonic, config: &WalletConfig) -> WalletResult<Wallet> {
        let network = config.network;

        let seed = mnemonic.to_seed(Some(config.passphrase()));
        debug!("Seed derived");

        let path = DerivationPaths::bip84_first_receive(network)?;
        let derived = KeyDeriver::derive(seed.as_ref(), &path)?;
        debug!(path = %derived.path, "Key derived");

        let address = SegwitAddress::encode(&derived.public_key, network)?;
        let private_key_wif = Wif::encode(&derived.private_key, network);

        info!(%network, %address, "Wallet assembled");

        Ok(Wallet {
            mnemonic,
            address,
            private_key_wif,
            public_key: derived.public_key,
            network,
            path: derived.path,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WalletError;

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    struct FixedEntropy(u8);

    impl EntropySource for FixedEntropy {
        fn try_fill(&self, dest: &mut [u8]) -> WalletResult<()> {
            dest.fill(self.0);
            Ok(())
        }
    }

    struct BrokenSource;

    impl EntropySource for BrokenSource {
        fn try_fill(&self, _dest: &mut [u8]) -> WalletResult<()> {
            Err(WalletError::EntropyUnavailable("no entropy".to_string()))
        }
    }

    #[test]
    fn test_generate_testnet_end_to_end() {
        // 128 bit zero entropy = "abandon ... about"
        let assembler = WalletAssembler::with_entropy_source(FixedEntropy(0));
        let wallet = assembler.generate(&WalletConfig::default()).unwrap();

        assert_eq!(wallet.mnemonic(), TEST_MNEMONIC);
        assert_eq!(wallet.network(), Network::Testnet);
        assert_eq!(wallet.path().to_string(), "m/84'/1'/0'/0/0");
        assert!(wallet.address().starts_with("tb1q"));
        assert_eq!(wallet.address().len(), 42);
        assert!(wallet.private_key_wif().starts_with('c'));
        println!("Address: {}", wallet.address());
    }

    #[test]
    fn test_generate_mainnet_bip84_vector() {
        let assembler = WalletAssembler::with_entropy_source(FixedEntropy(0));
        let wallet = assembler
            .generate(&WalletConfig::new(Network::Bitcoin))
            .unwrap();

        assert_eq!(wallet.address(), "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu");
        assert_eq!(
            wallet.private_key_wif(),
            "KyZpNDKnfs94vbrwhJneDi77V6jF64PWPF8x5cdJb8ifgg2DUc9d"
        );
        assert_eq!(
            hex::encode(wallet.public_key()),
            "0330d54fd0dd420a6e5f8d3624f5f3482cae350f79d5f0753bf5beef9c2d91af3c"
        );
    }

    #[test]
    fn test_restore_reproduces_wallet() {
        let config = WalletConfig::default().with_passphrase("extra words");
        let original = WalletAssembler::new().generate(&config).unwrap();
        let restored = WalletAssembler::new()
            .restore(original.mnemonic(), &config)
            .unwrap();

        assert_eq!(restored.address(), original.address());
        assert_eq!(restored.private_key_wif(), original.private_key_wif());
        assert_eq!(restored.public_key(), original.public_key());
    }

    #[test]
    fn test_passphrase_changes_address() {
        let assembler = WalletAssembler::with_entropy_source(FixedEntropy(7));
        let plain = assembler.generate(&WalletConfig::default()).unwrap();
        let salted = assembler
            .generate(&WalletConfig::default().with_passphrase("TREZOR"))
            .unwrap();
        assert_eq!(plain.mnemonic(), salted.mnemonic());
        assert_ne!(plain.address(), salted.address());
    }

    #[test]
    fn test_fresh_entropy_gives_new_address() {
        let assembler = WalletAssembler::new();
        let a = assembler.generate(&WalletConfig::default()).unwrap();
        let b = assembler.generate(&WalletConfig::default()).unwrap();
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_entropy_failure_propagates() {
        let assembler = WalletAssembler::with_entropy_source(BrokenSource);
        let result = assembler.generate(&WalletConfig::default());
        assert!(matches!(result, Err(WalletError::EntropyUnavailable(_))));
    }

    #[test]
    fn test_invalid_entropy_bits() {
        let assembler = WalletAssembler::new();
        let result = assembler.generate(&WalletConfig::default().with_entropy_bits(64));
        assert!(matches!(result, Err(WalletError::InvalidParameter(_))));
    }

    #[test]
    fn test_word_count_follows_entropy_bits() {
        let assembler = WalletAssembler::with_entropy_source(FixedEntropy(0xAB));
        for (bits, words) in [(128, 12), (160, 15), (192, 18), (224, 21), (256, 24)] {
            let wallet = assembler
                .generate(&WalletConfig::default().with_entropy_bits(bits))
                .unwrap();
            assert_eq!(wallet.mnemonic().split(' ').count(), words);
        }
    }

    #[test]
    fn test_restore_rejects_bad_phrase() {
        let result = WalletAssembler::new().restore(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon",
            &WalletConfig::default(),
        );
        assert!(matches!(result, Err(WalletError::Mnemonic(_))));
    }

    #[test]
    fn test_export_json_shape() {
        let assembler = WalletAssembler::with_entropy_source(FixedEntropy(0));
        let wallet = assembler.generate(&WalletConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::to_value(wallet.export()).unwrap();

        assert_eq!(json["mnemonic"], TEST_MNEMONIC);
        assert_eq!(json["address"], wallet.address());
        assert_eq!(json["privateKeyWif"], wallet.private_key_wif());
        assert_eq!(json["network"], "testnet");
    }

    #[test]
    fn test_debug_does_not_leak() {
        let assembler = WalletAssembler::with_entropy_source(FixedEntropy(0));
        let wallet = assembler.generate(&WalletConfig::default()).unwrap();
        let debug = format!("{:?}", wallet);
        assert!(!debug.contains("abandon"));
        assert!(!debug.contains(wallet.private_key_wif()));
    }
}
