use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Address Error: {0}")]
    Address(#[from] AddressError),

    #[error("Config Error: {0}")]
    Config(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid entropy length: {0} bytes. Expected 16, 20, 24, 28 or 32 bytes.")]
    InvalidEntropyLength(usize),

    #[error("Invalid word count: {0}. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word '{0}' not found in the BIP-39 wordlist.")]
    UnknownWord(String),

    #[error("Checksum validation failed.")]
    ChecksumMismatch,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Hardened derivation requires a private parent key")]
    HardenedDerivationRequiresPrivateKey,

    #[error("Derived key for child index {0:#010x} is invalid")]
    InvalidTweak(u32),

    #[error("Maximum derivation depth (255) exceeded")]
    MaxDepthExceeded,

    #[error("Derivation failed at path step {position}: {source}")]
    PathStep {
        position: usize,
        source: Box<CryptoError>,
    },

    #[error("Invalid seed length: {0} bytes. Expected 16..=64 bytes.")]
    InvalidSeedLength(usize),

    #[error("Seed produced an invalid master key")]
    InvalidMasterKey,

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Invalid extended key: {0}")]
    InvalidExtendedKey(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid public key length: {0} bytes. Expected 33 (compressed).")]
    InvalidPublicKeyLength(usize),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid WIF: {0}")]
    InvalidWif(String),
}

impl CryptoError {
    /// Wraps a step failure with its position in the derivation path.
    pub(crate) fn at_step(self, position: usize) -> Self {
        CryptoError::PathStep {
            position,
            source: Box::new(self),
        }
    }
}
