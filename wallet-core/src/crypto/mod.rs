// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! This module implements the cryptographic pipeline behind a Bitcoin Native SegWit wallet:
//!
//! - **Entropy**: CSPRNG entropy of a BIP-39 size via [`EntropySource`].
//! - **Mnemonic**: BIP-39 encode/decode with checksum via [`MnemonicCodec`] and [`WalletMnemonic`].
//! - **Seed**: PBKDF2-HMAC-SHA512 key stretching via [`SeedDerivation`].
//! - **Key Derivation**: BIP-32 over secp256k1 via [`ExtendedKey`] and [`KeyDeriver`].
//! - **Derivation Paths**: path model and BIP-84 builders via [`DerivationPath`] and [`DerivationPaths`].

pub mod entropy;
pub mod hash;
pub mod key_deriver;
pub mod mnemonic;
pub mod paths;
pub mod seed;

// Re-exports for cleaner API access
pub use entropy::{EntropySource, OsEntropy};
pub use key_deriver::{DerivedKey, ExtendedKey, KeyDeriver, KeyFormat};
pub use mnemonic::{MnemonicCodec, WalletMnemonic, WordCount};
pub use paths::{ChildNumber, DerivationPath, DerivationPaths};
pub use seed::{Seed, SeedDerivation};
