// wallet-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - BIP-32 HD tree over secp256k1
//
// Kiến trúc:
// ┌─────────────────────────────────────────────────┐
// │  Seed (64 bytes from BIP-39 Mnemonic)           │
// │                    │                            │
// │                    ▼  HMAC-SHA512("Bitcoin seed")│
// │            Master ExtendedKey (depth 0)         │
// │                    │                            │
// │                    ▼  CKDpriv / CKDpub          │
// │   m/84' → 84'/coin' → account' → change → index │
// │                    │                            │
// │                    ▼                            │
// │     private scalar + compressed public key      │
// └─────────────────────────────────────────────────┘

pub mod encoding;
pub mod secp256k1;

// Re-exports
pub use encoding::KeyFormat;
pub use secp256k1::Secp256k1Deriver;

use crate::crypto::hash::hash160;
use crate::crypto::paths::{ChildNumber, DerivationPath};
use crate::error::{CryptoError, WalletError, WalletResult};
use k256::{PublicKey, SecretKey};
use zeroize::Zeroizing;

// =============================================================================
// COMMON TYPES
// =============================================================================

/// Key material của một node: private (ký được) hoặc public (chỉ derive)
#[derive(Clone, PartialEq)]
pub enum KeyMaterial {
    Private(SecretKey),
    Public(PublicKey),
}

/// A node in the BIP-32 tree: key + chain code + position metadata.
///
/// A private node can always be projected to its public node with
/// [`ExtendedKey::to_public`]; the reverse is impossible.
#[derive(Clone, PartialEq)]
pub struct ExtendedKey {
    pub(crate) key: KeyMaterial,
    pub(crate) chain_code: Zeroizing<[u8; 32]>,
    pub(crate) depth: u8,
    pub(crate) parent_fingerprint: [u8; 4],
    pub(crate) child_number: ChildNumber,
}

// Custom Debug - KHÔNG hiển thị private key / chain code
impl std::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("private", &self.is_private())
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &self.child_number)
            .finish_non_exhaustive()
    }
}

impl ExtendedKey {
    /// Master key from a BIP-39 (or raw BIP-32) seed.
    #[inline]
    pub fn master_from_seed(seed: &[u8]) -> WalletResult<Self> {
        Secp256k1Deriver::master_from_seed(seed)
    }

    #[inline]
    pub fn derive_child(&self, child: ChildNumber) -> WalletResult<Self> {
        Secp256k1Deriver::derive_child(self, child)
    }

    #[inline]
    pub fn derive_path(&self, path: &DerivationPath) -> WalletResult<Self> {
        Secp256k1Deriver::derive_path(self, path)
    }

    #[inline]
    pub fn to_public(&self) -> Self {
        Secp256k1Deriver::to_public(self)
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    #[inline]
    pub fn is_private(&self) -> bool {
        matches!(self.key, KeyMaterial::Private(_))
    }

    #[inline]
    pub fn key_material(&self) -> &KeyMaterial {
        &self.key
    }

    pub fn public_key(&self) -> PublicKey {
        match &self.key {
            KeyMaterial::Private(secret) => secret.public_key(),
            KeyMaterial::Public(public) => *public,
        }
    }

    /// 33-byte SEC1 compressed public key
    pub fn public_key_bytes(&self) -> [u8; 33] {
        Secp256k1Deriver::compress(&self.public_key())
    }

    /// 32-byte private scalar, `None` for public nodes.
    pub fn private_key_bytes(&self) -> Option<Zeroizing<[u8; 32]>> {
        match &self.key {
            KeyMaterial::Private(secret) => Some(Zeroizing::new(secret.to_bytes().into())),
            KeyMaterial::Public(_) => None,
        }
    }

    #[inline]
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[inline]
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    #[inline]
    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }

    /// HASH160 of the compressed public key
    pub fn identifier(&self) -> [u8; 20] {
        hash160(&self.public_key_bytes())
    }

    /// First 4 bytes of [`identifier`](Self::identifier)
    pub fn fingerprint(&self) -> [u8; 4] {
        let id = self.identifier();
        [id[0], id[1], id[2], id[3]]
    }
}

/// Kết quả derivation chứa private key + public key + path
pub struct DerivedKey {
    /// Private key bytes (32 bytes, auto-zeroize khi drop)
    pub private_key: Zeroizing<[u8; 32]>,
    /// SEC1 compressed public key
    pub public_key: [u8; 33],
    /// Derivation path thực tế (có thể khác path yêu cầu nếu đã retry index)
    pub path: DerivationPath,
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("public_key", &hex::encode(self.public_key))
            .field("path", &self.path.to_string())
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// UNIFIED DERIVER
// =============================================================================
/// Key Deriver - Entry point: seed + path -> leaf key
pub struct KeyDeriver;

impl KeyDeriver {
    /// Derive leaf key từ BIP-39 seed
    ///
    /// # Arguments
    /// * `seed` - BIP-39 seed (64 bytes) hoặc raw BIP-32 seed (16..=64 bytes)
    /// * `path` - Derivation path (e.g., `m/84'/1'/0'/0/0`)
    pub fn derive(seed: &[u8], path: &DerivationPath) -> WalletResult<DerivedKey> {
        let master = Secp256k1Deriver::master_from_seed(seed)?;
        let (leaf, effective_path) = Secp256k1Deriver::derive_path_traced(&master, path)?;
        let private_key = leaf.private_key_bytes().ok_or_else(|| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(
                "Derived node has no private key".to_string(),
            ))
        })?;

        Ok(DerivedKey {
            private_key,
            public_key: leaf.public_key_bytes(),
            path: effective_path,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::DerivationPaths;

    const TEST_SEED: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

    #[test]
    fn test_derive_bip84_first_key() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let path = DerivationPaths::BTC_NATIVE_SEGWIT_0.parse().unwrap();
        let key = KeyDeriver::derive(&seed, &path).unwrap();

        assert_eq!(
            hex::encode(key.public_key),
            "0330d54fd0dd420a6e5f8d3624f5f3482cae350f79d5f0753bf5beef9c2d91af3c"
        );
        assert_eq!(key.path.to_string(), "m/84'/0'/0'/0/0");
    }

    #[test]
    fn test_invalid_seed() {
        let path = DerivationPaths::BTC_NATIVE_SEGWIT_0.parse().unwrap();
        for len in [0usize, 8, 15, 65] {
            let bad_seed = vec![0u8; len];
            assert_eq!(
                KeyDeriver::derive(&bad_seed, &path).unwrap_err(),
                WalletError::Crypto(CryptoError::InvalidSeedLength(len))
            );
        }
    }

    #[test]
    fn test_consistency() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let path = DerivationPaths::BTC_NATIVE_SEGWIT_TESTNET_0.parse().unwrap();
        let k1 = KeyDeriver::derive(&seed, &path).unwrap();
        let k2 = KeyDeriver::derive(&seed, &path).unwrap();
        assert_eq!(&*k1.private_key, &*k2.private_key);
        assert_eq!(k1.public_key, k2.public_key);
    }

    #[test]
    fn test_mainnet_and_testnet_paths_differ() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let main = KeyDeriver::derive(&seed, &DerivationPaths::BTC_NATIVE_SEGWIT_0.parse().unwrap())
            .unwrap();
        let test = KeyDeriver::derive(
            &seed,
            &DerivationPaths::BTC_NATIVE_SEGWIT_TESTNET_0.parse().unwrap(),
        )
        .unwrap();
        assert_ne!(&*main.private_key, &*test.private_key);
    }

    #[test]
    fn test_fingerprint_is_identifier_prefix() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let master = ExtendedKey::master_from_seed(&seed).unwrap();
        assert_eq!(master.fingerprint(), master.identifier()[..4]);
        // BIP-84 reference master fingerprint
        assert_eq!(hex::encode(master.fingerprint()), "73c5da0a");
    }

    #[test]
    fn test_debug_does_not_leak() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let path = DerivationPaths::BTC_NATIVE_SEGWIT_0.parse().unwrap();
        let key = KeyDeriver::derive(&seed, &path).unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(&hex::encode(*key.private_key)));
    }
}
