// wallet-core/src/crypto/key_deriver/encoding.rs
//
// Extended key serialization (BIP-32, 78 bytes, Base58Check)
//
// version(4) || depth(1) || parent_fingerprint(4) || child_number(4)
//            || chain_code(32) || key(33)

use super::{ExtendedKey, KeyMaterial};
use crate::chains::{KeyVersions, Network};
use crate::crypto::paths::ChildNumber;
use crate::error::{CryptoError, WalletError, WalletResult};
use k256::{PublicKey, SecretKey};
use zeroize::Zeroizing;

const SERIALIZED_LEN: usize = 78;

/// Version byte family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    /// xprv/xpub, tprv/tpub
    Legacy,
    /// zprv/zpub, vprv/vpub (BIP-84)
    NativeSegwit,
}

impl KeyFormat {
    fn versions(self, network: Network) -> &'static KeyVersions {
        let params = network.params();
        match self {
            KeyFormat::Legacy => &params.legacy_versions,
            KeyFormat::NativeSegwit => &params.segwit_versions,
        }
    }

    /// (network, format, is_private) cho một version prefix
    fn resolve(version: [u8; 4]) -> Option<(Network, KeyFormat, bool)> {
        for network in [Network::Bitcoin, Network::Testnet] {
            for format in [KeyFormat::Legacy, KeyFormat::NativeSegwit] {
                let versions = format.versions(network);
                if versions.private == version {
                    return Some((network, format, true));
                }
                if versions.public == version {
                    return Some((network, format, false));
                }
            }
        }
        None
    }
}

fn invalid(reason: impl Into<String>) -> WalletError {
    WalletError::Crypto(CryptoError::InvalidExtendedKey(reason.into()))
}

impl ExtendedKey {
    /// Base58Check string (xprv/xpub/zprv/... tùy network, format và loại key)
    pub fn to_extended_string(&self, network: Network, format: KeyFormat) -> Zeroizing<String> {
        let versions = format.versions(network);
        let mut payload = Zeroizing::new(Vec::with_capacity(SERIALIZED_LEN));

        match &self.key {
            KeyMaterial::Private(secret) => {
                payload.extend_from_slice(&versions.private);
                self.write_header(&mut payload);
                payload.push(0x00);
                payload.extend_from_slice(&secret.to_bytes());
            }
            KeyMaterial::Public(_) => {
                payload.extend_from_slice(&versions.public);
                self.write_header(&mut payload);
                payload.extend_from_slice(&self.public_key_bytes());
            }
        }

        Zeroizing::new(bs58::encode(payload.as_slice()).with_check().into_string())
    }

    fn write_header(&self, out: &mut Vec<u8>) {
        out.push(self.depth);
        out.extend_from_slice(&self.parent_fingerprint);
        out.extend_from_slice(&self.child_number.to_raw().to_be_bytes());
        out.extend_from_slice(self.chain_code.as_slice());
    }

    /// Parse a Base58Check extended key.
    ///
    /// # Errors
    /// `InvalidExtendedKey` cho checksum sai, độ dài sai, version lạ,
    /// key bytes không hợp lệ hoặc master key có parent/index khác 0.
    pub fn from_extended_string(encoded: &str) -> WalletResult<(Self, Network, KeyFormat)> {
        let data = Zeroizing::new(
            bs58::decode(encoded.trim())
                .with_check(None)
                .into_vec()
                .map_err(|e| invalid(format!("Base58Check decode failed: {}", e)))?,
        );

        if data.len() != SERIALIZED_LEN {
            return Err(invalid(format!(
                "Expected {} bytes, got {}",
                SERIALIZED_LEN,
                data.len()
            )));
        }

        let version = [data[0], data[1], data[2], data[3]];
        let (network, format, is_private) =
            KeyFormat::resolve(version).ok_or_else(|| invalid("Unknown version bytes"))?;

        let depth = data[4];
        let parent_fingerprint = [data[5], data[6], data[7], data[8]];
        let child_number =
            ChildNumber::from_raw(u32::from_be_bytes([data[9], data[10], data[11], data[12]]));

        if depth == 0 && (parent_fingerprint != [0u8; 4] || child_number.to_raw() != 0) {
            return Err(invalid("Master key with non-zero parent fingerprint or index"));
        }

        let mut chain_code = Zeroizing::new([0u8; 32]);
        chain_code.copy_from_slice(&data[13..45]);

        let key_bytes = &data[45..78];
        let key = if is_private {
            if key_bytes[0] != 0x00 {
                return Err(invalid("Private key must be prefixed with 0x00"));
            }
            let secret = SecretKey::from_slice(&key_bytes[1..])
                .map_err(|_| invalid("Private key out of range"))?;
            KeyMaterial::Private(secret)
        } else {
            let public = PublicKey::from_sec1_bytes(key_bytes)
                .map_err(|_| invalid("Public key is not a valid curve point"))?;
            KeyMaterial::Public(public)
        };

        Ok((
            ExtendedKey {
                key,
                chain_code,
                depth,
                parent_fingerprint,
                child_number,
            },
            network,
            format,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::DerivationPaths;
    use crate::crypto::seed::SeedDerivation;

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_bip39_trezor_root_xprv() {
        let seed = SeedDerivation::derive(TEST_MNEMONIC, "TREZOR");
        let root = ExtendedKey::master_from_seed(seed.as_ref()).unwrap();
        assert_eq!(
            root.to_extended_string(Network::Bitcoin, KeyFormat::Legacy)
                .as_str(),
            "xprv9s21ZrQH143K3h3fDYiay8mocZ3afhfULfb5GX8kCBdno77K4HiA15Tg23wpbeF1pLfs1c5SPmYHrEpTuuRhxMwvKDwqdKiGJS9XFKzUsAF"
        );
    }

    #[test]
    fn test_bip84_root_zprv_zpub() {
        let seed = SeedDerivation::derive(TEST_MNEMONIC, "");
        let root = ExtendedKey::master_from_seed(seed.as_ref()).unwrap();
        assert_eq!(
            root.to_extended_string(Network::Bitcoin, KeyFormat::NativeSegwit)
                .as_str(),
            "zprvAWgYBBk7JR8Gjrh4UJQ2uJdG1r3WNRRfURiABBE3RvMXYSrRJL62XuezvGdPvG6GFBZduosCc1YP5wixPox7zhZLfiUm8aunE96BBa4Kei5"
        );
        assert_eq!(
            root.to_public()
                .to_extended_string(Network::Bitcoin, KeyFormat::NativeSegwit)
                .as_str(),
            "zpub6jftahH18ngZxLmXaKw3GSZzZsszmt9WqedkyZdezFtWRFBZqsQH5hyUmb4pCEeZGmVfQuP5bedXTB8is6fTv19U1GQRyQUKQGUTzyHACMF"
        );
    }

    #[test]
    fn test_bip84_account_zpub() {
        let seed = SeedDerivation::derive(TEST_MNEMONIC, "");
        let root = ExtendedKey::master_from_seed(seed.as_ref()).unwrap();
        let path = DerivationPaths::bip84_account(Network::Bitcoin, 0).unwrap();
        let account = root.derive_path(&path).unwrap();
        assert_eq!(
            account
                .to_public()
                .to_extended_string(Network::Bitcoin, KeyFormat::NativeSegwit)
                .as_str(),
            "zpub6rFR7y4Q2AijBEqTUquhVz398htDFrtymD9xYYfG1m4wAcvPhXNfE3EfH1r1ADqtfSdVCToUG868RvUUkgDKf31mGDtKsAYz2oz2AGutZYs"
        );
    }

    #[test]
    fn test_parse_restores_node() {
        let encoded = "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7";
        let (key, network, format) = ExtendedKey::from_extended_string(encoded).unwrap();
        assert_eq!(network, Network::Bitcoin);
        assert_eq!(format, KeyFormat::Legacy);
        assert!(key.is_private());
        assert_eq!(key.depth(), 1);
        assert_eq!(key.child_number(), ChildNumber::hardened(0).unwrap());
        assert_eq!(
            key.to_extended_string(network, format).as_str(),
            encoded
        );
    }

    #[test]
    fn test_parse_testnet_public() {
        let seed = SeedDerivation::derive(TEST_MNEMONIC, "");
        let root = ExtendedKey::master_from_seed(seed.as_ref()).unwrap();
        let vpub = root
            .to_public()
            .to_extended_string(Network::Testnet, KeyFormat::NativeSegwit);
        assert!(vpub.starts_with("vpub"));

        let (parsed, network, format) = ExtendedKey::from_extended_string(&vpub).unwrap();
        assert_eq!(network, Network::Testnet);
        assert_eq!(format, KeyFormat::NativeSegwit);
        assert!(!parsed.is_private());
        assert_eq!(parsed, root.to_public());
    }

    #[test]
    fn test_parse_rejects_corruption() {
        let good = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";
        let mut bad = good.to_string();
        bad.replace_range(20..21, if &good[20..21] == "A" { "B" } else { "A" });

        assert!(matches!(
            ExtendedKey::from_extended_string(&bad),
            Err(WalletError::Crypto(CryptoError::InvalidExtendedKey(_)))
        ));
        assert!(matches!(
            ExtendedKey::from_extended_string("not-base58-0OIl"),
            Err(WalletError::Crypto(CryptoError::InvalidExtendedKey(_)))
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_version() {
        let mut payload = vec![0xDE, 0xAD, 0xBE, 0xEF];
        payload.extend_from_slice(&[0u8; 74]);
        let encoded = bs58::encode(payload).with_check().into_string();
        assert!(matches!(
            ExtendedKey::from_extended_string(&encoded),
            Err(WalletError::Crypto(CryptoError::InvalidExtendedKey(_)))
        ));
    }
}
