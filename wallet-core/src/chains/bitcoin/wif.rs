// wallet-core/src/chains/bitcoin/wif.rs
//
// Wallet Import Format - Base58Check(prefix || key || 0x01)

use crate::chains::Network;
use crate::error::{AddressError, WalletError, WalletResult};
use k256::SecretKey;
use zeroize::Zeroizing;

/// Suffix đánh dấu public key dạng compressed
const COMPRESSED_FLAG: u8 = 0x01;

fn invalid(reason: impl Into<String>) -> WalletError {
    WalletError::Address(AddressError::InvalidWif(reason.into()))
}

/// Decoded WIF payload
pub struct DecodedWif {
    pub secret: Zeroizing<[u8; 32]>,
    pub network: Network,
    pub compressed: bool,
}

impl std::fmt::Debug for DecodedWif {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedWif")
            .field("network", &self.network)
            .field("compressed", &self.compressed)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// WIF codec
pub struct Wif;

impl Wif {
    /// Encode private key (compressed) cho network
    ///
    /// Mainnet bắt đầu bằng `K`/`L`, testnet bằng `c`.
    pub fn encode(secret: &[u8; 32], network: Network) -> Zeroizing<String> {
        let mut payload = Zeroizing::new(Vec::with_capacity(34));
        payload.push(network.params().wif_prefix);
        payload.extend_from_slice(secret);
        payload.push(COMPRESSED_FLAG);

        Zeroizing::new(bs58::encode(payload.as_slice()).with_check().into_string())
    }

    /// Decode WIF, chấp nhận cả dạng uncompressed (33 bytes payload)
    ///
    /// # Errors
    /// `InvalidWif` cho checksum sai, prefix lạ, độ dài sai hoặc scalar
    /// ngoài [1, n-1].
    pub fn decode(wif: &str) -> WalletResult<DecodedWif> {
        let payload = Zeroizing::new(
            bs58::decode(wif.trim())
                .with_check(None)
                .into_vec()
                .map_err(|e| invalid(format!("Base58Check decode failed: {}", e)))?,
        );

        let compressed = match payload.len() {
            34 if payload[33] == COMPRESSED_FLAG => true,
            34 => return Err(invalid("Unexpected compression flag")),
            33 => false,
            n => return Err(invalid(format!("Unexpected payload length {}", n))),
        };

        let network = Network::from_wif_prefix(payload[0])
            .ok_or_else(|| invalid(format!("Unknown version byte {:#04x}", payload[0])))?;

        let mut secret = Zeroizing::new([0u8; 32]);
        secret.copy_from_slice(&payload[1..33]);
        SecretKey::from_slice(secret.as_slice())
            .map_err(|_| invalid("Private key out of range"))?;

        Ok(DecodedWif {
            secret,
            network,
            compressed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ONE_WIF: &str = "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn";
    const BITCOIN_WIKI_KEY: &str =
        "0C28FCA386C7A227600B2FE50B7CAE11EC86D3BF1FBE471BE89827E19D72AA1D";
    const BITCOIN_WIKI_WIF: &str = "KwdMAjGmerYanjeui5SHS7JkmpZvVipYvB2LJGU1ZxJwYvP98617";

    fn key_one() -> [u8; 32] {
        let mut key = [0u8; 32];
        key[31] = 1;
        key
    }

    #[test]
    fn test_encode_known_vectors() {
        assert_eq!(Wif::encode(&key_one(), Network::Bitcoin).as_str(), KEY_ONE_WIF);

        let mut key = [0u8; 32];
        key.copy_from_slice(&hex::decode(BITCOIN_WIKI_KEY).unwrap());
        assert_eq!(Wif::encode(&key, Network::Bitcoin).as_str(), BITCOIN_WIKI_WIF);
    }

    #[test]
    fn test_testnet_prefix() {
        let wif = Wif::encode(&key_one(), Network::Testnet);
        assert!(wif.starts_with('c'));
        assert_eq!(wif.len(), 52);
    }

    #[test]
    fn test_decode() {
        let decoded = Wif::decode(KEY_ONE_WIF).unwrap();
        assert_eq!(*decoded.secret, key_one());
        assert_eq!(decoded.network, Network::Bitcoin);
        assert!(decoded.compressed);

        let testnet = Wif::encode(&key_one(), Network::Testnet);
        let decoded = Wif::decode(&testnet).unwrap();
        assert_eq!(decoded.network, Network::Testnet);
    }

    #[test]
    fn test_decode_uncompressed() {
        // Bitcoin wiki uncompressed WIF cho cùng key
        let decoded = Wif::decode("5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ").unwrap();
        assert!(!decoded.compressed);
        assert_eq!(hex::encode_upper(*decoded.secret), BITCOIN_WIKI_KEY);
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        let mut corrupted = KEY_ONE_WIF.to_string();
        corrupted.replace_range(10..11, "z");
        for bad in ["", "not-a-wif", corrupted.as_str()] {
            assert!(
                matches!(
                    Wif::decode(bad),
                    Err(WalletError::Address(AddressError::InvalidWif(_)))
                ),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_decode_rejects_zero_key() {
        let mut payload = vec![0x80];
        payload.extend_from_slice(&[0u8; 32]);
        payload.push(0x01);
        let wif = bs58::encode(payload).with_check().into_string();
        assert!(Wif::decode(&wif).is_err());
    }

    #[test]
    fn test_debug_redacted() {
        let decoded = Wif::decode(KEY_ONE_WIF).unwrap();
        assert!(format!("{:?}", decoded).contains("REDACTED"));
    }
}
