// wallet-core/src/chains/bitcoin/address.rs
//
// Bitcoin Native SegWit Address Module - P2WPKH
// BIP-141 (witness program), BIP-173 (bech32), HASH160

use crate::chains::Network;
use crate::crypto::hash::hash160;
use crate::error::{AddressError, CryptoError, WalletError, WalletResult};
use bech32::{u5, FromBase32, ToBase32, Variant};
use k256::SecretKey;
use zeroize::Zeroizing;

/// Witness version của P2WPKH
const WITNESS_V0: u8 = 0;

/// HASH160 output = P2WPKH witness program
const P2WPKH_PROGRAM_LEN: usize = 20;

/// SEC1 compressed public key
const COMPRESSED_PUBKEY_LEN: usize = 33;

/// Decoded witness output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WitnessProgram {
    pub network: Network,
    pub version: u8,
    pub program: [u8; P2WPKH_PROGRAM_LEN],
}

/// P2WPKH Address Encoder
///
/// # Flow:  Compressed Public Key (33B) → HASH160 (20B) → bech32(hrp, v0 || program)
///
/// Output phụ thuộc duy nhất vào (public key, network).
pub struct SegwitAddress;

impl SegwitAddress {
    // =========================================================================
    // CORE: Public Key → Witness Program (20 bytes)
    // =========================================================================

    /// HASH160 của compressed public key
    ///
    /// # Errors
    /// - `InvalidPublicKeyLength` nếu không đúng 33 bytes
    /// - `InvalidKeyFormat` nếu prefix không phải 0x02/0x03
    pub fn witness_program(public_key: &[u8]) -> WalletResult<[u8; P2WPKH_PROGRAM_LEN]> {
        if public_key.len() != COMPRESSED_PUBKEY_LEN {
            return Err(WalletError::Address(AddressError::InvalidPublicKeyLength(
                public_key.len(),
            )));
        }
        if !matches!(public_key[0], 0x02 | 0x03) {
            return Err(WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Compressed public key must start with 0x02 or 0x03, got {:#04x}",
                public_key[0]
            ))));
        }
        Ok(hash160(public_key))
    }

    /// Encode P2WPKH address (`bc1q...` / `tb1q...`)
    pub fn encode(public_key: &[u8], network: Network) -> WalletResult<String> {
        let program = Self::witness_program(public_key)?;

        let mut data = Vec::with_capacity(1 + 32);
        data.push(u5::try_from_u8(WITNESS_V0).map_err(bech32_error)?);
        data.extend(program.to_base32());

        bech32::encode(network.params().hrp, data, Variant::Bech32).map_err(bech32_error)
    }

    // =========================================================================
    // PRIVATE KEY API
    // =========================================================================

    /// Derive address từ **zeroizing private key** (dropped & zeroed khi return)
    #[inline]
    pub fn derive(priv_key: Zeroizing<[u8; 32]>, network: Network) -> WalletResult<String> {
        Self::derive_from_slice(priv_key.as_slice(), network)
    }

    /// Derive address từ **borrowed byte slice**.
    ///
    /// # ⚠ Security Note
    /// The caller is responsible for zeroing `priv_key` after this call.
    pub fn derive_from_slice(priv_key: &[u8], network: Network) -> WalletResult<String> {
        let secret_key = SecretKey::from_slice(priv_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid secp256k1 private key: {}",
                e
            )))
        })?;
        let public_key = crate::crypto::key_deriver::Secp256k1Deriver::compress(
            &secret_key.public_key(),
        );
        Self::encode(&public_key, network)
    }

    // =========================================================================
    // UTILITIES
    // =========================================================================

    /// Decode + validate một P2WPKH address cho `network`
    ///
    /// Kiểm tra: bech32 checksum, hrp khớp network, variant Bech32 (không phải
    /// Bech32m), witness version 0, program 20 bytes.
    pub fn decode(address: &str, network: Network) -> WalletResult<WitnessProgram> {
        let program = Self::decode_any(address)?;
        if program.network != network {
            return Err(invalid(format!(
                "Address belongs to {}, expected {}",
                program.network, network
            )));
        }
        Ok(program)
    }

    /// Decode, chấp nhận mọi network đã biết
    pub fn decode_any(address: &str) -> WalletResult<WitnessProgram> {
        let (hrp, data, variant) = bech32::decode(address).map_err(bech32_error)?;

        let network = Network::from_hrp(&hrp)
            .ok_or_else(|| invalid(format!("Unknown human-readable part '{}'", hrp)))?;

        let (version, payload) = data
            .split_first()
            .ok_or_else(|| invalid("Empty witness data"))?;
        if version.to_u8() != WITNESS_V0 {
            return Err(invalid(format!(
                "Unsupported witness version {}",
                version.to_u8()
            )));
        }
        if variant != Variant::Bech32 {
            return Err(invalid("Witness v0 must use Bech32, not Bech32m"));
        }

        let bytes = Vec::<u8>::from_base32(payload).map_err(bech32_error)?;
        let program: [u8; P2WPKH_PROGRAM_LEN] = bytes.as_slice().try_into().map_err(|_| {
            invalid(format!(
                "Witness program must be {} bytes, got {}",
                P2WPKH_PROGRAM_LEN,
                bytes.len()
            ))
        })?;

        Ok(WitnessProgram {
            network,
            version: WITNESS_V0,
            program,
        })
    }

    /// Validate chuỗi có phải P2WPKH address hợp lệ (mainnet hoặc testnet)
    #[inline]
    pub fn is_valid(address: &str) -> bool {
        Self::decode_any(address).is_ok()
    }

    /// So sánh 2 address (bech32 không phân biệt hoa thường)
    #[inline]
    pub fn equals(addr1: &str, addr2: &str) -> bool {
        match (Self::decode_any(addr1), Self::decode_any(addr2)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

fn invalid(reason: impl Into<String>) -> WalletError {
    WalletError::Address(AddressError::InvalidAddress(reason.into()))
}

fn bech32_error(e: bech32::Error) -> WalletError {
    invalid(e.to_string())
}

// =============================================================================
// TESTS
// =============================================================================
