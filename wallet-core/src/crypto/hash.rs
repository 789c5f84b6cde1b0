// wallet-core/src/crypto/hash.rs
//
// Hash helpers: SHA-256, HASH160 (RIPEMD-160 ∘ SHA-256), HMAC-SHA512

use crate::error::{CryptoError, WalletError, WalletResult};
use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroizing;

pub(crate) type HmacSha512 = Hmac<Sha512>;

/// SHA-256 digest.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// RIPEMD-160(SHA-256(data)), dùng cho witness program và fingerprint.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

/// HMAC-SHA512, output wrapped in `Zeroizing` since it carries key material.
pub fn hmac_sha512(key: &[u8], data: &[&[u8]]) -> WalletResult<Zeroizing<[u8; 64]>> {
    let mut mac = HmacSha512::new_from_slice(key).map_err(|e| {
        WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
            "HMAC init failed: {}",
            e
        )))
    })?;
    for chunk in data {
        mac.update(chunk);
    }

    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}
