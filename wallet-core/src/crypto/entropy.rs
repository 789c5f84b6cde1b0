// wallet-core/src/crypto/entropy.rs
//
// Entropy Source - CSPRNG entropy cho BIP-39
//
// Chỉ chấp nhận 128/160/192/224/256 bit. Nếu OS RNG lỗi thì trả về
// `EntropyUnavailable`, không bao giờ fallback sang RNG không an toàn.

use crate::error::{WalletError, WalletResult};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

/// Các kích thước entropy hợp lệ theo BIP-39 (bit)
pub const VALID_ENTROPY_BITS: [usize; 5] = [128, 160, 192, 224, 256];

/// Supplier of cryptographically secure random bytes.
pub trait EntropySource {
    /// Fill `dest` completely or fail.
    fn try_fill(&self, dest: &mut [u8]) -> WalletResult<()>;

    /// Generate `bit_length` bits of entropy.
    ///
    /// # Errors
    /// - `InvalidParameter` if `bit_length` is not a BIP-39 size
    /// - `EntropyUnavailable` if the underlying source fails
    fn generate(&self, bit_length: usize) -> WalletResult<Zeroizing<Vec<u8>>> {
        validate_bit_length(bit_length)?;
        let mut entropy = Zeroizing::new(vec![0u8; bit_length / 8]);
        self.try_fill(&mut entropy)?;
        Ok(entropy)
    }
}

/// OS-level CSPRNG (`getrandom` qua `OsRng`)
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn try_fill(&self, dest: &mut [u8]) -> WalletResult<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| WalletError::EntropyUnavailable(e.to_string()))
    }
}

/// Check that `bit_length` is one of the BIP-39 entropy sizes.
pub fn validate_bit_length(bit_length: usize) -> WalletResult<()> {
    if VALID_ENTROPY_BITS.contains(&bit_length) {
        Ok(())
    } else {
        Err(WalletError::InvalidParameter(format!(
            "Invalid entropy size: {} bits. Expected one of {:?}.",
            bit_length, VALID_ENTROPY_BITS
        )))
    }
}
