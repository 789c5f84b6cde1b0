// wallet-core/src/crypto/seed.rs
//
// Seed Derivation - BIP-39 PBKDF2-HMAC-SHA512
// password = NFKD(mnemonic), salt = "mnemonic" + NFKD(passphrase), 2048 rounds

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// BIP-39 PBKDF2 iteration count
pub const PBKDF2_ROUNDS: u32 = 2048;

const SEED_LEN: usize = 64;

/// 64-byte BIP-39 seed, auto-zeroize khi drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    pub const LEN: usize = SEED_LEN;

    /// Wrap raw seed bytes (test vectors, external seeds).
    pub fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Không bao giờ in seed ra log
impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Seed").field(&"[REDACTED]").finish()
    }
}

/// BIP-39 mnemonic-to-seed key stretching
pub struct SeedDerivation;

impl SeedDerivation {
    /// Stretch `mnemonic` + `passphrase` into a 64-byte seed.
    ///
    /// Pure function: same inputs always give the same seed on every
    /// platform. Use `""` for no passphrase.
    pub fn derive(mnemonic: &str, passphrase: &str) -> Seed {
        let password = Zeroizing::new(mnemonic.nfkd().collect::<String>());
        let salt = Zeroizing::new(format!("mnemonic{}", passphrase.nfkd().collect::<String>()));

        let mut seed = Seed([0u8; SEED_LEN]);
        pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut seed.0);
        seed
    }
}
