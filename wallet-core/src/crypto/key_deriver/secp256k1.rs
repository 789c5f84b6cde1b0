// wallet-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation - BIP-32
//
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki

use super::{ExtendedKey, KeyMaterial};
use crate::crypto::hash::{hash160, hmac_sha512};
use crate::crypto::paths::{ChildNumber, DerivationPath};
use crate::error::{CryptoError, WalletError, WalletResult};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{AffinePoint, FieldBytes, NonZeroScalar, ProjectivePoint, PublicKey, Scalar, SecretKey};
use tracing::warn;
use zeroize::Zeroizing;

/// HMAC key cho master key generation (BIP-32)
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// BIP-32 seed length bounds (bytes)
const MIN_SEED_LEN: usize = 16;
const MAX_SEED_LEN: usize = 64;

/// secp256k1 Key Deriver - BIP-32 Standard
///
/// # Security
/// - Chain codes và HMAC output wrap trong `Zeroizing` (auto-zeroize khi drop)
/// - Không lưu intermediate keys ngoài node hiện tại
///
/// # Performance
/// - Iterative derivation (không recursion)
pub struct Secp256k1Deriver;

impl Secp256k1Deriver {
    /// Master node từ seed: I = HMAC-SHA512("Bitcoin seed", seed)
    ///
    /// # Errors
    /// - `InvalidSeedLength` nếu seed ngoài 16..=64 bytes
    /// - `InvalidMasterKey` nếu I_L = 0 hoặc I_L >= n
    pub fn master_from_seed(seed: &[u8]) -> WalletResult<ExtendedKey> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(WalletError::Crypto(CryptoError::InvalidSeedLength(seed.len())));
        }

        let i = hmac_sha512(MASTER_HMAC_KEY, &[seed])?;
        let (il, ir) = i.split_at(32);

        let secret = SecretKey::from_slice(il)
            .map_err(|_| WalletError::Crypto(CryptoError::InvalidMasterKey))?;

        Ok(ExtendedKey {
            key: KeyMaterial::Private(secret),
            chain_code: chain_code_from(ir),
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: ChildNumber::from_raw(0),
        })
    }

    /// One CKD step (CKDpriv hoặc CKDpub tùy parent)
    ///
    /// # Errors
    /// - `MaxDepthExceeded` nếu parent đã ở depth 255
    /// - `HardenedDerivationRequiresPrivateKey` nếu parent là public node
    /// - `InvalidTweak` nếu I_L >= n hoặc kết quả là 0 / điểm vô cực
    pub fn derive_child(parent: &ExtendedKey, child: ChildNumber) -> WalletResult<ExtendedKey> {
        let depth = parent
            .depth
            .checked_add(1)
            .ok_or(WalletError::Crypto(CryptoError::MaxDepthExceeded))?;

        let raw = child.to_raw();
        let index_bytes = raw.to_be_bytes();
        let parent_pub = parent.public_key_bytes();

        let i = match (&parent.key, child.is_hardened()) {
            (KeyMaterial::Private(secret), true) => {
                // 0x00 || ser256(k) || ser32(i)
                let secret_bytes: Zeroizing<[u8; 32]> = Zeroizing::new(secret.to_bytes().into());
                hmac_sha512(
                    parent.chain_code.as_slice(),
                    &[&[0u8], secret_bytes.as_slice(), &index_bytes],
                )?
            }
            (KeyMaterial::Public(_), true) => {
                return Err(WalletError::Crypto(
                    CryptoError::HardenedDerivationRequiresPrivateKey,
                ));
            }
            // serP(K) || ser32(i)
            (_, false) => hmac_sha512(parent.chain_code.as_slice(), &[&parent_pub, &index_bytes])?,
        };
        let (il, ir) = i.split_at(32);

        let tweak = parse_tweak(il).ok_or(WalletError::Crypto(CryptoError::InvalidTweak(raw)))?;

        let key = match &parent.key {
            KeyMaterial::Private(secret) => {
                // k_i = parse256(I_L) + k_par (mod n)
                let child_scalar: Scalar = tweak + *secret.to_nonzero_scalar();
                let non_zero: Option<NonZeroScalar> = NonZeroScalar::new(child_scalar).into();
                let non_zero =
                    non_zero.ok_or(WalletError::Crypto(CryptoError::InvalidTweak(raw)))?;
                KeyMaterial::Private(SecretKey::from(non_zero))
            }
            KeyMaterial::Public(public) => {
                // K_i = point(parse256(I_L)) + K_par
                let point = ProjectivePoint::GENERATOR * tweak + public.to_projective();
                let child_pub = PublicKey::from_affine(AffinePoint::from(point))
                    .map_err(|_| WalletError::Crypto(CryptoError::InvalidTweak(raw)))?;
                KeyMaterial::Public(child_pub)
            }
        };

        let parent_id = hash160(&parent_pub);

        Ok(ExtendedKey {
            key,
            chain_code: chain_code_from(ir),
            depth,
            parent_fingerprint: [parent_id[0], parent_id[1], parent_id[2], parent_id[3]],
            child_number: child,
        })
    }

    /// Derive theo cả path, từ trái sang phải
    ///
    /// Một step gặp `InvalidTweak` được thử lại với index kế tiếp (cùng loại
    /// hardened/normal). Lỗi khác dừng ngay, bọc trong `PathStep` kèm vị trí.
    pub fn derive_path(root: &ExtendedKey, path: &DerivationPath) -> WalletResult<ExtendedKey> {
        Self::derive_path_traced(root, path).map(|(node, _)| node)
    }

    /// Như [`derive_path`](Self::derive_path), trả thêm path thực tế đã dùng.
    pub fn derive_path_traced(
        root: &ExtendedKey,
        path: &DerivationPath,
    ) -> WalletResult<(ExtendedKey, DerivationPath)> {
        let mut node = root.clone();
        let mut taken = Vec::with_capacity(path.len());

        for (position, &requested) in path.iter().enumerate() {
            let (next, child) =
                step_with_retry(position, requested, |child| Self::derive_child(&node, child))?;
            node = next;
            taken.push(child);
        }

        Ok((node, DerivationPath::from(taken)))
    }

    /// Public projection: cùng chain code + metadata, bỏ private key
    pub fn to_public(key: &ExtendedKey) -> ExtendedKey {
        ExtendedKey {
            key: KeyMaterial::Public(key.public_key()),
            chain_code: key.chain_code.clone(),
            depth: key.depth,
            parent_fingerprint: key.parent_fingerprint,
            child_number: key.child_number,
        }
    }

    /// SEC1 compressed encoding of an arbitrary public key
    pub fn compress(public: &PublicKey) -> [u8; 33] {
        let encoded = public.to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(encoded.as_bytes());
        out
    }
}

/// Một path step, `InvalidTweak` thì thử index kế tiếp cùng loại
///
/// Trả về node và child number thực tế đã dùng. Hết index (2^31) thì
/// `InvalidTweak` bọc trong `PathStep`.
fn step_with_retry<T>(
    position: usize,
    requested: ChildNumber,
    mut step: impl FnMut(ChildNumber) -> WalletResult<T>,
) -> WalletResult<(T, ChildNumber)> {
    let mut child = requested;
    loop {
        match step(child) {
            Ok(next) => return Ok((next, child)),
            Err(WalletError::Crypto(CryptoError::InvalidTweak(raw))) => {
                warn!(
                    position,
                    child = %child,
                    "Invalid child key at index {:#010x}, skipping to next index",
                    raw
                );
                child = child
                    .next()
                    .ok_or_else(|| CryptoError::InvalidTweak(raw).at_step(position))?;
            }
            Err(WalletError::Crypto(e)) => return Err(e.at_step(position).into()),
            Err(other) => return Err(other),
        }
    }
}

/// parse256(I_L), `None` nếu >= n
fn parse_tweak(il: &[u8]) -> Option<Scalar> {
    let bytes: [u8; 32] = il.try_into().ok()?;
    Option::from(Scalar::from_repr(FieldBytes::from(bytes)))
}

fn chain_code_from(ir: &[u8]) -> Zeroizing<[u8; 32]> {
    let mut chain_code = Zeroizing::new([0u8; 32]);
    chain_code.copy_from_slice(ir);
    chain_code
}

// =============================================================================
// TESTS
// =============================================================================
