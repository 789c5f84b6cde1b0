// wallet-core/src/crypto/paths.rs
//
// Derivation Paths Module - BIP-32 path model + BIP-84 builders
// BIP-32 (child numbers), BIP-44 (levels), BIP-84 (Native SegWit), SLIP-44 (coin types)

use crate::chains::Network;
use crate::error::{WalletError, WalletResult};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// SLIP-44 COIN TYPES / PURPOSE
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    pub const BITCOIN: u32 = 0;
    /// Mọi testnet dùng chung coin_type 1
    pub const TESTNET: u32 = 1;
}

/// BIP-43 purpose field
pub mod purpose {
    /// BIP-84: Native SegWit (P2WPKH)
    pub const BIP84: u32 = 84;
}

// =============================================================================
// CHILD NUMBER
// =============================================================================

/// One derivation step: index < 2^31 plus hardened flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildNumber {
    index: u32,
    hardened: bool,
}

impl ChildNumber {
    /// Bit 31 đánh dấu hardened index
    pub const HARDENED_BIT: u32 = 0x8000_0000;

    pub fn new(index: u32, hardened: bool) -> WalletResult<Self> {
        if index & Self::HARDENED_BIT != 0 {
            return Err(WalletError::InvalidParameter(format!(
                "Child index {} out of range (must be < 2^31)",
                index
            )));
        }
        Ok(Self { index, hardened })
    }

    #[inline]
    pub fn normal(index: u32) -> WalletResult<Self> {
        Self::new(index, false)
    }

    #[inline]
    pub fn hardened(index: u32) -> WalletResult<Self> {
        Self::new(index, true)
    }

    /// Decode the raw 32-bit form (bit 31 = hardened).
    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        Self {
            index: raw & !Self::HARDENED_BIT,
            hardened: raw & Self::HARDENED_BIT != 0,
        }
    }

    /// Raw 32-bit form dùng trong HMAC data và serialization
    #[inline]
    pub fn to_raw(self) -> u32 {
        if self.hardened {
            self.index | Self::HARDENED_BIT
        } else {
            self.index
        }
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub fn is_hardened(self) -> bool {
        self.hardened
    }

    /// Next index of the same class, `None` when the class is exhausted.
    pub fn next(self) -> Option<Self> {
        let index = self.index.checked_add(1)?;
        Self::new(index, self.hardened).ok()
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl FromStr for ChildNumber {
    type Err = WalletError;

    /// Accepts `0`, `0'`, `0h`, `0H`.
    fn from_str(segment: &str) -> WalletResult<Self> {
        let segment = segment.trim();
        let (digits, hardened) = match segment.strip_suffix(&['\'', 'h', 'H'][..]) {
            Some(rest) => (rest, true),
            None => (segment, false),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WalletError::InvalidParameter(format!(
                "Invalid path segment '{}'",
                segment
            )));
        }
        let index: u32 = digits.parse().map_err(|e| {
            WalletError::InvalidParameter(format!("Invalid index '{}': {}", digits, e))
        })?;
        Self::new(index, hardened)
    }
}

// =============================================================================
// DERIVATION PATH
// =============================================================================

/// Ordered list of child numbers, text form `m/84'/1'/0'/0/0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// Path rỗng = master key (`m`)
    pub fn master() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChildNumber> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ChildNumber] {
        &self.0
    }

    /// Append a step, builder style.
    pub fn child(mut self, child: ChildNumber) -> Self {
        self.0.push(child);
        self
    }

    /// True nếu có ít nhất một bước hardened (cần private key để derive)
    pub fn has_hardened(&self) -> bool {
        self.0.iter().any(|c| c.is_hardened())
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(steps: Vec<ChildNumber>) -> Self {
        Self(steps)
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = std::slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for child in &self.0 {
            write!(f, "/{}", child)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    fn from_str(path: &str) -> WalletResult<Self> {
        let path = path.trim();
        let mut segments = path.split('/');

        // Phải bắt đầu bằng "m"
        if segments.next() != Some("m") {
            return Err(WalletError::InvalidParameter(format!(
                "Path must start with 'm': {}",
                path
            )));
        }

        segments
            .map(ChildNumber::from_str)
            .collect::<WalletResult<Vec<_>>>()
            .map(Self)
    }
}

// =============================================================================
// PRE-BUILT PATHS
// =============================================================================
/// Pre-built BIP-84 Derivation Paths
///
/// # Conventions
/// - BIP-84: `m/84'/coin'/account'/change/index` (Bitcoin Native SegWit, secp256k1)
/// - coin = 0 (mainnet), 1 (testnet)
pub struct DerivationPaths;

impl DerivationPaths {
    /// BIP-84: Native SegWit (bc1q...) - first receive address
    pub const BTC_NATIVE_SEGWIT_0: &'static str = "m/84'/0'/0'/0/0";

    /// BIP-84 testnet (tb1q...) - first receive address
    pub const BTC_NATIVE_SEGWIT_TESTNET_0: &'static str = "m/84'/1'/0'/0/0";

    /// Tạo BIP-84 path
    ///
    /// # Arguments
    /// * `coin_type` - SLIP-44 coin type (`coin_type::BITCOIN` / `coin_type::TESTNET`)
    /// * `account` - Account index (hardened)
    /// * `change` - 0 = external (nhận tiền), 1 = internal (tiền thối)
    /// * `index` - Address index
    pub fn bip84(
        coin_type: u32,
        account: u32,
        change: u32,
        index: u32,
    ) -> WalletResult<DerivationPath> {
        Ok(DerivationPath::master()
            .child(ChildNumber::hardened(purpose::BIP84)?)
            .child(ChildNumber::hardened(coin_type)?)
            .child(ChildNumber::hardened(account)?)
            .child(ChildNumber::normal(change)?)
            .child(ChildNumber::normal(index)?))
    }

    /// First receive address path for `network`: `m/84'/coin'/0'/0/0`
    pub fn bip84_first_receive(network: Network) -> WalletResult<DerivationPath> {
        Self::bip84(network.params().coin_type, 0, 0, 0)
    }

    /// Account-level path `m/84'/coin'/account'` (zpub/vpub export)
    pub fn bip84_account(network: Network, account: u32) -> WalletResult<DerivationPath> {
        Ok(DerivationPath::master()
            .child(ChildNumber::hardened(purpose::BIP84)?)
            .child(ChildNumber::hardened(network.params().coin_type)?)
            .child(ChildNumber::hardened(account)?))
    }
}

// =============================================================================
// TESTS
// =============================================================================
