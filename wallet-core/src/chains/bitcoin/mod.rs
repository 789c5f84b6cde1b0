// wallet-core/src/chains/bitcoin/mod.rs

//! Bitcoin Chain Support
//!
//! # Key Features
//! - **Address Encoding**: P2WPKH (Native SegWit, bech32 witness v0) via [`SegwitAddress`].
//! - **Private Key Export**: Wallet Import Format (compressed) via [`Wif`].

pub mod address;
pub mod wif;

// Re-exports for cleaner API access
pub use address::{SegwitAddress, WitnessProgram};
pub use wif::{DecodedWif, Wif};
