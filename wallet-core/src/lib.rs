// wallet-core/src/lib.rs

//! Single-use Bitcoin wallet generator.
//!
//! BIP-39 mnemonic → BIP-32 HD derivation → BIP-84 path `m/84'/coin'/0'/0/0`
//! → P2WPKH (bech32) address, with the private key exported as WIF.
//!
//! ```no_run
//! use wallet_core::{api, WalletConfig};
//!
//! let wallet = api::create_wallet(&WalletConfig::default())?;
//! println!("{}", wallet.address());
//! # Ok::<(), wallet_core::WalletError>(())
//! ```

pub mod api;
pub mod chains;
pub mod config;
pub mod crypto;
pub mod error;
pub mod wallet;

pub use chains::Network;
pub use config::WalletConfig;
pub use error::{WalletError, WalletResult};
pub use wallet::{Wallet, WalletAssembler, WalletExport};
