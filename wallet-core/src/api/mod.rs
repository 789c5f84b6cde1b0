// wallet-core/src/api/mod.rs
//
// Public facade: logging init + wallet operations

use crate::chains::bitcoin::SegwitAddress;
use crate::config::WalletConfig;
use crate::crypto::mnemonic::WalletMnemonic;
use crate::error::{WalletError, WalletResult};
use crate::wallet::{Wallet, WalletAssembler};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

// Core Initialization
/// Cài tracing subscriber (stderr, filter theo `RUST_LOG`, mặc định WARN).
///
/// Gọi nhiều lần không lỗi; subscriber đầu tiên được giữ.
pub fn init_core() -> WalletResult<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env()
        .map_err(|e| WalletError::Config(format!("Invalid RUST_LOG: {}", e)))?;

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        debug!("Tracing subscriber already installed");
    }
    Ok(())
}

// --- Key Management ---

/// Generate a fresh single-use wallet
pub fn create_wallet(config: &WalletConfig) -> WalletResult<Wallet> {
    config.validate()?;
    WalletAssembler::new().generate(config)
}

/// Rebuild the wallet for an existing mnemonic
pub fn restore_wallet(mnemonic: &str, config: &WalletConfig) -> WalletResult<Wallet> {
    WalletAssembler::new().restore(mnemonic, config)
}

// --- Validation Helpers ---

#[inline]
pub fn validate_mnemonic(mnemonic: &str) -> bool {
    WalletMnemonic::validate(mnemonic)
}

#[inline]
pub fn validate_address(address: &str) -> bool {
    SegwitAddress::is_valid(address)
}
