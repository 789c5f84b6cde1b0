// wallet-core/src/main.rs

//! `segwit-wallet` CLI: generate or restore a single-use BIP-84 wallet.

use clap::{Parser, Subcommand};
use wallet_core::{api, Network, Wallet, WalletConfig, WalletResult};

// =============================================================================
// CLI definition
// =============================================================================

/// Single-use Bitcoin Native SegWit wallet generator.
#[derive(Parser)]
#[command(name = "segwit-wallet", version, about)]
struct Cli {
    /// Output in JSON format (machine-readable).
    #[arg(long, global = true)]
    json: bool,

    /// Target network: main | test.
    #[arg(long, global = true, env = "WALLET_NETWORK", default_value = "test")]
    network: Network,

    /// Optional BIP-39 passphrase.
    #[arg(long, global = true, env = "WALLET_PASSPHRASE", hide_env_values = true)]
    passphrase: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fresh wallet from OS entropy.
    #[command(alias = "new")]
    Generate {
        /// Entropy size in bits (128, 160, 192, 224, 256).
        #[arg(long, env = "WALLET_ENTROPY_BITS", default_value_t = 128)]
        entropy_bits: usize,
    },
    /// Rebuild a wallet from an existing mnemonic.
    Restore {
        /// Recovery phrase (quote it).
        #[arg(long, env = "WALLET_MNEMONIC", hide_env_values = true)]
        mnemonic: String,
    },
}

// =============================================================================
// Main
// =============================================================================

fn main() {
    let cli = Cli::parse();

    if let Err(e) = api::init_core() {
        eprintln!("Warning: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> WalletResult<()> {
    let mut config = WalletConfig::new(cli.network);
    if let Some(passphrase) = cli.passphrase {
        config = config.with_passphrase(passphrase);
    }

    let wallet = match cli.command {
        Commands::Generate { entropy_bits } => {
            api::create_wallet(&config.with_entropy_bits(entropy_bits))?
        }
        Commands::Restore { mnemonic } => api::restore_wallet(&mnemonic, &config)?,
    };

    print_wallet(&wallet, cli.json)
}

fn print_wallet(wallet: &Wallet, json: bool) -> WalletResult<()> {
    if json {
        let out = serde_json::to_string_pretty(&wallet.export())
            .map_err(|e| wallet_core::WalletError::InvalidParameter(e.to_string()))?;
        println!("{out}");
    } else {
        println!("Network:     {}", wallet.network());
        println!("Path:        {}", wallet.path());
        println!("Address:     {}", wallet.address());
        println!("Private key: {}", wallet.private_key_wif());
        println!("Mnemonic:    {}", wallet.mnemonic());
    }
    Ok(())
}
