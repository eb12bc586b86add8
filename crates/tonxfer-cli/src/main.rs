//! tonxfer CLI.
//!
//! Derives the wallet from a 24-word mnemonic and produces signed,
//! transport-ready transfers. Nothing is submitted to the network.
//!
//! Environment:
//!
//!   TONXFER_MNEMONIC   24-word recovery phrase (alternative to --mnemonic-file)
//!   RUST_LOG           Log filter (default: info)

mod commands;
mod config;
mod output;
mod wallet_io;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// tonxfer: sign TON wallet transfers offline.
#[derive(Parser)]
#[command(name = "tonxfer", version, about)]
struct Cli {
    /// Output in JSON format (no colors, machine-readable).
    #[arg(long, global = true)]
    json: bool,

    /// Load wallet config from a JSON file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Read the mnemonic from a file instead of TONXFER_MNEMONIC.
    #[arg(long, global = true, value_name = "PATH")]
    mnemonic_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the wallet address and public key.
    Address,
    /// Build and sign a transfer.
    Sign(commands::sign::SignArgs),
    /// Show the readable part of a comment payload.
    Preview(commands::preview::PreviewArgs),
}

// ---------------------------------------------------------------------------
// Global options passed to every command handler
// ---------------------------------------------------------------------------

/// Shared options threaded into command handlers.
pub struct GlobalOpts {
    pub json: bool,
    pub config_path: Option<PathBuf>,
    pub mnemonic_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let opts = GlobalOpts {
        json: cli.json,
        config_path: cli.config,
        mnemonic_file: cli.mnemonic_file,
    };

    if let Err(e) = dispatch(&opts, cli.command) {
        output::print_error(&e, opts.json);
        std::process::exit(1);
    }
}

fn dispatch(opts: &GlobalOpts, cmd: Commands) -> std::result::Result<(), String> {
    match cmd {
        Commands::Address => commands::address::run(opts),
        Commands::Sign(args) => commands::sign::run(args, opts),
        Commands::Preview(args) => commands::preview::run(args, opts),
    }
}
