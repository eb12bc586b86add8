//! Mnemonic input and wallet opening.
//!
//! The recovery phrase is read from `--mnemonic-file` when given,
//! otherwise from the `TONXFER_MNEMONIC` environment variable. It is
//! never accepted as a command-line argument, so it does not show up in
//! shell history or process listings.

use std::path::Path;

use tonxfer_crypto::mnemonic::Mnemonic;
use tonxfer_wallet::Wallet;
use zeroize::Zeroizing;

use crate::{config, GlobalOpts};

/// Environment variable holding the recovery phrase.
pub const MNEMONIC_ENV: &str = "TONXFER_MNEMONIC";

/// Reads the mnemonic from `file`, falling back to [`MNEMONIC_ENV`].
pub fn read_mnemonic(file: Option<&Path>) -> Result<Mnemonic, String> {
    let phrase = Zeroizing::new(match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read mnemonic file: {e}"))?,
        None => std::env::var(MNEMONIC_ENV).map_err(|_| {
            format!("no mnemonic: set {MNEMONIC_ENV} or pass --mnemonic-file")
        })?,
    });

    phrase.parse::<Mnemonic>().map_err(|e| e.to_string())
}

/// Opens the wallet described by the global options.
pub fn open_wallet(opts: &GlobalOpts) -> Result<Wallet, String> {
    let config = config::load(opts.config_path.as_deref())?;
    let mnemonic = read_mnemonic(opts.mnemonic_file.as_deref())?;
    Wallet::from_mnemonic(&mnemonic, config).map_err(|e| e.to_string())
}
