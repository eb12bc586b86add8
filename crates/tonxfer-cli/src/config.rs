//! Wallet config file loading.
//!
//! The config file is JSON and every field is optional:
//!
//! ```json
//! { "workchain": 0, "wallet_id": 698983191, "send_mode": 3,
//!   "message_ttl_secs": 60, "bounce": true }
//! ```

use std::path::Path;

use tonxfer_types::config::WalletConfig;

/// Loads and validates the wallet config, or the defaults when no path
/// is given.
pub fn load(path: Option<&Path>) -> Result<WalletConfig, String> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read config file: {e}"))?;
            let config: WalletConfig = serde_json::from_str(&text)
                .map_err(|e| format!("invalid config JSON: {e}"))?;
            tracing::debug!(path = %path.display(), "wallet config loaded");
            config
        }
        None => WalletConfig::default(),
    };

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}
