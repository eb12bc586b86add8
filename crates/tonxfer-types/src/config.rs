//! Wallet configuration with sensible defaults.
//!
//! Every value that the transfer assembly would otherwise hardcode
//! (wallet revision identifier, send mode, expiry window) lives here and
//! is injected at wallet construction, so tests can substitute fixtures.

use serde::{Deserialize, Serialize};

use crate::{Result, TonxferError};

/// Subwallet identifier of the fixed wallet revision (v4r2 on workchain 0).
pub const DEFAULT_WALLET_ID: u32 = 698_983_191;

/// Send mode: pay fees separately and ignore action-phase errors.
pub const DEFAULT_SEND_MODE: u8 = 3;

/// Seconds a signed external message stays valid.
pub const DEFAULT_MESSAGE_TTL_SECS: u32 = 60;

/// Upper bound on the expiry window accepted by [`WalletConfig::validate`].
pub const MAX_MESSAGE_TTL_SECS: u32 = 24 * 60 * 60;

/// Wallet parameters used for address derivation and message assembly.
///
/// All fields have defaults, so a config file may specify any subset:
///
/// ```json
/// { "workchain": 0, "wallet_id": 698983191, "send_mode": 3 }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Workchain the wallet lives on (0 = basechain, -1 = masterchain).
    pub workchain: i8,

    /// Subwallet identifier written into every external message header.
    pub wallet_id: u32,

    /// Send mode byte written after the wallet identifier.
    pub send_mode: u8,

    /// Seconds added to the current time to compute `valid_until`.
    pub message_ttl_secs: u32,

    /// Whether outgoing internal messages request a bounce on failure.
    pub bounce: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            workchain: 0,
            wallet_id: DEFAULT_WALLET_ID,
            send_mode: DEFAULT_SEND_MODE,
            message_ttl_secs: DEFAULT_MESSAGE_TTL_SECS,
            bounce: true,
        }
    }
}

impl WalletConfig {
    /// Validates all configuration values.
    ///
    /// Returns an error if any value is outside its acceptable range.
    pub fn validate(&self) -> Result<()> {
        if self.workchain != 0 && self.workchain != -1 {
            return Err(TonxferError::ConfigError {
                reason: format!("workchain must be 0 or -1, got {}", self.workchain),
            });
        }

        if self.message_ttl_secs == 0 {
            return Err(TonxferError::ConfigError {
                reason: "message_ttl_secs must be greater than 0".into(),
            });
        }

        if self.message_ttl_secs > MAX_MESSAGE_TTL_SECS {
            return Err(TonxferError::ConfigError {
                reason: format!("message_ttl_secs must be at most {MAX_MESSAGE_TTL_SECS}"),
            });
        }

        Ok(())
    }
}
