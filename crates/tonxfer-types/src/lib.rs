//! Core shared types for tonxfer.
//!
//! This crate defines the types used across the workspace: the
//! `workchain:hash` [`Address`], the [`Nanotons`] amount, the
//! [`ContentHash`] fingerprint, the central [`TonxferError`] and the
//! [`Signable`] seam between message encoding and signing.

pub mod config;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// Standard blockchain address: signed 8-bit workchain plus a 32-byte
/// account hash.
///
/// Text form is `"<workchain>:<64 hex chars>"`, e.g.
/// `0:20c429e3bb195f46a582c10eb687c6ed182ec58237a55787f245ec992c337118`.
/// [`Display`](fmt::Display) always emits lowercase hex.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    workchain: i8,
    hash: [u8; 32],
}

impl Address {
    /// Byte length of the account hash.
    pub const HASH_LEN: usize = 32;

    /// Creates an address from its parts.
    pub fn new(workchain: i8, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }

    /// Returns the workchain identifier.
    pub fn workchain(&self) -> i8 {
        self.workchain
    }

    /// Returns the 32-byte account hash.
    pub fn hash(&self) -> &[u8; 32] {
        &self.hash
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.workchain, hex::encode(self.hash))
    }
}

impl FromStr for Address {
    type Err = TonxferError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 {
            return Err(TonxferError::MalformedAddress {
                reason: format!("expected `workchain:hash`, got {} part(s)", parts.len()),
            });
        }

        let workchain: i8 = parts[0].parse().map_err(|_| TonxferError::MalformedAddress {
            reason: format!("workchain '{}' is not an 8-bit signed integer", parts[0]),
        })?;

        let bytes = hex::decode(parts[1]).map_err(|e| TonxferError::MalformedAddress {
            reason: format!("invalid hex in account hash: {e}"),
        })?;
        if bytes.len() != Self::HASH_LEN {
            return Err(TonxferError::MalformedAddress {
                reason: format!(
                    "account hash must be {} bytes, got {}",
                    Self::HASH_LEN,
                    bytes.len()
                ),
            });
        }

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes);
        Ok(Self { workchain, hash })
    }
}

impl TryFrom<String> for Address {
    type Error = TonxferError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.to_string()
    }
}

// ---------------------------------------------------------------------------
// Nanotons
// ---------------------------------------------------------------------------

/// Amount in nanotons (1 TON = 10^9 nanotons).
///
/// Deserializes from either an integer (nanotons) or a decimal TON
/// string such as `"0.25"`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct Nanotons(u64);

impl Nanotons {
    /// Nanotons per whole TON.
    pub const PER_TON: u64 = 1_000_000_000;

    /// Number of fractional digits a TON amount may carry.
    pub const DECIMALS: usize = 9;

    /// Creates an amount from raw nanotons.
    pub fn new(nano: u64) -> Self {
        Self(nano)
    }

    /// Returns the raw nanoton count.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Parses a decimal TON amount (`"1"`, `"0.5"`, `"12.000000001"`).
    ///
    /// Exact integer arithmetic is used throughout; no floating point.
    ///
    /// # Errors
    ///
    /// - [`TonxferError::ValueOutOfRange`] if the string is not a
    ///   non-negative decimal, has more than nine fractional digits, or
    ///   overflows `u64` nanotons.
    pub fn from_ton_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(TonxferError::ValueOutOfRange {
                reason: format!("'{s}' is not a decimal TON amount"),
            });
        }
        if frac.len() > Self::DECIMALS {
            return Err(TonxferError::ValueOutOfRange {
                reason: format!(
                    "'{s}' has more than {} fractional digits",
                    Self::DECIMALS
                ),
            });
        }

        let overflow = || TonxferError::ValueOutOfRange {
            reason: format!("'{s}' TON overflows a 64-bit nanoton amount"),
        };

        let whole_nano = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u64>()
                .map_err(|_| overflow())?
                .checked_mul(Self::PER_TON)
                .ok_or_else(overflow)?
        };

        let frac_nano = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<width$}", width = Self::DECIMALS);
            padded.parse::<u64>().map_err(|_| overflow())?
        };

        whole_nano
            .checked_add(frac_nano)
            .map(Self)
            .ok_or_else(overflow)
    }
}

impl From<u64> for Nanotons {
    fn from(nano: u64) -> Self {
        Self(nano)
    }
}

impl fmt::Display for Nanotons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / Self::PER_TON;
        let frac = self.0 % Self::PER_TON;
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            let frac = format!("{frac:09}");
            write!(f, "{whole}.{}", frac.trim_end_matches('0'))
        }
    }
}

impl<'de> Deserialize<'de> for Nanotons {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct NanotonsVisitor;

        impl<'de> serde::de::Visitor<'de> for NanotonsVisitor {
            type Value = Nanotons;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer nanoton amount or a decimal TON string")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<Nanotons, E> {
                Ok(Nanotons(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<Nanotons, E> {
                u64::try_from(v)
                    .map(Nanotons)
                    .map_err(|_| E::custom("amount must not be negative"))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> std::result::Result<Nanotons, E> {
                Nanotons::from_ton_str(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(NanotonsVisitor)
    }
}

// ---------------------------------------------------------------------------
// ContentHash
// ---------------------------------------------------------------------------

/// SHA-256 fingerprint of a serialized cell.
///
/// Usable as an idempotency or tracking key. It is **not** the
/// canonical on-chain transaction identifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// The fixed byte length of a content hash.
    pub const LEN: usize = 32;

    /// Creates a new `ContentHash` from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for ContentHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for ContentHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// TonxferError
// ---------------------------------------------------------------------------

/// Central error type for tonxfer.
///
/// All crates in the workspace report failures through this enum.
/// Every error is local and synchronous; nothing inside the core retries.
#[derive(Debug, Error)]
pub enum TonxferError {
    /// An address string failed the `workchain:hash` shape check.
    #[error("malformed address: {reason}")]
    MalformedAddress {
        /// Human-readable description of why the address is invalid.
        reason: String,
    },

    /// Key derivation failed (bad mnemonic, KDF error, bad key bytes).
    #[error("key derivation failed: {reason}")]
    DerivationFailure {
        /// Human-readable description of the derivation failure.
        reason: String,
    },

    /// Transport text could not be base64-decoded, even after padding repair.
    #[error("encoding failure: {reason}")]
    EncodingFailure {
        /// Human-readable description of the decoding failure.
        reason: String,
    },

    /// A value does not fit the width or count limit it is written into.
    #[error("value out of range: {reason}")]
    ValueOutOfRange {
        /// Human-readable description including the offending value.
        reason: String,
    },

    /// A detached signature did not verify.
    #[error("signature invalid: {reason}")]
    SignatureInvalid {
        /// Human-readable description of the verification failure.
        reason: String,
    },

    /// A configuration value is invalid or missing.
    #[error("config error: {reason}")]
    ConfigError {
        /// Human-readable description of the configuration problem.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Signable trait
// ---------------------------------------------------------------------------

/// Trait for types that can produce the exact bytes covered by an
/// Ed25519 signature.
///
/// Lives here so the cell, crypto and wallet crates can share it without
/// depending on each other.
pub trait Signable {
    /// Returns the byte representation to be signed.
    fn signable_bytes(&self) -> Vec<u8>;
}

// ---------------------------------------------------------------------------
// Result alias
// ---------------------------------------------------------------------------

/// Convenience result type using [`TonxferError`].
pub type Result<T> = std::result::Result<T, TonxferError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
