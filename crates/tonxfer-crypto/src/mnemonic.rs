//! Recovery phrase handling and seed derivation.
//!
//! A wallet is recovered from exactly 24 words. The seed is derived the
//! way TON wallets do it:
//!
//! - **Password**: the words joined with single spaces.
//! - **Salt**: the literal `"TON default seed"`.
//! - **Algorithm**: PBKDF2-HMAC-SHA512.
//! - **Rounds**: 100 000.
//! - **Output**: 64 bytes; the first 32 become the Ed25519 signing seed.
//!
//! Word membership in a dictionary is not checked: any 24 non-empty
//! words derive a key, matching how existing wallets were created.

use std::str::FromStr;

use hmac::Hmac;
use sha2::Sha512;
use tonxfer_types::{Result, TonxferError};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Number of words in a recovery phrase.
pub const WORD_COUNT: usize = 24;

/// PBKDF2 salt used for seed derivation.
pub const SEED_SALT: &[u8] = b"TON default seed";

/// PBKDF2 iteration count used for seed derivation.
pub const SEED_ITERATIONS: u32 = 100_000;

// ---------------------------------------------------------------------------
// Mnemonic
// ---------------------------------------------------------------------------

/// A validated 24-word recovery phrase.
///
/// The words are zeroized on drop to prevent sensitive data from
/// lingering in memory.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic(Vec<String>);

impl Mnemonic {
    /// Builds a mnemonic from an ordered word sequence.
    ///
    /// Surrounding whitespace is trimmed from every word.
    ///
    /// # Errors
    ///
    /// Returns [`TonxferError::DerivationFailure`] unless there are exactly
    /// [`WORD_COUNT`] words, none of them empty or containing whitespace.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Zeroizing<Vec<String>> = Zeroizing::new(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_owned())
                .collect(),
        );

        if words.len() != WORD_COUNT {
            return Err(TonxferError::DerivationFailure {
                reason: format!(
                    "mnemonic must be {WORD_COUNT} words, got {}",
                    words.len()
                ),
            });
        }

        if let Some(pos) = words
            .iter()
            .position(|w| w.is_empty() || w.chars().any(char::is_whitespace))
        {
            return Err(TonxferError::DerivationFailure {
                reason: format!("mnemonic word {} is empty or contains whitespace", pos + 1),
            });
        }

        Ok(Self(std::mem::take(&mut *words)))
    }

    /// Returns the individual words.
    pub fn words(&self) -> &[String] {
        &self.0
    }

    /// Returns the phrase with words joined by single spaces.
    ///
    /// The returned string holds secret material; callers should zeroize
    /// it once done.
    pub fn phrase(&self) -> String {
        self.0.join(" ")
    }
}

impl FromStr for Mnemonic {
    type Err = TonxferError;

    /// Parses a whitespace-separated phrase.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_words(s.split_whitespace())
    }
}

// Mnemonic does not implement Clone/Debug to prevent leakage.

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// A 64-byte seed derived from a [`Mnemonic`].
///
/// Automatically zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 64]);

impl Seed {
    /// Fixed byte length of a seed.
    pub const LEN: usize = 64;

    /// Creates a [`Seed`] from a raw 64-byte array.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 64-byte seed.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Returns the first 32 bytes, used as the Ed25519 signing seed.
    pub fn signing_seed(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.0[..32]);
        out
    }
}

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Derives the 64-byte seed for a mnemonic.
///
/// Deterministic: the same 24 words always produce the same seed.
///
/// # Errors
///
/// Returns [`TonxferError::DerivationFailure`] if PBKDF2 reports a
/// failure.
pub fn mnemonic_to_seed(mnemonic: &Mnemonic) -> Result<Seed> {
    let mut password = mnemonic.phrase();
    let mut output = [0u8; 64];

    let result = pbkdf2::pbkdf2::<Hmac<Sha512>>(
        password.as_bytes(),
        SEED_SALT,
        SEED_ITERATIONS,
        &mut output,
    );
    password.zeroize();

    result.map_err(|e| TonxferError::DerivationFailure {
        reason: format!("PBKDF2-HMAC-SHA512 failed: {e}"),
    })?;

    Ok(Seed(output))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
