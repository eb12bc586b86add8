//! Ed25519 digital signature operations.
//!
//! Provides keypair derivation from a [`Mnemonic`], detached signing,
//! and signature verification. The private key is automatically zeroized
//! on drop via `ed25519-dalek`'s built-in `ZeroizeOnDrop`.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use tonxfer_types::{Result, TonxferError};
use zeroize::Zeroize;

use crate::mnemonic::{mnemonic_to_seed, Mnemonic};

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// Ed25519 public key (32 bytes).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// Fixed byte length of an Ed25519 public key.
    pub const LEN: usize = 32;

    /// Creates a [`PublicKey`] from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte array.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// Detached Ed25519 signature (64 bytes).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Signature([u8; 64]);

impl Signature {
    /// Fixed byte length of an Ed25519 signature.
    pub const LEN: usize = 64;

    /// Creates a [`Signature`] from raw bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 64-byte array.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = TonxferError;

    fn try_from(bytes: &[u8]) -> std::result::Result<Self, Self::Error> {
        let arr: [u8; 64] = bytes.try_into().map_err(|_| TonxferError::SignatureInvalid {
            reason: format!("signature must be {} bytes, got {}", Self::LEN, bytes.len()),
        })?;
        Ok(Self(arr))
    }
}

// ---------------------------------------------------------------------------
// Keypair
// ---------------------------------------------------------------------------

/// Ed25519 signing keypair.
///
/// Wraps an `ed25519-dalek` [`SigningKey`], which zeroizes the secret
/// when dropped.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Reconstructs a keypair deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Derives the wallet keypair from a recovery phrase.
    ///
    /// The first 32 bytes of the PBKDF2 seed are expanded with standard
    /// Ed25519 seed-to-keypair generation. Same words, same keypair.
    ///
    /// # Errors
    ///
    /// Returns [`TonxferError::DerivationFailure`] if seed derivation
    /// fails. No partial key state is exposed.
    pub fn from_mnemonic(mnemonic: &Mnemonic) -> Result<Self> {
        let seed = mnemonic_to_seed(mnemonic)?;
        Ok(Self::from_seed(&seed.signing_seed()))
    }

    /// Returns the public half of this keypair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Returns the 64-byte private key encoding (seed ‖ public key).
    ///
    /// # Security
    ///
    /// The returned bytes contain the private key. Callers **must**
    /// zeroize or discard the copy as soon as it is no longer needed.
    pub fn private_key_bytes(&self) -> [u8; 64] {
        self.signing_key.to_keypair_bytes()
    }

    /// Signs an arbitrary message and returns the detached signature.
    ///
    /// Deterministic per RFC 8032.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key.sign(message).to_bytes())
    }
}

// Keypair intentionally does not implement Clone or Debug.

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Derives the wallet keypair for a mnemonic. See [`Keypair::from_mnemonic`].
pub fn derive_keypair(mnemonic: &Mnemonic) -> Result<Keypair> {
    Keypair::from_mnemonic(mnemonic)
}

/// Signs `message` with raw private key bytes.
///
/// Accepts either a 32-byte seed or the 64-byte `seed ‖ public key`
/// encoding returned by [`Keypair::private_key_bytes`]. In the 64-byte
/// form the embedded public key must match the seed.
///
/// # Errors
///
/// Returns [`TonxferError::DerivationFailure`] for any other length or a
/// mismatched embedded public key.
pub fn sign_with_private_key(message: &[u8], private_key: &[u8]) -> Result<Signature> {
    let signing_key = match private_key.len() {
        32 => {
            let mut seed = [0u8; 32];
            seed.copy_from_slice(private_key);
            let key = SigningKey::from_bytes(&seed);
            seed.zeroize();
            key
        }
        64 => {
            let mut bytes = [0u8; 64];
            bytes.copy_from_slice(private_key);
            let key = SigningKey::from_keypair_bytes(&bytes);
            bytes.zeroize();
            key.map_err(|e| TonxferError::DerivationFailure {
                reason: format!("invalid keypair bytes: {e}"),
            })?
        }
        other => {
            return Err(TonxferError::DerivationFailure {
                reason: format!("private key must be 32 or 64 bytes, got {other}"),
            })
        }
    };

    Ok(Signature(signing_key.sign(message).to_bytes()))
}

/// Verifies an Ed25519 signature against a public key and message.
///
/// # Errors
///
/// Returns [`TonxferError::SignatureInvalid`] if the public key is not a
/// valid curve point or the signature does not verify.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> Result<()> {
    let vk = VerifyingKey::from_bytes(&public_key.0).map_err(|e| {
        TonxferError::SignatureInvalid {
            reason: format!("invalid public key: {e}"),
        }
    })?;
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    vk.verify_strict(message, &sig)
        .map_err(|e| TonxferError::SignatureInvalid {
            reason: format!("signature verification failed: {e}"),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
