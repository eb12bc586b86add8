//! Cryptographic primitives for tonxfer.
//!
//! This crate is the **sole** location for cryptographic operations.
//! No other crate in the workspace performs raw crypto directly.
//!
//! # Modules
//!
//! - [`mnemonic`]: 24-word recovery phrase and PBKDF2-HMAC-SHA512 seed
//! - [`signing`]: Ed25519 keypair, detached signing and verification
//! - [`hash`]: SHA-256 content fingerprints

pub mod hash;
pub mod mnemonic;
pub mod signing;
