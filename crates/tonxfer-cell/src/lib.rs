//! Cell codec for tonxfer.
//!
//! A [`Cell`] is a node in a strict ownership tree: a byte payload plus
//! ordered child cells. Cells serialize depth-first into a flat,
//! length-prefixed byte sequence that is signed, fingerprinted and moved
//! through text channels as base64 "transport text".
//!
//! This is a simplified byte-aligned subset of the on-chain cell format:
//! there is no bit-level packing and [`Cell::hash`] is a plain SHA-256 of
//! the serialization, not the protocol's representation hash.
//!
//! # Modules
//!
//! - [`cell`]: `Cell` builder and serialization
//! - [`transport`]: base64 transport text, padding repair, comment preview

pub mod cell;
pub mod transport;

pub use cell::Cell;
