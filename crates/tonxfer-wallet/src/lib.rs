//! Wallet and transfer assembly for tonxfer.
//!
//! Composes the cell codec and the key & signature engine into one signed,
//! transport-ready transfer:
//!
//! 1. [`Wallet::from_mnemonic`] derives the keypair and the wallet address.
//! 2. [`Wallet::build_transfer`] assembles a [`TransferMessage`] from a
//!    [`TransferRequest`] and the caller-supplied sequence number.
//! 3. [`Wallet::sign_transfer`] signs the serialized message and wraps
//!    signature and message in an outer cell ([`SignedTransfer`]).
//! 4. [`SignedTransfer::transport_text`] is the artifact handed to the
//!    network submission layer.
//!
//! Sequence numbers are opaque inputs; keeping them monotonic per wallet
//! is the caller's responsibility.

pub mod transfer;
pub mod wallet;

pub use transfer::{SignedTransfer, TransferMessage, TransferRequest};
pub use wallet::Wallet;
