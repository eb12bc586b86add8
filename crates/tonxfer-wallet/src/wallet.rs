//! Wallet identity and transfer signing.
//!
//! A [`Wallet`] holds the keypair recovered from a mnemonic, the derived
//! address and the [`WalletConfig`] it was opened with. It never stores
//! sequence numbers or talks to the network; callers supply the current
//! `seqno` for every transfer.

use chrono::{DateTime, Utc};
use tonxfer_crypto::hash::sha256;
use tonxfer_crypto::mnemonic::Mnemonic;
use tonxfer_crypto::signing::{derive_keypair, Keypair, PublicKey};
use tonxfer_types::config::WalletConfig;
use tonxfer_types::{Address, Result, Signable, TonxferError};

use crate::transfer::{
    internal_message_cell, MessageHeader, SignedTransfer, TransferMessage, TransferRequest,
};

// ---------------------------------------------------------------------------
// Address derivation
// ---------------------------------------------------------------------------

/// Derives the wallet address for `public_key` on `workchain`.
///
/// The account hash is `SHA-256(public_key)`. This is a simplified scheme
/// and does not match the state-init hash a deployed wallet contract
/// would have.
pub fn derive_address(workchain: i8, public_key: &PublicKey) -> Address {
    Address::new(workchain, sha256(public_key.as_bytes()))
}

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// A wallet opened from its recovery phrase.
///
/// # Invariants
///
/// - `address` is always `derive_address(config.workchain, public_key)`.
/// - `config` passed [`WalletConfig::validate`] at construction.
pub struct Wallet {
    keypair: Keypair,
    public_key: PublicKey,
    address: Address,
    config: WalletConfig,
}

// Wallet holds the signing key and does not implement Clone or Debug.

impl Wallet {
    /// Opens a wallet from a 24-word mnemonic.
    ///
    /// # Errors
    ///
    /// - [`TonxferError::ConfigError`] if `config` is invalid.
    /// - [`TonxferError::DerivationFailure`] if key derivation fails.
    pub fn from_mnemonic(mnemonic: &Mnemonic, config: WalletConfig) -> Result<Self> {
        config.validate()?;
        let keypair = derive_keypair(mnemonic)?;
        Self::from_keypair(keypair, config)
    }

    /// Opens a wallet around an existing keypair.
    ///
    /// # Errors
    ///
    /// [`TonxferError::ConfigError`] if `config` is invalid.
    pub fn from_keypair(keypair: Keypair, config: WalletConfig) -> Result<Self> {
        config.validate()?;
        let public_key = keypair.public_key();
        let address = derive_address(config.workchain, &public_key);
        tracing::debug!(address = %address, "wallet opened");

        Ok(Self {
            keypair,
            public_key,
            address,
            config,
        })
    }

    // -- Accessors --------------------------------------------------------

    /// Returns the wallet address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the Ed25519 public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Returns the configuration the wallet was opened with.
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Returns the signing keypair.
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    // -- Transfers --------------------------------------------------------

    /// Builds an unsigned transfer expiring `message_ttl_secs` from now.
    ///
    /// # Errors
    ///
    /// See [`Wallet::build_transfer_at`].
    pub fn build_transfer(&self, request: &TransferRequest, seqno: u32) -> Result<TransferMessage> {
        self.build_transfer_at(request, seqno, Utc::now())
    }

    /// Builds an unsigned transfer as of `now`.
    ///
    /// # Errors
    ///
    /// - [`TonxferError::EncodingFailure`] if the comment is not valid
    ///   transport text.
    /// - [`TonxferError::ValueOutOfRange`] if the expiry does not fit in
    ///   32 bits or a cell overflows its payload limit.
    pub fn build_transfer_at(
        &self,
        request: &TransferRequest,
        seqno: u32,
        now: DateTime<Utc>,
    ) -> Result<TransferMessage> {
        let valid_until = valid_until(now, self.config.message_ttl_secs)?;
        let comment = request.comment_cell()?;
        let internal = internal_message_cell(
            &request.destination,
            request.amount,
            self.config.bounce,
            comment,
        )?;

        let header = MessageHeader {
            seqno,
            valid_until,
            wallet_id: self.config.wallet_id,
            send_mode: self.config.send_mode,
        };
        let message = TransferMessage::assemble(header, request.destination, request.amount, internal)?;

        tracing::debug!(
            seqno,
            valid_until,
            destination = %request.destination,
            amount = %request.amount,
            has_comment = request.comment.is_some(),
            "transfer message built"
        );
        Ok(message)
    }

    /// Signs an assembled transfer message.
    ///
    /// # Errors
    ///
    /// [`TonxferError::ValueOutOfRange`] if the envelope exceeds the cell
    /// payload limit.
    pub fn sign_transfer(&self, message: &TransferMessage) -> Result<SignedTransfer> {
        let signature = self.keypair.sign(&message.signable_bytes());
        let signed = SignedTransfer::wrap(message, signature)?;

        tracing::info!(
            seqno = signed.seqno(),
            valid_until = signed.valid_until(),
            content_hash = %signed.content_hash(),
            "transfer signed"
        );
        Ok(signed)
    }

    /// Builds and signs a transfer in one step.
    ///
    /// # Errors
    ///
    /// See [`Wallet::build_transfer_at`] and [`Wallet::sign_transfer`].
    pub fn transfer(&self, request: &TransferRequest, seqno: u32) -> Result<SignedTransfer> {
        let message = self.build_transfer(request, seqno)?;
        self.sign_transfer(&message)
    }
}

/// `now + ttl` as a 32-bit unix timestamp.
fn valid_until(now: DateTime<Utc>, ttl_secs: u32) -> Result<u32> {
    let expiry = now.timestamp() + i64::from(ttl_secs);
    u32::try_from(expiry).map_err(|_| TonxferError::ValueOutOfRange {
        reason: format!("valid_until {expiry} does not fit in 32 bits"),
    })
}
