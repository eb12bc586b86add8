//! Transfer request, unsigned message and signed envelope.
//!
//! # Message layout
//!
//! The external message cell carries the wallet header and references the
//! internal message as its only child:
//!
//! | Field         | Bits | Bytes |
//! |---------------|------|-------|
//! | `seqno`       | 32   | 4     |
//! | `valid_until` | 32   | 4     |
//! | `wallet_id`   | 32   | 4     |
//! | `send_mode`   | 8    | 1     |
//!
//! The internal message cell holds the flag fields, destination and amount
//! (72 bytes) and, when a comment is attached, references the comment cell
//! as its only child. Every field occupies whole bytes.
//!
//! The signed envelope is a childless cell whose payload is
//! `signature (64 bytes) ‖ serialized external message`.

use serde::{Deserialize, Serialize};
use tonxfer_cell::Cell;
use tonxfer_crypto::signing::{verify, PublicKey, Signature};
use tonxfer_types::{Address, ContentHash, Nanotons, Result, Signable};

// ---------------------------------------------------------------------------
// TransferRequest
// ---------------------------------------------------------------------------

/// What the purchase layer hands over for payment.
///
/// Deserializes from JSON such as
///
/// ```json
/// { "destination": "0:20c4…7118", "amount": "0.25", "comment": "te6ccg…" }
/// ```
///
/// `amount` accepts integer nanotons or a decimal TON string; `comment`
/// is optional transport text.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Recipient address.
    #[serde(alias = "destinationAddress")]
    pub destination: Address,
    /// Amount to send.
    #[serde(alias = "amountNano")]
    pub amount: Nanotons,
    /// Transport text of the comment payload cell, if any.
    #[serde(default, alias = "commentPayload", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl TransferRequest {
    /// Creates a request without a comment.
    pub fn new(destination: Address, amount: Nanotons) -> Self {
        Self {
            destination,
            amount,
            comment: None,
        }
    }

    /// Attaches comment transport text.
    pub fn with_comment(mut self, transport_text: impl Into<String>) -> Self {
        self.comment = Some(transport_text.into());
        self
    }

    /// Decodes the comment into a flat payload cell.
    ///
    /// # Errors
    ///
    /// Propagates [`Cell::from_transport_text`] failures.
    pub fn comment_cell(&self) -> Result<Option<Cell>> {
        self.comment
            .as_deref()
            .map(Cell::from_transport_text)
            .transpose()
    }
}

// ---------------------------------------------------------------------------
// Internal message
// ---------------------------------------------------------------------------

/// Builds the internal message cell paying `amount` to `destination`.
pub(crate) fn internal_message_cell(
    destination: &Address,
    amount: Nanotons,
    bounce: bool,
    body: Option<Cell>,
) -> Result<Cell> {
    let mut cell = Cell::new();
    cell.write_uint(0, 1)? // int_msg_info
        .write_uint(1, 1)? // ihr_disabled
        .write_uint(u128::from(bounce), 1)?
        .write_uint(0, 1)? // bounced
        .write_uint(0, 2)? // src: addr_none
        .store_address(destination)?
        .write_uint(u128::from(amount.as_u64()), 128)?
        .write_uint(0, 1)? // no extra currencies
        .write_uint(0, 4)? // ihr_fee
        .write_uint(0, 4)? // fwd_fee
        .write_uint(0, 64)? // created_lt
        .write_uint(0, 32)? // created_at
        .write_uint(0, 1)? // no state init
        .write_uint(u128::from(body.is_some()), 1)?;

    if let Some(body) = body {
        cell.add_child(body)?;
    }
    Ok(cell)
}

// ---------------------------------------------------------------------------
// TransferMessage
// ---------------------------------------------------------------------------

/// An assembled, unsigned external message.
///
/// The cell is built once at construction and never edited afterwards, so
/// the bytes that get signed are exactly the bytes that were inspected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferMessage {
    seqno: u32,
    valid_until: u32,
    wallet_id: u32,
    send_mode: u8,
    destination: Address,
    amount: Nanotons,
    cell: Cell,
}

/// Header values of a [`TransferMessage`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MessageHeader {
    /// Wallet sequence number.
    pub seqno: u32,
    /// Unix time after which the message is rejected.
    pub valid_until: u32,
    /// Subwallet identifier.
    pub wallet_id: u32,
    /// Send mode byte.
    pub send_mode: u8,
}

impl TransferMessage {
    /// Assembles the external message cell around `internal`.
    pub(crate) fn assemble(
        header: MessageHeader,
        destination: Address,
        amount: Nanotons,
        internal: Cell,
    ) -> Result<Self> {
        let mut cell = Cell::new();
        cell.write_uint(u128::from(header.seqno), 32)?
            .write_uint(u128::from(header.valid_until), 32)?
            .write_uint(u128::from(header.wallet_id), 32)?
            .write_uint(u128::from(header.send_mode), 8)?
            .add_child(internal)?;

        Ok(Self {
            seqno: header.seqno,
            valid_until: header.valid_until,
            wallet_id: header.wallet_id,
            send_mode: header.send_mode,
            destination,
            amount,
            cell,
        })
    }

    /// Sequence number the message was built with.
    pub fn seqno(&self) -> u32 {
        self.seqno
    }

    /// Unix time after which the message expires.
    pub fn valid_until(&self) -> u32 {
        self.valid_until
    }

    /// Subwallet identifier.
    pub fn wallet_id(&self) -> u32 {
        self.wallet_id
    }

    /// Send mode byte.
    pub fn send_mode(&self) -> u8 {
        self.send_mode
    }

    /// Recipient address.
    pub fn destination(&self) -> &Address {
        &self.destination
    }

    /// Amount being transferred.
    pub fn amount(&self) -> Nanotons {
        self.amount
    }

    /// The external message cell.
    pub fn cell(&self) -> &Cell {
        &self.cell
    }
}

impl Signable for TransferMessage {
    fn signable_bytes(&self) -> Vec<u8> {
        self.cell.serialize()
    }
}

// ---------------------------------------------------------------------------
// SignedTransfer
// ---------------------------------------------------------------------------

/// A signed transfer ready for submission.
#[derive(Clone, Debug)]
pub struct SignedTransfer {
    signature: Signature,
    message_bytes: Vec<u8>,
    envelope: Cell,
    seqno: u32,
    valid_until: u32,
}

impl SignedTransfer {
    /// Wraps `signature ‖ message_bytes` in the outer envelope cell.
    pub(crate) fn wrap(message: &TransferMessage, signature: Signature) -> Result<Self> {
        let message_bytes = message.signable_bytes();
        let mut envelope = Cell::new();
        envelope
            .write_bytes(signature.as_bytes())?
            .write_bytes(&message_bytes)?;

        Ok(Self {
            signature,
            message_bytes,
            envelope,
            seqno: message.seqno(),
            valid_until: message.valid_until(),
        })
    }

    /// Base64 transport text of the envelope; the artifact to submit.
    pub fn transport_text(&self) -> String {
        self.envelope.to_transport_text()
    }

    /// SHA-256 of the envelope serialization.
    ///
    /// Suitable as an idempotency or tracking key. **Not** the on-chain
    /// transaction identifier.
    pub fn content_hash(&self) -> ContentHash {
        self.envelope.hash()
    }

    /// The detached signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The serialized message bytes that were signed.
    pub fn message_bytes(&self) -> &[u8] {
        &self.message_bytes
    }

    /// The outer envelope cell.
    pub fn envelope(&self) -> &Cell {
        &self.envelope
    }

    /// Sequence number of the signed message.
    pub fn seqno(&self) -> u32 {
        self.seqno
    }

    /// Unix time after which the signed message expires.
    pub fn valid_until(&self) -> u32 {
        self.valid_until
    }

    /// Checks the detached signature against `public_key`.
    ///
    /// # Errors
    ///
    /// [`tonxfer_types::TonxferError::SignatureInvalid`] if it does not
    /// verify.
    pub fn verify(&self, public_key: &PublicKey) -> Result<()> {
        verify(public_key, &self.message_bytes, &self.signature)
    }
}
