//! Cell builder and serialization.
//!
//! Wire layout of one cell, applied recursively (pre-order):
//!
//! | Offset | Size        | Field                                   |
//! |--------|-------------|-----------------------------------------|
//! | 0      | 1           | number of child cells                   |
//! | 1      | 1           | payload length in bytes                 |
//! | 2      | payload len | payload                                 |
//! | ...    | ...         | each child's serialization, in order    |
//!
//! Both header fields are single bytes, so a cell holds at most
//! [`MAX_PAYLOAD_LEN`] payload bytes and [`MAX_CHILDREN`] children. Writes
//! that would exceed either limit fail with
//! [`TonxferError::ValueOutOfRange`] and leave the cell unchanged.

use tonxfer_crypto::hash::sha256;
use tonxfer_types::{Address, ContentHash, Result, TonxferError};

use crate::transport;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum payload bytes per cell (one-byte length header).
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize;

/// Maximum child cells per cell (one-byte count header).
pub const MAX_CHILDREN: usize = u8::MAX as usize;

/// Bit width of the value type taken by [`Cell::write_uint`]. Wider
/// fields are zero-extended on the left.
pub const VALUE_BITS: usize = u128::BITS as usize;

/// Tag byte preceding a standard address.
pub const ADDR_STD_TAG: u8 = 0x01;

/// Bytes appended by [`Cell::write_address`]: tag, workchain, hash.
pub const ADDR_STD_LEN: usize = 2 + Address::HASH_LEN;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A node of the cell tree.
///
/// Built with append-only writes; a cell exclusively owns its children.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Cell {
    payload: Vec<u8>,
    children: Vec<Cell>,
}

impl Cell {
    /// Creates an empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a childless cell holding `payload`.
    ///
    /// # Errors
    ///
    /// [`TonxferError::ValueOutOfRange`] if `payload` exceeds
    /// [`MAX_PAYLOAD_LEN`].
    pub fn from_payload(payload: Vec<u8>) -> Result<Self> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(TonxferError::ValueOutOfRange {
                reason: format!(
                    "cell payload of {} bytes exceeds {MAX_PAYLOAD_LEN}",
                    payload.len()
                ),
            });
        }
        Ok(Self {
            payload,
            children: Vec::new(),
        })
    }

    /// Decodes transport text into a flat, childless cell.
    ///
    /// The decoded bytes become the payload verbatim; no child tree is
    /// reconstructed.
    ///
    /// # Errors
    ///
    /// - [`TonxferError::EncodingFailure`] if the text is not base64 even
    ///   after padding repair.
    /// - [`TonxferError::ValueOutOfRange`] if the decoded bytes exceed
    ///   [`MAX_PAYLOAD_LEN`].
    pub fn from_transport_text(text: &str) -> Result<Self> {
        Self::from_payload(transport::decode(text)?)
    }

    // -- Accessors --------------------------------------------------------

    /// Returns the payload written so far.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the child cells in insertion order.
    pub fn children(&self) -> &[Cell] {
        &self.children
    }

    // -- Writes -----------------------------------------------------------

    /// Appends `value` as `ceil(bits / 8)` big-endian bytes.
    ///
    /// `bits == 0` appends nothing. Widths above [`VALUE_BITS`] are
    /// padded with leading zero bytes.
    ///
    /// # Errors
    ///
    /// [`TonxferError::ValueOutOfRange`] if `value` does not fit in `bits`
    /// bits, or if the payload would exceed [`MAX_PAYLOAD_LEN`].
    pub fn write_uint(&mut self, value: u128, bits: usize) -> Result<&mut Self> {
        if bits < VALUE_BITS && value >> bits != 0 {
            return Err(TonxferError::ValueOutOfRange {
                reason: format!("value {value} does not fit in {bits} bits"),
            });
        }

        let len = bits.div_ceil(8);
        self.ensure_room(len)?;

        let be = value.to_be_bytes();
        if len <= be.len() {
            return self.append(&be[be.len() - len..]);
        }
        let mut buf = vec![0u8; len - be.len()];
        buf.extend_from_slice(&be);
        self.append(&buf)
    }

    /// Appends raw bytes unchanged.
    ///
    /// # Errors
    ///
    /// [`TonxferError::ValueOutOfRange`] if the payload would exceed
    /// [`MAX_PAYLOAD_LEN`].
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        self.append(bytes)
    }

    /// Parses `"<workchain>:<64 hex chars>"` and appends it as a standard
    /// address (see [`Cell::store_address`]).
    ///
    /// # Errors
    ///
    /// - [`TonxferError::MalformedAddress`] if the text is not a valid
    ///   address.
    /// - [`TonxferError::ValueOutOfRange`] if the payload would overflow.
    pub fn write_address(&mut self, address: &str) -> Result<&mut Self> {
        let parsed: Address = address.parse()?;
        self.store_address(&parsed)
    }

    /// Appends [`ADDR_STD_TAG`], the workchain as a two's-complement byte,
    /// then the 32-byte account hash ([`ADDR_STD_LEN`] bytes in total).
    pub fn store_address(&mut self, address: &Address) -> Result<&mut Self> {
        let mut buf = [0u8; ADDR_STD_LEN];
        buf[0] = ADDR_STD_TAG;
        buf[1] = address.workchain().to_be_bytes()[0];
        buf[2..].copy_from_slice(address.hash());
        self.append(&buf)
    }

    /// Appends `child` to the ordered child list, taking ownership.
    ///
    /// # Errors
    ///
    /// [`TonxferError::ValueOutOfRange`] if the cell already has
    /// [`MAX_CHILDREN`] children.
    pub fn add_child(&mut self, child: Cell) -> Result<&mut Self> {
        if self.children.len() >= MAX_CHILDREN {
            return Err(TonxferError::ValueOutOfRange {
                reason: format!("cell already holds {MAX_CHILDREN} children"),
            });
        }
        self.children.push(child);
        Ok(self)
    }

    fn ensure_room(&self, extra: usize) -> Result<()> {
        match self.payload.len().checked_add(extra) {
            Some(new_len) if new_len <= MAX_PAYLOAD_LEN => Ok(()),
            _ => Err(TonxferError::ValueOutOfRange {
                reason: format!(
                    "writing {extra} bytes to a {}-byte payload exceeds {MAX_PAYLOAD_LEN}",
                    self.payload.len()
                ),
            }),
        }
    }

    fn append(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        self.ensure_room(bytes.len())?;
        self.payload.extend_from_slice(bytes);
        Ok(self)
    }

    // -- Serialization ----------------------------------------------------

    /// Serializes the tree depth-first, pre-order.
    ///
    /// `[child_count, payload_len] ++ payload ++ children...`
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());
        self.serialize_into(&mut out);
        out
    }

    /// Returns `2 + payload.len() + Σ child.serialized_len()` without
    /// allocating.
    pub fn serialized_len(&self) -> usize {
        2 + self.payload.len()
            + self
                .children
                .iter()
                .map(Cell::serialized_len)
                .sum::<usize>()
    }

    fn serialize_into(&self, out: &mut Vec<u8>) {
        // Both bounds are enforced at write time, so the casts are lossless.
        out.push(self.children.len() as u8);
        out.push(self.payload.len() as u8);
        out.extend_from_slice(&self.payload);
        for child in &self.children {
            child.serialize_into(out);
        }
    }

    /// SHA-256 over [`Cell::serialize`].
    ///
    /// An opaque content fingerprint; not protocol-compatible.
    pub fn hash(&self) -> ContentHash {
        ContentHash::new(sha256(&self.serialize()))
    }

    /// Base64 transport text of [`Cell::serialize`].
    pub fn to_transport_text(&self) -> String {
        transport::encode(&self.serialize())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
