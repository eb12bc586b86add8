//! Integration tests for the cell codec.
//!
//! Structural laws are checked with proptest over randomly shaped trees;
//! the remaining tests pin exact byte layouts.

use proptest::prelude::*;
use tonxfer_cell::cell::{ADDR_STD_LEN, MAX_PAYLOAD_LEN};
use tonxfer_cell::transport;
use tonxfer_cell::Cell;
use tonxfer_types::TonxferError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reference serializer written directly from the wire layout.
fn reference_serialize(cell: &Cell) -> Vec<u8> {
    let mut out = vec![cell.children().len() as u8, cell.payload().len() as u8];
    out.extend_from_slice(cell.payload());
    for child in cell.children() {
        out.extend(reference_serialize(child));
    }
    out
}

/// Builds a tree from `(payload, parent_selector)` nodes.
///
/// Node 0 is the root; node `i > 0` attaches to node `selector % i`, so
/// every parent precedes its children and the result is always a tree.
fn build_tree(nodes: &[(Vec<u8>, usize)]) -> Result<Cell, TonxferError> {
    let mut cells: Vec<Option<Cell>> = nodes
        .iter()
        .map(|(payload, _)| Cell::from_payload(payload.clone()).map(Some))
        .collect::<Result<_, _>>()?;

    let mut order: Vec<(usize, usize)> = nodes
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, (_, sel))| (i, sel % i))
        .collect();
    order.reverse();

    for (child_idx, parent_idx) in order {
        if let Some(child) = cells[child_idx].take() {
            if let Some(parent) = cells[parent_idx].as_mut() {
                parent.add_child(child)?;
            }
        }
    }

    Ok(cells.swap_remove(0).unwrap_or_default())
}

fn tree_strategy() -> impl Strategy<Value = Vec<(Vec<u8>, usize)>> {
    prop::collection::vec(
        (prop::collection::vec(any::<u8>(), 0..48), any::<usize>()),
        1..24,
    )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn serialized_length_law(nodes in tree_strategy()) {
        let tree = build_tree(&nodes).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let bytes = tree.serialize();
        let children_len: usize = tree.children().iter().map(|c| c.serialize().len()).sum();
        prop_assert_eq!(bytes.len(), 2 + tree.payload().len() + children_len);
        prop_assert_eq!(bytes.len(), tree.serialized_len());
    }

    #[test]
    fn serialization_matches_reference_layout(nodes in tree_strategy()) {
        let tree = build_tree(&nodes).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(tree.serialize(), reference_serialize(&tree));
    }

    #[test]
    fn flat_cell_transport_roundtrip(
        payload in prop::collection::vec(any::<u8>(), 0..(MAX_PAYLOAD_LEN - 2)),
        strip_padding in any::<bool>(),
    ) {
        let mut cell = Cell::new();
        cell.write_bytes(&payload).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut text = cell.to_transport_text();
        if strip_padding {
            text = text.trim_end_matches('=').to_owned();
        }

        let decoded = Cell::from_transport_text(&text)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let serialized = cell.serialize();
        prop_assert_eq!(decoded.payload(), serialized.as_slice());
        prop_assert_eq!(&decoded.payload()[2..], cell.payload());
    }

    #[test]
    fn write_uint_accepts_exactly_fitting_values(value in any::<u64>(), bits in 1usize..=64) {
        let mut cell = Cell::new();
        let fits = bits == 64 || value >> bits == 0;
        let result = cell.write_uint(u128::from(value), bits);
        prop_assert_eq!(result.is_ok(), fits);
        if fits {
            prop_assert_eq!(cell.payload().len(), bits.div_ceil(8));
        } else {
            prop_assert!(cell.payload().is_empty());
        }
    }
}

// ---------------------------------------------------------------------------
// Fixed layouts
// ---------------------------------------------------------------------------

#[test]
fn address_write_layout() -> Result<(), TonxferError> {
    let hash = "20c429e3bb195f46a582c10eb687c6ed182ec58237a55787f245ec992c337118";
    let mut cell = Cell::new();
    cell.write_address(&format!("0:{hash}"))?;

    let mut expected = vec![0x01, 0x00];
    expected.extend(hex::decode(hash).map_err(|e| TonxferError::EncodingFailure {
        reason: e.to_string(),
    })?);
    assert_eq!(cell.payload(), expected.as_slice());
    assert_eq!(cell.payload().len(), ADDR_STD_LEN);
    Ok(())
}

#[test]
fn malformed_addresses_rejected() {
    for bad in ["abc", "0:xy", "0:", ":00", "zero:00", "0:abc"] {
        assert!(
            matches!(
                Cell::new().write_address(bad),
                Err(TonxferError::MalformedAddress { .. })
            ),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn oversized_transport_text_rejected() {
    let text = transport::encode(&[0u8; MAX_PAYLOAD_LEN + 1]);
    assert!(matches!(
        Cell::from_transport_text(&text),
        Err(TonxferError::ValueOutOfRange { .. })
    ));
}

#[test]
fn invalid_transport_text_rejected() {
    assert!(matches!(
        Cell::from_transport_text("@@@"),
        Err(TonxferError::EncodingFailure { .. })
    ));
}

#[test]
fn known_transport_text() -> Result<(), TonxferError> {
    let mut cell = Cell::new();
    cell.write_uint(3, 8)?;
    // [0x00, 0x01, 0x03] in base64.
    assert_eq!(cell.to_transport_text(), "AAED");
    assert_eq!(Cell::from_transport_text("AAED")?.payload(), &[0x00, 0x01, 0x03]);
    Ok(())
}
