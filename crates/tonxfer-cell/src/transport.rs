//! Base64 transport text.
//!
//! Serialized cells travel through JSON and URLs as standard base64.
//! Some producers strip the trailing `=` padding, so decoding first pads
//! the input back to a multiple of four characters.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tonxfer_types::{Result, TonxferError};

/// Right-pads `text` with `=` until its length is a multiple of 4.
pub fn repair_padding(text: &str) -> String {
    let missing = (4 - text.len() % 4) % 4;
    let mut out = String::with_capacity(text.len() + missing);
    out.push_str(text);
    out.extend(std::iter::repeat('=').take(missing));
    out
}

/// Encodes bytes as padded standard base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes transport text, repairing stripped padding first.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// [`TonxferError::EncodingFailure`] if the repaired text is not valid
/// standard base64.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(repair_padding(text.trim()))
        .map_err(|e| TonxferError::EncodingFailure {
            reason: format!("invalid base64 transport text: {e}"),
        })
}

/// Renders the human-readable part of a comment payload.
///
/// Non-printable bytes become spaces, whitespace runs collapse to a single
/// space and the result is trimmed. When `marker` is given and present,
/// the preview starts at the marker (e.g. `"50 Telegram Stars"` to skip
/// binary prefixes). Text that does not decode is returned unchanged.
pub fn comment_preview(text: &str, marker: Option<&str>) -> String {
    let Ok(bytes) = decode(text) else {
        return text.to_owned();
    };

    let printable: String = bytes
        .iter()
        .map(|&b| if (0x20..0x7F).contains(&b) { b as char } else { ' ' })
        .collect();
    let clean = printable.split_whitespace().collect::<Vec<_>>().join(" ");

    match marker.and_then(|m| clean.find(m)) {
        Some(idx) => clean[idx..].to_owned(),
        None => clean,
    }
}
