//! DER encoders matching the readers in [`crate::der`].
//!
//! Used to export keys and to build fixtures. Lengths are always written in
//! the minimal form.

use error_stack::Report;

use crate::der::{Tag, CONSTRUCTED, CONTEXT_SPECIFIC};
use crate::error::AuthError;
use crate::oid::ObjectIdentifier;

#[must_use]
pub fn encode_length(length: usize) -> Vec<u8> {
    if length < 0x80 {
        // Fits in the seven low bits.
        return vec![length as u8];
    }
    let bytes = length.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    let significant = &bytes[skip..];

    let mut out = Vec::with_capacity(1 + significant.len());
    out.push(0x80 | significant.len() as u8);
    out.extend_from_slice(significant);
    out
}

fn write_tlv(tag: u8, value: &[u8]) -> Vec<u8> {
    let length = encode_length(value.len());
    let mut out = Vec::with_capacity(1 + length.len() + value.len());
    out.push(tag);
    out.extend_from_slice(&length);
    out.extend_from_slice(value);
    out
}

/// Wraps the concatenation of `elements` in a `SEQUENCE`.
#[must_use]
pub fn encode_sequence(elements: &[&[u8]]) -> Vec<u8> {
    write_tlv(u8::from(Tag::Sequence), &elements.concat())
}

/// Encodes an unsigned `INTEGER`, adding a zero byte when the top bit of the
/// first significant byte is set.
#[must_use]
pub fn encode_integer(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let skip = bytes
        .iter()
        .take_while(|&&b| b == 0)
        .count()
        .min(bytes.len() - 1);
    let significant = &bytes[skip..];

    let mut content = Vec::with_capacity(significant.len() + 1);
    if significant[0] & 0x80 != 0 {
        content.push(0); // Disambiguate negative number.
    }
    content.extend_from_slice(significant);
    write_tlv(u8::from(Tag::Integer), &content)
}

#[must_use]
pub fn encode_octet_string(value: &[u8]) -> Vec<u8> {
    write_tlv(u8::from(Tag::OctetString), value)
}

/// Encodes `[tag] { content }` with a context-specific constructed tag.
/// `tag` must be below 31.
#[must_use]
pub fn encode_constructed(tag: u8, content: &[u8]) -> Vec<u8> {
    write_tlv(CONTEXT_SPECIFIC | CONSTRUCTED | (tag & 0x1F), content)
}

fn encode_number(mut value: u64, out: &mut Vec<u8>) {
    let mut groups = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        groups.push(0x80 | (value & 0x7F) as u8);
        value >>= 7;
    }
    out.extend(groups.iter().rev());
}

/// Encodes an `OBJECT IDENTIFIER`.
///
/// # Errors
///
/// Returns [`AuthError::Der`] if the identifier has fewer than two arcs or
/// the first two arcs do not fit in one 64-bit subidentifier.
pub fn encode_oid(oid: &ObjectIdentifier) -> Result<Vec<u8>, Report<AuthError>> {
    let [first, second, rest @ ..] = oid.arcs() else {
        return Err(Report::new(AuthError::der(format!(
            "object identifier {oid} needs at least two arcs"
        ))));
    };
    let leading = first
        .checked_mul(40)
        .and_then(|v| v.checked_add(*second))
        .ok_or_else(|| {
            Report::new(AuthError::der(format!(
                "first arcs of object identifier {oid} overflow a subidentifier"
            )))
        })?;

    let mut content = Vec::new();
    encode_number(leading, &mut content);
    for &arc in rest {
        encode_number(arc, &mut content);
    }
    Ok(write_tlv(u8::from(Tag::Oid), &content))
}

/// Encodes a `BIT STRING` whose last `unused_bits` bits are padding.
#[must_use]
pub fn encode_bit_string(value: &[u8], unused_bits: u8) -> Vec<u8> {
    let mut content = Vec::with_capacity(value.len() + 1);
    content.push(unused_bits);
    content.extend_from_slice(value);
    write_tlv(u8::from(Tag::BitString), &content)
}
