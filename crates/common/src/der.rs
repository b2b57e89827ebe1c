//! Building blocks for reading DER-encoded ASN.1 structures.
//!
//! Only the handful of universal types that appear in an RFC 5915 EC private
//! key are supported. Every reader takes the buffer positioned at a tag byte,
//! decodes exactly one element and hands back the unconsumed remainder. There
//! is no cursor: callers thread `rest` into the next call.

use error_stack::Report;

use crate::codec::bytes_to_uint;
use crate::error::AuthError;
use crate::oid::ObjectIdentifier;

pub const CONSTRUCTED: u8 = 1 << 5;
pub const CONTEXT_SPECIFIC: u8 = 2 << 6;

/// Mask selecting the class and constructed bits of a tag byte.
const CLASS_AND_FORM_MASK: u8 = 0xE0;
/// Mask selecting the tag number of a low-tag-number form tag byte.
const TAG_NUMBER_MASK: u8 = 0x1F;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    Integer = 0x02,
    BitString = 0x03,
    OctetString = 0x04,
    Oid = 0x06,
    Sequence = CONSTRUCTED | 0x10, // 0x30
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as Self
    }
}

/// A decoded content length and the number of bytes its encoding took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthSpec {
    pub length: usize,
    pub meta_length: usize,
}

/// One decoded element and whatever followed it in the buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded<'a, T> {
    pub value: T,
    pub rest: &'a [u8],
}

/// Content of a context-specific constructed element, e.g. `[0] { ... }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constructed<'a> {
    pub tag: u8,
    pub content: &'a [u8],
}

fn der_error(message: impl Into<String>) -> Report<AuthError> {
    Report::new(AuthError::der(message))
}

/// Decodes the length octets at the start of `buffer`.
///
/// # Errors
///
/// Returns [`AuthError::Der`] when the buffer is empty, a long-form length
/// declares zero length bytes or more than the buffer holds, or the value
/// does not fit in `usize`.
pub fn read_length(buffer: &[u8]) -> Result<LengthSpec, Report<AuthError>> {
    let (&first, rest) = buffer
        .split_first()
        .ok_or_else(|| der_error("Empty string can't encode valid length value"))?;

    // If the high order bit of the first byte is set to zero then the length
    // is encoded in the seven remaining bits of that byte. Otherwise, those
    // seven bits represent the number of bytes used to encode the length.
    if first & 0x80 == 0 {
        return Ok(LengthSpec {
            length: usize::from(first),
            meta_length: 1,
        });
    }

    let count = usize::from(first & 0x7F);
    if count == 0 {
        return Err(der_error("Invalid length encoding, length of length is 0"));
    }
    let length_bytes = rest
        .get(..count)
        .ok_or_else(|| der_error("Length of length longer than provided buffer"))?;
    let length = usize::try_from(bytes_to_uint(length_bytes)?)
        .map_err(|_| der_error("Length value does not fit in usize"))?;

    Ok(LengthSpec {
        length,
        meta_length: 1 + count,
    })
}

/// Splits an element starting at `buffer[0]` into its tag, content and the
/// remainder, bound-checking the declared length.
fn read_tag_and_get_value(buffer: &[u8]) -> Result<(u8, Decoded<'_, &[u8]>), Report<AuthError>> {
    let (&tag, after_tag) = buffer
        .split_first()
        .ok_or_else(|| der_error("Empty string does not encode an element"))?;
    let LengthSpec {
        length,
        meta_length,
    } = read_length(after_tag)?;
    let after_length = &after_tag[meta_length..];
    if length > after_length.len() {
        return Err(der_error(format!(
            "Length longer than the provided buffer: declared {length}, available {}",
            after_length.len()
        )));
    }
    let (value, rest) = after_length.split_at(length);
    Ok((tag, Decoded { value, rest }))
}

fn expect_tag_and_get_value(
    buffer: &[u8],
    tag: Tag,
) -> Result<Decoded<'_, &[u8]>, Report<AuthError>> {
    let expected = u8::from(tag);
    match buffer.first() {
        None => return Err(der_error(format!("Empty string does not encode a {tag:?}"))),
        Some(&actual) if actual != expected => {
            return Err(der_error(format!(
                "wanted type {tag:?} (0x{expected:02x}), got 0x{actual:02x}"
            )));
        }
        Some(_) => {}
    }
    let (_, decoded) = read_tag_and_get_value(buffer)?;
    Ok(decoded)
}

/// Reads a `SEQUENCE`, returning its content.
///
/// # Errors
///
/// Returns [`AuthError::Der`] on an empty buffer, a tag other than `0x30`,
/// or a length running past the end of the buffer.
pub fn read_sequence(buffer: &[u8]) -> Result<Decoded<'_, &[u8]>, Report<AuthError>> {
    expect_tag_and_get_value(buffer, Tag::Sequence)
}

/// Reads a context-specific constructed element, returning its tag number
/// alongside its content.
///
/// # Errors
///
/// Returns [`AuthError::Der`] if the tag is not context-specific constructed
/// or the length is invalid.
pub fn read_constructed(buffer: &[u8]) -> Result<Decoded<'_, Constructed<'_>>, Report<AuthError>> {
    let first = *buffer
        .first()
        .ok_or_else(|| der_error("Empty string does not encode a constructed element"))?;
    if first & CLASS_AND_FORM_MASK != CONTEXT_SPECIFIC | CONSTRUCTED {
        return Err(der_error(format!(
            "wanted context-specific constructed tag (0xa0-0xbf), got 0x{first:02x}"
        )));
    }
    let (tag, Decoded { value, rest }) = read_tag_and_get_value(buffer)?;
    Ok(Decoded {
        value: Constructed {
            tag: tag & TAG_NUMBER_MASK,
            content: value,
        },
        rest,
    })
}

/// Reads an `OCTET STRING`.
///
/// # Errors
///
/// Returns [`AuthError::Der`] on a tag other than `0x04` or an invalid
/// length.
pub fn read_octet_string(buffer: &[u8]) -> Result<Decoded<'_, &[u8]>, Report<AuthError>> {
    expect_tag_and_get_value(buffer, Tag::OctetString)
}

/// Reads a non-negative, minimally encoded `INTEGER`.
///
/// # Errors
///
/// Returns [`AuthError::Der`] on a wrong tag, an invalid length, empty
/// content, a negative value, an unnecessary leading zero, or a value wider
/// than 64 bits.
pub fn read_integer(buffer: &[u8]) -> Result<Decoded<'_, u64>, Report<AuthError>> {
    let Decoded { value, rest } = expect_tag_and_get_value(buffer, Tag::Integer)?;
    match value {
        [] => return Err(der_error("Empty integer encoding")),
        [first, ..] if first & 0x80 != 0 => {
            return Err(der_error("Negative integers are not supported"));
        }
        // Zero or a necessary leading zero is fine, anything else after a
        // 0x00 is padding that DER forbids.
        [0x00, second, ..] if second & 0x80 == 0 => {
            return Err(der_error("Invalid encoding of integer, unnecessary zero padding bytes"));
        }
        _ => {}
    }
    Ok(Decoded {
        value: bytes_to_uint(value)?,
        rest,
    })
}

/// Reads one base-128 sub-identifier, returning its value and the number of
/// bytes it occupied.
///
/// # Errors
///
/// Returns [`AuthError::Der`] on a non-minimal leading `0x80`, a buffer that
/// ends before the terminating byte, or a value wider than 64 bits.
pub fn read_number(buffer: &[u8]) -> Result<(u64, usize), Report<AuthError>> {
    if buffer.first() == Some(&0x80) {
        return Err(der_error("Non minimal encoding of OID subidentifier"));
    }

    let mut number: u64 = 0;
    for (i, &byte) in buffer.iter().enumerate() {
        if number >> 57 != 0 {
            return Err(der_error("OID subidentifier does not fit in 64 bits"));
        }
        number = (number << 7) | u64::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Ok((number, i + 1));
        }
    }
    Err(der_error("ran out of length bytes"))
}

/// Reads an `OBJECT IDENTIFIER`.
///
/// # Errors
///
/// Returns [`AuthError::Der`] on a wrong tag, an invalid length, empty
/// content, or a malformed sub-identifier.
pub fn read_object(buffer: &[u8]) -> Result<Decoded<'_, ObjectIdentifier>, Report<AuthError>> {
    let Decoded { value, rest } = expect_tag_and_get_value(buffer, Tag::Oid)?;
    if value.is_empty() {
        return Err(der_error("Empty object identifier"));
    }

    let mut numbers = Vec::new();
    let mut content = value;
    while !content.is_empty() {
        let (number, consumed) = read_number(content)?;
        numbers.push(number);
        content = &content[consumed..];
    }

    let (first, second) = ObjectIdentifier::split_first_subidentifier(numbers[0]);
    let mut arcs = Vec::with_capacity(numbers.len() + 1);
    arcs.push(first);
    arcs.push(second);
    arcs.extend_from_slice(&numbers[1..]);

    Ok(Decoded {
        value: ObjectIdentifier::new(arcs),
        rest,
    })
}

/// Reads a `BIT STRING`.
///
/// With `expected_unused_bits` set, the leading unused-bits octet is checked
/// against it and stripped, and the padding bits of the last octet must be
/// zero. Without it the content is returned untouched.
///
/// # Errors
///
/// Returns [`AuthError::Der`] on a wrong tag, an invalid or zero length, an
/// unused-bit count outside 0-7 or different from the expected one, or
/// non-zero padding bits.
pub fn read_bit_string(
    buffer: &[u8],
    expected_unused_bits: Option<u8>,
) -> Result<Decoded<'_, Vec<u8>>, Report<AuthError>> {
    let Decoded { value, rest } = expect_tag_and_get_value(buffer, Tag::BitString)?;
    let Some((&unused, body)) = value.split_first() else {
        return Err(der_error("Invalid length of bit string, can't be 0"));
    };

    let Some(expected) = expected_unused_bits else {
        return Ok(Decoded {
            value: value.to_vec(),
            rest,
        });
    };

    if unused > 7 {
        return Err(der_error(format!("Invalid encoding of unused bits: {unused}")));
    }
    if unused != expected {
        return Err(der_error(format!(
            "Unexpected number of unused bits: expected {expected}, got {unused}"
        )));
    }
    if unused > 0 {
        let last = *body
            .last()
            .ok_or_else(|| der_error("Unused bits declared on an empty bit string"))?;
        if last & ((1u8 << unused) - 1) != 0 {
            return Err(der_error("Non zero padding bits in bit string"));
        }
    }

    Ok(Decoded {
        value: body.to_vec(),
        rest,
    })
}
