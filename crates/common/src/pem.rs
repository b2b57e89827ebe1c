//! PEM section extraction and encoding.
//!
//! Sections are delimited by `-----BEGIN <label>-----` and
//! `-----END <label>-----` lines. Lines are trimmed before matching, so CRLF
//! input and indented blocks are accepted.

use base64::{engine::general_purpose, Engine};
use error_stack::Report;

use crate::error::AuthError;

const BOUNDARY: &str = "-----";
const BEGIN_PREFIX: &str = "-----BEGIN ";
const END_PREFIX: &str = "-----END ";
const LINE_WIDTH: usize = 64;

fn begin_marker(label: &str) -> String {
    format!("{BEGIN_PREFIX}{label}{BOUNDARY}")
}

fn end_marker(label: &str) -> String {
    format!("{END_PREFIX}{label}{BOUNDARY}")
}

/// Returns the label of every `BEGIN` line, in order of appearance.
#[must_use]
pub fn list_pem_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| {
            line.strip_prefix(BEGIN_PREFIX)?
                .strip_suffix(BOUNDARY)
                .map(str::to_string)
        })
        .collect()
}

/// Base64-decodes the body of a PEM block, ignoring boundary and blank lines.
///
/// # Errors
///
/// Returns [`AuthError::Format`] if the remaining text is not valid base64.
pub fn decode_pem_section(text: &str) -> Result<Vec<u8>, Report<AuthError>> {
    let body: String = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(BOUNDARY))
        .collect();

    general_purpose::STANDARD
        .decode(body)
        .map_err(|e| Report::new(AuthError::format(format!("invalid base64 in PEM body: {e}"))))
}

/// Extracts and decodes the first section labelled `label`.
///
/// # Errors
///
/// Returns [`AuthError::Format`] if the `BEGIN`/`END` markers for `label` are
/// unbalanced or the body is not base64, and
/// [`AuthError::PemSectionNotFound`] if no such section exists.
pub fn get_pem_section(text: &str, label: &str) -> Result<Vec<u8>, Report<AuthError>> {
    let begin = begin_marker(label);
    let end = end_marker(label);

    let mut inside = false;
    let mut found = false;
    let mut body = Vec::new();

    for (number, line) in text.lines().map(str::trim).enumerate() {
        if line == begin {
            if inside {
                return Err(Report::new(AuthError::format(format!(
                    "nested '{begin}' on line {}",
                    number + 1
                ))));
            }
            inside = true;
        } else if line == end {
            if !inside {
                return Err(Report::new(AuthError::format(format!(
                    "'{end}' without matching BEGIN on line {}",
                    number + 1
                ))));
            }
            inside = false;
            found = true;
        } else if inside && !found {
            body.push(line);
        }
    }

    if inside {
        return Err(Report::new(AuthError::format(format!(
            "'{begin}' is never closed"
        ))));
    }
    if !found {
        return Err(Report::new(AuthError::PemSectionNotFound {
            label: label.to_string(),
        }));
    }

    decode_pem_section(&body.join("\n"))
}

/// Wraps `der` in a PEM block, breaking the base64 body at 64 columns.
#[must_use]
pub fn encode_pem(label: &str, der: &[u8]) -> String {
    let encoded = general_purpose::STANDARD.encode(der);
    let mut out = begin_marker(label);
    out.push('\n');
    // Base64 output is ASCII, so byte chunks are valid UTF-8.
    for chunk in encoded.as_bytes().chunks(LINE_WIDTH) {
        out.push_str(&String::from_utf8_lossy(chunk));
        out.push('\n');
    }
    out.push_str(&end_marker(label));
    out.push('\n');
    out
}
