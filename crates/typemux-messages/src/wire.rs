//! Shared wire constants and the wire-level error type.
//!
//! Every demo layout starts with the same one-byte layout version. The
//! payload carries no per-type tag: type identity travels out of band
//! (configuration or headers), so bytes of one type remain decodable as
//! another type of the same layout family. That is the documented
//! cross-type hazard, not something these decoders detect.

use std::error::Error;
use std::fmt;

/// Current layout version, shared by every demo type.
pub const LAYOUT_VERSION: u8 = 1;

/// Maximum length of string fields (unit, label) on the wire.
pub const MAX_LABEL_LEN: usize = 64;

/// A tiny helper for validating string-field lengths.
pub fn validate_label_len(len: usize) -> bool {
    len > 0 && len <= MAX_LABEL_LEN
}

/// Errors that can arise when encoding/decoding a demo message.
#[derive(Debug)]
pub enum WireError {
    /// Buffer too short for the expected fields.
    Truncated,

    /// Unsupported layout version.
    VersionMismatch(u8),

    /// Invalid string-field length or malformed UTF-8.
    InvalidLabel,

    /// Invalid enum byte or other semantic issue.
    InvalidField(&'static str),
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::Truncated => write!(f, "Buffer truncated"),
            WireError::VersionMismatch(v) => {
                write!(f, "Layout version mismatch: got {}, expected {}", v, LAYOUT_VERSION)
            }
            WireError::InvalidLabel => write!(f, "Invalid label"),
            WireError::InvalidField(field) => write!(f, "Invalid field: {}", field),
        }
    }
}

impl Error for WireError {}
