//! Error types for the codec.
//!
//! Every kind here is non-retryable: each aborts the single encode or
//! decode call that raised it and leaves shared state untouched. Retry,
//! if any, belongs to the transport.

use std::error::Error;
use std::fmt;

/// Failure raised by a message type's own encoder or decoder.
///
/// The codec does not interpret these; they pass through unchanged as
/// the `source` of [`CodecError::Encode`] / [`CodecError::Decode`].
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Errors raised by the codec's public operations.
#[derive(Debug)]
pub enum CodecError {
    /// The payload (or message) argument was absent.
    MissingPayload,

    /// Resolution produced no usable type name: no header entry (or a
    /// metadata-less call) and no configured default type.
    NoDecoderAvailable,

    /// The resolved type name is not registered in the type universe.
    UnknownType(String),

    /// The name is registered but the type is not message-capable.
    TypeMismatch(String),

    /// The type is message-capable but has no byte-level decode entry.
    MissingDecodeCapability(String),

    /// The message's own encoder failed.
    Encode(BoxError),

    /// The resolved type's decoder rejected the payload.
    Decode {
        /// Name of the type whose decoder was invoked.
        type_name: String,
        /// The decoder's own error.
        source: BoxError,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::MissingPayload => write!(f, "payload is absent"),
            CodecError::NoDecoderAvailable => {
                write!(f, "no decoder available: no type info and no default type configured")
            }
            CodecError::UnknownType(name) => {
                write!(f, "type {} is not registered", name)
            }
            CodecError::TypeMismatch(name) => {
                write!(f, "type {} is registered but is not a message type", name)
            }
            CodecError::MissingDecodeCapability(name) => {
                write!(f, "message type {} has no decode-from-bytes entry", name)
            }
            CodecError::Encode(e) => write!(f, "encode failed: {}", e),
            CodecError::Decode { type_name, source } => {
                write!(f, "decode as {} failed: {}", type_name, source)
            }
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CodecError::Encode(e) => Some(e.as_ref()),
            CodecError::Decode { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
