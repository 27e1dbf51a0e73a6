//! The message capability.
//!
//! A message is an opaque structured value belonging to exactly one
//! concrete type. Each type carries:
//! - an instance-level encode-to-bytes operation (this trait), and
//! - a type-level decode-from-bytes operation, registered separately in
//!   the type universe (see [`crate::registry`]), no instance required.
//!
//! A type's decoder accepts exactly the bytes its own encoder produces.
//! Decoding bytes produced by a *different* type with the same encoding
//! scheme is permitted to succeed with garbage fields; type identity
//! travels out of band, never inside the payload.

use std::any::Any;
use std::fmt;

use crate::error::BoxError;

/// Capability every concrete message type implements.
///
/// Implementations are plain data types; the codec only ever calls
/// these three operations.
pub trait Message: fmt::Debug + Send + Sync {
    /// Globally unique, stable name of the concrete type.
    ///
    /// Used verbatim as configuration value, header value, and cache
    /// key: exact match, no normalization.
    fn type_name(&self) -> &'static str;

    /// Encode this message into its own binary representation.
    ///
    /// Failures are the type's own; the codec propagates them unchanged.
    fn encode_to_bytes(&self) -> Result<Vec<u8>, BoxError>;

    /// Upcast used by the downcast helpers on `dyn Message`.
    fn as_any(&self) -> &dyn Any;
}

/// A decoded message of some registered concrete type.
pub type BoxMessage = Box<dyn Message>;

impl dyn Message {
    /// Borrow the message as concrete type `T`, if that is what it is.
    pub fn downcast_ref<T: Message + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// True when the message's concrete type is `T`.
    pub fn is<T: Message + 'static>(&self) -> bool {
        self.as_any().is::<T>()
    }
}
