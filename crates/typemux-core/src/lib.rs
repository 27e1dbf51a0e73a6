//! typemux-core
//!
//! Runtime type-resolving message codec:
//! - message capability (`Message`, `BoxMessage`)
//! - ordered header multi-map (`Headers`)
//! - explicit type universe and resolved-decoder cache (`registry`)
//! - per-call type-name resolution (`resolution`)
//! - the transport-facing codec (`TypedCodec`)
//!
//! The codec encodes a typed message into bytes and decodes bytes back
//! into a typed message, where the concrete type to decode into is
//! either fixed by configuration or discovered from headers delivered
//! alongside the payload. The transport itself, and each type's binary
//! layout, live outside this crate.

pub mod codec;
pub mod config;
pub mod error;
pub mod headers;
pub mod message;
pub mod registry;
pub mod resolution;

pub use codec::TypedCodec;
pub use config::{CodecConfig, Role};
pub use error::{BoxError, CodecError};
pub use headers::{Header, Headers};
pub use message::{BoxMessage, Message};

pub use registry::{
    DecodeFn,
    MessageVtable,
    ResolvedDecoder,
    TypeCapability,
    TypeLookup,
    TypeRecord,
    TypeRegistry,
    TypeTable,
};

pub use resolution::ResolutionPolicy;
