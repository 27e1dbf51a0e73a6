//! Explicit type universe and the resolved-decoder cache.
//!
//! There is no runtime reflection: every type that can appear on the
//! wire is registered up front as a [`TypeRecord`] in a [`TypeTable`]
//! (or any other [`TypeLookup`] implementation). [`TypeRegistry`] then
//! maps type names to [`ResolvedDecoder`]s, computing each at most once
//! and caching the result for the life of the codec instance.
//!
//! Cache entries are never evicted or invalidated. Growth is bounded by
//! the number of distinct registered types, so the map only ever holds
//! as many entries as the program's own type universe.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::error::{BoxError, CodecError};
use crate::message::BoxMessage;

/// Type-level decode entry: bytes in, typed message out.
///
/// No instance is required; this is the registered, statically known
/// counterpart of [`crate::Message::encode_to_bytes`].
pub type DecodeFn = fn(&[u8]) -> Result<BoxMessage, BoxError>;

/// Byte-level capabilities of a message-capable type.
#[derive(Debug, Copy, Clone)]
pub struct MessageVtable {
    /// Decode-from-bytes entry, if the type has one.
    pub decode: Option<DecodeFn>,
}

/// What a registered name stands for.
#[derive(Debug, Copy, Clone)]
pub enum TypeCapability {
    /// A message-capable type.
    Message(MessageVtable),

    /// Registered under a name, but not a message type at all.
    Opaque,
}

/// One entry in the type universe.
#[derive(Debug, Clone)]
pub struct TypeRecord {
    /// Name the record is registered under.
    pub type_name: String,

    /// What the name stands for.
    pub capability: TypeCapability,
}

impl TypeRecord {
    /// Record for a message type with a decode entry.
    pub fn message(type_name: impl Into<String>, decode: DecodeFn) -> Self {
        TypeRecord {
            type_name: type_name.into(),
            capability: TypeCapability::Message(MessageVtable {
                decode: Some(decode),
            }),
        }
    }

    /// Record for a message type that cannot be decoded from bytes.
    pub fn message_without_decode(type_name: impl Into<String>) -> Self {
        TypeRecord {
            type_name: type_name.into(),
            capability: TypeCapability::Message(MessageVtable { decode: None }),
        }
    }

    /// Record for a name that is not a message type.
    pub fn opaque(type_name: impl Into<String>) -> Self {
        TypeRecord {
            type_name: type_name.into(),
            capability: TypeCapability::Opaque,
        }
    }
}

/// Lookup seam over the type universe.
///
/// [`TypeTable`] is the normal implementation; tests interpose their
/// own (e.g. a counting wrapper) to observe how often the expensive
/// lookup path actually runs.
pub trait TypeLookup: Send + Sync {
    /// The record registered under `type_name`, if any.
    fn lookup(&self, type_name: &str) -> Option<TypeRecord>;
}

/// In-memory type universe, populated by explicit registration at
/// program startup.
#[derive(Debug, Default)]
pub struct TypeTable {
    types: HashMap<String, TypeRecord>,
}

impl TypeTable {
    /// Empty table.
    pub fn new() -> Self {
        TypeTable::default()
    }

    /// Register a record under its own type name.
    ///
    /// Registering the same name again replaces the earlier record.
    pub fn register(&mut self, record: TypeRecord) {
        self.types.insert(record.type_name.clone(), record);
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeLookup for TypeTable {
    fn lookup(&self, type_name: &str) -> Option<TypeRecord> {
        self.types.get(type_name).cloned()
    }
}

/// A decode capability resolved for one type name.
///
/// Cheap to clone; the cached copy lives in the registry for the life
/// of the codec instance.
#[derive(Clone)]
pub struct ResolvedDecoder {
    type_name: Arc<str>,
    decode: DecodeFn,
}

impl ResolvedDecoder {
    /// Name this decoder was resolved for.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Run the decoder against `payload`.
    ///
    /// The decoder's own failures come back as [`CodecError::Decode`]
    /// with the original error as source.
    pub fn decode(&self, payload: &[u8]) -> Result<BoxMessage, CodecError> {
        (self.decode)(payload).map_err(|source| CodecError::Decode {
            type_name: self.type_name.to_string(),
            source,
        })
    }
}

impl fmt::Debug for ResolvedDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedDecoder")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Maps type names to resolved decoders, computing each at most once.
///
/// Shared-state contract: safe for concurrent `resolve` calls from many
/// threads without external locking. The cache's entry API locks per
/// key, so concurrent first-time resolutions of the same name perform
/// the underlying lookup once and all observe the same fully-built
/// decoder.
pub struct TypeRegistry {
    universe: Arc<dyn TypeLookup>,
    cache: DashMap<String, ResolvedDecoder>,
}

impl TypeRegistry {
    /// Registry over `universe`, with an empty cache.
    pub fn new(universe: Arc<dyn TypeLookup>) -> Self {
        TypeRegistry {
            universe,
            cache: DashMap::new(),
        }
    }

    /// Resolve `type_name` to a decode capability.
    ///
    /// First request for a name performs the lookup and classification
    /// below; later requests return the cached decoder. A failed
    /// resolution inserts nothing, so the same name can still resolve
    /// later (e.g. against a lookup whose contents have changed).
    ///
    /// Errors: [`CodecError::UnknownType`] when the name is not
    /// registered, [`CodecError::TypeMismatch`] when it is registered
    /// but not message-capable, [`CodecError::MissingDecodeCapability`]
    /// when the message type has no decode entry.
    pub fn resolve(&self, type_name: &str) -> Result<ResolvedDecoder, CodecError> {
        if let Some(hit) = self.cache.get(type_name) {
            return Ok(hit.value().clone());
        }

        match self.cache.entry(type_name.to_owned()) {
            Entry::Occupied(occupied) => Ok(occupied.get().clone()),
            Entry::Vacant(vacant) => {
                let resolved = lookup_decoder(self.universe.as_ref(), type_name)?;
                debug!(type_name, "resolved decoder");
                vacant.insert(resolved.clone());
                Ok(resolved)
            }
        }
    }

    /// Number of names resolved so far.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("cached_len", &self.cache.len())
            .finish()
    }
}

/// The expensive path: find the record and classify its capabilities.
fn lookup_decoder(
    universe: &dyn TypeLookup,
    type_name: &str,
) -> Result<ResolvedDecoder, CodecError> {
    let record = universe
        .lookup(type_name)
        .ok_or_else(|| CodecError::UnknownType(type_name.to_owned()))?;

    match record.capability {
        TypeCapability::Opaque => Err(CodecError::TypeMismatch(type_name.to_owned())),
        TypeCapability::Message(vtable) => match vtable.decode {
            Some(decode) => Ok(ResolvedDecoder {
                type_name: Arc::from(type_name),
                decode,
            }),
            None => Err(CodecError::MissingDecodeCapability(type_name.to_owned())),
        },
    }
}
