// crates/typemux-core/tests/registry_test.rs
//
// TypeRegistry behavior: error classification, idempotent resolution,
// at-most-once lookup under concurrent load, and the no-poisoning rule
// for failed resolutions.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;

use typemux_core::{
    BoxError, BoxMessage, CodecError, Message, TypeLookup, TypeRecord, TypeRegistry, TypeTable,
};

/// Minimal message type for registry tests: carries its raw bytes.
#[derive(Debug, PartialEq, Eq)]
struct Blob(Vec<u8>);

impl Blob {
    const TYPE_NAME: &'static str = "test.Blob";
}

impl Message for Blob {
    fn type_name(&self) -> &'static str {
        Blob::TYPE_NAME
    }

    fn encode_to_bytes(&self) -> Result<Vec<u8>, BoxError> {
        Ok(self.0.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn decode_blob(buf: &[u8]) -> Result<BoxMessage, BoxError> {
    Ok(Box::new(Blob(buf.to_vec())))
}

fn table_with_blob() -> TypeTable {
    let mut table = TypeTable::new();
    table.register(TypeRecord::message(Blob::TYPE_NAME, decode_blob));
    table
}

/// Wraps a table and counts how often the expensive lookup path runs.
struct CountingLookup {
    inner: TypeTable,
    lookups: AtomicUsize,
}

impl TypeLookup for CountingLookup {
    fn lookup(&self, type_name: &str) -> Option<TypeRecord> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(type_name)
    }
}

/// A type universe whose contents can change after the registry exists.
#[derive(Default)]
struct MutableLookup {
    inner: RwLock<TypeTable>,
}

impl TypeLookup for MutableLookup {
    fn lookup(&self, type_name: &str) -> Option<TypeRecord> {
        self.inner.read().unwrap().lookup(type_name)
    }
}

#[test]
fn resolve_classifies_registry_failures() {
    let mut table = TypeTable::new();
    table.register(TypeRecord::opaque("test.NotAMessage"));
    table.register(TypeRecord::message_without_decode("test.EncodeOnly"));
    let registry = TypeRegistry::new(Arc::new(table));

    assert!(matches!(
        registry.resolve("test.Nowhere"),
        Err(CodecError::UnknownType(name)) if name == "test.Nowhere"
    ));
    assert!(matches!(
        registry.resolve("test.NotAMessage"),
        Err(CodecError::TypeMismatch(_))
    ));
    assert!(matches!(
        registry.resolve("test.EncodeOnly"),
        Err(CodecError::MissingDecodeCapability(_))
    ));

    // None of the failures may leave a cache entry behind.
    assert_eq!(registry.cached_len(), 0);
}

#[test]
fn resolve_is_idempotent() {
    let registry = TypeRegistry::new(Arc::new(table_with_blob()));

    let first = registry.resolve(Blob::TYPE_NAME).unwrap();
    let second = registry.resolve(Blob::TYPE_NAME).unwrap();

    let a = first.decode(b"payload").unwrap();
    let b = second.decode(b"payload").unwrap();
    assert_eq!(a.downcast_ref::<Blob>(), Some(&Blob(b"payload".to_vec())));
    assert_eq!(b.downcast_ref::<Blob>(), Some(&Blob(b"payload".to_vec())));

    assert_eq!(registry.cached_len(), 1);
}

#[test]
fn concurrent_resolution_performs_one_lookup() {
    let lookup = Arc::new(CountingLookup {
        inner: table_with_blob(),
        lookups: AtomicUsize::new(0),
    });
    let registry = TypeRegistry::new(Arc::clone(&lookup) as Arc<dyn TypeLookup>);

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                let decoder = registry.resolve(Blob::TYPE_NAME).unwrap();
                let msg = decoder.decode(b"abc").unwrap();
                assert_eq!(msg.downcast_ref::<Blob>(), Some(&Blob(b"abc".to_vec())));
            });
        }
    });

    assert_eq!(lookup.lookups.load(Ordering::SeqCst), 1);
    assert_eq!(registry.cached_len(), 1);
}

#[test]
fn failed_resolution_does_not_poison_the_cache() {
    let lookup = Arc::new(MutableLookup::default());
    let registry = TypeRegistry::new(Arc::clone(&lookup) as Arc<dyn TypeLookup>);

    assert!(matches!(
        registry.resolve(Blob::TYPE_NAME),
        Err(CodecError::UnknownType(_))
    ));

    // The type shows up later; the earlier failure must not stick.
    lookup
        .inner
        .write()
        .unwrap()
        .register(TypeRecord::message(Blob::TYPE_NAME, decode_blob));

    let decoder = registry.resolve(Blob::TYPE_NAME).unwrap();
    assert_eq!(decoder.type_name(), Blob::TYPE_NAME);
}
