//! Ordered header multi-map delivered alongside each payload.
//!
//! The transport owns the headers; the codec only reads them and must
//! not retain references past the call. Insertion order is preserved
//! and duplicate keys are allowed; lookups return the **first** entry
//! under a key, later duplicates are ignored.

use bytes::Bytes;

/// A single `key → value` header entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Header key (e.g. a type-info key, see [`crate::config`]).
    pub key: String,

    /// Raw header value as delivered by the transport.
    pub value: Bytes,
}

/// Ordered multi-map of string keys to byte-array values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<Header>,
}

impl Headers {
    /// Empty header collection.
    pub fn new() -> Self {
        Headers::default()
    }

    /// Append an entry, keeping any existing entries under the same key.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<Bytes>) {
        self.entries.push(Header {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Value of the first entry under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|h| h.key == key)
            .map(|h| h.value.as_ref())
    }

    /// Iterate over all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.entries.iter()
    }

    /// Number of entries (duplicates counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
