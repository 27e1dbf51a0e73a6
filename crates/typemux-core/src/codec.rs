//! The transport-facing codec.
//!
//! One [`TypedCodec`] instance serves one position (key or value) of a
//! transport's payload pair. Construction takes the type universe;
//! [`configure`](TypedCodec::configure) takes the per-role options.
//! Configure once, then share the instance freely across worker
//! threads: every operation below is a bounded, in-memory
//! transformation with no I/O.
//!
//! A `configure` call racing a `decode` on another thread is the
//! caller's problem (configure-then-use discipline); the resolved-
//! decoder cache itself needs no external locking.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::{CodecConfig, Role};
use crate::error::CodecError;
use crate::headers::Headers;
use crate::message::{BoxMessage, Message};
use crate::registry::{TypeLookup, TypeRegistry};
use crate::resolution::ResolutionPolicy;

/// Runtime type-resolving codec.
pub struct TypedCodec {
    policy: ResolutionPolicy,
    registry: TypeRegistry,
}

impl TypedCodec {
    /// Unconfigured codec over `universe`.
    ///
    /// Until [`configure`](TypedCodec::configure) runs, no default type
    /// is set and header resolution is off, so every decode fails with
    /// [`CodecError::NoDecoderAvailable`].
    pub fn new(universe: Arc<dyn TypeLookup>) -> Self {
        TypedCodec {
            policy: ResolutionPolicy::new(CodecConfig::default()),
            registry: TypeRegistry::new(universe),
        }
    }

    /// Apply role-specific options from a string-keyed configuration map.
    ///
    /// Only the keys for `role` are read (see [`crate::config`]). The
    /// default type name is stored verbatim and validated lazily, the
    /// first time a decode call needs it, never here.
    ///
    /// Calling `configure` again folds the new map over the previous
    /// options (present keys overwrite, absent keys keep their value)
    /// and leaves every previously cached decoder in place.
    pub fn configure(&mut self, config: &HashMap<String, String>, role: Role) {
        let mut snapshot = self.policy.config().clone();
        snapshot.apply(config, role);

        debug!(
            role = ?snapshot.role,
            default_type = snapshot.default_type_name.as_deref().unwrap_or("<none>"),
            use_type_info = snapshot.use_type_info,
            "codec configured"
        );

        self.policy = ResolutionPolicy::new(snapshot);
    }

    /// The configuration snapshot currently in effect.
    pub fn config(&self) -> &CodecConfig {
        self.policy.config()
    }

    /// Encode `message` into its binary representation.
    ///
    /// Direct pass-through to the message's own encoder; no resolution
    /// is involved. An absent message is [`CodecError::MissingPayload`];
    /// encoder failures propagate as [`CodecError::Encode`].
    pub fn encode(&self, message: Option<&dyn Message>) -> Result<Vec<u8>, CodecError> {
        let message = message.ok_or(CodecError::MissingPayload)?;
        message.encode_to_bytes().map_err(CodecError::Encode)
    }

    /// Decode `payload` using the statically configured default type.
    ///
    /// Metadata-less entry point: headers are never consulted, even
    /// when `use_type_info` is enabled for this role. Without a
    /// configured default this fails immediately with
    /// [`CodecError::NoDecoderAvailable`].
    pub fn decode(&self, payload: Option<&[u8]>) -> Result<BoxMessage, CodecError> {
        let payload = payload.ok_or(CodecError::MissingPayload)?;

        let type_name = self.policy.resolve_static()?;
        trace!(type_name, payload_len = payload.len(), "decoding payload");

        let decoder = self.registry.resolve(type_name)?;
        decoder.decode(payload)
    }

    /// Decode `payload` with the headers delivered alongside it.
    ///
    /// Resolution follows [`crate::resolution`]: with `use_type_info`
    /// enabled, a type-info header entry wins over the configured
    /// default; otherwise (or when the entry is absent) the default
    /// applies.
    pub fn decode_with_headers(
        &self,
        payload: Option<&[u8]>,
        headers: &Headers,
    ) -> Result<BoxMessage, CodecError> {
        let payload = payload.ok_or(CodecError::MissingPayload)?;

        let type_name = self.policy.resolve(headers)?;
        trace!(type_name = %type_name, payload_len = payload.len(), "decoding payload");

        let decoder = self.registry.resolve(&type_name)?;
        decoder.decode(payload)
    }

    /// Release resources.
    ///
    /// The codec holds no external handles; safe to call repeatedly.
    pub fn close(&self) {}
}
