//! Per-call resolution of the effective type name.
//!
//! Resolution order for one decode call:
//! 1. header resolution disabled → the role's configured default;
//! 2. header resolution enabled → the first header entry under the
//!    role's type-info key wins outright (the default is ignored, not
//!    merged); no entry → the configured default;
//! 3. no default either → no decoder available, which is fatal for the
//!    call, never a silent pass-through of raw bytes.

use std::borrow::Cow;

use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::headers::Headers;

/// Decides which type name a decode call should use.
///
/// Holds the configuration snapshot taken at configure time; each call
/// is a pure function of that snapshot and the headers (if any).
#[derive(Debug, Clone)]
pub struct ResolutionPolicy {
    config: CodecConfig,
}

impl ResolutionPolicy {
    /// Policy over a configuration snapshot.
    pub fn new(config: CodecConfig) -> Self {
        ResolutionPolicy { config }
    }

    /// The snapshot this policy was built from.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Effective type name for a metadata-less decode call.
    ///
    /// Headers are never consulted here, regardless of the
    /// `use_type_info` flag.
    pub fn resolve_static(&self) -> Result<&str, CodecError> {
        self.config
            .default_type_name
            .as_deref()
            .ok_or(CodecError::NoDecoderAvailable)
    }

    /// Effective type name given the headers delivered with the payload.
    ///
    /// Header values are decoded as strings lossily; invalid UTF-8 is
    /// replaced, not rejected.
    pub fn resolve<'a>(&'a self, headers: &'a Headers) -> Result<Cow<'a, str>, CodecError> {
        if !self.config.use_type_info {
            return self.resolve_static().map(Cow::Borrowed);
        }

        let header_key = self.config.role.type_info_header_key();
        match headers.get(header_key) {
            Some(value) => Ok(String::from_utf8_lossy(value)),
            None => self.resolve_static().map(Cow::Borrowed),
        }
    }
}
