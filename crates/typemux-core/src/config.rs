//! Configuration keys and the per-role configuration snapshot.
//!
//! One codec instance serves one position of a transport's payload
//! pair: the key or the value. Each position has its own trio of
//! configuration keys under the `typemux.serde.` namespace; `configure`
//! reads only the trio for the instance's role.

use std::collections::HashMap;

/// Static default type name for the key position.
pub const KEY_DEFAULT_TYPE: &str = "typemux.serde.key.default.type";

/// Static default type name for the value position.
pub const VALUE_DEFAULT_TYPE: &str = "typemux.serde.value.default.type";

/// Boolean flag enabling header-based resolution for the key position.
pub const KEY_USE_TYPE_INFO: &str = "typemux.serde.key.use_type_info";

/// Boolean flag enabling header-based resolution for the value position.
pub const VALUE_USE_TYPE_INFO: &str = "typemux.serde.value.use_type_info";

/// Header key under which a key-position payload's type name travels.
pub const KEY_TYPE: &str = "typemux.serde.key.type";

/// Header key under which a value-position payload's type name travels.
pub const VALUE_TYPE: &str = "typemux.serde.value.type";

/// Position a codec instance serves: key or value.
///
/// The role selects which configuration keys and which type-info header
/// key apply; it changes nothing else about codec behavior.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Role {
    Key,
    Value,
}

impl Role {
    /// Configuration key holding this role's static default type name.
    pub fn default_type_key(self) -> &'static str {
        match self {
            Role::Key => KEY_DEFAULT_TYPE,
            Role::Value => VALUE_DEFAULT_TYPE,
        }
    }

    /// Configuration key holding this role's `use_type_info` flag.
    pub fn use_type_info_key(self) -> &'static str {
        match self {
            Role::Key => KEY_USE_TYPE_INFO,
            Role::Value => VALUE_USE_TYPE_INFO,
        }
    }

    /// Header key carrying the per-message type name for this role.
    pub fn type_info_header_key(self) -> &'static str {
        match self {
            Role::Key => KEY_TYPE,
            Role::Value => VALUE_TYPE,
        }
    }
}

/// Immutable snapshot of the options a decode call consults.
///
/// Built by [`apply`](CodecConfig::apply) at configure time and treated
/// as read-only afterwards. The default type name is stored verbatim;
/// it is validated lazily, the first time a decode call needs it.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Position this codec serves.
    pub role: Role,

    /// Static fallback type name, if one was configured.
    pub default_type_name: Option<String>,

    /// Whether header-based resolution is enabled. Defaults to false.
    pub use_type_info: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            role: Role::Value,
            default_type_name: None,
            use_type_info: false,
        }
    }
}

impl CodecConfig {
    /// Fold a configuration map into this snapshot for `role`.
    ///
    /// Only the role's own keys are read. A key that is present
    /// overwrites the field; a key that is absent keeps the previous
    /// value. No validation happens here beyond boolean coercion.
    pub fn apply(&mut self, config: &HashMap<String, String>, role: Role) {
        self.role = role;

        if let Some(name) = config.get(role.default_type_key()) {
            self.default_type_name = Some(name.clone());
        }
        if let Some(flag) = config.get(role.use_type_info_key()) {
            self.use_type_info = parse_bool(flag);
        }
    }
}

/// Boolean coercion: case-insensitive `"true"`; anything else is false.
fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}
