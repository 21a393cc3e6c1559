//! Socket type descriptors and the process-wide type registry
//!
//! The registry is populated once, before any node is built, and is
//! read-only afterwards. Builders resolve types synchronously through
//! [`SocketTypeRegistry::lookup`]; a missing type is a programming error,
//! not a recoverable runtime condition.

use std::collections::BTreeMap;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::error::RegistryError;

/// Descriptor for a socket type, identified by its unique name.
///
/// Two sockets may be connected only if their types are identical or one
/// side explicitly lists the other as compatible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocketType {
    name: String,
    compatible: Vec<String>,
}

impl SocketType {
    /// Create a descriptor that only connects to itself.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            compatible: Vec::new(),
        }
    }

    /// Declare an additional type name this type may connect to.
    pub fn with_compatible(mut self, other: impl Into<String>) -> Self {
        self.compatible.push(other.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check whether this type accepts a connection to `other`.
    pub fn accepts(&self, other: &str) -> bool {
        self.name == other || self.compatible.iter().any(|c| c == other)
    }
}

// Socket vocabulary of the coverage pipeline. `Real` accepts `Int` so a
// plain integer source can feed real-valued inputs.
static BUILTIN_TYPES: Lazy<Vec<SocketType>> = Lazy::new(|| {
    vec![
        SocketType::new("Coverage"),
        SocketType::new("Image2D"),
        SocketType::new("Volume3D"),
        SocketType::new("LUT"),
        SocketType::new("Int"),
        SocketType::new("Real").with_compatible("Int"),
        SocketType::new("RVec2"),
        SocketType::new("RVec4"),
        SocketType::new("WCSTime"),
        SocketType::new("Bounds").with_compatible("RVec4"),
    ]
});

/// Process-wide mapping from a type name to its descriptor.
#[derive(Debug, Clone, Default)]
pub struct SocketTypeRegistry {
    types: BTreeMap<String, SocketType>,
}

impl SocketTypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Create a registry pre-populated with the built-in pipeline types.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for ty in BUILTIN_TYPES.iter() {
            registry.types.insert(ty.name().to_string(), ty.clone());
        }
        registry
    }

    /// Register a socket type. Fails if the name is already taken; the
    /// existing registration is left untouched.
    pub fn register(&mut self, ty: SocketType) -> Result<(), RegistryError> {
        if self.types.contains_key(ty.name()) {
            return Err(RegistryError::DuplicateType(ty.name().to_string()));
        }
        debug!("registered socket type `{}`", ty.name());
        self.types.insert(ty.name().to_string(), ty);
        Ok(())
    }

    /// Look up a socket type by name.
    pub fn lookup(&self, name: &str) -> Result<&SocketType, RegistryError> {
        self.types
            .get(name)
            .ok_or_else(|| RegistryError::UnknownType(name.to_string()))
    }

    /// Check whether an output of type `output` may feed an input of type
    /// `input`. Unknown names are never compatible.
    pub fn compatible(&self, output: &str, input: &str) -> bool {
        match (self.types.get(output), self.types.get(input)) {
            (Some(out), Some(inp)) => out.accepts(input) || inp.accepts(output),
            _ => false,
        }
    }

    /// Get all registered type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        self.types.keys().map(|s| s.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
