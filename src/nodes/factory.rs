//! Node definition registry and builder context
//!
//! A node kind is a registered [`NodeDefinition`]: a backend-facing name,
//! a menu category, and a builder procedure that populates a shell the
//! graph provides. Definitions are registered explicitly; the registry
//! indexes them by name and by category for node-creation menus.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use log::{debug, warn};

use super::channel::BackendSender;
use super::error::{BuildError, RegistryError};
use super::node::Node;
use super::types::{SocketType, SocketTypeRegistry};

/// What a builder may touch while populating a node shell: socket type
/// lookups and the outbound half of the control channel. Builders must
/// not retain mutable registry state beyond these.
pub struct BuildContext<'a> {
    types: &'a SocketTypeRegistry,
    sender: Rc<dyn BackendSender>,
}

impl<'a> BuildContext<'a> {
    pub fn new(types: &'a SocketTypeRegistry, sender: Rc<dyn BackendSender>) -> Self {
        Self { types, sender }
    }

    /// Resolve a socket type. Failure aborts construction; the graph
    /// must then refuse to add the node.
    pub fn socket_type(&self, name: &str) -> Result<&'a SocketType, BuildError> {
        self.types
            .lookup(name)
            .map_err(|_| BuildError::UnregisteredSocketType(name.to_string()))
    }

    /// A cloneable handle to the backend sender, for control callbacks.
    pub fn sender(&self) -> Rc<dyn BackendSender> {
        Rc::clone(&self.sender)
    }
}

/// A registered node kind.
pub trait NodeDefinition {
    /// Identifier shared with the execution backend. It must match the
    /// name the backend registered for this operation, exactly; it is
    /// the join key that maps a visual node to executable code.
    fn name(&self) -> &str;

    /// The submenu from which this node can be created in the editor.
    fn category(&self) -> &str;

    /// Populate a graph-provided shell: declare sockets via the context's
    /// type lookups, attach controls, install lifecycle hooks.
    fn build(&self, node: &mut Node, ctx: &BuildContext) -> Result<(), BuildError>;
}

/// Registry for managing node definitions.
pub struct NodeRegistry {
    definitions: BTreeMap<String, Box<dyn NodeDefinition>>,
    categories: HashMap<String, Vec<String>>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            definitions: BTreeMap::new(),
            categories: HashMap::new(),
        }
    }

    /// Register a node definition. The name must be globally unique; on a
    /// duplicate the existing registration is kept and an error returned.
    pub fn register(&mut self, definition: Box<dyn NodeDefinition>) -> Result<(), RegistryError> {
        let name = definition.name().to_string();
        if self.definitions.contains_key(&name) {
            return Err(RegistryError::DuplicateDefinition(name));
        }
        debug!(
            "registered node definition `{}` in category `{}`",
            name,
            definition.category()
        );
        self.categories
            .entry(definition.category().to_string())
            .or_default()
            .push(name.clone());
        self.definitions.insert(name, definition);
        Ok(())
    }

    /// Look up a definition by node type name.
    pub fn definition(&self, name: &str) -> Result<&dyn NodeDefinition, RegistryError> {
        self.definitions
            .get(name)
            .map(|d| d.as_ref())
            .ok_or_else(|| RegistryError::UnknownDefinition(name.to_string()))
    }

    /// Check if a node type is registered
    pub fn has_node_type(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Get all available node type names, sorted.
    pub fn node_types(&self) -> Vec<&str> {
        self.definitions.keys().map(|s| s.as_str()).collect()
    }

    /// Get all categories with at least one node.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.categories.keys().map(|s| s.as_str()).collect();
        categories.sort_unstable();
        categories
    }

    /// Get the node type names in a category.
    pub fn nodes_in_category(&self, category: &str) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|names| names.iter().map(|s| s.as_str()).collect())
            .unwrap_or_default()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        let mut registry = Self::new();

        let builtins: Vec<Box<dyn NodeDefinition>> = vec![
            Box::new(crate::nodes::source::WCSSourceNode),
            Box::new(crate::nodes::source::WCSCoverageNode),
            Box::new(crate::nodes::source::TimeNode),
            Box::new(crate::nodes::extract::SentinelNode),
            Box::new(crate::nodes::operation::TransferFunctionNode),
            Box::new(crate::nodes::constant::IntNode),
            Box::new(crate::nodes::constant::BoundsNode),
        ];

        for definition in builtins {
            if let Err(err) = registry.register(definition) {
                // Built-in names are unique; reaching this is a bug
                warn!("skipping built-in node definition: {err}");
            }
        }

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::channel::NullSender;
    use crate::nodes::socket::Socket;

    struct ProbeNode;

    impl NodeDefinition for ProbeNode {
        fn name(&self) -> &str {
            "Probe"
        }

        fn category(&self) -> &str {
            "Diagnostics"
        }

        fn build(&self, node: &mut Node, ctx: &BuildContext) -> Result<(), BuildError> {
            node.add_input(Socket::input("valueIn", "Value", ctx.socket_type("Real")?));
            Ok(())
        }
    }

    struct BadTypeNode;

    impl NodeDefinition for BadTypeNode {
        fn name(&self) -> &str {
            "BadType"
        }

        fn category(&self) -> &str {
            "Diagnostics"
        }

        fn build(&self, node: &mut Node, ctx: &BuildContext) -> Result<(), BuildError> {
            node.add_input(Socket::input("in", "In", ctx.socket_type("NoSuchType")?));
            Ok(())
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = NodeRegistry::new();
        registry.register(Box::new(ProbeNode)).unwrap();
        assert!(registry.has_node_type("Probe"));
        assert_eq!(registry.definition("Probe").unwrap().category(), "Diagnostics");
        assert_eq!(
            registry.definition("Missing").err(),
            Some(RegistryError::UnknownDefinition("Missing".to_string()))
        );
    }

    #[test]
    fn test_duplicate_definition_rejected() {
        let mut registry = NodeRegistry::new();
        registry.register(Box::new(ProbeNode)).unwrap();
        assert_eq!(
            registry.register(Box::new(ProbeNode)),
            Err(RegistryError::DuplicateDefinition("Probe".to_string()))
        );
        assert_eq!(registry.node_types(), vec!["Probe"]);
    }

    #[test]
    fn test_build_with_unregistered_socket_type_aborts() {
        let types = SocketTypeRegistry::with_defaults();
        let ctx = BuildContext::new(&types, Rc::new(NullSender));
        let mut node = Node::new(0, "BadType");
        assert_eq!(
            BadTypeNode.build(&mut node, &ctx),
            Err(BuildError::UnregisteredSocketType("NoSuchType".to_string()))
        );
    }

    #[test]
    fn test_default_registry_covers_builtin_set() {
        let registry = NodeRegistry::default();
        for name in [
            "WCSSource",
            "WCSCoverageImage",
            "Time",
            "Sentinel",
            "TransferFunction",
            "Int",
            "Bounds",
        ] {
            assert!(registry.has_node_type(name), "missing builtin `{name}`");
        }
        assert_eq!(
            registry.nodes_in_category("Data Extraction"),
            vec!["Sentinel"]
        );
    }
}
