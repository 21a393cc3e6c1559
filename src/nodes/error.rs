//! Error types of the composition core
//!
//! Registry and builder errors are programming errors: they abort the
//! operation and surface to the host so it can refuse the node. Message
//! channel problems are never represented here; a stale or malformed
//! reply is logged and dropped without failing anything.

use thiserror::Error;

use super::node::NodeId;

/// Misuse of the socket type or node definition registries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("socket type `{0}` is already registered")]
    DuplicateType(String),

    #[error("socket type `{0}` is not registered")]
    UnknownType(String),

    #[error("node definition `{0}` is already registered")]
    DuplicateDefinition(String),

    #[error("node definition `{0}` is not registered")]
    UnknownDefinition(String),
}

/// Failure while a builder populates a node shell. Construction aborts
/// and the graph refuses to add the node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("builder referenced unregistered socket type `{0}`")]
    UnregisteredSocketType(String),
}

/// Failure while assembling the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unknown node type `{0}`")]
    UnknownNodeType(String),

    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("node {node} has no socket `{socket}`")]
    UnknownSocket { node: NodeId, socket: String },

    #[error("socket `{socket}` on node {node} is not an output")]
    NotAnOutput { node: NodeId, socket: String },

    #[error("socket `{socket}` on node {node} is not an input")]
    NotAnInput { node: NodeId, socket: String },

    #[error("cannot connect `{from}` to `{to}`: incompatible socket types")]
    IncompatibleSocketTypes { from: String, to: String },

    #[error("cannot connect node {0} to itself")]
    SelfConnection(NodeId),

    #[error(transparent)]
    Build(#[from] BuildError),
}
