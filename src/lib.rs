//! visq - typed node graph core for visual coverage-query pipelines
//!
//! This library provides the composition layer of a visual node editor:
//! a socket type registry, node definitions with builder procedures, node
//! instances carrying typed sockets and drop-down controls, and the
//! fire-and-forget message channel that lets the execution backend push
//! dynamic state back into a node's controls after construction.
//!
//! Rendering, canvas interaction and graph execution live in the host
//! application; this crate only defines the contract a node must satisfy
//! to be wired and executed.

pub mod nodes;

// Re-export the types most hosts need
pub use nodes::{
    BackendSender, BuildContext, BuildError, Connection, ControlSet, DropDownControl, GraphError,
    Node, NodeDefinition, NodeGraph, NodeId, NodeRegistry, NodeState, RegistryError, SelectOption,
    Socket, SocketDirection, SocketType, SocketTypeRegistry,
};
