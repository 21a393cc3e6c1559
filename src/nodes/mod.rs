//! Node system - core data structures and the built-in node set

// Core node system modules
pub mod channel;
pub mod control;
pub mod error;
pub mod factory;
pub mod graph;
pub mod node;
pub mod socket;
pub mod types;

// Built-in node implementations
pub mod constant;
pub mod extract;
pub mod operation;
pub mod source;

// Re-export core types
pub use channel::{BackendSender, NullSender, RecordingSender};
pub use control::{ControlSet, DropDownControl, SelectOption};
pub use error::{BuildError, GraphError, RegistryError};
pub use factory::{BuildContext, NodeDefinition, NodeRegistry};
pub use graph::{Connection, NodeGraph};
pub use node::{Node, NodeId, NodeState};
pub use socket::{Socket, SocketDirection};
pub use types::{SocketType, SocketTypeRegistry};
