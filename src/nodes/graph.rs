//! Node graph assembly and message routing
//!
//! The graph is the factory surface: it resolves a registered definition,
//! provides the shell, runs the builder, and owns the resulting nodes and
//! connections. It also routes inbound backend messages to the owning
//! node and unregisters that routing when a node is removed, so stale
//! replies never touch a disposed control.

use std::collections::HashMap;
use std::rc::Rc;

use log::debug;
use serde_json::Value;

use super::channel::{BackendSender, NullSender};
use super::error::GraphError;
use super::factory::{BuildContext, NodeRegistry};
use super::node::{Node, NodeId};
use super::types::SocketTypeRegistry;

/// Represents a connection between an output and an input socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub from_node: NodeId,
    pub from_socket: String,
    pub to_node: NodeId,
    pub to_socket: String,
}

impl Connection {
    /// Creates a new connection
    pub fn new(
        from_node: NodeId,
        from_socket: impl Into<String>,
        to_node: NodeId,
        to_socket: impl Into<String>,
    ) -> Self {
        Self {
            from_node,
            from_socket: from_socket.into(),
            to_node,
            to_socket: to_socket.into(),
        }
    }
}

/// A graph containing nodes and their connections.
pub struct NodeGraph {
    types: SocketTypeRegistry,
    registry: NodeRegistry,
    sender: Rc<dyn BackendSender>,
    nodes: HashMap<NodeId, Node>,
    connections: Vec<Connection>,
    next_node_id: NodeId,
}

impl NodeGraph {
    /// Creates a graph over explicit registries and backend sender.
    pub fn new(
        types: SocketTypeRegistry,
        registry: NodeRegistry,
        sender: Rc<dyn BackendSender>,
    ) -> Self {
        Self {
            types,
            registry,
            sender,
            nodes: HashMap::new(),
            connections: Vec::new(),
            next_node_id: 0,
        }
    }

    /// Creates a graph with the built-in socket types and node set.
    pub fn with_defaults(sender: Rc<dyn BackendSender>) -> Self {
        Self::new(
            SocketTypeRegistry::with_defaults(),
            NodeRegistry::default(),
            sender,
        )
    }

    pub fn types(&self) -> &SocketTypeRegistry {
        &self.types
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Creates a node of the given registered type. The builder runs on a
    /// fresh shell; if it fails the node is not added.
    pub fn add_node(&mut self, type_name: &str) -> Result<NodeId, GraphError> {
        self.add_node_with_data(type_name, Value::Null)
    }

    /// Creates a node and seeds its persisted payload, as when reloading
    /// a saved graph. The payload is in place before the builder runs.
    pub fn add_node_with_data(
        &mut self,
        type_name: &str,
        data: Value,
    ) -> Result<NodeId, GraphError> {
        let definition = self
            .registry
            .definition(type_name)
            .map_err(|_| GraphError::UnknownNodeType(type_name.to_string()))?;

        let id = self.next_node_id;
        let mut node = Node::new(id, type_name);
        node.set_data(data);

        let ctx = BuildContext::new(&self.types, Rc::clone(&self.sender));
        definition.build(&mut node, &ctx)?;

        self.next_node_id += 1;
        self.nodes.insert(id, node);
        debug!("created node {id} of type `{type_name}`");
        Ok(id)
    }

    /// Host signal that the node's visual representation now exists.
    pub fn attach_node(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(GraphError::UnknownNode(node_id))?;
        node.attach();
        Ok(())
    }

    /// Removes a node and all its connections, and unregisters its
    /// message routing. Returns the removed instance.
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.connections
            .retain(|conn| conn.from_node != node_id && conn.to_node != node_id);

        let mut node = self.nodes.remove(&node_id)?;
        node.mark_removed();
        debug!("removed node {node_id}");
        Some(node)
    }

    /// Connects an output socket to an input socket. Both ends must
    /// exist and their socket types must be compatible.
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_socket: &str,
        to_node: NodeId,
        to_socket: &str,
    ) -> Result<(), GraphError> {
        if from_node == to_node {
            return Err(GraphError::SelfConnection(from_node));
        }

        let from = self
            .nodes
            .get(&from_node)
            .ok_or(GraphError::UnknownNode(from_node))?;
        let to = self
            .nodes
            .get(&to_node)
            .ok_or(GraphError::UnknownNode(to_node))?;

        let output = from.output(from_socket).ok_or_else(|| {
            if from.input(from_socket).is_some() {
                GraphError::NotAnOutput {
                    node: from_node,
                    socket: from_socket.to_string(),
                }
            } else {
                GraphError::UnknownSocket {
                    node: from_node,
                    socket: from_socket.to_string(),
                }
            }
        })?;
        let input = to.input(to_socket).ok_or_else(|| {
            if to.output(to_socket).is_some() {
                GraphError::NotAnInput {
                    node: to_node,
                    socket: to_socket.to_string(),
                }
            } else {
                GraphError::UnknownSocket {
                    node: to_node,
                    socket: to_socket.to_string(),
                }
            }
        })?;

        if !self.types.compatible(&output.socket_type, &input.socket_type) {
            return Err(GraphError::IncompatibleSocketTypes {
                from: output.socket_type.clone(),
                to: input.socket_type.clone(),
            });
        }

        self.connections
            .push(Connection::new(from_node, from_socket, to_node, to_socket));
        Ok(())
    }

    /// Removes a connection by index
    pub fn remove_connection(&mut self, index: usize) -> Option<Connection> {
        if index < self.connections.len() {
            Some(self.connections.remove(index))
        } else {
            None
        }
    }

    /// Routes an inbound backend message to the addressed node. Messages
    /// for ids no longer present are dropped; this is the normal fate of
    /// replies that cross a node removal, not an error.
    pub fn deliver(&mut self, node_id: NodeId, payload: Value) {
        match self.nodes.get_mut(&node_id) {
            Some(node) => node.deliver(&payload),
            None => debug!("ignoring stale backend message for node {node_id}"),
        }
    }

    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self::with_defaults(Rc::new(NullSender))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::channel::RecordingSender;
    use crate::nodes::control::SelectOption;
    use serde_json::json;

    fn test_graph() -> NodeGraph {
        let _ = env_logger::builder().is_test(true).try_init();
        NodeGraph::default()
    }

    #[test]
    fn test_add_unknown_type_fails() {
        let mut graph = test_graph();
        assert_eq!(
            graph.add_node("NoSuchNode"),
            Err(GraphError::UnknownNodeType("NoSuchNode".to_string()))
        );
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_add_and_remove_node() {
        let mut graph = test_graph();
        let id = graph.add_node("Sentinel").unwrap();
        assert!(graph.node(id).is_some());

        let removed = graph.remove_node(id).unwrap();
        assert_eq!(removed.state(), crate::nodes::NodeState::Removed);
        assert!(graph.node(id).is_none());
    }

    #[test]
    fn test_connect_compatible_sockets() {
        let mut graph = test_graph();
        let source = graph.add_node("WCSSource").unwrap();
        let extract = graph.add_node("Sentinel").unwrap();

        graph
            .connect(source, "coverageOut", extract, "coverageIn")
            .unwrap();
        assert_eq!(graph.connections().len(), 1);
    }

    #[test]
    fn test_connect_rejects_incompatible_types() {
        let mut graph = test_graph();
        let time = graph.add_node("Time").unwrap();
        let extract = graph.add_node("Sentinel").unwrap();

        let result = graph.connect(time, "timeOut", extract, "coverageIn");
        assert_eq!(
            result,
            Err(GraphError::IncompatibleSocketTypes {
                from: "WCSTime".to_string(),
                to: "Coverage".to_string(),
            })
        );
        assert!(graph.connections().is_empty());
    }

    #[test]
    fn test_connect_validates_endpoints() {
        let mut graph = test_graph();
        let source = graph.add_node("WCSSource").unwrap();
        let extract = graph.add_node("Sentinel").unwrap();

        assert_eq!(
            graph.connect(source, "coverageOut", source, "coverageOut"),
            Err(GraphError::SelfConnection(source))
        );
        assert_eq!(
            graph.connect(source, "coverageOut", 99, "coverageIn"),
            Err(GraphError::UnknownNode(99))
        );
        assert_eq!(
            graph.connect(source, "nope", extract, "coverageIn"),
            Err(GraphError::UnknownSocket {
                node: source,
                socket: "nope".to_string()
            })
        );
        let other = graph.add_node("Sentinel").unwrap();
        assert_eq!(
            graph.connect(extract, "coverageIn", other, "boundsIn"),
            Err(GraphError::NotAnOutput {
                node: extract,
                socket: "coverageIn".to_string()
            })
        );
        assert_eq!(
            graph.connect(source, "coverageOut", other, "imageOut"),
            Err(GraphError::NotAnInput {
                node: other,
                socket: "imageOut".to_string()
            })
        );
    }

    #[test]
    fn test_remove_node_drops_connections() {
        let mut graph = test_graph();
        let source = graph.add_node("WCSSource").unwrap();
        let extract = graph.add_node("Sentinel").unwrap();
        graph
            .connect(source, "coverageOut", extract, "coverageIn")
            .unwrap();

        graph.remove_node(source);
        assert!(graph.connections().is_empty());
    }

    #[test]
    fn test_deliver_after_removal_is_noop() {
        let mut graph = test_graph();
        let id = graph.add_node("Sentinel").unwrap();
        graph.attach_node(id).unwrap();
        graph.remove_node(id);

        // Must neither panic nor mutate anything
        graph.deliver(id, json!(["Mean", "Max", "Min"]));
        assert!(graph.node(id).is_none());
    }

    #[test]
    fn test_deliveries_apply_in_order() {
        let mut graph = test_graph();
        let id = graph.add_node("Sentinel").unwrap();
        graph.attach_node(id).unwrap();

        graph.deliver(id, json!(["Mean", "Max", "Min"]));
        graph.deliver(id, json!(["Mean"]));

        let control = graph.node(id).unwrap().controls().get("operation").unwrap();
        assert_eq!(control.options(), &[SelectOption::new(0, "Mean")]);
    }

    #[test]
    fn test_selection_reaches_backend_sender() {
        let sender = Rc::new(RecordingSender::new());
        let mut graph = NodeGraph::with_defaults(sender.clone());
        let id = graph.add_node("Sentinel").unwrap();

        let control = graph
            .node_mut(id)
            .unwrap()
            .controls_mut()
            .get_mut("operation")
            .unwrap();
        control.select(0);

        assert_eq!(sender.messages(), vec![(id, json!(0))]);
    }
}
