//! Node instance structure and lifecycle
//!
//! A `Node` is the runtime object a builder populates: typed sockets,
//! controls, an opaque persisted payload, and the two lifecycle hooks
//! through which the host and the backend reach the node after
//! construction.

use std::fmt;

use log::debug;
use serde_json::Value;

use super::control::ControlSet;
use super::socket::Socket;

/// Unique identifier for a node, assigned by the graph at creation.
pub type NodeId = usize;

/// Control-population lifecycle of a node instance.
///
/// `Constructed` → `Attached` happens exactly once; `Attached` → `Synced`
/// re-enters on every applied backend reply; messages addressed to a
/// `Removed` node are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Constructed,
    Attached,
    Synced,
    Removed,
}

/// Hook invoked whenever the backend sends a reply addressed to this
/// node. Must be idempotent and safe to run zero or many times, in any
/// order relative to the attach hook.
pub type MessageHook = Box<dyn FnMut(&mut ControlSet, &Value)>;

/// Hook invoked once, when the node's visual representation is attached
/// to the display surface. Receives the persisted data payload so
/// deferred UI state can be materialized.
pub type AttachHook = Box<dyn FnMut(&mut ControlSet, &Value)>;

/// A concrete node instance owned by the graph.
pub struct Node {
    id: NodeId,
    type_name: String,
    inputs: Vec<Socket>,
    outputs: Vec<Socket>,
    controls: ControlSet,
    data: Value,
    state: NodeState,
    message_hook: Option<MessageHook>,
    attach_hook: Option<AttachHook>,
}

impl Node {
    /// Creates an empty shell; the definition's builder fills it in.
    pub fn new(id: NodeId, type_name: impl Into<String>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            controls: ControlSet::new(),
            data: Value::Null,
            state: NodeState::Constructed,
            message_hook: None,
            attach_hook: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The definition name; also the identifier the execution backend
    /// uses to map this node to an executable operation.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Adds an input socket. Declaration order is preserved; it affects
    /// only default visual ordering.
    pub fn add_input(&mut self, socket: Socket) -> &mut Self {
        self.inputs.push(socket);
        self
    }

    /// Adds an output socket.
    pub fn add_output(&mut self, socket: Socket) -> &mut Self {
        self.outputs.push(socket);
        self
    }

    pub fn inputs(&self) -> &[Socket] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Socket] {
        &self.outputs
    }

    /// Finds an input socket by key.
    pub fn input(&self, key: &str) -> Option<&Socket> {
        self.inputs.iter().find(|s| s.key == key)
    }

    /// Finds an output socket by key.
    pub fn output(&self, key: &str) -> Option<&Socket> {
        self.outputs.iter().find(|s| s.key == key)
    }

    pub fn controls(&self) -> &ControlSet {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ControlSet {
        &mut self.controls
    }

    /// The persisted payload round-tripped by the host (`Null` when the
    /// node was never saved).
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Replace the persisted payload; the host calls this on reload,
    /// before attaching the node.
    pub fn set_data(&mut self, data: Value) {
        self.data = data;
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Install the backend reply hook.
    pub fn on_backend_message<F>(&mut self, hook: F)
    where
        F: FnMut(&mut ControlSet, &Value) + 'static,
    {
        self.message_hook = Some(Box::new(hook));
    }

    /// Install the attach hook.
    pub fn on_attach<F>(&mut self, hook: F)
    where
        F: FnMut(&mut ControlSet, &Value) + 'static,
    {
        self.attach_hook = Some(Box::new(hook));
    }

    /// Signal that the visual representation now exists. Runs the attach
    /// hook with the persisted payload. Happens once; repeats are no-ops.
    pub fn attach(&mut self) {
        if self.state != NodeState::Constructed {
            debug!("node {}: attach ignored in state {:?}", self.id, self.state);
            return;
        }
        if let Some(hook) = self.attach_hook.as_mut() {
            hook(&mut self.controls, &self.data);
        }
        self.state = NodeState::Attached;
    }

    /// Apply a backend reply addressed to this node. Replies reaching a
    /// removed node are dropped; replies arriving before attach run the
    /// hook but do not skip the pending attach.
    pub fn deliver(&mut self, payload: &Value) {
        if self.state == NodeState::Removed {
            debug!("node {}: dropping backend message after removal", self.id);
            return;
        }
        if let Some(hook) = self.message_hook.as_mut() {
            hook(&mut self.controls, payload);
        } else {
            debug!("node {}: no backend message hook, payload ignored", self.id);
        }
        if matches!(self.state, NodeState::Attached | NodeState::Synced) {
            self.state = NodeState::Synced;
        }
    }

    pub(crate) fn mark_removed(&mut self) {
        self.state = NodeState::Removed;
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("type_name", &self.type_name)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("controls", &self.controls)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
