//! Fire-and-forget messaging bridge to the execution backend
//!
//! The outbound half is an injected trait object: node builders receive a
//! sender through the build context and never reach into global scope.
//! The inbound half is [`crate::nodes::NodeGraph::deliver`], which the
//! host calls in backend send order. No acknowledgment, no retries, no
//! timeouts; a reply that never arrives simply leaves a control's
//! last-known option set in place.

use std::cell::RefCell;

use log::debug;
use serde_json::Value;

use super::node::NodeId;

/// Outbound message primitive provided by the host environment.
///
/// `send` must not block: the UI thread hands the payload off and
/// continues. Whatever the backend eventually does arrives later through
/// the graph's inbound routing, independently scheduled.
pub trait BackendSender {
    fn send(&self, node: NodeId, payload: Value);
}

/// Sender that discards every message; for graphs without a live backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSender;

impl BackendSender for NullSender {
    fn send(&self, node: NodeId, _payload: Value) {
        debug!("no backend connected, discarding message from node {node}");
    }
}

/// Sender that records every message in order; stands in for the host
/// primitive in tests.
#[derive(Debug, Default)]
pub struct RecordingSender {
    messages: RefCell<Vec<(NodeId, Value)>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages sent so far, in send order.
    pub fn messages(&self) -> Vec<(NodeId, Value)> {
        self.messages.borrow().clone()
    }
}

impl BackendSender for RecordingSender {
    fn send(&self, node: NodeId, payload: Value) {
        self.messages.borrow_mut().push((node, payload));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recording_sender_keeps_order() {
        let sender = RecordingSender::new();
        sender.send(3, json!(0));
        sender.send(3, json!(2));
        sender.send(5, json!({"lut": []}));
        assert_eq!(
            sender.messages(),
            vec![(3, json!(0)), (3, json!(2)), (5, json!({"lut": []}))]
        );
    }
}
