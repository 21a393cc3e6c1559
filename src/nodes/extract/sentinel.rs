//! Sentinel data-extraction node
//!
//! Reduces a coverage to a 2D image with one of the extraction
//! operations the backend offers for the connected source. The operation
//! list is not known at construction time: the node starts with a
//! placeholder drop-down and the backend pushes the real candidates once
//! it has inspected the coverage.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::nodes::control::{ControlSet, DropDownControl, SelectOption};
use crate::nodes::error::BuildError;
use crate::nodes::factory::{BuildContext, NodeDefinition};
use crate::nodes::node::Node;
use crate::nodes::socket::Socket;

/// Persisted state of a Sentinel node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SentinelData {
    pub operations: Vec<String>,
    pub selected_operation: Option<i64>,
}

/// Sentinel extraction node definition.
pub struct SentinelNode;

impl SentinelNode {
    pub const CONTROL_OPERATION: &'static str = "operation";
}

impl NodeDefinition for SentinelNode {
    // This name must match the identifier the backend registered for the
    // Sentinel extraction operation.
    fn name(&self) -> &str {
        "Sentinel"
    }

    fn category(&self) -> &str {
        "Data Extraction"
    }

    fn build(&self, node: &mut Node, ctx: &BuildContext) -> Result<(), BuildError> {
        node.add_input(Socket::input(
            "coverageIn",
            "Coverage",
            ctx.socket_type("Coverage")?,
        ));
        node.add_input(Socket::input(
            "boundsIn",
            "Long/Lat Bounds",
            ctx.socket_type("RVec4")?,
        ));
        node.add_input(Socket::input("wcsTimeIn", "Time", ctx.socket_type("WCSTime")?));
        node.add_input(Socket::input(
            "resolutionIn",
            "Maximum Resolution",
            ctx.socket_type("Int")?,
        ));
        node.add_output(Socket::output(
            "imageOut",
            "Image 2D",
            ctx.socket_type("Image2D")?,
        ));

        // Forward every user selection to the backend, fire-and-forget
        let sender = ctx.sender();
        let id = node.id();
        node.controls_mut().add(
            DropDownControl::new(
                Self::CONTROL_OPERATION,
                "Operation",
                vec![SelectOption::new(0, "None")],
            )
            .with_callback(move |selection| sender.send(id, Value::from(selection))),
        );

        node.on_backend_message(apply_operation_list);

        node.on_attach(|controls, data| {
            let restored: SentinelData = if data.is_null() {
                SentinelData::default()
            } else {
                match serde_json::from_value(data.clone()) {
                    Ok(restored) => restored,
                    Err(err) => {
                        debug!("ignoring malformed persisted state: {err}");
                        SentinelData::default()
                    }
                }
            };
            if let Some(control) = controls.get_mut(SentinelNode::CONTROL_OPERATION) {
                let options = (!restored.operations.is_empty()).then(|| {
                    restored
                        .operations
                        .iter()
                        .enumerate()
                        .map(|(index, name)| SelectOption::new(index as i64, name))
                        .collect()
                });
                control.restore(options, restored.selected_operation);
            }
        });

        Ok(())
    }
}

// The backend replies with a bare list of operation names; map it to
// value/text pairs and replace whatever the drop-down held before.
fn apply_operation_list(controls: &mut ControlSet, message: &Value) {
    let Some(names) = message.as_array() else {
        debug!("ignoring malformed operation list: {message}");
        return;
    };
    let options = names
        .iter()
        .filter_map(|name| name.as_str())
        .enumerate()
        .map(|(index, name)| SelectOption::new(index as i64, name))
        .collect();
    if let Some(control) = controls.get_mut(SentinelNode::CONTROL_OPERATION) {
        control.set_options(options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::channel::RecordingSender;
    use crate::nodes::graph::NodeGraph;
    use serde_json::json;
    use std::rc::Rc;

    #[test]
    fn test_declares_expected_sockets() {
        let mut graph = NodeGraph::default();
        let id = graph.add_node("Sentinel").unwrap();
        let node = graph.node(id).unwrap();

        let inputs: Vec<(&str, &str)> = node
            .inputs()
            .iter()
            .map(|s| (s.key.as_str(), s.socket_type.as_str()))
            .collect();
        assert_eq!(
            inputs,
            vec![
                ("coverageIn", "Coverage"),
                ("boundsIn", "RVec4"),
                ("wcsTimeIn", "WCSTime"),
                ("resolutionIn", "Int"),
            ]
        );

        let outputs: Vec<(&str, &str)> = node
            .outputs()
            .iter()
            .map(|s| (s.key.as_str(), s.socket_type.as_str()))
            .collect();
        assert_eq!(outputs, vec![("imageOut", "Image2D")]);
    }

    #[test]
    fn test_backend_reply_replaces_options() {
        let mut graph = NodeGraph::default();
        let id = graph.add_node("Sentinel").unwrap();
        graph.attach_node(id).unwrap();

        graph.deliver(id, json!(["Mean", "Max", "Min"]));

        let control = graph.node(id).unwrap().controls().get("operation").unwrap();
        assert_eq!(
            control.options(),
            &[
                SelectOption::new(0, "Mean"),
                SelectOption::new(1, "Max"),
                SelectOption::new(2, "Min"),
            ]
        );
    }

    #[test]
    fn test_malformed_reply_ignored() {
        let mut graph = NodeGraph::default();
        let id = graph.add_node("Sentinel").unwrap();
        graph.attach_node(id).unwrap();

        graph.deliver(id, json!({"unexpected": true}));

        let control = graph.node(id).unwrap().controls().get("operation").unwrap();
        assert_eq!(control.options(), &[SelectOption::new(0, "None")]);
    }

    #[test]
    fn test_attach_restores_persisted_state() {
        let mut graph = NodeGraph::default();
        let id = graph
            .add_node_with_data(
                "Sentinel",
                json!({"operations": ["A", "B"], "selectedOperation": 1}),
            )
            .unwrap();
        graph.attach_node(id).unwrap();

        let control = graph.node(id).unwrap().controls().get("operation").unwrap();
        assert_eq!(
            control.options(),
            &[SelectOption::new(0, "A"), SelectOption::new(1, "B")]
        );
        assert_eq!(control.selected(), Some(1));
    }

    #[test]
    fn test_selection_sends_one_message() {
        let sender = Rc::new(RecordingSender::new());
        let mut graph = NodeGraph::with_defaults(sender.clone());
        let id = graph.add_node("Sentinel").unwrap();

        // No backend reply has arrived yet; the send happens regardless
        graph
            .node_mut(id)
            .unwrap()
            .controls_mut()
            .get_mut("operation")
            .unwrap()
            .select(2);

        assert_eq!(sender.messages(), vec![(id, json!(2))]);
    }

    #[test]
    fn test_persisted_data_round_trip() {
        let data = SentinelData {
            operations: vec!["Mean".to_string(), "Max".to_string()],
            selected_operation: Some(0),
        };
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["selectedOperation"], json!(0));
        let back: SentinelData = serde_json::from_value(value).unwrap();
        assert_eq!(back, data);
    }
}
