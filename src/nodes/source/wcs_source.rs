//! WCS coverage source node
//!
//! Entry point of a pipeline: picks one coverage offered by a web
//! coverage service. Which coverages exist is only known to the backend,
//! which queries the service off the UI thread and pushes the resulting
//! list into the drop-down whenever it changes.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::nodes::control::{ControlSet, DropDownControl, SelectOption};
use crate::nodes::error::BuildError;
use crate::nodes::factory::{BuildContext, NodeDefinition};
use crate::nodes::node::Node;
use crate::nodes::socket::Socket;

/// Persisted state of a WCSSource node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WCSSourceData {
    pub coverages: Vec<String>,
    pub selected_coverage: Option<i64>,
}

/// WCS source node definition.
pub struct WCSSourceNode;

impl WCSSourceNode {
    pub const CONTROL_COVERAGE: &'static str = "coverage";
}

impl NodeDefinition for WCSSourceNode {
    fn name(&self) -> &str {
        "WCSSource"
    }

    fn category(&self) -> &str {
        "Data Sources"
    }

    fn build(&self, node: &mut Node, ctx: &BuildContext) -> Result<(), BuildError> {
        node.add_output(Socket::output(
            "coverageOut",
            "Coverage",
            ctx.socket_type("Coverage")?,
        ));

        let sender = ctx.sender();
        let id = node.id();
        node.controls_mut().add(
            DropDownControl::new(
                Self::CONTROL_COVERAGE,
                "Coverage",
                vec![SelectOption::new(0, "None")],
            )
            .with_callback(move |selection| sender.send(id, Value::from(selection))),
        );

        node.on_backend_message(apply_coverage_list);

        node.on_attach(|controls, data| {
            let restored: WCSSourceData = if data.is_null() {
                WCSSourceData::default()
            } else {
                match serde_json::from_value(data.clone()) {
                    Ok(restored) => restored,
                    Err(err) => {
                        debug!("ignoring malformed persisted state: {err}");
                        WCSSourceData::default()
                    }
                }
            };
            if let Some(control) = controls.get_mut(WCSSourceNode::CONTROL_COVERAGE) {
                let options = (!restored.coverages.is_empty()).then(|| {
                    restored
                        .coverages
                        .iter()
                        .enumerate()
                        .map(|(index, name)| SelectOption::new(index as i64, name))
                        .collect()
                });
                control.restore(options, restored.selected_coverage);
            }
        });

        Ok(())
    }
}

fn apply_coverage_list(controls: &mut ControlSet, message: &Value) {
    let Some(names) = message.as_array() else {
        debug!("ignoring malformed coverage list: {message}");
        return;
    };
    let options = names
        .iter()
        .filter_map(|name| name.as_str())
        .enumerate()
        .map(|(index, name)| SelectOption::new(index as i64, name))
        .collect();
    if let Some(control) = controls.get_mut(WCSSourceNode::CONTROL_COVERAGE) {
        control.set_options(options);
    }
}
