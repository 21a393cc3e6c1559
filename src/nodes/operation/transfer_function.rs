//! Transfer function node
//!
//! Produces a color lookup table for mapping scalar values. The editing
//! widget lives in the host UI; whenever the user changes the function,
//! the host pushes the serialized LUT to the backend through this node's
//! channel, and the whole LUT json is persisted as the node's data.

use serde_json::{json, Value};

use crate::nodes::error::BuildError;
use crate::nodes::factory::{BuildContext, NodeDefinition};
use crate::nodes::node::Node;
use crate::nodes::socket::Socket;

/// Transfer function node definition.
pub struct TransferFunctionNode;

impl TransferFunctionNode {
    /// Wrap an edited lookup table in the message envelope the backend
    /// expects. The host sends the result through the graph's sender.
    pub fn lut_message(lut: Value) -> Value {
        json!({ "lut": lut })
    }
}

impl NodeDefinition for TransferFunctionNode {
    fn name(&self) -> &str {
        "TransferFunction"
    }

    fn category(&self) -> &str {
        "Operations"
    }

    fn build(&self, node: &mut Node, ctx: &BuildContext) -> Result<(), BuildError> {
        node.add_output(Socket::output("lut", "LUT", ctx.socket_type("LUT")?));
        Ok(())
    }
}
