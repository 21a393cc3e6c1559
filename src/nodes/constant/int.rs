//! Integer constant node

use crate::nodes::error::BuildError;
use crate::nodes::factory::{BuildContext, NodeDefinition};
use crate::nodes::node::Node;
use crate::nodes::socket::Socket;
use serde::{Deserialize, Serialize};

/// Persisted state of an Int node. The spinner widget that edits the
/// value belongs to the host UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntData {
    pub value: i64,
}

/// Integer constant node definition.
pub struct IntNode;

impl NodeDefinition for IntNode {
    fn name(&self) -> &str {
        "Int"
    }

    fn category(&self) -> &str {
        "Constants"
    }

    fn build(&self, node: &mut Node, ctx: &BuildContext) -> Result<(), BuildError> {
        node.add_output(Socket::output("valueOut", "Value", ctx.socket_type("Int")?));
        Ok(())
    }
}
