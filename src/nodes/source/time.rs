//! Simulation time node
//!
//! One output socket carrying the current simulation time; the backend
//! samples the clock at execution.

use crate::nodes::error::BuildError;
use crate::nodes::factory::{BuildContext, NodeDefinition};
use crate::nodes::node::Node;
use crate::nodes::socket::Socket;

/// Time source node definition.
pub struct TimeNode;

impl NodeDefinition for TimeNode {
    fn name(&self) -> &str {
        "Time"
    }

    fn category(&self) -> &str {
        "Data Sources"
    }

    fn build(&self, node: &mut Node, ctx: &BuildContext) -> Result<(), BuildError> {
        node.add_output(Socket::output(
            "timeOut",
            "Time",
            ctx.socket_type("WCSTime")?,
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::graph::NodeGraph;

    #[test]
    fn test_single_time_output() {
        let mut graph = NodeGraph::default();
        let id = graph.add_node("Time").unwrap();
        let node = graph.node(id).unwrap();

        assert!(node.inputs().is_empty());
        assert_eq!(node.output("timeOut").unwrap().socket_type, "WCSTime");
        assert!(node.controls().is_empty());
    }
}
