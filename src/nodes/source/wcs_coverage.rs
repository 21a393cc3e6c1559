//! WCS coverage image node
//!
//! Loads a 2D image slice of a coverage through the backend's texture
//! loader. All request parameters arrive through sockets; the backend
//! falls back to the request defaults below for unconnected inputs.

use crate::nodes::error::BuildError;
use crate::nodes::factory::{BuildContext, NodeDefinition};
use crate::nodes::node::Node;
use crate::nodes::socket::Socket;

/// Whole-globe extent in degrees: min/max longitude, min/max latitude.
pub const DEFAULT_BOUNDS: [f64; 4] = [-180.0, 180.0, -90.0, 90.0];
/// Longest image edge requested from the service when no resolution is
/// connected.
pub const DEFAULT_MAX_RESOLUTION: i64 = 1024;
/// Layer range requested when no layer is connected.
pub const DEFAULT_LAYER: i64 = 1;
/// Transfer format of the coverage request.
pub const REQUEST_FORMAT: &str = "image/tiff";

/// WCS coverage image node definition.
pub struct WCSCoverageNode;

impl NodeDefinition for WCSCoverageNode {
    fn name(&self) -> &str {
        "WCSCoverageImage"
    }

    fn category(&self) -> &str {
        "Data Sources"
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
        node.add_input(Socket::input("layerIn", "Layer", ctx.socket_type("Int")?));
        node.add_output(Socket::output(
            "imageOut",
            "Image 2D",
            ctx.socket_type("Image2D")?,
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::graph::NodeGraph;

    #[test]
    fn test_declares_request_sockets() {
        let mut graph = NodeGraph::default();
        let id = graph.add_node("WCSCoverageImage").unwrap();
        let node = graph.node(id).unwrap();

        assert_eq!(node.inputs().len(), 5);
        assert_eq!(node.input("layerIn").unwrap().socket_type, "Int");
        assert_eq!(node.output("imageOut").unwrap().socket_type, "Image2D");
    }

    #[test]
    fn test_request_defaults() {
        assert_eq!(DEFAULT_BOUNDS, [-180.0, 180.0, -90.0, 90.0]);
        assert_eq!(DEFAULT_MAX_RESOLUTION, 1024);
        assert_eq!(REQUEST_FORMAT, "image/tiff");
    }
}
