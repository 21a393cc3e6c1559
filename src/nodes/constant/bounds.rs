//! Longitude/latitude bounds constant node

use serde::{Deserialize, Serialize};

use crate::nodes::error::BuildError;
use crate::nodes::factory::{BuildContext, NodeDefinition};
use crate::nodes::node::Node;
use crate::nodes::socket::Socket;
use crate::nodes::source::wcs_coverage::DEFAULT_BOUNDS;

/// Persisted lon/lat extent of a Bounds node, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoundsData {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Default for BoundsData {
    fn default() -> Self {
        let [min_lon, max_lon, min_lat, max_lat] = DEFAULT_BOUNDS;
        Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        }
    }
}

/// Bounds constant node definition.
pub struct BoundsNode;

impl NodeDefinition for BoundsNode {
    fn name(&self) -> &str {
        "Bounds"
    }

    fn category(&self) -> &str {
        "Constants"
    }

    fn build(&self, node: &mut Node, ctx: &BuildContext) -> Result<(), BuildError> {
        node.add_output(Socket::output(
            "boundsOut",
            "Long/Lat Bounds",
            ctx.socket_type("RVec4")?,
        ));
        Ok(())
    }
}
