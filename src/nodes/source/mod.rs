//! Data-source nodes

pub mod time;
pub mod wcs_coverage;
pub mod wcs_source;

pub use time::TimeNode;
pub use wcs_coverage::WCSCoverageNode;
pub use wcs_source::{WCSSourceData, WCSSourceNode};
