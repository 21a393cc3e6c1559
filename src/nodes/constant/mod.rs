//! Constant-value nodes feeding pipeline parameters

pub mod bounds;
pub mod int;

pub use bounds::{BoundsData, BoundsNode};
pub use int::{IntData, IntNode};
