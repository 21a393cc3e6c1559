//! Data-extraction nodes

pub mod sentinel;

pub use sentinel::{SentinelData, SentinelNode};
