//! Error type shared by the panel core and its hosts.
//!
//! Every variant is a configuration error: the caller set the panel up in a
//! way that cannot be laid out. They are returned, never swallowed, so the
//! host sees them at the call that caused them.

use thiserror::Error;

use crate::geometry::Edge;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("swipe-in panel cannot have more than one child")]
    MultipleChildren,
    #[error("child index {index} out of bounds for {len} attached children")]
    ChildIndexOutOfBounds { index: usize, len: usize },
    #[error("collapsed extent inverts the {edge} range (min {min} > max {max})")]
    InvertedRange { edge: Edge, min: i32, max: i32 },
    #[error("unknown slide edge `{0}`")]
    InvalidEdge(String),
    #[error("invalid value `{value}` for attribute `{name}`")]
    InvalidAttribute { name: String, value: String },
}
