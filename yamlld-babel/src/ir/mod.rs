//! Intermediate Representation (IR) exchanged with linked-data processors.
//!
//! The IR is the JSON data model plus typed literals. See [`nodes`] for
//! the arena layout and [`json`] for the `serde_json` bridge.

pub mod json;
pub mod nodes;

pub use nodes::{Container, ContainerId, Direction, Ir, Literal, Value};
