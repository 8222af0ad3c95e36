//! The Tree ⇄ IR transform.
//!
//! - [`scalar`] decides the IR value of a single scalar node.
//! - [`loader`] walks a document tree and builds its IR, resolving anchors
//!   and aliases.
//! - [`dumper`] turns IR back into a document tree with tags and a prologue.
//!
//! The [`Profile`](crate::options::Profile) in the active
//! [`Options`](crate::options::Options) is passed down explicitly; nothing
//! here keeps state between calls.

pub mod dumper;
pub mod loader;
pub mod scalar;

pub use dumper::dump_document;
pub use loader::{load_document, load_stream_tree};
pub use scalar::{resolve, TagClass};
