//! Format implementations
//!
//! This module contains the format implementations that convert between
//! text and the IR.

pub mod json;
pub mod yamlld;

pub use json::JsonLdFormat;
pub use yamlld::{is_yaml_media_type, YamlLdFormat};
