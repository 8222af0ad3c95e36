//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for reading documents into the IR and writing them
//! back out.

use crate::error::FormatError;
use crate::ir::Ir;
use crate::options::Options;

/// Trait for document formats
///
/// Implementors provide conversion between text and the [`Ir`]. Formats can
/// support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str, options: &Options) -> Result<Ir, FormatError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "yamlld", "jsonld")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["yamlld"], ["jsonld", "json"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// The media type documents of this format are served with.
    fn content_type(&self) -> &str {
        "application/octet-stream"
    }

    /// Whether a sample of text looks like this format.
    fn detect(&self, _sample: &str) -> bool {
        false
    }

    /// Whether this format supports parsing (source → IR)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (IR → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into IR
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str, _options: &Options) -> Result<Ir, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize IR into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _ir: &Ir, _options: &Options) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
