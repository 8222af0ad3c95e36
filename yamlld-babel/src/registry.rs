//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name, and looked up by file
//! extension, media type or a sample of their content.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::Ir;
use crate::options::Options;
use std::collections::HashMap;

/// Registry of document formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let ir = registry.parse("a: 1\n", "yamlld", &Options::json())?;
/// let json = registry.serialize(&ir, "jsonld", &Options::json())?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect format from filename based on file extension
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        self.sorted()
            .find(|format| format.file_extensions().contains(&extension))
            .map(|format| format.name().to_string())
    }

    /// Detect format from a media type such as `application/ld+yaml; profile=...`
    pub fn detect_format_from_content_type(&self, content_type: &str) -> Option<String> {
        let essence = content_type.split(';').next()?.trim();
        self.sorted()
            .find(|format| format.content_type().eq_ignore_ascii_case(essence))
            .map(|format| format.name().to_string())
    }

    /// Detect format by sniffing a sample of the content
    pub fn detect_format_from_sample(&self, sample: &str) -> Option<String> {
        self.sorted()
            .find(|format| format.detect(sample))
            .map(|format| format.name().to_string())
    }

    /// Parse source text using the specified format
    pub fn parse(&self, source: &str, format: &str, options: &Options) -> Result<Ir, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        fmt.parse(source, options)
    }

    /// Serialize a document using the specified format
    pub fn serialize(&self, ir: &Ir, format: &str, options: &Options) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        fmt.serialize(ir, options)
    }

    fn sorted(&self) -> impl Iterator<Item = &dyn Format> {
        let mut formats: Vec<_> = self.formats.values().map(|f| f.as_ref()).collect();
        formats.sort_by(|a, b| a.name().cmp(b.name()));
        formats.into_iter()
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(crate::formats::yamlld::YamlLdFormat);
        registry.register(crate::formats::json::JsonLdFormat::default());
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
