//! Shared configuration loader for the yamlld toolchain.
//!
//! `defaults/yamlld.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`YamlLdConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use yamlld_babel::{Options, Profile, Version};

const DEFAULT_TOML: &str = include_str!("../defaults/yamlld.default.toml");

/// Top-level configuration consumed by yamlld applications.
#[derive(Debug, Clone, Deserialize)]
pub struct YamlLdConfig {
    pub representation: RepresentationConfig,
    pub dump: DumpConfig,
    pub convert: ConvertConfig,
}

/// How YAML-LD text is read into the IR.
#[derive(Debug, Clone, Deserialize)]
pub struct RepresentationConfig {
    pub profile: Profile,
    pub language_direction: LanguageDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageDirection {
    Auto,
    Enabled,
    Disabled,
}

impl LanguageDirection {
    fn as_option(self) -> Option<bool> {
        match self {
            LanguageDirection::Auto => None,
            LanguageDirection::Enabled => Some(true),
            LanguageDirection::Disabled => Some(false),
        }
    }
}

/// How the IR is written back out.
#[derive(Debug, Clone, Deserialize)]
pub struct DumpConfig {
    pub version: Version,
    pub tag_prefixes: bool,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub pretty_json: bool,
}

impl From<&YamlLdConfig> for Options {
    fn from(config: &YamlLdConfig) -> Self {
        Options {
            profile: config.representation.profile,
            language_direction: config.representation.language_direction.as_option(),
            version: Some(config.dump.version),
            fallback: None,
            tag_prefixes: config.dump.tag_prefixes,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<YamlLdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<YamlLdConfig, ConfigError> {
    Loader::new().build()
}
