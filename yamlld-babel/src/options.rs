//! Per-call options threaded through the loader and dumper.

use crate::ir::nodes::Ir;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability profile.
///
/// `json` accepts only what a JSON document could express (no aliases, a
/// fixed set of tags). `extended` accepts aliases and arbitrary tags, which
/// become typed literals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Json,
    Extended,
}

impl Profile {
    pub fn is_extended(self) -> bool {
        self == Profile::Extended
    }

    /// The profile IRI advertised in media types.
    pub fn iri(self) -> Option<String> {
        match self {
            Profile::Json => None,
            Profile::Extended => Some(format!("{}extended", crate::vocab::YAML_LD)),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Json => f.write_str("json"),
            Profile::Extended => f.write_str("extended"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Profile::Json),
            "extended" => Ok(Profile::Extended),
            other => Err(format!("unknown profile '{other}' (expected json or extended)")),
        }
    }
}

/// A `%YAML` directive version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    /// Highest version the emitter writes by default.
    pub const LATEST: Version = Version { major: 1, minor: 2 };

    pub fn new(major: u8, minor: u8) -> Self {
        Version { major, minor }
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::LATEST
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = s
            .trim()
            .split_once('.')
            .ok_or_else(|| format!("invalid version '{s}' (expected MAJOR.MINOR)"))?;
        let major = major
            .parse()
            .map_err(|_| format!("invalid major version in '{s}'"))?;
        let minor = minor
            .parse()
            .map_err(|_| format!("invalid minor version in '{s}'"))?;
        Ok(Version { major, minor })
    }
}

impl TryFrom<String> for Version {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

/// Options for one load or dump call.
#[derive(Debug, Clone)]
pub struct Options {
    pub profile: Profile,
    /// Interpret i18n tags as language/direction literals. `None` follows
    /// the profile.
    pub language_direction: Option<bool>,
    /// `%YAML` version written by the dumper. `None` means [`Version::LATEST`].
    pub version: Option<Version>,
    /// Returned in place of an empty stream.
    pub fallback: Option<Ir>,
    /// Abbreviate known vocabularies with `%TAG` directives.
    pub tag_prefixes: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            profile: Profile::Json,
            language_direction: None,
            version: None,
            fallback: None,
            tag_prefixes: true,
        }
    }
}

impl Options {
    pub fn json() -> Self {
        Options::default()
    }

    pub fn extended() -> Self {
        Options {
            profile: Profile::Extended,
            ..Options::default()
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_fallback(mut self, fallback: Ir) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn language_direction_enabled(&self) -> bool {
        self.language_direction
            .unwrap_or_else(|| self.profile.is_extended())
    }

    pub fn document_version(&self) -> Version {
        self.version.unwrap_or_default()
    }
}
