//! Error types for loading, dumping and format operations

use std::fmt;
use thiserror::Error;

/// Where in the input an error was detected.
///
/// `line` and `column` are 1-based; zero means the position is unknown (for
/// example when a tree was built by hand rather than by the text parser).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location {
    pub document: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub const UNKNOWN: Location = Location {
        document: 0,
        line: 0,
        column: 0,
    };

    pub fn new(document: usize, line: usize, column: usize) -> Self {
        Location {
            document,
            line,
            column,
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Location::UNKNOWN
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "document {}", self.document)
        } else {
            write!(
                f,
                "document {}, line {}, column {}",
                self.document, self.line, self.column
            )
        }
    }
}

/// Errors raised while converting between node trees and the IR.
///
/// Every variant is raised at the point of detection and aborts the whole
/// load or dump; there is no partial result.
#[derive(Debug, Error)]
pub enum Error {
    /// The input bytes are not valid UTF-8.
    #[error("invalid encoding: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The text parser rejected the input.
    #[error("syntax error at {location}: {message}")]
    Syntax { message: String, location: Location },

    /// A mapping key did not resolve to a string.
    #[error("mapping key must be a string, found {found} ({location})")]
    MappingKey {
        found: &'static str,
        location: Location,
    },

    /// A construct that is only legal under the `extended` profile was used
    /// under `json`.
    #[error("{construct} is not permitted under the json profile ({location})")]
    Profile {
        construct: String,
        location: Location,
    },

    /// An explicit tag has no resolution rule under the active profile.
    #[error("unsupported tag `{tag}` on {value:?} ({location})")]
    UnsupportedTag {
        tag: String,
        value: String,
        location: Location,
    },

    /// An alias referenced an anchor that is not (yet) defined.
    #[error("alias references undefined anchor `{anchor}` ({location})")]
    DanglingAlias { anchor: String, location: Location },

    /// The lexical form of a scalar with an explicit primitive tag failed
    /// to parse as that primitive.
    #[error("cannot parse {value:?} as {expected} ({location})")]
    ScalarParse {
        value: String,
        expected: &'static str,
        location: Location,
    },

    /// A datatype cannot be written as a tag.
    #[error("cannot serialize `{tag}` as a tag: {reason}")]
    InvalidTag { tag: String, reason: String },

    /// A cyclic structure was met where only trees can be expressed.
    #[error("cyclic structure cannot be represented {context}")]
    Cyclic { context: &'static str },

    /// JSON text could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The linked-data processor failed.
    #[error("processing failed: {0}")]
    Processing(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Attach a location to an error that does not carry one yet.
    pub fn with_location(mut self, at: Location) -> Self {
        let slot = match &mut self {
            Error::Syntax { location, .. }
            | Error::MappingKey { location, .. }
            | Error::Profile { location, .. }
            | Error::UnsupportedTag { location, .. }
            | Error::DanglingAlias { location, .. }
            | Error::ScalarParse { location, .. } => Some(location),
            _ => None,
        };
        if let Some(location) = slot {
            if location.is_unknown() {
                *location = at;
            }
        }
        self
    }

    /// The location carried by the error, if any.
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::Syntax { location, .. }
            | Error::MappingKey { location, .. }
            | Error::Profile { location, .. }
            | Error::UnsupportedTag { location, .. }
            | Error::DanglingAlias { location, .. }
            | Error::ScalarParse { location, .. } => Some(*location),
            _ => None,
        }
    }
}

/// Errors that can occur during format operations
#[derive(Debug, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Format does not support the requested direction
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// Error raised by the conversion itself
    #[error(transparent)]
    Conversion(#[from] Error),
}
