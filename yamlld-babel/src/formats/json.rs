//! JSON-LD text, through the `serde_json` bridge of the IR.

use crate::error::{Error, FormatError};
use crate::format::Format;
use crate::ir::Ir;
use crate::options::Options;

pub const CONTENT_TYPE: &str = "application/ld+json";

#[derive(Debug, Clone, Copy)]
pub struct JsonLdFormat {
    /// Indent output instead of writing it on one line.
    pub pretty: bool,
}

impl Default for JsonLdFormat {
    fn default() -> Self {
        JsonLdFormat { pretty: true }
    }
}

impl Format for JsonLdFormat {
    fn name(&self) -> &str {
        "jsonld"
    }

    fn description(&self) -> &str {
        "JSON-LD documents"
    }

    fn file_extensions(&self) -> &[&str] {
        &["jsonld", "json"]
    }

    fn content_type(&self) -> &str {
        CONTENT_TYPE
    }

    fn detect(&self, sample: &str) -> bool {
        matches!(sample.trim_start().chars().next(), Some('{' | '['))
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str, _options: &Options) -> Result<Ir, FormatError> {
        let json: serde_json::Value = serde_json::from_str(source).map_err(Error::from)?;
        Ok(Ir::from_json(&json))
    }

    fn serialize(&self, ir: &Ir, _options: &Options) -> Result<String, FormatError> {
        let json = ir.to_json()?;
        let text = if self.pretty {
            serde_json::to_string_pretty(&json)
        } else {
            serde_json::to_string(&json)
        };
        Ok(text.map_err(Error::from)?)
    }
}
