//! YAML-LD text.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::Ir;
use crate::options::Options;
use once_cell::sync::Lazy;
use regex::Regex;

pub const CONTENT_TYPE: &str = "application/ld+yaml";

static YAML_MEDIA_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^application/(?:[\w.-]+\+)*yaml$").expect("media type pattern")
});

/// Whether `content_type` names a YAML media type, with or without a
/// structured syntax suffix (`application/yaml`, `application/ld+yaml`).
/// Parameters after `;` are ignored.
pub fn is_yaml_media_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    YAML_MEDIA_TYPE.is_match(&essence.to_ascii_lowercase())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlLdFormat;

impl Format for YamlLdFormat {
    fn name(&self) -> &str {
        "yamlld"
    }

    fn description(&self) -> &str {
        "YAML-LD documents"
    }

    fn file_extensions(&self) -> &[&str] {
        &["yamlld", "yaml", "yml"]
    }

    fn content_type(&self) -> &str {
        CONTENT_TYPE
    }

    fn detect(&self, sample: &str) -> bool {
        sample.contains("---")
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str, options: &Options) -> Result<Ir, FormatError> {
        Ok(crate::load(source, options)?)
    }

    fn serialize(&self, ir: &Ir, options: &Options) -> Result<String, FormatError> {
        Ok(crate::dump(ir, options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Value;

    #[test]
    fn recognizes_yaml_media_types() {
        assert!(is_yaml_media_type("application/yaml"));
        assert!(is_yaml_media_type("application/ld+yaml"));
        assert!(is_yaml_media_type("application/x+ld+yaml; charset=utf-8"));
        assert!(!is_yaml_media_type("application/ld+json"));
        assert!(!is_yaml_media_type("text/plain"));
    }

    #[test]
    fn parse_and_serialize_go_through_the_transform() {
        let format = YamlLdFormat;
        let ir = format.parse("a: 1\n", &Options::json()).unwrap();
        assert_eq!(ir.get("a"), Some(&Value::Integer(1)));
        assert_eq!(
            format.serialize(&ir, &Options::json()).unwrap(),
            "%YAML 1.2\n---\na: 1\n"
        );
    }

    #[test]
    fn errors_surface_as_conversion_failures() {
        let err = YamlLdFormat
            .parse("a: &x 1\nb: *x\n", &Options::json())
            .unwrap_err();
        assert!(matches!(err, FormatError::Conversion(_)), "{err}");
    }
}
