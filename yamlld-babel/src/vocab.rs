//! Namespaces the resolver and dumper know about.
//!
//! [`VOCABULARIES`] is the static table used to abbreviate datatype tags
//! with `%TAG` directives. It is never mutated.

pub const YAML_CORE: &str = "tag:yaml.org,2002:";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const XSD_BASE: &str = "http://www.w3.org/2001/XMLSchema";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const I18N: &str = "https://www.w3.org/ns/i18n#";
pub const I18N_BASE: &str = "https://www.w3.org/ns/i18n";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
pub const YAML_LD: &str = "http://www.w3.org/ns/yaml-ld#";

/// A namespace that may be abbreviated as `!<name>!` in emitted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    pub name: &'static str,
    pub namespace: &'static str,
}

impl Vocabulary {
    /// The `%TAG` handle for this vocabulary, e.g. `!xsd!`.
    pub fn handle(&self) -> String {
        format!("!{}!", self.name)
    }
}

pub const VOCABULARIES: &[Vocabulary] = &[
    Vocabulary {
        name: "xsd",
        namespace: XSD,
    },
    Vocabulary {
        name: "i18n",
        namespace: I18N,
    },
    Vocabulary {
        name: "rdf",
        namespace: RDF,
    },
    Vocabulary {
        name: "rdfs",
        namespace: "http://www.w3.org/2000/01/rdf-schema#",
    },
    Vocabulary {
        name: "owl",
        namespace: "http://www.w3.org/2002/07/owl#",
    },
    Vocabulary {
        name: "geo",
        namespace: "http://www.opengis.net/ont/geosparql#",
    },
    Vocabulary {
        name: "schema",
        namespace: "http://schema.org/",
    },
];

/// The vocabulary with the longest namespace that prefixes `iri`.
pub fn longest_match(iri: &str) -> Option<&'static Vocabulary> {
    VOCABULARIES
        .iter()
        .filter(|v| iri.starts_with(v.namespace) && iri.len() > v.namespace.len())
        .max_by_key(|v| v.namespace.len())
}
