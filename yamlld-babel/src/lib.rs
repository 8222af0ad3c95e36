//! YAML-LD ⇄ JSON-LD internal representation
//!
//!     This crate lets a linked-data pipeline read and write documents in YAML-LD, by translating
//!     between a YAML node tree and the JSON-compatible IR the linked-data algorithms work on.
//!
//!     TLDR:
//!         - Text is parsed into a node tree (./tree/parser.rs), never straight into IR.
//!         - The tree is loaded into IR (./representation/loader.rs), scalar by scalar through the
//!           resolver (./representation/scalar.rs).
//!         - The way back is IR → tree (./representation/dumper.rs) → text (./tree/emitter.rs).
//!         - Every step takes the same Options value; the profile inside it decides what is legal.
//!
//! Architecture
//!
//!     .
//!     ├── error.rs                # Error, FormatError, Location
//!     ├── options.rs              # Profile, Version, Options
//!     ├── vocab.rs                # Known namespaces and %TAG handles
//!     ├── tree                    # Node tree, text parser adapter, emitter
//!     ├── ir                      # Arena IR and the serde_json bridge
//!     ├── representation          # Scalar resolver, loader, dumper
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats                 # yamlld and jsonld formats
//!     └── api.rs                  # Processor seam for the linked-data algorithms
//!
//! Profiles
//!
//!     `json` only accepts what a JSON document could say: no aliases, and only the core YAML
//!     tags plus XML Schema tags (which degrade to strings). `extended` accepts aliases, keeping
//!     the shared structure in the IR, and turns any other tag into a typed literal.
//!
//!     Dumping follows the same split. Under `json` shared structure is written out in full and a
//!     cycle is an error; under `extended` shared containers are anchored and aliased.
//!
//!     This is a pure lib: no code here supposes a shell environment (printing, env vars, files).

pub mod api;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod options;
pub mod registry;
pub mod representation;
pub mod tree;
pub mod vocab;

pub use error::{Error, FormatError, Location};
pub use format::Format;
pub use ir::{Direction, Ir, Literal, Value};
pub use options::{Options, Profile, Version};
pub use registry::FormatRegistry;
pub use representation::load_stream_tree;

use tree::{emitter, parser, Stream};

/// Load the first document of `text`.
///
/// An empty stream yields `options.fallback`, or a null document when no
/// fallback is set. A first document that is null also yields the fallback.
pub fn load(text: &str, options: &Options) -> Result<Ir, Error> {
    let stream = parser::parse_stream(text)?;
    load_tree(&stream, options)
}

/// [`load`] for raw bytes, which must be UTF-8.
pub fn load_bytes(bytes: &[u8], options: &Options) -> Result<Ir, Error> {
    load(std::str::from_utf8(bytes)?, options)
}

/// Load every document of `text`.
///
/// An empty stream yields `[fallback]` when a fallback is set and an empty
/// vector otherwise.
pub fn load_stream(text: &str, options: &Options) -> Result<Vec<Ir>, Error> {
    let stream = parser::parse_stream(text)?;
    let documents = load_stream_tree(&stream, options)?;
    if documents.is_empty() {
        return Ok(options.fallback.iter().cloned().collect());
    }
    Ok(documents)
}

/// Load the first document of an already parsed stream.
pub fn load_tree(stream: &Stream, options: &Options) -> Result<Ir, Error> {
    let Some(first) = stream.documents.first() else {
        return Ok(options.fallback.clone().unwrap_or_default());
    };
    let ir = representation::load_document(first, 0, options)?;
    match (&options.fallback, ir.root()) {
        (Some(fallback), Value::Null) => Ok(fallback.clone()),
        _ => Ok(ir),
    }
}

/// Serialize `ir` as a single YAML-LD document.
pub fn dump(ir: &Ir, options: &Options) -> Result<String, Error> {
    Ok(emitter::emit(&dump_tree(ir, options)?))
}

/// Build the node tree [`dump`] would emit.
pub fn dump_tree(ir: &Ir, options: &Options) -> Result<Stream, Error> {
    Ok(Stream::single(representation::dump_document(ir, options)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stream_uses_fallback() {
        assert_eq!(load("", &Options::json()).unwrap(), Ir::default());
        assert!(load_stream("", &Options::json()).unwrap().is_empty());

        let options = Options::json().with_fallback(Ir::new(Value::from("none")));
        assert_eq!(load("", &options).unwrap().root(), &Value::from("none"));
        assert_eq!(load_stream("", &options).unwrap().len(), 1);
    }

    #[test]
    fn null_first_document_yields_fallback() {
        let options = Options::json().with_fallback(Ir::new(Value::Integer(0)));
        assert_eq!(load("--- ~\n", &options).unwrap().root(), &Value::Integer(0));
        assert_eq!(load("--- ~\n", &Options::json()).unwrap().root(), &Value::Null);
    }

    #[test]
    fn load_bytes_rejects_invalid_utf8() {
        let err = load_bytes(&[b'a', b':', b' ', 0xff], &Options::json()).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)), "{err}");
        let ir = load_bytes("\u{feff}a: 1\n".as_bytes(), &Options::json()).unwrap();
        assert_eq!(ir.get("a"), Some(&Value::Integer(1)));
    }

    #[test]
    fn dump_then_load_round_trips() {
        let ir = load("a: [1, 2.5, x]\nb: {c: null}\n", &Options::json()).unwrap();
        let text = dump(&ir, &Options::json()).unwrap();
        assert!(text.starts_with("%YAML 1.2\n---\n"), "{text}");
        assert_eq!(load(&text, &Options::json()).unwrap(), ir);
    }
}
