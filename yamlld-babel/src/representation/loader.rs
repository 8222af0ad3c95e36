//! Tree → IR.
//!
//! The loader walks one document depth-first. Every anchored node is
//! registered as soon as its IR value exists, before its children are
//! visited, so an alias inside a container may refer back to that
//! container. Aliases then resolve to the very same [`Value`]: for
//! containers that means the same arena id, never a copy.

use super::scalar::resolve;
use crate::error::{Error, Location};
use crate::ir::nodes::{Ir, Value};
use crate::options::Options;
use crate::tree::{Document, Mark, Node, Stream, Tag};
use crate::vocab::YAML_CORE;
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Load every document of `stream`.
pub fn load_stream_tree(stream: &Stream, options: &Options) -> Result<Vec<Ir>, Error> {
    stream
        .documents
        .iter()
        .enumerate()
        .map(|(index, document)| load_document(document, index, options))
        .collect()
}

/// Load one document. `index` is only used to locate errors.
pub fn load_document(document: &Document, index: usize, options: &Options) -> Result<Ir, Error> {
    let mut loader = Loader {
        options,
        document: index,
        ir: Ir::default(),
        anchors: HashMap::new(),
    };
    let root = loader.node(&document.root)?;
    loader.ir.set_root(root);
    debug!(
        document = index,
        profile = %options.profile,
        containers = loader.ir.container_count(),
        anchors = loader.anchors.len(),
        "loaded document"
    );
    Ok(loader.ir)
}

struct Loader<'a> {
    options: &'a Options,
    document: usize,
    ir: Ir,
    anchors: HashMap<String, Value>,
}

impl Loader<'_> {
    fn location(&self, mark: Option<Mark>) -> Location {
        match mark {
            Some(mark) => Location::new(self.document, mark.line, mark.column),
            None => Location::new(self.document, 0, 0),
        }
    }

    fn register(&mut self, anchor: Option<&String>, value: &Value) {
        if let Some(name) = anchor {
            trace!(anchor = %name, kind = value.kind(), "registered anchor");
            self.anchors.insert(name.clone(), value.clone());
        }
    }

    fn node(&mut self, node: &Node) -> Result<Value, Error> {
        match node {
            Node::Scalar(scalar) => {
                let value = resolve(scalar, self.options)
                    .map_err(|err| err.with_location(self.location(scalar.mark)))?;
                self.register(scalar.anchor.as_ref(), &value);
                Ok(value)
            }
            Node::Sequence(sequence) => {
                self.check_container_tag(sequence.tag.as_ref(), "seq", sequence.mark)?;
                let value = self.ir.add_sequence(Vec::with_capacity(sequence.items.len()));
                self.register(sequence.anchor.as_ref(), &value);
                let Some(id) = value.container() else {
                    return Ok(value);
                };
                for item in &sequence.items {
                    let item = self.node(item)?;
                    if let Some(items) = self.ir.sequence_mut(id) {
                        items.push(item);
                    }
                }
                Ok(value)
            }
            Node::Mapping(mapping) => {
                self.check_container_tag(mapping.tag.as_ref(), "map", mapping.mark)?;
                let value = self.ir.add_mapping(IndexMap::with_capacity(mapping.entries.len()));
                self.register(mapping.anchor.as_ref(), &value);
                let Some(id) = value.container() else {
                    return Ok(value);
                };
                for (key, entry) in &mapping.entries {
                    let key = self.key(key)?;
                    let entry = self.node(entry)?;
                    if let Some(entries) = self.ir.mapping_mut(id) {
                        entries.insert(key, entry);
                    }
                }
                Ok(value)
            }
            Node::Alias(alias) => {
                let location = self.location(alias.mark);
                let Some(value) = self.anchors.get(&alias.anchor).cloned() else {
                    return Err(Error::DanglingAlias {
                        anchor: alias.anchor.clone(),
                        location,
                    });
                };
                if !self.options.profile.is_extended() {
                    return Err(Error::Profile {
                        construct: format!("alias *{}", alias.anchor),
                        location,
                    });
                }
                trace!(anchor = %alias.anchor, "resolved alias");
                Ok(value)
            }
        }
    }

    fn key(&mut self, node: &Node) -> Result<String, Error> {
        let location = self.location(node.mark());
        if matches!(node, Node::Sequence(_) | Node::Mapping(_)) {
            return Err(Error::MappingKey {
                found: node.kind(),
                location,
            });
        }
        match self.node(node)? {
            Value::String(key) => Ok(key),
            other => Err(Error::MappingKey {
                found: other.kind(),
                location,
            }),
        }
    }

    /// Containers may carry their own core tag or `!`. Any other tag is
    /// rejected under `json` and ignored under `extended`.
    fn check_container_tag(
        &self,
        tag: Option<&Tag>,
        core: &str,
        mark: Option<Mark>,
    ) -> Result<(), Error> {
        let Some(tag) = tag else {
            return Ok(());
        };
        let text = tag.as_str();
        let own = text == "!"
            || text.strip_prefix(YAML_CORE) == Some(core)
            || text.strip_prefix('!') == Some(core);
        if own {
            return Ok(());
        }
        if self.options.profile.is_extended() {
            debug!(tag = text, "ignoring tag on collection");
            return Ok(());
        }
        Err(Error::Profile {
            construct: format!("tag `{text}` on a collection"),
            location: self.location(mark),
        })
    }
}
