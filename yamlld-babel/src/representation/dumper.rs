//! IR → tree.
//!
//! Under `json` the IR is first unshared, so every alias target is written
//! out in full and a cycle is an error. Under `extended` sharing is kept:
//! a container reached more than once is anchored where it is first
//! written and aliased everywhere after, which also covers cycles.
//!
//! Literal tags go through a pre-scan that declares a `%TAG` handle for
//! the first known vocabulary the document uses. Only one directive is
//! written because the parser keeps just the last `%TAG` of a prologue;
//! tags from any other vocabulary are written verbatim.

use super::scalar::resolve_implicit;
use crate::error::Error;
use crate::ir::nodes::{ContainerId, Ir, Literal, Value};
use crate::options::Options;
use crate::tree::{Document, Mapping, Node, Scalar, ScalarStyle, Sequence, Tag, TagDirective};
use crate::vocab::{self, I18N, XSD_STRING};
use std::collections::{HashMap, HashSet};
use tracing::debug;
use url::Url;

/// Build the document tree for `ir`, prologue included.
pub fn dump_document(ir: &Ir, options: &Options) -> Result<Document, Error> {
    let unshared;
    let ir = if options.profile.is_extended() {
        ir
    } else {
        unshared = ir.unshared()?;
        &unshared
    };

    let tags = if options.tag_prefixes {
        tag_directives(ir, options)
    } else {
        Vec::new()
    };
    let anchors = shared_containers(ir);
    debug!(
        profile = %options.profile,
        directives = tags.len(),
        anchors = anchors.len(),
        "dumping document"
    );

    let mut dumper = Dumper {
        ir,
        options,
        anchors,
        written: HashSet::new(),
    };
    let root = dumper.node(ir.root())?;
    Ok(Document {
        version: Some(options.document_version()),
        tags,
        root,
    })
}

struct Dumper<'a> {
    ir: &'a Ir,
    options: &'a Options,
    anchors: HashMap<ContainerId, String>,
    written: HashSet<ContainerId>,
}

impl Dumper<'_> {
    fn node(&mut self, value: &Value) -> Result<Node, Error> {
        let node = match value {
            Value::Null => Node::scalar("null"),
            Value::Bool(b) => Node::scalar(b.to_string()),
            Value::Integer(i) => Node::scalar(i.to_string()),
            Value::Float(f) => Node::scalar(format_float(*f)),
            Value::String(s) => Node::Scalar(string_scalar(s)),
            Value::Literal(literal) => Node::Scalar(self.literal(literal)?),
            Value::Sequence(id) | Value::Mapping(id) => return self.container(*id, value),
        };
        Ok(node)
    }

    fn container(&mut self, id: ContainerId, value: &Value) -> Result<Node, Error> {
        let anchor = self.anchors.get(&id).cloned();
        if let Some(name) = &anchor {
            if !self.written.insert(id) {
                return Ok(Node::alias(name.clone()));
            }
        }
        let ir = self.ir;
        let node = match value {
            Value::Sequence(_) => {
                let items = ir
                    .sequence(id)
                    .iter()
                    .map(|item| self.node(item))
                    .collect::<Result<_, _>>()?;
                Node::Sequence(Sequence {
                    items,
                    anchor,
                    ..Sequence::default()
                })
            }
            _ => {
                let entries = ir
                    .mapping(id)
                    .iter()
                    .map(|(key, entry)| Ok((Node::Scalar(string_scalar(key)), self.node(entry)?)))
                    .collect::<Result<_, Error>>()?;
                Node::Mapping(Mapping {
                    entries,
                    anchor,
                    ..Mapping::default()
                })
            }
        };
        Ok(node)
    }

    fn literal(&self, literal: &Literal) -> Result<Scalar, Error> {
        let mut scalar = Scalar::plain(literal.value.clone());
        if let Some(tag) = literal_tag(literal, self.options) {
            check_tag(&tag)?;
            scalar.tag = Some(Tag::new(&tag));
        }
        Ok(scalar)
    }
}

/// The tag a literal is written with under `options`, if any.
pub fn literal_tag(literal: &Literal, options: &Options) -> Option<String> {
    if !literal.is_language_tagged()
        && literal.datatype.as_deref().map_or(true, |dt| dt == XSD_STRING)
    {
        return None;
    }
    if !options.profile.is_extended() {
        return None;
    }
    if literal.is_language_tagged() && options.language_direction_enabled() {
        let language = literal.language.as_deref().unwrap_or("");
        return Some(match literal.direction {
            Some(direction) => format!("{I18N}{language}_{direction}"),
            None => format!("{I18N}{language}"),
        });
    }
    literal
        .datatype
        .clone()
        .filter(|datatype| datatype != XSD_STRING)
}

/// Reject datatypes that cannot round-trip through a tag.
fn check_tag(tag: &str) -> Result<(), Error> {
    let invalid = |reason: String| Error::InvalidTag {
        tag: tag.to_string(),
        reason,
    };
    if tag.is_empty() {
        return Err(invalid("empty datatype".into()));
    }
    if let Some(c) = tag.chars().find(|c| c.is_control() || c.is_whitespace()) {
        return Err(invalid(format!("contains {c:?}")));
    }
    if tag.starts_with('!') {
        return Ok(());
    }
    Url::parse(tag).map(|_| ()).map_err(|err| invalid(err.to_string()))
}

/// A string scalar: plain unless plain text would read back as another type.
fn string_scalar(text: &str) -> Scalar {
    match resolve_implicit(text) {
        Value::String(_) => Scalar::plain(text),
        _ => Scalar {
            style: ScalarStyle::DoubleQuoted,
            ..Scalar::plain(text)
        },
    }
}

pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        ".nan".to_string()
    } else if f.is_infinite() {
        let text = if f > 0.0 { ".inf" } else { "-.inf" };
        text.to_string()
    } else {
        format!("{f:?}")
    }
}

/// The `%TAG` directive for the first known vocabulary used by a literal
/// tag of `ir`, if any.
fn tag_directives(ir: &Ir, options: &Options) -> Vec<TagDirective> {
    let mut seen = HashSet::new();
    let mut pending = vec![ir.root()];
    while let Some(value) = pending.pop() {
        match value {
            Value::Literal(literal) => {
                let Some(tag) = literal_tag(literal, options) else {
                    continue;
                };
                let Some(vocabulary) = vocab::longest_match(&tag) else {
                    continue;
                };
                return vec![TagDirective {
                    handle: vocabulary.handle(),
                    prefix: vocabulary.namespace.to_string(),
                }];
            }
            Value::Sequence(id) | Value::Mapping(id) => {
                if seen.insert(*id) {
                    let children: Vec<_> = ir.children(*id).collect();
                    pending.extend(children.into_iter().rev());
                }
            }
            _ => {}
        }
    }
    Vec::new()
}

/// Anchor names for every container reachable more than once from the root,
/// numbered in order of first visit.
fn shared_containers(ir: &Ir) -> HashMap<ContainerId, String> {
    let mut references: HashMap<ContainerId, usize> = HashMap::new();
    let mut order = Vec::new();
    let mut pending = vec![ir.root()];
    while let Some(value) = pending.pop() {
        let Some(id) = value.container() else {
            continue;
        };
        let count = references.entry(id).or_insert(0);
        *count += 1;
        if *count == 1 {
            order.push(id);
            let children: Vec<_> = ir.children(id).collect();
            pending.extend(children.into_iter().rev());
        }
    }
    order
        .into_iter()
        .filter(|id| references[id] > 1)
        .enumerate()
        .map(|(n, id)| (id, format!("a{}", n + 1)))
        .collect()
}
