//! Builds a [`Stream`] from YAML text using `saphyr-parser` events.
//!
//! The parser reports anchors by number only. The anchor names are read
//! back from the source: the `&name` property of a node sits between the
//! end of the previous event and the start of the node, and an alias event
//! spans its own `*name` token. Aliases to unknown anchors are rejected by
//! the parser itself, which surfaces here as [`Error::DanglingAlias`].
//!
//! Tag URI escapes come out of the parser pre-decoded, one code point per
//! escape sequence; two-byte UTF-8 sequences are folded back into the
//! character they encode before the tag is resolved.

use super::{Alias, Document, Mapping, Mark, Node, Scalar, ScalarStyle, Sequence, Stream, Tag};
use crate::error::{Error, Location};
use saphyr_parser::{Event, Parser, ScanError, Span};
use std::collections::HashMap;

/// Parse every document of `source`.
pub fn parse_stream(source: &str) -> Result<Stream, Error> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut builder = TreeBuilder::new(source);
    for next in Parser::new_from_str(source) {
        let (event, span) = next.map_err(|err| builder.scan_error(&err))?;
        builder.push(event, span);
    }
    Ok(Stream {
        documents: builder.documents,
    })
}

enum Frame {
    Sequence(Sequence),
    Mapping { mapping: Mapping, key: Option<Node> },
}

struct TreeBuilder {
    /// Source text; parser markers index characters, not bytes.
    chars: Vec<char>,
    /// Character index just past the previous event.
    last_end: usize,
    names: HashMap<usize, String>,
    documents: Vec<Document>,
    stack: Vec<Frame>,
    root: Option<Node>,
}

impl TreeBuilder {
    fn new(source: &str) -> Self {
        TreeBuilder {
            chars: source.chars().collect(),
            last_end: 0,
            names: HashMap::new(),
            documents: Vec::new(),
            stack: Vec::new(),
            root: None,
        }
    }

    fn push(&mut self, event: Event<'_>, span: Span) {
        let mark = Some(Mark {
            line: span.start.line(),
            column: span.start.col() + 1,
        });
        let start = span.start.index();
        // An implicit document start spans the first token, which may be
        // the root node's own properties.
        let end = match event {
            Event::DocumentStart(..) => start,
            _ => span.end.index(),
        };
        match event {
            Event::DocumentStart(..) => self.root = None,
            Event::DocumentEnd => {
                let root = self.root.take().unwrap_or_else(|| Node::scalar(""));
                self.documents.push(Document::new(root));
            }
            Event::Scalar(value, style, anchor, tag) => {
                let node = Node::Scalar(Scalar {
                    value: value.to_string(),
                    tag: tag.as_ref().map(|t| resolve_tag(t)),
                    anchor: self.anchor_name(anchor, start),
                    style: convert_style(style),
                    mark,
                });
                self.attach(node);
            }
            Event::Alias(id) => {
                let anchor = self
                    .name_at(start, '*')
                    .or_else(|| self.names.get(&id).cloned())
                    .unwrap_or_else(|| id.to_string());
                self.attach(Node::Alias(Alias { anchor, mark }));
            }
            Event::SequenceStart(anchor, tag) => {
                let anchor = self.anchor_name(anchor, start);
                self.stack.push(Frame::Sequence(Sequence {
                    items: Vec::new(),
                    tag: tag.as_ref().map(|t| resolve_tag(t)),
                    anchor,
                    mark,
                }));
            }
            Event::MappingStart(anchor, tag) => {
                let anchor = self.anchor_name(anchor, start);
                self.stack.push(Frame::Mapping {
                    mapping: Mapping {
                        entries: Vec::new(),
                        tag: tag.as_ref().map(|t| resolve_tag(t)),
                        anchor,
                        mark,
                    },
                    key: None,
                });
            }
            Event::SequenceEnd | Event::MappingEnd => {
                if let Some(frame) = self.stack.pop() {
                    let node = match frame {
                        Frame::Sequence(sequence) => Node::Sequence(sequence),
                        Frame::Mapping { mapping, .. } => Node::Mapping(mapping),
                    };
                    self.attach(node);
                }
            }
            _ => {}
        }
        self.last_end = self.last_end.max(end);
    }

    fn attach(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => self.root = Some(node),
            Some(Frame::Sequence(sequence)) => sequence.items.push(node),
            Some(Frame::Mapping { mapping, key }) => match key.take() {
                None => *key = Some(node),
                Some(k) => mapping.entries.push((k, node)),
            },
        }
    }

    /// Name of anchor `id`, whose node starts at character `start`.
    fn anchor_name(&mut self, id: usize, start: usize) -> Option<String> {
        if id == 0 {
            return None;
        }
        let end = start.min(self.chars.len());
        let from = self.last_end.min(end);
        let name = anchor_property(&self.chars[from..end]).unwrap_or_else(|| id.to_string());
        self.names.insert(id, name.clone());
        Some(name)
    }

    /// The name following a `sigil` at character `index`, if there is one.
    fn name_at(&self, index: usize, sigil: char) -> Option<String> {
        match self.chars.get(index..) {
            Some([first, rest @ ..]) if *first == sigil => read_name(rest),
            _ => None,
        }
    }

    fn scan_error(&self, err: &ScanError) -> Error {
        let marker = err.marker();
        let location = Location::new(self.documents.len(), marker.line(), marker.col() + 1);
        if err.info().contains("unknown anchor") {
            Error::DanglingAlias {
                anchor: self
                    .name_at(marker.index(), '*')
                    .unwrap_or_else(|| String::from("?")),
                location,
            }
        } else {
            Error::Syntax {
                message: err.info().to_string(),
                location,
            }
        }
    }
}

/// The last `&name` property in the text between two nodes. Comments and
/// tag properties are skipped so an `&` inside them is not mistaken for
/// an anchor.
fn anchor_property(region: &[char]) -> Option<String> {
    let mut found = None;
    let mut i = 0;
    while i < region.len() {
        let token_start = i == 0 || region[i - 1].is_whitespace();
        match region[i] {
            '#' if token_start => {
                while i < region.len() && region[i] != '\n' {
                    i += 1;
                }
            }
            '!' if token_start => {
                let verbatim = region.get(i + 1) == Some(&'<');
                while i < region.len() {
                    let c = region[i];
                    i += 1;
                    if (verbatim && c == '>') || (!verbatim && is_separator(c)) {
                        break;
                    }
                }
            }
            '&' => {
                if let Some(name) = read_name(&region[i + 1..]) {
                    i += name.chars().count();
                    found = Some(name);
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    found
}

fn read_name(chars: &[char]) -> Option<String> {
    let name: String = chars.iter().take_while(|c| !is_separator(**c)).collect();
    (!name.is_empty()).then_some(name)
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '[' | ']' | '{' | '}')
}

fn resolve_tag(tag: &saphyr_parser::Tag) -> Tag {
    let raw = format!("{}{}", tag.handle, tag.suffix);
    Tag::new(&fold_escaped_pairs(&raw))
}

/// The parser decodes `%XX%YY` into the single code point `U+XXYY`. Tags
/// cannot hold raw non-ASCII text, so such a code point always stands for
/// the two-byte UTF-8 sequence `XX YY`.
fn fold_escaped_pairs(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            let code = c as u32;
            let (lead, trail) = (code >> 8, code & 0xFF);
            if (0xC2..=0xDF).contains(&lead) && (0x80..=0xBF).contains(&trail) {
                char::from_u32(((lead & 0x1F) << 6) | (trail & 0x3F)).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

fn convert_style(style: saphyr_parser::ScalarStyle) -> ScalarStyle {
    match style {
        saphyr_parser::ScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
        saphyr_parser::ScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
        saphyr_parser::ScalarStyle::Literal => ScalarStyle::Literal,
        saphyr_parser::ScalarStyle::Folded => ScalarStyle::Folded,
        _ => ScalarStyle::Plain,
    }
}
