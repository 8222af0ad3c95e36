//! The source tree: a typed node tree as produced by the YAML parser and
//! consumed by the emitter.
//!
//! Nodes are owned top-down by their [`Document`]. An [`Node::Alias`] only
//! names an anchor; it never owns the node it refers to.

pub mod emitter;
pub mod parser;

use crate::options::Version;
use crate::vocab::{XSD, XSD_BASE};
use percent_encoding::percent_decode_str;

/// Source position of a node (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pub line: usize,
    pub column: usize,
}

/// A fully resolved tag, e.g. `tag:yaml.org,2002:int` or an IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(String);

impl Tag {
    /// Resolve raw tag text: URI escapes are decoded, and the
    /// `http://www.w3.org/2001/XMLSchema<name>` spelling that some parsers
    /// produce for `%TAG` shorthands gets its missing `#` back.
    pub fn new(raw: &str) -> Self {
        let decoded = percent_decode_str(raw).decode_utf8_lossy().into_owned();
        match decoded.strip_prefix(XSD_BASE) {
            Some(rest)
                if !rest.is_empty()
                    && rest.chars().all(|c| c.is_alphanumeric() || c == '_') =>
            {
                Tag(format!("{XSD}{rest}"))
            }
            _ => Tag(decoded),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(raw: &str) -> Self {
        Tag::new(raw)
    }
}

/// Presentation style of a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarStyle {
    #[default]
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scalar {
    pub value: String,
    pub tag: Option<Tag>,
    pub anchor: Option<String>,
    pub style: ScalarStyle,
    pub mark: Option<Mark>,
}

impl Scalar {
    pub fn plain(value: impl Into<String>) -> Self {
        Scalar {
            value: value.into(),
            tag: None,
            anchor: None,
            style: ScalarStyle::Plain,
            mark: None,
        }
    }

    pub fn quoted(value: impl Into<String>) -> Self {
        Scalar {
            style: ScalarStyle::DoubleQuoted,
            ..Scalar::plain(value)
        }
    }

    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    pub fn is_plain(&self) -> bool {
        self.style == ScalarStyle::Plain
    }

    pub fn is_quoted(&self) -> bool {
        matches!(
            self.style,
            ScalarStyle::SingleQuoted | ScalarStyle::DoubleQuoted
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sequence {
    pub items: Vec<Node>,
    pub tag: Option<Tag>,
    pub anchor: Option<String>,
    pub mark: Option<Mark>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    pub entries: Vec<(Node, Node)>,
    pub tag: Option<Tag>,
    pub anchor: Option<String>,
    pub mark: Option<Mark>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub anchor: String,
    pub mark: Option<Mark>,
}

/// A content node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Sequence(Sequence),
    Mapping(Mapping),
    Scalar(Scalar),
    Alias(Alias),
}

impl Node {
    pub fn scalar(value: impl Into<String>) -> Self {
        Node::Scalar(Scalar::plain(value))
    }

    pub fn sequence(items: Vec<Node>) -> Self {
        Node::Sequence(Sequence {
            items,
            ..Sequence::default()
        })
    }

    pub fn mapping(entries: Vec<(Node, Node)>) -> Self {
        Node::Mapping(Mapping {
            entries,
            ..Mapping::default()
        })
    }

    pub fn alias(anchor: impl Into<String>) -> Self {
        Node::Alias(Alias {
            anchor: anchor.into(),
            mark: None,
        })
    }

    /// Attach an anchor to a sequence, mapping or scalar. Aliases are left untouched.
    pub fn anchored(mut self, name: impl Into<String>) -> Self {
        match &mut self {
            Node::Sequence(s) => s.anchor = Some(name.into()),
            Node::Mapping(m) => m.anchor = Some(name.into()),
            Node::Scalar(s) => s.anchor = Some(name.into()),
            Node::Alias(_) => {}
        }
        self
    }

    pub fn anchor(&self) -> Option<&str> {
        match self {
            Node::Sequence(s) => s.anchor.as_deref(),
            Node::Mapping(m) => m.anchor.as_deref(),
            Node::Scalar(s) => s.anchor.as_deref(),
            Node::Alias(_) => None,
        }
    }

    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Node::Sequence(s) => s.tag.as_ref(),
            Node::Mapping(m) => m.tag.as_ref(),
            Node::Scalar(s) => s.tag.as_ref(),
            Node::Alias(_) => None,
        }
    }

    pub fn mark(&self) -> Option<Mark> {
        match self {
            Node::Sequence(s) => s.mark,
            Node::Mapping(m) => m.mark,
            Node::Scalar(s) => s.mark,
            Node::Alias(a) => a.mark,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
            Node::Scalar(_) => "scalar",
            Node::Alias(_) => "alias",
        }
    }
}

/// A `%TAG` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDirective {
    pub handle: String,
    pub prefix: String,
}

/// A document: optional prologue plus one root node.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub version: Option<Version>,
    pub tags: Vec<TagDirective>,
    pub root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Document {
            version: None,
            tags: Vec::new(),
            root,
        }
    }
}

/// A sequence of documents.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stream {
    pub documents: Vec<Document>,
}

impl Stream {
    pub fn single(document: Document) -> Self {
        Stream {
            documents: vec![document],
        }
    }
}
