//! Writes a [`Stream`] as block-style YAML text.
//!
//! Layout follows the common `libyaml` conventions: two-space indentation,
//! sequences under a mapping key are not indented, and mappings inside a
//! sequence start on the dash line. A scalar asked to be plain is written
//! plain whenever that is syntactically legal; otherwise it is
//! double-quoted. The emitter never re-types a scalar. Deciding whether a
//! string must be quoted to keep its type is the caller's job.

use super::{Document, Node, Scalar, ScalarStyle, Stream, Tag, TagDirective};
use crate::vocab::YAML_CORE;
use percent_encoding::{percent_encode_byte, utf8_percent_encode, AsciiSet, CONTROLS};

const INDENT: usize = 2;

/// Characters escaped inside verbatim `!<...>` tags.
const VERBATIM: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Serialize every document of `stream`.
pub fn emit(stream: &Stream) -> String {
    let mut emitter = Emitter::default();
    for document in &stream.documents {
        emitter.document(document);
    }
    emitter.output
}

/// Serialize a single document.
pub fn emit_document(document: &Document) -> String {
    let mut emitter = Emitter::default();
    emitter.document(document);
    emitter.output
}

#[derive(Default)]
struct Emitter {
    output: String,
    tags: Vec<TagDirective>,
    /// The next line continues the current one (`- key: value`).
    continue_line: bool,
}

impl Emitter {
    fn document(&mut self, document: &Document) {
        if let Some(version) = document.version {
            self.output.push_str(&format!("%YAML {version}\n"));
        }
        for directive in &document.tags {
            self.output
                .push_str(&format!("%TAG {} {}\n", directive.handle, directive.prefix));
        }
        self.tags = document.tags.clone();

        self.output.push_str("---");
        if is_block(&document.root) {
            let props = self.props(&document.root);
            if !props.is_empty() {
                self.output.push(' ');
                self.output.push_str(&props);
            }
            self.output.push('\n');
            self.block(&document.root, 0);
        } else {
            self.output.push(' ');
            let text = self.inline(&document.root, false);
            self.output.push_str(&text);
            self.output.push('\n');
        }
    }

    fn pad(&mut self, indent: usize) {
        if self.continue_line {
            self.continue_line = false;
        } else {
            self.output.push_str(&" ".repeat(indent));
        }
    }

    /// Write a non-empty sequence or mapping, one entry per line.
    fn block(&mut self, node: &Node, indent: usize) {
        match node {
            Node::Sequence(sequence) => {
                for item in &sequence.items {
                    self.pad(indent);
                    self.output.push('-');
                    self.child(item, indent + INDENT, false);
                }
            }
            Node::Mapping(mapping) => {
                for (key, value) in &mapping.entries {
                    self.pad(indent);
                    let key = self.inline(key, true);
                    self.output.push_str(&key);
                    self.output.push(':');
                    self.child(value, indent + INDENT, true);
                }
            }
            other => {
                let text = self.inline(other, false);
                self.pad(indent);
                self.output.push_str(&text);
                self.output.push('\n');
            }
        }
    }

    fn child(&mut self, node: &Node, indent: usize, under_key: bool) {
        if !is_block(node) {
            self.output.push(' ');
            let text = self.inline(node, false);
            self.output.push_str(&text);
            self.output.push('\n');
            return;
        }

        let props = self.props(node);
        let is_sequence = matches!(node, Node::Sequence(_));
        if props.is_empty() && !under_key {
            self.output.push(' ');
            self.continue_line = true;
            self.block(node, indent);
            return;
        }
        if !props.is_empty() {
            self.output.push(' ');
            self.output.push_str(&props);
        }
        self.output.push('\n');
        let indent = if under_key && is_sequence {
            indent - INDENT
        } else {
            indent
        };
        self.block(node, indent);
    }

    /// Single-line rendering: scalars, aliases and flow collections.
    fn inline(&self, node: &Node, flow: bool) -> String {
        match node {
            Node::Alias(alias) => format!("*{}", alias.anchor),
            Node::Scalar(scalar) => {
                let text = scalar_text(scalar, flow);
                self.with_props(node, text)
            }
            Node::Sequence(sequence) => {
                let items: Vec<_> = sequence.items.iter().map(|i| self.inline(i, true)).collect();
                self.with_props(node, format!("[{}]", items.join(", ")))
            }
            Node::Mapping(mapping) => {
                let entries: Vec<_> = mapping
                    .entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", self.inline(k, true), self.inline(v, true)))
                    .collect();
                self.with_props(node, format!("{{{}}}", entries.join(", ")))
            }
        }
    }

    fn with_props(&self, node: &Node, text: String) -> String {
        let props = self.props(node);
        if props.is_empty() {
            text
        } else {
            format!("{props} {text}")
        }
    }

    fn props(&self, node: &Node) -> String {
        let mut parts = Vec::new();
        if let Some(anchor) = node.anchor() {
            parts.push(format!("&{anchor}"));
        }
        if let Some(tag) = node.tag() {
            parts.push(self.render_tag(tag));
        }
        parts.join(" ")
    }

    /// Shorthand through a declared handle when possible, verbatim otherwise.
    fn render_tag(&self, tag: &Tag) -> String {
        let text = tag.as_str();
        for directive in &self.tags {
            if let Some(suffix) = text.strip_prefix(directive.prefix.as_str()) {
                if is_shorthand_suffix(suffix) {
                    return format!("{}{}", directive.handle, suffix);
                }
            }
        }
        if let Some(suffix) = text.strip_prefix(YAML_CORE) {
            if is_shorthand_suffix(suffix) {
                return format!("!!{suffix}");
            }
        }
        if let Some(suffix) = text.strip_prefix('!') {
            if is_shorthand_suffix(suffix) {
                return text.to_string();
            }
        }
        format!("!<{}>", verbatim_uri(text))
    }
}

/// Escape `text` for a verbatim tag so that it reads back unchanged.
///
/// The parser decodes each escape sequence to a single code point and the
/// tag text is percent-decoded once more afterwards. A `%` is therefore
/// escaped twice, as is any non-ASCII byte the parser cannot decode itself:
/// only two-byte UTF-8 sequences whose code point is not a surrogate in
/// the parser's reading survive a single escape.
fn verbatim_uri(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (at, c) in text.char_indices() {
        let raw = &text[at..at + c.len_utf8()];
        match raw.as_bytes() {
            b"%" => out.push_str("%2525"),
            [_] => out.extend(utf8_percent_encode(raw, VERBATIM)),
            [0xC2..=0xD7, _] => raw.bytes().for_each(|b| out.push_str(percent_encode_byte(b))),
            bytes => bytes.iter().for_each(|b| {
                out.push_str("%25");
                out.push_str(&percent_encode_byte(*b)[1..]);
            }),
        }
    }
    out
}

fn is_block(node: &Node) -> bool {
    match node {
        Node::Sequence(sequence) => !sequence.items.is_empty(),
        Node::Mapping(mapping) => !mapping.entries.is_empty(),
        _ => false,
    }
}

fn is_shorthand_suffix(suffix: &str) -> bool {
    !suffix.is_empty()
        && suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-#;/?:@&=+$_.~*'()".contains(c))
}

fn scalar_text(scalar: &Scalar, flow: bool) -> String {
    let text = scalar.value.as_str();
    match scalar.style {
        ScalarStyle::Plain if plain_allowed(text, flow) => text.to_string(),
        ScalarStyle::SingleQuoted if !text.chars().any(char::is_control) => {
            format!("'{}'", text.replace('\'', "''"))
        }
        _ => double_quoted(text),
    }
}

/// Whether `text` can be written as a plain scalar without changing its
/// characters. Says nothing about how the scalar will be typed on reload.
pub fn plain_allowed(text: &str, flow: bool) -> bool {
    let Some(first) = text.chars().next() else {
        return false;
    };
    if text.trim() != text || text.chars().any(|c| c.is_control() || c == '\u{feff}') {
        return false;
    }
    if "[]{},#&*!|>'\"%@`".contains(first) {
        return false;
    }
    if matches!(first, '-' | '?' | ':') && text[1..].chars().next().map_or(true, |c| c == ' ') {
        return false;
    }
    if text.starts_with("---") || text.starts_with("...") {
        return false;
    }
    if text.contains(": ") || text.contains(" #") || text.ends_with(':') {
        return false;
    }
    if flow && text.contains([',', '[', ']', '{', '}']) {
        return false;
    }
    true
}

fn double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            '\u{feff}' => out.push_str("\\uFEFF"),
            c if c.is_control() => {
                let code = c as u32;
                if code <= 0xff {
                    out.push_str(&format!("\\x{code:02X}"));
                } else {
                    out.push_str(&format!("\\u{code:04X}"));
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Version;
    use crate::tree::parser::parse_stream;
    use insta::assert_snapshot;

    fn doc(root: Node) -> Document {
        Document {
            version: Some(Version::LATEST),
            tags: vec![],
            root,
        }
    }

    #[test]
    fn emits_nested_block_structure() {
        let root = Node::mapping(vec![
            (Node::scalar("name"), Node::scalar("value")),
            (
                Node::scalar("list"),
                Node::sequence(vec![
                    Node::scalar("1"),
                    Node::mapping(vec![
                        (Node::scalar("a"), Node::scalar("x")),
                        (Node::scalar("b"), Node::scalar("y")),
                    ]),
                    Node::sequence(vec![Node::scalar("p"), Node::scalar("q")]),
                ]),
            ),
            (
                Node::scalar("nested"),
                Node::mapping(vec![(Node::scalar("k"), Node::sequence(vec![]))]),
            ),
        ]);
        assert_snapshot!(emit_document(&doc(root)), @r"
        %YAML 1.2
        ---
        name: value
        list:
        - 1
        - a: x
          b: y
        - - p
          - q
        nested:
          k: []
        ");
    }

    #[test]
    fn root_scalar_shares_the_document_marker_line() {
        let mut document = doc(Node::scalar("123"));
        document.version = None;
        assert_eq!(emit_document(&document), "--- 123\n");
    }

    #[test]
    fn anchors_aliases_and_tags() {
        let root = Node::mapping(vec![
            (
                Node::scalar("a"),
                Node::mapping(vec![(Node::scalar("x"), Node::scalar("1"))]).anchored("a1"),
            ),
            (Node::scalar("b"), Node::alias("a1")),
            (
                Node::scalar("c"),
                Node::Scalar(Scalar::plain("5").with_tag("http://www.w3.org/2001/XMLSchema#integer")),
            ),
            (
                Node::scalar("d"),
                Node::Scalar(Scalar::plain("v").with_tag("http://example.org/dt type")),
            ),
        ]);
        let mut document = doc(root);
        document.tags.push(TagDirective {
            handle: "!xsd!".into(),
            prefix: "http://www.w3.org/2001/XMLSchema#".into(),
        });
        assert_snapshot!(emit_document(&document), @r"
        %YAML 1.2
        %TAG !xsd! http://www.w3.org/2001/XMLSchema#
        ---
        a: &a1
          x: 1
        b: *a1
        c: !xsd!integer 5
        d: !<http://example.org/dt%20type> v
        ");
    }

    #[test]
    fn plain_requests_fall_back_to_double_quotes_only_when_illegal() {
        let quoted = |text: &str| scalar_text(&Scalar::plain(text), false);
        assert_eq!(quoted("true"), "true");
        assert_eq!(quoted("http://example.com/a"), "http://example.com/a");
        assert_eq!(quoted("@id"), "\"@id\"");
        assert_eq!(quoted("a: b"), "\"a: b\"");
        assert_eq!(quoted(""), "\"\"");
        assert_eq!(quoted("- x"), "\"- x\"");
        assert_eq!(quoted("-x"), "-x");
        assert_eq!(quoted("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(quoted(" padded"), "\" padded\"");
    }

    #[test]
    fn single_quotes_double_embedded_quotes() {
        let scalar = Scalar {
            style: ScalarStyle::SingleQuoted,
            ..Scalar::plain("it's")
        };
        assert_eq!(scalar_text(&scalar, false), "'it''s'");
    }

    #[test]
    fn emitted_text_parses_back_to_the_same_tree_shape() {
        let source = "a: &1\n  x: '1'\nb: *1\nc:\n- \"q: r\"\n- !!int 2\n";
        let stream = parse_stream(source).unwrap();
        let reparsed = parse_stream(&emit(&stream)).unwrap();
        assert_eq!(
            shape(&stream.documents[0].root),
            shape(&reparsed.documents[0].root)
        );
    }

    /// Render a tree without marks for comparison.
    fn shape(node: &Node) -> String {
        match node {
            Node::Scalar(s) => format!("{:?}/{:?}/{:?}", s.value, s.tag, s.style),
            Node::Alias(a) => format!("*{}", a.anchor),
            Node::Sequence(s) => format!(
                "[{}]",
                s.items.iter().map(shape).collect::<Vec<_>>().join(",")
            ),
            Node::Mapping(m) => format!(
                "{{{}}}",
                m.entries
                    .iter()
                    .map(|(k, v)| format!("{}={}", shape(k), shape(v)))
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        }
    }
}
