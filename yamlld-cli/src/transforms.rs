//! Inspection transforms
//!
//! The `inspect` command shows one of two stages of a YAML-LD file:
//!
//! - `tree`: the source node tree as the parser built it, before any
//!   resolution. Tags, anchors and aliases are shown as written.
//! - `ir-json`: the document after loading, printed through the JSON bridge
//!   of the IR. This is what the linked-data algorithms would see.
//!
//! The tree view encodes nesting as indentation, 2 columns per level:
//!
//!     ⧉ document 1 %YAML 1.2
//!     ├─ % !xsd! http://www.w3.org/2001/XMLSchema#
//!     └─ ≔ mapping (2 entries)
//!       ├─ • name
//!       │ └─ ◦ Alice
//!       └─ • tags
//!         └─ ☰ sequence (1 item) &a1
//!           └─ ◦ "x"
//!
//! Icons
//!     Document: ⧉
//!     TagDirective: %
//!     Mapping: ≔
//!     Entry: •
//!     Sequence: ☰
//!     Scalar: ◦
//!     Alias: ⊕

use yamlld_babel::tree::{parser, Document, Node, ScalarStyle, Stream};
use yamlld_babel::{load_stream, Options};

/// All available inspection transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["tree", "ir-json"];

const LABEL_WIDTH: usize = 30;

/// Execute a named transform on a source file
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    options: &Options,
    show_linum: bool,
) -> Result<String, String> {
    match transform_name {
        "tree" => {
            let stream = parser::parse_stream(source).map_err(|e| e.to_string())?;
            Ok(to_treeviz_str(&stream, show_linum))
        }
        "ir-json" => {
            let documents = load_stream(source, options).map_err(|e| e.to_string())?;
            let mut values = documents
                .iter()
                .map(|ir| ir.to_json())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| e.to_string())?;
            let json = if values.len() == 1 {
                values.remove(0)
            } else {
                serde_json::Value::Array(values)
            };
            let mut text = serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?;
            text.push('\n');
            Ok(text)
        }
        other => Err(format!(
            "Unknown transform '{other}'. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

/// Render a parsed stream as an indented tree, one document after another
pub fn to_treeviz_str(stream: &Stream, show_linum: bool) -> String {
    let mut output = String::new();
    for (index, document) in stream.documents.iter().enumerate() {
        format_document(&mut output, document, index + 1, show_linum);
    }
    output
}

fn format_document(output: &mut String, document: &Document, number: usize, show_linum: bool) {
    let mut label = format!("document {number}");
    if let Some(version) = document.version {
        label.push_str(&format!(" %YAML {version}"));
    }
    push_line(output, show_linum.then_some(None), "", "⧉", &label);

    // The root node always comes last.
    for directive in &document.tags {
        push_line(
            output,
            show_linum.then_some(None),
            "├─",
            "%",
            &format!("{} {}", directive.handle, directive.prefix),
        );
    }
    format_node(output, &document.root, "", true, show_linum);
}

fn format_node(output: &mut String, node: &Node, prefix: &str, is_last: bool, show_linum: bool) {
    let connector = format!("{prefix}{}", if is_last { "└─" } else { "├─" });
    let child_prefix = format!("{prefix}{}", if is_last { "  " } else { "│ " });
    let linum = show_linum.then(|| node.mark().map(|m| m.line));

    match node {
        Node::Mapping(mapping) => {
            let label = with_props(
                format!("mapping ({})", plural(mapping.entries.len(), "entry", "entries")),
                node,
            );
            push_line(output, linum, &connector, "≔", &label);
            let count = mapping.entries.len();
            for (i, (key, value)) in mapping.entries.iter().enumerate() {
                format_entry(output, key, value, &child_prefix, i + 1 == count, show_linum);
            }
        }
        Node::Sequence(sequence) => {
            let label = with_props(
                format!("sequence ({})", plural(sequence.items.len(), "item", "items")),
                node,
            );
            push_line(output, linum, &connector, "☰", &label);
            let count = sequence.items.len();
            for (i, item) in sequence.items.iter().enumerate() {
                format_node(output, item, &child_prefix, i + 1 == count, show_linum);
            }
        }
        Node::Scalar(scalar) => {
            let text = truncate(&scalar.value);
            let label = match scalar.style {
                ScalarStyle::Plain => text,
                ScalarStyle::SingleQuoted => format!("'{text}'"),
                ScalarStyle::DoubleQuoted => format!("\"{text}\""),
                ScalarStyle::Literal => format!("|{text}"),
                ScalarStyle::Folded => format!(">{text}"),
            };
            push_line(output, linum, &connector, "◦", &with_props(label, node));
        }
        Node::Alias(alias) => {
            push_line(output, linum, &connector, "⊕", &format!("*{}", alias.anchor));
        }
    }
}

/// Scalar keys become the entry label; other keys are shown as a child.
fn format_entry(
    output: &mut String,
    key: &Node,
    value: &Node,
    prefix: &str,
    is_last: bool,
    show_linum: bool,
) {
    let connector = format!("{prefix}{}", if is_last { "└─" } else { "├─" });
    let child_prefix = format!("{prefix}{}", if is_last { "  " } else { "│ " });
    let linum = show_linum.then(|| key.mark().map(|m| m.line));

    match key {
        Node::Scalar(scalar) if scalar.tag.is_none() && scalar.anchor.is_none() => {
            push_line(output, linum, &connector, "•", &truncate(&scalar.value));
        }
        _ => {
            push_line(output, linum, &connector, "•", &format!("? {}", key.kind()));
            format_node(output, key, &child_prefix, false, show_linum);
        }
    }
    format_node(output, value, &child_prefix, true, show_linum);
}

fn push_line(
    output: &mut String,
    linum: Option<Option<usize>>,
    connector: &str,
    icon: &str,
    label: &str,
) {
    match linum {
        Some(Some(line)) => output.push_str(&format!("{line:02} ")),
        Some(None) => output.push_str("   "),
        None => {}
    }
    if connector.is_empty() {
        output.push_str(&format!("{icon} {label}\n"));
    } else {
        output.push_str(&format!("{connector} {icon} {label}\n"));
    }
}

fn with_props(mut label: String, node: &Node) -> String {
    if let Some(tag) = node.tag() {
        label.push_str(&format!(" !<{}>", tag.as_str()));
    }
    if let Some(anchor) = node.anchor() {
        label.push_str(&format!(" &{anchor}"));
    }
    label
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

fn truncate(text: &str) -> String {
    let escaped = text.escape_debug().to_string();
    if escaped.chars().count() <= LABEL_WIDTH {
        escaped
    } else {
        let mut short: String = escaped.chars().take(LABEL_WIDTH - 1).collect();
        short.push('…');
        short
    }
}
