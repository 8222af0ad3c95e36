//! Behaviour of the transform on small, hand-written documents.

use crate::common::{mapping, root_entries};
use insta::assert_snapshot;
use yamlld_babel::tree::{Document, Node, Scalar, Stream};
use yamlld_babel::vocab::XSD_DATE;
use yamlld_babel::{dump, load, load_stream, load_tree, Error, Ir, Literal, Options, Value};

fn single(node: Node) -> Stream {
    Stream::single(Document::new(node))
}

#[test]
fn plain_digits_load_as_integer() {
    let ir = load_tree(&single(Node::scalar("123")), &Options::json()).unwrap();
    assert_eq!(ir.root(), &Value::Integer(123));
}

#[test]
fn quoted_digits_stay_a_string() {
    let ir = load_tree(&single(Node::Scalar(Scalar::quoted("123"))), &Options::json()).unwrap();
    assert_eq!(ir.root(), &Value::from("123"));
}

#[test]
fn xsd_tag_is_dropped_under_json_and_kept_under_extended() {
    let tree = single(Node::Scalar(Scalar::plain("2022-08-17").with_tag(XSD_DATE)));

    let ir = load_tree(&tree, &Options::json()).unwrap();
    assert_eq!(ir.root(), &Value::from("2022-08-17"));

    let ir = load_tree(&tree, &Options::extended()).unwrap();
    assert_eq!(
        ir.root(),
        &Value::Literal(Literal::typed("2022-08-17", XSD_DATE))
    );
}

#[test]
fn dangling_alias_fails_under_both_profiles() {
    let tree = single(Node::mapping(vec![(
        Node::scalar("a"),
        Node::alias("never-defined"),
    )]));
    for options in [Options::json(), Options::extended()] {
        let err = load_tree(&tree, &options).unwrap_err();
        assert!(matches!(err, Error::DanglingAlias { .. }), "{err}");
    }
}

#[test]
fn dangling_alias_in_text_names_the_anchor() {
    let err = load("a: &known 1\nb: *missing\n", &Options::extended()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "alias references undefined anchor `missing` (document 0, line 2, column 4)"
    );
}

#[test]
fn forward_references_are_dangling() {
    let tree = single(Node::sequence(vec![
        Node::alias("x"),
        Node::scalar("1").anchored("x"),
    ]));
    let err = load_tree(&tree, &Options::extended()).unwrap_err();
    assert!(matches!(err, Error::DanglingAlias { .. }), "{err}");
}

#[test]
fn non_string_keys_fail_regardless_of_profile() {
    for source in ["1: a\n", "true: a\n", "~: a\n", "2.5: a\n"] {
        for options in [Options::json(), Options::extended()] {
            let err = load(source, &options).unwrap_err();
            assert!(matches!(err, Error::MappingKey { .. }), "{source}: {err}");
        }
    }
}

#[test]
fn aliases_are_gated_by_profile() {
    let source = "base: &b\n  x: 1\ncopy: *b\n";
    let err = load(source, &Options::json()).unwrap_err();
    assert!(matches!(err, Error::Profile { .. }), "{err}");

    let ir = load(source, &Options::extended()).unwrap();
    let entries = root_entries(&ir);
    assert_eq!(entries[0].1.container(), entries[1].1.container());
}

#[test]
fn idempotent_json_dump() {
    let mut ir = Ir::default();
    let inner = mapping(&mut ir, vec![("@id", Value::from("http://example.com/c"))]);
    let root = mapping(
        &mut ir,
        vec![
            ("@id", Value::from("http://example.com/a")),
            ("http://example.com/b", inner),
        ],
    );
    ir.set_root(root);

    let first = dump(&ir, &Options::json()).unwrap();
    let second = dump(&ir, &Options::json()).unwrap();
    assert_eq!(first, second);
    assert_snapshot!(first, @r#"
    %YAML 1.2
    ---
    "@id": http://example.com/a
    http://example.com/b:
      "@id": http://example.com/c
    "#);
}

#[test]
fn strings_that_would_change_type_are_quoted() {
    let mut ir = Ir::default();
    let root = ir.add_sequence(vec![
        Value::from("123"),
        Value::from("true"),
        Value::from("null"),
        Value::from(""),
        Value::from("2022-08-17"),
        Value::from("plain text"),
        Value::Float(3.0),
        Value::Null,
    ]);
    ir.set_root(root);
    assert_snapshot!(dump(&ir, &Options::json()).unwrap(), @r#"
    %YAML 1.2
    ---
    - "123"
    - "true"
    - "null"
    - ""
    - 2022-08-17
    - plain text
    - 3.0
    - null
    "#);
}

#[test]
fn multi_document_streams() {
    let docs = load_stream("--- a\n--- [1, 2]\n--- {k: v}\n", &Options::json()).unwrap();
    assert_eq!(docs.len(), 3);
    assert_eq!(docs[0].root(), &Value::from("a"));
    assert_eq!(docs[2].get("k"), Some(&Value::from("v")));
}

#[test]
fn errors_name_the_document() {
    let err = load_stream("--- a\n--- !!int x\n", &Options::json()).unwrap_err();
    let location = err.location().unwrap();
    assert_eq!(location.document, 1);
    assert!(err.to_string().contains("document 1"), "{err}");
}

#[test]
fn unsupported_tag_under_json() {
    let err = load("!!binary aGVsbG8=\n", &Options::json()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedTag { .. }), "{err}");
}
