//! Dumping under `extended` and loading back.

use crate::common::{mapping, root_entries};
use insta::assert_snapshot;
use yamlld_babel::vocab::{XSD_DATE, XSD_INTEGER, XSD_STRING};
use yamlld_babel::{dump, load, Direction, Error, Ir, Literal, Options, Value};

fn person() -> Ir {
    let mut ir = Ir::default();
    let shared = ir.add_sequence(vec![Value::Integer(1)]);
    let root = mapping(
        &mut ir,
        vec![
            ("@id", Value::from("http://example.com/a")),
            (
                "http://schema.org/birthDate",
                Value::Literal(Literal::typed("2022-08-17", XSD_DATE)),
            ),
            (
                "http://schema.org/name",
                Value::Literal(Literal::language_tagged(
                    "Alice",
                    Some("en".into()),
                    Some(Direction::Ltr),
                )),
            ),
            ("a", shared.clone()),
            ("b", shared),
        ],
    );
    ir.set_root(root);
    ir
}

#[test]
fn extended_dump_declares_prefixes_and_anchors() {
    assert_snapshot!(dump(&person(), &Options::extended()).unwrap(), @r#"
    %YAML 1.2
    %TAG !xsd! http://www.w3.org/2001/XMLSchema#
    ---
    "@id": http://example.com/a
    http://schema.org/birthDate: !xsd!date 2022-08-17
    http://schema.org/name: !<https://www.w3.org/ns/i18n#en_ltr> Alice
    a: &a1
    - 1
    b: *a1
    "#);
}

#[test]
fn extended_dump_loads_back_with_sharing() {
    let ir = person();
    let text = dump(&ir, &Options::extended()).unwrap();
    let loaded = load(&text, &Options::extended()).unwrap();
    assert_eq!(loaded, ir);

    let entries = root_entries(&loaded);
    assert_eq!(entries[3].1.container(), entries[4].1.container());
}

#[test]
fn literals_from_several_vocabularies_load_back() {
    let mut ir = Ir::default();
    let root = ir.add_sequence(vec![
        Value::Literal(Literal::typed("2024-01-01", "http://schema.org/Date")),
        Value::Literal(Literal::typed("2022-08-17", XSD_DATE)),
        Value::Literal(Literal::typed("x", "http://www.w3.org/2002/07/owl#real")),
    ]);
    ir.set_root(root);

    let text = dump(&ir, &Options::extended()).unwrap();
    assert_eq!(text.matches("%TAG").count(), 1, "{text}");
    assert!(text.contains("- !schema!Date 2024-01-01"), "{text}");
    assert!(text.contains("- !<http://www.w3.org/2001/XMLSchema#date> 2022-08-17"), "{text}");
    assert_eq!(load(&text, &Options::extended()).unwrap(), ir);
}

#[test]
fn json_dump_flattens_sharing_and_types() {
    let ir = person();
    let text = dump(&ir, &Options::json()).unwrap();
    assert!(!text.contains("%TAG"), "{text}");
    assert!(!text.contains('&'), "{text}");

    let loaded = load(&text, &Options::json()).unwrap();
    let entries = root_entries(&loaded);
    assert_eq!(entries[1].1, Value::from("2022-08-17"));
    assert_eq!(entries[2].1, Value::from("Alice"));
    assert_ne!(entries[3].1.container(), entries[4].1.container());
}

#[test]
fn cyclic_ir_needs_extended() {
    let again = load("--- &r\nname: loop\nself: *r\n", &Options::extended()).unwrap();
    assert!(again.is_cyclic());

    let err = dump(&again, &Options::json()).unwrap_err();
    assert!(matches!(err, Error::Cyclic { .. }), "{err}");

    let text = dump(&again, &Options::extended()).unwrap();
    assert_eq!(text, "%YAML 1.2\n--- &a1\nname: loop\nself: *a1\n");
    assert_eq!(load(&text, &Options::extended()).unwrap(), again);
}

#[test]
fn typed_literal_keeps_its_tag_even_when_it_looks_like_a_number() {
    let ir = Ir::new(Value::Literal(Literal::typed("123", XSD_INTEGER)));
    let text = dump(&ir, &Options::extended()).unwrap();
    assert_eq!(
        text,
        "%YAML 1.2\n%TAG !xsd! http://www.w3.org/2001/XMLSchema#\n--- !xsd!integer 123\n"
    );
    assert_eq!(load(&text, &Options::extended()).unwrap(), ir);
}

/// A string-typed literal is written without a tag and without quotes, so
/// `true` reads back as a boolean.
#[test]
fn string_typed_literal_is_written_plain() {
    let ir = Ir::new(Value::Literal(Literal::typed("true", XSD_STRING)));
    let text = dump(&ir, &Options::extended()).unwrap();
    assert_eq!(text, "%YAML 1.2\n--- true\n");
    assert_eq!(load(&text, &Options::json()).unwrap().root(), &Value::Bool(true));
}

#[test]
fn unknown_datatypes_are_written_verbatim() {
    let ir = Ir::new(Value::Literal(Literal::typed("x", "http://example.org/types#thing")));
    let text = dump(&ir, &Options::extended()).unwrap();
    assert_eq!(text, "%YAML 1.2\n--- !<http://example.org/types#thing> x\n");
    assert_eq!(load(&text, &Options::extended()).unwrap(), ir);
}

#[test]
fn non_ascii_datatypes_are_percent_encoded() {
    let ir = Ir::new(Value::Literal(Literal::typed("x", "http://example.org/t\u{e9}")));
    let text = dump(&ir, &Options::extended()).unwrap();
    assert_eq!(text, "%YAML 1.2\n--- !<http://example.org/t%C3%A9> x\n");
    assert_eq!(load(&text, &Options::extended()).unwrap(), ir);
}

#[test]
fn datatypes_beyond_two_byte_utf8_and_percent_signs_load_back() {
    for datatype in [
        "http://example.org/\u{20ac}",
        "http://example.org/\u{1f600}",
        "http://example.org/\u{5d0}\u{627}",
        "http://example.org/a%20b",
    ] {
        let ir = Ir::new(Value::Literal(Literal::typed("x", datatype)));
        let text = dump(&ir, &Options::extended()).unwrap();
        assert_eq!(load(&text, &Options::extended()).unwrap(), ir, "{text}");
    }

    let ir = Ir::new(Value::Literal(Literal::typed("x", "http://example.org/\u{20ac}")));
    assert_eq!(
        dump(&ir, &Options::extended()).unwrap(),
        "%YAML 1.2\n--- !<http://example.org/%25E2%2582%25AC> x\n"
    );
}

#[test]
fn datatype_with_control_character_is_rejected() {
    let ir = Ir::new(Value::Literal(Literal::typed("x", "http://example.org/\u{1}")));
    let err = dump(&ir, &Options::extended()).unwrap_err();
    assert!(matches!(err, Error::InvalidTag { .. }), "{err}");
}

#[test]
fn version_override_and_disabled_prefixes() {
    let mut options = Options::extended().with_version(yamlld_babel::Version::new(1, 1));
    options.tag_prefixes = false;
    let ir = Ir::new(Value::Literal(Literal::typed("2022-08-17", XSD_DATE)));
    assert_snapshot!(dump(&ir, &options).unwrap(), @"
    %YAML 1.1
    --- !<http://www.w3.org/2001/XMLSchema#date> 2022-08-17
    ");
}
