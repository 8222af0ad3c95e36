//! Property-based tests for the load/dump transform.
//!
//! These tests use proptest to generate IR trees and check the round-trip,
//! idempotence and profile-monotonicity invariants.

use indexmap::IndexMap;
use proptest::prelude::*;
use yamlld_babel::vocab::{XSD_DATE, XSD_INTEGER};
use yamlld_babel::{dump, load, Direction, Ir, Literal, Options, Value};

/// An owned IR tree, turned into an arena [`Ir`] by [`build`].
#[derive(Debug, Clone)]
enum Tree {
    Leaf(Value),
    Seq(Vec<Tree>),
    Map(Vec<(String, Tree)>),
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 :#@'\"_.,!&*?|>%~\\[\\]{}\\-é漢]{0,12}"
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (-1.0e6..1.0e6f64).prop_map(Value::Float),
        text().prop_map(Value::String),
    ]
}

/// Literals that always carry a tag under `extended`, so their type
/// survives a dump.
fn literal() -> impl Strategy<Value = Value> {
    let datatype = prop_oneof![
        Just(XSD_DATE.to_string()),
        Just(XSD_INTEGER.to_string()),
        Just("http://schema.org/Date".to_string()),
        Just("http://example.org/custom#type".to_string()),
    ];
    let direction = prop_oneof![Just(None), Just(Some(Direction::Ltr)), Just(Some(Direction::Rtl))];
    prop_oneof![
        (text(), datatype).prop_map(|(value, dt)| Value::Literal(Literal::typed(value, dt))),
        (text(), prop_oneof![Just("en"), Just("fr-CA")], direction).prop_map(
            |(value, language, direction)| {
                Value::Literal(Literal::language_tagged(
                    value,
                    Some(language.to_string()),
                    direction,
                ))
            }
        ),
    ]
}

fn tree(leaf: BoxedStrategy<Value>) -> impl Strategy<Value = Tree> {
    leaf.prop_map(Tree::Leaf).prop_recursive(4, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Tree::Seq),
            prop::collection::vec((text(), inner), 0..5).prop_map(Tree::Map),
        ]
    })
}

fn plain_tree() -> impl Strategy<Value = Tree> {
    tree(scalar().boxed())
}

fn typed_tree() -> impl Strategy<Value = Tree> {
    tree(prop_oneof![3 => scalar(), 1 => literal()].boxed())
}

fn build(tree: &Tree) -> Ir {
    let mut ir = Ir::default();
    let root = insert(&mut ir, tree);
    ir.set_root(root);
    ir
}

fn insert(ir: &mut Ir, tree: &Tree) -> Value {
    match tree {
        Tree::Leaf(value) => value.clone(),
        Tree::Seq(items) => {
            let items = items.iter().map(|item| insert(ir, item)).collect();
            ir.add_sequence(items)
        }
        Tree::Map(entries) => {
            let mut map = IndexMap::new();
            for (key, value) in entries {
                let value = insert(ir, value);
                map.insert(key.clone(), value);
            }
            ir.add_mapping(map)
        }
    }
}

proptest! {
    /// load(dump(ir, extended), extended) == ir
    #[test]
    fn extended_round_trip(tree in typed_tree()) {
        let ir = build(&tree);
        let text = dump(&ir, &Options::extended()).unwrap();
        let loaded = load(&text, &Options::extended());
        prop_assert!(loaded.is_ok(), "{}\n{:?}", text, loaded);
        prop_assert_eq!(loaded.unwrap(), ir, "{}", text);
    }

    /// Plain JSON data survives the json profile as well.
    #[test]
    fn json_round_trip(tree in plain_tree()) {
        let ir = build(&tree);
        let text = dump(&ir, &Options::json()).unwrap();
        let loaded = load(&text, &Options::json()).unwrap();
        prop_assert_eq!(loaded, ir, "{}", text);
    }

    /// Dumping is deterministic, and a reloaded dump dumps to the same text.
    #[test]
    fn dump_is_idempotent(tree in typed_tree()) {
        let ir = build(&tree);
        let options = Options::extended();
        let first = dump(&ir, &options).unwrap();
        prop_assert_eq!(&first, &dump(&ir, &options).unwrap());
        let reloaded = load(&first, &options).unwrap();
        prop_assert_eq!(first, dump(&reloaded, &options).unwrap());
    }

    /// Anything the json profile accepts, extended accepts with the same result.
    #[test]
    fn json_profile_is_monotone(tree in plain_tree()) {
        let text = dump(&build(&tree), &Options::json()).unwrap();
        let strict = load(&text, &Options::json()).unwrap();
        let extended = load(&text, &Options::extended()).unwrap();
        prop_assert_eq!(strict, extended);
    }

    /// Every non-string key is rejected, under both profiles.
    #[test]
    fn non_string_keys_are_rejected(key in prop_oneof![
        any::<i64>().prop_map(|i| i.to_string()),
        Just("true".to_string()),
        Just("null".to_string()),
        Just("1.5".to_string()),
    ]) {
        let source = format!("{key}: value\n");
        for options in [Options::json(), Options::extended()] {
            let loaded = load(&source, &options);
            let is_key_error = matches!(loaded, Err(yamlld_babel::Error::MappingKey { .. }));
            prop_assert!(is_key_error, "{}", source);
        }
    }
}
