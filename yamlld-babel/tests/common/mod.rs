//! Helpers shared by the integration tests.

use indexmap::IndexMap;
use yamlld_babel::{Ir, Value};

/// Build a mapping container from `(key, value)` pairs.
pub fn mapping(ir: &mut Ir, entries: Vec<(&str, Value)>) -> Value {
    let entries: IndexMap<String, Value> = entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    ir.add_mapping(entries)
}

/// The root mapping's entries, in order.
pub fn root_entries(ir: &Ir) -> Vec<(String, Value)> {
    match ir.root() {
        Value::Mapping(id) => ir
            .mapping(*id)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        other => panic!("expected a mapping root, got {other:?}"),
    }
}
