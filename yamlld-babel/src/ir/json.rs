//! Bridge between the IR and `serde_json` values.
//!
//! The linked-data algorithms operate on plain JSON. Literals cross the
//! bridge as JSON-LD value objects, and floats JSON cannot express
//! (infinities, NaN) become `xsd:double` value objects with their canonical
//! lexical form.

use super::nodes::{Container, ContainerId, Ir, Literal, Value};
use crate::error::Error;
use crate::vocab::{RDF_LANG_STRING, XSD_DOUBLE};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value as Json};
use std::collections::HashSet;

impl Ir {
    /// Build an IR document from JSON. Objects keep their key order.
    pub fn from_json(json: &Json) -> Ir {
        let mut ir = Ir::default();
        let root = import(&mut ir, json);
        ir.set_root(root);
        ir
    }

    /// Convert to JSON. Shared containers are copied; cycles are rejected.
    pub fn to_json(&self) -> Result<Json, Error> {
        let mut on_path = HashSet::new();
        export(self, self.root(), &mut on_path)
    }

    /// Rebuild this document with every shared container replaced by an
    /// independent copy. Fails on cycles.
    pub fn unshared(&self) -> Result<Ir, Error> {
        let mut out = Ir::default();
        let mut on_path = HashSet::new();
        let root = copy_into(self, self.root(), &mut out, &mut on_path)?;
        out.set_root(root);
        Ok(out)
    }
}

fn import(ir: &mut Ir, json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::String(s.clone()),
        Json::Array(items) => {
            let items = items.iter().map(|item| import(ir, item)).collect();
            ir.add_sequence(items)
        }
        Json::Object(entries) => {
            let entries: IndexMap<String, Value> = entries
                .iter()
                .map(|(k, v)| (k.clone(), import(ir, v)))
                .collect();
            ir.add_mapping(entries)
        }
    }
}

fn export(ir: &Ir, value: &Value, on_path: &mut HashSet<ContainerId>) -> Result<Json, Error> {
    Ok(match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Integer(i) => Json::Number((*i).into()),
        Value::Float(f) => match Number::from_f64(*f) {
            Some(n) => Json::Number(n),
            None => literal_to_json(&Literal::typed(non_finite_lexical(*f), XSD_DOUBLE)),
        },
        Value::String(s) => Json::String(s.clone()),
        Value::Literal(literal) => literal_to_json(literal),
        Value::Sequence(id) | Value::Mapping(id) => {
            if !on_path.insert(*id) {
                return Err(Error::Cyclic { context: "in JSON" });
            }
            let json = match ir.container(*id) {
                Container::Sequence(items) => Json::Array(
                    items
                        .iter()
                        .map(|item| export(ir, item, on_path))
                        .collect::<Result<_, _>>()?,
                ),
                Container::Mapping(entries) => {
                    let mut map = Map::new();
                    for (key, item) in entries {
                        map.insert(key.clone(), export(ir, item, on_path)?);
                    }
                    Json::Object(map)
                }
            };
            on_path.remove(id);
            json
        }
    })
}

fn copy_into(
    src: &Ir,
    value: &Value,
    dst: &mut Ir,
    on_path: &mut HashSet<ContainerId>,
) -> Result<Value, Error> {
    let Some(id) = value.container() else {
        return Ok(value.clone());
    };
    if !on_path.insert(id) {
        return Err(Error::Cyclic {
            context: "without aliases",
        });
    }
    let copied = match src.container(id) {
        Container::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(copy_into(src, item, dst, on_path)?);
            }
            dst.add_sequence(out)
        }
        Container::Mapping(entries) => {
            let mut out = IndexMap::with_capacity(entries.len());
            for (key, item) in entries {
                out.insert(key.clone(), copy_into(src, item, dst, on_path)?);
            }
            dst.add_mapping(out)
        }
    };
    on_path.remove(&id);
    Ok(copied)
}

/// The JSON-LD value object for a literal.
pub fn literal_to_json(literal: &Literal) -> Json {
    let mut map = Map::new();
    map.insert("@value".into(), Json::String(literal.value.clone()));
    if let Some(language) = &literal.language {
        map.insert("@language".into(), Json::String(language.clone()));
    }
    if let Some(direction) = literal.direction {
        map.insert("@direction".into(), Json::String(direction.to_string()));
    }
    match literal.datatype.as_deref() {
        Some(RDF_LANG_STRING) if literal.language.is_some() => {}
        Some(datatype) if !literal.is_language_tagged() => {
            map.insert("@type".into(), Json::String(datatype.to_string()));
        }
        _ => {}
    }
    Json::Object(map)
}

fn non_finite_lexical(f: f64) -> &'static str {
    if f.is_nan() {
        "NaN"
    } else if f > 0.0 {
        "INF"
    } else {
        "-INF"
    }
}
