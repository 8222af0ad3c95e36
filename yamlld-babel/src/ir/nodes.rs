//! Core data structures for the Intermediate Representation (IR).
//!
//! Containers live in an arena owned by [`Ir`] and are referred to by
//! [`ContainerId`]. Two positions in a document may hold the same id, which
//! is how aliased structure is shared without copying, and how a container
//! can contain itself.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;

/// Index of a container inside an [`Ir`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(usize);

impl ContainerId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Base direction of a language-tagged literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "ltr" => Some(Direction::Ltr),
            "rtl" => Some(Direction::Rtl),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexical value with an optional datatype and/or language and direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub value: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
    pub direction: Option<Direction>,
}

impl Literal {
    /// A literal with no datatype, language or direction.
    pub fn plain(value: impl Into<String>) -> Self {
        Literal {
            value: value.into(),
            datatype: None,
            language: None,
            direction: None,
        }
    }

    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Literal {
            datatype: Some(datatype.into()),
            ..Literal::plain(value)
        }
    }

    pub fn language_tagged(
        value: impl Into<String>,
        language: Option<String>,
        direction: Option<Direction>,
    ) -> Self {
        Literal {
            language,
            direction,
            ..Literal::plain(value)
        }
    }

    /// True when a language or a direction is present.
    pub fn is_language_tagged(&self) -> bool {
        self.language.is_some() || self.direction.is_some()
    }
}

/// A single IR value.
///
/// Scalars are stored inline; sequences and mappings point into the arena of
/// the [`Ir`] that owns the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Literal(Literal),
    Sequence(ContainerId),
    Mapping(ContainerId),
}

impl Value {
    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Literal(_) => "literal",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn container(&self) -> Option<ContainerId> {
        match self {
            Value::Sequence(id) | Value::Mapping(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Literal> for Value {
    fn from(l: Literal) -> Self {
        Value::Literal(l)
    }
}

/// An arena slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Container {
    Sequence(Vec<Value>),
    Mapping(IndexMap<String, Value>),
}

/// One document's worth of IR: a root value plus the containers it reaches.
#[derive(Debug, Clone)]
pub struct Ir {
    containers: Vec<Container>,
    root: Value,
}

impl Default for Ir {
    fn default() -> Self {
        Ir::new(Value::Null)
    }
}

impl Ir {
    /// An IR holding a single scalar root. Containers are added with
    /// [`Ir::add_sequence`] / [`Ir::add_mapping`] and the root replaced with
    /// [`Ir::set_root`].
    pub fn new(root: Value) -> Self {
        Ir {
            containers: Vec::new(),
            root,
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn set_root(&mut self, root: Value) {
        self.root = root;
    }

    pub fn add_sequence(&mut self, items: Vec<Value>) -> Value {
        Value::Sequence(self.push(Container::Sequence(items)))
    }

    pub fn add_mapping(&mut self, entries: IndexMap<String, Value>) -> Value {
        Value::Mapping(self.push(Container::Mapping(entries)))
    }

    fn push(&mut self, container: Container) -> ContainerId {
        self.containers.push(container);
        ContainerId(self.containers.len() - 1)
    }

    pub fn container(&self, id: ContainerId) -> &Container {
        &self.containers[id.0]
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Items of a sequence. Panics if `id` does not name a sequence of this arena.
    pub fn sequence(&self, id: ContainerId) -> &[Value] {
        match &self.containers[id.0] {
            Container::Sequence(items) => items,
            Container::Mapping(_) => panic!("container {} is a mapping", id.0),
        }
    }

    /// Entries of a mapping. Panics if `id` does not name a mapping of this arena.
    pub fn mapping(&self, id: ContainerId) -> &IndexMap<String, Value> {
        match &self.containers[id.0] {
            Container::Mapping(entries) => entries,
            Container::Sequence(_) => panic!("container {} is a sequence", id.0),
        }
    }

    pub(crate) fn sequence_mut(&mut self, id: ContainerId) -> Option<&mut Vec<Value>> {
        match &mut self.containers[id.0] {
            Container::Sequence(items) => Some(items),
            Container::Mapping(_) => None,
        }
    }

    pub(crate) fn mapping_mut(&mut self, id: ContainerId) -> Option<&mut IndexMap<String, Value>> {
        match &mut self.containers[id.0] {
            Container::Mapping(entries) => Some(entries),
            Container::Sequence(_) => None,
        }
    }

    /// Look up `key` when the root is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match &self.root {
            Value::Mapping(id) => self.mapping(*id).get(key),
            _ => None,
        }
    }

    /// True if any container can reach itself.
    pub fn is_cyclic(&self) -> bool {
        let mut on_path = HashSet::new();
        let mut done = HashSet::new();
        self.reaches_cycle(&self.root, &mut on_path, &mut done)
    }

    fn reaches_cycle(
        &self,
        value: &Value,
        on_path: &mut HashSet<ContainerId>,
        done: &mut HashSet<ContainerId>,
    ) -> bool {
        let Some(id) = value.container() else {
            return false;
        };
        if on_path.contains(&id) {
            return true;
        }
        if !done.insert(id) {
            return false;
        }
        on_path.insert(id);
        let cyclic = self
            .children(id)
            .any(|child| self.reaches_cycle(child, on_path, done));
        on_path.remove(&id);
        cyclic
    }

    pub(crate) fn children(&self, id: ContainerId) -> Box<dyn Iterator<Item = &Value> + '_> {
        match &self.containers[id.0] {
            Container::Sequence(items) => Box::new(items.iter()),
            Container::Mapping(entries) => Box::new(entries.values()),
        }
    }

    /// Compare two documents by shape and content, ignoring container
    /// identity and arena layout. Cycles compare equal when they unfold to
    /// the same infinite tree.
    pub fn structurally_eq(&self, other: &Ir) -> bool {
        let mut assumed = HashSet::new();
        values_eq(self, &self.root, other, &other.root, &mut assumed)
    }
}

fn values_eq(
    left: &Ir,
    a: &Value,
    right: &Ir,
    b: &Value,
    assumed: &mut HashSet<(ContainerId, ContainerId)>,
) -> bool {
    match (a, b) {
        (Value::Sequence(x), Value::Sequence(y)) | (Value::Mapping(x), Value::Mapping(y)) => {
            if !assumed.insert((*x, *y)) {
                return true;
            }
            match (left.container(*x), right.container(*y)) {
                (Container::Sequence(xs), Container::Sequence(ys)) => {
                    xs.len() == ys.len()
                        && xs
                            .iter()
                            .zip(ys)
                            .all(|(p, q)| values_eq(left, p, right, q, assumed))
                }
                (Container::Mapping(xs), Container::Mapping(ys)) => {
                    xs.len() == ys.len()
                        && xs.iter().zip(ys).all(|((kp, p), (kq, q))| {
                            kp == kq && values_eq(left, p, right, q, assumed)
                        })
                }
                _ => false,
            }
        }
        _ => a == b,
    }
}

impl PartialEq for Ir {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other)
    }
}
