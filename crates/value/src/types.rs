//! Core value-graph type definitions
//!
//! Key design principles:
//! 1. Primitives are plain enum payloads; text is a shared `Rc<str>` handle
//! 2. Containers are `Rc<RefCell<..>>` handles: `Clone` copies the handle,
//!    so assignment aliases, exactly like the object references this models
//! 3. Classification is one tag read (`ValueKind`), never a chain of probes
//! 4. Mappings keep insertion order (IndexMap) for deterministic iteration

use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Result, ValueError};

/// Shared handle to an ordered sequence
pub type SeqHandle = Rc<RefCell<Vec<Value>>>;

/// Shared handle to a keyed mapping
pub type MapHandle = Rc<RefCell<IndexMap<String, Value>>>;

/// Classification tag for a value, computed once before dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Undefined,
    Bool,
    Number,
    Str,
    Seq,
    Map,
}

impl ValueKind {
    /// True for kinds with no internal structure
    pub fn is_primitive(self) -> bool {
        !matches!(self, ValueKind::Seq | ValueKind::Map)
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Undefined => "undefined",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::Str => "string",
            ValueKind::Seq => "sequence",
            ValueKind::Map => "mapping",
        };
        f.write_str(name)
    }
}

/// A node of a dynamic value graph
///
/// Design philosophy:
/// - Primitives are immutable and compare by value
/// - Containers have reference semantics: `Clone` is a handle copy, two
///   copies observe each other's mutations
/// - Graphs may be cyclic; every walk in this crate (deep cloning,
///   equality, rendering, JSON lowering) terminates on cycles
///
/// A cyclic graph keeps itself alive: `Rc` does not collect reference
/// cycles, so a graph holding a back-edge is only freed once the cycle is
/// broken by hand (replace the back-edge with `Value::Null`).
///
/// `Debug`/`Display` and `PartialEq` are hand-written elsewhere in the
/// crate. Derived ones would recurse forever on a self-referential graph.
///
/// There are exactly seven kinds. Dates, patterns, callables and the other
/// special container kinds of dynamic platforms have no representation
/// here; data that needs them must be lowered to these kinds first.
#[derive(Clone, Default)]
pub enum Value {
    Null,
    #[default]
    Undefined,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Seq(SeqHandle),
    Map(MapHandle),
}

impl Value {
    pub fn null() -> Self {
        Value::Null
    }

    pub fn undefined() -> Self {
        Value::Undefined
    }

    pub fn boolean(value: bool) -> Self {
        Value::Bool(value)
    }

    pub fn number(value: f64) -> Self {
        Value::Number(value)
    }

    pub fn string(value: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(value.as_ref()))
    }

    /// Create a new empty sequence container
    pub fn new_seq() -> Self {
        Value::Seq(Rc::new(RefCell::new(Vec::new())))
    }

    /// Create a new empty mapping container
    pub fn new_map() -> Self {
        Value::Map(Rc::new(RefCell::new(IndexMap::new())))
    }

    /// Create a sequence from items
    pub fn seq_from(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Seq(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// Create a mapping from entries, keeping their order
    pub fn map_from<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map: IndexMap<String, Value> = entries
            .into_iter()
            .map(|(key, item)| (key.into(), item))
            .collect();
        Value::Map(Rc::new(RefCell::new(map)))
    }

    /// Classification tag
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Undefined => ValueKind::Undefined,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::Str(_) => ValueKind::Str,
            Value::Seq(_) => ValueKind::Seq,
            Value::Map(_) => ValueKind::Map,
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.kind().is_primitive()
    }

    pub fn is_container(&self) -> bool {
        !self.is_primitive()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_seq(&self) -> bool {
        matches!(self, Value::Seq(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Underlying sequence handle, for direct borrow access
    pub fn as_seq(&self) -> Option<&SeqHandle> {
        match self {
            Value::Seq(cell) => Some(cell),
            _ => None,
        }
    }

    /// Underlying mapping handle, for direct borrow access
    pub fn as_map(&self) -> Option<&MapHandle> {
        match self {
            Value::Map(cell) => Some(cell),
            _ => None,
        }
    }

    /// Container identity comparison (pointer equality)
    ///
    /// Primitives carry no identity and always compare false here, even
    /// when equal by value.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Seq(a), Value::Seq(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Address of the container allocation, used as an identity key
    pub(crate) fn container_addr(&self) -> Option<usize> {
        match self {
            Value::Seq(cell) => Some(Rc::as_ptr(cell) as usize),
            Value::Map(cell) => Some(Rc::as_ptr(cell) as usize),
            _ => None,
        }
    }

    /// Number of entries for containers, `None` for primitives
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::Seq(cell) => Some(cell.borrow().len()),
            Value::Map(cell) => Some(cell.borrow().len()),
            _ => None,
        }
    }

    /// Append to a sequence
    pub fn push(&self, item: Value) -> Result<()> {
        match self {
            Value::Seq(cell) => {
                cell.borrow_mut().push(item);
                Ok(())
            }
            other => Err(ValueError::NotASequence {
                actual: other.kind(),
            }),
        }
    }

    /// Element of a sequence by position (handle copy, cheap)
    pub fn index(&self, index: usize) -> Option<Value> {
        match self {
            Value::Seq(cell) => cell.borrow().get(index).cloned(),
            _ => None,
        }
    }

    /// Replace an element of a sequence in place
    pub fn set_index(&self, index: usize, item: Value) -> Result<()> {
        match self {
            Value::Seq(cell) => {
                let mut items = cell.borrow_mut();
                let len = items.len();
                match items.get_mut(index) {
                    Some(slot) => {
                        *slot = item;
                        Ok(())
                    }
                    None => Err(ValueError::IndexOutOfBounds { index, len }),
                }
            }
            other => Err(ValueError::NotASequence {
                actual: other.kind(),
            }),
        }
    }

    /// Insert into a mapping, returning the previous entry if any
    pub fn insert(&self, key: impl Into<String>, item: Value) -> Result<Option<Value>> {
        match self {
            Value::Map(cell) => Ok(cell.borrow_mut().insert(key.into(), item)),
            other => Err(ValueError::NotAMapping {
                actual: other.kind(),
            }),
        }
    }

    /// Mapping entry by key (handle copy, cheap)
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Value::Map(cell) => cell.borrow().get(key).cloned(),
            _ => None,
        }
    }

    /// Keys of a mapping, in insertion order
    pub fn keys(&self) -> Option<Vec<String>> {
        match self {
            Value::Map(cell) => Some(cell.borrow().keys().cloned().collect()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(Rc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(Rc::from(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Seq(Rc::new(RefCell::new(value)))
    }
}
