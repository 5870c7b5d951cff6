//! JSON interop - build value graphs from serde_json and lower them back
//!
//! Import is total: every JSON document maps onto the value model, and it
//! never produces `Undefined`. Export is not: JSON has no cycles, so a
//! back-edge is a typed error naming the path where it was found. The
//! non-JSON corners lower the way the platform this models would stringify
//! them: `Undefined` entries are dropped from mappings, become `null`
//! inside sequences and at the root, and non-finite numbers become `null`.

use ahash::AHashSet;
use smallvec::SmallVec;
use std::rc::Rc;

use crate::error::{Result, ValueError};
use crate::types::Value;

/// One step of the path from the root to the value being lowered
#[derive(Debug, Clone)]
enum PathSegment {
    Key(String),
    Index(usize),
}

type PathStack = SmallVec<[PathSegment; 8]>;

fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                out.push('.');
                out.push_str(key);
            }
            PathSegment::Index(index) => {
                out.push_str(&format!("[{}]", index));
            }
        }
    }
    out
}

/// Build a value graph from parsed JSON
pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        // One numeric kind here; integers beyond 2^53 lose precision,
        // same as the platform this models
        serde_json::Value::Number(n) => Value::number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::string(s),
        serde_json::Value::Array(items) => Value::seq_from(items.iter().map(from_json)),
        serde_json::Value::Object(entries) => {
            Value::map_from(entries.iter().map(|(key, item)| (key.clone(), from_json(item))))
        }
    }
}

/// Parse JSON text straight into a value graph
pub fn from_json_str(text: &str) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    Ok(from_json(&json))
}

/// Lower a value graph to JSON
///
/// Fails with [`ValueError::CyclicReference`] when the graph contains a
/// cycle. Shared acyclic substructure is duplicated in the output tree;
/// JSON has no way to express the sharing.
pub fn to_json(value: &Value) -> Result<serde_json::Value> {
    let mut on_path = AHashSet::new();
    let mut path = PathStack::new();
    lower(value, &mut on_path, &mut path)
}

/// Lower a value graph to a JSON string
pub fn to_json_string(value: &Value) -> Result<String> {
    let json = to_json(value)?;
    Ok(serde_json::to_string(&json)?)
}

// The model has one numeric kind, f64. Integral values lower to JSON
// integers so they print without a decimal part, the way the platform
// stringifies them; 2^53 is where f64 stops being exact.
fn lower_number(n: f64) -> serde_json::Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if n == n.trunc() && n.abs() <= MAX_EXACT {
        serde_json::Value::Number(serde_json::Number::from(n as i64))
    } else {
        match serde_json::Number::from_f64(n) {
            Some(number) => serde_json::Value::Number(number),
            // NaN and infinities have no JSON form
            None => serde_json::Value::Null,
        }
    }
}

fn lower(
    value: &Value,
    on_path: &mut AHashSet<usize>,
    path: &mut PathStack,
) -> Result<serde_json::Value> {
    match value {
        // Undefined at the root or inside a sequence lowers to null;
        // mapping entries drop it instead (see the Map arm)
        Value::Null | Value::Undefined => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Number(n) => Ok(lower_number(*n)),
        Value::Str(s) => Ok(serde_json::Value::String(s.to_string())),
        Value::Seq(cell) => {
            let addr = Rc::as_ptr(cell) as usize;
            if !on_path.insert(addr) {
                return Err(ValueError::CyclicReference {
                    path: format_path(path),
                });
            }

            let items = cell.borrow();
            let mut output = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push(PathSegment::Index(index));
                output.push(lower(item, on_path, path)?);
                path.pop();
            }

            drop(items);
            on_path.remove(&addr);
            Ok(serde_json::Value::Array(output))
        }
        Value::Map(cell) => {
            let addr = Rc::as_ptr(cell) as usize;
            if !on_path.insert(addr) {
                return Err(ValueError::CyclicReference {
                    path: format_path(path),
                });
            }

            let entries = cell.borrow();
            let mut output = serde_json::Map::with_capacity(entries.len());
            for (key, item) in entries.iter() {
                if item.is_undefined() {
                    continue;
                }
                path.push(PathSegment::Key(key.clone()));
                output.insert(key.clone(), lower(item, on_path, path)?);
                path.pop();
            }

            drop(entries);
            on_path.remove(&addr);
            Ok(serde_json::Value::Object(output))
        }
    }
}

impl Value {
    /// Associated form of [`from_json`]
    pub fn from_json(json: &serde_json::Value) -> Value {
        from_json(json)
    }

    /// Method form of [`to_json`]
    pub fn to_json(&self) -> Result<serde_json::Value> {
        to_json(self)
    }
}
