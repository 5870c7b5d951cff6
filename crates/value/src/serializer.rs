//! Value renderer - cycle-safe text output
//!
//! This module handles:
//! - JSON-like rendering of possibly-cyclic value graphs
//! - Marking back-edges as `[Circular]` instead of recursing
//! - Capping long string payloads
//!
//! It also backs the `Display` and `Debug` impls for `Value`; deriving
//! either would recurse forever on a self-referential graph.

use ahash::AHashSet;
use std::fmt;
use std::rc::Rc;

use crate::types::Value;
use crate::utils::{cap_text_length, escape_string, format_number};

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// Longest string payload printed before capping with `...`
    pub max_text_length: usize,
    /// Indented multi-line output instead of a single line
    pub pretty: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            max_text_length: 200,
            pretty: false,
        }
    }
}

/// Value graph renderer
pub struct ValueSerializer {
    config: SerializerConfig,
}

impl ValueSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Render a value graph to text
    ///
    /// Always terminates: a container already open further up the current
    /// path prints as `[Circular]`. Shared acyclic substructure renders in
    /// full at each occurrence.
    pub fn serialize(&self, value: &Value) -> String {
        let mut output = String::with_capacity(128);
        let mut on_path = AHashSet::new();
        self.serialize_value(value, 0, &mut on_path, &mut output);
        output
    }

    fn serialize_value(
        &self,
        value: &Value,
        depth: usize,
        on_path: &mut AHashSet<usize>,
        output: &mut String,
    ) {
        match value {
            Value::Null => output.push_str("null"),
            Value::Undefined => output.push_str("undefined"),
            Value::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => output.push_str(&format_number(*n)),
            Value::Str(s) => {
                output.push_str(&escape_string(&cap_text_length(
                    s,
                    self.config.max_text_length,
                )));
            }
            Value::Seq(cell) => {
                let addr = Rc::as_ptr(cell) as usize;
                if !on_path.insert(addr) {
                    output.push_str("[Circular]");
                    return;
                }

                let items = cell.borrow();
                if items.is_empty() {
                    output.push_str("[]");
                } else if self.config.pretty {
                    output.push_str("[\n");
                    for (i, item) in items.iter().enumerate() {
                        output.push_str(&"  ".repeat(depth + 1));
                        self.serialize_value(item, depth + 1, on_path, output);
                        if i + 1 < items.len() {
                            output.push(',');
                        }
                        output.push('\n');
                    }
                    output.push_str(&"  ".repeat(depth));
                    output.push(']');
                } else {
                    output.push('[');
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            output.push_str(", ");
                        }
                        self.serialize_value(item, depth, on_path, output);
                    }
                    output.push(']');
                }

                drop(items);
                on_path.remove(&addr);
            }
            Value::Map(cell) => {
                let addr = Rc::as_ptr(cell) as usize;
                if !on_path.insert(addr) {
                    output.push_str("[Circular]");
                    return;
                }

                let entries = cell.borrow();
                if entries.is_empty() {
                    output.push_str("{}");
                } else if self.config.pretty {
                    output.push_str("{\n");
                    for (i, (key, item)) in entries.iter().enumerate() {
                        output.push_str(&"  ".repeat(depth + 1));
                        output.push_str(&escape_string(key));
                        output.push_str(": ");
                        self.serialize_value(item, depth + 1, on_path, output);
                        if i + 1 < entries.len() {
                            output.push(',');
                        }
                        output.push('\n');
                    }
                    output.push_str(&"  ".repeat(depth));
                    output.push('}');
                } else {
                    output.push('{');
                    for (i, (key, item)) in entries.iter().enumerate() {
                        if i > 0 {
                            output.push_str(", ");
                        }
                        output.push_str(&escape_string(key));
                        output.push_str(": ");
                        self.serialize_value(item, depth, on_path, output);
                    }
                    output.push('}');
                }

                drop(entries);
                on_path.remove(&addr);
            }
        }
    }
}

impl Default for ValueSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ValueSerializer::new().serialize(self))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ValueSerializer::new().serialize(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_scalars() {
        let serializer = ValueSerializer::new();
        assert_eq!(serializer.serialize(&Value::null()), "null");
        assert_eq!(serializer.serialize(&Value::undefined()), "undefined");
        assert_eq!(serializer.serialize(&Value::boolean(true)), "true");
        assert_eq!(serializer.serialize(&Value::number(3.0)), "3");
        assert_eq!(serializer.serialize(&Value::number(0.5)), "0.5");
        assert_eq!(serializer.serialize(&Value::string("hi")), "\"hi\"");
    }

    #[test]
    fn test_render_nested() {
        let graph = Value::map_from([
            ("a", Value::seq_from([Value::number(1.0), Value::number(2.0)])),
            ("b", Value::string("x")),
        ]);

        assert_eq!(
            ValueSerializer::new().serialize(&graph),
            "{\"a\": [1, 2], \"b\": \"x\"}"
        );
    }

    #[test]
    fn test_render_empty_containers() {
        let serializer = ValueSerializer::new();
        assert_eq!(serializer.serialize(&Value::new_seq()), "[]");
        assert_eq!(serializer.serialize(&Value::new_map()), "{}");
    }

    #[test]
    fn test_render_cycle() {
        let graph = Value::new_map();
        graph.insert("self", graph.clone()).unwrap();

        assert_eq!(
            ValueSerializer::new().serialize(&graph),
            "{\"self\": [Circular]}"
        );
    }

    #[test]
    fn test_shared_substructure_renders_twice() {
        let shared = Value::seq_from([Value::number(1.0)]);
        let graph = Value::map_from([("x", shared.clone()), ("y", shared)]);

        assert_eq!(
            ValueSerializer::new().serialize(&graph),
            "{\"x\": [1], \"y\": [1]}"
        );
    }

    #[test]
    fn test_pretty_rendering() {
        let graph = Value::seq_from([Value::number(1.0), Value::number(2.0)]);
        let serializer = ValueSerializer::with_config(SerializerConfig {
            pretty: true,
            ..SerializerConfig::default()
        });

        assert_eq!(serializer.serialize(&graph), "[\n  1,\n  2\n]");
    }

    #[test]
    fn test_string_capping() {
        let serializer = ValueSerializer::with_config(SerializerConfig {
            max_text_length: 5,
            ..SerializerConfig::default()
        });

        assert_eq!(
            serializer.serialize(&Value::string("abcdefgh")),
            "\"abcde...\""
        );
    }

    #[test]
    fn test_display_and_debug_agree() {
        let graph = Value::seq_from([Value::string("a"), Value::null()]);
        assert_eq!(format!("{}", graph), "[\"a\", null]");
        assert_eq!(format!("{:?}", graph), "[\"a\", null]");
    }
}
