//! Diagnostic and JSON-style serialization for engine values.
//!
//! This module provides deterministic string output for [`Value`]s in both
//! compact and pretty-printed forms. Object keys are always sorted, so the
//! same value always prints the same way; resolution error messages depend
//! on that.
//!
//! Two engine-internal variants extend plain JSON output: the absent value
//! prints as a bare `undefined` (the way it appears inside resolution error
//! messages), and function values print as `"<function>"`.
//!
//! # Examples
//!
//! ```
//! use tacit::Value;
//! use tacit::output::{to_json, to_json_pretty};
//!
//! let value = Value::Integer(42);
//!
//! // Compact output
//! assert_eq!(to_json(&value), "42");
//!
//! // Pretty output (identical for simple values)
//! assert_eq!(to_json_pretty(&value), "42");
//! ```

use crate::value::Value;

pub struct ValuePrinter {
    pretty: bool,
}

impl ValuePrinter {
    pub fn new(pretty: bool) -> Self {
        ValuePrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        self.print_value(value, 0)
    }

    fn print_value(&self, value: &Value, indent: usize) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Undefined => "undefined".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::String(s) => {
                // Escape special characters
                format!("\"{}\"", self.escape_string(s))
            }
            Value::Array(arr) => self.print_array(arr, indent),
            Value::Object(obj) => self.print_object(obj, indent),
            Value::Function(_) => "\"<function>\"".to_string(),
        }
    }

    fn print_array(&self, arr: &[Value], indent: usize) -> String {
        if arr.is_empty() {
            return "[]".to_string();
        }

        if self.pretty {
            let mut result = "[\n".to_string();
            let items: Vec<String> = arr
                .iter()
                .map(|v| {
                    format!(
                        "{}{}",
                        self.indent(indent + 1),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect();
            result.push_str(&items.join(",\n"));
            result.push('\n');
            result.push_str(&self.indent(indent));
            result.push(']');
            result
        } else {
            let items: Vec<String> = arr.iter().map(|v| self.print_value(v, indent)).collect();
            format!("[{}]", items.join(","))
        }
    }

    fn print_object(
        &self,
        obj: &std::collections::HashMap<String, Value>,
        indent: usize,
    ) -> String {
        if obj.is_empty() {
            return "{}".to_string();
        }

        // Sort keys for deterministic output
        let mut keys: Vec<_> = obj.keys().collect();
        keys.sort();

        if self.pretty {
            let mut result = "{\n".to_string();
            let items: Vec<String> = keys
                .iter()
                .map(|k| {
                    format!(
                        "{}\"{}\": {}",
                        self.indent(indent + 1),
                        self.escape_string(k),
                        self.print_value(obj.get(*k).unwrap(), indent + 1)
                    )
                })
                .collect();
            result.push_str(&items.join(",\n"));
            result.push('\n');
            result.push_str(&self.indent(indent));
            result.push('}');
            result
        } else {
            let items: Vec<String> = keys
                .iter()
                .map(|k| {
                    format!(
                        "\"{}\":{}",
                        self.escape_string(k),
                        self.print_value(obj.get(*k).unwrap(), indent)
                    )
                })
                .collect();
            format!("{{{}}}", items.join(","))
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }

    fn escape_string(&self, s: &str) -> String {
        s.chars()
            .flat_map(|c| match c {
                '"' => vec!['\\', '"'],
                '\\' => vec!['\\', '\\'],
                '\n' => vec!['\\', 'n'],
                '\r' => vec!['\\', 'r'],
                '\t' => vec!['\\', 't'],
                c if c.is_control() => {
                    // Unicode escape for control chars
                    format!("\\u{:04x}", c as u32).chars().collect()
                }
                c => vec![c],
            })
            .collect()
    }
}

// Convenience functions

/// Converts a Value to compact JSON-style string representation.
///
/// Produces minified output with no extra whitespace and deterministic
/// (sorted) object keys.
///
/// # Examples
///
/// ```
/// use tacit::Value;
/// use tacit::output::to_json;
/// use std::collections::HashMap;
///
/// let mut obj = HashMap::new();
/// obj.insert("name".to_string(), Value::String("Alice".to_string()));
/// obj.insert("age".to_string(), Value::Integer(30));
///
/// let json = to_json(&Value::Object(obj));
/// assert_eq!(json, r#"{"age":30,"name":"Alice"}"#);
/// ```
pub fn to_json(value: &Value) -> String {
    ValuePrinter::new(false).print(value)
}

/// Converts a Value to pretty-printed string representation with 2-space
/// indentation, suitable for debugging or user-facing output.
pub fn to_json_pretty(value: &Value) -> String {
    ValuePrinter::new(true).print(value)
}

/// The form values take inside resolution error messages.
pub fn inspect(value: &Value) -> String {
    to_json(value)
}
