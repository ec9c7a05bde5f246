use crate::output::inspect;
use crate::path::{Step, render};
use crate::value::Value;

/// Errors that can occur while building or resolving a placeholder chain.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A path step was applied to an absent value, or the broadcast marker
    /// was used a second time in one chain. Carries the rendered path and
    /// the value it failed against.
    Resolution(String),

    /// Shape mismatch: the broadcast marker was applied to a non-array
    /// value, or a resolved call target was not callable.
    TypeError(String),
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::Resolution(msg) => write!(f, "Resolution error: {}", msg),
            EvalError::TypeError(msg) => write!(f, "Type error: {}", msg),
        }
    }
}

impl std::error::Error for EvalError {}

/// Walk a concrete value along a recorded path.
///
/// - An empty path returns the root unchanged, even when the root is
///   [`Value::Undefined`].
/// - Stepping into a missing key yields [`Value::Undefined`]; if the walk
///   must continue past it, resolution fails with
///   [`EvalError::Resolution`].
/// - At the broadcast step the current value must be an array; the rest of
///   the path is mapped over every element independently and the results
///   are collected into a new array. Anything else fails with
///   [`EvalError::TypeError`].
///
/// Resolution failures are re-wrapped at every recursive level on the way
/// out, so the surfaced message always names the full path and the root
/// value the walk started from. Type errors propagate unchanged.
///
/// # Examples
///
/// ```
/// use tacit::{resolve, json_to_value, Step};
/// use serde_json::json;
///
/// let data = json_to_value(json!({"a": [{"b": 2}]}));
/// let path = vec![
///     Step::Field("a".into()),
///     Step::Index(0),
///     Step::Field("b".into()),
/// ];
///
/// assert_eq!(resolve(&data, &path).unwrap().as_int(), Some(2));
/// ```
pub fn resolve(root: &Value, path: &[Step]) -> Result<Value, EvalError> {
    resolve_at(root, path, path)
}

fn resolve_at(value: &Value, path: &[Step], original: &[Step]) -> Result<Value, EvalError> {
    let Some((step, rest)) = path.split_first() else {
        return Ok(value.clone());
    };

    if value.is_undefined() {
        return Err(not_accessible(path, value));
    }

    let result = match step {
        Step::All => match value {
            Value::Array(items) => items
                .iter()
                .map(|entry| resolve_at(entry, rest, original))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Err(EvalError::TypeError(format!(
                "Cannot broadcast over {} at {}; the broadcast marker requires an array",
                other.type_name(),
                render(original),
            ))),
        },
        step => resolve_at(&step_into(value, step), rest, original),
    };

    // Re-wrap resolution failures from deeper frames with this frame's
    // suffix path and value; type errors pass through untouched.
    result.map_err(|err| match err {
        EvalError::Resolution(_) => not_accessible(path, value),
        other => other,
    })
}

fn not_accessible(path: &[Step], value: &Value) -> EvalError {
    EvalError::Resolution(format!(
        "{} not accessible in {}",
        render(path),
        inspect(value)
    ))
}

/// Apply one non-broadcast step to a value. Missing keys, out-of-range
/// indices, and steps into scalars all yield the absent value.
fn step_into(value: &Value, step: &Step) -> Value {
    match (value, step) {
        (Value::Object(map), Step::Field(name)) => {
            map.get(name).cloned().unwrap_or(Value::Undefined)
        }
        // Integer keys on objects fall back to string lookup
        (Value::Object(map), Step::Index(n)) => {
            map.get(&n.to_string()).cloned().unwrap_or(Value::Undefined)
        }
        (Value::Array(items), Step::Index(n)) => {
            items.get(*n).cloned().unwrap_or(Value::Undefined)
        }
        // String keys on arrays resolve as indices when numeric
        (Value::Array(items), Step::Field(name)) => match name.parse::<usize>() {
            Ok(n) => items.get(n).cloned().unwrap_or(Value::Undefined),
            Err(_) => Value::Undefined,
        },
        // Scalars, null, and functions have no addressable members
        _ => Value::Undefined,
    }
}
