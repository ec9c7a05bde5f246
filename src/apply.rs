use crate::path::{Path, Step, render};
use crate::placeholder::{Arg, Placeholder};
use crate::resolve::{EvalError, resolve};
use crate::value::Value;

/// Anything that can be invoked with the call-time argument list.
///
/// Implemented by [`DeferredCall`] (a finalized expression) and by
/// [`Placeholder`] itself (immediate resolution of the recorded path), so
/// either can be handed to a collection transform such as [`map_over`].
pub trait Apply {
    /// Run against the call-time arguments. By convention the data item is
    /// argument 0, which is what the root alias refers to.
    fn apply(&self, called_with: &[Value]) -> Result<Value, EvalError>;
}

impl Apply for Placeholder {
    /// Resolve the recorded path against the argument list right away.
    ///
    /// This is what makes a bare placeholder usable as a transform
    /// callback: `map_over(&data, &item().field("b"))` extracts `b` from
    /// every element.
    fn apply(&self, called_with: &[Value]) -> Result<Value, EvalError> {
        resolve(&Value::Array(called_with.to_vec()), self.path())
    }
}

/// A finalized, still-deferred call expression.
///
/// Produced by [`Placeholder::call`]. Closes over three pieces of immutable
/// state: the receiver path (what becomes the call's binding), the target
/// path (what becomes the function to invoke), and the argument list
/// captured at build time. Invoking it with real data resolves both paths,
/// substitutes the captured arguments, and applies the target.
///
/// # Examples
///
/// ```
/// use tacit::{item, map_over, Value};
/// use std::collections::HashMap;
///
/// // `data.map(_.func())`: call each element's `func`, bound to the element
/// let call = item().field("func").call(vec![]);
///
/// let element = |n: i64| {
///     let mut obj = HashMap::new();
///     obj.insert("n".to_string(), Value::Integer(n));
///     obj.insert(
///         "func".to_string(),
///         Value::function(|this, _args| {
///             Ok(this.get("n").cloned().unwrap_or(Value::Undefined))
///         }),
///     );
///     Value::Object(obj)
/// };
///
/// let data = vec![element(3), element(4)];
/// let out = map_over(&data, &call).unwrap();
/// assert_eq!(out, vec![Value::Integer(3), Value::Integer(4)]);
/// ```
#[derive(Debug, Clone)]
pub struct DeferredCall {
    receiver: Path,
    target: Path,
    args: Vec<Arg>,
}

impl DeferredCall {
    pub(crate) fn new(receiver: Path, target: Path, args: Vec<Arg>) -> Self {
        DeferredCall {
            receiver,
            target,
            args,
        }
    }

    /// The path resolved to obtain the call's binding context.
    pub fn receiver(&self) -> &[Step] {
        &self.receiver
    }

    /// The path resolved to obtain the function to invoke.
    pub fn target(&self) -> &[Step] {
        &self.target
    }

    /// The highest positional argument index referenced by the receiver
    /// path, the target path, or any captured deferred-expression argument.
    /// Call-time arguments beyond this index are the "trailing" arguments
    /// the rest markers capture.
    fn max_used(&self) -> usize {
        let mut max = first_index(&self.receiver).max(first_index(&self.target));
        for arg in &self.args {
            if let Arg::Expr(expr) = arg {
                max = max.max(first_index(expr.path()));
            }
        }
        max
    }

    /// Substitute the captured arguments, expand rest markers, and invoke
    /// one resolved target against one resolved receiver.
    fn apply_to(
        &self,
        this: &Value,
        target: &Value,
        called_with: &[Value],
        max_used: usize,
    ) -> Result<Value, EvalError> {
        enum Slot {
            Val(Value),
            Rest,
            Spread,
        }

        let frame = Value::Array(called_with.to_vec());

        let mut slots = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            slots.push(match arg {
                Arg::Rest => Slot::Rest,
                Arg::Spread => Slot::Spread,
                Arg::This => Slot::Val(this.clone()),
                Arg::Expr(expr) => Slot::Val(resolve(&frame, expr.path())?),
                Arg::Value(value) => Slot::Val(value.clone()),
            });
        }

        let trailing = called_with.get(max_used + 1..).unwrap_or(&[]);

        let mut call_args = Vec::with_capacity(slots.len());
        for slot in slots {
            match slot {
                Slot::Val(value) => call_args.push(value),
                Slot::Rest => call_args.push(Value::Array(trailing.to_vec())),
                Slot::Spread => call_args.extend(trailing.iter().cloned()),
            }
        }

        match target {
            Value::Function(f) => f(this, &call_args),
            other => Err(EvalError::TypeError(format!(
                "{} is not callable (found {})",
                render(&self.target),
                other.type_name(),
            ))),
        }
    }

    /// The per-element receiver of a broadcast invocation. A parallel array
    /// is indexed; anything else has no element-wise binding.
    fn receiver_at(resolved: &Value, i: usize) -> Value {
        match resolved {
            Value::Array(items) => items.get(i).cloned().unwrap_or(Value::Undefined),
            _ => Value::Undefined,
        }
    }
}

impl Apply for DeferredCall {
    fn apply(&self, called_with: &[Value]) -> Result<Value, EvalError> {
        let frame = Value::Array(called_with.to_vec());

        let resolved_target = resolve(&frame, &self.target)?;
        let resolved_receiver = resolve(&frame, &self.receiver)?;
        let max_used = self.max_used();

        if self.target.contains(&Step::All) {
            // Broadcast: the resolved target is one callable per element.
            // Each pair is invoked with the original call-time arguments.
            let Value::Array(targets) = resolved_target else {
                unreachable!("broadcast resolution always yields an array");
            };

            targets
                .iter()
                .enumerate()
                .map(|(i, target)| {
                    let this = Self::receiver_at(&resolved_receiver, i);
                    self.apply_to(&this, target, called_with, max_used)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        } else {
            self.apply_to(&resolved_receiver, &resolved_target, called_with, max_used)
        }
    }
}

fn first_index(path: &[Step]) -> usize {
    match path.first() {
        Some(Step::Index(n)) => *n,
        _ => 0,
    }
}

/// Run a callable expression over every element of a collection, with the
/// JavaScript `Array.prototype.map` calling convention: each invocation
/// receives `(element, index, whole-array)` as its argument list.
///
/// Stops at the first error.
///
/// # Examples
///
/// ```
/// use tacit::{item, map_over, json_to_value, value_to_json};
/// use serde_json::json;
///
/// let data = vec![
///     json_to_value(json!({"b": 1})),
///     json_to_value(json!({"b": 2})),
/// ];
///
/// let out = map_over(&data, &item().field("b")).unwrap();
/// let out: Vec<_> = out.into_iter().map(value_to_json).collect();
/// assert_eq!(out, vec![json!(1), json!(2)]);
/// ```
pub fn map_over<F: Apply>(items: &[Value], f: &F) -> Result<Vec<Value>, EvalError> {
    let whole = Value::Array(items.to_vec());
    items
        .iter()
        .enumerate()
        .map(|(i, item)| f.apply(&[item.clone(), Value::Integer(i as i64), whole.clone()]))
        .collect()
}
