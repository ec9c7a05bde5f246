use crate::apply::DeferredCall;
use crate::path::{Path, Step};
use crate::resolve::EvalError;
use crate::value::Value;

/// An immutable deferred-expression value carrying one recorded path.
///
/// A placeholder is built at expression-definition time, before any data
/// exists. Every access operation returns a *new* placeholder whose path is
/// the parent's path with one step appended; placeholders never mutate in
/// place, so a partially built chain can be extended in several directions
/// without interference.
///
/// Two flavors by first step: the root alias ([`item`](crate::item), path
/// starting at positional index 0) stands for the eventual data item, and
/// indexed placeholders ([`arg`](crate::arg)) stand for the N-th call-time
/// argument. The bare root ([`arg_list`](crate::arg_list), empty path)
/// stands for the call-time argument list as a whole.
///
/// # Examples
///
/// ```
/// use tacit::{item, Apply, json_to_value};
/// use serde_json::json;
///
/// // `_.a[0].b`, recorded now and evaluated later
/// let chain = item().field("a").index(0).field("b");
///
/// let data = json_to_value(json!({"a": [{"b": 2}]}));
/// let result = chain.apply(&[data]).unwrap();
/// assert_eq!(result.as_int(), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    path: Path,
}

/// One captured call argument of a finalized expression.
///
/// Literals pass through to the eventual call unchanged; deferred
/// expressions are resolved against the call-time arguments; the three
/// control markers are substituted by the finalizer.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Literal value passed through unchanged
    Value(Value),

    /// Deferred expression resolved against the call-time arguments
    Expr(Placeholder),

    /// Substituted with the call's resolved receiver. As the *first*
    /// argument it is instead consumed as a finalization-mode marker: the
    /// receiver stays the parent object and the remaining entries become
    /// the call arguments.
    This,

    /// Collects the call-time arguments beyond the highest used positional
    /// index into a single array inserted at this position
    Rest,

    /// Splices those same trailing arguments in as individual positional
    /// arguments
    Spread,
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<Placeholder> for Arg {
    fn from(expr: Placeholder) -> Self {
        Arg::Expr(expr)
    }
}

impl Placeholder {
    pub(crate) fn new(path: Path) -> Self {
        Placeholder { path }
    }

    /// The recorded path.
    pub fn path(&self) -> &[Step] {
        &self.path
    }

    /// Extend the chain with an object field access.
    pub fn field(&self, name: &str) -> Placeholder {
        self.extend(Step::Field(name.to_string()))
    }

    /// Extend the chain with an array index access.
    pub fn index(&self, n: usize) -> Placeholder {
        self.extend(Step::Index(n))
    }

    /// Extend the chain with the broadcast marker: the remainder of the
    /// chain applies to every element of the array found at this point.
    ///
    /// Fails immediately, not at resolution time, if the chain already
    /// contains a broadcast marker.
    pub fn all(&self) -> Result<Placeholder, EvalError> {
        if self.path.contains(&Step::All) {
            return Err(EvalError::Resolution(
                "Cannot use the broadcast marker more than once in a placeholder chain".to_string(),
            ));
        }
        Ok(self.extend(Step::All))
    }

    fn extend(&self, step: Step) -> Placeholder {
        let mut path = self.path.clone();
        path.push(step);
        Placeholder { path }
    }

    /// Finalize the chain into a deferred call.
    ///
    /// The receiver (what the call will be bound to) is chosen by the
    /// leading argument:
    ///
    /// - no arguments: the parent object of the final property, the
    ///   common `_.obj.func()` form;
    /// - a leading [`Arg::Expr`]: that expression becomes the receiver
    ///   (consumed from the argument list), rebinding the call explicitly;
    /// - a leading [`Arg::This`]: consumed; the receiver stays the parent
    ///   object and the rest are the call arguments, the
    ///   `_.func($this, 5)` form;
    /// - anything else leading: the receiver stays the parent object and
    ///   the whole list is the call arguments.
    ///
    /// The chain itself becomes the target path: it must resolve to a
    /// [`Value::Function`] once data arrives.
    ///
    /// # Examples
    ///
    /// ```
    /// use tacit::{item, Arg, Apply, Value};
    /// use std::collections::HashMap;
    ///
    /// // `_.func($this, 5)` over `{ prop: 7, func(n) { n * this.prop } }`
    /// let call = item().field("func").call(vec![
    ///     Arg::This,
    ///     Arg::Value(Value::Integer(5)),
    /// ]);
    ///
    /// let mut obj = HashMap::new();
    /// obj.insert("prop".to_string(), Value::Integer(7));
    /// obj.insert(
    ///     "func".to_string(),
    ///     Value::function(|this, args| {
    ///         let n = args[0].as_int().unwrap_or(0);
    ///         let prop = this.get("prop").and_then(Value::as_int).unwrap_or(0);
    ///         Ok(Value::Integer(n * prop))
    ///     }),
    /// );
    ///
    /// let result = call.apply(&[Value::Object(obj)]).unwrap();
    /// assert_eq!(result, Value::Integer(35));
    /// ```
    pub fn call(&self, mut args: Vec<Arg>) -> DeferredCall {
        let receiver = match args.first() {
            Some(Arg::Expr(_)) => match args.remove(0) {
                Arg::Expr(receiver) => receiver.path,
                _ => unreachable!("leading argument checked above"),
            },
            Some(Arg::This) => {
                args.remove(0);
                self.parent()
            }
            _ => self.parent(),
        };

        DeferredCall::new(receiver, self.path.clone(), args)
    }

    /// The path with its last step removed: the object the final property
    /// lives on. An empty path stays empty.
    fn parent(&self) -> Path {
        let mut path = self.path.clone();
        path.pop();
        path
    }
}
