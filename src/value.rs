use std::collections::HashMap;
use std::rc::Rc;

use crate::resolve::EvalError;

/// A native function carried inside a [`Value`].
///
/// The first parameter is the binding receiver (what the call is bound to),
/// the second is the argument list. Finalized expressions resolve their
/// target path to one of these and invoke it.
pub type NativeFn = Rc<dyn Fn(&Value, &[Value]) -> Result<Value, EvalError>>;

/// A JSON-like value used throughout the placeholder engine.
///
/// This type represents all valid JSON types with a distinction between
/// integers and floats, plus two variants the engine itself needs:
///
/// - [`Value::Undefined`] is the absent value produced by stepping into a
///   key or index that does not exist. It is distinct from [`Value::Null`]:
///   `null` is data, `undefined` is the lack of it. A path that ends on a
///   missing key yields `Undefined`; a path that must continue through one
///   is a resolution error.
/// - [`Value::Function`] is a callable data member. Paths can end on a
///   function, and a finalized expression will invoke it bound to the
///   object it was found on.
///
/// # Examples
///
/// ```
/// use tacit::Value;
/// use std::collections::HashMap;
///
/// // Scalar values
/// let null = Value::Null;
/// let boolean = Value::Boolean(true);
/// let integer = Value::Integer(42);
/// let float = Value::Float(3.14);
/// let string = Value::String("hello".to_string());
///
/// // Collections
/// let array = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
///
/// let mut obj = HashMap::new();
/// obj.insert("key".to_string(), Value::String("value".to_string()));
/// let object = Value::Object(obj);
///
/// // A callable member
/// let func = Value::function(|_this, args| Ok(args[0].clone()));
/// ```
#[derive(Clone)]
pub enum Value {
    /// JSON null
    Null,

    /// The absent value: what stepping into a missing key produces
    Undefined,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Array of values (homogeneous or heterogeneous)
    Array(Vec<Value>),

    /// Object with string keys and value values
    Object(HashMap<String, Value>),

    /// A callable member, compared by identity
    Function(NativeFn),
}

impl Value {
    /// Wrap a closure as a callable value.
    ///
    /// ```
    /// use tacit::Value;
    ///
    /// let double = Value::function(|_this, args| {
    ///     let n = args[0].as_int().unwrap_or(0);
    ///     Ok(Value::Integer(n * 2))
    /// });
    /// ```
    pub fn function<F>(f: F) -> Value
    where
        F: Fn(&Value, &[Value]) -> Result<Value, EvalError> + 'static,
    {
        Value::Function(Rc::new(f))
    }

    /// Human-readable type name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    /// True for the absent value
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Float(n) => Some(n.round() as i64),
            _ => None,
        }
    }

    /// Get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Object field lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Undefined, Value::Undefined) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            // Functions have no structural equality; identity only
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Undefined => write!(f, "Undefined"),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Value::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Object(map) => f.debug_tuple("Object").field(map).finish(),
            Value::Function(_) => write!(f, "Function(<native fn>)"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
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

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}
