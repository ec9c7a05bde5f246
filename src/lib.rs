pub mod apply;
pub mod args;
pub mod convert;
pub mod output;
pub mod path;
pub mod placeholder;
pub mod resolve;
pub mod value;

pub use apply::{Apply, DeferredCall, map_over};
pub use args::{arg, arg_list, item, lookup};
pub use convert::{json_to_value, value_to_json};
pub use output::{to_json, to_json_pretty};
pub use path::{Path, Step, render};
pub use placeholder::{Arg, Placeholder};
pub use resolve::{EvalError, resolve};
pub use value::{NativeFn, Value};
