//! Entry points for building placeholder chains: the root alias, the bare
//! root, indexed placeholders, and the name-based lookup table.

use std::sync::LazyLock;

use regex::Regex;

use crate::path::Step;
use crate::placeholder::Placeholder;

/// The root alias `_`: a placeholder for the data item itself, which by
/// convention is call-time argument 0.
///
/// ```
/// use tacit::{item, render};
///
/// assert_eq!(render(item().path()), "_");
/// assert_eq!(render(item().field("name").path()), "_.name");
/// ```
pub fn item() -> Placeholder {
    Placeholder::new(vec![Step::Index(0)])
}

/// The bare root `$`: an empty-path placeholder referring to the call-time
/// argument list as a whole.
pub fn arg_list() -> Placeholder {
    Placeholder::new(Vec::new())
}

/// An indexed placeholder for the N-th call-time argument.
///
/// ```
/// use tacit::{arg, render};
///
/// assert_eq!(render(arg(1).path()), "$1");
/// ```
pub fn arg(n: usize) -> Placeholder {
    Placeholder::new(vec![Step::Index(n)])
}

static INDEXED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\$\d+$").unwrap());
static NAMED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$[$_a-z][$_a-z0-9]*$").unwrap());

/// Look up a placeholder by conventional name.
///
/// `"$"` followed by digits yields the indexed placeholder at that
/// position; `"$"` followed by a bare identifier is sugar for that field of
/// the root alias. Anything else is absent, not an error.
///
/// ```
/// use tacit::{lookup, arg, item};
///
/// assert_eq!(lookup("$2"), Some(arg(2)));
/// assert_eq!(lookup("$name"), Some(item().field("name")));
/// assert_eq!(lookup("name"), None);
/// ```
pub fn lookup(name: &str) -> Option<Placeholder> {
    if INDEXED.is_match(name) {
        let n = name[1..].parse().ok()?;
        return Some(arg(n));
    }

    if NAMED.is_match(name) {
        return Some(item().field(&name[1..]));
    }

    None
}
