use std::sync::LazyLock;

use regex::Regex;

/// A single step in a recorded access path.
///
/// Paths are grown one step at a time by the placeholder builder and later
/// walked by the resolver against real data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Object field access by name
    ///
    /// # Examples
    /// - `item().field("name")` → `Field("name")`
    /// - `item().field("user").field("email")` → `[Field("user"), Field("email")]`
    Field(String),

    /// Array element access by index. As the first step of a path it is
    /// instead the positional call-time argument the path starts from.
    ///
    /// # Examples
    /// - `item().field("items").index(0)` → `[Index(0), Field("items"), Index(0)]`
    /// - `arg(2)` → `[Index(2)]`
    Index(usize),

    /// The broadcast marker: apply the remainder of the path to every
    /// element of the array found here, independently.
    ///
    /// At most one occurrence per path; the builder rejects a second one
    /// at build time.
    All,
}

/// A sequence of steps describing how to navigate from a root value to a
/// target value.
///
/// The first step of a placeholder's path is its positional argument index
/// (`Index(0)` for the root alias); an empty path refers to the call-time
/// argument list as a whole.
pub type Path = Vec<Step>;

static BARE_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[$_a-z][$_a-z0-9]*$").unwrap());

/// Render a path as a human-readable diagnostic string.
///
/// The output mirrors how the expression would have been written: the root
/// alias prints as `_`, any other positional root as `$N`, bare-identifier
/// fields as `.name`, everything else in bracket form.
///
/// Used exclusively for diagnostics; rendering never affects resolution.
///
/// # Examples
///
/// ```
/// use tacit::{item, arg, render};
///
/// assert_eq!(render(item().path()), "_");
/// assert_eq!(render(item().field("a").index(0).field("b").path()), "_.a[0].b");
/// assert_eq!(render(arg(2).field("name").path()), "$2.name");
/// ```
pub fn render(path: &[Step]) -> String {
    let Some((first, rest)) = path.split_first() else {
        return "$".to_string();
    };

    let mut out = match first {
        Step::Index(0) => "_".to_string(),
        Step::Index(n) => format!("${}", n),
        Step::Field(name) => format!("${}", name),
        Step::All => "$[$all]".to_string(),
    };

    for step in rest {
        out.push_str(&render_step(step));
    }

    out
}

fn render_step(step: &Step) -> String {
    match step {
        Step::Field(name) if BARE_IDENT.is_match(name) => format!(".{}", name),
        Step::Field(name) => {
            let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
            format!("['{}']", escaped)
        }
        Step::Index(n) => format!("[{}]", n),
        Step::All => "[$all]".to_string(),
    }
}
