//! Delimiter preprocessing.
//!
//! Two passes run before the structural scan:
//!
//! 1. [`extract_opaque_field`] lifts the opaque identifier's value out of the
//!    input entirely, so that any `=` or `,` inside it (base64 padding, say) can
//!    never be mistaken for structure.
//! 2. [`disambiguate_commas`] defers structurally ambiguous commas behind a
//!    placeholder until their role is known. The structural parser treats every
//!    literal comma as a terminator, so a comma that might still be part of a
//!    free-text value must not reach it as-is.
//!
//! Both passes record their substitutions in a [`PlaceholderTable`], which the
//! postprocessor replays once the scan is done.
//!
//! ## Comma disambiguation
//!
//! The scan carries one `pending` boolean and a stack of open brackets:
//!
//! - `(` / `[` open a nesting level and clear `pending`;
//! - `)` / `]` close one and set `pending` (a comma right after a closed
//!   structure is presumptively a field separator);
//! - a comma while `pending` inside a record becomes a placeholder — unless the
//!   innermost context is a list, where commas always separate elements;
//! - an `=` while `pending` proves the most recent placeholder introduced a new
//!   key, so it is rewritten back to a literal `", "`.
//!
//! Placeholders never confirmed by an `=` sit out the structural scan and are
//! restored to plain commas at the end. That is what keeps a value like
//! `desc=grilled chicken, romaine lettuce, tomato` in one piece: only the comma
//! in front of the next `key=` is ever made structural.

use indexmap::IndexMap;

/// Placeholder standing in for a deferred separator comma.
pub const COMMA_TOKEN: &str = "~comma%";

/// Placeholder standing in for the opaque field's captured value.
pub const OPAQUE_TOKEN: &str = "~opaque%";

/// Reversible mapping of placeholder token to original substring.
///
/// Entries are replayed in insertion order during postprocessing; the separator
/// token must be registered before the opaque token so restoration mirrors the
/// substitution order of the preprocessing passes.
#[derive(Debug, Default)]
pub struct PlaceholderTable {
    entries: IndexMap<String, String>,
}

impl PlaceholderTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token and the text it stands for. Re-inserting a token
    /// overwrites its original without changing its position.
    pub fn insert(&mut self, token: &str, original: impl Into<String>) {
        self.entries.insert(token.to_string(), original.into());
    }

    /// Iterates entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Replaces the value of the first case-insensitive occurrence of `field` with
/// [`OPAQUE_TOKEN`], recording the captured text in `table`.
///
/// The capture spans from the `=` following the field name to the nearer of the
/// next `,` or `)`. If the field is absent, has no `=`, has no terminator, or the
/// terminator precedes the `=`, the input is returned untouched and nothing is
/// recorded. Only the first occurrence is handled.
///
/// ```rust
/// use watchlit::preprocess::{extract_opaque_field, PlaceholderTable};
///
/// let mut table = PlaceholderTable::new();
/// let out = extract_opaque_field("Foo(cardId=XYZ, n=1)", "cardId", &mut table);
/// assert_eq!(out, "Foo(cardId=~opaque%, n=1)");
/// assert_eq!(table.entries().next(), Some(("~opaque%", "XYZ")));
/// ```
pub fn extract_opaque_field(input: &str, field: &str, table: &mut PlaceholderTable) -> String {
    if field.is_empty() {
        return input.to_string();
    }
    let lower = input.to_ascii_lowercase();
    let needle = field.to_ascii_lowercase();
    let Some(start) = lower.find(&needle) else {
        return input.to_string();
    };
    let rest = &input[start..];
    let Some(eq) = rest.find('=') else {
        return input.to_string();
    };
    let end = match (rest.find(','), rest.find(')')) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return input.to_string(),
    };
    if end <= eq {
        return input.to_string();
    }
    table.insert(OPAQUE_TOKEN, &rest[eq + 1..end]);
    format!("{}{}{}", &input[..start + eq + 1], OPAQUE_TOKEN, &rest[end..])
}

/// Rewrites structurally ambiguous commas to [`COMMA_TOKEN`] in a single
/// left-to-right scan.
///
/// ```rust
/// use watchlit::preprocess::disambiguate_commas;
///
/// // The comma after "[1]" is deferred, then confirmed by the following "=".
/// assert_eq!(disambiguate_commas("a=[1], b=2"), "a=[1],  b=2");
///
/// // A comma inside a value with no "=" in sight stays deferred.
/// assert_eq!(disambiguate_commas("a=x, y)"), "a=x~comma% y)");
/// ```
pub fn disambiguate_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending = false;
    let mut open: Vec<char> = Vec::new();

    for ch in input.chars() {
        match ch {
            '(' | '[' => {
                open.push(ch);
                pending = false;
                out.push(ch);
            }
            ')' | ']' => {
                open.pop();
                pending = true;
                out.push(ch);
            }
            ',' => {
                if pending && open.last() != Some(&'[') {
                    out.push_str(COMMA_TOKEN);
                } else {
                    out.push(ch);
                }
                pending = true;
            }
            '=' => {
                if pending {
                    if let Some(idx) = out.rfind(COMMA_TOKEN) {
                        out.replace_range(idx..idx + COMMA_TOKEN.len(), ", ");
                    }
                }
                pending = true;
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }

    out
}
