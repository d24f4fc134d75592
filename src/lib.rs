//! # watchlit
//!
//! Transcodes a flat, single-line textual dump of a nested object graph — the
//! kind a debugger's "watch" / Copy Value facility produces — into a
//! pretty-printed, indented source-literal rendering suitable for pasting
//! straight into a test fixture.
//!
//! ## What it does
//!
//! Given a dump like
//!
//! ```text
//! OrderRequest(items=[Item(id=11002, price=795)], combos=[], orderType=TO_GO)
//! ```
//!
//! the transcoder emits a reconstructable literal: one field per line, two-space
//! indentation per nesting level, `listOf(...)`/`emptyList()` for lists,
//! parenthesized groups for records, and each leaf classified — numbers,
//! booleans and nulls stay bare, everything else is quoted.
//!
//! ## How it works
//!
//! One streaming pass, no retained object model:
//!
//! 1. a **preprocessing** pass extracts the opaque identifier field and defers
//!    structurally ambiguous commas behind reversible placeholders
//!    ([`preprocess`]);
//! 2. a **structural parse** drives a stack of per-level frames over the raw
//!    character stream, classifying scalars as levels close ([`parser`],
//!    [`classify`]);
//! 3. a **postprocessing** pass restores every placeholder ([`postprocess`]).
//!
//! The only punctuation understood is `[ ] ( ) = ,`. Input is never validated
//! against a schema; unbalanced closers surface as [`Error::StackUnderflow`],
//! other malformed input may simply render malformed.
//!
//! ## Quick start
//!
//! ```rust
//! use watchlit::transcode;
//!
//! assert_eq!(transcode("Foo(a=1)").unwrap(), "Foo(\n  a=1\n)");
//!
//! let pretty = transcode("Foo(a=1, b=hello, xs=[1, 2])").unwrap();
//! assert!(pretty.contains("b=\"hello\""));
//! assert!(pretty.contains("xs=listOf("));
//! ```
//!
//! ## Marker fields
//!
//! Two field names get special treatment, both configurable via
//! [`TranscodeOptions`]:
//!
//! - the value of the first `cardId` field passes through byte-for-byte,
//!   unquoted and unclassified — identifiers such as base64 blobs contain `=`
//!   and `,` and must survive unmodified;
//! - every scalar field of a `cardData` record is force-quoted, because numeric-
//!   looking identifiers in that record (PANs, serial numbers) must remain
//!   textual.
//!
//! ```rust
//! use watchlit::transcode;
//!
//! let out = transcode("Foo(cardId=XYZ123, other=1)").unwrap();
//! assert!(out.contains("cardId=XYZ123"));
//!
//! let out = transcode("Foo(cardData=(ksn=9011880B49277E, other=1))").unwrap();
//! assert!(out.contains("ksn=\"9011880B49277E\""));
//! ```
//!
//! ## Scope
//!
//! The crate is the transcoding core only. Sourcing the input (clipboard,
//! selection) and sinking the result (clipboard, notification) belong to the
//! embedding host; see `demos/pretty_print.rs` for a minimal driver. A pass is
//! a pure function of its input — separate invocations share nothing and can
//! run in parallel.

pub mod classify;
pub mod error;
pub mod options;
pub mod parser;
pub mod postprocess;
pub mod preprocess;

pub use classify::ScalarKind;
pub use error::{Error, Result};
pub use options::TranscodeOptions;
pub use parser::Parser;
pub use preprocess::PlaceholderTable;

use preprocess::COMMA_TOKEN;

/// Transcodes a watch dump into a pretty-printed fixture literal with default
/// options.
///
/// # Examples
///
/// ```rust
/// use watchlit::transcode;
///
/// let out = transcode("Type(field=value, field2=[a, b])").unwrap();
/// assert!(out.contains("field=\"value\""));
/// assert!(out.contains("field2=listOf("));
/// ```
///
/// # Errors
///
/// Returns [`Error::StackUnderflow`] when the input closes more levels than it
/// opened.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn transcode(input: &str) -> Result<String> {
    transcode_with_options(input, TranscodeOptions::default())
}

/// Transcodes a watch dump with custom options.
///
/// # Examples
///
/// ```rust
/// use watchlit::{transcode_with_options, TranscodeOptions};
///
/// let options = TranscodeOptions::new().with_indent(4);
/// let out = transcode_with_options("Foo(a=1)", options).unwrap();
/// assert_eq!(out, "Foo(\n    a=1\n)");
/// ```
///
/// # Errors
///
/// Returns [`Error::StackUnderflow`] when the input closes more levels than it
/// opened.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn transcode_with_options(input: &str, options: TranscodeOptions) -> Result<String> {
    let mut placeholders = PlaceholderTable::new();
    placeholders.insert(COMMA_TOKEN, ",");

    let prepared = preprocess::extract_opaque_field(input, &options.opaque_field, &mut placeholders);
    let prepared = preprocess::disambiguate_commas(&prepared);
    let parsed = Parser::new(&prepared, &options).run()?;
    Ok(postprocess::restore(&parsed, &placeholders))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcode_smoke() {
        let out = transcode("Foo(a=1, b=hello)").unwrap();
        assert!(out.starts_with("Foo(\n"));
        assert!(out.contains("a=1,"));
        assert!(out.contains("b=\"hello\""));
        assert!(out.ends_with(')'));
    }

    #[test]
    fn no_placeholder_survives() {
        let out = transcode("Foo(cardId=abc, items=[x, y], n=2)").unwrap();
        assert!(!out.contains('~'), "placeholder leaked: {out}");
    }

    #[test]
    fn underflow_is_reported_not_rendered() {
        assert!(transcode("Foo(a=1)))").is_err());
    }

    #[test]
    fn separate_invocations_are_independent() {
        let a = transcode("Foo(cardId=AAA)").unwrap();
        let b = transcode("Foo(cardId=BBB)").unwrap();
        assert!(a.contains("AAA") && !a.contains("BBB"));
        assert!(b.contains("BBB") && !b.contains("AAA"));
    }
}
