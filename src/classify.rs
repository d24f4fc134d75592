//! Scalar classification.
//!
//! Decides the literal form of each leaf value: booleans and nulls stay bare,
//! plain numbers stay unquoted, everything else is text the parser will quote.
//! Classification order matters — `null`-containing values are recognized before
//! the numeric check so that e.g. `nullable0` is never treated as a number.

/// The literal form a scalar takes in the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// `true` / `false`, any casing.
    Boolean,
    /// Contains `null` (case-insensitive) anywhere.
    Null,
    /// Matches an optional `-`, digits, optional `.`, optional trailing digits.
    Number,
    /// Anything else; rendered as a quoted string.
    Text,
}

/// Classifies a trimmed scalar value.
///
/// ```rust
/// use watchlit::classify::{classify, ScalarKind};
///
/// assert_eq!(classify("TRUE"), ScalarKind::Boolean);
/// assert_eq!(classify("null"), ScalarKind::Null);
/// assert_eq!(classify("-12.5"), ScalarKind::Number);
/// assert_eq!(classify("TO_GO"), ScalarKind::Text);
/// ```
pub fn classify(raw: &str) -> ScalarKind {
    let lower = raw.to_ascii_lowercase();
    if lower == "true" || lower == "false" {
        ScalarKind::Boolean
    } else if lower.contains("null") {
        ScalarKind::Null
    } else if is_numeric(raw) {
        ScalarKind::Number
    } else {
        ScalarKind::Text
    }
}

/// Whether a value is a plain decimal number: optional leading `-`, one or more
/// digits, an optional `.`, and optional trailing digits.
pub fn is_numeric(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };
    !int_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.map_or(true, |f| f.bytes().all(|b| b.is_ascii_digit()))
}
