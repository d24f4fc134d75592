//! Placeholder restoration.
//!
//! The final pass: every deferred separator comma and the opaque field's value
//! return to their original text, in the order the placeholders were registered.

use crate::preprocess::PlaceholderTable;

/// Replays every placeholder substitution recorded during preprocessing.
/// Restoration is total: no token survives into the returned text.
pub fn restore(text: &str, table: &PlaceholderTable) -> String {
    let mut out = text.to_string();
    for (token, original) in table.entries() {
        out = out.replace(token, original);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::{COMMA_TOKEN, OPAQUE_TOKEN};

    #[test]
    fn restores_all_occurrences() {
        let mut table = PlaceholderTable::new();
        table.insert(COMMA_TOKEN, ",");
        table.insert(OPAQUE_TOKEN, "vbW+Vo=");
        let out = restore("a~comma% b~comma% id=~opaque%", &table);
        assert_eq!(out, "a, b, id=vbW+Vo=");
    }

    #[test]
    fn empty_table_is_identity() {
        let table = PlaceholderTable::new();
        assert_eq!(restore("untouched", &table), "untouched");
    }
}
