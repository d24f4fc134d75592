//! Property-based tests over generated watch dumps.
//!
//! Balanced inputs must keep their nesting depth, every opened group must get a
//! rendered close, and no preprocessing placeholder may ever leak into output.

use proptest::prelude::*;
use watchlit::transcode;

/// Maximum nesting depth, counting both bracket kinds on input and the
/// parenthesized literals they become on output.
fn max_depth(text: &str) -> i64 {
    let mut depth = 0i64;
    let mut max = 0i64;
    for ch in text.chars() {
        match ch {
            '(' | '[' => {
                depth += 1;
                max = max.max(depth);
            }
            ')' | ']' => depth -= 1,
            _ => {}
        }
    }
    max
}

fn balanced(text: &str) -> bool {
    let mut depth = 0i64;
    for ch in text.chars() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Generates dumps in the debugger's shape: records with `key=value` fields,
/// lists of values, scalar leaves.
fn dump_strategy() -> impl Strategy<Value = String> {
    let leaf = "[a-z]{1,6}";
    leaf.prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            (
                "[A-Z][a-z]{2,5}",
                prop::collection::vec(("[a-z]{1,5}", inner.clone()), 1..4),
            )
                .prop_map(|(name, fields)| {
                    let body = fields
                        .into_iter()
                        .map(|(k, v)| format!("{k}={v}"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{name}({body})")
                }),
            prop::collection::vec(inner, 0..4)
                .prop_map(|items| format!("[{}]", items.join(", "))),
        ]
    })
}

proptest! {
    #[test]
    fn balanced_input_keeps_depth_and_balance(input in dump_strategy()) {
        let out = transcode(&input).unwrap();
        prop_assert!(balanced(&out), "unbalanced output for {input:?}: {out:?}");
        prop_assert_eq!(max_depth(&out), max_depth(&input));
    }

    #[test]
    fn no_placeholder_survives(input in dump_strategy()) {
        let out = transcode(&input).unwrap();
        prop_assert!(!out.contains('~'), "placeholder leaked for {input:?}: {out:?}");
    }

    #[test]
    fn arbitrary_ascii_never_panics(input in "[ -~]{0,48}") {
        // Malformed input may fail or render malformed, but must never panic.
        let _ = transcode(&input);
    }
}
