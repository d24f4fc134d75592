//! The structural parser.
//!
//! A single forward scan over the preprocessed text, driven by a stack of
//! [`Frame`]s. Each frame owns the in-progress buffer for one nesting level and
//! the indentation prefix fixed when the level opened. Closing a level folds its
//! buffer (whitespace-trimmed) into the parent exactly once; nothing is retained
//! after the fold.
//!
//! At every step the drive loop inspects the character at the cursor: the five
//! control symbols `[ ] ( ) =` get their own transitions, everything else is
//! handed to the top frame's state. The cursor only ever advances.
//!
//! Lists render as `listOf(...)` builder literals (or `emptyList()` when the
//! level closed without content), records as parenthesized groups (or `()`).
//! Scalars introduced by `=` are classified on completion; see
//! [`crate::classify`].

use crate::classify::{classify, ScalarKind};
use crate::error::{Error, Result};
use crate::options::TranscodeOptions;

/// Parsing state of one nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// The implicit outermost level.
    Base,
    /// A scalar (or nested structure) introduced by `=`.
    Value,
    /// A value that must pass through unclassified (the opaque field).
    StringPassthrough,
    /// Inside `[` ... `]`.
    List,
    /// Inside `(` ... `)`.
    Object,
}

/// One entry of the parse stack.
#[derive(Debug)]
struct Frame {
    state: FrameState,
    buf: String,
    /// Fixed at creation: indent unit repeated depth-at-creation times. Sibling
    /// pushes and pops elsewhere never change it.
    indent: String,
    is_list_or_object: bool,
}

impl Frame {
    fn new(state: FrameState, depth: usize, unit: &str) -> Self {
        Frame {
            state,
            buf: String::new(),
            indent: unit.repeat(depth),
            is_list_or_object: false,
        }
    }

    fn has_content(&self) -> bool {
        self.buf.chars().any(|c| !c.is_whitespace())
    }
}

/// The structural parser. One instance per invocation; consumed by [`run`].
///
/// [`run`]: Parser::run
pub struct Parser<'a> {
    input: &'a str,
    cursor: usize,
    stack: Vec<Frame>,
    out: String,
    indent_unit: String,
    opaque_marker: String,
    forced_string_marker: String,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: &TranscodeOptions) -> Self {
        Parser {
            input,
            cursor: 0,
            stack: Vec::new(),
            out: String::with_capacity(input.len() * 2),
            indent_unit: " ".repeat(options.indent),
            opaque_marker: options.opaque_field.to_ascii_lowercase(),
            forced_string_marker: options.forced_string_record.to_ascii_lowercase(),
        }
    }

    /// Runs the scan to completion, unwinding any frames left open at
    /// end-of-input, and returns the rendered text.
    pub fn run(mut self) -> Result<String> {
        self.push(FrameState::Base);
        while let Some(ch) = self.peek() {
            match ch {
                '[' => self.open(FrameState::List),
                '(' => self.open(FrameState::Object),
                ']' => self.close(FrameState::List)?,
                ')' => self.close(FrameState::Object)?,
                '=' => self.begin_value(),
                _ => self.step(ch)?,
            }
        }
        while !self.stack.is_empty() {
            self.pop()?;
        }
        Ok(self.out)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.cursor..].chars().next()
    }

    fn push(&mut self, state: FrameState) {
        let depth = self.stack.len();
        self.stack.push(Frame::new(state, depth, &self.indent_unit));
    }

    /// Folds the top frame's buffer, trimmed, into its parent (or the final
    /// output buffer) and discards the frame.
    fn pop(&mut self) -> Result<()> {
        let frame = self
            .stack
            .pop()
            .ok_or(Error::StackUnderflow { offset: self.cursor })?;
        let merged = frame.buf.trim();
        match self.stack.last_mut() {
            Some(parent) => parent.buf.push_str(merged),
            None => self.out.push_str(merged),
        }
        Ok(())
    }

    fn write(&mut self, s: &str) {
        match self.stack.last_mut() {
            Some(top) => top.buf.push_str(s),
            None => self.out.push_str(s),
        }
    }

    fn write_char(&mut self, ch: char) {
        match self.stack.last_mut() {
            Some(top) => top.buf.push(ch),
            None => self.out.push(ch),
        }
    }

    fn top_state(&self) -> Option<FrameState> {
        self.stack.last().map(|f| f.state)
    }

    /// Buffer of the active context: the top frame's, or the final output
    /// buffer once everything has been popped.
    fn active_buffer(&self) -> &str {
        self.stack.last().map_or(self.out.as_str(), |f| f.buf.as_str())
    }

    /// Continuation for a non-symbol character, dispatched on the top state.
    fn step(&mut self, ch: char) -> Result<()> {
        let state = self
            .top_state()
            .ok_or(Error::StackUnderflow { offset: self.cursor })?;
        match state {
            FrameState::Value | FrameState::StringPassthrough => {
                if ch == ',' {
                    self.finish_value()
                } else {
                    self.cursor += ch.len_utf8();
                    self.write_char(ch);
                    Ok(())
                }
            }
            FrameState::Base | FrameState::List | FrameState::Object => {
                self.copy_separating(ch);
                Ok(())
            }
        }
    }

    /// Copies one character; a comma additionally breaks the line at the
    /// enclosing level's indentation. Input spacing after a separator is
    /// superseded by that indentation.
    fn copy_separating(&mut self, ch: char) {
        self.cursor += ch.len_utf8();
        self.write_char(ch);
        if ch == ',' {
            let indent = self
                .stack
                .last()
                .map(|f| f.indent.clone())
                .unwrap_or_default();
            self.write("\n");
            self.write(&indent);
            while self.input[self.cursor..].starts_with(' ') {
                self.cursor += 1;
            }
        }
    }

    /// `[` / `(` transition: a pending scalar that turns out to open a structure
    /// must never be quoted later.
    fn open(&mut self, state: FrameState) {
        if let Some(top) = self.stack.last_mut() {
            if top.state == FrameState::Value {
                top.is_list_or_object = true;
            }
        }
        self.push(state);
        self.cursor += 1;
    }

    /// `]` / `)` transition: finalize a dangling value, wrap the level's buffer
    /// as a collection or group literal, and fold it into the parent.
    fn close(&mut self, kind: FrameState) -> Result<()> {
        if matches!(
            self.top_state(),
            Some(FrameState::Value | FrameState::StringPassthrough)
        ) {
            self.finish_value()?;
        }

        let parent_indent = match self.stack.len() {
            0 | 1 => String::new(),
            n => self.stack[n - 2].indent.clone(),
        };
        let top = self
            .stack
            .last_mut()
            .ok_or(Error::StackUnderflow { offset: self.cursor })?;
        let wrapped = if top.has_content() {
            match kind {
                FrameState::List => {
                    format!("listOf(\n{}{}\n{})", top.indent, top.buf, parent_indent)
                }
                _ => format!("(\n{}{}\n{})", top.indent, top.buf, parent_indent),
            }
        } else if kind == FrameState::List {
            "emptyList()".to_string()
        } else {
            "()".to_string()
        };
        self.cursor += 1;
        top.buf = wrapped;
        self.pop()
    }

    /// `=` transition: push a frame for the upcoming value. Only a key naming
    /// the opaque field gets a passthrough frame, so the inserted placeholder
    /// is never classified. The key is the text written since the last
    /// separator; matching the whole level buffer would capture every field
    /// after the opaque one.
    fn begin_value(&mut self) {
        let key = self
            .active_buffer()
            .rsplit(',')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        let passthrough = !self.opaque_marker.is_empty() && key.contains(&self.opaque_marker);
        self.push(if passthrough {
            FrameState::StringPassthrough
        } else {
            FrameState::Value
        });
        self.cursor += 1;
        self.write_char('=');
    }

    /// Completes the value on top of the stack: strip the leading `=`, trim,
    /// classify, re-attach the `=`, then fold the frame into its parent. The
    /// terminator stays in the input; the enclosing frame consumes it and
    /// emits the separator line break.
    fn finish_value(&mut self) -> Result<()> {
        let forced = self.forced_string_context();
        let top = self
            .stack
            .last_mut()
            .ok_or(Error::StackUnderflow { offset: self.cursor })?;
        let raw = top
            .buf
            .strip_prefix('=')
            .unwrap_or(&top.buf)
            .trim()
            .to_string();

        let quote = match top.state {
            FrameState::StringPassthrough => false,
            _ => {
                !top.is_list_or_object && (forced || classify(&raw) == ScalarKind::Text)
            }
        };

        top.buf = if quote {
            format!("=\"{}\"", raw)
        } else {
            format!("={}", raw)
        };
        self.pop()
    }

    /// Whether the value being finished is a scalar field of a forced-string
    /// record: the grandparent frame is a value whose buffer names the record
    /// type, or (for untyped records) the key written since the last separator
    /// one level further out names it.
    fn forced_string_context(&self) -> bool {
        if self.forced_string_marker.is_empty() {
            return false;
        }
        let n = self.stack.len();
        if n < 3 {
            return false;
        }
        let grand = &self.stack[n - 3];
        if grand.state != FrameState::Value {
            return false;
        }
        if grand
            .buf
            .to_ascii_lowercase()
            .contains(&self.forced_string_marker)
        {
            return true;
        }
        n >= 4
            && self.stack[n - 4]
                .buf
                .rsplit(',')
                .next()
                .unwrap_or("")
                .to_ascii_lowercase()
                .contains(&self.forced_string_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<String> {
        Parser::new(input, &TranscodeOptions::default()).run()
    }

    #[test]
    fn renders_single_field_record() {
        assert_eq!(parse("Foo(a=1)").unwrap(), "Foo(\n  a=1\n)");
    }

    #[test]
    fn empty_collections_get_explicit_literals() {
        assert_eq!(parse("Foo(xs=[])").unwrap(), "Foo(\n  xs=emptyList()\n)");
        assert_eq!(parse("Foo(o=())").unwrap(), "Foo(\n  o=()\n)");
    }

    #[test]
    fn structure_valued_fields_are_never_quoted() {
        let out = parse("Foo(inner=Bar(x=ab))").unwrap();
        assert!(out.contains("inner=Bar("));
        assert!(out.contains("x=\"ab\""));
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(parse("").unwrap(), "");
    }

    #[test]
    fn unbalanced_closers_underflow() {
        assert!(matches!(
            parse("]]"),
            Err(Error::StackUnderflow { offset: 1 })
        ));
        assert!(matches!(parse("))"), Err(Error::StackUnderflow { .. })));
    }

    #[test]
    fn unterminated_input_unwinds_without_wrapping() {
        // Malformed input is not detected; the unwind folds buffers as-is, and
        // the consumed opener is never re-rendered without its close.
        assert_eq!(parse("Foo(a=1").unwrap(), "Fooa=1");
    }

    #[test]
    fn indent_width_follows_options() {
        let options = TranscodeOptions::new().with_indent(4);
        let out = Parser::new("Foo(a=1)", &options).run().unwrap();
        assert_eq!(out, "Foo(\n    a=1\n)");
    }

    #[test]
    fn passthrough_value_is_left_unquoted() {
        let out = parse("Foo(cardId=~opaque%)").unwrap();
        assert!(out.contains("cardId=~opaque%"));
    }

    #[test]
    fn passthrough_is_scoped_to_the_marker_key() {
        // Fields after the opaque one are classified normally.
        let out = parse("Foo(cardId=~opaque%, x=ab)").unwrap();
        assert!(out.contains("cardId=~opaque%"));
        assert!(out.contains("x=\"ab\""));
    }

    #[test]
    fn separator_spacing_is_normalized_to_the_indent() {
        assert_eq!(parse("Foo(a=1, b=2)").unwrap(), "Foo(\n  a=1,\n  b=2\n)");
    }
}
