//! Configuration options for transcoding.
//!
//! [`TranscodeOptions`] controls the indentation width and the two marker field
//! names the transcoder treats specially:
//!
//! - the **opaque field**, whose value must survive the scan byte-for-byte
//!   (default `"cardId"`), and
//! - the **forced-string record**, whose scalar fields are always quoted even when
//!   they look numeric (default `"cardData"`).
//!
//! ## Examples
//!
//! ```rust
//! use watchlit::{transcode_with_options, TranscodeOptions};
//!
//! let options = TranscodeOptions::new()
//!     .with_indent(4)
//!     .with_opaque_field("traceId");
//! let out = transcode_with_options("Req(traceId=a/b+c=, n=1)", options).unwrap();
//! assert!(out.contains("traceId=a/b+c="));
//! ```

/// Configuration for a transcoding pass.
///
/// Marker field names are matched case-insensitively, as the source debugger
/// output is not consistent about casing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscodeOptions {
    /// Spaces per nesting level in the rendered literal.
    pub indent: usize,
    /// Field whose value is preserved verbatim, unclassified and unquoted.
    pub opaque_field: String,
    /// Record whose scalar fields are always rendered as quoted strings.
    pub forced_string_record: String,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        TranscodeOptions {
            indent: 2,
            opaque_field: "cardId".to_string(),
            forced_string_record: "cardData".to_string(),
        }
    }
}

impl TranscodeOptions {
    /// Creates the default options (2-space indent, `cardId` / `cardData` markers).
    ///
    /// ```rust
    /// use watchlit::TranscodeOptions;
    ///
    /// let options = TranscodeOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert_eq!(options.opaque_field, "cardId");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per nesting level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the field whose value passes through the scan unmodified.
    ///
    /// An empty name disables opaque-field handling.
    #[must_use]
    pub fn with_opaque_field(mut self, field: impl Into<String>) -> Self {
        self.opaque_field = field.into();
        self
    }

    /// Sets the record whose scalar fields are always quoted.
    ///
    /// An empty name disables force-quoting.
    #[must_use]
    pub fn with_forced_string_record(mut self, record: impl Into<String>) -> Self {
        self.forced_string_record = record.into();
        self
    }
}
