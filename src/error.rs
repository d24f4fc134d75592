//! Error types for the transcoder.
//!
//! A scan either completes or halts at the first internal error; callers receive
//! exactly one of a transcoded string or an [`Error`], never a partial success.

use thiserror::Error;

/// Represents all possible errors that can occur while transcoding a dump.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A structural pop or top-frame access was attempted with no frame left on
    /// the parse stack, e.g. for inputs with more closing than opening delimiters.
    ///
    /// ```rust
    /// use watchlit::{transcode, Error};
    ///
    /// let err = transcode("]]").unwrap_err();
    /// assert!(matches!(err, Error::StackUnderflow { .. }));
    /// assert!(err.to_string().contains("underflow"));
    /// ```
    #[error("parse stack underflow at byte {offset}")]
    StackUnderflow { offset: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
