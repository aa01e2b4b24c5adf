//! Error types for Hjson parsing and printing.
//!
//! All parse failures are reported as [`Error::Syntax`] carrying the 1-based
//! line and column of the offending position together with a short excerpt of
//! the source text, so the fault can be located without re-scanning the input.
//! Some errors additionally carry a hint, e.g. when a stray `}` or `]` inside
//! an already-parsed string value suggests an unquoted string ran too far.
//!
//! ## Examples
//!
//! ```rust
//! let err = hjson::parse("{a:1").unwrap_err();
//! assert!(err.to_string().contains("missing '}'"));
//! assert!(err.to_string().contains("at line"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by parsing or printing Hjson.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed input text. Fatal to the parse call; no partial value is
    /// ever returned.
    #[error("{}", format_syntax(.msg, .line, .col, .excerpt, .hint))]
    Syntax {
        msg: String,
        /// 1-based line of the offending position.
        line: usize,
        /// 1-based column of the offending position.
        col: usize,
        /// Up to 20 characters of source text starting at the position.
        excerpt: String,
        /// Optional remediation hint.
        hint: Option<String>,
    },

    /// A codec produced an invalid encoding, attributed by name.
    #[error("codec '{name}' failed: {msg}")]
    Codec { name: String, msg: String },

    /// Invalid codec registration or print configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A Rust type that has no Hjson representation was handed to
    /// [`to_value`](crate::to_value).
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Generic message, used by the serde integration.
    #[error("{0}")]
    Message(String),
}

fn format_syntax(
    msg: &str,
    line: &usize,
    col: &usize,
    excerpt: &str,
    hint: &Option<String>,
) -> String {
    let mut s = format!("{} at line {},{} >>>{} ...", msg, line, col, excerpt);
    if let Some(hint) = hint {
        s.push('\n');
        s.push_str(hint);
    }
    s
}

impl Error {
    /// Creates a syntax error with positional information.
    pub fn syntax(
        msg: impl Into<String>,
        line: usize,
        col: usize,
        excerpt: impl Into<String>,
    ) -> Self {
        Error::Syntax {
            msg: msg.into(),
            line,
            col,
            excerpt: excerpt.into(),
            hint: None,
        }
    }

    /// Creates an error attributed to a named codec.
    pub fn codec(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::Codec {
            name: name.into(),
            msg: msg.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Attaches a hint to a syntax error, unless one is already present.
    /// Other error kinds are returned unchanged.
    pub(crate) fn with_hint(mut self, new_hint: Option<String>) -> Self {
        if let Error::Syntax { ref mut hint, .. } = self {
            if hint.is_none() {
                *hint = new_hint;
            }
        }
        self
    }

    /// The hint attached to a syntax error, if any.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        match self {
            Error::Syntax { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    /// The 1-based (line, column) of a syntax error.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Syntax { line, col, .. } => Some((*line, *col)),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_carries_position_and_excerpt() {
        let err = Error::syntax("Bad string", 3, 7, "\\q rest of the line");
        let text = err.to_string();
        assert!(text.contains("Bad string at line 3,7"));
        assert!(text.contains(">>>\\q rest of the line ..."));
        assert_eq!(err.position(), Some((3, 7)));
        assert_eq!(err.hint(), None);
    }

    #[test]
    fn hint_is_appended_once() {
        let err = Error::syntax("End of input", 1, 4, "")
            .with_hint(Some("found '}' in a string value".to_string()))
            .with_hint(Some("ignored".to_string()));
        assert_eq!(err.hint(), Some("found '}' in a string value"));
        assert!(err.to_string().ends_with("found '}' in a string value"));
    }

    #[test]
    fn codec_error_names_the_codec() {
        let err = Error::codec("hex", "result contains '{'");
        assert_eq!(err.to_string(), "codec 'hex' failed: result contains '{'");
    }
}
