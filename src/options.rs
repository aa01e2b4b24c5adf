//! Configuration options for Hjson parsing and printing.
//!
//! This module provides two option structs:
//!
//! - [`ParseOptions`]: comment retention, codec registry, nesting limit
//! - [`PrintOptions`]: indentation, line endings, quoting and layout policies
//!
//! ## Examples
//!
//! ```rust
//! use hjson::{ParseOptions, PrintOptions, QuotePolicy};
//!
//! let parse = ParseOptions::new().with_keep_comments(true);
//!
//! let print = PrintOptions::new()
//!     .with_indent(4)
//!     .with_quote_policy(QuotePolicy::AllStrings)
//!     .with_braces_same_line(true);
//! ```

use crate::codec::CodecRegistry;

/// Indentation unit used by the printer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Indent {
    /// Indent with the given number of spaces per level.
    Spaces(usize),
    /// Indent with a literal string per level, e.g. `"\t"`.
    Literal(String),
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

impl Indent {
    pub(crate) fn unit(&self) -> String {
        match self {
            Indent::Spaces(n) => " ".repeat(*n),
            Indent::Literal(s) => s.clone(),
        }
    }
}

/// Line ending emitted by the printer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Eol {
    #[default]
    Lf,
    CrLf,
}

impl Eol {
    /// Returns the string representation of this line ending.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Eol::Lf => "\n",
            Eol::CrLf => "\r\n",
        }
    }
}

/// When the printer quotes strings and keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum QuotePolicy {
    /// Quote only when required for an unambiguous reparse.
    #[default]
    Minimal,
    /// Quote every string value; keys stay minimal.
    AllStrings,
    /// Quote every key; string values stay minimal.
    AllKeys,
    /// Quote every string value and every key.
    All,
}

impl QuotePolicy {
    pub(crate) fn quote_strings(&self) -> bool {
        matches!(self, QuotePolicy::AllStrings | QuotePolicy::All)
    }

    pub(crate) fn quote_keys(&self) -> bool {
        matches!(self, QuotePolicy::AllKeys | QuotePolicy::All)
    }
}

/// Whether the printer may use `'''` fenced multiline strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MultilinePolicy {
    /// Use a fence for any eligible multi-line string.
    #[default]
    Standard,
    /// Use a fence only when the string contains no tabs.
    NoTabs,
    /// Never use fences; escape newlines inside quoted strings instead.
    Off,
}

/// Configuration for [`parse_with_options`](crate::parse_with_options).
///
/// # Examples
///
/// ```rust
/// use hjson::ParseOptions;
///
/// let opts = ParseOptions::new().with_keep_comments(true);
/// let doc = hjson::parse_with_options("a: 1 # one\n", &opts).unwrap();
/// assert!(doc.comments.is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    /// Capture comments and layout into a [`CommentStore`](crate::CommentStore).
    pub keep_comments: bool,
    /// Codecs tried against every quoteless scalar, in registration order.
    pub codecs: CodecRegistry,
    /// Maximum container nesting depth. Zero means the default of 1024.
    pub max_depth: usize,
}

impl ParseOptions {
    /// Creates default options: comments discarded, no codecs, depth 1024.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables comment retention.
    #[must_use]
    pub fn with_keep_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }

    /// Sets the codec registry consulted for quoteless scalars.
    #[must_use]
    pub fn with_codecs(mut self, codecs: CodecRegistry) -> Self {
        self.codecs = codecs;
        self
    }

    /// Sets the maximum container nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub(crate) fn effective_max_depth(&self) -> usize {
        if self.max_depth == 0 {
            1024
        } else {
            self.max_depth
        }
    }
}

/// Configuration for [`to_string_with_options`](crate::to_string_with_options).
///
/// # Examples
///
/// ```rust
/// use hjson::{PrintOptions, Value};
///
/// let opts = PrintOptions::new().with_braces_same_line(true);
/// let text = hjson::to_string_with_options(&hjson::hjson!({"a": 1}), None, &opts).unwrap();
/// assert_eq!(text, "{\n  a: 1\n}");
/// ```
#[derive(Clone, Debug)]
pub struct PrintOptions {
    /// Indentation unit, two spaces by default.
    pub indent: Indent,
    /// Line ending, LF by default.
    pub eol: Eol,
    /// Re-emit comments from a [`CommentStore`](crate::CommentStore).
    pub keep_comments: bool,
    /// Put `{` and `[` on the same line as the key.
    pub braces_same_line: bool,
    /// Quoting policy for strings and keys.
    pub quote_policy: QuotePolicy,
    /// Multiline fence policy.
    pub multiline_policy: MultilinePolicy,
    /// Single-line budget for small containers. Zero disables condensing.
    pub condense: usize,
    /// Emit comma separators in condensed and single-line output.
    pub separator: bool,
    /// Sort object keys alphabetically instead of preserving order.
    pub sort_keys: bool,
    /// Emit ANSI color escapes.
    pub colorize: bool,
    /// Codecs offered each value before plain formatting, in order.
    pub codecs: CodecRegistry,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            indent: Indent::default(),
            eol: Eol::default(),
            keep_comments: false,
            braces_same_line: false,
            quote_policy: QuotePolicy::default(),
            multiline_policy: MultilinePolicy::default(),
            condense: 0,
            separator: false,
            sort_keys: false,
            colorize: false,
            codecs: CodecRegistry::default(),
        }
    }
}

impl PrintOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation to the given number of spaces per level.
    #[must_use]
    pub fn with_indent(mut self, spaces: usize) -> Self {
        self.indent = Indent::Spaces(spaces);
        self
    }

    /// Sets the indentation to a literal string per level.
    #[must_use]
    pub fn with_indent_str(mut self, unit: impl Into<String>) -> Self {
        self.indent = Indent::Literal(unit.into());
        self
    }

    /// Sets the line ending.
    #[must_use]
    pub fn with_eol(mut self, eol: Eol) -> Self {
        self.eol = eol;
        self
    }

    /// Enables or disables comment re-emission.
    #[must_use]
    pub fn with_keep_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }

    /// Puts opening braces on the same line as the key.
    #[must_use]
    pub fn with_braces_same_line(mut self, same_line: bool) -> Self {
        self.braces_same_line = same_line;
        self
    }

    /// Sets the quoting policy.
    #[must_use]
    pub fn with_quote_policy(mut self, policy: QuotePolicy) -> Self {
        self.quote_policy = policy;
        self
    }

    /// Sets the multiline fence policy.
    #[must_use]
    pub fn with_multiline_policy(mut self, policy: MultilinePolicy) -> Self {
        self.multiline_policy = policy;
        self
    }

    /// Sets the single-line budget for condensing small containers.
    #[must_use]
    pub fn with_condense(mut self, budget: usize) -> Self {
        self.condense = budget;
        self
    }

    /// Enables comma separators in condensed output.
    #[must_use]
    pub fn with_separator(mut self, separator: bool) -> Self {
        self.separator = separator;
        self
    }

    /// Sorts object keys alphabetically.
    #[must_use]
    pub fn with_sort_keys(mut self, sort: bool) -> Self {
        self.sort_keys = sort;
        self
    }

    /// Enables ANSI color output.
    #[must_use]
    pub fn with_colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    /// Sets the codec registry offered each value before plain formatting.
    #[must_use]
    pub fn with_codecs(mut self, codecs: CodecRegistry) -> Self {
        self.codecs = codecs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = ParseOptions::new();
        assert!(!p.keep_comments);
        assert_eq!(p.effective_max_depth(), 1024);

        let o = PrintOptions::new();
        assert_eq!(o.indent, Indent::Spaces(2));
        assert_eq!(o.eol, Eol::Lf);
        assert_eq!(o.condense, 0);
        assert!(!o.braces_same_line);
    }

    #[test]
    fn builders_chain() {
        let o = PrintOptions::new()
            .with_indent(4)
            .with_eol(Eol::CrLf)
            .with_quote_policy(QuotePolicy::All)
            .with_condense(40)
            .with_separator(true);
        assert_eq!(o.indent.unit(), "    ");
        assert_eq!(o.eol.as_str(), "\r\n");
        assert!(o.quote_policy.quote_strings());
        assert!(o.quote_policy.quote_keys());
        assert_eq!(o.condense, 40);
    }

    #[test]
    fn indent_literal() {
        let o = PrintOptions::new().with_indent_str("\t");
        assert_eq!(o.indent.unit(), "\t");
    }
}
