//! # hjson
//!
//! A parser and printer for the Hjson syntax, the human interface to JSON.
//!
//! Hjson extends JSON with the things people reach for when they edit
//! configuration by hand: comments, unquoted strings, optional commas and
//! quotes, and multiline string literals. Every JSON document is valid
//! Hjson and the data model stays plain JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use hjson::parse;
//!
//! let doc = parse(r#"
//! ## server settings
//! host: localhost
//! port: 8080
//! tags: [a, b]
//! "#).unwrap();
//!
//! let host = doc.value.as_object()
//!     .and_then(|o| o.get("host"))
//!     .and_then(|v| v.as_str());
//! assert_eq!(host, Some("localhost"));
//! ```
//!
//! ## Printing
//!
//! ```rust
//! use hjson::{hjson, to_string};
//!
//! let value = hjson!({"name": "Alice", "age": 30});
//! assert_eq!(to_string(&value).unwrap(), "{\n  name: Alice\n  age: 30\n}");
//! ```
//!
//! ## Round trips with comments
//!
//! With `keep_comments` on both sides, parsing and reprinting a tidy
//! document reproduces it, comments included:
//!
//! ```rust
//! use hjson::{parse_with_options, ParseOptions, PrintOptions};
//!
//! let text = "# app config\nname: demo\nport: 8080\n";
//! let opts = ParseOptions::new().with_keep_comments(true);
//! let doc = parse_with_options(text, &opts).unwrap();
//!
//! let out = doc.to_string(&PrintOptions::new().with_keep_comments(true)).unwrap();
//! assert_eq!(out, text);
//! ```
//!
//! ## Codecs
//!
//! Scalar spellings beyond JSON are pluggable. The standard registry
//! reads and writes `Inf`, `-Inf`, `NaN`, `-0`, hexadecimal integers and
//! ISO 8601 dates, see [`codec`] for writing your own.
//!
//! ## Serde
//!
//! Any `Serialize` type converts to a [`Value`] with [`to_value`], and
//! [`Value`] itself implements `Serialize` and `Deserialize` so it can
//! cross into other formats.

pub mod codec;
pub mod comments;
pub mod error;
pub mod macros;
pub mod map;
mod num;
pub mod options;
mod parse;
mod print;
mod render;
pub mod ser;
pub mod syntax;
pub mod value;

pub use comments::{
    ArrayComments, CommentStore, MemberComment, NodeComments, ObjectComments, Segment,
};
pub use error::{Error, Result};
pub use map::Map;
pub use options::{Eol, Indent, MultilinePolicy, ParseOptions, PrintOptions, QuotePolicy};
pub use ser::{to_value, ValueSerializer};
pub use value::Value;

/// A parsed document: the value plus, when requested, its comments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub value: Value,
    /// Present when the document was parsed with `keep_comments`.
    pub comments: Option<CommentStore>,
}

impl Document {
    /// Prints the document, re-emitting comments when both the document
    /// and `options` carry them.
    ///
    /// # Errors
    ///
    /// Returns an error if a codec produces an invalid token.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn to_string(&self, options: &PrintOptions) -> Result<String> {
        print::print(&self.value, self.comments.as_ref(), options)
    }
}

/// Parses Hjson text with default options.
///
/// # Examples
///
/// ```rust
/// let doc = hjson::parse("rate: 3").unwrap();
/// let rate = doc.value.as_object().and_then(|o| o.get("rate"));
/// assert_eq!(rate.and_then(|v| v.as_f64()), Some(3.0));
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] with line and column information when the
/// input is not valid Hjson.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(text: &str) -> Result<Document> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parses Hjson text with explicit options.
///
/// With [`ParseOptions::with_keep_comments`] the returned document also
/// carries a [`CommentStore`].
///
/// # Errors
///
/// Returns [`Error::Syntax`] when the input is not valid Hjson.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Result<Document> {
    let (value, comments) = parse::parse_text(text, options)?;
    Ok(Document { value, comments })
}

/// Prints a value as Hjson text with default options.
///
/// # Examples
///
/// ```rust
/// use hjson::{hjson, to_string};
///
/// let v = hjson!([1, 2]);
/// assert_eq!(to_string(&v).unwrap(), "[\n  1\n  2\n]");
/// ```
///
/// # Errors
///
/// Returns an error if a codec produces an invalid token.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with_options(value, None, &PrintOptions::default())
}

/// Prints a value as Hjson text, optionally re-emitting comments from a
/// [`CommentStore`] captured by an earlier parse.
///
/// # Errors
///
/// Returns an error if a codec produces an invalid token.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(
    value: &Value,
    comments: Option<&CommentStore>,
    options: &PrintOptions,
) -> Result<String> {
    print::print(value, comments, options)
}
