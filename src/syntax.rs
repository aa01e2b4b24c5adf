//! The Hjson syntax as implemented by this library.
//!
//! # Overview
//!
//! Hjson is a superset of JSON meant to be written and edited by people.
//! Every valid JSON document is a valid Hjson document, and the parser
//! additionally accepts comments, unquoted strings, optional commas and
//! multiline string literals.
//!
//! # Objects
//!
//! Braces are optional at the root, commas are optional between members
//! when members sit on their own lines:
//!
//! ```text
//! name: Alice
//! age: 30
//! active: true
//! ```
//!
//! Keys may be written without quotes as long as they contain none of
//! `, { [ } ] :`, no whitespace and do not start a comment. Anything else
//! needs JSON quoting: `"user name": 1`.
//!
//! # Quoteless strings
//!
//! A value that does not start like a number, keyword, string, comment or
//! punctuator runs to the end of the line, with surrounding whitespace
//! trimmed:
//!
//! ```text
//! title: Hello, World!
//! path: C:\temp
//! ```
//!
//! Because the line is taken whole, a `#` on the same line is part of the
//! value, not a comment. Commas inside the text are kept as well.
//!
//! Values that *start* like a number or keyword are only taken as such
//! when the token ends at a line end, comma, bracket or comment. Anything
//! else falls back to a string:
//!
//! ```text
//! a: 3        # the number three
//! b: 3 dogs   # the string "3 dogs"
//! c: true     # boolean
//! d: true dat # the string "true dat"
//! ```
//!
//! # Comments
//!
//! Three styles, all treated as whitespace by the parser:
//!
//! ```text
//! # hash comment
//! // double slash comment
//! /* block
//!    comment */
//! ```
//!
//! With [`ParseOptions::with_keep_comments`](crate::ParseOptions::with_keep_comments)
//! the runs around members are captured in a [`CommentStore`](crate::CommentStore)
//! and re-emitted by the printer.
//!
//! # Multiline strings
//!
//! A value starting with `'''` runs until the closing fence. The column
//! of the opening fence defines the indentation that is stripped from
//! every line, and the newline before the closing fence is dropped:
//!
//! ```text
//! text:
//!     '''
//!     first line
//!       indented line
//!     '''
//! ```
//!
//! Escapes are not processed inside a fence, `\n` stays two characters.
//!
//! # Numbers and literals
//!
//! Numbers follow JSON: optional minus, no leading zeros, optional
//! fraction and exponent. `true`, `false` and `null` are literals. All
//! other scalar spellings are handled by codecs, see [`crate::codec`]:
//! the standard set reads `Inf`, `-Inf`, `NaN`, `-0`, hexadecimal
//! integers like `0x1f` and ISO 8601 dates.
//!
//! # Root values
//!
//! A document may be a braced object, an array, a braceless object or a
//! single scalar. Braceless member parsing is tried first, then the
//! document is re-parsed as a plain value.

// documentation only
