//! Side-table storage for comments and document layout.
//!
//! Comments never live inside [`Value`](crate::Value). When parsing with
//! `keep_comments`, every captured comment run is filed in a [`CommentStore`]
//! under the path of the container it belongs to, keyed by member name for
//! objects and by index for arrays. The printer walks the same paths to
//! re-emit the comments. Structural edits to the value tree leave the store
//! untouched; a path that no longer resolves is simply skipped when printing.

use indexmap::IndexMap;
use std::collections::HashMap;

/// One step in a path from the document root to a container.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// An object member, by key.
    Key(String),
    /// An array element, by position.
    Index(usize),
}

/// Comment text attached to a single member.
///
/// `before` holds the raw run between the previous member (or the container
/// opener) and this member. `after` holds a trailing comment on the same
/// line as the member's value. Either may be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberComment {
    pub before: String,
    pub after: String,
}

impl MemberComment {
    pub(crate) fn is_blank(&self) -> bool {
        is_blank(&self.before) && is_blank(&self.after)
    }
}

/// Comments captured inside one object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectComments {
    /// Per-member comments, keyed by member name.
    pub members: IndexMap<String, MemberComment>,
    /// Key order as seen in the source. Keys missing from the value at print
    /// time are skipped; keys added later print after these, in map order.
    pub order: Vec<String>,
    /// Run between the last member and the closing brace.
    pub end: String,
}

/// Comments captured inside one array.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArrayComments {
    /// Per-element comments, by position.
    pub members: Vec<MemberComment>,
    /// Run between the last element and the closing bracket.
    pub end: String,
}

/// Comments for one container node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeComments {
    Object(ObjectComments),
    Array(ArrayComments),
}

impl NodeComments {
    /// True if the node carries any non-blank comment text.
    pub(crate) fn has_any(&self) -> bool {
        match self {
            NodeComments::Object(oc) => {
                !is_blank(&oc.end) || oc.members.values().any(|m| !m.is_blank())
            }
            NodeComments::Array(ac) => {
                !is_blank(&ac.end) || ac.members.iter().any(|m| !m.is_blank())
            }
        }
    }
}

/// Comments and layout captured from a parse, addressed by container path.
///
/// # Examples
///
/// ```rust
/// use hjson::ParseOptions;
///
/// let opts = ParseOptions::new().with_keep_comments(true);
/// let doc = hjson::parse_with_options("# config\nport: 8080\n", &opts).unwrap();
/// let store = doc.comments.as_ref().unwrap();
/// assert!(store.header.contains("# config"));
/// assert!(store.root_braceless);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentStore {
    /// Raw text before the root value.
    pub header: String,
    /// Raw text after the root value, emitted verbatim.
    pub footer: String,
    /// The root object had no braces in the source.
    pub root_braceless: bool,
    /// Per-container comments, keyed by path from the root. The root
    /// container's path is the empty slice.
    pub nodes: HashMap<Vec<Segment>, NodeComments>,
}

impl CommentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The comments for the container at `path`, if any were captured.
    #[must_use]
    pub fn node(&self, path: &[Segment]) -> Option<&NodeComments> {
        self.nodes.get(path)
    }
}

/// True if the text contains nothing but whitespace.
pub(crate) fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Splits a captured run into trimmed lines ready for printing.
///
/// The first line is dropped when empty (it is the structural newline that
/// ended the previous member's line, not a blank the author wrote), interior
/// blank lines are kept, and trailing blank lines are removed.
pub(crate) fn comment_lines(raw: &str) -> Vec<String> {
    let mut lines: Vec<String> = raw.split('\n').map(|l| l.trim().to_string()).collect();
    if lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Makes every non-blank line a comment, so edited or hand-built stores
/// cannot inject syntax into the output. Lines already inside a `/* */`
/// block or starting with a comment marker pass through unchanged.
pub(crate) fn force_comment(lines: Vec<String>) -> Vec<String> {
    let mut in_block = false;
    lines
        .into_iter()
        .map(|line| {
            if in_block {
                if line.contains("*/") {
                    in_block = false;
                }
                line
            } else if line.is_empty()
                || line.starts_with('#')
                || line.starts_with("//")
                || line.starts_with("/*")
            {
                if line.starts_with("/*") && !line.contains("*/") {
                    in_block = true;
                }
                line
            } else {
                format!("# {line}")
            }
        })
        .collect()
}
