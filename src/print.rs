//! The Hjson printer.
//!
//! Produces text that parses back to the same value: quoteless strings are
//! used only when an unambiguous reparse is guaranteed, otherwise the
//! printer falls back to quotes, `'''` fences or escape sequences, in that
//! order of preference. With `keep_comments` and a [`CommentStore`] the
//! printer re-emits captured comments at the paths they were filed under.

use crate::codec;
use crate::comments::{
    comment_lines, force_comment, is_blank, CommentStore, NodeComments, ObjectComments, Segment,
};
use crate::error::Result;
use crate::map::Map;
use crate::num::try_parse_number;
use crate::options::{MultilinePolicy, PrintOptions};
use crate::render::{visible_len, AnsiRenderer, PlainRenderer, Renderer};
use crate::value::Value;

/// Code point ranges that force escaping inside quoted strings and
/// disqualify quoteless and multiline forms. Control characters, Unicode
/// format controls and other invisibles. Sorted for binary search.
const FORBIDDEN_RANGES: &[(u32, u32)] = &[
    (0x0000, 0x001f),
    (0x007f, 0x009f),
    (0x00ad, 0x00ad),
    (0x0600, 0x0604),
    (0x070f, 0x070f),
    (0x17b4, 0x17b5),
    (0x200c, 0x200f),
    (0x2028, 0x202f),
    (0x2060, 0x206f),
    (0xfeff, 0xfeff),
    (0xfff0, 0xffff),
];

fn in_forbidden_ranges(c: char) -> bool {
    let cp = c as u32;
    FORBIDDEN_RANGES
        .binary_search_by(|&(lo, hi)| {
            if hi < cp {
                std::cmp::Ordering::Less
            } else if lo > cp {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

fn char_needs_escape(c: char) -> bool {
    c == '\\' || c == '"' || in_forbidden_ranges(c)
}

fn needs_escape(s: &str) -> bool {
    s.chars().any(char_needs_escape)
}

/// True if the string cannot be written quoteless.
fn needs_quotes(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return true;
    };
    let Some(last) = s.chars().last() else {
        return true;
    };
    first.is_whitespace()
        || matches!(first, '"' | '#' | '{' | '}' | '[' | ']' | ':' | ',')
        || s.starts_with("'''")
        || s.starts_with("//")
        || s.starts_with("/*")
        || last.is_whitespace()
        || s.chars().any(in_forbidden_ranges)
}

/// True if the string cannot be written as a `'''` fenced multiline string.
fn needs_escape_ml(s: &str, allow_tabs: bool) -> bool {
    if s.contains("'''") || s.contains('\r') {
        return true;
    }
    // whitespace-only lines would not survive the indent strip on reparse
    if s.split('\n').any(|l| !l.is_empty() && is_blank(l)) {
        return true;
    }
    // a single-line fence drops whitespace right after the opening quotes,
    // and a trailing quote would merge into the closing fence
    if !s.contains('\n') && (matches!(s.chars().next(), Some(' ' | '\t')) || s.ends_with('\'')) {
        return true;
    }
    s.chars().any(|c| match c {
        '\n' => false,
        '\t' => !allow_tabs,
        c => in_forbidden_ranges(c),
    })
}

/// True if the key name cannot be written without quotes.
fn needs_escape_name(name: &str) -> bool {
    name.chars()
        .any(|c| c.is_whitespace() || matches!(c, ',' | '{' | '[' | '}' | ']' | ':' | '#' | '"'))
        || name.contains("//")
        || name.contains("/*")
        || name.contains("'''")
}

/// True if the string starts with a keyword that would be recognized at a
/// punctuator or comment boundary on reparse.
fn starts_with_keyword(s: &str) -> bool {
    ["true", "false", "null"]
        .iter()
        .find_map(|k| s.strip_prefix(k))
        .is_some_and(|rest| {
            let rest = rest.trim_start();
            rest.is_empty()
                || rest.starts_with(',')
                || rest.starts_with(']')
                || rest.starts_with('}')
                || rest.starts_with('#')
                || rest.starts_with("//")
                || rest.starts_with("/*")
        })
}

fn starts_with_nl(s: &str) -> bool {
    s.strip_prefix('\r').unwrap_or(s).starts_with('\n')
}

fn member_sep(rendered: &str) -> &'static str {
    if starts_with_nl(rendered) {
        ""
    } else {
        " "
    }
}

/// Prints `value` as Hjson text. When `comments` is given and the options
/// enable `keep_comments`, comments are re-emitted from the store.
pub(crate) fn print(
    value: &Value,
    comments: Option<&CommentStore>,
    opts: &PrintOptions,
) -> Result<String> {
    let renderer: Box<dyn Renderer> = if opts.colorize {
        Box::new(AnsiRenderer)
    } else {
        Box::new(PlainRenderer)
    };
    let mut printer = Printer {
        opts,
        indent: opts.indent.unit(),
        eol: opts.eol.as_str(),
        renderer,
        comments: if opts.keep_comments { comments } else { None },
        path: Vec::new(),
    };

    let mut res = String::new();
    if let Some(store) = printer.comments {
        for line in force_comment(comment_lines(&store.header)) {
            if !line.is_empty() {
                res.push_str(&printer.renderer.comment(&line));
            }
            res.push_str(printer.eol);
        }
    }

    let braceless = printer.comments.is_some_and(|s| s.root_braceless) && value.is_object();
    if braceless {
        let body = printer.braceless_root(value)?;
        res.push_str(&body);
    } else {
        let body = printer.str_value(value, false, true, true, "", false)?;
        res.push_str(&body);
    }

    if let Some(store) = printer.comments {
        res.push_str(&store.footer);
    }
    Ok(res)
}

struct Printer<'a> {
    opts: &'a PrintOptions,
    indent: String,
    eol: &'static str,
    renderer: Box<dyn Renderer>,
    comments: Option<&'a CommentStore>,
    path: Vec<Segment>,
}

impl<'a> Printer<'a> {
    /// Produces a string from `value`. `has_comment` forces quotes so a
    /// same-line comment cannot merge into a quoteless string, `no_indent`
    /// suppresses the newline before an opening brace, `is_root` rules out
    /// the multiline form for a root string, and `force_quote` quotes all
    /// strings regardless of policy.
    fn str_value(
        &mut self,
        value: &Value,
        has_comment: bool,
        no_indent: bool,
        is_root: bool,
        gap: &str,
        force_quote: bool,
    ) -> Result<String> {
        // codecs get the first shot at every value
        if let Some(token) = self.opts.codecs.encode(value)? {
            return Ok(self.renderer.codec_token(&token));
        }

        match value {
            Value::Null => Ok(self.renderer.literal("null")),
            Value::Bool(true) => Ok(self.renderer.literal("true")),
            Value::Bool(false) => Ok(self.renderer.literal("false")),
            Value::Number(n) => {
                if n.is_finite() {
                    Ok(self.renderer.num(&format!("{n}")))
                } else {
                    // no codec claimed it, the JSON model has no spelling
                    Ok(self.renderer.literal("null"))
                }
            }
            Value::String(s) => Ok(self.quote(s, gap, has_comment, is_root, force_quote)),
            Value::Date(dt) => {
                let text = codec::format_date(dt);
                Ok(self.quote(&text, gap, has_comment, is_root, force_quote))
            }
            Value::Array(arr) => self.array_value(arr, no_indent, gap, force_quote),
            Value::Object(map) => self.object_value(map, no_indent, gap, force_quote),
        }
    }

    fn node(&self) -> Option<NodeComments> {
        self.comments.and_then(|s| s.node(&self.path)).cloned()
    }

    fn array_value(
        &mut self,
        arr: &[Value],
        no_indent: bool,
        gap: &str,
        force_quote: bool,
    ) -> Result<String> {
        let node = self.node();
        let has_comments = node.as_ref().is_some_and(NodeComments::has_any);

        if !has_comments {
            if let Some(line) = self.try_condense_array(arr)? {
                return Ok(line);
            }
        }

        let mind = gap;
        let gap2 = format!("{gap}{}", self.indent);
        let eol_mind = format!("{}{mind}", self.eol);
        let eol_gap = format!("{}{gap2}", self.eol);
        let prefix = if no_indent || self.opts.braces_same_line {
            String::new()
        } else {
            eol_mind.clone()
        };
        let open = self.renderer.punct("[");
        let close = self.renderer.punct("]");

        if let Some(NodeComments::Array(ac)) = node {
            let mut body = String::new();
            for (i, item) in arr.iter().enumerate() {
                let c = ac.members.get(i).cloned().unwrap_or_default();
                let ca = !is_blank(&c.after);
                self.push_lead_lines(&mut body, &c.before, &gap2);
                self.path.push(Segment::Index(i));
                let v = self.str_value(item, ca, true, false, &gap2, force_quote);
                self.path.pop();
                body.push_str(&eol_gap);
                body.push_str(&v?);
                self.push_trail_comment(&mut body, &c.after);
            }
            if arr.is_empty() && is_blank(&ac.end) {
                return Ok(format!("{open}{close}"));
            }
            self.push_lead_lines(&mut body, &ac.end, &gap2);
            return Ok(format!("{prefix}{open}{body}{eol_mind}{close}"));
        }

        if arr.is_empty() {
            return Ok(format!("{open}{close}"));
        }

        let mut parts = Vec::with_capacity(arr.len());
        for (i, item) in arr.iter().enumerate() {
            self.path.push(Segment::Index(i));
            let v = self.str_value(item, false, true, false, &gap2, force_quote);
            self.path.pop();
            parts.push(v?);
        }
        let joiner = if self.opts.separator {
            format!("{}{eol_gap}", self.renderer.punct(","))
        } else {
            eol_gap.clone()
        };
        Ok(format!(
            "{prefix}{open}{eol_gap}{}{eol_mind}{close}",
            parts.join(&joiner)
        ))
    }

    fn object_value(
        &mut self,
        map: &Map,
        no_indent: bool,
        gap: &str,
        force_quote: bool,
    ) -> Result<String> {
        let node = self.node();
        let has_comments = node.as_ref().is_some_and(NodeComments::has_any);

        if !has_comments {
            if let Some(line) = self.try_condense_object(map)? {
                return Ok(line);
            }
        }

        let mind = gap;
        let gap2 = format!("{gap}{}", self.indent);
        let eol_mind = format!("{}{mind}", self.eol);
        let eol_gap = format!("{}{gap2}", self.eol);
        let prefix = if no_indent || self.opts.braces_same_line {
            String::new()
        } else {
            eol_mind.clone()
        };
        let open = self.renderer.punct("{");
        let close = self.renderer.punct("}");

        if let Some(NodeComments::Object(oc)) = node {
            let mut body = String::new();
            let mut emitted = false;
            for k in ordered_keys(&oc.order, map) {
                let c = oc.members.get(&k).cloned().unwrap_or_default();
                let Some(item) = map.get(&k) else {
                    // the value was removed, keep its comment
                    self.push_lead_lines(&mut body, &c.before, &gap2);
                    continue;
                };
                let ca = !is_blank(&c.after);
                self.push_lead_lines(&mut body, &c.before, &gap2);
                self.path.push(Segment::Key(k.clone()));
                let v = self.str_value(item, ca, false, false, &gap2, force_quote);
                self.path.pop();
                let v = v?;
                body.push_str(&eol_gap);
                body.push_str(&self.member_text(&k, &v));
                self.push_trail_comment(&mut body, &c.after);
                emitted = true;
            }
            if !emitted && is_blank(&oc.end) && body.is_empty() {
                return Ok(format!("{open}{close}"));
            }
            self.push_lead_lines(&mut body, &oc.end, &gap2);
            return Ok(format!("{prefix}{open}{body}{eol_mind}{close}"));
        }

        if map.is_empty() {
            return Ok(format!("{open}{close}"));
        }

        let mut entries: Vec<(&String, &Value)> = map.iter().collect();
        if self.opts.sort_keys {
            entries.sort_by(|a, b| a.0.cmp(b.0));
        }
        let mut parts = Vec::with_capacity(entries.len());
        for (k, item) in entries {
            self.path.push(Segment::Key(k.clone()));
            let v = self.str_value(item, false, false, false, &gap2, force_quote);
            self.path.pop();
            parts.push(self.member_text(k, &v?));
        }
        let joiner = if self.opts.separator {
            format!("{}{eol_gap}", self.renderer.punct(","))
        } else {
            eol_gap.clone()
        };
        Ok(format!(
            "{prefix}{open}{eol_gap}{}{eol_mind}{close}",
            parts.join(&joiner)
        ))
    }

    fn member_text(&self, key: &str, rendered: &str) -> String {
        format!(
            "{}{}{}{rendered}",
            self.quote_key(key),
            self.renderer.colon(),
            member_sep(rendered)
        )
    }

    /// Renders a lead comment run, one line per comment line, blank lines
    /// preserved without trailing indentation.
    fn push_lead_lines(&self, body: &mut String, raw: &str, gap: &str) {
        for line in force_comment(comment_lines(raw)) {
            body.push_str(self.eol);
            if !line.is_empty() {
                body.push_str(gap);
                body.push_str(&self.renderer.comment(&line));
            }
        }
    }

    /// Renders a same-line trailing comment.
    fn push_trail_comment(&self, body: &mut String, after: &str) {
        if is_blank(after) {
            return;
        }
        let line = force_comment(vec![after.trim().to_string()])
            .pop()
            .unwrap_or_default();
        body.push(' ');
        body.push_str(&self.renderer.comment(&line));
    }

    /// Renders the root object of a braceless document: members at column
    /// zero, one per line, with a line ending after the last line.
    fn braceless_root(&mut self, value: &Value) -> Result<String> {
        let Value::Object(map) = value else {
            return self.str_value(value, false, true, true, "", false);
        };
        let oc = match self.node() {
            Some(NodeComments::Object(oc)) => oc,
            _ => ObjectComments::default(),
        };

        let mut res = String::new();
        for k in ordered_keys(&oc.order, map) {
            let c = oc.members.get(&k).cloned().unwrap_or_default();
            let Some(item) = map.get(&k) else {
                self.push_root_lines(&mut res, &c.before);
                continue;
            };
            let ca = !is_blank(&c.after);
            self.push_root_lines(&mut res, &c.before);
            self.path.push(Segment::Key(k.clone()));
            let v = self.str_value(item, ca, false, false, "", false);
            self.path.pop();
            res.push_str(&self.member_text(&k, &v?));
            if ca {
                let line = force_comment(vec![c.after.trim().to_string()])
                    .pop()
                    .unwrap_or_default();
                res.push(' ');
                res.push_str(&self.renderer.comment(&line));
            }
            res.push_str(self.eol);
        }
        self.push_root_lines(&mut res, &oc.end);
        Ok(res)
    }

    fn push_root_lines(&self, res: &mut String, raw: &str) {
        for line in force_comment(comment_lines(raw)) {
            if !line.is_empty() {
                res.push_str(&self.renderer.comment(&line));
            }
            res.push_str(self.eol);
        }
    }

    /// Renders a small container on one line when it fits the condense
    /// budget. Strings are force-quoted and codec tokens are refused, both
    /// would swallow the separators on reparse.
    fn try_condense_array(&mut self, arr: &[Value]) -> Result<Option<String>> {
        if self.opts.condense == 0 || arr.is_empty() {
            return Ok(None);
        }
        let mut items = Vec::with_capacity(arr.len());
        for (i, item) in arr.iter().enumerate() {
            if self.opts.codecs.encode(item)?.is_some() {
                return Ok(None);
            }
            self.path.push(Segment::Index(i));
            let v = self.str_value(item, false, true, false, "", true);
            self.path.pop();
            let v = v?;
            if v.contains('\n') {
                return Ok(None);
            }
            items.push(v);
        }
        let sep = format!("{} ", self.renderer.punct(","));
        let line = format!(
            "{}{}{}",
            self.renderer.punct("["),
            items.join(&sep),
            self.renderer.punct("]")
        );
        if visible_len(&line) <= self.opts.condense {
            Ok(Some(line))
        } else {
            Ok(None)
        }
    }

    fn try_condense_object(&mut self, map: &Map) -> Result<Option<String>> {
        if self.opts.condense == 0 || map.is_empty() {
            return Ok(None);
        }
        let mut entries: Vec<(&String, &Value)> = map.iter().collect();
        if self.opts.sort_keys {
            entries.sort_by(|a, b| a.0.cmp(b.0));
        }
        let mut items = Vec::with_capacity(entries.len());
        for (k, item) in entries {
            if self.opts.codecs.encode(item)?.is_some() {
                return Ok(None);
            }
            self.path.push(Segment::Key(k.clone()));
            let v = self.str_value(item, false, true, false, "", true);
            self.path.pop();
            let v = v?;
            if v.contains('\n') {
                return Ok(None);
            }
            items.push(self.member_text(k, &v));
        }
        let sep = format!("{} ", self.renderer.punct(","));
        let line = format!(
            "{}{}{}",
            self.renderer.punct("{"),
            items.join(&sep),
            self.renderer.punct("}")
        );
        if visible_len(&line) <= self.opts.condense {
            Ok(Some(line))
        } else {
            Ok(None)
        }
    }

    /// Chooses the representation for a string: quoteless when the reparse
    /// is unambiguous, then plain quotes, then a multiline fence, then
    /// quotes with escapes.
    fn quote(
        &self,
        s: &str,
        gap: &str,
        has_comment: bool,
        is_root: bool,
        force_quote: bool,
    ) -> String {
        if s.is_empty() {
            return self.renderer.quoted_str("\"\"");
        }

        let must_quote = force_quote
            || self.opts.quote_policy.quote_strings()
            || has_comment
            || needs_quotes(s)
            || try_parse_number(s, true).is_some()
            || starts_with_keyword(s);
        if !must_quote {
            return self.renderer.bare_str(s);
        }

        if !needs_escape(s) {
            return self.renderer.quoted_str(&format!("\"{s}\""));
        }
        let allow_ml = match self.opts.multiline_policy {
            MultilinePolicy::Standard => true,
            MultilinePolicy::NoTabs => !s.contains('\t'),
            MultilinePolicy::Off => false,
        };
        let allow_tabs = self.opts.multiline_policy == MultilinePolicy::Standard;
        if allow_ml && !needs_escape_ml(s, allow_tabs) && !is_root {
            return self.ml_string(s, gap);
        }
        self.renderer
            .quoted_str(&format!("\"{}\"", self.escape_body(s)))
    }

    /// Wraps a string in the `'''` multiline format.
    fn ml_string(&self, s: &str, gap: &str) -> String {
        let lines: Vec<&str> = s.split('\n').collect();
        let gap2 = format!("{gap}{}", self.indent);

        if lines.len() == 1 {
            // a single line still avoids escaping backslashes
            return format!("{}{}{}", self.renderer.fence(), lines[0], self.renderer.fence());
        }
        let mut res = format!("{}{gap2}{}", self.eol, self.renderer.fence());
        for line in &lines {
            res.push_str(self.eol);
            if !line.is_empty() {
                res.push_str(&gap2);
                res.push_str(line);
            }
        }
        res.push_str(self.eol);
        res.push_str(&gap2);
        res.push_str(&self.renderer.fence());
        res
    }

    fn quote_key(&self, name: &str) -> String {
        if name.is_empty() {
            return self.renderer.quoted_key("\"\"");
        }
        if self.opts.quote_policy.quote_keys() || needs_escape_name(name) {
            let body = if needs_escape(name) {
                self.escape_body(name)
            } else {
                name.to_string()
            };
            self.renderer.quoted_key(&format!("\"{body}\""))
        } else {
            self.renderer.key(name)
        }
    }

    fn escape_body(&self, s: &str) -> String {
        let mut out = String::new();
        for c in s.chars() {
            if !char_needs_escape(c) {
                out.push(c);
                continue;
            }
            match c {
                '\u{8}' => out.push_str(&self.renderer.escape("b")),
                '\t' => out.push_str(&self.renderer.escape("t")),
                '\n' => out.push_str(&self.renderer.escape("n")),
                '\u{c}' => out.push_str(&self.renderer.escape("f")),
                '\r' => out.push_str(&self.renderer.escape("r")),
                '"' => out.push_str(&self.renderer.escape("\"")),
                '\\' => out.push_str(&self.renderer.escape("\\")),
                c => {
                    let mut buf = [0u16; 2];
                    for unit in c.encode_utf16(&mut buf) {
                        out.push_str(&self.renderer.unicode(&format!("{unit:04x}")));
                    }
                }
            }
        }
        out
    }
}

/// Source order first, then any keys the store has never seen.
fn ordered_keys(order: &[String], map: &Map) -> Vec<String> {
    let mut keys: Vec<String> = Vec::with_capacity(map.len());
    for k in order {
        if !keys.contains(k) {
            keys.push(k.clone());
        }
    }
    for k in map.keys() {
        if !keys.iter().any(|o| o == k) {
            keys.push(k.clone());
        }
    }
    keys
}
