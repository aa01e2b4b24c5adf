//! The Hjson parser.
//!
//! A recursive descent parser over a decoded character buffer. The cursor
//! state lives in the [`Parser`] value, so parses are reentrant and
//! thread-safe. Beyond JSON the parser accepts quoteless strings, optional
//! commas, `#`, `//` and `/* */` comments, `'''` fenced multiline strings
//! and a braceless root object. With `keep_comments` it also files every
//! comment run into a [`CommentStore`] keyed by container path.

use crate::codec::CodecRegistry;
use crate::comments::{ArrayComments, CommentStore, MemberComment, NodeComments, ObjectComments, Segment};
use crate::error::{Error, Result};
use crate::map::Map;
use crate::num::try_parse_number;
use crate::options::ParseOptions;
use crate::value::Value;

/// Parses `text` with the given options, returning the value and, when
/// `keep_comments` is set, the captured comment store.
pub(crate) fn parse_text(
    text: &str,
    opts: &ParseOptions,
) -> Result<(Value, Option<CommentStore>)> {
    let mut parser = Parser {
        chars: text.chars().collect(),
        at: 0,
        ch: Some(' '),
        keep_comments: opts.keep_comments,
        codecs: opts.codecs.clone(),
        max_depth: opts.effective_max_depth(),
        depth: 0,
        store: CommentStore::new(),
        path: Vec::new(),
    };
    let value = parser.root_value()?;
    let store = opts.keep_comments.then_some(parser.store);
    Ok((value, store))
}

struct Parser {
    chars: Vec<char>,
    /// Index of the next character to read; the current character is at
    /// `at - 1`.
    at: usize,
    ch: Option<char>,
    keep_comments: bool,
    codecs: CodecRegistry,
    max_depth: usize,
    depth: usize,
    store: CommentStore,
    path: Vec<Segment>,
}

fn is_punctuator(c: char) -> bool {
    matches!(c, '{' | '}' | '[' | ']' | ',' | ':')
}

/// Splits a captured run into the same-line part (trailing comment of the
/// previous member) and the rest (lead comment of the next member).
fn split_run(run: &str) -> (String, String) {
    match run.find('\n') {
        Some(idx) => (run[..idx].to_string(), run[idx..].to_string()),
        None => (run.to_string(), String::new()),
    }
}

/// When a container fails to close, a `}` or `]` swallowed by a quoteless
/// string is the usual culprit. Reports the last such string, if any.
fn closing_hint(value: &Value) -> Option<String> {
    fn search<'a>(value: &'a Value, needle: char) -> Option<&'a str> {
        match value {
            Value::String(s) if s.contains(needle) => Some(s),
            Value::Array(items) => {
                let mut res = None;
                for v in items {
                    if let Some(s) = search(v, needle) {
                        res = Some(s);
                    }
                }
                res
            }
            Value::Object(map) => {
                let mut res = None;
                for (_, v) in map.iter() {
                    if let Some(s) = search(v, needle) {
                        res = Some(s);
                    }
                }
                res
            }
            _ => None,
        }
    }

    for needle in ['}', ']'] {
        if let Some(s) = search(value, needle) {
            return Some(format!(
                "found '{needle}' in a string value, your mistake could be with:\n  > {s}\n  (unquoted strings contain everything up to the next line!)"
            ));
        }
    }
    None
}

impl Parser {
    fn next(&mut self) -> Option<char> {
        self.ch = self.chars.get(self.at).copied();
        self.at += 1;
        self.ch
    }

    fn peek(&self, offs: isize) -> Option<char> {
        let idx = self.at as isize + offs;
        if idx < 0 {
            None
        } else {
            self.chars.get(idx as usize).copied()
        }
    }

    fn reset(&mut self) {
        self.at = 0;
        self.ch = Some(' ');
        self.depth = 0;
        self.path.clear();
        self.store = CommentStore::new();
    }

    fn error(&self, msg: impl Into<String>) -> Error {
        let mut col = 0usize;
        let mut line = 1usize;
        let mut i = self.at as isize - 1;
        while i > 0 && self.chars.get(i as usize) != Some(&'\n') {
            i -= 1;
            col += 1;
        }
        while i > 0 {
            if self.chars.get(i as usize) == Some(&'\n') {
                line += 1;
            }
            i -= 1;
        }
        let start = self.at.saturating_sub(col).min(self.chars.len());
        let excerpt: String = self.chars[start..].iter().take(20).collect();
        Error::syntax(msg, line, col, excerpt)
    }

    /// Skips whitespace and comments.
    fn white(&mut self) {
        while self.ch.is_some() {
            while matches!(self.ch, Some(c) if c <= ' ') {
                self.next();
            }
            if self.ch == Some('#') || (self.ch == Some('/') && self.peek(0) == Some('/')) {
                while matches!(self.ch, Some(c) if c != '\n') {
                    self.next();
                }
            } else if self.ch == Some('/') && self.peek(0) == Some('*') {
                self.next();
                self.next();
                while self.ch.is_some() && !(self.ch == Some('*') && self.peek(0) == Some('/')) {
                    self.next();
                }
                if self.ch.is_some() {
                    self.next();
                    self.next();
                }
            } else {
                break;
            }
        }
    }

    /// The raw run from position `wat - 1` up to the current token, less
    /// trailing whitespace and the final newline. Blank runs become "".
    fn get_comment(&self, wat: usize) -> String {
        let wat = wat.saturating_sub(1);
        let mut i = self.at as isize - 2;
        while i > wat as isize
            && matches!(self.chars.get(i as usize), Some(c) if *c <= ' ' && *c != '\n')
        {
            i -= 1;
        }
        if i >= 0 && self.chars.get(i as usize) == Some(&'\n') {
            i -= 1;
        }
        if i >= 0 && self.chars.get(i as usize) == Some(&'\r') {
            i -= 1;
        }
        if i < wat as isize {
            return String::new();
        }
        let res: String = self.chars[wat..=i as usize].iter().collect();
        if res.chars().any(|c| c > ' ') {
            res
        } else {
            String::new()
        }
    }

    fn hex4(&mut self) -> Result<u32> {
        let mut v = 0u32;
        for _ in 0..4 {
            self.next();
            match self.ch.and_then(|c| c.to_digit(16)) {
                Some(d) => v = v * 16 + d,
                None => {
                    let found = self.ch.map(String::from).unwrap_or_default();
                    return Err(self.error(format!("Bad \\u char {found}")));
                }
            }
        }
        Ok(v)
    }

    /// Parses a quoted string. The opening quote is the current character.
    fn string(&mut self) -> Result<String> {
        let mut out = String::new();
        if self.ch == Some('"') {
            while let Some(c) = self.next() {
                if c == '"' {
                    self.next();
                    return Ok(out);
                }
                if c == '\\' {
                    self.next();
                    match self.ch {
                        Some('u') => {
                            let unit = self.hex4()?;
                            out.push(self.combine_unit(unit)?);
                        }
                        Some('"') => out.push('"'),
                        Some('\\') => out.push('\\'),
                        Some('/') => out.push('/'),
                        Some('b') => out.push('\u{8}'),
                        Some('f') => out.push('\u{c}'),
                        Some('n') => out.push('\n'),
                        Some('r') => out.push('\r'),
                        Some('t') => out.push('\t'),
                        _ => break,
                    }
                } else {
                    out.push(c);
                }
            }
        }
        Err(self.error("Bad string"))
    }

    /// Resolves a `\u` escape, consuming the low half of a surrogate pair
    /// when the unit is a high surrogate. Lone surrogates are an error, the
    /// value model holds Unicode scalar values only.
    fn combine_unit(&mut self, unit: u32) -> Result<char> {
        if (0xdc00..0xe000).contains(&unit) {
            return Err(self.error("Found a lone surrogate in a \\u escape (use a surrogate pair)"));
        }
        if (0xd800..0xdc00).contains(&unit) {
            if self.next() != Some('\\') || self.next() != Some('u') {
                return Err(
                    self.error("Found a lone surrogate in a \\u escape (use a surrogate pair)")
                );
            }
            let low = self.hex4()?;
            if !(0xdc00..0xe000).contains(&low) {
                return Err(
                    self.error("Found a lone surrogate in a \\u escape (use a surrogate pair)")
                );
            }
            let scalar = 0x10000 + ((unit - 0xd800) << 10) + (low - 0xdc00);
            return Ok(char::from_u32(scalar).unwrap_or('\u{fffd}'));
        }
        Ok(char::from_u32(unit).unwrap_or('\u{fffd}'))
    }

    /// Parses a `'''` fenced multiline string. Called with the cursor just
    /// past the opening fence.
    fn ml_string(&mut self) -> Result<String> {
        let mut out = String::new();
        let mut triple = 0;

        // column of the opening fence, stripped from every line
        let mut indent: usize = 0;
        loop {
            match self.peek(-(indent as isize) - 5) {
                None | Some('\n') => break,
                _ => indent += 1,
            }
        }

        // skip to the end of the fence line
        while matches!(self.ch, Some(c) if c <= ' ' && c != '\n') {
            self.next();
        }
        if self.ch == Some('\n') {
            self.next();
            self.skip_indent(indent);
        }

        loop {
            let Some(c) = self.ch else {
                return Err(self.error("Bad multiline string"));
            };
            if c == '\'' {
                triple += 1;
                self.next();
                if triple == 3 {
                    if out.ends_with('\n') {
                        out.pop();
                    }
                    return Ok(out);
                }
                continue;
            }
            while triple > 0 {
                out.push('\'');
                triple -= 1;
            }
            if c == '\n' {
                out.push('\n');
                self.next();
                self.skip_indent(indent);
            } else {
                if c != '\r' {
                    out.push(c);
                }
                self.next();
            }
        }
    }

    fn skip_indent(&mut self, indent: usize) {
        let mut skip = indent;
        while matches!(self.ch, Some(c) if c <= ' ' && c != '\n') {
            if skip == 0 {
                break;
            }
            skip -= 1;
            self.next();
        }
    }

    /// Parses a key name. Quotes are optional unless the name contains
    /// `{}[],:` or whitespace.
    fn keyname(&mut self) -> Result<String> {
        if self.ch == Some('"') {
            return self.string();
        }

        let mut name = String::new();
        let start = self.at;
        let mut space: Option<usize> = None;
        loop {
            match self.ch {
                Some(':') => {
                    if name.is_empty() {
                        return Err(self
                            .error("Found ':' but no key name (for an empty key name use quotes)"));
                    }
                    if let Some(space) = space {
                        if space != name.chars().count() {
                            self.at = start + space;
                            return Err(self.error(
                                "Found whitespace in your key name (use quotes to include)",
                            ));
                        }
                    }
                    return Ok(name);
                }
                None => {
                    return Err(
                        self.error("Found EOF while looking for a key name (check your syntax)")
                    )
                }
                Some(c) if c <= ' ' => {
                    if space.is_none() {
                        space = Some(name.chars().count());
                    }
                }
                Some(c) if is_punctuator(c) => {
                    return Err(self.error(format!(
                        "Found '{c}' where a key name was expected (check your syntax or use quotes if the key name includes {{}}[],: or whitespace)"
                    )))
                }
                Some(c) => name.push(c),
            }
            self.next();
        }
    }

    fn decode_or(&self, text: &str, fallback: Value) -> Value {
        self.codecs.decode(text).unwrap_or(fallback)
    }

    /// Parses a quoteless scalar: `true`, `false`, `null`, a number, a
    /// codec token or a quoteless string running to the end of the line.
    fn tfnns(&mut self) -> Result<Value> {
        let mut value = String::new();
        match self.ch {
            Some(c) if is_punctuator(c) => {
                return Err(self.error(format!(
                    "Found a punctuator character '{c}' when expecting a quoteless string (check your syntax)"
                )))
            }
            Some(c) => value.push(c),
            None => {}
        }

        loop {
            self.next();
            if value == "'''" {
                return self.ml_string().map(Value::String);
            }
            let is_eol = matches!(self.ch, None | Some('\r') | Some('\n'));
            let at_terminator = is_eol
                || matches!(self.ch, Some(',') | Some('}') | Some(']') | Some('#'))
                || (self.ch == Some('/') && matches!(self.peek(0), Some('/') | Some('*')));
            if at_terminator {
                // a keyword or number followed by a punctuator or comment
                // parses as the literal value, anything else keeps going
                match value.chars().next() {
                    Some('f') if value.trim() == "false" => return Ok(Value::Bool(false)),
                    Some('n') if value.trim() == "null" => return Ok(Value::Null),
                    Some('t') if value.trim() == "true" => return Ok(Value::Bool(true)),
                    Some(c) if c == '-' || c.is_ascii_digit() => {
                        if let Some(n) = try_parse_number(&value, false) {
                            return Ok(self.decode_or(&value, Value::Number(n)));
                        }
                    }
                    _ => {}
                }
                if is_eol {
                    let trimmed = value.trim().to_string();
                    let fallback = Value::String(trimmed.clone());
                    return Ok(self.decode_or(&trimmed, fallback));
                }
            }
            if let Some(c) = self.ch {
                value.push(c);
            }
        }
    }

    fn array(&mut self) -> Result<Value> {
        if self.depth >= self.max_depth {
            return Err(self.error(format!(
                "Exceeded nesting depth limit of {}",
                self.max_depth
            )));
        }
        self.depth += 1;
        let mut arr = Vec::new();
        let mut ac = ArrayComments::default();
        let res = self.array_inner(&mut arr, &mut ac);
        self.depth -= 1;
        match res {
            Ok(()) => {
                if self.keep_comments {
                    self.store
                        .nodes
                        .insert(self.path.clone(), NodeComments::Array(ac));
                }
                Ok(Value::Array(arr))
            }
            Err(e) => {
                let hint = closing_hint(&Value::Array(arr));
                Err(e.with_hint(hint))
            }
        }
    }

    fn array_inner(&mut self, arr: &mut Vec<Value>, ac: &mut ArrayComments) -> Result<()> {
        // assuming ch == '['
        self.next();
        let wat = self.at;
        self.white();
        let mut pending_before = if self.keep_comments {
            self.get_comment(wat)
        } else {
            String::new()
        };
        if self.ch == Some(']') {
            self.next();
            ac.end = pending_before;
            return Ok(());
        }

        while self.ch.is_some() {
            self.path.push(Segment::Index(arr.len()));
            let val = self.value();
            self.path.pop();
            arr.push(val?);

            let mut run_start = self.at;
            self.white();
            // the comma is optional and trailing commas are allowed
            if self.ch == Some(',') {
                self.next();
                run_start = self.at;
                self.white();
            }
            if self.keep_comments {
                let run = self.get_comment(run_start);
                let (after, before_next) = split_run(&run);
                ac.members.push(MemberComment {
                    before: std::mem::take(&mut pending_before),
                    after,
                });
                pending_before = before_next;
            }
            if self.ch == Some(']') {
                self.next();
                ac.end = pending_before;
                return Ok(());
            }
        }

        Err(self.error("End of input while parsing an array (missing ']')"))
    }

    fn object(&mut self, without_braces: bool) -> Result<Value> {
        if self.depth >= self.max_depth {
            return Err(self.error(format!(
                "Exceeded nesting depth limit of {}",
                self.max_depth
            )));
        }
        self.depth += 1;
        let mut map = Map::new();
        let mut oc = ObjectComments::default();
        let res = self.object_inner(without_braces, &mut map, &mut oc);
        self.depth -= 1;
        match res {
            Ok(()) => {
                if self.keep_comments {
                    self.store
                        .nodes
                        .insert(self.path.clone(), NodeComments::Object(oc));
                }
                Ok(Value::Object(map))
            }
            Err(e) => {
                let hint = closing_hint(&Value::Object(map));
                Err(e.with_hint(hint))
            }
        }
    }

    fn object_inner(
        &mut self,
        without_braces: bool,
        map: &mut Map,
        oc: &mut ObjectComments,
    ) -> Result<()> {
        if !without_braces {
            // assuming ch == '{'
            self.next();
        }
        let wat = self.at;
        self.white();
        let mut pending_before = if self.keep_comments {
            self.get_comment(wat)
        } else {
            String::new()
        };
        if self.ch == Some('}') && !without_braces {
            self.next();
            oc.end = pending_before;
            return Ok(());
        }

        while self.ch.is_some() {
            let key = self.keyname()?;
            self.white();
            if self.ch != Some(':') {
                let found = self.ch.map(String::from).unwrap_or_default();
                return Err(self.error(format!("Expected ':' instead of '{found}'")));
            }
            self.next();

            // the last duplicate wins and takes the last position
            if map.contains_key(&key) {
                map.shift_remove(&key);
                oc.members.shift_remove(&key);
                oc.order.retain(|k| k != &key);
            }

            self.path.push(Segment::Key(key.clone()));
            let val = self.value();
            self.path.pop();
            map.insert(key.clone(), val?);

            let mut run_start = self.at;
            self.white();
            // the comma is optional and trailing commas are allowed
            if self.ch == Some(',') {
                self.next();
                run_start = self.at;
                self.white();
            }
            if self.keep_comments {
                let run = self.get_comment(run_start);
                let (after, before_next) = split_run(&run);
                oc.members.insert(
                    key.clone(),
                    MemberComment {
                        before: std::mem::take(&mut pending_before),
                        after,
                    },
                );
                oc.order.push(key);
                pending_before = before_next;
            }
            if self.ch == Some('}') && !without_braces {
                self.next();
                oc.end = pending_before;
                return Ok(());
            }
        }

        if without_braces {
            oc.end = pending_before;
            return Ok(());
        }
        Err(self.error("End of input while parsing an object (missing '}')"))
    }

    fn value(&mut self) -> Result<Value> {
        self.white();
        match self.ch {
            Some('{') => self.object(false),
            Some('[') => self.array(),
            Some('"') => self.string().map(Value::String),
            _ => self.tfnns(),
        }
    }

    fn check_trailing(&mut self) -> Result<()> {
        let footer_start = self.at.saturating_sub(1).min(self.chars.len());
        self.white();
        if self.ch.is_some() {
            return Err(self.error("Syntax error, found trailing characters"));
        }
        if self.keep_comments {
            self.store.footer = self.chars[footer_start..].iter().collect();
        }
        Ok(())
    }

    fn root_value(&mut self) -> Result<Value> {
        self.white();
        if self.keep_comments {
            self.store.header = self.get_comment(1);
        }
        match self.ch {
            Some('{') => {
                let v = self.object(false)?;
                self.check_trailing()?;
                return Ok(v);
            }
            Some('[') => {
                let v = self.array()?;
                self.check_trailing()?;
                return Ok(v);
            }
            _ => {}
        }

        // assume a root object without braces
        let attempt = self
            .object(true)
            .and_then(|v| self.check_trailing().map(|_| v));
        match attempt {
            Ok(v) => {
                self.store.root_braceless = true;
                Ok(v)
            }
            Err(braceless_err) => {
                // maybe it is a single value instead (true/false/null/num/"")
                self.reset();
                self.white();
                if self.keep_comments {
                    self.store.header = self.get_comment(1);
                }
                let retry = self
                    .value()
                    .and_then(|v| self.check_trailing().map(|_| v));
                // the braceless error is the more useful one
                retry.map_err(|_| braceless_err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Value {
        match parse_text(text, &ParseOptions::new()) {
            Ok((v, _)) => v,
            Err(e) => panic!("parse failed: {e}"),
        }
    }

    #[test]
    fn parses_json_core() {
        let v = parse("{a:1,b:[1,2,3]}");
        let obj = v.as_object().unwrap();
        assert_eq!(obj.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(
            obj.get("b"),
            Some(&Value::Array(vec![
                Value::Number(1.0),
                Value::Number(2.0),
                Value::Number(3.0)
            ]))
        );
    }

    #[test]
    fn quoteless_string_runs_to_eol() {
        let v = parse("{a: hello, world\n}");
        assert_eq!(v.as_object().unwrap().get("a").unwrap().as_str(), Some("hello, world"));
    }

    #[test]
    fn keyword_at_punctuator_boundary() {
        let v = parse("{a: true, b: 3}");
        let obj = v.as_object().unwrap();
        assert_eq!(obj.get("a"), Some(&Value::Bool(true)));
        assert_eq!(obj.get("b"), Some(&Value::Number(3.0)));
    }

    #[test]
    fn keyword_like_text_stays_string() {
        let v = parse("{a: true blue\n}");
        assert_eq!(v.as_object().unwrap().get("a").unwrap().as_str(), Some("true blue"));
    }

    #[test]
    fn braceless_root() {
        let v = parse("a: 1\nb: two\n");
        let obj = v.as_object().unwrap();
        assert_eq!(obj.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(obj.get("b").unwrap().as_str(), Some("two"));
    }

    #[test]
    fn root_scalar_fallback() {
        assert_eq!(parse("true"), Value::Bool(true));
        assert_eq!(parse("42"), Value::Number(42.0));
        assert_eq!(parse("\"hi\""), Value::String("hi".to_string()));
    }

    #[test]
    fn multiline_string_strips_indent() {
        let v = parse("{\n  text:\n    '''\n    first\n    second\n    '''\n}");
        assert_eq!(
            v.as_object().unwrap().get("text").unwrap().as_str(),
            Some("first\nsecond")
        );
    }

    #[test]
    fn duplicate_key_last_wins_last_position() {
        let v = parse("{a:1, b:2, a:3}");
        let obj = v.as_object().unwrap();
        assert_eq!(obj.get("a"), Some(&Value::Number(3.0)));
        let keys: Vec<_> = obj.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn unterminated_object() {
        let err = parse_text("{a:1", &ParseOptions::new()).unwrap_err();
        assert!(err
            .to_string()
            .contains("End of input while parsing an object (missing '}')"));
    }

    #[test]
    fn swallowed_brace_gets_hint() {
        let err = parse_text("{a: b}\nc: 1", &ParseOptions::new()).unwrap_err();
        assert!(err.hint().is_some_and(|h| h.contains("b}")));
    }

    #[test]
    fn depth_limit() {
        let deep = "[".repeat(40) + &"]".repeat(40);
        let opts = ParseOptions::new().with_max_depth(16);
        let err = parse_text(&deep, &opts).unwrap_err();
        assert!(err.to_string().contains("nesting depth limit of 16"));
        assert!(parse_text(&deep, &ParseOptions::new()).is_ok());
    }

    #[test]
    fn surrogate_pairs_combine() {
        let v = parse("{a: \"\\ud83d\\ude00\"}");
        assert_eq!(v.as_object().unwrap().get("a").unwrap().as_str(), Some("\u{1f600}"));
        assert!(parse_text("{a: \"\\ud83d\"}", &ParseOptions::new()).is_err());
    }

    #[test]
    fn comments_are_captured() {
        let opts = ParseOptions::new().with_keep_comments(true);
        let (_, store) = parse_text("# hdr\n{\n  # lead\n  a: 1 # trail\n}\n", &opts).unwrap();
        let store = store.unwrap();
        assert_eq!(store.header, "# hdr");
        assert_eq!(store.footer, "\n");
        assert!(!store.root_braceless);
        let Some(NodeComments::Object(oc)) = store.node(&[]) else {
            panic!("missing root node");
        };
        let m = oc.members.get("a").unwrap();
        assert!(m.before.contains("# lead"));
        assert_eq!(m.after.trim(), "# trail");
    }
}
