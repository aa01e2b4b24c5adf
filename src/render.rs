//! Token rendering for the printer.
//!
//! The printer never concatenates color escapes itself; every emitted token
//! goes through a [`Renderer`]. [`PlainRenderer`] passes text through
//! unchanged and [`AnsiRenderer`] wraps each token class in ANSI color
//! escapes for terminal output.

/// Renders the token classes the printer emits.
pub(crate) trait Renderer {
    /// Structural punctuation: braces, brackets, commas.
    fn punct(&self, text: &str) -> String;
    /// An unquoted object key.
    fn key(&self, text: &str) -> String;
    /// A quoted object key, quotes included.
    fn quoted_key(&self, text: &str) -> String;
    /// The `:` after a key.
    fn colon(&self) -> String;
    /// A quoteless string value.
    fn bare_str(&self, text: &str) -> String;
    /// A quoted string chunk, quotes included.
    fn quoted_str(&self, text: &str) -> String;
    /// An escape sequence inside a quoted string, without the backslash.
    fn escape(&self, text: &str) -> String;
    /// A `\uXXXX` sequence, without the `\u`.
    fn unicode(&self, text: &str) -> String;
    /// A multiline fence, `'''`.
    fn fence(&self) -> String;
    /// A number token.
    fn num(&self, text: &str) -> String;
    /// A keyword literal: `true`, `false`, `null`.
    fn literal(&self, text: &str) -> String;
    /// A codec token.
    fn codec_token(&self, text: &str) -> String;
    /// A comment line.
    fn comment(&self, text: &str) -> String;
}

/// Identity renderer for plain text output.
pub(crate) struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn punct(&self, text: &str) -> String {
        text.to_string()
    }
    fn key(&self, text: &str) -> String {
        text.to_string()
    }
    fn quoted_key(&self, text: &str) -> String {
        text.to_string()
    }
    fn colon(&self) -> String {
        ":".to_string()
    }
    fn bare_str(&self, text: &str) -> String {
        text.to_string()
    }
    fn quoted_str(&self, text: &str) -> String {
        text.to_string()
    }
    fn escape(&self, text: &str) -> String {
        format!("\\{text}")
    }
    fn unicode(&self, text: &str) -> String {
        format!("\\u{text}")
    }
    fn fence(&self) -> String {
        "'''".to_string()
    }
    fn num(&self, text: &str) -> String {
        text.to_string()
    }
    fn literal(&self, text: &str) -> String {
        text.to_string()
    }
    fn codec_token(&self, text: &str) -> String {
        text.to_string()
    }
    fn comment(&self, text: &str) -> String {
        text.to_string()
    }
}

const RESET: &str = "\x1b[0m";

fn wrap(color: &str, text: &str) -> String {
    format!("{color}{text}{RESET}")
}

/// ANSI color renderer. Comments and punctuation are dimmed, keys are
/// yellow, strings white, numbers cyan.
pub(crate) struct AnsiRenderer;

impl Renderer for AnsiRenderer {
    fn punct(&self, text: &str) -> String {
        wrap("\x1b[30;1m", text)
    }
    fn key(&self, text: &str) -> String {
        wrap("\x1b[33m", text)
    }
    fn quoted_key(&self, text: &str) -> String {
        wrap("\x1b[33m", text)
    }
    fn colon(&self) -> String {
        wrap("\x1b[37m", ":")
    }
    fn bare_str(&self, text: &str) -> String {
        wrap("\x1b[37;1m", text)
    }
    fn quoted_str(&self, text: &str) -> String {
        wrap("\x1b[37;1m", text)
    }
    fn escape(&self, text: &str) -> String {
        wrap("\x1b[31m", &format!("\\{text}"))
    }
    fn unicode(&self, text: &str) -> String {
        wrap("\x1b[31m", &format!("\\u{text}"))
    }
    fn fence(&self) -> String {
        wrap("\x1b[37;1m", "'''")
    }
    fn num(&self, text: &str) -> String {
        wrap("\x1b[36;1m", text)
    }
    fn literal(&self, text: &str) -> String {
        wrap("\x1b[36m", text)
    }
    fn codec_token(&self, text: &str) -> String {
        wrap("\x1b[37m", text)
    }
    fn comment(&self, text: &str) -> String {
        wrap("\x1b[30;1m", text)
    }
}

/// Display width of a rendered line, ignoring ANSI escapes. Used by the
/// condense budget so colorized output condenses the same as plain output.
pub(crate) fn visible_len(text: &str) -> usize {
    let mut len = 0;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for e in chars.by_ref() {
                if e == 'm' {
                    break;
                }
            }
        } else {
            len += 1;
        }
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_is_identity() {
        let r = PlainRenderer;
        assert_eq!(r.punct("{"), "{");
        assert_eq!(r.num("42"), "42");
        assert_eq!(r.escape("n"), "\\n");
        assert_eq!(r.unicode("00e9"), "\\u00e9");
    }

    #[test]
    fn ansi_wraps_and_resets() {
        let r = AnsiRenderer;
        let out = r.key("name");
        assert!(out.starts_with("\x1b[33m"));
        assert!(out.ends_with(RESET));
    }

    #[test]
    fn visible_len_strips_escapes() {
        let r = AnsiRenderer;
        let line = format!("{}{} {}", r.key("a"), r.colon(), r.num("1"));
        assert_eq!(visible_len(&line), visible_len("a: 1"));
        assert_eq!(visible_len("abc"), 3);
    }
}
