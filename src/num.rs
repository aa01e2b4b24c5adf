//! Recognition of JSON number syntax inside quoteless text.
//!
//! Hjson only treats a quoteless run as a number when the whole run, up to
//! the end of the line (or, for the printer, up to the next punctuator or
//! comment), matches strict JSON number syntax. `3 dogs` or `1.2.3` stay
//! strings, and leading zeros such as `007` disqualify the run.

/// Tries to read `text` as a strict JSON number.
///
/// Returns `None` unless the entire input, less trailing whitespace, forms a
/// valid finite number. With `stop_at_next` the scan also accepts a trailing
/// `,`, `}`, `]`, `#`, `//` or `/*`, which is what the printer needs when it
/// decides whether a bare string would be misread on reparse.
pub(crate) fn try_parse_number(text: &str, stop_at_next: bool) -> Option<f64> {
    let chars: Vec<char> = text.chars().collect();
    let mut at = 0usize;
    let mut ch: Option<char> = None;
    let mut buf = String::new();
    let mut leading_zeros: i32 = 0;
    let mut test_leading = true;

    macro_rules! next {
        () => {{
            ch = chars.get(at).copied();
            at += 1;
        }};
    }

    next!();
    if ch == Some('-') {
        buf.push('-');
        next!();
    }
    while matches!(ch, Some(c) if c.is_ascii_digit()) {
        if test_leading {
            if ch == Some('0') {
                leading_zeros += 1;
            } else {
                test_leading = false;
            }
        }
        buf.push(ch.unwrap_or('0'));
        next!();
    }
    if test_leading {
        // a single 0 is allowed
        leading_zeros -= 1;
    }
    if ch == Some('.') {
        buf.push('.');
        loop {
            next!();
            match ch {
                Some(c) if c.is_ascii_digit() => buf.push(c),
                _ => break,
            }
        }
    }
    if ch == Some('e') || ch == Some('E') {
        buf.push(ch.unwrap_or('e'));
        next!();
        if ch == Some('-') || ch == Some('+') {
            buf.push(ch.unwrap_or('+'));
            next!();
        }
        while matches!(ch, Some(c) if c.is_ascii_digit()) {
            buf.push(ch.unwrap_or('0'));
            next!();
        }
    }

    // skip trailing whitespace
    while matches!(ch, Some(c) if c <= ' ') {
        next!();
    }

    if stop_at_next {
        // a following punctuator or comment ends the run
        let following = chars.get(at).copied();
        match ch {
            Some(',') | Some('}') | Some(']') | Some('#') => ch = None,
            Some('/') if following == Some('/') || following == Some('*') => ch = None,
            _ => {}
        }
    }

    if ch.is_some() || leading_zeros != 0 {
        return None;
    }
    buf.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(try_parse_number("0", false), Some(0.0));
        assert_eq!(try_parse_number("42", false), Some(42.0));
        assert_eq!(try_parse_number("-3.5", false), Some(-3.5));
        assert_eq!(try_parse_number("1e3", false), Some(1000.0));
        assert_eq!(try_parse_number("2.5E-2", false), Some(0.025));
        assert_eq!(try_parse_number("-0  ", false), Some(-0.0));
        assert_eq!(try_parse_number("  42", false), None);
    }

    #[test]
    fn leading_zeros_disqualify() {
        assert_eq!(try_parse_number("00", false), None);
        assert_eq!(try_parse_number("007", false), None);
        assert_eq!(try_parse_number("0.5", false), Some(0.5));
    }

    #[test]
    fn partial_matches_are_rejected() {
        assert_eq!(try_parse_number("3 dogs", false), None);
        assert_eq!(try_parse_number("1.2.3", false), None);
        assert_eq!(try_parse_number("+5", false), None);
        assert_eq!(try_parse_number("-", false), None);
        assert_eq!(try_parse_number(".5", false), None);
        assert_eq!(try_parse_number("3e", false), None);
        assert_eq!(try_parse_number("", false), None);
    }

    #[test]
    fn stop_at_next_accepts_punctuators() {
        assert_eq!(try_parse_number("5,", true), Some(5.0));
        assert_eq!(try_parse_number("5 }", true), Some(5.0));
        assert_eq!(try_parse_number("5]", true), Some(5.0));
        assert_eq!(try_parse_number("5 # c", true), Some(5.0));
        assert_eq!(try_parse_number("5 // c", true), Some(5.0));
        assert_eq!(try_parse_number("5 /* c */", true), Some(5.0));
        assert_eq!(try_parse_number("5,", false), None);
        assert_eq!(try_parse_number("5 / 2", true), None);
    }
}
