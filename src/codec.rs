//! Pluggable codecs for domain-specific literal formats.
//!
//! A [`Codec`] maps between quoteless source text and typed values, letting
//! documents carry literals that plain JSON cannot, such as `0x1f`, `Inf` or
//! `2024-01-15`. Codecs are consulted in registration order: at parse time
//! each quoteless scalar is offered to `decode`, and at print time every
//! value is offered to `encode` before the plain formatter runs.
//!
//! Codec tokens are only unambiguous at end of line, so the printer refuses
//! to place them inside condensed single-line containers.
//!
//! ## Examples
//!
//! ```rust
//! use hjson::codec::{CodecRegistry, HexCodec};
//! use hjson::ParseOptions;
//! use std::sync::Arc;
//!
//! let mut codecs = CodecRegistry::new();
//! codecs.register(Arc::new(HexCodec::new())).unwrap();
//!
//! let opts = ParseOptions::new().with_codecs(codecs);
//! let doc = hjson::parse_with_options("0x1f", &opts).unwrap();
//! assert_eq!(doc.value.as_f64(), Some(31.0));
//! ```

use crate::error::{Error, Result};
use crate::value::Value;
use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use std::fmt;
use std::sync::Arc;

/// A two-way mapping between quoteless source text and typed values.
///
/// `decode` returns `None` when the text is not in this codec's format;
/// `encode` returns `None` when the value is not one this codec formats.
/// Both must be pure functions of their input.
pub trait Codec {
    /// Short name used in error attribution, e.g. `"hex"`.
    fn name(&self) -> &str;

    /// Tries to interpret a quoteless scalar.
    fn decode(&self, text: &str) -> Option<Value>;

    /// Tries to render a value as a quoteless token. The result must be
    /// non-empty, must not start with `"` and must not contain one of
    /// `,` `{` `}` `[` `]`; colons are allowed.
    fn encode(&self, value: &Value) -> Option<String>;
}

/// An ordered set of codecs shared by parse and print options.
#[derive(Clone, Default)]
pub struct CodecRegistry {
    codecs: Vec<Arc<dyn Codec + Send + Sync>>,
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.codecs.iter().map(|c| c.name()))
            .finish()
    }
}

impl CodecRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the three reference codecs: math, hex
    /// (decode only) and date.
    #[must_use]
    pub fn standard() -> Self {
        let mut reg = Self::new();
        reg.codecs.push(Arc::new(MathCodec));
        reg.codecs.push(Arc::new(HexCodec::new()));
        reg.codecs.push(Arc::new(DateCodec));
        reg
    }

    /// Appends a codec. Codecs are consulted in registration order.
    pub fn register(&mut self, codec: Arc<dyn Codec + Send + Sync>) -> Result<()> {
        if codec.name().trim().is_empty() {
            return Err(Error::config("codec name may not be empty"));
        }
        self.codecs.push(codec);
        Ok(())
    }

    /// True if no codecs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Offers `text` to each codec in order; the first `Some` wins.
    /// Decoding never fails, a text no codec claims is simply not a token.
    pub(crate) fn decode(&self, text: &str) -> Option<Value> {
        self.codecs.iter().find_map(|c| c.decode(text))
    }

    /// Offers `value` to each codec in order and validates the winning
    /// token. An invalid token is a hard error attributed to the codec, it
    /// would produce output that does not parse back.
    pub(crate) fn encode(&self, value: &Value) -> Result<Option<String>> {
        for codec in &self.codecs {
            if let Some(text) = codec.encode(value) {
                if text.is_empty() {
                    return Err(Error::codec(codec.name(), "produced an empty token"));
                }
                if text.starts_with('"') {
                    return Err(Error::codec(
                        codec.name(),
                        format!("token may not start with a quote: {text}"),
                    ));
                }
                if let Some(bad) = text.chars().find(|c| matches!(c, ',' | '{' | '}' | '[' | ']'))
                {
                    return Err(Error::codec(
                        codec.name(),
                        format!("token may not contain '{bad}': {text}"),
                    ));
                }
                return Ok(Some(text));
            }
        }
        Ok(None)
    }
}

/// Reference codec for non-finite numbers and negative zero.
///
/// Decodes `inf`, `+inf`, `Inf`, `+Inf`, `-inf`, `-Inf`, `nan`, `NaN` and
/// `-0`; encodes non-finite numbers and negative zero back to the canonical
/// spellings `Inf`, `-Inf`, `NaN` and `-0`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MathCodec;

impl Codec for MathCodec {
    fn name(&self) -> &str {
        "math"
    }

    fn decode(&self, text: &str) -> Option<Value> {
        match text {
            "inf" | "+inf" | "Inf" | "+Inf" => Some(Value::Number(f64::INFINITY)),
            "-inf" | "-Inf" => Some(Value::Number(f64::NEG_INFINITY)),
            "nan" | "NaN" => Some(Value::Number(f64::NAN)),
            "-0" => Some(Value::Number(-0.0)),
            _ => None,
        }
    }

    fn encode(&self, value: &Value) -> Option<String> {
        let n = value.as_f64()?;
        if n == 0.0 && n.is_sign_negative() {
            Some("-0".to_string())
        } else if n == f64::INFINITY {
            Some("Inf".to_string())
        } else if n == f64::NEG_INFINITY {
            Some("-Inf".to_string())
        } else if n.is_nan() {
            Some("NaN".to_string())
        } else {
            None
        }
    }
}

/// Reference codec for hexadecimal integers.
///
/// Decodes `0x` followed by hex digits. Encoding is off by default so that
/// ordinary integers keep their decimal form; [`HexCodec::with_output`]
/// turns it on for non-negative whole numbers.
#[derive(Clone, Copy, Debug, Default)]
pub struct HexCodec {
    out: bool,
}

impl HexCodec {
    /// Creates a decode-only hex codec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also encodes non-negative whole numbers as `0x` tokens.
    #[must_use]
    pub fn with_output(mut self, out: bool) -> Self {
        self.out = out;
        self
    }
}

impl Codec for HexCodec {
    fn name(&self) -> &str {
        "hex"
    }

    fn decode(&self, text: &str) -> Option<Value> {
        let digits = text.strip_prefix("0x")?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        u64::from_str_radix(digits, 16)
            .ok()
            .map(|n| Value::Number(n as f64))
    }

    fn encode(&self, value: &Value) -> Option<String> {
        if !self.out {
            return None;
        }
        let n = value.as_f64()?;
        if n.fract() == 0.0 && n >= 0.0 && n <= u64::MAX as f64 {
            Some(format!("0x{:x}", n as u64))
        } else {
            None
        }
    }
}

/// Reference codec for calendar dates and RFC 3339 timestamps.
///
/// `2024-01-15` decodes to midnight UTC; a full timestamp decodes via
/// RFC 3339. Encoding collapses midnight-UTC values back to the bare date.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateCodec;

fn is_date_prefix(text: &str) -> bool {
    let b = text.as_bytes();
    b.len() >= 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

/// Formats a date the way [`DateCodec`] encodes it. Also used by the
/// printer when a `Date` value must be rendered without a codec.
pub(crate) fn format_date(dt: &DateTime<Utc>) -> String {
    let rendered = dt.to_rfc3339_opts(SecondsFormat::Millis, true);
    if rendered.ends_with("T00:00:00.000Z") {
        rendered[..10].to_string()
    } else {
        rendered
    }
}

impl Codec for DateCodec {
    fn name(&self) -> &str {
        "date"
    }

    fn decode(&self, text: &str) -> Option<Value> {
        if !is_date_prefix(text) {
            return None;
        }
        if text.len() == 10 {
            let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
            let midnight = date.and_hms_opt(0, 0, 0)?;
            return Some(Value::Date(Utc.from_utc_datetime(&midnight)));
        }
        if text.as_bytes().get(10) == Some(&b'T') {
            let dt = DateTime::parse_from_rfc3339(text).ok()?;
            return Some(Value::Date(dt.with_timezone(&Utc)));
        }
        None
    }

    fn encode(&self, value: &Value) -> Option<String> {
        value.as_date().map(format_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn math_decodes_spellings() {
        let c = MathCodec;
        assert_eq!(c.decode("Inf"), Some(Value::Number(f64::INFINITY)));
        assert_eq!(c.decode("+inf"), Some(Value::Number(f64::INFINITY)));
        assert_eq!(c.decode("-Inf"), Some(Value::Number(f64::NEG_INFINITY)));
        assert!(matches!(c.decode("NaN"), Some(Value::Number(n)) if n.is_nan()));
        assert_eq!(c.decode("Infinity"), None);
        assert_eq!(c.encode(&Value::Number(f64::INFINITY)), Some("Inf".into()));
        assert_eq!(c.encode(&Value::Number(-0.0)), Some("-0".into()));
        assert_eq!(c.encode(&Value::Number(1.5)), None);
    }

    #[test]
    fn hex_decodes_but_encodes_only_when_enabled() {
        let c = HexCodec::new();
        assert_eq!(c.decode("0x1f"), Some(Value::Number(31.0)));
        assert_eq!(c.decode("0x"), None);
        assert_eq!(c.decode("0xzz"), None);
        assert_eq!(c.decode("1f"), None);
        assert_eq!(c.encode(&Value::Number(31.0)), None);

        let c = HexCodec::new().with_output(true);
        assert_eq!(c.encode(&Value::Number(31.0)), Some("0x1f".into()));
        assert_eq!(c.encode(&Value::Number(-31.0)), None);
        assert_eq!(c.encode(&Value::Number(1.5)), None);
    }

    #[test]
    fn date_midnight_collapses() {
        let c = DateCodec;
        let v = c.decode("2024-01-15").unwrap();
        assert_eq!(c.encode(&v), Some("2024-01-15".into()));

        let v = c.decode("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(c.encode(&v), Some("2024-01-15T10:30:00.000Z".into()));

        assert_eq!(c.decode("2024-01-15x"), None);
        assert_eq!(c.decode("not a date"), None);
    }

    #[test]
    fn registry_order_and_validation() {
        let reg = CodecRegistry::standard();
        assert_eq!(reg.decode("0x10"), Some(Value::Number(16.0)));
        assert_eq!(reg.decode("plain"), None);

        struct Broken;
        impl Codec for Broken {
            fn name(&self) -> &str {
                "broken"
            }
            fn decode(&self, _: &str) -> Option<Value> {
                None
            }
            fn encode(&self, _: &Value) -> Option<String> {
                Some("a,b".to_string())
            }
        }
        let mut reg = CodecRegistry::new();
        reg.register(Arc::new(Broken)).unwrap();
        let err = reg.encode(&Value::Null).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn empty_name_is_rejected() {
        struct Nameless;
        impl Codec for Nameless {
            fn name(&self) -> &str {
                ""
            }
            fn decode(&self, _: &str) -> Option<Value> {
                None
            }
            fn encode(&self, _: &Value) -> Option<String> {
                None
            }
        }
        let mut reg = CodecRegistry::new();
        assert!(reg.register(Arc::new(Nameless)).is_err());
    }
}
