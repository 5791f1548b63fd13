use std::fmt;

use crate::error::ProtocolError;

/// Marker prefix addressing a message to the multi slot.
pub const MULTI_MARKER: char = '+';

/// Argument separator.
pub const SEPARATOR: char = '|';

// ── Message ───────────────────────────────────────────────────────────────

/// One split wire message: `[+]<key>|<arg0>|<arg1>|...`.
///
/// Splitting preserves empty fields everywhere, including trailing ones, so
/// `"p|0|1|2|3|"` carries five arguments, the last one empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    multi: bool,
    key: String,
    args: Vec<String>,
}

impl Message {
    pub fn new(multi: bool, key: impl Into<String>, args: Vec<String>) -> Self {
        Self { multi, key: key.into(), args }
    }

    /// Splits a raw payload into marker, key and argument vector.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let (multi, body) = match raw.strip_prefix(MULTI_MARKER) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let (key, rest) = match body.split_once(SEPARATOR) {
            Some((key, rest)) => (key, Some(rest)),
            None => (body, None),
        };

        if key.is_empty() {
            return Err(ProtocolError::EmptyMessage);
        }

        let args = match rest {
            Some(rest) => rest.split(SEPARATOR).map(str::to_owned).collect(),
            None => Vec::new(),
        };

        Ok(Self { multi, key: key.to_owned(), args })
    }

    /// `true` when the message is addressed to the multi slot.
    #[inline]
    pub fn multi(&self) -> bool {
        self.multi
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Raw argument `i`.
    pub fn string(&self, i: usize) -> Result<&str, ProtocolError> {
        self.args
            .get(i)
            .map(String::as_str)
            .ok_or(ProtocolError::MissingArgument { index: i })
    }

    /// Argument `i` as an `i32`.
    ///
    /// Decimal spellings are accepted and truncated toward zero (`"10.0"` → 10).
    pub fn int(&self, i: usize) -> Result<i32, ProtocolError> {
        let raw = self.string(i)?.trim();
        if let Ok(v) = raw.parse::<i32>() {
            return Ok(v);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= i32::MIN as f64 && v <= i32::MAX as f64 => {
                Ok(v.trunc() as i32)
            }
            _ => Err(self.malformed(i, "integer")),
        }
    }

    /// Argument `i` as an `i64`.
    pub fn long(&self, i: usize) -> Result<i64, ProtocolError> {
        let raw = self.string(i)?.trim();
        if let Ok(v) = raw.parse::<i64>() {
            return Ok(v);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= i64::MIN as f64 && v <= i64::MAX as f64 => {
                Ok(v.trunc() as i64)
            }
            _ => Err(self.malformed(i, "integer")),
        }
    }

    /// Argument `i` as a finite `f64`.
    pub fn double(&self, i: usize) -> Result<f64, ProtocolError> {
        match self.string(i)?.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.malformed(i, "number")),
        }
    }

    /// Argument `i` as an `i64`, or `None` when absent or empty.
    pub fn optional_long(&self, i: usize) -> Result<Option<i64>, ProtocolError> {
        match self.args.get(i) {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(_) => self.long(i).map(Some),
        }
    }

    /// Argument `i` as a straight-alpha RGBA colour (`#rrggbbaa` or `#rrggbb`).
    pub fn colour(&self, i: usize) -> Result<[u8; 4], ProtocolError> {
        parse_hex_colour(self.string(i)?).ok_or_else(|| self.malformed(i, "#rrggbbaa colour"))
    }

    /// Re-encodes the message into its wire form.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        if self.multi {
            out.push(MULTI_MARKER);
        }
        out.push_str(&self.key);
        for arg in &self.args {
            out.push(SEPARATOR);
            out.push_str(arg);
        }
        out
    }

    fn malformed(&self, index: usize, expected: &'static str) -> ProtocolError {
        ProtocolError::MalformedArgument {
            index,
            value: self.args.get(index).cloned().unwrap_or_default(),
            expected,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Parses `#rrggbbaa` / `#rrggbb` (leading `#` optional) into straight RGBA bytes.
pub fn parse_hex_colour(s: &str) -> Option<[u8; 4]> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
    match hex.len() {
        6 => Some([byte(0)?, byte(2)?, byte(4)?, 0xFF]),
        8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => None,
    }
}
