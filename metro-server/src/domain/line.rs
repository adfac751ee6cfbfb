//! Line code and color types.

use std::fmt;

use super::StationId;

/// Error returned when parsing an invalid line code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line code: {reason}")]
pub struct InvalidLineCode {
    reason: &'static str,
}

/// Maximum length of a line code.
const MAX_CODE_LEN: usize = 8;

/// A short line label such as `M2`, `T1`, `MM` or `M1A`.
///
/// Codes are 1 to 8 uppercase ASCII letters or digits. This type guarantees
/// that any `LineCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use metro_server::domain::LineCode;
///
/// let m1a = LineCode::parse("M1A").unwrap();
/// assert_eq!(m1a.as_str(), "M1A");
///
/// assert!(LineCode::parse("m1a").is_err());
/// assert!(LineCode::parse("").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineCode {
    bytes: [u8; MAX_CODE_LEN],
    len: u8,
}

impl LineCode {
    /// Parse a line code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidLineCode> {
        let src = s.as_bytes();

        if src.is_empty() || src.len() > MAX_CODE_LEN {
            return Err(InvalidLineCode {
                reason: "must be 1 to 8 characters",
            });
        }

        let mut bytes = [0u8; MAX_CODE_LEN];
        for (slot, &b) in bytes.iter_mut().zip(src) {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidLineCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
            *slot = b;
        }

        Ok(LineCode {
            bytes,
            len: src.len() as u8,
        })
    }

    /// Parse a line code, trimming whitespace and normalizing to uppercase.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidLineCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the line code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII letters and digits are ever stored.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }
}

impl fmt::Debug for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineCode({})", self.as_str())
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an invalid line color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line color: {reason}")]
pub struct InvalidLineColor {
    reason: &'static str,
}

/// A display color in `#RRGGBB` form.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineColor([u8; 3]);

impl LineColor {
    /// Parse a `#RRGGBB` hex color. Hex digits may be either case.
    pub fn parse(s: &str) -> Result<Self, InvalidLineColor> {
        let hex = s.strip_prefix('#').ok_or(InvalidLineColor {
            reason: "must start with '#'",
        })?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidLineColor {
                reason: "must have exactly 6 hex digits",
            });
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| InvalidLineColor {
                reason: "must have exactly 6 hex digits",
            })
        };
        Ok(LineColor([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl fmt::Debug for LineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineColor({self})")
    }
}

impl fmt::Display for LineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

/// A metro line: its code, display color and ordered station sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub code: LineCode,
    pub color: LineColor,
    /// Stations in physical track order. Consecutive entries are adjacent.
    pub stations: Vec<StationId>,
}

impl Line {
    /// Number of stations on the line.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
