//! Tagged values stored in a PARAM.SFO container.
//!
//! Each index record carries a 16-bit `data_format` tag that decides how the
//! value bytes are interpreted:
//!
//! | Tag      | Hex      | Variant            | On disk |
//! |----------|----------|--------------------|---------|
//! | `4`      | `0x0004` | [`Value::RawText`] | exactly `data_len` bytes, no terminator |
//! | `516`    | `0x0204` | [`Value::Text`]    | UTF-8 followed by one NUL |
//! | `1028`   | `0x0404` | [`Value::Integer`] | `u32` LE |

use std::fmt;

/// On-disk type tag of an index record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum DataFormat {
    /// Fixed-length text, stored without terminator.
    RawText = 0x0004,
    /// Null-terminated UTF-8 text.
    Text = 0x0204,
    /// Little-endian `u32`.
    Integer = 0x0404,
}

impl DataFormat {
    /// Classify a raw tag.
    ///
    /// Unknown tags are read as null-terminated text, the most common
    /// value kind in the wild.
    pub fn from_raw(tag: u16) -> Self {
        match tag {
            0x0004 => Self::RawText,
            0x0404 => Self::Integer,
            _ => Self::Text,
        }
    }

    /// The tag as written to the index table.
    pub fn raw(self) -> u16 {
        self as u16
    }
}

/// A typed SFO value.
///
/// Build values with the per-variant constructors so that the tag always
/// follows the caller's intent, not the shape of the data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "format", content = "value"))]
pub enum Value {
    /// Unsigned 32-bit integer.
    Integer(u32),
    /// Null-terminated text. The terminator is not part of the string.
    Text(String),
    /// Fixed-width text such as an account ID. Stored byte-for-byte.
    RawText(String),
}

impl Value {
    /// An [`Value::Integer`].
    pub fn integer(v: u32) -> Self {
        Self::Integer(v)
    }

    /// A null-terminated [`Value::Text`].
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// A fixed-length [`Value::RawText`].
    pub fn raw_text(s: impl Into<String>) -> Self {
        Self::RawText(s.into())
    }

    /// The tag this value is written with.
    pub fn format(&self) -> DataFormat {
        match self {
            Self::Integer(_) => DataFormat::Integer,
            Self::Text(_) => DataFormat::Text,
            Self::RawText(_) => DataFormat::RawText,
        }
    }

    /// The integer payload, if this is an [`Value::Integer`].
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// The string payload of either text variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::RawText(s) => Some(s),
            Self::Integer(_) => None,
        }
    }

    /// Serialized form before padding; its length is the record's `data_len`.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Integer(v) => v.to_le_bytes().to_vec(),
            Self::Text(s) => {
                let mut b = Vec::with_capacity(s.len() + 1);
                b.extend_from_slice(s.as_bytes());
                b.push(0);
                b
            }
            Self::RawText(s) => s.as_bytes().to_vec(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::RawText(s) => write!(f, "{}", s.escape_debug()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_reads_as_text() {
        assert_eq!(DataFormat::from_raw(0x0204), DataFormat::Text);
        assert_eq!(DataFormat::from_raw(0x1234), DataFormat::Text);
        assert_eq!(DataFormat::from_raw(4), DataFormat::RawText);
        assert_eq!(DataFormat::from_raw(1028), DataFormat::Integer);
    }

    #[test]
    fn tags_match_on_disk_values() {
        assert_eq!(DataFormat::RawText.raw(), 4);
        assert_eq!(DataFormat::Text.raw(), 516);
        assert_eq!(DataFormat::Integer.raw(), 1028);
    }

    #[test]
    fn text_gets_exactly_one_terminator() {
        assert_eq!(Value::text("01.00").to_bytes(), b"01.00\0");
        assert_eq!(Value::text("").to_bytes(), b"\0");
    }

    #[test]
    fn raw_text_has_no_terminator() {
        assert_eq!(Value::raw_text("abcd").to_bytes(), b"abcd");
    }

    #[test]
    fn integer_is_little_endian() {
        assert_eq!(Value::integer(0x0102_0304).to_bytes(), [4, 3, 2, 1]);
    }

    #[test]
    fn accessors_follow_variant() {
        assert_eq!(Value::integer(7).as_u32(), Some(7));
        assert_eq!(Value::integer(7).as_str(), None);
        assert_eq!(Value::text("x").as_str(), Some("x"));
        assert_eq!(Value::raw_text("y").as_str(), Some("y"));
        assert_eq!(Value::text("x").as_u32(), None);
    }
}
