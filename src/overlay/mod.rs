//! Typed overlays over the generic [`Sfo`] container.
//!
//! An overlay is a platform schema: a set of known keys, each with a Rust
//! type and optional validation. Overlays never bypass the container's
//! invariants; they read and write through the helpers in this module.
//!
//! * **Getters fail softly** - a missing key or an unexpected tag both
//!   yield [`None`].
//! * **`None` means absent** - passing [`None`] to a setter removes the key.
//! * **Setters validate first** - a rejected value returns
//!   [`Error::ConstraintViolation`] and leaves the container untouched.
//!
//! | Module   | Schema |
//! |----------|--------|
//! | [`ps3`]  | PS3 PARAM.SFO (games, save data, disc roots) |
//! | [`ps4`]  | PS4 param.sfo (applications, patches, add-ons) |
//! | [`ids`]  | Content / service identifiers used by PS4 fields |
//!
//! Schemas for other platforms implement [`ParamSfo`] the same way.

pub mod ids;
pub mod language;
pub mod ps3;
pub mod ps4;

use std::collections::HashMap;
use std::fs::{self, File};
use std::hash::Hash;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use crate::formats::sfo::Sfo;
use crate::value::Value;
use crate::{Error, Result};

/// A platform schema layered over an [`Sfo`].
pub trait ParamSfo: Sized {
    /// Wrap an already decoded container.
    fn from_sfo(sfo: Sfo) -> Self;

    /// The underlying container.
    fn sfo(&self) -> &Sfo;

    /// Mutable access to the underlying container.
    fn sfo_mut(&mut self) -> &mut Sfo;

    /// Unwrap into the underlying container.
    fn into_sfo(self) -> Sfo;

    /// Decode from `r`, rejecting files without any parameters.
    fn parse<R: Read + Seek>(r: &mut R) -> Result<Self> {
        let sfo = Sfo::parse(r)?;
        if sfo.is_empty() {
            return Err(Error::EmptyContainer);
        }
        Ok(Self::from_sfo(sfo))
    }

    /// Decode from memory, rejecting files without any parameters.
    fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::parse(&mut Cursor::new(data))
    }

    /// Open and decode a PARAM.SFO file.
    fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::parse(&mut reader)
    }

    /// Encode the underlying container.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        self.sfo().to_bytes()
    }

    /// Encode and write to `path`, replacing any existing file.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

/// Read an [`Value::Integer`] field.
pub fn get_u32(sfo: &Sfo, key: &str) -> Option<u32> {
    sfo.get(key)?.as_u32()
}

/// Read a [`Value::Text`] field.
pub fn get_text<'a>(sfo: &'a Sfo, key: &str) -> Option<&'a str> {
    match sfo.get(key)? {
        Value::Text(s) => Some(s),
        _ => None,
    }
}

/// Read a [`Value::RawText`] field.
pub fn get_raw_text<'a>(sfo: &'a Sfo, key: &str) -> Option<&'a str> {
    match sfo.get(key)? {
        Value::RawText(s) => Some(s),
        _ => None,
    }
}

/// Write or remove an [`Value::Integer`] field.
pub fn set_u32(sfo: &mut Sfo, key: &str, value: Option<u32>) -> Result<()> {
    sfo.set(key, value.map(Value::integer))?;
    Ok(())
}

/// Write or remove a [`Value::Text`] field.
///
/// `check` runs before anything is written; when it returns `false` the
/// call fails with `reason`.
pub fn set_text(
    sfo: &mut Sfo,
    key: &str,
    value: Option<&str>,
    check: impl FnOnce(&str) -> bool,
    reason: &'static str,
) -> Result<()> {
    validate(key, value, check, reason)?;
    sfo.set(key, value.map(Value::text))?;
    Ok(())
}

/// Write or remove a [`Value::RawText`] field. See [`set_text`].
pub fn set_raw_text(
    sfo: &mut Sfo,
    key: &str,
    value: Option<&str>,
    check: impl FnOnce(&str) -> bool,
    reason: &'static str,
) -> Result<()> {
    validate(key, value, check, reason)?;
    sfo.set(key, value.map(Value::raw_text))?;
    Ok(())
}

fn validate(
    key: &str,
    value: Option<&str>,
    check: impl FnOnce(&str) -> bool,
    reason: &'static str,
) -> Result<()> {
    match value {
        Some(s) if !check(s) => Err(Error::ConstraintViolation {
            key: key.to_owned(),
            reason,
        }),
        _ => Ok(()),
    }
}

/// An enum whose variants are stored as short textual codes, such as the
/// `CATEGORY` field.
pub trait ShortCode: Copy + Eq + Hash + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// The on-disk code of this variant.
    fn code(self) -> &'static str;
}

/// Reverse lookup from short codes to variants.
///
/// Variant-to-code is the exhaustive [`ShortCode::code`] match; this table
/// covers the other direction. Build it once, in a `LazyLock` static.
#[derive(Debug)]
pub struct CodeTable<T> {
    by_code: HashMap<&'static str, T>,
}

impl<T: ShortCode> CodeTable<T> {
    /// Build the table from [`ShortCode::ALL`].
    pub fn new() -> Self {
        Self {
            by_code: T::ALL.iter().map(|&v| (v.code(), v)).collect(),
        }
    }

    /// Find the variant for `code`. Codes are case-sensitive.
    pub fn lookup(&self, code: &str) -> Option<T> {
        self.by_code.get(code).copied()
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Whether the table has no codes.
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl<T: ShortCode> Default for CodeTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Declare a `u32` bit-flag newtype with named constants and
/// human-readable descriptions.
macro_rules! flag_set {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                const $flag:ident = $bits:expr, $desc:literal;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(u32);

        impl $name {
            $(
                $(#[$fmeta])*
                pub const $flag: Self = Self($bits);
            )*

            const NAMED: &'static [(Self, &'static str)] = &[$((Self::$flag, $desc)),*];

            /// Wrap raw bits. Unknown bits are kept.
            pub const fn from_bits(bits: u32) -> Self {
                Self(bits)
            }

            /// The raw bits.
            pub const fn bits(self) -> u32 {
                self.0
            }

            /// Whether every bit of `other` is set.
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// Descriptions of the named flags that are set.
            pub fn describe(self) -> Vec<&'static str> {
                Self::NAMED
                    .iter()
                    .filter(|(flag, _)| {
                        if self.0 == 0 {
                            flag.0 == 0
                        } else {
                            flag.0 != 0 && self.contains(*flag)
                        }
                    })
                    .map(|(_, desc)| *desc)
                    .collect()
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.describe().join(", "))
            }
        }
    };
}

pub(crate) use flag_set;
