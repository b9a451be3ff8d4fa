//! PARAM.SFO - PlayStation key/value metadata container.
//!
//! Found next to nearly every piece of PlayStation content (disc roots,
//! installed games, patches, save data). Stores titles, IDs, version
//! strings and bit-flag attributes as a flat table of typed values.
//!
//! ## Layout
//! ```text
//! [0x00] Header                   (0x14 bytes)
//! [0x14] IndexTable               (EntryCount × 0x10 bytes)
//! [KeyTableStart]
//!        KeyTable                 (null-terminated keys, zero-padded to 4)
//! [DataTableStart]
//!        DataTable                (each value zero-padded to its DataMaxLen)
//! ```
//!
//! ## Header (0x14 bytes)
//! ```text
//! [0x00] Magic "\0PSF"            (4 bytes)
//! [0x04] Version (01 01 00 00)    (4 bytes)
//! [0x08] KeyTableStart            (u32 LE)
//! [0x0C] DataTableStart           (u32 LE)
//! [0x10] EntryCount               (u32 LE)
//! ```
//!
//! ## Index Entry (0x10 bytes)
//! ```text
//! [0x00] KeyOffset  - relative to KeyTableStart   (u16 LE)
//! [0x02] DataFormat - see [`DataFormat`]          (u16 LE)
//! [0x04] DataLen    - bytes actually used         (u32 LE)
//! [0x08] DataMaxLen - bytes reserved              (u32 LE)
//! [0x0C] DataOffset - relative to DataTableStart  (u32 LE)
//! ```
//!
//! ## Notes
//! * Written files reserve `DataMaxLen` = the next power of two of
//!   `DataLen` for every value.
//! * All offsets are relative to the start of the SFO, so an SFO embedded
//!   in a larger stream parses the same as a standalone file.

use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::ops::Index;

use tracing::{debug, trace};

use crate::utils::{
    align_up, bytesa, bytesv, le_u16, le_u32, magic, put_le_u16, put_le_u32, read_null_string,
};
use crate::value::{DataFormat, Value};
use crate::{Error, Result};

/// Signature at offset 0.
pub const MAGIC: [u8; 4] = *b"\0PSF";

/// Version bytes written by the encoder (1.01).
pub const VERSION: [u8; 4] = [0x01, 0x01, 0x00, 0x00];

/// Size of the fixed header.
pub const HEADER_SIZE: u32 = 0x14;

/// Size of one index table record.
pub const INDEX_ENTRY_SIZE: u32 = 0x10;

const KEY_TABLE_ALIGN: usize = 4;

/// The fixed SFO header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Raw version bytes (normally `01 01 00 00`).
    pub version: [u8; 4],
    /// Offset of the key table from the start of the SFO.
    pub key_table_start: u32,
    /// Offset of the data table from the start of the SFO.
    pub data_table_start: u32,
    /// Number of index records.
    pub entry_count: u32,
}

impl Header {
    /// Parse the header, including the magic check.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        magic(r, &MAGIC)?;
        let version = bytesa::<4>(r)?;
        let key_table_start = le_u32(r)?;
        let data_table_start = le_u32(r)?;
        let entry_count = le_u32(r)?;
        Ok(Self {
            version,
            key_table_start,
            data_table_start,
            entry_count,
        })
    }

    fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&self.version)?;
        put_le_u32(w, self.key_table_start)?;
        put_le_u32(w, self.data_table_start)?;
        put_le_u32(w, self.entry_count)
    }
}

/// One record of the index table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    /// Offset of the key, relative to the key table.
    pub key_offset: u16,
    /// Raw type tag.
    pub data_format: u16,
    /// Bytes used by the value.
    pub data_len: u32,
    /// Bytes reserved for the value.
    pub data_max_len: u32,
    /// Offset of the value, relative to the data table.
    pub data_offset: u32,
}

impl IndexEntry {
    /// Parse one 16-byte record.
    pub fn parse<R: Read>(r: &mut R) -> Result<Self> {
        Ok(Self {
            key_offset: le_u16(r)?,
            data_format: le_u16(r)?,
            data_len: le_u32(r)?,
            data_max_len: le_u32(r)?,
            data_offset: le_u32(r)?,
        })
    }

    /// How the value bytes are interpreted.
    pub fn format(&self) -> DataFormat {
        DataFormat::from_raw(self.data_format)
    }

    fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        put_le_u16(w, self.key_offset)?;
        put_le_u16(w, self.data_format)?;
        put_le_u32(w, self.data_len)?;
        put_le_u32(w, self.data_max_len)?;
        put_le_u32(w, self.data_offset)
    }
}

/// A single key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Entry {
    /// Parameter name, e.g. `TITLE_ID`.
    pub key: String,
    /// Typed value.
    pub value: Value,
}

/// A decoded PARAM.SFO: an insertion-ordered set of uniquely keyed entries.
///
/// Order only matters for reproducible output; it is the order in which
/// keys were first inserted (or first seen in the source file).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sfo {
    entries: Vec<Entry>,
}

impl Sfo {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an SFO from `r`.
    ///
    /// `r` must be positioned at the very beginning of the magic. Either the
    /// whole table is decoded or an error is returned; a zero-entry file
    /// yields an empty container.
    ///
    /// When a key appears more than once, the last record wins and the entry
    /// keeps the position of the first.
    pub fn parse<R: Read + Seek>(r: &mut R) -> Result<Self> {
        let base = r.stream_position()?;
        let header = Header::parse(r)?;
        debug!(
            key_table_start = header.key_table_start,
            data_table_start = header.data_table_start,
            entry_count = header.entry_count,
            "parsed SFO header"
        );

        let key_table = base + header.key_table_start as u64;
        let data_table = base + header.data_table_start as u64;

        let mut sfo = Self::new();
        for i in 0..header.entry_count as u64 {
            r.seek(SeekFrom::Start(
                base + HEADER_SIZE as u64 + i * INDEX_ENTRY_SIZE as u64,
            ))?;
            let record = IndexEntry::parse(r)?;

            r.seek(SeekFrom::Start(key_table + record.key_offset as u64))?;
            let key = read_null_string(r)?;
            if key.is_empty() {
                return Err(Error::InvalidKey("empty key"));
            }

            trace!(
                index = i,
                key = %key,
                data_format = record.data_format,
                data_len = record.data_len,
                data_max_len = record.data_max_len,
                data_offset = record.data_offset,
                "index record"
            );

            r.seek(SeekFrom::Start(data_table + record.data_offset as u64))?;
            let value = match record.format() {
                DataFormat::Integer => Value::Integer(le_u32(r)?),
                DataFormat::RawText => {
                    let bytes = bytesv(r, record.data_len as usize)?;
                    Value::RawText(String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?)
                }
                DataFormat::Text => Value::Text(read_null_string(r)?),
            };

            if let Some(old) = sfo.put(key, value) {
                debug!(index = i, replaced = ?old, "duplicate SFO key, keeping last value");
            }
        }

        Ok(sfo)
    }

    /// Parse an SFO held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::parse(&mut Cursor::new(data))
    }

    /// Serialize into `w`.
    ///
    /// Output is deterministic for a given container. Fails only with
    /// [`Error::Overflow`] when a table outgrows its offset field, or with
    /// an I/O error from `w`.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        let entry_count =
            u32::try_from(self.entries.len()).map_err(|_| Error::Overflow("entry count"))?;

        let mut index = Vec::with_capacity(self.entries.len());
        let mut keys = Vec::new();
        let mut data = Vec::new();

        for entry in &self.entries {
            let bytes = entry.value.to_bytes();
            let data_len = u32::try_from(bytes.len()).map_err(|_| Error::Overflow("data_len"))?;
            let data_max_len = data_len
                .checked_next_power_of_two()
                .ok_or(Error::Overflow("data_max_len"))?;

            index.push(IndexEntry {
                key_offset: u16::try_from(keys.len()).map_err(|_| Error::Overflow("key_offset"))?,
                data_format: entry.value.format().raw(),
                data_len,
                data_max_len,
                data_offset: u32::try_from(data.len())
                    .map_err(|_| Error::Overflow("data_offset"))?,
            });

            keys.extend_from_slice(entry.key.as_bytes());
            keys.push(0);

            data.extend_from_slice(&bytes);
            data.resize(data.len() + (data_max_len - data_len) as usize, 0);
        }

        keys.resize(align_up(keys.len(), KEY_TABLE_ALIGN), 0);

        let key_table_start = entry_count
            .checked_mul(INDEX_ENTRY_SIZE)
            .and_then(|n| n.checked_add(HEADER_SIZE))
            .ok_or(Error::Overflow("key_table_start"))?;
        let data_table_start = u32::try_from(keys.len())
            .ok()
            .and_then(|n| n.checked_add(key_table_start))
            .ok_or(Error::Overflow("data_table_start"))?;

        let header = Header {
            version: VERSION,
            key_table_start,
            data_table_start,
            entry_count,
        };
        debug!(key_table_start, data_table_start, entry_count, "writing SFO");

        header.write_to(w)?;
        for record in &index {
            record.write_to(w)?;
        }
        w.write_all(&keys)?;
        w.write_all(&data)?;
        Ok(())
    }

    /// Serialize to a byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the container has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.value)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Insert or replace a value, returning the previous one.
    ///
    /// Rejects empty keys, keys containing NUL and [`Value::Text`] values
    /// containing NUL, none of which survive a write/read cycle. A replaced
    /// key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Result<Option<Value>> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::InvalidKey("empty key"));
        }
        if key.contains('\0') {
            return Err(Error::InvalidKey("key contains NUL"));
        }
        if let Value::Text(s) = &value
            && s.contains('\0')
        {
            return Err(Error::InvalidValue("text contains NUL"));
        }
        Ok(self.put(key, value))
    }

    /// Insert `value`, or remove the key when `value` is [`None`].
    pub fn set(&mut self, key: impl Into<String>, value: Option<Value>) -> Result<Option<Value>> {
        match value {
            Some(value) => self.insert(key, value),
            None => Ok(self.remove(&key.into())),
        }
    }

    /// Remove a key, returning its value. Remaining entries keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let i = self.position(key)?;
        Some(self.entries.remove(i).value)
    }

    /// Iterate over all entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Iterate over all keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    fn put(&mut self, key: String, value: Value) -> Option<Value> {
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].value, value)),
            None => {
                self.entries.push(Entry { key, value });
                None
            }
        }
    }
}

impl<'a> IntoIterator for &'a Sfo {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Index<&str> for Sfo {
    type Output = Value;

    /// Index by key.
    ///
    /// # Panics
    /// Panics if the key does not exist in the container.
    fn index(&self, index: &str) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!("no key '{index}' in SFO"))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Sfo {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = s.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.value)?;
        }
        map.end()
    }
}
