//! Parsers and writers for PlayStation binary metadata formats.
//!
//! All codecs follow the same conventions:
//!
//! * **Generic over** [`std::io::Read`] + [`std::io::Seek`] - pass a
//!   [`std::fs::File`], a [`std::io::Cursor`], or anything else that
//!   implements both traits. Offsets are relative to the reader's position
//!   when parsing starts.
//! * **All or nothing** - `parse` either returns a fully decoded value or an
//!   error; partial results are never exposed.
//! * **Writers do no file I/O** - `write_to` targets any
//!   [`std::io::Write`] and `to_bytes` returns a buffer; persisting it is
//!   up to the caller.
//!
//! ## Format overview
//!
//! | Module  | Format    | Description |
//! |---------|-----------|-------------|
//! | [`sfo`] | PARAM.SFO | Typed key/value metadata stored beside games, patches and save data |

pub mod sfo;
