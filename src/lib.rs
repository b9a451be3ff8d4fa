//! **sfokit** - a reusable Rust library for PlayStation PARAM.SFO metadata.
//!
//! # Layers
//! | Module | Purpose |
//! |--------|---------|
//! | [`formats::sfo`]  | Generic SFO codec: [`Sfo`] container, decoder and encoder |
//! | [`value`]         | Tagged values ([`Value`]) and on-disk tags |
//! | [`overlay`]       | Typed schemas over the container (PS3, PS4) |
//!
//! # Example
//! ```
//! use sfokit::{Sfo, Value};
//!
//! let mut sfo = Sfo::new();
//! sfo.insert("TITLE_ID", Value::text("BLUS12345"))?;
//! sfo.insert("PARENTAL_LEVEL", Value::integer(1))?;
//!
//! let bytes = sfo.to_bytes()?;
//! assert_eq!(Sfo::from_bytes(&bytes)?, sfo);
//! # Ok::<(), sfokit::Error>(())
//! ```

pub mod error;
pub mod formats;
pub mod overlay;
pub(crate) mod utils;
pub mod value;

pub use error::{Error, Result};
pub use formats::sfo::{Entry, Sfo};
pub use value::{DataFormat, Value};
