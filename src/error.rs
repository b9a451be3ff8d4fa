//! Library-wide error and result types.

use std::io;

use thiserror::Error;

/// Result alias used throughout sfokit.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
///
/// Error messages are kept intentionally terse; callers that need richer
/// context should wrap `Error` in their own type.
#[derive(Debug, Error)]
pub enum Error {
    /// The first four bytes are not the `"\0PSF"` signature.
    #[error("bad magic value")]
    BadMagic,
    /// The source ended before all expected bytes could be read.
    #[error("truncated input")]
    TruncatedInput,
    /// A typed-overlay setter rejected a value. The container is unchanged.
    #[error("constraint violation on {key}: {reason}")]
    ConstraintViolation { key: String, reason: &'static str },
    /// The file decoded to zero entries and the caller requires at least one.
    #[error("no parameters found")]
    EmptyContainer,
    /// A key that could not survive a write/read cycle.
    #[error("invalid key: {0}")]
    InvalidKey(&'static str),
    /// A value that could not survive a write/read cycle.
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
    /// A fixed-length text payload is not valid UTF-8.
    #[error("fixed-length text is not valid UTF-8")]
    InvalidUtf8,
    /// An offset or length does not fit the width of its on-disk field.
    #[error("{0} overflows its field")]
    Overflow(&'static str),
    /// An underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        // Every short read surfaces the same way, whatever the reader.
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::TruncatedInput
        } else {
            Error::Io(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_maps_to_truncated() {
        let e: Error = io::Error::from(io::ErrorKind::UnexpectedEof).into();
        assert!(matches!(e, Error::TruncatedInput));
    }

    #[test]
    fn other_io_errors_keep_source() {
        let e: Error = io::Error::from(io::ErrorKind::PermissionDenied).into();
        assert!(matches!(e, Error::Io(_)));
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn constraint_message_names_key() {
        let e = Error::ConstraintViolation {
            key: "TITLE".into(),
            reason: "must be less than 128 bytes",
        };
        assert_eq!(
            e.to_string(),
            "constraint violation on TITLE: must be less than 128 bytes"
        );
    }
}
