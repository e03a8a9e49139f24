//! # Error Types
//!
//! This module defines the error types used throughout the library.
//!
//! Every failure is returned to the caller of the parse or accessor operation.
//! Nothing is retried or silently skipped; what to do with a rejected line is
//! up to the caller.

use thiserror::Error;

/// Result alias used by every fallible operation of this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Represents all possible errors that can occur while parsing, validating,
/// accessing or building NMEA 0183 sentences.
///
/// The `Display` output names the failing stage (framing, checksum, registry,
/// field) and, where one exists, the zero-based index of the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The sentence envelope is malformed: missing start marker, checksum
    /// delimiter, identifier or line ending.
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// The checksum of the sentence was corrupt or incorrect.
    ///
    /// Contains both the checksum calculated from the sentence content and
    /// the checksum claimed by the sentence.
    #[error("checksum mismatch: computed {expected:02X}, found {found:02X}")]
    ChecksumMismatch {
        /// The checksum calculated from the sentence content
        expected: u8,
        /// The checksum found in the sentence
        found: u8,
    },

    /// The sentence identifier has no layout in the sentence registry.
    ///
    /// Carries the identifier that was found on the wire.
    #[error("unrecognized sentence identifier {0:?}")]
    UnrecognizedSentence(String),

    /// A sentence was handed to a typed view of a different sentence type.
    #[error("expected a {expected} sentence, found {found}")]
    SentenceMismatch {
        /// The sentence identifier the typed view wraps
        expected: &'static str,
        /// The sentence identifier that was found
        found: String,
    },

    /// The number of fields does not match the registered layout.
    #[error("{sentence_id} sentence expects {expected} fields, found {found}")]
    FieldCount {
        /// The sentence identifier
        sentence_id: String,
        /// Field count of the registered layout
        expected: usize,
        /// Field count found on the wire
        found: usize,
    },

    /// A field token cannot be decoded as its declared type, or lies outside
    /// the declared range.
    #[error("field {index}: {value:?} is not a valid {expected}")]
    FieldFormat {
        /// Zero-based field index
        index: usize,
        /// The offending token
        value: String,
        /// Description of what the field must contain
        expected: &'static str,
    },

    /// A code is not part of the recognized set of its enumeration.
    #[error("{}{value:?} is not a recognized {enumeration} code", at_field(.index))]
    UnknownEnumValue {
        /// Zero-based field index, `None` when the code did not come from a field
        index: Option<usize>,
        /// Name of the enumeration
        enumeration: &'static str,
        /// The offending code
        value: String,
    },

    /// A setter received a value outside its contract.
    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        /// Name of the field being set
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A getter was invoked on an empty field whose absence policy is to fail.
    #[error("field {index} ({field}) is absent")]
    FieldAbsent {
        /// Zero-based field index
        index: usize,
        /// Name of the field
        field: &'static str,
    },

    /// Positional access outside the layout of the sentence.
    #[error("field index {index} is out of range for a sentence of {len} fields")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Field count of the sentence
        len: usize,
    },
}

fn at_field(index: &Option<usize>) -> String {
    match index {
        Some(index) => format!("field {index}: "),
        None => String::new(),
    }
}

/// The envelope-level reason a line was rejected before its fields were
/// looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FramingError {
    /// The line contains non-ASCII characters.
    ///
    /// NMEA sentences must be ASCII-only for proper parsing and checksum calculation.
    #[error("sentence contains non-ASCII characters")]
    NonAscii,

    /// The line does not start with `$` or `!`.
    #[error("sentence does not start with '$' or '!'")]
    MissingStartMarker,

    /// The line has no `*` checksum delimiter.
    #[error("sentence has no '*' checksum delimiter")]
    MissingChecksumDelimiter,

    /// The checksum is not exactly two hexadecimal digits.
    #[error("checksum is not two hexadecimal digits")]
    InvalidChecksum,

    /// The line does not end with `\r\n`.
    #[error("sentence does not end with CRLF")]
    MissingLineEnding,

    /// The line ends with `\r\n` although line endings are forbidden.
    #[error("sentence ends with a forbidden line ending")]
    UnexpectedLineEnding,

    /// The talker and sentence identifier are not five alphanumeric
    /// characters followed by a field delimiter.
    #[error("malformed talker/sentence identifier")]
    MalformedIdentifier,
}

/// Failure of a single field conversion in the [`codec`](crate::codec).
///
/// A codec does not know where its token came from; the sentence layer turns
/// this into an [`Error`] carrying the field index (parse path) or the field
/// name (setter path).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The token cannot be decoded as the declared type.
    #[error("{value:?} is not a valid {expected}")]
    Format {
        /// The offending token
        value: String,
        /// Description of what the field must contain
        expected: &'static str,
    },

    /// The value decodes but lies outside the declared range.
    #[error("{value} is out of range for {expected}")]
    OutOfRange {
        /// The offending value
        value: String,
        /// Description of the valid range
        expected: &'static str,
    },

    /// The code is not in the recognized set of an enumeration.
    #[error("{value:?} is not a recognized {enumeration} code")]
    UnknownCode {
        /// Name of the enumeration
        enumeration: &'static str,
        /// The offending code
        value: String,
    },
}

impl FieldError {
    /// Attaches the field index, as reported by the parse path and getters.
    pub fn at(self, index: usize) -> Error {
        match self {
            FieldError::Format { value, expected } | FieldError::OutOfRange { value, expected } => {
                Error::FieldFormat {
                    index,
                    value,
                    expected,
                }
            }
            FieldError::UnknownCode { enumeration, value } => Error::UnknownEnumValue {
                index: Some(index),
                enumeration,
                value,
            },
        }
    }

    /// Reports the failure as a rejected setter argument.
    pub fn for_argument(self, field: &'static str) -> Error {
        match self {
            FieldError::UnknownCode { enumeration, value } => Error::UnknownEnumValue {
                index: None,
                enumeration,
                value,
            },
            other => Error::InvalidArgument {
                field,
                reason: other.to_string(),
            },
        }
    }
}
