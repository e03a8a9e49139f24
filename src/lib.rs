//! # NMEA 0183 Sentence
//!
//! This library parses, validates and authors NMEA 0183 sentences with the format:
//! `$TTSSS,D1,D2,...,Dn*CC\r\n`
//!
//! The crate is layered bottom-up:
//! - [`codec`]: conversion between field tokens and typed values
//! - [`nmea0183`]: framing, checksum and tokenization of a raw line
//! - [`sentence`]: the generic mutable [`Sentence`], the layout registry and the [`SentenceBuilder`]
//! - [`sentences`]: typed views such as [`GgaSentence`] sharing capability traits
//!
//! The parser is configurable to handle:
//! - Required or optional checksum validation
//! - Required, forbidden or optional CRLF line endings
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_sentence::{GgaSentence, codec::GpsFixQuality, sentences::HasFixQuality};
//!
//! let line = "$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79";
//!
//! let mut gga: GgaSentence = line.parse().unwrap();
//! assert_eq!(gga.fix_quality(), Ok(GpsFixQuality::Gps));
//! assert_eq!(gga.altitude(), Ok(28.0));
//! assert_eq!(gga.to_string(), line);
//!
//! gga.set_fix_quality(GpsFixQuality::Dgps).unwrap();
//! assert_eq!(gga.sentence().field(5), Ok("2"));
//! ```
//!
//! Lines that do not need to carry a checksum go through a configured parser:
//!
//! ```rust
//! use nmea0183_sentence::{ChecksumMode, LineEndingMode, Nmea0183Parser};
//!
//! let parser = Nmea0183Parser::builder()
//!     .checksum_mode(ChecksumMode::Optional)
//!     .line_ending_mode(LineEndingMode::Required)
//!     .build();
//!
//! let sentence = parser.parse("$GPZDA,032915,07,08,2004,00,00\r\n").unwrap();
//! assert_eq!(sentence.sentence_id(), "ZDA");
//! ```

pub mod codec;
pub mod error;
pub mod nmea0183;
pub mod sentence;
pub mod sentences;

pub use error::{Error, FieldError, FramingError, Result};
pub use nmea0183::{
    ChecksumMode, LineEndingMode, Nmea0183Parser, Nmea0183ParserBuilder, RawSentence, StartMarker,
};
pub use sentence::{Sentence, SentenceBuilder};
pub use sentences::{GgaSentence, NmeaSentence};

/// Parses `line` with the default [`Nmea0183Parser`]: checksum required,
/// trailing `\r\n` optional.
///
/// ```rust
/// use nmea0183_sentence::{Error, parse};
///
/// let sentence = parse("$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79").unwrap();
/// assert_eq!(sentence.talker(), "GP");
///
/// assert!(matches!(
///     parse("$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*00"),
///     Err(Error::ChecksumMismatch { expected: 0x79, found: 0x00 })
/// ));
/// ```
pub fn parse(line: &str) -> Result<Sentence> {
    Nmea0183Parser::default().parse(line)
}

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
