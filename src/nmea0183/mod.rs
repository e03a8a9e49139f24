//! # NMEA 0183 Sentence Framing
//!
//! This module splits a raw line into its envelope parts and hands the
//! result to the sentence model. It handles the standard NMEA 0183 format:
//! `$TTSSS,D1,D2,...,Dn*CC\r\n`
//!
//! The parser is configurable to handle variations in:
//! - Checksum requirements (required or optional)
//! - Line ending requirements (CRLF required, forbidden or optional)

use log::{debug, trace};
use nom::{
    Err, IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take, take_till, take_until, take_while_m_n},
    character::complete::{char, hex_digit0},
    combinator::{all_consuming, opt, rest, rest_len, value, verify},
    error::ErrorKind,
    multi::many0,
    number::complete::hex_u32,
    sequence::{preceded, terminated},
};

use crate::{Error, FramingError, Result, sentence::Sentence};

pub mod checksum;

/// Defines how the parser should handle sentence checksums.
///
/// NMEA 0183 sentences can include a checksum in the format `*CC` where
/// CC is a two-digit hexadecimal value representing the XOR of all bytes in the
/// sentence content (excluding the start marker and '*' delimiter).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    #[default]
    /// Checksum is required and must be present.
    ///
    /// The parser will fail if no `*CC` checksum is found at the end of the sentence.
    /// The checksum is always validated against the calculated one.
    Required,

    /// Checksum is optional but will be validated if present.
    ///
    /// Use this mode when working with legacy equipment that may not always
    /// include checksums.
    Optional,
}

/// Defines how the parser should handle line endings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineEndingMode {
    /// CRLF line ending is required and must be present.
    ///
    /// Use this mode when parsing raw serial port data.
    Required,

    /// No line ending may be present.
    ///
    /// Use this mode for sentences coming from APIs, databases, or other
    /// sources where line endings have been removed.
    Forbidden,

    #[default]
    /// The line may end with `\r\n`, a bare `\n`, or nothing at all.
    ///
    /// Use this mode for lines read from log files or split by a line reader.
    Optional,
}

/// Start marker of a sentence.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StartMarker {
    #[default]
    /// `$` - conventional sentence
    Standard,
    /// `!` - encapsulation sentence
    Encapsulation,
}

impl StartMarker {
    /// Returns the marker character.
    pub fn as_char(self) -> char {
        match self {
            StartMarker::Standard => '$',
            StartMarker::Encapsulation => '!',
        }
    }
}

/// A line split into its envelope parts, before any field is interpreted.
///
/// Borrowed from the input line; nothing is copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSentence<'a> {
    /// The start marker
    pub marker: StartMarker,
    /// The two-character talker identifier
    pub talker: &'a str,
    /// The three-character sentence identifier
    pub sentence_id: &'a str,
    /// Field tokens in order. Whitespace-only tokens are normalized to empty.
    pub fields: Vec<&'a str>,
    /// Claimed checksum, `None` only when checksums are optional and absent
    pub checksum: Option<u8>,
    /// The checksummed span between the start marker and `*`
    pub payload: &'a str,
}

impl RawSentence<'_> {
    /// Compares the claimed checksum with the one computed over the payload.
    ///
    /// A sentence without checksum passes.
    pub fn verify(&self) -> Result<()> {
        match self.checksum {
            Some(found) => {
                let expected = checksum::compute(self.payload);
                if expected == found {
                    Ok(())
                } else {
                    Err(Error::ChecksumMismatch { expected, found })
                }
            }
            None => Ok(()),
        }
    }
}

/// Creates a configured NMEA 0183 sentence parser.
///
/// It uses the builder pattern to allow for flexible configuration of the parser settings.
///
/// # Examples
///
/// ```rust
/// use nmea0183_sentence::{ChecksumMode, LineEndingMode, Nmea0183ParserBuilder};
///
/// let line = "$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79";
///
/// // Strict: checksum and CRLF both required
/// let strict_parser = Nmea0183ParserBuilder::new()
///     .checksum_mode(ChecksumMode::Required)
///     .line_ending_mode(LineEndingMode::Required)
///     .build();
/// assert!(strict_parser.parse(&format!("{line}\r\n")).is_ok());
/// assert!(strict_parser.parse(line).is_err()); // (missing CRLF)
///
/// // Checksum required, no CRLF allowed
/// let no_crlf_parser = Nmea0183ParserBuilder::new()
///     .line_ending_mode(LineEndingMode::Forbidden)
///     .build();
/// assert!(no_crlf_parser.parse(line).is_ok());
/// assert!(no_crlf_parser.parse(&format!("{line}\r\n")).is_err()); // (CRLF present)
///
/// // Lenient: checksum optional
/// let lenient_parser = Nmea0183ParserBuilder::new()
///     .checksum_mode(ChecksumMode::Optional)
///     .build();
/// assert!(lenient_parser.parse("$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,").is_ok());
/// assert!(lenient_parser.parse("$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*99").is_err());
/// ```
#[must_use]
#[derive(Debug, Default, Clone, Copy)]
pub struct Nmea0183ParserBuilder {
    /// Checksum mode for the parser.
    checksum_mode: ChecksumMode,

    /// Line ending mode for the parser.
    line_ending_mode: LineEndingMode,
}

impl Nmea0183ParserBuilder {
    /// Creates a new parser builder with default settings.
    ///
    /// The default settings are:
    /// - Checksum mode: [`ChecksumMode::Required`]
    /// - Line ending mode: [`LineEndingMode::Optional`]
    pub fn new() -> Self {
        Nmea0183ParserBuilder {
            checksum_mode: ChecksumMode::Required,
            line_ending_mode: LineEndingMode::Optional,
        }
    }

    /// Sets the checksum mode for the parser.
    pub fn checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    /// Sets the line ending mode for the parser.
    pub fn line_ending_mode(mut self, mode: LineEndingMode) -> Self {
        self.line_ending_mode = mode;
        self
    }

    /// Builds the parser with the configured settings.
    pub fn build(self) -> Nmea0183Parser {
        Nmea0183Parser {
            checksum_mode: self.checksum_mode,
            line_ending_mode: self.line_ending_mode,
        }
    }
}

/// NMEA 0183 sentence parser.
///
/// Holds only its configuration, so a single parser can be shared freely
/// between threads.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Nmea0183Parser {
    checksum_mode: ChecksumMode,
    line_ending_mode: LineEndingMode,
}

impl Nmea0183Parser {
    /// Shorthand for [`Nmea0183ParserBuilder::new`].
    pub fn builder() -> Nmea0183ParserBuilder {
        Nmea0183ParserBuilder::new()
    }

    pub fn checksum_mode(&self) -> ChecksumMode {
        self.checksum_mode
    }

    pub fn line_ending_mode(&self) -> LineEndingMode {
        self.line_ending_mode
    }

    /// Splits a line into marker, identifiers, field tokens and checksum.
    ///
    /// The returned sentence is framed but neither checksum verified nor
    /// checked against a sentence layout.
    ///
    /// The line is processed as follows:
    /// * Validate that the input is ASCII-only
    /// * Expect the line to start with `$` or `!`
    /// * Strip the line ending according to the [`LineEndingMode`]
    /// * Split off the `*CC` checksum according to the [`ChecksumMode`]
    /// * Read the five-character identifier and the comma separated fields
    ///
    /// ```rust
    /// use nmea0183_sentence::{Nmea0183Parser, StartMarker};
    ///
    /// let raw = Nmea0183Parser::default().tokenize("$GPGLL,,,,,, ,V*0A\r\n").unwrap();
    /// assert_eq!(raw.marker, StartMarker::Standard);
    /// assert_eq!((raw.talker, raw.sentence_id), ("GP", "GLL"));
    /// assert_eq!(raw.fields, ["", "", "", "", "", "", "V"]);
    /// assert_eq!(raw.payload, "GPGLL,,,,,, ,V");
    /// ```
    pub fn tokenize<'a>(&self, line: &'a str) -> Result<RawSentence<'a>> {
        if !line.is_ascii() {
            return Err(FramingError::NonAscii.into());
        }

        let (i, marker) = start_marker(line).map_err(|_| FramingError::MissingStartMarker)?;

        let (body, ()) = crlf(self.line_ending_mode).parse(i).map_err(|_| {
            if self.line_ending_mode == LineEndingMode::Required {
                FramingError::MissingLineEnding
            } else {
                FramingError::UnexpectedLineEnding
            }
        })?;

        let (cc, payload) = payload(body).map_err(|_| FramingError::MissingChecksumDelimiter)?;
        let (_, checksum) = checksum_field(self.checksum_mode)
            .parse(cc)
            .map_err(|error| match error {
                Err::Error(e) | Err::Failure(e) if e.code == ErrorKind::Char => {
                    FramingError::MissingChecksumDelimiter
                }
                _ => FramingError::InvalidChecksum,
            })?;

        let (_, ((talker, sentence_id), fields)) = all_consuming((identifier, fields))
            .parse(payload)
            .map_err(|_| FramingError::MalformedIdentifier)?;

        let fields = fields
            .into_iter()
            .map(|field| if field.trim().is_empty() { "" } else { field })
            .collect();

        Ok(RawSentence {
            marker,
            talker,
            sentence_id,
            fields,
            checksum,
            payload,
        })
    }

    /// Parses, verifies and validates a line into a [`Sentence`].
    ///
    /// The stages run in order: framing, checksum verification, sentence
    /// registry lookup, field count and per-field validation. The first
    /// failing stage determines the error.
    ///
    /// ```rust
    /// use nmea0183_sentence::{Error, Nmea0183Parser};
    ///
    /// let parser = Nmea0183Parser::default();
    ///
    /// let sentence = parser
    ///     .parse("$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79\r\n")
    ///     .unwrap();
    /// assert_eq!(sentence.field(8), Ok("28.0"));
    ///
    /// assert_eq!(
    ///     parser.parse("$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*00"),
    ///     Err(Error::ChecksumMismatch { expected: 0x79, found: 0x00 })
    /// );
    /// ```
    pub fn parse(&self, line: &str) -> Result<Sentence> {
        let result = self
            .tokenize(line)
            .and_then(|raw| raw.verify().map(|()| raw))
            .and_then(Sentence::from_raw);

        match &result {
            Ok(sentence) => trace!("accepted {} sentence: {line:?}", sentence.sentence_id()),
            Err(error) => debug!("rejected {line:?}: {error}"),
        }

        result
    }
}

fn start_marker(i: &str) -> IResult<&str, StartMarker> {
    alt((
        value(StartMarker::Standard, char('$')),
        value(StartMarker::Encapsulation, char('!')),
    ))
    .parse(i)
}

// everything up to the checksum delimiter, or the whole body when there is none
fn payload(i: &str) -> IResult<&str, &str> {
    alt((take_until("*"), rest)).parse(i)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

fn identifier(i: &str) -> IResult<&str, (&str, &str)> {
    (
        take_while_m_n(2, 2, is_identifier_char),
        take_while_m_n(3, 3, is_identifier_char),
    )
        .parse(i)
}

fn fields(i: &str) -> IResult<&str, Vec<&str>> {
    many0(preceded(char(','), take_till(|c| c == ','))).parse(i)
}

/// Creates a parser for the checksum part of the sentence.
///
/// The input is what follows the payload: `*CC`, or nothing at all.
///
/// # Returns
///
/// A parser that extracts the checksum value ([`None`] if no checksum present).
///
/// # Errors
///
/// - [`ErrorKind::Char`]: the `*` delimiter is required but missing
/// - [`ErrorKind::Eof`] / [`ErrorKind::Count`]: not exactly two characters after `*`
/// - [`ErrorKind::IsA`]: the characters are not hexadecimal digits
pub(crate) fn checksum_field(cc: ChecksumMode) -> impl Fn(&str) -> IResult<&str, Option<u8>> {
    move |i| {
        let (cc, parse_cc) = match cc {
            ChecksumMode::Required => char('*').map(|_| true).parse(i)?,
            ChecksumMode::Optional => opt(char('*')).map(|asterisk| asterisk.is_some()).parse(i)?,
        };

        if parse_cc {
            let (_, cc) = consumed(take(2u8), ErrorKind::Count).parse(cc)?;
            let (_, cc) = consumed(hex_digit0, ErrorKind::IsA).parse(cc)?;

            hex_u32.map(|cc| Some(cc as u8)).parse(cc)
        } else {
            Ok((cc, None))
        }
    }
}

/// Strips the line ending according to the [`LineEndingMode`].
///
/// On success the remaining input is the line without its ending.
/// Fails with [`ErrorKind::CrLf`] when the ending does not match the mode.
pub(crate) fn crlf(crlf: LineEndingMode) -> impl Fn(&str) -> IResult<&str, ()> {
    move |i| {
        let (i, data) = opt(take_until("\r\n")).parse(i)?;

        let data = match (crlf, data) {
            (LineEndingMode::Forbidden, Some(_)) => {
                return Err(Err::Error(nom::error::make_error(i, ErrorKind::CrLf)));
            }
            (_, Some(data)) => {
                let (_, _) = consumed(tag("\r\n"), ErrorKind::CrLf).parse(i)?;
                data
            }
            (LineEndingMode::Optional, None) => i.strip_suffix('\n').unwrap_or(i),
            (_, None) if i.ends_with('\n') || crlf == LineEndingMode::Required => {
                return Err(Err::Error(nom::error::make_error(i, ErrorKind::CrLf)));
            }
            (_, None) => i,
        };

        Ok((data, ()))
    }
}

/// Ensures that the parser consumes all input, failing with `e` otherwise.
fn consumed<'a, F>(f: F, e: ErrorKind) -> impl Parser<&'a str, Output = F::Output, Error = F::Error>
where
    F: Parser<&'a str, Error = nom::error::Error<&'a str>>,
{
    terminated(
        f,
        verify(rest_len, |len| len == &0)
            .or(move |i| Err(Err::Error(nom::error::make_error(i, e)))),
    )
}

#[cfg(test)]
mod tests {
    mod checksum_field;
    mod crlf;
    mod tokenize;
}
