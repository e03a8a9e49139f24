//! # Field Codec
//!
//! Type-directed conversion between raw field tokens and typed values.
//!
//! Each semantic type has one decode/encode pair. Both the parse path and the
//! setters of the typed sentence views go through the same functions, so a
//! value a setter accepts is exactly a value the parser would accept and vice
//! versa.
//!
//! An empty token is the absent-field marker. It decodes to `None` through
//! the [`Option`] implementation and `None` encodes back to an empty token,
//! never to a placeholder numeral.
//!
//! ```rust
//! use nmea0183_sentence::codec::FieldCodec;
//!
//! assert_eq!(f64::decode("28.0"), Ok(28.0));
//! assert_eq!(Option::<f64>::decode(""), Ok(None));
//! assert_eq!(Option::<f64>::None.encode(), "");
//! assert!(u8::decode("A8").is_err());
//! ```

use nom::{
    IResult, Parser,
    bytes::complete::take_while_m_n,
    character::complete::{i32 as signed_int, u32 as unsigned_int},
    combinator::all_consuming,
    number::complete::double,
};

pub use crate::error::FieldError;
pub use nmea0183_sentence_derive::NmeaCode;

pub mod datetime;
mod enums;
pub mod position;

pub use enums::{
    CompassPoint, DataStatus, FaaMode, GpsFixQuality, Units, decode_altitude_units,
    validate_altitude_units,
};
pub use position::Position;

/// Trait for converting a typed value to and from a single field token.
///
/// Implementations are provided for the numeric primitives, `char`,
/// [`Option<T>`], the code enumerations and the crate's field newtypes.
pub trait FieldCodec: Sized {
    /// Decodes a complete field token.
    ///
    /// The whole token must be consumed; trailing characters are an error.
    fn decode(token: &str) -> Result<Self, FieldError>;

    /// Encodes the value into its canonical field token.
    fn encode(&self) -> String;
}

/// A single-character code enumeration, such as fix quality digits or unit tags.
///
/// Derive it with `#[derive(NmeaCode)]`, which also derives [`FieldCodec`].
/// Codes are compared case-sensitively: `M` (meters) and `m` are different
/// codes, and so are `F` (fathoms) and `f` (feet).
pub trait NmeaCode: Sized {
    /// Human readable name of the enumeration, used in error messages.
    const NAME: &'static str;

    /// Every recognized code, in declaration order.
    const CODES: &'static [char];

    /// Returns the variant for `code`, if it is recognized.
    fn from_code(code: char) -> Option<Self>;

    /// Returns the wire code of the variant.
    fn code(&self) -> char;
}

/// Decodes a token holding exactly one recognized code character.
pub fn decode_code<T: NmeaCode>(token: &str) -> Result<T, FieldError> {
    let mut chars = token.chars();

    match (chars.next(), chars.next()) {
        (Some(code), None) => T::from_code(code),
        _ => None,
    }
    .ok_or_else(|| FieldError::UnknownCode {
        enumeration: T::NAME,
        value: token.to_string(),
    })
}

type TokenResult<'a, O> = IResult<&'a str, O>;

fn float(i: &str) -> TokenResult<'_, f64> {
    double(i)
}

fn unsigned(i: &str) -> TokenResult<'_, u32> {
    unsigned_int(i)
}

fn signed(i: &str) -> TokenResult<'_, i32> {
    signed_int(i)
}

/// Runs `parser` over the whole token, failing if anything is left over.
pub(crate) fn complete<'a, O, F>(token: &'a str, parser: F) -> Option<O>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    all_consuming(parser)
        .parse(token)
        .ok()
        .map(|(_, value)| value)
}

/// Exactly `count` ASCII digits, folded into their value.
pub(crate) fn digits<'a>(
    count: usize,
) -> impl Parser<&'a str, Output = u32, Error = nom::error::Error<&'a str>> {
    take_while_m_n(count, count, |c: char| c.is_ascii_digit()).map(|digits: &str| {
        digits
            .bytes()
            .fold(0, |value, digit| value * 10 + u32::from(digit - b'0'))
    })
}

/// Decodes a finite decimal number.
pub fn decode_decimal(token: &str) -> Result<f64, FieldError> {
    complete(token, float)
        .filter(|value| value.is_finite())
        .ok_or_else(|| FieldError::Format {
            value: token.to_string(),
            expected: "decimal number",
        })
}

/// Encodes a decimal number in its shortest exact form, always with a
/// fractional part (`28` becomes `28.0`).
pub fn encode_decimal(value: f64) -> String {
    let token = value.to_string();
    if token.contains('.') {
        token
    } else {
        format!("{token}.0")
    }
}

/// Validates that a decimal value is finite and not negative.
pub fn non_negative(value: f64, expected: &'static str) -> Result<f64, FieldError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(FieldError::OutOfRange {
            value: value.to_string(),
            expected,
        })
    }
}

/// Validates that a finite decimal value is in a usable range.
pub fn finite(value: f64, expected: &'static str) -> Result<f64, FieldError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FieldError::OutOfRange {
            value: value.to_string(),
            expected,
        })
    }
}

/// Decodes a finite decimal number that is not negative.
pub fn decode_non_negative(token: &str, expected: &'static str) -> Result<f64, FieldError> {
    decode_decimal(token)
        .and_then(|value| non_negative(value, expected))
        .map_err(|error| match error {
            FieldError::OutOfRange { expected, .. } => FieldError::OutOfRange {
                value: token.to_string(),
                expected,
            },
            error => error,
        })
}

/// Encodes an integer left-padded with zeros to `width` digits.
pub fn zero_padded(value: u32, width: usize) -> String {
    format!("{value:0width$}")
}

const SATELLITES: &str = "satellite count (0-99)";

/// Validates a number of satellites in use, at most 99.
pub fn validate_satellite_count(count: u8) -> Result<u8, FieldError> {
    if count <= 99 {
        Ok(count)
    } else {
        Err(FieldError::OutOfRange {
            value: count.to_string(),
            expected: SATELLITES,
        })
    }
}

/// Decodes a number of satellites in use.
pub fn decode_satellite_count(token: &str) -> Result<u8, FieldError> {
    complete(token, unsigned)
        .ok_or_else(|| FieldError::Format {
            value: token.to_string(),
            expected: SATELLITES,
        })
        .and_then(|count| {
            u8::try_from(count).map_err(|_| FieldError::OutOfRange {
                value: token.to_string(),
                expected: SATELLITES,
            })
        })
        .and_then(validate_satellite_count)
}

/// Encodes a number of satellites in use as two digits.
pub fn encode_satellite_count(count: u8) -> String {
    zero_padded(u32::from(count), 2)
}

impl FieldCodec for f64 {
    fn decode(token: &str) -> Result<Self, FieldError> {
        decode_decimal(token)
    }

    fn encode(&self) -> String {
        encode_decimal(*self)
    }
}

impl FieldCodec for f32 {
    fn decode(token: &str) -> Result<Self, FieldError> {
        let value = decode_decimal(token)? as f32;
        finite(value as f64, "single precision decimal number").map(|_| value)
    }

    fn encode(&self) -> String {
        let token = self.to_string();
        if token.contains('.') {
            token
        } else {
            format!("{token}.0")
        }
    }
}

macro_rules! impl_unsigned_codec {
    ($($t:ty => $expected:literal),*) => ($(
        impl FieldCodec for $t {
            fn decode(token: &str) -> Result<Self, FieldError> {
                let value = complete(token, unsigned).ok_or_else(|| FieldError::Format {
                    value: token.to_string(),
                    expected: "unsigned integer",
                })?;

                <$t>::try_from(value).map_err(|_| FieldError::OutOfRange {
                    value: value.to_string(),
                    expected: $expected,
                })
            }

            fn encode(&self) -> String {
                self.to_string()
            }
        }
    )*)
}

impl_unsigned_codec!(
    u8 => "8-bit unsigned integer",
    u16 => "16-bit unsigned integer",
    u32 => "32-bit unsigned integer"
);

impl FieldCodec for i32 {
    fn decode(token: &str) -> Result<Self, FieldError> {
        complete(token, signed).ok_or_else(|| FieldError::Format {
            value: token.to_string(),
            expected: "integer",
        })
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

impl FieldCodec for char {
    fn decode(token: &str) -> Result<Self, FieldError> {
        let mut chars = token.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(FieldError::Format {
                value: token.to_string(),
                expected: "single character",
            }),
        }
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

impl<T: FieldCodec> FieldCodec for Option<T> {
    fn decode(token: &str) -> Result<Self, FieldError> {
        if token.is_empty() {
            Ok(None)
        } else {
            T::decode(token).map(Some)
        }
    }

    fn encode(&self) -> String {
        self.as_ref().map(T::encode).unwrap_or_default()
    }
}

/// Differential reference station ID, an integer in `0..=1023`.
///
/// The canonical token is zero padded to four digits, so station 523 is
/// emitted as `0523`. Both [`StationId::new`] and the token decoder apply the
/// same range check.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u16", into = "u16")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(u16);

impl StationId {
    /// The highest valid station ID.
    pub const MAX: u16 = 1023;

    const EXPECTED: &'static str = "DGPS station id (0-1023)";

    /// Validates and wraps a station ID.
    pub fn new(id: u16) -> Result<Self, FieldError> {
        if id <= Self::MAX {
            Ok(Self(id))
        } else {
            Err(FieldError::OutOfRange {
                value: id.to_string(),
                expected: Self::EXPECTED,
            })
        }
    }

    /// Returns the numeric station ID.
    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for StationId {
    type Error = FieldError;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl TryFrom<i32> for StationId {
    type Error = FieldError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        u16::try_from(id)
            .map_err(|_| FieldError::OutOfRange {
                value: id.to_string(),
                expected: Self::EXPECTED,
            })
            .and_then(Self::new)
    }
}

impl From<StationId> for u16 {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl std::fmt::Display for StationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl FieldCodec for StationId {
    fn decode(token: &str) -> Result<Self, FieldError> {
        let id = complete(token, unsigned).ok_or_else(|| FieldError::Format {
            value: token.to_string(),
            expected: Self::EXPECTED,
        })?;

        u16::try_from(id)
            .map_err(|_| FieldError::OutOfRange {
                value: id.to_string(),
                expected: Self::EXPECTED,
            })
            .and_then(Self::new)
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal() {
        assert_eq!(f64::decode("2.0"), Ok(2.0));
        assert_eq!(f64::decode("-21.3"), Ok(-21.3));
        assert_eq!(f64::decode("1113"), Ok(1113.0));

        for token in ["", "abc", "1.0x", "nan", "inf", " 1.0"] {
            assert!(f64::decode(token).is_err(), "accepted {token:?}");
        }

        assert_eq!(28.0f64.encode(), "28.0");
        assert_eq!(19.6f64.encode(), "19.6");
        assert_eq!((-0.25f64).encode(), "-0.25");
        assert_eq!(1.5f32.encode(), "1.5");
    }

    #[test]
    fn test_unsigned() {
        assert_eq!(u8::decode("00"), Ok(0));
        assert_eq!(u8::decode("12"), Ok(12));
        assert_eq!(u16::decode("1024"), Ok(1024));

        assert!(matches!(
            u8::decode("256"),
            Err(FieldError::OutOfRange { .. })
        ));
        assert!(matches!(u8::decode("-1"), Err(FieldError::Format { .. })));
        assert!(matches!(u8::decode("A8"), Err(FieldError::Format { .. })));
        assert!(matches!(u8::decode("8.0"), Err(FieldError::Format { .. })));
    }

    #[test]
    fn test_signed_and_char() {
        assert_eq!(i32::decode("-08"), Ok(-8));
        assert_eq!(i32::decode("+03"), Ok(3));
        assert!(i32::decode("--1").is_err());

        assert_eq!(char::decode("M"), Ok('M'));
        assert!(char::decode("").is_err());
        assert!(char::decode("MM").is_err());
    }

    #[test]
    fn test_option_absent_is_distinct_from_zero() {
        assert_eq!(Option::<f64>::decode(""), Ok(None));
        assert_eq!(Option::<f64>::decode("0"), Ok(Some(0.0)));
        assert_eq!(Option::<u16>::None.encode(), "");
        assert_eq!(Some(0u16).encode(), "0");
        assert!(Option::<u8>::decode("x").is_err());
    }

    #[test]
    fn test_station_id() {
        assert_eq!(StationId::decode("0523").map(StationId::get), Ok(523));
        assert_eq!(StationId::decode("0").map(StationId::get), Ok(0));
        assert_eq!(StationId::decode("1023").map(StationId::get), Ok(1023));

        assert!(matches!(
            StationId::decode("1024"),
            Err(FieldError::OutOfRange { .. })
        ));
        assert!(matches!(
            StationId::decode("99999"),
            Err(FieldError::OutOfRange { .. })
        ));
        assert!(matches!(
            StationId::decode("12a"),
            Err(FieldError::Format { .. })
        ));

        assert!(StationId::try_from(-1i32).is_err());
        assert!(StationId::try_from(1024i32).is_err());

        let id = StationId::try_from(523i32).unwrap();
        assert_eq!(id.encode(), "0523");
        assert_eq!(StationId::decode(&id.encode()), Ok(id));
    }

    #[test]
    fn test_satellite_count() {
        assert_eq!(decode_satellite_count("00"), Ok(0));
        assert_eq!(decode_satellite_count("08"), Ok(8));
        assert_eq!(decode_satellite_count("99"), Ok(99));
        assert!(matches!(
            decode_satellite_count("100"),
            Err(FieldError::OutOfRange { .. })
        ));
        assert!(matches!(
            decode_satellite_count("1000"),
            Err(FieldError::OutOfRange { .. })
        ));
        assert!(matches!(
            decode_satellite_count("8.0"),
            Err(FieldError::Format { .. })
        ));

        assert_eq!(encode_satellite_count(0), "00");
        assert_eq!(encode_satellite_count(12), "12");
        assert!(validate_satellite_count(100).is_err());
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(decode_non_negative("0.0", "HDOP"), Ok(0.0));
        assert_eq!(
            decode_non_negative("-1.5", "HDOP"),
            Err(FieldError::OutOfRange {
                value: "-1.5".into(),
                expected: "HDOP"
            })
        );
        assert!(matches!(
            decode_non_negative("x", "HDOP"),
            Err(FieldError::Format { .. })
        ));
        assert!(non_negative(f64::INFINITY, "HDOP").is_err());
    }

    #[test]
    fn test_zero_padded() {
        assert_eq!(zero_padded(0, 2), "00");
        assert_eq!(zero_padded(7, 2), "07");
        assert_eq!(zero_padded(123, 2), "123");
    }
}
