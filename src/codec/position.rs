//! Geographic coordinates in the `ddmm.mmmm` / `dddmm.mmmm` wire format.
//!
//! A coordinate occupies two fields: the unsigned magnitude in degrees and
//! decimal minutes, followed by its hemisphere (`N`/`S` or `E`/`W`).

use nom::{
    character::complete::{char, digit0},
    combinator::opt,
    sequence::preceded,
};

use crate::codec::{CompassPoint, FieldError, NmeaCode, complete, decode_code, digits};

const LATITUDE: &str = "latitude (ddmm.mmmm, at most 90 degrees)";
const LONGITUDE: &str = "longitude (dddmm.mmmm, at most 180 degrees)";

/// Geographic position in signed decimal degrees.
///
/// Latitude is positive north of the equator, longitude positive east of the
/// prime meridian. The constructor guarantees `-90 <= latitude <= 90` and
/// `-180 <= longitude <= 180`.
///
/// Both coordinates are rounded to the resolution of the wire format, a
/// ten-thousandth of a minute, so a position written to a sentence reads back
/// unchanged.
///
/// ```rust
/// use nmea0183_sentence::codec::{CompassPoint, Position};
///
/// let position = Position::new(-33.8568, 151.2153).unwrap();
/// assert_eq!(position.latitude_hemisphere(), CompassPoint::South);
/// assert_eq!(position.longitude_hemisphere(), CompassPoint::East);
/// assert!(Position::new(91.0, 0.0).is_err());
/// ```
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(f64, f64)", into = "(f64, f64)")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    latitude: f64,
    longitude: f64,
}

impl Position {
    /// Creates a position from signed decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, FieldError> {
        if !(latitude.is_finite() && (-90.0..=90.0).contains(&latitude)) {
            return Err(FieldError::OutOfRange {
                value: latitude.to_string(),
                expected: "latitude (-90 to 90 degrees)",
            });
        }

        if !(longitude.is_finite() && (-180.0..=180.0).contains(&longitude)) {
            return Err(FieldError::OutOfRange {
                value: longitude.to_string(),
                expected: "longitude (-180 to 180 degrees)",
            });
        }

        Ok(Self {
            latitude: quantize(latitude, 2, 90.0, LATITUDE)?,
            longitude: quantize(longitude, 3, 180.0, LONGITUDE)?,
        })
    }

    /// Builds a position from unsigned magnitudes and their hemispheres.
    pub fn from_parts(
        latitude: f64,
        latitude_hemisphere: CompassPoint,
        longitude: f64,
        longitude_hemisphere: CompassPoint,
    ) -> Result<Self, FieldError> {
        let latitude = match validate_latitude_hemisphere(latitude_hemisphere)? {
            CompassPoint::South => -latitude,
            _ => latitude,
        };
        let longitude = match validate_longitude_hemisphere(longitude_hemisphere)? {
            CompassPoint::West => -longitude,
            _ => longitude,
        };

        Self::new(latitude, longitude)
    }

    /// Latitude in signed decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in signed decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude_hemisphere(&self) -> CompassPoint {
        if self.latitude.is_sign_negative() {
            CompassPoint::South
        } else {
            CompassPoint::North
        }
    }

    pub fn longitude_hemisphere(&self) -> CompassPoint {
        if self.longitude.is_sign_negative() {
            CompassPoint::West
        } else {
            CompassPoint::East
        }
    }
}

impl TryFrom<(f64, f64)> for Position {
    type Error = FieldError;

    fn try_from((latitude, longitude): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(latitude, longitude)
    }
}

impl From<Position> for (f64, f64) {
    fn from(position: Position) -> Self {
        (position.latitude, position.longitude)
    }
}

fn decode_coordinate(
    token: &str,
    degree_digits: usize,
    max_degrees: f64,
    expected: &'static str,
) -> Result<f64, FieldError> {
    let format_error = || FieldError::Format {
        value: token.to_string(),
        expected,
    };

    // shape only: dd(d)mm[.m*]
    let (degrees, _) = complete(
        token,
        (
            digits(degree_digits),
            (digits(2), opt(preceded(char('.'), digit0))),
        ),
    )
    .ok_or_else(format_error)?;

    let minutes = token[degree_digits..]
        .parse::<f64>()
        .map_err(|_| format_error())?;

    let value = f64::from(degrees) + minutes / 60.0;
    if minutes >= 60.0 || value > max_degrees {
        return Err(FieldError::OutOfRange {
            value: token.to_string(),
            expected,
        });
    }

    Ok(value)
}

// rounds a signed coordinate to what its wire token decodes to
fn quantize(
    value: f64,
    degree_digits: usize,
    max_degrees: f64,
    expected: &'static str,
) -> Result<f64, FieldError> {
    let token = encode_coordinate(value, degree_digits);
    let magnitude = decode_coordinate(&token, degree_digits, max_degrees, expected)?;

    Ok(if value.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    })
}

fn encode_coordinate(magnitude: f64, degree_digits: usize) -> String {
    let magnitude = magnitude.abs();
    let mut degrees = magnitude.trunc();
    let mut minutes = ((magnitude - degrees) * 60.0 * 10_000.0).round() / 10_000.0;

    // rounding may carry a whole degree
    if minutes >= 60.0 {
        degrees += 1.0;
        minutes -= 60.0;
    }

    format!(
        "{:0width$}{:07.4}",
        degrees as u32,
        minutes,
        width = degree_digits
    )
}

/// Decodes an unsigned latitude magnitude (`ddmm.mmmm`) into degrees.
pub fn decode_latitude(token: &str) -> Result<f64, FieldError> {
    decode_coordinate(token, 2, 90.0, LATITUDE)
}

/// Decodes an unsigned longitude magnitude (`dddmm.mmmm`) into degrees.
pub fn decode_longitude(token: &str) -> Result<f64, FieldError> {
    decode_coordinate(token, 3, 180.0, LONGITUDE)
}

/// Encodes the magnitude of a latitude as `ddmm.mmmm`.
pub fn encode_latitude(latitude: f64) -> String {
    encode_coordinate(latitude, 2)
}

/// Encodes the magnitude of a longitude as `dddmm.mmmm`.
pub fn encode_longitude(longitude: f64) -> String {
    encode_coordinate(longitude, 3)
}

fn hemisphere_error(point: CompassPoint, enumeration: &'static str) -> FieldError {
    FieldError::UnknownCode {
        enumeration,
        value: point.code().to_string(),
    }
}

fn validate_latitude_hemisphere(point: CompassPoint) -> Result<CompassPoint, FieldError> {
    match point {
        CompassPoint::North | CompassPoint::South => Ok(point),
        _ => Err(hemisphere_error(point, "latitude hemisphere")),
    }
}

fn validate_longitude_hemisphere(point: CompassPoint) -> Result<CompassPoint, FieldError> {
    match point {
        CompassPoint::East | CompassPoint::West => Ok(point),
        _ => Err(hemisphere_error(point, "longitude hemisphere")),
    }
}

/// Decodes `N` or `S`.
pub fn decode_latitude_hemisphere(token: &str) -> Result<CompassPoint, FieldError> {
    decode_code(token).and_then(validate_latitude_hemisphere)
}

/// Decodes `E` or `W`.
pub fn decode_longitude_hemisphere(token: &str) -> Result<CompassPoint, FieldError> {
    decode_code(token).and_then(validate_longitude_hemisphere)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "{actual} is not close to {expected}"
        );
    }

    #[test]
    fn test_decode_coordinates() {
        assert_close(decode_latitude("6011.552").unwrap(), 60.0 + 11.552 / 60.0);
        assert_close(decode_longitude("02501.941").unwrap(), 25.0 + 1.941 / 60.0);
        assert_close(decode_latitude("4404.14036").unwrap(), 44.0 + 4.14036 / 60.0);
        assert_close(decode_latitude("9000.000").unwrap(), 90.0);
        assert_close(decode_longitude("18000").unwrap(), 180.0);

        for token in ["", "60", "6O11.552", "611.552", "6011.552N", "60-1.5"] {
            assert!(
                matches!(decode_latitude(token), Err(FieldError::Format { .. })),
                "accepted {token:?}"
            );
        }

        assert!(matches!(
            decode_latitude("6060.000"),
            Err(FieldError::OutOfRange { .. })
        ));
        assert!(matches!(
            decode_latitude("9000.001"),
            Err(FieldError::OutOfRange { .. })
        ));
        assert!(matches!(
            decode_longitude("18030.0"),
            Err(FieldError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_decode_keeps_fractional_minutes() {
        assert_eq!(decode_latitude("6011.552"), Ok(60.0 + 11.552 / 60.0));
        assert_eq!(decode_latitude("6011.999"), Ok(60.0 + 11.999 / 60.0));
        assert_ne!(decode_latitude("6011.552"), decode_latitude("6011.999"));
        assert_eq!(decode_longitude("02501."), Ok(25.0 + 1.0 / 60.0));
    }

    #[test]
    fn test_position_is_quantized_to_wire_resolution() {
        let position = Position::new(60.192_533_333_3, -25.032_35).unwrap();
        assert_eq!(position.latitude(), 60.0 + 11.552 / 60.0);
        assert_eq!(position.longitude(), -(25.0 + 1.941 / 60.0));

        let latitude = decode_latitude(&encode_latitude(position.latitude())).unwrap();
        let longitude = decode_longitude(&encode_longitude(position.longitude())).unwrap();
        assert_eq!(
            Position::from_parts(latitude, CompassPoint::North, longitude, CompassPoint::West),
            Ok(position)
        );
        assert_eq!(Position::new(position.latitude(), position.longitude()), Ok(position));
    }

    #[test]
    fn test_encode_coordinates() {
        assert_eq!(encode_latitude(60.0 + 11.552 / 60.0), "6011.5520");
        assert_eq!(encode_longitude(25.0 + 1.941 / 60.0), "02501.9410");
        assert_eq!(encode_longitude(-(121.0 + 18.85961 / 60.0)), "12118.8596");
        assert_eq!(encode_latitude(0.0), "0000.0000");
        assert_eq!(encode_latitude(59.999_999_999), "6000.0000");
    }

    #[test]
    fn test_hemispheres() {
        assert_eq!(decode_latitude_hemisphere("S"), Ok(CompassPoint::South));
        assert_eq!(decode_longitude_hemisphere("E"), Ok(CompassPoint::East));
        assert!(decode_latitude_hemisphere("E").is_err());
        assert!(decode_longitude_hemisphere("N").is_err());
        assert!(decode_longitude_hemisphere("w").is_err());
    }

    #[test]
    fn test_position_from_parts() {
        let position =
            Position::from_parts(44.069, CompassPoint::North, 121.314, CompassPoint::West)
                .unwrap();
        assert_close(position.latitude(), 44.069);
        assert_close(position.longitude(), -121.314);
        assert_eq!(position.longitude_hemisphere(), CompassPoint::West);

        assert!(
            Position::from_parts(44.0, CompassPoint::East, 121.0, CompassPoint::West).is_err()
        );
        assert!(Position::new(0.0, 180.5).is_err());
        assert!(Position::new(f64::NAN, 0.0).is_err());
    }
}
