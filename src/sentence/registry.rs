//! # Sentence Registry
//!
//! Static table of the sentence types this crate understands. A layout fixes
//! the field count of a sentence and the semantic type of every field, which
//! is what the parse path validates against.
//!
//! ```rust
//! use nmea0183_sentence::sentence::registry;
//!
//! let gga = registry::layout("GGA").unwrap();
//! assert_eq!(gga.field_count(), 14);
//! assert_eq!(gga.fields[13].name, "DGPS station id");
//! assert!(registry::layout("XYZ").is_none());
//! ```

use crate::codec::{
    DataStatus, FaaMode, FieldCodec, FieldError, GpsFixQuality, StationId, datetime,
    decode_altitude_units, decode_decimal, decode_non_negative, decode_satellite_count, position,
};

/// Semantic type of a field, selecting the codec that validates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `hhmmss[.sss]`
    Time,
    /// `ddmmyy`
    Date,
    /// `ddmm.mmmm`
    Latitude,
    /// `N` or `S`
    LatitudeHemisphere,
    /// `dddmm.mmmm`
    Longitude,
    /// `E` or `W`
    LongitudeHemisphere,
    /// GPS fix quality digit
    FixQuality,
    /// Satellites in use, 0-99
    SatelliteCount,
    /// Any finite decimal number
    Decimal,
    /// Finite decimal number that is not negative
    NonNegativeDecimal,
    /// `M` or `f`
    AltitudeUnits,
    /// DGPS reference station, 0-1023
    StationId,
    /// `A` or `V`
    DataStatus,
    /// FAA mode indicator
    FaaMode,
    /// Day of month, two digits
    Day,
    /// Month, two digits
    Month,
    /// Four-digit year
    Year,
    /// Signed local zone hours
    ZoneHours,
    /// Local zone minutes
    ZoneMinutes,
}

impl FieldKind {
    /// Checks that a non-empty token decodes as this kind.
    pub fn validate(self, token: &str) -> Result<(), FieldError> {
        match self {
            FieldKind::Time => datetime::decode_time(token).map(drop),
            FieldKind::Date => datetime::decode_date(token).map(drop),
            FieldKind::Latitude => position::decode_latitude(token).map(drop),
            FieldKind::LatitudeHemisphere => position::decode_latitude_hemisphere(token).map(drop),
            FieldKind::Longitude => position::decode_longitude(token).map(drop),
            FieldKind::LongitudeHemisphere => {
                position::decode_longitude_hemisphere(token).map(drop)
            }
            FieldKind::FixQuality => GpsFixQuality::decode(token).map(drop),
            FieldKind::SatelliteCount => decode_satellite_count(token).map(drop),
            FieldKind::Decimal => decode_decimal(token).map(drop),
            FieldKind::NonNegativeDecimal => {
                decode_non_negative(token, "non-negative decimal number").map(drop)
            }
            FieldKind::AltitudeUnits => decode_altitude_units(token).map(drop),
            FieldKind::StationId => StationId::decode(token).map(drop),
            FieldKind::DataStatus => DataStatus::decode(token).map(drop),
            FieldKind::FaaMode => FaaMode::decode(token).map(drop),
            FieldKind::Day => datetime::decode_day(token).map(drop),
            FieldKind::Month => datetime::decode_month(token).map(drop),
            FieldKind::Year => datetime::decode_year(token).map(drop),
            FieldKind::ZoneHours => datetime::decode_zone_hours(token).map(drop),
            FieldKind::ZoneMinutes => datetime::decode_zone_minutes(token).map(drop),
        }
    }
}

/// Name and kind of one field of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Field layout of one sentence type.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SentenceLayout {
    /// Three-character sentence identifier
    pub id: &'static str,
    /// Human readable description
    pub description: &'static str,
    /// Fields in wire order
    pub fields: &'static [FieldDescriptor],
}

impl SentenceLayout {
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, index: usize) -> Option<&'static FieldDescriptor> {
        self.fields.get(index)
    }

    /// Validates `token` against the field at `index`.
    ///
    /// An empty token is the absent-field marker and always passes; whether
    /// an absent value is acceptable is decided by the typed getters.
    pub fn validate_field(&self, index: usize, token: &str) -> Result<(), FieldError> {
        match self.field(index) {
            Some(field) if !token.is_empty() => field.kind.validate(token),
            _ => Ok(()),
        }
    }
}

const fn field(name: &'static str, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor { name, kind }
}

static LAYOUTS: &[SentenceLayout] = &[
    SentenceLayout {
        id: "GGA",
        description: "Global Positioning System Fix Data",
        fields: &[
            field("UTC time", FieldKind::Time),
            field("latitude", FieldKind::Latitude),
            field("latitude hemisphere", FieldKind::LatitudeHemisphere),
            field("longitude", FieldKind::Longitude),
            field("longitude hemisphere", FieldKind::LongitudeHemisphere),
            field("fix quality", FieldKind::FixQuality),
            field("satellites in use", FieldKind::SatelliteCount),
            field("horizontal dilution of precision", FieldKind::NonNegativeDecimal),
            field("altitude", FieldKind::Decimal),
            field("altitude units", FieldKind::AltitudeUnits),
            field("geoidal height", FieldKind::Decimal),
            field("geoidal height units", FieldKind::AltitudeUnits),
            field("DGPS data age", FieldKind::NonNegativeDecimal),
            field("DGPS station id", FieldKind::StationId),
        ],
    },
    SentenceLayout {
        id: "GLL",
        description: "Geographic Position - Latitude/Longitude",
        fields: &[
            field("latitude", FieldKind::Latitude),
            field("latitude hemisphere", FieldKind::LatitudeHemisphere),
            field("longitude", FieldKind::Longitude),
            field("longitude hemisphere", FieldKind::LongitudeHemisphere),
            field("UTC time", FieldKind::Time),
            field("data status", FieldKind::DataStatus),
            field("FAA mode", FieldKind::FaaMode),
        ],
    },
    SentenceLayout {
        id: "RMC",
        description: "Recommended Minimum Navigation Information",
        fields: &[
            field("UTC time", FieldKind::Time),
            field("data status", FieldKind::DataStatus),
            field("latitude", FieldKind::Latitude),
            field("latitude hemisphere", FieldKind::LatitudeHemisphere),
            field("longitude", FieldKind::Longitude),
            field("longitude hemisphere", FieldKind::LongitudeHemisphere),
            field("speed over ground", FieldKind::NonNegativeDecimal),
            field("course over ground", FieldKind::NonNegativeDecimal),
            field("UTC date", FieldKind::Date),
            field("magnetic variation", FieldKind::NonNegativeDecimal),
            field("magnetic variation direction", FieldKind::LongitudeHemisphere),
            field("FAA mode", FieldKind::FaaMode),
        ],
    },
    SentenceLayout {
        id: "ZDA",
        description: "Time & Date - UTC, day, month, year and local time zone",
        fields: &[
            field("UTC time", FieldKind::Time),
            field("day", FieldKind::Day),
            field("month", FieldKind::Month),
            field("year", FieldKind::Year),
            field("local zone hours", FieldKind::ZoneHours),
            field("local zone minutes", FieldKind::ZoneMinutes),
        ],
    },
];

/// Returns the layout registered for `sentence_id`.
pub fn layout(sentence_id: &str) -> Option<&'static SentenceLayout> {
    LAYOUTS.iter().find(|layout| layout.id == sentence_id)
}

/// Returns every registered layout.
pub fn layouts() -> &'static [SentenceLayout] {
    LAYOUTS
}
