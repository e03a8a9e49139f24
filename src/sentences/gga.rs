use ::time::Time;

use crate::{
    Error, Result,
    codec::{
        FieldError, GpsFixQuality, Position, StationId, Units, datetime, decode_altitude_units,
        decode_decimal, decode_non_negative, decode_satellite_count, encode_satellite_count,
        finite, non_negative, validate_altitude_units, validate_satellite_count,
    },
    sentence::{Sentence, SentenceBuilder},
};

use super::{HasFixQuality, HasPosition, HasTime, typed_sentence};

const TIME: usize = 0;
const LATITUDE: usize = 1;
const FIX_QUALITY: usize = 5;
const SATELLITES: usize = 6;
const HDOP: usize = 7;
const ALTITUDE: usize = 8;
const ALTITUDE_UNITS: usize = 9;
const GEOIDAL_HEIGHT: usize = 10;
const GEOIDAL_HEIGHT_UNITS: usize = 11;
const DGPS_AGE: usize = 12;
const DGPS_STATION: usize = 13;

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
///
/// Every getter fails with [`Error::FieldAbsent`] on an empty field, except
/// [`dgps_age`](Self::dgps_age) and [`dgps_station_id`](Self::dgps_station_id):
/// both are empty whenever no differential correction is in use, so they
/// return `None` instead.
///
/// ```rust
/// use nmea0183_sentence::{codec::{GpsFixQuality, Units}, sentences::{GgaSentence, HasFixQuality}};
///
/// let mut gga: GgaSentence = "$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79"
///     .parse()
///     .unwrap();
///
/// assert_eq!(gga.altitude(), Ok(28.0));
/// assert_eq!(gga.altitude_units(), Ok(Units::Meters));
/// assert_eq!(gga.fix_quality(), Ok(GpsFixQuality::Gps));
/// assert_eq!(gga.dgps_age(), Ok(None));
///
/// gga.set_dgps_age(0.5).unwrap();
/// gga.set_dgps_station_id(523).unwrap();
/// assert_eq!(
///     gga.to_nmea(),
///     "$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,0.5,0523*56\r\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GgaSentence(Sentence);

typed_sentence!(GgaSentence, "GGA");

fn argument(field: &'static str) -> impl FnOnce(FieldError) -> Error {
    move |error| error.for_argument(field)
}

fn altitude_units_argument(field: &'static str) -> impl FnOnce(FieldError) -> Error {
    move |error| Error::InvalidArgument {
        field,
        reason: error.to_string(),
    }
}

impl GgaSentence {
    /// Starts building a GGA sentence for `talker`.
    pub fn builder(talker: &str) -> SentenceBuilder {
        SentenceBuilder::new(talker, Self::SENTENCE_ID)
    }

    /// Antenna altitude above or below mean sea level, in
    /// [`altitude_units`](Self::altitude_units).
    pub fn altitude(&self) -> Result<f64> {
        self.0.decode_field(ALTITUDE, decode_decimal)
    }

    pub fn set_altitude(&mut self, altitude: f64) -> Result<()> {
        let altitude = finite(altitude, "altitude").map_err(argument("altitude"))?;
        self.0.set_field_from(ALTITUDE, &altitude)
    }

    /// `M` (meters) or `f` (feet).
    pub fn altitude_units(&self) -> Result<Units> {
        self.0.decode_field(ALTITUDE_UNITS, decode_altitude_units)
    }

    /// Accepts only [`Units::Meters`] and [`Units::Feet`].
    pub fn set_altitude_units(&mut self, units: Units) -> Result<()> {
        let units =
            validate_altitude_units(units).map_err(altitude_units_argument("altitude units"))?;
        self.0.set_field_from(ALTITUDE_UNITS, &units)
    }

    /// Height of the geoid above the WGS-84 ellipsoid; negative when the geoid
    /// is below it.
    pub fn geoidal_height(&self) -> Result<f64> {
        self.0.decode_field(GEOIDAL_HEIGHT, decode_decimal)
    }

    pub fn set_geoidal_height(&mut self, height: f64) -> Result<()> {
        let height = finite(height, "geoidal height").map_err(argument("geoidal height"))?;
        self.0.set_field_from(GEOIDAL_HEIGHT, &height)
    }

    /// `M` (meters) or `f` (feet).
    pub fn geoidal_height_units(&self) -> Result<Units> {
        self.0
            .decode_field(GEOIDAL_HEIGHT_UNITS, decode_altitude_units)
    }

    /// Accepts only [`Units::Meters`] and [`Units::Feet`].
    pub fn set_geoidal_height_units(&mut self, units: Units) -> Result<()> {
        let units = validate_altitude_units(units)
            .map_err(altitude_units_argument("geoidal height units"))?;
        self.0.set_field_from(GEOIDAL_HEIGHT_UNITS, &units)
    }

    /// Horizontal dilution of precision.
    pub fn horizontal_dop(&self) -> Result<f64> {
        self.0.decode_field(HDOP, |token| {
            decode_non_negative(token, "horizontal dilution of precision")
        })
    }

    /// Fails with [`Error::InvalidArgument`] for negative values.
    pub fn set_horizontal_dop(&mut self, hdop: f64) -> Result<()> {
        let hdop = non_negative(hdop, "horizontal dilution of precision (>= 0)")
            .map_err(argument("horizontal dilution of precision"))?;
        self.0.set_field_from(HDOP, &hdop)
    }

    /// Number of satellites in use.
    pub fn satellite_count(&self) -> Result<u8> {
        self.0.decode_field(SATELLITES, decode_satellite_count)
    }

    /// Accepts `0..=99`; the count is encoded with two digits.
    pub fn set_satellite_count(&mut self, count: u8) -> Result<()> {
        let count = validate_satellite_count(count).map_err(argument("satellites in use"))?;
        self.0.set_field(SATELLITES, encode_satellite_count(count))
    }

    /// Age of the differential correction data in seconds, `None` when no
    /// correction is in use.
    pub fn dgps_age(&self) -> Result<Option<f64>> {
        self.0.decode_optional_field(DGPS_AGE, |token| {
            decode_non_negative(token, "DGPS data age")
        })
    }

    /// Fails with [`Error::InvalidArgument`] for negative values.
    ///
    /// Setting the age without a station id is left to the caller.
    pub fn set_dgps_age(&mut self, age: f64) -> Result<()> {
        let age = non_negative(age, "DGPS data age (>= 0)").map_err(argument("DGPS data age"))?;
        self.0.set_field_from(DGPS_AGE, &age)
    }

    /// Differential reference station, `None` when no correction is in use.
    pub fn dgps_station_id(&self) -> Result<Option<StationId>> {
        self.0.optional_field_as(DGPS_STATION)
    }

    /// Sets the differential reference station from its number.
    ///
    /// Fails with [`Error::InvalidArgument`] outside `0..=1023`.
    pub fn set_dgps_station_id(&mut self, id: i32) -> Result<()> {
        let id = StationId::try_from(id).map_err(argument("DGPS station id"))?;
        self.set_dgps_station(id)
    }

    pub fn set_dgps_station(&mut self, id: StationId) -> Result<()> {
        self.0.set_field_from(DGPS_STATION, &id)
    }

    /// Empties both differential correction fields.
    pub fn clear_dgps(&mut self) -> Result<()> {
        self.0.clear_field(DGPS_AGE)?;
        self.0.clear_field(DGPS_STATION)
    }

    /// Sets the fix quality from its numeric code.
    ///
    /// Fails with [`Error::UnknownEnumValue`] for codes outside `0..=8`.
    pub fn set_fix_quality_code(&mut self, code: u8) -> Result<()> {
        let quality = GpsFixQuality::try_from(code).map_err(argument("fix quality"))?;
        self.set_fix_quality(quality)
    }
}

impl HasPosition for GgaSentence {
    fn position(&self) -> Result<Position> {
        super::read_position(&self.0, LATITUDE)
    }

    fn set_position(&mut self, position: Position) -> Result<()> {
        super::write_position(&mut self.0, LATITUDE, position)
    }

    fn clear_position(&mut self) -> Result<()> {
        super::clear_position(&mut self.0, LATITUDE)
    }
}

impl HasTime for GgaSentence {
    fn time(&self) -> Result<Time> {
        self.0.field_as(TIME)
    }

    fn set_time(&mut self, time: Time) -> Result<()> {
        let time =
            datetime::validate_time(time).map_err(|error| error.for_argument("UTC time"))?;
        self.0.set_field_from(TIME, &time)
    }
}

impl HasFixQuality for GgaSentence {
    fn fix_quality(&self) -> Result<GpsFixQuality> {
        self.0.field_as(FIX_QUALITY)
    }

    fn set_fix_quality(&mut self, quality: GpsFixQuality) -> Result<()> {
        self.0.set_field_from(FIX_QUALITY, &quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79";

    fn gga() -> GgaSentence {
        LINE.parse().unwrap()
    }

    #[test]
    fn test_getters() {
        let gga = gga();

        assert_eq!(gga.time(), Ok(Time::from_hms(12, 0, 44).unwrap()));
        assert_eq!(gga.fix_quality(), Ok(GpsFixQuality::Gps));
        assert_eq!(gga.satellite_count(), Ok(0));
        assert_eq!(gga.horizontal_dop(), Ok(2.0));
        assert_eq!(gga.altitude(), Ok(28.0));
        assert_eq!(gga.altitude_units(), Ok(Units::Meters));
        assert_eq!(gga.geoidal_height(), Ok(19.6));
        assert_eq!(gga.geoidal_height_units(), Ok(Units::Meters));
        assert_eq!(gga.dgps_age(), Ok(None));
        assert_eq!(gga.dgps_station_id(), Ok(None));

        let position = gga.position().unwrap();
        assert_eq!(position.latitude(), 60.0 + 11.552 / 60.0);
        assert_eq!(position.longitude(), 25.0 + 1.941 / 60.0);
    }

    #[test]
    fn test_absent_fields() {
        let gga = GgaSentence::new("GP").unwrap();

        assert_eq!(
            gga.altitude(),
            Err(Error::FieldAbsent {
                index: ALTITUDE,
                field: "altitude"
            })
        );
        assert!(matches!(
            gga.fix_quality(),
            Err(Error::FieldAbsent { index: 5, .. })
        ));
        assert!(matches!(
            gga.time(),
            Err(Error::FieldAbsent { index: 0, .. })
        ));
        assert_eq!(gga.dgps_age(), Ok(None));
        assert_eq!(gga.dgps_station_id(), Ok(None));
    }

    #[test]
    fn test_setters_round_trip_through_getters() {
        let mut gga = GgaSentence::new("GN").unwrap();

        gga.set_altitude(-12.25).unwrap();
        gga.set_altitude_units(Units::Feet).unwrap();
        gga.set_geoidal_height(19.6).unwrap();
        gga.set_geoidal_height_units(Units::Meters).unwrap();
        gga.set_horizontal_dop(0.9).unwrap();
        gga.set_satellite_count(7).unwrap();
        gga.set_dgps_age(3.0).unwrap();
        gga.set_dgps_station_id(1023).unwrap();
        gga.set_fix_quality(GpsFixQuality::Dgps).unwrap();
        gga.set_time(Time::from_hms_milli(9, 27, 50, 250).unwrap())
            .unwrap();

        assert_eq!(gga.altitude(), Ok(-12.25));
        assert_eq!(gga.altitude_units(), Ok(Units::Feet));
        assert_eq!(gga.geoidal_height(), Ok(19.6));
        assert_eq!(gga.horizontal_dop(), Ok(0.9));
        assert_eq!(gga.satellite_count(), Ok(7));
        assert_eq!(gga.sentence().field(SATELLITES), Ok("07"));
        assert_eq!(gga.dgps_age(), Ok(Some(3.0)));
        assert_eq!(gga.dgps_station_id().map(|id| id.map(StationId::get)), Ok(Some(1023)));
        assert_eq!(gga.fix_quality(), Ok(GpsFixQuality::Dgps));
        assert_eq!(gga.time(), Ok(Time::from_hms_milli(9, 27, 50, 250).unwrap()));
        assert_eq!(gga.sentence().field(TIME), Ok("092750.250"));
    }

    #[test]
    fn test_set_time_rejects_sub_millisecond_precision() {
        let mut gga = gga();

        assert!(matches!(
            gga.set_time(Time::from_hms_nano(12, 0, 44, 123_456_789).unwrap()),
            Err(Error::InvalidArgument { field: "UTC time", .. })
        ));
        assert_eq!(gga.sentence().field(TIME), Ok("120044"));

        let time = Time::from_hms_nano(12, 0, 44, 123_000_000).unwrap();
        gga.set_time(time).unwrap();
        assert_eq!(gga.time(), Ok(time));
    }

    #[test]
    fn test_setters_reject_invalid_values() {
        let mut gga = gga();

        assert!(matches!(
            gga.set_horizontal_dop(-0.1),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            gga.set_dgps_age(-1.0),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            gga.set_altitude(f64::NAN),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            gga.set_satellite_count(100),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            gga.set_altitude_units(Units::Fathoms),
            Err(Error::InvalidArgument {
                field: "altitude units",
                ..
            })
        ));
        assert!(matches!(
            gga.set_geoidal_height_units(Units::Knots),
            Err(Error::InvalidArgument { .. })
        ));
        assert_eq!(
            gga.set_fix_quality_code(9),
            Err(Error::UnknownEnumValue {
                index: None,
                enumeration: "fix quality",
                value: "9".into()
            })
        );

        // nothing was written
        assert_eq!(gga.to_string(), LINE);
    }

    #[test]
    fn test_fix_quality_code() {
        let mut gga = gga();
        gga.set_fix_quality_code(4).unwrap();
        assert_eq!(gga.fix_quality(), Ok(GpsFixQuality::Rtk));
        assert_eq!(gga.sentence().field(FIX_QUALITY), Ok("4"));
    }

    #[test]
    fn test_builder() {
        let gga: GgaSentence = GgaSentence::builder("GP")
            .field(TIME, "120044")
            .value(FIX_QUALITY, &GpsFixQuality::Gps)
            .build()
            .and_then(GgaSentence::try_from)
            .unwrap();

        assert_eq!(gga.fix_quality(), Ok(GpsFixQuality::Gps));
        assert_eq!(gga.altitude().ok(), None);
    }
}
