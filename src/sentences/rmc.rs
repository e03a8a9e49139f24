use ::time::{Date, PrimitiveDateTime, Time};

use crate::{
    Error, Result,
    codec::{
        CompassPoint, DataStatus, FaaMode, FieldError, Position, datetime, decode_non_negative,
        non_negative, position,
    },
    sentence::Sentence,
};

use super::{HasDate, HasPosition, HasTime, typed_sentence};

const TIME: usize = 0;
const STATUS: usize = 1;
const LATITUDE: usize = 2;
const SPEED: usize = 6;
const COURSE: usize = 7;
const DATE: usize = 8;
const VARIATION: usize = 9;
const VARIATION_DIRECTION: usize = 10;
const FAA_MODE: usize = 11;

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///                                                            12
///         1         2 3       4 5        6 7   8   9      10 11|
///         |         | |       | |        | |   |   |      |  | |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,ddmmyy,x.x,a,m*hh<CR><LF>
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RmcSentence(Sentence);

typed_sentence!(RmcSentence, "RMC");

fn argument(field: &'static str) -> impl FnOnce(FieldError) -> Error {
    move |error| error.for_argument(field)
}

impl RmcSentence {
    pub fn status(&self) -> Result<DataStatus> {
        self.0.field_as(STATUS)
    }

    pub fn set_status(&mut self, status: DataStatus) -> Result<()> {
        self.0.set_field_from(STATUS, &status)
    }

    /// Speed over ground in knots.
    pub fn speed(&self) -> Result<f64> {
        self.0
            .decode_field(SPEED, |token| decode_non_negative(token, "speed over ground"))
    }

    pub fn set_speed(&mut self, knots: f64) -> Result<()> {
        let knots = non_negative(knots, "speed over ground (>= 0)")
            .map_err(argument("speed over ground"))?;
        self.0.set_field_from(SPEED, &knots)
    }

    /// Course over ground in degrees true.
    pub fn course(&self) -> Result<f64> {
        self.0
            .decode_field(COURSE, |token| decode_non_negative(token, "course over ground"))
    }

    pub fn set_course(&mut self, degrees: f64) -> Result<()> {
        let degrees = non_negative(degrees, "course over ground (>= 0)")
            .map_err(argument("course over ground"))?;
        self.0.set_field_from(COURSE, &degrees)
    }

    /// Magnetic variation in degrees, negative when westerly.
    ///
    /// `None` when the receiver does not report it.
    pub fn magnetic_variation(&self) -> Result<Option<f64>> {
        let Some(variation) = self.0.decode_optional_field(VARIATION, |token| {
            decode_non_negative(token, "magnetic variation")
        })?
        else {
            return Ok(None);
        };

        let direction = self
            .0
            .decode_field(VARIATION_DIRECTION, position::decode_longitude_hemisphere)?;

        Ok(Some(match direction {
            CompassPoint::West => -variation,
            _ => variation,
        }))
    }

    /// Sets the magnetic variation and its direction, or clears both.
    pub fn set_magnetic_variation(&mut self, variation: Option<f64>) -> Result<()> {
        let Some(variation) = variation else {
            self.0.clear_field(VARIATION)?;
            return self.0.clear_field(VARIATION_DIRECTION);
        };

        let magnitude = non_negative(variation.abs(), "magnetic variation")
            .map_err(argument("magnetic variation"))?;
        let direction = if variation.is_sign_negative() {
            CompassPoint::West
        } else {
            CompassPoint::East
        };

        self.0.set_field_from(VARIATION, &magnitude)?;
        self.0.set_field_from(VARIATION_DIRECTION, &direction)
    }

    /// FAA mode indicator, `None` for receivers predating NMEA 2.3.
    pub fn faa_mode(&self) -> Result<Option<FaaMode>> {
        self.0.optional_field_as(FAA_MODE)
    }

    pub fn set_faa_mode(&mut self, mode: Option<FaaMode>) -> Result<()> {
        self.0.set_field_from(FAA_MODE, &mode)
    }

    /// Date and time of the fix in UTC.
    pub fn date_time(&self) -> Result<PrimitiveDateTime> {
        Ok(PrimitiveDateTime::new(self.date()?, self.time()?))
    }
}

impl HasPosition for RmcSentence {
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

impl HasTime for RmcSentence {
    fn time(&self) -> Result<Time> {
        self.0.field_as(TIME)
    }

    fn set_time(&mut self, time: Time) -> Result<()> {
        let time =
            datetime::validate_time(time).map_err(|error| error.for_argument("UTC time"))?;
        self.0.set_field_from(TIME, &time)
    }
}

impl HasDate for RmcSentence {
    fn date(&self) -> Result<Date> {
        self.0.decode_field(DATE, datetime::decode_date)
    }

    /// Only years 1983 to 2082 can be expressed with two digits.
    fn set_date(&mut self, date: Date) -> Result<()> {
        if !(1983..=2082).contains(&date.year()) {
            return Err(Error::InvalidArgument {
                field: "UTC date",
                reason: format!("year {} cannot be written as two digits", date.year()),
            });
        }

        self.0.set_field(DATE, datetime::encode_date(date))
    }
}
