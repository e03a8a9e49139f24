use ::time::Time;

use crate::{
    Result,
    codec::{DataStatus, FaaMode, Position, datetime},
    sentence::Sentence,
};

use super::{HasPosition, HasTime, typed_sentence};

const LATITUDE: usize = 0;
const TIME: usize = 4;
const STATUS: usize = 5;
const FAA_MODE: usize = 6;

/// GLL - Geographic Position - Latitude/Longitude
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gll_geographic_position_latitudelongitude>
///
/// ```text
///         1       2 3        4 5         6 7
///         |       | |        | |         | |
///  $--GLL,ddmm.mm,a,dddmm.mm,a,hhmmss.ss,a,m*hh<CR><LF>
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GllSentence(Sentence);

typed_sentence!(GllSentence, "GLL");

impl GllSentence {
    pub fn status(&self) -> Result<DataStatus> {
        self.0.field_as(STATUS)
    }

    pub fn set_status(&mut self, status: DataStatus) -> Result<()> {
        self.0.set_field_from(STATUS, &status)
    }

    /// FAA mode indicator, `None` for receivers predating NMEA 2.3.
    pub fn faa_mode(&self) -> Result<Option<FaaMode>> {
        self.0.optional_field_as(FAA_MODE)
    }

    pub fn set_faa_mode(&mut self, mode: Option<FaaMode>) -> Result<()> {
        self.0.set_field_from(FAA_MODE, &mode)
    }
}

impl HasPosition for GllSentence {
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

impl HasTime for GllSentence {
    fn time(&self) -> Result<Time> {
        self.0.field_as(TIME)
    }

    fn set_time(&mut self, time: Time) -> Result<()> {
        let time =
            datetime::validate_time(time).map_err(|error| error.for_argument("UTC time"))?;
        self.0.set_field_from(TIME, &time)
    }
}
