use ::time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::{Error, Result, codec::datetime, sentence::Sentence};

use super::{HasDate, HasTime, typed_sentence};

const TIME: usize = 0;
const DAY: usize = 1;
const MONTH: usize = 2;
const YEAR: usize = 3;
const ZONE_HOURS: usize = 4;
const ZONE_MINUTES: usize = 5;

/// ZDA - Time & Date - UTC, day, month, year and local time zone
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_zda_time_date_utc_day_month_year_and_local_time_zone>
///
/// ```text
///         1         2  3  4    5  6
///         |         |  |  |    |  |
///  $--ZDA,hhmmss.ss,xx,xx,xxxx,xx,xx*hh<CR><LF>
/// ```
///
/// ```rust
/// use nmea0183_sentence::sentences::ZdaSentence;
///
/// let zda: ZdaSentence = "$GPZDA,032915,07,08,2004,00,00*4D".parse().unwrap();
/// let utc = zda.utc_date_time().unwrap();
/// assert_eq!((utc.year(), utc.hour()), (2004, 3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ZdaSentence(Sentence);

typed_sentence!(ZdaSentence, "ZDA");

impl ZdaSentence {
    /// Offset of the local zone from UTC.
    pub fn local_offset(&self) -> Result<UtcOffset> {
        let hours = self
            .0
            .decode_field(ZONE_HOURS, datetime::decode_zone_hours)?;
        let minutes = self
            .0
            .decode_field(ZONE_MINUTES, datetime::decode_zone_minutes)?;

        datetime::utc_offset(hours, minutes).map_err(|error| error.at(ZONE_HOURS))
    }

    /// Fails with [`Error::InvalidArgument`] for offsets with seconds or
    /// beyond 13 hours.
    pub fn set_local_offset(&mut self, offset: UtcOffset) -> Result<()> {
        let (hours, minutes) = datetime::encode_utc_offset(offset)
            .map_err(|error| error.for_argument("local zone"))?;

        self.0.set_field(ZONE_HOURS, hours)?;
        self.0.set_field(ZONE_MINUTES, minutes)
    }

    /// Date and time in UTC.
    pub fn utc_date_time(&self) -> Result<OffsetDateTime> {
        Ok(PrimitiveDateTime::new(self.date()?, self.time()?).assume_utc())
    }

    /// Date and time in the local zone.
    pub fn local_date_time(&self) -> Result<OffsetDateTime> {
        Ok(self.utc_date_time()?.to_offset(self.local_offset()?))
    }

    /// Sets every field from `date_time`; its offset becomes the local zone.
    ///
    /// Either all six fields are written or, on error, none of them.
    pub fn set_date_time(&mut self, date_time: OffsetDateTime) -> Result<()> {
        let utc = date_time
            .checked_to_offset(UtcOffset::UTC)
            .ok_or_else(|| Error::InvalidArgument {
                field: "date and time",
                reason: format!("{date_time} has no representable UTC date"),
            })?;

        let mut updated = self.clone();
        updated.set_local_offset(date_time.offset())?;
        updated.set_date(utc.date())?;
        updated.set_time(utc.time())?;

        *self = updated;
        Ok(())
    }
}

impl HasTime for ZdaSentence {
    fn time(&self) -> Result<Time> {
        self.0.field_as(TIME)
    }

    fn set_time(&mut self, time: Time) -> Result<()> {
        let time =
            datetime::validate_time(time).map_err(|error| error.for_argument("UTC time"))?;
        self.0.set_field_from(TIME, &time)
    }
}

impl HasDate for ZdaSentence {
    fn date(&self) -> Result<Date> {
        let day = self.0.decode_field(DAY, datetime::decode_day)?;
        let month = self.0.decode_field(MONTH, datetime::decode_month)?;
        let year = self.0.decode_field(YEAR, datetime::decode_year)?;

        datetime::calendar_date(year, month, day).map_err(|error| error.at(DAY))
    }

    /// Only years 0 to 9999 can be written as four digits.
    fn set_date(&mut self, date: Date) -> Result<()> {
        if !(0..=9999).contains(&date.year()) {
            return Err(Error::InvalidArgument {
                field: "year",
                reason: format!("year {} cannot be written as four digits", date.year()),
            });
        }

        self.0.set_field(DAY, format!("{:02}", date.day()))?;
        self.0.set_field(MONTH, format!("{:02}", u8::from(date.month())))?;
        self.0.set_field(YEAR, format!("{:04}", date.year()))
    }
}
