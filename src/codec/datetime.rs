//! Time of day, calendar date and local zone tokens.

use ::time::{Date, Month, Time, UtcOffset};
use nom::{
    character::complete::{char, digit1, one_of},
    combinator::opt,
    sequence::preceded,
};

use crate::codec::{FieldCodec, FieldError, complete, digits};

const TIME: &str = "UTC time (hhmmss[.sss])";
const DATE: &str = "UTC date (ddmmyy)";
const DAY: &str = "day of month (01-31)";
const MONTH: &str = "month (01-12)";
const YEAR: &str = "four digit year";
const ZONE_HOURS: &str = "local zone hours (-13 to 13)";
const ZONE_MINUTES: &str = "local zone minutes (00-59)";

fn format_error(token: &str, expected: &'static str) -> FieldError {
    FieldError::Format {
        value: token.to_string(),
        expected,
    }
}

fn range_error(token: &str, expected: &'static str) -> FieldError {
    FieldError::OutOfRange {
        value: token.to_string(),
        expected,
    }
}

// first three fractional digits, right padded: ".5" is 500 ms
fn milliseconds(fraction: &str) -> u16 {
    fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(3)
        .fold(0, |value, digit| value * 10 + u16::from(digit - b'0'))
}

/// Decodes `hhmmss` with an optional fraction of seconds.
///
/// Fractions finer than a millisecond are truncated.
pub fn decode_time(token: &str) -> Result<Time, FieldError> {
    let (hour, minute, second, fraction) = complete(
        token,
        (
            digits(2),
            digits(2),
            digits(2),
            opt(preceded(char('.'), digit1)),
        ),
    )
    .ok_or_else(|| format_error(token, TIME))?;

    let millisecond = fraction.map(milliseconds).unwrap_or_default();

    Time::from_hms_milli(hour as u8, minute as u8, second as u8, millisecond)
        .map_err(|_| range_error(token, TIME))
}

/// Encodes `hhmmss`, adding `.sss` only when the time has milliseconds.
pub fn encode_time(time: Time) -> String {
    let token = format!(
        "{:02}{:02}{:02}",
        time.hour(),
        time.minute(),
        time.second()
    );

    match time.millisecond() {
        0 => token,
        millisecond => format!("{token}.{millisecond:03}"),
    }
}

/// Accepts times the wire can carry exactly: whole milliseconds.
pub fn validate_time(time: Time) -> Result<Time, FieldError> {
    if time.nanosecond() % 1_000_000 == 0 {
        Ok(time)
    } else {
        Err(FieldError::OutOfRange {
            value: time.to_string(),
            expected: "UTC time with millisecond precision",
        })
    }
}

impl FieldCodec for Time {
    fn decode(token: &str) -> Result<Self, FieldError> {
        decode_time(token)
    }

    fn encode(&self) -> String {
        encode_time(*self)
    }
}

/// Decodes `ddmmyy`. Years `83`-`99` are 1983-1999, the rest 2000-2082.
pub fn decode_date(token: &str) -> Result<Date, FieldError> {
    let (day, month, year) = complete(token, (digits(2), digits(2), digits(2)))
        .ok_or_else(|| format_error(token, DATE))?;

    let year = match year {
        83..=99 => year + 1900,
        _ => year + 2000,
    };

    calendar_date(year as i32, month as u8, day as u8).map_err(|_| range_error(token, DATE))
}

/// Encodes `ddmmyy`.
pub fn encode_date(date: Date) -> String {
    format!(
        "{:02}{:02}{:02}",
        date.day(),
        u8::from(date.month()),
        date.year().rem_euclid(100)
    )
}

/// Builds a date from separate year, month and day values.
pub fn calendar_date(year: i32, month: u8, day: u8) -> Result<Date, FieldError> {
    let value = || format!("{year:04}-{month:02}-{day:02}");

    let month = Month::try_from(month).map_err(|_| FieldError::OutOfRange {
        value: value(),
        expected: MONTH,
    })?;

    Date::from_calendar_date(year, month, day).map_err(|_| FieldError::OutOfRange {
        value: value(),
        expected: "calendar date",
    })
}

fn decode_bounded(
    token: &str,
    width: usize,
    range: std::ops::RangeInclusive<u32>,
    expected: &'static str,
) -> Result<u32, FieldError> {
    let value = complete(token, digits(width)).ok_or_else(|| format_error(token, expected))?;

    if range.contains(&value) {
        Ok(value)
    } else {
        Err(range_error(token, expected))
    }
}

/// Decodes a two-digit day of month.
pub fn decode_day(token: &str) -> Result<u8, FieldError> {
    decode_bounded(token, 2, 1..=31, DAY).map(|day| day as u8)
}

/// Decodes a two-digit month.
pub fn decode_month(token: &str) -> Result<u8, FieldError> {
    decode_bounded(token, 2, 1..=12, MONTH).map(|month| month as u8)
}

/// Decodes a four-digit year.
pub fn decode_year(token: &str) -> Result<i32, FieldError> {
    decode_bounded(token, 4, 0..=9999, YEAR).map(|year| year as i32)
}

/// Decodes the signed hour part of a local zone, `-13` to `13`.
pub fn decode_zone_hours(token: &str) -> Result<i8, FieldError> {
    let (sign, hours) = complete(token, (opt(one_of("+-")), digits(2)))
        .ok_or_else(|| format_error(token, ZONE_HOURS))?;

    if hours > 13 {
        return Err(range_error(token, ZONE_HOURS));
    }

    Ok(match sign {
        Some('-') => -(hours as i8),
        _ => hours as i8,
    })
}

/// Decodes the minute part of a local zone.
pub fn decode_zone_minutes(token: &str) -> Result<u8, FieldError> {
    decode_bounded(token, 2, 0..=59, ZONE_MINUTES).map(|minutes| minutes as u8)
}

/// Combines zone hours and minutes into an offset. The minutes take the
/// sign of the hours.
pub fn utc_offset(hours: i8, minutes: u8) -> Result<UtcOffset, FieldError> {
    let minutes = minutes as i8;
    let minutes = if hours.is_negative() {
        -minutes
    } else {
        minutes
    };

    UtcOffset::from_hms(hours, minutes, 0).map_err(|_| FieldError::OutOfRange {
        value: format!("{hours:+03}:{minutes:02}"),
        expected: "local zone offset",
    })
}

/// Encodes an offset as its zone hours and zone minutes tokens.
pub fn encode_utc_offset(offset: UtcOffset) -> Result<(String, String), FieldError> {
    let (hours, minutes, seconds) = offset.as_hms();

    if seconds != 0 || !(-13..=13).contains(&hours) {
        return Err(FieldError::OutOfRange {
            value: offset.to_string(),
            expected: "local zone offset (whole minutes, at most 13 hours)",
        });
    }

    let hours = if offset.is_negative() {
        format!("-{:02}", hours.unsigned_abs())
    } else {
        format!("{hours:02}")
    };

    Ok((hours, format!("{:02}", minutes.unsigned_abs())))
}
