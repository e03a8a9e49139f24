//! # Typed Sentences
//!
//! Typed views over a [`Sentence`] of a known type. Each view owns its
//! sentence and exposes paired getters and setters that go through the
//! [`codec`](crate::codec); the underlying tokens stay the single source of
//! truth.
//!
//! Data shared between sentence types is exposed through capability traits
//! rather than a type hierarchy: [`HasPosition`], [`HasTime`], [`HasDate`]
//! and [`HasFixQuality`]. A view implements exactly the capabilities its
//! sentence carries.
//!
//! ```rust
//! use nmea0183_sentence::sentences::{HasPosition, NmeaSentence};
//!
//! let sentence: NmeaSentence = "$GPGLL,4916.45,N,12311.12,W,225444,A,A*5C".parse().unwrap();
//!
//! let position = sentence.as_position().unwrap().position().unwrap();
//! assert!((position.latitude() - 49.274167).abs() < 1e-6);
//! assert!(position.longitude() < 0.0);
//! ```

use std::{fmt, str::FromStr};

use ::time::{Date, Time};

use crate::{
    Error, Result,
    codec::{FieldCodec, GpsFixQuality, Position, position},
    sentence::Sentence,
};

mod gga;
mod gll;
mod rmc;
mod zda;

pub use gga::GgaSentence;
pub use gll::GllSentence;
pub use rmc::RmcSentence;
pub use zda::ZdaSentence;

/// Sentences carrying a latitude/longitude pair.
pub trait HasPosition {
    /// Fails with [`Error::FieldAbsent`] if any of the four position fields
    /// is empty.
    fn position(&self) -> Result<Position>;

    fn set_position(&mut self, position: Position) -> Result<()>;

    /// Empties the four position fields.
    fn clear_position(&mut self) -> Result<()>;
}

/// Sentences carrying a UTC time of day.
pub trait HasTime {
    fn time(&self) -> Result<Time>;

    fn set_time(&mut self, time: Time) -> Result<()>;
}

/// Sentences carrying a UTC calendar date.
pub trait HasDate {
    fn date(&self) -> Result<Date>;

    fn set_date(&mut self, date: Date) -> Result<()>;
}

/// Sentences carrying a GPS fix quality indicator.
pub trait HasFixQuality {
    fn fix_quality(&self) -> Result<GpsFixQuality>;

    fn set_fix_quality(&mut self, quality: GpsFixQuality) -> Result<()>;
}

/// Reads the position stored in the four fields starting at `first`:
/// latitude, `N`/`S`, longitude, `E`/`W`.
pub(crate) fn read_position(sentence: &Sentence, first: usize) -> Result<Position> {
    let latitude = sentence.decode_field(first, position::decode_latitude)?;
    let latitude_hemisphere =
        sentence.decode_field(first + 1, position::decode_latitude_hemisphere)?;
    let longitude = sentence.decode_field(first + 2, position::decode_longitude)?;
    let longitude_hemisphere =
        sentence.decode_field(first + 3, position::decode_longitude_hemisphere)?;

    Position::from_parts(
        latitude,
        latitude_hemisphere,
        longitude,
        longitude_hemisphere,
    )
    .map_err(|error| error.at(first))
}

/// Writes `value` into the four fields starting at `first`.
pub(crate) fn write_position(sentence: &mut Sentence, first: usize, value: Position) -> Result<()> {
    let tokens = [
        position::encode_latitude(value.latitude()),
        value.latitude_hemisphere().encode(),
        position::encode_longitude(value.longitude()),
        value.longitude_hemisphere().encode(),
    ];

    for (offset, token) in tokens.into_iter().enumerate() {
        sentence.set_field(first + offset, token)?;
    }

    Ok(())
}

pub(crate) fn clear_position(sentence: &mut Sentence, first: usize) -> Result<()> {
    (first..first + 4).try_for_each(|index| sentence.clear_field(index))
}

/// Implements the conversions every typed view shares.
macro_rules! typed_sentence {
    ($name:ident, $id:literal) => {
        impl $name {
            /// Sentence identifier wrapped by this view.
            pub const SENTENCE_ID: &'static str = $id;

            /// Creates an empty sentence for `talker`.
            pub fn new(talker: &str) -> $crate::Result<Self> {
                $crate::sentence::Sentence::new(talker, $id).map(Self)
            }

            /// The underlying generic sentence.
            pub fn sentence(&self) -> &$crate::sentence::Sentence {
                &self.0
            }

            pub fn into_sentence(self) -> $crate::sentence::Sentence {
                self.0
            }

            /// Serializes the sentence as a wire line, terminated by `\r\n`.
            pub fn to_nmea(&self) -> String {
                self.0.to_nmea()
            }
        }

        impl TryFrom<$crate::sentence::Sentence> for $name {
            type Error = $crate::Error;

            fn try_from(sentence: $crate::sentence::Sentence) -> $crate::Result<Self> {
                if sentence.sentence_id() == $id {
                    Ok(Self(sentence))
                } else {
                    Err($crate::Error::SentenceMismatch {
                        expected: $id,
                        found: sentence.sentence_id().to_string(),
                    })
                }
            }
        }

        impl From<$name> for $crate::sentence::Sentence {
            fn from(sentence: $name) -> Self {
                sentence.0
            }
        }

        impl AsRef<$crate::sentence::Sentence> for $name {
            fn as_ref(&self) -> &$crate::sentence::Sentence {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(line: &str) -> $crate::Result<Self> {
                $crate::parse(line).and_then(Self::try_from)
            }
        }
    };
}

use typed_sentence;

/// Any sentence type of the registry, as its typed view.
///
/// ```rust
/// use nmea0183_sentence::sentences::NmeaSentence;
///
/// let sentence: NmeaSentence = "$GPZDA,032915,07,08,2004,00,00*4D".parse().unwrap();
/// assert!(matches!(sentence, NmeaSentence::Zda(_)));
/// assert!(sentence.as_time().is_some());
/// assert!(sentence.as_position().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum NmeaSentence {
    Gga(GgaSentence),
    Gll(GllSentence),
    Rmc(RmcSentence),
    Zda(ZdaSentence),
}

impl NmeaSentence {
    /// The underlying generic sentence.
    pub fn sentence(&self) -> &Sentence {
        match self {
            NmeaSentence::Gga(gga) => gga.sentence(),
            NmeaSentence::Gll(gll) => gll.sentence(),
            NmeaSentence::Rmc(rmc) => rmc.sentence(),
            NmeaSentence::Zda(zda) => zda.sentence(),
        }
    }

    pub fn into_sentence(self) -> Sentence {
        match self {
            NmeaSentence::Gga(gga) => gga.into_sentence(),
            NmeaSentence::Gll(gll) => gll.into_sentence(),
            NmeaSentence::Rmc(rmc) => rmc.into_sentence(),
            NmeaSentence::Zda(zda) => zda.into_sentence(),
        }
    }

    pub fn as_position(&self) -> Option<&dyn HasPosition> {
        match self {
            NmeaSentence::Gga(gga) => Some(gga),
            NmeaSentence::Gll(gll) => Some(gll),
            NmeaSentence::Rmc(rmc) => Some(rmc),
            NmeaSentence::Zda(_) => None,
        }
    }

    pub fn as_time(&self) -> Option<&dyn HasTime> {
        match self {
            NmeaSentence::Gga(gga) => Some(gga),
            NmeaSentence::Gll(gll) => Some(gll),
            NmeaSentence::Rmc(rmc) => Some(rmc),
            NmeaSentence::Zda(zda) => Some(zda),
        }
    }

    pub fn as_date(&self) -> Option<&dyn HasDate> {
        match self {
            NmeaSentence::Rmc(rmc) => Some(rmc),
            NmeaSentence::Zda(zda) => Some(zda),
            NmeaSentence::Gga(_) | NmeaSentence::Gll(_) => None,
        }
    }

    pub fn as_fix_quality(&self) -> Option<&dyn HasFixQuality> {
        match self {
            NmeaSentence::Gga(gga) => Some(gga),
            _ => None,
        }
    }
}

impl TryFrom<Sentence> for NmeaSentence {
    type Error = Error;

    fn try_from(sentence: Sentence) -> Result<Self> {
        match sentence.sentence_id().as_str() {
            GgaSentence::SENTENCE_ID => GgaSentence::try_from(sentence).map(NmeaSentence::Gga),
            GllSentence::SENTENCE_ID => GllSentence::try_from(sentence).map(NmeaSentence::Gll),
            RmcSentence::SENTENCE_ID => RmcSentence::try_from(sentence).map(NmeaSentence::Rmc),
            ZdaSentence::SENTENCE_ID => ZdaSentence::try_from(sentence).map(NmeaSentence::Zda),
            other => Err(Error::UnrecognizedSentence(other.to_string())),
        }
    }
}

impl From<NmeaSentence> for Sentence {
    fn from(sentence: NmeaSentence) -> Self {
        sentence.into_sentence()
    }
}

impl FromStr for NmeaSentence {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        crate::parse(line).and_then(Self::try_from)
    }
}

impl fmt::Display for NmeaSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.sentence(), f)
    }
}
