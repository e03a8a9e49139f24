//! # Sentence Builder and Serializer
//!
//! Serialization assembles `<marker><talker><id>,<f1>,...,<fn>*<XX>` with
//! the checksum computed over the assembled payload. Absent fields are
//! emitted as empty tokens, so the field count is always preserved.
//!
//! [`SentenceBuilder`] accumulates fields and produces a [`Sentence`] only
//! once every field has been accepted.
//!
//! ```rust
//! use nmea0183_sentence::{codec::GpsFixQuality, sentence::SentenceBuilder};
//!
//! let sentence = SentenceBuilder::new("GP", "GGA")
//!     .field(0, "120044")
//!     .field(1, "6011.552")
//!     .field(2, "N")
//!     .field(3, "02501.941")
//!     .field(4, "E")
//!     .value(5, &GpsFixQuality::Gps)
//!     .field(6, "00")
//!     .value(7, &2.0)
//!     .value(8, &28.0)
//!     .field(9, "M")
//!     .value(10, &19.6)
//!     .field(11, "M")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     sentence.to_nmea(),
//!     "$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79\r\n"
//! );
//! ```

use std::fmt;

use crate::{
    Error, Result,
    codec::FieldCodec,
    nmea0183::{StartMarker, checksum},
    sentence::Sentence,
};

impl Sentence {
    /// The checksummed span: identifiers and comma separated fields.
    pub fn payload(&self) -> String {
        let mut payload = format!("{}{}", self.talker(), self.sentence_id());
        for field in self.fields() {
            payload.push(',');
            payload.push_str(field);
        }
        payload
    }

    /// Checksum of the current contents.
    pub fn checksum(&self) -> u8 {
        checksum::compute(self.payload())
    }

    /// Serializes the sentence as a wire line, terminated by `\r\n`.
    pub fn to_nmea(&self) -> String {
        format!("{self}\r\n")
    }
}

/// Writes the wire line without the line ending.
impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let payload = self.payload();
        write!(
            f,
            "{}{}*{}",
            self.marker().as_char(),
            payload,
            checksum::format(checksum::compute(&payload))
        )
    }
}

/// Incrementally assembles a [`Sentence`].
///
/// Every call validates its field the same way [`Sentence::set_field`]
/// does. The first failure is kept and reported by [`build`](Self::build);
/// later calls are ignored.
#[must_use]
#[derive(Debug, Clone)]
pub struct SentenceBuilder {
    sentence: Result<Sentence>,
}

impl SentenceBuilder {
    /// Starts a sentence of the given type with every field absent.
    pub fn new(talker: &str, sentence_id: &str) -> Self {
        SentenceBuilder {
            sentence: Sentence::new(talker, sentence_id),
        }
    }

    /// Starts from the contents of an existing sentence.
    pub fn from_sentence(sentence: Sentence) -> Self {
        SentenceBuilder {
            sentence: Ok(sentence),
        }
    }

    fn update(mut self, f: impl FnOnce(&mut Sentence) -> Result<()>) -> Self {
        if let Ok(sentence) = &mut self.sentence
            && let Err(error) = f(sentence)
        {
            self.sentence = Err(error);
        }
        self
    }

    /// Sets the start marker, `$` by default.
    pub fn marker(self, marker: StartMarker) -> Self {
        self.update(|sentence| {
            sentence.set_marker(marker);
            Ok(())
        })
    }

    /// Sets the raw token at `index`.
    pub fn field(self, index: usize, token: impl Into<String>) -> Self {
        self.update(|sentence| sentence.set_field(index, token))
    }

    /// Encodes `value` into the field at `index`.
    pub fn value<T: FieldCodec>(self, index: usize, value: &T) -> Self {
        self.update(|sentence| sentence.set_field_from(index, value))
    }

    /// Encodes `value` into the field at `index`, or leaves it absent.
    pub fn optional_value<T: FieldCodec>(self, index: usize, value: Option<&T>) -> Self {
        match value {
            Some(value) => self.value(index, value),
            None => self.update(|sentence| sentence.clear_field(index)),
        }
    }

    /// Applies an arbitrary update, such as a typed setter.
    pub fn with(self, f: impl FnOnce(&mut Sentence) -> Result<()>) -> Self {
        self.update(f)
    }

    /// Produces the sentence, or the first error met while building it.
    pub fn build(self) -> Result<Sentence> {
        let sentence = self.sentence?;
        sentence.validate()?;
        Ok(sentence)
    }
}

impl TryFrom<SentenceBuilder> for Sentence {
    type Error = Error;

    fn try_from(builder: SentenceBuilder) -> Result<Self> {
        builder.build()
    }
}
