//! # Sentence Model
//!
//! [`Sentence`] is the generic, mutable container every sentence type shares:
//! start marker, talker and sentence identifiers, and an ordered list of raw
//! field tokens whose count is fixed by the sentence's
//! [`registry`] layout.
//!
//! Field tokens are stored exactly as received, so a parsed sentence
//! re-serializes byte for byte. Typed access goes through the
//! [`codec`](crate::codec) on every read and write.
//!
//! ```rust
//! use nmea0183_sentence::{Error, sentence::Sentence};
//!
//! let mut sentence = Sentence::new("GP", "GGA").unwrap();
//! assert_eq!(sentence.field_count(), 14);
//! assert_eq!(sentence.field(12), Ok(""));
//!
//! sentence.set_field_from(8, &28.0).unwrap();
//! assert_eq!(sentence.field_as::<f64>(8), Ok(28.0));
//!
//! assert!(matches!(sentence.field(14), Err(Error::IndexOutOfRange { index: 14, len: 14 })));
//! assert!(matches!(Sentence::new("GP", "XYZ"), Err(Error::UnrecognizedSentence(_))));
//! ```

use crate::{
    Error, Result,
    codec::{FieldCodec, FieldError},
    nmea0183::{RawSentence, StartMarker},
};

pub mod builder;
mod id;
pub mod registry;

pub use builder::SentenceBuilder;
pub use id::{SentenceId, TalkerId};
pub use registry::{FieldDescriptor, FieldKind, SentenceLayout};

// characters reserved by NMEA 0183 for framing and escaping
const RESERVED: &[char] = &[',', '*', '$', '!', '\\', '^', '~', '\r', '\n'];

/// A sentence of a registered type, validated field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    marker: StartMarker,
    talker: TalkerId,
    sentence_id: SentenceId,
    fields: Vec<String>,
    layout: &'static SentenceLayout,
}

impl Sentence {
    /// Creates a sentence with every field absent.
    ///
    /// Fails with [`Error::UnrecognizedSentence`] when no layout is
    /// registered for `sentence_id`.
    pub fn new(talker: &str, sentence_id: &str) -> Result<Self> {
        let talker = TalkerId::new(talker)?;
        let sentence_id = SentenceId::new(sentence_id)?;
        let layout = lookup(&sentence_id)?;

        Ok(Sentence {
            marker: StartMarker::Standard,
            talker,
            sentence_id,
            fields: vec![String::new(); layout.field_count()],
            layout,
        })
    }

    /// Builds a sentence from framed tokens, checking the field count and
    /// validating every field against the layout.
    ///
    /// The checksum is not looked at; see [`RawSentence::verify`].
    pub fn from_raw(raw: RawSentence<'_>) -> Result<Self> {
        let layout = lookup(raw.sentence_id)?;

        if raw.fields.len() != layout.field_count() {
            return Err(Error::FieldCount {
                sentence_id: raw.sentence_id.to_string(),
                expected: layout.field_count(),
                found: raw.fields.len(),
            });
        }

        let sentence = Sentence {
            marker: raw.marker,
            talker: TalkerId::new(raw.talker)?,
            sentence_id: SentenceId::new(raw.sentence_id)?,
            fields: raw.fields.into_iter().map(str::to_string).collect(),
            layout,
        };
        sentence.validate()?;

        Ok(sentence)
    }

    pub fn marker(&self) -> StartMarker {
        self.marker
    }

    pub(crate) fn set_marker(&mut self, marker: StartMarker) {
        self.marker = marker;
    }

    pub fn talker(&self) -> &TalkerId {
        &self.talker
    }

    pub fn sentence_id(&self) -> &SentenceId {
        &self.sentence_id
    }

    /// The registered layout of the sentence type.
    pub fn layout(&self) -> &'static SentenceLayout {
        self.layout
    }

    /// Number of fields, fixed by the layout.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Iterates over the raw field tokens in wire order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    fn check_index(&self, index: usize) -> Result<&'static FieldDescriptor> {
        self.layout.field(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.fields.len(),
        })
    }

    /// Returns the raw token at `index`; empty when the field is absent.
    pub fn field(&self, index: usize) -> Result<&str> {
        self.check_index(index)?;
        Ok(&self.fields[index])
    }

    /// Returns `true` if the field at `index` is present.
    pub fn has_field(&self, index: usize) -> Result<bool> {
        self.field(index).map(|token| !token.is_empty())
    }

    /// Replaces the raw token at `index` after validating it against the
    /// layout. A whitespace-only token is stored as absent.
    pub fn set_field(&mut self, index: usize, token: impl Into<String>) -> Result<()> {
        let descriptor = self.check_index(index)?;
        let mut token = token.into();

        if let Some(c) = token
            .chars()
            .find(|c| !c.is_ascii() || RESERVED.contains(c))
        {
            return Err(Error::InvalidArgument {
                field: descriptor.name,
                reason: format!("{c:?} may not appear in a field"),
            });
        }

        if token.trim().is_empty() {
            token.clear();
        }

        self.layout
            .validate_field(index, &token)
            .map_err(|error| error.for_argument(descriptor.name))?;

        self.fields[index] = token;
        Ok(())
    }

    /// Encodes `value` with its codec and stores it at `index`.
    pub fn set_field_from<T: FieldCodec>(&mut self, index: usize, value: &T) -> Result<()> {
        self.set_field(index, value.encode())
    }

    /// Marks the field at `index` as absent.
    pub fn clear_field(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.fields[index].clear();
        Ok(())
    }

    /// Decodes the field at `index` with `decode`.
    ///
    /// Fails with [`Error::FieldAbsent`] if the field is empty.
    pub fn decode_field<T>(
        &self,
        index: usize,
        decode: impl FnOnce(&str) -> std::result::Result<T, FieldError>,
    ) -> Result<T> {
        let descriptor = self.check_index(index)?;
        let token = self.fields[index].as_str();

        if token.is_empty() {
            return Err(Error::FieldAbsent {
                index,
                field: descriptor.name,
            });
        }

        decode(token).map_err(|error| error.at(index))
    }

    /// Decodes the field at `index` with `decode`, or returns `None` if it
    /// is empty.
    pub fn decode_optional_field<T>(
        &self,
        index: usize,
        decode: impl FnOnce(&str) -> std::result::Result<T, FieldError>,
    ) -> Result<Option<T>> {
        if self.has_field(index)? {
            self.decode_field(index, decode).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Decodes the field at `index` as `T`.
    ///
    /// Fails with [`Error::FieldAbsent`] if the field is empty.
    pub fn field_as<T: FieldCodec>(&self, index: usize) -> Result<T> {
        self.decode_field(index, T::decode)
    }

    /// Decodes the field at `index` as `T`, or returns `None` if it is empty.
    pub fn optional_field_as<T: FieldCodec>(&self, index: usize) -> Result<Option<T>> {
        self.decode_optional_field(index, T::decode)
    }

    /// Validates every present field against the layout.
    ///
    /// Reports the first failing field with its index.
    pub fn validate(&self) -> Result<()> {
        if self.fields.len() != self.layout.field_count() {
            return Err(Error::FieldCount {
                sentence_id: self.sentence_id.to_string(),
                expected: self.layout.field_count(),
                found: self.fields.len(),
            });
        }

        self.fields
            .iter()
            .enumerate()
            .try_for_each(|(index, token)| {
                self.layout
                    .validate_field(index, token)
                    .map_err(|error| error.at(index))
            })
    }
}

fn lookup(sentence_id: &str) -> Result<&'static SentenceLayout> {
    registry::layout(sentence_id)
        .ok_or_else(|| Error::UnrecognizedSentence(sentence_id.to_string()))
}

#[cfg(feature = "serde")]
impl serde::Serialize for Sentence {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Sentence {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let line = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        crate::parse(&line).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Nmea0183Parser, codec::GpsFixQuality};

    const GGA: &str = "$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M,,*79";

    #[test]
    fn test_new_sentence_is_empty() {
        let sentence = Sentence::new("GN", "RMC").unwrap();
        assert_eq!(sentence.marker(), StartMarker::Standard);
        assert_eq!(sentence.talker(), "GN");
        assert_eq!(sentence.sentence_id(), "RMC");
        assert_eq!(sentence.field_count(), 12);
        assert!(sentence.fields().all(str::is_empty));
        assert_eq!(sentence.validate(), Ok(()));

        assert!(matches!(
            Sentence::new("GP", "GGGA"),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_from_raw_field_count() {
        let parser = Nmea0183Parser::default();
        let raw = parser
            .tokenize("$GPGGA,120044,6011.552,N,02501.941,E,1,00,2.0,28.0,M,19.6,M*00")
            .unwrap();

        assert_eq!(
            Sentence::from_raw(raw),
            Err(Error::FieldCount {
                sentence_id: "GGA".into(),
                expected: 14,
                found: 12
            })
        );
    }

    #[test]
    fn test_from_raw_reports_field_index() {
        let parser = Nmea0183Parser::default();
        let raw = parser
            .tokenize("$GPGGA,120044,6011.552,N,02501.941,E,9,00,2.0,28.0,M,19.6,M,,*00")
            .unwrap();

        assert_eq!(
            Sentence::from_raw(raw),
            Err(Error::UnknownEnumValue {
                index: Some(5),
                enumeration: "fix quality",
                value: "9".into()
            })
        );
    }

    #[test]
    fn test_field_access() {
        let mut sentence = Nmea0183Parser::default().parse(GGA).unwrap();

        assert_eq!(sentence.field(9), Ok("M"));
        assert_eq!(sentence.field_as::<GpsFixQuality>(5), Ok(GpsFixQuality::Gps));
        assert_eq!(sentence.optional_field_as::<f64>(12), Ok(None));
        assert_eq!(
            sentence.field_as::<f64>(12),
            Err(Error::FieldAbsent {
                index: 12,
                field: "DGPS data age"
            })
        );
        assert_eq!(
            sentence.field(20),
            Err(Error::IndexOutOfRange { index: 20, len: 14 })
        );

        sentence.clear_field(8).unwrap();
        assert_eq!(sentence.has_field(8), Ok(false));
        sentence.set_field(8, "  ").unwrap();
        assert_eq!(sentence.field(8), Ok(""));
    }

    #[test]
    fn test_set_field_validates() {
        let mut sentence = Sentence::new("GP", "GGA").unwrap();

        assert!(matches!(
            sentence.set_field(8, "1,2"),
            Err(Error::InvalidArgument {
                field: "altitude",
                ..
            })
        ));
        assert!(matches!(
            sentence.set_field(8, "12*"),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            sentence.set_field(8, "twelve"),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            sentence.set_field(9, "m"),
            Err(Error::UnknownEnumValue { index: None, .. })
        ));
        assert!(matches!(
            sentence.set_field(30, "1"),
            Err(Error::IndexOutOfRange { .. })
        ));

        for token in ["1~", "^1", "1\\2", "1\r\n", "1$", "!1"] {
            match sentence.set_field(8, token) {
                Err(Error::InvalidArgument { reason, .. }) => {
                    assert!(reason.ends_with("may not appear in a field"), "{reason}")
                }
                other => panic!("accepted {token:?}: {other:?}"),
            }
        }

        // rejected values leave the field untouched
        assert_eq!(sentence.field(8), Ok(""));

        sentence.set_field(9, "f").unwrap();
        assert_eq!(sentence.field(9), Ok("f"));
    }
}
