use std::{fmt, ops::Deref};

use crate::{Error, Result};

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $len:literal, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(heapless::String<$len>);

        impl $name {
            /// Number of characters of the identifier.
            pub const LEN: usize = $len;

            /// Validates and wraps an identifier of [`Self::LEN`] upper-case
            /// ASCII letters or digits.
            pub fn new(id: &str) -> Result<Self> {
                if id.len() != $len || !id.chars().all(is_identifier_char) {
                    return Err(Error::InvalidArgument {
                        field: $field,
                        reason: format!(
                            "{id:?} is not {} upper-case letters or digits",
                            $len
                        ),
                    });
                }

                heapless::String::try_from(id)
                    .map(Self)
                    .map_err(|()| Error::InvalidArgument {
                        field: $field,
                        reason: format!("{id:?} is too long"),
                    })
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.as_str() == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<&str> for $name {
            type Error = Error;

            fn try_from(id: &str) -> Result<Self> {
                Self::new(id)
            }
        }
    };
}

identifier!(
    /// Talker identifier, the two characters naming the sending device
    /// class (`GP` for GPS, `GN` for multi-constellation GNSS, ...).
    TalkerId,
    2,
    "talker identifier"
);

identifier!(
    /// Sentence identifier, the three characters naming the sentence type
    /// (`GGA`, `RMC`, ...).
    SentenceId,
    3,
    "sentence identifier"
);
