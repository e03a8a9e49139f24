//! # Derive macro for NMEA 0183 code enumerations
//!
//! Many NMEA 0183 fields carry a single character drawn from a fixed set: fix
//! quality digits, unit tags, hemisphere letters, status flags. `#[derive(NmeaCode)]`
//! turns a field-less enum into such a code set, generating the
//! `nmea0183_sentence::codec::NmeaCode` and `nmea0183_sentence::codec::FieldCodec`
//! implementations from one `#[nmea(code = ..)]` attribute per variant.
//!
//! ```rust,ignore
//! use nmea0183_sentence::codec::NmeaCode;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, NmeaCode)]
//! #[nmea(name = "data status")]
//! pub enum DataStatus {
//!     #[nmea(code = 'A')]
//!     Valid,
//!     #[nmea(code = 'V')]
//!     Invalid,
//! }
//! ```
//!
//! It is not meant to be used on its own, but through the re-export in
//! [`nmea0183-sentence`](https://crates.io/crates/nmea0183-sentence).

use generate::generate_nmea_code_impl;
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod generate;
mod meta;

#[proc_macro_derive(NmeaCode, attributes(nmea))]
pub fn derive_nmea_code(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_nmea_code_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
