use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DataEnum, DeriveInput, Error, Ident, LitStr, Result, spanned::Spanned};

use crate::{
    generate::variant::CodeVariant,
    meta::{self, MetaArgument, MetaAttributeType},
};

mod variant;

// Usage:
// #[derive(NmeaCode)]
// #[nmea(name = "altitude units")]
// pub enum Units {
//     #[nmea(code = 'M')]
//     Meters,
//     #[nmea(code = 'f')]
//     Feet,
// }

struct CodeEnum {
    name: Ident,
    display_name: LitStr,
    variants: Vec<CodeVariant>,
}

impl CodeEnum {
    fn from_dataenum(input: &DeriveInput, dataenum: &DataEnum) -> Result<Self> {
        let name = &input.ident;

        if !input.generics.params.is_empty() {
            return Err(Error::new(
                input.generics.params[0].span(),
                "nmea0183-sentence-derive: Generic enums are not supported",
            ));
        }

        if dataenum.variants.is_empty() {
            return Err(Error::new(
                name.span(),
                "nmea0183-sentence-derive: Enums must declare at least one variant",
            ));
        }

        let attributes = meta::parse_top_level_attributes(&input.attrs)?;
        let display_name = attributes
            .iter()
            .find(|attr| attr.r#type == MetaAttributeType::Name)
            .and_then(|attr| match attr.arg() {
                MetaArgument::Str(name) => Some(name.clone()),
                MetaArgument::Char(_) => None,
            })
            .unwrap_or_else(|| LitStr::new(&name.to_string(), name.span()));

        let variants = dataenum
            .variants
            .iter()
            .map(CodeVariant::from_variant)
            .collect::<Result<Vec<_>>>()?;

        // Codes are matched byte for byte, so 'F' and 'f' are distinct.
        for (position, variant) in variants.iter().enumerate() {
            if variants[..position]
                .iter()
                .any(|other| other.code.value() == variant.code.value())
            {
                return Err(Error::new(
                    variant.code.span(),
                    format!(
                        "nmea0183-sentence-derive: Duplicate code {:?}",
                        variant.code.value()
                    ),
                ));
            }
        }

        Ok(Self {
            name: name.clone(),
            display_name,
            variants,
        })
    }

    fn generate_impl(&self) -> TokenStream {
        let name = &self.name;
        let display_name = &self.display_name;
        let variants: Vec<_> = self.variants.iter().map(|v| &v.name).collect();
        let codes: Vec<_> = self.variants.iter().map(|v| &v.code).collect();

        quote! {
            impl nmea0183_sentence::codec::NmeaCode for #name {
                const NAME: &'static str = #display_name;
                const CODES: &'static [char] = &[#(#codes),*];

                fn from_code(code: char) -> ::core::option::Option<Self> {
                    match code {
                        #(#codes => ::core::option::Option::Some(Self::#variants),)*
                        _ => ::core::option::Option::None,
                    }
                }

                fn code(&self) -> char {
                    match self {
                        #(Self::#variants => #codes,)*
                    }
                }
            }

            impl nmea0183_sentence::codec::FieldCodec for #name {
                fn decode(
                    token: &str,
                ) -> ::core::result::Result<Self, nmea0183_sentence::codec::FieldError> {
                    nmea0183_sentence::codec::decode_code(token)
                }

                fn encode(&self) -> ::std::string::String {
                    ::std::string::ToString::to_string(
                        &<Self as nmea0183_sentence::codec::NmeaCode>::code(self),
                    )
                }
            }
        }
    }
}

pub fn generate_nmea_code_impl(input: &DeriveInput) -> Result<TokenStream> {
    match &input.data {
        Data::Enum(dataenum) => Ok(CodeEnum::from_dataenum(input, dataenum)?.generate_impl()),
        Data::Struct(_) | Data::Union(_) => Err(Error::new(
            input.ident.span(),
            "nmea0183-sentence-derive: NmeaCode can only be derived for enums",
        )),
    }
}
