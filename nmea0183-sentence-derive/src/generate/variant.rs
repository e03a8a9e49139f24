use syn::{Error, Fields, Ident, LitChar, Result, Variant, spanned::Spanned};

use crate::meta::{self, MetaArgument, MetaAttributeType};

pub struct CodeVariant {
    pub name: Ident,
    pub code: LitChar,
}

impl CodeVariant {
    pub fn from_variant(variant: &Variant) -> Result<Self> {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new(
                variant.fields.span(),
                "nmea0183-sentence-derive: Code variants must not carry data",
            ));
        }

        if let Some((_, discriminant)) = &variant.discriminant {
            return Err(Error::new(
                discriminant.span(),
                "nmea0183-sentence-derive: Use `#[nmea(code = ..)]` instead of an explicit discriminant",
            ));
        }

        let attributes = meta::parse_variant_level_attributes(&variant.attrs)?;

        let code = attributes
            .iter()
            .find(|attr| attr.r#type == MetaAttributeType::Code)
            .and_then(|attr| match attr.arg() {
                MetaArgument::Char(code) => Some(code.clone()),
                MetaArgument::Str(_) => None,
            })
            .ok_or(Error::new(
                variant.span(),
                "nmea0183-sentence-derive: Variants must have a `code` attribute",
            ))?;

        Ok(Self {
            name: variant.ident.clone(),
            code,
        })
    }
}
