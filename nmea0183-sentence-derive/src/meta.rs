use std::fmt::Display;

use proc_macro2::Span;
use syn::{
    Attribute, Error, Ident, Lit, LitChar, LitStr, Result, Token, parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    token::Paren,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetaAttributeType {
    Code,
    Name,
}

impl MetaAttributeType {
    pub fn from_ident(ident: &Ident) -> Option<Self> {
        match ident.to_string().as_str() {
            "code" => Some(Self::Code),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

impl Display for MetaAttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Code => "code",
            Self::Name => "name",
        };
        write!(f, "{name}")
    }
}

/// Argument of an `nmea` attribute, either `code = 'M'` or `name = "units"`.
#[derive(Debug)]
pub enum MetaArgument {
    Char(LitChar),
    Str(LitStr),
}

#[derive(Debug)]
pub struct MetaAttribute {
    pub r#type: MetaAttributeType,
    arg: MetaArgument,
    span: Span,
}

impl MetaAttribute {
    pub fn is_top_level(&self) -> bool {
        self.r#type == MetaAttributeType::Name
    }

    pub fn is_variant_level(&self) -> bool {
        self.r#type == MetaAttributeType::Code
    }

    pub fn arg(&self) -> &MetaArgument {
        &self.arg
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl Parse for MetaAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let ident: Ident = input.parse()?;
        let attribute_type = MetaAttributeType::from_ident(&ident).ok_or_else(|| {
            Error::new(
                ident.span(),
                "nmea0183-sentence-derive: Unknown nmea attribute",
            )
        })?;

        let lit = parse_argument(input)?;
        let arg = match (attribute_type, lit) {
            (MetaAttributeType::Code, Lit::Char(code)) => {
                if !code.value().is_ascii_graphic() {
                    return Err(Error::new(
                        code.span(),
                        "nmea0183-sentence-derive: `code` must be a printable ASCII character",
                    ));
                }
                MetaArgument::Char(code)
            }
            (MetaAttributeType::Name, Lit::Str(name)) => MetaArgument::Str(name),
            (attribute_type, lit) => {
                return Err(Error::new(
                    lit.span(),
                    format!(
                        "nmea0183-sentence-derive: Unexpected literal type for `{attribute_type}`"
                    ),
                ));
            }
        };

        Ok(MetaAttribute {
            r#type: attribute_type,
            arg,
            span: ident.span(),
        })
    }
}

#[derive(Debug)]
struct List(Vec<MetaAttribute>);

impl Parse for List {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(List(
            Punctuated::<MetaAttribute, Token![,]>::parse_terminated(input)?
                .into_iter()
                .collect(),
        ))
    }
}

// read `= <literal>` or `(<literal>)`
fn parse_argument(input: ParseStream) -> Result<Lit> {
    if input.peek(Token![=]) {
        let _: Token![=] = input.parse()?;
        input.parse()
    } else if input.peek(Paren) {
        let content;
        parenthesized!(content in input);
        content.parse()
    } else {
        Err(Error::new(
            input.span(),
            "nmea0183-sentence-derive: Expected '= <value>' or '(<value>)' for nmea attribute",
        ))
    }
}

fn parse_attributes(
    attrs: &[Attribute],
    allowed: fn(&MetaAttribute) -> bool,
    level: &str,
) -> Result<Vec<MetaAttribute>> {
    let mut attributes_set = std::collections::HashSet::new();

    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("nmea"))
        .map(|attr| attr.parse_args::<List>())
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flat_map(|list| list.0.into_iter())
        .map(|meta_attr| {
            if !allowed(&meta_attr) {
                return Err(Error::new(
                    meta_attr.span(),
                    format!(
                        "nmea0183-sentence-derive: Attribute `{}` is not allowed at the {level} level",
                        meta_attr.r#type
                    ),
                ));
            }

            if !attributes_set.insert(meta_attr.r#type.to_string()) {
                return Err(Error::new(
                    meta_attr.span(),
                    format!(
                        "nmea0183-sentence-derive: Duplicate nmea attribute `{}`",
                        meta_attr.r#type
                    ),
                ));
            }

            Ok(meta_attr)
        })
        .collect()
}

pub fn parse_top_level_attributes(attrs: &[Attribute]) -> Result<Vec<MetaAttribute>> {
    parse_attributes(attrs, MetaAttribute::is_top_level, "top")
}

pub fn parse_variant_level_attributes(attrs: &[Attribute]) -> Result<Vec<MetaAttribute>> {
    parse_attributes(attrs, MetaAttribute::is_variant_level, "variant")
}
