use crate::symbols;
use crate::symbols::Symbol;

use syn::parse::{Parse, ParseStream, Parser};
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Ident, LitStr, Meta, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum GenmockAttribute {
    Default(DefaultAttribute),
    Property(PropertyAttribute),
    Rename(RenameAttribute),
}

impl Parse for GenmockAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let ahead = input.fork();
        let meta = ahead.parse::<Meta>()?;

        if meta.path() == DefaultAttribute::symbol() {
            input
                .parse::<DefaultAttribute>()
                .map(GenmockAttribute::Default)
        } else if meta.path() == PropertyAttribute::symbol() {
            input
                .parse::<PropertyAttribute>()
                .map(GenmockAttribute::Property)
        } else if meta.path() == RenameAttribute::symbol() {
            input
                .parse::<RenameAttribute>()
                .map(GenmockAttribute::Rename)
        } else {
            Err(syn::Error::new_spanned(meta, "unsupported attribute"))
        }
    }
}

/// Parses the arguments of `#[generate_mock(...)]`
pub fn parse_macro_args(args: proc_macro2::TokenStream) -> syn::Result<Vec<GenmockAttribute>> {
    let attrs = Punctuated::<GenmockAttribute, Token![,]>::parse_terminated.parse2(args)?;
    Ok(attrs.into_iter().collect())
}

/// Parses every `#[genmock(...)]` among `attrs`
pub fn parse_helper_attrs<'a, I>(attrs: I) -> syn::Result<Vec<GenmockAttribute>>
where
    I: IntoIterator<Item = &'a Attribute>,
{
    let mut res = Vec::new();
    for attr in attrs {
        if attr.path() == symbols::GENMOCK {
            let nested =
                attr.parse_args_with(Punctuated::<GenmockAttribute, Token![,]>::parse_terminated)?;
            res.extend(nested);
        }
    }
    Ok(res)
}

fn parse_symbol(input: ParseStream, expected: Symbol<'static>) -> syn::Result<Ident> {
    let symbol = input.parse::<Ident>()?;
    if symbol != expected {
        return Err(syn::Error::new_spanned(
            symbol,
            format_args!("'{}' expected", expected),
        ));
    }
    Ok(symbol)
}

// ======================= DefaultAttribute ======================= //

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultAttribute {
    /// `#[genmock(default)]`: keep the trait's default body
    Flag(Ident),
    /// `#[genmock(default = <expr>)]`: value of a constant
    Expr(Ident, Expr),
}

impl DefaultAttribute {
    pub fn symbol() -> Symbol<'static> {
        symbols::DEFAULT
    }

    pub fn ident(&self) -> &Ident {
        match self {
            DefaultAttribute::Flag(ident) | DefaultAttribute::Expr(ident, _) => ident,
        }
    }
}

impl Parse for DefaultAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let symbol = parse_symbol(input, Self::symbol())?;

        if input.peek(Token![=]) {
            let _ = input.parse::<Token![=]>()?;
            let expr = input.parse::<Expr>()?;
            Ok(DefaultAttribute::Expr(symbol, expr))
        } else {
            Ok(DefaultAttribute::Flag(symbol))
        }
    }
}

// ======================= PropertyAttribute ======================= //

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAttribute {
    pub ident: Ident,
}

impl PropertyAttribute {
    pub fn symbol() -> Symbol<'static> {
        symbols::PROPERTY
    }
}

impl Parse for PropertyAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let ident = parse_symbol(input, Self::symbol())?;
        Ok(PropertyAttribute { ident })
    }
}

// ======================= RenameAttribute ======================= //

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameAttribute {
    pub ident: Ident,
}

impl RenameAttribute {
    pub fn symbol() -> Symbol<'static> {
        symbols::RENAME
    }
}

impl Parse for RenameAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let _ = parse_symbol(input, Self::symbol())?;
        let _ = input.parse::<Token![=]>()?;
        let lit = input.parse::<LitStr>()?;
        let ident = lit.parse::<Ident>()?;

        Ok(RenameAttribute { ident })
    }
}
