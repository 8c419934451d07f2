use crate::symbols;

use quote::format_ident;
use syn::{parse_quote, Attribute, Ident, Item, ItemTrait, TraitItem};

pub fn format_mock_ident(trait_ident: &Ident) -> Ident {
    format_ident!("{}Mock", trait_ident)
}

pub fn format_members_ident(mock_ident: &Ident) -> Ident {
    format_ident!("{}Members", mock_ident)
}

pub fn format_statics_ident(mock_ident: &Ident) -> Ident {
    format_ident!("{}Statics", mock_ident)
}

pub fn format_setter_ident(property_ident: &Ident) -> Ident {
    format_ident!("set_{}", property_ident)
}

fn strip_attrs(attrs: &mut Vec<Attribute>) {
    attrs.retain(|attr| attr.path() != symbols::GENMOCK);
}

/// Removes `#[genmock(..)]` attributes from the trait and its items
pub fn strip_helper_attrs(mut trait_def: ItemTrait) -> ItemTrait {
    strip_attrs(&mut trait_def.attrs);
    for item in &mut trait_def.items {
        match item {
            TraitItem::Const(item) => strip_attrs(&mut item.attrs),
            TraitItem::Fn(item) => strip_attrs(&mut item.attrs),
            TraitItem::Type(item) => strip_attrs(&mut item.attrs),
            TraitItem::Macro(item) => strip_attrs(&mut item.attrs),
            _ => { /* do nothing */ }
        }
    }
    trait_def
}

/// Puts `item` under `#[cfg(debug_assertions)]`
pub fn debug_only<T>(item: T) -> Item
where
    T: Into<Item>,
{
    let mut item = item.into();
    let attr: Attribute = parse_quote! { #[cfg(debug_assertions)] };
    match &mut item {
        Item::Struct(item) => item.attrs.insert(0, attr),
        Item::Impl(item) => item.attrs.insert(0, attr),
        Item::Fn(item) => item.attrs.insert(0, attr),
        Item::Const(item) => item.attrs.insert(0, attr),
        Item::Type(item) => item.attrs.insert(0, attr),
        _ => { /* generated items are structs and impls only */ }
    }
    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;
    use syn::ItemStruct;

    #[test]
    fn test_idents() {
        let mock = format_mock_ident(&parse_quote! { Greeter });

        assert_eq!(mock, "GreeterMock");
        assert_eq!(format_members_ident(&mock), "GreeterMockMembers");
        assert_eq!(format_statics_ident(&mock), "GreeterMockStatics");
        assert_eq!(format_setter_ident(&parse_quote! { name }), "set_name");
    }

    #[test]
    fn test_strip_helper_attrs() {
        let t: ItemTrait = parse_quote! {
            #[genmock(rename = "Fake")]
            #[doc = "kept"]
            trait Trait {
                #[genmock(property)]
                #[allow(unused)]
                fn name(&self) -> String;
                #[genmock(default = 1)]
                const C: i32;
            }
        };
        let expected: ItemTrait = parse_quote! {
            #[doc = "kept"]
            trait Trait {
                #[allow(unused)]
                fn name(&self) -> String;
                const C: i32;
            }
        };

        assert_eq!(strip_helper_attrs(t), expected);
    }

    #[test]
    fn test_debug_only() {
        let s: ItemStruct = parse_quote! { struct S; };
        let item = debug_only(s);

        assert_eq!(
            quote! { #item }.to_string(),
            quote! { #[cfg(debug_assertions)] struct S; }.to_string()
        );
    }
}
