use crate::attribute::{self, GenmockAttribute};
use crate::descriptor::ProtocolDescriptor;
use crate::types::{self, Deselfify};
use crate::{inspect, utils};

use syn::visit_mut::VisitMut;
use syn::{parse_quote, Generics, Ident, ItemTrait, Type, TypeParamBound};

#[derive(Debug)]
pub struct Context {
    /// The trait as re-emitted, helper attributes stripped
    pub trait_def: ItemTrait,
    pub protocol: ProtocolDescriptor,

    pub mock_ident: Ident,
    pub mock_generics: Generics,

    pub members_ident: Ident,
    pub statics_ident: Ident,
}

impl Context {
    pub fn from_ast(
        args: proc_macro2::TokenStream,
        trait_def: ItemTrait,
    ) -> Result<Self, syn::Error> {
        let mut rename = None;
        let trait_attrs = attribute::parse_helper_attrs(&trait_def.attrs)?;
        for attr in attribute::parse_macro_args(args)?.into_iter().chain(trait_attrs) {
            match attr {
                GenmockAttribute::Rename(attr) => rename = Some(attr.ident),
                GenmockAttribute::Default(attr) => {
                    return Err(syn::Error::new_spanned(
                        attr.ident(),
                        "`default` is only allowed on trait items",
                    ))
                }
                GenmockAttribute::Property(attr) => {
                    return Err(syn::Error::new_spanned(
                        attr.ident,
                        "`property` is only allowed on trait functions",
                    ))
                }
            }
        }

        let protocol = inspect::inspect(&trait_def)?;

        let mock_ident = rename.unwrap_or_else(|| utils::format_mock_ident(&protocol.ident));
        let mock_generics = types::generic_clause(&protocol.generics, &protocol.associated_types);
        let members_ident = utils::format_members_ident(&mock_ident);
        let statics_ident = utils::format_statics_ident(&mock_ident);

        Ok(Self {
            trait_def: utils::strip_helper_attrs(trait_def),
            protocol,
            mock_ident,
            mock_generics,
            members_ident,
            statics_ident,
        })
    }

    /// `<Name>Mock<..>` as a type
    pub fn mock_ty(&self) -> Type {
        let mock_ident = &self.mock_ident;
        let (_impl_generics, ty_generics, _where_clause) = self.mock_generics.split_for_impl();
        parse_quote! { #mock_ident #ty_generics }
    }

    fn deselfifier(&self) -> Deselfify<'_> {
        Deselfify {
            assoc: self
                .protocol
                .associated_types
                .iter()
                .map(|at| &at.ident)
                .collect(),
            mock_ty: self.mock_ty(),
        }
    }

    /// Rewrites `Self`-relative types for use outside the trait impl
    pub fn deselfify(&self, ty: Type) -> Type {
        self.deselfifier().apply(ty)
    }

    pub fn deselfify_bound(&self, mut bound: TypeParamBound) -> TypeParamBound {
        self.deselfifier().visit_type_param_bound_mut(&mut bound);
        bound
    }
}
