use crate::descriptor::{AssociatedTypeDescriptor, ParameterDescriptor, SelfShape};

use if_chain::if_chain;
use syn::punctuated::Punctuated;
use syn::visit_mut::VisitMut;
use syn::{
    parse_quote, visit_mut, GenericArgument, GenericParam, Generics, Ident, PathArguments, Token,
    Type, TypeParam, TypePath, WhereClause, WherePredicate,
};

/// `Ok` type of `Result<T, E>`, `Result<T>` or any other path ending in `Result`
pub fn split_result(ty: &Type) -> Option<&Type> {
    if_chain! {
        if let Type::Path(TypePath { qself: None, path }) = ty;
        if let Some(last) = path.segments.last();
        if last.ident == "Result";
        if let PathArguments::AngleBracketed(args) = &last.arguments;
        if let Some(GenericArgument::Type(ok)) = args.args.first();
        then {
            Some(ok)
        } else {
            None
        }
    }
}

/// `Some(T)` for `Option<T>`
fn split_option(ty: &Type) -> Option<&Type> {
    if_chain! {
        if let Type::Path(TypePath { qself: None, path }) = ty;
        if let Some(last) = path.segments.last();
        if last.ident == "Option";
        if let PathArguments::AngleBracketed(args) = &last.arguments;
        if args.args.len() == 1;
        if let Some(GenericArgument::Type(inner)) = args.args.first();
        then {
            Some(inner)
        } else {
            None
        }
    }
}

pub fn is_self(ty: &Type) -> bool {
    matches!(ty, Type::Path(TypePath { qself: None, path }) if path.is_ident("Self"))
}

/// Recognizes the return types of initializers
pub fn self_shape(ty: &Type) -> Option<SelfShape> {
    if is_self(ty) {
        Some(SelfShape::Plain)
    } else if split_result(ty).map_or(false, is_self) {
        Some(SelfShape::Result)
    } else if split_option(ty).map_or(false, is_self) {
        Some(SelfShape::Option)
    } else {
        None
    }
}

/// Value type stored by a recorder slot: the declared type, `()` when absent,
/// wrapped into `Result<_, genmock::Error>` for fallible members.
pub fn effective_type(output: Option<&Type>, throwing: bool) -> Type {
    let ty: Type = match output {
        Some(ty) => ty.clone(),
        None => parse_quote! { () },
    };

    if throwing {
        parse_quote! { ::std::result::Result<#ty, ::genmock::Error> }
    } else {
        ty
    }
}

/// Positional argument tuple `(A0, A1, ...,)` of the recorded types
pub fn args_tuple<'a, I>(params: I) -> Type
where
    I: IntoIterator<Item = &'a ParameterDescriptor>,
{
    let tys = params.into_iter().map(|p| p.recorded_type());
    parse_quote! { (#(#tys,)*) }
}

/// Generic clause of the mock: the trait's own parameters followed by one
/// parameter per associated type, in declaration order.
pub fn generic_clause(trait_generics: &Generics, assoc: &[AssociatedTypeDescriptor]) -> Generics {
    let mut params: Punctuated<GenericParam, Token![,]> = trait_generics
        .params
        .iter()
        .filter(|p| !matches!(p, GenericParam::Lifetime(_)))
        .cloned()
        .map(|p| match p {
            // defaults would have to trail the associated types
            GenericParam::Type(mut p) => {
                p.eq_token = None;
                p.default = None;
                GenericParam::Type(p)
            }
            GenericParam::Const(mut p) => {
                p.eq_token = None;
                p.default = None;
                GenericParam::Const(p)
            }
            p => p,
        })
        .collect();

    for at in assoc {
        let ident = &at.ident;
        let param: TypeParam = match &at.constraint {
            Some(bound) => parse_quote! { #ident: #bound },
            None => parse_quote! { #ident },
        };
        params.push(GenericParam::Type(param));
    }

    let (lt_token, gt_token) = if params.is_empty() {
        (None, None)
    } else {
        (Some(Default::default()), Some(Default::default()))
    };

    Generics {
        lt_token,
        params,
        gt_token,
        where_clause: trait_generics.where_clause.clone(),
    }
}

/// Identifiers of the type parameters, used for `PhantomData`
pub fn type_param_idents(generics: &Generics) -> Vec<&Ident> {
    generics.type_params().map(|p| &p.ident).collect()
}

/// Applies `T: 'static` bound on every generic parameter
pub fn staticize(generics: Generics) -> Generics {
    let idents = generics
        .type_params()
        .map(|p| p.ident.clone())
        .collect::<Vec<_>>();
    if idents.is_empty() {
        return generics;
    }

    let mut where_clause = generics.where_clause.unwrap_or(WhereClause {
        where_token: <Token![where]>::default(),
        predicates: Punctuated::default(),
    });
    for ident in idents {
        let p: WherePredicate = parse_quote! { #ident: 'static };
        where_clause.predicates.push(p);
    }

    Generics {
        lt_token: generics.lt_token,
        params: generics.params,
        gt_token: generics.gt_token,
        where_clause: Some(where_clause),
    }
}

/// Rewrites `Self`-relative types so they stay valid outside the trait impl:
/// - `Self::Assoc` and `<Self as Trait>::Assoc` -> `Assoc`
/// - `Self` -> the mock type
pub struct Deselfify<'a> {
    pub assoc: Vec<&'a Ident>,
    pub mock_ty: Type,
}

impl Deselfify<'_> {
    pub fn apply(&mut self, mut ty: Type) -> Type {
        self.visit_type_mut(&mut ty);
        ty
    }

    fn is_assoc(&self, ident: &Ident) -> bool {
        self.assoc.iter().any(|a| *a == ident)
    }
}

impl VisitMut for Deselfify<'_> {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if let Type::Path(path) = ty {
            // <Self as Trait>::Assoc
            if_chain! {
                if let Some(qself) = &path.qself;
                if is_self(&qself.ty);
                if path.path.segments.len() == qself.position + 1;
                if let Some(last) = path.path.segments.last();
                if self.is_assoc(&last.ident);
                then {
                    let ident = last.ident.clone();
                    *ty = parse_quote! { #ident };
                    return;
                }
            }

            if path.qself.is_none() {
                let segments = &path.path.segments;
                if segments.len() == 1 && segments[0].ident == "Self" {
                    *ty = self.mock_ty.clone();
                    return;
                }

                // Self::Assoc[::Rest]
                if segments.len() >= 2
                    && segments[0].ident == "Self"
                    && self.is_assoc(&segments[1].ident)
                {
                    path.path.segments = segments.iter().skip(1).cloned().collect();
                    path.path.leading_colon = None;
                }
            }
        }

        visit_mut::visit_type_mut(self, ty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Recorded;
    use quote::{quote, ToTokens};

    fn s<T: ToTokens>(t: T) -> String {
        t.into_token_stream().to_string()
    }

    #[test]
    fn test_split_result() {
        let ty: Type = parse_quote! { Result<String, MyError> };
        assert_eq!(s(split_result(&ty)), "String");

        let ty: Type = parse_quote! { std::io::Result<Vec<u8>> };
        assert_eq!(s(split_result(&ty)), s(quote! { Vec<u8> }));

        let ty: Type = parse_quote! { Option<String> };
        assert!(split_result(&ty).is_none());
    }

    #[test]
    fn test_self_shape() {
        assert_eq!(self_shape(&parse_quote! { Self }), Some(SelfShape::Plain));
        assert_eq!(
            self_shape(&parse_quote! { Result<Self, Error> }),
            Some(SelfShape::Result)
        );
        assert_eq!(
            self_shape(&parse_quote! { Option<Self> }),
            Some(SelfShape::Option)
        );
        assert_eq!(self_shape(&parse_quote! { Vec<Self> }), None);
        assert_eq!(self_shape(&parse_quote! { Self::Item }), None);
    }

    #[test]
    fn test_effective_type() {
        let ty: Type = parse_quote! { String };

        assert_eq!(s(effective_type(Some(&ty), false)), "String");
        assert_eq!(
            s(effective_type(Some(&ty), true)),
            s(quote! { ::std::result::Result<String, ::genmock::Error> })
        );
        assert_eq!(s(effective_type(None, false)), s(quote! { () }));
        assert_eq!(
            s(effective_type(None, true)),
            s(quote! { ::std::result::Result<(), ::genmock::Error> })
        );
    }

    #[test]
    fn test_args_tuple_keeps_order_and_arity() {
        let params = vec![
            ParameterDescriptor {
                ty: parse_quote! { i32 },
                local: parse_quote! { arg0 },
                recorded: Recorded::AsDeclared,
            },
            ParameterDescriptor {
                ty: parse_quote! { &[u8] },
                local: parse_quote! { arg1 },
                recorded: Recorded::Owned(parse_quote! { [u8] }),
            },
        ];

        assert_eq!(
            s(args_tuple(&params)),
            s(quote! { (i32, <[u8] as ::std::borrow::ToOwned>::Owned,) })
        );
        assert_eq!(s(args_tuple(&[])), s(quote! { () }));
    }

    #[test]
    fn test_generic_clause() {
        let trait_generics: Generics = parse_quote! { <'a, K: Hash = String> };
        let assoc = vec![
            AssociatedTypeDescriptor {
                ident: parse_quote! { Item },
                constraint: Some(parse_quote! { Clone }),
            },
            AssociatedTypeDescriptor {
                ident: parse_quote! { Output },
                constraint: None,
            },
        ];

        let generics = generic_clause(&trait_generics, &assoc);
        assert_eq!(s(&generics), s(quote! { <K: Hash, Item: Clone, Output> }));
        assert_eq!(type_param_idents(&generics).len(), 3);
    }

    #[test]
    fn test_empty_generic_clause() {
        let generics = generic_clause(&Generics::default(), &[]);

        assert!(generics.params.is_empty());
        assert_eq!(s(&generics), "");
    }

    #[test]
    fn test_staticize() {
        let generics: Generics = parse_quote! { <T, U: Clone> };
        let generics = staticize(generics);

        assert_eq!(
            s(&generics.where_clause),
            s(quote! { where T: 'static, U: 'static })
        );
    }

    #[test]
    fn test_deselfify() {
        let item: Ident = parse_quote! { Item };
        let mut v = Deselfify {
            assoc: vec![&item],
            mock_ty: parse_quote! { SourceMock<Item> },
        };

        let ty = v.apply(parse_quote! { Option<Self::Item> });
        assert_eq!(s(ty), s(quote! { Option<Item> }));

        let ty = v.apply(parse_quote! { <Self as Source>::Item });
        assert_eq!(s(ty), "Item");

        let ty = v.apply(parse_quote! { Vec<Self> });
        assert_eq!(s(ty), s(quote! { Vec<SourceMock<Item> > }));

        let ty = v.apply(parse_quote! { (Self::Item, String) });
        assert_eq!(s(ty), s(quote! { (Item, String) }));
    }
}
