use crate::attribute::{self, DefaultAttribute, GenmockAttribute};
use crate::descriptor::{
    Access, AssociatedTypeDescriptor, ConstantDescriptor, FunctionDescriptor,
    InitializerDescriptor, ParameterDescriptor, PropertyDescriptor, ProtocolDescriptor,
};
use crate::{symbols, types, validate};

use quote::format_ident;
use syn::{
    Attribute, Expr, FnArg, Generics, ItemTrait, Path, ReturnType, TraitItem,
    TraitItemConst, TraitItemFn, TraitItemType, TypeParamBound, WherePredicate,
};

/// Helper attributes found on one trait item
#[derive(Default)]
struct ItemFlags {
    property: bool,
    keep_default: bool,
    value: Option<Expr>,
}

impl ItemFlags {
    fn parse(attrs: &[Attribute]) -> Result<Self, syn::Error> {
        let mut flags = ItemFlags::default();
        for attr in attribute::parse_helper_attrs(attrs)? {
            match attr {
                GenmockAttribute::Property(_) => flags.property = true,
                GenmockAttribute::Default(DefaultAttribute::Flag(_)) => flags.keep_default = true,
                GenmockAttribute::Default(DefaultAttribute::Expr(_, expr)) => {
                    flags.value = Some(expr)
                }
                GenmockAttribute::Rename(attr) => {
                    return Err(syn::Error::new_spanned(
                        attr.ident,
                        "`rename` is only allowed on the trait",
                    ))
                }
            }
        }
        Ok(flags)
    }
}

/// Attributes other than `#[genmock(...)]`
pub fn other_attrs(attrs: &[Attribute]) -> Vec<Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path() != symbols::GENMOCK)
        .cloned()
        .collect()
}

/// Builds the descriptor of `trait_def`, members kept in declaration order
/// within each kind.
pub fn inspect(trait_def: &ItemTrait) -> Result<ProtocolDescriptor, syn::Error> {
    validate::validate_trait(trait_def)?;

    let mut desc = ProtocolDescriptor {
        ident: trait_def.ident.clone(),
        access: Access::from_visibility(&trait_def.vis),
        attrs: other_attrs(&trait_def.attrs),
        unsafety: trait_def.unsafety,
        generics: trait_generics(&trait_def.generics),
        properties: Vec::new(),
        functions: Vec::new(),
        associated_types: Vec::new(),
        initializers: Vec::new(),
        constants: Vec::new(),
        inherited: inherited(trait_def),
    };

    for item in &trait_def.items {
        match item {
            TraitItem::Fn(item) => inspect_fn(&mut desc, item)?,
            TraitItem::Type(item) => desc.associated_types.push(associated_type(item)?),
            TraitItem::Const(item) => {
                if let Some(cst) = constant(item)? {
                    desc.constants.push(cst);
                }
            }
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "unsupported trait item, only functions, types and constants can be mocked",
                ))
            }
        }
    }

    Ok(desc)
}

fn trait_generics(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    if let Some(wc) = &mut generics.where_clause {
        // `where Self: Bound` is a supertrait in disguise
        wc.predicates = wc
            .predicates
            .iter()
            .filter(|pred| match pred {
                WherePredicate::Type(pred) => !types::is_self(&pred.bounded_ty),
                _ => true,
            })
            .cloned()
            .collect();
    }
    generics
}

fn inherited(trait_def: &ItemTrait) -> Vec<Path> {
    let self_bounds = trait_def
        .generics
        .where_clause
        .iter()
        .flat_map(|wc| wc.predicates.iter())
        .filter_map(|pred| match pred {
            WherePredicate::Type(pred) if types::is_self(&pred.bounded_ty) => Some(&pred.bounds),
            _ => None,
        })
        .flatten();

    trait_def
        .supertraits
        .iter()
        .chain(self_bounds)
        .filter_map(|bound| match bound {
            TypeParamBound::Trait(tr) => Some(tr.path.clone()),
            _ => None,
        })
        .collect()
}

fn inspect_fn(desc: &mut ProtocolDescriptor, item: &TraitItemFn) -> Result<(), syn::Error> {
    let flags = ItemFlags::parse(&item.attrs)?;
    if let Some(value) = &flags.value {
        return Err(syn::Error::new_spanned(
            value,
            "`default = ...` is only allowed on constants",
        ));
    }
    if flags.keep_default {
        if item.default.is_none() {
            return Err(syn::Error::new_spanned(
                &item.sig,
                "`#[genmock(default)]` requires a default implementation",
            ));
        }
        // the trait's own body is used
        return Ok(());
    }

    validate::validate_signature(&item.sig)?;

    if flags.property {
        desc.properties.push(property(item)?);
        return Ok(());
    }

    let receiver = item.sig.receiver().cloned();
    if receiver.is_none() {
        if let ReturnType::Type(_, ty) = &item.sig.output {
            if let Some(shape) = types::self_shape(ty) {
                desc.initializers.push(InitializerDescriptor {
                    attrs: other_attrs(&item.attrs),
                    sig: item.sig.clone(),
                    shape,
                });
                return Ok(());
            }
        }
    }

    desc.functions.push(function(item, receiver)?);
    Ok(())
}

fn property(item: &TraitItemFn) -> Result<PropertyDescriptor, syn::Error> {
    let sig = &item.sig;
    let by_ref = matches!(
        sig.receiver(),
        Some(r) if r.reference.is_some() && r.mutability.is_none() && r.colon_token.is_none()
    );
    if !by_ref || sig.inputs.len() != 1 {
        return Err(syn::Error::new_spanned(
            sig,
            "properties must take `&self` and no other arguments",
        ));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "properties can't be async",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "properties can't have generic parameters",
        ));
    }

    let declared = match &sig.output {
        ReturnType::Type(_, ty) => &**ty,
        ReturnType::Default => {
            return Err(syn::Error::new_spanned(
                sig,
                "properties must declare a type",
            ))
        }
    };
    validate::check_output(declared)?;

    let (ty, throwing) = match types::split_result(declared) {
        Some(ok) => (ok.clone(), true),
        None => (declared.clone(), false),
    };

    Ok(PropertyDescriptor {
        attrs: other_attrs(&item.attrs),
        sig: sig.clone(),
        ident: sig.ident.clone(),
        ty,
        throwing,
    })
}

fn function(
    item: &TraitItemFn,
    receiver: Option<syn::Receiver>,
) -> Result<FunctionDescriptor, syn::Error> {
    let sig = &item.sig;
    let params = sig
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Receiver(_) => None,
            FnArg::Typed(arg) => Some(arg),
        })
        .enumerate()
        .map(|(i, arg)| {
            Ok(ParameterDescriptor {
                ty: (*arg.ty).clone(),
                local: format_ident!("arg{}", i),
                recorded: validate::recorded_arg(&arg.ty)?,
            })
        })
        .collect::<Result<Vec<_>, syn::Error>>()?;

    let (output, throwing) = match &sig.output {
        ReturnType::Default => (None, false),
        ReturnType::Type(_, ty) => {
            validate::check_output(ty)?;
            match types::split_result(ty) {
                Some(ok) => (Some(ok.clone()), true),
                None => (Some((**ty).clone()), false),
            }
        }
    };

    Ok(FunctionDescriptor {
        attrs: other_attrs(&item.attrs),
        sig: sig.clone(),
        ident: sig.ident.clone(),
        receiver,
        params,
        output,
        throwing,
    })
}

fn associated_type(item: &TraitItemType) -> Result<AssociatedTypeDescriptor, syn::Error> {
    let flags = ItemFlags::parse(&item.attrs)?;
    if flags.property || flags.keep_default || flags.value.is_some() {
        return Err(syn::Error::new_spanned(
            item,
            "associated types become generic parameters of the mock and take no attributes",
        ));
    }
    if let Some(param) = item.generics.params.first() {
        return Err(syn::Error::new_spanned(
            param,
            "generic associated types are not supported",
        ));
    }

    // Only the first bound is carried over
    let constraint = item.bounds.first().cloned();

    Ok(AssociatedTypeDescriptor {
        ident: item.ident.clone(),
        constraint,
    })
}

fn constant(item: &TraitItemConst) -> Result<Option<ConstantDescriptor>, syn::Error> {
    let flags = ItemFlags::parse(&item.attrs)?;
    if flags.property || flags.keep_default {
        return Err(syn::Error::new_spanned(
            item,
            "constants only accept `#[genmock(default = ...)]`",
        ));
    }
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "generic constants are not supported",
        ));
    }

    match (flags.value, &item.default) {
        (Some(value), _) => Ok(Some(ConstantDescriptor {
            attrs: other_attrs(&item.attrs),
            ident: item.ident.clone(),
            ty: item.ty.clone(),
            value,
        })),
        // the trait's own value is used
        (None, Some(_)) => Ok(None),
        (None, None) => Err(syn::Error::new_spanned(
            item,
            "missing value, use `#[genmock(default = ...)]` or a default",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Recorded, SelfShape};
    use quote::ToTokens;
    use syn::parse_quote;

    fn s<T: ToTokens>(t: T) -> String {
        t.into_token_stream().to_string()
    }

    #[test]
    fn test_greeter() {
        let t: ItemTrait = parse_quote! {
            pub trait Greeter {
                #[genmock(property)]
                fn name(&self) -> String;
                fn greet(&self, times: i32) -> Result<String, GreetError>;
            }
        };
        let desc = inspect(&t).unwrap();

        assert_eq!(desc.ident, "Greeter");
        assert_eq!(desc.access, Access::Public);
        assert_eq!(desc.properties.len(), 1);
        assert_eq!(desc.properties[0].ident, "name");
        assert!(!desc.properties[0].throwing);
        assert!(desc.properties[0].has_setter());

        assert_eq!(desc.functions.len(), 1);
        let greet = &desc.functions[0];
        assert!(greet.throwing);
        assert!(!greet.is_static());
        assert_eq!(s(&greet.output), "String");
        assert_eq!(greet.params.len(), 1);
        assert_eq!(greet.params[0].local, "arg0");
        assert!(desc.initializers.is_empty());
        assert!(desc.associated_types.is_empty());
    }

    #[test]
    fn test_throwing_property_has_no_setter() {
        let t: ItemTrait = parse_quote! {
            trait Session {
                #[genmock(property)]
                fn token(&self) -> std::io::Result<String>;
            }
        };
        let desc = inspect(&t).unwrap();

        assert_eq!(desc.access, Access::Internal);
        assert!(desc.properties[0].throwing);
        assert!(!desc.properties[0].has_setter());
        assert_eq!(s(&desc.properties[0].ty), "String");
    }

    #[test]
    fn test_source_order_per_kind() {
        let t: ItemTrait = parse_quote! {
            trait Trait {
                fn c(&self);
                #[genmock(property)]
                fn b(&self) -> u8;
                fn a(&self);
                #[genmock(property)]
                fn z(&self) -> u8;
            }
        };
        let desc = inspect(&t).unwrap();

        let props = desc.properties.iter().map(|p| p.ident.to_string()).collect::<Vec<_>>();
        let funcs = desc.functions.iter().map(|f| f.ident.to_string()).collect::<Vec<_>>();
        assert_eq!(props, vec!["b", "z"]);
        assert_eq!(funcs, vec!["c", "a"]);
    }

    #[test]
    fn test_parameters_renamed_positionally() {
        let t: ItemTrait = parse_quote! {
            trait Trait {
                fn f(&mut self, first: i32, _: String, mut third: &str);
            }
        };
        let desc = inspect(&t).unwrap();
        let params = &desc.functions[0].params;

        let locals = params.iter().map(|p| p.local.to_string()).collect::<Vec<_>>();
        assert_eq!(locals, vec!["arg0", "arg1", "arg2"]);
        assert!(matches!(params[0].recorded, Recorded::AsDeclared));
        assert!(matches!(params[2].recorded, Recorded::Owned(_)));
    }

    #[test]
    fn test_initializers_and_statics() {
        let t: ItemTrait = parse_quote! {
            trait Client {
                fn new() -> Self;
                fn connect(url: &str) -> Result<Self, Error> where Self: Sized;
                fn parse(s: &str) -> Option<Self>;
                fn version() -> u32;
                fn all() -> Vec<Self>;
            }
        };
        let desc = inspect(&t).unwrap();

        let shapes = desc.initializers.iter().map(|i| i.shape).collect::<Vec<_>>();
        assert_eq!(
            shapes,
            vec![SelfShape::Plain, SelfShape::Result, SelfShape::Option]
        );
        let statics = desc.static_functions().map(|f| f.ident.to_string()).collect::<Vec<_>>();
        assert_eq!(statics, vec!["version", "all"]);
        assert!(desc.has_static_functions());
    }

    #[test]
    fn test_associated_types_keep_first_constraint() {
        let t: ItemTrait = parse_quote! {
            trait Source {
                type Item: Clone + std::fmt::Debug;
                type Raw;
            }
        };
        let desc = inspect(&t).unwrap();

        assert_eq!(desc.associated_types.len(), 2);
        assert_eq!(s(&desc.associated_types[0].constraint), "Clone");
        assert!(desc.associated_types[1].constraint.is_none());
    }

    #[test]
    fn test_supertraits() {
        let t: ItemTrait = parse_quote! {
            trait Trait: std::fmt::Debug + Send + 'static where Self: Default {}
        };
        let desc = inspect(&t).unwrap();

        assert_eq!(desc.inherited.len(), 3);
        assert!(desc.inherits("Debug"));
        assert!(desc.inherits("Default"));
        assert!(!desc.inherits("Clone"));
        assert!(desc.generics.where_clause.unwrap().predicates.is_empty());
    }

    #[test]
    fn test_default_kept() {
        let t: ItemTrait = parse_quote! {
            trait Trait {
                fn f1(&self);
                #[genmock(default)]
                fn f2(&self) { self.f1() }
                fn f3(&self) { self.f1() }
            }
        };
        let desc = inspect(&t).unwrap();

        let funcs = desc.functions.iter().map(|f| f.ident.to_string()).collect::<Vec<_>>();
        assert_eq!(funcs, vec!["f1", "f3"]);
    }

    #[test]
    fn test_constants() {
        let t: ItemTrait = parse_quote! {
            trait Trait {
                #[genmock(default = 16)]
                const MAX: usize;
                const MIN: usize = 1;
            }
        };
        let desc = inspect(&t).unwrap();

        assert_eq!(desc.constants.len(), 1);
        assert_eq!(desc.constants[0].ident, "MAX");
        assert_eq!(s(&desc.constants[0].value), "16");
    }

    #[test]
    fn test_errors() {
        let cases: Vec<ItemTrait> = vec![
            parse_quote! { trait T { const C: i32; } },
            parse_quote! { trait T { #[genmock(default)] fn f(&self); } },
            parse_quote! { trait T { #[genmock(property)] fn p(&self, x: i32) -> i32; } },
            parse_quote! { trait T { #[genmock(property)] fn p(&mut self) -> i32; } },
            parse_quote! { trait T { #[genmock(property)] fn p(&self); } },
            parse_quote! { trait T { #[genmock(rename = "X")] fn f(&self); } },
            parse_quote! { trait T { type Item<'a>; } },
            parse_quote! { trait T { fn f(&self) -> &str; } },
            parse_quote! { trait T { fn f<T>(&self, t: T); } },
            parse_quote! { trait T { m!(); } },
        ];

        for case in cases {
            assert!(inspect(&case).is_err(), "accepted: {}", s(&case));
        }
    }
}
