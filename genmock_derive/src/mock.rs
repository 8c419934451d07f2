use crate::context::Context;
use crate::member::{self, Recorder};
use crate::types;

use itertools::{Either, Itertools};
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{
    parse_quote, Generics, Ident, ImplItem, ImplItemFn, Item, ItemImpl, ItemStruct, Path,
    TraitItem, Type, WherePredicate,
};

/// Every item generated next to the trait
#[derive(Debug)]
pub struct Mock {
    members: ItemStruct,
    members_impl: ItemImpl,
    members_debug: ItemImpl,
    statics: Option<(ItemStruct, ItemImpl)>,
    def: ItemStruct,
    self_impl: ItemImpl,
    trait_impl: ItemImpl,
    debug_impl: ItemImpl,
    default_impl: Option<ItemImpl>,
}

impl Mock {
    pub fn from_ast(cx: &Context) -> Self {
        let protocol = &cx.protocol;

        let (function_recorders, static_recorders): (Vec<_>, Vec<_>) =
            protocol.functions.iter().partition_map(|func| {
                let rec = Recorder::for_function(cx, func);
                if func.is_static() {
                    Either::Right(rec)
                } else {
                    Either::Left(rec)
                }
            });
        let instance_recorders = protocol
            .properties
            .iter()
            .map(|prop| Recorder::for_property(cx, prop))
            .chain(function_recorders)
            .collect::<Vec<_>>();

        let (members, members_impl, members_debug) = members_def(cx, &instance_recorders);
        let statics = if static_recorders.is_empty() {
            None
        } else {
            Some(statics_def(cx, &static_recorders))
        };

        let def = mock_def(cx);
        let self_impl = self_impl(cx);
        let trait_impl = trait_impl(cx);
        let debug_impl = debug_impl(cx);
        let default_impl = if protocol.initializers.is_empty() || protocol.inherits("Default") {
            Some(default_impl(cx))
        } else {
            None
        };

        Self {
            members,
            members_impl,
            members_debug,
            statics,
            def,
            self_impl,
            trait_impl,
            debug_impl,
            default_impl,
        }
    }

    fn items(&self) -> Vec<Item> {
        let mut items: Vec<Item> = vec![
            self.members.clone().into(),
            self.members_impl.clone().into(),
            self.members_debug.clone().into(),
        ];
        if let Some((statics, statics_default)) = &self.statics {
            items.push(statics.clone().into());
            items.push(statics_default.clone().into());
        }
        items.push(self.def.clone().into());
        items.push(self.self_impl.clone().into());
        items.push(self.trait_impl.clone().into());
        items.push(self.debug_impl.clone().into());
        if let Some(default_impl) = &self.default_impl {
            items.push(default_impl.clone().into());
        }
        items
    }
}

impl ToTokens for Mock {
    fn to_tokens(&self, dst: &mut TokenStream) {
        for item in self.items() {
            crate::utils::debug_only(item).to_tokens(dst);
        }
    }
}

/// `PhantomData` over every type parameter of the mock, if any
fn phantom(generics: &Generics) -> Option<(Ident, Type)> {
    let generics_ty = types::type_param_idents(generics);
    if generics_ty.is_empty() {
        None
    } else {
        Some((
            parse_quote! { _phantom },
            parse_quote! { ::std::marker::PhantomData<fn() -> (#(#generics_ty,)*)> },
        ))
    }
}

fn members_def(cx: &Context, recorders: &[Recorder]) -> (ItemStruct, ItemImpl, ItemImpl) {
    let vis = cx.protocol.access.shared().visibility();
    let members_ident = &cx.members_ident;
    let (impl_generics, ty_generics, where_clause) = cx.mock_generics.split_for_impl();

    let fields = recorders.iter().map(|rec| rec.field(&vis));
    let inits = recorders.iter().map(|rec| rec.init());
    let (phantom_def, phantom_init) = match phantom(&cx.mock_generics) {
        None => (None, None),
        Some((ident, ty)) => (
            Some(quote! { #ident: #ty, }),
            Some(quote! { #ident: ::std::marker::PhantomData, }),
        ),
    };

    let def = parse_quote! {
        #[allow(dead_code)]
        #vis struct #members_ident #impl_generics #where_clause {
            #(#fields,)*
            #phantom_def
        }
    };

    let new_impl = parse_quote! {
        #[allow(dead_code)]
        impl #impl_generics #members_ident #ty_generics #where_clause {
            #vis fn new() -> Self {
                Self {
                    #(#inits,)*
                    #phantom_init
                }
            }
        }
    };

    let name = members_ident.to_string();
    let debug_fields = recorders.iter().map(|rec| {
        let ident = &rec.ident;
        let field_name = ident.to_string();
        quote! { .field(#field_name, &self.#ident) }
    });
    let debug = parse_quote! {
        impl #impl_generics ::std::fmt::Debug for #members_ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(#name)
                    #(#debug_fields)*
                    .finish()
            }
        }
    };

    (def, new_impl, debug)
}

fn statics_def(cx: &Context, recorders: &[Recorder]) -> (ItemStruct, ItemImpl) {
    let vis = cx.protocol.access.shared().visibility();
    let statics_ident = &cx.statics_ident;
    let (impl_generics, ty_generics, where_clause) = cx.mock_generics.split_for_impl();

    let fields = recorders.iter().map(|rec| rec.field(&vis));
    let inits = recorders.iter().map(|rec| rec.init());
    let (phantom_def, phantom_init) = match phantom(&cx.mock_generics) {
        None => (None, None),
        Some((ident, ty)) => (
            Some(quote! { #ident: #ty, }),
            Some(quote! { #ident: ::std::marker::PhantomData, }),
        ),
    };

    let def = parse_quote! {
        #[allow(dead_code)]
        #vis struct #statics_ident #impl_generics #where_clause {
            #(#fields,)*
            #phantom_def
        }
    };

    let default = parse_quote! {
        impl #impl_generics ::std::default::Default for #statics_ident #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#inits,)*
                    #phantom_init
                }
            }
        }
    };

    (def, default)
}

fn mock_def(cx: &Context) -> ItemStruct {
    let vis = cx.protocol.access.instance().visibility();
    let mock_ident = &cx.mock_ident;
    let members_ident = &cx.members_ident;
    let (impl_generics, ty_generics, where_clause) = cx.mock_generics.split_for_impl();

    parse_quote! {
        #[allow(dead_code)]
        #vis struct #mock_ident #impl_generics #where_clause {
            #vis mocks: #members_ident #ty_generics,
        }
    }
}

fn self_impl(cx: &Context) -> ItemImpl {
    let protocol = &cx.protocol;
    let mock_ident = &cx.mock_ident;
    let members_ident = &cx.members_ident;
    let (impl_generics, ty_generics, where_clause) = cx.mock_generics.split_for_impl();

    let mut items: Vec<ImplItemFn> = Vec::new();

    // a trait with initializers is built through them
    if protocol.initializers.is_empty() {
        let vis = protocol.access.instance().visibility();
        items.push(parse_quote! {
            #vis fn new() -> Self {
                Self {
                    mocks: #members_ident::new(),
                }
            }
        });
    }

    items.extend(
        protocol
            .properties
            .iter()
            .filter_map(|prop| member::property_setter(cx, prop)),
    );

    if protocol.has_static_functions() {
        let vis = protocol.access.shared().visibility();
        let statics_ident = &cx.statics_ident;
        let mut fn_generics: Generics = parse_quote! { <__GenmockR, __GenmockF> };
        {
            let wc = fn_generics.make_where_clause();
            wc.predicates.push(parse_quote! {
                __GenmockF: ::std::ops::FnOnce(&#statics_ident #ty_generics) -> __GenmockR
            });
            for ident in types::type_param_idents(&cx.mock_generics) {
                wc.predicates.push(parse_quote! { #ident: 'static });
            }
        }
        let (fn_generics, _fn_ty_generics, fn_where_clause) = fn_generics.split_for_impl();
        items.push(parse_quote! {
            /// Runs `f` on the receiver-less function recorders of the current thread
            #vis fn statics #fn_generics (f: __GenmockF) -> __GenmockR
            #fn_where_clause
            {
                ::genmock::with_statics::<#statics_ident #ty_generics, __GenmockR, __GenmockF>(f)
            }
        });
    }

    parse_quote! {
        #[allow(dead_code)]
        impl #impl_generics #mock_ident #ty_generics #where_clause {
            #(#items)*
        }
    }
}

fn trait_impl(cx: &Context) -> ItemImpl {
    let protocol = &cx.protocol;
    let mock_ident = &cx.mock_ident;
    let trait_attrs = &protocol.attrs;
    let trait_unsafety = &protocol.unsafety;
    let trait_ident = &protocol.ident;
    let (_trait_impl_generics, trait_ty_generics, _trait_where_clause) =
        protocol.generics.split_for_impl();

    let mut generics = cx.mock_generics.clone();
    if protocol.has_static_functions() {
        generics = types::staticize(generics);
    }
    add_assoc_bounds(cx, &mut generics);
    let (impl_generics, _impl_ty_generics, where_clause) = generics.split_for_impl();
    let (_mock_impl_generics, ty_generics, _mock_where_clause) = cx.mock_generics.split_for_impl();

    let mut items: Vec<ImplItem> = Vec::new();
    for at in &protocol.associated_types {
        let ident = &at.ident;
        items.push(parse_quote! { type #ident = #ident; });
    }
    items.extend(
        protocol
            .constants
            .iter()
            .map(|cst| ImplItem::Const(member::constant_impl(cst))),
    );
    items.extend(
        protocol
            .initializers
            .iter()
            .map(|init| ImplItem::Fn(member::initializer_impl(cx, init))),
    );
    items.extend(
        protocol
            .properties
            .iter()
            .map(|prop| ImplItem::Fn(member::property_impl(prop))),
    );
    items.extend(
        protocol
            .functions
            .iter()
            .map(|func| ImplItem::Fn(member::function_impl(cx, func))),
    );

    let trait_path: Path = parse_quote! { #trait_ident #trait_ty_generics };
    parse_quote! {
        #(#trait_attrs)*
        #trait_unsafety impl #impl_generics #trait_path for #mock_ident #ty_generics #where_clause {
            #(#items)*
        }
    }
}

/// Bounds of associated types past the first one go to the where clause of
/// the trait impl, the generic parameters themselves keep only the first.
fn add_assoc_bounds(cx: &Context, generics: &mut Generics) {
    let predicates = cx
        .trait_def
        .items
        .iter()
        .filter_map(|item| match item {
            TraitItem::Type(item) if item.bounds.len() > 1 => Some(item),
            _ => None,
        })
        .map(|item| {
            let ident = &item.ident;
            let bounds = item
                .bounds
                .iter()
                .skip(1)
                .cloned()
                .map(|bound| cx.deselfify_bound(bound));
            parse_quote! { #ident: #(#bounds)+* }
        })
        .collect::<Vec<WherePredicate>>();

    if !predicates.is_empty() {
        generics.make_where_clause().predicates.extend(predicates);
    }
}

fn debug_impl(cx: &Context) -> ItemImpl {
    let mock_ident = &cx.mock_ident;
    let name = mock_ident.to_string();
    let (impl_generics, ty_generics, where_clause) = cx.mock_generics.split_for_impl();

    parse_quote! {
        impl #impl_generics ::std::fmt::Debug for #mock_ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(#name)
                    .field("mocks", &self.mocks)
                    .finish()
            }
        }
    }
}

fn default_impl(cx: &Context) -> ItemImpl {
    let mock_ident = &cx.mock_ident;
    let members_ident = &cx.members_ident;
    let (impl_generics, ty_generics, where_clause) = cx.mock_generics.split_for_impl();

    parse_quote! {
        impl #impl_generics ::std::default::Default for #mock_ident #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    mocks: #members_ident::new(),
                }
            }
        }
    }
}
