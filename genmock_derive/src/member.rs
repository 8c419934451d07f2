//! Members of the mock: recorder slots, forwarding trait members, setters
//! and inert initializers.

use crate::context::Context;
use crate::descriptor::{
    ConstantDescriptor, FunctionDescriptor, InitializerDescriptor, PropertyDescriptor, SelfShape,
};
use crate::{types, utils};

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse_quote, Expr, Field, FieldValue, FnArg, Ident, ImplItemConst, ImplItemFn, Signature,
    Type, Visibility,
};

/// One `MockMember` slot in a container struct
#[derive(Debug)]
pub struct Recorder {
    pub ident: Ident,
    pub args: Type,
    pub ret: Type,
}

impl Recorder {
    pub fn for_property(cx: &Context, prop: &PropertyDescriptor) -> Self {
        Self {
            ident: prop.ident.clone(),
            args: cx.deselfify(prop.ty.clone()),
            ret: cx.deselfify(types::effective_type(Some(&prop.ty), prop.throwing)),
        }
    }

    pub fn for_function(cx: &Context, func: &FunctionDescriptor) -> Self {
        Self {
            ident: func.ident.clone(),
            args: cx.deselfify(types::args_tuple(&func.params)),
            ret: cx.deselfify(types::effective_type(func.output.as_ref(), func.throwing)),
        }
    }

    pub fn field(&self, vis: &Visibility) -> Field {
        let ident = &self.ident;
        let args = &self.args;
        let ret = &self.ret;
        parse_quote! { #vis #ident: ::genmock::MockMember<#args, #ret> }
    }

    /// Slot initializer, named after its member
    pub fn init(&self) -> FieldValue {
        let ident = &self.ident;
        let name = ident.to_string();
        parse_quote! { #ident: ::genmock::MockMember::new(#name) }
    }
}

/// Wraps an interception into `Ok(..?)` for fallible members
fn forward(call: TokenStream, throwing: bool) -> TokenStream {
    if throwing {
        quote! { ::std::result::Result::Ok(#call?) }
    } else {
        call
    }
}

pub fn property_impl(prop: &PropertyDescriptor) -> ImplItemFn {
    let attrs = &prop.attrs;
    let sig = &prop.sig;
    let ident = &prop.ident;
    let body = forward(quote! { self.mocks.#ident.getter() }, prop.throwing);

    parse_quote! {
        #(#attrs)*
        #sig {
            #body
        }
    }
}

pub fn property_setter(cx: &Context, prop: &PropertyDescriptor) -> Option<ImplItemFn> {
    if !prop.has_setter() {
        return None;
    }

    let vis = cx.protocol.access.instance().visibility();
    let ident = &prop.ident;
    let setter_ident = utils::format_setter_ident(ident);
    let ty = cx.deselfify(prop.ty.clone());

    Some(parse_quote! {
        #vis fn #setter_ident(&self, value: #ty)
        where
            #ty: ::std::clone::Clone,
        {
            self.mocks.#ident.setter(value)
        }
    })
}

/// Declared signature with arguments renamed `arg0..argN`
fn positional_sig(func: &FunctionDescriptor) -> Signature {
    let mut sig = func.sig.clone();
    let typed = sig.inputs.iter_mut().filter_map(|arg| match arg {
        FnArg::Receiver(_) => None,
        FnArg::Typed(arg) => Some(arg),
    });
    for (arg, param) in typed.zip(&func.params) {
        let local = &param.local;
        *arg.pat = parse_quote! { #local };
    }
    sig
}

pub fn function_impl(cx: &Context, func: &FunctionDescriptor) -> ImplItemFn {
    let attrs = &func.attrs;
    let sig = positional_sig(func);
    let ident = &func.ident;
    let args = func.params.iter().map(|p| p.recorded_expr());
    let args = quote! { (#(#args,)*) };

    let call = if func.is_static() {
        let statics_ident = &cx.statics_ident;
        let (_impl_generics, ty_generics, _where_clause) = cx.mock_generics.split_for_impl();
        quote! {
            ::genmock::with_statics(|statics: &#statics_ident #ty_generics| {
                statics.#ident.execute(#args)
            })
        }
    } else {
        quote! { self.mocks.#ident.execute(#args) }
    };
    let body = forward(call, func.throwing);

    parse_quote! {
        #(#attrs)*
        #sig {
            #body
        }
    }
}

/// Inert initializer: arguments are ignored and a fresh mock is built
pub fn initializer_impl(cx: &Context, init: &InitializerDescriptor) -> ImplItemFn {
    let attrs = &init.attrs;
    let sig = &init.sig;
    let members_ident = &cx.members_ident;

    let fresh = quote! { Self { mocks: #members_ident::new() } };
    let body: Expr = match init.shape {
        SelfShape::Plain => parse_quote! { #fresh },
        SelfShape::Result => parse_quote! { ::std::result::Result::Ok(#fresh) },
        SelfShape::Option => parse_quote! { ::std::option::Option::Some(#fresh) },
    };

    parse_quote! {
        #(#attrs)*
        #[allow(unused_variables, unused_mut)]
        #sig {
            #body
        }
    }
}

pub fn constant_impl(cst: &ConstantDescriptor) -> ImplItemConst {
    let attrs = &cst.attrs;
    let ident = &cst.ident;
    let ty = &cst.ty;
    let value = &cst.value;

    parse_quote! {
        #(#attrs)*
        const #ident: #ty = #value;
    }
}
