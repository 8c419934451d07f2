use crate::descriptor::Recorded;

use syn::visit::Visit;
use syn::{visit, GenericParam, ItemTrait, Lifetime, Signature, Type, TypeImplTrait, TypeReference};

pub fn validate_trait(trait_def: &ItemTrait) -> Result<(), syn::Error> {
    if let Some(lt) = trait_def.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lt,
            "lifetime parameters on mocked traits are not supported",
        ));
    }
    Ok(())
}

pub fn validate_signature(sig: &Signature) -> Result<(), syn::Error> {
    check_generic_func(sig)?;
    check_impl_trait(sig)?;
    Ok(())
}

/// Decides how an argument of type `ty` is recorded
pub fn recorded_arg(ty: &Type) -> Result<Recorded, syn::Error> {
    match ty {
        Type::Reference(r) => {
            check_owned(&r.elem)?;
            Ok(Recorded::Owned((*r.elem).clone()))
        }
        ty => {
            check_owned(ty)?;
            Ok(Recorded::AsDeclared)
        }
    }
}

/// Checks that a returned value can be stored by a recorder
pub fn check_output(ty: &Type) -> Result<(), syn::Error> {
    check_owned(ty)
}

fn check_generic_func(sig: &Signature) -> Result<(), syn::Error> {
    match sig
        .generics
        .params
        .iter()
        .find(|p| !matches!(p, GenericParam::Lifetime(_)))
    {
        Some(p) => Err(syn::Error::new_spanned(
            p,
            "generic methods are not supported",
        )),
        None => Ok(()),
    }
}

fn check_impl_trait(sig: &Signature) -> Result<(), syn::Error> {
    let mut vis = ImplTraitVisitor::default();
    vis.visit_signature(sig);
    vis.result
}

fn check_owned(ty: &Type) -> Result<(), syn::Error> {
    let mut vis = BorrowVisitor::default();
    vis.visit_type(ty);
    vis.result
}

struct ImplTraitVisitor {
    result: Result<(), syn::Error>,
}

impl Default for ImplTraitVisitor {
    fn default() -> Self {
        Self { result: Ok(()) }
    }
}

impl<'ast> Visit<'ast> for ImplTraitVisitor {
    fn visit_type_impl_trait(&mut self, i: &'ast TypeImplTrait) {
        if self.result.is_ok() {
            self.result = Err(syn::Error::new_spanned(
                i,
                "`impl Trait` is not supported, use a concrete or boxed type instead",
            ));
        }
    }
}

/// Rejects borrowed data a recorder can't keep
struct BorrowVisitor {
    result: Result<(), syn::Error>,
}

impl Default for BorrowVisitor {
    fn default() -> Self {
        Self { result: Ok(()) }
    }
}

impl<'ast> Visit<'ast> for BorrowVisitor {
    fn visit_type_reference(&mut self, i: &'ast TypeReference) {
        if i.lifetime.is_none() && self.result.is_ok() {
            self.result = Err(syn::Error::new_spanned(
                i,
                "borrowed data is only supported as a plain `&T` argument, use `&'static` or an owned type",
            ));
        }
        visit::visit_type_reference(self, i);
    }

    fn visit_lifetime(&mut self, i: &'ast Lifetime) {
        if i.ident != "static" && self.result.is_ok() {
            self.result = Err(syn::Error::new_spanned(
                i,
                "non-'static lifetimes are not supported in recorded types",
            ));
        }
    }
}
