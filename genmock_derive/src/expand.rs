use crate::context::Context;
use crate::diagnostic;
use crate::mock::Mock;
use crate::utils;

use proc_macro2::TokenStream;
use proc_macro2_diagnostics::Diagnostic;
use quote::{quote, ToTokens};
use syn::{Item, ItemTrait};

pub fn generate_mock_impl(args: TokenStream, input: TokenStream) -> Result<TokenStream, Diagnostic> {
    let item = syn::parse2::<Item>(input)?;
    let trait_def = diagnostic::gate(item).map_err(|(_, err)| err.into_diagnostic())?;
    let p = GenerateMockMacro::from_ast(args, trait_def)?;
    let output = quote! { #p };

    Ok(output)
}

/// What is left in place of the annotated item when expansion fails
pub fn fallback(input: TokenStream) -> TokenStream {
    match syn::parse2::<Item>(input.clone()) {
        Ok(Item::Trait(trait_def)) => utils::strip_helper_attrs(trait_def).into_token_stream(),
        Ok(item) => item.into_token_stream(),
        Err(_) => input,
    }
}

pub struct GenerateMockMacro {
    trait_def: ItemTrait,
    mock: Mock,
}

impl GenerateMockMacro {
    pub fn from_ast(args: TokenStream, trait_def: ItemTrait) -> Result<Self, syn::Error> {
        let cx = Context::from_ast(args, trait_def)?;
        let mock = Mock::from_ast(&cx);

        Ok(Self {
            trait_def: cx.trait_def,
            mock,
        })
    }
}

impl ToTokens for GenerateMockMacro {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.trait_def.to_tokens(tokens);
        self.mock.to_tokens(tokens);
    }
}
