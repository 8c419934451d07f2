mod attribute;
mod context;
mod descriptor;
mod diagnostic;
mod expand;
mod inspect;
mod member;
mod mock;
mod symbols;
mod types;
mod utils;
mod validate;

use proc_macro::TokenStream;
use quote::quote;

/// Generates, next to a trait, a mock struct implementing it whose members
/// route through `genmock::MockMember` recorders.
///
/// Generated items are only compiled with `debug_assertions` on.
///
/// ## Example
/// ```ignore
/// #[genmock::generate_mock]
/// pub trait Greeter {
///     #[genmock(property)]
///     fn name(&self) -> String;
///
///     fn greet(&self, times: i32) -> String;
/// }
///
/// #[test]
/// fn test_ok() {
///     let mock = GreeterMock::new();
///     mock.set_name("Ferris".to_owned());
///     mock.mocks.greet.returns_with(|(times,)| "hi".repeat(*times as usize));
///
///     assert_eq!(mock.name(), "Ferris");
///     assert_eq!(mock.greet(2), "hihi");
///     assert_eq!(mock.mocks.greet.calls(), vec![(2,)]);
/// }
/// ```
///
/// ## Arguments
/// - `rename = "Name"`: name of the mock struct, `<Trait>Mock` by default
///
/// ## Item attributes
/// - `#[genmock(property)]`: accessor recorded as a property, with a `set_<name>` setter
/// - `#[genmock(default)]`: the default body is kept instead of being mocked
/// - `#[genmock(default = <expr>)]`: value of a constant
#[proc_macro_attribute]
pub fn generate_mock(args: TokenStream, input: TokenStream) -> TokenStream {
    let input = proc_macro2::TokenStream::from(input);
    match expand::generate_mock_impl(args.into(), input.clone()) {
        Ok(output) => output.into(),
        Err(diag) => {
            let item = expand::fallback(input);
            let error = diag.emit_as_item_tokens();
            let output = quote! {
                #item
                #error
            };
            output.into()
        }
    }
}
