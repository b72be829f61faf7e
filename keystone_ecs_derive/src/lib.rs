mod component;

use proc_macro::TokenStream;
use syn::DeriveInput;

/// Implements `Component` for a type.
///
/// The optional `#[capabilities(TraitA, TraitB)]` attribute lists the traits the component can be
/// queried as. The type must implement each of them.
#[proc_macro_derive(Component, attributes(capabilities))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);
    component::impl_component(&ast)
}
