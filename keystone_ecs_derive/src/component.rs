use syn::{Attribute, DeriveInput, Path, Token};
use syn::punctuated::Punctuated;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

pub fn impl_component(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let capabilities = match parse_capabilities(&ast.attrs) {
        Ok(capabilities) => capabilities,
        Err(err) => return err.to_compile_error().into(),
    };

    let casts = capabilities.iter().map(|capability| {
        quote! {
            impl #impl_generics keystone_ecs::components::CastTo<dyn #capability> for #name #ty_generics #where_clause {
                #[inline(always)]
                fn cast_ref(&self) -> &(dyn #capability + 'static) {
                    self
                }

                #[inline(always)]
                fn cast_mut(&mut self) -> &mut (dyn #capability + 'static) {
                    self
                }
            }
        }
    });

    let gen: TokenStream2 = quote! {
        impl #impl_generics keystone_ecs::components::Component for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn describe(capabilities: &mut keystone_ecs::components::Capabilities<Self>) {
                #(capabilities.provide::<dyn #capabilities>();)*
            }
        }

        #(#casts)*
    };
    gen.into()
}

fn parse_capabilities(attrs: &[Attribute]) -> syn::Result<Vec<Path>> {
    let mut capabilities = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path.is_ident("capabilities")) {
        let paths = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
        capabilities.extend(paths);
    }
    Ok(capabilities)
}
