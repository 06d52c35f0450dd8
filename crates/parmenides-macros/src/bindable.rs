//! `#[derive(Bindable)]` expansion.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Path};

use crate::parse::{BindableField, BindableStruct};

/// Expands `#[derive(Bindable)]`.
///
/// 1. Parse the struct and its field attributes
/// 2. Generate one descriptor per writable field
/// 3. Emit the `Bindable` impl with the descriptor table as a const
pub fn expand_bindable(item: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = syn::parse2(item)?;
    let target = BindableStruct::parse(input)?;

    let ident = &target.ident;
    let (impl_generics, ty_generics, where_clause) = target.generics.split_for_impl();
    let krate = &target.krate;
    let descriptors = target
        .fields
        .iter()
        .map(|field| generate_descriptor(krate, field));

    Ok(quote! {
        impl #impl_generics #krate::Bindable for #ident #ty_generics #where_clause {
            const FIELDS: &'static [#krate::FieldDescriptor<Self>] = &[
                #(#descriptors),*
            ];
        }
    })
}

fn generate_descriptor(krate: &Path, field: &BindableField) -> TokenStream {
    let BindableField { ident, ty, name } = field;

    quote! {
        #krate::FieldDescriptor::new(
            #name,
            <#ty as #krate::FromParam>::KIND,
            |target: &mut Self, value: &str| -> ::core::result::Result<(), #krate::CoercionError> {
                target.#ident = <#ty as #krate::FromParam>::from_param(value)?;
                ::core::result::Result::Ok(())
            },
        )
    }
}
