//! Derive macros for scenebind-rs. Use `#[derive(Entity)]`, `#[derive(Behavior)]` and `#[derive(Asset)]`
//! so you don't need to write `impl Classified for T` by hand.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Container-entity newtype over `EntityRef`: `#[derive(Entity)] struct Spawner(EntityRef);`.
/// The struct must have exactly one field, tuple or named.
#[proc_macro_derive(Entity)]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let build = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => quote! { Self(entity) },
            Fields::Named(fields) if fields.named.len() == 1 => {
                let field = &fields.named[0].ident;
                quote! { Self { #field: entity } }
            }
            _ => {
                return syn::Error::new_spanned(
                    name,
                    "#[derive(Entity)] needs a struct with exactly one EntityRef field",
                )
                .to_compile_error()
                .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "#[derive(Entity)] only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let expanded = quote! {
        impl #impl_generics ::scenebind_rs::Classified for #name #ty_generics #where_clause {
            fn concrete_type() -> ::scenebind_rs::ConcreteType {
                ::scenebind_rs::ConcreteType::entity::<Self>()
            }
        }

        impl #impl_generics ::scenebind_rs::EntityKind for #name #ty_generics #where_clause {
            fn from_target(target: &::scenebind_rs::Target) -> ::std::option::Option<Self> {
                target.as_entity().map(|entity| #build)
            }
        }
    };
    TokenStream::from(expanded)
}

/// Attachable behavior. The type must also implement `Default`.
#[proc_macro_derive(Behavior)]
pub fn derive_behavior(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let expanded = quote! {
        impl #impl_generics ::scenebind_rs::Classified for #name #ty_generics #where_clause {
            fn concrete_type() -> ::scenebind_rs::ConcreteType {
                ::scenebind_rs::ConcreteType::behavior::<Self>()
            }
        }

        impl #impl_generics ::scenebind_rs::Behavior for #name #ty_generics #where_clause {}
    };
    TokenStream::from(expanded)
}

/// Catalog resource loadable with `Binder::bind_resource`.
#[proc_macro_derive(Asset)]
pub fn derive_asset(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let expanded = quote! {
        impl #impl_generics ::scenebind_rs::Classified for #name #ty_generics #where_clause {
            fn concrete_type() -> ::scenebind_rs::ConcreteType {
                ::scenebind_rs::ConcreteType::asset::<Self>()
            }
        }

        impl #impl_generics ::scenebind_rs::Asset for #name #ty_generics #where_clause {}
    };
    TokenStream::from(expanded)
}
