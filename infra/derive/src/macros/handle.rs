use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemStruct;

pub fn expand_handle(input: ItemStruct) -> TokenStream {
    if !matches!(input.fields, syn::Fields::Named(_)) {
        return syn::Error::new_spanned(&input, "shared_handle requires a struct with named fields")
            .to_compile_error();
    }

    let wrapper_ident = &input.ident;
    let vis = &input.vis;
    let fields = &input.fields;
    let attrs = &input.attrs;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let inner_ident = format_ident!("{wrapper_ident}Inner");
    let inner_doc = format!("Shared state behind [`{wrapper_ident}`].");

    quote! {
        #[doc = #inner_doc]
        #[derive(Debug)]
        #vis struct #inner_ident #generics #where_clause #fields

        #(#attrs)*
        #[derive(Debug)]
        #vis struct #wrapper_ident #generics #where_clause {
            inner: std::sync::Arc<#inner_ident #ty_generics>,
        }

        #[automatically_derived]
        impl #impl_generics Clone for #wrapper_ident #ty_generics #where_clause {
            fn clone(&self) -> Self {
                Self { inner: std::sync::Arc::clone(&self.inner) }
            }
        }

        impl #impl_generics #wrapper_ident #ty_generics #where_clause {
            /// Wraps the inner state into a shared handle.
            pub fn new(inner: #inner_ident #ty_generics) -> Self {
                Self { inner: std::sync::Arc::new(inner) }
            }

            /// Returns `true` when both handles point at the same state.
            #[must_use]
            pub fn ptr_eq(&self, other: &Self) -> bool {
                std::sync::Arc::ptr_eq(&self.inner, &other.inner)
            }
        }

        #[automatically_derived]
        impl #impl_generics std::ops::Deref for #wrapper_ident #ty_generics #where_clause {
            type Target = #inner_ident #ty_generics;
            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }
    }
}
