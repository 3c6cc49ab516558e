//! `#[derive(Record)]` implementation.
//!
//! Generates an implementation of `formwright_forms::Record` whose `fields`
//! method pairs one `FieldDescriptor` per struct field with the field's
//! current value.

use darling::{FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::DeriveInput;

/// Struct-level attributes from `#[record(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
pub struct RecordOpts {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub data: darling::ast::Data<(), RecordFieldOpts>,

    /// Record name override.
    #[darling(default)]
    pub name: Option<String>,

    /// Path of the forms crate in generated code.
    #[darling(default, rename = "crate")]
    pub krate: Option<syn::Path>,
}

/// Per-field attributes from `#[form(...)]`.
#[derive(Debug, FromField)]
#[darling(attributes(form))]
pub struct RecordFieldOpts {
    pub ident: Option<syn::Ident>,
    pub ty: syn::Type,
    pub vis: syn::Visibility,

    /// External key.
    #[darling(default)]
    pub key: Option<String>,

    /// Attribute string.
    #[darling(default, rename = "attrs")]
    pub attrs_str: Option<String>,

    /// Label override.
    #[darling(default)]
    pub label: Option<String>,

    /// Suffix override.
    #[darling(default)]
    pub suffix: Option<String>,

    /// Excludes the field from rendering.
    #[darling(default)]
    pub skip: bool,
}

/// Generates the `Record` implementation for the struct.
pub fn derive_record_impl(input: DeriveInput) -> TokenStream {
    let opts = match RecordOpts::from_derive_input(&input) {
        Ok(o) => o,
        Err(e) => return e.write_errors(),
    };

    let struct_name = &opts.ident;
    let record_name = opts
        .name
        .clone()
        .unwrap_or_else(|| struct_name.unraw().to_string());
    let krate = opts
        .krate
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(::formwright_forms));

    let Some(fields) = opts.data.as_ref().take_struct() else {
        return syn::Error::new_spanned(struct_name, "#[derive(Record)] only supports structs with named fields")
            .to_compile_error();
    };

    let field_tokens: Vec<TokenStream> = fields
        .fields
        .iter()
        .filter_map(|f| generate_field(f, &krate))
        .collect();

    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    quote! {
        impl #impl_generics #krate::Record for #struct_name #ty_generics #where_clause {
            fn record_name(&self) -> ::std::string::String {
                ::std::string::String::from(#record_name)
            }

            fn fields(&self) -> #krate::FormwrightResult<::std::vec::Vec<#krate::Field>> {
                ::std::result::Result::Ok(::std::vec![
                    #(#field_tokens),*
                ])
            }
        }
    }
}

/// Generates a single `Field` construction expression.
fn generate_field(f: &RecordFieldOpts, krate: &syn::Path) -> Option<TokenStream> {
    let ident = f.ident.as_ref()?;
    let name_str = ident.unraw().to_string();
    let ty = &f.ty;

    let mut chain = Vec::new();
    if let Some(ref key) = f.key {
        chain.push(quote! { .key(#key) });
    }
    if f.skip {
        chain.push(quote! { .attrs("-") });
    } else if let Some(ref attrs) = f.attrs_str {
        chain.push(quote! { .attrs(#attrs) });
    }
    if let Some(ref label) = f.label {
        chain.push(quote! { .label(#label) });
    }
    if let Some(ref suffix) = f.suffix {
        chain.push(quote! { .suffix(#suffix) });
    }
    if !matches!(f.vis, syn::Visibility::Public(_)) {
        chain.push(quote! { .exported(false) });
    }

    Some(quote! {
        #krate::Field::new(
            #krate::FieldDescriptor::new(#name_str, <#ty as #krate::FieldData>::FIELD_TYPE)
                #(#chain)*,
            #krate::FieldData::to_field_value(&self.#ident),
        )
    })
}
