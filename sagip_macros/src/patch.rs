use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, GenericArgument, PathArguments, Type};

pub fn derive_patch(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let target = target_path(&input.attrs)
        .unwrap_or_else(|| panic!("Patch derive needs #[patch(target = RecordType)]"));

    let fields = optional_fields(&input);
    if fields.is_empty() {
        panic!("Patch derive: no Option fields to apply");
    }

    let assignments = fields.iter().map(|field| {
        quote! {
            if let Some(value) = &self.#field {
                record.#field = value.clone();
            }
        }
    });

    quote! {
        impl sagip::PatchOf<#target> for #name {
            fn apply_to(&self, record: &mut #target) {
                #(#assignments)*
            }
        }
    }
    .into()
}

/// The type named by `#[patch(target = ...)]`, when present.
fn target_path(attrs: &[Attribute]) -> Option<syn::Path> {
    let mut found = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("patch")) {
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("target") {
                found = Some(meta.value()?.parse::<syn::Path>()?);
            }
            Ok(())
        });
    }
    found
}

/// Idents of every `Option<_>` field; anything else is left alone.
fn optional_fields(input: &DeriveInput) -> Vec<syn::Ident> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    named
        .iter()
        .filter(|field| is_option(&field.ty))
        .filter_map(|field| field.ident.clone())
        .collect()
}

fn is_option(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    match type_path.path.segments.last() {
        Some(segment) if segment.ident == "Option" => match &segment.arguments {
            PathArguments::AngleBracketed(args) => {
                matches!(args.args.first(), Some(GenericArgument::Type(_)))
            }
            _ => false,
        },
        _ => false,
    }
}
