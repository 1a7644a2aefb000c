use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, FieldsNamed, LitStr};

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named,
            _ => panic!("Record derive only supports structs with named fields"),
        },
        _ => panic!("Record derive only supports structs with named fields"),
    };

    let collection = collection_override(&input.attrs)
        .unwrap_or_else(|| format!("{}s", snake_case(&name.to_string())));
    let id = id_field(fields);

    quote! {
        impl sagip::Record for #name {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> &str {
                &self.#id
            }
        }
    }
    .into()
}

/// The value of `#[record(collection = "...")]`, when present.
fn collection_override(attrs: &[Attribute]) -> Option<String> {
    let mut found = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                found = Some(meta.value()?.parse::<LitStr>()?.value());
            }
            Ok(())
        });
    }
    found
}

/// The field marked `#[record(id)]`, falling back to a field named `id`.
fn id_field(fields: &FieldsNamed) -> syn::Ident {
    let marked = fields.named.iter().find(|field| {
        field.attrs.iter().any(|attr| {
            if !attr.path().is_ident("record") {
                return false;
            }
            let mut hit = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    hit = true;
                }
                Ok(())
            });
            hit
        })
    });
    let named_id = fields
        .named
        .iter()
        .find(|field| field.ident.as_ref().is_some_and(|ident| *ident == "id"));

    marked
        .or(named_id)
        .and_then(|field| field.ident.clone())
        .unwrap_or_else(|| {
            panic!("Record derive needs #[record(id)] on a field or a field named `id`")
        })
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.char_indices() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
