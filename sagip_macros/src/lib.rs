mod patch;
mod record;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Record)]
// ============================================================================

/// Derive `sagip::Record` for an entity struct.
///
/// # Usage
///
/// ```ignore
/// #[derive(Serialize, Deserialize, Clone, Record)]
/// #[record(collection = "markers")]
/// struct Marker {
///     #[record(id)]
///     pub id: String,
///     pub name: String,
/// }
/// ```
///
/// Both attributes are optional:
/// - Without `#[record(collection = "...")]`, the collection name defaults to
///   the snake_cased struct name with an `s` suffix (`Marker` → `markers`).
/// - Without a `#[record(id)]` field marker, a field named `id` is used.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}

// ============================================================================
// #[derive(Patch)]
// ============================================================================

/// Derive `sagip::PatchOf<Target>` for a patch struct of `Option` fields.
///
/// Every `Option<T>` field that is `Some` is shallow-copied onto the field of
/// the same name on the target record; `None` fields leave the record
/// untouched.
///
/// # Usage
///
/// ```ignore
/// #[derive(Deserialize, Patch)]
/// #[patch(target = Marker)]
/// struct MarkerPatch {
///     pub name: Option<String>,
///     pub latitude: Option<f64>,
/// }
/// ```
#[proc_macro_derive(Patch, attributes(patch))]
pub fn derive_patch(input: TokenStream) -> TokenStream {
    patch::derive_patch(input)
}
