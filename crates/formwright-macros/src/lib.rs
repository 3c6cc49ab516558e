//! # formwright-macros
//!
//! Procedural macros for formwright.
//!
//! `#[derive(Record)]` implements `formwright_forms::Record` for a struct
//! with named fields, building the field descriptor table from the field
//! types and the `#[record(...)]` / `#[form(...)]` attributes.
//!
//! This crate is independent of the other formwright crates because
//! proc-macro crates cannot depend on crates that use them.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod record;

/// Derives `formwright_forms::Record`.
///
/// Struct attributes, all optional:
///
/// - `#[record(name = "...")]` overrides the record name used for headlines.
/// - `#[record(crate = "...")]` sets the path of the forms crate, e.g.
///   `formwright::forms` when only the facade is a dependency.
///
/// Field attributes, all optional:
///
/// - `key = "..."`: external key, defaults to the field name
/// - `attrs = "..."`: the attribute string
/// - `label = "..."`, `suffix = "..."`: overrides
/// - `skip`: same as `attrs = "-"`
///
/// Fields that are not `pub` are listed but never rendered.
///
/// ```ignore
/// #[derive(Record)]
/// pub struct EntryForm {
///     #[form(attrs = "subtype='select',size='1'")]
///     pub department: String,
///     #[form(key = "check_this", suffix = "without consequence")]
///     pub check_this: bool,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record, form))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::derive_record_impl(input).into()
}
