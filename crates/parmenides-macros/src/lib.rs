//! Procedural macros for Parmenides.
//!
//! # Overview
//!
//! `#[derive(Bindable)]` builds the field descriptor table that lets
//! query-string and route values be written into a struct by name. The table
//! is a `const`, so nothing is inspected at runtime.
//!
//! # Example
//!
//! ```rust,ignore
//! use parmenides::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize, Bindable)]
//! #[serde(default)]
//! struct SearchRequest {
//!     term: String,
//!     #[param(rename = "max")]
//!     limit: Option<u32>,
//!     #[param(skip)]
//!     filters: Vec<String>,
//! }
//! ```
//!
//! # Field Attributes
//!
//! - `#[param(skip)]`: no descriptor; the field is only filled from the body.
//!   Required for fields whose type is not a scalar.
//! - `#[param(rename = "...")]`: the name matched against query and route keys.
//!
//! Without `param(rename)`, the name serde reads is used: the field's
//! `#[serde(rename = "...")]`, else the struct's `#[serde(rename_all = "...")]`
//! applied to the field name. Descriptor names and JSON keys stay aligned.
//!
//! Every field must tolerate a missing JSON key, since the body may carry
//! only some fields and the query string or route the rest. The derive
//! rejects a struct unless it has `#[serde(default)]`, or each field has
//! `#[serde(default)]`, `#[serde(skip)]` or an `Option` type.
//!
//! # Container Attributes
//!
//! - `#[param(crate = "parmenides::extract")]`: path of the extract crate in
//!   the generated code, for crates that depend only on the facade. Defaults
//!   to `parmenides_extract`.

mod bindable;
mod parse;

use proc_macro::TokenStream;

/// Derives `parmenides_extract::Bindable` for a struct with named fields.
///
/// Every field not marked `#[param(skip)]` gets a descriptor whose setter
/// coerces the raw string through `parmenides_extract::FromParam`.
///
/// # Generated Code
///
/// ```rust,ignore
/// impl parmenides_extract::Bindable for SearchRequest {
///     const FIELDS: &'static [parmenides_extract::FieldDescriptor<Self>] = &[
///         parmenides_extract::FieldDescriptor::new(
///             "term",
///             <String as parmenides_extract::FromParam>::KIND,
///             |target: &mut Self, value: &str| { /* coerce and assign */ },
///         ),
///         // ...
///     ];
/// }
/// ```
#[proc_macro_derive(Bindable, attributes(param))]
pub fn derive_bindable(item: TokenStream) -> TokenStream {
    bindable::expand_bindable(item.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
