#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the `ResBook` slices.
//!
//! * [`resbook_error`] turns a plain enum into a context-aware `thiserror` error.
//! * [`shared_handle`] turns a struct into a cheaply clonable `Arc` handle.
//!
//! The examples are `ignore`d because a proc-macro crate cannot compile its own consumers.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro for defining slice-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field
///   (or a field marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must also carry the `context` field.
/// 4. Tuple or unit variants are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use resbook_derive::resbook_error;
/// use std::borrow::Cow;
///
/// #[resbook_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(path: &std::path::Path) -> Result<Vec<u8>, StoreError> {
///     std::fs::read(path).context("Reading session document")
/// }
/// ```
#[proc_macro_attribute]
pub fn resbook_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro for shared, reference-counted service handles.
///
/// The annotated struct becomes `<Name>Inner`, and `<Name>` becomes a `Clone` wrapper around
/// `Arc<<Name>Inner>` that dereferences to the inner state. Interior mutability is the inner
/// type's business (locks, atomics).
///
/// # Example
/// ```rust,ignore
/// #[resbook_derive::shared_handle]
/// pub struct Navigator {
///     generation: std::sync::atomic::AtomicU64,
/// }
///
/// let navigator = Navigator::new(NavigatorInner { generation: AtomicU64::new(0) });
/// let clone = navigator.clone(); // same Arc
/// ```
#[proc_macro_attribute]
pub fn shared_handle(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::handle::expand_handle(input).into()
}
