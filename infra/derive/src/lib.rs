#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros used across the bix workspace.
//! Currently this is the `#[bix_error]` attribute that wires error enums into `thiserror`
//! and adds `.context(...)` support.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for crate-level error enums.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and for
///   `Result<T, SourceError>` of every variant that wraps a source.
/// * `From<SourceError>` for every variant with a `source` field (or a field marked
///   `#[source]`/`#[from]`).
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }`
///   variant exists.
/// * A module-private `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// * Applied to an enum with named-field variants only.
/// * Variants with a source must carry `context: Option<Cow<'static, str>>`.
/// * One annotated enum per module (the `format_context` helper is module scoped).
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[bix_derive::bix_error]
/// pub enum ExecError {
///     #[error("Failed to spawn{}: {source}", format_context(.context))]
///     Spawn { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn spawn() -> Result<(), ExecError> {
///     std::process::Command::new("docker").status().context("docker --version")?;
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn bix_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
