//! Derive macro for keylens shapes.
//!
//! This crate provides `#[derive(Shaped)]`, which describes a struct with
//! named fields as a keylens record shape. It is re-exported by `keylens`
//! under the `derive` feature; depend on that crate instead of this one.
//!
//! # Example
//!
//! ```rust,ignore
//! use keylens::Shaped;
//! use keylens::shape::Shaped as _;
//!
//! #[derive(Shaped)]
//! struct Address {
//!     street: String,
//!     zip: Option<u32>,
//! }
//!
//! #[derive(Shaped)]
//! struct Profile {
//!     name: String,
//!     address: Address,
//! }
//!
//! // Generated:
//! // impl ::keylens::shape::Shaped for Profile {
//! //     fn shape() -> ::keylens::shape::Shape { ... }
//! // }
//!
//! assert!(Profile::key_paths().contains("address.zip"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod shaped;

use proc_macro::TokenStream;

/// Derive macro for describing a struct as a keylens record shape.
///
/// Each named field becomes a record field. Its shape and presence come
/// from `<FieldType as Shaped>`, so `Option<T>` fields are optional and
/// nested `Shaped` structs become nested records.
///
/// # Requirements
///
/// - The type must be a struct with named fields
/// - Every field type must implement `Shaped`
///
/// # Attributes
///
/// - `#[shaped(rename = "name")]` on a field: use `name` as the field name
/// - `#[shaped(skip)]` on a field: leave the field out of the shape
///
/// # Generics
///
/// Each field type gets a `Shaped` bound in the generated impl's where
/// clause:
///
/// ```rust,ignore
/// #[derive(Shaped)]
/// struct Envelope<T> {
///     id: u64,
///     payload: T,
/// }
///
/// // impl<T> Shaped for Envelope<T> where u64: Shaped, T: Shaped { ... }
/// ```
#[proc_macro_derive(Shaped, attributes(shaped))]
pub fn derive_shaped(input: TokenStream) -> TokenStream {
    shaped::derive_shaped_impl(input)
}
