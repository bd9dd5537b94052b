//! # keylens
//!
//! Schema-driven key path lenses for nested documents.
//!
//! ## Overview
//!
//! A document's structure is described once, as a [`Shape`](shape::Shape),
//! either by hand, with the [`shape!`] macro, or by deriving
//! [`Shaped`](shape::Shaped) for a struct. From a shape this crate derives:
//!
//! - **Key paths**: every dotted path that addresses a field, see
//!   [`key_paths`](path::key_paths)
//! - **Path types**: the declared type at a path, see
//!   [`resolve`](path::resolve)
//! - **Lenses**: checked `get` and immutable `set` at any of those paths,
//!   see [`Lens`](lens::Lens)
//!
//! Documents are [`Value`](value::Value) trees whose arrays and objects are
//! reference counted, so an update can share every untouched subtree with
//! its input.
//!
//! ## Feature Flags
//!
//! - `derive`: `#[derive(Shaped)]` for structs (default)
//! - `serde`: `Serialize` and `Deserialize` for `Value`
//! - `tracing`: debug events on lens creation and rejected updates
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use keylens::prelude::*;
//! use keylens::{shape, value};
//!
//! let lens = Lens::copy_on_write(shape!({
//!     name: string,
//!     address: { zip?: number, email: { value: string } },
//!     some: { deep: { array: [number] } },
//! }))
//! .unwrap();
//!
//! let original = value!({
//!     name: "yornaath",
//!     address: { zip: 1337, email: { value: "yornaath@example.com" } },
//!     some: { deep: { array: [1, 2, 3] } },
//! });
//!
//! let updated = lens.set(&original, "address.zip", 12).unwrap();
//!
//! assert_eq!(lens.get(&updated, "address.zip").unwrap(), Some(&Value::from(12)));
//! assert_eq!(lens.get(&original, "address.zip").unwrap(), Some(&Value::from(1337)));
//!
//! let array = KeyPath::parse("some.deep.array").unwrap();
//! assert!(updated.pointer(&array).unwrap().ptr_eq(original.pointer(&array).unwrap()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use keylens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::lens::{
        CloneThenSet, CopyOnWrite, Focus, Lens, LensError, Strategy, Updater, cow_lens, lens,
        lens_with,
    };
    pub use crate::path::{KeyPath, PathError, PathSet, PathType, key_paths, resolve};
    pub use crate::shape::{Field, Presence, Shape, ShapeError, Shaped};
    pub use crate::value::Value;

    #[cfg(feature = "derive")]
    pub use keylens_derive::Shaped;
}

pub mod lens;
pub mod path;
pub mod shape;
pub mod split;
pub mod value;

#[doc(hidden)]
pub mod __private {
    /// Strips the `r#` prefix that `stringify!` keeps on raw identifiers.
    #[must_use]
    pub fn unraw(name: &str) -> &str {
        name.strip_prefix("r#").unwrap_or(name)
    }
}

/// Derives [`Shaped`](shape::Shaped) for a struct with named fields.
///
/// Each field contributes a field of the same name whose shape and
/// presence come from the field type's own `Shaped` implementation, so an
/// `Option<T>` field becomes optional.
///
/// # Attributes
///
/// - `#[shaped(rename = "name")]`: use a different field name
/// - `#[shaped(skip)]`: leave the field out of the shape
///
/// # Example
///
/// ```
/// use keylens::Shaped;
///
/// #[derive(Shaped)]
/// struct Profile {
///     name: String,
///     #[shaped(rename = "yearsOld")]
///     age: Option<u32>,
///     #[shaped(skip)]
///     cache: Vec<u8>,
/// }
///
/// let paths = <Profile as keylens::shape::Shaped>::key_paths();
/// assert!(paths.contains("yearsOld"));
/// assert!(!paths.contains("cache"));
/// ```
#[cfg(feature = "derive")]
pub use keylens_derive::Shaped;
