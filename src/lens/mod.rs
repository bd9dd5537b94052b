//! Path-indexed lenses over nested documents.
//!
//! A [`Lens`] is bound to one [`Shape`]. It knows the shape's [`PathSet`]
//! and resolves every path against the shape before touching a document,
//! so an update with a path outside the set, or with a value of the wrong
//! shape, is rejected before any work is done. Updates never mutate their
//! input: each `set` returns a new document, produced by the lens's
//! [`Updater`].
//!
//! # Laws
//!
//! For every path `p` in the lens's path set and every value `v` that
//! conforms to the type at `p`:
//!
//! 1. **PutGet**: `lens.get(&lens.set(&root, p, v)?, p)? == Some(&v)`
//! 2. **GetPut**: `lens.set(&root, p, lens.get(&root, p)?.clone())? == root`
//!    when the value at `p` is present
//! 3. **PutPut**: `lens.set(&lens.set(&root, p, v1)?, p, v2)? == lens.set(&root, p, v2)?`
//!
//! # Example
//!
//! ```
//! use keylens::lens::Lens;
//! use keylens::value::Value;
//! use keylens::{shape, value};
//!
//! let lens = Lens::copy_on_write(shape!({
//!     name: string,
//!     age?: number,
//!     address: { street: string, zip?: number },
//! }))
//! .unwrap();
//!
//! let original = value!({ name: "Killa", age: 42, address: { street: "Klimov Street" } });
//!
//! let updated = lens.set(&original, "address.zip", 12).unwrap();
//! assert_eq!(lens.get(&updated, "address.zip").unwrap(), Some(&Value::from(12)));
//! assert_eq!(lens.get(&original, "address.zip").unwrap(), None);
//!
//! // `age` is optional, so it can be cleared.
//! let cleared = lens.unset(&updated, "age").unwrap();
//! assert_eq!(lens.get(&cleared, "age").unwrap(), None);
//!
//! // Paths outside the path set and ill-shaped values are rejected.
//! assert!(lens.set(&original, "address.country", "RU").is_err());
//! assert!(lens.set(&original, "age", "old").is_err());
//! ```

mod factory;
mod updater;

pub use factory::{cow_lens, lens, lens_with};
pub use updater::{CloneThenSet, CopyOnWrite, ParseStrategyError, Strategy, UpdateError, Updater};

use std::fmt;

use crate::path::{KeyPath, PathError, PathSet, PathType, key_paths, resolve_key_path};
use crate::shape::{Shape, ShapeError};
use crate::value::{ShapeMismatch, Value};

/// A `{get, set}` capability over documents of one shape.
///
/// The lens holds its shape, the derived path set and an update strategy.
/// It holds no document state; every operation is a pure function of its
/// arguments.
#[derive(Debug, Clone)]
pub struct Lens<U = CopyOnWrite> {
    shape: Shape,
    paths: PathSet,
    updater: U,
}

impl<U: Updater> Lens<U> {
    /// Creates a lens for `shape` using `updater` for writes.
    ///
    /// The shape is validated and its path set derived once, here.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if the shape is malformed.
    pub fn new(shape: Shape, updater: U) -> Result<Self, ShapeError> {
        shape.validate()?;
        let paths = key_paths(&shape);
        #[cfg(feature = "tracing")]
        tracing::debug!(paths = paths.len(), shape = %shape, "created lens");
        Ok(Self {
            shape,
            paths,
            updater,
        })
    }

    /// The shape this lens is bound to.
    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Every valid path of the shape.
    #[must_use]
    pub const fn key_paths(&self) -> &PathSet {
        &self.paths
    }

    /// The update strategy.
    #[must_use]
    pub const fn updater(&self) -> &U {
        &self.updater
    }

    /// Resolves the type at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LensError::Path`] if `path` is not in the path set.
    pub fn resolve(&self, path: &str) -> Result<PathType<'_>, LensError> {
        Ok(self.focus(path)?.path_type)
    }

    /// Resolves `path` once, returning a [`Focus`] that can read and write
    /// it any number of times without resolving again.
    ///
    /// # Errors
    ///
    /// Returns [`LensError::Path`] if `path` is not in the path set.
    pub fn focus(&self, path: &str) -> Result<Focus<'_, U>, LensError> {
        let key_path = KeyPath::parse(path)?;
        self.focus_key_path(key_path)
    }

    /// Like [`focus`](Self::focus), for an already parsed path.
    ///
    /// # Errors
    ///
    /// Returns [`LensError::Path`] if `path` is not in the path set.
    pub fn focus_key_path(&self, path: KeyPath) -> Result<Focus<'_, U>, LensError> {
        let path_type = resolve_key_path(&self.shape, &path)?;
        Ok(Focus {
            lens: self,
            path,
            path_type,
        })
    }

    /// Reads the value at `path`.
    ///
    /// Returns `Ok(None)` when the field, or an optional ancestor, is
    /// absent. A document whose ancestor at `path` is not an object also
    /// reads as `Ok(None)`, where [`Lens::set`] reports
    /// [`UpdateError::NotAnObject`]; use [`Lens::check`] to tell an absent
    /// field from an ill-shaped document.
    ///
    /// # Errors
    ///
    /// Returns [`LensError::Path`] if `path` is not in the path set.
    pub fn get<'v>(&self, root: &'v Value, path: &str) -> Result<Option<&'v Value>, LensError> {
        Ok(self.focus(path)?.get(root))
    }

    /// Returns a new document with `value` written at `path`.
    ///
    /// # Errors
    ///
    /// - [`LensError::Path`] if `path` is not in the path set
    /// - [`LensError::TypeMismatch`] if `value` does not conform to the type
    ///   at `path`
    /// - [`LensError::Update`] if `root` does not have the lens's shape
    pub fn set(&self, root: &Value, path: &str, value: impl Into<Value>) -> Result<Value, LensError> {
        self.focus(path)?.set(root, value)
    }

    /// Returns a new document with the optional field at `path` removed.
    ///
    /// # Errors
    ///
    /// As [`set`](Self::set), plus [`LensError::NotOptional`] if the field at
    /// `path` is required.
    pub fn unset(&self, root: &Value, path: &str) -> Result<Value, LensError> {
        self.focus(path)?.unset(root)
    }

    /// Writes `Some(value)` or removes the field for `None`.
    ///
    /// # Errors
    ///
    /// See [`set`](Self::set) and [`unset`](Self::unset).
    pub fn put(&self, root: &Value, path: &str, value: Option<Value>) -> Result<Value, LensError> {
        self.focus(path)?.put(root, value)
    }

    /// Replaces the value at `path` with the result of `function` applied to
    /// the current value.
    ///
    /// # Errors
    ///
    /// See [`put`](Self::put).
    ///
    /// # Example
    ///
    /// ```
    /// use keylens::lens::Lens;
    /// use keylens::value::Value;
    /// use keylens::{shape, value};
    ///
    /// let lens = Lens::copy_on_write(shape!({ count: number })).unwrap();
    /// let root = value!({ count: 1 });
    ///
    /// let incremented = lens
    ///     .modify(&root, "count", |count| {
    ///         count.and_then(Value::as_f64).map(|count| Value::from(count + 1.0))
    ///     })
    ///     .unwrap();
    /// assert_eq!(incremented, value!({ count: 2 }));
    /// ```
    pub fn modify<F>(&self, root: &Value, path: &str, function: F) -> Result<Value, LensError>
    where
        F: FnOnce(Option<&Value>) -> Option<Value>,
    {
        self.focus(path)?.modify(root, function)
    }

    /// Checks a whole document against the lens's shape.
    ///
    /// # Errors
    ///
    /// Returns [`LensError::Document`] describing the first mismatch.
    pub fn check(&self, root: &Value) -> Result<(), LensError> {
        root.conforms_to(&self.shape).map_err(LensError::Document)
    }
}

/// A path resolved against a [`Lens`].
///
/// Obtained from [`Lens::focus`]. Reading and writing through a focus never
/// fails with a path error.
#[derive(Debug)]
pub struct Focus<'l, U> {
    lens: &'l Lens<U>,
    path: KeyPath,
    path_type: PathType<'l>,
}

// Only the lens reference is shared, so `U` needs no `Clone` bound.
impl<U> Clone for Focus<'_, U> {
    fn clone(&self) -> Self {
        Self {
            lens: self.lens,
            path: self.path.clone(),
            path_type: self.path_type,
        }
    }
}

impl<'l, U: Updater> Focus<'l, U> {
    /// The focused path.
    #[must_use]
    pub const fn path(&self) -> &KeyPath {
        &self.path
    }

    /// The type at the focused path.
    #[must_use]
    pub const fn path_type(&self) -> PathType<'l> {
        self.path_type
    }

    /// Reads the focused value.
    ///
    /// Returns `None` when the field, or an optional ancestor, is absent,
    /// and also when an ancestor is not an object. See [`Lens::get`].
    #[must_use]
    pub fn get<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        root.pointer(&self.path)
    }

    /// Returns a new document with `value` written at the focused path.
    ///
    /// # Errors
    ///
    /// - [`LensError::TypeMismatch`] if `value` does not conform
    /// - [`LensError::Update`] if `root` does not have the lens's shape
    pub fn set(&self, root: &Value, value: impl Into<Value>) -> Result<Value, LensError> {
        self.put(root, Some(value.into()))
    }

    /// Returns a new document with the focused optional field removed.
    ///
    /// # Errors
    ///
    /// - [`LensError::NotOptional`] if the focused field is required
    /// - [`LensError::Update`] if `root` does not have the lens's shape
    pub fn unset(&self, root: &Value) -> Result<Value, LensError> {
        self.put(root, None)
    }

    /// Writes `Some(value)` or removes the field for `None`.
    ///
    /// # Errors
    ///
    /// See [`set`](Self::set) and [`unset`](Self::unset).
    pub fn put(&self, root: &Value, value: Option<Value>) -> Result<Value, LensError> {
        self.check_slot(value.as_ref())?;
        self.lens
            .updater
            .put(root, &self.path, value)
            .map_err(|error| self.rejected(LensError::Update(error)))
    }

    /// Replaces the focused value with the result of `function`.
    ///
    /// # Errors
    ///
    /// See [`put`](Self::put).
    pub fn modify<F>(&self, root: &Value, function: F) -> Result<Value, LensError>
    where
        F: FnOnce(Option<&Value>) -> Option<Value>,
    {
        let replacement = function(self.get(root));
        self.put(root, replacement)
    }

    fn check_slot(&self, value: Option<&Value>) -> Result<(), LensError> {
        match value {
            Some(value) => value.conforms_to(self.path_type.shape()).map_err(|mismatch| {
                self.rejected(LensError::TypeMismatch {
                    path: self.path.to_string(),
                    expected: self.path_type.to_string(),
                    mismatch,
                })
            }),
            None if self.path_type.is_optional() => Ok(()),
            None => Err(self.rejected(LensError::NotOptional {
                path: self.path.to_string(),
            })),
        }
    }

    #[cfg_attr(not(feature = "tracing"), allow(clippy::unused_self))]
    fn rejected(&self, error: LensError) -> LensError {
        #[cfg(feature = "tracing")]
        tracing::trace!(path = %self.path, %error, "rejected update");
        error
    }
}

/// Errors returned by [`Lens`] and [`Focus`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LensError {
    /// The path is malformed or not in the lens's path set.
    Path(PathError),
    /// The value does not conform to the type at the path.
    TypeMismatch {
        /// The target path.
        path: String,
        /// The type at the path.
        expected: String,
        /// Where and how the value differs from it.
        mismatch: ShapeMismatch,
    },
    /// A required field cannot be removed.
    NotOptional {
        /// The target path.
        path: String,
    },
    /// The document does not have the lens's shape along the path.
    Update(UpdateError),
    /// The document does not conform to the lens's shape.
    Document(ShapeMismatch),
}

impl fmt::Display for LensError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(error) => write!(formatter, "{error}"),
            Self::TypeMismatch {
                path,
                expected,
                mismatch,
            } => write!(
                formatter,
                "value for `{path}` is not a `{expected}`: {mismatch}"
            ),
            Self::NotOptional { path } => {
                write!(formatter, "field `{path}` is required and cannot be unset")
            }
            Self::Update(error) => write!(formatter, "{error}"),
            Self::Document(mismatch) => write!(formatter, "document does not conform: {mismatch}"),
        }
    }
}

impl std::error::Error for LensError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Path(error) => Some(error),
            Self::TypeMismatch { mismatch, .. } | Self::Document(mismatch) => Some(mismatch),
            Self::Update(error) => Some(error),
            Self::NotOptional { .. } => None,
        }
    }
}

impl From<PathError> for LensError {
    fn from(error: PathError) -> Self {
        Self::Path(error)
    }
}

impl From<UpdateError> for LensError {
    fn from(error: UpdateError) -> Self {
        Self::Update(error)
    }
}

static_assertions::assert_impl_all!(Lens<CopyOnWrite>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Lens<CloneThenSet>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Lens<Strategy>: Send, Sync, Clone);
static_assertions::assert_impl_all!(LensError: std::error::Error, Send, Sync);
