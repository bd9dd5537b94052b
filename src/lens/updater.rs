//! Immutable update strategies.
//!
//! An [`Updater`] produces a new document with one path written, leaving
//! the input untouched. Two interchangeable strategies are provided:
//!
//! - [`CloneThenSet`]: copies the whole document, then writes into the copy.
//!   Nothing is shared between input and output.
//! - [`CopyOnWrite`]: copies only the objects on the way from the root to
//!   the target. Every other subtree is shared with the input.
//!
//! Both produce equal documents; they differ only in which nodes are
//! pointer-equal to the input. [`Strategy`] selects one at runtime.
//!
//! # Example
//!
//! ```
//! use keylens::lens::{CloneThenSet, CopyOnWrite, Updater};
//! use keylens::path::KeyPath;
//! use keylens::value;
//!
//! let root = value!({ a: { x: 1 }, b: { y: 2 } });
//! let path = KeyPath::parse("a.x").unwrap();
//!
//! let copied = CloneThenSet.put(&root, &path, Some(value!(10))).unwrap();
//! let shared = CopyOnWrite.put(&root, &path, Some(value!(10))).unwrap();
//!
//! assert_eq!(copied, shared);
//! assert!(!copied.field("b").unwrap().ptr_eq(root.field("b").unwrap()));
//! assert!(shared.field("b").unwrap().ptr_eq(root.field("b").unwrap()));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::path::KeyPath;
use crate::value::Value;

/// A strategy for writing a value at a path without mutating the input.
pub trait Updater {
    /// Returns a new document equal to `root` except at `path`, which holds
    /// `value`, or is removed when `value` is `None`.
    ///
    /// Every ancestor of `path` must be present in `root` and be an object.
    /// The returned document is never pointer-equal to `root`.
    ///
    /// # Errors
    ///
    /// Returns an [`UpdateError`] if an ancestor is missing or not an object.
    fn put(&self, root: &Value, path: &KeyPath, value: Option<Value>) -> Result<Value, UpdateError>;
}

/// Deep-copies the document, then writes into the copy.
///
/// Simple, but allocates the whole document on every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloneThenSet;

impl Updater for CloneThenSet {
    fn put(&self, root: &Value, path: &KeyPath, value: Option<Value>) -> Result<Value, UpdateError> {
        let mut result = root.deep_clone();
        // Every node of the copy is uniquely owned, so the write below
        // never clones again.
        write(&mut result, path, 0, value)?;
        Ok(result)
    }
}

/// Copies only the spine from the root to the target.
///
/// Untouched subtrees stay shared with the input, so an update costs
/// allocations proportional to the path depth and the width of the objects
/// on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyOnWrite;

impl Updater for CopyOnWrite {
    fn put(&self, root: &Value, path: &KeyPath, value: Option<Value>) -> Result<Value, UpdateError> {
        let mut result = root.clone();
        write(&mut result, path, 0, value)?;
        Ok(result)
    }
}

/// Writes `value` at `path[depth..]` below `node`, cloning each shared
/// object on the way.
fn write(
    node: &mut Value,
    path: &KeyPath,
    depth: usize,
    value: Option<Value>,
) -> Result<(), UpdateError> {
    let Value::Object(map) = node else {
        return Err(UpdateError::NotAnObject {
            path: ancestor(path, depth),
            found: node.kind(),
        });
    };
    let map = Arc::make_mut(map);
    let segments = path.segments();
    let segment = &segments[depth];

    if depth + 1 == segments.len() {
        match value {
            Some(value) => {
                map.insert(segment.clone(), value);
            }
            None => {
                map.remove(segment);
            }
        }
        return Ok(());
    }

    match map.get_mut(segment) {
        Some(child) => write(child, path, depth + 1, value),
        None => Err(UpdateError::MissingAncestor {
            path: ancestor(path, depth + 1),
        }),
    }
}

/// Renders the first `depth` segments of `path`.
fn ancestor(path: &KeyPath, depth: usize) -> String {
    path.segments()[..depth].join(".")
}

impl<U: Updater + ?Sized> Updater for &U {
    fn put(&self, root: &Value, path: &KeyPath, value: Option<Value>) -> Result<Value, UpdateError> {
        (**self).put(root, path, value)
    }
}

impl<U: Updater + ?Sized> Updater for Box<U> {
    fn put(&self, root: &Value, path: &KeyPath, value: Option<Value>) -> Result<Value, UpdateError> {
        (**self).put(root, path, value)
    }
}

impl<U: Updater + ?Sized> Updater for Arc<U> {
    fn put(&self, root: &Value, path: &KeyPath, value: Option<Value>) -> Result<Value, UpdateError> {
        (**self).put(root, path, value)
    }
}

/// A runtime choice between the provided update strategies.
///
/// Parses from `"clone"`, `"clone-then-set"`, `"cow"` or `"copy-on-write"`,
/// so the strategy can come from configuration.
///
/// # Example
///
/// ```
/// use keylens::lens::Strategy;
///
/// let strategy: Strategy = "cow".parse().unwrap();
/// assert_eq!(strategy, Strategy::CopyOnWrite);
/// assert_eq!(strategy.to_string(), "copy-on-write");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// See [`CloneThenSet`].
    CloneThenSet,
    /// See [`CopyOnWrite`].
    #[default]
    CopyOnWrite,
}

impl Updater for Strategy {
    fn put(&self, root: &Value, path: &KeyPath, value: Option<Value>) -> Result<Value, UpdateError> {
        match self {
            Self::CloneThenSet => CloneThenSet.put(root, path, value),
            Self::CopyOnWrite => CopyOnWrite.put(root, path, value),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CloneThenSet => formatter.write_str("clone-then-set"),
            Self::CopyOnWrite => formatter.write_str("copy-on-write"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "clone" | "clone-then-set" => Ok(Self::CloneThenSet),
            "cow" | "copy-on-write" => Ok(Self::CopyOnWrite),
            other => Err(ParseStrategyError {
                name: other.to_owned(),
            }),
        }
    }
}

/// An unrecognised [`Strategy`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError {
    /// The name that failed to parse.
    pub name: String,
}

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unknown update strategy `{}`; expected `clone-then-set` or `copy-on-write`",
            self.name
        )
    }
}

impl std::error::Error for ParseStrategyError {}

/// Errors raised while writing into a document.
///
/// These arise when the document does not match the shape the path was
/// resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// An ancestor of the target is absent, typically an optional record.
    MissingAncestor {
        /// The dotted path of the missing ancestor.
        path: String,
    },
    /// An ancestor of the target is not an object.
    NotAnObject {
        /// The dotted path of the ancestor; empty for the root.
        path: String,
        /// What was found instead.
        found: &'static str,
    },
}

impl fmt::Display for UpdateError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAncestor { path } => {
                write!(formatter, "cannot write below `{path}`: it is absent")
            }
            Self::NotAnObject { path, found } if path.is_empty() => {
                write!(formatter, "cannot write into the root: it is {found}, not an object")
            }
            Self::NotAnObject { path, found } => {
                write!(formatter, "cannot write below `{path}`: it is {found}, not an object")
            }
        }
    }
}

impl std::error::Error for UpdateError {}
