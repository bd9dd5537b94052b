//! Resolution of the type found at a key path.

use std::fmt;

use super::{KeyPath, PathError};
use crate::shape::{Field, PATH_DELIMITER, Presence, Shape};

/// The type found by fully resolving a key path against a shape.
///
/// This is the declared shape of the final field together with its
/// presence. An optional final field renders as `T | undefined`, which is
/// what makes clearing it a legal update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathType<'s> {
    shape: &'s Shape,
    presence: Presence,
    through_optional: bool,
}

impl<'s> PathType<'s> {
    /// The declared shape of the final field.
    #[must_use]
    pub const fn shape(&self) -> &'s Shape {
        self.shape
    }

    /// The presence of the final field.
    #[must_use]
    pub const fn presence(&self) -> Presence {
        self.presence
    }

    /// Returns `true` if the final field is optional.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.presence.is_optional()
    }

    /// Returns `true` if some ancestor on the path is an optional field.
    ///
    /// Reading such a path yields nothing when the ancestor is absent, and
    /// writing it requires the ancestor to be present.
    #[must_use]
    pub const fn crosses_optional(&self) -> bool {
        self.through_optional
    }

    /// Returns `true` if a read at this path can yield nothing.
    #[must_use]
    pub const fn may_be_absent(&self) -> bool {
        self.is_optional() || self.through_optional
    }
}

impl fmt::Display for PathType<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_optional() {
            write!(formatter, "{} | undefined", self.shape)
        } else {
            write!(formatter, "{}", self.shape)
        }
    }
}

/// Resolves the type at the dotted `path` by tokenizing it first.
///
/// The path is split into segments, then each segment is looked up as a
/// field of the record reached by the previous ones.
///
/// # Errors
///
/// Returns a [`PathError`] if the path is malformed, names a missing field,
/// or tries to descend below a leaf. Resolution succeeds exactly for the
/// members of [`key_paths`](super::key_paths).
///
/// # Example
///
/// ```
/// use keylens::path::resolve;
/// use keylens::shape;
///
/// let shape = shape!({ foo: { bar: number, baz: { optional?: string } } });
///
/// assert_eq!(resolve(&shape, "foo.bar").unwrap().to_string(), "number");
/// assert_eq!(resolve(&shape, "foo.baz").unwrap().to_string(), "{ optional?: string }");
/// assert_eq!(
///     resolve(&shape, "foo.baz.optional").unwrap().to_string(),
///     "string | undefined"
/// );
/// assert!(resolve(&shape, "foo.qux").is_err());
/// ```
pub fn resolve<'s>(shape: &'s Shape, path: &str) -> Result<PathType<'s>, PathError> {
    let key_path = KeyPath::parse(path)?;
    resolve_key_path(shape, &key_path)
}

/// Resolves the type at an already parsed [`KeyPath`].
///
/// # Errors
///
/// Returns a [`PathError`] if a segment names a missing field or tries to
/// descend below a leaf.
pub fn resolve_key_path<'s>(shape: &'s Shape, path: &KeyPath) -> Result<PathType<'s>, PathError> {
    let rendered = || path.to_string();
    let (last, ancestors) = path
        .segments()
        .split_last()
        .ok_or(PathError::Empty)?;

    let mut current = shape;
    let mut through_optional = false;
    for segment in ancestors {
        let field = lookup(current, segment, rendered)?;
        through_optional |= field.is_optional();
        current = field.shape();
    }

    let field = lookup(current, last, rendered)?;
    Ok(PathType {
        shape: field.shape(),
        presence: field.presence(),
        through_optional,
    })
}

/// Resolves the type at the dotted `path` by matching its head segment and
/// recursing on the rest.
///
/// Produces exactly the same results as [`resolve`], including errors.
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_recursive<'s>(shape: &'s Shape, path: &str) -> Result<PathType<'s>, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    if path.split(PATH_DELIMITER).any(str::is_empty) {
        return Err(PathError::EmptySegment {
            path: path.to_owned(),
        });
    }
    descend(shape, path, path, false)
}

fn descend<'s>(
    current: &'s Shape,
    path: &str,
    rest: &str,
    through_optional: bool,
) -> Result<PathType<'s>, PathError> {
    let rendered = || path.to_owned();
    match rest.split_once(PATH_DELIMITER) {
        Some((head, tail)) => {
            let field = lookup(current, head, rendered)?;
            descend(
                field.shape(),
                path,
                tail,
                through_optional || field.is_optional(),
            )
        }
        None => {
            let field = lookup(current, rest, rendered)?;
            Ok(PathType {
                shape: field.shape(),
                presence: field.presence(),
                through_optional,
            })
        }
    }
}

fn lookup<'s>(
    current: &'s Shape,
    segment: &str,
    path: impl Fn() -> String,
) -> Result<&'s Field, PathError> {
    match current {
        Shape::Record(record) => record.field(segment).ok_or_else(|| PathError::UnknownField {
            path: path(),
            segment: segment.to_owned(),
        }),
        Shape::Leaf(leaf) => Err(PathError::NotARecord {
            path: path(),
            segment: segment.to_owned(),
            found: leaf.to_string(),
        }),
    }
}
