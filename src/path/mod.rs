//! Dotted key paths: parsing, enumeration and type resolution.
//!
//! - [`KeyPath`]: a parsed, non-empty sequence of field names
//! - [`key_paths`]: enumerates every valid path of a shape (the [`PathSet`])
//! - [`resolve`] and [`resolve_recursive`]: find the [`PathType`] at a path
//!
//! # Example
//!
//! ```
//! use keylens::path::{key_paths, resolve};
//! use keylens::shape;
//!
//! let profile = shape!({ name: string, address: { zip?: number } });
//!
//! let paths: Vec<String> = key_paths(&profile).iter().map(ToString::to_string).collect();
//! assert_eq!(paths, vec!["address", "address.zip", "name"]);
//!
//! let zip = resolve(&profile, "address.zip").unwrap();
//! assert_eq!(zip.to_string(), "number | undefined");
//! ```

mod key_paths;
mod resolve;

pub use key_paths::{PathSet, key_paths};
pub use resolve::{PathType, resolve, resolve_key_path, resolve_recursive};

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::shape::PATH_DELIMITER;
use crate::split::split;

/// A non-empty, ordered sequence of field names.
///
/// Rendered canonically as the segments joined with `.`.
///
/// # Example
///
/// ```
/// use keylens::path::KeyPath;
///
/// let path = KeyPath::parse("address.email.value").unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.head(), "address");
/// assert_eq!(path.last(), "value");
/// assert_eq!(path.to_string(), "address.email.value");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPath {
    segments: SmallVec<[String; 4]>,
}

impl KeyPath {
    /// Parses a dotted path string.
    ///
    /// # Errors
    ///
    /// - [`PathError::Empty`] for the empty string
    /// - [`PathError::EmptySegment`] when two delimiters are adjacent or the
    ///   path starts or ends with a delimiter
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        if path.ends_with(PATH_DELIMITER) {
            return Err(PathError::EmptySegment {
                path: path.to_owned(),
            });
        }
        let segments = split(path, PATH_DELIMITER);
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(PathError::EmptySegment {
                path: path.to_owned(),
            });
        }
        Ok(Self {
            segments: segments.into_iter().map(str::to_owned).collect(),
        })
    }

    /// Creates a single-segment path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptySegment`] if `name` is empty or contains the
    /// delimiter.
    pub fn single(name: impl Into<String>) -> Result<Self, PathError> {
        let name = name.into();
        if name.is_empty() || name.contains(PATH_DELIMITER) {
            return Err(PathError::EmptySegment { path: name });
        }
        let mut segments = SmallVec::new();
        segments.push(name);
        Ok(Self { segments })
    }

    /// Returns a new path with `name` appended.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::EmptySegment`] if `name` is empty or contains the
    /// delimiter.
    pub fn child(&self, name: impl Into<String>) -> Result<Self, PathError> {
        let name = name.into();
        if name.is_empty() || name.contains(PATH_DELIMITER) {
            return Err(PathError::EmptySegment {
                path: format!("{self}{PATH_DELIMITER}{name}"),
            });
        }
        let mut segments = self.segments.clone();
        segments.push(name);
        Ok(Self { segments })
    }

    /// Returns the path prefixed with `name`.
    pub(crate) fn prefixed(&self, name: &str) -> Self {
        let mut segments = SmallVec::with_capacity(self.segments.len() + 1);
        segments.push(name.to_owned());
        segments.extend(self.segments.iter().cloned());
        Self { segments }
    }

    /// The path without its last segment, or `None` for a single segment.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        let segments = self.segments[..self.segments.len() - 1]
            .iter()
            .cloned()
            .collect();
        Some(Self { segments })
    }

    /// The first segment.
    #[must_use]
    pub fn head(&self) -> &str {
        &self.segments[0]
    }

    /// The last segment.
    #[must_use]
    pub fn last(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// All segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The number of segments. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; a key path has at least one segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `true` if `self` is `other` or one of its ancestors.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.segments.starts_with(&self.segments)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                formatter.write_str(PATH_DELIMITER)?;
            }
            formatter.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = PathError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Self::parse(path)
    }
}

impl TryFrom<&str> for KeyPath {
    type Error = PathError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        Self::parse(path)
    }
}

/// Errors produced while parsing or resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path string is empty.
    Empty,
    /// The path contains an empty segment.
    EmptySegment {
        /// The offending path.
        path: String,
    },
    /// A segment does not name a field of the record reached so far.
    UnknownField {
        /// The full path being resolved.
        path: String,
        /// The segment that was not found.
        segment: String,
    },
    /// A segment tries to descend below a leaf.
    NotARecord {
        /// The full path being resolved.
        path: String,
        /// The segment that could not be looked up.
        segment: String,
        /// The leaf reached before `segment`, rendered as a type.
        found: String,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => formatter.write_str("empty key path"),
            Self::EmptySegment { path } => {
                write!(formatter, "key path `{path}` contains an empty segment")
            }
            Self::UnknownField { path, segment } => {
                write!(formatter, "key path `{path}`: no field named `{segment}`")
            }
            Self::NotARecord {
                path,
                segment,
                found,
            } => write!(
                formatter,
                "key path `{path}`: cannot look up `{segment}` in `{found}`"
            ),
        }
    }
}

impl std::error::Error for PathError {}
