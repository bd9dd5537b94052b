//! Enumeration of every valid key path of a shape.

use std::collections::BTreeSet;
use std::collections::btree_set;

use super::KeyPath;
use crate::shape::Shape;

/// The set of every valid [`KeyPath`] of a shape.
///
/// Contains intermediate paths as well as leaf paths. Iteration order is
/// the lexicographic order of the segments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSet {
    paths: BTreeSet<KeyPath>,
}

impl PathSet {
    /// Returns `true` if the dotted `path` is a member of the set.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        KeyPath::parse(path).is_ok_and(|parsed| self.paths.contains(&parsed))
    }

    /// Returns `true` if the parsed `path` is a member of the set.
    #[must_use]
    pub fn contains_key_path(&self, path: &KeyPath) -> bool {
        self.paths.contains(path)
    }

    /// Iterates over the paths.
    pub fn iter(&self) -> btree_set::Iter<'_, KeyPath> {
        self.paths.iter()
    }

    /// The number of paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if the set is empty, which is the case for leaf shapes
    /// and empty records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The paths rendered as dotted strings.
    #[must_use]
    pub fn to_strings(&self) -> BTreeSet<String> {
        self.paths.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a KeyPath;
    type IntoIter = btree_set::Iter<'a, KeyPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl IntoIterator for PathSet {
    type Item = KeyPath;
    type IntoIter = btree_set::IntoIter<KeyPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl FromIterator<KeyPath> for PathSet {
    fn from_iter<I: IntoIterator<Item = KeyPath>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

/// Enumerates every valid key path of `shape`.
///
/// Every field contributes its own name. A field whose shape is a record
/// also contributes `name.P` for every path `P` of that record. Arrays and
/// other leaves are not descended into, and optional fields are enumerated
/// like required ones. A leaf shape has no paths.
///
/// # Example
///
/// ```
/// use keylens::path::key_paths;
/// use keylens::shape;
/// use std::collections::BTreeSet;
///
/// let shape = shape!({
///     root: string,
///     foo: { bar: number, baz: { exhausted: { reached: boolean, optional?: string } } },
/// });
///
/// let paths = key_paths(&shape).to_strings();
/// let expected = [
///     "root",
///     "foo",
///     "foo.bar",
///     "foo.baz",
///     "foo.baz.exhausted",
///     "foo.baz.exhausted.reached",
///     "foo.baz.exhausted.optional",
/// ];
/// assert_eq!(paths, expected.into_iter().map(String::from).collect::<BTreeSet<_>>());
/// ```
#[must_use]
pub fn key_paths(shape: &Shape) -> PathSet {
    let Some(record) = shape.as_record() else {
        return PathSet::default();
    };

    let mut paths = BTreeSet::new();
    for field in record.fields() {
        // Invalid field names are reported by `Shape::validate`.
        let Ok(own) = KeyPath::single(field.name()) else {
            continue;
        };
        paths.insert(own);
        for nested in key_paths(field.shape()) {
            paths.insert(nested.prefixed(field.name()));
        }
    }

    PathSet { paths }
}
