//! Constructors that bind a lens to a shape and an update strategy.

use super::{CloneThenSet, CopyOnWrite, Lens, Updater};
use crate::shape::{Shape, ShapeError, Shaped};

/// Creates a lens for `T` that deep-copies the document on every update.
///
/// # Errors
///
/// Returns a [`ShapeError`] if `T`'s shape is malformed.
///
/// # Example
///
/// ```
/// use keylens::lens::lens;
/// use keylens::shape::{Field, Shape, Shaped};
/// use keylens::value;
///
/// struct Point;
///
/// impl Shaped for Point {
///     fn shape() -> Shape {
///         Shape::record([
///             Field::required("x", Shape::number()),
///             Field::required("y", Shape::number()),
///         ])
///     }
/// }
///
/// let point = lens::<Point>().unwrap();
/// let moved = point.set(&value!({ x: 0, y: 0 }), "x", 3).unwrap();
/// assert_eq!(moved, value!({ x: 3, y: 0 }));
/// ```
pub fn lens<T: Shaped + ?Sized>() -> Result<Lens<CloneThenSet>, ShapeError> {
    Lens::new(T::shape(), CloneThenSet)
}

/// Creates a lens for `T` that copies only the updated spine and shares
/// every other subtree with the input.
///
/// # Errors
///
/// Returns a [`ShapeError`] if `T`'s shape is malformed.
pub fn cow_lens<T: Shaped + ?Sized>() -> Result<Lens<CopyOnWrite>, ShapeError> {
    Lens::new(T::shape(), CopyOnWrite)
}

/// Creates a lens for `T` with a caller-supplied strategy.
///
/// # Errors
///
/// Returns a [`ShapeError`] if `T`'s shape is malformed.
pub fn lens_with<T: Shaped + ?Sized, U: Updater>(updater: U) -> Result<Lens<U>, ShapeError> {
    Lens::new(T::shape(), updater)
}

impl Lens<CloneThenSet> {
    /// Creates a deep-copying lens for `shape`.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if `shape` is malformed.
    pub fn clone_then_set(shape: Shape) -> Result<Self, ShapeError> {
        Self::new(shape, CloneThenSet)
    }
}

impl Lens<CopyOnWrite> {
    /// Creates a structurally sharing lens for `shape`.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if `shape` is malformed.
    pub fn copy_on_write(shape: Shape) -> Result<Self, ShapeError> {
        Self::new(shape, CopyOnWrite)
    }
}

impl<U: Updater + Default> Lens<U> {
    /// Creates a lens for `T` with the default-constructed strategy.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if `T`'s shape is malformed.
    pub fn of<T: Shaped + ?Sized>() -> Result<Self, ShapeError> {
        Self::new(T::shape(), U::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lens::Strategy;
    use crate::shape::{Field, Record};
    use crate::value::Value;

    struct Address;

    impl Shaped for Address {
        fn shape() -> Shape {
            Shape::record([
                Field::required("street", Shape::string()),
                Field::optional("zip", Shape::number()),
            ])
        }
    }

    struct Broken;

    impl Shaped for Broken {
        fn shape() -> Shape {
            Shape::Record(Record::new(vec![Field::required("", Shape::string())]))
        }
    }

    #[test]
    fn test_factories_share_paths() {
        let naive = lens::<Address>().unwrap();
        let cow = cow_lens::<Address>().unwrap();
        let chosen = lens_with::<Address, _>(Strategy::CloneThenSet).unwrap();
        let defaulted = Lens::<Strategy>::of::<Address>().unwrap();

        assert_eq!(naive.key_paths(), cow.key_paths());
        assert_eq!(chosen.key_paths(), defaulted.key_paths());
        assert_eq!(*chosen.updater(), Strategy::CloneThenSet);
        assert_eq!(*defaulted.updater(), Strategy::CopyOnWrite);
    }

    #[test]
    fn test_factories_agree_on_results() {
        let root = Value::object([("street", "Klimov Street")]);
        let naive = lens::<Address>().unwrap().set(&root, "zip", 12).unwrap();
        let cow = cow_lens::<Address>().unwrap().set(&root, "zip", 12).unwrap();
        assert_eq!(naive, cow);
    }

    #[test]
    fn test_factories_reject_malformed_shape() {
        assert!(matches!(lens::<Broken>(), Err(ShapeError::EmptyFieldName { .. })));
        assert!(cow_lens::<Broken>().is_err());
    }
}
