//! Registering Rust types as shapes.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use super::{Presence, Shape};
use crate::path::{PathSet, key_paths};
use crate::value::Value;

/// A type with a statically known [`Shape`].
///
/// Implemented for the primitive types, strings, sequences and [`Option`].
/// Structs with named fields can derive it with `#[derive(Shaped)]`, which
/// turns every field into a record field and every `Option<T>` field into
/// an optional one.
///
/// # Example
///
/// ```
/// use keylens::shape::{Shape, Shaped};
///
/// assert_eq!(u32::shape(), Shape::number());
/// assert_eq!(Vec::<String>::shape(), Shape::array(Shape::string()));
/// assert!(Option::<bool>::presence().is_optional());
/// ```
pub trait Shaped {
    /// The shape of this type.
    fn shape() -> Shape;

    /// The presence of a field of this type.
    ///
    /// Only [`Option`] overrides this.
    fn presence() -> Presence {
        Presence::Required
    }

    /// Every valid dotted path into this type.
    fn key_paths() -> PathSet {
        key_paths(&Self::shape())
    }
}

macro_rules! impl_shaped_for {
    ($constructor:ident: $($type:ty),+ $(,)?) => {
        $(
            impl Shaped for $type {
                fn shape() -> Shape {
                    Shape::$constructor()
                }
            }
        )+
    };
}

impl_shaped_for!(string: String, str, char);
impl_shaped_for!(boolean: bool);
impl_shaped_for!(
    number: i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);
impl_shaped_for!(null: ());
impl_shaped_for!(any: Value);

impl<T: Shaped> Shaped for Option<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn presence() -> Presence {
        Presence::Optional
    }
}

impl<T: Shaped + ?Sized> Shaped for &T {
    fn shape() -> Shape {
        T::shape()
    }

    fn presence() -> Presence {
        T::presence()
    }
}

impl<T: Shaped + ?Sized> Shaped for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn presence() -> Presence {
        T::presence()
    }
}

impl<T: Shaped + ?Sized> Shaped for Rc<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn presence() -> Presence {
        T::presence()
    }
}

impl<T: Shaped + ?Sized> Shaped for Arc<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn presence() -> Presence {
        T::presence()
    }
}

macro_rules! impl_shaped_for_sequence {
    ($($sequence:ident),+ $(,)?) => {
        $(
            impl<T: Shaped> Shaped for $sequence<T> {
                fn shape() -> Shape {
                    Shape::array(T::shape())
                }
            }
        )+
    };
}

impl_shaped_for_sequence!(Vec, VecDeque, BTreeSet, HashSet);

impl<T: Shaped> Shaped for [T] {
    fn shape() -> Shape {
        Shape::array(T::shape())
    }
}

impl<T: Shaped, const N: usize> Shaped for [T; N] {
    fn shape() -> Shape {
        Shape::array(T::shape())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_shapes() {
        assert_eq!(String::shape(), Shape::string());
        assert_eq!(i64::shape(), Shape::number());
        assert_eq!(f32::shape(), Shape::number());
        assert_eq!(bool::shape(), Shape::boolean());
        assert_eq!(<()>::shape(), Shape::null());
        assert_eq!(Value::shape(), Shape::any());
    }

    #[test]
    fn test_option_is_optional_with_inner_shape() {
        assert_eq!(Option::<u8>::shape(), Shape::number());
        assert_eq!(Option::<u8>::presence(), Presence::Optional);
        assert_eq!(u8::presence(), Presence::Required);
    }

    #[test]
    fn test_sequences_are_arrays() {
        assert_eq!(Vec::<u8>::shape(), Shape::array(Shape::number()));
        assert_eq!(<[bool; 3]>::shape(), Shape::array(Shape::boolean()));
        assert_eq!(
            Vec::<Vec<String>>::shape(),
            Shape::array(Shape::array(Shape::string()))
        );
    }

    #[test]
    fn test_wrappers_are_transparent() {
        assert_eq!(Box::<Option<u8>>::presence(), Presence::Optional);
        assert_eq!(Arc::<str>::shape(), Shape::string());
    }

    #[test]
    fn test_leaf_types_have_no_key_paths() {
        assert!(u32::key_paths().is_empty());
    }
}
