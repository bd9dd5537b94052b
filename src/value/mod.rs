//! Runtime documents.
//!
//! A [`Value`] is a dynamically typed tree. Arrays and objects are held
//! behind [`Arc`], so cloning a value is shallow and two documents can share
//! untouched subtrees. [`Value::ptr_eq`] makes that sharing observable.
//!
//! Absent optional fields are missing keys; there is no separate
//! "undefined" value.
//!
//! # Example
//!
//! ```
//! use keylens::value;
//! use keylens::value::Value;
//!
//! let document = value!({
//!     name: "Killa",
//!     age: 42,
//!     address: { city: "Tarkov", tags: ["a", "b"] },
//! });
//!
//! assert_eq!(document.field("name"), Some(&Value::from("Killa")));
//! assert_eq!(document.field("age").and_then(Value::as_f64), Some(42.0));
//!
//! let copy = document.clone();
//! assert!(copy.ptr_eq(&document));
//! assert!(!document.deep_clone().ptr_eq(&document));
//! ```

mod macros;
#[cfg(feature = "serde")]
mod serde;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::path::KeyPath;
use crate::shape::{Leaf, Literal, Record, Shape};

/// The field map of an object value.
pub type Map = BTreeMap<String, Value>;

/// A dynamically typed document node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The null value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    String(String),
    /// A shared array.
    Array(Arc<Vec<Value>>),
    /// A shared object.
    Object(Arc<Map>),
}

impl Value {
    /// Creates an object from key/value pairs.
    ///
    /// Later pairs overwrite earlier ones with the same key.
    pub fn object<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Object(Arc::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }

    /// Creates an array from its elements.
    pub fn array<V: Into<Self>>(elements: impl IntoIterator<Item = V>) -> Self {
        Self::Array(Arc::new(elements.into_iter().map(Into::into).collect()))
    }

    /// The name of this value's kind, as used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the number, if this is one.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the elements, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns the field map, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the named field, if this is an object containing it.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(name))
    }

    /// Follows `path` through nested objects.
    ///
    /// Returns `None` as soon as a segment is missing or a non-object is
    /// reached.
    #[must_use]
    pub fn pointer(&self, path: &KeyPath) -> Option<&Self> {
        path.segments()
            .iter()
            .try_fold(self, |current, segment| current.field(segment))
    }

    /// Returns `true` if both values are the same shared array or object.
    ///
    /// Scalars are never pointer-equal; they have no identity.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Array(left), Self::Array(right)) => Arc::ptr_eq(left, right),
            (Self::Object(left), Self::Object(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Copies the whole tree, allocating every array and object anew.
    ///
    /// The result is equal to `self` but shares no node with it.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        match self {
            Self::Array(elements) => {
                Self::Array(Arc::new(elements.iter().map(Self::deep_clone).collect()))
            }
            Self::Object(map) => Self::Object(Arc::new(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.deep_clone()))
                    .collect(),
            )),
            scalar => scalar.clone(),
        }
    }

    /// Checks that this value conforms to `shape`.
    ///
    /// Records are closed: an object must contain every required field,
    /// may omit optional fields, and must not contain unknown fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`ShapeMismatch`] found in depth-first order.
    ///
    /// # Example
    ///
    /// ```
    /// use keylens::{shape, value};
    ///
    /// let shape = shape!({ name: string, age?: number });
    ///
    /// assert!(value!({ name: "a" }).conforms_to(&shape).is_ok());
    /// assert!(value!({ name: "a", age: 3 }).conforms_to(&shape).is_ok());
    /// assert!(value!({ age: 3 }).conforms_to(&shape).is_err());
    /// assert!(value!({ name: 1 }).conforms_to(&shape).is_err());
    /// ```
    pub fn conforms_to(&self, shape: &Shape) -> Result<(), ShapeMismatch> {
        self.conforms_at(shape, &mut String::new())
    }

    fn conforms_at(&self, shape: &Shape, location: &mut String) -> Result<(), ShapeMismatch> {
        match shape {
            Shape::Record(record) => self.conforms_to_record(record, location),
            Shape::Leaf(leaf) => self.conforms_to_leaf(leaf, location),
        }
    }

    fn conforms_to_record(&self, record: &Record, location: &mut String) -> Result<(), ShapeMismatch> {
        let Self::Object(map) = self else {
            return Err(ShapeMismatch::new(location, record.to_string(), self.kind()));
        };

        for field in record.fields() {
            let length = location.len();
            if !location.is_empty() {
                location.push('.');
            }
            location.push_str(field.name());

            match map.get(field.name()) {
                Some(value) => value.conforms_at(field.shape(), location)?,
                None if field.is_optional() => {}
                None => {
                    return Err(ShapeMismatch::new(location, field.shape().to_string(), "nothing"));
                }
            }
            location.truncate(length);
        }

        if let Some(unknown) = map.keys().find(|key| record.field(key).is_none()) {
            if !location.is_empty() {
                location.push('.');
            }
            location.push_str(unknown);
            return Err(ShapeMismatch::new(location, "no field".to_owned(), "unknown field"));
        }

        Ok(())
    }

    fn conforms_to_leaf(&self, leaf: &Leaf, location: &mut String) -> Result<(), ShapeMismatch> {
        let matches = match (leaf, self) {
            (Leaf::Any, _)
            | (Leaf::String, Self::String(_))
            | (Leaf::Number, Self::Number(_))
            | (Leaf::Boolean, Self::Bool(_))
            | (Leaf::Null, Self::Null) => true,
            (Leaf::Literal(literal), value) => literal_matches(literal, value),
            (Leaf::Array(element), Self::Array(elements)) => {
                for (index, value) in elements.iter().enumerate() {
                    let length = location.len();
                    location.push_str(&format!("[{index}]"));
                    value.conforms_at(element, location)?;
                    location.truncate(length);
                }
                true
            }
            _ => false,
        };

        if matches {
            Ok(())
        } else {
            Err(ShapeMismatch::new(location, leaf.to_string(), self.kind()))
        }
    }
}

#[allow(clippy::float_cmp)]
fn literal_matches(literal: &Literal, value: &Value) -> bool {
    match (literal, value) {
        (Literal::Bool(expected), Value::Bool(actual)) => expected == actual,
        (Literal::Number(expected), Value::Number(actual)) => expected == actual,
        (Literal::String(expected), Value::String(actual)) => expected == actual,
        _ => false,
    }
}

/// A value that does not conform to a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMismatch {
    /// Where the mismatch was found, relative to the checked value. Empty
    /// for the value itself.
    pub location: String,
    /// The expected shape, rendered as a type.
    pub expected: String,
    /// What was found instead.
    pub found: &'static str,
}

impl ShapeMismatch {
    fn new(location: &str, expected: String, found: &'static str) -> Self {
        Self {
            location: location.to_owned(),
            expected,
            found,
        }
    }
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            write!(formatter, "expected `{}`, found {}", self.expected, self.found)
        } else {
            write!(
                formatter,
                "at `{}`: expected `{}`, found {}",
                self.location, self.expected, self.found
            )
        }
    }
}

impl std::error::Error for ShapeMismatch {}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Number(value) => write!(formatter, "{value}"),
            Self::String(value) => write!(formatter, "{value:?}"),
            Self::Array(elements) => {
                formatter.write_str("[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{element}")?;
                }
                formatter.write_str("]")
            }
            Self::Object(map) => {
                if map.is_empty() {
                    return formatter.write_str("{}");
                }
                formatter.write_str("{ ")?;
                for (index, (key, value)) in map.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{key}: {value}")?;
                }
                formatter.write_str(" }")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_lossless_number {
    ($($type:ty),+ $(,)?) => {
        $(
            impl From<$type> for Value {
                fn from(value: $type) -> Self {
                    Self::Number(f64::from(value))
                }
            }
        )+
    };
}

impl_from_lossless_number!(i8, i16, i32, u8, u16, u32, f32, f64);

macro_rules! impl_from_wide_number {
    ($($type:ty),+ $(,)?) => {
        $(
            impl From<$type> for Value {
                #[allow(clippy::cast_precision_loss)]
                fn from(value: $type) -> Self {
                    Self::Number(value as f64)
                }
            }
        )+
    };
}

impl_from_wide_number!(i64, u64, isize, usize);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(elements: Vec<V>) -> Self {
        Self::array(elements)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Object(Arc::new(map))
    }
}

impl<V: Into<Value>> FromIterator<V> for Value {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::array(iter)
    }
}

static_assertions::assert_impl_all!(Value: Send, Sync, Clone);
static_assertions::assert_impl_all!(ShapeMismatch: std::error::Error, Send, Sync);
