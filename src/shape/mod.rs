//! Explicit descriptions of nested document shapes.
//!
//! A [`Shape`] is a finite tree: either a [`Leaf`] (a terminal value type)
//! or a [`Record`] of named [`Field`]s. Every field is either required or
//! optional ([`Presence`]). Shapes own their children, so a shape can never
//! refer back to one of its ancestors.
//!
//! Shapes can be built in three ways:
//!
//! - with the constructor functions on [`Shape`], [`Record`] and [`Field`],
//! - with the [`shape!`](crate::shape!) macro,
//! - with `#[derive(Shaped)]` on a struct (see [`Shaped`]).
//!
//! # Example
//!
//! ```
//! use keylens::shape;
//! use keylens::shape::{Field, Record, Shape};
//!
//! let built = Shape::Record(Record::new(vec![
//!     Field::required("name", Shape::string()),
//!     Field::optional("age", Shape::number()),
//! ]));
//!
//! let declared = shape!({ name: string, age?: number });
//!
//! assert_eq!(built, declared);
//! assert_eq!(declared.to_string(), "{ name: string, age?: number }");
//! ```

mod macros;
mod shaped;

pub use shaped::Shaped;

use std::fmt;

/// The delimiter used to join path segments.
///
/// Field names must not contain it.
pub const PATH_DELIMITER: &str = ".";

/// The structural description of a nested document.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A terminal value type. Paths never descend into leaves.
    Leaf(Leaf),
    /// A record of named fields. Paths descend into records.
    Record(Record),
}

/// A terminal value type.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    /// Any string.
    String,
    /// Any number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// The null value.
    Null,
    /// Any value at all, including records. Paths do not descend into it.
    Any,
    /// Exactly one literal value.
    Literal(Literal),
    /// A homogeneous array. Arrays are leaves even when their element shape
    /// is a record.
    Array(Box<Shape>),
}

/// A literal value type such as `true` or `"Option"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A boolean literal.
    Bool(bool),
    /// A numeric literal.
    Number(f64),
    /// A string literal.
    String(String),
}

/// Whether a field must be present in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Presence {
    /// The field is always present.
    #[default]
    Required,
    /// The field may be absent.
    Optional,
}

impl Presence {
    /// Returns `true` for [`Presence::Optional`].
    #[must_use]
    pub const fn is_optional(self) -> bool {
        matches!(self, Self::Optional)
    }
}

/// A named field of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    shape: Shape,
    presence: Presence,
}

impl Field {
    /// Creates a field with an explicit presence.
    #[must_use]
    pub fn new(name: impl Into<String>, shape: Shape, presence: Presence) -> Self {
        Self {
            name: name.into(),
            shape,
            presence,
        }
    }

    /// Creates a required field.
    #[must_use]
    pub fn required(name: impl Into<String>, shape: Shape) -> Self {
        Self::new(name, shape, Presence::Required)
    }

    /// Creates an optional field.
    #[must_use]
    pub fn optional(name: impl Into<String>, shape: Shape) -> Self {
        Self::new(name, shape, Presence::Optional)
    }

    /// The field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared shape of the field's value.
    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Whether the field is required or optional.
    #[must_use]
    pub const fn presence(&self) -> Presence {
        self.presence
    }

    /// Returns `true` if the field may be absent.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.presence.is_optional()
    }
}

/// An ordered collection of named fields.
///
/// Field order is the declaration order. It only affects rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    /// Creates a record from its fields.
    #[must_use]
    pub const fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Appends a field, returning the extended record.
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Iterates over the fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// The number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Shape {
    /// The string leaf.
    #[must_use]
    pub const fn string() -> Self {
        Self::Leaf(Leaf::String)
    }

    /// The number leaf.
    #[must_use]
    pub const fn number() -> Self {
        Self::Leaf(Leaf::Number)
    }

    /// The boolean leaf.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::Leaf(Leaf::Boolean)
    }

    /// The null leaf.
    #[must_use]
    pub const fn null() -> Self {
        Self::Leaf(Leaf::Null)
    }

    /// The leaf accepting any value.
    #[must_use]
    pub const fn any() -> Self {
        Self::Leaf(Leaf::Any)
    }

    /// A literal leaf.
    #[must_use]
    pub fn literal(literal: impl Into<Literal>) -> Self {
        Self::Leaf(Leaf::Literal(literal.into()))
    }

    /// An array leaf with the given element shape.
    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Leaf(Leaf::Array(Box::new(element)))
    }

    /// A record shape built from its fields.
    #[must_use]
    pub fn record(fields: impl IntoIterator<Item = Field>) -> Self {
        Self::Record(Record::new(fields.into_iter().collect()))
    }

    /// Returns the record if this shape is one.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            Self::Leaf(_) => None,
        }
    }

    /// Returns `true` for record shapes.
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Checks that every record in the tree has unique, non-empty field
    /// names that do not contain the path delimiter.
    ///
    /// Record shapes nested inside arrays are validated too, although paths
    /// never descend into them.
    ///
    /// # Errors
    ///
    /// Returns the first [`ShapeError`] found in depth-first order.
    ///
    /// # Example
    ///
    /// ```
    /// use keylens::shape::{Field, Shape, ShapeError};
    ///
    /// let shape = Shape::record([
    ///     Field::required("name", Shape::string()),
    ///     Field::required("name", Shape::number()),
    /// ]);
    ///
    /// assert!(matches!(shape.validate(), Err(ShapeError::DuplicateField { .. })));
    /// ```
    pub fn validate(&self) -> Result<(), ShapeError> {
        self.validate_at("")
    }

    fn validate_at(&self, location: &str) -> Result<(), ShapeError> {
        match self {
            Self::Leaf(Leaf::Array(element)) => element.validate_at(location),
            Self::Leaf(_) => Ok(()),
            Self::Record(record) => {
                for (index, field) in record.fields.iter().enumerate() {
                    if field.name.is_empty() {
                        return Err(ShapeError::EmptyFieldName {
                            record: location.to_owned(),
                        });
                    }
                    if field.name.contains(PATH_DELIMITER) {
                        return Err(ShapeError::DelimiterInFieldName {
                            record: location.to_owned(),
                            field: field.name.clone(),
                        });
                    }
                    if record.fields[..index]
                        .iter()
                        .any(|earlier| earlier.name == field.name)
                    {
                        return Err(ShapeError::DuplicateField {
                            record: location.to_owned(),
                            field: field.name.clone(),
                        });
                    }
                    let child = if location.is_empty() {
                        field.name.clone()
                    } else {
                        format!("{location}{PATH_DELIMITER}{}", field.name)
                    };
                    field.shape.validate_at(&child)?;
                }
                Ok(())
            }
        }
    }
}

impl From<Record> for Shape {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Leaf> for Shape {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Number(value) => write!(formatter, "{value}"),
            Self::String(value) => write!(formatter, "{value:?}"),
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => formatter.write_str("string"),
            Self::Number => formatter.write_str("number"),
            Self::Boolean => formatter.write_str("boolean"),
            Self::Null => formatter.write_str("null"),
            Self::Any => formatter.write_str("any"),
            Self::Literal(literal) => write!(formatter, "{literal}"),
            Self::Array(element) => write!(formatter, "{element}[]"),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return formatter.write_str("{}");
        }
        formatter.write_str("{ ")?;
        for (index, field) in self.fields.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            let marker = if field.is_optional() { "?" } else { "" };
            write!(formatter, "{}{marker}: {}", field.name, field.shape)?;
        }
        formatter.write_str(" }")
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(leaf) => write!(formatter, "{leaf}"),
            Self::Record(record) => write!(formatter, "{record}"),
        }
    }
}

/// Errors found while validating a [`Shape`].
///
/// `record` is the dotted path of the record containing the offending field,
/// or the empty string for the root record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Two fields of one record share a name.
    DuplicateField {
        /// The record containing the duplicate.
        record: String,
        /// The duplicated field name.
        field: String,
    },
    /// A field has an empty name.
    EmptyFieldName {
        /// The record containing the field.
        record: String,
    },
    /// A field name contains the path delimiter.
    DelimiterInFieldName {
        /// The record containing the field.
        record: String,
        /// The offending field name.
        field: String,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = |record: &str| {
            if record.is_empty() {
                "root record".to_owned()
            } else {
                format!("record `{record}`")
            }
        };
        match self {
            Self::DuplicateField { record, field } => {
                write!(formatter, "duplicate field `{field}` in {}", location(record))
            }
            Self::EmptyFieldName { record } => {
                write!(formatter, "empty field name in {}", location(record))
            }
            Self::DelimiterInFieldName { record, field } => write!(
                formatter,
                "field `{field}` in {} contains the path delimiter `{PATH_DELIMITER}`",
                location(record)
            ),
        }
    }
}

impl std::error::Error for ShapeError {}

static_assertions::assert_impl_all!(Shape: Send, Sync, Clone);
