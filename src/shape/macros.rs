//! The `shape!` macro.

/// Declares a [`Shape`](crate::shape::Shape) with a compact, type-like syntax.
///
/// # Syntax
///
/// - `string`, `number`, `boolean`, `null`, `any`: leaves
/// - `[element]`: an array of `element`
/// - `{ name: kind, other?: kind }`: a record; `?` marks an optional field
/// - `(expression)`: any expression evaluating to a `Shape`
///
/// # Example
///
/// ```
/// use keylens::shape;
/// use keylens::shape::Shape;
///
/// let profile = shape!({
///     name: string,
///     age?: number,
///     tags: [string],
///     address: {
///         street: string,
///         zip?: number,
///         verified: (Shape::literal(true)),
///     },
/// });
///
/// assert_eq!(
///     profile.to_string(),
///     "{ name: string, age?: number, tags: string[], address: { street: string, zip?: number, verified: true } }"
/// );
/// ```
#[macro_export]
macro_rules! shape {
    (string) => {
        $crate::shape::Shape::string()
    };
    (number) => {
        $crate::shape::Shape::number()
    };
    (boolean) => {
        $crate::shape::Shape::boolean()
    };
    (null) => {
        $crate::shape::Shape::null()
    };
    (any) => {
        $crate::shape::Shape::any()
    };
    ([ $element:tt ]) => {
        $crate::shape::Shape::array($crate::shape!($element))
    };
    (( $shape:expr )) => {
        $shape
    };
    ({ $($body:tt)* }) => {
        $crate::shape::Shape::Record($crate::shape!(@fields [] $($body)*))
    };
    (@fields [$($field:expr,)*]) => {
        $crate::shape::Record::new(::std::vec![$($field),*])
    };
    (@fields [$($field:expr,)*] $name:ident ? : $kind:tt $(, $($rest:tt)*)?) => {
        $crate::shape!(
            @fields
            [$($field,)* $crate::shape::Field::optional($crate::__private::unraw(stringify!($name)), $crate::shape!($kind)),]
            $($($rest)*)?
        )
    };
    (@fields [$($field:expr,)*] $name:ident : $kind:tt $(, $($rest:tt)*)?) => {
        $crate::shape!(
            @fields
            [$($field,)* $crate::shape::Field::required($crate::__private::unraw(stringify!($name)), $crate::shape!($kind)),]
            $($($rest)*)?
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::shape::{Field, Record, Shape};

    #[test]
    fn test_shape_macro_leaves() {
        assert_eq!(shape!(string), Shape::string());
        assert_eq!(shape!([number]), Shape::array(Shape::number()));
        assert_eq!(shape!((Shape::literal("Option"))), Shape::literal("Option"));
    }

    #[test]
    fn test_shape_macro_empty_record() {
        assert_eq!(shape!({}), Shape::Record(Record::default()));
    }

    #[test]
    fn test_shape_macro_nested_record_with_trailing_comma() {
        let shape = shape!({
            root: string,
            foo: {
                bar: number,
                baz?: { reached: boolean },
            },
        });

        let expected = Shape::record([
            Field::required("root", Shape::string()),
            Field::required(
                "foo",
                Shape::record([
                    Field::required("bar", Shape::number()),
                    Field::optional(
                        "baz",
                        Shape::record([Field::required("reached", Shape::boolean())]),
                    ),
                ]),
            ),
        ]);

        assert_eq!(shape, expected);
    }

    #[test]
    fn test_shape_macro_raw_identifier_field() {
        let shape = shape!({ r#type: string, r#match?: { r#ref: number } });

        assert_eq!(shape.to_string(), "{ type: string, match?: { ref: number } }");
        assert_eq!(
            shape,
            Shape::record([
                Field::required("type", Shape::string()),
                Field::optional("match", Shape::record([Field::required("ref", Shape::number())])),
            ])
        );
    }
}
