//! The `value!` macro.

/// Builds a [`Value`](crate::value::Value) with an object-literal syntax.
///
/// # Syntax
///
/// - `{ key: value, ... }`: an object; keys are identifiers
/// - `[value, ...]`: an array
/// - `null`: the null value
/// - any other single token tree is converted with `Value::from`; wrap
///   multi-token expressions such as negative numbers in parentheses
///
/// # Example
///
/// ```
/// use keylens::value;
/// use keylens::value::Value;
///
/// let offset = -3;
/// let document = value!({
///     name: "yornaath",
///     age: 36,
///     offset: (offset),
///     nickname: null,
///     scores: [1, 2, 3],
///     address: { zip: 1337 },
/// });
///
/// assert_eq!(document.field("offset"), Some(&Value::from(-3)));
/// assert_eq!(document.field("nickname"), Some(&Value::Null));
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::value::Value::Null
    };
    ({ $($key:ident : $entry:tt),* $(,)? }) => {
        $crate::value::Value::Object(::std::sync::Arc::new({
            #[allow(unused_mut)]
            let mut map = $crate::value::Map::new();
            $(
                map.insert(::std::string::String::from($crate::__private::unraw(stringify!($key))), $crate::value!($entry));
            )*
            map
        }))
    };
    ([ $($element:tt),* $(,)? ]) => {
        $crate::value::Value::Array(::std::sync::Arc::new(::std::vec![$($crate::value!($element)),*]))
    };
    ($other:expr) => {
        $crate::value::Value::from($other)
    };
}
