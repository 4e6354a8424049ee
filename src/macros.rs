/// Construct a specification [`Value`][crate::Value] using JSON-like syntax.
///
/// Lists use `[...]`, maps use `{ key: value }` where the key is an
/// identifier or a string literal, and `null` is [`Value::None`]. Any other
/// expression is converted using `Value::from`.
///
/// # Examples
///
/// ```
/// use weft::{spec, Value};
///
/// let v = spec!(["dynamic-attr", "class", ["get", ["this", "cls"]], null]);
/// assert_eq!(v.as_list().map(|l| l.len()), Some(4));
///
/// let t = spec!({ main: { statements: [["text", "Hello"]] } });
/// assert!(matches!(t, Value::Map(_)));
/// ```
// Based on the token muncher used by `serde_json::json!`
#[macro_export]
macro_rules! spec {
    ($($tt:tt)+) => {
        $crate::_spec!($($tt)+)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! _spec {
    // Done with trailing comma.
    (@list [$($elems:expr,)*]) => {
        $crate::Value::List(::std::vec![$($elems,)*])
    };

    // Done without trailing comma.
    (@list [$($elems:expr),*]) => {
        $crate::Value::List(::std::vec![$($elems),*])
    };

    // Next element is `null`.
    (@list [$($elems:expr,)*] null $($rest:tt)*) => {
        $crate::_spec!(@list [$($elems,)* $crate::_spec!(null)] $($rest)*)
    };

    // Next element is a list.
    (@list [$($elems:expr,)*] [$($list:tt)*] $($rest:tt)*) => {
        $crate::_spec!(@list [$($elems,)* $crate::_spec!([$($list)*])] $($rest)*)
    };

    // Next element is a map.
    (@list [$($elems:expr,)*] {$($map:tt)*} $($rest:tt)*) => {
        $crate::_spec!(@list [$($elems,)* $crate::_spec!({$($map)*})] $($rest)*)
    };

    // Next element is an expression followed by comma.
    (@list [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::_spec!(@list [$($elems,)* $crate::_spec!($next),] $($rest)*)
    };

    // Last element is an expression with no trailing comma.
    (@list [$($elems:expr,)*] $last:expr) => {
        $crate::_spec!(@list [$($elems,)* $crate::_spec!($last)])
    };

    // Comma after the most recent element.
    (@list [$($elems:expr),*] , $($rest:tt)*) => {
        $crate::_spec!(@list [$($elems,)*] $($rest)*)
    };

    // Done.
    (@map $map:ident ()) => {};

    (@map $map:ident ($key:tt : null $(, $($rest:tt)*)?)) => {
        let _ = $map.insert($crate::_spec!(@key $key), $crate::Value::None);
        $crate::_spec!(@map $map ($($($rest)*)?));
    };

    (@map $map:ident ($key:tt : [$($list:tt)*] $(, $($rest:tt)*)?)) => {
        let _ = $map.insert($crate::_spec!(@key $key), $crate::_spec!([$($list)*]));
        $crate::_spec!(@map $map ($($($rest)*)?));
    };

    (@map $map:ident ($key:tt : {$($inner:tt)*} $(, $($rest:tt)*)?)) => {
        let _ = $map.insert($crate::_spec!(@key $key), $crate::_spec!({$($inner)*}));
        $crate::_spec!(@map $map ($($($rest)*)?));
    };

    (@map $map:ident ($key:tt : $value:expr $(, $($rest:tt)*)?)) => {
        let _ = $map.insert($crate::_spec!(@key $key), $crate::Value::from($value));
        $crate::_spec!(@map $map ($($($rest)*)?));
    };

    (@key $key:ident) => {
        ::std::string::String::from(stringify!($key))
    };

    (@key $key:literal) => {
        ::std::string::String::from($key)
    };

    (null) => {
        $crate::Value::None
    };

    ([]) => {
        $crate::Value::List(::std::vec::Vec::new())
    };

    ([ $($tt:tt)+ ]) => {
        $crate::_spec!(@list [] $($tt)+)
    };

    ({}) => {
        $crate::Value::Map(::std::collections::BTreeMap::new())
    };

    ({ $($tt:tt)+ }) => {{
        let mut map = ::std::collections::BTreeMap::new();
        $crate::_spec!(@map map ($($tt)+));
        $crate::Value::Map(map)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
