/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// ```rust
/// use hjson::hjson;
///
/// let config = hjson!({
///     "host": "localhost",
///     "port": 8080,
///     "tags": ["a", "b"]
/// });
/// let port = config.as_object().and_then(|o| o.get("port"));
/// assert_eq!(port, Some(&hjson!(8080)));
/// ```
#[macro_export]
macro_rules! hjson {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::hjson!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::hjson!($value));
        )*
        $crate::Value::Object(object)
    }};

    // fallback for any other expression
    ($other:expr) => {{
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    }};
}
