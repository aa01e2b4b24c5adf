//! Property-based tests for the parse/print round trip.

use hjson::{parse, to_string, to_string_with_options, Map, PrintOptions, Value};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1_000_000_000i64..1_000_000_000i64).prop_map(|n| Value::Number(n as f64)),
        (-1.0e12f64..1.0e12f64).prop_map(Value::Number),
        "[ -~]{0,12}".prop_map(Value::String),
        any::<String>().prop_map(Value::String),
    ]
}

/// Root values are containers, matching how documents are written.
fn document() -> impl Strategy<Value = Value> {
    let node = scalar().prop_recursive(3, 24, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,8}", inner), 0..6).prop_map(|entries| {
                let mut map = Map::new();
                for (k, v) in entries {
                    map.insert(k, v);
                }
                Value::Object(map)
            }),
        ]
    });
    prop_oneof![
        prop::collection::vec(node.clone(), 0..6).prop_map(Value::Array),
        prop::collection::vec(("[a-z]{1,8}", node), 0..6).prop_map(|entries| {
            let mut map = Map::new();
            for (k, v) in entries {
                map.insert(k, v);
            }
            Value::Object(map)
        }),
    ]
}

proptest! {
    #[test]
    fn parse_print_round_trip(v in document()) {
        let text = to_string(&v).unwrap();
        let back = parse(&text).unwrap().value;
        prop_assert_eq!(back, v);
    }

    #[test]
    fn printing_is_idempotent(v in document()) {
        let once = to_string(&v).unwrap();
        let twice = to_string(&parse(&once).unwrap().value).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn condensed_round_trip(v in document()) {
        let opts = PrintOptions::new().with_condense(60);
        let text = to_string_with_options(&v, None, &opts).unwrap();
        let back = parse(&text).unwrap().value;
        prop_assert_eq!(back, v);
    }

    #[test]
    fn member_strings_round_trip(s in any::<String>()) {
        let mut map = Map::new();
        map.insert("k".to_string(), Value::String(s));
        let v = Value::Object(map);
        let text = to_string(&v).unwrap();
        let back = parse(&text).unwrap().value;
        prop_assert_eq!(back, v);
    }

    #[test]
    fn member_numbers_round_trip(n in prop::num::f64::NORMAL | prop::num::f64::ZERO) {
        let mut map = Map::new();
        map.insert("n".to_string(), Value::Number(n));
        let v = Value::Object(map);
        let text = to_string(&v).unwrap();
        let back = parse(&text).unwrap().value;
        prop_assert_eq!(back, v);
    }
}
