use std::collections::HashMap;

use pretty_assertions::assert_eq;
use serde_json::json;
use tacit::{Apply, Arg, EvalError, Value, item, json_to_value, lookup, map_over};

fn object(pairs: Vec<(&str, Value)>) -> Value {
    let mut map = HashMap::new();
    for (k, v) in pairs {
        map.insert(k.to_string(), v);
    }
    Value::Object(map)
}

fn ints(ns: Vec<i64>) -> Vec<Value> {
    ns.into_iter().map(Value::Integer).collect()
}

#[test]
fn test_extracts_a_single_property() {
    let data = vec![
        json_to_value(json!({"b": 1})),
        json_to_value(json!({"b": 2})),
    ];

    let actual = map_over(&data, &item().field("b")).unwrap();

    assert_eq!(actual, ints(vec![1, 2]));
}

#[test]
fn test_deep_extracts() {
    let data = vec![
        json_to_value(json!({"a": [{"b": 2}]})),
        json_to_value(json!({"a": [{"b": 3}]})),
    ];

    let actual = map_over(&data, &item().field("a").index(0).field("b")).unwrap();

    assert_eq!(actual, ints(vec![2, 3]));
}

#[test]
fn test_calls_a_method() {
    let element = |n: i64| {
        object(vec![(
            "func",
            Value::function(move |_this, _args| Ok(Value::Integer(n))),
        )])
    };
    let data = vec![element(3), element(4)];

    let actual = map_over(&data, &item().field("func").call(vec![])).unwrap();

    assert_eq!(actual, ints(vec![3, 4]));
}

#[test]
fn test_deep_calls_a_method() {
    let element = |n: i64| {
        object(vec![(
            "prop",
            object(vec![(
                "func",
                Value::function(move |_this, _args| Ok(Value::Integer(n))),
            )]),
        )])
    };
    let data = vec![element(4), element(5)];

    let actual = map_over(&data, &item().field("prop").field("func").call(vec![])).unwrap();

    assert_eq!(actual, ints(vec![4, 5]));
}

/// An object whose `func` member returns `this.prop`, so tests can observe
/// what the call was bound to.
fn self_reporting(prop: i64) -> Value {
    object(vec![
        ("prop", Value::Integer(prop)),
        (
            "func",
            Value::function(|this, _args| {
                Ok(this.get("prop").cloned().unwrap_or(Value::Undefined))
            }),
        ),
    ])
}

#[test]
fn test_binds_to_the_object_for_calls() {
    let data = vec![self_reporting(5), self_reporting(6)];

    let actual = map_over(&data, &item().field("func").call(vec![])).unwrap();

    assert_eq!(actual, ints(vec![5, 6]));
}

#[test]
fn test_binds_to_the_deep_object_for_calls() {
    let data = vec![
        object(vec![("obj", self_reporting(6))]),
        object(vec![("obj", self_reporting(7))]),
    ];

    let actual = map_over(&data, &item().field("obj").field("func").call(vec![])).unwrap();

    assert_eq!(actual, ints(vec![6, 7]));
}

/// `{ prop, func(n) { n * this.prop } }`
fn multiplier(prop: i64) -> Value {
    object(vec![
        ("prop", Value::Integer(prop)),
        (
            "func",
            Value::function(|this, args| {
                let n = args[0].as_int().unwrap_or(0);
                let prop = this.get("prop").and_then(Value::as_int).unwrap_or(0);
                Ok(Value::Integer(n * prop))
            }),
        ),
    ])
}

#[test]
fn test_calls_a_method_with_args() {
    let data = vec![multiplier(7), multiplier(8)];

    // `_.func($this, 5)`
    let call = item()
        .field("func")
        .call(vec![Arg::This, Arg::Value(Value::Integer(5))]);

    let actual = map_over(&data, &call).unwrap();

    assert_eq!(actual, ints(vec![35, 40]));
}

#[test]
fn test_deep_calls_a_method_with_args() {
    let data = vec![
        object(vec![("obj", multiplier(8))]),
        object(vec![("obj", multiplier(9))]),
    ];

    // `_.obj.func($this, 5)`
    let call = item()
        .field("obj")
        .field("func")
        .call(vec![Arg::This, Arg::Value(Value::Integer(5))]);

    let actual = map_over(&data, &call).unwrap();

    assert_eq!(actual, ints(vec![40, 45]));
}

#[test]
fn test_calls_a_method_with_other_referenced_args() {
    let element = |prop: i64, factor: i64| {
        let mut obj = multiplier(prop);
        if let Value::Object(map) = &mut obj {
            map.insert("factor".to_string(), Value::Integer(factor));
        }
        obj
    };
    let data = vec![element(9, 5), element(10, 6)];

    // `_.func($this, _.factor)`
    let call = item()
        .field("func")
        .call(vec![Arg::This, Arg::Expr(item().field("factor"))]);

    let actual = map_over(&data, &call).unwrap();

    assert_eq!(actual, ints(vec![45, 60]));
}

/// `{ prop, isFirst(index, array) }`: true when this element is the first
/// in `array` with its `prop` value. Mirrors the de-duplication idiom the
/// rest markers exist for.
fn test_case(prop: i64) -> Value {
    object(vec![
        ("prop", Value::Integer(prop)),
        (
            "isFirst",
            Value::function(|this, args| {
                let index = args[0].as_int().unwrap_or(-1);
                let Some(Value::Array(entries)) = args.get(1) else {
                    return Err(EvalError::TypeError(
                        "isFirst expects the collection as its second argument".to_string(),
                    ));
                };

                let prop = this.get("prop").and_then(Value::as_int);
                let found = entries
                    .iter()
                    .position(|entry| entry.get("prop").and_then(Value::as_int) == prop);

                Ok(Value::Boolean(found == Some(index as usize)))
            }),
        ),
    ])
}

/// The packed variant: `isFirst([index, array])` takes both trailing
/// values as one array argument.
fn test_case_packed(prop: i64) -> Value {
    object(vec![
        ("prop", Value::Integer(prop)),
        (
            "isFirst",
            Value::function(|this, args| {
                let Some(Value::Array(pair)) = args.first() else {
                    return Err(EvalError::TypeError(
                        "isFirst expects one array argument".to_string(),
                    ));
                };
                let index = pair[0].as_int().unwrap_or(-1);
                let Value::Array(entries) = &pair[1] else {
                    return Err(EvalError::TypeError(
                        "isFirst expects [index, array]".to_string(),
                    ));
                };

                let prop = this.get("prop").and_then(Value::as_int);
                let found = entries
                    .iter()
                    .position(|entry| entry.get("prop").and_then(Value::as_int) == prop);

                Ok(Value::Boolean(found == Some(index as usize)))
            }),
        ),
    ])
}

#[test]
fn test_spread_provides_the_rest_of_the_arguments() {
    let data: Vec<Value> = [1, 2, 1, 3, 2].into_iter().map(test_case).collect();

    // `_.isFirst(_, $$rest)`: the element rebinds the call, and the
    // map convention's (index, array) tail is spliced in individually
    let call = item()
        .field("isFirst")
        .call(vec![Arg::Expr(item()), Arg::Spread]);

    let actual = map_over(&data, &call).unwrap();

    let expected: Vec<Value> = [true, true, false, true, false]
        .into_iter()
        .map(Value::Boolean)
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_rest_provides_the_rest_as_a_single_argument() {
    let data: Vec<Value> = [1, 2, 1, 3, 2].into_iter().map(test_case_packed).collect();

    // `_.isFirst(_, $rest)`: same tail, collected into one array
    let call = item()
        .field("isFirst")
        .call(vec![Arg::Expr(item()), Arg::Rest]);

    let actual = map_over(&data, &call).unwrap();

    let expected: Vec<Value> = [true, true, false, true, false]
        .into_iter()
        .map(Value::Boolean)
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_references_an_arg_besides_the_first() {
    // `$1.scale($this, $0)`: the target lives at position 1 and the
    // value at position 0 becomes its argument
    let scaler = object(vec![
        ("factor", Value::Integer(3)),
        (
            "scale",
            Value::function(|this, args| {
                let n = args[0].as_int().unwrap_or(0);
                let factor = this.get("factor").and_then(Value::as_int).unwrap_or(0);
                Ok(Value::Integer(n * factor))
            }),
        ),
    ]);

    let one = lookup("$1").unwrap();
    let zero = lookup("$0").unwrap();
    let call = one.field("scale").call(vec![Arg::This, Arg::Expr(zero)]);

    let actual = call.apply(&[Value::Integer(5), scaler]).unwrap();

    assert_eq!(actual, Value::Integer(15));
}

#[test]
fn test_broadcast_pulls_properties_from_each_entry() {
    let data = vec![
        json_to_value(json!({"array": [{"a": 1}, {"a": 2}]})),
        json_to_value(json!({"array": [{"a": 3}, {"a": 4}]})),
    ];

    // `_.array[$all].a`
    let chain = item().field("array").all().unwrap().field("a");

    let actual = map_over(&data, &chain).unwrap();

    assert_eq!(
        actual,
        vec![
            Value::Array(ints(vec![1, 2])),
            Value::Array(ints(vec![3, 4])),
        ]
    );
}

#[test]
fn test_broadcast_combines_with_method_calls() {
    let element =
        |props: Vec<i64>| Value::Array(props.into_iter().map(multiplier).collect::<Vec<_>>());
    let data = vec![
        object(vec![("array", element(vec![1, 2]))]),
        object(vec![("array", element(vec![3, 4]))]),
    ];

    // `_.array[$all].func($this, 10)`
    let call = item()
        .field("array")
        .all()
        .unwrap()
        .field("func")
        .call(vec![Arg::This, Arg::Value(Value::Integer(10))]);

    let actual = map_over(&data, &call).unwrap();

    assert_eq!(
        actual,
        vec![
            Value::Array(ints(vec![10, 20])),
            Value::Array(ints(vec![30, 40])),
        ]
    );
}

#[test]
fn test_broadcast_only_refers_to_arrays() {
    // `_[$all].func($this, 2)` works over elements that are arrays...
    let call = item()
        .all()
        .unwrap()
        .field("func")
        .call(vec![Arg::This, Arg::Value(Value::Integer(2))]);

    let good = vec![
        Value::Array(vec![multiplier(1), multiplier(2)]),
        Value::Array(vec![multiplier(3), multiplier(4)]),
    ];
    assert_eq!(
        map_over(&good, &call).unwrap(),
        vec![
            Value::Array(ints(vec![2, 4])),
            Value::Array(ints(vec![6, 8])),
        ]
    );

    // ...and fails with a type mismatch over anything else
    let bad = vec![multiplier(1), multiplier(2)];
    assert!(matches!(
        map_over(&bad, &call).unwrap_err(),
        EvalError::TypeError(_)
    ));
}

#[test]
fn test_end_to_end_error_reporting() {
    let data = vec![json_to_value(json!({"a": {}}))];

    let result = map_over(&data, &item().field("a").field("b").field("c"));

    let Err(EvalError::Resolution(msg)) = result else {
        panic!("expected a resolution error");
    };
    assert!(msg.contains("_.a.b.c"));
    assert!(msg.contains("not accessible in"));
}
