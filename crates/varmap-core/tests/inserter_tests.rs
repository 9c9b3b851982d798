//! Escenarios de inserción de pares sobre distintos sinks.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{json, Value};
use varmap_core::{
    from_fn, put_pairs, put_slice, try_from_fn, Any, Boolean, InsertMode, Integer, MapProperty, PairError, PairInserter, SinkError,
    Text, Typed, ValueKind,
};

#[test]
fn text_keys_integer_values_are_forwarded_in_order() {
    let mut seen = Vec::new();
    put_pairs(Text, Integer, &mut from_fn(|k: String, v: i64| seen.push((k, v))), &json!(["a", 1, "b", 2])).unwrap();
    assert_eq!(seen, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
}

#[test]
fn odd_length_is_unbalanced_and_forwards_nothing() {
    let mut out: Vec<(String, i64)> = Vec::new();
    let err = put_pairs(Text, Integer, &mut out, &json!(["a", 1, "b"])).unwrap_err();
    assert_eq!(err, PairError::UnbalancedPairs { len: 3 });
    assert!(out.is_empty());
}

#[test]
fn bad_first_key_is_reported_at_position_zero() {
    let mut out: HashMap<String, Value> = HashMap::new();
    let err = put_pairs(Text, Any, &mut out, &json!([1, "x"])).unwrap_err();
    assert_eq!(
        err,
        PairError::KeyTypeMismatch { position: 0, expected: "text".into(), found: ValueKind::Integer }
    );
    assert!(out.is_empty());
}

#[test]
fn bad_value_is_reported_at_its_own_position() {
    let mut out: BTreeMap<String, bool> = BTreeMap::new();
    let err = put_pairs(Text, Boolean, &mut out, &json!(["a", true, "b", "yes"])).unwrap_err();
    assert_eq!(
        err,
        PairError::ValueTypeMismatch { position: 3, expected: "boolean".into(), found: ValueKind::Text }
    );
    // modo forward: el primer par ya fue aplicado
    assert_eq!(out.get("a"), Some(&true));
    assert_eq!(out.len(), 1);
}

#[test]
fn forward_mode_keeps_pairs_before_a_bad_key() {
    let mut out: IndexMap<String, i64> = IndexMap::new();
    let err = put_pairs(Text, Integer, &mut out, &json!(["a", 1, "b", 2, null, 3, "d", 4])).unwrap_err();
    assert_eq!(err.position(), Some(4));
    assert_eq!(out.keys().cloned().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn atomic_mode_keeps_sink_untouched_on_validation_error() {
    let inserter = PairInserter::new(Text, Integer).mode(InsertMode::Atomic);
    let mut out: IndexMap<String, i64> = IndexMap::new();
    assert!(inserter.insert(&mut out, &json!(["a", 1, "b", 2, null, 3])).is_err());
    assert!(out.is_empty());

    inserter.insert(&mut out, &json!(["a", 1, "b", 2])).unwrap();
    assert_eq!(out.len(), 2);
}

#[test]
fn non_sequences_are_invalid_shape() {
    let mut out: Vec<(String, i64)> = Vec::new();
    for (raw, found) in [
        (json!("a"), ValueKind::Text),
        (json!(7), ValueKind::Integer),
        (json!({"a": 1}), ValueKind::Object),
        (Value::Null, ValueKind::Null),
    ] {
        let err = put_pairs(Text, Integer, &mut out, &raw).unwrap_err();
        assert_eq!(err, PairError::InvalidShape { found });
    }
    assert!(out.is_empty());
}

#[test]
fn slice_entry_point_skips_shape_check() {
    let items = vec![json!("x"), json!(1.5), json!("y"), json!(2)];
    let mut out: Vec<(String, Value)> = Vec::new();
    put_slice(Text, ValueKind::Number, &mut out, &items).unwrap();
    assert_eq!(out, vec![("x".to_string(), json!(1.5)), ("y".to_string(), json!(2))]);
}

#[test]
fn runtime_kinds_and_typed_values_work_together() {
    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Dependency {
        group: String,
        version: String,
    }

    let raw = json!([
        "core", {"group": "org.example", "version": "1.0"},
        "test", {"group": "org.junit", "version": "5.10"}
    ]);
    let mut out: HashMap<String, Dependency> = HashMap::new();
    put_pairs(Text, Typed::<Dependency>::new(), &mut out, &raw).unwrap();
    assert_eq!(out["test"].group, "org.junit");
    assert_eq!(out["core"].version, "1.0");

    let err = put_pairs(Text, Typed::<Dependency>::new(), &mut out, &json!(["broken", {"group": "x"}])).unwrap_err();
    match err {
        PairError::ValueTypeMismatch { position, expected, found } => {
            assert_eq!(position, 1);
            assert!(expected.ends_with("Dependency"));
            assert_eq!(found, ValueKind::Object);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn finalized_property_surfaces_sink_error() {
    let mut prop: MapProperty<String, i64> = MapProperty::new();
    put_pairs(Text, Integer, &mut prop, &json!(["a", 1])).unwrap();
    prop.finalize_value();

    let err = put_pairs(Text, Integer, &mut prop, &json!(["b", 2])).unwrap_err();
    assert_eq!(err, PairError::Sink { position: 0, source: SinkError::Finalized });
    assert_eq!(prop.get().len(), 1);
}

#[test]
fn property_sink_keeps_insertion_order() {
    let mut prop: MapProperty<String, i64> = MapProperty::new();
    put_pairs(Text, Integer, &mut prop, &json!(["z", 1, "a", 2, "m", 3])).unwrap();
    let snapshot = prop.get();
    assert_eq!(snapshot.keys().map(String::as_str).collect::<Vec<_>>(), vec!["z", "a", "m"]);
}

#[test]
fn atomic_mode_sink_error_keeps_earlier_pairs() {
    let inserter = PairInserter::new(Text, Integer).mode(InsertMode::Atomic);
    let mut accepted: Vec<(String, i64)> = Vec::new();
    let mut calls = 0;
    let mut sink = try_from_fn(|k: String, v: i64| -> Result<(), SinkError> {
        calls += 1;
        if calls == 2 {
            return Err(SinkError::Rejected("second pair refused".into()));
        }
        accepted.push((k, v));
        Ok(())
    });

    let err = inserter.insert(&mut sink, &json!(["a", 1, "b", 2, "c", 3])).unwrap_err();
    drop(sink);
    assert_eq!(err, PairError::Sink { position: 2, source: SinkError::Rejected("second pair refused".into()) });
    // los sinks no son transaccionales: el primer par ya fue aplicado
    assert_eq!(accepted, vec![("a".to_string(), 1)]);
}

#[test]
fn atomic_mode_checks_shape_and_arity_first() {
    let inserter = PairInserter::new(Text, Integer).mode(InsertMode::Atomic);
    let mut out: Vec<(String, i64)> = Vec::new();

    let err = inserter.insert(&mut out, &json!(["a", 1, "b"])).unwrap_err();
    assert_eq!(err, PairError::UnbalancedPairs { len: 3 });

    let err = inserter.insert(&mut out, &json!({"a": 1})).unwrap_err();
    assert_eq!(err, PairError::InvalidShape { found: ValueKind::Object });

    assert!(out.is_empty());
}

#[test]
fn insert_mode_defaults_to_forward() {
    assert_eq!(PairInserter::new(Text, Integer).insert_mode(), InsertMode::Forward);
    assert_eq!(PairInserter::new(Text, Integer).mode(InsertMode::Atomic).insert_mode(), InsertMode::Atomic);
}
