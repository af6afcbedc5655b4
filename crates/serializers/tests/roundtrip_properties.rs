//! Property tests for the round-trip and legacy-compatibility laws.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use flowresult_serializers::{JsonSerializer, ObjectSerializer, Serializer, Timestamp, Value};
use proptest::prelude::*;

fn any_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        // NaN never equals itself, so keep floats comparable
        (-1e12f64..1e12f64).prop_map(Value::Float),
        "[a-z0-9 ]{0,16}".prop_map(Value::String),
        prop::collection::vec(any::<u8>(), 0..32).prop_map(Value::Bytes),
        any::<u64>().prop_map(|m| Value::Timestamp(Timestamp::from_micros(m))),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6).prop_map(Value::Object),
        ]
    })
}

proptest! {
    #[test]
    fn object_roundtrip(value in any_value()) {
        let serializer = ObjectSerializer::new();
        let bytes = serializer.serialize(&value).unwrap();
        prop_assert_eq!(serializer.deserialize(&bytes).unwrap(), value);
    }

    #[test]
    fn object_reads_legacy_shape(value in any_value()) {
        let legacy = BASE64.encode(bincode::serialize(&value).unwrap());
        prop_assert_eq!(ObjectSerializer::new().deserialize(legacy.as_bytes()).unwrap(), value);
    }

    #[test]
    fn json_roundtrip_for_json_safe_values(value in any_value()) {
        prop_assume!(value.is_json_safe());
        let serializer = JsonSerializer::new();
        let bytes = serializer.serialize(&value).unwrap();
        prop_assert_eq!(serializer.deserialize(&bytes).unwrap(), value);
    }

    #[test]
    fn json_rejects_exactly_the_unsafe_values(value in any_value()) {
        let result = JsonSerializer::new().serialize(&value);
        prop_assert_eq!(result.is_ok(), value.is_json_safe());
    }
}
