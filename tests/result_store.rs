//! End-to-end persistence through an in-memory byte store
//!
//! The store stands in for any backend that keeps bytes verbatim. Each entry
//! records the serializer configuration next to the payload so a different
//! component can rebuild an equal serializer and read the result back.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use flowresult::{
    JsonSerializer, ObjectSerializer, Serializer, SerializerConfig, Timestamp, Value,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Default)]
struct ByteStore {
    entries: HashMap<String, (String, Vec<u8>)>,
}

impl ByteStore {
    fn write(&mut self, key: &str, serializer: &dyn Serializer, value: &Value) {
        let config = serializer.descriptor().to_toml_string().unwrap();
        let bytes = serializer.serialize(value).unwrap();
        self.entries.insert(key.to_string(), (config, bytes));
    }

    fn read(&self, key: &str) -> flowresult::Result<Value> {
        let (config, bytes) = &self.entries[key];
        let serializer = SerializerConfig::from_toml_str(config)?.build()?;
        serializer.deserialize(bytes)
    }
}

#[test]
fn test_results_survive_store_with_rebuilt_serializers() {
    let mut store = ByteStore::default();
    let finished = Value::Array(vec![
        Value::from("abc"),
        Value::Int(123),
        Value::from(Timestamp::now()),
    ]);
    let summary = Value::Array(vec![Value::from("abc"), Value::Int(123)]);

    store.write("extract", &ObjectSerializer::new(), &finished);
    store.write("summary", &JsonSerializer::new(), &summary);

    assert_eq!(store.read("extract").unwrap(), finished);
    assert_eq!(store.read("summary").unwrap(), summary);
    assert_eq!(store.entries["summary"].1, br#"["abc",123]"#.to_vec());
}

#[test]
fn test_store_serves_legacy_entries() {
    let mut store = ByteStore::default();
    let value = Value::from(vec![9u8, 8, 7]);
    let config = SerializerConfig::default().to_toml_string().unwrap();
    let legacy = BASE64.encode(bincode::serialize(&value).unwrap()).into_bytes();
    store.entries.insert("old".to_string(), (config, legacy));

    assert_eq!(store.read("old").unwrap(), value);
}

#[test]
fn test_corrupted_entry_reports_object_codec_error() {
    let mut store = ByteStore::default();
    store.write("extract", &ObjectSerializer::new(), &Value::Int(1));
    store.entries.get_mut("extract").unwrap().1 = b"bad-bytes".to_vec();

    let err = store.read("extract").unwrap_err();
    assert!(err.is_decode());
    assert_eq!(err.codec(), Some("object"));
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct ModelRun {
    name: String,
    started: Timestamp,
    weights: Vec<f32>,
}

#[test]
fn test_typed_engine_values() {
    let run = ModelRun {
        name: "train".into(),
        started: Timestamp::from_secs(1_700_000_000),
        weights: vec![0.5, -1.25],
    };
    let serializer = ObjectSerializer::new();

    let bytes = serializer.serialize_typed(&run).unwrap();
    assert_eq!(serializer.deserialize_typed::<ModelRun>(&bytes).unwrap(), run);

    let legacy = BASE64.encode(&bytes);
    assert_eq!(
        serializer
            .deserialize_typed::<ModelRun>(legacy.as_bytes())
            .unwrap(),
        run
    );

    let json = serde_json::to_vec(&run).unwrap();
    assert_eq!(JsonSerializer::new().serialize_typed(&run).unwrap(), json);
}
