use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Free-form key/value annotations. Keys serialize in sorted order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(flatten)]
    inner: BTreeMap<String, Value>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Serialize>(&mut self, key: K, value: V) -> Option<Value> {
        match serde_json::to_value(value) {
            Ok(v) => self.inner.insert(key.into(), v),
            Err(_) => None,
        }
    }

    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.inner
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_roundtrip() {
        let mut meta = Metadata::new();
        meta.insert("path", "/tmp/a.txt");
        meta.insert("size", 42u64);

        assert_eq!(meta.get::<String>("path").as_deref(), Some("/tmp/a.txt"));
        assert_eq!(meta.get::<u64>("size"), Some(42));
        assert_eq!(meta.get::<u64>("path"), None);
        assert_eq!(meta.len(), 2);
    }

    #[test]
    fn test_serializes_sorted() {
        let mut meta = Metadata::new();
        meta.insert("z", 1);
        meta.insert("a", 2);
        assert_eq!(serde_json::to_string(&meta).unwrap(), r#"{"a":2,"z":1}"#);
    }
}
