//! Dynamically-typed metadata: `AnyValue` and the insertion-ordered `AnyDictionary`.
//!
//! The value set is closed. Time values travel through JSON as schema-tagged
//! objects (`{"OTIO_SCHEMA": "RationalTime.1", ...}`); any other object is a
//! nested dictionary.

use indexmap::IndexMap;
use otio_opentime_core::{RationalTime, TimeRange};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as JsonValue};

use crate::error::{ErrorKind, OtioError};
use crate::serialization::SCHEMA_KEY;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "JsonValue", into = "JsonValue")]
pub enum AnyValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    RationalTime(RationalTime),
    TimeRange(TimeRange),
    Dictionary(AnyDictionary),
    Vector(Vec<AnyValue>),
}

impl AnyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            AnyValue::Null => "null",
            AnyValue::Bool(_) => "bool",
            AnyValue::Int(_) => "int",
            AnyValue::Double(_) => "double",
            AnyValue::String(_) => "string",
            AnyValue::RationalTime(_) => "RationalTime",
            AnyValue::TimeRange(_) => "TimeRange",
            AnyValue::Dictionary(_) => "AnyDictionary",
            AnyValue::Vector(_) => "AnyVector",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AnyValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Doubles, and ints widened to doubles.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            AnyValue::Double(d) => Some(*d),
            AnyValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&AnyDictionary> {
        match self {
            AnyValue::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[AnyValue]> {
        match self {
            AnyValue::Vector(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for AnyValue {
    fn from(v: bool) -> Self {
        AnyValue::Bool(v)
    }
}

impl From<i64> for AnyValue {
    fn from(v: i64) -> Self {
        AnyValue::Int(v)
    }
}

impl From<i32> for AnyValue {
    fn from(v: i32) -> Self {
        AnyValue::Int(v.into())
    }
}

impl From<f64> for AnyValue {
    fn from(v: f64) -> Self {
        AnyValue::Double(v)
    }
}

impl From<&str> for AnyValue {
    fn from(v: &str) -> Self {
        AnyValue::String(v.to_string())
    }
}

impl From<String> for AnyValue {
    fn from(v: String) -> Self {
        AnyValue::String(v)
    }
}

impl From<RationalTime> for AnyValue {
    fn from(v: RationalTime) -> Self {
        AnyValue::RationalTime(v)
    }
}

impl From<TimeRange> for AnyValue {
    fn from(v: TimeRange) -> Self {
        AnyValue::TimeRange(v)
    }
}

impl From<AnyDictionary> for AnyValue {
    fn from(v: AnyDictionary) -> Self {
        AnyValue::Dictionary(v)
    }
}

impl From<Vec<AnyValue>> for AnyValue {
    fn from(v: Vec<AnyValue>) -> Self {
        AnyValue::Vector(v)
    }
}

impl TryFrom<JsonValue> for AnyValue {
    type Error = OtioError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Ok(match value {
            JsonValue::Null => AnyValue::Null,
            JsonValue::Bool(b) => AnyValue::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => AnyValue::Int(i),
                None => AnyValue::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => AnyValue::String(s),
            JsonValue::Array(items) => AnyValue::Vector(
                items
                    .into_iter()
                    .map(AnyValue::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            JsonValue::Object(obj) => {
                let schema = obj
                    .get(SCHEMA_KEY)
                    .and_then(JsonValue::as_str)
                    .map(str::to_owned);
                match schema.as_deref() {
                    Some("RationalTime.1") => AnyValue::RationalTime(
                        serde_json::from_value(JsonValue::Object(obj))
                            .map_err(|e| malformed("RationalTime.1", e))?,
                    ),
                    Some("TimeRange.1") => AnyValue::TimeRange(
                        serde_json::from_value(JsonValue::Object(obj))
                            .map_err(|e| malformed("TimeRange.1", e))?,
                    ),
                    _ => AnyValue::Dictionary(AnyDictionary::try_from(obj)?),
                }
            }
        })
    }
}

fn malformed(schema: &str, err: serde_json::Error) -> OtioError {
    OtioError::new(
        ErrorKind::MalformedSchema,
        format!("malformed {schema} value: {err}"),
    )
}

impl From<AnyValue> for JsonValue {
    fn from(value: AnyValue) -> Self {
        match value {
            AnyValue::Null => JsonValue::Null,
            AnyValue::Bool(b) => JsonValue::Bool(b),
            AnyValue::Int(i) => JsonValue::Number(i.into()),
            AnyValue::Double(d) => Number::from_f64(d)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            AnyValue::String(s) => JsonValue::String(s),
            AnyValue::RationalTime(t) => serde_json::to_value(t).unwrap_or(JsonValue::Null),
            AnyValue::TimeRange(r) => serde_json::to_value(r).unwrap_or(JsonValue::Null),
            AnyValue::Dictionary(d) => JsonValue::Object(d.into()),
            AnyValue::Vector(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
        }
    }
}

/// Insertion-ordered string → [`AnyValue`] mapping.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnyDictionary(IndexMap<String, AnyValue>);

impl AnyDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AnyValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut AnyValue> {
        self.0.get_mut(key)
    }

    /// Insert or overwrite; returns the previous value for an existing key.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<AnyValue>) -> Option<AnyValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Overwrite only when `key` exists; returns the previous value, or `None`
    /// (leaving the dictionary untouched) when it does not.
    pub fn replace(&mut self, key: &str, value: impl Into<AnyValue>) -> Option<AnyValue> {
        self.0
            .get_mut(key)
            .map(|slot| std::mem::replace(slot, value.into()))
    }

    /// Remove `key`, keeping the relative order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<AnyValue> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &AnyValue> {
        self.0.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_string(&self, key: &str) -> Result<&str, OtioError> {
        self.typed(key, AnyValue::as_str, "string")
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, OtioError> {
        self.typed(key, AnyValue::as_bool, "bool")
    }

    pub fn get_int(&self, key: &str) -> Result<i64, OtioError> {
        self.typed(key, AnyValue::as_int, "int")
    }

    pub fn get_double(&self, key: &str) -> Result<f64, OtioError> {
        self.typed(key, AnyValue::as_double, "double")
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        pick: impl FnOnce(&'a AnyValue) -> Option<T>,
        expected: &str,
    ) -> Result<T, OtioError> {
        let value = self.0.get(key).ok_or_else(|| {
            OtioError::new(ErrorKind::KeyNotFound, format!("no metadata key '{key}'"))
        })?;
        let found = value.type_name();
        pick(value).ok_or_else(|| {
            OtioError::new(
                ErrorKind::TypeMismatch,
                format!("metadata key '{key}' holds {found}, expected {expected}"),
            )
        })
    }
}

/// Ordered comparison: same entries in the same order.
impl PartialEq for AnyDictionary {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl<K: Into<String>, V: Into<AnyValue>> FromIterator<(K, V)> for AnyDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl TryFrom<Map<String, JsonValue>> for AnyDictionary {
    type Error = OtioError;

    fn try_from(obj: Map<String, JsonValue>) -> Result<Self, Self::Error> {
        let mut out = IndexMap::with_capacity(obj.len());
        for (k, v) in obj {
            out.insert(k, AnyValue::try_from(v)?);
        }
        Ok(Self(out))
    }
}

impl From<AnyDictionary> for Map<String, JsonValue> {
    fn from(dict: AnyDictionary) -> Self {
        dict.0
            .into_iter()
            .map(|(k, v)| (k, JsonValue::from(v)))
            .collect()
    }
}

impl std::fmt::Display for AnyDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AnyDictionary{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={}", JsonValue::from(v.clone()))?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn put_returns_previous_and_keeps_order() {
        let mut d = AnyDictionary::new();
        assert_eq!(d.put("b", 1), None);
        assert_eq!(d.put("a", "x"), None);
        assert_eq!(d.put("b", 2), Some(AnyValue::Int(1)));
        assert_eq!(d.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn replace_only_touches_existing_keys() {
        let mut d = AnyDictionary::new();
        assert_eq!(d.replace("missing", true), None);
        assert!(d.is_empty());
        d.put("k", false);
        assert_eq!(d.replace("k", true), Some(AnyValue::Bool(false)));
        assert!(d.get_bool("k").unwrap());
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut d: AnyDictionary = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(d.remove("b"), Some(AnyValue::Int(2)));
        assert_eq!(d.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let a: AnyDictionary = [("x", 1), ("y", 2)].into_iter().collect();
        let b: AnyDictionary = [("y", 2), ("x", 1)].into_iter().collect();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn typed_getters_report_kind() {
        let mut d = AnyDictionary::new();
        d.put("n", 3);
        assert_eq!(d.get_double("n").unwrap(), 3.0);
        assert_eq!(d.get_string("n").unwrap_err().kind, ErrorKind::TypeMismatch);
        assert_eq!(d.get_int("nope").unwrap_err().kind, ErrorKind::KeyNotFound);
    }

    #[test]
    fn json_round_trip_with_time_values() {
        let raw = json!({
            "foo": "bar",
            "count": 4,
            "ratio": 0.5,
            "when": { "OTIO_SCHEMA": "RationalTime.1", "value": 12.0, "rate": 24.0 },
            "nested": { "inner": [1, true, null] }
        });
        let d: AnyDictionary = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            d.get("when"),
            Some(&AnyValue::RationalTime(RationalTime::new(12.0, 24.0)))
        );
        assert_eq!(d.get_int("count").unwrap(), 4);
        assert!(d.get("nested").and_then(AnyValue::as_dictionary).is_some());
        assert_eq!(serde_json::to_value(&d).unwrap(), raw);
    }

    #[test]
    fn malformed_time_is_rejected() {
        let raw = json!({ "OTIO_SCHEMA": "TimeRange.1", "start_time": 3 });
        let err = AnyValue::try_from(raw).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedSchema);
    }
}
