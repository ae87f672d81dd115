//! The flat key-value bundle carried by the transport.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// A scalar bundle value. URIs travel as strings.
///
/// When read from JSON, integers outside `i32`, floats and booleans are kept
/// as their text form so that [`to_int`](Self::to_int) rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BundleValue {
    Int(i32),
    Str(String),
}

impl BundleValue {
    /// Text form of the value; integers are rendered in decimal.
    pub fn to_text(&self) -> String {
        match self {
            BundleValue::Int(n) => n.to_string(),
            BundleValue::Str(s) => s.clone(),
        }
    }

    /// Integer form of the value, parsing strings that hold a number.
    pub fn to_int(&self) -> Option<i32> {
        match self {
            BundleValue::Int(n) => Some(*n),
            BundleValue::Str(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for BundleValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BundleValue::Int(n) => write!(f, "{}", n),
            BundleValue::Str(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<&str> for BundleValue {
    fn from(value: &str) -> Self {
        BundleValue::Str(value.to_string())
    }
}

impl From<String> for BundleValue {
    fn from(value: String) -> Self {
        BundleValue::Str(value)
    }
}

impl From<i32> for BundleValue {
    fn from(value: i32) -> Self {
        BundleValue::Int(value)
    }
}

struct BundleValueVisitor;

impl<'de> Visitor<'de> for BundleValueVisitor {
    type Value = BundleValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<BundleValue, E> {
        Ok(BundleValue::Str(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<BundleValue, E> {
        Ok(i32::try_from(v).map_or_else(|_| BundleValue::Str(v.to_string()), BundleValue::Int))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<BundleValue, E> {
        Ok(i32::try_from(v).map_or_else(|_| BundleValue::Str(v.to_string()), BundleValue::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<BundleValue, E> {
        // `{:?}` keeps the fraction (`30.0`), so the text never parses as an int.
        Ok(BundleValue::Str(format!("{:?}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<BundleValue, E> {
        Ok(BundleValue::Str(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<BundleValue, E> {
        Ok(BundleValue::Str(v))
    }
}

impl<'de> Deserialize<'de> for BundleValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BundleValueVisitor)
    }
}

/// A single-level, string-keyed map used as the wire payload.
///
/// Keys iterate in sorted order so that printed bundles are stable.
/// Null entries are dropped on deserialization: the host writes `null` for
/// absent extras, which reads the same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlatBundle {
    entries: BTreeMap<String, BundleValue>,
}

impl FlatBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous value under the key.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<BundleValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Inserts a string only when one is present.
    pub fn put_opt(&mut self, key: impl Into<String>, value: Option<&str>) {
        if let Some(v) = value {
            self.put(key, v);
        }
    }

    pub fn get(&self, key: &str) -> Option<&BundleValue> {
        self.entries.get(key)
    }

    /// Reads a value as text. Integer values are rendered to text.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(BundleValue::to_text)
    }

    /// Reads a value as an integer. Non-numeric strings read as `None`.
    pub fn int(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(BundleValue::to_int)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<BundleValue> {
        self.entries.remove(key)
    }

    /// Copies every entry of `other` into this bundle.
    pub fn merge(&mut self, other: FlatBundle) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, BundleValue> {
        self.entries.iter()
    }
}

struct FlatBundleVisitor;

impl<'de> Visitor<'de> for FlatBundleVisitor {
    type Value = FlatBundle;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a flat map of scalar values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FlatBundle, A::Error> {
        let mut bundle = FlatBundle::new();
        while let Some((key, value)) = map.next_entry::<String, Option<BundleValue>>()? {
            if let Some(value) = value {
                bundle.put(key, value);
            }
        }
        Ok(bundle)
    }
}

impl<'de> Deserialize<'de> for FlatBundle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FlatBundleVisitor)
    }
}

impl<'a> IntoIterator for &'a FlatBundle {
    type Item = (&'a String, &'a BundleValue);
    type IntoIter = btree_map::Iter<'a, String, BundleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<BundleValue>> FromIterator<(K, V)> for FlatBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bundle = FlatBundle::new();
        for (k, v) in iter {
            bundle.put(k, v);
        }
        bundle
    }
}
