//! Merchant private data: a schema-free tree carried opaquely on carts and items.

use serde::{Deserialize, Serialize};

/// A node of the private-data tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivateData {
    Scalar(String),
    List(Vec<PrivateData>),
    Map(PrivateDataMap),
}

impl PrivateData {
    pub fn scalar(value: impl Into<String>) -> Self {
        PrivateData::Scalar(value.into())
    }

    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PrivateData>,
    {
        PrivateData::List(values.into_iter().map(Into::into).collect())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            PrivateData::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&PrivateDataMap> {
        match self {
            PrivateData::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<&str> for PrivateData {
    fn from(value: &str) -> Self {
        PrivateData::Scalar(value.to_string())
    }
}

impl From<String> for PrivateData {
    fn from(value: String) -> Self {
        PrivateData::Scalar(value)
    }
}

impl From<PrivateDataMap> for PrivateData {
    fn from(value: PrivateDataMap) -> Self {
        PrivateData::Map(value)
    }
}

/// String-keyed map that keeps insertion order.
///
/// Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateDataMap {
    entries: Vec<(String, PrivateData)>,
}

impl PrivateDataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<PrivateData>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PrivateData>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PrivateData> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PrivateData)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for PrivateDataMap
where
    K: Into<String>,
    V: Into<PrivateData>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PrivateDataMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
