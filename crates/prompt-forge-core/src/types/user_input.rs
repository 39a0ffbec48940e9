use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Live user-supplied values keyed by field name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserInput(IndexMap<String, String>);

impl UserInput {
    /// Field name used when a single free-form input is supplied.
    pub const DEFAULT_FIELD: &'static str = "input";

    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding one value under [`Self::DEFAULT_FIELD`].
    pub fn single(value: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set(Self::DEFAULT_FIELD, value);
        input
    }

    /// Inserts or replaces a value; a replaced key keeps its original position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries whose value is non-blank after trimming, in insertion order.
    pub fn non_blank(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(_, v)| !v.trim().is_empty())
    }

    /// Overlays `other` onto `self`; keys from `other` win.
    pub fn merge(&mut self, other: UserInput) {
        for (k, v) in other.0 {
            self.0.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UserInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
