//! Ordered attribute bag copied from a region element

use crate::errors::{SegError, SegResult};

/// Attribute holding the region identifier
pub const ID_KEY: &str = "id";
/// Attribute holding the region type classifier
pub const TYPE_KEY: &str = "type";
/// Attribute names holding the language tag, in lookup order
pub const LANGUAGE_KEYS: [&str; 2] = ["primaryLanguage", "language"];

/// String attributes in source order with unique keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute bag
    pub fn new() -> Self {
        Attributes::default()
    }

    /// Insert an attribute, replacing the value of an existing key in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up an attribute value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up an attribute that must be present
    ///
    /// # Arguments
    /// * `key` - Attribute name
    /// * `region` - Region label used in the error message
    ///
    /// # Returns
    /// The value or `SegError::AttributeLookup`
    pub fn require(&self, key: &str, region: &str) -> SegResult<&str> {
        self.get(key).ok_or_else(|| SegError::AttributeLookup {
            key: key.to_string(),
            region: region.to_string(),
        })
    }

    /// The region identifier
    pub fn id(&self) -> Option<&str> {
        self.get(ID_KEY)
    }

    /// The region type classifier
    pub fn region_type(&self) -> Option<&str> {
        self.get(TYPE_KEY)
    }

    /// The language tag
    pub fn language(&self) -> Option<&str> {
        LANGUAGE_KEYS.iter().find_map(|key| self.get(key))
    }

    /// Iterate over `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}
