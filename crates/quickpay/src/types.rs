//! Wire representation shared by request forms and callbacks.

use std::collections::HashMap;

use serde::Serialize;

/// Flat, ordered string to string pairs as posted in a form body or received in a callback.
///
/// Names are compared ASCII case-insensitively; insertion order is kept so that serializing
/// the same parameter set twice yields the same bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlatMapping {
    entries: Vec<(String, String)>,
    /// ASCII-lowercased name to position in `entries`
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl FlatMapping {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` body or query string.
    /// A name given more than once keeps its last value.
    pub fn from_form_urlencoded(input: &[u8]) -> Self {
        url::form_urlencoded::parse(input)
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect()
    }

    /// Value stored under `name`, compared ASCII case-insensitively
    pub fn get(&self, name: &str) -> Option<&str> {
        self.positions
            .get(&name.to_ascii_lowercase())
            .and_then(|position| self.entries.get(*position))
            .map(|(_, value)| value.as_str())
    }

    /// Stores `value` under `name`, replacing an existing entry whose name matches case-insensitively.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let key = name.to_ascii_lowercase();

        match self
            .positions
            .get(&key)
            .and_then(|position| self.entries.get_mut(*position))
        {
            Some(entry) => entry.1 = value,
            None => {
                self.positions.insert(key, self.entries.len());
                self.entries.push((name, value));
            }
        }
    }

    /// Whether an entry exists under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(&name.to_ascii_lowercase())
    }

    /// Iterates over the entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Iterates over the names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FlatMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut mapping = Self::new();
        for (name, value) in iter {
            mapping.insert(name, value);
        }
        mapping
    }
}

impl IntoIterator for FlatMapping {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
