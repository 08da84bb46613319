use std::collections::HashMap;

/// Normalized query to the suggestions retrieved for it.
///
/// Unbounded and never expired: entries live as long as the session.
#[derive(Debug, Default)]
pub struct SuggestionCache {
    entries: HashMap<String, Vec<String>>,
}

impl SuggestionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn put(&mut self, key: &str, value: Vec<String>) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
