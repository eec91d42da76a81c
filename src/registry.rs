//! Accumulator for keys found in layer queries.

use std::collections::HashMap;

use crate::catalog::{GeometryClass, ObjectTypes, TagEntry};

/// Maps each key to the geometry classes it was seen on, in first-seen key order.
#[derive(Debug, Default)]
pub struct TagRegistry {
    entries: Vec<(String, ObjectTypes)>,
    index: HashMap<String, usize>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `key` was used by a layer of the given geometry.
    ///
    /// The first call for a key creates its entry even when the geometry is
    /// unknown; later calls only add classes not already present.
    pub fn record(&mut self, key: &str, geometry: Option<GeometryClass>) {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.entries.push((key.to_string(), ObjectTypes::new()));
                let idx = self.entries.len() - 1;
                self.index.insert(key.to_string(), idx);
                idx
            }
        };
        if let Some(geometry) = geometry {
            self.entries[idx].1.insert(geometry);
        }
    }

    /// Apply the relation closure to every key.
    pub fn close(&mut self) {
        for (_, types) in &mut self.entries {
            types.close();
        }
    }

    pub fn get(&self, key: &str) -> Option<&ObjectTypes> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Freeze into catalog entries.
    pub fn into_entries<F>(self, description: &str, doc_url: F) -> Vec<TagEntry>
    where
        F: Fn(&str) -> String,
    {
        self.entries
            .into_iter()
            .map(|(key, object_types)| TagEntry {
                doc_url: doc_url(&key),
                description: description.to_string(),
                key,
                object_types,
            })
            .collect()
    }
}
