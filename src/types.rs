use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// One row of a PLINK-style .bim genotype manifest
#[derive(Debug, Clone, PartialEq)]
pub struct BimRecord {
    pub chrom: u8,
    pub snp: String,
    /// Genetic distance column, carried verbatim (placeholder in the source data)
    pub cm: String,
    pub pos: u64,
    pub minor_allele: String,
    pub major_allele: String,
}

/// Where the SNP universe comes from when building the SNP-to-gene map
#[derive(Debug, Clone)]
pub enum SnpSource {
    /// PLINK .bim genotype manifest
    Bim(PathBuf),
    /// Plain SNP list (recognized but not supported)
    SnpList(PathBuf),
}

/// String-to-string map that preserves insertion order.
///
/// Inserting an existing key overwrites its value but keeps the key's
/// original position. The annotation column order depends on this:
/// cell-type columns appear in first-encounter order, and re-reading a
/// gene must not move it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct OrderedMap {
    keys: Vec<String>,
    values: HashMap<String, String>,
}

impl OrderedMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Last write wins; first insertion fixes the position.
    pub fn insert(&mut self, key: String, value: String) {
        if !self.values.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .map(|k| (k.as_str(), self.values[k].as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl From<Vec<(String, String)>> for OrderedMap {
    fn from(entries: Vec<(String, String)>) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in entries {
            map.insert(k, v);
        }
        map
    }
}

impl From<OrderedMap> for Vec<(String, String)> {
    fn from(map: OrderedMap) -> Self {
        map.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
