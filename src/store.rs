use crate::types::OrderedMap;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Persist a map artifact as a JSON array of `[key, value]` pairs in
/// insertion order. Loading reconstructs the exact keys, values, and
/// iteration order.
pub fn save_map(map: &OrderedMap, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create map artifact: {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), map)
        .with_context(|| format!("Failed to write map artifact: {}", path.display()))?;
    Ok(())
}

pub fn load_map(path: &Path) -> Result<OrderedMap> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open map artifact: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read map artifact: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_exact() {
        let mut map = OrderedMap::new();
        map.insert("rs3115860".into(), "FAM110C".into());
        map.insert("1:13289_CCT_C".into(), "UGT1A1".into());
        map.insert("rs3131970".into(), "FAM110C".into());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s2g_dict.json");
        save_map(&map, &path).unwrap();
        let loaded = load_map(&path).unwrap();

        assert_eq!(loaded, map);
        // Iteration order survives too
        let before: Vec<(&str, &str)> = map.iter().collect();
        let after: Vec<(&str, &str)> = loaded.iter().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_load_missing_artifact_is_fatal() {
        assert!(load_map(Path::new("/nonexistent/dict.json")).is_err());
    }
}
