use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Index of one chromosome's score table: normalized SNP key -> gene symbol.
pub type ChromosomeIndex = HashMap<String, String>;

/// Per-chromosome score file naming convention, e.g. `cS2G.7.SGscore`.
pub fn score_file_name(chrom: u8) -> String {
    format!("cS2G.{}.SGscore", chrom)
}

/// Normalize a score-table SNP field into its lookup key.
///
/// Fields are either bare rsIDs (`rs6742078`) or `chrom:pos_ref_alt`
/// composites (`2:10514_C_T`). For a composite whose chromosome prefix
/// matches the file's nominal chromosome the key is the base-pair position;
/// any other field is keyed by everything before the first `:` (the whole
/// field for rsIDs). A composite with a mismatched chromosome prefix is
/// still indexed, never rejected.
pub fn snp_key(snp_field: &str, chrom: u8) -> String {
    match snp_field.split_once(':') {
        Some((prefix, rest)) if prefix == chrom.to_string() => {
            rest.split('_').next().unwrap_or(rest).to_string()
        }
        Some((prefix, _)) => prefix.to_string(),
        None => snp_field.to_string(),
    }
}

/// Parse one per-chromosome score table (tab-separated, header
/// `SNP GENE cS2G INFO`) into a SNP-key -> gene map.
///
/// Duplicate keys within a chromosome silently overwrite earlier rows.
pub fn index_chromosome(path: &Path, chrom: u8) -> Result<ChromosomeIndex> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("Failed to open score table: {}", path.display()))?;

    let headers = rdr.headers()?.clone();
    let snp_col = headers
        .iter()
        .position(|h| h == "SNP")
        .with_context(|| format!("No SNP column in {}", path.display()))?;
    let gene_col = headers
        .iter()
        .position(|h| h == "GENE")
        .with_context(|| format!("No GENE column in {}", path.display()))?;

    let mut index = ChromosomeIndex::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to parse {} row {}", path.display(), i + 1))?;
        let snp_field = record
            .get(snp_col)
            .with_context(|| format!("Missing SNP field in {} row {}", path.display(), i + 1))?;
        let gene = record
            .get(gene_col)
            .with_context(|| format!("Missing GENE field in {} row {}", path.display(), i + 1))?;
        index.insert(snp_key(snp_field, chrom), gene.to_string());
    }

    Ok(index)
}

/// Index the score tables for chromosomes 1..=22 from a directory following
/// the `cS2G.<N>.SGscore` naming convention.
pub fn index_all_chromosomes(dir: &Path) -> Result<HashMap<u8, ChromosomeIndex>> {
    let mut indexes = HashMap::new();
    for chrom in 1..=22u8 {
        let path = dir.join(score_file_name(chrom));
        let index = index_chromosome(&path, chrom)
            .with_context(|| format!("Failed to index chromosome {}", chrom))?;
        indexes.insert(chrom, index);
    }
    Ok(indexes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_snp_key_rsid() {
        assert_eq!(snp_key("rs6742078", 2), "rs6742078");
    }

    #[test]
    fn test_snp_key_composite() {
        assert_eq!(snp_key("2:10514_C_T", 2), "10514");
    }

    #[test]
    fn test_snp_key_composite_no_alleles() {
        assert_eq!(snp_key("2:10514", 2), "10514");
    }

    #[test]
    fn test_snp_key_chromosome_mismatch() {
        // Mismatched embedded chromosome: keyed by the prefix, not rejected
        assert_eq!(snp_key("3:10514_C_T", 2), "3");
    }

    fn write_score_table(rows: &[(&str, &str)]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SNP\tGENE\tcS2G\tINFO").unwrap();
        for (snp, gene) in rows {
            writeln!(file, "{}\t{}\t1\t|ABC=1", snp, gene).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_index_chromosome() {
        let file = write_score_table(&[
            ("2:10514_C_T", "FAM110C"),
            ("rs6742078", "UGT1A1"),
            ("3:999_A_G", "ODDBALL"),
        ]);

        let index = index_chromosome(file.path(), 2).unwrap();
        assert_eq!(index.get("10514").map(String::as_str), Some("FAM110C"));
        assert_eq!(index.get("rs6742078").map(String::as_str), Some("UGT1A1"));
        // Mismatched row tolerated, keyed by its prefix
        assert_eq!(index.get("3").map(String::as_str), Some("ODDBALL"));
    }

    #[test]
    fn test_index_chromosome_duplicate_overwrites() {
        let file = write_score_table(&[
            ("2:10514_C_T", "FIRST"),
            ("2:10514_G_A", "SECOND"),
        ]);

        let index = index_chromosome(file.path(), 2).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("10514").map(String::as_str), Some("SECOND"));
    }

    #[test]
    fn test_index_chromosome_missing_file() {
        let result = index_chromosome(Path::new("/nonexistent/cS2G.1.SGscore"), 1);
        assert!(result.is_err());
    }
}
