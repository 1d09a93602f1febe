use crate::types::OrderedMap;
use anyhow::{Context, Result};
use std::path::Path;

const GENE_COLUMN: &str = "official gene symbol";
const CELL_TYPE_COLUMN: &str = "cell type";

/// Read a tab-separated marker table into a gene -> cell type map.
///
/// Only the `official gene symbol` and `cell type` columns are consumed;
/// the table may carry any number of others. A gene appearing on several
/// rows keeps the last cell type read (overwrite, not accumulation).
pub fn read_marker_table(path: &Path) -> Result<OrderedMap> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("Failed to open marker table: {}", path.display()))?;

    let headers = rdr.headers()?.clone();
    let gene_col = headers
        .iter()
        .position(|h| h == GENE_COLUMN)
        .with_context(|| format!("No '{}' column in {}", GENE_COLUMN, path.display()))?;
    let ct_col = headers
        .iter()
        .position(|h| h == CELL_TYPE_COLUMN)
        .with_context(|| format!("No '{}' column in {}", CELL_TYPE_COLUMN, path.display()))?;

    let mut g2ct = OrderedMap::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to parse {} row {}", path.display(), i + 1))?;
        let gene = record
            .get(gene_col)
            .with_context(|| format!("Missing gene symbol in {} row {}", path.display(), i + 1))?;
        let cell_type = record
            .get(ct_col)
            .with_context(|| format!("Missing cell type in {} row {}", path.display(), i + 1))?;
        g2ct.insert(gene.to_string(), cell_type.to_string());
    }

    Ok(g2ct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_marker_table(rows: &[(&str, &str)]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "species\tofficial gene symbol\tcell type\tnicknames"
        )
        .unwrap();
        for (gene, ct) in rows {
            writeln!(file, "Hs\t{}\t{}\t-", gene, ct).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_marker_table() {
        let file = write_marker_table(&[("CD19", "B cells"), ("CD3E", "T cells")]);
        let g2ct = read_marker_table(file.path()).unwrap();
        assert_eq!(g2ct.len(), 2);
        assert_eq!(g2ct.get("CD19"), Some("B cells"));
        assert_eq!(g2ct.get("CD3E"), Some("T cells"));
    }

    #[test]
    fn test_repeated_gene_last_row_wins() {
        let file = write_marker_table(&[
            ("CD19", "B cells"),
            ("CD3E", "T cells"),
            ("CD19", "Plasma cells"),
        ]);
        let g2ct = read_marker_table(file.path()).unwrap();
        assert_eq!(g2ct.len(), 2);
        assert_eq!(g2ct.get("CD19"), Some("Plasma cells"));
        // Overwrite keeps the gene's first-read position
        let keys: Vec<&str> = g2ct.keys().collect();
        assert_eq!(keys, vec!["CD19", "CD3E"]);
    }

    #[test]
    fn test_missing_required_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "species\tgene\tcell type").unwrap();
        writeln!(file, "Hs\tCD19\tB cells").unwrap();
        file.flush().unwrap();

        let err = read_marker_table(file.path()).unwrap_err();
        assert!(err.to_string().contains("official gene symbol"));
    }
}
