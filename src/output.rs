use crate::annotation::AnnotationMatrix;
use anyhow::Result;
use csv::WriterBuilder;
use std::path::Path;

/// Write the annotation matrix as a space-delimited text table: header row
/// of column names, one row per SNP in universe order, values `1`/`0`, no
/// index column. Column names containing spaces are quoted.
pub fn write_matrix(matrix: &AnnotationMatrix, path: &Path) -> Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(b' ').from_path(path)?;

    wtr.write_record(&matrix.columns)?;

    for row in &matrix.rows {
        wtr.write_record(row.iter().map(|v| if *v == 1 { "1" } else { "0" }))?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_matrix() {
        let matrix = AnnotationMatrix {
            columns: vec![
                "GCTA".to_string(),
                "All genes".to_string(),
                "T1".to_string(),
            ],
            snps: vec!["rs1".to_string(), "rs2".to_string()],
            rows: vec![vec![1, 1, 1], vec![1, 0, 0]],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CT_Annotations.txt");
        write_matrix(&matrix, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        // "All genes" contains the delimiter, so it comes out quoted
        assert_eq!(lines[0], "GCTA \"All genes\" T1");
        assert_eq!(lines[1], "1 1 1");
        assert_eq!(lines[2], "1 0 0");
    }

    #[test]
    fn test_row_count_matches_universe() {
        let n = 100;
        let matrix = AnnotationMatrix {
            columns: vec!["GCTA".to_string(), "All genes".to_string()],
            snps: (0..n).map(|i| format!("rs{}", i)).collect(),
            rows: (0..n).map(|_| vec![1, 0]).collect(),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_matrix(&matrix, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), n + 1);
    }
}
