use crate::types::BimRecord;
use anyhow::{Context, Result};
use std::path::Path;

/// Read a PLINK-style .bim genotype manifest: tab-separated, no header,
/// six columns (chromosome, SNP id, genetic distance, bp position, minor
/// allele, major allele). Manifest order is preserved; it fixes the row
/// order of the final annotation matrix.
pub fn read_bim(path: &Path) -> Result<Vec<BimRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to open genotype manifest: {}", path.display()))?;

    let mut records = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to parse {} row {}", path.display(), i + 1))?;
        records.push(parse_bim_record(&record, i + 1)?);
    }

    Ok(records)
}

fn parse_bim_record(record: &csv::StringRecord, row: usize) -> Result<BimRecord> {
    if record.len() < 6 {
        anyhow::bail!(
            "Manifest row {} has {} columns, expected 6",
            row,
            record.len()
        );
    }
    let chrom: u8 = record[0]
        .parse()
        .with_context(|| format!("Invalid chromosome '{}' at row {}", &record[0], row))?;
    let pos: u64 = record[3]
        .parse()
        .with_context(|| format!("Invalid bp position '{}' at row {}", &record[3], row))?;

    Ok(BimRecord {
        chrom,
        snp: record[1].to_string(),
        cm: record[2].to_string(),
        pos,
        minor_allele: record[4].to_string(),
        major_allele: record[5].to_string(),
    })
}
