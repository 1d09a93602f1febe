use crate::bim;
use crate::sgscore::{self, ChromosomeIndex};
use crate::types::{BimRecord, OrderedMap, SnpSource};
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// A manifest row that could not be resolved against its chromosome index.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSnp {
    pub chrom: u8,
    pub snp: String,
}

/// Diagnostics from resolving a genotype manifest against the chromosome
/// indexes. Lookup misses are collected here, never raised as errors.
#[derive(Debug, Default)]
pub struct ResolveReport {
    pub resolved: usize,
    pub skipped: Vec<SkippedSnp>,
}

/// Join manifest rows against the per-chromosome indexes into one global
/// SNP -> gene map, keyed by SNP id and ordered by the manifest.
///
/// Each row is looked up by its SNP id first, then by its base-pair
/// position. Rows that miss both ways, or whose chromosome has no index,
/// are recorded in the report and dropped.
pub fn resolve(
    manifest: &[BimRecord],
    indexes: &HashMap<u8, ChromosomeIndex>,
) -> (OrderedMap, ResolveReport) {
    let mut s2g = OrderedMap::new();
    let mut report = ResolveReport::default();

    for row in manifest {
        let gene = indexes.get(&row.chrom).and_then(|index| {
            index
                .get(&row.snp)
                .or_else(|| index.get(&row.pos.to_string()))
        });
        match gene {
            Some(gene) => {
                s2g.insert(row.snp.clone(), gene.clone());
                report.resolved += 1;
            }
            None => report.skipped.push(SkippedSnp {
                chrom: row.chrom,
                snp: row.snp.clone(),
            }),
        }
    }

    (s2g, report)
}

/// Build the global SNP -> gene map from a SNP universe source and a
/// directory of per-chromosome score tables.
///
/// Supplying no source is a configuration error; a plain SNP list is
/// recognized but not supported. Both fail before any I/O.
pub fn build_snp_to_gene(
    source: Option<&SnpSource>,
    chrom_dir: &Path,
) -> Result<(OrderedMap, ResolveReport)> {
    let bim_path = match source {
        Some(SnpSource::Bim(path)) => path,
        Some(SnpSource::SnpList(_)) => {
            anyhow::bail!("SNP-list universe input is not implemented; use a .bim manifest")
        }
        None => anyhow::bail!("A SNP universe source (.bim manifest) must be supplied"),
    };

    let indexes = sgscore::index_all_chromosomes(chrom_dir)?;
    let manifest = bim::read_bim(bim_path)?;
    Ok(resolve(&manifest, &indexes))
}
