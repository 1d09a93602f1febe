use crate::types::OrderedMap;
use std::collections::{HashMap, HashSet};

/// Cell-type columns are truncated to the first this-many distinct cell
/// types encountered. Kept for reproducibility of prior outputs.
pub const MAX_CELL_TYPE_COLUMNS: usize = 50;

/// Constant-1 baseline column, named for the downstream tool.
pub const BASELINE_COLUMN: &str = "GCTA";
/// 1 iff the SNP has any gene mapping at all.
pub const ALL_GENES_COLUMN: &str = "All genes";

/// SNPs grouped under one cell type.
#[derive(Debug)]
pub struct CellTypeSnps {
    pub cell_type: String,
    pub snps: HashSet<String>,
}

/// Binary annotation matrix over the full SNP universe. One row per SNP in
/// `snps`, one 0/1 value per column in `columns`.
#[derive(Debug)]
pub struct AnnotationMatrix {
    pub columns: Vec<String>,
    pub snps: Vec<String>,
    pub rows: Vec<Vec<u8>>,
}

/// Compose SNP -> gene with gene -> cell type, grouping SNPs per cell type.
///
/// SNPs whose gene has no cell type are dropped here (they still count
/// toward the `All genes` column). Cell types come out in first-encounter
/// order over the SNP -> gene map, which fixes the column order downstream.
pub fn compose_cell_type_snps(s2g: &OrderedMap, g2ct: &OrderedMap) -> Vec<CellTypeSnps> {
    let mut groups: Vec<CellTypeSnps> = Vec::new();
    let mut by_cell_type: HashMap<String, usize> = HashMap::new();

    for (snp, gene) in s2g.iter() {
        let Some(cell_type) = g2ct.get(gene) else {
            continue;
        };
        let idx = *by_cell_type
            .entry(cell_type.to_string())
            .or_insert_with(|| {
                groups.push(CellTypeSnps {
                    cell_type: cell_type.to_string(),
                    snps: HashSet::new(),
                });
                groups.len() - 1
            });
        groups[idx].snps.insert(snp.to_string());
    }

    groups
}

/// Build the binary annotation matrix over the full SNP universe, in
/// universe order.
///
/// Columns, in order: baseline (always 1), `All genes` (1 iff the SNP is in
/// the SNP -> gene key domain), then one column per cell type, truncated to
/// the first `max_cell_types` encountered.
pub fn build_matrix(
    universe: &[String],
    s2g: &OrderedMap,
    cell_type_snps: &[CellTypeSnps],
    max_cell_types: usize,
) -> AnnotationMatrix {
    let kept = &cell_type_snps[..cell_type_snps.len().min(max_cell_types)];

    let mut columns = vec![BASELINE_COLUMN.to_string(), ALL_GENES_COLUMN.to_string()];
    columns.extend(kept.iter().map(|g| g.cell_type.clone()));

    let rows = universe
        .iter()
        .map(|snp| {
            let mut row = Vec::with_capacity(columns.len());
            row.push(1);
            row.push(u8::from(s2g.contains_key(snp)));
            for group in kept {
                row.push(u8::from(group.snps.contains(snp)));
            }
            row
        })
        .collect();

    AnnotationMatrix {
        columns,
        snps: universe.to_vec(),
        rows,
    }
}
