use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use snp2ct::types::{OrderedMap, SnpSource};
use snp2ct::{annotation, bim, markers, output, resolver, store};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snp2ct")]
#[command(version)]
#[command(about = "Build a per-SNP cell-type annotation matrix", long_about = None)]
struct Args {
    /// PLINK .bim genotype manifest (SNP universe)
    #[arg(long)]
    bim: Option<PathBuf>,

    /// Plain SNP list as universe (recognized, not yet supported)
    #[arg(long, conflicts_with = "bim")]
    snp_list: Option<PathBuf>,

    /// Directory of per-chromosome cS2G.<N>.SGscore tables
    #[arg(long)]
    chrom_dir: Option<PathBuf>,

    /// Tab-separated marker table (gene symbols and cell types)
    #[arg(long)]
    markers: Option<PathBuf>,

    /// Persisted SNP-to-gene map artifact
    #[arg(long, default_value = "S2G_dict.json")]
    s2g_dict: PathBuf,

    /// Persisted gene-to-cell-type map artifact
    #[arg(long, default_value = "G2CT_dict.json")]
    g2ct_dict: PathBuf,

    /// Output annotation matrix file
    #[arg(short, long)]
    output: PathBuf,

    /// Maximum number of cell-type columns in the matrix
    #[arg(long, default_value_t = annotation::MAX_CELL_TYPE_COLUMNS)]
    max_cell_types: usize,

    /// Rebuild persisted map artifacts even if they already exist
    #[arg(long)]
    force: bool,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

macro_rules! progress {
    ($quiet:expr) => {
        if !$quiet {
            eprintln!();
        }
    };
    ($quiet:expr, $($arg:tt)*) => {
        if !$quiet {
            eprintln!($($arg)*);
        }
    };
}

fn make_spinner(quiet: bool, message: &'static str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("  {spinner} [{elapsed_precise}] {msg}").unwrap());
    pb.set_message(message);
    pb
}

fn main() -> Result<()> {
    let args = Args::parse();

    let universe_source = match (&args.bim, &args.snp_list) {
        (Some(path), _) => Some(SnpSource::Bim(path.clone())),
        (None, Some(path)) => Some(SnpSource::SnpList(path.clone())),
        (None, None) => None,
    };

    progress!(args.quiet, "Cell-type SNP annotation builder");
    progress!(args.quiet, "=========================================");
    if let Some(ref path) = args.bim {
        progress!(args.quiet, "Genotype manifest: {}", path.display());
    }
    progress!(args.quiet, "Output matrix: {}", args.output.display());
    progress!(args.quiet, "Max cell-type columns: {}", args.max_cell_types);
    progress!(args.quiet);

    // Step 1: SNP-to-gene map (built or reloaded)
    let s2g = if !args.force && args.s2g_dict.exists() {
        progress!(
            args.quiet,
            "Step 1: Reusing SNP-to-gene map: {}",
            args.s2g_dict.display()
        );
        store::load_map(&args.s2g_dict)?
    } else {
        progress!(args.quiet, "Step 1: Building SNP-to-gene map...");
        let chrom_dir = match &args.chrom_dir {
            Some(dir) => dir,
            None => anyhow::bail!("--chrom-dir is required to build the SNP-to-gene map"),
        };
        if !chrom_dir.is_dir() {
            anyhow::bail!("Chromosome directory not found: {}", chrom_dir.display());
        }

        let pb = make_spinner(args.quiet, "indexing chromosomes and resolving manifest");
        let (s2g, report) = resolver::build_snp_to_gene(universe_source.as_ref(), chrom_dir)?;
        pb.finish_and_clear();

        for skipped in &report.skipped {
            progress!(args.quiet, "  bad item {}:{}", skipped.chrom, skipped.snp);
        }
        progress!(
            args.quiet,
            "  Resolved {} SNPs, skipped {}",
            report.resolved,
            report.skipped.len()
        );

        store::save_map(&s2g, &args.s2g_dict)?;
        progress!(args.quiet, "  Saved to: {}", args.s2g_dict.display());
        s2g
    };

    // Step 2: gene-to-cell-type map (built or reloaded)
    progress!(args.quiet);
    let g2ct = if !args.force && args.g2ct_dict.exists() {
        progress!(
            args.quiet,
            "Step 2: Reusing gene-to-cell-type map: {}",
            args.g2ct_dict.display()
        );
        store::load_map(&args.g2ct_dict)?
    } else {
        progress!(args.quiet, "Step 2: Building gene-to-cell-type map...");
        let marker_path = match &args.markers {
            Some(path) => path,
            None => anyhow::bail!("--markers is required to build the gene-to-cell-type map"),
        };
        if !marker_path.exists() {
            anyhow::bail!("Marker table not found: {}", marker_path.display());
        }

        let g2ct = markers::read_marker_table(marker_path)?;
        progress!(args.quiet, "  {} marker genes", g2ct.len());

        store::save_map(&g2ct, &args.g2ct_dict)?;
        progress!(args.quiet, "  Saved to: {}", args.g2ct_dict.display());
        g2ct
    };

    // Step 3: compose and write the annotation matrix
    progress!(args.quiet);
    progress!(args.quiet, "Step 3: Building annotation matrix...");
    let bim_path = match &args.bim {
        Some(path) => path,
        None => anyhow::bail!("--bim is required to define the annotation matrix SNP universe"),
    };
    if !bim_path.exists() {
        anyhow::bail!("Genotype manifest not found: {}", bim_path.display());
    }

    let matrix = build_annotation_matrix(bim_path, &s2g, &g2ct, args.max_cell_types, args.quiet)?;
    output::write_matrix(&matrix, &args.output)?;

    progress!(args.quiet);
    progress!(args.quiet, "Done! Matrix written to: {}", args.output.display());

    Ok(())
}

fn build_annotation_matrix(
    bim_path: &Path,
    s2g: &OrderedMap,
    g2ct: &OrderedMap,
    max_cell_types: usize,
    quiet: bool,
) -> Result<annotation::AnnotationMatrix> {
    let manifest = bim::read_bim(bim_path)?;
    let universe: Vec<String> = manifest.into_iter().map(|r| r.snp).collect();

    let groups = annotation::compose_cell_type_snps(s2g, g2ct);
    progress!(quiet, "  {} cell types discovered", groups.len());

    let matrix = annotation::build_matrix(&universe, s2g, &groups, max_cell_types);
    progress!(
        quiet,
        "  {} rows x {} columns ({} cell-type columns)",
        matrix.rows.len(),
        matrix.columns.len(),
        matrix.columns.len() - 2
    );

    Ok(matrix)
}
