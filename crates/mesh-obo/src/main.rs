//! MeSH to OBO converter binary.
//!
//! ```bash
//! mesh2obo --input d2024.bin --output mesh.obo
//! MESH_INPUT=d2024.bin MESH_OUTPUT=mesh.obo mesh2obo --stats stats.json
//! ```

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use mesh_loader::{
    convert_file, load_category_file, ConvertConfig, DanglingParentPolicy, MalformedLinePolicy,
    ParserConfig,
};
use mesh_types::CategoryTable;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "mesh2obo")]
#[command(about = "Convert a MeSH descriptor file to an OBO ontology", long_about = None)]
struct Cli {
    /// MeSH ASCII descriptor file (e.g. d2024.bin)
    #[arg(short, long, env = "MESH_INPUT")]
    input: PathBuf,

    /// Destination OBO file
    #[arg(short, long, env = "MESH_OUTPUT")]
    output: PathBuf,

    /// Tab-separated `code<TAB>name` table replacing the built-in categories
    #[arg(long, env = "MESH_CATEGORIES")]
    categories: Option<PathBuf>,

    /// Reject lines without a ` = ` separator instead of keeping them
    #[arg(long)]
    strict_lines: bool,

    /// Abort when a parent tree position is undefined instead of skipping it
    #[arg(long)]
    fail_on_dangling: bool,

    /// Write a format-version/ontology header
    #[arg(long)]
    header: bool,

    /// Ontology name for the header
    #[arg(long, default_value = "mesh", env = "MESH_ONTOLOGY")]
    ontology: String,

    /// Write conversion statistics as JSON
    #[arg(long)]
    stats: Option<PathBuf>,
}

impl Cli {
    fn convert_config(&self) -> ConvertConfig {
        ConvertConfig {
            parser: ParserConfig {
                malformed_lines: if self.strict_lines {
                    MalformedLinePolicy::Reject
                } else {
                    MalformedLinePolicy::Lenient
                },
            },
            dangling_parents: if self.fail_on_dangling {
                DanglingParentPolicy::Fail
            } else {
                DanglingParentPolicy::Skip
            },
            write_header: self.header,
            ontology: self.ontology.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let categories = match &cli.categories {
        Some(path) => {
            tracing::info!("Loading category table from: {}", path.display());
            load_category_file(path)?
        }
        None => CategoryTable::mesh_default(),
    };

    let stats = convert_file(&cli.input, &cli.output, &categories, &cli.convert_config())?;

    if stats.dangling_parents > 0 {
        tracing::warn!(
            "{} is_a relations skipped because their parent position is undefined",
            stats.dangling_parents
        );
    }

    if let Some(path) = &cli.stats {
        serde_json::to_writer_pretty(File::create(path)?, &stats)?;
        tracing::info!("Statistics written to {}", path.display());
    }

    Ok(())
}
