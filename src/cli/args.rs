use crate::loaders::LoadMode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spyder-index", version)]
pub struct Cli {
    /// HTML files to load (documents are emitted in file order)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Split each file into one document (single) or one per text element (elements)
    #[arg(long, value_enum, default_value_t = LoadMode::Single)]
    pub mode: LoadMode,

    /// Number of files loaded in parallel (default: $SPYDER_INDEX_JOBS, then CPU count)
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Emit progress to stderr
    #[arg(long)]
    pub progress: bool,

    /// Print operator.json and exit
    #[arg(long)]
    pub describe: bool,

    /// Print JSON Schema of output records and exit
    #[arg(long)]
    pub schema: bool,
}
