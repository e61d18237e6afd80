//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

/// news-digest: topic-filtered news digest with cross-run dedup
#[derive(Parser, Debug)]
#[command(name = "news-digest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of candidates requested from each source
    #[arg(value_name = "LIMIT")]
    pub limit: Option<usize>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}
