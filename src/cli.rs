//! Command-line interface for running the pipeline locally.
//!
//! `fetch` and `extract` perform the same work as their functions, with the
//! object store replaced by a directory tree.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use news_headlines::config::FetchConfig;
use news_headlines::models::Publisher;

/// Command-line arguments for the local runner.
///
/// # Examples
///
/// ```sh
/// # Snapshot every homepage into ./data/pacialcorte3-2025/raw/
/// news_headlines fetch --out-dir ./data
///
/// # Extract headlines from a snapshot, publisher inferred from the file name
/// news_headlines extract ./data/pacialcorte3-2025/raw/contenido-eltiempo-2025-05-28-10-30.html
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download every homepage into a local bucket directory
    Fetch {
        /// Directory that stands in for the object store
        #[arg(short, long)]
        out_dir: String,

        // bucket (first directory level) and request timeout, shared with the function
        #[command(flatten)]
        config: FetchConfig,
    },

    /// Extract headlines from a saved homepage into CSV
    Extract {
        /// Saved homepage HTML
        file: PathBuf,

        /// Publisher rules to apply; inferred from the file name when omitted
        #[arg(short, long, value_enum)]
        publisher: Option<Publisher>,

        /// Output CSV path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
