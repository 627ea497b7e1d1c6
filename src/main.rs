//! Local runner for the headline pipeline.
//!
//! Runs the fetch and extract stages without any cloud services: homepages
//! are written below a directory that mirrors the bucket layout, and
//! snapshots are parsed straight from disk.
//!
//! ```sh
//! news_headlines fetch --out-dir ./data
//! news_headlines extract ./data/pacialcorte3-2025/raw/contenido-publimetro-2025-05-28-15-45.html -o titulares.csv
//! ```

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info, instrument};

mod cli;

use cli::{Cli, Command};
use news_headlines::adapters::local::LocalStore;
use news_headlines::config::FetchConfig;
use news_headlines::error::PipelineError;
use news_headlines::handlers::fetch::handle_fetch;
use news_headlines::models::Publisher;
use news_headlines::outputs::csv::headlines_to_csv;
use news_headlines::scrapers::{extract_headlines, HttpFetcher};
use news_headlines::telemetry;
use news_headlines::utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    telemetry::init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match args.command {
        Command::Fetch { out_dir, config } => run_fetch(&out_dir, &config).await?,
        Command::Extract {
            file,
            publisher,
            output,
        } => run_extract(&file, publisher, output.as_deref()).await?,
    }

    info!(
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "news_headlines finished"
    );
    Ok(())
}

#[instrument(level = "info")]
async fn run_fetch(out_dir: &str, config: &FetchConfig) -> Result<(), Box<dyn Error>> {
    ensure_writable_dir(out_dir).await?;

    let fetcher = HttpFetcher::new(config.http_timeout())?;
    let store = LocalStore::new(out_dir);
    let response = handle_fetch(&fetcher, &store, &config.bucket, Utc::now()).await?;

    println!("{}", response.body);
    Ok(())
}

#[instrument(level = "info")]
async fn run_extract(
    file: &Path,
    publisher: Option<Publisher>,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let publisher = match publisher {
        Some(p) => p,
        None => infer_publisher(file)?,
    };

    let body = tokio::fs::read(file).await?;
    let html = String::from_utf8_lossy(&body);
    let headlines = extract_headlines(publisher, &html);
    if headlines.is_empty() {
        return Err(PipelineError::NoHeadlines(file.display().to_string()).into());
    }
    info!(%publisher, count = headlines.len(), "Extracted headlines");

    let table = headlines_to_csv(&headlines)?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, &table).await?;
            info!(path = %path.display(), "Wrote headline table");
        }
        None => print!("{}", String::from_utf8_lossy(&table)),
    }
    Ok(())
}

fn infer_publisher(file: &Path) -> Result<Publisher, PipelineError> {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Publisher::from_key(&name).ok_or(PipelineError::UnknownPublisher(name))
}
