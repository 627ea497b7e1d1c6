//! # News Headlines
//!
//! A serverless pipeline that snapshots Colombian news homepages, extracts
//! their headlines into partitioned CSV tables, catalogs the tables and runs
//! a Spark analysis over them.
//!
//! ## Publishers
//!
//! - El Tiempo (`https://www.eltiempo.com`)
//! - Publimetro Colombia (`https://www.publimetro.co/`)
//!
//! ## Architecture
//!
//! Four functions are chained through the object store and direct invokes:
//! 1. **Fetch**: download every homepage to `raw/contenido-{publisher}-{timestamp}.html`
//! 2. **Extract**: parse each snapshot into
//!    `final/periodico={publisher}/year=YYYY/month=MM/day=DD/titulares.csv`,
//!    then asynchronously invoke the next function
//! 3. **Crawl**: start the catalog crawler when a headline table lands
//! 4. **Cluster**: launch a transient Spark cluster that runs the analysis script
//!
//! Each function has a binary under `src/bin/`; the `news_headlines` binary
//! runs fetch and extract against the local filesystem.

pub mod adapters;
pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod storage_keys;
pub mod telemetry;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;
