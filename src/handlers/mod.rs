//! One handler per serverless function.
//!
//! | Handler | Trigger | Effect |
//! |---------|---------|--------|
//! | [`fetch::handle_fetch`] | schedule | homepages → `raw/*.html` |
//! | [`extract::handle_extract_event`] | `raw/*.html` created | headlines → `final/**/titulares.csv`, invoke next |
//! | [`crawl::handle_crawl_event`] | `final/**/*.csv` created | start catalog crawler |
//! | [`cluster::handle_cluster_launch`] | invoke / schedule | launch Spark cluster |
//!
//! Handlers only talk to the outside world through [`crate::adapters`], so
//! the Lambda binaries are thin wiring around them.

pub mod cluster;
pub mod crawl;
pub mod extract;
pub mod fetch;
