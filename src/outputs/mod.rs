//! Output serialization.
//!
//! # Submodules
//!
//! - [`csv`]: the headline table written under `final/`
//!
//! # Output Structure
//!
//! ```text
//! final/
//! └── periodico=eltiempo/
//!     └── year=2025/
//!         └── month=05/
//!             └── day=28/
//!                 └── titulares.csv
//! ```

pub mod csv;
