//! # voltrec - Per-Voltage Contaminant Record Extraction
//!
//! `voltrec` transforms tabular chemical-contaminant reference data (CSV)
//! into structured per-voltage records serialized as embedded data literals.
//!
//! Each source row describes one compound: precursor mass, ion adduct,
//! optional structural identity, and six peak-list cells (a relative and an
//! absolute spectrum for each fragmentation voltage 20, 40, and 60 V). The
//! pipeline expands every row into three records, one per voltage, with the
//! peak-list text tokenized into numeric `[x, y]` pairs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use voltrec::artifact::Artifact;
//! use voltrec::expand::expand;
//! use voltrec::table::SourceTable;
//!
//! let table = SourceTable::from_path("eppendorf_ref.csv")?;
//! let records = expand(&table)?;
//!
//! let mut artifact = Artifact::new();
//! artifact.push("eppendorf", &records)?;
//! artifact.write_to("output_data.py")?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! This produces a human-readable artifact of named assignments, each a JSON
//! array with 4-space indentation and stable key order:
//!
//! ```text
//! eppendorf = [
//!     {
//!         "id": "C1_20V",
//!         "Contaminant": "C1",
//!         "precursor_mz": 100.5,
//!         "Adduct": "[M+H]+",
//!         "Structural Identity": "unknown Compound",
//!         "peaks": [[1.0, 10.0], [2.0, 20.0]],
//!         "absolute_peaks": [[1.0, 100.0], [2.0, 200.0]]
//!     }
//! ]
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`table`]: CSV loading, column resolution, and field normalization
//! - [`peaks`]: peak-list tokenizer for bracketed coordinate-pair text
//! - [`expand`]: row expansion into per-voltage output records
//! - [`artifact`]: in-memory accumulation and single-write rendering
//! - [`config`]: static source enumeration from TOML
//!
//! ## Behavior Guarantees
//!
//! - Every source row yields exactly 3 records, in ascending voltage order,
//!   preserving row order and peak order.
//! - Malformed coordinate substrings are skipped silently; a corrupt cell
//!   degrades to a partial (possibly empty) peak list, never an error.
//! - Missing structural identities normalize to `"unknown Compound"` before
//!   expansion; embedded newlines become single spaces.
//! - Peak values are reduced to 32-bit float precision on output.
//! - The artifact is written once per run in overwrite mode, so re-running
//!   never duplicates blocks.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod artifact;
pub mod config;
pub mod expand;
pub mod peaks;
pub mod table;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::artifact::Artifact;
    pub use crate::config::{Config, SourceSpec};
    pub use crate::expand::{expand, ExpandError, OutputRecord};
    pub use crate::peaks::{parse_peak_list, PeakParseError};
    pub use crate::table::{SourceRow, SourceTable, TableError, UNKNOWN_IDENTITY, VOLTAGE_LEVELS};
}
