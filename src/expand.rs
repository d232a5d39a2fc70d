//! Row expansion: one output record per compound per voltage level.
//!
//! Each source row yields exactly three records, in ascending voltage order,
//! each carrying the two peak lists tokenized from that voltage's cells.
//! Records are built once, appended in order, and never mutated.

use serde::Serialize;

use crate::peaks::{parse_peak_list, PeakParseError};
use crate::table::{SourceTable, TableError, VOLTAGE_LEVELS};

/// Errors raised while expanding a source table.
#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    /// Table loading or validation error
    #[error(transparent)]
    Table(#[from] TableError),

    /// Peak-list tokenization error
    #[error("Peak list error: {0}")]
    Peaks(#[from] PeakParseError),
}

/// One per-voltage record.
///
/// Field declaration order is the serialization key order:
/// `id, Contaminant, precursor_mz, Adduct, Structural Identity, peaks,
/// absolute_peaks`.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRecord {
    /// Composite key, `{compound}_{voltage}V`.
    pub id: String,
    /// Compound identifier.
    #[serde(rename = "Contaminant")]
    pub contaminant: String,
    /// Precursor mass-to-charge ratio.
    pub precursor_mz: f64,
    /// Ion adduct notation.
    #[serde(rename = "Adduct")]
    pub adduct: String,
    /// Normalized structural identity.
    #[serde(rename = "Structural Identity")]
    pub structural_identity: String,
    /// Relative peak pairs at this voltage, single precision.
    pub peaks: Vec<[f32; 2]>,
    /// Absolute peak pairs at this voltage, single precision.
    pub absolute_peaks: Vec<[f32; 2]>,
}

/// Expand a loaded table into per-voltage records.
///
/// Output length is exactly `3 * table.len()`: records are grouped by source
/// row in file order, with voltages ascending within each group.
pub fn expand(table: &SourceTable) -> Result<Vec<OutputRecord>, ExpandError> {
    let mut records = Vec::with_capacity(table.len() * VOLTAGE_LEVELS.len());

    for row in &table.rows {
        for (slot, voltage) in VOLTAGE_LEVELS.iter().enumerate() {
            let peaks = to_single_precision(parse_peak_list(&row.relative_peaks[slot])?);
            let absolute_peaks = to_single_precision(parse_peak_list(&row.absolute_peaks[slot])?);

            records.push(OutputRecord {
                id: format!("{}_{}V", row.id, voltage),
                contaminant: row.id.clone(),
                precursor_mz: row.precursor_mz,
                adduct: row.adduct.clone(),
                structural_identity: row.structural_identity.clone(),
                peaks,
                absolute_peaks,
            });
        }
    }

    Ok(records)
}

/// Peak values are deliberately reduced to 32-bit precision on output.
fn to_single_precision(pairs: Vec<(f64, f64)>) -> Vec<[f32; 2]> {
    pairs.into_iter().map(|(x, y)| [x as f32, y as f32]).collect()
}
