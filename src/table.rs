//! Source table loading and field normalization.
//!
//! Each reference table is a CSV with one row per compound, holding the
//! precursor mass, ion adduct, optional structural identity, and six
//! peak-list cells (relative and absolute, one of each per voltage level).
//! Loading resolves the required columns, parses scalar fields, and
//! normalizes the structural-identity text once, before any row expansion.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Sentinel used when a compound has no recorded structural identity.
pub const UNKNOWN_IDENTITY: &str = "unknown Compound";

/// Fragmentation voltage levels, in the fixed ascending output order.
pub const VOLTAGE_LEVELS: [u16; 3] = [20, 40, 60];

/// Errors raised while loading a source table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// I/O error reading the table file
    #[error("Failed to read table: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing or misnamed required column
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A required scalar field failed to parse
    #[error("Row {row}: column '{column}' has unparseable value '{value}'")]
    InvalidField {
        /// 1-based line number in the source file.
        row: usize,
        /// Column the value came from.
        column: String,
        /// The offending cell text.
        value: String,
    },
}

/// One compound row, normalized and ready for voltage expansion.
///
/// Peak cells are kept as raw text here; tokenization happens during
/// expansion. Cell index corresponds to [`VOLTAGE_LEVELS`] order.
#[derive(Debug, Clone)]
pub struct SourceRow {
    /// Compound identifier.
    pub id: String,
    /// Precursor mass-to-charge ratio.
    pub precursor_mz: f64,
    /// Ion adduct notation, e.g. `[M+H]+`.
    pub adduct: String,
    /// Structural identity, [`UNKNOWN_IDENTITY`] when the cell was empty.
    pub structural_identity: String,
    /// Relative peak-list text, one cell per voltage level.
    pub relative_peaks: [String; 3],
    /// Absolute peak-list text, one cell per voltage level.
    pub absolute_peaks: [String; 3],
}

/// A loaded reference table, rows in file order.
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    /// Compound rows, in file order.
    pub rows: Vec<SourceRow>,
}

impl SourceTable {
    /// Load a reference table from a CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a reference table from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();

        let id_col = find_column(&headers, "id")?;
        let mz_col = find_column(&headers, "Contaminant m/z")?;
        let adduct_col = find_column(&headers, "Ion adduct")?;
        let identity_col = find_identity_column(&headers)?;

        let mut relative_cols = [0usize; 3];
        let mut absolute_cols = [0usize; 3];
        for (slot, voltage) in VOLTAGE_LEVELS.iter().enumerate() {
            relative_cols[slot] = find_column(&headers, &format!("relative_{voltage}v"))?;
            absolute_cols[slot] = find_column(&headers, &format!("{voltage}v"))?;
        }

        let mut rows = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            // 1-based, counting the header line
            let row_number = index + 2;

            let raw_mz = cell(&record, mz_col);
            let precursor_mz = raw_mz.parse::<f64>().map_err(|_| TableError::InvalidField {
                row: row_number,
                column: "Contaminant m/z".to_string(),
                value: raw_mz.to_string(),
            })?;

            rows.push(SourceRow {
                id: cell(&record, id_col).to_string(),
                precursor_mz,
                adduct: cell(&record, adduct_col).to_string(),
                structural_identity: normalize_identity(cell(&record, identity_col)),
                relative_peaks: relative_cols.map(|col| cell(&record, col).to_string()),
                absolute_peaks: absolute_cols.map(|col| cell(&record, col).to_string()),
            });
        }

        Ok(Self { rows })
    }

    /// Number of compound rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell<'a>(record: &'a csv::StringRecord, col: usize) -> &'a str {
    record.get(col).unwrap_or("")
}

fn find_column(headers: &[String], name: &str) -> Result<usize, TableError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| TableError::MissingColumn(name.to_string()))
}

/// The structural-identity header embeds line breaks in the source files
/// (`Structural\nIdentity\n(if available)`), so it is matched on its
/// whitespace-collapsed, lowercased form.
fn find_identity_column(headers: &[String]) -> Result<usize, TableError> {
    headers
        .iter()
        .position(|h| {
            let collapsed = h.split_whitespace().collect::<Vec<_>>().join(" ");
            collapsed.to_lowercase().starts_with("structural identity")
        })
        .ok_or_else(|| TableError::MissingColumn("Structural Identity".to_string()))
}

/// Missing identities fall back to the sentinel; embedded line breaks become
/// single spaces. Runs once per load so the substitution is not repeated per
/// voltage level.
fn normalize_identity(raw: &str) -> String {
    if raw.is_empty() {
        return UNKNOWN_IDENTITY.to_string();
    }
    raw.replace('\n', " ")
}
