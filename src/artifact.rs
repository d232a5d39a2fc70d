//! Output artifact accumulation and rendering.
//!
//! Record sequences are collected in memory as named assignment blocks and
//! written once, in overwrite mode, at the end of a run. Re-running a
//! pipeline against the same path therefore replaces the artifact instead of
//! appending duplicate blocks.
//!
//! Each block has the form `<name> = <JSON array>` followed by a blank line,
//! with 4-space indentation and deterministic key order, so the artifact
//! stays importable as a data literal.

use std::fs;
use std::io;
use std::path::Path;

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::expand::OutputRecord;

/// In-memory accumulator for named record blocks.
#[derive(Debug, Default)]
pub struct Artifact {
    blocks: Vec<String>,
}

impl Artifact {
    /// Create an empty artifact.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one named assignment block for a record sequence.
    pub fn push(&mut self, name: &str, records: &[OutputRecord]) -> Result<(), serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut serializer)?;

        let body = String::from_utf8(buf).map_err(serde_json::Error::custom)?;
        self.blocks.push(format!("{name} = {body}\n\n"));
        Ok(())
    }

    /// Number of blocks accumulated so far.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render the artifact as a single string, blocks in push order.
    pub fn render(&self) -> String {
        self.blocks.concat()
    }

    /// Write the artifact, replacing any previous content at `path`.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.render())
    }
}
