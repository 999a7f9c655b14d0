//! Flat sweep rows and the CSV sink that streams them.

use std::fs::File;
use std::io;
use std::path::Path;

use sweep_core::types::Value;

use crate::error::SweepError;

/// One finished sweep row.
///
/// Cells hold the resolved values of the swept columns in header order;
/// the threshold estimate travels separately so a missing crossing stays
/// visible as NaN even before any formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRecord {
    /// Outer step index, 0-based
    pub step: usize,

    /// Normalized swept-variable position for this step
    pub position: f64,

    /// Resolved swept-column values, aligned with the header
    pub cells: Vec<Value>,

    /// Threshold estimate, NaN when the search range never crossed
    pub threshold: f64,
}

impl SweepRecord {
    /// True when the threshold search found no crossing for this row.
    pub fn is_no_crossing(&self) -> bool {
        self.threshold.is_nan()
    }
}

/// Streams sweep records to CSV, one flushed row at a time.
///
/// Every write reaches the underlying sink before the next row is
/// computed, so an aborted sweep leaves a readable file containing all
/// rows finished up to the failure.
pub struct RecordWriter<W: io::Write> {
    writer: csv::Writer<W>,
}

impl RecordWriter<File> {
    /// Creates a writer over a fresh file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SweepError> {
        let writer = csv::Writer::from_path(path.as_ref())
            .map_err(|err| SweepError::output(err.to_string()))?;
        Ok(Self { writer })
    }
}

impl<W: io::Write> RecordWriter<W> {
    /// Creates a writer over any byte sink.
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes the header row.
    pub fn write_header(&mut self, columns: &[String]) -> Result<(), SweepError> {
        self.writer
            .write_record(columns)
            .map_err(|err| SweepError::output(err.to_string()))?;
        self.flush()
    }

    /// Writes one record and flushes it through to the sink.
    pub fn write_record(&mut self, record: &SweepRecord) -> Result<(), SweepError> {
        let mut fields: Vec<String> = record.cells.iter().map(cell_text).collect();
        fields.push(Value::Number(record.threshold).to_string());
        self.writer
            .write_record(&fields)
            .map_err(|err| SweepError::output(err.to_string()))?;
        self.flush()
    }

    /// Flushes buffered bytes to the sink.
    pub fn flush(&mut self) -> Result<(), SweepError> {
        self.writer
            .flush()
            .map_err(|err| SweepError::output(err.to_string()))
    }

    /// Unwraps the underlying sink, flushing first.
    pub fn into_inner(self) -> Result<W, SweepError> {
        self.writer
            .into_inner()
            .map_err(|err| SweepError::output(err.to_string()))
    }
}

/// CSV text for one cell.
///
/// Numbers print the way [`Value`] displays them (NaN as `NaN`), text
/// prints raw so the CSV layer decides its own quoting, and structured
/// values fall back to their display form.
fn cell_text(cell: &Value) -> String {
    match cell {
        Value::Text(text) => text.clone(),
        other => other.to_string(),
    }
}
