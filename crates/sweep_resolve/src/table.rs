//! Interpolation table loading from delimited files.
//!
//! Table files are two-column numeric text: one `input,output` pair per
//! line, comma separated, no header row. Loaded tables satisfy the same
//! validation as inline tables (at least two points, strictly ascending
//! inputs).

use crate::error::ResolveError;
use std::path::Path;
use sweep_core::math::LinearTable;

/// Load an interpolation table from a two-column CSV file.
///
/// # Arguments
///
/// * `path` - Path of the table file
///
/// # Returns
///
/// * `Ok(table)` - A validated [`LinearTable`] over the file's pairs
/// * `Err(ResolveError)` - If the file is unreadable, a row is not a
///   numeric pair, or the assembled table fails validation
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sweep_resolve::load_table;
///
/// let table = load_table(Path::new("tables/cooling.csv")).unwrap();
/// let output = table.value_at(0.5);
/// ```
pub fn load_table(path: &Path) -> Result<LinearTable<f64>, ResolveError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| ResolveError::table_read(path, e.to_string()))?;

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ResolveError::table_read(path, e.to_string()))?;
        let line = record.position().map_or(index + 1, |p| p.line() as usize);
        if record.len() != 2 {
            return Err(ResolveError::table_row(path, line));
        }
        let x: f64 = record[0]
            .parse()
            .map_err(|_| ResolveError::table_row(path, line))?;
        let y: f64 = record[1]
            .parse()
            .map_err(|_| ResolveError::table_row(path, line))?;
        xs.push(x);
        ys.push(y);
    }

    Ok(LinearTable::new(xs, ys)?)
}
