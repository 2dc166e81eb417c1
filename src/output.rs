// Writes a `QueryResult` as a header row plus one data row. The output
// file is truncated on every run, so only the latest result survives.

use anyhow::{Context, Result};
use std::fs::File;
use std::io;
use std::path::Path;

use crate::query::QueryResult;

pub const DEFAULT_OUTPUT: &str = "output.csv";

/// Write `result` in CSV form to `wtr`.
///
/// # Examples
///
/// ```
/// use population_generator::output::write_result;
/// use population_generator::query::{Query, QueryResult};
///
/// let result = QueryResult::new(&Query::new("2019", "tx"), "29000000".into());
/// let mut buf = vec![];
/// write_result(&result, &mut buf).unwrap();
///
/// assert_eq!(
///     std::str::from_utf8(&buf).unwrap(),
///     "input_year,input_state,output_population_size\n2019,TX,29000000\n"
/// );
/// ```
pub fn write_result<W: io::Write>(result: &QueryResult, wtr: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(wtr);
    writer.serialize(result).context("Serializing result row")?;
    writer.flush()?;
    Ok(())
}

/// Create or truncate `path` and write `result` to it.
pub fn write_result_file(result: &QueryResult, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    write_result(result, file)
}
