// Reads a query from an input CSV: the first line is a header (not
// checked), the second holds `year,state_code`. Later lines are ignored.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};

use crate::query::Query;

/// Parse the query held on the second line of `text`.
///
/// Only that line is considered; a blank or short second line is an error
/// even when later lines would have been valid.
pub fn parse_query(text: &str) -> Result<Query> {
    let line = text
        .lines()
        .nth(1)
        .context("Input file has no second line")?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());
    let record = reader
        .records()
        .next()
        .context("Second line of input file is blank")?
        .context("Reading query row")?;
    let year = record.get(0).context("Query row has no year column")?;
    let state = record.get(1).context("Query row has no state column")?;
    Ok(Query::new(year, state))
}
