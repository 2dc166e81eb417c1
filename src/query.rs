// Command handler shared by the CLI file mode and the interactive form.
// Both build a `Query` and hand it to `run`; everything after that (state
// lookup, fetch, output) happens here.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

use crate::{input, output, states};

/// Anything that can answer "population of state `fips` in `year`".
/// `api::CensusClient` is the real implementation.
pub trait PopulationSource {
    fn population(&self, year: &str, fips: &str) -> Result<String>;
}

/// A year and state abbreviation as typed by the user or read from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub year: String,
    pub state: String,
}

impl Query {
    pub fn new(year: impl Into<String>, state: impl Into<String>) -> Self {
        Query {
            year: year.into(),
            state: state.into(),
        }
    }
}

/// One output row. Field names are the output file's column headers.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    #[serde(rename = "input_year")]
    pub year: String,
    #[serde(rename = "input_state")]
    pub state: String,
    #[serde(rename = "output_population_size")]
    pub population: String,
}

impl QueryResult {
    /// Pair a query with its population; the state is stored upper-cased.
    pub fn new(query: &Query, population: String) -> Self {
        QueryResult {
            year: query.year.clone(),
            state: query.state.to_uppercase(),
            population,
        }
    }
}

/// Outcome of [`run_file`].
#[derive(Debug)]
pub enum FileRun {
    Completed(QueryResult),
    /// The input file could not be opened; nothing was fetched or written.
    Unreadable(io::Error),
}

/// Resolve the state code and fetch the population for `query`.
pub fn lookup<S: PopulationSource + ?Sized>(source: &S, query: &Query) -> Result<QueryResult> {
    let fips = states::fips_code(&query.state);
    let population = source.population(&query.year, fips)?;
    info!(year = %query.year, state = %query.state, %population, "population retrieved");
    Ok(QueryResult::new(query, population))
}

/// Look up `query` and overwrite `output` with the result.
pub fn run<S: PopulationSource + ?Sized>(
    source: &S,
    query: &Query,
    output: &Path,
) -> Result<QueryResult> {
    let result = lookup(source, query)?;
    output::write_result_file(&result, output)?;
    Ok(result)
}

/// Read a query from the second line of `input`, then [`run`] it.
///
/// Paths that cannot be opened or read (missing files, directories) give
/// [`FileRun::Unreadable`]. Content that is not UTF-8 is an error.
pub fn run_file<S: PopulationSource + ?Sized>(
    source: &S,
    input: &Path,
    output: &Path,
) -> Result<FileRun> {
    let text = match fs::read_to_string(input) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            return Err(err)
                .with_context(|| format!("Input file {} is not UTF-8", input.display()));
        }
        Err(err) => {
            warn!(path = %input.display(), "cannot read input file: {err}");
            return Ok(FileRun::Unreadable(err));
        }
    };
    let query = input::parse_query(&text)?;
    Ok(FileRun::Completed(run(source, &query, output)?))
}
