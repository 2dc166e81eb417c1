// Entrypoint for the CLI application.
// - With an input file, runs one lookup from its second line.
// - Without arguments, opens the interactive form.
// Returns `anyhow::Result` so unexpected failures print their cause chain.

use clap::Parser;
use population_generator::{
    api::CensusClient,
    config::Config,
    output::DEFAULT_OUTPUT,
    query::{run_file, FileRun},
    ui::population_form,
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Look up a U.S. state's total population from the census ACS 1-year
/// estimates and save it as CSV.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// CSV file whose second line is `year,state_code`. Omit it to use the
    /// interactive form.
    input: Option<PathBuf>,

    /// Where to write the result; overwritten on every run.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Census API key, overriding CENSUS_API_KEY and the config file.
    #[arg(long)]
    api_key: Option<String>,

    /// JSON config file with `api_key` and `base_url`.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(key) = cli.api_key {
        config.api_key = Some(key);
    }
    let client = CensusClient::new(&config)?;

    match cli.input {
        Some(path) => match run_file(&client, &path, &cli.output)? {
            FileRun::Completed(_) => println!("{} created.", cli.output.display()),
            FileRun::Unreadable(_) => println!("Invalid argument"),
        },
        None => population_form(&client, &cli.output)?,
    }
    Ok(())
}
