// UI layer: the interactive lookup form, built with `dialoguer` prompts.
// Each lookup goes through `query::run`, the same path as file mode.

use crate::query::{self, PopulationSource, Query};
use anyhow::Result;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Prompt for a year and state, show the population and save it to
/// `output`. Repeats until the user declines another lookup.
///
/// A failed lookup is reported and the form carries on.
pub fn population_form<S: PopulationSource + ?Sized>(source: &S, output: &Path) -> Result<()> {
    println!("Population Generator");
    println!(
        "The latest result is saved to {} (overwritten on each lookup).",
        output.display()
    );
    loop {
        let year: String = Input::new()
            .with_prompt("Enter census year (2005-2019)")
            .interact_text()?;
        let state: String = Input::new()
            .with_prompt("Enter state code (example: TX)")
            .interact_text()?;
        let query = Query::new(year.trim(), state.trim());

        let spinner = spinner("Fetching population...")?;
        let outcome = query::run(source, &query, output);
        spinner.finish_and_clear();

        match outcome {
            Ok(result) => {
                println!("Population: {}", result.population);
                println!("{} created.", output.display());
            }
            Err(e) => println!("Lookup failed: {:#}", e),
        }

        let again = Confirm::new()
            .with_prompt("Look up another?")
            .default(true)
            .interact()?;
        if !again {
            break;
        }
    }
    Ok(())
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}
