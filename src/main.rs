use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use joinstat::{
    cli::{Cli, OutputFormat},
    csv_output::CsvJoins,
    dichotomize::{self, CutPoint},
    joins::{expected_joins, variance_joins, JoinStatistics, JoinsTest},
    json_output::JsonJoins,
    report,
    significance::Tails,
    store::SampleStore,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let test = JoinsTest {
        observed: cli.observed,
        trials: cli.trials,
        prob: cli.prob,
        continuity: !cli.no_continuity,
        tails: Tails::from_count(cli.tails)?,
    };

    let stats = match &cli.file {
        Some(path) => Some(analyze_file(&cli, &test, path)?),
        None => run_parameter_only(&cli, &test)?,
    };

    if let Some(stats) = stats {
        print_stats(&cli, &stats)?;
    }
    Ok(())
}

/// Load a token file through the sample store and run the full pipeline.
fn analyze_file(cli: &Cli, test: &JoinsTest, path: &Path) -> Result<JoinStatistics> {
    let mut store = SampleStore::new();
    store
        .load(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let tokens = store.read_default()?;
    tracing::debug!(tokens = tokens.len(), "loaded sample");

    if let Some(cut) = &cli.cut {
        let cut: CutPoint = cut.parse()?;
        let values = dichotomize::parse_numeric(tokens)?;
        let seq = dichotomize::dichotomize(&values, cut)?;
        tracing::debug!(?cut, "dichotomized numeric input");

        match &cli.state {
            Some(state) => {
                let state: u8 = state
                    .parse()
                    .ok()
                    .filter(|s| *s <= 1)
                    .context("with --cut, --state must be 0 or 1")?;
                Ok(test.run_with_state(&seq, &state)?)
            }
            None => Ok(test.run(&seq)?),
        }
    } else {
        match &cli.state {
            Some(state) => Ok(test.run_with_state(tokens, state)?),
            None => Ok(test.run(tokens)?),
        }
    }
}

/// No token file: explicit counts only.
///
/// With `--observed` the full snapshot is computed; without it only the
/// moments are available, printed directly (there is no z or p to report).
fn run_parameter_only(cli: &Cli, test: &JoinsTest) -> Result<Option<JoinStatistics>> {
    let Some(trials) = cli.trials else {
        bail!("either a token file or --trials is required");
    };

    if cli.observed.is_some() {
        return Ok(Some(test.run_counts()?));
    }

    let prob = cli.prob.unwrap_or(0.5);
    let expected = expected_joins(trials, prob)?;
    let variance = variance_joins(trials, prob)?;
    let dp = cli.precision as usize;
    println!("expected:    {expected:.dp$}");
    println!("variance:    {variance:.dp$}");
    Ok(None)
}

fn print_stats(cli: &Cli, stats: &JoinStatistics) -> Result<()> {
    match cli.format {
        OutputFormat::Text => print!("{}", report::render(stats, cli.precision)),
        OutputFormat::Json => {
            println!("{}", JsonJoins::from_stats(stats, cli.precision).to_json_pretty()?);
        }
        OutputFormat::Csv => print!("{}", CsvJoins::new(cli.precision).render(stats)),
    }
    Ok(())
}
