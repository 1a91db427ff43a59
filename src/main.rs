mod calculator;
mod demo;
mod stats;

use std::io::{self, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use argh::FromArgs;
use stats::DataSet;

#[derive(FromArgs, Debug)]
/// Interactive numeric sample suite
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Command {
    Calc(CalcArgs),
    Stats(StatsArgs),
    Demo(DemoArgs),
}

/// interactive calculator (factorial, prime check, arithmetic)
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "calc")]
struct CalcArgs {}

/// sample statistics over a bounded dataset
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "stats")]
struct StatsArgs {
    /// dataset identifier
    #[argh(option, default = "101")]
    id: u32,

    /// sample value, repeatable up to 50 times
    #[argh(option, short = 'v')]
    value: Vec<Sample>,
}

/// fixed arithmetic demonstration
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "demo")]
struct DemoArgs {}

#[derive(Debug)]
struct Sample(f64);

impl FromStr for Sample {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<f64>()
            .map(Sample)
            .map_err(|_| format!("invalid sample value: {}", s))
    }
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Calc(_) => {
            let stdin = io::stdin();
            calculator::run(stdin.lock(), &mut out)?;
        }
        Command::Stats(stats_args) => run_stats(stats_args, &mut out)?,
        Command::Demo(_) => demo::run(&mut out)?,
    }

    Ok(())
}

// In-band errors (bad dataset, insufficient samples) are printed
// diagnostics, never process failures.
fn run_stats(args: StatsArgs, out: &mut impl Write) -> Result<()> {
    let dataset = if args.value.is_empty() {
        DataSet::sample()
    } else {
        match DataSet::new(args.id, args.value.into_iter().map(|s| s.0).collect()) {
            Ok(dataset) => dataset,
            Err(err) => {
                writeln!(out, "Error: {}", err)?;
                return Ok(());
            }
        }
    };

    match dataset.analyze() {
        Ok(analysis) => analysis
            .write_report(out)
            .context("Failed to write analysis report")?,
        Err(err) => writeln!(out, "Error: {}", err)?,
    }

    Ok(())
}
