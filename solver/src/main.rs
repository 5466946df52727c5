use std::fs;
use std::num::NonZero;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use gridwalk::automaton::Termination;
use gridwalk::paths::VisitBudget;
use gridwalk::shape::Adjacency;
use gridwalk::{Config, Engine, Policy, RegionReduction};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Run one day's puzzle over an input file and print the answer.
///
/// Only dec09, dec11, dec12 and dec15 are solved here, so `--day` has no date-based default and must always be given.
#[derive(Parser, Debug)]
#[command(name = "solver", version, about)]
struct Cli {
    /// Which puzzle to run; required, never inferred from today's date
    #[arg(long, value_enum)]
    day: Day,

    /// Which half of the puzzle
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
    part: u8,

    /// Input file, relative to the day's directory
    #[arg(short, long, default_value = "example.txt")]
    input: PathBuf,

    /// Directory holding one folder per day, each named after its day (e.g. dec09-smoke_basin)
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Write every snapshot and the answer to numbered answer-N.txt files next to the input
    #[arg(short, long)]
    write: bool,

    /// Verbose logging, and collect snapshots
    #[arg(long)]
    debug: bool,

    /// Override the puzzle's neighbor rule (orthogonal or diagonal)
    #[arg(long)]
    adjacency: Option<Adjacency>,

    /// Ticks to run for dec11 part 1
    #[arg(long, default_value_t = 100)]
    ticks: usize,

    /// Give up on synchronization after this many ticks
    #[arg(long)]
    tick_ceiling: Option<usize>,

    /// Give up on path enumeration after expanding this many partial paths
    #[arg(long)]
    enumeration_ceiling: Option<usize>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Day {
    Dec09,
    Dec11,
    Dec12,
    Dec15,
}

impl Day {
    fn prefix(&self) -> &'static str {
        match self {
            Day::Dec09 => "dec09",
            Day::Dec11 => "dec11",
            Day::Dec12 => "dec12",
            Day::Dec15 => "dec15",
        }
    }

    fn policy(&self, part: u8, ticks: usize) -> Result<Policy> {
        let second = part == 2;
        let policy = match self {
            Day::Dec09 => Policy::FloodFill {
                reduction: if second { RegionReduction::LargestProduct } else { RegionReduction::RiskSum },
            },
            Day::Dec11 => Policy::AutomatonStep {
                termination: if second { Termination::UntilSynchronized } else { Termination::Ticks(ticks) },
            },
            Day::Dec12 => Policy::ConstrainedPathEnumeration {
                budget: if second { VisitBudget::OneDoubleVisit } else { VisitBudget::AtMostOnce },
            },
            Day::Dec15 => Policy::ShortestPath {
                tiles: NonZero::new(if second { 5 } else { 1 }).context("tile factor must be positive")?,
            },
        };

        Ok(policy)
    }
}

// the single folder under `root` whose name starts with the day's prefix
fn day_dir(root: &Path, day: Day) -> Result<PathBuf> {
    let mut found = Vec::new();
    for entry in fs::read_dir(root).with_context(|| format!("reading {}", root.display()))? {
        let entry = entry?;
        if entry.file_type()?.is_dir() && entry.file_name().to_string_lossy().starts_with(day.prefix()) {
            found.push(entry.path());
        }
    }

    match found.len() {
        1 => Ok(found.remove(0)),
        0 => bail!("no directory for {} under {}", day.prefix(), root.display()),
        n => bail!("{} directories for {} under {}", n, day.prefix(), root.display()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "gridwalk=debug,solver=debug" } else { "gridwalk=info,solver=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let dir = day_dir(&cli.dir, cli.day)?;
    let input = dir.join(&cli.input);
    info!(day = cli.day.prefix(), part = cli.part, input = %input.display(), "solving");
    let raw = fs::read_to_string(&input).with_context(|| format!("reading {}", input.display()))?;

    let defaults = Config::default();
    let config = Config {
        adjacency: cli.adjacency,
        tick_ceiling: cli.tick_ceiling.unwrap_or(defaults.tick_ceiling),
        enumeration_ceiling: cli.enumeration_ceiling.unwrap_or(defaults.enumeration_ceiling),
        show_intermediate: cli.debug || cli.write,
    };
    let policy = cli.day.policy(cli.part, cli.ticks)?;

    let report = Engine::new(config)
        .run(policy, &raw)
        .with_context(|| format!("{} part {} on {}", cli.day.prefix(), cli.part, input.display()))?;

    for (i, snapshot) in report.snapshots().iter().enumerate() {
        debug!(snapshot = i, "\n{}", snapshot);
    }

    if cli.write {
        let out_dir = input.parent().unwrap_or(dir.as_path());
        let outputs = report.snapshots().iter().cloned().chain([report.answer().to_string()]);
        for (i, output) in outputs.enumerate() {
            let path = out_dir.join(format!("answer-{}.txt", i));
            fs::write(&path, output).with_context(|| format!("writing {}", path.display()))?;
            debug!(path = %path.display(), "wrote output");
        }
    }

    println!("{}", report.answer());
    Ok(())
}
