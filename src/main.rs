//! u-keylayout CLI
//!
//! Three steps of the layout workflow:
//!
//! 1. `aggregate`: count adjacent letter pairs in a word-frequency corpus
//! 2. `assess`: score one layout against frequency and cost tables
//! 3. `optimize`: anneal toward a cheaper layout, optionally exporting
//!    the cost trajectory for plotting

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use u_keylayout::layout::{render_qwerty, Alphabet, Layout, LATIN_LETTERS};
use u_keylayout::objective::WeightedEquivalence;
use u_keylayout::report;
use u_keylayout::sa::AnnealConfig;
use u_keylayout::tables::{corpus, PairCost, PairFrequency};

/// Keyboard layout optimization by simulated annealing.
#[derive(Parser, Debug)]
#[command(name = "u-keylayout")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Verbose output (per-temperature progress)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count letter pairs in a corpus and write a `Pair<TAB>Frequency` table
    Aggregate {
        /// Word-frequency corpus (9-line preamble, word in column 2, count in column 4)
        input: PathBuf,
        /// Output table
        output: PathBuf,
    },

    /// Evaluate a single layout
    Assess {
        #[command(flatten)]
        tables: TableArgs,

        /// Assigned symbols in alphabet order (defaults to identity)
        #[arg(long)]
        layout: Option<String>,
    },

    /// Search for a cheaper layout
    Optimize {
        #[command(flatten)]
        tables: TableArgs,

        /// Starting layout in alphabet order (defaults to identity)
        #[arg(long)]
        layout: Option<String>,

        /// Starting temperature
        #[arg(long, default_value_t = 1000.0)]
        initial_temperature: f64,

        /// Multiplicative cooling per temperature level, in (0, 1)
        #[arg(long, default_value_t = 0.95)]
        cooling_rate: f64,

        /// Proposals per temperature level
        #[arg(long, default_value_t = 100)]
        max_iter: usize,

        /// Maximum transpositions per proposal
        #[arg(long, default_value_t = 5)]
        max_swaps: usize,

        /// Stop once the temperature falls to this value
        #[arg(long, default_value_t = 1e-6)]
        threshold: f64,

        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Write the per-iteration cost trajectory as TSV
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Pair-frequency table (`Pair<TAB>Frequency` with header)
    #[arg(long)]
    freq: PathBuf,

    /// Pair-cost table (`pair cost` per line)
    #[arg(long)]
    cost: PathBuf,

    /// Symbols being permuted
    #[arg(long, default_value = LATIN_LETTERS)]
    alphabet: String,
}

struct Tables {
    frequency: PairFrequency,
    cost: PairCost,
    alphabet: Alphabet,
}

impl TableArgs {
    fn load(&self) -> Result<Tables> {
        let frequency = PairFrequency::read_tsv(&self.freq)
            .with_context(|| format!("loading frequency table {}", self.freq.display()))?;
        let cost = PairCost::read(&self.cost)
            .with_context(|| format!("loading cost table {}", self.cost.display()))?;
        let alphabet = Alphabet::new(self.alphabet.chars()).context("invalid --alphabet")?;
        tracing::info!(
            pairs = frequency.len(),
            costs = cost.len(),
            symbols = alphabet.len(),
            "tables loaded"
        );
        Ok(Tables {
            frequency,
            cost,
            alphabet,
        })
    }
}

fn starting_layout(alphabet: &Alphabet, images: Option<&str>) -> Result<Layout> {
    match images {
        Some(images) => Layout::from_images(alphabet, images).context("invalid --layout"),
        None => Ok(Layout::identity(alphabet)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Aggregate { input, output } => {
            let stats = corpus::aggregate_file(&input)
                .with_context(|| format!("reading corpus {}", input.display()))?;
            std::fs::write(&output, stats.counts.to_tsv())
                .with_context(|| format!("writing {}", output.display()))?;
            println!(
                "{} pairs from {} rows ({} skipped) -> {}",
                stats.counts.len(),
                stats.rows,
                stats.skipped_rows,
                output.display()
            );
        }

        Command::Assess { tables, layout } => {
            let tables = tables.load()?;
            let layout = starting_layout(&tables.alphabet, layout.as_deref())?;
            let problem = WeightedEquivalence::new(&tables.frequency, &tables.cost);
            problem.check_layout(&layout)?;

            let evaluation = problem.evaluate(&layout);
            println!("{}", render_qwerty(&layout));
            println!("weighted equivalence: {}", evaluation.cost);
            if evaluation.skipped_pairs > 0 {
                println!(
                    "skipped pairs: {} (weight {:.6})",
                    evaluation.skipped_pairs, evaluation.skipped_weight
                );
            }
        }

        Command::Optimize {
            tables,
            layout,
            initial_temperature,
            cooling_rate,
            max_iter,
            max_swaps,
            threshold,
            seed,
            history,
        } => {
            let tables = tables.load()?;
            let start = starting_layout(&tables.alphabet, layout.as_deref())?;

            let mut config = AnnealConfig::default()
                .with_initial_temperature(initial_temperature)
                .with_cooling_rate(cooling_rate)
                .with_max_iter_per_temperature(max_iter)
                .with_max_swaps_per_proposal(max_swaps)
                .with_termination_threshold(threshold);
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }

            let problem = WeightedEquivalence::new(&tables.frequency, &tables.cost);
            let (result, evaluation) = problem.anneal(&start, &config)?;

            println!("best layout: {}", result.best);
            println!("{}", render_qwerty(&result.best));
            println!("weighted equivalence: {}", result.best_cost);
            println!(
                "initial: {}  levels: {}  evaluations: {}  skipped pairs: {}",
                result.initial_cost,
                result.outer_iterations,
                result.evaluations,
                evaluation.skipped_pairs
            );

            if let Some(path) = history {
                report::write_tsv(&path, &result, &config)
                    .with_context(|| format!("writing trajectory {}", path.display()))?;
                println!("trajectory -> {}", path.display());
            }
        }
    }

    Ok(())
}
