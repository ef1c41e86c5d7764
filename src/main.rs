//! Wordle Frequency - CLI
//!
//! Wordle solver with TUI and CLI modes. Guesses are chosen by how many
//! remaining candidates share their letters.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::path::PathBuf;
use wordle_frequency::{
    commands::{
        SolveConfig, print_test_all_statistics, run_benchmark, run_simple, run_test_all,
        sample_targets, solve_word,
    },
    core::{Rules, Word},
    output::{print_benchmark_result, print_solve_result},
    solver::SessionConfig,
    wordlists::{Dictionary, DictionarySource, Language},
};

#[derive(Parser)]
#[command(
    name = "wordle_frequency",
    about = "Wordle solver that suggests guesses by letter coverage",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Language of the embedded dictionary: english (default) or danish
    #[arg(short = 'L', long, global = true, default_value = "english")]
    language: String,

    /// Word file (one word per line) to use instead of the embedded dictionary
    #[arg(short = 'd', long, global = true)]
    dictionary: Option<PathBuf>,

    /// Word length
    #[arg(long, global = true, default_value_t = 5)]
    length: usize,

    /// Feedback rules: 'simple' (default) or 'exact' for duplicate-aware scoring
    #[arg(short, long, global = true, default_value = "simple")]
    rules: String,

    /// Give up after this many guesses (default: no limit)
    #[arg(short, long, global = true)]
    max_rounds: Option<usize>,

    /// Debug logging; `solve` also prints the knowledge after every guess
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple line-based mode
    ///
    /// Without a target the engine guesses and you type the feedback from
    /// another game. With --target or --random the word is known locally.
    Simple {
        /// You type the guesses instead of the engine
        #[arg(long)]
        human: bool,

        /// Hidden word for a local game
        #[arg(short, long, conflicts_with = "random")]
        target: Option<String>,

        /// Pick a random hidden word for each game
        #[arg(long)]
        random: bool,

        /// Seed for --random
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Let the engine solve a word
    Solve {
        /// The target word (default: a random dictionary word)
        word: Option<String>,

        /// Seed for picking the random word
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Benchmark on a random sample of dictionary words
    Benchmark {
        /// Number of random words to test
        #[arg(short = 'n', long, default_value = "50")]
        count: usize,

        /// Seed for the sample
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Test the engine on every dictionary word
    TestAll {
        /// Limit number of words to test
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let language = Language::from_name(&cli.language)
        .with_context(|| format!("Unknown language '{}' (english, danish)", cli.language))?;
    let rules = Rules::from_name(&cli.rules)
        .with_context(|| format!("Unknown rules '{}' (simple, exact)", cli.rules))?;

    let source = cli
        .dictionary
        .clone()
        .map_or(DictionarySource::Embedded(language), DictionarySource::File);
    let config = SessionConfig {
        word_length: cli.length,
        rules,
        max_rounds: cli.max_rounds,
    };

    let dictionary = Dictionary::load(&source, language, config.word_length)
        .with_context(|| format!("Cannot load dictionary from {source}"))?;

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => run_play_command(&dictionary, rules),
        Commands::Simple {
            human,
            target,
            random,
            seed,
        } => run_simple_command(&dictionary, config, human, target.as_deref(), random, seed),
        Commands::Solve { word, seed } => {
            run_solve_command(&dictionary, config, word, seed, cli.verbose)
        }
        Commands::Benchmark { count, seed } => {
            run_benchmark_command(&dictionary, config, count, seed);
            Ok(())
        }
        Commands::TestAll { limit } => {
            run_test_all_command(&dictionary, config, limit);
            Ok(())
        }
    }
}

fn run_solve_command(
    dictionary: &Dictionary,
    config: SessionConfig,
    word: Option<String>,
    seed: Option<u64>,
    verbose: bool,
) -> Result<()> {
    let mut solve_config = SolveConfig::new(word, config);
    solve_config.seed = seed;
    solve_config.snapshots = verbose;

    let result = solve_word(&solve_config, dictionary).map_err(|e| anyhow::anyhow!(e))?;
    print_solve_result(&result);
    Ok(())
}

fn run_benchmark_command(
    dictionary: &Dictionary,
    config: SessionConfig,
    count: usize,
    seed: Option<u64>,
) {
    println!(
        "Running benchmark on {count} random words ({} rules)...",
        config.rules.name()
    );

    let targets = sample_targets(dictionary, count, seed);
    let result = run_benchmark(dictionary, &targets, config);
    print_benchmark_result(&result);
}

fn run_test_all_command(dictionary: &Dictionary, config: SessionConfig, limit: Option<usize>) {
    println!("\n{}", "═".repeat(70));
    println!(" Comprehensive Wordle Solver Test ");
    println!("{}", "═".repeat(70));
    println!(
        "\nTesting against {} {}-letter words",
        dictionary.len(),
        dictionary.word_length()
    );
    println!("Rules: {}", config.rules.name());
    println!();

    let stats = run_test_all(dictionary, limit, config);
    print_test_all_statistics(&stats);
}

fn run_simple_command(
    dictionary: &Dictionary,
    config: SessionConfig,
    human: bool,
    target: Option<&str>,
    random: bool,
    seed: Option<u64>,
) -> Result<()> {
    let fixed: Option<Word> = target
        .map(|text| {
            dictionary.get(text).cloned().with_context(|| {
                format!(
                    "'{text}' is not a {}-letter word in the dictionary",
                    dictionary.word_length()
                )
            })
        })
        .transpose()?;

    let mut rng = seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64);
    let pick_target = || {
        if random {
            dictionary.words().choose(&mut rng).cloned()
        } else {
            fixed.clone()
        }
    };

    run_simple(dictionary, config, human, pick_target).map_err(|e| anyhow::anyhow!(e))
}

fn run_play_command(dictionary: &Dictionary, rules: Rules) -> Result<()> {
    use wordle_frequency::interactive::{App, run_tui};

    let app = App::new(dictionary, rules);
    run_tui(app)
}
