//! Hanseg command-line tool
//!
//! Trains a segmentation model from a segmented corpus and cuts raw text
//! with a stored model.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hanseg_core::{
    DecoderConfig, HmmSegmenter, JsonModelStore, Model, ModelStore, Tag, UnseenEmission,
    tags_to_string,
};
use hanseg_trainer::{LineCorpus, Separator, Trainer, TrainerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Default model location
fn default_model_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hanseg")
        .join("hmm_model.json")
}

/// CLI arguments
#[derive(Parser)]
#[command(name = "hanseg")]
#[command(about = "Train and run an HMM Chinese word segmenter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Model file
    #[arg(short, long, env = "HANSEG_MODEL")]
    model: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model from a whitespace-segmented corpus
    Train {
        /// Corpus file, one sentence per line
        corpus: PathBuf,

        /// Word separator used by the corpus
        #[arg(short, long, value_enum, default_value_t = SeparatorArg::DoubleSpace)]
        separator: SeparatorArg,

        /// Log progress every N lines (0 disables)
        #[arg(long, default_value_t = 10_000)]
        progress: usize,
    },
    /// Cut text into words (reads stdin when TEXT is omitted)
    Cut {
        text: Option<String>,

        /// Score unseen characters with 0.0 instead of the legacy 1.0
        #[arg(long)]
        neutral_unseen: bool,

        /// Print each result as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Print the decoded BMES tags and their log-probability
    Tags {
        text: Option<String>,

        /// Score unseen characters with 0.0 instead of the legacy 1.0
        #[arg(long)]
        neutral_unseen: bool,
    },
    /// Show a summary of the stored model
    Inspect,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SeparatorArg {
    Space,
    DoubleSpace,
}

impl From<SeparatorArg> for Separator {
    fn from(arg: SeparatorArg) -> Self {
        match arg {
            SeparatorArg::Space => Separator::Space,
            SeparatorArg::DoubleSpace => Separator::DoubleSpace,
        }
    }
}

fn decoder_config(neutral_unseen: bool) -> DecoderConfig {
    let unseen = if neutral_unseen {
        UnseenEmission::Neutral
    } else {
        UnseenEmission::Legacy
    };
    DecoderConfig::new().with_unseen_emission(unseen)
}

fn load_segmenter(store: &JsonModelStore, neutral_unseen: bool) -> Result<HmmSegmenter> {
    let segmenter = HmmSegmenter::load(store)
        .with_context(|| format!("Failed to load model from {}", store.path().display()))?;
    Ok(segmenter.with_decoder_config(decoder_config(neutral_unseen)))
}

/// Run `f` on TEXT, or on every non-blank stdin line when TEXT is absent.
fn for_each_input(text: Option<String>, mut f: impl FnMut(&str) -> Result<()>) -> Result<()> {
    if let Some(text) = text {
        return f(&text);
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        f(line)?;
    }
    Ok(())
}

fn train(
    store: &JsonModelStore,
    corpus: PathBuf,
    separator: SeparatorArg,
    progress: usize,
) -> Result<()> {
    info!(corpus = %corpus.display(), "training model");
    let source = LineCorpus::open(&corpus)
        .with_context(|| format!("Training corpus not found: {}", corpus.display()))?;
    let config = TrainerConfig::new()
        .with_separator(separator.into())
        .with_progress_interval(progress);

    let model = Trainer::new(config)
        .train_and_save(source, store)
        .context("Training failed")?;
    info!(
        path = %store.path().display(),
        vocabulary = model.vocabulary_size(),
        "model saved"
    );
    Ok(())
}

fn inspect(model: &Model) {
    println!("vocabulary: {}", model.vocabulary_size());
    println!("initial:");
    for tag in Tag::ALL {
        println!("  {tag}  {:.6}", model.initial(tag));
    }
    println!("transition:");
    for from in Tag::ALL {
        let row: Vec<String> = Tag::ALL
            .iter()
            .map(|&to| format!("{to}={:.6}", model.transition(from, to)))
            .collect();
        println!("  {from}  {}", row.join("  "));
    }
    println!("emission:");
    for tag in Tag::ALL {
        println!("  {tag}  {} characters", model.emissions(tag).len());
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let store = JsonModelStore::new(cli.model.unwrap_or_else(default_model_path));

    match cli.command {
        Commands::Train {
            corpus,
            separator,
            progress,
        } => train(&store, corpus, separator, progress)?,
        Commands::Cut {
            text,
            neutral_unseen,
            json,
        } => {
            let segmenter = load_segmenter(&store, neutral_unseen)?;
            let mut stdout = io::stdout().lock();
            for_each_input(text, |input| {
                let words = segmenter.cut(input)?;
                if json {
                    serde_json::to_writer(&mut stdout, &words)?;
                    writeln!(stdout)?;
                } else {
                    writeln!(stdout, "{}", words.join(" / "))?;
                }
                Ok(())
            })?;
        }
        Commands::Tags {
            text,
            neutral_unseen,
        } => {
            let segmenter = load_segmenter(&store, neutral_unseen)?;
            for_each_input(text, |input| {
                let decoded = segmenter.tags(input)?;
                println!("{}\t{}", tags_to_string(&decoded.tags), decoded.log_prob);
                Ok(())
            })?;
        }
        Commands::Inspect => {
            let model = store
                .load()
                .with_context(|| format!("Failed to load model from {}", store.path().display()))?;
            inspect(&model);
        }
    }

    Ok(())
}
