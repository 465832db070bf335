//! # Hanseg Trainer
//!
//! Supervised estimation of the segmentation HMM from a corpus whose words
//! are already separated by whitespace.

pub mod corpus;
pub mod trainer;

use std::path::Path;

use anyhow::Context;
use hanseg_core::{JsonModelStore, Model};

pub use corpus::{CorpusSource, LineCorpus, Separator, corpus_from_lines};
pub use trainer::{Trainer, TrainerConfig};

/// Train on the corpus file at `corpus_path` and write the model to `model_path`.
pub fn run_training(
    corpus_path: &Path,
    model_path: &Path,
    config: TrainerConfig,
) -> anyhow::Result<Model> {
    let corpus = LineCorpus::open(corpus_path)
        .with_context(|| format!("Training corpus not found: {}", corpus_path.display()))?;
    let store = JsonModelStore::new(model_path);

    let model = Trainer::new(config)
        .train_and_save(corpus, &store)
        .with_context(|| format!("Training on {} failed", corpus_path.display()))?;
    Ok(model)
}
