use std::path::PathBuf;

use hanseg_trainer::{TrainerConfig, run_training};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

/// Log subscriber writing to stderr, so stdout stays free for results.
fn subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    subscriber(filter).init();

    let mut args = std::env::args_os().skip(1);
    let corpus = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/pku_training.utf8"));
    let model = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/hmm_model.json"));

    if let Err(e) = run_training(&corpus, &model, TrainerConfig::default()) {
        eprintln!("Training failed: {:#}", e);
        std::process::exit(1);
    }
    println!("Model saved to {:?}", model);
}
