//! # Hanseg
//!
//! Chinese word segmentation with a hidden Markov model over the BMES tag
//! alphabet: train on a whitespace-segmented corpus, then cut raw text.
//!
//! ```rust
//! use hanseg::{HmmSegmenter, Separator, Trainer, TrainerConfig, corpus_from_lines};
//!
//! let config = TrainerConfig::new().with_separator(Separator::Space);
//! let model = Trainer::new(config)
//!     .train(corpus_from_lines(["ab cd"]))
//!     .unwrap();
//!
//! let segmenter = HmmSegmenter::new(model);
//! assert_eq!(segmenter.cut("abcd").unwrap(), vec!["ab", "cd"]);
//! ```

pub use hanseg_core::*;
pub use hanseg_trainer::{
    CorpusSource, LineCorpus, Separator, Trainer, TrainerConfig, corpus_from_lines, run_training,
};

/// Training internals.
pub mod trainer {
    pub use hanseg_trainer::*;
}
