//! Supervised training of the segmentation HMM.

use std::collections::BTreeMap;

use hanseg_core::{
    HansegError, MIN_LOG, Model, ModelBuilder, ModelStore, Result, Tag, label_into,
};
use tracing::{debug, info};

use crate::corpus::{CorpusSource, Separator};

/// Configuration for the trainer.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    /// Separator between words in the corpus.
    pub separator: Separator,
    /// Log progress every this many usable lines; `0` disables progress logs.
    pub progress_interval: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            separator: Separator::default(),
            progress_interval: 10_000,
        }
    }
}

impl TrainerConfig {
    /// Create a new trainer configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the word separator.
    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Set the progress logging interval.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }
}

/// Raw occurrence counts gathered from the corpus.
#[derive(Debug, Clone, Default)]
struct Counts {
    initial: [u64; Tag::NUM_TAGS],
    transition: [[u64; Tag::NUM_TAGS]; Tag::NUM_TAGS],
    emission: [BTreeMap<char, u64>; Tag::NUM_TAGS],
    /// Occurrences of each tag at any position.
    totals: [u64; Tag::NUM_TAGS],
    lines: u64,
}

impl Counts {
    fn observe(&mut self, chars: &[char], tags: &[Tag]) {
        self.lines += 1;
        for (pos, (&ch, &tag)) in chars.iter().zip(tags).enumerate() {
            self.totals[tag.index()] += 1;
            if pos == 0 {
                self.initial[tag.index()] += 1;
            } else {
                let prev = tags[pos - 1];
                self.transition[prev.index()][tag.index()] += 1;
                // The first character of a line is not counted as an emission.
                *self.emission[tag.index()].entry(ch).or_insert(0) += 1;
            }
        }
    }

    fn normalize(&self) -> Model {
        let lines = self.lines as f64;
        let mut builder = ModelBuilder::new();

        for tag in Tag::ALL {
            let starts = self.initial[tag.index()];
            let value = if starts > 0 {
                (starts as f64 / lines).ln()
            } else {
                MIN_LOG
            };
            builder.initial(tag, value);
        }

        for from in Tag::ALL {
            let total = self.totals[from.index()];
            for to in Tag::ALL {
                let count = self.transition[from.index()][to.index()];
                builder.transition(from, to, smoothed(count, total));
            }
        }

        for tag in Tag::ALL {
            let total = self.totals[tag.index()];
            for (&ch, &count) in &self.emission[tag.index()] {
                builder.emission(tag, ch, smoothed(count, total));
            }
        }

        builder.build()
    }
}

/// `ln((count + 1) / total)`, or `MIN_LOG` for a tag never observed.
///
/// The denominator has no vocabulary term, so values are unnormalized.
fn smoothed(count: u64, total: u64) -> f64 {
    if total == 0 {
        return MIN_LOG;
    }
    ((count + 1) as f64 / total as f64).ln()
}

/// Accumulates counts from segmented lines and turns them into a [`Model`].
#[derive(Debug, Default)]
pub struct Trainer {
    config: TrainerConfig,
    counts: Counts,
    chars: Vec<char>,
    tags: Vec<Tag>,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Get the trainer configuration.
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Number of usable lines observed so far.
    pub fn lines_seen(&self) -> u64 {
        self.counts.lines
    }

    /// Feed one segmented line. Returns `false` if the line was blank and skipped.
    pub fn observe_line(&mut self, line: &str) -> bool {
        let line = line.trim();
        self.chars.clear();
        self.tags.clear();

        for word in self.config.separator.split(line) {
            let before = self.chars.len();
            self.chars.extend(word.chars());
            label_into(&mut self.tags, self.chars.len() - before);
        }

        if self.chars.is_empty() {
            return false;
        }
        self.counts.observe(&self.chars, &self.tags);
        true
    }

    /// Normalize the accumulated counts into a model.
    ///
    /// # Errors
    /// Returns [`HansegError::EmptyCorpus`] if no usable line was observed.
    pub fn finish(&self) -> Result<Model> {
        if self.counts.lines == 0 {
            return Err(HansegError::EmptyCorpus { lines_read: 0 });
        }

        for tag in Tag::ALL {
            debug!(
                tag = %tag,
                occurrences = self.counts.totals[tag.index()],
                starts = self.counts.initial[tag.index()],
                characters = self.counts.emission[tag.index()].len(),
                "tag statistics"
            );
        }
        Ok(self.counts.normalize())
    }

    /// Train a model from every line of `corpus`.
    ///
    /// Counts from earlier calls (including lines fed through
    /// [`Trainer::observe_line`]) are discarded first, so each call trains on
    /// `corpus` alone.
    ///
    /// # Errors
    /// Returns [`HansegError::CorpusRead`] if the source fails and
    /// [`HansegError::EmptyCorpus`] if it has no non-blank line.
    pub fn train(&mut self, mut corpus: impl CorpusSource) -> Result<Model> {
        self.counts = Counts::default();
        let mut lines_read = 0usize;
        while let Some(line) = corpus.next_line() {
            lines_read += 1;
            let line = line.map_err(|source| HansegError::CorpusRead {
                line: lines_read,
                source,
            })?;

            if self.observe_line(&line) {
                let interval = self.config.progress_interval as u64;
                if interval > 0 && self.counts.lines % interval == 0 {
                    info!(lines = self.counts.lines, "training progress");
                }
            }
        }

        if self.counts.lines == 0 {
            return Err(HansegError::EmptyCorpus { lines_read });
        }

        let model = self.finish()?;
        info!(
            lines = self.counts.lines,
            vocabulary = model.vocabulary_size(),
            "training complete"
        );
        Ok(model)
    }

    /// Train a model and persist it in `store`.
    pub fn train_and_save(
        &mut self,
        corpus: impl CorpusSource,
        store: &impl ModelStore,
    ) -> Result<Model> {
        let model = self.train(corpus)?;
        store.save(&model)?;
        Ok(model)
    }
}
