//! # Viterbi Decoding for the Segmentation HMM
//!
//! Finds the most likely BMES tag sequence for a sentence given a trained
//! [`Model`]. Scores are sums of log-probabilities.

use tracing::trace;

use crate::error::{HansegError, Result};
use crate::model::{LogProb, MIN_LOG, Model};
use crate::tag::{Tag, tags_to_string};

/// Emission score given to a character that no tag has ever emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnseenEmission {
    /// Adds `1.0` per unseen character.
    ///
    /// Known defect kept for compatibility with models and outputs of the
    /// probability-domain tagger, where `1.0` was the neutral factor. In log
    /// space it rewards out-of-vocabulary characters.
    #[default]
    Legacy,
    /// Adds `0.0`, the neutral element in log space.
    Neutral,
}

impl UnseenEmission {
    /// The log-domain score added for an unseen character.
    pub fn score(self) -> LogProb {
        match self {
            UnseenEmission::Legacy => 1.0,
            UnseenEmission::Neutral => 0.0,
        }
    }
}

/// Configuration for the decoder.
#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    /// How characters absent from every emission table are scored.
    pub unseen_emission: UnseenEmission,
}

impl DecoderConfig {
    /// Create a decoder configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unseen-character policy.
    pub fn with_unseen_emission(mut self, unseen_emission: UnseenEmission) -> Self {
        self.unseen_emission = unseen_emission;
        self
    }
}

/// Result of decoding one text.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Log-probability of the best path.
    pub log_prob: LogProb,
    /// One tag per input character.
    pub tags: Vec<Tag>,
}

/// Viterbi decoder for BMES tag sequences.
#[derive(Debug, Clone, Default)]
pub struct ViterbiDecoder {
    config: DecoderConfig,
}

impl ViterbiDecoder {
    /// Create a decoder with the given configuration.
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Get the decoder configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode the optimal tag sequence for `text`.
    ///
    /// # Errors
    /// Returns [`HansegError::EmptyInput`] if `text` has no characters.
    pub fn decode(&self, model: &Model, text: &str) -> Result<Decoded> {
        let chars: Vec<char> = text.chars().collect();
        self.decode_chars(model, &chars)
    }

    /// Decode an already split character sequence.
    pub fn decode_chars(&self, model: &Model, chars: &[char]) -> Result<Decoded> {
        let Some((&first, _)) = chars.split_first() else {
            return Err(HansegError::EmptyInput);
        };
        let seq_len = chars.len();
        let unseen_score = self.config.unseen_emission.score();

        // DP table and back-pointers: [seq_len][NUM_TAGS]
        let mut dp = vec![[MIN_LOG; Tag::NUM_TAGS]; seq_len];
        let mut backptr = vec![[Tag::Begin; Tag::NUM_TAGS]; seq_len];

        for tag in Tag::ALL {
            dp[0][tag.index()] = model.initial(tag) + model.emission(tag, first).unwrap_or(MIN_LOG);
        }

        for pos in 1..seq_len {
            let ch = chars[pos];
            let never_seen = !model.is_known(ch);

            for curr in Tag::ALL {
                let emit = if never_seen {
                    unseen_score
                } else {
                    model.emission(curr, ch).unwrap_or(MIN_LOG)
                };

                let mut best_score = f64::NEG_INFINITY;
                let mut best_prev = Tag::Begin;
                for prev in Tag::ALL {
                    let score = dp[pos - 1][prev.index()] + model.transition(prev, curr) + emit;
                    if score > best_score {
                        best_score = score;
                        best_prev = prev;
                    }
                }

                dp[pos][curr.index()] = best_score;
                backptr[pos][curr.index()] = best_prev;
            }
        }

        let last_char = chars[seq_len - 1];
        let candidates: &[Tag] = if ends_mid_word(model, last_char) {
            &[Tag::End, Tag::Middle]
        } else {
            &Tag::ALL
        };

        let last_row = &dp[seq_len - 1];
        let mut best_final = candidates[0];
        for &tag in &candidates[1..] {
            if last_row[tag.index()] > last_row[best_final.index()] {
                best_final = tag;
            }
        }

        let mut tags = vec![best_final; seq_len];
        let mut curr = best_final;
        for pos in (1..seq_len).rev() {
            curr = backptr[pos][curr.index()];
            tags[pos - 1] = curr;
        }

        trace!(tags = %tags_to_string(&tags), "decoded sentence");

        Ok(Decoded {
            log_prob: last_row[best_final.index()],
            tags,
        })
    }
}

/// Whether the final character looks more like a word-internal character than a
/// standalone word. Absent entries compare as `0.0`.
fn ends_mid_word(model: &Model, ch: char) -> bool {
    let middle = model.emission(Tag::Middle, ch).unwrap_or(0.0);
    let single = model.emission(Tag::Single, ch).unwrap_or(0.0);
    middle > single
}
