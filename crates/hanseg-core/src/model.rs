//! # HMM Parameter Tables
//!
//! The trained model: initial, transition and emission log-probabilities,
//! indexed by [`Tag::index`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{HansegError, Result};
use crate::tag::Tag;

/// A natural-log probability.
pub type LogProb = f64;

/// Stand-in for `ln(0)`. Finite, so sums of it stay comparable.
pub const MIN_LOG: LogProb = -3.14e100;

/// Upper bound of a stored log-probability.
///
/// Add-one smoothing without a vocabulary term in the denominator can yield
/// `(n + 1) / n`, at most `2`.
pub const MAX_LOG: LogProb = std::f64::consts::LN_2;

/// Emission table of a single tag, keyed by character.
pub type EmissionMap = BTreeMap<char, LogProb>;

/// Hidden Markov Model over the BMES tag alphabet.
///
/// Built once by the trainer and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    initial: [LogProb; Tag::NUM_TAGS],
    transition: [[LogProb; Tag::NUM_TAGS]; Tag::NUM_TAGS],
    emission: [EmissionMap; Tag::NUM_TAGS],
}

impl Model {
    /// Create a model whose every probability is zero (`MIN_LOG`).
    pub fn empty() -> Self {
        Self {
            initial: [MIN_LOG; Tag::NUM_TAGS],
            transition: [[MIN_LOG; Tag::NUM_TAGS]; Tag::NUM_TAGS],
            emission: Default::default(),
        }
    }

    /// Assemble a model from complete tables.
    pub fn from_tables(
        initial: [LogProb; Tag::NUM_TAGS],
        transition: [[LogProb; Tag::NUM_TAGS]; Tag::NUM_TAGS],
        emission: [EmissionMap; Tag::NUM_TAGS],
    ) -> Self {
        Self {
            initial,
            transition,
            emission,
        }
    }

    /// Log-probability that a sentence starts with `tag`.
    pub fn initial(&self, tag: Tag) -> LogProb {
        self.initial[tag.index()]
    }

    /// Log-probability of moving from `from` to `to`.
    pub fn transition(&self, from: Tag, to: Tag) -> LogProb {
        self.transition[from.index()][to.index()]
    }

    /// Log-probability of observing `ch` in state `tag`, if it was ever seen there.
    pub fn emission(&self, tag: Tag, ch: char) -> Option<LogProb> {
        self.emission[tag.index()].get(&ch).copied()
    }

    /// The sparse emission table of `tag`.
    pub fn emissions(&self, tag: Tag) -> &EmissionMap {
        &self.emission[tag.index()]
    }

    /// Check whether `ch` was observed under any tag during training.
    pub fn is_known(&self, ch: char) -> bool {
        self.emission.iter().any(|map| map.contains_key(&ch))
    }

    /// Number of distinct characters across all emission tables.
    pub fn vocabulary_size(&self) -> usize {
        let mut chars: Vec<char> = self
            .emission
            .iter()
            .flat_map(|map| map.keys().copied())
            .collect();
        chars.sort_unstable();
        chars.dedup();
        chars.len()
    }

    pub(crate) fn set_initial(&mut self, tag: Tag, value: LogProb) {
        self.initial[tag.index()] = value;
    }

    pub(crate) fn set_transition(&mut self, from: Tag, to: Tag, value: LogProb) {
        self.transition[from.index()][to.index()] = value;
    }

    pub(crate) fn set_emission(&mut self, tag: Tag, ch: char, value: LogProb) {
        self.emission[tag.index()].insert(ch, value);
    }

    /// Verify that every stored value is a usable log-probability.
    ///
    /// Values must be finite and either `MIN_LOG` or at most [`MAX_LOG`].
    pub fn validate(&self) -> Result<()> {
        for tag in Tag::ALL {
            check_value("initial", self.initial(tag), || format!("{tag}"))?;

            for to in Tag::ALL {
                check_value("transition", self.transition(tag, to), || {
                    format!("{tag}->{to}")
                })?;
            }

            for (&ch, &value) in self.emissions(tag) {
                check_value("emission", value, || format!("{tag}/{ch:?}"))?;
            }
        }
        Ok(())
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::empty()
    }
}

/// Builder used by the trainer; the only way to mutate a model from outside the crate.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    model: Model,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial(&mut self, tag: Tag, value: LogProb) -> &mut Self {
        self.model.set_initial(tag, value);
        self
    }

    pub fn transition(&mut self, from: Tag, to: Tag, value: LogProb) -> &mut Self {
        self.model.set_transition(from, to, value);
        self
    }

    pub fn emission(&mut self, tag: Tag, ch: char, value: LogProb) -> &mut Self {
        self.model.set_emission(tag, ch, value);
        self
    }

    pub fn build(self) -> Model {
        self.model
    }
}

fn check_value(
    table: &'static str,
    value: LogProb,
    key: impl FnOnce() -> String,
) -> Result<()> {
    if value == MIN_LOG || (value.is_finite() && value <= MAX_LOG) {
        return Ok(());
    }
    Err(HansegError::InvalidModel {
        table,
        detail: format!("{} has out-of-range log-probability {value}", key()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> Model {
        let mut builder = ModelBuilder::new();
        builder
            .initial(Tag::Begin, -0.5)
            .initial(Tag::Single, -0.9)
            .transition(Tag::Begin, Tag::End, -0.1)
            .emission(Tag::Begin, '中', -1.2)
            .emission(Tag::End, '国', -1.4)
            .emission(Tag::Single, '中', -2.0);
        builder.build()
    }

    #[test]
    fn empty_model_is_all_min_log() {
        let model = Model::empty();
        for tag in Tag::ALL {
            assert_eq!(model.initial(tag), MIN_LOG);
            for to in Tag::ALL {
                assert_eq!(model.transition(tag, to), MIN_LOG);
            }
            assert!(model.emissions(tag).is_empty());
        }
        assert!(model.validate().is_ok());
    }

    #[test]
    fn lookups_follow_tag_index() {
        let model = sample_model();
        assert_eq!(model.initial(Tag::Begin), -0.5);
        assert_eq!(model.transition(Tag::Begin, Tag::End), -0.1);
        assert_eq!(model.transition(Tag::End, Tag::Begin), MIN_LOG);
        assert_eq!(model.emission(Tag::Begin, '中'), Some(-1.2));
        assert_eq!(model.emission(Tag::Middle, '中'), None);
    }

    #[test]
    fn known_characters_span_all_tags() {
        let model = sample_model();
        assert!(model.is_known('中'));
        assert!(model.is_known('国'));
        assert!(!model.is_known('人'));
        assert_eq!(model.vocabulary_size(), 2);
    }

    #[test]
    fn validate_rejects_nan_and_positive_overflow() {
        let mut builder = ModelBuilder::new();
        builder.initial(Tag::Middle, f64::NAN);
        let err = builder.build().validate().unwrap_err();
        assert!(err.to_string().contains("initial"));

        let mut builder = ModelBuilder::new();
        builder.emission(Tag::End, '人', 1.5);
        let err = builder.build().validate().unwrap_err();
        assert!(err.to_string().contains("'人'"));
    }

    #[test]
    fn validate_accepts_smoothing_upper_bound() {
        let mut builder = ModelBuilder::new();
        builder.transition(Tag::Begin, Tag::End, (3.0f64 / 2.0).ln());
        assert!(builder.build().validate().is_ok());
    }

    #[test]
    fn model_serialization_roundtrip() {
        let model = sample_model();
        let json = serde_json::to_string(&model).unwrap();
        let restored: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(model, restored);
    }

    #[test]
    fn model_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Model>();
    }
}
