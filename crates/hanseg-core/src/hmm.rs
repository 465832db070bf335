//! # HMM Segmenter
//!
//! Bundles a trained [`Model`] with a [`ViterbiDecoder`] to cut raw text into words.

use tracing::debug;

use crate::error::Result;
use crate::model::Model;
use crate::segmenter::segment;
use crate::store::ModelStore;
use crate::viterbi::{Decoded, DecoderConfig, ViterbiDecoder};

/// Word segmenter backed by a trained HMM.
#[derive(Debug, Clone)]
pub struct HmmSegmenter {
    model: Model,
    decoder: ViterbiDecoder,
}

impl HmmSegmenter {
    /// Create a segmenter with the default decoder configuration.
    pub fn new(model: Model) -> Self {
        Self::with_config(model, DecoderConfig::default())
    }

    /// Create a segmenter with a custom decoder configuration.
    pub fn with_config(model: Model, config: DecoderConfig) -> Self {
        Self {
            model,
            decoder: ViterbiDecoder::new(config),
        }
    }

    /// Load the model from `store`.
    pub fn load(store: &impl ModelStore) -> Result<Self> {
        Ok(Self::new(store.load()?))
    }

    /// Replace the decoder configuration.
    pub fn with_decoder_config(mut self, config: DecoderConfig) -> Self {
        self.decoder = ViterbiDecoder::new(config);
        self
    }

    /// The underlying model.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The decoder in use.
    pub fn decoder(&self) -> &ViterbiDecoder {
        &self.decoder
    }

    /// Decode the tag sequence of `text` without splitting it.
    pub fn tags(&self, text: &str) -> Result<Decoded> {
        self.decoder.decode(&self.model, text)
    }

    /// Cut `text` into words. The whole text is decoded as one sequence.
    ///
    /// # Errors
    /// Returns [`crate::HansegError::EmptyInput`] for an empty `text`.
    pub fn cut<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let decoded = self.tags(text)?;
        let words: Vec<&'a str> = segment(text, &decoded.tags)?.collect();
        debug!(
            chars = decoded.tags.len(),
            words = words.len(),
            log_prob = decoded.log_prob,
            "cut text"
        );
        Ok(words)
    }

    /// Cut every non-blank line of `text` separately.
    ///
    /// Line breaks and blank lines produce no tokens; each line is decoded as
    /// its own sentence.
    pub fn cut_lines<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut words = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            words.extend(self.cut(line)?);
        }
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HansegError;
    use crate::model::ModelBuilder;
    use crate::store::JsonModelStore;
    use crate::tag::Tag;
    use crate::viterbi::UnseenEmission;

    fn word_model() -> Model {
        let half = 0.5f64.ln();
        let mut builder = ModelBuilder::new();
        builder
            .initial(Tag::Begin, 0.0)
            .transition(Tag::Begin, Tag::End, 1.5f64.ln())
            .transition(Tag::Begin, Tag::Begin, half)
            .transition(Tag::Begin, Tag::Middle, half)
            .transition(Tag::Begin, Tag::Single, half)
            .transition(Tag::End, Tag::Begin, 0.0)
            .transition(Tag::End, Tag::Middle, half)
            .transition(Tag::End, Tag::End, half)
            .transition(Tag::End, Tag::Single, half)
            .emission(Tag::End, 'b', 0.0)
            .emission(Tag::Begin, 'c', 0.0)
            .emission(Tag::End, 'd', 0.0);
        builder.build()
    }

    #[test]
    fn test_cut_two_words() {
        let segmenter = HmmSegmenter::new(word_model());
        assert_eq!(segmenter.cut("abcd").unwrap(), vec!["ab", "cd"]);
    }

    #[test]
    fn test_cut_empty() {
        let segmenter = HmmSegmenter::new(word_model());
        assert!(matches!(segmenter.cut(""), Err(HansegError::EmptyInput)));
    }

    #[test]
    fn test_cut_with_unseen_character() {
        // 'a' never appears as an emission, so it is scored as unseen.
        let segmenter = HmmSegmenter::new(word_model());
        let words = segmenter.cut("abcdab").unwrap();
        assert_eq!(words, vec!["ab", "cd", "ab"]);
        assert_eq!(words.concat(), "abcdab");
    }

    #[test]
    fn test_cut_lines_skips_blank_lines() {
        let segmenter = HmmSegmenter::new(word_model());
        let words = segmenter.cut_lines("abcd\n\n  abcd  \n").unwrap();
        assert_eq!(words, vec!["ab", "cd", "ab", "cd"]);
    }

    #[test]
    fn test_cut_lines_empty_text() {
        let segmenter = HmmSegmenter::new(word_model());
        assert!(segmenter.cut_lines("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_load_from_store() {
        let path = std::env::temp_dir()
            .join(format!("hanseg-hmm-{}", std::process::id()))
            .join("model.json");
        let store = JsonModelStore::new(&path);
        store.save(&word_model()).unwrap();

        let segmenter = HmmSegmenter::load(&store).unwrap();
        assert_eq!(segmenter.model(), &word_model());
        assert_eq!(segmenter.cut("abcd").unwrap(), vec!["ab", "cd"]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_model() {
        let store = JsonModelStore::new("/nonexistent/hanseg/model.json");
        let err = HmmSegmenter::load(&store).unwrap_err();
        assert!(err.is_storage());
    }

    #[test]
    fn test_with_decoder_config() {
        let config = DecoderConfig::new().with_unseen_emission(UnseenEmission::Neutral);
        let segmenter = HmmSegmenter::new(word_model()).with_decoder_config(config);
        assert_eq!(
            segmenter.decoder().config().unseen_emission,
            UnseenEmission::Neutral
        );
    }

    #[test]
    fn test_with_config() {
        let config = DecoderConfig::new().with_unseen_emission(UnseenEmission::Neutral);
        let segmenter = HmmSegmenter::with_config(word_model(), config);
        assert_eq!(
            segmenter.decoder().config().unseen_emission,
            UnseenEmission::Neutral
        );
        assert_eq!(segmenter.tags("ab").unwrap().tags, vec![Tag::Begin, Tag::End]);
    }
}
