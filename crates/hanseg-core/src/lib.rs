//! # Hanseg Core
//!
//! Chinese word segmentation with a Hidden Markov Model over the BMES tag
//! alphabet. Provides the model tables, Viterbi decoding, tag-to-word
//! segmentation and model persistence. Training lives in `hanseg-trainer`.
//!
//! ## Quick Start
//!
//! ```rust
//! use hanseg_core::{HmmSegmenter, ModelBuilder, Tag};
//!
//! let mut builder = ModelBuilder::new();
//! builder
//!     .initial(Tag::Begin, 0.0)
//!     .transition(Tag::Begin, Tag::End, 0.0)
//!     .emission(Tag::Begin, '中', -0.1)
//!     .emission(Tag::End, '国', -0.1);
//!
//! let segmenter = HmmSegmenter::new(builder.build());
//! assert_eq!(segmenter.cut("中国").unwrap(), vec!["中国"]);
//! ```
pub mod error;
pub mod hmm;
pub mod model;
pub mod segmenter;
pub mod store;
pub mod tag;
pub mod viterbi;

// Re-export primary API
pub use error::{HansegError, Result};
pub use hmm::HmmSegmenter;
pub use model::{EmissionMap, LogProb, MAX_LOG, MIN_LOG, Model, ModelBuilder};
pub use segmenter::{Segments, segment};
pub use store::{JsonModelStore, ModelStore};
pub use tag::{Tag, label, label_into, tags_to_string};
pub use viterbi::{Decoded, DecoderConfig, UnseenEmission, ViterbiDecoder};
