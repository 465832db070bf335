use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while training, storing or decoding a segmentation model.
#[derive(Debug, Error)]
pub enum HansegError {
    /// The text handed to the decoder has no characters.
    #[error("input text is empty")]
    EmptyInput,

    /// The training corpus produced no usable line.
    #[error("training corpus contains no non-blank line ({lines_read} lines read)")]
    EmptyCorpus {
        /// Raw lines consumed from the source, blank ones included.
        lines_read: usize,
    },

    /// The corpus source failed while producing a line.
    #[error("failed to read corpus line {line}")]
    CorpusRead {
        /// 1-based number of the line that could not be read.
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// A tag sequence does not line up with the text it should segment.
    #[error("tag sequence has {tags} tags but text has {chars} characters")]
    TagAlignment {
        /// Number of characters in the text.
        chars: usize,
        /// Number of tags supplied.
        tags: usize,
    },

    /// The model file could not be read or written.
    #[error("model storage error at {}", path.display())]
    Storage {
        /// The path being accessed.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored model is not valid JSON of the expected shape.
    #[error("malformed model data: {0}")]
    ModelFormat(#[from] serde_json::Error),

    /// The stored model violates a table invariant.
    #[error("invalid model {table} table: {detail}")]
    InvalidModel {
        /// Which table is broken (`initial`, `transition` or `emission`).
        table: &'static str,
        /// What is wrong with it, including the tag and character involved.
        detail: String,
    },
}

impl HansegError {
    /// Returns `true` for errors raised by a model store.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::Storage { .. } | Self::ModelFormat(_) | Self::InvalidModel { .. }
        )
    }
}

/// Result type alias for hanseg operations.
pub type Result<T> = std::result::Result<T, HansegError>;
