//! # Model Persistence
//!
//! The [`ModelStore`] seam lets the trainer and the segmenter persist models
//! without knowing where they live. [`JsonModelStore`] keeps a model in a
//! JSON file.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{HansegError, Result};
use crate::model::Model;

/// Somewhere a trained model can be saved to and loaded from.
pub trait ModelStore {
    /// Persist `model`, replacing whatever was stored before.
    fn save(&self, model: &Model) -> Result<()>;

    /// Load the stored model.
    fn load(&self) -> Result<Model>;
}

/// Stores a model as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonModelStore {
    path: PathBuf,
}

impl JsonModelStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether a model file is present.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn storage_error(&self, source: std::io::Error) -> HansegError {
        HansegError::Storage {
            path: self.path.clone(),
            source,
        }
    }

    /// I/O failures surfacing through the serializer keep the file path.
    fn write_error(&self, err: serde_json::Error) -> HansegError {
        if err.is_io() {
            self.storage_error(err.into())
        } else {
            HansegError::ModelFormat(err)
        }
    }
}

impl ModelStore for JsonModelStore {
    fn save(&self, model: &Model) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
        }

        let file = File::create(&self.path).map_err(|e| self.storage_error(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, model).map_err(|e| self.write_error(e))?;
        writer.flush().map_err(|e| self.storage_error(e))?;

        debug!(path = %self.path.display(), "model saved");
        Ok(())
    }

    fn load(&self) -> Result<Model> {
        let file = File::open(&self.path).map_err(|e| self.storage_error(e))?;
        let model: Model = serde_json::from_reader(BufReader::new(file))?;
        model.validate()?;

        debug!(
            path = %self.path.display(),
            vocabulary = model.vocabulary_size(),
            "model loaded"
        );
        Ok(model)
    }
}
