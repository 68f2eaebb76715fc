//! Labeled sample storage for sequence data
//!
//! The engine itself never caches sequences between calls; repeated
//! analyses of the same material go through this store instead. Samples are
//! token sequences keyed by name, with an anonymous default slot for the
//! common single-sample workflow.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Key used when a sample is loaded without an explicit name.
pub const DEFAULT_SAMPLE: &str = "default";

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no sample named '{0}' is loaded")]
    SampleNotFound(String),

    #[error("sample '{0}' contains no tokens")]
    EmptySample(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// In-memory store of named symbol sequences.
#[derive(Debug, Default)]
pub struct SampleStore {
    samples: HashMap<String, Vec<String>>,
}

impl SampleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a token file into the anonymous default slot.
    ///
    /// Tokens are separated by whitespace and/or commas; empty tokens are
    /// dropped. A file with no tokens is rejected.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.load_as(path, DEFAULT_SAMPLE)
    }

    /// Load a token file under an explicit name, replacing any previous
    /// sample with that name.
    pub fn load_as(&mut self, path: &Path, name: &str) -> Result<()> {
        let text = fs::read_to_string(path)?;
        let tokens = tokenize(&text);
        if tokens.is_empty() {
            return Err(StoreError::EmptySample(name.to_string()));
        }
        self.samples.insert(name.to_string(), tokens);
        Ok(())
    }

    /// Insert a sample directly.
    pub fn add<I, S>(&mut self, name: &str, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = tokens.into_iter().map(Into::into).collect();
        self.samples.insert(name.to_string(), tokens);
    }

    /// Borrow a sample by name.
    pub fn read(&self, name: &str) -> Result<&[String]> {
        self.samples
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| StoreError::SampleNotFound(name.to_string()))
    }

    /// Borrow the anonymous default sample.
    pub fn read_default(&self) -> Result<&[String]> {
        self.read(DEFAULT_SAMPLE)
    }

    /// Remove a sample, returning it if it was present.
    pub fn unload(&mut self, name: &str) -> Option<Vec<String>> {
        self.samples.remove(name)
    }

    /// Names of all loaded samples, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.samples.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of loaded samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples are loaded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Split raw text into symbol tokens on whitespace and commas.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
