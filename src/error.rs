// src/error.rs
use std::{io, path::PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No store file yet. Callers treat this as an empty store.
    #[error("no link store at {}", .0.display())]
    StoreMissing(PathBuf),

    #[error("link store {} is unreadable: {reason}", .path.display())]
    StoreCorrupt { path: PathBuf, reason: String },

    /// One post had no usable click-target link; only that post is dropped.
    #[error("post #{index} has no extractable link")]
    NoLinkFound { index: usize },

    #[error("delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("unknown carrier '{0}' (expected verizon, sprint, att or tmobile)")]
    UnknownCarrier(String),

    #[error("bad address: {0}")]
    Address(String),

    /// A CSS selector or regex that failed to compile.
    #[error("bad pattern: {0}")]
    Pattern(String),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::StoreCorrupt { path: path.into(), reason: reason.into() }
    }
}
