use thiserror::Error;

/// Errors raised at the boundaries of the tagger: reading corpora, loading
/// models, setting parameters and feeding the decoder.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The model data could not be decoded or is internally inconsistent.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// A corpus line is not a `TAG<TAB>observation` pair.
    #[error("invalid line {line}: {content:?}")]
    InvalidLine { line: usize, content: String },

    /// A corpus uses one of the sentinel tags.
    #[error("reserved tag {tag:?} at line {line}")]
    ReservedTag { line: usize, tag: String },

    /// A tag path handed to the scorer contains a sentinel.
    #[error("sentinel tag {tag:?} at position {position} of tag path")]
    SentinelInPath { position: usize, tag: String },

    #[error("observation sequence is empty")]
    EmptySequence,

    #[error("model has no tags")]
    EmptyModel,

    #[error("length mismatch: {observations} observations, {tags} tags")]
    LengthMismatch { observations: usize, tags: usize },

    #[error("invalid parameter: {name}={value}")]
    InvalidParam { name: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
