use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClusteringError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record in a delimited input file could not be parsed. `line` is 1-based.
    #[error("Format error at line {line}: {reason}")]
    Format { line: usize, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Corrupt model: {0}")]
    CorruptModel(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ClusteringError>;
