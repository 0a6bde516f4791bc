use std::path::PathBuf;
use thiserror::Error;

pub mod chunk;
pub mod classifier;
pub mod column_stats;
pub mod orchestrator;
pub mod reducer;
pub mod tokenizer;

/// Error type used across the crate
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Empty file: {} has no header line", .0.display())]
    EmptyFile(PathBuf),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Configuration error: {0}")]
    Config(String),
}
