//! Error types for configuring and running the pipeline.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{queue} queue capacity must be greater than zero")]
    ZeroCapacity { queue: &'static str },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to spawn {role} thread: {source}")]
    Spawn {
        role: String,
        #[source]
        source: std::io::Error,
    },

    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    #[error("{role} panicked")]
    StagePanicked { role: &'static str },

    #[error("task failed: {0}")]
    TaskFailed(String),
}
