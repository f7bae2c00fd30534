//! Error types for the benchmark driver.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    /// Something the run needs is missing from the environment
    /// (solver executable, input directory, instances).
    #[error("{message}\n{hint}")]
    Environment { message: String, hint: String },

    /// The solver exited with a non-zero status.
    #[error("Command failed: {command} ({status})\nstdout:\n{stdout}\nstderr:\n{stderr}")]
    Execution {
        command: String,
        status: String,
        stdout: String,
        stderr: String,
    },

    /// The solver exited cleanly but printed no usable RESULT line.
    #[error("No RESULT line found for {instance} ({strategy}).")]
    MissingResult { instance: String, strategy: String },

    #[error("Failed to launch {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BenchError {
    pub fn environment(message: impl Into<String>, hint: impl Into<String>) -> Self {
        BenchError::Environment {
            message: message.into(),
            hint: hint.into(),
        }
    }
}

pub type Result<T, E = BenchError> = std::result::Result<T, E>;
