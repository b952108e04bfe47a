//! Error types for rollup
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, bad config, malformed input, unknown task)
//! - 3: Invalid task graph (cycle in parent links)
//! - 4: Operation failed (I/O, serialization)

use thiserror::Error;

/// Exit codes for the rollup CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const INVALID_GRAPH: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for rollup operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    // Invalid graph (exit code 3)
    #[error("Circular dependency detected: {}", format_cycles(.cycles))]
    CycleDetected { cycles: Vec<Vec<String>> },

    #[error("Infinite loop detected at task {task_id}: {}", .path.join(" -> "))]
    InfiniteLoop { task_id: String, path: Vec<String> },

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::InvalidInput(_)
            | Error::TaskNotFound(_) => exit_codes::USER_ERROR,

            Error::CycleDetected { .. } | Error::InfiniteLoop { .. } => exit_codes::INVALID_GRAPH,

            Error::Io(_) | Error::Json(_) | Error::TomlParse(_) | Error::TomlSerialize(_) => {
                exit_codes::OPERATION_FAILED
            }
        }
    }

    /// Structured details for JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::CycleDetected { cycles } => Some(serde_json::json!({ "cycles": cycles })),
            Error::InfiniteLoop { task_id, path } => Some(serde_json::json!({
                "task_id": task_id,
                "path": path,
            })),
            Error::TaskNotFound(id) => Some(serde_json::json!({ "task_id": id })),
            Error::InvalidConfig(message)
            | Error::InvalidArgument(message)
            | Error::InvalidInput(message) => Some(serde_json::json!({ "message": message })),
            _ => None,
        }
    }
}

/// Renders cycles as `a -> b -> a`, separated by `; `.
pub fn format_cycles(cycles: &[Vec<String>]) -> String {
    cycles
        .iter()
        .map(|cycle| cycle.join(" -> "))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for rollup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
