//! Error types for the route planner

use thiserror::Error;

/// Route planner error type
#[derive(Error, Debug)]
pub enum PlannerError {
    /// The map model could not resolve a coordinate to a node.
    #[error("No routable node near ({x:.4}, {y:.4})")]
    NoClosestNode { x: f32, y: f32 },

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for PlannerError {
    fn from(e: toml::de::Error) -> Self {
        PlannerError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
