use std::fmt;

/// Errors surfaced by the lead processing pipeline.
#[derive(Debug)]
pub enum PipelineError {
    /// The raw input could not be split into rows/fields.
    Parse(String),
    /// A required batch constant is missing or unreadable.
    Configuration(String),
    Io(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Parse(msg) => write!(f, "Parse error: {}", msg),
            PipelineError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            PipelineError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}

pub type Result<T> = std::result::Result<T, PipelineError>;
