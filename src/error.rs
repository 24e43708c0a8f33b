// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Reddit authentication failed: {0}")]
    Auth(String),

    #[error("Reddit fetch failed: {0}")]
    Fetch(String),

    #[error("Q&A conversion failed: {0}")]
    Transform(String),

    #[error("Gemini API error: {0}")]
    ModelApi(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl PipelineError {
    /// Per-thread failures the pipeline skips over; everything else is terminal.
    pub fn is_thread_scoped(&self) -> bool {
        matches!(self, Self::Transform(_) | Self::ModelApi(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_scoped_errors() {
        assert!(PipelineError::Transform("bad json".to_string()).is_thread_scoped());
        assert!(PipelineError::ModelApi("503".to_string()).is_thread_scoped());
        assert!(!PipelineError::Auth("401".to_string()).is_thread_scoped());
        assert!(!PipelineError::Fetch("timeout".to_string()).is_thread_scoped());
    }

    #[test]
    fn test_auth_distinct_from_fetch() {
        let auth = PipelineError::Auth("invalid credentials".to_string());
        let fetch = PipelineError::Fetch("unknown subreddit".to_string());
        assert!(auth.to_string().contains("authentication"));
        assert!(!fetch.to_string().contains("authentication"));
    }
}
