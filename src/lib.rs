// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod gemini;
pub mod models;
pub mod pipeline;
pub mod reddit;
pub mod utils;

pub use config::{Config, GeminiConfig, OutputConfig, RedditConfig, ScrapeConfig};
pub use error::{PipelineError, Result};
pub use exporter::{CSV_FILE_NAME, CSV_MIME_TYPE, ResultTable, XlsxExporter};
pub use gemini::{GeminiClient, parse_qa_list};
pub use models::{QaPair, RankedComment, ThreadBundle};
pub use pipeline::{PipelineRunner, ProgressTracker, QaAccumulator, RunOutcome, RunStats};
pub use reddit::RedditClient;
pub use utils::{OperationTimer, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _pair = QaPair::new("q", "a");
    }
}
