// file: src/pipeline/driver.rs
// description: sequences fetch, per-thread conversion, and aggregation
// reference: orchestrates the strictly sequential harvesting workflow

use crate::config::Config;
use crate::error::Result;
use crate::exporter::{ResultTable, XlsxExporter};
use crate::gemini::GeminiClient;
use crate::models::QaPair;
use crate::pipeline::progress::{ProgressTracker, RunStats};
use crate::reddit::RedditClient;
use crate::utils::OperationTimer;
use chrono::Utc;
use tracing::{error, info, warn};

pub struct RunOutcome {
    /// Present only when at least one thread produced pairs.
    pub table: Option<ResultTable>,
    /// CSV encoding of the same table snapshot.
    pub csv_bytes: Option<Vec<u8>>,
    /// False when the spreadsheet could not be written; the in-memory
    /// table and CSV stream are still populated in that case.
    pub xlsx_written: bool,
    pub warnings: Vec<String>,
    pub stats: RunStats,
}

impl RunOutcome {
    fn empty(stats: RunStats, warnings: Vec<String>) -> Self {
        Self {
            table: None,
            csv_bytes: None,
            xlsx_written: false,
            warnings,
            stats,
        }
    }
}

/// Accumulates per-thread conversion outcomes into one flat, order-preserving
/// collection. A thread-scoped failure becomes a warning; anything else is
/// passed through as terminal.
#[derive(Debug, Default)]
pub struct QaAccumulator {
    pairs: Vec<QaPair>,
    warnings: Vec<String>,
}

impl QaAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of pairs added for this thread, or `None` if the
    /// thread was skipped with a warning.
    pub fn record(
        &mut self,
        thread_index: usize,
        title: &str,
        outcome: Result<Vec<QaPair>>,
    ) -> Result<Option<usize>> {
        match outcome {
            Ok(thread_pairs) => {
                let added = thread_pairs.len();
                self.pairs.extend(thread_pairs);
                Ok(Some(added))
            }
            Err(e) if e.is_thread_scoped() => {
                let warning = format!(
                    "Skipped thread {} (\"{}\"): {}",
                    thread_index + 1,
                    title,
                    e
                );
                warn!("{}", warning);
                self.warnings.push(warning);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn pairs(&self) -> &[QaPair] {
        &self.pairs
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Vec<QaPair>, Vec<String>) {
        (self.pairs, self.warnings)
    }
}

pub struct PipelineRunner {
    config: Config,
    gemini: GeminiClient,
}

impl PipelineRunner {
    pub fn new(config: Config) -> Self {
        let gemini = GeminiClient::new(config.gemini.api_key.clone(), config.gemini.model.clone());
        Self { config, gemini }
    }

    /// Runs fetch, conversion, and aggregation to completion. Fetch-stage
    /// errors are terminal; per-thread conversion failures are skipped with
    /// a warning; a spreadsheet write failure is reported but leaves the
    /// in-memory table and CSV stream in the outcome.
    pub async fn run(&self) -> Result<RunOutcome> {
        let timer = OperationTimer::new("harvest run");

        let subreddit = self.config.subreddit_name().to_string();
        let reddit = RedditClient::connect(&self.config.reddit).await?;
        let bundles = reddit
            .top_threads(&subreddit, self.config.scrape.post_count)
            .await?;

        if bundles.is_empty() {
            warn!("No posts found in r/{}", subreddit);
            let mut stats = RunStats::new();
            stats.duration_secs = timer.finish().as_secs();
            return Ok(RunOutcome::empty(stats, Vec::new()));
        }

        info!("Converting {} threads to Q&A format", bundles.len());
        timer.checkpoint("fetch complete");

        let progress = ProgressTracker::new(bundles.len());
        let mut accumulator = QaAccumulator::new();

        for (index, bundle) in bundles.iter().enumerate() {
            progress.set_message(format!(
                "Converting thread {}/{}",
                index + 1,
                bundles.len()
            ));

            let outcome = self.gemini.to_qa_pairs(&bundle.render()).await;
            match accumulator.record(index, bundle.title(), outcome)? {
                Some(added) => {
                    progress.inc_transformed();
                    progress.add_pairs(added);
                }
                None => progress.inc_failed(),
            }
        }

        progress.finish();
        let mut stats = progress.get_stats();
        stats.threads_fetched = bundles.len();

        let (pairs, mut warnings) = accumulator.into_parts();

        if pairs.is_empty() {
            warn!("No Q&A records produced; skipping export");
            stats.duration_secs = timer.finish().as_secs();
            return Ok(RunOutcome::empty(stats, warnings));
        }

        let table = ResultTable::from_pairs(pairs);
        let csv_bytes = table.to_csv_bytes()?;

        let exporter = XlsxExporter::new(&self.config.output.xlsx_path);
        let xlsx_written = match exporter.write(&table) {
            Ok(()) => true,
            Err(e) => {
                // Keep the in-memory results; only the file on disk is lost.
                error!("Spreadsheet export failed: {}", e);
                warnings.push(format!("Spreadsheet export failed: {}", e));
                false
            }
        };

        stats.duration_secs = timer.finish_with_count(table.len()).as_secs();
        self.log_final_stats(&stats);

        Ok(RunOutcome {
            table: Some(table),
            csv_bytes: Some(csv_bytes),
            xlsx_written,
            warnings,
            stats,
        })
    }

    fn log_final_stats(&self, stats: &RunStats) {
        info!("=== Harvest Summary ===");
        info!("Threads fetched: {}", stats.threads_fetched);
        info!("Threads converted: {}", stats.threads_transformed);
        info!("Threads failed: {}", stats.threads_failed);
        info!("Q&A pairs produced: {}", stats.pairs_produced);
        info!("Success rate: {:.2}%", stats.success_rate());
        info!("Duration: {} seconds", stats.duration_secs);
        info!("Completed at: {}", Utc::now().to_rfc3339());
        info!("=======================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accumulator_flattens_in_order() {
        let mut acc = QaAccumulator::new();

        acc.record(0, "a", Ok(vec![QaPair::new("Q1", "A1"), QaPair::new("Q2", "A2")]))
            .unwrap();
        acc.record(1, "b", Ok(vec![QaPair::new("Q3", "A3")])).unwrap();

        let questions: Vec<&str> = acc.pairs().iter().map(|p| p.question.as_str()).collect();
        assert_eq!(questions, vec!["Q1", "Q2", "Q3"]);
        assert!(acc.warnings().is_empty());
    }

    #[test]
    fn test_accumulator_skips_malformed_thread() {
        let mut acc = QaAccumulator::new();

        let added = acc
            .record(
                0,
                "good thread",
                Ok(vec![
                    QaPair::new("Q1", "A1"),
                    QaPair::new("Q2", "A2"),
                    QaPair::new("Q3", "A3"),
                ]),
            )
            .unwrap();
        assert_eq!(added, Some(3));

        let skipped = acc
            .record(
                1,
                "bad thread",
                Err(PipelineError::Transform("not a list".to_string())),
            )
            .unwrap();
        assert_eq!(skipped, None);

        assert_eq!(acc.pairs().len(), 3);
        assert_eq!(acc.warnings().len(), 1);
        assert!(acc.warnings()[0].contains("thread 2"));
        assert!(acc.warnings()[0].contains("bad thread"));
    }

    #[test]
    fn test_accumulator_skips_model_outage() {
        let mut acc = QaAccumulator::new();

        let skipped = acc
            .record(
                0,
                "t",
                Err(PipelineError::ModelApi("status 503".to_string())),
            )
            .unwrap();

        assert_eq!(skipped, None);
        assert_eq!(acc.warnings().len(), 1);
    }

    #[test]
    fn test_accumulator_propagates_terminal_errors() {
        let mut acc = QaAccumulator::new();

        let result = acc.record(0, "t", Err(PipelineError::Auth("401".to_string())));
        assert!(result.is_err());
        assert!(acc.warnings().is_empty());
    }

    #[test]
    fn test_accumulator_all_threads_failed() {
        let mut acc = QaAccumulator::new();

        for i in 0..3 {
            acc.record(i, "t", Err(PipelineError::Transform("bad".to_string())))
                .unwrap();
        }

        let (pairs, warnings) = acc.into_parts();
        assert!(pairs.is_empty());
        assert_eq!(warnings.len(), 3);
    }
}
