// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for pipeline execution
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub threads_fetched: usize,
    pub threads_transformed: usize,
    pub threads_failed: usize,
    pub pairs_produced: usize,
    pub duration_secs: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.threads_transformed + self.threads_failed;
        if total == 0 {
            return 0.0;
        }
        (self.threads_transformed as f64 / total as f64) * 100.0
    }

    pub fn pairs_per_thread(&self) -> f64 {
        if self.threads_transformed == 0 {
            return 0.0;
        }
        self.pairs_produced as f64 / self.threads_transformed as f64
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    threads_transformed: AtomicUsize,
    threads_failed: AtomicUsize,
    pairs_produced: AtomicUsize,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_threads: usize) -> Self {
        Self::with_color(total_threads, true)
    }

    pub fn with_color(total_threads: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_threads as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            threads_transformed: AtomicUsize::new(0),
            threads_failed: AtomicUsize::new(0),
            pairs_produced: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn inc_transformed(&self) {
        self.threads_transformed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_failed(&self) {
        self.threads_failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn add_pairs(&self, count: usize) {
        self.pairs_produced.fetch_add(count, Ordering::SeqCst);
    }

    pub fn set_message(&self, message: String) {
        self.detail_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Conversion complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> RunStats {
        let duration = self.start_time.elapsed().as_secs();

        RunStats {
            threads_fetched: 0,
            threads_transformed: self.threads_transformed.load(Ordering::SeqCst),
            threads_failed: self.threads_failed.load(Ordering::SeqCst),
            pairs_produced: self.pairs_produced.load(Ordering::SeqCst),
            duration_secs: duration,
        }
    }

    fn update_detail_bar(&self) {
        let converted = self.threads_transformed.load(Ordering::SeqCst);
        let failed = self.threads_failed.load(Ordering::SeqCst);
        let pairs = self.pairs_produced.load(Ordering::SeqCst);

        let message = format!(
            "Converted: {} | Failed: {} | Q&A pairs: {}",
            converted, failed, pairs
        );

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_stats_calculations() {
        let mut stats = RunStats::new();
        stats.threads_transformed = 9;
        stats.threads_failed = 1;
        stats.pairs_produced = 36;

        assert!((stats.success_rate() - 90.0).abs() < 0.01);
        assert!((stats.pairs_per_thread() - 4.0).abs() < 0.01);
    }

    #[test]
    fn test_run_stats_zero_threads() {
        let stats = RunStats::new();
        assert_eq!(stats.success_rate(), 0.0);
        assert_eq!(stats.pairs_per_thread(), 0.0);
    }

    #[test]
    fn test_progress_tracker_counters() {
        let tracker = ProgressTracker::with_color(10, false);

        tracker.inc_transformed();
        tracker.inc_failed();
        tracker.add_pairs(5);

        let stats = tracker.get_stats();
        assert_eq!(stats.threads_transformed, 1);
        assert_eq!(stats.threads_failed, 1);
        assert_eq!(stats.pairs_produced, 5);
    }
}
