//! Error-tolerant batch processing around row ingestion.
//!
//! A failing row is normal data quality: it is recorded and the loop moves
//! on. Exceeding the memory threshold is an operational emergency: the
//! whole batch aborts and the status flips to `Error`. That asymmetry is
//! intentional.

use serde::Serialize;

use sellerkit_model::{RowRecord, Value};

/// Default memory threshold: 100 MB.
pub const DEFAULT_MEMORY_THRESHOLD_BYTES: u64 = 100 * 1024 * 1024;

/// How often (in rows) the memory estimate is sampled.
const MEMORY_SAMPLE_INTERVAL: usize = 100;

/// Per-row validity check. The error string becomes the recorded message.
pub type RowCheck = Box<dyn Fn(&RowRecord) -> Result<(), String> + Send + Sync>;

/// Batch processor configuration.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Informational batch size; the loop itself processes whatever it is
    /// handed in one call. Defaults to 1000.
    pub batch_size: usize,

    /// Memory budget in bytes; exceeding it aborts the batch.
    pub memory_threshold: u64,

    /// Reserved for a collaborator's I/O retry policy. Defaults to 3.
    pub retry_attempts: u32,

    /// Reserved for a collaborator's result cache. Defaults to true.
    pub cache_results: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            memory_threshold: DEFAULT_MEMORY_THRESHOLD_BYTES,
            retry_attempts: 3,
            cache_results: true,
        }
    }
}

impl BatchOptions {
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    #[must_use]
    pub fn with_memory_threshold(mut self, bytes: u64) -> Self {
        self.memory_threshold = bytes;
        self
    }

    #[must_use]
    pub fn with_retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_cache_results(mut self, enabled: bool) -> Self {
        self.cache_results = enabled;
        self
    }
}

/// Batch status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    #[default]
    Processing,
    Completed,
    Error,
}

/// Progress snapshot, readable at any time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingProgress {
    pub processed_rows: usize,
    pub total_rows: usize,
    /// Increments once per `process_batch` call.
    pub current_batch: usize,
    pub error_count: usize,
    /// Best-effort estimate of bytes held by the current batch. Reset at
    /// the start of every `process_batch` call; nothing but errors is
    /// retained between calls.
    pub memory_usage: u64,
    pub status: BatchStatus,
}

/// One recorded row failure.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingError {
    /// 0-based index of the row within the batch.
    pub row: usize,
    pub error: String,
    /// The original row, kept for display/debugging.
    pub data: Option<RowRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("memory threshold exceeded: {usage} bytes used, {threshold} allowed")]
    MemoryLimit { usage: u64, threshold: u64 },
}

/// Row-by-row processor that records failures without aborting and tracks
/// progress counters across calls.
pub struct BatchProcessor {
    options: BatchOptions,
    check: RowCheck,
    progress: ProcessingProgress,
    errors: Vec<ProcessingError>,
}

impl BatchProcessor {
    /// Processor with an always-valid row check.
    pub fn new(options: BatchOptions) -> Self {
        Self::with_row_check(options, Box::new(|_| Ok(())))
    }

    pub fn with_row_check(options: BatchOptions, check: RowCheck) -> Self {
        Self {
            options,
            check,
            progress: ProcessingProgress::default(),
            errors: Vec::new(),
        }
    }

    /// Process one batch of rows.
    ///
    /// Individual row failures are recorded and the loop continues; only a
    /// breached memory threshold aborts, leaving the status at `Error`.
    pub fn process_batch(
        &mut self,
        rows: &[RowRecord],
    ) -> Result<ProcessingProgress, BatchError> {
        self.progress.status = BatchStatus::Processing;
        self.progress.total_rows = rows.len();
        self.progress.current_batch += 1;
        self.progress.memory_usage = 0;

        for (index, row) in rows.iter().enumerate() {
            match (self.check)(row) {
                Ok(()) => self.progress.processed_rows += 1,
                Err(message) => {
                    self.progress.error_count += 1;
                    self.errors.push(ProcessingError {
                        row: index,
                        error: message,
                        data: Some(row.clone()),
                    });
                }
            }
            self.progress.memory_usage += approximate_row_bytes(row);

            if (index + 1) % MEMORY_SAMPLE_INTERVAL == 0
                && self.progress.memory_usage > self.options.memory_threshold
            {
                self.progress.status = BatchStatus::Error;
                tracing::warn!(
                    usage = self.progress.memory_usage,
                    threshold = self.options.memory_threshold,
                    "batch aborted on memory threshold"
                );
                return Err(BatchError::MemoryLimit {
                    usage: self.progress.memory_usage,
                    threshold: self.options.memory_threshold,
                });
            }
        }

        self.progress.status = BatchStatus::Completed;
        Ok(self.progress.clone())
    }

    pub fn progress(&self) -> &ProcessingProgress {
        &self.progress
    }

    pub fn errors(&self) -> &[ProcessingError] {
        &self.errors
    }

    /// Clear counters and recorded errors; configuration is untouched.
    pub fn reset(&mut self) {
        self.progress = ProcessingProgress::default();
        self.errors.clear();
    }
}

/// Rough in-memory footprint of a row: key and value text plus map entry
/// overhead. Good enough for a budget check, nothing more.
fn approximate_row_bytes(row: &RowRecord) -> u64 {
    let mut bytes = 0usize;
    for (key, value) in row {
        bytes += key.len() + 48;
        bytes += match value {
            Value::Str(s) => s.len(),
            _ => 16,
        };
    }
    bytes as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(sku: &str, qty: &str) -> RowRecord {
        let mut row = RowRecord::new();
        row.insert("SKU".to_string(), Value::from(sku));
        row.insert("Qty".to_string(), Value::from(qty));
        row
    }

    fn qty_check() -> RowCheck {
        Box::new(|row| match row.get("Qty").and_then(Value::as_number) {
            Some(n) if n >= 0.0 => Ok(()),
            _ => Err("quantity must be a non-negative number".to_string()),
        })
    }

    #[test]
    fn tolerates_individual_row_failures() {
        let rows: Vec<RowRecord> = (0..10)
            .map(|i| {
                let qty = if i == 2 || i == 5 { "bad" } else { "1" };
                make_row(&format!("SKU-{i}"), qty)
            })
            .collect();

        let mut processor = BatchProcessor::with_row_check(BatchOptions::default(), qty_check());
        let progress = processor.process_batch(&rows).unwrap();

        assert_eq!(progress.status, BatchStatus::Completed);
        assert_eq!(progress.processed_rows, 8);
        assert_eq!(progress.error_count, 2);
        assert_eq!(progress.total_rows, 10);

        let failed: Vec<usize> = processor.errors().iter().map(|e| e.row).collect();
        assert_eq!(failed, vec![2, 5]);
        assert!(processor.errors()[0].data.is_some());
    }

    #[test]
    fn memory_threshold_aborts_the_batch() {
        let rows: Vec<RowRecord> = (0..500)
            .map(|i| make_row(&format!("SKU-{i}"), "1"))
            .collect();

        let options = BatchOptions::default().with_memory_threshold(1024);
        let mut processor = BatchProcessor::new(options);
        let error = processor.process_batch(&rows).unwrap_err();

        assert!(matches!(error, BatchError::MemoryLimit { .. }));
        assert_eq!(processor.progress().status, BatchStatus::Error);
    }

    #[test]
    fn memory_estimate_covers_only_the_current_batch() {
        let rows: Vec<RowRecord> = (0..100)
            .map(|i| make_row(&format!("SKU-{i}"), "1"))
            .collect();

        // Each batch sits well under the threshold; the sum over all five
        // calls would not. Only the current batch may count.
        let options = BatchOptions::default().with_memory_threshold(20 * 1024);
        let mut processor = BatchProcessor::new(options);

        for _ in 0..5 {
            let progress = processor.process_batch(&rows).unwrap();
            assert_eq!(progress.status, BatchStatus::Completed);
            assert!(progress.memory_usage <= 20 * 1024);
        }
        assert_eq!(processor.progress().current_batch, 5);
        assert_eq!(processor.progress().processed_rows, 500);
    }

    #[test]
    fn current_batch_increments_per_call() {
        let rows = vec![make_row("SKU-1", "1")];
        let mut processor = BatchProcessor::new(BatchOptions::default());
        processor.process_batch(&rows).unwrap();
        processor.process_batch(&rows).unwrap();
        assert_eq!(processor.progress().current_batch, 2);
        assert_eq!(processor.progress().processed_rows, 2);
    }

    #[test]
    fn reset_clears_state_but_not_options() {
        let rows = vec![make_row("SKU-1", "bad")];
        let mut processor = BatchProcessor::with_row_check(
            BatchOptions::default().with_batch_size(50),
            qty_check(),
        );
        processor.process_batch(&rows).unwrap();
        assert_eq!(processor.errors().len(), 1);

        processor.reset();
        assert_eq!(processor.progress().processed_rows, 0);
        assert_eq!(processor.progress().current_batch, 0);
        assert_eq!(processor.progress().status, BatchStatus::Processing);
        assert!(processor.errors().is_empty());
        assert_eq!(processor.options.batch_size, 50);
    }

    #[test]
    fn empty_batch_completes() {
        let mut processor = BatchProcessor::new(BatchOptions::default());
        let progress = processor.process_batch(&[]).unwrap();
        assert_eq!(progress.status, BatchStatus::Completed);
        assert_eq!(progress.total_rows, 0);
    }
}
