use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing how much work a run has done.
#[derive(Default)]
pub struct NotesMetrics {
    files_processed: AtomicU64,
    sentences_segmented: AtomicU64,
    chunks_annotated: AtomicU64,
}

impl NotesMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the sentences found in a file before it is annotated.
    pub fn record_sentences(&self, count: u64) {
        self.sentences_segmented.fetch_add(count, Ordering::Relaxed);
    }

    /// Record one chunk whose annotations were written out.
    pub fn record_chunk(&self) {
        self.chunks_annotated.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a file whose notes were fully written.
    pub fn record_file(&self) {
        self.files_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            files_processed: self.files_processed.load(Ordering::Relaxed),
            sentences_segmented: self.sentences_segmented.load(Ordering::Relaxed),
            chunks_annotated: self.chunks_annotated.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of run counters used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of input files whose notes were completed.
    pub files_processed: u64,
    /// Total sentences found across all files read so far.
    pub sentences_segmented: u64,
    /// Total annotation requests whose results were written.
    pub chunks_annotated: u64,
}

impl MetricsSnapshot {
    /// Render the counters as a compact JSON object for log output.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
