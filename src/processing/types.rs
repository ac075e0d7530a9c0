//! Core data types and error definitions for the notes pipeline.

use crate::{annotation::AnnotationClientError, metrics::MetricsSnapshot};
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while grouping sentences into chunks.
#[derive(Debug, Error)]
pub enum ChunkingError {
    /// A chunk must hold at least one sentence.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,
}

/// Errors emitted while turning a directory of text files into notes.
#[derive(Debug, Error)]
pub enum NotesError {
    /// The input path does not exist or is not a directory.
    #[error("The directory '{}' does not exist.", .0.display())]
    InputDirectoryMissing(PathBuf),
    /// Reading an input file or writing an output file failed.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// Chunking step rejected its parameters.
    #[error("Failed to chunk sentences: {0}")]
    Chunking(#[from] ChunkingError),
    /// Annotation provider failed for one of the chunks.
    #[error("Failed to annotate chunk: {0}")]
    Annotation(#[from] AnnotationClientError),
}

impl NotesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Ordered window of consecutive sentences sent in one annotation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Zero-based position of the first sentence within its file.
    pub first_sentence: usize,
    /// Sentences in file order.
    pub sentences: Vec<String>,
}

impl Chunk {
    /// One-based number of the first sentence, as shown in progress output.
    pub fn first_sentence_number(&self) -> usize {
        self.first_sentence + 1
    }

    /// One-based number of the last sentence, inclusive.
    pub fn last_sentence_number(&self) -> usize {
        self.first_sentence + self.sentences.len()
    }
}

/// Summary of a single processed input file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    /// Text file that was read.
    pub input: PathBuf,
    /// Markdown file that was written.
    pub output: PathBuf,
    /// Number of sentences found in the input.
    pub sentence_count: usize,
    /// Number of annotation requests issued.
    pub chunk_count: usize,
}

/// Summary of a completed run produced by [`crate::processing::NotesService::run`].
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Directory that received the notes.
    pub output_dir: PathBuf,
    /// Per-file results in processing order.
    pub files: Vec<FileOutcome>,
    /// Counters accumulated by the service.
    pub metrics: MetricsSnapshot,
}
