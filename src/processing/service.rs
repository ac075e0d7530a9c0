//! Notes service coordinating file discovery, segmentation, annotation, and output.

use crate::{
    annotation::{AnnotationClient, AnnotationClientError, OpenAiAnnotationClient},
    config::Config,
    metrics::{MetricsSnapshot, NotesMetrics},
    processing::{
        chunking::chunk_sentences,
        segment::split_sentences,
        types::{ChunkingError, FileOutcome, NotesError, RunOutcome},
    },
};
use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};
use tokio::{fs, io::AsyncWriteExt};
use walkdir::WalkDir;

/// Suffix appended to the input directory name to form the output directory.
pub const OUTPUT_DIR_SUFFIX: &str = "-grammar-notes";
/// Extension of the text files picked up from the input directory.
pub const INPUT_EXTENSION: &str = "txt";
/// Extension given to generated notes.
pub const OUTPUT_EXTENSION: &str = "md";

/// Drives the read → split → group → annotate → write pipeline for a directory.
///
/// Files are handled one after another and every chunk waits for its annotation before the next
/// one is sent. The first failure aborts the run; notes already written stay on disk.
pub struct NotesService {
    client: Box<dyn AnnotationClient>,
    chunk_size: usize,
    metrics: NotesMetrics,
}

impl NotesService {
    /// Build a service around an annotation client and a chunk size.
    pub fn new(client: Box<dyn AnnotationClient>, chunk_size: usize) -> Self {
        Self {
            client,
            chunk_size,
            metrics: NotesMetrics::new(),
        }
    }

    /// Build a service backed by the OpenAI-compatible client described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, AnnotationClientError> {
        let client = OpenAiAnnotationClient::from_config(config)?;
        Ok(Self::new(Box::new(client), config.chunk_size))
    }

    /// Retrieve the current metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Write notes for every text file in `input_dir` into its sibling notes directory.
    ///
    /// Nothing is created when `input_dir` is missing.
    pub async fn run(&self, input_dir: &Path) -> Result<RunOutcome, NotesError> {
        if !input_dir.is_dir() {
            return Err(NotesError::InputDirectoryMissing(input_dir.to_path_buf()));
        }
        if self.chunk_size == 0 {
            return Err(ChunkingError::InvalidChunkSize.into());
        }

        let output_dir = output_dir_for(input_dir)?;
        fs::create_dir_all(&output_dir)
            .await
            .map_err(|source| NotesError::io(&output_dir, source))?;

        let inputs = discover_input_files(input_dir)?;
        tracing::debug!(
            input = %input_dir.display(),
            output = %output_dir.display(),
            files = inputs.len(),
            chunk_size = self.chunk_size,
            "Discovered input files"
        );

        let mut files = Vec::with_capacity(inputs.len());
        for input in &inputs {
            files.push(self.process_file(input, &output_dir).await?);
        }

        Ok(RunOutcome {
            output_dir,
            files,
            metrics: self.metrics.snapshot(),
        })
    }

    /// Annotate a single text file into `output_dir`, replacing any previous notes for it.
    pub async fn process_file(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<FileOutcome, NotesError> {
        let file_name = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());

        let text = fs::read_to_string(input)
            .await
            .map_err(|source| NotesError::io(input, source))?;
        let sentences = split_sentences(&text);
        let chunks = chunk_sentences(&sentences, self.chunk_size)?;
        self.metrics.record_sentences(sentences.len() as u64);

        let output = output_file_for(input, output_dir);
        let mut writer = fs::File::create(&output)
            .await
            .map_err(|source| NotesError::io(&output, source))?;

        for chunk in &chunks {
            tracing::info!(
                "Processing file: {file_name}, sentences {}–{}",
                chunk.first_sentence_number(),
                chunk.last_sentence_number()
            );
            let notes = self.client.annotate(&chunk.sentences).await?;
            writer
                .write_all(format!("{notes}\n\n").as_bytes())
                .await
                .map_err(|source| NotesError::io(&output, source))?;
            self.metrics.record_chunk();
        }
        writer
            .flush()
            .await
            .map_err(|source| NotesError::io(&output, source))?;

        self.metrics.record_file();
        tracing::info!("Finished processing: {file_name} -> {}", output.display());

        Ok(FileOutcome {
            input: input.to_path_buf(),
            output,
            sentence_count: sentences.len(),
            chunk_count: chunks.len(),
        })
    }
}

/// Sibling directory that receives the notes for `input_dir`.
///
/// Trailing separators are ignored, so `corpus/` maps to `corpus-grammar-notes`. Paths without a
/// final name component (such as `.`) are canonicalized first.
pub fn output_dir_for(input_dir: &Path) -> Result<PathBuf, NotesError> {
    let resolved = match input_dir.file_name() {
        Some(_) => input_dir.to_path_buf(),
        None => input_dir
            .canonicalize()
            .map_err(|source| NotesError::io(input_dir, source))?,
    };

    let Some(name) = resolved.file_name() else {
        return Err(NotesError::io(
            input_dir,
            io::Error::new(io::ErrorKind::InvalidInput, "directory has no name"),
        ));
    };

    let mut output_name = name.to_os_string();
    output_name.push(OUTPUT_DIR_SUFFIX);
    Ok(resolved.with_file_name(output_name))
}

/// Notes file for `input_file`: same stem, markdown extension, placed in `output_dir`.
pub fn output_file_for(input_file: &Path, output_dir: &Path) -> PathBuf {
    let mut name = OsString::from(input_file.file_stem().unwrap_or_default());
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    output_dir.join(name)
}

/// Text files directly inside `input_dir`, sorted by file name.
///
/// Hidden files (names starting with `.`) are skipped.
pub fn discover_input_files(input_dir: &Path) -> Result<Vec<PathBuf>, NotesError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|error| NotesError::io(input_dir, error.into()))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == INPUT_EXTENSION) {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}
