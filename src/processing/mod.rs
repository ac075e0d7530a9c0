//! Notes pipeline: sentence segmentation, chunking, and per-file orchestration.

pub mod chunking;
pub mod segment;
mod service;
pub mod types;

pub use chunking::{DEFAULT_CHUNK_SIZE, chunk_sentences};
pub use segment::split_sentences;
pub use service::{
    INPUT_EXTENSION, NotesService, OUTPUT_DIR_SUFFIX, OUTPUT_EXTENSION, discover_input_files,
    output_dir_for, output_file_for,
};
pub use types::{Chunk, ChunkingError, FileOutcome, NotesError, RunOutcome};
