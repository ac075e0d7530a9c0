//! Grouping of sentences into fixed-size annotation requests.
//!
//! Chunks are contiguous and non-overlapping. Every chunk holds exactly `chunk_size` sentences
//! except the last one, which takes whatever remains.

use super::types::{Chunk, ChunkingError};

/// Sentences per annotation request when no override is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 3;

/// Group `sentences` into ordered chunks of at most `chunk_size` sentences.
///
/// Returns an empty vector for empty input and fails fast when `chunk_size` is zero.
pub fn chunk_sentences(
    sentences: &[String],
    chunk_size: usize,
) -> Result<Vec<Chunk>, ChunkingError> {
    if chunk_size == 0 {
        return Err(ChunkingError::InvalidChunkSize);
    }

    Ok(sentences
        .chunks(chunk_size)
        .enumerate()
        .map(|(index, window)| Chunk {
            first_sentence: index * chunk_size,
            sentences: window.to_vec(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(count: usize) -> Vec<String> {
        (1..=count).map(|n| format!("Phrase {n}.")).collect()
    }

    #[test]
    fn rejects_zero_chunk_size() {
        let error = chunk_sentences(&sentences(2), 0).expect_err("zero chunk size");
        assert!(matches!(error, ChunkingError::InvalidChunkSize));
    }

    #[test]
    fn empty_input_produces_no_chunks() {
        assert!(chunk_sentences(&[], DEFAULT_CHUNK_SIZE).expect("chunks").is_empty());
    }

    #[test]
    fn last_chunk_takes_the_remainder() {
        let chunks = chunk_sentences(&sentences(7), 3).expect("chunks");
        let sizes: Vec<usize> = chunks.iter().map(|chunk| chunk.sentences.len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        assert_eq!(chunks[2].sentences, vec!["Phrase 7."]);
    }

    #[test]
    fn evenly_divisible_input_has_full_chunks() {
        let chunks = chunk_sentences(&sentences(6), 3).expect("chunks");
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|chunk| chunk.sentences.len() == 3));
    }

    #[test]
    fn chunks_record_their_sentence_range() {
        let chunks = chunk_sentences(&sentences(5), 2).expect("chunks");
        let ranges: Vec<(usize, usize)> = chunks
            .iter()
            .map(|chunk| (chunk.first_sentence_number(), chunk.last_sentence_number()))
            .collect();
        assert_eq!(ranges, vec![(1, 2), (3, 4), (5, 5)]);
    }

    #[test]
    fn short_input_fits_in_one_chunk() {
        let input = vec![
            "Bonjour.".to_string(),
            "Comment ça va?".to_string(),
            "Je vais bien!".to_string(),
        ];
        let chunks = chunk_sentences(&input, DEFAULT_CHUNK_SIZE).expect("chunks");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].sentences, input);
    }
}
