//! Fixed-width character chunking of extracted document text.
//!
//! Splitting is non-overlapping and boundary-unaware: retrieval quality is
//! traded for simplicity and ingest latency. Segments that are blank after
//! trimming are dropped before ids are assigned, so no empty chunk ever
//! reaches the index.

use uuid::Uuid;

/// The unit of retrieval: a bounded segment of a document's text plus the
/// filename it came from.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub id: Uuid,
    pub text: String,
    pub source: String,
}

/// Lazily split `text` into consecutive segments of at most `size`
/// characters, in left-to-right order. The final segment may be shorter.
///
/// Concatenating the yielded segments reconstructs `text` exactly.
pub fn chunk_text(text: &str, size: usize) -> impl Iterator<Item = &str> {
    let size = size.max(1);
    let mut start = 0usize;
    std::iter::from_fn(move || {
        if start >= text.len() {
            return None;
        }
        let end = text[start..]
            .char_indices()
            .nth(size)
            .map(|(i, _)| start + i)
            .unwrap_or(text.len());
        let segment = &text[start..end];
        start = end;
        Some(segment)
    })
}

/// Chunk `text` and promote each surviving segment to a [`Chunk`] with a
/// fresh unique id, tagged with the source filename.
pub fn build_chunks(text: &str, size: usize, source: &str) -> Vec<Chunk> {
    chunk_text(text, size)
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| Chunk {
            id: Uuid::new_v4(),
            text: segment.to_string(),
            source: source.to_string(),
        })
        .collect()
}
