//! Text Chunker
//!
//! Splits request text into model-sized pieces on whitespace boundaries.
//!
//! Every chunk is an exact slice of the input: concatenating the chunks in
//! order reproduces the text byte for byte, and `start_offset` is the
//! character offset of the slice in the original text. Whitespace between
//! two chunks stays with the earlier chunk while it fits the budget; the
//! rest leads the next chunk, and a gap longer than the budget is cut into
//! whitespace-only chunks.
//!
//! ```text
//! "The quick brown fox", max 10
//! chunk 0: "The quick "   start 0
//! chunk 1: "brown fox"    start 10
//! ```
//!
//! No chunk exceeds the budget, except a single word longer than the budget,
//! which becomes a chunk of its own rather than being split.

/// A contiguous slice of the request text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// The chunk text, borrowed from the original input
    pub text: &'a str,
    /// Character offset of `text` within the original input
    pub start_offset: usize,
    /// Zero-based position in the chunk sequence
    pub index: usize,
}

impl<'a> Chunk<'a> {
    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the chunk holds nothing worth sending to a model.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Location of one whitespace-delimited word, in characters.
#[derive(Debug, Clone, Copy)]
struct WordSpan {
    start: usize,
    end: usize,
}

fn word_spans(text: &str) -> Vec<WordSpan> {
    let mut spans = Vec::new();
    let mut current: Option<usize> = None;
    let mut char_pos = 0;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if let Some(start) = current.take() {
                spans.push(WordSpan {
                    start,
                    end: char_pos,
                });
            }
        } else if current.is_none() {
            current = Some(char_pos);
        }
        char_pos += 1;
    }

    if let Some(start) = current {
        spans.push(WordSpan {
            start,
            end: char_pos,
        });
    }

    spans
}

/// Accumulates chunks as character ranges and slices them out of the text.
struct ChunkWriter<'a> {
    text: &'a str,
    /// Byte offset of every character boundary, including the end of text
    boundaries: Vec<usize>,
    chunks: Vec<Chunk<'a>>,
}

impl<'a> ChunkWriter<'a> {
    fn new(text: &'a str) -> Self {
        let boundaries = text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(text.len()))
            .collect();
        Self {
            text,
            boundaries,
            chunks: Vec::new(),
        }
    }

    fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    fn push(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        self.chunks.push(Chunk {
            text: &self.text[self.boundaries[start]..self.boundaries[end]],
            start_offset: start,
            index: self.chunks.len(),
        });
    }
}

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Text that already fits is returned as a single chunk, even when empty.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<Chunk<'_>> {
    if text.chars().count() <= max_chars {
        return vec![Chunk {
            text,
            start_offset: 0,
            index: 0,
        }];
    }

    let mut writer = ChunkWriter::new(text);
    // Whitespace-only pieces must advance even with a zero budget.
    let gap_budget = max_chars.max(1);
    let mut chunk_start = 0;
    let mut last_word_end: Option<usize> = None;

    for word in word_spans(text) {
        while word.end - chunk_start > max_chars {
            let cut = match last_word_end {
                // Close the chunk after its last word, keeping as much of
                // the following gap as the budget allows.
                Some(end) => end.max(word.start.min(chunk_start + max_chars)),
                // Only whitespace so far: shed it until the word fits or
                // starts the chunk.
                None if chunk_start < word.start => {
                    let target = word.start.min(word.end - max_chars);
                    target.min(chunk_start + gap_budget)
                }
                // An oversized word stands alone.
                None => break,
            };
            writer.push(chunk_start, cut);
            chunk_start = cut;
            last_word_end = None;
        }
        last_word_end = Some(word.end);
    }

    let total = writer.char_len();
    while total - chunk_start > max_chars {
        let cut = match last_word_end {
            Some(end) => end.max(chunk_start + max_chars),
            None => chunk_start + gap_budget,
        };
        if cut >= total {
            break;
        }
        writer.push(chunk_start, cut);
        chunk_start = cut;
        last_word_end = None;
    }
    writer.push(chunk_start, total);

    writer.chunks
}
