//! On-disk index file format: an append-only posting stream plus an
//! in-memory dictionary mapping `term_id -> (offset, length, count)`.

mod reader;
mod writer;

pub use reader::IndexReader;
pub use writer::IndexWriter;

/// One dictionary entry. `term_id` is strictly ascending across a file;
/// `offset`/`length` locate the encoded postings within the posting stream,
/// `count` is the number of doc_ids the decoder will produce.
#[derive(Debug, Clone, Copy)]
pub struct DictEntry {
    pub term_id: u32,
    pub offset: u64,
    pub length: u64,
    pub count: u32,
}

/// Format version written into every dictionary sidecar header. Bumped
/// whenever the on-disk layout changes so a reader can detect an
/// incompatible file instead of silently misparsing it.
pub const DICTIONARY_FORMAT_VERSION: u8 = 1;
