//! Disk-based inverted index engine.
//!
//! Indexes a corpus with Blocked Sort-Based Indexing (BSBI): the corpus is
//! partitioned into blocks, each block is inverted independently in memory,
//! and the resulting intermediate indices are merged on disk into one final
//! posting file. Posting lists are stored behind a pluggable codec
//! ([`codec::Raw32`], [`codec::VByteGap`], [`codec::Simple8bGap`]) and
//! retrieved through Boolean queries (`AND`/`OR`/`DIFF`).

pub mod bsbi;
pub mod codec;
pub mod document;
pub mod error;
pub mod idmap;
pub mod index;
pub mod merge;
pub mod query;
pub mod setops;
pub mod tokenizer;

pub use bsbi::{BsbiIndex, IndexingStats};
pub use codec::CodecKind;
pub use document::Document;
pub use error::{CodecError, IndexIoError, MergeError, QueryError};
pub use idmap::IdMap;
pub use query::evaluate_query;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the final, merged index relative to an index output directory.
pub const MAIN_INDEX_NAME: &str = "main_index";
