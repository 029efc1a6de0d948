//! Error types for every subsystem, composed the way a production crate
//! layers narrow errors into the ones above them with `#[from]`.

use thiserror::Error;

/// Errors raised by a [`crate::codec::PostingCodec`] implementation.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("value {value} exceeds the codec's representable range ({max})")]
    Overflow { value: u64, max: u64 },

    #[error("gap {gap} exceeds 60 bits and cannot be packed into a Simple-8b word")]
    GapTooLarge { gap: u64 },

    #[error("malformed byte stream: {0}")]
    MalformedStream(String),

    #[error("cannot encode an empty postings list")]
    EmptyPostings,
}

/// Errors raised by the index file writer/reader.
#[derive(Debug, Error)]
pub enum IndexIoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error("term_id {new} is not strictly greater than the previously appended term_id {prev}")]
    NonAscendingTermId { prev: u32, new: u32 },

    #[error("dictionary sidecar is corrupt: {0}")]
    CorruptDictionary(String),
}

impl From<bincode::Error> for IndexIoError {
    fn from(e: bincode::Error) -> Self {
        IndexIoError::Serde(e.to_string())
    }
}

/// Errors raised by the external k-way merger.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("index error: {0}")]
    Index(#[from] IndexIoError),

    #[error(
        "reader {reader_index} yielded term_id {new} after {prev}, violating ascending order"
    )]
    NonAscendingWithinReader {
        reader_index: usize,
        prev: u32,
        new: u32,
    },
}

/// Errors raised while parsing or evaluating a Boolean query.
///
/// The common recovered cases — an unknown term, or a stopword appearing in
/// the query — are *not* modeled as errors; they resolve to an empty result
/// per the retrieval contract. This enum only covers malformed query syntax
/// and I/O failures surfaced while reading the final index.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unbalanced parentheses in query")]
    UnbalancedParens,

    #[error("unexpected token {0:?} in query")]
    UnexpectedToken(String),

    #[error("empty query")]
    EmptyQuery,

    #[error("operator {0:?} is missing an operand")]
    MissingOperand(String),

    #[error("index error: {0}")]
    Index(#[from] IndexIoError),
}
