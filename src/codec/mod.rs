//! Posting-list codec registry.
//!
//! Every codec transforms a strictly ascending sequence of non-negative
//! `u32` document ids to/from a byte buffer. The writer/reader hold one
//! [`CodecKind`] for their lifetime and persist it in the dictionary sidecar
//! header, the same "tagged variant selects a built-in implementation"
//! dispatch shape as a UUID-keyed codec registry.

mod raw32;
mod simple8b;
mod vbyte;

pub use raw32::Raw32;
pub use simple8b::Simple8bGap;
pub use vbyte::VByteGap;

use crate::error::CodecError;

/// Contract every posting-list codec implements.
///
/// `decode(encode(xs)) == xs` for every strictly ascending, non-empty `xs`
/// within the codec's representable range. Callers must not pass an empty
/// slice; codecs are not required to support it.
pub trait PostingCodec {
    fn encode(&self, postings: &[u32]) -> Result<Vec<u8>, CodecError>;
    fn decode(&self, bytes: &[u8]) -> Result<Vec<u32>, CodecError>;
}

/// Discriminant persisted in the dictionary sidecar header so a reader
/// reopening an index does not need to be told which codec was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    Raw32,
    VByteGap,
    Simple8bGap,
}

impl CodecKind {
    pub fn discriminant(self) -> u8 {
        match self {
            CodecKind::Raw32 => 0,
            CodecKind::VByteGap => 1,
            CodecKind::Simple8bGap => 2,
        }
    }

    pub fn from_discriminant(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(CodecKind::Raw32),
            1 => Some(CodecKind::VByteGap),
            2 => Some(CodecKind::Simple8bGap),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CodecKind::Raw32 => "raw32",
            CodecKind::VByteGap => "vbyte",
            CodecKind::Simple8bGap => "simple8b",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "raw32" => Some(CodecKind::Raw32),
            "vbyte" => Some(CodecKind::VByteGap),
            "simple8b" => Some(CodecKind::Simple8bGap),
            _ => None,
        }
    }
}

/// Resolve a [`CodecKind`] to its codec implementation.
pub fn get_codec(kind: CodecKind) -> Box<dyn PostingCodec> {
    match kind {
        CodecKind::Raw32 => Box::new(Raw32),
        CodecKind::VByteGap => Box::new(VByteGap),
        CodecKind::Simple8bGap => Box::new(Simple8bGap),
    }
}
