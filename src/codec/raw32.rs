use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

use super::PostingCodec;
use crate::error::CodecError;

/// Stores each posting as a 4-byte little-endian unsigned value,
/// concatenated. No transform is applied — this is the uncompressed
/// baseline codec.
pub struct Raw32;

impl PostingCodec for Raw32 {
    fn encode(&self, postings: &[u32]) -> Result<Vec<u8>, CodecError> {
        if postings.is_empty() {
            return Err(CodecError::EmptyPostings);
        }
        let mut out = Vec::with_capacity(postings.len() * 4);
        for &v in postings {
            out.write_u32::<LittleEndian>(v)
                .map_err(|e| CodecError::MalformedStream(e.to_string()))?;
        }
        Ok(out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u32>, CodecError> {
        if bytes.len() % 4 != 0 {
            return Err(CodecError::MalformedStream(format!(
                "Raw32 stream length {} is not a multiple of 4",
                bytes.len()
            )));
        }
        let mut cursor = Cursor::new(bytes);
        let mut out = Vec::with_capacity(bytes.len() / 4);
        while (cursor.position() as usize) < bytes.len() {
            out.push(
                cursor
                    .read_u32::<LittleEndian>()
                    .map_err(|e| CodecError::MalformedStream(e.to_string()))?,
            );
        }
        Ok(out)
    }
}
