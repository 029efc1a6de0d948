use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use log::warn;

use super::{DictEntry, DICTIONARY_FORMAT_VERSION};
use super::writer::dict_sidecar_path;
use crate::codec::{get_codec, CodecKind, PostingCodec};
use crate::error::IndexIoError;

/// Scoped reader for one index file: loads the dictionary into memory and
/// opens the posting stream for random reads.
pub struct IndexReader {
    posting_file: File,
    codec: Box<dyn PostingCodec>,
    dictionary: Vec<DictEntry>,
    by_term: HashMap<u32, usize>,
}

impl IndexReader {
    pub fn open(base: impl AsRef<Path>) -> Result<Self, IndexIoError> {
        let base = base.as_ref();
        let dict_path = dict_sidecar_path(base);
        let (codec_kind, dictionary) = read_dictionary(&dict_path)?;

        let mut by_term = HashMap::with_capacity(dictionary.len());
        for (i, entry) in dictionary.iter().enumerate() {
            by_term.insert(entry.term_id, i);
        }

        Ok(Self {
            posting_file: File::open(base)?,
            codec: get_codec(codec_kind),
            dictionary,
            by_term,
        })
    }

    /// Random lookup. Absent `term_id` yields an empty list, not an error.
    pub fn get_postings(&mut self, term_id: u32) -> Result<Vec<u32>, IndexIoError> {
        let Some(&i) = self.by_term.get(&term_id) else {
            return Ok(Vec::new());
        };
        let entry = self.dictionary[i];
        self.read_entry(&entry)
    }

    /// Sequential iteration in ascending `term_id` order, decoding on
    /// demand.
    pub fn iter(&mut self) -> IndexReaderIter<'_> {
        IndexReaderIter { reader: self, pos: 0 }
    }

    pub fn term_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Reads and decodes the postings for `entry`. A dictionary-recorded
    /// term whose bytes are missing or short (offset/length pointing past a
    /// truncated posting stream) is treated defensively as an empty list
    /// rather than a hard error — distinct from a malformed byte stream,
    /// which still propagates as a decode error.
    fn read_entry(&mut self, entry: &DictEntry) -> Result<Vec<u32>, IndexIoError> {
        if let Err(e) = self.posting_file.seek(SeekFrom::Start(entry.offset)) {
            warn!(
                "term_id {} dictionary entry points past the posting stream (seek failed: {e}); treating as empty",
                entry.term_id
            );
            return Ok(Vec::new());
        }
        let mut buf = vec![0u8; entry.length as usize];
        if let Err(e) = self.posting_file.read_exact(&mut buf) {
            warn!(
                "term_id {} posting stream bytes are missing or short ({e}); treating as empty",
                entry.term_id
            );
            return Ok(Vec::new());
        }
        Ok(self.codec.decode(&buf)?)
    }
}

pub struct IndexReaderIter<'a> {
    reader: &'a mut IndexReader,
    pos: usize,
}

impl<'a> Iterator for IndexReaderIter<'a> {
    type Item = Result<(u32, Vec<u32>), IndexIoError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.reader.dictionary.len() {
            return None;
        }
        let entry = self.reader.dictionary[self.pos];
        self.pos += 1;
        match self.reader.read_entry(&entry) {
            Ok(postings) => Some(Ok((entry.term_id, postings))),
            Err(e) => Some(Err(e)),
        }
    }
}

fn read_dictionary(path: &Path) -> Result<(CodecKind, Vec<DictEntry>), IndexIoError> {
    let mut r = BufReader::new(File::open(path)?);
    let codec_byte = r.read_u8()?;
    let codec_kind = CodecKind::from_discriminant(codec_byte).ok_or_else(|| {
        IndexIoError::CorruptDictionary(format!("unknown codec discriminant {codec_byte}"))
    })?;
    let version = r.read_u8()?;
    if version != DICTIONARY_FORMAT_VERSION {
        return Err(IndexIoError::CorruptDictionary(format!(
            "dictionary format version {version} is not supported (expected {DICTIONARY_FORMAT_VERSION})"
        )));
    }
    let count = r.read_u32::<LittleEndian>()? as usize;

    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        entries.push(DictEntry {
            term_id: r.read_u32::<LittleEndian>()?,
            offset: r.read_u64::<LittleEndian>()?,
            length: r.read_u64::<LittleEndian>()?,
            count: r.read_u32::<LittleEndian>()?,
        });
    }
    Ok((codec_kind, entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexWriter;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn sequential_iteration_is_ascending() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("idx");
        let mut writer = IndexWriter::create(&base, CodecKind::Raw32).unwrap();
        writer.append(2, &[1]).unwrap();
        writer.append(5, &[2, 3]).unwrap();
        writer.append(9, &[4]).unwrap();
        writer.finish().unwrap();

        let mut reader = IndexReader::open(&base).unwrap();
        let seen: Vec<(u32, Vec<u32>)> = reader.iter().map(|r| r.unwrap()).collect();
        assert_eq!(
            seen,
            vec![(2, vec![1]), (5, vec![2, 3]), (9, vec![4])]
        );
    }

    #[test]
    fn missing_posting_bytes_are_treated_as_an_empty_list() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("idx");
        let mut writer = IndexWriter::create(&base, CodecKind::Raw32).unwrap();
        writer.append(1, &[10, 20, 30]).unwrap();
        writer.finish().unwrap();

        // Truncate the posting stream out from under the dictionary entry
        // that still claims 12 bytes at offset 0, simulating a corrupted or
        // partially-written intermediate index.
        File::create(&base).unwrap().set_len(0).unwrap();

        let mut reader = IndexReader::open(&base).unwrap();
        assert_eq!(reader.get_postings(1).unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn unsupported_dictionary_format_version_is_rejected() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("idx");
        let mut writer = IndexWriter::create(&base, CodecKind::Raw32).unwrap();
        writer.append(1, &[1]).unwrap();
        writer.finish().unwrap();

        let dict_path = dict_sidecar_path(&base);
        let mut bytes = std::fs::read(&dict_path).unwrap();
        bytes[1] = DICTIONARY_FORMAT_VERSION.wrapping_add(1);
        File::create(&dict_path).unwrap().write_all(&bytes).unwrap();

        assert!(IndexReader::open(&base).is_err());
    }
}
