use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, WriteBytesExt};

use super::{DictEntry, DICTIONARY_FORMAT_VERSION};
use crate::codec::{get_codec, CodecKind, PostingCodec};
use crate::error::IndexIoError;

/// Scoped writer for one index file. Opens the posting stream immediately;
/// the dictionary accumulates in memory and is only flushed to disk on
/// [`IndexWriter::finish`]. `Drop` flushes it too as a best-effort backstop,
/// the same "explicit finalize, Drop as safety net" shape as a scoped
/// archive writer — but callers should call `finish()` to observe I/O
/// errors instead of silently swallowing them on drop.
pub struct IndexWriter {
    dict_path: PathBuf,
    posting_file: BufWriter<File>,
    codec: Box<dyn PostingCodec>,
    codec_kind: CodecKind,
    dictionary: Vec<DictEntry>,
    offset: u64,
    last_term_id: Option<u32>,
    finished: bool,
}

impl IndexWriter {
    /// `base` is the index's base path; the posting stream is written to
    /// `base` itself and the dictionary sidecar to `base` with `.dict`
    /// appended.
    pub fn create(base: impl AsRef<Path>, codec_kind: CodecKind) -> Result<Self, IndexIoError> {
        let base = base.as_ref();
        let posting_file = BufWriter::new(File::create(base)?);
        let dict_path = dict_sidecar_path(base);
        Ok(Self {
            dict_path,
            posting_file,
            codec: get_codec(codec_kind),
            codec_kind,
            dictionary: Vec::new(),
            offset: 0,
            last_term_id: None,
            finished: false,
        })
    }

    /// Appends `(term_id, postings)`. `term_id` must be strictly greater
    /// than any previously appended `term_id`; `postings` must be sorted
    /// strictly ascending (the caller's responsibility — this layer does
    /// not re-verify list ordering, only term_id ordering).
    ///
    /// A failed `append` leaves the writer unusable: the posting stream may
    /// already contain a partial write, so the caller must not keep using
    /// this writer afterward.
    pub fn append(&mut self, term_id: u32, postings: &[u32]) -> Result<(), IndexIoError> {
        if let Some(prev) = self.last_term_id {
            if term_id <= prev {
                return Err(IndexIoError::NonAscendingTermId {
                    prev,
                    new: term_id,
                });
            }
        }

        let encoded = self.codec.encode(postings)?;
        self.posting_file.write_all(&encoded)?;

        self.dictionary.push(DictEntry {
            term_id,
            offset: self.offset,
            length: encoded.len() as u64,
            count: postings.len() as u32,
        });
        self.offset += encoded.len() as u64;
        self.last_term_id = Some(term_id);
        Ok(())
    }

    /// Flushes the posting stream and writes the dictionary sidecar.
    /// Must be called exactly once to observe I/O errors; `Drop` repeats
    /// the flush silently if this was never called.
    pub fn finish(&mut self) -> Result<(), IndexIoError> {
        self.posting_file.flush()?;
        write_dictionary(&self.dict_path, self.codec_kind, &self.dictionary)?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for IndexWriter {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.posting_file.flush();
            let _ = write_dictionary(&self.dict_path, self.codec_kind, &self.dictionary);
        }
    }
}

pub(super) fn dict_sidecar_path(base: &Path) -> PathBuf {
    let mut s = base.as_os_str().to_os_string();
    s.push(".dict");
    PathBuf::from(s)
}

fn write_dictionary(
    path: &Path,
    codec_kind: CodecKind,
    dictionary: &[DictEntry],
) -> Result<(), IndexIoError> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_u8(codec_kind.discriminant())?;
    out.write_u8(DICTIONARY_FORMAT_VERSION)?;
    out.write_u32::<LittleEndian>(dictionary.len() as u32)?;
    for entry in dictionary {
        out.write_u32::<LittleEndian>(entry.term_id)?;
        out.write_u64::<LittleEndian>(entry.offset)?;
        out.write_u64::<LittleEndian>(entry.length)?;
        out.write_u32::<LittleEndian>(entry.count)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexReader;
    use tempfile::tempdir;

    #[test]
    fn rejects_non_ascending_term_id() {
        let dir = tempdir().unwrap();
        let mut writer = IndexWriter::create(dir.path().join("idx"), CodecKind::Raw32).unwrap();
        writer.append(5, &[1, 2]).unwrap();
        assert!(writer.append(5, &[3]).is_err());
        assert!(writer.append(4, &[3]).is_err());
    }

    #[test]
    fn write_then_read_back() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("idx");
        let mut writer = IndexWriter::create(&base, CodecKind::VByteGap).unwrap();
        writer.append(1, &[10, 20, 30]).unwrap();
        writer.append(7, &[5]).unwrap();
        writer.finish().unwrap();

        let mut reader = IndexReader::open(&base).unwrap();
        assert_eq!(reader.get_postings(1).unwrap(), vec![10, 20, 30]);
        assert_eq!(reader.get_postings(7).unwrap(), vec![5]);
        assert_eq!(reader.get_postings(99).unwrap(), Vec::<u32>::new());
    }
}
