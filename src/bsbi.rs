//! Blocked Sort-Based Indexing driver.
//!
//! Scans the corpus block by block, tokenizes each document, accumulates
//! `(term_id, doc_id)` pairs per block, inverts them in memory, and streams
//! one intermediate index file per block. After all blocks are parsed, both
//! id maps are persisted and the intermediate indices are merged into the
//! final index.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::info;

use crate::codec::CodecKind;
use crate::document::Document;
use crate::error::IndexIoError;
use crate::idmap::IdMap;
use crate::index::{IndexReader, IndexWriter};
use crate::merge::merge;
use crate::tokenizer::{StopWords, Stemmer, Tokenizer};
use crate::MAIN_INDEX_NAME;

/// Per-phase wall-clock durations, the Rust-native reading of the original
/// implementation's `timing_stats` dictionary.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndexingStats {
    pub parsing_blocks: std::time::Duration,
    pub writing_indices: std::time::Duration,
    pub merging_indices: std::time::Duration,
    pub total: std::time::Duration,
}

/// Owns the term/document id maps for the duration of indexing and drives
/// the end-to-end BSBI pipeline.
pub struct BsbiIndex {
    corpus_path: PathBuf,
    output_path: PathBuf,
    codec_kind: CodecKind,
    term_id_map: IdMap,
    doc_id_map: IdMap,
    intermediate_names: Vec<String>,
}

impl BsbiIndex {
    pub fn new(corpus_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>, codec_kind: CodecKind) -> Self {
        Self {
            corpus_path: corpus_path.into(),
            output_path: output_path.into(),
            codec_kind,
            term_id_map: IdMap::new(),
            doc_id_map: IdMap::new(),
            intermediate_names: Vec::new(),
        }
    }

    fn terms_dict_path(&self) -> PathBuf {
        self.output_path.join("terms.dict")
    }

    fn docs_dict_path(&self) -> PathBuf {
        self.output_path.join("docs.dict")
    }

    fn intermediate_base(&self, block_name: &str) -> PathBuf {
        self.output_path.join(format!("intermediate_index_{block_name}"))
    }

    fn main_index_base(&self) -> PathBuf {
        self.output_path.join(MAIN_INDEX_NAME)
    }

    pub fn save(&self) -> Result<(), IndexIoError> {
        self.term_id_map.save(self.terms_dict_path())?;
        self.doc_id_map.save(self.docs_dict_path())?;
        Ok(())
    }

    pub fn load(&mut self) -> Result<(), IndexIoError> {
        self.term_id_map = IdMap::load(self.terms_dict_path())?;
        self.doc_id_map = IdMap::load(self.docs_dict_path())?;
        Ok(())
    }

    pub fn term_id_map(&self) -> &IdMap {
        &self.term_id_map
    }

    pub fn doc_id_map(&self) -> &IdMap {
        &self.doc_id_map
    }

    /// Runs the full pipeline: per-block parsing and inversion, id map
    /// persistence, and the final k-way merge. Returns timing stats for the
    /// three phases.
    pub fn start_indexing(
        &mut self,
        tokenizer: &impl Tokenizer,
        stemmer: &impl Stemmer,
        stopwords: &impl StopWords,
    ) -> Result<IndexingStats, IndexIoError> {
        fs::create_dir_all(&self.output_path)?;
        let total_start = Instant::now();
        let mut stats = IndexingStats::default();

        let mut block_names: Vec<String> = fs::read_dir(&self.corpus_path)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        block_names.sort();

        for block_name in &block_names {
            let parse_start = Instant::now();
            let pairs = self.parsing_block(block_name, tokenizer, stemmer, stopwords)?;
            stats.parsing_blocks += parse_start.elapsed();

            let index_base = self.intermediate_base(block_name);
            self.intermediate_names.push(block_name.clone());

            let write_start = Instant::now();
            let mut writer = IndexWriter::create(&index_base, self.codec_kind)?;
            write_to_index(pairs, &mut writer)?;
            writer.finish()?;
            stats.writing_indices += write_start.elapsed();
        }

        self.save()?;

        info!("starting index merge over {} block(s)", self.intermediate_names.len());
        let merge_start = Instant::now();
        let readers: Result<Vec<IndexReader>, IndexIoError> = self
            .intermediate_names
            .iter()
            .map(|name| IndexReader::open(self.intermediate_base(name)))
            .collect();
        let readers = readers?;

        let mut merged_writer = IndexWriter::create(self.main_index_base(), self.codec_kind)?;
        merge(readers, &mut merged_writer).map_err(|e| match e {
            crate::error::MergeError::Index(inner) => inner,
            other => IndexIoError::CorruptDictionary(other.to_string()),
        })?;
        merged_writer.finish()?;
        stats.merging_indices = merge_start.elapsed();

        stats.total = total_start.elapsed();
        self.save()?;

        info!(
            "indexing completed in {:.2}s (parse {:.2}s, write {:.2}s, merge {:.2}s)",
            stats.total.as_secs_f64(),
            stats.parsing_blocks.as_secs_f64(),
            stats.writing_indices.as_secs_f64(),
            stats.merging_indices.as_secs_f64(),
        );
        Ok(stats)
    }

    /// Parses every document in `block_name` into `(term_id, doc_id)` pairs,
    /// using the document's corpus-relative path (`<block>/<filename>`) as
    /// its id-map key so same-named files in different blocks don't collide.
    fn parsing_block(
        &mut self,
        block_name: &str,
        tokenizer: &impl Tokenizer,
        stemmer: &impl Stemmer,
        stopwords: &impl StopWords,
    ) -> Result<Vec<(u32, u32)>, IndexIoError> {
        let block_dir = self.corpus_path.join(block_name);
        let mut pairs = Vec::new();

        let mut doc_names: Vec<String> = fs::read_dir(&block_dir)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        doc_names.sort();

        for doc_name in doc_names {
            let doc_id_key = format!("{block_name}/{doc_name}");
            let doc_id = self.doc_id_map.intern(&doc_id_key);
            let text = fs::read_to_string(block_dir.join(&doc_name))?;
            let document = Document::new(doc_id_key, text);

            for token in tokenizer.tokenize(&document.text) {
                if stopwords.is_stopword(&token) {
                    continue;
                }
                let stemmed = stemmer.stem(&token);
                let term_id = self.term_id_map.intern(&stemmed);
                pairs.push((term_id, doc_id));
            }
        }
        Ok(pairs)
    }
}

/// Inverts `pairs` in memory (`term_id -> set<doc_id>`) and emits records to
/// `writer` in ascending `term_id` order, each postings list sorted
/// ascending. A `BTreeMap` gives the ascending-key iteration order the
/// writer's append-order invariant requires for free.
fn write_to_index(pairs: Vec<(u32, u32)>, writer: &mut IndexWriter) -> Result<(), IndexIoError> {
    let mut term_dict: BTreeMap<u32, HashSet<u32>> = BTreeMap::new();
    for (term_id, doc_id) in pairs {
        term_dict.entry(term_id).or_default().insert(doc_id);
    }
    for (term_id, doc_ids) in term_dict {
        let mut postings: Vec<u32> = doc_ids.into_iter().collect();
        postings.sort_unstable();
        writer.append(term_id, &postings)?;
    }
    Ok(())
}

/// Resolves a document id back to its corpus-relative path.
pub fn resolve_doc_path(doc_id_map: &IdMap, doc_id: u32) -> &str {
    doc_id_map.lookup_str(doc_id)
}
