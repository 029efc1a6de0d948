//! Full corpus -> index -> query integration coverage, placed under
//! `tests/` as a top-level integration suite alongside each module's
//! inline `#[cfg(test)]` unit tests.

use std::fs;
use std::path::Path;

use bsbi_index::bsbi::BsbiIndex;
use bsbi_index::codec::CodecKind;
use bsbi_index::idmap::IdMap;
use bsbi_index::index::IndexReader;
use bsbi_index::query::evaluate_query;
use bsbi_index::tokenizer::{EnglishStopWords, IdentityStemmer, WordTokenizer};
use bsbi_index::MAIN_INDEX_NAME;
use tempfile::tempdir;

fn write_doc(corpus: &Path, block: &str, name: &str, contents: &str) {
    let dir = corpus.join(block);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), contents).unwrap();
}

fn build_corpus(corpus: &Path) {
    write_doc(corpus, "0", "a.txt", "cosmological quantum geodesics");
    write_doc(corpus, "0", "b.txt", "continuum geodesics manifold");
    write_doc(corpus, "1", "c.txt", "cosmological continuum geodesics");
    write_doc(corpus, "1", "d.txt", "manifold the and of");
}

fn run_pipeline(codec: CodecKind) -> (tempfile::TempDir, tempfile::TempDir) {
    let corpus = tempdir().unwrap();
    let output = tempdir().unwrap();
    build_corpus(corpus.path());

    let mut index = BsbiIndex::new(corpus.path(), output.path(), codec);
    index
        .start_indexing(&WordTokenizer, &IdentityStemmer, &EnglishStopWords::default())
        .unwrap();
    (corpus, output)
}

fn query(output: &Path, q: &str) -> Vec<String> {
    let term_id_map = IdMap::load(output.join("terms.dict")).unwrap();
    let doc_id_map = IdMap::load(output.join("docs.dict")).unwrap();
    let mut reader = IndexReader::open(output.join(MAIN_INDEX_NAME)).unwrap();
    evaluate_query(
        q,
        &term_id_map,
        &doc_id_map,
        &mut reader,
        &IdentityStemmer,
        &EnglishStopWords::default(),
    )
    .unwrap()
}

#[test]
fn indexes_and_answers_a_conjunctive_query_with_raw32() {
    let (_corpus, output) = run_pipeline(CodecKind::Raw32);
    let mut hits = query(output.path(), "cosmological AND geodesics");
    hits.sort();
    assert_eq!(hits, vec!["0/a.txt", "1/c.txt"]);
}

#[test]
fn indexes_and_answers_a_query_with_vbyte_codec() {
    let (_corpus, output) = run_pipeline(CodecKind::VByteGap);
    let mut hits = query(output.path(), "(cosmological AND continuum) DIFF manifold");
    hits.sort();
    assert_eq!(hits, vec!["1/c.txt"]);
}

#[test]
fn indexes_and_answers_a_query_with_simple8b_codec() {
    let (_corpus, output) = run_pipeline(CodecKind::Simple8bGap);
    let mut hits = query(output.path(), "quantum OR manifold");
    hits.sort();
    assert_eq!(hits, vec!["0/a.txt", "0/b.txt", "1/d.txt"]);
}

#[test]
fn stopword_in_query_returns_no_matches_regardless_of_corpus_content() {
    let (_corpus, output) = run_pipeline(CodecKind::Raw32);
    let hits = query(output.path(), "the AND manifold");
    assert!(hits.is_empty());
}

#[test]
fn unknown_term_in_a_query_behaves_like_an_empty_operand() {
    let (_corpus, output) = run_pipeline(CodecKind::Raw32);
    let hits = query(output.path(), "cosmological AND nonexistentterm");
    assert!(hits.is_empty());
}
