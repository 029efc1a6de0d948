//! Boolean query parsing and evaluation.

mod eval;
mod parser;

pub use parser::{parse_query, Token};

use crate::idmap::IdMap;
use crate::index::IndexReader;
use crate::tokenizer::{Stemmer, StopWords};

/// Parses and evaluates a Boolean query against the final index, returning
/// document paths in ascending doc_id order.
///
/// A stopword anywhere among the query's operand tokens makes the query
/// invalid: evaluation returns an empty result rather than an error, per
/// the retrieval contract's stopword-in-query policy.
pub fn evaluate_query(
    query: &str,
    term_id_map: &IdMap,
    doc_id_map: &IdMap,
    reader: &mut IndexReader,
    stemmer: &impl Stemmer,
    stopwords: &impl StopWords,
) -> Result<Vec<String>, crate::error::QueryError> {
    let postfix = match parser::parse_query(query, stemmer, stopwords)? {
        Some(tokens) => tokens,
        None => return Ok(Vec::new()),
    };
    eval::evaluate(&postfix, term_id_map, reader)
        .map(|doc_ids| doc_ids.into_iter().map(|id| doc_id_map.lookup_str(id).to_string()).collect())
}
