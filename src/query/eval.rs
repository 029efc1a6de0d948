//! Stack-based evaluation of a postfix Boolean query over sorted-list set
//! operations.

use super::parser::Token;
use crate::error::QueryError;
use crate::idmap::IdMap;
use crate::index::IndexReader;
use crate::setops::{difference, intersection, union};

/// Evaluates `postfix` and returns the resulting doc_id list, ascending.
///
/// `DIFF`'s argument order is a contract, not an implementation detail: the
/// first popped operand is the right-hand side (subtrahend) and the second
/// popped is the left-hand side (minuend) — `push(A DIFF B)` where `B` came
/// off the stack first.
pub fn evaluate(
    postfix: &[Token],
    term_id_map: &IdMap,
    reader: &mut IndexReader,
) -> Result<Vec<u32>, QueryError> {
    let mut stack: Vec<Vec<u32>> = Vec::new();

    for token in postfix {
        match token {
            Token::Term(term) => {
                let postings = match term_id_map.lookup_id(term) {
                    Some(term_id) => reader.get_postings(term_id)?,
                    None => Vec::new(),
                };
                stack.push(postings);
            }
            Token::And => {
                let b = stack.pop().ok_or_else(|| missing("AND"))?;
                let a = stack.pop().ok_or_else(|| missing("AND"))?;
                stack.push(intersection(&a, &b));
            }
            Token::Or => {
                let b = stack.pop().ok_or_else(|| missing("OR"))?;
                let a = stack.pop().ok_or_else(|| missing("OR"))?;
                stack.push(union(&a, &b));
            }
            Token::Diff => {
                let b = stack.pop().ok_or_else(|| missing("DIFF"))?;
                let a = stack.pop().ok_or_else(|| missing("DIFF"))?;
                stack.push(difference(&a, &b));
            }
        }
    }

    stack.pop().ok_or(QueryError::EmptyQuery)
}

fn missing(op: &str) -> QueryError {
    QueryError::MissingOperand(op.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecKind;
    use crate::index::IndexWriter;
    use tempfile::tempdir;

    fn build_test_index(dir: &std::path::Path) -> (IdMap, std::path::PathBuf) {
        let mut terms = IdMap::new();
        let alpha = terms.intern("alpha");
        let beta = terms.intern("beta");
        let gamma = terms.intern("gamma");

        let base = dir.join("idx");
        let mut writer = IndexWriter::create(&base, CodecKind::Raw32).unwrap();
        writer.append(alpha, &[1, 2, 3]).unwrap();
        writer.append(beta, &[2, 3, 4]).unwrap();
        writer.append(gamma, &[3]).unwrap();
        writer.finish().unwrap();

        (terms, base)
    }

    #[test]
    fn s5_boolean_query_evaluates_correctly() {
        let dir = tempdir().unwrap();
        let (terms, base) = build_test_index(dir.path());
        let mut reader = IndexReader::open(&base).unwrap();

        let postfix = vec![
            Token::Term("alpha".into()),
            Token::Term("beta".into()),
            Token::And,
            Token::Term("gamma".into()),
            Token::Diff,
        ];
        let result = evaluate(&postfix, &terms, &mut reader).unwrap();
        assert_eq!(result, vec![2]);
    }

    #[test]
    fn unknown_term_behaves_like_an_empty_operand() {
        let dir = tempdir().unwrap();
        let (terms, base) = build_test_index(dir.path());
        let mut reader = IndexReader::open(&base).unwrap();

        let with_missing = vec![
            Token::Term("alpha".into()),
            Token::Term("nonexistent".into()),
            Token::And,
        ];
        assert_eq!(evaluate(&with_missing, &terms, &mut reader).unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn diff_operand_order_matches_contract() {
        let dir = tempdir().unwrap();
        let (terms, base) = build_test_index(dir.path());
        let mut reader = IndexReader::open(&base).unwrap();

        // alpha DIFF beta: alpha=[1,2,3], beta=[2,3,4] -> [1]
        let postfix = vec![
            Token::Term("alpha".into()),
            Token::Term("beta".into()),
            Token::Diff,
        ];
        assert_eq!(evaluate(&postfix, &terms, &mut reader).unwrap(), vec![1]);
    }
}
