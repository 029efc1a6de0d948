//! Infix-to-postfix conversion via shunting-yard, plus the stopword-in-query
//! check.

use crate::error::QueryError;
use crate::tokenizer::{Stemmer, StopWords};

/// A postfix token: either an operand (a stemmed term) or one of the three
/// equal-precedence, left-associative set operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Term(String),
    And,
    Or,
    Diff,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RawToken {
    Term(String),
    And,
    Or,
    Diff,
    LParen,
    RParen,
}

fn lex(query: &str) -> Result<Vec<RawToken>, QueryError> {
    let mut tokens = Vec::new();
    let mut chars = query.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '(' {
            chars.next();
            tokens.push(RawToken::LParen);
            continue;
        }
        if c == ')' {
            chars.next();
            tokens.push(RawToken::RParen);
            continue;
        }
        let mut word = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == '(' || c == ')' {
                break;
            }
            word.push(c);
            chars.next();
        }
        tokens.push(match word.as_str() {
            "AND" => RawToken::And,
            "OR" => RawToken::Or,
            "DIFF" => RawToken::Diff,
            _ => RawToken::Term(word.to_lowercase()),
        });
    }
    Ok(tokens)
}

/// Parses `query` into postfix form. Returns `Ok(None)` if any operand is a
/// stopword (query invalid, caller should return an empty result); `Ok(Some(..))`
/// with the postfix token sequence otherwise.
pub fn parse_query(
    query: &str,
    stemmer: &impl Stemmer,
    stopwords: &impl StopWords,
) -> Result<Option<Vec<Token>>, QueryError> {
    let raw = lex(query)?;
    if raw.is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    for t in &raw {
        if let RawToken::Term(term) = t {
            if stopwords.is_stopword(term) {
                return Ok(None);
            }
        }
    }

    let mut output = Vec::new();
    let mut ops: Vec<RawToken> = Vec::new();
    let mut depth: i32 = 0;

    for t in raw {
        match t {
            RawToken::Term(term) => output.push(Token::Term(stemmer.stem(&term))),
            RawToken::And | RawToken::Or | RawToken::Diff => {
                // Equal precedence, left-associative: pop any pending
                // operator (not a paren) before pushing this one.
                while let Some(top) = ops.last() {
                    if matches!(top, RawToken::LParen) {
                        break;
                    }
                    output.push(to_postfix_token(ops.pop().unwrap())?);
                }
                ops.push(t);
            }
            RawToken::LParen => {
                depth += 1;
                ops.push(t);
            }
            RawToken::RParen => {
                depth -= 1;
                if depth < 0 {
                    return Err(QueryError::UnbalancedParens);
                }
                loop {
                    match ops.pop() {
                        Some(RawToken::LParen) => break,
                        Some(op) => output.push(to_postfix_token(op)?),
                        None => return Err(QueryError::UnbalancedParens),
                    }
                }
            }
        }
    }
    if depth != 0 {
        return Err(QueryError::UnbalancedParens);
    }
    while let Some(op) = ops.pop() {
        output.push(to_postfix_token(op)?);
    }

    Ok(Some(output))
}

fn to_postfix_token(raw: RawToken) -> Result<Token, QueryError> {
    match raw {
        RawToken::And => Ok(Token::And),
        RawToken::Or => Ok(Token::Or),
        RawToken::Diff => Ok(Token::Diff),
        RawToken::LParen | RawToken::RParen => Err(QueryError::UnbalancedParens),
        RawToken::Term(_) => unreachable!("terms are pushed to output directly"),
    }
}
