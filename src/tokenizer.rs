//! Tokenization collaborators.
//!
//! The BSBI driver consumes a stream of normalized term strings per document;
//! it does not embed a real linguistic stemmer. These traits are the seam:
//! callers who want Porter2 stemming or a corpus-scale stopword list
//! implement [`Stemmer`]/[`StopWords`] themselves. The defaults here are
//! enough to exercise the pipeline end-to-end without an external NLP
//! dependency.

use std::collections::HashSet;

/// Splits document text into a sequence of raw term strings.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Reduces a term to its indexed form (e.g. stemming).
pub trait Stemmer {
    fn stem(&self, term: &str) -> String;
}

/// Decides whether a term should be dropped from indexing/querying.
pub trait StopWords {
    fn is_stopword(&self, term: &str) -> bool;
}

/// Splits on runs of non-alphanumeric bytes and lowercases ASCII, the same
/// byte-level scan the Python original performs with
/// `re.findall(r'\w+', content.lower())`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let bytes = text.as_bytes();
        let mut tokens = Vec::with_capacity(text.len() / 5);
        let mut start = 0;
        let mut in_token = false;

        for (i, &b) in bytes.iter().enumerate() {
            let is_word_byte = b.is_ascii_alphanumeric() || b == b'_';
            if is_word_byte {
                if !in_token {
                    start = i;
                    in_token = true;
                }
            } else if in_token {
                tokens.push(normalize(&bytes[start..i]));
                in_token = false;
            }
        }
        if in_token {
            tokens.push(normalize(&bytes[start..]));
        }
        tokens
    }
}

fn normalize(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len());
    for &b in bytes {
        result.push(b.to_ascii_lowercase() as char);
    }
    result
}

/// No-op stemmer. Real stemming (e.g. Porter2) is out of scope; this is a
/// pass-through so the pipeline is usable without one.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityStemmer;

impl Stemmer for IdentityStemmer {
    fn stem(&self, term: &str) -> String {
        term.to_string()
    }
}

/// A small built-in English stopword list, enough to exercise
/// stopword-in-query rejection in tests without a corpus-scale wordlist.
#[derive(Debug, Clone)]
pub struct EnglishStopWords {
    words: HashSet<&'static str>,
}

impl Default for EnglishStopWords {
    fn default() -> Self {
        const WORDS: &[&str] = &[
            "a", "an", "and", "are", "as", "at", "be", "by", "for", "from",
            "has", "he", "in", "is", "it", "its", "of", "on", "or", "that",
            "the", "to", "was", "were", "will", "with",
        ];
        Self {
            words: WORDS.iter().copied().collect(),
        }
    }
}

impl StopWords for EnglishStopWords {
    fn is_stopword(&self, term: &str) -> bool {
        self.words.contains(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_alphanumeric_and_lowercases() {
        let tokens = WordTokenizer.tokenize("Hello, World! hello_world");
        assert_eq!(tokens, vec!["hello", "world", "hello_world"]);
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(WordTokenizer.tokenize("   ,, !!").is_empty());
    }

    #[test]
    fn identity_stemmer_is_a_pass_through() {
        assert_eq!(IdentityStemmer.stem("running"), "running");
    }

    #[test]
    fn recognizes_common_stopwords() {
        let stop = EnglishStopWords::default();
        assert!(stop.is_stopword("the"));
        assert!(stop.is_stopword("and"));
        assert!(!stop.is_stopword("geodesics"));
    }
}
