//! Corpus document types.

use serde::{Deserialize, Serialize};

/// A single file read from the corpus during block parsing.
///
/// `id` is the document's path relative to the corpus root
/// (`<block>/<filename>`), not the bare filename — two different blocks may
/// contain files with the same name, and the relative path keeps them
/// distinct in the [`crate::idmap::IdMap`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}
