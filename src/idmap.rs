//! Bijective, append-only string-to-integer map.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::IndexIoError;

/// Assigns each distinct string a dense `u32` id starting at 0, in insertion
/// order. Reverse lookup is O(1) via a parallel `Vec<String>` indexed by id —
/// the same "contiguous ids reverse-indexable by Vec" shape used for
/// document ids elsewhere in the corpus.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IdMap {
    ids: HashMap<String, u32>,
    strings: Vec<String>,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing id for `s`, or assigns and returns the next one.
    pub fn intern(&mut self, s: &str) -> u32 {
        if let Some(&id) = self.ids.get(s) {
            return id;
        }
        let id = self.strings.len() as u32;
        self.strings.push(s.to_string());
        self.ids.insert(s.to_string(), id);
        id
    }

    /// Looks up `s` without interning it.
    pub fn lookup_id(&self, s: &str) -> Option<u32> {
        self.ids.get(s).copied()
    }

    /// Looks up the string for `id`. Panics if `id` was never assigned —
    /// callers only ever pass back ids this map itself produced.
    pub fn lookup_str(&self, id: u32) -> &str {
        &self.strings[id as usize]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), IndexIoError> {
        let file = File::create(path)?;
        bincode::serialize_into(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, IndexIoError> {
        let file = File::open(path)?;
        let map = bincode::deserialize_from(BufReader::new(file))?;
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn interning_is_idempotent_and_dense() {
        let mut map = IdMap::new();
        let a = map.intern("alpha");
        let b = map.intern("beta");
        let a_again = map.intern("alpha");
        assert_eq!(a, a_again);
        assert_ne!(a, b);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn bijection_holds_after_interning() {
        let mut map = IdMap::new();
        for s in ["alpha", "beta", "gamma", "alpha", "delta"] {
            map.intern(s);
        }
        for s in ["alpha", "beta", "gamma", "delta"] {
            let id = map.lookup_id(s).unwrap();
            assert_eq!(map.lookup_str(id), s);
        }
        let ids: std::collections::HashSet<u32> = (0..map.len() as u32).collect();
        assert_eq!(ids.len(), map.len());
    }

    #[test]
    fn lookup_id_has_no_side_effect() {
        let mut map = IdMap::new();
        map.intern("alpha");
        assert_eq!(map.lookup_id("missing"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn survives_a_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("terms.dict");

        let mut map = IdMap::new();
        map.intern("alpha");
        map.intern("beta");
        map.save(&path).unwrap();

        let loaded = IdMap::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.lookup_id("alpha"), Some(0));
        assert_eq!(loaded.lookup_str(1), "beta");
    }
}
