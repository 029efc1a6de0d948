//! External k-way merge: unifies intermediate per-block indices into one
//! final index using a min-heap keyed by `(term_id, reader_index)`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::MergeError;
use crate::index::{IndexReader, IndexWriter};
use crate::setops::union;

/// Merges `readers` into `writer`. Output invariant: emitted `term_id`s are
/// strictly ascending, and each emitted postings list is the sorted union
/// (duplicates removed) of all postings for that term across inputs.
///
/// `reader_index` breaks heap ties deterministically when two readers
/// surface the same `term_id` at once.
pub fn merge(mut readers: Vec<IndexReader>, writer: &mut IndexWriter) -> Result<(), MergeError> {
    let mut heap: BinaryHeap<Reverse<(u32, usize)>> = BinaryHeap::new();
    let mut pending: Vec<Option<Vec<u32>>> = vec![None; readers.len()];
    let mut last_term_ids: Vec<Option<u32>> = vec![None; readers.len()];

    for (i, reader) in readers.iter_mut().enumerate() {
        if let Some(next) = advance(reader, i, &mut pending, &mut last_term_ids)? {
            heap.push(Reverse(next));
        }
    }

    let mut current_term: Option<u32> = None;
    let mut current_postings: Vec<u32> = Vec::new();

    while let Some(Reverse((term_id, i))) = heap.pop() {
        let postings = pending[i].take().expect("pending entry must be populated");

        if let Some(ct) = current_term {
            if term_id != ct {
                writer.append(ct, &current_postings)?;
                current_postings.clear();
            }
        }
        current_term = Some(term_id);
        current_postings = if current_postings.is_empty() {
            postings
        } else {
            union(&current_postings, &postings)
        };

        if let Some(next) = advance(&mut readers[i], i, &mut pending, &mut last_term_ids)? {
            heap.push(Reverse(next));
        }
    }

    if let Some(ct) = current_term {
        if !current_postings.is_empty() {
            writer.append(ct, &current_postings)?;
        }
    }
    Ok(())
}

/// Pulls the next `(term_id, postings)` from reader `i`, stashes the
/// postings in `pending[i]`, and returns the heap key if the reader wasn't
/// exhausted. Also checks the within-reader ascending invariant: a reader
/// yielding a `term_id` that doesn't strictly increase over what it last
/// yielded indicates a corrupt intermediate index (a writer bug), which is
/// fatal per the merger's error contract.
fn advance(
    reader: &mut IndexReader,
    i: usize,
    pending: &mut [Option<Vec<u32>>],
    last_term_ids: &mut [Option<u32>],
) -> Result<Option<(u32, usize)>, MergeError> {
    let next = reader.iter().next();
    match next {
        None => Ok(None),
        Some(Err(e)) => Err(e.into()),
        Some(Ok((term_id, postings))) => {
            if let Some(prev) = last_term_ids[i] {
                if term_id <= prev {
                    return Err(MergeError::NonAscendingWithinReader {
                        reader_index: i,
                        prev,
                        new: term_id,
                    });
                }
            }
            last_term_ids[i] = Some(term_id);
            pending[i] = Some(postings);
            Ok(Some((term_id, i)))
        }
    }
}
