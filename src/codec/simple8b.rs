use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

use super::PostingCodec;
use crate::error::CodecError;

/// (bits-per-integer, count-per-word) for selectors 0..=15. Selectors 0 and
/// 1 store no payload at all — they mean "240 (resp. 120) consecutive gaps
/// of 1", a dedicated run-length shortcut for the common dense-posting case.
const SELECTOR_TABLE: [(u32, u32); 16] = [
    (0, 240),
    (0, 120),
    (1, 60),
    (2, 30),
    (3, 20),
    (4, 15),
    (5, 12),
    (6, 10),
    (7, 8),
    (8, 7),
    (10, 6),
    (12, 5),
    (15, 4),
    (20, 3),
    (30, 2),
    (60, 1),
];

/// Gap-encodes the postings then packs gaps into 64-bit words. Each word's
/// low 4 bits are a selector choosing a (bits-per-integer, count) layout for
/// the remaining 60 bits. Encoding greedily picks the smallest selector that
/// fits the next run of gaps; words are emitted 8-byte big-endian.
pub struct Simple8bGap;

fn find_selector(gaps: &[u64], pos: usize) -> Option<usize> {
    let n = gaps.len();
    if pos + 240 <= n && gaps[pos..pos + 240].iter().all(|&x| x == 1) {
        return Some(0);
    }
    if pos + 120 <= n && gaps[pos..pos + 120].iter().all(|&x| x == 1) {
        return Some(1);
    }
    for sel in 2..16 {
        let (bits, count) = SELECTOR_TABLE[sel];
        let count = count as usize;
        if pos + count <= n {
            let limit = 1u64 << bits;
            if gaps[pos..pos + count].iter().all(|&x| x < limit) {
                return Some(sel);
            }
        }
    }
    None
}

impl PostingCodec for Simple8bGap {
    fn encode(&self, postings: &[u32]) -> Result<Vec<u8>, CodecError> {
        if postings.is_empty() {
            return Err(CodecError::EmptyPostings);
        }

        let mut gaps = Vec::with_capacity(postings.len());
        let mut prev = postings[0] as u64;
        gaps.push(prev);
        for &v in &postings[1..] {
            gaps.push((v as u64).wrapping_sub(prev));
            prev = v as u64;
        }

        let mut out = Vec::new();
        let mut pos = 0;
        while pos < gaps.len() {
            let sel = find_selector(&gaps, pos).ok_or(CodecError::GapTooLarge { gap: gaps[pos] })?;
            let (bits, count) = SELECTOR_TABLE[sel];
            let count = count as usize;

            let mut word: u64 = sel as u64;
            if sel >= 2 {
                for j in 0..count {
                    word |= gaps[pos + j] << (4 + bits * j as u32);
                }
            }
            out.write_u64::<BigEndian>(word)
                .map_err(|e| CodecError::MalformedStream(e.to_string()))?;

            pos += if sel == 0 { 240 } else { count };
        }
        Ok(out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u32>, CodecError> {
        if bytes.is_empty() || bytes.len() % 8 != 0 {
            return Err(CodecError::MalformedStream(format!(
                "Simple8bGap stream length {} is not a non-zero multiple of 8",
                bytes.len()
            )));
        }

        let mut gaps = Vec::new();
        let mut cursor = Cursor::new(bytes);
        while (cursor.position() as usize) < bytes.len() {
            let word = cursor
                .read_u64::<BigEndian>()
                .map_err(|e| CodecError::MalformedStream(e.to_string()))?;
            let sel = (word & 0xF) as usize;
            if sel > 15 {
                return Err(CodecError::MalformedStream(format!(
                    "invalid Simple8bGap selector {sel}"
                )));
            }
            match sel {
                0 => gaps.extend(std::iter::repeat(1u64).take(240)),
                1 => gaps.extend(std::iter::repeat(1u64).take(120)),
                _ => {
                    let (bits, count) = SELECTOR_TABLE[sel];
                    let payload = word >> 4;
                    let mask = (1u64 << bits) - 1;
                    for j in 0..count {
                        gaps.push((payload >> (bits * j)) & mask);
                    }
                }
            }
        }

        let mut out = Vec::with_capacity(gaps.len());
        let mut acc: u64 = 0;
        for (i, g) in gaps.into_iter().enumerate() {
            acc = if i == 0 { g } else { acc + g };
            out.push(acc as u32);
        }
        Ok(out)
    }
}
