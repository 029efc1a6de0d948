use super::PostingCodec;
use crate::error::CodecError;

/// Gap-encodes the postings (`g[0] = ps[0]`, `g[i] = ps[i] - ps[i-1]`) then
/// variable-byte encodes each gap: 7-bit groups, most-significant group
/// first, every byte has its high bit clear except the final byte of a
/// number, whose high bit is the terminator.
pub struct VByteGap;

fn vb_encode_number(mut n: u64, out: &mut Vec<u8>) {
    let start = out.len();
    loop {
        out.insert(start, (n % 128) as u8);
        if n < 128 {
            break;
        }
        n /= 128;
    }
    let last = out.len() - 1;
    out[last] |= 0x80;
}

impl PostingCodec for VByteGap {
    fn encode(&self, postings: &[u32]) -> Result<Vec<u8>, CodecError> {
        if postings.is_empty() {
            return Err(CodecError::EmptyPostings);
        }
        let mut out = Vec::with_capacity(postings.len() * 2);
        let mut prev = postings[0] as u64;
        vb_encode_number(prev, &mut out);
        for &v in &postings[1..] {
            let gap = (v as u64).wrapping_sub(prev);
            vb_encode_number(gap, &mut out);
            prev = v as u64;
        }
        Ok(out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u32>, CodecError> {
        if bytes.is_empty() {
            return Err(CodecError::MalformedStream("empty VByteGap stream".into()));
        }
        let mut gaps = Vec::new();
        let mut n: u64 = 0;
        for &byte in bytes {
            if byte & 0x80 != 0 {
                n = 128 * n + (byte & 0x7F) as u64;
                gaps.push(n);
                n = 0;
            } else {
                n = 128 * n + byte as u64;
            }
        }
        if n != 0 {
            return Err(CodecError::MalformedStream(
                "VByteGap stream ended mid-number".into(),
            ));
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
