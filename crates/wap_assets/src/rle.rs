//! Byte-oriented run-length codec used by compressed sprite frames
//!
//! A stream is a sequence of control bytes, each followed by its operand:
//! - `C <= 0x7F`: the next byte is repeated `C + 1` times
//! - `C >= 0x80`: the next `C - 0x80 + 1` bytes are copied verbatim

/// Longest run or literal span a single control byte can describe
pub const MAX_SPAN: usize = 128;

const LITERAL_BASE: u8 = 0x80;

/// Result of decoding a stream against an expected output length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RleDecoded {
    /// Decoded bytes; always exactly the expected length, zero past `decoded`
    pub bytes: Vec<u8>,
    /// Number of bytes actually produced by the stream
    pub decoded: usize,
    /// Number of source bytes consumed
    pub consumed: usize,
}

impl RleDecoded {
    /// Check if the stream filled the whole output
    pub fn is_complete(&self) -> bool {
        self.decoded == self.bytes.len()
    }
}

/// Decode `src` into exactly `expected` bytes.
///
/// Decoding stops once `expected` bytes are produced or the source runs out.
/// Never panics; output past the last decoded byte stays zero.
pub fn decode(src: &[u8], expected: usize) -> RleDecoded {
    let mut bytes = vec![0u8; expected];
    let (decoded, consumed) = decode_into(src, &mut bytes);
    RleDecoded {
        bytes,
        decoded,
        consumed,
    }
}

/// Decode `src` into `out`, returning `(bytes written, source bytes consumed)`.
pub fn decode_into(src: &[u8], out: &mut [u8]) -> (usize, usize) {
    let mut written = 0;
    let mut read = 0;

    while written < out.len() && read < src.len() {
        let control = src[read];
        read += 1;
        let remaining = out.len() - written;

        if control < LITERAL_BASE {
            let Some(&value) = src.get(read) else {
                break;
            };
            read += 1;
            let count = (control as usize + 1).min(remaining);
            out[written..written + count].fill(value);
            written += count;
        } else {
            let span = (control - LITERAL_BASE) as usize + 1;
            let available = span.min(src.len() - read);
            let count = available.min(remaining);
            out[written..written + count].copy_from_slice(&src[read..read + count]);
            written += count;
            read += available;
        }
    }

    (written, read)
}

/// Encode bytes with the inverse rule: repeats of two or more become runs,
/// everything else is grouped into literal spans.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len() / MAX_SPAN + 1);
    let mut i = 0;

    while i < data.len() {
        let run = run_length(&data[i..]);
        if run >= 2 {
            out.push((run - 1) as u8);
            out.push(data[i]);
            i += run;
            continue;
        }

        let start = i;
        while i < data.len() && i - start < MAX_SPAN && run_length(&data[i..]) < 2 {
            i += 1;
        }
        out.push(LITERAL_BASE + (i - start - 1) as u8);
        out.extend_from_slice(&data[start..i]);
    }

    out
}

fn run_length(data: &[u8]) -> usize {
    let Some(&first) = data.first() else {
        return 0;
    };
    data.iter()
        .take(MAX_SPAN)
        .take_while(|&&b| b == first)
        .count()
}
