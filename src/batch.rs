//! Packing whole sequences of values into one contiguous stream.
//!
//! A packed stream is the concatenation of every value's items with no separators, length
//! prefix or padding. The item count is recovered by scanning length codes.

use log::trace;

use crate::window::{
    DirectReader, DirectWriter, SlidingReader, SlidingWriter, Strategy, WindowReader,
    WindowWriter,
};
use crate::{Leb128, Scheme, Shamt, Vlu};

/// Packs and unpacks sequences of `u64` with a given [`Scheme`] and window [`Strategy`].
///
/// ```
/// use vlu::{BatchCodec, Strategy};
///
/// let codec = BatchCodec::vlu().with_strategy(Strategy::Direct);
/// let stream = codec.pack(&[1, 300, 70_000]);
/// assert_eq!(stream.len(), 1 + 2 + 3);
/// assert_eq!(codec.count(&stream), 3);
/// assert_eq!(codec.unpack(&stream), vec![1, 300, 70_000]);
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BatchCodec<S> {
    scheme: S,
    strategy: Strategy,
}

impl BatchCodec<Vlu> {
    /// VLU with the default 8-byte limit and the sliding window strategy.
    pub fn vlu() -> Self {
        Self::new(Vlu::default())
    }
}

impl BatchCodec<Leb128> {
    /// LEB128 with the sliding window strategy.
    pub fn leb128() -> Self {
        Self::new(Leb128)
    }
}

impl<S: Scheme> BatchCodec<S> {
    pub fn new(scheme: S) -> Self {
        Self {
            scheme,
            strategy: Strategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the exact length of the stream `pack(values)` would produce.
    pub fn packed_len(&self, values: &[u64]) -> usize {
        values.iter().map(|&v| self.scheme.encoded_size(v)).sum()
    }

    pub fn pack(&self, values: &[u64]) -> Vec<u8> {
        let mut out = Vec::new();
        self.pack_into(values, &mut out);
        out
    }

    /// Appends the packed encoding of `values` to `out`.
    pub fn pack_into(&self, values: &[u64], out: &mut Vec<u8>) {
        let len = self.packed_len(values);
        let start = out.len();
        out.resize(start + len, 0);
        let dst = &mut out[start..];
        let written = match self.strategy {
            Strategy::Direct => pack_with::<S, DirectWriter>(&self.scheme, values, dst),
            Strategy::Sliding => pack_with::<S, SlidingWriter>(&self.scheme, values, dst),
        };
        debug_assert_eq!(written, len);
        trace!(
            "packed {} values into {} bytes ({:?})",
            values.len(),
            len,
            self.strategy
        );
    }

    /// Counts the values in `stream` using only the length codes.
    pub fn count(&self, stream: &[u8]) -> usize {
        let n = match self.strategy {
            Strategy::Direct => count_with::<S, DirectReader>(&self.scheme, stream),
            Strategy::Sliding => count_with::<S, SlidingReader>(&self.scheme, stream),
        };
        trace!("counted {} values in {} bytes", n, stream.len());
        n
    }

    /// Decodes every value in `stream`.
    ///
    /// Bytes an item would read past the end of `stream` are treated as zero, and any input
    /// decodes to some sequence; validating the result is left to the caller.
    pub fn unpack(&self, stream: &[u8]) -> Vec<u64> {
        let mut out = Vec::new();
        self.unpack_into(stream, &mut out);
        out
    }

    /// Appends every value in `stream` to `out`.
    pub fn unpack_into(&self, stream: &[u8], out: &mut Vec<u64>) {
        let n = self.count(stream);
        out.reserve(n);
        let start = out.len();
        match self.strategy {
            Strategy::Direct => unpack_with::<S, DirectReader>(&self.scheme, stream, out),
            Strategy::Sliding => unpack_with::<S, SlidingReader>(&self.scheme, stream, out),
        }
        debug_assert_eq!(out.len() - start, n);
        trace!("unpacked {} values from {} bytes", n, stream.len());
    }
}

fn pack_with<'a, S, W>(scheme: &S, values: &[u64], dst: &'a mut [u8]) -> usize
where
    S: Scheme,
    W: WindowWriter<'a>,
{
    let mut writer = W::new(dst);
    let mut cursor = 0;
    for &v in values {
        let mut rest = v;
        loop {
            let r = scheme.encode(rest);
            let n = r.shamt.bytes();
            writer.put(cursor, r.word, n);
            cursor += n;
            if !r.shamt.is_continued() {
                break;
            }
            rest >>= 7 * n;
        }
    }
    writer.finish();
    cursor
}

fn count_with<'a, S, R>(scheme: &S, stream: &'a [u8]) -> usize
where
    S: Scheme,
    R: WindowReader<'a>,
{
    let mut reader = R::new(stream);
    let mut cursor = 0;
    let mut n = 0;
    while cursor < stream.len() {
        let shamt = scheme.decoded_size(reader.word_at(cursor));
        cursor += shamt.bytes();
        n += !shamt.is_continued() as usize;
    }
    n
}

fn unpack_with<'a, S, R>(scheme: &S, stream: &'a [u8], out: &mut Vec<u64>)
where
    S: Scheme,
    R: WindowReader<'a>,
{
    let mut reader = R::new(stream);
    let mut cursor = 0;
    let mut value = 0u64;
    let mut shift = 0u32;
    while cursor < stream.len() {
        let r = scheme.decode(reader.word_at(cursor));
        // Payload bits beyond 64 only occur in malformed chains and are dropped.
        value |= r.word.checked_shl(shift).unwrap_or(0);
        cursor += r.shamt.bytes();
        match r.shamt {
            Shamt::Consumed(_) => {
                out.push(value);
                value = 0;
                shift = 0;
            }
            Shamt::NeedsContinuation(n) => shift = shift.saturating_add(7 * u32::from(n)),
        }
    }
}
