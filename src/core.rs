use crate::{leb128, vlu, window, MAX_LEN, WINDOW};

/// Errors that may occur when decoding a value from a checked source (slice, `Buf` or reader).
///
/// The batch codec never returns these: it treats missing bytes as zero and accepts any input.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// Reached end-of-buffer unexpectedly.
    ///
    /// This may happen if you attempt to decode an empty buffer or if the buffer is too short to
    /// contain the item (or continuation chain) announced by the length code.
    #[error("unexpected end of buffer")]
    UnexpectedEob,
    /// A continuation chain carries more than 64 bits of payload.
    #[error("encoded value does not fit in 64 bits")]
    Overflow,
}

impl DecodeError {
    /// The `std::io` error kind a reader reports for this error.
    pub const fn io_kind(self) -> std::io::ErrorKind {
        match self {
            DecodeError::UnexpectedEob => std::io::ErrorKind::UnexpectedEof,
            DecodeError::Overflow => std::io::ErrorKind::InvalidData,
        }
    }
}

/// Number of bytes an item's length code indicates, tagged with whether the value continues in
/// the next item.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Shamt {
    /// The item is complete and occupies this many bytes, in `[1, 8]`.
    Consumed(u8),
    /// The value did not fit: this many bytes (the full window) were used and the remaining high
    /// bits follow in the next item.
    NeedsContinuation(u8),
}

impl Shamt {
    /// Number of bytes occupied by the item, regardless of tag.
    #[inline(always)]
    pub const fn bytes(self) -> usize {
        match self {
            Shamt::Consumed(n) | Shamt::NeedsContinuation(n) => n as usize,
        }
    }

    #[inline(always)]
    pub const fn is_continued(self) -> bool {
        matches!(self, Shamt::NeedsContinuation(_))
    }
}

/// Output of a scalar encode or decode: the encoded word (or decoded payload) and its length.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CodecResult {
    pub word: u64,
    pub shamt: Shamt,
}

impl CodecResult {
    #[inline(always)]
    pub(crate) fn new(word: u64, bytes: usize, continued: bool) -> Self {
        debug_assert!((1..=WINDOW).contains(&bytes), "bad shamt: {}", bytes);
        let n = bytes as u8;
        let shamt = if continued {
            Shamt::NeedsContinuation(n)
        } else {
            Shamt::Consumed(n)
        };
        Self { word, shamt }
    }
}

/// Maximum number of bytes a VLU item may occupy before it must continue, in `[1, 8]`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Limit(u8);

impl Limit {
    /// A full 8-byte window, which covers 56 payload bits.
    pub const DEFAULT: Limit = Limit(WINDOW as u8);

    /// Returns `None` unless `bytes` is in `[1, 8]`.
    pub const fn new(bytes: usize) -> Option<Self> {
        if bytes >= 1 && bytes <= WINDOW {
            Some(Limit(bytes as u8))
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A variable length coding scheme operating on one little-endian 8-byte window at a time.
///
/// Implementations must agree with [`crate::bits::quanta`] on the total number of bytes a value
/// needs once continuation items are included.
pub trait Scheme {
    /// Encodes the low bits of `v` that fit in one window.
    fn encode(&self, v: u64) -> CodecResult;

    /// Decodes the item at the bottom of `word`. Bytes above the item are ignored.
    fn decode(&self, word: u64) -> CodecResult;

    /// Returns the length of the item at the bottom of `word` without decoding the payload.
    fn decoded_size(&self, word: u64) -> Shamt;

    /// Returns the total number of bytes required to encode `v`, continuation items included.
    #[inline]
    fn encoded_size(&self, v: u64) -> usize {
        crate::bits::quanta(v)
    }
}

/// The unary-prefix VLU scheme with a configurable continuation limit.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Vlu {
    limit: Limit,
}

impl Vlu {
    pub const fn new(limit: Limit) -> Self {
        Self { limit }
    }

    pub const fn limit(&self) -> Limit {
        self.limit
    }
}

impl Scheme for Vlu {
    #[inline(always)]
    fn encode(&self, v: u64) -> CodecResult {
        vlu::encode_with_limit(v, self.limit)
    }

    #[inline(always)]
    fn decode(&self, word: u64) -> CodecResult {
        vlu::decode_with_limit(word, self.limit)
    }

    #[inline(always)]
    fn decoded_size(&self, word: u64) -> Shamt {
        vlu::decoded_size_with_limit(word, self.limit)
    }
}

/// Standard LEB128 limited to one 8-byte window per item.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Leb128;

impl Scheme for Leb128 {
    #[inline(always)]
    fn encode(&self, v: u64) -> CodecResult {
        leb128::encode(v)
    }

    #[inline(always)]
    fn decode(&self, word: u64) -> CodecResult {
        leb128::decode(word)
    }

    #[inline(always)]
    fn decoded_size(&self, word: u64) -> Shamt {
        leb128::decoded_size(word)
    }
}

/// A single value encoded with [`EncodedVarInt::new`], continuation items included.
pub struct EncodedVarInt {
    buf: [u8; MAX_LEN],
    len: u8,
}

#[allow(clippy::len_without_is_empty)]
impl EncodedVarInt {
    /// Encodes any `u64`, chaining continuation items when the value exceeds one window.
    pub fn new<S: Scheme + ?Sized>(scheme: &S, mut v: u64) -> Self {
        let mut enc = Self::default();
        let mut len = 0;
        loop {
            let r = scheme.encode(v);
            let n = r.shamt.bytes();
            enc.buf[len..len + n].copy_from_slice(&r.word.to_le_bytes()[..n]);
            len += n;
            if !r.shamt.is_continued() {
                break;
            }
            v >>= 7 * n;
        }
        enc.len = len as u8;
        enc
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len()]
    }

    /// Returns the number of bytes used to encode the value.
    pub fn len(&self) -> usize {
        self.len as usize
    }
}

impl Default for EncodedVarInt {
    fn default() -> Self {
        Self {
            buf: [0u8; MAX_LEN],
            len: 0,
        }
    }
}

/// Accumulates the payloads of a continuation chain, rejecting chains wider than 64 bits.
#[derive(Default)]
pub(crate) struct Chain {
    value: u64,
    shift: u32,
}

impl Chain {
    /// Adds one decoded item. Returns the complete value once a terminal item arrives.
    #[inline]
    pub(crate) fn push(&mut self, r: CodecResult) -> Result<Option<u64>, DecodeError> {
        if self.shift > 0 && r.word >> (64 - self.shift) != 0 {
            return Err(DecodeError::Overflow);
        }
        self.value |= r.word << self.shift;
        match r.shamt {
            Shamt::Consumed(_) => Ok(Some(self.value)),
            Shamt::NeedsContinuation(n) => {
                self.shift += 7 * u32::from(n);
                if self.shift >= 64 {
                    Err(DecodeError::Overflow)
                } else {
                    Ok(None)
                }
            }
        }
    }
}

/// Decodes one value from the start of `buf`, returning it and the number of bytes consumed.
///
/// Unlike the batch codec this never pads: an item that extends past the end of `buf` is an
/// `UnexpectedEob` error.
#[inline]
pub fn decode_slice<S: Scheme + ?Sized>(
    scheme: &S,
    buf: &[u8],
) -> Result<(u64, usize), DecodeError> {
    let (r, pos) = scan_slice(scheme, buf);
    r.map(|v| (v, pos))
}

/// Like [`decode_slice`], but also reports how far the chain reached when decoding fails.
///
/// On `Overflow` the position is the end of the item that overflowed.
#[inline]
pub(crate) fn scan_slice<S: Scheme + ?Sized>(
    scheme: &S,
    buf: &[u8],
) -> (Result<u64, DecodeError>, usize) {
    let mut chain = Chain::default();
    let mut pos = 0;
    loop {
        if pos >= buf.len() {
            return (Err(DecodeError::UnexpectedEob), pos);
        }
        let r = scheme.decode(window::read_le(buf, pos));
        pos += r.shamt.bytes();
        if pos > buf.len() {
            return (Err(DecodeError::UnexpectedEob), buf.len());
        }
        match chain.push(r) {
            Ok(Some(v)) => return (Ok(v), pos),
            Ok(None) => {}
            Err(e) => return (Err(e), pos),
        }
    }
}

/// Reads a single item by asking `fill` for exactly the bytes its length code announces.
///
/// `fill` is called with successive, non-overlapping sub-slices of the item. VLU items are
/// sized from the first byte; LEB128 items grow one byte at a time until the flag clears.
pub(crate) fn read_item<S, E, F>(scheme: &S, fill: &mut F) -> Result<CodecResult, E>
where
    S: Scheme + ?Sized,
    F: FnMut(&mut [u8]) -> Result<(), E>,
{
    let mut bytes = [0u8; WINDOW];
    let mut have = 0;
    let mut want = 1;
    while have < want {
        fill(&mut bytes[have..want])?;
        have = want;
        want = scheme.decoded_size(u64::from_le_bytes(bytes)).bytes();
    }
    Ok(scheme.decode(u64::from_le_bytes(bytes)))
}

/// Reads a full continuation chain through `fill`.
pub(crate) fn read_chain<S, E, F>(scheme: &S, mut fill: F) -> Result<u64, E>
where
    S: Scheme + ?Sized,
    E: From<DecodeError>,
    F: FnMut(&mut [u8]) -> Result<(), E>,
{
    let mut chain = Chain::default();
    loop {
        let r = read_item(scheme, &mut fill)?;
        if let Some(v) = chain.push(r)? {
            return Ok(v);
        }
    }
}
