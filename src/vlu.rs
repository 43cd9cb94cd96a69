//! Routines for working with raw (u64) VLU words.
//!
//! An item is a little-endian word whose low bits hold a unary length code: `shamt - 1` one bits
//! terminated by a zero bit, followed by `7 * shamt` payload bits.
//!
//! ```text
//!   |  byte-8  |  byte-7  |          |  byte-2  |  byte-1  |
//!   |----------|----------|----------|----------|----------|
//!   |          |          |          |          | nnnnnnn0 |
//!   |          |          |          | nnnnnnnn | nnnnnn01 |
//!   |          | nnnnnnnn | ........ | nnnnnnnn | n0111111 |
//!   | nnnnnnnn | nnnnnnnn | ........ | nnnnnnnn | 01111111 |
//!   | nnnnnnnn | nnnnnnnn | ........ | nnnnnnnn | 11111111 |  continuation
//! ```
//!
//! Decoding needs one count of the low one bits, a shift and a mask, with no per-byte branches.
//! Values wider than the limit (56 bits by default) fill the whole window, set the marker bit
//! and return [`Shamt::NeedsContinuation`]; the remaining high bits go in the following item.

use crate::bits::{byte_mask, ctz, payload_mask, quanta};
use crate::{CodecResult, Limit, Shamt, MAX_NATIVE, WINDOW};

/// Return the number of bytes required to encode `v` in `[1, MAX_LEN]`, continuation included.
#[inline]
pub const fn encoded_size(v: u64) -> usize {
    quanta(v)
}

/// Encodes `v` into a single window, continuing past `limit` bytes.
#[inline]
pub fn encode_with_limit(v: u64, limit: Limit) -> CodecResult {
    let limit = limit.get();
    let q = quanta(v);
    let cont = q > limit;
    let shamt = if cont { limit } else { q };
    let marker = (cont as u64) << (shamt - 1);
    let word = ((v << shamt) | ((1u64 << (shamt - 1)) - 1) | marker) & byte_mask(shamt);
    CodecResult::new(word, shamt, cont)
}

/// Counts the unary length code at the bottom of `word`.
#[inline(always)]
fn length_code(word: u64, limit: usize) -> (usize, bool) {
    let ones = ctz(!word) as usize;
    let cont = ones >= limit;
    let shamt = if cont { limit } else { ones + 1 };
    (shamt, cont)
}

/// Decodes the item at the bottom of `word`; bits above the item's own width are masked off.
#[inline]
pub fn decode_with_limit(word: u64, limit: Limit) -> CodecResult {
    let (shamt, cont) = length_code(word, limit.get());
    CodecResult::new((word >> shamt) & payload_mask(shamt), shamt, cont)
}

/// Returns the length of the item at the bottom of `word` under `limit`, without decoding it.
#[inline]
pub fn decoded_size_with_limit(word: u64, limit: Limit) -> Shamt {
    match length_code(word, limit.get()) {
        (n, false) => Shamt::Consumed(n as u8),
        (n, true) => Shamt::NeedsContinuation(n as u8),
    }
}

/// Encodes `v` with the default 8-byte limit.
#[inline]
pub fn encode(v: u64) -> CodecResult {
    encode_with_limit(v, Limit::DEFAULT)
}

/// Decodes `word` with the default 8-byte limit.
#[inline]
pub fn decode(word: u64) -> CodecResult {
    decode_with_limit(word, Limit::DEFAULT)
}

/// Returns the length of the item at the bottom of `word` with the default 8-byte limit.
#[inline]
pub fn decoded_size(word: u64) -> Shamt {
    decoded_size_with_limit(word, Limit::DEFAULT)
}

/// Encodes a value known to be at most [`MAX_NATIVE`], returning the word and its byte length.
#[inline]
pub fn encode_56(v: u64) -> (u64, usize) {
    debug_assert!(v <= MAX_NATIVE, "value out of range: {:#x}", v);
    let shamt = quanta(v);
    ((v << shamt) | ((1u64 << (shamt - 1)) - 1), shamt)
}

/// Decodes a word known not to carry a continuation marker.
#[inline]
pub fn decode_56(word: u64) -> (u64, usize) {
    let shamt = ctz(!word) as usize + 1;
    debug_assert!(shamt <= WINDOW, "continuation word: {:#x}", word);
    ((word >> shamt) & payload_mask(shamt), shamt)
}
