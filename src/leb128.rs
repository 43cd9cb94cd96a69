//! Routines for working with raw (u64) LEB128 words.
//!
//! Each byte carries 7 payload bits, least significant group first, and sets its high bit when
//! another byte follows. One window holds at most 8 bytes (56 bits); a value that needs more
//! leaves the flag set on the eighth byte and is tagged [`Shamt::NeedsContinuation`], so a
//! chained encoding is byte-for-byte standard LEB128.

use crate::bits::{ctz, quanta};
use crate::{CodecResult, Shamt, WINDOW};

const CONTINUE: u64 = 0x80;
const GROUP: u64 = 0x7f;
const FLAGS: u64 = 0x8080_8080_8080_8080;

/// Return the number of bytes required to encode `v` in `[1, MAX_LEN]`, continuation included.
#[inline]
pub const fn encoded_size(v: u64) -> usize {
    quanta(v)
}

/// Encodes the low 56 bits of `v`, leaving the flag set on the eighth byte if more remain.
pub fn encode(v: u64) -> CodecResult {
    let mut rest = v;
    let mut word = 0u64;
    let mut i = 0;
    loop {
        let mut byte = rest & GROUP;
        rest >>= 7;
        if rest != 0 {
            byte |= CONTINUE;
        }
        word |= byte << (i * 8);
        i += 1;
        if rest == 0 || i == WINDOW {
            break;
        }
    }
    CodecResult::new(word, i, rest != 0)
}

/// Decodes the item at the bottom of `word`; bytes after the first clear flag are ignored.
pub fn decode(word: u64) -> CodecResult {
    let mut v = 0u64;
    for i in 0..WINDOW {
        let byte = (word >> (i * 8)) & 0xff;
        v |= (byte & GROUP) << (i * 7);
        if byte & CONTINUE == 0 {
            return CodecResult::new(v, i + 1, false);
        }
    }
    CodecResult::new(v, WINDOW, true)
}

/// Locates the first byte with a clear continuation flag.
#[inline]
pub fn decoded_size(word: u64) -> Shamt {
    let stops = !word & FLAGS;
    if stops == 0 {
        Shamt::NeedsContinuation(WINDOW as u8)
    } else {
        Shamt::Consumed((ctz(stops) / 8 + 1) as u8)
    }
}
