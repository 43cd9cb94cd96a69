//! This crate implements variable length coding of `u64` values in two interchangeable schemes,
//! plus a batch codec that packs whole sequences into a single stream.
//!
//! VLU ("variable length unary") is a little-endian coding that prefixes the payload with a
//! unary length code in the least significant bits: `n - 1` one bits terminated by a zero bit
//! announce an `n`-byte item carrying `7 * n` payload bits. Decoding is a single count of the
//! low one bits followed by a shift and a mask, instead of the per-byte continuation checks that
//! [LEB128](https://en.wikipedia.org/wiki/LEB128) needs. Both schemes use exactly
//! `max(1, ceil(bits / 7))` bytes for any value.
//!
//! Scalar routines live in [`vlu`] and [`leb128`] and work on one 8-byte window. Values wider
//! than 56 bits are tagged [`Shamt::NeedsContinuation`] and continue in a following item; the
//! [`Scheme`] implementations [`Vlu`] and [`Leb128`] chain these automatically in
//! [`EncodedVarInt`], [`decode_slice`], the `bytes`/`std::io` extensions and [`BatchCodec`].
//!
//! ```
//! use bytes::Buf;
//! use vlu::{Shamt, Vlu, VarIntBuf, VarIntBufMut};
//!
//! let r = vlu::vlu::encode(0x0012_3456_789a_bcde);
//! assert_eq!(r.word, 0x1234_5678_9abc_de7f);
//! assert_eq!(r.shamt, Shamt::Consumed(8));
//! assert_eq!(vlu::vlu::decode(r.word).word, 0x0012_3456_789a_bcde);
//!
//! let scheme = Vlu::default();
//! let mut buf_mut = vec![];
//! for v in (0..100).step_by(3) {
//!   buf_mut.put_varint(&scheme, v);
//! }
//!
//! // NB: need a mutable slice to use as VarIntBuf
//! let mut buf = buf_mut.as_slice();
//! while let Ok(v) = buf.get_varint(&scheme) {
//!   assert_eq!(v % 3, 0);
//! }
//! assert!(!buf.has_remaining());
//! ```
pub mod batch;
pub mod bits;
mod bytes;
pub(crate) mod core;
mod io;
pub mod leb128;
pub mod vlu;
pub mod window;

pub use crate::batch::BatchCodec;
pub use crate::bytes::{VarIntBuf, VarIntBufMut, VarIntIter};
pub use crate::core::{
    decode_slice, CodecResult, DecodeError, EncodedVarInt, Leb128, Limit, Scheme, Shamt, Vlu,
};
pub use crate::io::{read_varint, read_varint_buf, write_varint};
pub use crate::window::Strategy;

/// Maximum number of bytes a single encoded `u64` will occupy, continuation items included.
pub const MAX_LEN: usize = 10;

/// Width in bytes of the window one item is encoded in.
pub const WINDOW: usize = 8;

/// Largest value that fits in a single item with the default limit.
pub const MAX_NATIVE: u64 = (1 << 56) - 1;
