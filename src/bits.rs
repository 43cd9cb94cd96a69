//! Bit counting primitives shared by both codecs.
//!
//! `clz` and `ctz` lower to the target's count instructions by default. Building with the
//! `portable-bits` feature routes them through [`portable`] instead, which produces identical
//! results without relying on intrinsics. Both return 64 for a zero input.

#[cfg(not(feature = "portable-bits"))]
#[inline(always)]
pub const fn clz(v: u64) -> u32 {
    v.leading_zeros()
}

#[cfg(not(feature = "portable-bits"))]
#[inline(always)]
pub const fn ctz(v: u64) -> u32 {
    v.trailing_zeros()
}

#[cfg(feature = "portable-bits")]
pub use portable::{clz, ctz};

/// Reference implementations that avoid data dependent branches.
pub mod portable {
    /// Count leading zero bits by halving the search window.
    pub const fn clz(v: u64) -> u32 {
        let mut x = v;
        let mut n = 64u32;
        let mut shift = 32u32;
        while shift > 0 {
            let y = x >> shift;
            let nz = (y != 0) as u32;
            let keep = (nz as u64).wrapping_neg();
            n -= nz * shift;
            x = (y & keep) | (x & !keep);
            shift >>= 1;
        }
        // x is now 0 or 1.
        n - x as u32
    }

    /// Count trailing zero bits as the bit length of the mask below the lowest set bit.
    pub const fn ctz(v: u64) -> u32 {
        64 - clz(!v & v.wrapping_sub(1))
    }
}

const fn quanta_slow(v: u64) -> usize {
    // ceil(bits / 7) with bits = 64 - clz; only evaluated at compile time.
    (70 - (v | 1).leading_zeros() as usize) / 7
}

const fn compute_quanta_table() -> [u8; 64] {
    let mut tbl = [0u8; 64];
    let mut i = 0;
    while i < tbl.len() {
        let v = 1u64 << i;
        tbl[v.leading_zeros() as usize] = quanta_slow(v) as u8;
        i += 1;
    }
    tbl
}

const QUANTA_TABLE: [u8; 64] = compute_quanta_table();

/// Returns the number of 7-bit quanta needed to hold `v`, i.e. `max(1, ceil(bits(v) / 7))`.
///
/// This is the encoded byte length of `v` in both VLU and LEB128 and ranges over `[1, MAX_LEN]`.
#[inline]
pub const fn quanta(v: u64) -> usize {
    QUANTA_TABLE[clz(v | 1) as usize] as usize
}

/// Mask selecting the low `n` 7-bit quanta of a payload. `n` must be in `[1, 8]`.
#[inline(always)]
pub(crate) const fn payload_mask(n: usize) -> u64 {
    !(u64::MAX << (n * 7))
}

/// Mask selecting the low `n` bytes of a word. `n` must be in `[1, 8]`.
#[inline(always)]
pub(crate) const fn byte_mask(n: usize) -> u64 {
    u64::MAX >> (64 - n * 8)
}
