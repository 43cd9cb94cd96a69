//! Little-endian 8-byte windows over a byte stream at arbitrary offsets.
//!
//! Two strategies produce identical results:
//!
//! * [`Strategy::Direct`] reads or writes the eight bytes at the cursor directly.
//! * [`Strategy::Sliding`] only ever touches aligned 8-byte blocks. It keeps the two blocks
//!   around the cursor in `lo`/`hi` and composes the unaligned view with shifts, sliding the
//!   pair forward as the cursor crosses a block boundary.
//!
//! Both treat bytes past the end of the stream as zero and never write past it.

use crate::WINDOW;

/// How the batch codec moves its window through a stream.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Read/write the window at the cursor.
    Direct,
    /// Compose the window from two aligned blocks.
    #[default]
    Sliding,
}

/// Reads up to 8 bytes at `offset` as a little-endian word. Missing bytes read as zero.
#[inline]
pub fn read_le(buf: &[u8], offset: usize) -> u64 {
    if let Some(bytes) = buf.get(offset..).and_then(<[u8]>::first_chunk::<WINDOW>) {
        return u64::from_le_bytes(*bytes);
    }
    let mut bytes = [0u8; WINDOW];
    if offset < buf.len() {
        let tail = &buf[offset..];
        bytes[..tail.len()].copy_from_slice(tail);
    }
    u64::from_le_bytes(bytes)
}

/// Writes the low `n` bytes of `word` at `offset`, dropping any that fall past the end of `buf`.
#[inline]
pub fn write_le(buf: &mut [u8], offset: usize, word: u64, n: usize) {
    let end = (offset + n).min(buf.len());
    if offset < end {
        buf[offset..end].copy_from_slice(&word.to_le_bytes()[..end - offset]);
    }
}

#[inline(always)]
fn read_block(buf: &[u8], block: usize) -> u64 {
    read_le(buf, block * WINDOW)
}

#[inline(always)]
fn write_block(buf: &mut [u8], block: usize, word: u64) {
    write_le(buf, block * WINDOW, word, WINDOW)
}

/// Bit offset of `offset` within its aligned block.
#[inline(always)]
fn sub_word_shift(offset: usize) -> u32 {
    ((offset % WINDOW) * 8) as u32
}

pub(crate) trait WindowReader<'a> {
    fn new(buf: &'a [u8]) -> Self;

    /// Returns the 8 bytes starting at `offset`. Offsets must not decrease between calls.
    fn word_at(&mut self, offset: usize) -> u64;
}

pub(crate) trait WindowWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self;

    /// Stores the low `n` bytes of `word` at `offset`. `word` must be zero above those bytes and
    /// offsets must not decrease between calls.
    fn put(&mut self, offset: usize, word: u64, n: usize);

    fn finish(self);
}

pub(crate) struct DirectReader<'a> {
    buf: &'a [u8],
}

impl<'a> WindowReader<'a> for DirectReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    #[inline(always)]
    fn word_at(&mut self, offset: usize) -> u64 {
        read_le(self.buf, offset)
    }
}

pub(crate) struct DirectWriter<'a> {
    buf: &'a mut [u8],
}

impl<'a> WindowWriter<'a> for DirectWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf }
    }

    #[inline(always)]
    fn put(&mut self, offset: usize, word: u64, n: usize) {
        debug_assert!(n == WINDOW || word >> (n * 8) == 0, "dirty word: {:#x}", word);
        match self.buf.get_mut(offset..offset + WINDOW) {
            // The bytes above the item are zero and nothing has been written there yet.
            Some(dst) => dst.copy_from_slice(&word.to_le_bytes()),
            None => write_le(self.buf, offset, word, n),
        }
    }

    fn finish(self) {}
}

pub(crate) struct SlidingReader<'a> {
    buf: &'a [u8],
    block: usize,
    lo: u64,
    hi: u64,
}

impl<'a> WindowReader<'a> for SlidingReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            block: 0,
            lo: read_block(buf, 0),
            hi: read_block(buf, 1),
        }
    }

    #[inline(always)]
    fn word_at(&mut self, offset: usize) -> u64 {
        let block = offset / WINDOW;
        if block != self.block {
            debug_assert!(block > self.block);
            if block == self.block + 1 {
                self.lo = self.hi;
            } else {
                self.lo = read_block(self.buf, block);
            }
            self.hi = read_block(self.buf, block + 1);
            self.block = block;
        }
        let s = sub_word_shift(offset);
        // (hi << 1) << (63 - s) is hi << (64 - s) without overflowing the shift when s == 0.
        (self.lo >> s) | ((self.hi << 1) << (63 - s))
    }
}

pub(crate) struct SlidingWriter<'a> {
    buf: &'a mut [u8],
    block: usize,
    lo: u64,
    hi: u64,
}

impl<'a> WindowWriter<'a> for SlidingWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            block: 0,
            lo: 0,
            hi: 0,
        }
    }

    #[inline(always)]
    fn put(&mut self, offset: usize, word: u64, n: usize) {
        debug_assert!(n == WINDOW || word >> (n * 8) == 0, "dirty word: {:#x}", word);
        let block = offset / WINDOW;
        if block != self.block {
            debug_assert!(block > self.block);
            write_block(self.buf, self.block, self.lo);
            if block == self.block + 1 {
                self.lo = self.hi;
            } else {
                write_block(self.buf, self.block + 1, self.hi);
                self.lo = 0;
            }
            self.hi = 0;
            self.block = block;
        }
        let s = sub_word_shift(offset);
        self.lo |= word << s;
        self.hi |= (word >> 1) >> (63 - s);
    }

    fn finish(self) {
        write_block(self.buf, self.block, self.lo);
        write_block(self.buf, self.block + 1, self.hi);
    }
}
