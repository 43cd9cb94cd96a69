//! Traits that allow writing/reading chained varints on `bytes::{BufMut,Buf}`.

use crate::core::{read_chain, scan_slice};
use crate::{DecodeError, EncodedVarInt, Scheme, MAX_LEN};

use bytes::{Buf, BufMut};

/// Extension for `buf::BufMut` to write values in any [`Scheme`].
pub trait VarIntBufMut {
    fn put_varint<S: Scheme + ?Sized>(&mut self, scheme: &S, v: u64);
}

impl<Inner: BufMut> VarIntBufMut for Inner {
    /// Writes `v` to the buffer, continuation items included.
    #[inline]
    fn put_varint<S: Scheme + ?Sized>(&mut self, scheme: &S, v: u64) {
        let r = scheme.encode(v);
        if r.shamt.is_continued() {
            self.put_slice(EncodedVarInt::new(scheme, v).as_slice());
        } else {
            self.put_uint_le(r.word, r.shamt.bytes());
        }
    }
}

fn get_varint_slow<S, B>(scheme: &S, buf: &mut B) -> Result<u64, DecodeError>
where
    S: Scheme + ?Sized,
    B: Buf,
{
    read_chain(scheme, |dst: &mut [u8]| {
        if dst.len() > buf.remaining() {
            buf.advance(buf.remaining());
            Err(DecodeError::UnexpectedEob)
        } else {
            buf.copy_to_slice(dst);
            Ok(())
        }
    })
}

/// Extension for `buf::Buf` to read values in any [`Scheme`].
pub trait VarIntBuf {
    /// Reads a value from the buffer. After a successful read, the buffer will be advanced by
    /// the number of bytes read.
    ///
    /// # Examples
    ///
    /// ```
    /// use vlu::{Leb128, VarIntBuf, VarIntBufMut};
    ///
    /// let to_encode = [1, 2, 400, u64::MAX];
    /// let mut buf = vec![];
    /// for v in &to_encode {
    ///    buf.put_varint(&Leb128, *v);
    /// }
    ///
    /// let mut buf = &buf[..];
    /// for v in &to_encode {
    ///   let decoded = buf.get_varint(&Leb128).unwrap();
    ///   assert_eq!(decoded, *v);
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an `UnexpectedEob` error if the buffer is empty or if the buffer is not long
    /// enough to contain the full encoded value.
    ///
    /// Returns an `Overflow` error if a continuation chain carries more than 64 bits. The buffer
    /// is advanced past the item that overflowed.
    fn get_varint<S: Scheme + ?Sized>(&mut self, scheme: &S) -> Result<u64, DecodeError>;

    /// Returns an iterator over the values in the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use vlu::{VarIntBuf, VarIntBufMut, Vlu};
    ///
    /// let to_encode = [1u64, 2, 30, 24_000];
    /// let mut buf = vec![];
    /// for n in to_encode.iter() {
    ///     buf.put_varint(&Vlu::default(), *n);
    /// }
    /// let mut result = vec![];
    /// let mut decode_data = buf.as_slice();
    /// for decoded in decode_data.iter_varint(&Vlu::default()) {
    ///     result.push(decoded.unwrap());
    /// }
    /// assert_eq!(to_encode, result.as_slice());
    /// ```
    fn iter_varint<'a, S: Scheme>(&'a mut self, scheme: &'a S) -> VarIntIter<'a, Self, S>
    where
        Self: Sized,
    {
        VarIntIter::new(self, scheme)
    }
}

impl<Inner: Buf> VarIntBuf for Inner {
    #[inline]
    fn get_varint<S: Scheme + ?Sized>(&mut self, scheme: &S) -> Result<u64, DecodeError> {
        if self.remaining() == 0 {
            return Err(DecodeError::UnexpectedEob);
        }

        let chunk = self.chunk();
        if chunk.len() >= MAX_LEN {
            match scan_slice(scheme, chunk) {
                (Ok(v), len) => {
                    self.advance(len);
                    return Ok(v);
                }
                // An overlong chain may continue into the next chunk.
                (Err(DecodeError::UnexpectedEob), _) if chunk.len() < self.remaining() => {}
                (Err(e), len) => {
                    self.advance(len);
                    return Err(e);
                }
            }
        }

        get_varint_slow(scheme, self)
    }
}

/// An iterator over the values in a `Buf`.
pub struct VarIntIter<'a, B, S> {
    buf: &'a mut B,
    scheme: &'a S,
}

impl<'a, B, S> VarIntIter<'a, B, S> {
    /// Creates a new `VarIntIter`.
    pub fn new(buf: &'a mut B, scheme: &'a S) -> Self {
        Self { buf, scheme }
    }
}

impl<'a, B, S> Iterator for VarIntIter<'a, B, S>
where
    B: Buf,
    S: Scheme,
{
    type Item = Result<u64, DecodeError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.buf.has_remaining() {
            Some(self.buf.get_varint(self.scheme))
        } else {
            None
        }
    }
}
