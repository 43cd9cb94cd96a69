//! Extensions to `std::io` traits to support reading/writing chained varints.
use std::io::{BufRead, Error, Read, Result, Write};

use crate::core::read_chain;
use crate::{decode_slice, DecodeError, EncodedVarInt, Scheme, MAX_LEN};

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::new(err.io_kind(), err)
    }
}

/// Encode `v` and write it to `w`. Returns the number of bytes written.
#[inline]
pub fn write_varint<S>(scheme: &S, v: u64, w: &mut impl Write) -> Result<usize>
where
    S: Scheme + ?Sized,
{
    let v = EncodedVarInt::new(scheme, v);
    w.write_all(v.as_slice())?;
    Ok(v.len())
}

/// Read and decode a value from `r`.
/// Prefer `read_varint_buf()` wherever possible as it should be more efficient.
#[inline]
pub fn read_varint<S: Scheme + ?Sized>(scheme: &S, r: &mut impl Read) -> Result<u64> {
    read_chain(scheme, |dst: &mut [u8]| r.read_exact(dst))
}

/// Read and decode a value from `r`.
#[inline]
pub fn read_varint_buf<S: Scheme + ?Sized>(scheme: &S, r: &mut impl BufRead) -> Result<u64> {
    let buf = r.fill_buf()?;
    if buf.len() >= MAX_LEN {
        if let Ok((v, len)) = decode_slice(scheme, buf) {
            r.consume(len);
            return Ok(v);
        }
    }
    read_varint(scheme, r)
}
