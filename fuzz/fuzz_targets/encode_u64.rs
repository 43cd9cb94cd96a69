#![no_main]

use libfuzzer_sys::fuzz_target;
use vlu::{Leb128, VarIntBuf, VarIntBufMut, Vlu};

fuzz_target!(|data: &[u8]| {
    let values: Vec<u64> = data
        .chunks_exact(8)
        .map(|chunk| {
            let mut buf = [0; 8];
            buf.copy_from_slice(chunk);
            u64::from_le_bytes(buf)
        })
        .collect();

    let mut vlu = vec![];
    let mut leb = vec![];
    for v in values.iter().copied() {
        vlu.put_varint(&Vlu::default(), v);
        leb.put_varint(&Leb128, v);
    }
    // Both schemes spend the same number of bytes on every value.
    assert_eq!(vlu.len(), leb.len());

    let (mut vlu_src, mut leb_src) = (&vlu[..], &leb[..]);
    for v in values {
        assert_eq!(vlu_src.get_varint(&Vlu::default()).unwrap(), v);
        assert_eq!(leb_src.get_varint(&Leb128).unwrap(), v);
    }
});
