#![no_main]

use libfuzzer_sys::fuzz_target;
use vlu::{Leb128, VarIntBuf, Vlu};

fuzz_target!(|data: &[u8]| {
    // attempts to decode all the data as a u64 error are ok, panics are not
    let mut src = data;
    while !src.is_empty() {
        if src.get_varint(&Vlu::default()).is_err() {
            break;
        }
    }
    let mut src = data;
    while !src.is_empty() {
        if src.get_varint(&Leb128).is_err() {
            break;
        }
    }
});
