#![no_main]

use libfuzzer_sys::fuzz_target;
use vlu::{read_varint, Vlu};

fuzz_target!(|data: &[u8]| {
    let mut src = data;
    while read_varint(&Vlu::default(), &mut src).is_ok() {}
});
