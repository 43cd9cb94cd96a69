#![no_main]

use libfuzzer_sys::fuzz_target;
use vlu::{BatchCodec, Limit, Strategy, Vlu};

fuzz_target!(|data: &[u8]| {
    let Some((&limit, rest)) = data.split_first() else {
        return;
    };
    let limit = Limit::new(usize::from(limit % 8) + 1).unwrap();
    let values: Vec<u64> = rest
        .chunks_exact(8)
        .map(|chunk| {
            let mut buf = [0; 8];
            buf.copy_from_slice(chunk);
            u64::from_le_bytes(buf)
        })
        .collect();

    let direct = BatchCodec::new(Vlu::new(limit)).with_strategy(Strategy::Direct);
    let sliding = BatchCodec::new(Vlu::new(limit)).with_strategy(Strategy::Sliding);
    let stream = direct.pack(&values);
    assert_eq!(stream, sliding.pack(&values));
    assert_eq!(direct.unpack(&stream), values);
    assert_eq!(sliding.unpack(&stream), values);
});
