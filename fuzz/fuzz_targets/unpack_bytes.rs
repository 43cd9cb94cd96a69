#![no_main]

use libfuzzer_sys::fuzz_target;
use vlu::{BatchCodec, Strategy};

fuzz_target!(|data: &[u8]| {
    // Any input decodes; both strategies must find the same items.
    let direct = BatchCodec::vlu().with_strategy(Strategy::Direct);
    let sliding = BatchCodec::vlu().with_strategy(Strategy::Sliding);
    let values = direct.unpack(data);
    assert_eq!(values.len(), sliding.count(data));
    assert_eq!(values, sliding.unpack(data));

    let direct = BatchCodec::leb128().with_strategy(Strategy::Direct);
    let sliding = BatchCodec::leb128().with_strategy(Strategy::Sliding);
    assert_eq!(direct.unpack(data), sliding.unpack(data));
});
