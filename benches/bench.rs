use std::ops::RangeInclusive;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::distributions::{Uniform, WeightedIndex};
use rand::prelude::*;
use vlu::{leb128, vlu as uvlu, BatchCodec, Leb128, Scheme, Strategy, Vlu};

// Uniform weights: equal probability of a value of each length.
const UNIFORM_WEIGHTS: [usize; 8] = [1, 1, 1, 1, 1, 1, 1, 1];
// Zipf-like weights: decreasing but non-zero probability for larger values.
const ZIPF_WEIGHTS: [usize; 8] = [7560, 3780, 2520, 1890, 1512, 1260, 1080, 945];
// Empirically we need this length to get at least one element of every size when max_bytes=8.
const ARRAY_LEN: usize = 1024;

fn range_for_byte_size(nbytes: usize) -> RangeInclusive<u64> {
    let min = if nbytes == 1 {
        0
    } else {
        1 << ((nbytes - 1) * 7)
    };
    let max = u64::MAX >> (64 - (7 * nbytes));
    min..=max
}

// Generate an array of len with values no larger than max_bytes with the given length weights.
fn generate_array(len: usize, max_bytes: usize, weights: &[usize; 8]) -> Vec<u64> {
    let mut len_rng = StdRng::from_seed([0xabu8; 32]);
    let len_dist = WeightedIndex::new(&weights[..max_bytes]).unwrap();
    let mut value_rng = StdRng::from_seed([0xcdu8; 32]);
    len_dist
        .sample_iter(&mut len_rng)
        .take(len)
        .map(|n| Uniform::from(range_for_byte_size(n + 1)).sample(&mut value_rng))
        .collect()
}

fn bench_batch<S: Scheme + Copy>(
    g: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    name: &str,
    scheme: S,
    input: &[u64],
) {
    for strategy in [Strategy::Direct, Strategy::Sliding] {
        let codec = BatchCodec::new(scheme).with_strategy(strategy);
        let mut stream = Vec::with_capacity(codec.packed_len(input));
        g.bench_with_input(format!("{}/pack/{:?}", name, strategy), input, |b, iv| {
            b.iter(|| {
                stream.clear();
                codec.pack_into(iv, &mut stream);
                assert!(!stream.is_empty());
            })
        });

        let encoded = codec.pack(input);
        let mut output = Vec::with_capacity(input.len());
        g.bench_with_input(
            format!("{}/unpack/{:?}", name, strategy),
            encoded.as_slice(),
            |b, e| {
                b.iter(|| {
                    output.clear();
                    codec.unpack_into(e, &mut output);
                    assert_eq!(output.len(), ARRAY_LEN);
                })
            },
        );
    }
}

fn benchmark(c: &mut Criterion) {
    for (name, weights) in [("uniform", &UNIFORM_WEIGHTS), ("zipf", &ZIPF_WEIGHTS)] {
        let mut g = c.benchmark_group(name);
        g.throughput(Throughput::Elements(ARRAY_LEN as u64));
        for max_bytes in 1..=8 {
            let input_value = generate_array(ARRAY_LEN, max_bytes, weights);

            let vlu_words: Vec<u64> = input_value.iter().map(|&v| uvlu::encode(v).word).collect();
            g.bench_with_input(
                format!("max_bytes{}/decode_vlu", max_bytes),
                vlu_words.as_slice(),
                |b, words| b.iter(|| words.iter().fold(0, |acc, &w| acc ^ uvlu::decode(w).word)),
            );

            let leb_words: Vec<u64> = input_value
                .iter()
                .map(|&v| leb128::encode(v).word)
                .collect();
            g.bench_with_input(
                format!("max_bytes{}/decode_leb128", max_bytes),
                leb_words.as_slice(),
                |b, words| b.iter(|| words.iter().fold(0, |acc, &w| acc ^ leb128::decode(w).word)),
            );

            bench_batch(
                &mut g,
                &format!("max_bytes{}/vlu", max_bytes),
                Vlu::default(),
                &input_value,
            );
            bench_batch(
                &mut g,
                &format!("max_bytes{}/leb128", max_bytes),
                Leb128,
                &input_value,
            );
        }
    }
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
