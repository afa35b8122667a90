use std::io::Write;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use flate2::write::DeflateEncoder;
use flate2::Compression;

/// A few kilobytes of repetitive text, generated in-process rather than
/// read from a fixture file, then compressed to a raw DEFLATE stream.
fn sample_compressed() -> (Vec<u8>, usize)
{
    const PARAGRAPH: &[u8] = include_bytes!("../SPEC_FULL.md");

    let mut original = Vec::new();
    for _ in 0..20
    {
        original.extend_from_slice(PARAGRAPH);
    }

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&original).unwrap();
    let compressed = encoder.finish().unwrap();

    (compressed, original.len())
}

fn decode_with_flate2(bytes: &[u8]) -> Vec<u8>
{
    use std::io::Read;

    let mut out = Vec::new();
    flate2::read::DeflateDecoder::new(bytes)
        .read_to_end(&mut out)
        .unwrap();
    out
}

fn decode_with_deflate_core(bytes: &[u8]) -> Vec<u8>
{
    deflate_core::inflate(bytes).unwrap()
}

fn decode_benchmark(c: &mut Criterion)
{
    let (compressed, original_len) = sample_compressed();

    let mut group = c.benchmark_group("DEFLATE decoding");
    group.throughput(Throughput::Bytes(original_len as u64));

    group.bench_function("flate2", |b| {
        b.iter(|| black_box(decode_with_flate2(compressed.as_slice())))
    });

    group.bench_function("deflate-core", |b| {
        b.iter(|| black_box(decode_with_deflate_core(compressed.as_slice())))
    });
}

criterion_group!(name = benches;
    config = {
        let c = Criterion::default();
        c.measurement_time(Duration::from_secs(10))
    };
    targets = decode_benchmark);

criterion_main!(benches);
