use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rounded_qr::encoder::encode_bytes;
use rounded_qr::path::{DisplayList, synthesize};
use rounded_qr::{ECLevel, Size, trace_bytes};

fn bench_encode_small(c: &mut Criterion) {
    let data = b"https://example.com/r/1234567890";
    c.bench_function("encode_32b_medium", |b| {
        b.iter(|| encode_bytes(black_box(data), black_box(ECLevel::M)))
    });
}

fn bench_encode_large(c: &mut Criterion) {
    let data: Vec<u8> = (0..2000u32).map(|i| (i % 251) as u8).collect();
    c.bench_function("encode_2000b_low", |b| {
        b.iter(|| encode_bytes(black_box(&data), black_box(ECLevel::L)))
    });
}

fn bench_encode_high_level(c: &mut Criterion) {
    let data: Vec<u8> = (0..500u32).map(|i| (i % 251) as u8).collect();
    c.bench_function("encode_500b_high", |b| {
        b.iter(|| encode_bytes(black_box(&data), black_box(ECLevel::H)))
    });
}

fn bench_synthesize_v1(c: &mut Criterion) {
    let symbol = encode_bytes(b"v1", ECLevel::M).unwrap();
    c.bench_function("synthesize_v1_21x21", |b| {
        b.iter(|| {
            let mut list = DisplayList::new();
            synthesize(
                black_box(symbol.matrix()),
                black_box(Size::new(256.0, 256.0)),
                &mut list,
            );
            list
        })
    });
}

fn bench_synthesize_v10(c: &mut Criterion) {
    let data = vec![0x5Au8; 200];
    let symbol = encode_bytes(&data, ECLevel::M).unwrap();
    c.bench_function("synthesize_v10_57x57", |b| {
        b.iter(|| {
            let mut list = DisplayList::new();
            synthesize(
                black_box(symbol.matrix()),
                black_box(Size::new(512.0, 512.0)),
                &mut list,
            );
            list
        })
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let data = b"full pipeline: encode, trace, record";
    c.bench_function("trace_bytes_end_to_end", |b| {
        b.iter(|| {
            trace_bytes(
                black_box(data),
                black_box(ECLevel::Q),
                black_box(Size::new(256.0, 256.0)),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_encode_small,
    bench_encode_large,
    bench_encode_high_level,
    bench_synthesize_v1,
    bench_synthesize_v10,
    bench_full_pipeline
);
criterion_main!(benches);
