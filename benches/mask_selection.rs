use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rust_qr_encoder::ECLevel;
use rust_qr_encoder::EncodeOptions;
use rust_qr_encoder::encoder::mask::{evaluate_all, score};
use rust_qr_encoder::encoder::qr_encoder::Segmented;

fn unmasked_for(version: u8) -> rust_qr_encoder::encoder::qr_encoder::Unmasked {
    let options = EncodeOptions::new(ECLevel::M).with_min_version(version);
    Segmented::new(b"mask selection benchmark payload", &options)
        .and_then(|s| s.into_blocks())
        .map(|b| b.into_matrix())
        .expect("payload fits")
}

fn bench_mask_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask_candidates");
    for version in [1u8, 10, 25, 40] {
        let unmasked = unmasked_for(version);
        group.bench_with_input(
            BenchmarkId::new("sequential", version),
            &unmasked,
            |b, unmasked| b.iter(|| evaluate_all(black_box(unmasked.matrix()), ECLevel::M, false)),
        );
        group.bench_with_input(
            BenchmarkId::new("parallel", version),
            &unmasked,
            |b, unmasked| b.iter(|| evaluate_all(black_box(unmasked.matrix()), ECLevel::M, true)),
        );
    }
    group.finish();
}

fn bench_penalty_score(c: &mut Criterion) {
    let symbol = rust_qr_encoder::encode(
        &[b'x'; 1000],
        &EncodeOptions::new(ECLevel::L).with_parallel_masks(false),
    )
    .expect("payload fits");
    c.bench_function("penalty_score", |b| {
        b.iter(|| score(black_box(symbol.modules())))
    });
}

criterion_group!(benches, bench_mask_candidates, bench_penalty_score);
criterion_main!(benches);
