use criterion::{black_box, criterion_group, criterion_main, Criterion};
use limelock::{fingerprint, Fingerprint};

fn fingerprint_small(c: &mut Criterion) {
    let data = b"hello world".to_vec();
    c.bench_function("fingerprint_small", move |b| {
        b.iter(|| Fingerprint::from_bytes(black_box(&data)))
    });
}

fn fingerprint_big_data(c: &mut Criterion) {
    let data = vec![1; 1024 * 1024 * 5];
    c.bench_function("fingerprint_big_data", move |b| {
        b.iter(|| Fingerprint::from_bytes(black_box(&data)))
    });
}

fn fingerprint_reader(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let data = vec![1; 1024 * 1024 * 5];
    c.bench_function("fingerprint_reader", move |b| {
        b.iter(|| {
            rt.block_on(fingerprint::from_reader(black_box(&data[..])))
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    fingerprint_small,
    fingerprint_big_data,
    fingerprint_reader,
);
criterion_main!(benches);
