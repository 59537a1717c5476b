use alephium_codec::ByteStringCodec;
use criterion::{black_box, criterion_group, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn bench_bytestring(c: &mut Criterion) {
    let codec = ByteStringCodec::new();
    let mut sampler = StdRng::seed_from_u64(0);
    for len in [32usize, 1024, 64 * 1024] {
        let mut value = vec![0u8; len];
        sampler.fill(&mut value[..]);
        let encoded = codec.encode_bytes(&value).freeze();

        c.bench_function(&format!("{}/encode len={}", module_path!(), len), |b| {
            b.iter(|| black_box(codec.encode_bytes(&value)))
        });
        c.bench_function(&format!("{}/decode len={}", module_path!(), len), |b| {
            b.iter(|| black_box(codec.decode_bytes(encoded.clone()).unwrap()))
        });
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_bytestring
}
