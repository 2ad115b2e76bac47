use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use solomon_rs::Codec;

const PAYLOAD_SIZES: &[usize] = &[16, 128, 1024, 8192];
const NSYM: usize = 10;

fn make_payload(size: usize) -> Vec<u8> {
    (0..size).map(|i| ((i * 7 + 13) % 256) as u8).collect()
}

/// Corrupt up to nsym/2 positions per chunk so decode has real work to do.
fn corrupt(enc: &mut [u8], nsize: usize) {
    let mut state: u32 = 0x5eed;
    for (idx, chunk) in enc.chunks_mut(nsize).enumerate() {
        for e in 0..NSYM / 2 {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            let pos = (state >> 16) as usize % chunk.len();
            chunk[pos] ^= 0x40 | ((idx + e) as u8 & 0x3f) | 1;
        }
    }
}

fn bench_encode(c: &mut Criterion) {
    let rs = Codec::new(NSYM).unwrap();
    let mut group = c.benchmark_group("encode");
    for &size in PAYLOAD_SIZES {
        let payload = make_payload(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, payload| {
            b.iter(|| rs.encode(payload).unwrap());
        });
    }
    group.finish();
}

fn bench_decode_clean(c: &mut Criterion) {
    let rs = Codec::new(NSYM).unwrap();
    let mut group = c.benchmark_group("decode_clean");
    for &size in PAYLOAD_SIZES {
        let enc = rs.encode(&make_payload(size)).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &enc, |b, enc| {
            b.iter(|| rs.decode(enc).unwrap());
        });
    }
    group.finish();
}

fn bench_decode_corrupted(c: &mut Criterion) {
    let rs = Codec::new(NSYM).unwrap();
    let mut group = c.benchmark_group("decode_corrupted");
    for &size in PAYLOAD_SIZES {
        let mut enc = rs.encode(&make_payload(size)).unwrap();
        corrupt(&mut enc, rs.nsize());
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &enc, |b, enc| {
            b.iter(|| rs.decode(enc).unwrap());
        });
    }
    group.finish();
}

fn bench_table_construction(c: &mut Criterion) {
    c.bench_function("codec_construction_gf256", |b| {
        b.iter(|| Codec::new(NSYM).unwrap());
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode_clean,
    bench_decode_corrupted,
    bench_table_construction
);
criterion_main!(benches);
