use arith_codec::{Decoder, Encoder};
use bitstream_io::{BigEndian, BitReader, BitWrite, BitWriter};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fenwick_model::simple::FenwickModel;

/// Deterministic, mildly compressible input: a 64-symbol alphabet out of
/// the model's 256.
fn synthetic_bytes(len: usize) -> Vec<u8> {
    let mut state = 0x9E37_79B9u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 26) as u8
        })
        .collect()
}

fn round_trip(input: &[u8]) {
    let model = FenwickModel::builder(256, 1 << 20).build();
    let symbols: Vec<usize> = input.iter().copied().map(usize::from).collect();

    let mut bitwriter = BitWriter::endian(Vec::new(), BigEndian);
    let mut encoder = Encoder::new(model.clone());
    encoder.encode_all(symbols.clone(), &mut bitwriter).unwrap();
    bitwriter.byte_align().unwrap();
    let buffer = bitwriter.into_writer();

    let mut bitreader = BitReader::endian(buffer.as_slice(), BigEndian);
    let mut decoder = Decoder::new(model);
    let output: Vec<usize> = decoder
        .decode_all(&mut bitreader)
        .map(Result::unwrap)
        .collect();

    assert_eq!(symbols, output);
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let input = synthetic_bytes(3428);

    c.bench_function("round trip", |b| b.iter(|| round_trip(black_box(&input))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
