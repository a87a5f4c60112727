#![no_main]

use arith_codec::{Decoder, Encoder};
use bitstream_io::{BigEndian, BitReader, BitWrite, BitWriter};
use fenwick_model::simple::FenwickModel;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let model = FenwickModel::builder(256, 1 << 20).build();
    let input: Vec<usize> = data.iter().copied().map(usize::from).collect();

    let mut bitwriter = BitWriter::endian(Vec::new(), BigEndian);
    let mut encoder = Encoder::new(model.clone());
    encoder
        .encode_all(input.clone(), &mut bitwriter)
        .expect("failed to encode data!");
    bitwriter.byte_align().expect("failed to byte-align the stream");
    let buffer = bitwriter.into_writer();

    let mut bitreader = BitReader::endian(buffer.as_slice(), BigEndian);
    let mut decoder = Decoder::new(model);
    let output: Vec<usize> = decoder
        .decode_all(&mut bitreader)
        .map(Result::unwrap)
        .collect();

    assert_eq!(input, output);
});
