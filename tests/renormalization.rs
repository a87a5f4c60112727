//! Bit-level tests of the count-triple layer: carry propagation, the
//! termination protocol, and the interval invariants.

use arith_codec::{Config, IntervalDecoder, IntervalEncoder};
use bitstream_io::{BigEndian, BitReader, BitWrite, BitWriter};

fn encode_triples(precision: u32, triples: &[(u32, u32, u32)], flush: bool) -> Vec<u8> {
    let mut bitwriter = BitWriter::endian(Vec::new(), BigEndian);
    let mut encoder = IntervalEncoder::new(Config::<u32>::new(precision));

    for &(low_count, high_count, total) in triples {
        encoder
            .encode(low_count..high_count, total, &mut bitwriter)
            .unwrap();
    }
    if flush {
        encoder.flush(&mut bitwriter).unwrap();
    }
    bitwriter.byte_align().unwrap();

    bitwriter.into_writer()
}

/// A (1, 3, 4) symbol narrows [0, 255] to [64, 191]: the straddle case,
/// which defers a bit. Three of those followed by an upper-half symbol must
/// resolve the deferred bits as the opposite of the decisive one.
#[test]
fn deferred_bits_invert_the_resolving_bit() {
    let buffer = encode_triples(8, &[(1, 3, 4), (1, 3, 4), (1, 3, 4), (2, 4, 4)], false);

    // "1" then three "0"s, zero-padded to the byte boundary
    assert_eq!(buffer, [0b1000_0000]);
}

/// Straddling symbols produce no output at all until a decisive bit
/// arrives; the deferred count is all that grows.
#[test]
fn straddles_defer_bits() {
    let mut bitwriter = BitWriter::endian(Vec::new(), BigEndian);
    let mut encoder = IntervalEncoder::new(Config::<u32>::new(8));

    for _ in 0..3 {
        encoder.encode(1..3, 4, &mut bitwriter).unwrap();
    }

    assert_eq!(encoder.pending(), 3);
    assert!(bitwriter.into_writer().is_empty());
}

/// Symmetrically, deferred bits resolved by a "0" come out as "1"s.
#[test]
fn deferred_bits_after_a_zero_are_ones() {
    let buffer = encode_triples(8, &[(1, 3, 4), (1, 3, 4), (0, 2, 4)], false);

    // (0, 2, 4) narrows [0, 255] to [0, 127]: a decisive "0", releasing
    // the two pending bits as "1"s
    assert_eq!(buffer, [0b0110_0000]);
}

/// Two equiprobable coin flips cost one bit each, plus the two-bit
/// termination: 2·log2(2) + 2 bits in total.
#[test]
fn coin_flips_cost_one_bit_each() {
    let buffer = encode_triples(8, &[(0, 1, 2), (1, 2, 2)], true);

    assert_eq!(buffer, [0b0101_0000]);

    let mut bitreader = BitReader::endian(buffer.as_slice(), BigEndian);
    let mut decoder = IntervalDecoder::new(Config::<u32>::new(8));
    decoder.initialise(&mut bitreader).unwrap();

    assert_eq!(decoder.scaled_value(2), 0);
    decoder.advance(0..1, 2, &mut bitreader).unwrap();

    assert_eq!(decoder.scaled_value(2), 1);
    decoder.advance(1..2, 2, &mut bitreader).unwrap();
}

/// Encoding is a pure function of the triple sequence.
#[test]
fn identical_input_encodes_identically() {
    let triples = [(0, 1, 4), (1, 3, 4), (3, 4, 4), (1, 3, 4), (0, 1, 4)];

    let first = encode_triples(10, &triples, true);
    let second = encode_triples(10, &triples, true);

    assert_eq!(first, second);
}

/// A near-certain symbol narrows the interval so little that long runs of
/// them emit (almost) nothing.
#[test]
fn near_certain_symbols_cost_almost_nothing() {
    let total = 1u64 << 20;
    let mut bitwriter = BitWriter::endian(Vec::new(), BigEndian);
    let mut encoder = IntervalEncoder::new(Config::<u64>::new(43));

    for _ in 0..1000 {
        encoder.encode(1..total, total, &mut bitwriter).unwrap();
    }
    encoder.flush(&mut bitwriter).unwrap();
    bitwriter.byte_align().unwrap();
    let buffer = bitwriter.into_writer();

    assert!(buffer.len() <= 2, "1000 near-certain symbols took {} bytes", buffer.len());

    // and they come back out
    let mut bitreader = BitReader::endian(buffer.as_slice(), BigEndian);
    let mut decoder = IntervalDecoder::new(Config::<u64>::new(43));
    decoder.initialise(&mut bitreader).unwrap();

    for _ in 0..1000 {
        let value = decoder.scaled_value(total);
        assert!(value >= 1);
        decoder.advance(1..total, total, &mut bitreader).unwrap();
    }
}

/// A near-impossible symbol carries ~20 bits of information at this total.
#[test]
fn near_impossible_symbol_costs_many_bits() {
    let total = 1u64 << 20;
    let mut bitwriter = BitWriter::endian(Vec::new(), BigEndian);
    let mut encoder = IntervalEncoder::new(Config::<u64>::new(43));

    encoder.encode(0..1, total, &mut bitwriter).unwrap();
    encoder.flush(&mut bitwriter).unwrap();
    bitwriter.byte_align().unwrap();
    let buffer = bitwriter.into_writer();

    // 20 decisive zeros plus the two-bit termination
    assert_eq!(buffer.len(), 3);

    let mut bitreader = BitReader::endian(buffer.as_slice(), BigEndian);
    let mut decoder = IntervalDecoder::new(Config::<u64>::new(43));
    decoder.initialise(&mut bitreader).unwrap();

    assert_eq!(decoder.scaled_value(total), 0);
    decoder.advance(0..1, total, &mut bitreader).unwrap();
}

/// After every encode the renormalized interval is wider than a quarter of
/// the full range and stays within it.
#[test]
fn interval_invariants_hold_throughout() {
    let config = Config::<u32>::new(12);
    let mut bitwriter = BitWriter::endian(Vec::new(), BigEndian);
    let mut encoder = IntervalEncoder::new(config);

    let triples = [(0, 1, 10), (1, 3, 10), (3, 9, 10), (9, 10, 10), (4, 6, 10)];
    for &(low_count, high_count, total) in triples.iter().cycle().take(100) {
        encoder
            .encode(low_count..high_count, total, &mut bitwriter)
            .unwrap();

        let interval = encoder.interval();
        let width = interval.high() - interval.low() + 1;
        assert!(width > config.quarter());
        assert!(interval.low() <= interval.high());
        assert!(interval.high() <= config.top());
    }
}

/// The decoder reads past the written bits only once the source is dry, and
/// says so.
#[test]
fn exhaustion_is_reported() {
    let buffer = encode_triples(8, &[(0, 1, 2), (1, 2, 2)], true);

    let mut bitreader = BitReader::endian(buffer.as_slice(), BigEndian);
    let mut decoder = IntervalDecoder::new(Config::<u32>::new(8));
    decoder.initialise(&mut bitreader).unwrap();

    // the 8-bit fill consumed the whole buffer exactly
    assert!(!decoder.is_exhausted());

    decoder.advance(0..1, 2, &mut bitreader).unwrap();
    decoder.advance(1..2, 2, &mut bitreader).unwrap();

    assert!(decoder.is_exhausted());
}
