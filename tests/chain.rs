//! Chaining two logical symbol streams, under different models, into a
//! single unflushed bit stream.

use arith_codec::{Decoder, Encoder};
use bitstream_io::{BigEndian, BitReader, BitWrite, BitWriter};

const PRECISION: u32 = 12;

mod letters {
    use std::{convert::Infallible, ops::Range};

    #[derive(Debug, PartialEq, Eq)]
    pub enum Symbol {
        A,
        B,
        C,
    }

    pub struct Model;

    impl arith_codec::Model for Model {
        type B = u32;
        type Symbol = Symbol;
        type ValueError = Infallible;

        fn counts(&self, symbol: Option<&Self::Symbol>) -> Result<Range<u32>, Infallible> {
            Ok(match symbol {
                None => 0..1,
                Some(&Symbol::A) => 1..2,
                Some(&Symbol::B) => 2..3,
                Some(&Symbol::C) => 3..4,
            })
        }

        fn symbol(&self, value: u32) -> Option<Self::Symbol> {
            match value {
                0 => None,
                1 => Some(Symbol::A),
                2 => Some(Symbol::B),
                3 => Some(Symbol::C),
                _ => unreachable!(),
            }
        }

        fn max_total(&self) -> u32 {
            4
        }
    }
}

mod digits {
    use std::ops::Range;

    pub struct Model;

    #[derive(Debug, thiserror::Error)]
    #[error("invalid symbol: {0}")]
    pub struct Error(u8);

    impl arith_codec::Model for Model {
        type B = u32;
        type Symbol = u8;
        type ValueError = Error;

        fn counts(&self, symbol: Option<&Self::Symbol>) -> Result<Range<u32>, Error> {
            match symbol {
                None => Ok(0..1),
                Some(&1) => Ok(1..2),
                Some(&2) => Ok(2..3),
                Some(&3) => Ok(3..4),
                Some(x) => Err(Error(*x)),
            }
        }

        fn symbol(&self, value: u32) -> Option<Self::Symbol> {
            match value {
                0 => None,
                1 => Some(1),
                2 => Some(2),
                3 => Some(3),
                _ => unreachable!(),
            }
        }

        fn max_total(&self) -> u32 {
            4
        }
    }
}

#[test]
fn chained_streams_share_one_bit_stream() {
    let input1 = [letters::Symbol::A, letters::Symbol::B, letters::Symbol::C];
    let input2: Vec<u8> = vec![2, 1, 1, 2, 2];

    let mut bitwriter = BitWriter::endian(Vec::new(), BigEndian);

    let mut encoder1 = Encoder::with_precision(letters::Model, PRECISION);
    for symbol in &input1 {
        encoder1.encode(Some(symbol), &mut bitwriter).unwrap();
    }
    encoder1.encode(None, &mut bitwriter).unwrap();

    let mut encoder2 = encoder1.chain(digits::Model);
    for symbol in &input2 {
        encoder2.encode(Some(symbol), &mut bitwriter).unwrap();
    }
    encoder2.encode(None, &mut bitwriter).unwrap();
    encoder2.flush(&mut bitwriter).unwrap();

    bitwriter.byte_align().unwrap();
    let buffer = bitwriter.into_writer();

    let mut bitreader = BitReader::endian(buffer.as_slice(), BigEndian);

    let mut decoder1 = Decoder::with_precision(letters::Model, PRECISION);
    let mut output1 = Vec::new();
    while let Some(symbol) = decoder1.decode(&mut bitreader).unwrap() {
        output1.push(symbol);
    }
    assert_eq!(output1, input1);

    let (_, state) = decoder1.into_inner();
    let mut decoder2 = Decoder::with_state(state, digits::Model);
    let mut output2 = Vec::new();
    while let Some(symbol) = decoder2.decode(&mut bitreader).unwrap() {
        output2.push(symbol);
    }
    assert_eq!(output2, input2);
}
