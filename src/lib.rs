//! Streaming arithmetic coding library.
//!
//! An arithmetic coder maps a sequence of symbols, each described by a count
//! interval within a cumulative frequency table, into a compact bit string
//! and back, approaching the Shannon entropy of the symbol source.
//!
//! Two API layers are provided:
//!
//! - [`Encoder`] and [`Decoder`] drive a [`Model`] that supplies the count
//!   triple for each symbol and identifies symbols from scaled cumulative
//!   values while decoding.
//! - [`IntervalEncoder`] and [`IntervalDecoder`] are the bare coding engines
//!   underneath. They consume count triples directly, for callers that keep
//!   their frequency table outside the codec.
//!
//! Bits flow through the [`bitstream_io::BitWrite`] and
//! [`bitstream_io::BitRead`] capability traits, so any conforming transport
//! (in-memory buffer, file, socket) can be substituted.

#![deny(
    missing_docs,
    clippy::all,
    missing_debug_implementations,
    clippy::cargo
)]
#![warn(clippy::pedantic)]

pub use arith_codec_core::{fixed_length, max_length, one_shot, BitStore, Model};

pub mod decoder;
pub mod encoder;
pub mod state;

pub use decoder::{Decoder, IntervalDecoder};
pub use encoder::{Encoder, IntervalEncoder};
pub use state::{Config, Interval, Scaling};

/// Errors that can occur during encoding/decoding
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Io error when reading/writing bits from a stream
    #[error("io error")]
    Io(#[from] std::io::Error),

    /// Invalid symbol
    #[error("invalid symbol")]
    ValueError,
}
