//! The [`Encoder`] half of the arithmetic coding library.

use std::{io, ops::Range};

use bitstream_io::BitWrite;

use crate::{
    state::{Config, Interval, Scaling},
    BitStore, Error, Model,
};

/// An arithmetic encoder
///
/// An arithmetic encoder converts a stream of symbols into a stream of bits,
/// using a predictive [`Model`].
#[derive(Debug)]
pub struct Encoder<M>
where
    M: Model,
{
    /// The model used for the encoder
    pub model: M,
    state: IntervalEncoder<M::B>,
}

impl<M> Encoder<M>
where
    M: Model,
{
    /// Construct a new [`Encoder`].
    ///
    /// The 'precision' of the encoder is maximised, based on the number of
    /// bits needed to represent the [`Model::max_total`]. 'precision' bits
    /// is equal to [`BitStore::BITS`] - [`Model::max_total`] bits. If you
    /// need to set the precision manually, use [`Encoder::with_precision`].
    ///
    /// # Panics
    ///
    /// The calculation of the number of bits used for 'precision' is subject
    /// to the following constraints:
    ///
    /// - The total available bits is [`BitStore::BITS`]
    /// - The precision must use at least 2 more bits than that needed to
    ///   represent [`Model::max_total`]
    ///
    /// If these constraints cannot be satisfied this method will panic in
    /// debug builds
    pub fn new(model: M) -> Self {
        let frequency_bits = model.max_total().log2() + 1;
        let precision = M::B::BITS - frequency_bits;
        Self::with_precision(model, precision)
    }

    /// Construct a new [`Encoder`] with a custom precision.
    ///
    /// # Panics
    ///
    /// The calculation of the number of bits used for 'precision' is subject
    /// to the following constraints:
    ///
    /// - The total available bits is [`BitStore::BITS`]
    /// - The precision must use at least 2 more bits than that needed to
    ///   represent [`Model::max_total`]
    ///
    /// If these constraints cannot be satisfied this method will panic in
    /// debug builds
    pub fn with_precision(model: M, precision: u32) -> Self {
        let frequency_bits = model.max_total().log2() + 1;
        debug_assert!(
            (precision >= (frequency_bits + 2)),
            "not enough bits of precision to prevent overflow/underflow",
        );
        debug_assert!(
            (frequency_bits + precision) <= M::B::BITS,
            "not enough bits in BitStore to support the required precision",
        );

        Self {
            model,
            state: IntervalEncoder::new(Config::new(precision)),
        }
    }

    /// Construct an [`Encoder`] over an existing [`IntervalEncoder`].
    ///
    /// Used to resume a bit stream under a new model; see [`Encoder::chain`].
    pub const fn with_state(state: IntervalEncoder<M::B>, model: M) -> Self {
        Self { model, state }
    }

    /// Encode a stream of symbols into the provided output.
    ///
    /// This method will encode all the symbols in the iterator, followed by
    /// the end-of-stream marker (`None`), and then call [`Encoder::flush`].
    ///
    /// # Errors
    ///
    /// This method can fail if the underlying [`BitWrite`] cannot be written
    /// to.
    pub fn encode_all<W: BitWrite>(
        &mut self,
        symbols: impl IntoIterator<Item = M::Symbol>,
        output: &mut W,
    ) -> Result<(), Error> {
        for symbol in symbols {
            self.encode(Some(&symbol), output)?;
        }
        self.encode(None, output)?;
        self.flush(output)?;
        Ok(())
    }

    /// Encode a symbol into the provided output.
    ///
    /// When you finish encoding symbols, you must manually encode an
    /// end-of-stream marker by calling [`Encoder::encode`] with `None`.
    ///
    /// The internal buffer must be manually flushed using
    /// [`Encoder::flush`].
    ///
    /// # Errors
    ///
    /// This method can fail if the underlying [`BitWrite`] cannot be written
    /// to.
    pub fn encode<W: BitWrite>(
        &mut self,
        symbol: Option<&M::Symbol>,
        output: &mut W,
    ) -> Result<(), Error> {
        let Ok(counts) = self.model.counts(symbol) else {
            return Err(Error::ValueError);
        };
        let total = self.model.total();
        debug_assert!(
            total <= self.model.max_total(),
            "total count is greater than maximum!"
        );

        self.state.encode(counts, total, output)?;
        self.model.update(symbol);

        Ok(())
    }

    /// Flush any pending bits from the buffer
    ///
    /// This method must be called when you finish writing symbols to a
    /// stream of bits. This is called automatically when you use
    /// [`Encoder::encode_all`].
    ///
    /// # Errors
    ///
    /// This method can fail if the underlying [`BitWrite`] cannot be written
    /// to.
    pub fn flush<W: BitWrite>(&mut self, output: &mut W) -> io::Result<()> {
        self.state.flush(output)
    }

    /// Consume the encoder, returning the model and the interval state.
    pub fn into_inner(self) -> (M, IntervalEncoder<M::B>) {
        (self.model, self.state)
    }

    /// Reuse the internal state of the Encoder with a new model.
    ///
    /// Allows for chaining multiple sequences of symbols into a single
    /// stream of bits
    pub fn chain<X>(self, model: X) -> Encoder<X>
    where
        X: Model<B = M::B>,
    {
        Encoder {
            model,
            state: self.state,
        }
    }
}

/// The count-triple-level arithmetic encoder.
///
/// An `IntervalEncoder` knows nothing of symbols or models: each call to
/// [`encode`](IntervalEncoder::encode) takes the count triple describing one
/// symbol's slice of the cumulative frequency table and narrows the coding
/// interval accordingly, emitting bits as they become decided.
///
/// Bits that cannot yet be decided (the interval straddles the midpoint) are
/// deferred: a counter tracks how many are outstanding, and when the next
/// decisive bit `b` is known they are all written as `!b` immediately after
/// it. This is the carry-propagation rule that keeps the output exact
/// without unbounded buffering.
///
/// [`flush`](IntervalEncoder::flush) must be called exactly once, after the
/// last symbol, to disambiguate the final interval.
#[derive(Debug)]
pub struct IntervalEncoder<B>
where
    B: BitStore,
{
    interval: Interval<B>,
    pending: u32,
}

impl<B> IntervalEncoder<B>
where
    B: BitStore,
{
    /// Construct a new [`IntervalEncoder`] over the full interval.
    #[must_use]
    pub fn new(config: Config<B>) -> Self {
        Self {
            interval: Interval::new(config),
            pending: 0,
        }
    }

    /// The current coding interval.
    #[must_use]
    pub fn interval(&self) -> &Interval<B> {
        &self.interval
    }

    /// The number of deferred bits awaiting a decisive one.
    #[must_use]
    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Encode one symbol, described by its count triple.
    ///
    /// Narrows the interval to `counts` out of `total`, then renormalizes,
    /// writing each decided bit (and any deferred bits it resolves) to
    /// `output`.
    ///
    /// # Errors
    ///
    /// This method can fail if the underlying [`BitWrite`] cannot be written
    /// to.
    pub fn encode<W: BitWrite>(
        &mut self,
        counts: Range<B>,
        total: B,
        output: &mut W,
    ) -> io::Result<()> {
        self.interval.narrow(counts, total);

        while let Some(scaling) = self.interval.renormalize() {
            match scaling {
                Scaling::Zero => self.emit(false, output)?,
                Scaling::One => self.emit(true, output)?,
                Scaling::Defer => self.pending += 1,
            }
        }

        Ok(())
    }

    /// Write a decisive bit, then resolve all deferred bits as its opposite.
    fn emit<W: BitWrite>(&mut self, bit: bool, output: &mut W) -> io::Result<()> {
        output.write_bit(bit)?;
        for _ in 0..self.pending {
            output.write_bit(!bit)?;
        }
        self.pending = 0;
        Ok(())
    }

    /// Terminate the stream, emitting enough bits to pin down the final
    /// interval.
    ///
    /// One more bit is deferred, then a decisive bit selects the quarter
    /// containing `low`; together they guarantee the decoder's code value
    /// lands inside the final interval. Call exactly once, after the last
    /// symbol.
    ///
    /// # Errors
    ///
    /// This method can fail if the underlying [`BitWrite`] cannot be written
    /// to.
    pub fn flush<W: BitWrite>(&mut self, output: &mut W) -> io::Result<()> {
        self.pending += 1;
        if self.interval.low() < self.interval.config().quarter() {
            self.emit(false, output)?;
        } else {
            self.emit(true, output)?;
        }

        Ok(())
    }
}
