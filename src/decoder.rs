//! The [`Decoder`] half of the arithmetic coding library.

use std::{io, ops::Range};

use bitstream_io::BitRead;

use crate::{
    state::{Config, Interval},
    BitStore, Model,
};

/// An arithmetic decoder
///
/// An arithmetic decoder converts a stream of bits back into a stream of
/// symbols, using the same predictive [`Model`] the encoder used.
#[derive(Debug)]
pub struct Decoder<M>
where
    M: Model,
{
    /// The model used to predict the next symbol
    pub model: M,
    state: IntervalDecoder<M::B>,
}

trait BitReadExt {
    fn next_bit(&mut self) -> io::Result<Option<bool>>;
}

impl<R: BitRead> BitReadExt for R {
    fn next_bit(&mut self) -> io::Result<Option<bool>> {
        match self.read_bit() {
            Ok(bit) => Ok(Some(bit)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl<M> Decoder<M>
where
    M: Model,
{
    /// Construct a new [`Decoder`]
    ///
    /// The 'precision' of the decoder is maximised, based on the number of
    /// bits needed to represent the [`Model::max_total`]. 'precision' bits
    /// is equal to [`BitStore::BITS`] - [`Model::max_total`] bits.
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

    /// Construct a new [`Decoder`] with a custom precision
    ///
    /// The precision must equal the encoder's, or decoding diverges
    /// silently.
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

        let state = IntervalDecoder::new(Config::new(precision));

        Self { model, state }
    }

    /// Construct a [`Decoder`] over an existing [`IntervalDecoder`].
    ///
    /// Used to resume a bit stream under a new model; see [`Decoder::chain`].
    pub const fn with_state(state: IntervalDecoder<M::B>, model: M) -> Self {
        Self { model, state }
    }

    /// Return an iterator over the decoded symbols.
    ///
    /// The iterator will continue returning symbols until the end of the
    /// stream is reached
    pub fn decode_all<'a, R: BitRead>(&'a mut self, input: &'a mut R) -> DecodeIter<'a, M, R> {
        DecodeIter {
            decoder: self,
            input,
        }
    }

    /// Read the next symbol from the stream of bits
    ///
    /// This method will return `Ok(None)` once the end of the stream is
    /// reached.
    ///
    /// # Errors
    ///
    /// This method can fail if the underlying [`BitRead`] cannot be read
    /// from.
    pub fn decode<R: BitRead>(&mut self, input: &mut R) -> io::Result<Option<M::Symbol>> {
        self.state.initialise(input)?;

        let total = self.model.total();
        debug_assert!(
            total <= self.model.max_total(),
            "total count is greater than maximum!"
        );
        let value = self.state.scaled_value(total);
        let symbol = self.model.symbol(value);

        let counts = self
            .model
            .counts(symbol.as_ref())
            .expect("this should not be able to fail. Check the implementation of the model.");

        self.state.advance(counts, total, input)?;
        self.model.update(symbol.as_ref());

        Ok(symbol)
    }

    /// Reuse the internal state of the Decoder with a new model.
    ///
    /// Allows for chaining multiple sequences of symbols from a single
    /// stream of bits
    pub fn chain<X>(self, model: X) -> Decoder<X>
    where
        X: Model<B = M::B>,
    {
        Decoder {
            model,
            state: self.state,
        }
    }

    /// Consume the decoder, returning the model and the interval state.
    pub fn into_inner(self) -> (M, IntervalDecoder<M::B>) {
        (self.model, self.state)
    }
}

/// The iterator returned by the [`Decoder::decode_all`] method
#[allow(missing_debug_implementations)]
pub struct DecodeIter<'a, M, R>
where
    M: Model,
    R: BitRead,
{
    decoder: &'a mut Decoder<M>,
    input: &'a mut R,
}

impl<M, R> Iterator for DecodeIter<'_, M, R>
where
    M: Model,
    R: BitRead,
{
    type Item = io::Result<M::Symbol>;

    fn next(&mut self) -> Option<Self::Item> {
        self.decoder.decode(self.input).transpose()
    }
}

/// The count-triple-level arithmetic decoder.
///
/// An `IntervalDecoder` maintains the same coding interval as the
/// [`IntervalEncoder`](crate::IntervalEncoder) that produced the stream,
/// plus the code value formed from the bits read so far. For each symbol,
/// the caller asks for the [`scaled_value`](IntervalDecoder::scaled_value),
/// looks up which symbol's count interval contains it, and feeds the winning
/// triple back through [`advance`](IntervalDecoder::advance).
///
/// The sequence of `narrow`/`renormalize` steps is bit-for-bit symmetric
/// with the encoder's; each doubling shifts one fresh bit from the source
/// into the code value instead of emitting one.
#[derive(Debug)]
pub struct IntervalDecoder<B>
where
    B: BitStore,
{
    interval: Interval<B>,
    code: B,
    uninitialised: bool,
    exhausted: bool,
}

impl<B> IntervalDecoder<B>
where
    B: BitStore,
{
    /// Construct a new [`IntervalDecoder`] over the full interval.
    ///
    /// The configuration must equal the encoder's.
    #[must_use]
    pub fn new(config: Config<B>) -> Self {
        Self {
            interval: Interval::new(config),
            code: B::ZERO,
            uninitialised: true,
            exhausted: false,
        }
    }

    /// The current coding interval.
    #[must_use]
    pub fn interval(&self) -> &Interval<B> {
        &self.interval
    }

    /// Whether the bit source has run out.
    ///
    /// Reads past the end of the source shift in zeros, which the
    /// termination protocol allows for up to one final symbol; once the
    /// caller has decoded all the symbols it expects, this flag
    /// distinguishes a cleanly-drained stream from one with bits to spare.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fill the code value from the source if this is the first read.
    ///
    /// Called implicitly by [`advance`](IntervalDecoder::advance) and
    /// [`Decoder::decode`]; exposed for callers that want the fill cost paid
    /// up front.
    ///
    /// # Errors
    ///
    /// This method can fail if the underlying [`BitRead`] cannot be read
    /// from.
    pub fn initialise<R: BitRead>(&mut self, input: &mut R) -> io::Result<()> {
        if self.uninitialised {
            self.fill(input)?;
            self.uninitialised = false;
        }
        Ok(())
    }

    fn fill<R: BitRead>(&mut self, input: &mut R) -> io::Result<()> {
        for _ in 0..self.interval.config().precision() {
            self.code <<= 1;
            if self.shift_in(input)? {
                self.code += B::ONE;
            }
        }
        Ok(())
    }

    /// Read one bit, substituting zeros once the source is exhausted.
    fn shift_in<R: BitRead>(&mut self, input: &mut R) -> io::Result<bool> {
        match input.next_bit()? {
            Some(bit) => Ok(bit),
            None => {
                self.exhausted = true;
                Ok(false)
            }
        }
    }

    /// The scaled cumulative value of the code within the current interval,
    /// in `0..total`.
    ///
    /// The symbol whose count interval contains this value is the symbol the
    /// encoder encoded; identifying it is the model's (or caller's) job.
    /// Pure query; the interval is not modified. The code value must have
    /// been filled first — call [`initialise`](IntervalDecoder::initialise)
    /// before the first query.
    #[must_use]
    pub fn scaled_value(&self, total: B) -> B {
        let range = self.interval.high() - self.interval.low() + B::ONE;
        ((self.code - self.interval.low() + B::ONE) * total - B::ONE) / range
    }

    /// Consume one symbol, described by its count triple.
    ///
    /// Narrows the interval exactly as the encoder did, then renormalizes in
    /// lockstep, shifting one fresh source bit into the code value per
    /// doubling.
    ///
    /// # Errors
    ///
    /// This method can fail if the underlying [`BitRead`] cannot be read
    /// from.
    pub fn advance<R: BitRead>(
        &mut self,
        counts: Range<B>,
        total: B,
        input: &mut R,
    ) -> io::Result<()> {
        self.initialise(input)?;

        self.interval.narrow(counts, total);

        while let Some(scaling) = self.interval.renormalize() {
            let offset = scaling.offset(self.interval.config());
            self.code = (self.code - offset) << 1;
            if self.shift_in(input)? {
                self.code += B::ONE;
            }
        }

        Ok(())
    }
}
