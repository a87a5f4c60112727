//! Helper trait for creating fixed-length Models

use std::ops::Range;

use crate::BitStore;

/// A fixed-length [`Model`] always describes an exact number of symbols, and
/// so does not need to spend a slot of the frequency table on an
/// end-of-stream marker.
///
/// A fixed length model can be converted into a regular model using the
/// convenience [`Wrapper`] type.
///
/// The more accurately a [`Model`] is able to predict the next symbol, the
/// greater the compression ratio will be.
///
/// # Example
///
/// ```
/// use std::convert::Infallible;
/// use std::ops::Range;
///
/// use arith_codec_core::fixed_length;
///
/// pub enum Symbol {
///     A,
///     B,
///     C,
/// }
///
/// pub struct MyModel;
///
/// impl fixed_length::Model for MyModel {
///     type B = u32;
///     type Symbol = Symbol;
///     type ValueError = Infallible;
///
///     fn counts(&self, symbol: &Self::Symbol) -> Result<Range<u32>, Infallible> {
///         Ok(match symbol {
///             Symbol::A => 0..1,
///             Symbol::B => 1..2,
///             Symbol::C => 2..3,
///         })
///     }
///
///     fn symbol(&self, value: u32) -> Self::Symbol {
///         match value {
///             0 => Symbol::A,
///             1 => Symbol::B,
///             2 => Symbol::C,
///             _ => unreachable!(),
///         }
///     }
///
///     fn max_total(&self) -> u32 {
///         3
///     }
///
///     fn length(&self) -> usize {
///         3
///     }
/// }
/// ```
pub trait Model {
    /// The type of symbol this [`Model`] describes
    type Symbol;

    /// Invalid symbol error
    type ValueError: std::error::Error;

    /// The internal representation to use for storing integers
    type B: BitStore;

    /// Given a symbol, return its count interval `low_count..high_count`
    /// within the cumulative frequency table.
    ///
    /// The interval is expressed over the total given by [`Model::total`].
    /// Unlike [`crate::Model::counts`], no slot is reserved for an
    /// end-of-stream marker.
    ///
    /// This is the inverse of the [`Model::symbol`] method
    ///
    /// # Errors
    ///
    /// This returns a custom error if the given symbol is not valid
    fn counts(&self, symbol: &Self::Symbol) -> Result<Range<Self::B>, Self::ValueError>;

    /// The current total count of the frequency table. See
    /// [`Model::counts`].
    ///
    /// By default this method simply returns the [`Model::max_total`], which
    /// is suitable for non-adaptive models.
    ///
    /// In adaptive models this value may change, however it should never
    /// exceed [`Model::max_total`], or it becomes possible for the encoder
    /// and decoder to lose exactness through overflow or underflow.
    fn total(&self) -> Self::B {
        self.max_total()
    }

    /// The maximum total count the frequency table will ever report. See
    /// [`Model::counts`].
    ///
    /// This value is used to calculate an appropriate precision for the
    /// encoding, therefore it must not change, and [`Model::total`] must
    /// never exceed it.
    fn max_total(&self) -> Self::B;

    /// Given a scaled cumulative value, return the symbol whose count
    /// interval contains it.
    ///
    /// This is the inverse of the [`Model::counts`] method
    fn symbol(&self, value: Self::B) -> Self::Symbol;

    /// Update the current state of the model with the latest symbol.
    ///
    /// This method only needs to be implemented for 'adaptive' models. It's a
    /// no-op by default.
    fn update(&mut self, _symbol: &Self::Symbol) {}

    /// The total number of symbols to encode
    fn length(&self) -> usize;
}

/// A wrapper which converts a [`fixed_length::Model`](Model) to a
/// [`crate::Model`].
#[derive(Debug, Clone)]
pub struct Wrapper<M>
where
    M: Model,
{
    model: M,
    remaining: usize,
}

impl<M> Wrapper<M>
where
    M: Model,
{
    /// Construct a new wrapper from a [`fixed_length::Model`](Model)
    pub fn new(model: M) -> Self {
        let remaining = model.length();
        Self { model, remaining }
    }
}

impl<M> crate::Model for Wrapper<M>
where
    M: Model,
{
    type B = M::B;
    type Symbol = M::Symbol;
    type ValueError = Error<M::ValueError>;

    fn counts(&self, symbol: Option<&Self::Symbol>) -> Result<Range<Self::B>, Self::ValueError> {
        if self.remaining > 0 {
            if let Some(s) = symbol {
                // Expected a symbol and got one. return the counts.
                self.model.counts(s).map_err(Self::ValueError::Value)
            } else {
                // We are expecting more symbols, but got an EOF
                Err(Self::ValueError::UnexpectedEof)
            }
        } else if symbol.is_some() {
            // we should be finished, but got an extra symbol
            Err(Error::UnexpectedSymbol)
        } else {
            // got an EOF when we expected it, return a 100% interval
            Ok(Self::B::ZERO..self.total())
        }
    }

    fn max_total(&self) -> Self::B {
        self.model.max_total()
    }

    fn symbol(&self, value: Self::B) -> Option<Self::Symbol> {
        if self.remaining > 0 {
            Some(self.model.symbol(value))
        } else {
            None
        }
    }

    fn total(&self) -> Self::B {
        self.model.total()
    }

    fn update(&mut self, symbol: Option<&Self::Symbol>) {
        if let Some(s) = symbol {
            self.model.update(s);
            self.remaining -= 1;
        }
    }
}

/// Fixed-length encoding/decoding errors
#[derive(Debug, thiserror::Error)]
pub enum Error<E>
where
    E: std::error::Error,
{
    /// Model received an EOF when it expected more symbols
    #[error("Unexpected EOF")]
    UnexpectedEof,

    /// Model received a symbol when it expected an EOF
    #[error("Unexpected Symbol")]
    UnexpectedSymbol,

    /// The model received an invalid symbol
    #[error(transparent)]
    Value(E),
}
