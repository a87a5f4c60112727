//! Helper trait for creating Models with a maximum length

use std::ops::Range;

use crate::BitStore;

/// A 'max-length' [`Model`] describes at most a known number of symbols. The
/// compressed size of a message equal to the maximum length is larger than
/// with a [`fixed_length::Model`](crate::fixed_length::Model), but smaller
/// than with a [`Model`](crate::Model).
///
/// A max-length model can be converted into a regular model using the
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
/// use arith_codec_core::max_length;
///
/// pub enum Symbol {
///     A,
///     B,
///     C,
/// }
///
/// pub struct MyModel;
///
/// impl max_length::Model for MyModel {
///     type B = u32;
///     type Symbol = Symbol;
///     type ValueError = Infallible;
///
///     fn counts(&self, symbol: Option<&Self::Symbol>) -> Result<Range<u32>, Infallible> {
///         Ok(match symbol {
///             Some(Symbol::A) => 0..1,
///             Some(Symbol::B) => 1..2,
///             Some(Symbol::C) => 2..3,
///             None => 3..4,
///         })
///     }
///
///     fn symbol(&self, value: u32) -> Option<Self::Symbol> {
///         match value {
///             0 => Some(Symbol::A),
///             1 => Some(Symbol::B),
///             2 => Some(Symbol::C),
///             3 => None,
///             _ => unreachable!(),
///         }
///     }
///
///     fn max_total(&self) -> u32 {
///         4
///     }
///
///     fn max_length(&self) -> usize {
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
    /// This range should in general include the end-of-stream marker, which
    /// is denoted by `None`.
    ///
    /// This is the inverse of the [`Model::symbol`] method
    ///
    /// # Errors
    ///
    /// This returns a custom error if the given symbol is not valid
    fn counts(&self, symbol: Option<&Self::Symbol>)
        -> Result<Range<Self::B>, Self::ValueError>;

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
    /// `None` indicates end of stream.
    ///
    /// This is the inverse of the [`Model::counts`] method
    fn symbol(&self, value: Self::B) -> Option<Self::Symbol>;

    /// Update the current state of the model with the latest symbol.
    ///
    /// This method only needs to be implemented for 'adaptive' models. It's a
    /// no-op by default.
    fn update(&mut self, _symbol: &Self::Symbol) {}

    /// The maximum number of symbols to encode
    fn max_length(&self) -> usize;
}

/// A wrapper which converts a [`max_length::Model`](Model) to a
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
    /// Construct a new wrapper from a [`max_length::Model`](Model)
    pub fn new(model: M) -> Self {
        let remaining = model.max_length();
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
        if self.remaining == 0 {
            if symbol.is_some() {
                Err(Error::UnexpectedSymbol)
            } else {
                // got an EOF when we expected it, return a 100% interval
                Ok(Self::B::ZERO..self.total())
            }
        } else {
            self.model.counts(symbol).map_err(Self::ValueError::Value)
        }
    }

    fn max_total(&self) -> Self::B {
        self.model.max_total()
    }

    fn symbol(&self, value: Self::B) -> Option<Self::Symbol> {
        if self.remaining > 0 {
            self.model.symbol(value)
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

/// Max-length encoding/decoding errors
#[derive(Debug, thiserror::Error)]
pub enum Error<E>
where
    E: std::error::Error,
{
    /// Model received a symbol when it expected an EOF
    #[error("Unexpected Symbol")]
    UnexpectedSymbol,

    /// The model received an invalid symbol
    #[error(transparent)]
    Value(E),
}
