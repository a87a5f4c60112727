use std::{error::Error, ops::Range};

use crate::BitStore;

pub mod fixed_length;
pub mod max_length;
pub mod one_shot;

/// A [`Model`] supplies the count triple for each symbol in a cumulative
/// frequency table. The [`Model`] is used both for encoding and decoding.
///
/// The count intervals of all symbols (including `None`, the end-of-stream
/// marker) must partition `0..total` with no gaps or overlaps. That partition
/// invariant is the model's responsibility; the codec consumes the triples
/// as given.
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
/// use arith_codec_core::Model;
///
/// pub enum Symbol {
///     A,
///     B,
///     C,
/// }
///
/// pub struct MyModel;
///
/// impl Model for MyModel {
///     type B = u32;
///     type Symbol = Symbol;
///     type ValueError = Infallible;
///
///     fn counts(&self, symbol: Option<&Self::Symbol>) -> Result<Range<u32>, Infallible> {
///         Ok(match symbol {
///             None => 0..1,
///             Some(&Symbol::A) => 1..2,
///             Some(&Symbol::B) => 2..3,
///             Some(&Symbol::C) => 3..4,
///         })
///     }
///
///     fn symbol(&self, value: u32) -> Option<Self::Symbol> {
///         match value {
///             0 => None,
///             1 => Some(Symbol::A),
///             2 => Some(Symbol::B),
///             3 => Some(Symbol::C),
///             _ => unreachable!(),
///         }
///     }
///
///     fn max_total(&self) -> u32 {
///         4
///     }
/// }
/// ```
pub trait Model {
    /// The type of symbol this [`Model`] describes
    type Symbol;

    /// Invalid symbol error
    type ValueError: Error;

    /// The internal representation to use for storing integers
    type B: BitStore;

    /// Given a symbol, return its count interval `low_count..high_count`
    /// within the cumulative frequency table.
    ///
    /// The interval is expressed over the total given by [`Model::total`].
    /// It should in general include the end-of-stream marker, which is
    /// denoted by `None`.
    ///
    /// For example, from the set {heads, tails}, the interval for heads could
    /// be `0..1`, tails `1..2`, and end-of-stream `2..3` (with a total of
    /// `3`).
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
    fn update(&mut self, _symbol: Option<&Self::Symbol>) {}
}
