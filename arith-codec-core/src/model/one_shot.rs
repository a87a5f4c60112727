//! Helper trait for creating Models which only accept a single symbol

use std::ops::Range;

pub use crate::fixed_length::Wrapper;
use crate::{fixed_length, BitStore};

/// A 'one-shot' [`Model`] describes exactly one symbol, and so needs neither
/// an end-of-stream marker nor any adaptive state.
///
/// A one-shot model can be converted into a regular model using the
/// convenience [`Wrapper`] type.
///
/// # Example
///
/// ```
/// use std::convert::Infallible;
/// use std::ops::Range;
///
/// use arith_codec_core::one_shot;
///
/// pub enum Symbol {
///     A,
///     B,
///     C,
/// }
///
/// pub struct MyModel;
///
/// impl one_shot::Model for MyModel {
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
    /// The interval is expressed over the total given by
    /// [`Model::max_total`].
    ///
    /// This is the inverse of the [`Model::symbol`] method
    ///
    /// # Errors
    ///
    /// This returns a custom error if the given symbol is not valid
    fn counts(&self, symbol: &Self::Symbol) -> Result<Range<Self::B>, Self::ValueError>;

    /// The maximum total count the frequency table will ever report. See
    /// [`Model::counts`].
    ///
    /// This value is used to calculate an appropriate precision for the
    /// encoding, therefore it must not change.
    fn max_total(&self) -> Self::B;

    /// Given a scaled cumulative value, return the symbol whose count
    /// interval contains it.
    ///
    /// This is the inverse of the [`Model::counts`] method
    fn symbol(&self, value: Self::B) -> Self::Symbol;
}

impl<T> fixed_length::Model for T
where
    T: Model,
{
    type B = T::B;
    type Symbol = T::Symbol;
    type ValueError = T::ValueError;

    fn counts(&self, symbol: &Self::Symbol) -> Result<Range<Self::B>, Self::ValueError> {
        Model::counts(self, symbol)
    }

    fn max_total(&self) -> Self::B {
        self.max_total()
    }

    fn symbol(&self, value: Self::B) -> Self::Symbol {
        Model::symbol(self, value)
    }

    fn length(&self) -> usize {
        1
    }

    fn total(&self) -> Self::B {
        self.max_total()
    }
}
