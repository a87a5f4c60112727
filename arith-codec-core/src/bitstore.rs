use std::ops::{Add, AddAssign, Div, Mul, Shl, ShlAssign, Sub};

/// A trait for the unsigned integer type holding the working interval of an
/// encoder or decoder.
///
/// The width of this type bounds the usable precision: an interval of `P`
/// bits and a frequency table of `F` bits need `P + F <= BITS` to keep the
/// `range * count` products exact.
pub trait BitStore:
    Shl<u32, Output = Self>
    + ShlAssign<u32>
    + Sized
    + Sub<Output = Self>
    + Add<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + PartialOrd
    + Copy
    + std::fmt::Debug
{
    /// the number of bits needed to represent this type
    const BITS: u32;

    /// the additive identity
    const ZERO: Self;

    /// the multiplicative identity
    const ONE: Self;

    /// integer base-2 logarithm, rounded down
    fn log2(self) -> u32;
}

macro_rules! impl_bitstore {
    ($t:ty) => {
        impl BitStore for $t {
            const BITS: u32 = Self::BITS;
            const ONE: Self = 1;
            const ZERO: Self = 0;

            fn log2(self) -> u32 {
                Self::ilog2(self)
            }
        }
    };
}

impl_bitstore! {u32}
impl_bitstore! {u64}
impl_bitstore! {u128}
