//! The coding interval shared by the [`Encoder`](crate::Encoder) and
//! [`Decoder`](crate::Decoder) halves of the library.
//!
//! Both ends of a stream maintain the same `[low, high]` interval and narrow
//! it symbol by symbol. [`Config`] holds the precision constants, which must
//! match exactly between encoder and decoder; [`Interval`] performs the
//! narrowing and the renormalization classification.

use std::{marker::PhantomData, ops::Range};

use crate::BitStore;

/// Immutable precision configuration for an encoder or decoder.
///
/// A `Config` is constructed once and shared (by copy) between the two ends
/// of a stream. All interval boundaries derive from the precision `P`:
/// the largest interval bound is `2^P - 1`, and the quarter points divide
/// `2^P` evenly.
///
/// A precision mismatch between encoder and decoder is a protocol-breaking
/// bug. Both ends must be built from the same `Config`, or from model
/// figures that derive the same precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config<B>
where
    B: BitStore,
{
    precision: u32,
    _marker: PhantomData<B>,
}

impl<B> Config<B>
where
    B: BitStore,
{
    /// Construct a `Config` with the given precision in bits.
    ///
    /// The working integer type must leave headroom above the precision for
    /// the frequency counts: `precision + frequency_bits <= B::BITS`, and
    /// `precision >= frequency_bits + 2`. The encoder and decoder
    /// constructors check these constraints against their model in debug
    /// builds.
    #[must_use]
    pub fn new(precision: u32) -> Self {
        debug_assert!(precision >= 2, "a precision below 2 bits cannot represent the quarter points");
        debug_assert!(precision < B::BITS, "precision must leave at least one spare bit in the working type");
        Self {
            precision,
            _marker: PhantomData,
        }
    }

    /// The precision, in bits.
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// The largest interval bound, `2^P - 1`.
    #[must_use]
    pub fn top(&self) -> B {
        (B::ONE << self.precision) - B::ONE
    }

    /// The midpoint, `2^(P-1)`.
    #[must_use]
    pub fn half(&self) -> B {
        B::ONE << (self.precision - 1)
    }

    /// The first quarter point, `2^(P-2)`.
    #[must_use]
    pub fn quarter(&self) -> B {
        B::ONE << (self.precision - 2)
    }

    /// The third quarter point.
    #[must_use]
    pub fn three_quarters(&self) -> B {
        self.half() + self.quarter()
    }
}

/// The result of one renormalization step.
///
/// Each step identifies which half (or the straddling middle) of the full
/// range the interval has settled into, rescales the interval, and tells the
/// caller what to do with the bit that decision pins down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    /// The interval lies in the lower half; a decisive `0` is known.
    Zero,
    /// The interval lies in the upper half; a decisive `1` is known.
    One,
    /// The interval straddles the midpoint; the bit cannot be decided yet
    /// and must be deferred until a later `Zero` or `One` resolves it.
    Defer,
}

impl Scaling {
    /// The amount subtracted from the interval bounds for this case. The
    /// decoder mirrors the same subtraction on its code value.
    pub(crate) fn offset<B: BitStore>(self, config: Config<B>) -> B {
        match self {
            Self::Zero => B::ZERO,
            Self::One => config.half(),
            Self::Defer => config.quarter(),
        }
    }
}

/// The current coding interval `[low, high]` of an encoder or decoder.
///
/// Invariants: `0 <= low <= high <= top`, and after every full
/// renormalization pass the width `high - low + 1` exceeds a quarter of the
/// full range, so a narrowing by any valid count triple keeps `low <= high`.
#[derive(Debug, Clone, Copy)]
pub struct Interval<B>
where
    B: BitStore,
{
    config: Config<B>,
    low: B,
    high: B,
}

impl<B> Interval<B>
where
    B: BitStore,
{
    /// Construct the full interval `[0, top]` for the given configuration.
    #[must_use]
    pub fn new(config: Config<B>) -> Self {
        Self {
            config,
            low: B::ZERO,
            high: config.top(),
        }
    }

    /// The configuration this interval was built from.
    #[must_use]
    pub fn config(&self) -> Config<B> {
        self.config
    }

    /// The lower bound (inclusive).
    #[must_use]
    pub fn low(&self) -> B {
        self.low
    }

    /// The upper bound (inclusive).
    #[must_use]
    pub fn high(&self) -> B {
        self.high
    }

    /// Narrow the interval to the sub-range allotted to a symbol with counts
    /// `low_count..high_count` out of `total`.
    ///
    /// The division truncates; the sliver lost to truncation is reclaimed by
    /// the neighbouring symbol's sub-range, which is what keeps the symbol
    /// partition exact end to end.
    pub fn narrow(&mut self, counts: Range<B>, total: B) {
        debug_assert!(
            counts.start < counts.end && counts.end <= total,
            "count triple must satisfy low_count < high_count <= total_count"
        );

        let range = self.high - self.low + B::ONE;

        self.high = self.low + (range * counts.end) / total - B::ONE;
        self.low += (range * counts.start) / total;
    }

    /// One step of the renormalization loop.
    ///
    /// Classifies the interval against the half and quarter points, in
    /// order: entirely below the midpoint ([`Scaling::Zero`]), entirely
    /// above it ([`Scaling::One`]), or straddling it within the middle half
    /// ([`Scaling::Defer`]). If a case applies, the interval is shifted down
    /// by the case's offset and both bounds are doubled (the upper bound
    /// pulling in a `1`), and the case is returned. Once no case applies the
    /// interval is wide enough to absorb the next symbol, and `None` is
    /// returned.
    ///
    /// Callers loop until `None`, handling the emitted/deferred bit per
    /// step.
    pub fn renormalize(&mut self) -> Option<Scaling> {
        let scaling = if self.high < self.config.half() {
            Scaling::Zero
        } else if self.low >= self.config.half() {
            Scaling::One
        } else if self.low >= self.config.quarter() && self.high < self.config.three_quarters() {
            Scaling::Defer
        } else {
            return None;
        };

        let offset = scaling.offset(self.config);
        self.low = (self.low - offset) << 1;
        self.high = ((self.high - offset) << 1) + B::ONE;

        #[cfg(feature = "trace")]
        tracing::trace!(?scaling, low = ?self.low, high = ?self.high, "renormalized");

        Some(scaling)
    }
}
