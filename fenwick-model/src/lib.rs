//! Fenwick-tree-backed adaptive models for exercising the `arith-codec`
//! crate.
//!
//! These models maintain per-symbol weights in a Fenwick (binary indexed)
//! tree, so cumulative count lookups and weight bumps are both logarithmic.
//! Index 0 of the tree is reserved for the end-of-stream marker; symbol `s`
//! lives at index `s + 1`.

use std::ops::Range;

use fenwick::array::{prefix_sum, update};

pub mod context_switching;
pub mod simple;

/// The requested symbol is outside the model's alphabet.
#[derive(Debug, thiserror::Error)]
#[error("invalid symbol: {0}")]
pub struct ValueError(usize);

/// Cumulative symbol weights over a fixed alphabet, plus the end-of-stream
/// marker.
#[derive(Debug, Clone)]
pub struct Weights {
    fenwick_counts: Vec<u64>,
    total: u64,
}

impl Weights {
    /// A fresh table over `symbols` symbols, every weight (including EOF)
    /// starting at 1 so that no count interval is empty.
    fn new(symbols: usize) -> Self {
        let mut fenwick_counts = vec![0; symbols + 1];
        for i in 0..=symbols {
            update(&mut fenwick_counts, i, 1);
        }
        Self {
            fenwick_counts,
            total: symbols as u64 + 1,
        }
    }

    /// Number of symbols in the alphabet (excluding EOF).
    fn symbols(&self) -> usize {
        self.fenwick_counts.len() - 1
    }

    fn index(symbol: Option<usize>) -> usize {
        symbol.map_or(0, |s| s + 1)
    }

    fn range(&self, symbol: Option<usize>) -> Range<u64> {
        let index = Self::index(symbol);
        let high = prefix_sum(&self.fenwick_counts, index);
        let low = if index == 0 {
            0
        } else {
            prefix_sum(&self.fenwick_counts, index - 1)
        };
        low..high
    }

    fn symbol(&self, value: u64) -> Option<usize> {
        for index in 0..self.fenwick_counts.len() {
            if value < prefix_sum(&self.fenwick_counts, index) {
                return if index == 0 { None } else { Some(index - 1) };
            }
        }
        unreachable!("scaled value is outside the cumulative frequency table")
    }

    fn update(&mut self, symbol: Option<usize>, delta: u64) {
        update(&mut self.fenwick_counts, Self::index(symbol), delta);
        self.total += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::Weights;

    #[test]
    fn ranges_tile_the_total() {
        let mut weights = Weights::new(4);
        weights.update(Some(2), 3);

        let mut low = 0;
        for symbol in [None, Some(0), Some(1), Some(2), Some(3)] {
            let range = weights.range(symbol);
            assert_eq!(range.start, low);
            assert!(range.end > range.start);
            low = range.end;
        }
        assert_eq!(low, weights.total);
    }

    #[test]
    fn symbol_inverts_range() {
        let mut weights = Weights::new(3);
        weights.update(Some(1), 5);
        weights.update(None, 2);

        for symbol in [None, Some(0), Some(1), Some(2)] {
            let range = weights.range(symbol);
            assert_eq!(weights.symbol(range.start), symbol);
            assert_eq!(weights.symbol(range.end - 1), symbol);
        }
    }
}
