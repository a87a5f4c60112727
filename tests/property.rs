use std::{convert::Infallible, ops::Range};

use arith_codec::Model;
use proptest::prelude::*;

mod common;

/// A static model over an arbitrary weight table, with the end-of-stream
/// marker holding the final weight-1 slot.
#[derive(Debug, Clone)]
struct TableModel {
    /// `cumulative[i]` is the total weight of symbols below `i`.
    cumulative: Vec<u64>,
}

impl TableModel {
    fn new(weights: &[u64]) -> Self {
        let mut cumulative = Vec::with_capacity(weights.len() + 2);
        let mut sum = 0;
        cumulative.push(sum);
        for &weight in weights {
            sum += weight;
            cumulative.push(sum);
        }
        cumulative.push(sum + 1);

        Self { cumulative }
    }

    fn symbols(&self) -> usize {
        self.cumulative.len() - 2
    }
}

impl Model for TableModel {
    type B = u64;
    type Symbol = usize;
    type ValueError = Infallible;

    fn counts(&self, symbol: Option<&usize>) -> Result<Range<u64>, Infallible> {
        let index = symbol.map_or(self.symbols(), |&s| s);
        Ok(self.cumulative[index]..self.cumulative[index + 1])
    }

    fn symbol(&self, value: u64) -> Option<usize> {
        let index = self.cumulative.partition_point(|&c| c <= value) - 1;
        if index == self.symbols() {
            None
        } else {
            Some(index)
        }
    }

    fn max_total(&self) -> u64 {
        *self.cumulative.last().unwrap()
    }
}

proptest! {
    #[test]
    fn round_trips(
        weights in prop::collection::vec(1..20u64, 1..40),
        picks in prop::collection::vec(0usize..1000, 0..100),
    ) {
        let model = TableModel::new(&weights);
        let input: Vec<usize> = picks.into_iter().map(|i| i % weights.len()).collect();

        common::round_trip(model, &input);
    }

    #[test]
    fn skewed_tables_round_trip(
        rare in 0usize..8,
        picks in prop::collection::vec(0usize..8, 1..50),
    ) {
        // one symbol at weight 1 against seven at weight 1000
        let weights: Vec<u64> = (0..8).map(|i| if i == rare { 1 } else { 1000 }).collect();
        let model = TableModel::new(&weights);

        common::round_trip(model, &picks);
    }
}
