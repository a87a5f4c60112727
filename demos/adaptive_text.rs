use std::ops::Range;

use arith_codec::Model;
use fenwick_model::{simple::FenwickModel, ValueError};

mod common;

const ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 .,\n-':()[]#*;\"!?*&é/àâè%@$";

const TEXT: &str = "An adaptive model starts out knowing nothing: every \
character is equally likely, and the first few cost nearly seven bits each. \
As the weights accumulate, the common letters get cheap. By the end of a \
paragraph like this one, an 'e' costs only a few bits and the coder is \
comfortably ahead of any fixed-width code. Decoding replays the same \
adaptation in lockstep, so no table ever needs to be transmitted.\n";

#[derive(Debug, Clone)]
pub struct StringModel {
    alphabet: Vec<char>,
    fenwick_model: FenwickModel,
}

impl StringModel {
    #[must_use]
    pub fn new(alphabet: Vec<char>) -> Self {
        let fenwick_model = FenwickModel::builder(alphabet.len(), 1 << 20)
            .panic_on_saturation()
            .build();
        Self {
            alphabet,
            fenwick_model,
        }
    }
}

impl Model for StringModel {
    type B = u64;
    type Symbol = char;
    type ValueError = ValueError;

    fn counts(&self, symbol: Option<&Self::Symbol>) -> Result<Range<Self::B>, Self::ValueError> {
        let fenwick_symbol = symbol.map(|c| self.alphabet.iter().position(|x| x == c).unwrap());
        self.fenwick_model.counts(fenwick_symbol.as_ref())
    }

    fn symbol(&self, value: Self::B) -> Option<Self::Symbol> {
        let index = self.fenwick_model.symbol(value)?;
        self.alphabet.get(index).copied()
    }

    fn max_total(&self) -> Self::B {
        self.fenwick_model.max_total()
    }

    fn total(&self) -> Self::B {
        self.fenwick_model.total()
    }

    fn update(&mut self, symbol: Option<&Self::Symbol>) {
        let fenwick_symbol = symbol.map(|c| self.alphabet.iter().position(|x| x == c).unwrap());
        self.fenwick_model.update(fenwick_symbol.as_ref());
    }
}

fn main() {
    let model = StringModel::new(ALPHABET.chars().collect());

    common::round_trip_string(model, TEXT);
}
