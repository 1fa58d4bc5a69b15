use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::CrossingError;
use crate::types::{CrossingPoint, LengthSignature};
use crate::util::{pairwise_combinations, PairingConfig};
use crate::word_list::Word;

/// Canonical order for the two words of a pair: longer first, then alphabetical.
#[must_use]
pub fn word_order(a: &Word, b: &Word) -> Ordering {
    b.len().cmp(&a.len()).then_with(|| a.cmp(b))
}

/// An unordered pair of two different words, stored in canonical order (see `word_order`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct WordPair {
    first: Word,
    second: Word,
}

impl WordPair {
    pub fn new(a: Word, b: Word) -> Result<WordPair, CrossingError> {
        if a == b {
            return Err(CrossingError::IdenticalWords(a));
        }

        let (first, second) = match word_order(&a, &b) {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };

        Ok(WordPair { first, second })
    }

    #[must_use]
    pub fn first(&self) -> &Word {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &Word {
        &self.second
    }

    #[must_use]
    pub fn words(&self) -> [&Word; 2] {
        [&self.first, &self.second]
    }

    #[must_use]
    pub fn signature(&self) -> LengthSignature {
        LengthSignature::new(self.first.len(), self.second.len())
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        &self.first == word || &self.second == word
    }

    /// Could the two words be laid out so they intersect at `point`?
    #[must_use]
    pub fn crosses_at(&self, point: CrossingPoint) -> bool {
        match (self.first.glyphs().get(point.0), self.second.glyphs().get(point.1)) {
            (Some(ch1), Some(ch2)) => ch1 == ch2,
            _ => false,
        }
    }

    /// Do the two pairs have any word in common?
    #[must_use]
    pub fn shares_word_with(&self, other: &WordPair) -> bool {
        self.words().into_iter().any(|word| other.contains(word))
    }
}

impl fmt::Display for WordPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Find every pair of one word from `length_m` and one from `length_n`. The two buckets may be
/// the same bucket; a word is never paired with itself and each pair is only reported once.
pub fn find_pairs(length_m: &[Word], length_n: &[Word]) -> Result<Vec<WordPair>, CrossingError> {
    let config = PairingConfig {
        allow_self_pairing: false,
        sort_output: true,
        pair_order: word_order,
    };

    pairwise_combinations(length_m, length_n, &config)
        .into_iter()
        .map(|(wd1, wd2)| WordPair::new(wd1, wd2))
        .collect()
}
