use thiserror::Error;

use crate::types::{CrossingPoint, LengthSignature};
use crate::word_list::Word;
use crate::word_pair::WordPair;

/// Structural violations when assembling word pairs, crossing point groups, or multicrossings.
/// None of these should be reachable through the search pipeline; seeing one means a defect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrossingError {
    #[error("A word pair needs two different words (got “{0}” twice)")]
    IdenticalWords(Word),

    #[error("Word pair has lengths {found} but the group expects {expected}")]
    SignatureMismatch {
        expected: LengthSignature,
        found: LengthSignature,
    },

    #[error("Crossing point {point} is outside a {signature} grid")]
    PointOutOfBounds {
        point: CrossingPoint,
        signature: LengthSignature,
    },

    #[error("Word pair {pair} doesn’t cross at {point}")]
    InvalidCrossing { pair: WordPair, point: CrossingPoint },

    #[error("“{0}” appears more than once in the multicrossing")]
    RepeatedWord(Word),

    #[error("Crossing points {first} and {second} are not reciprocal in a {signature} grid")]
    NotReciprocal {
        first: CrossingPoint,
        second: CrossingPoint,
        signature: LengthSignature,
    },
}

/// Problems encountered while loading a word list source. These are collected per source rather
/// than aborting the load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordListError {
    #[error("Can’t read file: “{0}”")]
    InvalidPath(String),

    #[error("Word list contains invalid word: “{0}”")]
    InvalidWord(String),
}
