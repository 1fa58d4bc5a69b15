use std::collections::BTreeMap;

use crate::error::CrossingError;
use crate::types::{CrossingPoint, LengthSignature};
use crate::word_pair::WordPair;

/// Find all possible crossing points for the given pair of words. A pair has a crossing point at
/// `(i, j)` if `first[i] == second[j]`, i.e. the two words could be placed on a grid so that they
/// intersect at this letter. Every occurrence counts, not just the first.
#[must_use]
pub fn xpoints_for_pair(pair: &WordPair) -> Vec<CrossingPoint> {
    let second = pair.second().glyphs();

    pair.first()
        .glyphs()
        .iter()
        .enumerate()
        .flat_map(|(i, ch1)| {
            second
                .iter()
                .enumerate()
                .filter(move |&(_, ch2)| ch1 == ch2)
                .map(move |(j, _)| CrossingPoint(i, j))
        })
        .collect()
}

/// Word pairs grouped by the crossing points they admit. Every pair in here has the same length
/// signature, which is fixed when the structure is created and checked on each insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpointGroups {
    signature: LengthSignature,
    groups: BTreeMap<CrossingPoint, Vec<WordPair>>,
}

impl XpointGroups {
    #[must_use]
    pub fn new(signature: LengthSignature) -> XpointGroups {
        XpointGroups {
            signature,
            groups: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn signature(&self) -> LengthSignature {
        self.signature
    }

    /// Length of the first word of every pair.
    #[must_use]
    pub fn m(&self) -> usize {
        self.signature.m
    }

    /// Length of the second word of every pair.
    #[must_use]
    pub fn n(&self) -> usize {
        self.signature.n
    }

    /// Record that `pair` admits `point`.
    pub fn insert(&mut self, point: CrossingPoint, pair: WordPair) -> Result<(), CrossingError> {
        if pair.signature() != self.signature {
            return Err(CrossingError::SignatureMismatch {
                expected: self.signature,
                found: pair.signature(),
            });
        }
        if !self.signature.contains(point) {
            return Err(CrossingError::PointOutOfBounds {
                point,
                signature: self.signature,
            });
        }
        if !pair.crosses_at(point) {
            return Err(CrossingError::InvalidCrossing { pair, point });
        }

        self.groups.entry(point).or_default().push(pair);
        Ok(())
    }

    /// The distinct crossing points admitted by at least one pair, in ascending order.
    pub fn points(&self) -> impl Iterator<Item = CrossingPoint> + '_ {
        self.groups.keys().copied()
    }

    /// The pairs admitting `point`, in insertion order. Empty if no pair does.
    #[must_use]
    pub fn pairs_at(&self, point: CrossingPoint) -> &[WordPair] {
        self.groups
            .get(&point)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CrossingPoint, &[WordPair])> + '_ {
        self.groups
            .iter()
            .map(|(&point, pairs)| (point, pairs.as_slice()))
    }

    /// Number of distinct crossing points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group all pairs by their valid crossing points. A pair with several crossing points lands in
/// several groups; a pair with none is dropped.
pub fn group_by_xpoint(
    signature: LengthSignature,
    pairs: &[WordPair],
) -> Result<XpointGroups, CrossingError> {
    let mut grps = XpointGroups::new(signature);
    for pair in pairs {
        for xpt in xpoints_for_pair(pair) {
            grps.insert(xpt, pair.clone())?;
        }
    }
    Ok(grps)
}
