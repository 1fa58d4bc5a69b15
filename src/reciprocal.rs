use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::types::{CrossingPoint, LengthSignature};

/// Two crossing points that are each other's point-reflection in an m×n grid, stored smaller
/// point first. Both points are the same when the pair sits at the exact center of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReciprocalPair {
    first: CrossingPoint,
    second: CrossingPoint,
}

impl ReciprocalPair {
    /// Pair `point` with its reflection, or `None` if the point lies outside the grid.
    #[must_use]
    pub fn new(point: CrossingPoint, signature: LengthSignature) -> Option<ReciprocalPair> {
        let reciprocal = point.reflect(signature)?;
        Some(ReciprocalPair {
            first: point.min(reciprocal),
            second: point.max(reciprocal),
        })
    }

    #[must_use]
    pub fn first(&self) -> CrossingPoint {
        self.first
    }

    #[must_use]
    pub fn second(&self) -> CrossingPoint {
        self.second
    }

    /// Is this the grid's center point paired with itself?
    #[must_use]
    pub fn is_self_paired(&self) -> bool {
        self.first == self.second
    }
}

impl fmt::Display for ReciprocalPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} & {}", self.first, self.second)
    }
}

/// Find every combination of observed crossing points that are reflections of each other. Each
/// combination is reported once no matter which of its points is encountered first.
#[must_use]
pub fn get_reciprocal_xpoints<I>(xpoints: I, signature: LengthSignature) -> BTreeSet<ReciprocalPair>
where
    I: IntoIterator<Item = CrossingPoint>,
{
    let xpoints: HashSet<CrossingPoint> = xpoints.into_iter().collect();

    xpoints
        .iter()
        .filter_map(|&xp| ReciprocalPair::new(xp, signature))
        .filter(|pair| xpoints.contains(&pair.first) && xpoints.contains(&pair.second))
        .collect()
}
