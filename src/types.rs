use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A pair of char offsets `(i, j)` meaning "the first word's char at `i` equals the second word's
/// char at `j`". Ordered row-major, so sorting a collection of points is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CrossingPoint(pub usize, pub usize);

impl CrossingPoint {
    /// The point-reflection of this point about the center of the grid described by `signature`,
    /// or `None` if the point doesn't fit in that grid.
    #[must_use]
    pub fn reflect(self, signature: LengthSignature) -> Option<CrossingPoint> {
        if !signature.contains(self) {
            return None;
        }
        Some(CrossingPoint(
            signature.m - 1 - self.0,
            signature.n - 1 - self.1,
        ))
    }
}

impl fmt::Display for CrossingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// The lengths `(m, n)` of the first and second word shared by every pair in a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LengthSignature {
    pub m: usize,
    pub n: usize,
}

impl LengthSignature {
    #[must_use]
    pub fn new(m: usize, n: usize) -> LengthSignature {
        LengthSignature { m, n }
    }

    /// Does the point address a cell of an m×n grid?
    #[must_use]
    pub fn contains(&self, point: CrossingPoint) -> bool {
        point.0 < self.m && point.1 < self.n
    }
}

impl fmt::Display for LengthSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.m, self.n)
    }
}
