use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::CrossingError;
use crate::reciprocal::ReciprocalPair;
use crate::types::{CrossingPoint, LengthSignature};
use crate::util::{pairwise_combinations, PairingConfig};
use crate::word_list::Word;
use crate::word_pair::WordPair;
use crate::xpoints::XpointGroups;
use crate::CHECK_INVARIANTS;

/// A word pair together with the point where its two words cross.
pub type Leg = (WordPair, CrossingPoint);

/// Two word pairs that can be laid out with 180° rotational symmetry: each pair crosses at a
/// point that is the reflection of the other pair's point, and no word is used twice.
///
/// Two multicrossings are equal when they have the same set of word pairs and the same set of
/// crossing points, regardless of which pair was matched with which point.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Multicrossing {
    /// Sorted, so that `legs[0].0 < legs[1].0`.
    legs: [Leg; 2],
}

impl Multicrossing {
    pub fn new(legs: [Leg; 2]) -> Result<Multicrossing, CrossingError> {
        let [(pair_1, point_1), (pair_2, point_2)] = &legs;

        if let Some(word) = pair_1.words().into_iter().find(|word| pair_2.contains(word)) {
            return Err(CrossingError::RepeatedWord(word.clone()));
        }

        let signature = pair_1.signature();
        if pair_2.signature() != signature {
            return Err(CrossingError::SignatureMismatch {
                expected: signature,
                found: pair_2.signature(),
            });
        }

        for (pair, &point) in [(pair_1, point_1), (pair_2, point_2)] {
            if !pair.crosses_at(point) {
                return Err(CrossingError::InvalidCrossing {
                    pair: pair.clone(),
                    point,
                });
            }
        }

        if point_1.reflect(signature) != Some(*point_2) {
            return Err(CrossingError::NotReciprocal {
                first: *point_1,
                second: *point_2,
                signature,
            });
        }

        let mut legs = legs;
        legs.sort();
        Ok(Multicrossing { legs })
    }

    #[must_use]
    pub fn legs(&self) -> &[Leg; 2] {
        &self.legs
    }

    #[must_use]
    pub fn word_pairs(&self) -> [&WordPair; 2] {
        [&self.legs[0].0, &self.legs[1].0]
    }

    /// The crossing point of each word pair, in the same order as `word_pairs`.
    #[must_use]
    pub fn xpoints(&self) -> [CrossingPoint; 2] {
        [self.legs[0].1, self.legs[1].1]
    }

    /// All four words.
    pub fn words(&self) -> impl Iterator<Item = &Word> + '_ {
        self.legs.iter().flat_map(|(pair, _)| pair.words())
    }

    #[must_use]
    pub fn signature(&self) -> LengthSignature {
        self.legs[0].0.signature()
    }

    #[must_use]
    pub fn contains_word(&self, word: &Word) -> bool {
        self.legs.iter().any(|(pair, _)| pair.contains(word))
    }

    /// The pair-set and point-set that identify this multicrossing.
    fn key(&self) -> ([&WordPair; 2], [CrossingPoint; 2]) {
        let [point_1, point_2] = self.xpoints();
        (
            self.word_pairs(),
            [point_1.min(point_2), point_1.max(point_2)],
        )
    }
}

impl PartialEq for Multicrossing {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Multicrossing {}

impl Hash for Multicrossing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Multicrossing {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Multicrossing {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Multicrossing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [(pair_1, point_1), (pair_2, point_2)] = &self.legs;
        write!(f, "{pair_1} @ {point_1} & {pair_2} @ {point_2}")
    }
}

/// Words at least one of which must appear in every reported multicrossing. An empty set doesn't
/// filter anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredWords(HashSet<Word>);

impl RequiredWords {
    /// Normalize and collect the given raw words.
    pub fn new<I, S>(raw_words: I) -> RequiredWords
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw_words
            .into_iter()
            .map(|raw| Word::new(raw.as_ref()))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.0.contains(word)
    }

    /// Does this filter let a combination of these words through?
    pub fn accepts<'a>(&self, mut words: impl Iterator<Item = &'a Word>) -> bool {
        self.is_empty() || words.any(|word| self.contains(word))
    }
}

impl FromIterator<Word> for RequiredWords {
    fn from_iter<T: IntoIterator<Item = Word>>(iter: T) -> Self {
        RequiredWords(iter.into_iter().collect())
    }
}

/// The de-duplicated result of a search, iterated in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MulticrossingSet(BTreeSet<Multicrossing>);

impl MulticrossingSet {
    #[must_use]
    pub fn new() -> MulticrossingSet {
        MulticrossingSet::default()
    }

    /// Add a multicrossing, returning false if an equal one was already present.
    pub fn insert(&mut self, multicrossing: Multicrossing) -> bool {
        self.0.insert(multicrossing)
    }

    #[must_use]
    pub fn contains(&self, multicrossing: &Multicrossing) -> bool {
        self.0.contains(multicrossing)
    }

    /// Merge another set into this one.
    pub fn union_with(&mut self, other: MulticrossingSet) {
        self.0.extend(other.0);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Multicrossing> + '_ {
        self.0.iter()
    }
}

impl FromIterator<Multicrossing> for MulticrossingSet {
    fn from_iter<T: IntoIterator<Item = Multicrossing>>(iter: T) -> Self {
        MulticrossingSet(iter.into_iter().collect())
    }
}

impl IntoIterator for MulticrossingSet {
    type Item = Multicrossing;
    type IntoIter = std::collections::btree_set::IntoIter<Multicrossing>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MulticrossingSet {
    type Item = &'a Multicrossing;
    type IntoIter = std::collections::btree_set::Iter<'a, Multicrossing>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build every multicrossing available from `xpoint_groups`. For each reciprocal point pair, each
/// pair crossing at one point is combined with each pair crossing at the other. Combinations that
/// reuse a word, or that miss every required word, are skipped.
pub fn crossings_from_xpoint_groups(
    xpoint_groups: &XpointGroups,
    reciprocal_xpoint_pairs: &BTreeSet<ReciprocalPair>,
    required_words: &RequiredWords,
) -> Result<MulticrossingSet, CrossingError> {
    let legs_at = |point: CrossingPoint| -> Vec<Leg> {
        xpoint_groups
            .pairs_at(point)
            .iter()
            .map(|pair| (pair.clone(), point))
            .collect()
    };
    let config = PairingConfig::default();
    let mut result = MulticrossingSet::new();

    for rxps in reciprocal_xpoint_pairs {
        let first_legs = legs_at(rxps.first());
        let second_legs = if rxps.is_self_paired() {
            first_legs.clone()
        } else {
            legs_at(rxps.second())
        };

        for (leg_1, leg_2) in pairwise_combinations(&first_legs, &second_legs, &config) {
            if leg_1.0.shares_word_with(&leg_2.0) {
                continue;
            }
            if !required_words.accepts(leg_1.0.words().into_iter().chain(leg_2.0.words())) {
                continue;
            }

            let multicrossing = Multicrossing::new([leg_1, leg_2])?;

            if CHECK_INVARIANTS {
                assert_eq!(multicrossing.words().collect::<HashSet<_>>().len(), 4);
                assert!(required_words.accepts(multicrossing.words()));
                assert_eq!(multicrossing.signature(), xpoint_groups.signature());
            }

            result.insert(multicrossing);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reciprocal::get_reciprocal_xpoints;
    use crate::xpoints::group_by_xpoint;

    fn pair(a: &str, b: &str) -> WordPair {
        WordPair::new(Word::new(a), Word::new(b)).unwrap()
    }

    fn leg(a: &str, b: &str, i: usize, j: usize) -> Leg {
        (pair(a, b), CrossingPoint(i, j))
    }

    fn crossings(pairs: &[WordPair], required_words: &RequiredWords) -> MulticrossingSet {
        let signature = pairs[0].signature();
        let xpoint_groups = group_by_xpoint(signature, pairs).unwrap();
        let reciprocals = get_reciprocal_xpoints(xpoint_groups.points(), signature);
        crossings_from_xpoint_groups(&xpoint_groups, &reciprocals, required_words).unwrap()
    }

    #[test]
    fn test_new_sorts_legs() {
        let forward = Multicrossing::new([
            leg("zdzzzz", "abcde", 1, 3),
            leg("zzzzgz", "fghij", 4, 1),
        ])
        .unwrap();
        let backward = Multicrossing::new([
            leg("zzzzgz", "fghij", 4, 1),
            leg("zdzzzz", "abcde", 1, 3),
        ])
        .unwrap();

        assert_eq!(forward.legs(), backward.legs());
        assert_eq!(forward.word_pairs(), [&pair("zdzzzz", "abcde"), &pair("zzzzgz", "fghij")]);
        assert_eq!(forward.xpoints(), [CrossingPoint(1, 3), CrossingPoint(4, 1)]);
        assert_eq!(forward.signature(), LengthSignature::new(6, 5));
        assert_eq!(
            forward.to_string(),
            "(ZDZZZZ, ABCDE) @ (1, 3) & (ZZZZGZ, FGHIJ) @ (4, 1)"
        );
    }

    #[test]
    fn test_new_rejects_repeated_word() {
        let result = Multicrossing::new([leg("axxxa", "aa", 0, 0), leg("axxxa", "ab", 4, 1)]);
        assert!(matches!(result, Err(CrossingError::RepeatedWord(_))));
    }

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        let result = Multicrossing::new([leg("abc", "ad", 0, 0), leg("xyzw", "ez", 2, 1)]);
        assert!(matches!(
            result,
            Err(CrossingError::SignatureMismatch { .. })
        ));
    }

    #[test]
    fn test_new_rejects_non_reciprocal_points() {
        let result = Multicrossing::new([leg("abc", "ad", 0, 0), leg("xyz", "ex", 0, 1)]);
        assert!(matches!(result, Err(CrossingError::NotReciprocal { .. })));
    }

    #[test]
    fn test_new_rejects_invalid_crossing() {
        let result = Multicrossing::new([leg("abc", "ad", 1, 1), leg("xyz", "ez", 1, 0)]);
        assert!(matches!(
            result,
            Err(CrossingError::InvalidCrossing { .. })
        ));
    }

    #[test]
    fn test_equality_ignores_leg_assignment() {
        // Both pairs cross at (0, 0) and at its reflection (3, 2), so either assignment is valid.
        let a = Multicrossing::new([leg("xaby", "xqy", 0, 0), leg("xcdy", "xry", 3, 2)]).unwrap();
        let b = Multicrossing::new([leg("xaby", "xqy", 3, 2), leg("xcdy", "xry", 0, 0)]).unwrap();

        assert_ne!(a.legs(), b.legs());
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!([a, b].into_iter().collect::<HashSet<_>>().len(), 1);
    }

    #[test]
    fn test_single_multicrossing() {
        let pairs = [
            pair("zdzzzz", "abcde"),
            pair("zdzzzz", "fghij"),
            pair("zzzzgz", "abcde"),
            pair("zzzzgz", "fghij"),
        ];
        let result = crossings(&pairs, &RequiredWords::default());

        let expected = Multicrossing::new([
            leg("zdzzzz", "abcde", 1, 3),
            leg("zzzzgz", "fghij", 4, 1),
        ])
        .unwrap();
        assert_eq!(result.iter().collect::<Vec<_>>(), vec![&expected]);
    }

    #[test]
    fn test_both_leg_assignments_collapse_to_one() {
        // Each pair crosses at (0, 0) and (3, 2), so the generator builds both assignments.
        let pairs = [pair("xaby", "xqy"), pair("xcdy", "xry")];
        let result = crossings(&pairs, &RequiredWords::default());

        assert_eq!(result.len(), 1);
        assert!(result.contains(
            &Multicrossing::new([leg("xaby", "xqy", 0, 0), leg("xcdy", "xry", 3, 2)]).unwrap()
        ));
        assert!(result.contains(
            &Multicrossing::new([leg("xaby", "xqy", 3, 2), leg("xcdy", "xry", 0, 0)]).unwrap()
        ));
    }

    #[test]
    fn test_center_point_pairs_within_one_group() {
        // Both pairs cross at the center of a 3×3 grid.
        let pairs = [pair("abc", "xby"), pair("dbe", "fbg")];
        let result = crossings(&pairs, &RequiredWords::default());

        assert_eq!(result.len(), 1);
        let multicrossing = result.iter().next().unwrap();
        assert_eq!(
            multicrossing.xpoints(),
            [CrossingPoint(1, 1), CrossingPoint(1, 1)]
        );
    }

    #[test]
    fn test_pair_never_combined_with_itself() {
        let pairs = [pair("abc", "xby")];
        assert!(crossings(&pairs, &RequiredWords::default()).is_empty());
    }

    #[test]
    fn test_required_words() {
        let pairs = [pair("abc", "xby"), pair("dbe", "fbg")];

        let required = RequiredWords::new(["dbe"]);
        assert_eq!(crossings(&pairs, &required).len(), 1);

        let required = RequiredWords::new(["nope", "also-nope"]);
        assert!(crossings(&pairs, &required).is_empty());
    }

    #[test]
    fn test_required_words_accepts() {
        let words = [Word::new("abc"), Word::new("def")];

        assert!(RequiredWords::default().accepts(words.iter()));
        assert!(RequiredWords::new(["D.E.F."]).accepts(words.iter()));
        assert!(!RequiredWords::new(["ghi"]).accepts(words.iter()));
    }
}
