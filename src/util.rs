use itertools::iproduct;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Options controlling `pairwise_combinations`.
pub struct PairingConfig<T> {
    /// May an element be paired with another element equal to it?
    pub allow_self_pairing: bool,

    /// If set, each emitted tuple is ordered by `pair_order`; otherwise it keeps the orientation
    /// (element from `a`, element from `b`).
    pub sort_output: bool,

    /// Ordering used to orient each tuple when `sort_output` is set.
    pub pair_order: fn(&T, &T) -> Ordering,
}

impl<T: Ord> Default for PairingConfig<T> {
    fn default() -> Self {
        PairingConfig {
            allow_self_pairing: false,
            sort_output: true,
            pair_order: <T as Ord>::cmp,
        }
    }
}

impl<T> Clone for PairingConfig<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PairingConfig<T> {}

/// Every pair made of one element of `a` and one element of `b`, with tuples that come out
/// identical (after orienting them per `config`) only reported once. The result is sorted.
#[must_use]
pub fn pairwise_combinations<T: Clone + Ord>(
    a: &[T],
    b: &[T],
    config: &PairingConfig<T>,
) -> Vec<(T, T)> {
    iproduct!(a, b)
        .filter(|(elem_a, elem_b)| config.allow_self_pairing || elem_a != elem_b)
        .map(|(elem_a, elem_b)| {
            if config.sort_output && (config.pair_order)(elem_a, elem_b) == Ordering::Greater {
                (elem_b.clone(), elem_a.clone())
            } else {
                (elem_a.clone(), elem_b.clone())
            }
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
