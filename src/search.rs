use rayon::prelude::*;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::error::CrossingError;
use crate::multicrossing::{crossings_from_xpoint_groups, MulticrossingSet, RequiredWords};
use crate::reciprocal::get_reciprocal_xpoints;
use crate::types::LengthSignature;
use crate::word_list::{length_bucket_combinations, LengthBucket, WordList};
use crate::word_pair::find_pairs;
use crate::xpoints::group_by_xpoint;

/// Settings for a full search over a word list.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// If non-empty, only keep multicrossings using at least one of these words.
    pub required_words: RequiredWords,

    /// Search bucket combinations on the rayon thread pool instead of sequentially. The result is
    /// the same either way.
    pub parallel: bool,
}

/// A struct tracking stats about the search.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub bucket_combinations: usize,
    pub word_pairs: usize,
    pub crossing_points: usize,
    pub reciprocal_pairs: usize,
    pub multicrossings: usize,
    pub total_time: Duration,
}

/// A struct representing the results of a search.
#[derive(Debug)]
pub struct SearchSuccess {
    pub statistics: Statistics,
    pub multicrossings: MulticrossingSet,
}

/// What a single bucket combination contributed.
struct PartialSearch {
    word_pairs: usize,
    crossing_points: usize,
    reciprocal_pairs: usize,
    multicrossings: MulticrossingSet,
}

fn search_bucket_combination(
    length_m: &LengthBucket,
    length_n: &LengthBucket,
    required_words: &RequiredWords,
) -> Result<PartialSearch, CrossingError> {
    let signature = LengthSignature::new(length_m.length, length_n.length);

    let pairs = find_pairs(&length_m.words, &length_n.words)?;
    let xpoint_groups = group_by_xpoint(signature, &pairs)?;
    let reciprocal_xpoint_pairs = get_reciprocal_xpoints(xpoint_groups.points(), signature);
    let multicrossings =
        crossings_from_xpoint_groups(&xpoint_groups, &reciprocal_xpoint_pairs, required_words)?;

    debug!(
        %signature,
        pairs = pairs.len(),
        xpoints = xpoint_groups.len(),
        reciprocal_pairs = reciprocal_xpoint_pairs.len(),
        multicrossings = multicrossings.len(),
        "searched bucket combination"
    );

    Ok(PartialSearch {
        word_pairs: pairs.len(),
        crossing_points: xpoint_groups.len(),
        reciprocal_pairs: reciprocal_xpoint_pairs.len(),
        multicrossings,
    })
}

/// Find multicrossings between words of length m (`length_m`) and words of length n (`length_n`),
/// where m >= n. Two words of length m cross two words of length n, with the second crossing
/// point being the reflection of the first.
pub fn find_crossings(
    length_m: &LengthBucket,
    length_n: &LengthBucket,
    required_words: &RequiredWords,
) -> Result<MulticrossingSet, CrossingError> {
    Ok(search_bucket_combination(length_m, length_n, required_words)?.multicrossings)
}

/// Find every multicrossing in the word list, across all combinations of word lengths.
pub fn find_all_crossings(
    word_list: &WordList,
    config: &SearchConfig,
) -> Result<SearchSuccess, CrossingError> {
    let start = Instant::now();

    let buckets = word_list.group_by_len();
    let combinations = length_bucket_combinations(&buckets);

    let search = |&(length_m, length_n): &(&LengthBucket, &LengthBucket)| {
        search_bucket_combination(length_m, length_n, &config.required_words)
    };

    // Collecting keeps combination order, so merging gives the same set either way.
    let partials: Vec<Result<PartialSearch, CrossingError>> = if config.parallel {
        combinations.par_iter().map(search).collect()
    } else {
        combinations.iter().map(search).collect()
    };

    let mut statistics = Statistics {
        bucket_combinations: combinations.len(),
        ..Statistics::default()
    };
    let mut multicrossings = MulticrossingSet::new();

    for partial in partials {
        let partial = partial?;
        statistics.word_pairs += partial.word_pairs;
        statistics.crossing_points += partial.crossing_points;
        statistics.reciprocal_pairs += partial.reciprocal_pairs;
        multicrossings.union_with(partial.multicrossings);
    }

    statistics.multicrossings = multicrossings.len();
    statistics.total_time = start.elapsed();

    info!(
        words = word_list.len(),
        buckets = buckets.len(),
        multicrossings = statistics.multicrossings,
        elapsed = ?statistics.total_time,
        "search complete"
    );

    Ok(SearchSuccess {
        statistics,
        multicrossings,
    })
}

/// Normalize the raw words (and required words) and find every multicrossing among them.
pub fn find_all_crossings_in_words<W, R>(
    raw_words: &[W],
    required_words: &[R],
) -> Result<MulticrossingSet, CrossingError>
where
    W: AsRef<str>,
    R: AsRef<str>,
{
    let word_list = WordList::from_words(raw_words);
    let config = SearchConfig {
        required_words: RequiredWords::new(required_words),
        parallel: false,
    };

    Ok(find_all_crossings(&word_list, &config)?.multicrossings)
}
