pub mod error;
pub mod multicrossing;
pub mod reciprocal;
pub mod search;
pub mod types;
pub mod util;
pub mod word_list;
pub mod word_pair;
pub mod xpoints;

pub use error::{CrossingError, WordListError};
pub use multicrossing::{Multicrossing, MulticrossingSet, RequiredWords};
pub use search::{find_all_crossings, find_all_crossings_in_words, SearchConfig, SearchSuccess};
pub use types::{CrossingPoint, LengthSignature};
pub use word_list::{Word, WordList};
pub use word_pair::WordPair;

pub const CHECK_INVARIANTS: bool = cfg!(feature = "check_invariants");

/// The expected maximum length for a single word. Longer words still work; they just spill onto
/// the heap.
pub const MAX_WORD_LENGTH: usize = 21;
