use itertools::Itertools;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::fs;
use unicode_normalization::UnicodeNormalization;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

use crate::error::WordListError;
use crate::MAX_WORD_LENGTH;

/// Given a raw entry from a word list, turn it into the normalized form we search with: only
/// alphanumeric characters, upper-cased.
#[must_use]
pub fn normalize_word(raw: &str) -> String {
    raw.to_uppercase()
        .nfc() // Normalize Unicode combining forms
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// A normalized word. Once built it's never mutated; length and indexing are in chars, not bytes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word {
    /// The word as it would appear in a grid.
    normalized_string: String,

    /// The chars making up `normalized_string`, for cheap positional access.
    glyphs: SmallVec<[char; MAX_WORD_LENGTH]>,
}

impl Word {
    /// Build a word from arbitrary input, normalizing it first.
    #[must_use]
    pub fn new(raw: &str) -> Word {
        let normalized_string = normalize_word(raw);
        let glyphs = normalized_string.chars().collect();
        Word {
            normalized_string,
            glyphs,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized_string
    }

    #[must_use]
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Length in chars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl From<&str> for Word {
    fn from(raw: &str) -> Self {
        Word::new(raw)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized_string)
    }
}

impl Debug for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.normalized_string)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Word {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.normalized_string)
    }
}

/// All of the words of a single length, in the order they appeared in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthBucket {
    pub length: usize,
    pub words: Vec<Word>,
}

/// Every unordered combination of two buckets (including each bucket with itself), with the
/// bucket of longer words first in each combination. `buckets` must be sorted by ascending length,
/// as returned by `WordList::group_by_len`.
#[must_use]
pub fn length_bucket_combinations(buckets: &[LengthBucket]) -> Vec<(&LengthBucket, &LengthBucket)> {
    buckets
        .iter()
        .combinations_with_replacement(2)
        .map(|combination| (combination[1], combination[0]))
        .collect()
}

/// Configuration describing a source of word list entries.
#[derive(Debug, Clone)]
pub enum WordListSourceConfig {
    Memory { id: String, words: Vec<String> },
    File { id: String, path: OsString },
    FileContents { id: String, contents: &'static str },
}

impl WordListSourceConfig {
    /// The unique, persistent id of this word list.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            WordListSourceConfig::Memory { id, .. }
            | WordListSourceConfig::FileContents { id, .. }
            | WordListSourceConfig::File { id, .. } => id.clone(),
        }
    }
}

#[derive(Debug)]
pub struct WordListSourceState {
    pub id: String,
    pub errors: Vec<WordListError>,
}

/// `WordListSourceState`s keyed by the `id` of the relevant source.
pub type WordListSourceStates = HashMap<String, WordListSourceState>;

/// Pull entries out of a word list file. Each line holds one entry; anything after a `;` (usually
/// a score) is ignored since we don't rank results.
fn parse_word_list_file_contents(file_contents: &str, errors: &mut Vec<WordListError>) -> Vec<Word> {
    file_contents
        .lines()
        .filter_map(|line| {
            let raw = line.split(';').next().unwrap_or_default().trim();
            if raw.is_empty() {
                return None;
            }

            let word = Word::new(raw);
            if word.is_empty() {
                errors.push(WordListError::InvalidWord(raw.into()));
                return None;
            }

            Some(word)
        })
        .collect()
}

fn load_words_from_source(source: &WordListSourceConfig) -> (Vec<Word>, WordListSourceState) {
    let id = source.id();
    let mut errors = vec![];

    let words = match source {
        WordListSourceConfig::Memory { words, .. } => words
            .iter()
            .filter_map(|raw| {
                let word = Word::new(raw);
                if word.is_empty() {
                    errors.push(WordListError::InvalidWord(raw.clone()));
                    return None;
                }
                Some(word)
            })
            .collect(),

        WordListSourceConfig::File { path, .. } => {
            if let Ok(contents) = fs::read_to_string(path) {
                parse_word_list_file_contents(&contents, &mut errors)
            } else {
                errors.push(WordListError::InvalidPath(path.to_string_lossy().into()));
                vec![]
            }
        }

        WordListSourceConfig::FileContents { contents, .. } => {
            parse_word_list_file_contents(contents, &mut errors)
        }
    };

    (words, WordListSourceState { id, errors })
}

/// Load every source in priority order, keeping only the first occurrence of each normalized word.
fn load_words_from_sources(sources: &[WordListSourceConfig]) -> (Vec<Word>, WordListSourceStates) {
    let mut seen_words: HashSet<Word> = HashSet::new();
    let mut result = vec![];
    let mut states = HashMap::new();

    for source in sources {
        let (words, source_state) = load_words_from_source(source);
        for word in words {
            if seen_words.insert(word.clone()) {
                result.push(word);
            }
        }
        states.insert(source_state.id.clone(), source_state);
    }

    (result, states)
}

/// The pool of candidate words for a search. Words are kept in the order they were supplied;
/// grouping by length happens on demand.
pub struct WordList {
    /// All words, normalized, in input order.
    pub words: Vec<Word>,

    /// The maximum word length provided when loading from sources, if any.
    pub max_length: Option<usize>,

    /// The most recently-received word list sources, as an ordered list.
    pub source_configs: Vec<WordListSourceConfig>,

    /// The last seen state of each word list source, keyed by source id.
    pub source_states: WordListSourceStates,
}

impl WordList {
    /// Construct a new `WordList` using the given sources (omitting any entries that are longer
    /// than `max_length`).
    #[must_use]
    pub fn new(source_configs: Vec<WordListSourceConfig>, max_length: Option<usize>) -> WordList {
        let mut instance = WordList {
            words: vec![],
            max_length,
            source_configs: vec![],
            source_states: HashMap::new(),
        };

        instance.replace_list(source_configs, max_length);

        instance
    }

    /// Build a list straight from raw strings. Unlike loading from sources, duplicates and words
    /// that normalize to nothing are kept as-is.
    pub fn from_words<I, S>(raw_words: I) -> WordList
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        WordList {
            words: raw_words
                .into_iter()
                .map(|raw| Word::new(raw.as_ref()))
                .collect(),
            max_length: None,
            source_configs: vec![],
            source_states: HashMap::new(),
        }
    }

    /// Reload from the given sources, replacing the current contents.
    pub fn replace_list(
        &mut self,
        source_configs: Vec<WordListSourceConfig>,
        max_length: Option<usize>,
    ) {
        self.source_configs = source_configs;
        self.max_length = max_length;

        let (words, source_states) = load_words_from_sources(&self.source_configs);
        self.source_states = source_states;
        self.words = words
            .into_iter()
            .filter(|word| max_length.map_or(true, |max_length| word.len() <= max_length))
            .collect();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Partition the words into one bucket per distinct length, sorted by ascending length. Each
    /// bucket preserves the relative order of the original list.
    #[must_use]
    pub fn group_by_len(&self) -> Vec<LengthBucket> {
        let mut words_by_length: Vec<Vec<Word>> = vec![];

        for word in &self.words {
            while words_by_length.len() < word.len() + 1 {
                words_by_length.push(vec![]);
            }
            words_by_length[word.len()].push(word.clone());
        }

        words_by_length
            .into_iter()
            .enumerate()
            .filter(|(_, words)| !words.is_empty())
            .map(|(length, words)| LengthBucket { length, words })
            .collect()
    }

    /// For each source provided last time we loaded, return any errors it emitted.
    #[must_use]
    pub fn get_source_errors(&self) -> HashMap<String, Vec<WordListError>> {
        self.source_states
            .iter()
            .map(|(source_id, source_state)| (source_id.clone(), source_state.errors.clone()))
            .collect()
    }
}

impl Debug for WordList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordList")
            .field("words", &self.words.len())
            .field("max_length", &self.max_length)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub mod tests {
    use crate::error::WordListError;
    use crate::word_list::{
        length_bucket_combinations, normalize_word, Word, WordList, WordListSourceConfig,
    };
    use std::io::Write;

    fn strings(words: &[Word]) -> Vec<String> {
        words.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("some CLUE"), "SOMECLUE");
        assert_eq!(normalize_word("clue-again"), "CLUEAGAIN");
        assert_eq!(normalize_word("other clue!"), "OTHERCLUE");
        assert_eq!(normalize_word("\"next clue\""), "NEXTCLUE");
        assert_eq!(normalize_word("R2-D2"), "R2D2");
        assert_eq!(normalize_word("?!"), "");
        assert_eq!(normalize_word(""), "");
    }

    #[test]
    fn test_normalize_word_unusual_characters() {
        // Combining form collapses to a single char
        assert_eq!(normalize_word("he\u{301}len"), "H\u{c9}LEN");
        assert_eq!(Word::new("he\u{301}len").len(), 5);
        assert_eq!(Word::new("monsut\u{e2}").len(), 7);
    }

    #[test]
    fn test_normalize_word_without_precomposed_uppercase() {
        // These lowercase letters upper-case to a base letter plus combining marks
        for raw in ["\u{390}bc", "\u{1f0}ab"] {
            let word = Word::new(raw);
            assert!(
                word.glyphs().iter().all(|c| c.is_alphanumeric()),
                "{:?}",
                word.glyphs()
            );
            assert_eq!(Word::new(word.as_str()), word);
        }
        assert_eq!(normalize_word("\u{390}bc"), "\u{3aa}BC");
        assert_eq!(normalize_word("\u{1f0}ab"), "JAB");
    }

    #[test]
    fn test_word_is_idempotent() {
        let word = Word::new("clue-again");
        assert_eq!(Word::new(word.as_str()), word);
        assert_eq!(word.glyphs()[0], 'C');
        assert_eq!(format!("{word}"), "CLUEAGAIN");
    }

    #[test]
    fn test_group_by_len() {
        let word_list = WordList::from_words(["abcd", "xy", "efgh", "xy", "", "pqrstu"]);
        let buckets = word_list.group_by_len();

        assert_eq!(
            buckets.iter().map(|bucket| bucket.length).collect::<Vec<_>>(),
            vec![0, 2, 4, 6]
        );
        assert_eq!(buckets[1].words, vec![Word::new("xy"), Word::new("xy")]);
        assert_eq!(buckets[2].words, vec![Word::new("abcd"), Word::new("efgh")]);
    }

    #[test]
    fn test_length_bucket_combinations() {
        let word_list = WordList::from_words(["aa", "bbb", "cccc"]);
        let buckets = word_list.group_by_len();
        let combinations: Vec<(usize, usize)> = length_bucket_combinations(&buckets)
            .into_iter()
            .map(|(longer, shorter)| (longer.length, shorter.length))
            .collect();

        assert_eq!(
            combinations,
            vec![(2, 2), (3, 2), (4, 2), (3, 3), (4, 3), (4, 4)]
        );
    }

    #[test]
    fn test_length_bucket_combinations_empty() {
        let word_list = WordList::from_words(Vec::<String>::new());
        assert!(length_bucket_combinations(&word_list.group_by_len()).is_empty());
    }

    #[test]
    fn test_sources_dedupe_and_report_errors() {
        let word_list = WordList::new(
            vec![
                WordListSourceConfig::Memory {
                    id: "0".into(),
                    words: vec!["wolves".into(), "--".into(), "Golf".into()],
                },
                WordListSourceConfig::FileContents {
                    id: "1".into(),
                    contents: "golf;50\nwharves;60\n\n!!;10\n",
                },
            ],
            None,
        );

        assert_eq!(
            strings(&word_list.words),
            vec!["WOLVES", "GOLF", "WHARVES"]
        );

        let errors = word_list.get_source_errors();
        assert_eq!(errors["0"], vec![WordListError::InvalidWord("--".into())]);
        assert_eq!(errors["1"], vec![WordListError::InvalidWord("!!".into())]);
    }

    #[test]
    fn test_loads_words_up_to_max_length() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "skate;50\nskates;50\nski").unwrap();

        let word_list = WordList::new(
            vec![WordListSourceConfig::File {
                id: "0".into(),
                path: file.path().into(),
            }],
            Some(5),
        );

        assert_eq!(word_list.max_length, Some(5));
        assert_eq!(
            strings(&word_list.words),
            vec!["SKATE", "SKI"]
        );
        assert!(word_list.get_source_errors()["0"].is_empty());
    }

    #[test]
    fn test_missing_file() {
        let word_list = WordList::new(
            vec![WordListSourceConfig::File {
                id: "0".into(),
                path: "/nonexistent/words.dict".into(),
            }],
            None,
        );

        assert!(word_list.is_empty());
        assert!(matches!(
            word_list.get_source_errors()["0"].as_slice(),
            [WordListError::InvalidPath(_)]
        ));
    }
}
