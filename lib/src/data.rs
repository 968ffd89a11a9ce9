use crate::restrictions::WordRestrictions;
use crate::results::WordleError;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::io::BufRead;
use std::ops::Deref;
use std::result::Result;
use std::sync::Arc;

/// The number of letters in every word of the game.
pub const WORD_LENGTH: usize = 5;

/// Returns an error unless `word` has exactly [`WORD_LENGTH`] letters, all in `a-z`.
pub fn validate_word(word: &str) -> Result<(), WordleError> {
    if let Some(c) = word.chars().find(|c| !c.is_ascii_lowercase()) {
        return Err(WordleError::UnsupportedCharacter(c));
    }
    if word.len() != WORD_LENGTH {
        return Err(WordleError::WordLength(word.len()));
    }
    Ok(())
}

/// Contains all the possible words for this Wordle game.
///
/// Words keep the order in which they were first given. That order decides ties between equally
/// good guesses.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    all_words: Vec<Arc<str>>,
    positions: HashMap<Arc<str>, usize>,
}

impl WordBank {
    /// Constructs a new `WordBank` struct by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word is trimmed and converted to lower
    /// case. Lines that are not five letters from `a-z` are skipped, as are repeated words.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, WordleError> {
        let lines = word_reader
            .lines()
            .collect::<std::io::Result<Vec<String>>>()?;
        Ok(WordBank::from_iterator(lines))
    }

    /// Constructs a new `WordBank` struct using the words from the given iterator.
    ///
    /// Words are normalized the same way as in [`WordBank::from_reader`].
    pub fn from_iterator<S>(words: impl IntoIterator<Item = S>) -> Self
    where
        S: AsRef<str>,
    {
        let mut positions: HashMap<Arc<str>, usize> = HashMap::new();
        let mut all_words = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if validate_word(&word).is_err() || positions.contains_key(word.as_str()) {
                continue;
            }
            let word: Arc<str> = Arc::from(word.as_str());
            positions.insert(Arc::clone(&word), all_words.len());
            all_words.push(word);
        }
        WordBank {
            all_words,
            positions,
        }
    }

    /// Returns the number of possible words.
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }

    /// Returns `true` iff the word is in the bank.
    pub fn contains(&self, word: &str) -> bool {
        self.positions.contains_key(word)
    }

    /// Returns the bank's copy of the given word, if present.
    pub fn get(&self, word: &str) -> Option<Arc<str>> {
        self.positions
            .get(word)
            .and_then(|position| self.all_words.get(*position))
            .map(Arc::clone)
    }

    /// Returns the bank's copy of `word`, after checking that it is a valid word in the bank.
    pub fn checked_get(&self, word: &str) -> Result<Arc<str>, WordleError> {
        validate_word(word)?;
        self.get(word)
            .ok_or_else(|| WordleError::NotInWordList(word.to_string()))
    }

    /// Picks a word uniformly at random.
    pub fn choose_random(&self) -> Option<Arc<str>> {
        self.all_words
            .choose(&mut rand::thread_rng())
            .map(Arc::clone)
    }
}

impl Deref for WordBank {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}

/// Returns `true` if any letter occurs more than once in the word.
pub fn has_repeated_letters(word: &str) -> bool {
    word.char_indices()
        .any(|(index, letter)| word[index + letter.len_utf8()..].contains(letter))
}

/// Gets the words that meet the given restrictions and have not been guessed yet.
///
/// If `allow_repeats` is `false`, words that repeat a letter are dropped too. Words keep their
/// relative order.
pub fn get_possible_words<S>(
    restrictions: &WordRestrictions,
    guessed: &[S],
    words: &[Arc<str>],
    allow_repeats: bool,
) -> Vec<Arc<str>>
where
    S: AsRef<str>,
{
    words
        .iter()
        .filter(|word| {
            restrictions.is_satisfied_by(word)
                && !guessed.iter().any(|guess| guess.as_ref() == word.as_ref())
                && (allow_repeats || !has_repeated_letters(word))
        })
        .map(Arc::clone)
        .collect()
}
