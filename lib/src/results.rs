use crate::data::WORD_LENGTH;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::io;
use std::result::Result;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::engine::TurnReport;

/// The result of a given letter at a specific location.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LetterResult {
    Correct,
    PresentNotHere,
    NotPresent,
}

impl LetterResult {
    /// The character used for this result in an answer key: `1`, `0` or `-`.
    pub fn as_key_char(&self) -> char {
        match self {
            LetterResult::Correct => '1',
            LetterResult::PresentNotHere => '0',
            LetterResult::NotPresent => '-',
        }
    }

    /// Whether this result proves that the letter is in the word.
    pub fn is_present(&self) -> bool {
        *self != LetterResult::NotPresent
    }
}

/// A constraint that a hard-mode guess failed to meet.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum HardModeViolation {
    #[error("the guess must contain '{0}'")]
    MissingLetter(char),
    #[error("letter {} must be '{}'", .location + 1, .letter)]
    LetterNotAt { letter: char, location: usize },
}

/// Indicates that an error occurred while playing or solving a game.
#[derive(Debug, Error)]
pub enum WordleError {
    /// A word did not have the expected number of letters. Holds the length that was found.
    #[error("words must have {} letters, but this one has {0}", WORD_LENGTH)]
    WordLength(usize),
    /// Indicates that one or more given characters are not in the supported set.
    #[error("unsupported character {0:?}: only the letters a-z are allowed")]
    UnsupportedCharacter(char),
    /// The word is not in the word bank.
    #[error("\"{0}\" is not in the word list")]
    NotInWordList(String),
    /// A hard-mode guess ignored a known hint.
    #[error("hard mode: {0}")]
    HardMode(HardModeViolation),
    /// No word in the bank is consistent with the results seen so far.
    #[error("no possible words remain; the answer may be missing from the word list")]
    NoCandidates,
    /// Indicates that the given `GuessResult`s are impossible due to some inconsistency.
    #[error("the results contradict earlier results")]
    InvalidResults,
    /// An answer key did not match `^[-01]{5}$`.
    #[error("invalid answer key {0:?}: enter one of '-', '0' or '1' for each letter")]
    InvalidAnswerKey(String),
    /// A turn was played after the game finished.
    #[error("the game is already over")]
    GameOver,
    #[error("could not read the word list")]
    Io(#[from] io::Error),
}

/// The result of a single word guess.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct GuessResult<'a> {
    pub guess: &'a str,
    /// The result of each letter, provided in the same letter order as in the guess.
    pub results: Vec<LetterResult>,
}

impl<'a> GuessResult<'a> {
    /// Parses an answer key reported by a player, e.g. `"-0-10"`.
    ///
    /// Each character gives the result for the letter at the same position of the guess: `-` if
    /// the letter is not in the word, `0` if it is in the word but elsewhere, and `1` if it is in
    /// the right place.
    ///
    /// ```
    /// use wordle_bot::{GuessResult, LetterResult};
    ///
    /// let result = GuessResult::from_answer_key("crane", "--1-1").unwrap();
    /// assert_eq!(result.results[2], LetterResult::Correct);
    /// ```
    pub fn from_answer_key(guess: &'a str, key: &str) -> Result<GuessResult<'a>, WordleError> {
        if guess.len() != WORD_LENGTH {
            return Err(WordleError::WordLength(guess.len()));
        }
        let key = key.trim();
        if key.chars().count() != WORD_LENGTH {
            return Err(WordleError::InvalidAnswerKey(key.to_string()));
        }
        let results = key
            .chars()
            .map(|c| match c {
                '-' => Ok(LetterResult::NotPresent),
                '0' => Ok(LetterResult::PresentNotHere),
                '1' => Ok(LetterResult::Correct),
                _ => Err(WordleError::InvalidAnswerKey(key.to_string())),
            })
            .collect::<Result<Vec<LetterResult>, WordleError>>()?;
        Ok(GuessResult { guess, results })
    }

    /// Returns `true` iff every letter is in the right place.
    pub fn is_correct(&self) -> bool {
        self.results
            .iter()
            .all(|result| *result == LetterResult::Correct)
    }

    /// Renders the results in answer key form, e.g. `"-0-10"`.
    pub fn answer_key(&self) -> String {
        render_answer_key(&self.results)
    }

    /// Renders the letters revealed by this guess: upper case if in the right place, lower case
    /// if elsewhere in the word, and `_` if not in the word.
    pub fn revealed(&self) -> String {
        render_revealed(self.guess, &self.results)
    }

    /// The letters that this result proves are in the word.
    pub fn required_letters(&self) -> BTreeSet<char> {
        self.guess
            .chars()
            .zip(self.results.iter())
            .filter(|(_, result)| result.is_present())
            .map(|(letter, _)| letter)
            .collect()
    }

    /// The letters that this result proves are not in the word.
    ///
    /// A letter that was marked `NotPresent` in one place but found elsewhere in the same guess is
    /// not absent; it just appears fewer times than guessed.
    pub fn absent_letters(&self) -> BTreeSet<char> {
        let required = self.required_letters();
        self.guess
            .chars()
            .zip(self.results.iter())
            .filter(|(letter, result)| {
                **result == LetterResult::NotPresent && !required.contains(letter)
            })
            .map(|(letter, _)| letter)
            .collect()
    }
}

pub(crate) fn render_answer_key(results: &[LetterResult]) -> String {
    results.iter().map(LetterResult::as_key_char).collect()
}

pub(crate) fn render_revealed(guess: &str, results: &[LetterResult]) -> String {
    guess
        .chars()
        .zip(results.iter())
        .map(|(letter, result)| match result {
            LetterResult::Correct => letter.to_ascii_uppercase(),
            LetterResult::PresentNotHere => letter,
            LetterResult::NotPresent => '_',
        })
        .collect()
}

/// Whether the game was won or lost by the player, along with every turn that was played.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameResult {
    /// The last guess was the objective word.
    Success(Vec<TurnReport>),
    /// The turns ran out before the word was guessed.
    Failure(Vec<TurnReport>),
}

impl GameResult {
    pub fn turns(&self) -> &[TurnReport] {
        match self {
            GameResult::Success(turns) | GameResult::Failure(turns) => turns,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GameResult::Success(_))
    }
}

/// Determines the result of the given `guess` when applied to the given `objective`.
///
/// Correct letters are found first, and each one uses up its letter in the objective. Only the
/// occurrences left over can mark other guess letters as present, so a letter is never reported
/// more times than the objective contains it.
///
/// ```
/// use wordle_bot::{get_result_for_guess, LetterResult};
///
/// let result = get_result_for_guess("goose", "sassy").unwrap();
/// assert_eq!(
///     result.results,
///     vec![
///         LetterResult::NotPresent,
///         LetterResult::NotPresent,
///         LetterResult::NotPresent,
///         LetterResult::Correct,
///         LetterResult::NotPresent,
///     ]
/// );
/// ```
pub fn get_result_for_guess<'a>(
    objective: &str,
    guess: &'a str,
) -> Result<GuessResult<'a>, WordleError> {
    check_letters(objective)?;
    check_letters(guess)?;
    if objective.len() != guess.len() {
        return Err(WordleError::WordLength(guess.len()));
    }

    let mut remaining: HashMap<u8, usize> = HashMap::new();
    let mut results = vec![LetterResult::NotPresent; guess.len()];
    for (index, (guess_letter, objective_letter)) in
        guess.bytes().zip(objective.bytes()).enumerate()
    {
        if guess_letter == objective_letter {
            results[index] = LetterResult::Correct;
        } else {
            *remaining.entry(objective_letter).or_insert(0) += 1;
        }
    }
    for (index, letter) in guess.bytes().enumerate() {
        if results[index] == LetterResult::Correct {
            continue;
        }
        if let Some(count) = remaining.get_mut(&letter) {
            if *count > 0 {
                *count -= 1;
                results[index] = LetterResult::PresentNotHere;
            }
        }
    }
    Ok(GuessResult { guess, results })
}

fn check_letters(word: &str) -> Result<(), WordleError> {
    match word.chars().find(|c| !c.is_ascii_lowercase()) {
        Some(c) => Err(WordleError::UnsupportedCharacter(c)),
        None => Ok(()),
    }
}
