use crate::data::*;
use crate::restrictions::LetterSlot;
use crate::restrictions::WordRestrictions;
use crate::results::*;
use crate::scorers::select_best_word;
use log::{debug, info};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fmt;
use std::result::Result;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number of guesses allowed in one game.
pub const MAX_TURNS: usize = 6;

/// For this many opening turns, the solver avoids words that repeat a letter, so that each guess
/// probes as many different letters as possible.
pub const REPEAT_LETTER_TURNS: usize = 2;

/// Where a game stands after its latest turn.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GameState {
    /// Waiting for the next guess.
    AwaitingGuess,
    /// The latest guess was correct.
    Solved,
    /// All [`MAX_TURNS`] guesses were used without finding the word.
    Exhausted,
}

/// One row of a game's progress report.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TurnReport {
    /// The one-based turn number.
    pub turn: usize,
    pub guess: Arc<str>,
    pub results: Vec<LetterResult>,
    /// Every letter known to be absent from the word after this turn.
    pub must_not_contain: BTreeSet<char>,
}

impl TurnReport {
    pub fn is_correct(&self) -> bool {
        self.results
            .iter()
            .all(|result| *result == LetterResult::Correct)
    }

    /// The results in answer key form, e.g. `"-0-10"`.
    pub fn answer_key(&self) -> String {
        render_answer_key(&self.results)
    }

    /// The revealed letters, e.g. `"_r_N_"`.
    pub fn revealed(&self) -> String {
        render_revealed(&self.guess, &self.results)
    }

    /// The eliminated letters, e.g. `"c, n, r"`.
    pub fn eliminated(&self) -> String {
        self.must_not_contain
            .iter()
            .map(char::to_string)
            .collect::<Vec<String>>()
            .join(", ")
    }
}

impl fmt::Display for TurnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} | {} | {}",
            self.turn,
            self.guess,
            self.answer_key(),
            self.revealed()
        )
    }
}

/// The restrictions and history shared by both kinds of game.
#[derive(Debug, Default, Clone)]
struct Progress {
    restrictions: WordRestrictions,
    history: Vec<TurnReport>,
}

impl Progress {
    fn record(&mut self, guess: Arc<str>, result: &GuessResult) -> Result<GameState, WordleError> {
        self.restrictions = self.restrictions.fold(result)?;
        let report = TurnReport {
            turn: self.history.len() + 1,
            guess,
            results: result.results.clone(),
            must_not_contain: self.restrictions.must_not_contain().clone(),
        };
        debug!("Turn {}", report);
        debug!(
            "Spot requirements: {:?}",
            self.restrictions
                .slots()
                .iter()
                .map(LetterSlot::not_here)
                .collect::<Vec<_>>()
        );
        let solved = report.is_correct();
        self.history.push(report);
        if solved {
            Ok(GameState::Solved)
        } else if self.history.len() >= MAX_TURNS {
            Ok(GameState::Exhausted)
        } else {
            Ok(GameState::AwaitingGuess)
        }
    }

    fn game_result(&self, state: GameState) -> Option<GameResult> {
        match state {
            GameState::AwaitingGuess => None,
            GameState::Solved => Some(GameResult::Success(self.history.clone())),
            GameState::Exhausted => Some(GameResult::Failure(self.history.clone())),
        }
    }
}

/// Provides the results for the solver's guesses.
pub trait Oracle {
    fn feedback<'a>(&mut self, guess: &'a str) -> Result<GuessResult<'a>, WordleError>;
}

/// An [`Oracle`] that knows the objective word and computes the results itself.
#[derive(Debug, Clone)]
pub struct KnownAnswer {
    answer: Arc<str>,
}

impl KnownAnswer {
    pub fn new(answer: Arc<str>) -> KnownAnswer {
        KnownAnswer { answer }
    }
}

impl Oracle for KnownAnswer {
    fn feedback<'a>(&mut self, guess: &'a str) -> Result<GuessResult<'a>, WordleError> {
        get_result_for_guess(&self.answer, guess)
    }
}

/// Guesses words from the bank, narrowing the possible words with each result.
///
/// Each guess is the highest scoring word, by letter frequency, among the words that are still
/// possible and have not been guessed yet.
///
/// ```
/// use wordle_bot::{GameState, KnownAnswer, Oracle, Solver, WordBank};
///
/// let bank = WordBank::from_iterator(["crane", "slate", "adieu"]);
/// let mut solver = Solver::new(&bank);
/// let mut oracle = KnownAnswer::new(bank[1].clone());
///
/// let guess = solver.select_next_guess()?;
/// assert_eq!(guess.as_ref(), "crane");
/// let state = solver.update(&oracle.feedback(&guess)?)?;
/// assert_eq!(state, GameState::AwaitingGuess);
/// assert_eq!(solver.select_next_guess()?.as_ref(), "slate");
/// # Ok::<(), wordle_bot::WordleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Solver<'a> {
    bank: &'a WordBank,
    progress: Progress,
    state: GameState,
}

impl<'a> Solver<'a> {
    pub fn new(bank: &'a WordBank) -> Solver<'a> {
        Solver {
            bank,
            progress: Progress::default(),
            state: GameState::AwaitingGuess,
        }
    }

    /// The one-based number of the next turn.
    pub fn turn(&self) -> usize {
        self.progress.history.len() + 1
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn restrictions(&self) -> &WordRestrictions {
        &self.progress.restrictions
    }

    pub fn history(&self) -> &[TurnReport] {
        &self.progress.history
    }

    fn guessed(&self) -> Vec<&str> {
        self.progress
            .history
            .iter()
            .map(|turn| turn.guess.as_ref())
            .collect()
    }

    /// The words that may still be the objective and that have not been guessed yet.
    pub fn possible_words(&self) -> Vec<Arc<str>> {
        get_possible_words(&self.progress.restrictions, &self.guessed(), self.bank, true)
    }

    /// Selects the next word to guess.
    ///
    /// During the first [`REPEAT_LETTER_TURNS`] turns, words with repeated letters are skipped
    /// unless no other word is possible. Returns [`WordleError::NoCandidates`] when no word in
    /// the bank fits the results so far.
    pub fn select_next_guess(&self) -> Result<Arc<str>, WordleError> {
        if self.state != GameState::AwaitingGuess {
            return Err(WordleError::GameOver);
        }
        let guessed = self.guessed();
        let allow_repeats = self.turn() > REPEAT_LETTER_TURNS;
        let mut possible_words = get_possible_words(
            &self.progress.restrictions,
            &guessed,
            self.bank,
            allow_repeats,
        );
        if possible_words.is_empty() && !allow_repeats {
            debug!("Only words with repeated letters remain");
            possible_words =
                get_possible_words(&self.progress.restrictions, &guessed, self.bank, true);
        }
        debug!("Number of possibilities: {}", possible_words.len());
        select_best_word(&possible_words).ok_or(WordleError::NoCandidates)
    }

    /// Records the result of the latest guess.
    ///
    /// Results that contradict earlier results are rejected with
    /// [`WordleError::InvalidResults`], and the solver is left as it was.
    pub fn update(&mut self, result: &GuessResult) -> Result<GameState, WordleError> {
        if self.state != GameState::AwaitingGuess {
            return Err(WordleError::GameOver);
        }
        let guess = self
            .bank
            .get(result.guess)
            .unwrap_or_else(|| Arc::from(result.guess));
        self.state = self.progress.record(guess, result)?;
        Ok(self.state)
    }

    /// Plays until the word is found or the turns run out, asking the oracle for each result.
    pub fn play<O: Oracle>(mut self, oracle: &mut O) -> Result<GameResult, WordleError> {
        loop {
            let guess = self.select_next_guess()?;
            let result = oracle.feedback(&guess)?;
            let state = self.update(&result)?;
            if let Some(game_result) = self.progress.game_result(state) {
                return Ok(game_result);
            }
        }
    }
}

/// Has the solver guess the given word using words from the word bank.
pub fn play_game(word_to_guess: &str, bank: &WordBank) -> Result<GameResult, WordleError> {
    let answer = bank.checked_get(word_to_guess)?;
    let result = Solver::new(bank).play(&mut KnownAnswer::new(answer))?;
    info!(
        "{} {} after {} guesses",
        word_to_guess,
        if result.is_success() { "solved" } else { "not solved" },
        result.turns().len()
    );
    Ok(result)
}

/// Has the solver guess each of the given words, running the games in parallel.
///
/// Every game has its own solver; the games share nothing but the read-only bank.
pub fn play_all_games(
    bank: &WordBank,
    answers: &[Arc<str>],
) -> Vec<(Arc<str>, Result<GameResult, WordleError>)> {
    answers
        .par_iter()
        .map(|answer| (Arc::clone(answer), play_game(answer, bank)))
        .collect()
}

/// A game where a person makes the guesses.
///
/// In hard mode, each guess must reuse every hint revealed so far.
#[derive(Debug, Clone)]
pub struct Game<'a> {
    bank: &'a WordBank,
    answer: Arc<str>,
    hard_mode: bool,
    progress: Progress,
    state: GameState,
}

impl<'a> Game<'a> {
    /// Starts a game for the given answer, which must be in the bank.
    pub fn new(bank: &'a WordBank, answer: &str, hard_mode: bool) -> Result<Game<'a>, WordleError> {
        Ok(Game {
            bank,
            answer: bank.checked_get(answer)?,
            hard_mode,
            progress: Progress::default(),
            state: GameState::AwaitingGuess,
        })
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn is_hard_mode(&self) -> bool {
        self.hard_mode
    }

    /// The one-based number of the next turn.
    pub fn turn(&self) -> usize {
        self.progress.history.len() + 1
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn restrictions(&self) -> &WordRestrictions {
        &self.progress.restrictions
    }

    pub fn history(&self) -> &[TurnReport] {
        &self.progress.history
    }

    /// The outcome of the game, once it has ended.
    pub fn result(&self) -> Option<GameResult> {
        self.progress.game_result(self.state)
    }

    /// Checks that the guess is a five-letter word from the bank and, in hard mode, that it uses
    /// the hints found so far.
    pub fn validate_guess(&self, guess: &str) -> Result<Arc<str>, WordleError> {
        let guess = self.bank.checked_get(guess)?;
        if self.hard_mode {
            self.progress.restrictions.check_hard_mode(&guess)?;
        }
        Ok(guess)
    }

    /// Scores the guess against the answer and records it.
    ///
    /// Invalid guesses are rejected without using up a turn.
    pub fn play_turn(&mut self, guess: &str) -> Result<TurnReport, WordleError> {
        if self.state != GameState::AwaitingGuess {
            return Err(WordleError::GameOver);
        }
        let guess = self.validate_guess(guess)?;
        let result = get_result_for_guess(&self.answer, &guess)?;
        self.state = self.progress.record(Arc::clone(&guess), &result)?;
        self.progress
            .history
            .last()
            .cloned()
            .ok_or(WordleError::GameOver)
    }
}
