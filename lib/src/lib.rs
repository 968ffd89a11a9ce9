//! Plays and solves Wordle-style puzzles.
//!
//! [`get_result_for_guess`] scores a guess against the objective word. [`Solver`] guesses words
//! itself, narrowing the possible words after each result and picking the one with the most
//! common letters. [`Game`] lets a person make the guesses, optionally in hard mode.

mod data;
mod engine;
mod restrictions;
mod results;
pub mod scorers;

pub use data::validate_word;
pub use data::WordBank;
pub use data::WORD_LENGTH;
pub use engine::*;
pub use results::*;

/// Building blocks used by the solver, for use in custom guessing strategies.
pub mod details {
    pub use crate::data::get_possible_words;
    pub use crate::data::has_repeated_letters;
    pub use crate::restrictions::LetterSlot;
    pub use crate::restrictions::WordRestrictions;
}
