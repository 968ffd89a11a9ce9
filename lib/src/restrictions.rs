use crate::data::WORD_LENGTH;
use crate::results::GuessResult;
use crate::results::HardModeViolation;
use crate::results::LetterResult;
use crate::results::WordleError;
use std::collections::BTreeSet;
use std::iter::zip;
use std::result::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What is known about a single location in the word.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LetterSlot {
    here: Option<char>,
    not_here: BTreeSet<char>,
}

impl LetterSlot {
    /// The letter known to be at this location, if any.
    pub fn here(&self) -> Option<char> {
        self.here
    }

    /// Letters known not to be at this location.
    pub fn not_here(&self) -> &BTreeSet<char> {
        &self.not_here
    }

    /// Returns `true` iff the letter may be at this location.
    pub fn allows(&self, letter: char) -> bool {
        match self.here {
            Some(here) => here == letter,
            None => !self.not_here.contains(&letter),
        }
    }

    fn set_here(&mut self, letter: char) -> Result<(), WordleError> {
        match self.here {
            Some(here) if here == letter => Ok(()),
            Some(_) => Err(WordleError::InvalidResults),
            None if self.not_here.contains(&letter) => Err(WordleError::InvalidResults),
            None => {
                self.here = Some(letter);
                Ok(())
            }
        }
    }

    fn set_not_here(&mut self, letter: char) -> Result<(), WordleError> {
        if self.here == Some(letter) {
            return Err(WordleError::InvalidResults);
        }
        self.not_here.insert(letter);
        Ok(())
    }
}

/// Defines letter restrictions that a word must adhere to.
///
/// Restrictions only ever tighten: folding in another result never removes a required letter,
/// an eliminated letter, or a known location.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WordRestrictions {
    must_contain: BTreeSet<char>,
    slots: [LetterSlot; WORD_LENGTH],
    must_not_contain: BTreeSet<char>,
}

impl WordRestrictions {
    /// Creates a `WordRestrictions` object with all letters unknown.
    pub fn new() -> WordRestrictions {
        WordRestrictions::default()
    }

    /// Returns the restrictions imposed by the given result.
    pub fn from_result(result: &GuessResult) -> Result<WordRestrictions, WordleError> {
        WordRestrictions::new().fold(result)
    }

    /// Returns these restrictions tightened by the given result. `self` is left unchanged, also
    /// when the result contradicts what is already known.
    pub fn fold(&self, result: &GuessResult) -> Result<WordRestrictions, WordleError> {
        let mut next = self.clone();
        next.update(result)?;
        Ok(next)
    }

    /// Adds restrictions arising from the given guess result.
    ///
    /// On error, these restrictions may have been partially updated.
    pub fn update(&mut self, result: &GuessResult) -> Result<(), WordleError> {
        if result.guess.len() != WORD_LENGTH || result.results.len() != WORD_LENGTH {
            return Err(WordleError::WordLength(result.guess.len()));
        }
        let required = result.required_letters();
        if required
            .iter()
            .any(|letter| self.must_not_contain.contains(letter))
        {
            return Err(WordleError::InvalidResults);
        }
        for ((letter, letter_result), slot) in zip(
            zip(result.guess.chars(), result.results.iter()),
            self.slots.iter_mut(),
        ) {
            match letter_result {
                LetterResult::Correct => slot.set_here(letter)?,
                LetterResult::PresentNotHere => slot.set_not_here(letter)?,
                LetterResult::NotPresent => {
                    slot.set_not_here(letter)?;
                    if !required.contains(&letter) && !self.must_contain.contains(&letter) {
                        self.must_not_contain.insert(letter);
                    }
                }
            }
        }
        self.must_contain.extend(required);
        Ok(())
    }

    /// Returns `true` iff the given word satisfies these restrictions.
    pub fn is_satisfied_by(&self, word: &str) -> bool {
        word.len() == WORD_LENGTH
            && self
                .must_contain
                .iter()
                .all(|letter| word.contains(*letter))
            && zip(word.chars(), self.slots.iter()).all(|(letter, slot)| slot.allows(letter))
            && !word
                .chars()
                .any(|letter| self.must_not_contain.contains(&letter))
    }

    /// Checks that the word reuses every hint found so far, as hard mode requires: each known
    /// letter must be in the word, and each located letter must be in its place.
    ///
    /// Letters that are known not to be somewhere may still be guessed there.
    pub fn check_hard_mode(&self, word: &str) -> Result<(), WordleError> {
        for (location, slot) in self.slots.iter().enumerate() {
            if let Some(letter) = slot.here {
                if word.chars().nth(location) != Some(letter) {
                    return Err(WordleError::HardMode(HardModeViolation::LetterNotAt {
                        letter,
                        location,
                    }));
                }
            }
        }
        match self
            .must_contain
            .iter()
            .find(|letter| !word.contains(**letter))
        {
            Some(letter) => Err(WordleError::HardMode(HardModeViolation::MissingLetter(
                *letter,
            ))),
            None => Ok(()),
        }
    }

    /// Letters that must be somewhere in the word.
    pub fn must_contain(&self) -> &BTreeSet<char> {
        &self.must_contain
    }

    /// Letters that are not in the word at all.
    pub fn must_not_contain(&self) -> &BTreeSet<char> {
        &self.must_not_contain
    }

    pub fn slot(&self, location: usize) -> Option<&LetterSlot> {
        self.slots.get(location)
    }

    /// What is known about each location, in order.
    pub fn slots(&self) -> &[LetterSlot] {
        &self.slots
    }

    /// Renders the located letters, with `.` for unknown locations, e.g. `"..a.e"`.
    pub fn locked_pattern(&self) -> String {
        self.slots
            .iter()
            .map(|slot| slot.here.unwrap_or('.'))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::get_result_for_guess;

    #[test]
    fn from_result_correct_and_absent() -> Result<(), WordleError> {
        let restrictions = WordRestrictions::from_result(&get_result_for_guess("slate", "crane")?)?;

        assert_eq!(restrictions.must_contain(), &BTreeSet::from(['a', 'e']));
        assert_eq!(
            restrictions.must_not_contain(),
            &BTreeSet::from(['c', 'n', 'r'])
        );
        assert_eq!(restrictions.locked_pattern(), "..a.e");
        assert_eq!(
            restrictions.slot(0).unwrap().not_here(),
            &BTreeSet::from(['c'])
        );
        assert_eq!(restrictions.slot(2).unwrap().here(), Some('a'));
        assert_eq!(
            restrictions
                .slots()
                .iter()
                .map(LetterSlot::not_here)
                .collect::<Vec<_>>(),
            vec![
                &BTreeSet::from(['c']),
                &BTreeSet::from(['r']),
                &BTreeSet::new(),
                &BTreeSet::from(['n']),
                &BTreeSet::new(),
            ]
        );
        Ok(())
    }

    #[test]
    fn repeated_letter_marked_absent_is_not_eliminated() -> Result<(), WordleError> {
        // Only one 's' in "goose": the first two 's' in "sassy" are marked not present.
        let restrictions = WordRestrictions::from_result(&get_result_for_guess("goose", "sassy")?)?;

        assert!(restrictions.must_contain().contains(&'s'));
        assert!(!restrictions.must_not_contain().contains(&'s'));
        assert!(restrictions.slot(0).unwrap().not_here().contains(&'s'));
        assert!(restrictions.slot(2).unwrap().not_here().contains(&'s'));
        assert_eq!(restrictions.slot(3).unwrap().here(), Some('s'));
        assert!(restrictions.is_satisfied_by("goose"));
        Ok(())
    }

    #[test]
    fn absent_before_present_in_same_guess() -> Result<(), WordleError> {
        // The first 'e' of "eerie" is not present, but a later one is.
        let result = GuessResult::from_answer_key("eerie", "-0---")?;

        let restrictions = WordRestrictions::from_result(&result)?;

        assert!(restrictions.must_contain().contains(&'e'));
        assert!(!restrictions.must_not_contain().contains(&'e'));
        Ok(())
    }

    #[test]
    fn fold_leaves_original_unchanged() -> Result<(), WordleError> {
        let first = WordRestrictions::new();

        let second = first.fold(&get_result_for_guess("slate", "crane")?)?;

        assert_eq!(first, WordRestrictions::new());
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn fold_is_monotonic() -> Result<(), WordleError> {
        let first = WordRestrictions::from_result(&get_result_for_guess("slate", "crane")?)?;

        let second = first.fold(&get_result_for_guess("slate", "sweat")?)?;

        assert!(second.must_contain().is_superset(first.must_contain()));
        assert!(second
            .must_not_contain()
            .is_superset(first.must_not_contain()));
        assert_eq!(second.locked_pattern(), "s.a.e");
        Ok(())
    }

    #[test]
    fn contradicting_lock_is_invalid() -> Result<(), WordleError> {
        let restrictions = WordRestrictions::from_result(&get_result_for_guess("slate", "crane")?)?;

        // 'a' was located third, now a different letter is reported there.
        let result = GuessResult::from_answer_key("bloke", "--1-1")?;

        assert!(matches!(
            restrictions.fold(&result),
            Err(WordleError::InvalidResults)
        ));
        Ok(())
    }

    #[test]
    fn requiring_eliminated_letter_is_invalid() -> Result<(), WordleError> {
        let restrictions = WordRestrictions::from_result(&get_result_for_guess("slate", "crane")?)?;

        let result = GuessResult::from_answer_key("ocean", "-0---")?;

        assert!(matches!(
            restrictions.fold(&result),
            Err(WordleError::InvalidResults)
        ));
        Ok(())
    }

    #[test]
    fn is_satisfied_by() -> Result<(), WordleError> {
        let restrictions = WordRestrictions::from_result(&get_result_for_guess("slate", "crane")?)?;

        assert!(restrictions.is_satisfied_by("slate"));
        assert!(restrictions.is_satisfied_by("blade"));
        // Missing the located 'a'.
        assert!(!restrictions.is_satisfied_by("adieu"));
        // Contains an eliminated letter.
        assert!(!restrictions.is_satisfied_by("crate"));
        assert!(!restrictions.is_satisfied_by("slat"));
        Ok(())
    }

    #[test]
    fn check_hard_mode_requires_located_letter() -> Result<(), WordleError> {
        let restrictions = WordRestrictions::from_result(&get_result_for_guess("slate", "crane")?)?;

        assert!(restrictions.check_hard_mode("blade").is_ok());
        // Eliminated letters are allowed in hard mode.
        assert!(restrictions.check_hard_mode("crane").is_ok());
        assert!(matches!(
            restrictions.check_hard_mode("aisle"),
            Err(WordleError::HardMode(HardModeViolation::LetterNotAt {
                letter: 'a',
                location: 2
            }))
        ));
        assert!(matches!(
            restrictions.check_hard_mode("slant"),
            Err(WordleError::HardMode(HardModeViolation::LetterNotAt {
                letter: 'e',
                location: 4
            }))
        ));
        Ok(())
    }

    #[test]
    fn check_hard_mode_requires_present_letter() -> Result<(), WordleError> {
        let restrictions = WordRestrictions::from_result(&get_result_for_guess("slate", "lunar")?)?;

        assert!(restrictions.check_hard_mode("plaza").is_ok());
        assert!(matches!(
            restrictions.check_hard_mode("pizza"),
            Err(WordleError::HardMode(HardModeViolation::MissingLetter('l')))
        ));
        Ok(())
    }
}
