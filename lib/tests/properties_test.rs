use proptest::collection::vec;
use proptest::prelude::*;
use wordle_bot::details::*;
use wordle_bot::*;

use std::sync::Arc;

// A small alphabet makes repeated and shared letters common.
const WORD: &str = "[a-f]{5}";

fn count(word: &str, letter: char) -> usize {
    word.chars().filter(|c| *c == letter).count()
}

proptest! {
    #[test]
    fn letters_are_never_marked_more_often_than_they_occur(guess in WORD, answer in WORD) {
        let result = get_result_for_guess(&answer, &guess).unwrap();

        for letter in guess.chars() {
            let marked = guess
                .chars()
                .zip(result.results.iter())
                .filter(|(c, r)| *c == letter && r.is_present())
                .count();
            prop_assert_eq!(marked, count(&guess, letter).min(count(&answer, letter)));
        }
    }

    #[test]
    fn guessing_the_answer_is_correct(answer in WORD) {
        let result = get_result_for_guess(&answer, &answer).unwrap();

        prop_assert!(result.is_correct());
    }

    #[test]
    fn restrictions_only_tighten(answer in WORD, guesses in vec(WORD, 1..=MAX_TURNS)) {
        let mut restrictions = WordRestrictions::new();
        for guess in &guesses {
            let next = restrictions
                .fold(&get_result_for_guess(&answer, guess).unwrap())
                .unwrap();

            prop_assert!(next.must_contain().is_superset(restrictions.must_contain()));
            prop_assert!(next.must_not_contain().is_superset(restrictions.must_not_contain()));
            for location in 0..WORD_LENGTH {
                let before = restrictions.slot(location).unwrap();
                let after = next.slot(location).unwrap();
                if let Some(letter) = before.here() {
                    prop_assert_eq!(after.here(), Some(letter));
                }
                prop_assert!(after.not_here().is_superset(before.not_here()));
            }
            prop_assert!(next.must_contain().is_disjoint(next.must_not_contain()));
            prop_assert!(next.is_satisfied_by(&answer));
            restrictions = next;
        }
    }

    #[test]
    fn filtering_is_idempotent(
        words in vec(WORD, 1..40),
        answer in WORD,
        guess in WORD,
        allow_repeats in any::<bool>(),
    ) {
        let bank = WordBank::from_iterator(words);
        let restrictions =
            WordRestrictions::from_result(&get_result_for_guess(&answer, &guess).unwrap()).unwrap();

        let once = get_possible_words(&restrictions, &[guess.as_str()], &bank, allow_repeats);
        let twice = get_possible_words(&restrictions, &[guess.as_str()], &once, allow_repeats);

        prop_assert_eq!(&once, &twice);
        prop_assert!(once.iter().all(|word| restrictions.is_satisfied_by(word)));
    }

    #[test]
    fn solver_finds_any_answer_in_a_small_bank(words in vec(WORD, 1..6), pick in any::<usize>()) {
        let bank = WordBank::from_iterator(words);
        let answer: Arc<str> = Arc::clone(&bank[pick % bank.len()]);

        let result = play_game(&answer, &bank).unwrap();

        // Each turn removes at least the wrong guess, so five words always fit in six turns.
        prop_assert!(result.is_success());
        prop_assert_eq!(result.turns().last().map(|turn| turn.guess.clone()), Some(answer));
    }
}
