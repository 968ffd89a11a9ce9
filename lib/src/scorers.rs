use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The score given to the most frequent letter. The least frequent letter scores 0.
pub const MAX_LETTER_SCORE: f64 = 20.0;

/// Letter scores computed from how often each letter occurs in a list of words.
///
/// Every occurrence counts, so a word with a repeated letter adds to that letter's count twice.
/// The counts are then scaled linearly so that the least frequent letter scores 0 and the most
/// frequent scores [`MAX_LETTER_SCORE`]. Letters that never occur have no score.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterFrequencies {
    counts: BTreeMap<char, u32>,
    lowest: u32,
    range: u32,
}

impl LetterFrequencies {
    /// Computes the letter scores for the given words.
    ///
    /// If every letter occurs equally often (for example in a list with one word that has no
    /// repeated letters), all letters score 0.
    ///
    /// ```
    /// use wordle_bot::scorers::LetterFrequencies;
    ///
    /// let frequencies = LetterFrequencies::new(&["crane", "slate", "adieu"]);
    ///
    /// assert_eq!(frequencies.score('a'), 20.0);
    /// assert_eq!(frequencies.score('c'), 0.0);
    /// assert_eq!(frequencies.score_word("slate"), 40.0);
    /// ```
    pub fn new<S>(words: &[S]) -> LetterFrequencies
    where
        S: AsRef<str>,
    {
        let mut counts: BTreeMap<char, u32> = BTreeMap::new();
        for word in words {
            for letter in word.as_ref().chars() {
                *counts.entry(letter).or_insert(0) += 1;
            }
        }
        let lowest = counts.values().copied().min().unwrap_or(0);
        let highest = counts.values().copied().max().unwrap_or(0);
        LetterFrequencies {
            counts,
            lowest,
            range: highest - lowest,
        }
    }

    /// How far the letter's count is above the least frequent letter's count.
    fn rank(&self, letter: char) -> u32 {
        self.counts
            .get(&letter)
            .map_or(0, |count| count - self.lowest)
    }

    /// The unscaled score of a word: the sum of each letter's rank.
    ///
    /// Scaling is linear, so ordering words by rank is the same as ordering them by
    /// [`LetterFrequencies::score_word`]. Ranks are exact, so words with the same letters always
    /// tie.
    pub fn rank_word(&self, word: &str) -> u32 {
        word.chars().map(|letter| self.rank(letter)).sum()
    }

    fn scale(&self, rank: u32) -> f64 {
        if self.range == 0 {
            0.0
        } else {
            MAX_LETTER_SCORE * f64::from(rank) / f64::from(self.range)
        }
    }

    /// The score for the given letter, or 0 if it was not in any word.
    pub fn score(&self, letter: char) -> f64 {
        self.scale(self.rank(letter))
    }

    /// Sums the score of each letter in the word, counting repeated letters each time.
    pub fn score_word(&self, word: &str) -> f64 {
        self.scale(self.rank_word(word))
    }

    pub fn scores(&self) -> BTreeMap<char, f64> {
        self.counts
            .keys()
            .map(|letter| (*letter, self.score(*letter)))
            .collect()
    }
}

/// Selects the word with the highest letter-frequency score, computed over the given words.
///
/// Ties go to the word that comes first. A single word is returned as-is without scoring.
pub fn select_best_word(words: &[Arc<str>]) -> Option<Arc<str>> {
    match words {
        [] => None,
        [only_word] => {
            debug!("Only remaining word: {}", only_word);
            Some(Arc::clone(only_word))
        }
        _ => {
            let frequencies = LetterFrequencies::new(words);
            debug!("Letter scores: {:?}", frequencies.scores());
            let mut best: Option<(&Arc<str>, u32)> = None;
            for word in words {
                let rank = frequencies.rank_word(word);
                if best.map_or(true, |(_, best_rank)| rank > best_rank) {
                    best = Some((word, rank));
                }
            }
            best.map(|(word, rank)| {
                debug!(
                    "Best word: {} | Score = {:.2}",
                    word,
                    frequencies.scale(rank)
                );
                Arc::clone(word)
            })
        }
    }
}
