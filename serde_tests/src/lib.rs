#[cfg(test)]
mod tests {

    use std::error::Error;

    use ron;
    use wordle_bot::details::WordRestrictions;
    use wordle_bot::*;

    #[test]
    fn word_restrictions_serde() -> Result<(), Box<dyn Error>> {
        let restrictions =
            WordRestrictions::from_result(&get_result_for_guess("goose", "sassy")?)?;

        let ser = ron::to_string(&restrictions)?;
        let deser = ron::from_str::<WordRestrictions>(&ser)?;

        assert_eq!(deser, restrictions);
        assert!(deser.is_satisfied_by("goose"));
        Ok(())
    }

    #[test]
    fn game_result_serde() -> Result<(), Box<dyn Error>> {
        let bank = WordBank::from_iterator(["crane", "slate", "adieu"]);
        let result = play_game("slate", &bank)?;

        let ser = ron::to_string(&result)?;
        let deser = ron::from_str::<GameResult>(&ser)?;

        assert_eq!(deser, result);
        assert_eq!(deser.turns()[0].to_string(), "1: crane | --1-1 | __A_E");
        Ok(())
    }

    #[test]
    fn letter_result_serde() -> Result<(), Box<dyn Error>> {
        let ser = ron::to_string(&vec![LetterResult::Correct, LetterResult::NotPresent])?;

        assert_eq!(
            ron::from_str::<Vec<LetterResult>>(&ser)?,
            vec![LetterResult::Correct, LetterResult::NotPresent]
        );
        Ok(())
    }
}
