use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use wordle_bot::*;

/// Plays Wordle, either as the guesser or as the host of a game for a person to play.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to a file that contains a list of possible words, with one word on each line.
    #[clap(short = 'w', long, default_value = "words.txt")]
    words_file: String,

    /// Logs the solver's reasoning: pool sizes, letter scores and the chosen word.
    #[clap(short, long)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Let the bot guess a word. Without an answer, the bot asks you to score each of its guesses.
    Solve {
        /// The word for the bot to find.
        #[clap(short, long)]
        answer: Option<String>,
    },
    /// Guess a word yourself. Without an answer, a random word from the list is chosen.
    Play {
        /// The word to find.
        #[clap(short, long)]
        answer: Option<String>,

        /// Every guess must reuse the hints revealed so far.
        #[clap(long)]
        hard: bool,
    },
    /// Benchmark the solver against every word in the words file.
    Benchmark,
}

fn main() -> Result<(), WordleError> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let start_time = Instant::now();
    debug!("File: {}", args.words_file);
    let mut words_reader = io::BufReader::new(File::open(&args.words_file)?);
    let word_bank = WordBank::from_reader(&mut words_reader)?;
    debug!("There are {} possible words.", word_bank.len());
    if word_bank.is_empty() {
        warn!("{} holds no five-letter words", args.words_file);
    }

    match args.command {
        Command::Solve { answer: Some(answer) } => {
            let answer = answer.trim().to_lowercase();
            let mut oracle = KnownAnswer::new(word_bank.checked_get(&answer)?);
            solve(&word_bank, &mut oracle)?;
        }
        Command::Solve { answer: None } => {
            print_answer_key_help();
            solve(&word_bank, &mut AnswerKeyPrompt)?;
        }
        Command::Play { answer, hard } => {
            let answer = match answer {
                Some(answer) => answer.trim().to_lowercase(),
                None => word_bank
                    .choose_random()
                    .ok_or(WordleError::NoCandidates)?
                    .to_string(),
            };
            play(Game::new(&word_bank, &answer, hard)?)?;
        }
        Command::Benchmark => run_benchmark(&word_bank),
    }

    debug!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Asks the person at the terminal to score each guess.
struct AnswerKeyPrompt;

impl Oracle for AnswerKeyPrompt {
    fn feedback<'a>(&mut self, guess: &'a str) -> Result<GuessResult<'a>, WordleError> {
        println!("Optimal Guess: {}", guess);
        loop {
            let input = read_line("Answer key: ")?;
            match GuessResult::from_answer_key(guess, &input) {
                Ok(result) => return Ok(result),
                Err(WordleError::InvalidAnswerKey(_)) => {
                    println!("INVALID ANSWER KEY. Try again.")
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn print_answer_key_help() {
    println!(
        "Choose a word from the word list and I will try to guess it.\n\n\
         For each guess, enter the correctness of each letter as:\n\n\
           * '-' = this letter is not in the word\n\
           * '0' = this letter is in the word, but not in this location\n\
           * '1' = this letter is in the word and in the right location.\n\n\
         For example, if your word was \"spade\" and the guess was \"soapy\", you would enter \"1-10-\"\n"
    );
}

fn solve<O: Oracle>(word_bank: &WordBank, oracle: &mut O) -> Result<(), WordleError> {
    let mut solver = Solver::new(word_bank);
    loop {
        let guess = match solver.select_next_guess() {
            Ok(guess) => guess,
            Err(WordleError::NoCandidates) => {
                println!("No words in the list fit those results. Is the word in the list?");
                println!("Failure!");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let result = oracle.feedback(&guess)?;
        let state = match solver.update(&result) {
            Ok(state) => state,
            Err(WordleError::InvalidResults) => {
                println!("Those results contradict earlier ones. Try again.");
                continue;
            }
            Err(e) => return Err(e),
        };
        print_progress(solver.history());
        match state {
            GameState::AwaitingGuess => {}
            GameState::Solved => {
                println!("Success!");
                return Ok(());
            }
            GameState::Exhausted => {
                println!("Failure!");
                return Ok(());
            }
        }
    }
}

fn play(mut game: Game) -> Result<(), WordleError> {
    println!(
        "Guess the five-letter word in {} tries.{}",
        MAX_TURNS,
        if game.is_hard_mode() {
            " Hard mode: every guess must use the hints found so far."
        } else {
            ""
        }
    );
    while game.state() == GameState::AwaitingGuess {
        let guess = read_line(&format!("Guess {}: ", game.turn()))?.to_lowercase();
        match game.play_turn(&guess) {
            Ok(_) => print_progress(game.history()),
            Err(e) => println!("{}. Try again.", e),
        }
    }
    match game.state() {
        GameState::Solved => println!("Success!"),
        _ => {
            println!("The word was \"{}\".", game.answer());
            println!("Failure!");
        }
    }
    Ok(())
}

fn print_progress(history: &[TurnReport]) {
    for turn in history {
        println!("{}", turn);
    }
    if let Some(last) = history.last() {
        println!("Eliminated letters: {}", last.eliminated());
    }
}

fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut buffer = String::new();
    if io::stdin().read_line(&mut buffer)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input ended before the game was over",
        ));
    }
    Ok(buffer.trim().to_string())
}

/// Tallies the outcome of every benchmark game.
#[derive(Debug, Default)]
struct BenchmarkSummary {
    num_guesses_per_game: Vec<u32>,
    num_failures: u32,
    num_no_candidates: u32,
    num_errors: u32,
}

impl BenchmarkSummary {
    fn from_results(results: &[(Arc<str>, Result<GameResult, WordleError>)]) -> Self {
        let mut summary = BenchmarkSummary::default();
        for (word, result) in results.iter() {
            match result {
                Ok(GameResult::Success(turns)) => {
                    summary.num_guesses_per_game.push(turns.len() as u32)
                }
                Ok(GameResult::Failure(_)) => summary.num_failures += 1,
                Err(WordleError::NoCandidates) => {
                    warn!("No candidates left for {}", word);
                    summary.num_no_candidates += 1;
                }
                Err(e) => {
                    warn!("Could not solve {}: {}", word, e);
                    summary.num_errors += 1;
                }
            }
        }
        summary
    }
}

fn run_benchmark(word_bank: &WordBank) {
    let summary = BenchmarkSummary::from_results(&play_all_games(word_bank, word_bank));
    let num_guesses_per_game = &summary.num_guesses_per_game;
    println!(
        "Solved {} of {} words. Results:",
        num_guesses_per_game.len(),
        word_bank.len()
    );

    let mut num_games_per_round: BTreeMap<u32, u32> = BTreeMap::new();
    for num_guesses in num_guesses_per_game.iter() {
        *(num_games_per_round.entry(*num_guesses).or_insert(0)) += 1;
    }

    println!("|Num guesses|Num games|");
    println!("|-----------|---------|");
    for (num_round, num_games) in num_games_per_round.iter() {
        println!("|{}|{}|", num_round, num_games);
    }

    if !num_guesses_per_game.is_empty() {
        let average: f64 = num_guesses_per_game.iter().sum::<u32>() as f64
            / num_guesses_per_game.len() as f64;
        let std_dev: f64 = (num_guesses_per_game
            .iter()
            .map(|num_guesses| (*num_guesses as f64 - average).powi(2))
            .sum::<f64>()
            / num_guesses_per_game.len() as f64)
            .sqrt();
        println!(
            "\n**Average number of guesses:** {:.2} +/- {:.2}",
            average, std_dev
        );
    }
    println!(
        "**Failed after {} guesses:** {}",
        MAX_TURNS, summary.num_failures
    );
    println!("**Ran out of candidates:** {}", summary.num_no_candidates);
    if summary.num_errors > 0 {
        println!("**Errors:** {}", summary.num_errors);
    }
}
