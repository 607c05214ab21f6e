//! Wordle Entropy CLI
//!
//! Interactive command-line interface for the entropy solver.

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use wordle_entropy::config::{DEFAULT_MAX_ROUNDS, DEFAULT_TOP_N};
use wordle_entropy::{
    load_dictionary, CancelToken, Corpus, FeedbackPattern, Result, SolverConfig, SolverError,
    SolverSession, WORD_LENGTH,
};

const BANNER_TEXT: &str = include_str!("text/banner.txt");

#[derive(Parser, Debug)]
#[command(name = "wordle-entropy", version, about)]
struct Cli {
    /// Word list, one word per line (defaults to the built-in dictionary)
    #[arg(long, value_name = "PATH")]
    words: Option<PathBuf>,
    /// Letters per word
    #[arg(short = 'l', long, default_value_t = WORD_LENGTH)]
    length: usize,
    /// How many ranked guesses to show
    #[arg(short, long, default_value_t = DEFAULT_TOP_N)]
    top: usize,
    /// Give up self-play after this many guesses
    #[arg(long, default_value_t = DEFAULT_MAX_ROUNDS)]
    max_rounds: usize,
    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,
    /// Log solver progress
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the best opening guess
    Suggest,
    /// Let the solver play against a known word
    Solve { target: String },
    /// Self-play against every word in the list
    Benchmark,
}

impl Cli {
    fn config(&self) -> SolverConfig {
        SolverConfig {
            word_length: self.length,
            top_n: self.top,
            max_rounds: self.max_rounds,
            threads: self.threads,
        }
    }
}

/// Progress indicator on its own thread, stopped through a [`CancelToken`].
struct Spinner {
    done: CancelToken,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    fn new(message: &'static str) -> Self {
        let done = CancelToken::new();
        let watched = done.clone();
        let handle = thread::spawn(move || {
            let frames = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut i = 0;
            while !watched.is_cancelled() {
                print!("\r{} {}", frames[i % frames.len()], message);
                let _ = io::stdout().flush();
                thread::sleep(Duration::from_millis(80));
                i += 1;
            }
            print!("\r{}\r", " ".repeat(message.len() + 3));
            let _ = io::stdout().flush();
        });
        Self {
            done,
            handle: Some(handle),
        }
    }

    fn stop(mut self) {
        self.done.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.done.cancel();
    }
}

fn load_corpus(cli: &Cli, config: &SolverConfig) -> Result<Corpus> {
    match &cli.words {
        Some(path) => Corpus::from_path(path, config.word_length),
        None => load_dictionary(config.word_length),
    }
}

fn start_session(corpus: Corpus) -> Result<SolverSession> {
    let spinner = Spinner::new("Computing feedback matrix...");
    let session = SolverSession::from_corpus(corpus);
    spinner.stop();
    session
}

fn print_top(session: &SolverSession, n: usize) -> Result<()> {
    let ranking = session.rank_guesses()?;
    let top = ranking.top(n);
    println!();
    println!("Top {} guesses:", top.len());
    println!("{:>4} {:>10} {:>8} {:>12} Possible?", "#", "Word", "Bits", "Exp. Remain");
    println!("{}", "-".repeat(50));
    for (i, analysis) in top.iter().enumerate() {
        println!(
            "{:>4} {:>10} {:>8.3} {:>12.1} {}",
            i + 1,
            analysis.word.to_uppercase(),
            analysis.entropy,
            analysis.expected_remaining,
            if analysis.is_possible_answer { "✓" } else { "" }
        );
    }
    println!();
    Ok(())
}

fn print_solve(session: &mut SolverSession, target: &str, max_rounds: usize) -> Result<()> {
    println!("Solving for: {}", target.to_uppercase());
    println!();

    let guesses = session.solve_for_target(target, max_rounds)?;
    for (i, (guess, pattern)) in guesses.iter().enumerate() {
        println!("Guess {}: {} → {}", i + 1, guess.to_uppercase(), pattern);
    }

    println!();
    match guesses.last() {
        Some((_, pattern)) if pattern.is_win() => println!("✓ Solved in {} guesses!", guesses.len()),
        _ => println!("✗ Failed to solve within {} guesses.", max_rounds),
    }
    println!();
    Ok(())
}

fn print_benchmark(session: &SolverSession, max_rounds: usize) -> Result<()> {
    println!();
    println!("Running benchmark on all {} words...", session.corpus().len());

    let spinner = Spinner::new("Computing...");
    let start = Instant::now();
    let distribution = session.benchmark_guess_distribution(max_rounds);
    let elapsed = start.elapsed();
    spinner.stop();
    let distribution = distribution?;

    let total: usize = distribution.iter().map(|(_, c)| c).sum();
    let total_guesses: usize = distribution.iter().map(|(g, c)| g * c).sum();
    let average = total_guesses as f64 / total as f64;

    println!("Guess distribution:");
    for (guesses, count) in &distribution {
        let pct = *count as f64 / total as f64 * 100.0;
        let bar = "█".repeat((*count * 40 / total).max(1));
        let label = if *guesses > max_rounds {
            "failed".to_string()
        } else {
            format!("{} guesses", guesses)
        };
        println!("  {:>10}: {:>5} ({:>5.1}%) {}", label, count, pct, bar);
    }
    println!();
    println!("Average guesses: {:.3}", average);
    println!("Total words: {}", total);
    println!("Time elapsed: {:.2?}", elapsed);
    println!();
    Ok(())
}

fn apply_feedback(session: &mut SolverSession, word: &str, pattern_str: &str) -> Result<()> {
    let pattern = FeedbackPattern::parse(pattern_str, session.corpus().word_length())?;
    let outcome = match session.apply_feedback(word, &pattern) {
        Err(SolverError::EmptyCandidateSet) => {
            println!();
            println!("⚠️  No words match this feedback pattern!");
            println!("Check the entry; the previous {} candidates are kept.", session.remaining_count());
            println!();
            return Ok(());
        }
        other => other?,
    };

    println!();
    println!("Guess: {}", word.to_uppercase());
    println!("Feedback: {}", pattern);
    println!(
        "Eliminated {} words ({} → {})",
        outcome.eliminated(),
        outcome.before,
        outcome.after
    );

    if pattern.is_win() {
        println!();
        println!("🎉 Congratulations! You solved it!");
    } else if outcome.after <= 10 {
        println!();
        println!(
            "Remaining words: {:?}",
            session
                .possible_answers()
                .iter()
                .map(|s| s.to_uppercase())
                .collect::<Vec<_>>()
        );
    }
    println!();
    Ok(())
}

fn run_command(session: &mut SolverSession, parts: &[&str], config: &SolverConfig) -> Result<bool> {
    match parts[0].to_lowercase().as_str() {
        "help" | "h" | "?" => println!("{}", BANNER_TEXT),
        "quit" | "exit" | "q" => {
            println!("Goodbye!");
            return Ok(false);
        }
        "suggest" | "s" | "best" => {
            let analysis = session.best_guess()?;
            println!();
            println!("Best guess: {}", analysis.word.to_uppercase());
            println!("  Expected information: {:.3} bits", analysis.entropy);
            println!("  Expected remaining: {:.1} words", analysis.expected_remaining);
            if analysis.is_possible_answer {
                println!("  ✓ This word is a possible answer");
            } else {
                println!("  ✗ This word is NOT a possible answer");
            }
            println!();
            println!("Remaining possibilities: {}", session.remaining_count());
            println!();
        }
        "top" | "t" => {
            let n = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(config.top_n);
            print_top(session, n)?;
        }
        "feedback" | "f" | "fb" => {
            if parts.len() < 3 {
                println!("Usage: feedback <word> <pattern>");
                println!("Example: feedback crane gybbb");
            } else {
                apply_feedback(session, &parts[1].to_lowercase(), parts[2])?;
            }
        }
        "remaining" | "r" | "left" => {
            let remaining = session.possible_answers();
            println!();
            println!("Remaining possibilities: {}", remaining.len());
            if remaining.len() <= 50 {
                for (i, word) in remaining.iter().enumerate() {
                    if i > 0 && i % 10 == 0 {
                        println!();
                    }
                    print!("{:>8}", word.to_uppercase());
                }
                println!();
            }
            println!();
        }
        "history" => {
            for (i, obs) in session.history().iter().enumerate() {
                println!("{:>2}. {} {}", i + 1, obs.guess.to_uppercase(), obs.pattern);
            }
        }
        "solve" => match parts.get(1) {
            Some(target) => {
                let mut scratch = session.clone();
                scratch.reset();
                print_solve(&mut scratch, &target.to_lowercase(), config.max_rounds)?;
            }
            None => println!("Usage: solve <target_word>"),
        },
        "benchmark" | "bench" => {
            let mut scratch = session.clone();
            scratch.reset();
            print_benchmark(&scratch, config.max_rounds)?;
        }
        "reset" => {
            session.reset();
            println!("Reset to initial state. {} words available.", session.remaining_count());
        }
        _ => {
            println!("Unknown command: {}", parts[0]);
            println!("Type 'help' for available commands.");
        }
    }
    Ok(true)
}

fn run_interactive(mut session: SolverSession, config: &SolverConfig) -> Result<()> {
    for line in BANNER_TEXT.lines().take(6) {
        println!("{}", line);
    }
    println!("Loaded {} words.", session.corpus().len());
    println!("Type 'help' for commands or 'suggest' to get started.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        // Bad input is reported and the session carries on.
        match run_command(&mut session, &parts, config) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("Error: {}", e),
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config();
    config.validate()?;
    config.init_thread_pool()?;

    let corpus = load_corpus(&cli, &config)?;
    let mut session = start_session(corpus)?;

    match &cli.command {
        None => run_interactive(session, &config),
        Some(Command::Suggest) => {
            let analysis = session.best_guess()?;
            println!("Best opening guess: {}", analysis.word.to_uppercase());
            println!("Expected information: {:.3} bits", analysis.entropy);
            print_top(&session, config.top_n)
        }
        Some(Command::Solve { target }) => {
            print_solve(&mut session, &target.to_lowercase(), config.max_rounds)
        }
        Some(Command::Benchmark) => print_benchmark(&session, config.max_rounds),
    }
}

fn main() {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
