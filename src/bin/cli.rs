//! Terminal runner for the dance quiz.
//!
//! Prints the clip to play for each round and reads the answer from stdin.
//! An empty line is the "no selection" placeholder, `q` quits.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dancequiz::{
    AnswerOutcome, ClipCatalog, DanceType, QuizConfig, RoundState, Session, demo_catalog,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "dancequiz-cli")]
#[command(about = "Guess the dance type of randomly chosen clips")]
#[command(version)]
struct Args {
    /// Catalog JSON file or directory with one sub-directory per dance type
    #[arg(short, long, env = "DANCEQUIZ_CATALOG")]
    catalog: Option<PathBuf>,

    /// JSON config file with `total_rounds` and `clip_dir`
    #[arg(long, env = "DANCEQUIZ_CONFIG")]
    config: Option<PathBuf>,

    /// Rounds per session (overrides the config file)
    #[arg(short, long, env = "DANCEQUIZ_ROUNDS")]
    rounds: Option<usize>,

    /// Directory clip ids are resolved against (overrides the config file)
    #[arg(long, env = "DANCEQUIZ_CLIP_DIR")]
    clip_dir: Option<String>,

    /// Seed for a reproducible session
    #[arg(long, env = "DANCEQUIZ_SEED")]
    seed: Option<u64>,
}

enum Input {
    Answer(Option<DanceType>),
    Unknown(String),
    Quit,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dancequiz=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = resolve_config(&args)?;
    let catalog = match &args.catalog {
        Some(path) => ClipCatalog::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => demo_catalog(),
    };
    info!(
        clips = catalog.clip_count(),
        rounds = config.total_rounds,
        "catalog ready"
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut session = Session::with_rounds(&mut rng, &catalog, config.total_rounds)
        .context("Failed to start quiz session")?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut out = io::stdout().lock();

    loop {
        play(&mut session, &config, &mut lines, &mut out)?;

        if !session.is_finished() {
            break;
        }

        let summary = session.summary();
        writeln!(out, "\n{}", summary)?;
        for record in &summary.rounds {
            let mark = if record.correct { "+" } else { "-" };
            writeln!(
                out,
                "  {} round {}: {} ({}), answered {}",
                mark, record.round, record.dance, record.clip, record.answer
            )?;
        }

        write!(out, "Play again? [y/N] ")?;
        out.flush()?;
        match lines.next().transpose()? {
            Some(line) if line.trim().eq_ignore_ascii_case("y") => {
                session
                    .replay(&mut rng, &catalog)
                    .context("Failed to restart quiz session")?;
            }
            _ => break,
        }
    }

    Ok(())
}

fn resolve_config(args: &Args) -> Result<QuizConfig> {
    let mut config = match &args.config {
        Some(path) => QuizConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => QuizConfig::default(),
    };

    if let Some(rounds) = args.rounds {
        config.total_rounds = rounds;
    }
    if let Some(clip_dir) = &args.clip_dir {
        config.clip_dir = clip_dir.clone();
    }

    config.validate().context("Invalid quiz configuration")
}

/// Runs rounds until the session finishes or the player quits.
fn play(
    session: &mut Session,
    config: &QuizConfig,
    lines: &mut impl Iterator<Item = io::Result<String>>,
    out: &mut impl Write,
) -> Result<()> {
    let options: Vec<String> = DanceType::ALL
        .iter()
        .enumerate()
        .map(|(index, dance)| format!("{}={}", index + 1, dance))
        .collect();

    writeln!(out, "Round {} of {}", session.round(), session.total_rounds())?;
    writeln!(out, "Play: {}", session.current_clip_path(&config.clip_dir))?;

    loop {
        if !session.is_answered() {
            write!(out, "[{}] > ", options.join(", "))?;
            out.flush()?;

            let input = match lines.next().transpose()? {
                Some(line) => parse_input(&line),
                None => Input::Quit,
            };

            match input {
                Input::Quit => return Ok(()),
                Input::Unknown(text) => {
                    writeln!(out, "Unknown answer: {}", text)?;
                    continue;
                }
                Input::Answer(candidate) => {
                    let outcome = session.submit_answer(candidate);
                    writeln!(out, "{}", outcome)?;
                    if matches!(outcome, AnswerOutcome::NoSelection) {
                        continue;
                    }
                }
            }
        }

        match session.advance_round() {
            RoundState::InProgress { round } => {
                writeln!(out, "\nRound {} of {}", round, session.total_rounds())?;
                writeln!(out, "Play: {}", session.current_clip_path(&config.clip_dir))?;
            }
            RoundState::Finished { .. } => return Ok(()),
            RoundState::AwaitingAnswer { .. } => {}
        }
    }
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();

    if trimmed.eq_ignore_ascii_case("q") {
        return Input::Quit;
    }
    if trimmed.is_empty() {
        return Input::Answer(None);
    }

    if let Ok(index) = trimmed.parse::<usize>() {
        return match index.checked_sub(1).and_then(|index| DanceType::ALL.get(index)) {
            Some(dance) => Input::Answer(Some(*dance)),
            None => Input::Unknown(trimmed.to_string()),
        };
    }

    match trimmed.parse::<DanceType>() {
        Ok(dance) => Input::Answer(Some(dance)),
        Err(_) => Input::Unknown(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(lines: &[&str]) -> std::vec::IntoIter<io::Result<String>> {
        lines
            .iter()
            .map(|line| Ok(line.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_numbers_names_and_placeholder() {
        assert!(matches!(
            parse_input("4"),
            Input::Answer(Some(DanceType::Laendler))
        ));
        assert!(matches!(
            parse_input("Minuet"),
            Input::Answer(Some(DanceType::Minuet))
        ));
        assert!(matches!(parse_input("  "), Input::Answer(None)));
        assert!(matches!(parse_input("Q"), Input::Quit));
        assert!(matches!(parse_input("0"), Input::Unknown(_)));
        assert!(matches!(parse_input("7"), Input::Unknown(_)));
        assert!(matches!(parse_input("polka"), Input::Unknown(_)));
    }

    #[test]
    fn plays_a_full_session_from_script() {
        let catalog = demo_catalog();
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = Session::with_rounds(&mut rng, &catalog, 2).expect("session");
        let first = session.current_dance().to_string();
        let second = session.order()[1].to_string();

        let mut lines = scripted(&["", first.as_str(), second.as_str()]);
        let mut out = Vec::new();

        play(&mut session, &QuizConfig::default(), &mut lines, &mut out).expect("play");

        assert!(session.is_finished());
        assert_eq!(session.correct_count(), 2);

        let transcript = String::from_utf8(out).expect("utf-8 output");
        assert!(transcript.contains("Please choose a dance type first."));
        assert!(transcript.contains("Round 2 of 2"));
        assert!(transcript.contains("Play: audio/"));
    }

    #[test]
    fn quitting_leaves_session_unfinished() {
        let catalog = demo_catalog();
        let mut rng = StdRng::seed_from_u64(4);
        let mut session = Session::new(&mut rng, &catalog).expect("session");

        let mut lines = scripted(&["q"]);
        let mut out = Vec::new();

        play(&mut session, &QuizConfig::default(), &mut lines, &mut out).expect("play");

        assert!(!session.is_finished());
        assert_eq!(session.round(), 1);
    }

    #[test]
    fn command_line_overrides_config_defaults() {
        let args = Args::parse_from(["dancequiz-cli", "--rounds", "4", "--clip-dir", "clips"]);
        let config = resolve_config(&args).expect("config should resolve");

        assert_eq!(config.total_rounds, 4);
        assert_eq!(config.clip_dir, "clips");
    }

    #[test]
    fn rejects_out_of_range_rounds() {
        let args = Args::parse_from(["dancequiz-cli", "--rounds", "0"]);
        assert!(resolve_config(&args).is_err());
    }
}
