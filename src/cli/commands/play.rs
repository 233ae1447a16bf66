//! Play command - interactive rounds on the terminal
//!
//! Input is line based: `1`-`9` pick a cell (left to right, top to bottom),
//! `r` restarts the round, `m` returns to the mode menu and `q` quits.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::{
    cli::output::{format_scores, render_board},
    config::{GameMode, SessionConfig},
    opponent::Difficulty,
    session::{MoveResult, Session},
    tictactoe::Mark,
};

#[derive(Parser, Debug)]
#[command(about = "Play a game on the terminal")]
pub struct PlayArgs {
    /// Game mode (two-player, vs-computer); asked interactively when omitted
    #[arg(long, short = 'm')]
    pub mode: Option<GameMode>,

    /// Computer strength (easy, medium, hard)
    #[arg(long, short = 'd')]
    pub difficulty: Option<Difficulty>,

    /// Mark played by the human against the computer
    #[arg(long)]
    pub human: Option<Mark>,

    /// Random seed for reproducible computer play
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause before a computer move is shown, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// TOML file with session defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// A line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Cell index 0-8, typed as 1-9
    Cell(usize),
    Restart,
    Menu,
    Quit,
}

impl PlayerInput {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "r" | "restart" => Some(PlayerInput::Restart),
            "m" | "menu" => Some(PlayerInput::Menu),
            "q" | "quit" | "exit" => Some(PlayerInput::Quit),
            other => match other.parse::<usize>() {
                Ok(key @ 1..=9) => Some(PlayerInput::Cell(key - 1)),
                _ => None,
            },
        }
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(mark) = args.human {
        config.human_mark = mark;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(delay) = args.delay_ms {
        config.ai_delay_ms = delay;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let mode = match args.mode {
        Some(mode) => Some(mode),
        None if args.config.is_some() => Some(config.mode),
        None => prompt_mode(&mut input, &mut output)?,
    };
    let Some(mode) = mode else {
        return Ok(());
    };
    config.mode = mode;
    if mode == GameMode::VsComputer && args.difficulty.is_none() && args.config.is_none() {
        let Some(difficulty) = prompt_difficulty(&mut input, &mut output)? else {
            return Ok(());
        };
        config.difficulty = difficulty;
    }

    run(Session::new(config), &mut input, &mut output)
}

/// Ask for a game mode; `None` when input ends or the player quits
fn prompt_mode<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<GameMode>> {
    loop {
        writeln!(
            output,
            "\nChoose a mode: [1] two players  [2] against the computer  [q] quit"
        )?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.trim() {
            "1" => return Ok(Some(GameMode::TwoPlayer)),
            "2" => return Ok(Some(GameMode::VsComputer)),
            "q" | "Q" => return Ok(None),
            other => match other.parse::<GameMode>() {
                Ok(mode) => return Ok(Some(mode)),
                Err(err) => writeln!(output, "{err}")?,
            },
        }
    }
}

/// Ask for the computer's strength; `None` when input ends or the player quits
fn prompt_difficulty<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<Difficulty>> {
    loop {
        writeln!(output, "Choose a difficulty: [1] easy  [2] medium  [3] hard  [q] quit")?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.trim() {
            "1" => return Ok(Some(Difficulty::Easy)),
            "2" => return Ok(Some(Difficulty::Medium)),
            "3" => return Ok(Some(Difficulty::Hard)),
            "q" | "Q" => return Ok(None),
            other => match other.parse::<Difficulty>() {
                Ok(difficulty) => return Ok(Some(difficulty)),
                Err(err) => writeln!(output, "{err}")?,
            },
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line).context("failed to read input")? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Drive a session from line input until the player quits or input ends
pub fn run<R: BufRead, W: Write>(
    mut session: Session,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let mut show_board = true;

    loop {
        if session.is_computer_turn() {
            let delay = session.config().ai_delay_ms;
            writeln!(output, "AI is thinking...")?;
            output.flush()?;
            if delay > 0 {
                thread::sleep(Duration::from_millis(delay));
            }
            session.play_computer_turn()?;
            show_board = true;
        }

        if show_board {
            writeln!(output, "\n{}\n", render_board(session.state()))?;
            match session.end_notice() {
                Some(notice) => {
                    writeln!(output, "{}\n{}", notice.title, notice.message)?;
                    writeln!(output, "{}", format_scores(session.tally()))?;
                    writeln!(output, "[r] play again  [m] menu  [q] quit")?;
                }
                None => {
                    let mark = session.state().current_mark();
                    writeln!(output, "{}'s turn ({mark})", session.player_name(mark))?;
                }
            }
        }
        output.flush()?;

        let Some(line) = read_line(input)? else {
            break;
        };
        show_board = true;
        match PlayerInput::parse(&line) {
            Some(PlayerInput::Cell(index)) => {
                let mark = session.state().current_mark();
                if let MoveResult::Rejected(reason) = session.attempt_move(index, mark)? {
                    writeln!(output, "Invalid move: {reason}")?;
                    show_board = false;
                }
            }
            Some(PlayerInput::Restart) => session.restart()?,
            Some(PlayerInput::Menu) => {
                let Some(mode) = prompt_mode(input, output)? else {
                    break;
                };
                let mut config = SessionConfig {
                    mode,
                    ..session.config().clone()
                };
                if mode == GameMode::VsComputer {
                    let Some(difficulty) = prompt_difficulty(input, output)? else {
                        break;
                    };
                    config.difficulty = difficulty;
                }
                session.reconfigure(config)?;
            }
            Some(PlayerInput::Quit) => break,
            None => {
                writeln!(output, "Type 1-9 to place a mark, r to restart, m for menu, q to quit")?;
                show_board = false;
            }
        }
    }

    debug!(games_played = session.tally().games_played(), "play finished");
    writeln!(output, "\nFinal score: {}", format_scores(session.tally()))?;
    Ok(())
}
