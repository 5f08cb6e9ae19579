#![cfg(feature = "std")]

//! Text front end: command parsing, outcome messages and the interactive loop.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::actor::GameApi;
use crate::common::Coord;
use crate::game::{GameStatus, GuessOutcome, Hint, SessionError, SessionOutcome, SessionSnapshot};
use crate::ledger::ScoreLedger;

pub const HELP: &str = "Commands: a cell like B3 to fire, 'hint', 'restart', 'scores', 'help', 'quit'.";

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Guess(Coord),
    Hint,
    Restart,
    Scores,
    Help,
    Quit,
}

/// Format a coordinate as column letter plus 1-based row, e.g. `B3`.
pub fn coord_to_string(r: usize, c: usize) -> String {
    let col = (b'A' + c as u8) as char;
    format!("{}{}", col, r + 1)
}

/// Parse a cell like `B3` on a board of side `size`.
pub fn parse_coord(input: &str, size: usize) -> Result<Coord, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    let last_col = (b'A' + size.saturating_sub(1) as u8) as char;
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!(
            "Invalid column '{}' - must be a letter A-{}",
            col_ch, last_col
        ));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= size {
        return Err(format!(
            "Column '{}' out of bounds - must be A-{}",
            col_ch, last_col
        ));
    }
    let row_str: String = chars.collect();
    if row_str.is_empty() {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let row: usize = row_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-{}", row_str, size))?;
    if row == 0 || row > size {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, size));
    }
    Ok((row - 1, col))
}

/// Parse one line of input on a board of side `size`.
pub fn parse_command(input: &str, size: usize) -> Result<Command, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "hint" | "h" => Ok(Command::Hint),
        "restart" | "r" => Ok(Command::Restart),
        "scores" | "s" => Ok(Command::Scores),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        _ => parse_coord(input, size).map(Command::Guess),
    }
}

/// Message shown to the player after a guess.
pub fn describe_outcome(outcome: &SessionOutcome) -> String {
    match outcome.outcome {
        GuessOutcome::AlreadyGuessed => "You already guessed that one.".to_string(),
        GuessOutcome::Hit { sunk: true } => "You hit a ship and sank it!".to_string(),
        GuessOutcome::Hit { sunk: false } => "You hit a ship!".to_string(),
        GuessOutcome::Miss => format!("You missed! Turns left: {}", outcome.turns_left),
        GuessOutcome::Win => format!(
            "Congratulations! You sunk all the battleships in {} seconds!",
            outcome.elapsed_secs
        ),
        GuessOutcome::Loss => {
            let cells: Vec<String> = outcome
                .remaining_ships
                .iter()
                .map(|&(r, c)| coord_to_string(r, c))
                .collect();
            format!(
                "Game Over. The remaining ships were at: {}. Time taken: {} seconds.",
                cells.join(", "),
                outcome.elapsed_secs
            )
        }
    }
}

pub fn describe_hint(hint: Hint) -> String {
    match hint {
        Hint::Ship((r, c)) => format!("A battleship is somewhere around {}", coord_to_string(r, c)),
        Hint::NoShipsLeft => "No ships left to hint!".to_string(),
    }
}

fn print_status<W: Write>(out: &mut W, snap: &SessionSnapshot) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", snap)?;
    match snap.status {
        GameStatus::InProgress => writeln!(
            out,
            "Time: {} seconds | Turns left: {}",
            snap.elapsed_secs, snap.turns_left
        ),
        GameStatus::Won | GameStatus::Lost => {
            writeln!(out, "Game over. Type 'restart' to play again or 'quit' to leave.")
        }
    }
}

/// Play through `api`, reading commands from `input` until it ends or the
/// player quits. Input is read without blocking the runtime.
pub async fn run_game<A, R, W>(
    api: &mut A,
    ledger: &ScoreLedger,
    input: R,
    mut out: W,
) -> anyhow::Result<()>
where
    A: GameApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "Battleship! Sink every ship before your turns run out.")?;
    writeln!(out, "{}", HELP)?;
    let mut lines = input.lines();
    loop {
        let snap = api.snapshot().await?;
        print_status(&mut out, &snap)?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else { break };
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line, snap.view.len()) {
            Err(msg) => writeln!(out, "{}", msg)?,
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(out, "{}", HELP)?,
            Ok(Command::Scores) => writeln!(out, "{}", ledger.load_scores())?,
            Ok(Command::Hint) => writeln!(out, "{}", describe_hint(api.hint().await?))?,
            Ok(Command::Restart) => {
                api.reset().await?;
                writeln!(out, "New game started. Good luck, Captain!")?;
            }
            Ok(Command::Guess((r, c))) => match api.guess(r, c).await {
                Ok(outcome) => writeln!(out, "{}", describe_outcome(&outcome))?,
                Err(SessionError::GameAlreadyOver) | Err(SessionError::NoTurnsLeft) => {
                    writeln!(out, "No more turns left. Please restart the game.")?
                }
                Err(e) => return Err(e.into()),
            },
        }
    }
    writeln!(out)?;
    writeln!(out, "Goodbye!")?;
    Ok(())
}
