//! Printing game state for the text mode

use super::formatters::{paint, row_emoji, row_tiles};
use crate::game::{GameResult, KeyCap, Session, keyboard_rows};
use colored::Colorize;

/// Print the guess on `row` for every board
pub fn print_row(session: &Session, row: usize) {
    let boards: Vec<String> = session
        .boards()
        .boards()
        .iter()
        .map(|board| {
            let cells = board.row(row);
            if cells.iter().all(|cell| cell.letter.is_none()) && board.is_completed() {
                format!("{:^15}", "solved").green().to_string()
            } else {
                row_tiles(cells)
            }
        })
        .collect();

    println!(
        "  {:>2}. {}",
        (row + 1).to_string().bright_black(),
        boards.join("   ")
    );
}

/// Print every board's emoji grid up to `rows`
pub fn print_grid(session: &Session, rows: usize) {
    for row in 0..rows {
        let line: Vec<String> = session
            .boards()
            .boards()
            .iter()
            .map(|board| row_emoji(board.row(row)))
            .collect();
        println!("      {}", line.join("  "));
    }
}

/// Print the keyboard with each letter in its best colour so far
pub fn print_keyboard(session: &Session) {
    for (indent, keys) in keyboard_rows().iter().enumerate() {
        let line: String = keys
            .iter()
            .filter_map(|cap| match cap {
                KeyCap::Letter(letter) => Some(
                    paint(&letter.to_string(), session.keys().classification_of(*letter)).to_string(),
                ),
                KeyCap::Backspace | KeyCap::Enter => None,
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("      {}{line}", " ".repeat(indent));
    }
}

/// Print the end-of-game panel
pub fn print_result(session: &Session, result: &GameResult) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    if result.won {
        println!("  {}", result.headline().bright_green().bold());
    } else {
        println!("  {}", result.headline().bright_red().bold());
    }
    println!("  {}", result.summary(session.max_rows()).bright_white());

    let words: Vec<&str> = result.targets.iter().map(|word| word.text()).collect();
    println!("  Target: {}", words.join(", ").bright_yellow().bold());

    println!();
    print_grid(session, result.attempts);
    println!("{}", "═".repeat(60).bright_cyan());
}
