//! Formatting utilities for terminal output

use crate::core::Classification;
use crate::game::Cell;
use colored::{ColoredString, Colorize};

/// Classifications of a row as emoji squares
#[must_use]
pub fn row_emoji(cells: &[Cell]) -> String {
    cells.iter().map(|cell| cell.classification.emoji()).collect()
}

/// Text coloured the way a tile of this classification looks
#[must_use]
pub fn paint(text: &str, classification: Classification) -> ColoredString {
    match classification {
        Classification::Correct => text.black().on_green().bold(),
        Classification::Present => text.black().on_yellow().bold(),
        Classification::Absent => text.white().on_bright_black(),
        Classification::Unset => text.bright_white().bold(),
    }
}

/// Letters of a row as coloured tiles
#[must_use]
pub fn row_tiles(cells: &[Cell]) -> String {
    cells
        .iter()
        .map(|cell| {
            let letter = cell.letter.map_or_else(|| "·".to_string(), String::from);
            paint(&format!(" {letter} "), cell.classification).to_string()
        })
        .collect::<Vec<_>>()
        .join("")
}
