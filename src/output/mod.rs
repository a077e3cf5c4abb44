//! Terminal output formatting
//!
//! Coloured tiles and result panels for the text mode.

pub mod display;
pub mod formatters;

pub use display::{print_grid, print_keyboard, print_result, print_row};
