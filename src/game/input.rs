//! Keyboard and pointer input
//!
//! Input is a small state machine over [`InputState`]:
//!
//! - `Idle`: letters, backspace, enter, arrows and pointer clicks are handled
//! - `Animating`: a row is being revealed, every input is dropped
//! - `Ended`: every input is dropped until the session is replaced
//!
//! Modified keys (Ctrl, Cmd, Alt) are never consumed so host shortcuts keep
//! working.

use super::board::{CellId, MAX_COLS};
use super::keys::KeyCap;
use super::reveal::{PendingReveal, Reveal};
use super::session::{InputState, Session};
use crate::core::{Evaluation, Word};
use tracing::debug;

/// A logical key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Letter(char),
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    /// Map a typed character to a key; only ASCII letters qualify
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        c.is_ascii_alphabetic()
            .then(|| Self::Letter(c.to_ascii_uppercase()))
    }
}

impl From<KeyCap> for Key {
    fn from(cap: KeyCap) -> Self {
        match cap {
            KeyCap::Letter(letter) => Self::Letter(letter),
            KeyCap::Backspace => Self::Backspace,
            KeyCap::Enter => Self::Enter,
        }
    }
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Modifiers {
    #[must_use]
    pub const fn any(self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

/// A key press with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// A key pressed without modifiers
    #[must_use]
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: false,
                meta: false,
                alt: false,
            },
        }
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        Self::plain(key)
    }
}

/// A pointer click on something the game owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    /// A grid cell; only cells of the current row move the cursor
    Cell(CellId),
    /// A key of the on-screen keyboard
    Key(KeyCap),
}

/// Why a submission was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Some cell of the row is still blank
    Incomplete { row: usize },
    /// The letters do not form an accepted word
    NotInWordList { row: usize, guess: String },
}

impl Rejection {
    /// Row to shake
    #[must_use]
    pub const fn row(&self) -> usize {
        match self {
            Self::Incomplete { row } | Self::NotInWordList { row, .. } => *row,
        }
    }
}

/// What handling an input did
#[derive(Debug)]
pub enum Outcome {
    /// Not for the game (modified key); the host may act on it
    Passthrough,
    /// Dropped: input locked, game ended, or nothing to do
    Ignored,
    /// Letters or cursor changed
    Updated,
    /// The row was refused; nothing changed
    Rejected(Rejection),
    /// The row was accepted and locked; drive the reveal to completion
    Submitted(Reveal),
}

impl Session {
    /// Handle a key press
    pub fn handle_key(&mut self, input: KeyInput) -> Outcome {
        if input.modifiers.any() {
            return Outcome::Passthrough;
        }
        if self.state != InputState::Idle {
            debug!(session = %self.id, state = ?self.state, key = ?input.key, "input dropped");
            return Outcome::Ignored;
        }

        match input.key {
            Key::Letter(letter) => self.write_letter(letter),
            Key::Backspace => self.backspace(),
            Key::Enter => self.submit(),
            Key::Left => self.step_cursor(-1),
            Key::Right => self.step_cursor(1),
            // Rows are strictly sequential
            Key::Up | Key::Down => Outcome::Ignored,
        }
    }

    /// Handle a pointer click
    pub fn handle_pointer(&mut self, pointer: Pointer) -> Outcome {
        match pointer {
            Pointer::Key(cap) => self.handle_key(KeyInput::plain(cap.into())),
            Pointer::Cell(id) => {
                if self.state != InputState::Idle
                    || id.row != self.cursor.row
                    || id.board >= self.boards.board_count()
                {
                    return Outcome::Ignored;
                }
                if self.move_cursor_to(id.col) {
                    Outcome::Updated
                } else {
                    Outcome::Ignored
                }
            }
        }
    }

    fn write_letter(&mut self, letter: char) -> Outcome {
        let row = self.cursor.row;
        let col = self.cursor.col;
        if !letter.is_ascii_alphabetic() || col >= MAX_COLS || self.boards.is_row_locked(row) {
            return Outcome::Ignored;
        }

        let active: Vec<usize> = self.boards.active_boards().collect();
        for board in active {
            self.boards.set_cell(CellId::new(board, row, col), letter);
        }
        if col + 1 < MAX_COLS {
            self.cursor.col += 1;
        }
        Outcome::Updated
    }

    fn backspace(&mut self) -> Outcome {
        let row = self.cursor.row;
        let col = self.cursor.col;

        let active: Vec<usize> = self.boards.active_boards().collect();
        let mut cleared = false;
        for board in active {
            cleared |= self.boards.clear_cell(CellId::new(board, row, col));
        }

        if cleared {
            Outcome::Updated
        } else if col > 0 {
            self.cursor.col -= 1;
            Outcome::Updated
        } else {
            Outcome::Ignored
        }
    }

    fn step_cursor(&mut self, delta: isize) -> Outcome {
        let Some(col) = self.cursor.col.checked_add_signed(delta) else {
            return Outcome::Ignored;
        };
        if self.move_cursor_to(col) {
            Outcome::Updated
        } else {
            Outcome::Ignored
        }
    }

    fn submit(&mut self) -> Outcome {
        let row = self.cursor.row;
        let active: Vec<usize> = self.boards.active_boards().collect();

        if active.is_empty()
            || self.boards.is_row_locked(row)
            || !active.iter().all(|&board| self.boards.is_row_filled(board, row))
        {
            return Outcome::Rejected(Rejection::Incomplete { row });
        }

        // Letters are written to every active board at once, so any of them
        // spells the guess
        let guess = self.boards.read_row(active[0], row);
        if !self.validator.is_valid(&guess) {
            debug!(session = %self.id, row, %guess, "guess not in word list");
            return Outcome::Rejected(Rejection::NotInWordList { row, guess });
        }
        let Ok(word) = Word::new(&guess) else {
            return Outcome::Rejected(Rejection::NotInWordList { row, guess });
        };

        let evaluations = active
            .into_iter()
            .filter_map(|board| {
                let target = self.boards.board(board)?.target();
                Some((board, Evaluation::calculate(&word, target)))
            })
            .collect();

        self.boards.lock_row(row);
        self.pending = Some(PendingReveal::new(row, evaluations));
        self.state = InputState::Animating;
        debug!(session = %self.id, row, %guess, "row submitted");

        Outcome::Submitted(Reveal::new(
            self.id,
            row,
            self.step_delay,
            self.cancel.clone(),
        ))
    }
}
