//! Per-game state
//!
//! A `Session` owns everything that lives for exactly one game: the boards and
//! their targets, the shared cursor, the keyboard state, and the input state
//! machine. Restarting discards the session wholesale and builds a new one.

use super::board::{BoardModel, MAX_COLS};
use super::keys::KeyStateTracker;
use super::reveal::{CancelToken, PendingReveal};
use super::validator::WordValidator;
use crate::core::Word;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Fewest simultaneous boards
pub const MIN_BOARDS: usize = 1;

/// Most simultaneous boards
pub const MAX_BOARDS: usize = 4;

/// Delay between revealing consecutive cells of a submitted row
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(450);

/// Clamp a requested board count into `[MIN_BOARDS, MAX_BOARDS]`
#[must_use]
pub fn clamp_board_count(requested: usize) -> usize {
    requested.clamp(MIN_BOARDS, MAX_BOARDS)
}

/// Rows per board for a board count: 1 → 6, 2 → 8, 3 or more → 10
#[must_use]
pub fn rows_for_boards(board_count: usize) -> usize {
    match clamp_board_count(board_count) {
        1 => 6,
        2 => 8,
        _ => 10,
    }
}

/// Input state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    /// Accepting input
    Idle,
    /// A submitted row is being revealed; input is dropped
    Animating,
    /// Game over; only a restart leaves this state
    Ended,
}

/// Identity of a session, unique per controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared cursor: all boards sit on the same row and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

/// Outcome of a finished game, handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// Every board was completed
    pub won: bool,
    /// Rows used, counting the final one
    pub attempts: usize,
    /// Target of every board, in board order
    pub targets: Vec<Word>,
}

impl GameResult {
    /// Headline shown when the game ends
    #[must_use]
    pub fn headline(&self) -> &'static str {
        if self.won {
            "Great job! You guessed the word."
        } else {
            "Game Over! Better luck next time!"
        }
    }

    /// One-line summary of the attempts used
    #[must_use]
    pub fn summary(&self, max_rows: usize) -> String {
        if self.won {
            format!("You solved it in {} attempts. Well done!", self.attempts)
        } else {
            format!("You reached the max attempts ({max_rows}). Keep practicing!")
        }
    }
}

/// State of one game
#[derive(Debug)]
pub struct Session {
    pub(super) id: SessionId,
    pub(super) boards: BoardModel,
    pub(super) validator: Arc<WordValidator>,
    pub(super) keys: KeyStateTracker,
    pub(super) cursor: Cursor,
    pub(super) state: InputState,
    pub(super) pending: Option<PendingReveal>,
    pub(super) result: Option<GameResult>,
    pub(super) step_delay: Duration,
    pub(super) cancel: CancelToken,
}

impl Session {
    /// Start a game with one board per target
    ///
    /// The row count follows the number of targets (see [`rows_for_boards`]);
    /// callers pass between one and four targets.
    #[must_use]
    pub fn new(
        id: SessionId,
        targets: Vec<Word>,
        validator: Arc<WordValidator>,
        step_delay: Duration,
    ) -> Self {
        debug_assert!(
            (MIN_BOARDS..=MAX_BOARDS).contains(&targets.len()),
            "board count out of range"
        );
        let rows = rows_for_boards(targets.len());

        Self {
            id,
            boards: BoardModel::new(targets, rows),
            validator,
            keys: KeyStateTracker::new(),
            cursor: Cursor::default(),
            state: InputState::Idle,
            pending: None,
            result: None,
            step_delay,
            cancel: CancelToken::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub const fn boards(&self) -> &BoardModel {
        &self.boards
    }

    #[must_use]
    pub const fn keys(&self) -> &KeyStateTracker {
        &self.keys
    }

    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub const fn state(&self) -> InputState {
        self.state
    }

    /// True while a reveal is playing
    #[must_use]
    pub fn is_input_locked(&self) -> bool {
        self.state == InputState::Animating
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.state == InputState::Ended
    }

    #[must_use]
    pub const fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn board_count(&self) -> usize {
        self.boards.board_count()
    }

    #[must_use]
    pub const fn max_rows(&self) -> usize {
        self.boards.rows()
    }

    #[must_use]
    pub const fn validator(&self) -> &Arc<WordValidator> {
        &self.validator
    }

    /// Token cancelled when this session is torn down
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Letters of the current row on the first board still in play
    #[must_use]
    pub fn current_guess(&self) -> String {
        self.boards
            .active_boards()
            .next()
            .map(|board| self.boards.read_row(board, self.cursor.row))
            .unwrap_or_default()
    }

    pub(super) fn move_cursor_to(&mut self, col: usize) -> bool {
        if col >= MAX_COLS || col == self.cursor.col {
            return false;
        }
        self.cursor.col = col;
        true
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Pending reveal steps must not outlive the game they belong to
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::session_with;

    #[test]
    fn board_count_is_clamped() {
        assert_eq!(clamp_board_count(0), 1);
        assert_eq!(clamp_board_count(3), 3);
        assert_eq!(clamp_board_count(9), 4);
    }

    #[test]
    fn rows_follow_board_count() {
        assert_eq!(rows_for_boards(1), 6);
        assert_eq!(rows_for_boards(2), 8);
        assert_eq!(rows_for_boards(3), 10);
        assert_eq!(rows_for_boards(4), 10);
        assert_eq!(rows_for_boards(0), 6);
        assert_eq!(rows_for_boards(7), 10);
    }

    #[test]
    fn new_session_starts_idle_at_origin() {
        let session = session_with(&["crane", "slate", "allow"], "crane");
        assert_eq!(session.state(), InputState::Idle);
        assert_eq!(session.cursor(), Cursor { row: 0, col: 0 });
        assert_eq!(session.max_rows(), 10);
        assert_eq!(session.board_count(), 3);
        assert!(session.result().is_none());
    }

    #[test]
    fn dropping_session_cancels_its_token() {
        let session = session_with(&["crane"], "crane");
        let token = session.cancel_token();
        assert!(!token.is_cancelled());
        drop(session);
        assert!(token.is_cancelled());
    }

    #[test]
    fn result_text_depends_on_outcome() {
        let targets = vec![Word::new("crane").unwrap()];
        let won = GameResult {
            won: true,
            attempts: 3,
            targets: targets.clone(),
        };
        let lost = GameResult {
            won: false,
            attempts: 6,
            targets,
        };
        assert_eq!(won.summary(6), "You solved it in 3 attempts. Well done!");
        assert!(lost.headline().starts_with("Game Over"));
        assert_eq!(lost.summary(6), "You reached the max attempts (6). Keep practicing!");
    }
}
