//! Game state machine
//!
//! Boards, input handling, reveal sequencing and the session lifecycle.
//! Nothing here touches the terminal or the network directly: words arrive
//! through a [`WordSource`](crate::source::WordSource) and results leave as
//! plain values.

pub mod board;
pub mod controller;
pub mod input;
pub mod keys;
pub mod reveal;
pub mod session;
pub mod validator;

pub use board::{Board, BoardModel, Cell, CellId, MAX_COLS};
pub use controller::{GameSessionController, SessionError};
pub use input::{Key, KeyInput, Modifiers, Outcome, Pointer, Rejection};
pub use keys::{KeyCap, KeyStateTracker, keyboard_rows};
pub use reveal::{CancelToken, Reveal, RevealStep, StepOutcome};
pub use session::{
    Cursor, DEFAULT_STEP_DELAY, GameResult, InputState, MAX_BOARDS, MIN_BOARDS, Session,
    SessionId, clamp_board_count, rows_for_boards,
};
pub use validator::WordValidator;
