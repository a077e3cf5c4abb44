//! Reveal playback
//!
//! A submitted row is revealed one cell at a time, left to right, with a fixed
//! delay between cells. [`Reveal`] is the async side: it yields the steps in
//! order and sleeps in between. [`Session::apply_reveal_step`] is the state
//! side: it paints the cells, updates the keyboard, and settles the row once
//! every cell is shown.
//!
//! Steps carry the id of the session that produced them. A session ignores
//! steps that are not its own, and a dropped session cancels its token so the
//! pending sequence stops yielding.

use super::board::{CellId, MAX_COLS};
use super::session::{GameResult, InputState, Session, SessionId};
use crate::core::Evaluation;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// One step of a reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// Show the classification of column `col` on every evaluated board
    Cell {
        session: SessionId,
        row: usize,
        col: usize,
    },
    /// Every cell is shown; settle the row
    Finish { session: SessionId, row: usize },
}

/// Evaluations waiting to be revealed
#[derive(Debug, Clone)]
pub(crate) struct PendingReveal {
    row: usize,
    evaluations: Vec<(usize, Evaluation)>,
    revealed: usize,
}

impl PendingReveal {
    pub(crate) fn new(row: usize, evaluations: Vec<(usize, Evaluation)>) -> Self {
        Self {
            row,
            evaluations,
            revealed: 0,
        }
    }
}

/// What applying a step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not for this session, or out of order; nothing changed
    Stale,
    /// A column was shown
    Revealed { col: usize },
    /// The row settled and the cursor moved to `row`
    Advanced { row: usize },
    /// The game is over
    Ended(GameResult),
}

/// Async sequence of reveal steps for one submitted row
#[derive(Debug)]
pub struct Reveal {
    session: SessionId,
    row: usize,
    next_col: usize,
    finished: bool,
    delay: Duration,
    cancel: CancelToken,
}

impl Reveal {
    pub(crate) fn new(session: SessionId, row: usize, delay: Duration, cancel: CancelToken) -> Self {
        Self {
            session,
            row,
            next_col: 0,
            finished: false,
            delay,
            cancel,
        }
    }

    #[must_use]
    pub const fn session(&self) -> SessionId {
        self.session
    }

    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Next step, after the step delay
    ///
    /// The first cell is shown immediately; each later cell waits one delay,
    /// and `Finish` follows the last cell without waiting. Returns `None` once
    /// finished or after the owning session was torn down.
    pub async fn next_step(&mut self) -> Option<RevealStep> {
        if self.finished || self.cancel.is_cancelled() {
            return None;
        }

        if self.next_col >= MAX_COLS {
            self.finished = true;
            return Some(RevealStep::Finish {
                session: self.session,
                row: self.row,
            });
        }

        if self.next_col > 0 && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
            if self.cancel.is_cancelled() {
                debug!(session = %self.session, row = self.row, "reveal cancelled");
                return None;
            }
        }

        let col = self.next_col;
        self.next_col += 1;
        Some(RevealStep::Cell {
            session: self.session,
            row: self.row,
            col,
        })
    }

    /// Drive the reveal to completion against `session`
    ///
    /// Returns the outcome of the last applied step, or `None` when the
    /// sequence was cancelled before finishing.
    pub async fn run(mut self, session: &mut Session) -> Option<StepOutcome> {
        let mut last = None;
        while let Some(step) = self.next_step().await {
            last = Some(session.apply_reveal_step(step));
        }
        last.filter(|outcome| matches!(outcome, StepOutcome::Advanced { .. } | StepOutcome::Ended(_)))
    }
}

impl Session {
    /// Apply one reveal step
    pub fn apply_reveal_step(&mut self, step: RevealStep) -> StepOutcome {
        let (session, row) = match step {
            RevealStep::Cell { session, row, .. } | RevealStep::Finish { session, row } => {
                (session, row)
            }
        };
        if session != self.id || self.state != InputState::Animating {
            return StepOutcome::Stale;
        }
        let Some(pending) = self.pending.as_ref() else {
            return StepOutcome::Stale;
        };
        if pending.row != row {
            return StepOutcome::Stale;
        }

        match step {
            RevealStep::Cell { col, .. } => self.reveal_cell(col),
            RevealStep::Finish { .. } => self.settle_row(),
        }
    }

    fn reveal_cell(&mut self, col: usize) -> StepOutcome {
        let Some(pending) = self.pending.as_mut() else {
            return StepOutcome::Stale;
        };
        if col != pending.revealed || col >= MAX_COLS {
            return StepOutcome::Stale;
        }
        pending.revealed += 1;

        let row = pending.row;
        for &(board, evaluation) in &pending.evaluations {
            let id = CellId::new(board, row, col);
            let classification = evaluation.at(col);
            self.boards.mark_cell(id, classification);
            if let Some(letter) = self.boards.cell(id).and_then(|cell| cell.letter) {
                self.keys.record(letter, classification);
            }
        }

        StepOutcome::Revealed { col }
    }

    fn settle_row(&mut self) -> StepOutcome {
        let Some(pending) = self.pending.take_if(|pending| pending.revealed == MAX_COLS) else {
            return StepOutcome::Stale;
        };

        for (board, evaluation) in &pending.evaluations {
            if evaluation.is_perfect() {
                self.boards.mark_completed(*board);
            }
        }

        let row = pending.row;
        if self.boards.all_completed() || row + 1 >= self.boards.rows() {
            let result = GameResult {
                won: self.boards.all_completed(),
                attempts: row + 1,
                targets: self
                    .boards
                    .boards()
                    .iter()
                    .map(|board| board.target().clone())
                    .collect(),
            };
            info!(
                session = %self.id,
                won = result.won,
                attempts = result.attempts,
                "game ended"
            );
            self.state = InputState::Ended;
            self.result = Some(result.clone());
            return StepOutcome::Ended(result);
        }

        self.cursor.row = row + 1;
        self.cursor.col = 0;
        self.state = InputState::Idle;
        StepOutcome::Advanced { row: self.cursor.row }
    }
}
