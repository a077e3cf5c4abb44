//! Session lifecycle
//!
//! The controller owns the word source, the accepted-word set and the current
//! session. Starting a game fetches one target per board; if any fetch fails
//! the start fails as a whole and no session is left behind.

use super::input::{KeyInput, Outcome, Pointer};
use super::reveal::{RevealStep, StepOutcome};
use super::session::{DEFAULT_STEP_DELAY, Session, SessionId, clamp_board_count};
use super::validator::WordValidator;
use crate::core::{Word, WordError};
use crate::source::{SourceError, WordSource};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Error starting a session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to fetch the target word for board {board}: {source}")]
    Fetch {
        board: usize,
        #[source]
        source: SourceError,
    },
    #[error("received an invalid target word {word:?}: {source}")]
    InvalidTarget {
        word: String,
        #[source]
        source: WordError,
    },
}

/// Owns the current game and everything needed to start the next one
#[derive(Debug)]
pub struct GameSessionController<S> {
    source: S,
    validator: Arc<WordValidator>,
    word_list_loaded: bool,
    board_count: usize,
    step_delay: Duration,
    session: Option<Session>,
    next_id: u64,
}

impl<S: WordSource> GameSessionController<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            validator: Arc::new(WordValidator::new()),
            word_list_loaded: false,
            board_count: 1,
            step_delay: DEFAULT_STEP_DELAY,
            session: None,
            next_id: 0,
        }
    }

    /// Delay between revealed cells for sessions started from now on
    #[must_use]
    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn validator(&self) -> &Arc<WordValidator> {
        &self.validator
    }

    /// Board count of the last start
    #[must_use]
    pub const fn board_count(&self) -> usize {
        self.board_count
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Fetch the accepted-word list and make it authoritative
    ///
    /// On failure the previous set is kept. The running session keeps the set
    /// it started with; the next session picks up the new one.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the caller decides whether it matters.
    pub async fn load_word_list(&mut self) -> Result<usize, SourceError> {
        let text = self.source.fetch_word_list().await?;
        let validator = WordValidator::from_text(&text);
        let count = validator.len();

        self.validator = Arc::new(validator);
        self.word_list_loaded = true;
        info!(words = count, "word list loaded");
        Ok(count)
    }

    /// Re-fetch the word list, logging failures instead of returning them
    pub async fn refresh_word_list(&mut self) -> bool {
        match self.load_word_list().await {
            Ok(_) => true,
            Err(err) => {
                warn!(error = %err, words = self.validator.len(), "word list refresh failed, keeping previous list");
                false
            }
        }
    }

    /// Start a new game with `board_count` boards (clamped to 1..=4)
    ///
    /// Any existing session is torn down first, cancelling its pending reveal.
    ///
    /// # Errors
    ///
    /// Returns an error if any target fetch fails or yields something that is
    /// not a five-letter word. No session exists afterwards.
    pub async fn start(&mut self, board_count: usize) -> Result<&mut Session, SessionError> {
        let board_count = clamp_board_count(board_count);
        self.board_count = board_count;

        if let Some(old) = self.session.take() {
            debug!(session = %old.id(), "tearing down session");
        }

        if !self.word_list_loaded
            && let Err(err) = self.load_word_list().await
        {
            warn!(error = %err, "word list unavailable, no guess can be accepted");
        }

        let mut targets = Vec::with_capacity(board_count);
        for board in 0..board_count {
            let raw = self
                .source
                .fetch_target_word()
                .await
                .map_err(|source| SessionError::Fetch { board, source })?;
            let word = Word::new(raw.trim()).map_err(|source| SessionError::InvalidTarget {
                word: raw.trim().to_string(),
                source,
            })?;
            targets.push(word);
        }

        self.next_id += 1;
        let id = SessionId(self.next_id);
        info!(session = %id, boards = board_count, "session started");

        let session = Session::new(id, targets, Arc::clone(&self.validator), self.step_delay);
        Ok(self.session.insert(session))
    }

    /// Start again with the previous board count
    ///
    /// # Errors
    ///
    /// Same as [`start`](Self::start).
    pub async fn restart(&mut self) -> Result<&mut Session, SessionError> {
        self.start(self.board_count).await
    }

    /// Forward a key press to the current session
    pub fn handle_key(&mut self, input: KeyInput) -> Outcome {
        match self.session.as_mut() {
            Some(session) => session.handle_key(input),
            None if input.modifiers.any() => Outcome::Passthrough,
            None => Outcome::Ignored,
        }
    }

    /// Forward a pointer click to the current session
    pub fn handle_pointer(&mut self, pointer: Pointer) -> Outcome {
        self.session
            .as_mut()
            .map_or(Outcome::Ignored, |session| session.handle_pointer(pointer))
    }

    /// Apply a reveal step; steps of torn-down sessions are stale
    pub fn apply_reveal_step(&mut self, step: RevealStep) -> StepOutcome {
        self.session
            .as_mut()
            .map_or(StepOutcome::Stale, |session| session.apply_reveal_step(step))
    }
}
