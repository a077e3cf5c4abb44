//! TUI application state and event loop

use super::rendering::{self, HitMap};
use crate::game::{
    GameSessionController, Key, KeyInput, Modifiers, Outcome, Rejection, Reveal, RevealStep,
    StepOutcome,
};
use crate::source::WordSource;
use anyhow::Result;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// How long a rejected row shakes
pub const SHAKE_DURATION: Duration = Duration::from_millis(400);

const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Where the application is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// A start was requested and has not run yet
    Starting,
    /// A session exists
    Playing,
    /// The last start failed; `r` retries
    Failed(String),
}

/// A row that was refused, shaking until `until`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shake {
    pub row: usize,
    pub started: Instant,
}

impl Shake {
    /// Horizontal offset of the shaking row at `now`, alternating left and right
    #[must_use]
    pub fn offset(&self, now: Instant) -> i16 {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= SHAKE_DURATION {
            return 0;
        }
        if (elapsed.as_millis() / FRAME_INTERVAL.as_millis()) % 2 == 0 {
            -1
        } else {
            1
        }
    }

    #[must_use]
    pub fn is_over(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= SHAKE_DURATION
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

/// Application state
pub struct App<S> {
    pub controller: GameSessionController<S>,
    pub source_label: String,
    pub phase: Phase,
    pub requested_boards: usize,
    pub reveal: Option<Reveal>,
    pub shake: Option<Shake>,
    pub message: Option<Message>,
    pub hits: HitMap,
    pub refresh_requested: bool,
    pub should_quit: bool,
}

impl<S: WordSource> App<S> {
    #[must_use]
    pub fn new(controller: GameSessionController<S>, boards: usize, source_label: String) -> Self {
        Self {
            controller,
            source_label,
            phase: Phase::Starting,
            requested_boards: boards,
            reveal: None,
            shake: None,
            message: None,
            hits: HitMap::default(),
            refresh_requested: false,
            should_quit: false,
        }
    }

    /// Run the requested start
    pub async fn start(&mut self) {
        self.reveal = None;
        self.shake = None;
        self.message = None;

        match self.controller.start(self.requested_boards).await {
            Ok(session) => {
                info!(session = %session.id(), boards = session.board_count(), "game started");
                self.phase = Phase::Playing;
                if session.validator().is_empty() {
                    self.set_message("Word list unavailable: no guess can be accepted", MessageStyle::Error);
                }
            }
            Err(err) => {
                error!(error = %err, "failed to start game");
                self.phase = Phase::Failed(err.to_string());
            }
        }
    }

    /// Ask for a new game with `boards` boards on the next loop turn
    pub fn request_start(&mut self, boards: usize) {
        self.requested_boards = boards;
        self.reveal = None;
        self.phase = Phase::Starting;
    }

    /// Run the requested word-list reload
    ///
    /// The running session keeps the list it started with.
    pub async fn refresh(&mut self) {
        self.refresh_requested = false;
        let reloaded = self.controller.refresh_word_list().await;
        let words = self.controller.validator().len();
        if reloaded {
            self.set_message(
                &format!("Word list reloaded ({words} words), used from the next game"),
                MessageStyle::Info,
            );
        } else {
            self.set_message(
                &format!("Word list reload failed, keeping {words} words"),
                MessageStyle::Error,
            );
        }
    }

    pub fn set_message(&mut self, text: &str, style: MessageStyle) {
        self.message = Some(Message {
            text: text.to_string(),
            style,
        });
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.controller.session().is_some_and(|session| session.is_ended())
    }

    /// Handle a terminal event
    pub fn on_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
            Event::Mouse(mouse) => self.on_mouse(mouse),
            _ => {}
        }
    }

    fn on_key(&mut self, event: &KeyEvent) {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        match event.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('n') if ctrl => {
                self.request_start(self.controller.board_count());
                return;
            }
            KeyCode::Char('r') if ctrl => {
                self.refresh_requested = true;
                return;
            }
            KeyCode::F(n @ 1..=4) => {
                self.request_start(usize::from(n));
                return;
            }
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        match &self.phase {
            Phase::Starting => return,
            Phase::Failed(_) => {
                match event.code {
                    KeyCode::Char('r') => self.request_start(self.requested_boards),
                    KeyCode::Char('q') => self.should_quit = true,
                    _ => {}
                }
                return;
            }
            Phase::Playing => {}
        }

        if self.is_ended() {
            if event.code == KeyCode::Enter {
                self.request_start(self.controller.board_count());
            }
            return;
        }

        if let Some(input) = key_input(event) {
            let outcome = self.controller.handle_key(input);
            self.on_outcome(outcome);
        }
    }

    fn on_mouse(&mut self, event: &MouseEvent) {
        if event.kind != MouseEventKind::Down(MouseButton::Left) || self.phase != Phase::Playing {
            return;
        }
        if let Some(pointer) = self.hits.pointer_at(event.column, event.row) {
            let outcome = self.controller.handle_pointer(pointer);
            self.on_outcome(outcome);
        }
    }

    fn on_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Passthrough | Outcome::Ignored => {}
            Outcome::Updated => self.message = None,
            Outcome::Rejected(rejection) => {
                let text = match &rejection {
                    Rejection::Incomplete { .. } => "Not enough letters".to_string(),
                    Rejection::NotInWordList { guess, .. } => format!("{guess} is not in the word list"),
                };
                self.set_message(&text, MessageStyle::Error);
                self.shake = Some(Shake {
                    row: rejection.row(),
                    started: Instant::now(),
                });
            }
            Outcome::Submitted(reveal) => {
                self.message = None;
                self.reveal = Some(reveal);
            }
        }
    }

    /// Apply a reveal step, or drop the finished reveal
    pub fn on_reveal_step(&mut self, step: Option<RevealStep>) {
        let Some(step) = step else {
            self.reveal = None;
            return;
        };

        match self.controller.apply_reveal_step(step) {
            StepOutcome::Stale => debug!(?step, "stale reveal step"),
            StepOutcome::Revealed { .. } | StepOutcome::Advanced { .. } => {}
            StepOutcome::Ended(result) => {
                info!(won = result.won, attempts = result.attempts, "game over");
            }
        }
    }

    /// Drop the shake once it has played out
    pub fn expire_shake(&mut self, now: Instant) {
        if self.shake.is_some_and(|shake| shake.is_over(now)) {
            self.shake = None;
        }
    }
}

/// Map a terminal key press to a game key
#[must_use]
pub fn key_input(event: &KeyEvent) -> Option<KeyInput> {
    let key = match event.code {
        KeyCode::Char(c) => Key::from_char(c)?,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        _ => return None,
    };

    let modifiers = Modifiers {
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        meta: event.modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
        alt: event.modifiers.contains(KeyModifiers::ALT),
    };
    Some(KeyInput { key, modifiers })
}

async fn next_reveal_step(reveal: &mut Option<Reveal>) -> Option<RevealStep> {
    match reveal {
        Some(reveal) => reveal.next_step().await,
        None => std::future::pending().await,
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub async fn run_tui<S: WordSource>(app: App<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B, S>(terminal: &mut Terminal<B>, mut app: App<S>) -> Result<()>
where
    B: ratatui::backend::Backend,
    S: WordSource,
{
    let mut events = EventStream::new();
    let mut frames = tokio::time::interval(FRAME_INTERVAL);

    loop {
        let mut hits = HitMap::default();
        terminal.draw(|f| hits = rendering::ui(f, &app, Instant::now()))?;
        app.hits = hits;

        if app.should_quit {
            break;
        }

        if app.phase == Phase::Starting {
            app.start().await;
            continue;
        }

        if app.refresh_requested {
            app.refresh().await;
            continue;
        }

        tokio::select! {
            step = next_reveal_step(&mut app.reveal) => app.on_reveal_step(step),
            event = events.next() => match event {
                Some(Ok(event)) => app.on_event(&event),
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
            _ = frames.tick(), if app.shake.is_some() => app.expire_shake(Instant::now()),
        }
    }

    Ok(())
}
