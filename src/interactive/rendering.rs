//! TUI rendering with ratatui
//!
//! Boards side by side, the on-screen keyboard below them and a result panel
//! on top once the game is over. Every clickable rectangle drawn is recorded
//! in a [`HitMap`] so mouse clicks can be mapped back to cells and keys.

use super::app::{App, MessageStyle, Phase};
use crate::core::Classification;
use crate::game::{Board, Cell, CellId, InputState, KeyCap, MAX_COLS, Pointer, Session, keyboard_rows};
use crate::source::WordSource;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use std::time::Instant;

const CELL_WIDTH: u16 = 5;
const CELL_GAP: u16 = 1;
const KEY_WIDTH: u16 = 5;
const WIDE_KEY_WIDTH: u16 = 7;

/// Screen rectangles of clickable things, from the last frame
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    targets: Vec<(Rect, Pointer)>,
}

impl HitMap {
    fn push(&mut self, rect: Rect, pointer: Pointer) {
        self.targets.push((rect, pointer));
    }

    /// What sits under a terminal position
    #[must_use]
    pub fn pointer_at(&self, column: u16, row: u16) -> Option<Pointer> {
        self.targets
            .iter()
            .find(|(rect, _)| rect.contains(Position::new(column, row)))
            .map(|(_, pointer)| *pointer)
    }
}

/// Main UI rendering function
pub fn ui<S: WordSource>(f: &mut Frame, app: &App<S>, now: Instant) -> HitMap {
    let mut hits = HitMap::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Boards
            Constraint::Length(5), // Keyboard
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    match (&app.phase, app.controller.session()) {
        (Phase::Playing, Some(session)) => {
            let shake = app.shake.map(|shake| (shake.row, shake.offset(now)));
            render_boards(f, session, shake, chunks[1], &mut hits);
            render_keyboard(f, session, chunks[2], &mut hits);
            if let Some(result) = session.result() {
                render_result(f, session, result, chunks[1]);
            }
        }
        (Phase::Failed(err), _) => render_notice(
            f,
            chunks[1],
            vec![
                Line::styled("Could not start a game", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Line::from(err.clone()),
                Line::from(""),
                Line::styled("r: retry | q: quit", Style::default().fg(Color::DarkGray)),
            ],
        ),
        _ => render_notice(
            f,
            chunks[1],
            vec![Line::from(format!("Fetching words from {}...", app.source_label))],
        ),
    }

    render_status(f, app, chunks[3]);
    hits
}

fn mode_name(board_count: usize) -> &'static str {
    match board_count {
        1 => "Solo",
        2 => "Duo",
        3 => "Trio",
        _ => "Quad",
    }
}

fn render_header<S: WordSource>(f: &mut Frame, app: &App<S>, area: Rect) {
    let mode = mode_name(app.controller.board_count());
    let header = Paragraph::new(Line::from(vec![
        Span::styled("TERMOX", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {mode}  ")),
        Span::styled(app.source_label.clone(), Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn render_notice(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let notice = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(notice, area);
}

fn render_boards(
    f: &mut Frame,
    session: &Session,
    shake: Option<(usize, i16)>,
    area: Rect,
    hits: &mut HitMap,
) {
    let count = session.board_count() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for (board, column) in session.boards().boards().iter().zip(columns.iter()) {
        render_board(f, session, board, shake, *column, hits);
    }
}

fn render_board(
    f: &mut Frame,
    session: &Session,
    board: &Board,
    shake: Option<(usize, i16)>,
    area: Rect,
    hits: &mut HitMap,
) {
    let title = if board.is_completed() {
        format!(" {} ✓ ", board.index() + 1)
    } else {
        format!(" {} ", board.index() + 1)
    };
    let border = if board.is_completed() { Color::Green } else { Color::Gray };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let grid_width = MAX_COLS as u16 * CELL_WIDTH + (MAX_COLS as u16 - 1) * CELL_GAP;
    let left = inner.x + inner.width.saturating_sub(grid_width) / 2;
    let cursor = session.cursor();
    let editing = session.state() == InputState::Idle;

    for row in 0..session.max_rows() {
        let y = inner.y + row as u16;
        if y >= inner.bottom() {
            break;
        }
        let offset = match shake {
            Some((shaking, offset)) if shaking == row => offset,
            _ => 0,
        };

        for cell in board.row(row) {
            let x = left + cell.id.col as u16 * (CELL_WIDTH + CELL_GAP);
            let x = x.saturating_add_signed(offset).max(inner.x);
            let rect = Rect::new(x, y, CELL_WIDTH, 1).intersection(inner);
            if rect.is_empty() {
                continue;
            }

            let focused = editing && row == cursor.row && cell.id.col == cursor.col && !board.is_completed();
            f.render_widget(
                Paragraph::new(cell_text(cell, focused)).style(cell_style(cell, focused)),
                rect,
            );
            hits.push(rect, Pointer::Cell(CellId::new(board.index(), row, cell.id.col)));
        }
    }
}

fn cell_text(cell: &Cell, focused: bool) -> String {
    match cell.letter {
        Some(letter) => format!("  {letter}  "),
        None if focused => "  _  ".to_string(),
        None => "  ·  ".to_string(),
    }
}

fn classification_style(classification: Classification) -> Option<Style> {
    match classification {
        Classification::Correct => Some(Style::default().fg(Color::Black).bg(Color::Green)),
        Classification::Present => Some(Style::default().fg(Color::Black).bg(Color::Yellow)),
        Classification::Absent => Some(Style::default().fg(Color::White).bg(Color::DarkGray)),
        Classification::Unset => None,
    }
}

fn cell_style(cell: &Cell, focused: bool) -> Style {
    let style = classification_style(cell.classification).unwrap_or_else(|| {
        if cell.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        }
    });
    let style = style.add_modifier(Modifier::BOLD);
    if focused {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

fn render_keyboard(f: &mut Frame, session: &Session, area: Rect, hits: &mut HitMap) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (offset, keys) in keyboard_rows().iter().enumerate() {
        let y = inner.y + offset as u16;
        if y >= inner.bottom() {
            break;
        }

        let widths: Vec<u16> = keys.iter().map(|cap| key_width(*cap)).collect();
        let total: u16 = widths.iter().sum::<u16>() + (widths.len() as u16).saturating_sub(1);
        let mut x = inner.x + inner.width.saturating_sub(total) / 2;

        for (cap, width) in keys.iter().zip(widths) {
            let rect = Rect::new(x, y, width, 1).intersection(inner);
            x += width + 1;
            if rect.is_empty() {
                continue;
            }

            let style = match cap {
                KeyCap::Letter(letter) => {
                    classification_style(session.keys().classification_of(*letter))
                        .unwrap_or_else(|| Style::default().fg(Color::White).bg(Color::Black))
                }
                KeyCap::Backspace | KeyCap::Enter => Style::default().fg(Color::Cyan),
            };
            f.render_widget(
                Paragraph::new(cap.label())
                    .alignment(Alignment::Center)
                    .style(style.add_modifier(Modifier::BOLD)),
                rect,
            );
            hits.push(rect, Pointer::Key(*cap));
        }
    }
}

const fn key_width(cap: KeyCap) -> u16 {
    match cap {
        KeyCap::Letter(_) => KEY_WIDTH,
        KeyCap::Backspace | KeyCap::Enter => WIDE_KEY_WIDTH,
    }
}

fn render_result(f: &mut Frame, session: &Session, result: &crate::game::GameResult, area: Rect) {
    let width = area.width.min(56);
    let height = area.height.min(8);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let (color, title) = if result.won {
        (Color::Green, " You won ")
    } else {
        (Color::Red, " Game over ")
    };
    let words: Vec<&str> = result.targets.iter().map(|word| word.text()).collect();
    let reveal_line = if words.len() == 1 {
        format!("The word was {}", words[0])
    } else {
        format!("The words were {}", words.join(", "))
    };

    let content = vec![
        Line::styled(result.headline(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Line::from(result.summary(session.max_rows())),
        Line::from(reveal_line),
        Line::from(""),
        Line::styled(
            "Enter: play again | F1-F4: boards | Ctrl+C: quit",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .style(Style::default().fg(color)),
            ),
        popup,
    );
}

fn render_status<S: WordSource>(f: &mut Frame, app: &App<S>, area: Rect) {
    let (text, style) = match &app.message {
        Some(message) => {
            let color = match message.style {
                MessageStyle::Info => Color::White,
                MessageStyle::Error => Color::Red,
            };
            (message.text.clone(), Style::default().fg(color).add_modifier(Modifier::BOLD))
        }
        None => (
            "Enter: submit | ←/→: move | Ctrl+N: new game | F1-F4: boards | Ctrl+R: reload words | Ctrl+C: quit".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let status = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}
