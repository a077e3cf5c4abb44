//! Board grids
//!
//! Every board is a fixed grid of `rows × MAX_COLS` cells stored row-major in a
//! flat arena, addressed by [`CellId`]. All boards of a session share the same
//! row count and the same set of locked rows.

use crate::core::{Classification, WORD_LENGTH, Word};

/// Columns per row
pub const MAX_COLS: usize = WORD_LENGTH;

/// Address of a cell: board index, row, column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    pub board: usize,
    pub row: usize,
    pub col: usize,
}

impl CellId {
    #[must_use]
    pub const fn new(board: usize, row: usize, col: usize) -> Self {
        Self { board, row, col }
    }
}

/// A single letter slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub id: CellId,
    pub letter: Option<char>,
    pub classification: Classification,
}

impl Cell {
    fn empty(id: CellId) -> Self {
        Self {
            id,
            letter: None,
            classification: Classification::Unset,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.letter.is_none()
    }
}

/// One grid and its target word
#[derive(Debug, Clone)]
pub struct Board {
    index: usize,
    target: Word,
    rows: usize,
    cells: Vec<Cell>,
    completed: bool,
}

impl Board {
    fn new(index: usize, target: Word, rows: usize) -> Self {
        let cells = (0..rows)
            .flat_map(|row| (0..MAX_COLS).map(move |col| Cell::empty(CellId::new(index, row, col))))
            .collect();

        Self {
            index,
            target,
            rows,
            cells,
            completed: false,
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn target(&self) -> &Word {
        &self.target
    }

    /// Whether one of this board's rows matched the target exactly
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Cells of one row, left to right (empty slice when out of bounds)
    #[must_use]
    pub fn row(&self, row: usize) -> &[Cell] {
        if row >= self.rows {
            return &[];
        }
        &self.cells[row * MAX_COLS..(row + 1) * MAX_COLS]
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.slot(row, col).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.slot(row, col).map(|i| &mut self.cells[i])
    }

    fn slot(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < MAX_COLS).then_some(row * MAX_COLS + col)
    }
}

/// All boards of a session plus the shared row locks
#[derive(Debug, Clone)]
pub struct BoardModel {
    boards: Vec<Board>,
    rows: usize,
    locked: Vec<bool>,
}

impl BoardModel {
    /// One board per target, each with `rows` rows
    #[must_use]
    pub fn new(targets: Vec<Word>, rows: usize) -> Self {
        let boards = targets
            .into_iter()
            .enumerate()
            .map(|(index, target)| Board::new(index, target, rows))
            .collect();

        Self {
            boards,
            rows,
            locked: vec![false; rows],
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    #[must_use]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    #[must_use]
    pub fn board(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.boards.get(id.board)?.cell(id.row, id.col)
    }

    /// Indices of boards whose target has not been guessed yet
    pub fn active_boards(&self) -> impl Iterator<Item = usize> + '_ {
        self.boards
            .iter()
            .filter(|board| !board.completed)
            .map(Board::index)
    }

    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.boards.iter().all(Board::is_completed)
    }

    /// Write a letter, resetting the cell's classification
    ///
    /// No-op (returns false) when out of bounds or the row is locked.
    pub fn set_cell(&mut self, id: CellId, letter: char) -> bool {
        if self.is_row_locked(id.row) {
            return false;
        }
        let Some(cell) = self.cell_slot(id) else {
            return false;
        };
        cell.letter = Some(letter.to_ascii_uppercase());
        cell.classification = Classification::Unset;
        true
    }

    /// Clear a letter; returns false when there was nothing to clear
    pub fn clear_cell(&mut self, id: CellId) -> bool {
        if self.is_row_locked(id.row) {
            return false;
        }
        match self.cell_slot(id) {
            Some(cell) if cell.letter.is_some() => {
                cell.letter = None;
                cell.classification = Classification::Unset;
                true
            }
            _ => false,
        }
    }

    /// Letters of a row; blank cells contribute nothing
    #[must_use]
    pub fn read_row(&self, board: usize, row: usize) -> String {
        self.boards
            .get(board)
            .map(|b| b.row(row).iter().filter_map(|cell| cell.letter).collect())
            .unwrap_or_default()
    }

    /// Whether every cell of the row holds a letter
    #[must_use]
    pub fn is_row_filled(&self, board: usize, row: usize) -> bool {
        self.boards.get(board).is_some_and(|b| {
            let cells = b.row(row);
            !cells.is_empty() && cells.iter().all(|cell| !cell.is_empty())
        })
    }

    /// Record the classification of an evaluated cell
    ///
    /// Allowed on locked rows: this is how a submitted row is revealed.
    pub fn mark_cell(&mut self, id: CellId, classification: Classification) {
        if let Some(cell) = self.cell_slot(id) {
            cell.classification = classification;
        }
    }

    pub fn lock_row(&mut self, row: usize) {
        if let Some(locked) = self.locked.get_mut(row) {
            *locked = true;
        }
    }

    #[must_use]
    pub fn is_row_locked(&self, row: usize) -> bool {
        self.locked.get(row).copied().unwrap_or(false)
    }

    pub fn mark_completed(&mut self, board: usize) {
        if let Some(b) = self.boards.get_mut(board) {
            b.completed = true;
        }
    }

    fn cell_slot(&mut self, id: CellId) -> Option<&mut Cell> {
        self.boards.get_mut(id.board)?.cell_mut(id.row, id.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(targets: &[&str], rows: usize) -> BoardModel {
        BoardModel::new(targets.iter().map(|t| Word::new(t).unwrap()).collect(), rows)
    }

    fn fill_row(model: &mut BoardModel, board: usize, row: usize, word: &str) {
        for (col, letter) in word.chars().enumerate() {
            model.set_cell(CellId::new(board, row, col), letter);
        }
    }

    #[test]
    fn new_model_has_empty_grids() {
        let model = model(&["crane", "slate"], 8);
        assert_eq!(model.board_count(), 2);
        assert_eq!(model.rows(), 8);
        assert_eq!(model.board(1).unwrap().row(7).len(), MAX_COLS);
        assert!(model.board(1).unwrap().row(8).is_empty());
        assert_eq!(model.read_row(0, 0), "");
    }

    #[test]
    fn cells_know_their_address() {
        let model = model(&["crane", "slate"], 6);
        let cell = model.cell(CellId::new(1, 3, 4)).unwrap();
        assert_eq!(cell.id, CellId::new(1, 3, 4));
    }

    #[test]
    fn set_and_read_row() {
        let mut model = model(&["crane"], 6);
        fill_row(&mut model, 0, 0, "crazy");
        assert_eq!(model.read_row(0, 0), "CRAZY");
        assert!(model.is_row_filled(0, 0));
    }

    #[test]
    fn read_row_skips_blank_cells() {
        let mut model = model(&["crane"], 6);
        model.set_cell(CellId::new(0, 0, 0), 'c');
        model.set_cell(CellId::new(0, 0, 2), 'a');
        assert_eq!(model.read_row(0, 0), "CA");
        assert!(!model.is_row_filled(0, 0));
    }

    #[test]
    fn set_cell_out_of_bounds_is_noop() {
        let mut model = model(&["crane"], 6);
        assert!(!model.set_cell(CellId::new(0, 6, 0), 'A'));
        assert!(!model.set_cell(CellId::new(0, 0, 5), 'A'));
        assert!(!model.set_cell(CellId::new(1, 0, 0), 'A'));
    }

    #[test]
    fn locked_row_rejects_writes_but_accepts_marks() {
        let mut model = model(&["crane"], 6);
        fill_row(&mut model, 0, 0, "crazy");
        model.lock_row(0);

        assert!(!model.set_cell(CellId::new(0, 0, 0), 'X'));
        assert!(!model.clear_cell(CellId::new(0, 0, 0)));
        assert_eq!(model.read_row(0, 0), "CRAZY");

        model.mark_cell(CellId::new(0, 0, 0), Classification::Correct);
        assert_eq!(
            model.cell(CellId::new(0, 0, 0)).unwrap().classification,
            Classification::Correct
        );
    }

    #[test]
    fn rewrite_and_clear_reset_classification() {
        let mut model = model(&["crane"], 6);
        let id = CellId::new(0, 1, 0);
        model.set_cell(id, 'C');
        model.mark_cell(id, Classification::Present);
        model.set_cell(id, 'D');
        assert_eq!(model.cell(id).unwrap().classification, Classification::Unset);

        model.mark_cell(id, Classification::Present);
        assert!(model.clear_cell(id));
        let cell = model.cell(id).unwrap();
        assert_eq!(cell.letter, None);
        assert_eq!(cell.classification, Classification::Unset);
    }

    #[test]
    fn clear_empty_cell_is_noop() {
        let mut model = model(&["crane"], 6);
        assert!(!model.clear_cell(CellId::new(0, 0, 0)));
    }

    #[test]
    fn completed_boards_leave_active_set() {
        let mut model = model(&["crane", "slate", "allow"], 10);
        model.mark_completed(1);
        assert_eq!(model.active_boards().collect::<Vec<_>>(), vec![0, 2]);
        assert!(!model.all_completed());

        model.mark_completed(0);
        model.mark_completed(2);
        assert!(model.all_completed());
    }
}
