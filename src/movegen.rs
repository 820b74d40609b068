use crate::board::{Board, Cell, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub symbol: Symbol,
}

impl Move {
    pub fn new(row: usize, col: usize, symbol: Symbol) -> Self {
        Self { row, col, symbol }
    }
}

pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Every empty square for `symbol`, row-major.
    pub fn generate_moves(&self, board: &Board, symbol: Symbol) -> Vec<Move> {
        board
            .empty_cells()
            .map(|(row, col)| Move::new(row, col, symbol))
            .collect()
    }

    pub fn is_move_valid(&self, board: &Board, mv: &Move) -> bool {
        mv.row < board.size() && mv.col < board.size() && board.is_empty(mv.row, mv.col)
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct HistoryEntry {
    row: usize,
    col: usize,
    previous: Cell,
}

/// Undo stack for speculative moves. The board itself has no rollback, so a
/// search pushes each tentative move here and pops it before trying the next.
#[derive(Debug, Default)]
pub struct MoveHistory {
    entries: Vec<HistoryEntry>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record what `mv` overwrites, then play it.
    pub fn push(&mut self, board: &mut Board, mv: Move) {
        self.entries.push(HistoryEntry {
            row: mv.row,
            col: mv.col,
            previous: board.get(mv.row, mv.col),
        });
        board.place(mv.row, mv.col, mv.symbol);
    }

    /// Take back the most recent move. Returns `false` on an empty stack.
    pub fn pop(&mut self, board: &mut Board) -> bool {
        match self.entries.pop() {
            Some(entry) => {
                board.restore(entry.row, entry.col, entry.previous);
                true
            }
            None => false,
        }
    }
}
