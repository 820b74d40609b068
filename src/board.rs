use std::fmt;

/// Direction vectors for line scanning: horizontal, vertical, and both diagonals.
const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // Row
    (1, 0),  // Column
    (1, 1),  // Diagonal down-right
    (1, -1), // Diagonal down-left
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Human,
    Computer,
}

impl Symbol {
    pub fn opposite(&self) -> Symbol {
        match self {
            Symbol::Human => Symbol::Computer,
            Symbol::Computer => Symbol::Human,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Symbol::Human => 'X',
            Symbol::Computer => 'O',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Taken(Symbol),
}

impl Cell {
    /// Marker written into the canonical key for this cell.
    pub fn as_char(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Taken(symbol) => symbol.as_char(),
        }
    }
}

impl From<Symbol> for Cell {
    fn from(symbol: Symbol) -> Self {
        Cell::Taken(symbol)
    }
}

/// An N x N grid where a run of `win_length` equal symbols wins.
///
/// Cells are stored row-major. A cell goes from empty to taken once through
/// [`Board::place`]; the only way back is [`Board::restore`], which exists for
/// search drivers unwinding their own move history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    win_length: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(size: usize, win_length: usize) -> Self {
        Self {
            size,
            win_length,
            cells: vec![Cell::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.size && col < self.size, "({row}, {col}) off board");
        row * self.size + col
    }

    #[inline]
    fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Put `symbol` on an empty square.
    ///
    /// The caller checks [`Board::is_empty`] first; nothing is validated here
    /// beyond debug assertions.
    pub fn place(&mut self, row: usize, col: usize, symbol: Symbol) {
        let index = self.index(row, col);
        debug_assert_eq!(self.cells[index], Cell::Empty, "({row}, {col}) already taken");
        self.cells[index] = Cell::Taken(symbol);
    }

    /// Write back a cell value recorded before a speculative `place`.
    pub fn restore(&mut self, row: usize, col: usize, cell: Cell) {
        let index = self.index(row, col);
        self.cells[index] = cell;
    }

    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Cell::Empty
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Coordinates of every empty square in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(move |(index, _)| (index / self.size, index % self.size))
    }

    /// Canonical key: one marker per cell, row-major, `size * size` chars long.
    pub fn encode(&self) -> String {
        self.cells.iter().map(Cell::as_char).collect()
    }

    pub fn has_win(&self, symbol: Symbol) -> bool {
        DIRECTIONS.iter().any(|&(dr, dc)| {
            self.line_starts(dr, dc)
                .any(|(row, col)| self.scan_line(row, col, dr, dc, symbol))
        })
    }

    pub fn is_draw(&self) -> bool {
        !self.has_win(Symbol::Human) && !self.has_win(Symbol::Computer) && self.is_full()
    }

    // A line starts wherever stepping backwards along the direction leaves the board.
    fn line_starts(&self, dr: isize, dc: isize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        (0..size)
            .flat_map(move |row| (0..size).map(move |col| (row, col)))
            .filter(move |&(row, col)| !self.in_bounds(row as isize - dr, col as isize - dc))
    }

    fn scan_line(&self, row: usize, col: usize, dr: isize, dc: isize, symbol: Symbol) -> bool {
        let target = Cell::from(symbol);
        let mut run = 0;
        let (mut r, mut c) = (row as isize, col as isize);

        while self.in_bounds(r, c) {
            if self.cells[r as usize * self.size + c as usize] == target {
                run += 1;
                if run >= self.win_length {
                    return true;
                }
            } else {
                run = 0;
            }
            r += dr;
            c += dc;
        }
        false
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut result = String::new();
        for row in 0..self.size {
            for col in 0..self.size {
                result.push(match self.get(row, col) {
                    Cell::Empty => '.',
                    Cell::Taken(symbol) => symbol.as_char(),
                });
                if col + 1 < self.size {
                    result.push(' ');
                }
            }
            result.push('\n');
        }
        write!(f, "{}", result)
    }
}
