use std::fmt;

use crate::board::{Board, Symbol};

/// Terminal classification of a board, ordered from the human's best outcome
/// to the computer's best. The numeric codes are what the memoization table
/// stores and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum Score {
    HumanWins = 0,
    Ongoing = 1,
    Draw = 2,
    ComputerWins = 3,
}

impl Score {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Score> {
        match code {
            0 => Some(Score::HumanWins),
            1 => Some(Score::Ongoing),
            2 => Some(Score::Draw),
            3 => Some(Score::ComputerWins),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != Score::Ongoing
    }

    /// Best outcome `symbol` can hope for.
    pub fn best_for(symbol: Symbol) -> Score {
        match symbol {
            Symbol::Computer => Score::ComputerWins,
            Symbol::Human => Score::HumanWins,
        }
    }

    /// Worst outcome for `symbol`, used to seed a minimax scan.
    pub fn worst_for(symbol: Symbol) -> Score {
        Score::best_for(symbol.opposite())
    }

    /// Whether `self` is strictly better than `other` from `symbol`'s side.
    pub fn prefers(self, other: Score, symbol: Symbol) -> bool {
        match symbol {
            Symbol::Computer => self > other,
            Symbol::Human => self < other,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Score::HumanWins => "human wins",
            Score::Ongoing => "ongoing",
            Score::Draw => "draw",
            Score::ComputerWins => "computer wins",
        };
        write!(f, "{}", text)
    }
}

impl Board {
    /// Classify the board. A computer run is checked before a human run, so a
    /// board carrying both reports the computer's win.
    pub fn evaluate(&self) -> Score {
        if self.has_win(Symbol::Computer) {
            return Score::ComputerWins;
        }
        if self.has_win(Symbol::Human) {
            return Score::HumanWins;
        }
        if self.is_draw() {
            return Score::Draw;
        }
        Score::Ongoing
    }
}
