use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{Board, Symbol};
use crate::config::GameConfig;
use crate::error::TableError;
use crate::evaluation::Score;
use crate::movegen::{Move, MoveGenerator, MoveHistory};
use crate::transposition::TranspositionTable;

/// Depth-bounded minimax over score codes. The computer maximises, the human
/// minimises. Each call to [`Search::best_move`] is one session with a fresh
/// memoization table; within a session a configuration is always reached at
/// the same depth, so a cached score is valid wherever it is hit.
pub struct Search {
    config: GameConfig,
    move_generator: MoveGenerator,
    transposition_table: TranspositionTable,
    history: MoveHistory,
    rng: StdRng,
    nodes_searched: u64,
    cache_hits: u64,
}

impl Search {
    pub fn new(config: GameConfig) -> Result<Self, TableError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic tie-breaking between equally scored moves.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, TableError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, TableError> {
        Ok(Self {
            config,
            move_generator: MoveGenerator::new(),
            transposition_table: config.create_dictionary()?,
            history: MoveHistory::new(),
            rng,
            nodes_searched: 0,
            cache_hits: 0,
        })
    }

    /// Pick a move for `symbol`. The board is handed back exactly as it came
    /// in. Returns `None` when there is no empty square.
    pub fn best_move(&mut self, board: &mut Board, symbol: Symbol) -> Result<Option<Move>, TableError> {
        self.transposition_table = self.config.create_dictionary()?;
        self.nodes_searched = 0;
        self.cache_hits = 0;

        let mut best_score = Score::worst_for(symbol);
        let mut best_moves = Vec::new();

        for mv in self.move_generator.generate_moves(board, symbol) {
            let score = self.try_move(board, mv, 1)?;

            if score.prefers(best_score, symbol) || best_moves.is_empty() {
                best_score = score;
                best_moves.clear();
            }
            if score == best_score {
                best_moves.push(mv);
            }
        }

        let chosen = best_moves.choose(&mut self.rng).copied();
        debug!(
            "search for {:?}: {:?} scores {} ({} nodes, {} cache hits, {} records)",
            symbol,
            chosen.map(|mv| (mv.row, mv.col)),
            best_score,
            self.nodes_searched,
            self.cache_hits,
            self.transposition_table.num_records()
        );
        Ok(chosen)
    }

    // Play `mv`, score the result through the table, take `mv` back.
    fn try_move(&mut self, board: &mut Board, mv: Move, level: u32) -> Result<Score, TableError> {
        self.history.push(board, mv);
        let scored = self.score_position(board, mv.symbol.opposite(), level);
        self.history.pop(board);
        scored
    }

    fn score_position(&mut self, board: &mut Board, to_move: Symbol, level: u32) -> Result<Score, TableError> {
        let cached = self.config.repeated_configuration(board, &self.transposition_table);
        if let Some(score) = Score::from_code(cached) {
            self.cache_hits += 1;
            return Ok(score);
        }

        let score = self.minimax(board, to_move, level)?;
        self.config
            .add_configuration(board, &mut self.transposition_table, score)?;
        Ok(score)
    }

    fn minimax(&mut self, board: &mut Board, to_move: Symbol, level: u32) -> Result<Score, TableError> {
        self.nodes_searched += 1;

        let outcome = board.evaluate();
        if outcome.is_terminal() || level >= self.config.max_levels {
            return Ok(outcome);
        }

        let mut best = Score::worst_for(to_move);
        for mv in self.move_generator.generate_moves(board, to_move) {
            let score = self.try_move(board, mv, level + 1)?;
            if score.prefers(best, to_move) {
                best = score;
            }
            // Nothing beats an outright win
            if best == Score::best_for(to_move) {
                break;
            }
        }
        Ok(best)
    }

    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    /// Table from the most recent session.
    pub fn table(&self) -> &TranspositionTable {
        &self.transposition_table
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search() -> Search {
        Search::with_seed(GameConfig::default(), 7).unwrap()
    }

    fn play(board: &mut Board, moves: &[(usize, usize, Symbol)]) {
        for &(row, col, symbol) in moves {
            board.place(row, col, symbol);
        }
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut board = Board::new(3, 3);
        play(
            &mut board,
            &[
                (0, 0, Symbol::Computer),
                (1, 0, Symbol::Human),
                (0, 1, Symbol::Computer),
                (1, 1, Symbol::Human),
            ],
        );

        let mv = search().best_move(&mut board, Symbol::Computer).unwrap().unwrap();
        assert_eq!((mv.row, mv.col), (0, 2));
    }

    #[test]
    fn test_blocks_immediate_loss() {
        let mut board = Board::new(3, 3);
        play(
            &mut board,
            &[
                (0, 0, Symbol::Human),
                (1, 1, Symbol::Computer),
                (0, 1, Symbol::Human),
            ],
        );

        let mv = search().best_move(&mut board, Symbol::Computer).unwrap().unwrap();
        assert_eq!((mv.row, mv.col), (0, 2));
    }

    #[test]
    fn test_board_and_history_untouched() {
        let mut board = Board::new(3, 3);
        board.place(1, 1, Symbol::Human);
        let before = board.clone();

        let mut search = search();
        search.best_move(&mut board, Symbol::Computer).unwrap();
        assert_eq!(board, before);
        assert_eq!(search.history_len(), 0);
        assert!(search.nodes_searched() > 0);
        assert!(search.table().num_records() > 0);
        assert!(search.cache_hits() > 0);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board = Board::new(1, 1);
        board.place(0, 0, Symbol::Human);
        assert_eq!(search().best_move(&mut board, Symbol::Computer).unwrap(), None);
    }

    #[test]
    fn test_perfect_play_draws() {
        let config = GameConfig::default();
        let mut board = config.new_board();
        let mut computer = Search::with_seed(config, 1).unwrap();
        let mut human = Search::with_seed(config, 2).unwrap();
        let mut symbol = Symbol::Human;

        while board.evaluate() == Score::Ongoing {
            let engine = match symbol {
                Symbol::Human => &mut human,
                Symbol::Computer => &mut computer,
            };
            let mv = engine.best_move(&mut board, symbol).unwrap().unwrap();
            board.place(mv.row, mv.col, mv.symbol);
            symbol = symbol.opposite();
        }
        assert_eq!(board.evaluate(), Score::Draw);
    }

    #[test]
    fn test_depth_limit_shrinks_table() {
        let shallow = GameConfig::new(3, 3, 2).unwrap();
        let mut board = shallow.new_board();

        let mut limited = Search::with_seed(shallow, 3).unwrap();
        limited.best_move(&mut board, Symbol::Computer).unwrap();

        let mut full = search();
        full.best_move(&mut board, Symbol::Computer).unwrap();

        // Levels 1 and 2 only: 9 + 9 * 8 configurations
        assert_eq!(limited.table().num_records(), 81);
        assert!(full.table().num_records() > limited.table().num_records());
    }
}
