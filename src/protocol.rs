use crate::board::{Board, Symbol};
use crate::config::GameConfig;
use crate::error::{ProtocolError, TableError};
use crate::evaluation::Score;
use crate::movegen::{Move, MoveGenerator};
use crate::search::Search;
use anyhow::Result;
use log::info;
use std::io::{self, BufRead, Write};

/// Line-based front end: the human plays X, the engine answers with O.
pub struct ProtocolHandler {
    config: GameConfig,
    board: Board,
    move_generator: MoveGenerator,
    search: Search,
}

impl ProtocolHandler {
    pub fn new(config: GameConfig) -> Result<Self, TableError> {
        Ok(Self::with_search(config, Search::new(config)?))
    }

    pub fn with_search(config: GameConfig, search: Search) -> Self {
        ProtocolHandler {
            config,
            board: config.new_board(),
            move_generator: MoveGenerator::new(),
            search,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut reader = stdin.lock();
        let mut line = String::new();

        print!("{}", self.board);
        stdout.flush()?;

        while reader.read_line(&mut line)? > 0 {
            let command = line.trim();
            if command == "quit" {
                break;
            }

            match self.handle_command(command) {
                Ok(response) => print!("{}", response),
                Err(e) => println!("error: {}", e),
            }

            stdout.flush()?;
            line.clear();
        }
        Ok(())
    }

    pub fn handle_command(&mut self, command: &str) -> Result<String, ProtocolError> {
        let parts: Vec<&str> = command.split_whitespace().collect();
        if parts.is_empty() {
            return Ok("".to_string());
        }

        match parts[0] {
            "new" => Ok(self.handle_new()),
            "play" => self.handle_play(&parts[1..]),
            "go" => self.handle_go(),
            "show" => Ok(self.board.to_string()),
            "stats" => Ok(self.handle_stats()),
            "quit" => Ok("".to_string()),
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }

    fn handle_new(&mut self) -> String {
        self.board = self.config.new_board();
        info!(
            "new game: {0}x{0} board, {1} in a row, depth {2}",
            self.config.board_size, self.config.win_length, self.config.max_levels
        );
        format!("{}", self.board)
    }

    fn handle_play(&mut self, parts: &[&str]) -> Result<String, ProtocolError> {
        if self.board.evaluate().is_terminal() {
            return Err(ProtocolError::GameOver);
        }

        let row = self.parse_coordinate(parts.first().copied(), "row")?;
        let col = self.parse_coordinate(parts.get(1).copied(), "col")?;
        let size = self.board.size();
        if row >= size || col >= size {
            return Err(ProtocolError::OutOfBounds { row, col, size });
        }

        let mv = Move::new(row, col, Symbol::Human);
        if !self.move_generator.is_move_valid(&self.board, &mv) {
            return Err(ProtocolError::Occupied { row, col });
        }
        self.board.place(mv.row, mv.col, mv.symbol);

        if self.board.evaluate().is_terminal() {
            return Ok(self.report(None));
        }
        self.handle_go()
    }

    fn handle_go(&mut self) -> Result<String, ProtocolError> {
        if self.board.evaluate().is_terminal() {
            return Err(ProtocolError::GameOver);
        }

        let reply = self.search.best_move(&mut self.board, Symbol::Computer)?;
        if let Some(mv) = reply {
            self.board.place(mv.row, mv.col, mv.symbol);
        }
        Ok(self.report(reply))
    }

    fn handle_stats(&self) -> String {
        let stats = self.search.table().stats();
        format!(
            "records {} capacity {} occupied {} longest {} collisions {} nodes {} hits {}\n",
            stats.records,
            stats.capacity,
            stats.occupied_buckets,
            stats.longest_chain,
            stats.collisions,
            self.search.nodes_searched(),
            self.search.cache_hits()
        )
    }

    fn parse_coordinate(&self, token: Option<&str>, name: &'static str) -> Result<usize, ProtocolError> {
        let token = token.ok_or(ProtocolError::MissingArgument(name))?;
        token
            .parse::<usize>()
            .map_err(|_| ProtocolError::InvalidCoordinate(token.to_string()))
    }

    fn report(&self, reply: Option<Move>) -> String {
        let mut result = String::new();
        if let Some(mv) = reply {
            result.push_str(&format!("computer {} {}\n", mv.row, mv.col));
        }
        result.push_str(&self.board.to_string());

        let outcome = self.board.evaluate();
        if outcome != Score::Ongoing {
            info!("game over: {}", outcome);
            result.push_str(&format!("result {}\n", outcome));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> ProtocolHandler {
        let config = GameConfig::default();
        ProtocolHandler::with_search(config, Search::with_seed(config, 11).unwrap())
    }

    #[test]
    fn test_play_gets_a_reply() {
        let mut handler = handler();
        let response = handler.handle_command("play 1 1").unwrap();
        assert!(response.starts_with("computer "));
        assert_eq!(handler.board().empty_cells().count(), 7);
    }

    #[test]
    fn test_rejects_bad_moves() {
        let mut handler = handler();
        assert!(matches!(
            handler.handle_command("play 3 0"),
            Err(ProtocolError::OutOfBounds { row: 3, col: 0, size: 3 })
        ));
        assert!(matches!(
            handler.handle_command("play a 0"),
            Err(ProtocolError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            handler.handle_command("play 1"),
            Err(ProtocolError::MissingArgument("col"))
        ));
        assert!(matches!(
            handler.handle_command("jump"),
            Err(ProtocolError::UnknownCommand(_))
        ));

        handler.handle_command("play 0 0").unwrap();
        assert!(matches!(
            handler.handle_command("play 0 0"),
            Err(ProtocolError::Occupied { row: 0, col: 0 })
        ));
    }

    #[test]
    fn test_game_runs_to_a_result() {
        let mut handler = handler();
        let mut last = String::new();
        for _ in 0..9 {
            let next = handler.board().empty_cells().next();
            let Some((row, col)) = next else { break };
            match handler.handle_command(&format!("play {} {}", row, col)) {
                Ok(response) => last = response,
                Err(ProtocolError::GameOver) => break,
                Err(e) => panic!("unexpected error: {}", e),
            }
            if last.contains("result") {
                break;
            }
        }
        // Naive row-major play loses or draws against the engine
        assert!(last.contains("result computer wins") || last.contains("result draw"));
        assert!(matches!(handler.handle_command("go"), Err(ProtocolError::GameOver)));

        handler.handle_command("new").unwrap();
        assert_eq!(handler.board().empty_cells().count(), 9);
    }

    #[test]
    fn test_stats_after_search() {
        let mut handler = handler();
        handler.handle_command("go").unwrap();
        let stats = handler.handle_command("stats").unwrap();
        assert!(stats.starts_with("records "));
        assert!(stats.contains("capacity 7971"));
    }
}
