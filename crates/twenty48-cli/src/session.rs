use std::io::Write;

use anyhow::Result;
use log::info;
use twenty48_core::engine::{has_legal_move, BoardEngine, Direction, SpawnSource, Status};

use crate::config::{Play, StrategyKind};

/// Result of one game driven to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub moves: u32,
    pub score: u64,
    pub highest_tile: u32,
    pub status: Status,
}

/// Order the cycle strategy tries directions in.
const CYCLE_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Down,
    Direction::Right,
];

/// Drives an engine with the configured strategy and renders every step.
pub struct Session<'a, S, W> {
    engine: &'a mut BoardEngine<S>,
    play: &'a Play,
    out: W,
    quiet: bool,
}

impl<'a, S: SpawnSource, W: Write> Session<'a, S, W> {
    pub fn new(engine: &'a mut BoardEngine<S>, play: &'a Play, out: W, quiet: bool) -> Self {
        Self {
            engine,
            play,
            out,
            quiet,
        }
    }

    /// Play the first game plus any configured restarts.
    pub fn run(&mut self) -> Result<Vec<SessionSummary>> {
        let mut summaries = Vec::with_capacity(self.play.restarts as usize + 1);
        self.engine.start();
        summaries.push(self.play_game(1)?);
        for game in 0..self.play.restarts {
            self.engine.restart();
            summaries.push(self.play_game(game + 2)?);
        }
        Ok(summaries)
    }

    fn play_game(&mut self, game: u32) -> Result<SessionSummary> {
        self.render(&format!("game {game} start"))?;
        let play = self.play;
        let mut moves = 0u32;
        let mut script = play.moves.iter();
        let mut cycle = CYCLE_ORDER.iter().cycle();

        while moves < play.max_moves && !self.engine.status().is_terminal() {
            let direction = match play.kind {
                StrategyKind::Scripted => match script.next() {
                    Some(&d) => d,
                    None => break,
                },
                StrategyKind::Cycle => {
                    if !has_legal_move(&self.engine.grid()) {
                        break;
                    }
                    *cycle.next().unwrap_or(&Direction::Up)
                }
            };
            let outcome = self.engine.apply(direction);
            if outcome.changed {
                moves += 1;
                self.render(&format!("{direction} (+{})", outcome.merged))?;
            }
        }

        let summary = SessionSummary {
            moves,
            score: self.engine.score(),
            highest_tile: self.engine.grid().highest_tile(),
            status: self.engine.status(),
        };
        info!(
            "game {game} finished: status={}, moves={}, score={}, highest_tile={}",
            summary.status, summary.moves, summary.score, summary.highest_tile
        );
        writeln!(
            self.out,
            "game {game}: {} after {} moves, score {}, highest tile {}",
            summary.status, summary.moves, summary.score, summary.highest_tile
        )?;
        Ok(summary)
    }

    /// Poll the engine's read interface and print it.
    fn render(&mut self, label: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(
            self.out,
            "[{label}] score={} status={}",
            self.engine.score(),
            self.engine.status()
        )?;
        write!(self.out, "{}", self.engine.grid())?;
        match self.engine.status() {
            Status::Win => writeln!(self.out, "You win!")?,
            Status::Lose => writeln!(self.out, "Game over.")?,
            Status::Idle | Status::Playing => {}
        }
        writeln!(self.out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twenty48_core::engine::{Grid, SequenceSource};

    fn scripted(moves: &[Direction]) -> Play {
        Play {
            kind: StrategyKind::Scripted,
            moves: moves.to_vec(),
            ..Play::default()
        }
    }

    #[test]
    fn scripted_moves_are_rendered() {
        let grid = Grid::from_array([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        let mut engine = BoardEngine::with_source(grid, SequenceSource::new([0]));
        let play = scripted(&[Direction::Left, Direction::Left]);
        let mut out = Vec::new();

        let summaries = Session::new(&mut engine, &play, &mut out, false).run().unwrap();
        assert_eq!(summaries.len(), 1);
        let summary = summaries[0];
        // start fills (0,2) and (0,3), then [2,2,2,2] -> [4,4,2,0] -> [8,2,2,0]
        assert_eq!(summary.status, Status::Playing);
        assert_eq!(summary.moves, 2);
        assert_eq!(summary.score, 16);
        assert_eq!(engine.state()[0], [8, 2, 2, 0]);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[game 1 start]"));
        assert!(text.contains("[left (+"));
        assert!(text.contains("game 1: playing"));
    }

    #[test]
    fn cycle_strategy_plays_until_terminal() {
        let mut engine = BoardEngine::with_seed(Grid::EMPTY, 11);
        let play = Play::default();
        let summaries = Session::new(&mut engine, &play, std::io::sink(), true)
            .run()
            .unwrap();
        let summary = summaries[0];
        assert!(summary.status.is_terminal());
        assert!(summary.moves > 0);
        assert_eq!(summary.score, engine.score());
    }

    #[test]
    fn restarts_play_extra_games() {
        let mut engine = BoardEngine::with_seed(Grid::EMPTY, 3);
        let play = Play {
            max_moves: 5,
            restarts: 2,
            ..Play::default()
        };
        let mut out = Vec::new();
        let summaries = Session::new(&mut engine, &play, &mut out, true).run().unwrap();
        assert_eq!(summaries.len(), 3);
        assert!(summaries.iter().all(|s| s.moves <= 5));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("game 3:"));
        assert!(!text.contains("[game 1 start]"));
    }
}
