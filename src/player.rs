//! The player side: an [`Arbiter`] answering board snapshots with moves.

use rand::Rng;
use serde::Serialize;

use crate::arbiter::Arbiter;
use crate::engine::Board;
use crate::protocol::{Request, Snapshot};
use crate::strategist::StrategyError;
use crate::transport::{Channel, TransportError};

#[derive(thiserror::Error, Debug)]
pub enum PlayError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Strategy(#[from] StrategyError),
}

/// Summary of one locally played game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub score: u64,
    pub highest_tile: u32,
    pub moves: u64,
    /// True when the game ended because the council kept picking moves that changed nothing.
    pub stalled: bool,
}

/// Knobs for local play.
///
/// - `max_moves`: stop the game after this many moves.
/// - `stall_limit`: stop after this many consecutive moves that change nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayConfig {
    pub max_moves: Option<u64>,
    pub stall_limit: u32,
}

impl Default for PlayConfig {
    fn default() -> Self { Self { max_moves: None, stall_limit: 16 } }
}

pub struct Player {
    arbiter: Arbiter,
    moves: u64,
}

impl Player {
    pub fn new(arbiter: Arbiter) -> Self { Self { arbiter, moves: 0 } }

    pub fn arbiter(&self) -> &Arbiter { &self.arbiter }

    /// Answer one snapshot with a move token, or `repeat` if the snapshot is invalid.
    pub fn respond(&mut self, payload: &str) -> Result<Request, StrategyError> {
        let board = match Snapshot::parse(payload).and_then(|s| s.board()) {
            Ok(board) => board,
            Err(e) => {
                log::warn!("{:<24}{}", "asking for a resend", e);
                return Ok(Request::Repeat);
            }
        };
        let dir = self.arbiter.make_a_move(board.fields())?;
        self.moves += 1;
        Ok(Request::Move(dir))
    }

    /// Play against a session in board-exchange mode until the peer hangs up
    /// or `max_moves` answers have been given, then say `exit`.
    pub fn play<C: Channel>(&mut self, channel: &mut C, max_moves: Option<u64>) -> Result<u64, PlayError> {
        let start = self.moves;
        while let Some(payload) = channel.recv()? {
            if max_moves.is_some_and(|limit| self.moves - start >= limit) {
                channel.send(Request::Exit.as_str())?;
                break;
            }
            let answer = self.respond(&payload)?;
            channel.send(answer.as_str())?;
        }
        log::info!("{:<24}{}", "player done after", self.moves - start);
        Ok(self.moves - start)
    }

    /// Play one full game on a fresh local board, without any transport.
    pub fn play_game<R: Rng + ?Sized>(&mut self, cfg: PlayConfig, rng: &mut R) -> Result<GameRecord, StrategyError> {
        let board = Board::new(rng);
        self.play_from(board, cfg, rng)
    }

    /// Continue a local game from `board` until it is over, capped or stalled.
    pub fn play_from<R: Rng + ?Sized>(
        &mut self,
        mut board: Board,
        cfg: PlayConfig,
        rng: &mut R,
    ) -> Result<GameRecord, StrategyError> {
        let (mut score, mut moves, mut stalls) = (0u64, 0u64, 0u32);
        while !board.is_terminal() {
            if cfg.max_moves.is_some_and(|limit| moves >= limit) || stalls >= cfg.stall_limit {
                break;
            }
            let dir = self.arbiter.make_a_move(board.fields())?;
            let outcome = board.make_move(dir, rng);
            score += u64::from(outcome.score_gained);
            moves += 1;
            stalls = if outcome.changed { 0 } else { stalls + 1 };
        }
        self.moves += moves;
        Ok(GameRecord { score, highest_tile: board.highest_tile(), moves, stalled: stalls >= cfg.stall_limit })
    }
}
