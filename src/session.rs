//! The game side of the request/reply loop.
//!
//! A [`Session`] owns exactly one [`Board`] and applies moves to it strictly
//! one at a time. Two loop shapes are supported:
//!
//! - [`Session::serve`]: the peer sends direction tokens, the session replies
//!   with a snapshot (or an error record for unknown tokens).
//! - [`Session::drive`]: the session sends a snapshot first and applies the
//!   direction token it gets back (board-exchange mode).
//!
//! When a move leaves the board terminal the session swaps in a freshly
//! seeded board before the next cycle. The score keeps accumulating.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::{Board, Direction};
use crate::protocol::{ErrorReply, Reply, Request, Snapshot};
use crate::transport::{Channel, TransportError};

/// Session knobs.
///
/// - `seed`: seed for tile spawning; `None` draws one from the OS.
/// - `max_moves`: in board-exchange mode, stop after this many applied moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub seed: Option<u64>,
    pub max_moves: Option<u64>,
}

/// Outcome of handling one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Reply(Reply),
    Exit,
}

pub struct Session {
    cfg: SessionConfig,
    rng: StdRng,
    board: Board,
    score: u64,
    last_move: u32,
    moves: u64,
    games: u64,
}

impl Session {
    pub fn new(cfg: SessionConfig) -> Self {
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let board = Board::new(&mut rng);
        Self { cfg, rng, board, score: 0, last_move: 0, moves: 0, games: 1 }
    }

    #[inline]
    pub fn board(&self) -> &Board { &self.board }

    #[inline]
    pub fn score(&self) -> u64 { self.score }

    /// Moves applied so far, across all games.
    #[inline]
    pub fn moves(&self) -> u64 { self.moves }

    /// Games started so far, including the current one.
    #[inline]
    pub fn games(&self) -> u64 { self.games }

    pub fn snapshot(&self) -> Snapshot { Snapshot::new(&self.board, self.last_move, self.score) }

    /// Handle one direction-token request.
    pub fn handle(&mut self, token: &str) -> Step {
        match Request::parse(token) {
            Ok(Request::Exit) => Step::Exit,
            Ok(Request::Repeat) => Step::Reply(Reply::Snapshot(self.snapshot())),
            Ok(Request::Move(dir)) => {
                self.apply(dir);
                let reply = Reply::Snapshot(self.snapshot());
                self.restart_if_over();
                Step::Reply(reply)
            }
            Err(e) => {
                log::warn!("{:<24}{}", "rejected request", e);
                Step::Reply(Reply::Error(ErrorReply::bad_request(token)))
            }
        }
    }

    /// Answer direction tokens until the peer says `exit` or hangs up.
    pub fn serve<C: Channel>(&mut self, channel: &mut C) -> Result<(), TransportError> {
        log::info!("{:<24}{}", "session started", self.games);
        while let Some(request) = channel.recv()? {
            match self.handle(&request) {
                Step::Exit => break,
                Step::Reply(reply) => channel.send(&reply.encode()?)?,
            }
        }
        log::info!("{:<24}score {} after {} moves", "session closed", self.score, self.moves);
        Ok(())
    }

    /// Push snapshots and apply the moves that come back.
    pub fn drive<C: Channel>(&mut self, channel: &mut C) -> Result<(), TransportError> {
        log::info!("{:<24}{}", "driving session", self.games);
        loop {
            if self.cfg.max_moves.is_some_and(|limit| self.moves >= limit) {
                log::info!("{:<24}{}", "move limit reached", self.moves);
                break;
            }
            channel.send(&Reply::Snapshot(self.snapshot()).encode()?)?;
            let Some(answer) = channel.recv()? else { break };
            match Request::parse(&answer) {
                Ok(Request::Exit) => break,
                Ok(Request::Repeat) => {}
                Ok(Request::Move(dir)) => {
                    self.apply(dir);
                    self.restart_if_over();
                }
                Err(e) => log::warn!("{:<24}{}", "ignored answer", e),
            }
        }
        log::info!("{:<24}score {} after {} moves", "session closed", self.score, self.moves);
        Ok(())
    }

    fn apply(&mut self, dir: Direction) {
        let outcome = self.board.make_move(dir, &mut self.rng);
        self.last_move = outcome.score_gained;
        self.score += u64::from(outcome.score_gained);
        self.moves += 1;
        log::debug!("{:<24}{} {:?}{}", "applied", dir, outcome, self.board);
    }

    fn restart_if_over(&mut self) {
        if self.board.is_terminal() {
            log::info!(
                "{:<24}game {} ended at highest tile {}",
                "game over",
                self.games,
                self.board.highest_tile()
            );
            self.board = Board::new(&mut self.rng);
            self.games += 1;
        }
    }
}
