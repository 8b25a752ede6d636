//! Wire records exchanged by the game loop.
//!
//! Requests are bare tokens (`left`, `right`, `up`, `down`, `repeat`, `exit`).
//! Replies are single-line JSON: either a board [`Snapshot`] or an
//! [`ErrorReply`]. In board-exchange mode the snapshot travels the other way
//! and is validated before use.

use serde::{Deserialize, Serialize};

use crate::engine::{Board, BoardError, Cell, Direction};

/// What a client may ask of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Move(Direction),
    Repeat,
    Exit,
}

impl Request {
    pub fn parse(token: &str) -> Result<Self, BoardError> {
        match token {
            "repeat" => Ok(Request::Repeat),
            "exit" => Ok(Request::Exit),
            other => other.parse().map(Request::Move),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Request::Move(dir) => dir.as_str(),
            Request::Repeat => "repeat",
            Request::Exit => "exit",
        }
    }
}

/// Board state as seen by the other side of the loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    /// 16 cells, row-major, `null` for empty.
    pub fields: Vec<Cell>,
    /// Points scored by the move just applied.
    pub last_move: u32,
    /// Cumulative session score.
    pub score: u64,
}

impl Snapshot {
    pub fn new(board: &Board, last_move: u32, score: u64) -> Self {
        Self { fields: board.fields().to_vec(), last_move, score }
    }

    /// Decode and validate a snapshot received from a peer.
    ///
    /// Malformed JSON, unknown or missing keys, a wrong cell count and
    /// non power-of-two values are all [`BoardError::InvalidBoardPayload`].
    pub fn parse(payload: &str) -> Result<Self, BoardError> {
        let snapshot: Snapshot =
            serde_json::from_str(payload).map_err(|e| BoardError::InvalidBoardPayload(e.to_string()))?;
        snapshot.board()?;
        Ok(snapshot)
    }

    /// The board described by this snapshot. No tiles are added.
    pub fn board(&self) -> Result<Board, BoardError> { Board::from_cells(&self.fields) }
}

/// Reply to a request the session could not honour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

impl ErrorReply {
    pub fn bad_request(token: &str) -> Self {
        Self { error: format!("Bad request '{token}', try up, down, left or right!") }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    Snapshot(Snapshot),
    Error(ErrorReply),
}

impl Reply {
    /// Single-line JSON encoding.
    pub fn encode(&self) -> Result<String, serde_json::Error> { serde_json::to_string(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_tokens() {
        assert_eq!(Request::parse("up"), Ok(Request::Move(Direction::Up)));
        assert_eq!(Request::parse("repeat"), Ok(Request::Repeat));
        assert_eq!(Request::parse("exit"), Ok(Request::Exit));
        assert_eq!(Request::parse("UP"), Err(BoardError::InvalidDirection("UP".into())));
        for token in ["left", "right", "up", "down", "repeat", "exit"] {
            assert_eq!(Request::parse(token).unwrap().as_str(), token);
        }
    }

    #[test]
    fn snapshot_encodes_nulls_for_empty_cells() {
        let mut fields = [None; 16];
        fields[0] = Some(2);
        fields[15] = Some(4);
        let board = Board::from_fields(fields).unwrap();
        let json = Reply::Snapshot(Snapshot::new(&board, 8, 120)).encode().unwrap();
        assert!(json.starts_with(r#"{"fields":[2,null,"#));
        assert!(json.ends_with(r#"null,4],"last_move":8,"score":120}"#));
        assert!(!json.contains('\n'));
    }

    #[test]
    fn error_reply_wording() {
        let json = Reply::Error(ErrorReply::bad_request("jump")).encode().unwrap();
        assert_eq!(json, r#"{"error":"Bad request 'jump', try up, down, left or right!"}"#);
    }

    #[test]
    fn snapshot_round_trips_through_parse() {
        let board = Board::from_fields([Some(2); 16]).unwrap();
        let json = Reply::Snapshot(Snapshot::new(&board, 0, 0)).encode().unwrap();
        let parsed = Snapshot::parse(&json).unwrap();
        assert_eq!(parsed.board().unwrap(), board);
    }

    #[test]
    fn it_rejects_invalid_payloads() {
        let cases = [
            "not json",
            r#"{"fields":[2],"last_move":0,"score":0}"#,
            r#"{"fields":[3,null,null,null,null,null,null,null,null,null,null,null,null,null,null,null],"last_move":0,"score":0}"#,
            r#"{"fields":[null,null,null,null,null,null,null,null,null,null,null,null,null,null,null,null],"score":0}"#,
            r#"{"fields":[null,null,null,null,null,null,null,null,null,null,null,null,null,null,null,null],"last_move":0,"score":0,"cheat":true}"#,
        ];
        for payload in cases {
            assert!(
                matches!(Snapshot::parse(payload), Err(BoardError::InvalidBoardPayload(_))),
                "accepted {payload}"
            );
        }
    }
}
