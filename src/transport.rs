//! Blocking request/reply channels.
//!
//! A [`Channel`] moves one message at a time in each direction. Two
//! implementations ship with the crate: [`LineChannel`] frames messages as
//! lines over any reader/writer pair (stdin/stdout, TCP), and
//! [`MemoryChannel`] connects two ends inside one process.

use std::io::{self, BufRead, BufReader, Write};
use std::net::TcpStream;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("message spans several lines")]
    Framing,
    #[error("peer hung up")]
    Closed,
}

pub trait Channel {
    /// Block until the next message arrives. `None` once the peer is gone.
    fn recv(&mut self) -> Result<Option<String>, TransportError>;

    fn send(&mut self, message: &str) -> Result<(), TransportError>;
}

/// Newline-delimited messages over a reader/writer pair.
pub struct LineChannel<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LineChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self { Self { reader, writer } }
}

impl LineChannel<BufReader<TcpStream>, TcpStream> {
    pub fn tcp(stream: TcpStream) -> io::Result<Self> {
        let writer = stream.try_clone()?;
        Ok(Self::new(BufReader::new(stream), writer))
    }
}

impl<R: BufRead, W: Write> Channel for LineChannel<R, W> {
    fn recv(&mut self) -> Result<Option<String>, TransportError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn send(&mut self, message: &str) -> Result<(), TransportError> {
        if message.contains('\n') {
            return Err(TransportError::Framing);
        }
        self.writer.write_all(message.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// One end of an in-process channel pair.
pub struct MemoryChannel {
    tx: Sender<String>,
    rx: Receiver<String>,
}

/// Two connected ends: what one sends, the other receives.
pub fn memory_pair() -> (MemoryChannel, MemoryChannel) {
    let (a_tx, b_rx) = mpsc::channel();
    let (b_tx, a_rx) = mpsc::channel();
    (MemoryChannel { tx: a_tx, rx: a_rx }, MemoryChannel { tx: b_tx, rx: b_rx })
}

impl Channel for MemoryChannel {
    fn recv(&mut self) -> Result<Option<String>, TransportError> { Ok(self.rx.recv().ok()) }

    fn send(&mut self, message: &str) -> Result<(), TransportError> {
        self.tx.send(message.to_string()).map_err(|_| TransportError::Closed)
    }
}
