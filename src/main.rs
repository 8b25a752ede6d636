use std::io;
use std::net::{TcpListener, TcpStream};
use std::thread;

use anyhow::Context;
use clap::{Parser, Subcommand};
use council_2048::arbiter::{Arbiter, ArbiterConfig};
use council_2048::player::Player;
use council_2048::session::{Session, SessionConfig};
use council_2048::strategist::{StrategistKind, StrategyConfig};
use council_2048::transport::{LineChannel, TransportError};

fn main() -> anyhow::Result<()> {
    council_2048::log();
    let args = Args::parse();
    match args.cmd {
        Cmd::Serve { port, seed } => serve(port, seed),
        Cmd::Stdio { seed } => {
            let stdin = io::stdin();
            let mut channel = LineChannel::new(stdin.lock(), io::stdout().lock());
            Session::new(SessionConfig { seed, max_moves: None }).serve(&mut channel)?;
            Ok(())
        }
        Cmd::Host { port, seed, max_moves } => host(port, SessionConfig { seed, max_moves }),
        Cmd::Play { host, port, strategist, choices, vetoes, parallel, seed, max_moves } => {
            let seed = seed.unwrap_or_else(rand::random);
            let arbiter = Arbiter::from_kinds(
                &strategist,
                ArbiterConfig { choices, vetoes, parallel },
                StrategyConfig { parallel, ..Default::default() },
                seed,
            );
            log::info!("{:<24}{:?} (seed {})", "council", strategist, seed);
            let stream = TcpStream::connect((host.as_str(), port)).with_context(|| format!("connect to {host}:{port}"))?;
            let mut channel = LineChannel::tcp(stream)?;
            let answered = Player::new(arbiter).play(&mut channel, max_moves)?;
            println!("Moves answered: {answered}");
            Ok(())
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "council-2048", about = "2048 game sessions and a voting council of strategists")]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Direction-token sessions over TCP, one per connection
    Serve {
        #[arg(long, default_value_t = 2048)]
        port: u16,
        /// Seed for tile spawning; each connection gets the next seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// A single direction-token session over stdin/stdout
    Stdio {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Game side of board-exchange mode: wait for one player and push snapshots to it
    Host {
        #[arg(long, default_value_t = 2048)]
        port: u16,
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many applied moves
        #[arg(long)]
        max_moves: Option<u64>,
    },
    /// Player side of board-exchange mode
    Play {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 2048)]
        port: u16,
        /// Council members; repeat the flag to add more
        #[arg(long, value_enum, num_args = 1.., default_values_t = [StrategistKind::PointMaximizer, StrategistKind::Sweeper])]
        strategist: Vec<StrategistKind>,
        /// Choices cast by each strategist
        #[arg(long, default_value_t = 1)]
        choices: usize,
        /// Vetoes cast by each strategist
        #[arg(long, default_value_t = 1)]
        vetoes: usize,
        /// Consult strategists and simulate directions on the rayon pool
        #[arg(long)]
        parallel: bool,
        #[arg(long)]
        seed: Option<u64>,
        /// Say exit after answering this many snapshots
        #[arg(long)]
        max_moves: Option<u64>,
    },
}

fn serve(port: u16, seed: Option<u64>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).with_context(|| format!("bind port {port}"))?;
    log::info!("{:<24}{}", "listening on", port);
    for (n, stream) in listener.incoming().enumerate() {
        let stream = match stream {
            Ok(s) => s,
            Err(e) => {
                log::warn!("{:<24}{}", "accept failed", e);
                continue;
            }
        };
        let peer = stream.peer_addr().map(|a| a.to_string()).unwrap_or_else(|_| "unknown".into());
        let cfg = SessionConfig { seed: seed.map(|s| s.wrapping_add(n as u64)), max_moves: None };
        thread::spawn(move || {
            log::info!("{:<24}{}", "connection from", peer);
            let result = LineChannel::tcp(stream)
                .map_err(TransportError::from)
                .and_then(|mut channel| Session::new(cfg).serve(&mut channel));
            if let Err(e) = result {
                log::warn!("{:<24}{} {}", "session failed", peer, e);
            }
        });
    }
    Ok(())
}

fn host(port: u16, cfg: SessionConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).with_context(|| format!("bind port {port}"))?;
    log::info!("{:<24}{}", "waiting for a player on", port);
    let (stream, peer) = listener.accept()?;
    log::info!("{:<24}{}", "player joined", peer);
    let mut channel = LineChannel::tcp(stream)?;
    let mut session = Session::new(cfg);
    session.drive(&mut channel)?;
    println!("Games: {} | moves: {} | score: {}", session.games(), session.moves(), session.score());
    Ok(())
}
