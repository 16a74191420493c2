//! The orchestrator: one coarse exclusive region over board, roster and
//! phase. Handlers queue outbound lines while holding the lock (unbounded
//! senders never block); actual socket writes happen in the per-connection
//! writer tasks, so no network I/O ever runs under the lock.

pub mod flow;
pub mod round;

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::domain::{Board, Phase, PlayerId};
use crate::protocol::ServerMsg;
use crate::session::SessionRegistry;

pub const THEMES: [&str; 3] = ["Classic", "Spooky", "Space"];
pub const COLOR_PALETTE: [&str; 4] = ["#2ecc71", "#e74c3c", "#3498db", "#f1c40f"];

pub struct GameServer {
    pub(crate) config: ServerConfig,
    pub(crate) room: Mutex<GameRoom>,
}

pub(crate) struct GameRoom {
    pub phase: Phase,
    pub board: Board,
    pub registry: SessionRegistry,
    pub theme: String,
    pub started_at: Option<Instant>,
    /// Owns every timer of the current round; cancelled on finish.
    pub round_token: CancellationToken,
}

impl GameRoom {
    fn new(board_size: usize) -> Self {
        Self {
            phase: Phase::Lobby,
            board: Board::new(board_size),
            registry: SessionRegistry::new(),
            theme: THEMES[0].to_string(),
            started_at: None,
            round_token: CancellationToken::new(),
        }
    }

    /// Serialize once, queue to every peer. A dead receiver is skipped and
    /// never aborts delivery to the rest.
    pub fn broadcast(&self, msg: &ServerMsg) {
        let Some(line) = encode(msg) else { return };
        for sender in self.registry.senders() {
            let _ = sender.send(line.clone());
        }
    }

    pub fn broadcast_players(&self) {
        self.broadcast(&ServerMsg::Players {
            players: self.registry.roster(),
            theme: self.theme.clone(),
        });
    }
}

pub(crate) fn encode(msg: &ServerMsg) -> Option<String> {
    match serde_json::to_string(msg) {
        Ok(json) => Some(format!("{json}\n")),
        Err(err) => {
            warn!(error = %err, "[ROOM] failed to serialize outbound message");
            None
        }
    }
}

impl GameServer {
    pub fn new(config: ServerConfig) -> Arc<Self> {
        let room = GameRoom::new(config.board_size);
        Arc::new(Self {
            config,
            room: Mutex::new(room),
        })
    }

    /// Register a freshly accepted connection: allocate an id, ack with
    /// WELCOME, publish the new roster. Anyone connecting after the lobby
    /// closes becomes a spectator.
    pub fn handle_connect(&self, sender: UnboundedSender<String>) -> PlayerId {
        let mut room = self.room.lock();
        let spectator = room.phase != Phase::Lobby;
        let (player, avatar) = room.registry.register(sender.clone(), spectator);

        let welcome = ServerMsg::Welcome {
            player,
            avatar,
            spectator,
            size: self.config.board_size,
        };
        if let Some(line) = encode(&welcome) {
            let _ = sender.send(line);
        }
        room.broadcast_players();
        info!(player, spectator, "[SESSION] player connected");
        player
    }

    /// Connection teardown: drop the record, publish the roster, and end
    /// the round if too few players remain to contest it.
    pub fn handle_disconnect(&self, player: PlayerId) {
        let mut room = self.room.lock();
        if !room.registry.remove(player) {
            return;
        }
        room.broadcast_players();
        info!(player, "[SESSION] player disconnected");

        if matches!(room.phase, Phase::Previewing | Phase::Active)
            && room.registry.active_count() < 2
        {
            self.finish_round(&mut room);
        }
    }
}
