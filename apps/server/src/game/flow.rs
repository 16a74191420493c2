//! Inbound message dispatch and the round start check.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{GameRoom, GameServer, COLOR_PALETTE, THEMES};
use crate::domain::{Board, Phase, PlayerId};
use crate::protocol::{ClientMsg, ServerMsg};

impl GameServer {
    /// Dispatch one decoded inbound message. Wrong-phase, conflicting and
    /// losing-race requests are dropped without a reply; late and duplicate
    /// messages are expected under network jitter, not protocol errors.
    pub fn handle_message(self: &Arc<Self>, player: PlayerId, msg: ClientMsg) {
        let mut room = self.room.lock();
        if !room.registry.contains(player) {
            return;
        }

        match msg {
            // JOIN carries the initial display name; NAME renames later.
            ClientMsg::Join { name } | ClientMsg::Name { name } => {
                self.set_name(&mut room, player, &name)
            }
            ClientMsg::Color { color } => self.set_color(&mut room, player, color),
            ClientMsg::Theme { theme } => self.set_theme(&mut room, theme),
            ClientMsg::Ready => self.mark_ready(&mut room, player),
            ClientMsg::Chat { msg } => self.relay_chat(&room, player, &msg),
            ClientMsg::Click { row, col } => self.claim_cell(&mut room, player, row, col),
        }
    }

    fn set_name(&self, room: &mut GameRoom, player: PlayerId, name: &str) {
        if room.phase != Phase::Lobby {
            return;
        }
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let Some(record) = room.registry.get_mut(player) else {
            return;
        };
        record.name = name.to_string();
        room.broadcast_players();
    }

    fn set_color(&self, room: &mut GameRoom, player: PlayerId, color: String) {
        if room.phase != Phase::Lobby || !COLOR_PALETTE.contains(&color.as_str()) {
            return;
        }
        if room.registry.color_taken(&color, player) {
            debug!(player, color = %color, "[LOBBY] color already taken");
            return;
        }
        let Some(record) = room.registry.get_mut(player) else {
            return;
        };
        record.color = Some(color);
        room.broadcast_players();
    }

    fn set_theme(&self, room: &mut GameRoom, theme: String) {
        if room.phase != Phase::Lobby || !THEMES.contains(&theme.as_str()) {
            return;
        }
        room.theme = theme;
        room.broadcast_players();
    }

    fn mark_ready(self: &Arc<Self>, room: &mut GameRoom, player: PlayerId) {
        if room.phase != Phase::Lobby {
            return;
        }
        let Some(record) = room.registry.get_mut(player) else {
            return;
        };
        if record.spectator {
            return;
        }
        record.ready = true;
        room.broadcast_players();
        self.maybe_start(room);
    }

    fn relay_chat(&self, room: &GameRoom, player: PlayerId, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let Some(record) = room.registry.get(player) else {
            return;
        };
        room.broadcast(&ServerMsg::Chat {
            player,
            name: record.name.clone(),
            avatar: record.avatar.clone(),
            msg: text.to_string(),
        });
    }

    /// First half of a click: claim the cell. Losing the race produces no
    /// broadcast at all; clients infer failure from the silence.
    fn claim_cell(self: &Arc<Self>, room: &mut GameRoom, player: PlayerId, row: usize, col: usize) {
        if room.phase != Phase::Active {
            return;
        }
        match room.registry.get(player) {
            Some(record) if !record.spectator => {}
            _ => return,
        }
        if !room.board.lock_cell(row, col, player) {
            debug!(player, row, col, "[ROUND] claim lost or out of bounds");
            return;
        }
        room.broadcast(&ServerMsg::Lock { row, col, player });
        self.schedule_reveal(room, player, row, col);
    }

    /// Start condition: at least one non-spectator present and every
    /// non-spectator ready. Discloses a fresh board and hands over to the
    /// preview countdown.
    fn maybe_start(self: &Arc<Self>, room: &mut GameRoom) {
        if room.phase != Phase::Lobby
            || room.registry.active_count() == 0
            || !room.registry.all_active_ready()
        {
            return;
        }

        room.phase = Phase::Previewing;
        room.board = Board::new(self.config.board_size);
        room.round_token = CancellationToken::new();
        room.broadcast(&ServerMsg::Start {
            size: self.config.board_size,
            theme: room.theme.clone(),
            layout: room.board.layout(),
            preview: self.config.preview.as_secs(),
        });
        info!(
            players = room.registry.active_count(),
            theme = %room.theme,
            "[ROUND] all ready, preview started"
        );
        self.spawn_preview(room);
    }
}
