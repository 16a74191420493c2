//! Round lifecycle: the preview countdown, the 1 Hz clock, delayed reveals
//! and termination. Every timer belongs to the round's cancellation token,
//! so finishing deterministically kills anything still pending instead of
//! relying on stale callbacks to no-op.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use super::{GameRoom, GameServer};
use crate::config::RoundPolicy;
use crate::domain::{scoring, Board, Phase, PlayerId};
use crate::protocol::ServerMsg;

impl GameServer {
    pub(crate) fn spawn_preview(self: &Arc<Self>, room: &GameRoom) {
        let server = self.clone();
        let token = room.round_token.clone();
        let preview = self.config.preview;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(preview) => server.begin_round(),
            }
        });
    }

    fn begin_round(self: &Arc<Self>) {
        let mut room = self.room.lock();
        if room.phase != Phase::Previewing {
            return;
        }
        room.phase = Phase::Active;
        room.started_at = Some(Instant::now());
        room.broadcast(&ServerMsg::Begin);
        info!("[ROUND] active");
        self.spawn_ticker(&room);
    }

    fn spawn_ticker(self: &Arc<Self>, room: &GameRoom) {
        let server = self.clone();
        let token = room.round_token.clone();
        tokio::spawn(async move {
            let mut clock = tokio::time::interval(Duration::from_secs(1));
            loop {
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = clock.tick() => {
                        if server.tick() {
                            return;
                        }
                    }
                }
            }
        });
    }

    /// One clock beat: publish remaining time, finish when the countdown or
    /// the board is exhausted. Returns true when the loop should stop.
    fn tick(&self) -> bool {
        let mut room = self.room.lock();
        if room.phase != Phase::Active {
            return true;
        }
        let Some(started_at) = room.started_at else {
            return true;
        };

        let elapsed = started_at.elapsed();
        let left = self
            .config
            .time_limit
            .as_secs()
            .saturating_sub(elapsed.as_secs());
        room.broadcast(&ServerMsg::Time { left });

        if elapsed >= self.config.time_limit || room.board.is_complete() {
            self.finish_round(&mut room);
            return true;
        }
        false
    }

    pub(crate) fn schedule_reveal(
        self: &Arc<Self>,
        room: &GameRoom,
        player: PlayerId,
        row: usize,
        col: usize,
    ) {
        let server = self.clone();
        let token = room.round_token.clone();
        let delay = self.config.reveal_delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => server.resolve_reveal(player, row, col),
            }
        });
    }

    /// The delayed half of a claim. A finished round or an owner mismatch
    /// pays nothing; a vanished owner still resolves the cell for everyone
    /// to see, but scores nobody.
    fn resolve_reveal(&self, player: PlayerId, row: usize, col: usize) {
        let mut room = self.room.lock();
        if room.phase != Phase::Active {
            return;
        }
        let Some(payout) = room.board.reveal_cell(row, col, player) else {
            return;
        };

        let coins = match room.registry.get_mut(player) {
            Some(record) => {
                let (delta, streak) = scoring::apply_reveal(record.streak, payout);
                record.streak = streak;
                record.score += delta;
                delta
            }
            None => i64::from(payout),
        };

        room.broadcast(&ServerMsg::Reveal {
            row,
            col,
            player,
            coins,
        });
        if let Some(record) = room.registry.get(player) {
            room.broadcast(&ServerMsg::Score {
                player,
                score: record.score,
            });
        }

        if room.board.is_complete() {
            self.finish_round(&mut room);
        }
    }

    /// Terminal transition; the first caller wins. Cancels the round token
    /// before broadcasting so no late tick or reveal touches the finished
    /// round, then applies the configured end-of-round policy.
    pub(crate) fn finish_round(&self, room: &mut GameRoom) {
        if room.phase == Phase::Finished {
            return;
        }
        room.phase = Phase::Finished;
        room.started_at = None;
        room.round_token.cancel();

        let (leaderboard, winners) = scoring::leaderboard(room.registry.score_rows());
        info!(?winners, "[ROUND] game over");
        room.broadcast(&ServerMsg::GameOver {
            leaderboard,
            winners,
        });

        if self.config.round_policy == RoundPolicy::Relobby {
            room.phase = Phase::Lobby;
            room.board = Board::new(self.config.board_size);
            room.registry.reset_for_lobby();
            room.broadcast_players();
        }
    }
}
