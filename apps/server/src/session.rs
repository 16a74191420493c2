//! Connected-player records, monotonic id allocation, and the snapshots the
//! broadcast paths consume. Every mutation happens under the room's
//! exclusive region; nothing here iterates a live structure outside it.

use std::collections::BTreeMap;

use rand::seq::IndexedRandom;
use tokio::sync::mpsc::UnboundedSender;

use crate::domain::scoring::LeaderboardEntry;
use crate::domain::PlayerId;
use crate::protocol::PlayerInfo;

const AVATARS: [&str; 15] = [
    "😎", "🤖", "🐱", "🐶", "🦄", "👾", "🦊", "🐼", "🐸", "🐵", "🐯", "🐨", "🥸", "🦁", "🐙",
];

pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub avatar: String,
    pub color: Option<String>,
    pub ready: bool,
    pub spectator: bool,
    pub score: i64,
    pub streak: u8,
    sender: UnboundedSender<String>,
}

/// The roster. Keyed by id, which is also registration order.
pub struct SessionRegistry {
    next_id: PlayerId,
    players: BTreeMap<PlayerId, PlayerRecord>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            players: BTreeMap::new(),
        }
    }

    /// Allocate the next id (never reused) and enter the player with
    /// placeholder attributes. Spectators count as ready by definition.
    pub fn register(
        &mut self,
        sender: UnboundedSender<String>,
        spectator: bool,
    ) -> (PlayerId, String) {
        let id = self.next_id;
        self.next_id += 1;

        let avatar = AVATARS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or("🙂")
            .to_string();
        self.players.insert(
            id,
            PlayerRecord {
                id,
                name: format!("P{id}"),
                avatar: avatar.clone(),
                color: None,
                ready: spectator,
                spectator,
                score: 0,
                streak: 0,
                sender,
            },
        );
        (id, avatar)
    }

    pub fn remove(&mut self, id: PlayerId) -> bool {
        self.players.remove(&id).is_some()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.players.get(&id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut PlayerRecord> {
        self.players.get_mut(&id)
    }

    /// Non-spectator head count (start condition, auto-win).
    pub fn active_count(&self) -> usize {
        self.players.values().filter(|p| !p.spectator).count()
    }

    /// Vacuously true with no non-spectators; callers gate on
    /// `active_count` separately.
    pub fn all_active_ready(&self) -> bool {
        self.players
            .values()
            .filter(|p| !p.spectator)
            .all(|p| p.ready)
    }

    pub fn color_taken(&self, color: &str, claimant: PlayerId) -> bool {
        self.players
            .values()
            .any(|p| p.id != claimant && p.color.as_deref() == Some(color))
    }

    /// Roster snapshot in registration order, for PLAYERS broadcasts.
    pub fn roster(&self) -> Vec<PlayerInfo> {
        self.players
            .values()
            .map(|p| PlayerInfo {
                player: p.id,
                name: p.name.clone(),
                avatar: p.avatar.clone(),
                color: p.color.clone(),
                ready: p.ready,
                spectate: p.spectator,
            })
            .collect()
    }

    /// Score rows in registration order, the leaderboard input.
    pub fn score_rows(&self) -> Vec<LeaderboardEntry> {
        self.players
            .values()
            .map(|p| LeaderboardEntry {
                player: p.id,
                name: p.name.clone(),
                score: p.score,
            })
            .collect()
    }

    /// Snapshot of every outbound queue.
    pub fn senders(&self) -> Vec<UnboundedSender<String>> {
        self.players.values().map(|p| p.sender.clone()).collect()
    }

    /// Back to a clean lobby: scores, streaks and readiness cleared,
    /// spectators promoted to regular players.
    pub fn reset_for_lobby(&mut self) {
        for player in self.players.values_mut() {
            player.ready = false;
            player.spectator = false;
            player.score = 0;
            player.streak = 0;
        }
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::SessionRegistry;

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut registry = SessionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        let (a, _) = registry.register(tx.clone(), false);
        let (b, _) = registry.register(tx.clone(), false);
        assert!(registry.remove(b));

        let (c, _) = registry.register(tx, false);
        assert_eq!((a, b, c), (1, 2, 3));
    }

    #[test]
    fn spectators_are_excluded_from_start_checks() {
        let mut registry = SessionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        let (player, _) = registry.register(tx.clone(), false);
        let _spectator = registry.register(tx, true);

        assert_eq!(registry.active_count(), 1);
        assert!(!registry.all_active_ready());

        registry.get_mut(player).unwrap().ready = true;
        assert!(registry.all_active_ready());
    }

    #[test]
    fn color_uniqueness_ignores_the_claimant() {
        let mut registry = SessionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        let (a, _) = registry.register(tx.clone(), false);
        let (b, _) = registry.register(tx, false);
        registry.get_mut(a).unwrap().color = Some("#2ecc71".to_string());

        assert!(registry.color_taken("#2ecc71", b));
        // Re-picking your own color is not a conflict.
        assert!(!registry.color_taken("#2ecc71", a));
    }

    #[test]
    fn reset_clears_round_state_and_promotes_spectators() {
        let mut registry = SessionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        let (player, _) = registry.register(tx.clone(), false);
        let (watcher, _) = registry.register(tx, true);
        {
            let record = registry.get_mut(player).unwrap();
            record.ready = true;
            record.score = 7;
            record.streak = 2;
        }

        registry.reset_for_lobby();

        let record = registry.get(player).unwrap();
        assert!(!record.ready);
        assert_eq!((record.score, record.streak), (0, 0));
        assert!(!registry.get(watcher).unwrap().spectator);
        assert_eq!(registry.active_count(), 2);
    }
}
