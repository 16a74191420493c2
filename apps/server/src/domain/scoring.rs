//! Streak penalties and end-of-round ranking.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

/// Consecutive bombs before the penalty escalates.
pub const STREAK_LIMIT: u8 = 3;

const BOMB_PENALTY: i64 = -1;
const ESCALATED_PENALTY: i64 = -5;

/// Applied score delta and next streak value for one reveal.
///
/// The third consecutive bomb costs `ESCALATED_PENALTY` and restarts the
/// count; any non-negative payout pays face value and clears the streak.
/// The rule depends only on the revealing player's own sequence.
pub fn apply_reveal(streak: u8, payout: i32) -> (i64, u8) {
    if payout < 0 {
        let streak = streak + 1;
        if streak >= STREAK_LIMIT {
            (ESCALATED_PENALTY, 0)
        } else {
            (BOMB_PENALTY, streak)
        }
    } else {
        (i64::from(payout), 0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: PlayerId,
    pub name: String,
    pub score: i64,
}

/// Rank entries by descending score (stable, so ties keep registration
/// order) and collect every player tied at the top as a winner.
pub fn leaderboard(mut entries: Vec<LeaderboardEntry>) -> (Vec<LeaderboardEntry>, Vec<PlayerId>) {
    entries.sort_by_key(|entry| Reverse(entry.score));
    let winners = match entries.first() {
        Some(top) => {
            let best = top.score;
            entries
                .iter()
                .filter(|entry| entry.score == best)
                .map(|entry| entry.player)
                .collect()
        }
        None => Vec::new(),
    };
    (entries, winners)
}
