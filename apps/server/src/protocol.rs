//! Wire protocol: one JSON message per line, tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::domain::scoring::LeaderboardEntry;
use crate::domain::PlayerId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMsg {
    Join { name: String },
    Name { name: String },
    Color { color: String },
    Theme { theme: String },
    Ready,
    Chat { msg: String },
    Click { row: usize, col: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMsg {
    Welcome {
        player: PlayerId,
        avatar: String,
        spectator: bool,
        size: usize,
    },

    Players {
        players: Vec<PlayerInfo>,
        theme: String,
    },

    Chat {
        player: PlayerId,
        name: String,
        avatar: String,
        msg: String,
    },

    Start {
        size: usize,
        theme: String,
        layout: Vec<Vec<i32>>,
        preview: u64,
    },

    Begin,

    Time {
        left: u64,
    },

    Lock {
        row: usize,
        col: usize,
        player: PlayerId,
    },

    Reveal {
        row: usize,
        col: usize,
        player: PlayerId,
        coins: i64,
    },

    Score {
        player: PlayerId,
        score: i64,
    },

    #[serde(rename = "GAMEOVER")]
    GameOver {
        leaderboard: Vec<LeaderboardEntry>,
        winners: Vec<PlayerId>,
    },

    Error {
        msg: String,
    },
}

/// One roster row in a PLAYERS broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub player: PlayerId,
    pub name: String,
    pub avatar: String,
    pub color: Option<String>,
    pub ready: bool,
    pub spectate: bool,
}
